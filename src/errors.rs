//! # Error Types Module
//!
//! This module defines the error types used by configuration loading and the
//! search client.

/// Errors raised while reading the startup configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A required variable is unset or blank
    Missing(&'static str),
    /// A numeric variable could not be parsed
    InvalidNumber { key: &'static str, value: String },
    /// The default language is neither `ru` nor `en`
    InvalidLanguage(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "Missing {key} in environment or .env"),
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{key} must be a positive number, got '{value}'")
            }
            ConfigError::InvalidLanguage(value) => {
                write!(f, "Unsupported language '{value}', expected 'ru' or 'en'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors returned by a search request
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// The service answered with a non-success HTTP status
    Http(u16),
    /// The service reported an error code in its response body
    Api(String),
    /// The request did not complete within the configured timeout
    Timeout,
    /// The request could not be sent or the response could not be read
    Transport(String),
    /// The response body was not the expected JSON shape
    Decode(String),
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchError::Http(status) => write!(f, "HTTP {status}"),
            SearchError::Api(code) => f.write_str(code),
            SearchError::Timeout => write!(f, "Request timed out"),
            SearchError::Transport(msg) => write!(f, "Request failed: {msg}"),
            SearchError::Decode(msg) => write!(f, "Invalid response: {msg}"),
        }
    }
}

impl std::error::Error for SearchError {}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SearchError::Timeout
        } else if let Some(status) = err.status() {
            SearchError::Http(status.as_u16())
        } else if err.is_decode() {
            SearchError::Decode(err.to_string())
        } else {
            SearchError::Transport(err.to_string())
        }
    }
}

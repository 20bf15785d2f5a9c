//! # Configuration Module
//!
//! This module defines the startup configuration of the bot. Values are read
//! once from the environment (after `.env` has been loaded) and never change
//! afterwards.

use std::fmt;
use std::time::Duration;

use crate::dialogue::Language;
use crate::errors::ConfigError;
use crate::text_processing::DEFAULT_CHUNK_LIMIT;

// Environment variable names
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";
pub const API_TOKEN_VAR: &str = "LEAKOSINT_API_TOKEN";
pub const API_URL_VAR: &str = "LEAKOSINT_API_URL";
pub const LANGUAGE_VAR: &str = "LEAKOSINT_LANG";
pub const LIMIT_VAR: &str = "LEAKOSINT_LIMIT";
pub const TIMEOUT_VAR: &str = "LEAKOSINT_TIMEOUT_SECS";
pub const CHUNK_LIMIT_VAR: &str = "MESSAGE_CHUNK_LIMIT";

// Defaults
pub const DEFAULT_API_URL: &str = "https://leakosintapi.com/";
pub const DEFAULT_RESULT_LIMIT: u32 = 100;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Number of token characters that may appear in logs
const TOKEN_LOG_PREFIX: usize = 10;

/// Settings for the search service client
#[derive(Clone)]
pub struct SearchConfig {
    /// Endpoint receiving the JSON POST
    pub api_url: String,
    /// Credential sent in every request body
    pub api_token: String,
    /// Maximum number of results requested per search
    pub result_limit: u32,
    /// Upper bound on a single search request
    pub timeout: Duration,
}

impl fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchConfig")
            .field("api_url", &self.api_url)
            .field("api_token", &"<redacted>")
            .field("result_limit", &self.result_limit)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Complete bot configuration
#[derive(Clone)]
pub struct BotConfig {
    /// Telegram bot credential
    pub telegram_token: String,
    /// Language used until the first toggle
    pub default_language: Language,
    /// Maximum characters per delivered chunk
    pub chunk_limit: usize,
    pub search: SearchConfig,
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("telegram_token", &"<redacted>")
            .field("default_language", &self.default_language)
            .field("chunk_limit", &self.chunk_limit)
            .field("search", &self.search)
            .finish()
    }
}

impl BotConfig {
    /// Read the configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    ///
    /// Values are trimmed and blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` when a credential is missing, a number does
    /// not parse, or the language is not supported.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use leakosint_bot::config::BotConfig;
    ///
    /// let config = BotConfig::from_lookup(|key| match key {
    ///     "TELEGRAM_BOT_TOKEN" => Some("123:abc".to_string()),
    ///     "LEAKOSINT_API_TOKEN" => Some("secret".to_string()),
    ///     _ => None,
    /// })?;
    /// assert_eq!(config.search.result_limit, 100);
    /// assert_eq!(config.chunk_limit, 3500);
    /// # Ok::<(), leakosint_bot::errors::ConfigError>(())
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let telegram_token = get(TELEGRAM_TOKEN_VAR).ok_or(ConfigError::Missing(TELEGRAM_TOKEN_VAR))?;
        let api_token = get(API_TOKEN_VAR).ok_or(ConfigError::Missing(API_TOKEN_VAR))?;
        let api_url = get(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let default_language = match get(LANGUAGE_VAR) {
            Some(code) => Language::from_code(&code).ok_or(ConfigError::InvalidLanguage(code))?,
            None => Language::Ru,
        };

        let result_limit = parse_number(LIMIT_VAR, get(LIMIT_VAR), DEFAULT_RESULT_LIMIT)?;
        let timeout_secs = parse_number(TIMEOUT_VAR, get(TIMEOUT_VAR), DEFAULT_TIMEOUT_SECS)?;
        let chunk_limit = parse_number(CHUNK_LIMIT_VAR, get(CHUNK_LIMIT_VAR), DEFAULT_CHUNK_LIMIT)?;

        Ok(Self {
            telegram_token,
            default_language,
            chunk_limit,
            search: SearchConfig {
                api_url,
                api_token,
                result_limit,
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }

    /// Start of the bot token, safe to log
    pub fn telegram_token_prefix(&self) -> &str {
        let end = self
            .telegram_token
            .char_indices()
            .nth(TOKEN_LOG_PREFIX)
            .map(|(index, _)| index)
            .unwrap_or(self.telegram_token.len());
        &self.telegram_token[..end]
    }
}

fn parse_number<T>(key: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialEq + Default,
{
    match value {
        None => Ok(default),
        Some(raw) => match raw.parse::<T>() {
            Ok(number) if number != T::default() => Ok(number),
            _ => Err(ConfigError::InvalidNumber { key, value: raw }),
        },
    }
}

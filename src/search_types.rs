//! # Search Types Module
//!
//! This module defines the typed view of a LeakOSINT API response. The raw
//! JSON is decoded exactly once, at the client boundary, into either a
//! failure carrying the API error code or a [`SearchResult`] whose databases,
//! records and columns keep the order in which the API sent them.

use std::fmt;

use serde_json::{Map, Value};
use tracing::debug;

use crate::dialogue::Language;
use crate::errors::SearchError;

/// JSON field whose presence marks an application-level failure
pub const ERROR_CODE_FIELD: &str = "Error code";
/// JSON field mapping database names to entries
pub const LIST_FIELD: &str = "List";
/// Per-database free-text description
pub const SUMMARY_FIELD: &str = "InfoLeak";
/// Per-database array of records
pub const RECORDS_FIELD: &str = "Data";

// Floats of this magnitude or more keep their JSON text
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// Parameters of one search request
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    /// The free-text query typed by the user
    pub query: String,
    /// Language the API should answer in
    pub language: Language,
    /// Maximum number of results requested
    pub limit: u32,
}

/// A single scalar cell of a record
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    /// Arrays and objects, kept as compact JSON text
    Nested(String),
}

impl From<&Value> for FieldValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(*b),
            Value::Number(n) => FieldValue::Number(n.clone()),
            Value::String(s) => FieldValue::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => FieldValue::Nested(value.to_string()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Bool(b) => write!(f, "{b}"),
            // Integral floats render without a fractional part, `1.0` as `1`
            FieldValue::Number(n) => match n.as_f64() {
                Some(x) if n.is_f64() && x.fract() == 0.0 && x.abs() < MAX_EXACT_FLOAT => {
                    write!(f, "{}", x as i64)
                }
                _ => write!(f, "{n}"),
            },
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Nested(json) => f.write_str(json),
        }
    }
}

/// One row of column/value pairs, in API order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    pub columns: Vec<(String, FieldValue)>,
}

impl Record {
    fn from_object(object: &Map<String, Value>) -> Self {
        Self {
            columns: object
                .iter()
                .map(|(column, value)| (column.clone(), FieldValue::from(value)))
                .collect(),
        }
    }
}

/// One named database within a search result
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DatabaseEntry {
    pub name: String,
    pub summary: Option<String>,
    pub records: Vec<Record>,
}

impl DatabaseEntry {
    /// Decode an entry leniently: missing or mistyped fields become empty
    fn from_value(name: &str, value: &Value) -> Self {
        let summary = value
            .get(SUMMARY_FIELD)
            .map(FieldValue::from)
            .map(|summary| summary.to_string())
            .filter(|summary| !summary.is_empty());

        let records = match value.get(RECORDS_FIELD).and_then(Value::as_array) {
            Some(rows) => rows
                .iter()
                .filter_map(|row| match row.as_object() {
                    Some(object) => Some(Record::from_object(object)),
                    None => {
                        debug!(database = %name, "Skipping non-object record");
                        None
                    }
                })
                .collect(),
            None => Vec::new(),
        };

        Self {
            name: name.to_string(),
            summary,
            records,
        }
    }
}

/// Successful search result
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchResult {
    pub entries: Vec<DatabaseEntry>,
}

impl SearchResult {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Decoded API response
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResponse {
    Failure { error_code: String },
    Success(SearchResult),
}

impl SearchResponse {
    /// Decode a response body
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Decode` when the body is not a JSON object.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use leakosint_bot::search_types::SearchResponse;
    /// use serde_json::json;
    ///
    /// let response = SearchResponse::from_json(json!({"Error code": "no data"}))?;
    /// assert_eq!(response, SearchResponse::Failure { error_code: "no data".to_string() });
    /// # Ok::<(), leakosint_bot::errors::SearchError>(())
    /// ```
    pub fn from_json(body: Value) -> Result<Self, SearchError> {
        let object = match body {
            Value::Object(object) => object,
            other => {
                return Err(SearchError::Decode(format!(
                    "expected a JSON object, got {}",
                    json_kind(&other)
                )))
            }
        };

        if let Some(code) = object.get(ERROR_CODE_FIELD).filter(|code| is_truthy(code)) {
            return Ok(SearchResponse::Failure {
                error_code: FieldValue::from(code).to_string(),
            });
        }

        let entries = object
            .get(LIST_FIELD)
            .and_then(Value::as_object)
            .map(|list| {
                list.iter()
                    .map(|(name, entry)| DatabaseEntry::from_value(name, entry))
                    .collect()
            })
            .unwrap_or_default();

        Ok(SearchResponse::Success(SearchResult { entries }))
    }

    /// Convert into a result, turning an API error code into `SearchError::Api`
    pub fn into_result(self) -> Result<SearchResult, SearchError> {
        match self {
            SearchResponse::Success(result) => Ok(result),
            SearchResponse::Failure { error_code } => Err(SearchError::Api(error_code)),
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

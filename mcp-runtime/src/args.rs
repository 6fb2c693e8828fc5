//! Argument extraction and coercion for tool calls.
//!
//! Tool arguments arrive as an untyped JSON object. The helpers here pull
//! individual values out of that object and coerce them into the shapes the
//! API client expects. A JSON `null` is treated the same as an absent key for
//! every optional accessor. Required string parameters additionally treat the
//! empty string as absent, so callers cannot slip a zero value past the
//! required check.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

pub type ArgumentMap = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgError {
    #[error("missing required parameter: {0}")]
    MissingParameter(String),
    #[error("parameter {key} must be a {expected}")]
    TypeMismatch { key: String, expected: &'static str },
    #[error("parameter {key} is not a valid RFC 3339 timestamp: {value}")]
    InvalidTimestamp { key: String, value: String },
    #[error("parameter {key} is not a valid integer: {value}")]
    InvalidInteger { key: String, value: String },
}

impl ArgError {
    fn type_mismatch(key: &str, expected: &'static str) -> Self {
        Self::TypeMismatch {
            key: key.to_string(),
            expected,
        }
    }
}

/// Required non-empty string. Absent, `null`, and `""` all report the
/// parameter as missing; any other non-string type is a mismatch.
pub fn required_str(args: &ArgumentMap, key: &str) -> Result<String, ArgError> {
    match args.get(key) {
        None | Some(Value::Null) => Err(ArgError::MissingParameter(key.to_string())),
        Some(Value::String(s)) if s.is_empty() => Err(ArgError::MissingParameter(key.to_string())),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ArgError::type_mismatch(key, "string")),
    }
}

/// Optional string; absent and `null` yield the empty string.
pub fn optional_str(args: &ArgumentMap, key: &str) -> Result<String, ArgError> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ArgError::type_mismatch(key, "string")),
    }
}

/// Optional integer; absent and `null` yield zero. Accepts JSON numbers with
/// a fractional part by truncating, matching how clients tend to send
/// round-number floats.
pub fn optional_i64(args: &ArgumentMap, key: &str) -> Result<i64, ArgError> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .ok_or_else(|| ArgError::type_mismatch(key, "integer")),
        Some(_) => Err(ArgError::type_mismatch(key, "integer")),
    }
}

/// Optional boolean; absent and `null` yield `false`.
pub fn optional_bool(args: &ArgumentMap, key: &str) -> Result<bool, ArgError> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(ArgError::type_mismatch(key, "boolean")),
    }
}

/// Optional boolean that preserves the distinction between "absent" and an
/// explicit `false`. Used where the API treats omission as "leave unchanged".
pub fn optional_bool_flag(args: &ArgumentMap, key: &str) -> Result<Option<bool>, ArgError> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(ArgError::type_mismatch(key, "boolean")),
    }
}

/// Optional integer carried as a string, for APIs that quote numeric fields.
/// The empty string decays to zero; anything else must parse as a base-10
/// integer.
pub fn optional_str_int(args: &ArgumentMap, key: &str) -> Result<i64, ArgError> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(0),
        Some(Value::String(s)) if s.is_empty() => Ok(0),
        Some(Value::String(s)) => s.parse::<i64>().map_err(|_| ArgError::InvalidInteger {
            key: key.to_string(),
            value: s.clone(),
        }),
        Some(_) => Err(ArgError::type_mismatch(key, "string")),
    }
}

/// Optional RFC 3339 timestamp; absent, `null`, and `""` yield `None`.
/// A present non-empty value must parse or the call is rejected.
pub fn optional_timestamp(
    args: &ArgumentMap,
    key: &str,
) -> Result<Option<DateTime<Utc>>, ArgError> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(s)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|_| ArgError::InvalidTimestamp {
                key: key.to_string(),
                value: s.clone(),
            }),
        Some(_) => Err(ArgError::type_mismatch(key, "string")),
    }
}

/// Optional array of strings; absent and `null` yield an empty vec. Every
/// element must be a string.
pub fn optional_string_array(args: &ArgumentMap, key: &str) -> Result<Vec<String>, ArgError> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                _ => Err(ArgError::type_mismatch(key, "array of strings")),
            })
            .collect(),
        Some(_) => Err(ArgError::type_mismatch(key, "array of strings")),
    }
}

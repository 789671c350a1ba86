//! Parsing of interval lists supplied as JSON.
//!
//! The accepted document is an array of `{"from": <date>, "to": <date>}`
//! objects. Every record is validated before anything is returned, so callers
//! either get the whole list or an error naming the first bad record.

use serde_json::Value;
use thiserror::Error;

use crate::interval::{DateInterval, ValidationError};

/// Errors for documents that are not a well-formed list of interval records.
#[derive(Debug, Error)]
pub enum InputShapeError {
    /// The document is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level value is not an array.
    #[error("expected a JSON array of intervals, got {found}")]
    NotAnArray { found: &'static str },

    /// A record lacks a field or has a non-string value for it.
    #[error("record {index}: missing or non-string field `{field}`")]
    MissingField { index: usize, field: &'static str },

    /// A record has both fields but they do not form a valid interval.
    #[error("record {index}: {source}")]
    Record {
        index: usize,
        #[source]
        source: ValidationError,
    },
}

/// Parses a JSON document into intervals.
///
/// Record indices in errors are 1-based.
pub fn parse_records(json: &str) -> Result<Vec<DateInterval>, InputShapeError> {
    let value: Value = serde_json::from_str(json)?;
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(InputShapeError::NotAnArray {
                found: value_kind(&other),
            });
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| parse_record(idx + 1, item))
        .collect()
}

fn parse_record(index: usize, item: &Value) -> Result<DateInterval, InputShapeError> {
    let field = |name: &'static str| {
        item.get(name)
            .and_then(Value::as_str)
            .ok_or(InputShapeError::MissingField { index, field: name })
    };
    let from = field("from")?;
    let to = field("to")?;
    DateInterval::parse(from, to).map_err(|source| InputShapeError::Record { index, source })
}

const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

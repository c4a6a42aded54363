//! Conversions from the API's string-typed wire fields to native values.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::error::DecodeError;

/// Layout used by the API for timestamps that are not RFC 3339.
const PLAIN_TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S";

/// Parses a decimal amount or rate.
///
/// The text must be a finite floating-point literal; anything else (including
/// the empty string) is an error.
pub fn parse_amount(field: &'static str, value: &str) -> Result<f64, DecodeError> {
    match value.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => Ok(parsed),
        _ => Err(DecodeError::InvalidAmount {
            field,
            value: value.to_string(),
        }),
    }
}

/// Like [`parse_amount`], but an empty string means "no value".
pub fn parse_optional_amount(field: &'static str, value: &str) -> Result<Option<f64>, DecodeError> {
    if value.is_empty() {
        return Ok(None);
    }
    parse_amount(field, value).map(Some)
}

/// Parses an RFC 3339 or `YYYY-MM-DD HH:MM:SS` (UTC) timestamp.
///
/// Empty means "no value".
pub fn parse_timestamp(
    field: &'static str,
    value: &str,
) -> Result<Option<DateTime<Utc>>, DecodeError> {
    if value.is_empty() {
        return Ok(None);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(Some(ts.with_timezone(&Utc)));
    }
    NaiveDateTime::parse_from_str(value, PLAIN_TIMESTAMP)
        .map(|naive| Some(naive.and_utc()))
        .map_err(|_| DecodeError::InvalidTimestamp {
            field,
            value: value.to_string(),
        })
}

/// Reads a wire field as text whatever JSON scalar the server put there.
///
/// `null` becomes the empty string, numbers and booleans their JSON text,
/// and nested objects or arrays their serialized form.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

//! Row-to-entity parsing helpers and SQL value conversion.
//!
//! Every repo needs to convert `libsql::Row` (column-indexed) into typed entity
//! structs. These helpers isolate the parsing logic and handle the dual datetime
//! format issue (`SQLite`'s `datetime('now')` vs Rust's `to_rfc3339()`), numeric
//! columns that may hold either INTEGER or REAL values, and JSON TEXT columns.

use chrono::{DateTime, NaiveDate, Utc};
use libsql::Value;
use serde::Serialize;

use crate::error::DatabaseError;

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00+00:00"`) and `SQLite`'s default
/// format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse an optional TEXT column as `Option<DateTime<Utc>>`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string cannot be parsed.
pub fn parse_optional_datetime(s: Option<&str>) -> Result<Option<DateTime<Utc>>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => Ok(Some(parse_datetime(s)?)),
        _ => Ok(None),
    }
}

/// Parse a business date. Accepts `YYYY-MM-DD` and anything that starts with
/// one (`2025-01-12T00:00:00Z`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if no date can be read.
pub fn parse_date(s: &str) -> Result<NaiveDate, DatabaseError> {
    let head = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(head, "%Y-%m-%d")
        .map_err(|e| DatabaseError::Query(format!("Failed to parse date '{s}': {e}")))
}

/// Parse an optional business date column.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string cannot be parsed.
pub fn parse_optional_date(s: Option<&str>) -> Result<Option<NaiveDate>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => Ok(Some(parse_date(s)?)),
        _ => Ok(None),
    }
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
/// You must use `get::<Option<String>>()` for nullable columns.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Read a nullable numeric column as `f64`, accepting INTEGER, REAL, or
/// numeric TEXT.
///
/// # Errors
///
/// Returns `DatabaseError::Query` for BLOBs and non-numeric text.
#[allow(clippy::cast_precision_loss)]
pub fn get_opt_f64(row: &libsql::Row, idx: i32) -> Result<Option<f64>, DatabaseError> {
    match row.get_value(idx)? {
        Value::Null => Ok(None),
        Value::Integer(i) => Ok(Some(i as f64)),
        Value::Real(f) => Ok(Some(f)),
        Value::Text(t) if t.trim().is_empty() => Ok(None),
        Value::Text(t) => t
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| DatabaseError::Query(format!("Column {idx} is not numeric: {e}"))),
        Value::Blob(_) => Err(DatabaseError::Query(format!("Column {idx} is a blob"))),
    }
}

/// Read a numeric column as `f64`, treating NULL as 0.
///
/// # Errors
///
/// Same as [`get_opt_f64`].
pub fn get_f64(row: &libsql::Row, idx: i32) -> Result<f64, DatabaseError> {
    Ok(get_opt_f64(row, idx)?.unwrap_or(0.0))
}

/// Read a nullable integer column, truncating REAL values.
///
/// # Errors
///
/// Same as [`get_opt_f64`].
#[allow(clippy::cast_possible_truncation)]
pub fn get_opt_i64(row: &libsql::Row, idx: i32) -> Result<Option<i64>, DatabaseError> {
    match row.get_value(idx)? {
        Value::Integer(i) => Ok(Some(i)),
        _ => Ok(get_opt_f64(row, idx)?.map(|f| f as i64)),
    }
}

/// Read an integer column, treating NULL as 0.
///
/// # Errors
///
/// Same as [`get_opt_f64`].
pub fn get_i64(row: &libsql::Row, idx: i32) -> Result<i64, DatabaseError> {
    Ok(get_opt_i64(row, idx)?.unwrap_or(0))
}

/// Read an INTEGER 0/1 column; NULL is `false`.
///
/// # Errors
///
/// Same as [`get_opt_f64`].
pub fn get_bool(row: &libsql::Row, idx: i32) -> Result<bool, DatabaseError> {
    Ok(get_opt_i64(row, idx)?.is_some_and(|v| v != 0))
}

/// Extract an optional JSON value from a TEXT column.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string contains invalid JSON.
pub fn parse_optional_json(s: Option<&str>) -> Result<Option<serde_json::Value>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => {
            let val = serde_json::from_str(s)
                .map_err(|e| DatabaseError::Query(format!("Invalid JSON in column: {e}")))?;
            Ok(Some(val))
        }
        _ => Ok(None),
    }
}

/// Read a JSON TEXT column leniently: invalid JSON is kept as a JSON string so
/// the tolerant parsers in `oms_core::details` can decide what to do with it.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_json_lenient(
    row: &libsql::Row,
    idx: i32,
) -> Result<Option<serde_json::Value>, DatabaseError> {
    Ok(get_opt_string(row, idx)?.map(|s| {
        serde_json::from_str(&s).unwrap_or(serde_json::Value::String(s))
    }))
}

/// Convert a JSON value into the SQL value stored for it.
///
/// Arrays and objects are stored as JSON text; booleans as 0/1.
#[must_use]
pub fn json_to_sql(value: &serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Integer(i64::from(*b)),
        serde_json::Value::Number(n) => n
            .as_i64()
            .map_or_else(|| Value::Real(n.as_f64().unwrap_or(0.0)), Value::Integer),
        serde_json::Value::String(s) => Value::Text(s.clone()),
        other => Value::Text(other.to_string()),
    }
}

/// Serialize an update struct into its `column -> value` map.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` if the update does not serialize to
/// a JSON object.
pub fn update_fields<T: Serialize>(
    update: &T,
) -> Result<serde_json::Map<String, serde_json::Value>, DatabaseError> {
    match serde_json::to_value(update)? {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(DatabaseError::InvalidState(format!(
            "update must serialize to an object, got {other}"
        ))),
    }
}

/// `?{start}, ?{start+1}, ...` for an `IN (...)` list of `count` values.
#[must_use]
pub fn placeholders(start: usize, count: usize) -> String {
    (start..start + count)
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Serialize a list column value (`Vec<String>`, details arrays) to JSON text.
///
/// # Errors
///
/// Returns `DatabaseError::Other` if serialization fails.
pub fn to_json_text<T: Serialize + ?Sized>(value: &T) -> Result<String, DatabaseError> {
    Ok(serde_json::to_string(value)?)
}

//! # JSON Field Accessors
//!
//! Total accessors over `serde_json::Value` used by the decoders. Every
//! accessor returns `None` when a field is missing or has an unexpected JSON
//! type, so callers decide per field whether absence is acceptable.

use chrono::{DateTime, FixedOffset};
use serde_json::{Map, Value};

use crate::error::{BitbucketError, Result};

/// A decoded JSON object
pub type Object = Map<String, Value>;

/// Name of the JSON type of `value`, for error messages
pub const fn kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}

/// Require `value` to be an object
pub fn as_object(value: &Value) -> Result<&Object> {
  value
    .as_object()
    .ok_or_else(|| BitbucketError::InvalidResponseFormat { found: kind(value) })
}

/// Read a numeric value as an unsigned integer.
///
/// Fractional values are truncated; negative and non-finite values are
/// treated as absent.
pub fn number_as_u64(value: &Value) -> Option<u64> {
  if let Some(n) = value.as_u64() {
    return Some(n);
  }
  let f = value.as_f64()?;
  if f.is_finite() && f >= 0.0 && f <= u64::MAX as f64 {
    Some(f.trunc() as u64)
  } else {
    None
  }
}

pub fn u64_field(obj: &Object, key: &str) -> Option<u64> {
  obj.get(key).and_then(number_as_u64)
}

pub fn str_field<'a>(obj: &'a Object, key: &str) -> Option<&'a str> {
  obj.get(key).and_then(Value::as_str)
}

/// String field, empty when absent
pub fn string_field(obj: &Object, key: &str) -> String {
  str_field(obj, key).unwrap_or_default().to_string()
}

/// Boolean field, `false` when absent
pub fn bool_field(obj: &Object, key: &str) -> bool {
  obj.get(key).and_then(Value::as_bool).unwrap_or(false)
}

pub fn object_field<'a>(obj: &'a Object, key: &str) -> Option<&'a Object> {
  obj.get(key).and_then(Value::as_object)
}

pub fn array_field<'a>(obj: &'a Object, key: &str) -> Option<&'a Vec<Value>> {
  obj.get(key).and_then(Value::as_array)
}

/// Follow a path of nested objects and read the string at the end of it
pub fn nested_str<'a>(obj: &'a Object, path: &[&str]) -> Option<&'a str> {
  let (last, parents) = path.split_last()?;
  let mut current = obj;
  for key in parents {
    current = object_field(current, key)?;
  }
  str_field(current, last)
}

/// Read a timestamp field.
///
/// Missing, non-string, and empty values yield `Ok(None)`. A non-empty string
/// that does not parse as RFC 3339 fails with
/// [`BitbucketError::MalformedTimestamp`].
pub fn timestamp_field(obj: &Object, key: &'static str) -> Result<Option<DateTime<FixedOffset>>> {
  let Some(raw) = str_field(obj, key) else {
    return Ok(None);
  };
  if raw.is_empty() {
    return Ok(None);
  }

  DateTime::parse_from_rfc3339(raw)
    .map(Some)
    .map_err(|source| BitbucketError::MalformedTimestamp {
      field: key,
      value: raw.to_string(),
      source,
    })
}

//! Tolerant field decoders for the backend's loosely typed JSON.
//!
//! Every decoder here accepts any JSON value and maps values of the wrong
//! shape to `None` (or an empty list), so one odd field never fails the
//! surrounding document.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A string, or a number/bool rendered as a string. Blank strings are absent.
pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }))
}

/// A float, or a string holding one (`"85.5"`, `"85.5°C"`).
pub fn float<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_f64))
}

/// A signed integer; integral floats and numeric strings are accepted.
pub fn integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_i64))
}

/// A non-negative count; integral floats and numeric strings (`"253"`,
/// `"28,052"`) are accepted, anything else such as `"N/A"` is absent.
pub fn count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(value_as_i64)
        .and_then(|n| u64::try_from(n).ok()))
}

/// `true` only for JSON `true`; everything else is `false`.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(matches!(value, Some(Value::Bool(true))))
}

/// A list of records. Elements that are not objects or do not decode are
/// dropped with a warning;
/// a non-list value is an empty list.
pub fn records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let items = match value {
        Some(Value::Array(items)) => items,
        Some(Value::Null) | None => return Ok(Vec::new()),
        Some(other) => {
            log::warn!("Expected a list of alert records, got {}", type_name(&other));
            return Ok(Vec::new());
        }
    };

    Ok(items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match item {
            // Derived structs also accept arrays positionally; only objects are records
            Value::Object(_) => match serde_json::from_value::<T>(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    log::warn!("Skipping malformed alert record at index {index}: {e}");
                    None
                }
            },
            other => {
                log::warn!(
                    "Skipping alert record at index {index}: expected an object, got {}",
                    type_name(&other)
                );
                None
            }
        })
        .collect())
}

/// An object decoded as `T`, or `None` when absent or of the wrong shape.
pub fn object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(v @ Value::Object(_)) => match serde_json::from_value(v) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                log::warn!("Ignoring malformed object: {e}");
                None
            }
        },
        _ => None,
    })
}

fn value_as_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s
            .trim()
            .trim_end_matches("°C")
            .replace(',', "")
            .parse::<f64>()
            .ok(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite())
}

fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)
        }),
        Value::String(_) => value_as_f64(value)
            .filter(|f| f.fract() == 0.0)
            .map(|f| f as i64),
        _ => None,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

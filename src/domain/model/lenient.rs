//! Loose readers for values written by hand or by older versions of the service.
//!
//! The document file is shared state that outlives any one schema, so scalar fields accept the
//! obvious neighbours of their type (a number where text is expected, a float or numeric string
//! where an integer is expected, `null` anywhere). Arrays and objects in scalar position are
//! still rejected.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

/// Text form of a scalar: strings as-is, numbers and booleans via `to_string`.
pub fn text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Integer form of a number or numeric string. Fractions are truncated.
pub fn signed(value: &JsonValue) -> Option<i64> {
    match value {
        JsonValue::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|_| i64::MAX))
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        JsonValue::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
        }
        _ => None,
    }
}

/// Like [`signed`], with negatives clamped to zero.
pub fn unsigned(value: &JsonValue) -> Option<u64> {
    match value {
        JsonValue::Number(n) if n.as_u64().is_some() => n.as_u64(),
        other => signed(other).map(|v| v.max(0).unsigned_abs()),
    }
}

fn truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(_) | JsonValue::Object(_) => true,
    }
}

fn scalar<'de, D: Deserializer<'de>>(deserializer: D) -> Result<JsonValue, D::Error> {
    let value = JsonValue::deserialize(deserializer)?;
    if value.is_array() || value.is_object() {
        return Err(D::Error::custom("expected a scalar value"));
    }
    Ok(value)
}

pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(text(&scalar(deserializer)?).unwrap_or_default())
}

pub fn opt_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(text(&scalar(deserializer)?))
}

pub fn boolean<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(truthy(&scalar(deserializer)?))
}

pub fn int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(signed(&scalar(deserializer)?).unwrap_or_default())
}

pub fn uint<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    Ok(unsigned(&scalar(deserializer)?).unwrap_or_default())
}

/// `null` reads as the type's default (an empty collection, usually).
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

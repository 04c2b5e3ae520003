//! Tolerant field decoders for backend payloads
//!
//! The backend stores form input as-is, so numeric fields arrive as strings
//! (`"estimated_hours": "3"`, or `""` when left blank) and text fields
//! occasionally arrive as numbers. These helpers accept either shape and map
//! anything unusable to `None` instead of failing the whole record.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accept a string, number or boolean; `null` and missing become `None`.
///
/// # Errors
/// Only fails when the underlying deserializer fails.
pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Like [`string`], but missing values become the empty string.
///
/// # Errors
/// Only fails when the underlying deserializer fails.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(string(deserializer)?.unwrap_or_default())
}

/// Accept a number or a numeric string; blanks and garbage become `None`.
///
/// # Errors
/// Only fails when the underlying deserializer fails.
pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    })
}

/// Accept a non-negative count as number or string; anything else is zero.
///
/// # Errors
/// Only fails when the underlying deserializer fails.
pub fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64().or_else(|| n.as_f64().map(f64_to_count)).unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse::<f64>().map(f64_to_count).unwrap_or(0),
        _ => 0,
    })
}

/// Accept a boolean, `0`/`1`, or `"true"`/`"false"`.
///
/// # Errors
/// Only fails when the underlying deserializer fails.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_i64().is_some_and(|v| v != 0),
        Some(Value::String(s)) => matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true"),
        _ => false,
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn f64_to_count(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    }
}

//! Tolerant serde helpers for values typed in by hand or posted by older
//! clients: amounts may arrive as numbers, numeric strings or not at all,
//! and sale dates as ISO strings or millisecond timestamps.
//!
//! Whole-number amounts and timestamps are written back as JSON integers so
//! that a stored `108` stays `108` after a rewrite.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

// 2^53: beyond this f64 no longer holds every integer
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Date of a sale as it appears in stored vouchers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SaleDate {
    /// ISO-8601 date or date-time, e.g. `2024-03-01T10:15:00.000Z`
    Text(String),
    /// Unix timestamp in milliseconds
    Timestamp(f64),
}

impl SaleDate {
    /// Calendar day (`YYYY-MM-DD`) the sale belongs to.
    ///
    /// Text dates use their first 10 characters, which must form a valid
    /// date. Timestamps use the UTC calendar date.
    pub fn day(&self) -> Option<String> {
        match self {
            SaleDate::Text(s) => {
                let prefix = s.get(..10)?;
                NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()?;
                Some(prefix.to_string())
            }
            SaleDate::Timestamp(ms) => {
                if !ms.is_finite() {
                    return None;
                }
                DateTime::<Utc>::from_timestamp_millis(*ms as i64)
                    .map(|dt| dt.date_naive().format("%Y-%m-%d").to_string())
            }
        }
    }
}

impl Serialize for SaleDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            SaleDate::Text(s) => serializer.serialize_str(s),
            SaleDate::Timestamp(ms) => serialize_amount(ms, serializer),
        }
    }
}

fn as_exact_integer(value: f64) -> Option<i64> {
    (value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER).then_some(value as i64)
}

/// `serialize_with` helper: whole numbers as integers, the rest as floats.
pub fn serialize_amount<S>(amount: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match as_exact_integer(*amount) {
        Some(i) => serializer.serialize_i64(i),
        None => serializer.serialize_f64(*amount),
    }
}

/// `serialize_with` helper for optional amounts.
pub fn serialize_optional_amount<S>(amount: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match amount {
        Some(a) => serialize_amount(a, serializer),
        None => serializer.serialize_none(),
    }
}

/// Coerce a JSON value to an amount; anything non-numeric is 0.
pub fn amount_from_value(value: &Value) -> f64 {
    let amount = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if s.trim().is_empty() => Some(0.0),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    amount.filter(|a| a.is_finite()).unwrap_or(0.0)
}

/// `deserialize_with` helper for amounts.
pub fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(amount_from_value).unwrap_or(0.0))
}

/// `deserialize_with` helper for optional amounts (`null`/missing stay `None`).
pub fn optional_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.is_null()).map(|v| amount_from_value(&v)))
}

/// `deserialize_with` helper for sale dates. Values that are neither a
/// string nor a number are treated as missing.
pub fn sale_date<'de, D>(deserializer: D) -> Result<Option<SaleDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(SaleDate::Text(s)),
        Some(Value::Number(n)) => n.as_f64().map(SaleDate::Timestamp),
        _ => None,
    })
}

/// `deserialize_with` helper for record ids: integers, whole floats and
/// numeric strings are accepted, anything else becomes 0.
pub fn id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(as_exact_integer))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse::<i64>().unwrap_or(0),
        _ => 0,
    })
}

/// `deserialize_with` helper for free text: strings as-is, numbers and
/// booleans in their JSON spelling, `null`/missing as empty.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    })
}

/// `deserialize_with` helper for flags stored as `true`/`false`, `1`/`0` or
/// `null`.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        _ => false,
    })
}

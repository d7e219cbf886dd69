//! Per-field deserializers for entity records.
//!
//! A record with a `null` or wrongly typed field still loads: the field falls back to its
//! default instead of failing the whole response body. Only a broken envelope is treated as a
//! malformed body.

use chrono::{DateTime, NaiveDate};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// The field's value if it has the expected type, otherwise `T::default()`.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(T::default());
    }
    Ok(T::deserialize(value).unwrap_or_else(|err| {
        tracing::debug!("ignoring unreadable record field: {}", err);
        T::default()
    }))
}

/// A calendar date from either `YYYY-MM-DD` or an RFC 3339 timestamp; anything else is `None`.
pub(crate) fn date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(parse_date))
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    match DateTime::parse_from_rfc3339(raw) {
        Ok(timestamp) => Some(timestamp.date_naive()),
        Err(_) => {
            tracing::debug!("ignoring unreadable date '{}'", raw);
            None
        }
    }
}

//! Tolerant field deserializers for backend payloads whose shape drifted over time.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Keep the value only when it is a JSON string.
pub(crate) fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

pub(crate) fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(string_or_none(deserializer)?.unwrap_or_default())
}

/// Numbers and numeric strings are accepted; anything else reads as zero.
pub(crate) fn number_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    };
    Ok(if number.is_finite() { number } else { 0.0 })
}

/// Decode the value as `T`, falling back to `T::default()` on any shape mismatch.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(serde_json::from_value(Value::deserialize(deserializer)?).unwrap_or_default())
}

/// Decode an array entry by entry, dropping only the entries that do not fit.
/// A non-array reads as an empty list.
pub(crate) fn lossy_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// RFC 3339 timestamps; anything unparsable reads as absent.
pub(crate) fn timestamp_or_none<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(string_or_none(deserializer)?
        .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
        .map(|t| t.with_timezone(&Utc)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "timestamp_or_none")]
        at: Option<DateTime<Utc>>,
        #[serde(default, deserialize_with = "lossy_list")]
        counts: Vec<u32>,
        #[serde(default, deserialize_with = "or_default")]
        total: u64,
    }

    #[test]
    fn test_timestamps() {
        let parsed: Sample = serde_json::from_value(json!({ "at": "2024-05-01T09:30:00.000Z" })).unwrap();
        assert_eq!(parsed.at.unwrap().to_rfc3339(), "2024-05-01T09:30:00+00:00");

        for bad in [json!("2024-05-01"), json!(12), json!(null)] {
            let parsed: Sample = serde_json::from_value(json!({ "at": bad })).unwrap();
            assert!(parsed.at.is_none());
        }
    }

    #[test]
    fn test_lossy_list_keeps_fitting_entries() {
        let parsed: Sample = serde_json::from_value(json!({ "counts": [1, "x", 3, -1] })).unwrap();
        assert_eq!(parsed.counts, vec![1, 3]);

        let parsed: Sample = serde_json::from_value(json!({ "counts": { "a": 1 } })).unwrap();
        assert!(parsed.counts.is_empty());
    }

    #[test]
    fn test_or_default() {
        let parsed: Sample = serde_json::from_value(json!({ "total": "seven" })).unwrap();
        assert_eq!(parsed.total, 0);
        let parsed: Sample = serde_json::from_value(json!({ "total": 7 })).unwrap();
        assert_eq!(parsed.total, 7);
    }
}

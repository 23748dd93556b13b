//! Lenient field deserializers
//!
//! Dashboard clients send numbers both as JSON numbers and as numeric
//! strings (`"97.50"`), and runners send artifacts as arrays. These helpers
//! accept either form; use them with `#[serde(default, deserialize_with = ...)]`.

use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Integer from a number or a numeric string; blank strings and `null` are absent
pub fn opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected an integer, got {}", n))),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("expected an integer, got \"{}\"", s))),
        Some(other) => Err(D::Error::custom(format!("expected an integer, got {}", other))),
    }
}

/// Float from a number or a numeric string; blank strings and `null` are absent
pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .trim_end_matches('%')
            .parse()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("expected a number, got \"{}\"", s))),
        Some(other) => Err(D::Error::custom(format!("expected a number, got {}", other))),
    }
}

/// Text column from a string or any other JSON value, stored as its JSON encoding
pub fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Ok(Some(other.to_string())),
    }
}

/// Identifier from a string or a number
pub fn opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!("expected an identifier, got {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "opt_i64")]
        count: Option<i64>,
        #[serde(default, deserialize_with = "opt_f64")]
        rate: Option<f64>,
        #[serde(default, deserialize_with = "opt_text")]
        artifacts: Option<String>,
        #[serde(default, deserialize_with = "opt_id")]
        id: Option<String>,
    }

    fn parse(value: serde_json::Value) -> Result<Sample, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn test_numbers_and_numeric_strings() {
        let s = parse(json!({"count": "1500", "rate": "97.50"})).unwrap();
        assert_eq!(s.count, Some(1500));
        assert_eq!(s.rate, Some(97.5));

        let s = parse(json!({"count": 12, "rate": 99})).unwrap();
        assert_eq!(s.count, Some(12));
        assert_eq!(s.rate, Some(99.0));
    }

    #[test]
    fn test_absent_null_and_blank() {
        let s = parse(json!({"count": null, "rate": ""})).unwrap();
        assert_eq!(s.count, None);
        assert_eq!(s.rate, None);
        assert!(parse(json!({})).unwrap().artifacts.is_none());
    }

    #[test]
    fn test_rejects_non_numeric() {
        assert!(parse(json!({"count": "many"})).is_err());
        assert!(parse(json!({"count": 1.5})).is_err());
        assert!(parse(json!({"rate": [1, 2]})).is_err());
    }

    #[test]
    fn test_text_and_id_coercion() {
        let s = parse(json!({"artifacts": ["log.txt", "shot.png"], "id": 7})).unwrap();
        assert_eq!(s.artifacts.as_deref(), Some(r#"["log.txt","shot.png"]"#));
        assert_eq!(s.id.as_deref(), Some("7"));
    }
}

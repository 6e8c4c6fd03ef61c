//! Boundary encodings for the loosely-typed platform JSON.
//!
//! The template endpoint mixes strings, numbers and nulls for the same
//! field, and encodes booleans as `"1"`/`"0"` (scalar fields) or `1`/`0`
//! (role and team entries). These helpers accept every variant on the way
//! in and always write the canonical form on the way out.

use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

fn value_to_flag<E: serde::de::Error>(value: Value) -> Result<bool, E> {
    match value {
        Value::Null => Ok(false),
        Value::Bool(b) => Ok(b),
        Value::Number(n) => Ok(n.as_f64().is_some_and(|f| f != 0.0)),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "" | "0" | "false" => Ok(false),
            "1" | "true" => Ok(true),
            other => Err(E::custom(format!("invalid flag value '{other}'"))),
        },
        other => Err(E::custom(format!("invalid flag value {other}"))),
    }
}

/// Required text field; `null` becomes the empty string.
pub mod text {
    use super::*;

    pub fn serialize<S: Serializer>(value: &str, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(value_to_text(Value::deserialize(d)?).unwrap_or_default())
    }
}

/// Optional text field; `null` stays `None`.
pub mod opt_text {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => s.serialize_some(v),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(value_to_text(Value::deserialize(d)?))
    }
}

/// Scalar boolean stored as `"1"` / `"0"`.
pub mod flag_text {
    use super::*;

    pub fn serialize<S: Serializer>(value: &bool, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(if *value { "1" } else { "0" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        value_to_flag(Value::deserialize(d)?)
    }
}

/// Membership flag stored as `1` / `0`.
pub mod flag_int {
    use super::*;

    pub fn serialize<S: Serializer>(value: &bool, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        value_to_flag(Value::deserialize(d)?)
    }
}

/// Team id given either as a JSON number or a numeric string.
///
/// Anything else leaves the team without an id, so it never governs an
/// extension prefix; the rest of the listing still loads.
pub mod opt_id {
    use super::*;
    use tracing::warn;

    pub fn serialize<S: Serializer>(value: &Option<u64>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => s.serialize_some(v),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
        let id = match Value::deserialize(d)? {
            Value::Null => return Ok(None),
            Value::String(s) if s.trim().is_empty() => return Ok(None),
            Value::Number(n) => n.as_u64().ok_or_else(|| n.to_string()),
            Value::String(s) => s.trim().parse::<u64>().map_err(|_| s),
            other => Err(other.to_string()),
        };
        match id {
            Ok(id) => Ok(Some(id)),
            Err(raw) => {
                warn!(id = %raw, "ignoring team id that is not a non-negative integer");
                Ok(None)
            }
        }
    }
}

/// A list that the platform may send as `null`.
pub mod nullable_list {
    use super::*;

    pub fn deserialize<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Ok(Option::<Vec<T>>::deserialize(d)?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Fields {
        #[serde(default, with = "super::text")]
        name: String,
        #[serde(default, with = "super::opt_text")]
        number: Option<String>,
        #[serde(default, with = "super::flag_text")]
        enabled: bool,
        #[serde(default, with = "super::flag_int")]
        value: bool,
        #[serde(default, with = "super::opt_id")]
        id: Option<u64>,
    }

    #[test]
    fn accepts_mixed_scalar_shapes() {
        let fields: Fields = serde_json::from_str(
            r#"{"name": null, "number": 1234, "enabled": "1", "value": "0", "id": "12"}"#,
        )
        .unwrap();
        assert_eq!(fields.name, "");
        assert_eq!(fields.number.as_deref(), Some("1234"));
        assert!(fields.enabled);
        assert!(!fields.value);
        assert_eq!(fields.id, Some(12));
    }

    #[test]
    fn writes_canonical_encodings() {
        let fields = Fields {
            name: "x".into(),
            number: None,
            enabled: true,
            value: true,
            id: Some(7),
        };
        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(json["enabled"], "1");
        assert_eq!(json["value"], 1);
        assert!(json["number"].is_null());
    }

    #[test]
    fn invalid_team_ids_read_as_missing() {
        for raw in [r#""abc""#, "-3", "1.5", "[1]"] {
            let fields: Fields = serde_json::from_str(&format!(r#"{{"id": {raw}}}"#)).unwrap();
            assert_eq!(fields.id, None, "id {raw}");
        }
    }

    #[test]
    fn rejects_garbage_flags() {
        let result: Result<Fields, _> = serde_json::from_str(r#"{"enabled": "maybe"}"#);
        assert!(result.is_err());
    }
}

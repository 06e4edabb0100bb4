//! Tolerant field extraction for remote records
//!
//! The remote does not always honour its field types. A known field is lifted
//! into its typed slot only when it decodes cleanly; anything else (an explicit
//! null, a string where a number belongs) stays in the record's `extra` map
//! under its original key so a re-serialized record carries it unchanged.

use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};

/// Removes `key` from `raw` when it decodes as `T`, leaving it in place otherwise
pub(crate) fn take_typed<T: DeserializeOwned>(raw: &mut Map<String, Value>, key: &str) -> Option<T> {
    let decoded = raw.get(key).and_then(|value| T::deserialize(value).ok())?;
    raw.remove(key);
    Some(decoded)
}

/// Like `take_typed`, for nested records that are built from a JSON object
pub(crate) fn take_object<T: From<Map<String, Value>>>(
    raw: &mut Map<String, Value>,
    key: &str,
) -> Option<T> {
    match raw.remove(key) {
        Some(Value::Object(object)) => Some(T::from(object)),
        Some(other) => {
            raw.insert(key.to_string(), other);
            None
        }
        None => None,
    }
}

/// Whole epoch seconds from a JSON number, integral or not
pub(crate) fn epoch_seconds(number: &Number) -> Option<i64> {
    number.as_i64().or_else(|| {
        number
            .as_f64()
            .filter(|secs| secs.is_finite() && secs.abs() < i64::MAX as f64)
            .map(|secs| secs.trunc() as i64)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_take_typed_lifts_matching_value() {
        let mut raw = object(json!({"price": 23995, "id": "a"}));
        let price: Option<Number> = take_typed(&mut raw, "price");

        assert_eq!(price.and_then(|p| p.as_u64()), Some(23995));
        assert!(!raw.contains_key("price"));
        assert!(raw.contains_key("id"));
    }

    #[test]
    fn test_take_typed_leaves_mismatched_and_null_values() {
        let mut raw = object(json!({"price": "call for price", "miles": null}));

        assert_eq!(take_typed::<Number>(&mut raw, "price"), None);
        assert_eq!(take_typed::<Number>(&mut raw, "miles"), None);
        assert_eq!(raw["price"], "call for price");
        assert_eq!(raw["miles"], Value::Null);
    }

    #[test]
    fn test_take_object_keeps_non_objects() {
        let mut raw = object(json!({"build": "unknown"}));
        let build: Option<Map<String, Value>> = take_object(&mut raw, "build");

        assert!(build.is_none());
        assert_eq!(raw["build"], "unknown");
    }

    #[test]
    fn test_epoch_seconds_accepts_floats() {
        assert_eq!(epoch_seconds(&Number::from(1_700_000_000)), Some(1_700_000_000));
        let float = Number::from_f64(1_700_000_000.75).unwrap();
        assert_eq!(epoch_seconds(&float), Some(1_700_000_000));
        let huge = Number::from_f64(1e300).unwrap();
        assert_eq!(epoch_seconds(&huge), None);
    }
}

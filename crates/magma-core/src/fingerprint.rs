//! Content fingerprints for change detection.
//!
//! A fingerprint is the lowercase hex SHA-256 of the canonical JSON encoding
//! of a payload. Canonical means object keys sorted, no insignificant
//! whitespace, and integral floats written as integers (`1.0` and `1` are the
//! same number). Two payloads that parse to the same value always produce the
//! same fingerprint.

use serde_json::{Map, Number, Value};
use sha2::{Digest, Sha256};

/// Largest integer an `f64` represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Fingerprint raw JSON bytes.
///
/// Returns an empty string if `raw` is not valid JSON; callers treat that as
/// "unhashable" rather than as a failure.
#[must_use]
pub fn fingerprint(raw: &[u8]) -> String {
    match serde_json::from_slice::<Value>(raw) {
        Ok(value) => fingerprint_value(&value),
        Err(_) => String::new(),
    }
}

/// Fingerprint an already-parsed JSON value.
#[must_use]
pub fn fingerprint_value(value: &Value) -> String {
    let canonical = canonicalize(value);
    // Serializing a `Value` cannot fail: keys are always strings.
    let bytes = serde_json::to_vec(&canonical).unwrap_or_default();
    hex::encode(Sha256::digest(&bytes))
}

/// Rebuild `value` with sorted object keys and normalized numbers.
#[must_use]
pub fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut out = Map::with_capacity(map.len());
            for key in keys {
                out.insert(key.clone(), canonicalize(&map[key]));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        Value::Number(n) => Value::Number(normalize_number(n)),
        other => other.clone(),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn normalize_number(n: &Number) -> Number {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER => {
            Number::from(f as i64)
        }
        _ => n.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn key_order_and_whitespace_do_not_matter() {
        let a = br#"{"b": 1, "a": {"y": [1, 2, {"k": true}], "x": null}}"#;
        let b = br#"{"a":{"x":null,"y":[1,2,{"k":true}]},"b":1}"#;
        assert_eq!(fingerprint(a), fingerprint(b));
    }

    #[test]
    fn digest_is_lowercase_hex_sha256() {
        let digest = fingerprint(br#"{"a":1}"#);
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        // sha256 of the canonical bytes `{"a":1}`
        assert_eq!(digest, hex::encode(Sha256::digest(br#"{"a":1}"#)));
    }

    #[test]
    fn array_order_matters() {
        assert_ne!(fingerprint(b"[1,2]"), fingerprint(b"[2,1]"));
    }

    #[test]
    fn integral_floats_match_integers() {
        assert_eq!(fingerprint(br#"{"n": 1.0}"#), fingerprint(br#"{"n": 1}"#));
        assert_ne!(fingerprint(br#"{"n": 1.5}"#), fingerprint(br#"{"n": 1}"#));
    }

    #[rstest]
    #[case(b"")]
    #[case(b"{")]
    #[case(b"{\"a\":}")]
    #[case(b"not json")]
    fn malformed_json_is_unhashable(#[case] raw: &[u8]) {
        assert_eq!(fingerprint(raw), "");
    }

    #[test]
    fn value_and_bytes_agree() {
        let value = serde_json::json!({"z": "last", "a": [1, 2]});
        let raw = serde_json::to_vec(&value).unwrap();
        assert_eq!(fingerprint(&raw), fingerprint_value(&value));
    }
}

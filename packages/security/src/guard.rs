//! Prototype-pollution key guard.
//!
//! Scans a parsed JSON value for the property names `__proto__`,
//! `constructor`, and `prototype` anywhere in the object graph. Payloads
//! carrying any of them are rejected before structural validation runs.

use crate::ValidationError;
use serde_json::Value;

const UNSAFE_KEYS: [&str; 3] = ["__proto__", "constructor", "prototype"];

/// Reject the payload if any unsafe key appears anywhere in it.
pub fn reject_unsafe_keys(value: &Value) -> Result<(), ValidationError> {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if UNSAFE_KEYS.contains(&key.as_str()) {
                    return Err(ValidationError::new(format!(
                        "unsafe key `{key}` in payload"
                    )));
                }
                reject_unsafe_keys(child)?;
            }
            Ok(())
        }
        Value::Array(items) => {
            for item in items {
                reject_unsafe_keys(item)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

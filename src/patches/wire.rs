//! Wire-format patch parsing.
//!
//! The wire form is a JSON object with fields `op` (one of `add`, `remove`,
//! `replace`), `path` (string), and an optional scalar `value`. Patches may
//! also arrive as JSON-encoded text. Only `op` and `path` are validated;
//! a missing or null `value` is treated as absent.

use crate::error::{Result, StoreError};
use crate::types::{Patch, PatchOp, Value};

/// Parse a wire patch from a decoded JSON value.
///
/// Fails with [`StoreError::InvalidPatch`] when `op` or `path` is missing,
/// null, or not usable; the message carries the offending patch.
pub fn parse_patch(raw: &serde_json::Value) -> Result<Patch> {
    let op = field(raw, "op").ok_or_else(|| invalid(raw))?;
    let path = field(raw, "path").ok_or_else(|| invalid(raw))?;

    let op: PatchOp = serde_json::from_value(op.clone()).map_err(|_| invalid(raw))?;
    let path = path.as_str().ok_or_else(|| invalid(raw))?.to_string();

    let value = match raw.get("value") {
        None | Some(serde_json::Value::Null) => None,
        Some(v) => {
            let scalar: Value = serde_json::from_value(v.clone())
                .map_err(|e| StoreError::Deserialization(e.to_string()))?;
            Some(scalar)
        }
    };

    Ok(Patch { op, path, value })
}

/// Parse a wire patch from JSON text.
pub fn parse_patch_json(raw: &str) -> Result<Patch> {
    let decoded: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| StoreError::Deserialization(e.to_string()))?;
    parse_patch(&decoded)
}

/// Look up a field, treating JSON null the same as absent.
fn field<'a>(raw: &'a serde_json::Value, name: &str) -> Option<&'a serde_json::Value> {
    raw.get(name).filter(|v| !v.is_null())
}

fn invalid(raw: &serde_json::Value) -> StoreError {
    StoreError::InvalidPatch(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_full_patch() {
        let patch = parse_patch(&json!({"op": "add", "path": "k", "value": 1})).unwrap();
        assert_eq!(patch.op, PatchOp::Add);
        assert_eq!(patch.path, "k");
        assert_eq!(patch.value, Some(Value::from(1)));
    }

    #[test]
    fn test_parse_remove_without_value() {
        let patch = parse_patch(&json!({"op": "remove", "path": "k"})).unwrap();
        assert_eq!(patch.op, PatchOp::Remove);
        assert_eq!(patch.value, None);
    }

    #[test]
    fn test_missing_op_rejected() {
        let result = parse_patch(&json!({"path": "k", "value": 1}));
        assert!(matches!(result, Err(StoreError::InvalidPatch(_))));
    }

    #[test]
    fn test_missing_path_rejected() {
        let result = parse_patch(&json!({"op": "add", "value": 1}));
        assert!(matches!(result, Err(StoreError::InvalidPatch(_))));
    }

    #[test]
    fn test_null_op_rejected() {
        let result = parse_patch(&json!({"op": null, "path": "k"}));
        assert!(matches!(result, Err(StoreError::InvalidPatch(_))));
    }

    #[test]
    fn test_unknown_op_rejected() {
        let result = parse_patch(&json!({"op": "move", "path": "k"}));
        assert!(matches!(result, Err(StoreError::InvalidPatch(_))));
    }

    #[test]
    fn test_error_identifies_patch() {
        let err = parse_patch(&json!({"value": 3})).unwrap_err();
        assert!(err.to_string().contains("{\"value\":3}"));
    }

    #[test]
    fn test_parse_from_json_text() {
        let patch = parse_patch_json("{\"op\":\"replace\",\"path\":\"k\",\"value\":true}").unwrap();
        assert_eq!(patch.op, PatchOp::Replace);
        assert_eq!(patch.value, Some(Value::from(true)));
    }

    #[test]
    fn test_malformed_json_text() {
        let result = parse_patch_json("{not json");
        assert!(matches!(result, Err(StoreError::Deserialization(_))));
    }

    #[test]
    fn test_null_value_treated_as_absent() {
        let patch = parse_patch(&json!({"op": "add", "path": "k", "value": null})).unwrap();
        assert_eq!(patch.value, None);
    }
}

//! Pure patch constructors.

use crate::types::{Patch, PatchOp, Value};

/// Patch that stores `value` at `path`.
pub fn add(path: impl Into<String>, value: Option<Value>) -> Patch {
    Patch {
        op: PatchOp::Add,
        path: path.into(),
        value,
    }
}

/// Patch that deletes `path`.
pub fn remove(path: impl Into<String>) -> Patch {
    Patch {
        op: PatchOp::Remove,
        path: path.into(),
        value: None,
    }
}

/// Patch that overwrites `path` with `value`.
pub fn replace(path: impl Into<String>, value: Option<Value>) -> Patch {
    Patch {
        op: PatchOp::Replace,
        path: path.into(),
        value,
    }
}

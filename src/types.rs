//! Core types for the state store.

use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::collections::BTreeMap;
use std::fmt;

/// A scalar state value: boolean, number, or string.
///
/// Serialized untagged, so the JSON form is the bare scalar.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Number(Number),
    String(String),
}

impl Value {
    /// Build a numeric value from a float.
    ///
    /// Returns `None` for non-finite floats, which JSON cannot represent.
    pub fn from_f64(v: f64) -> Option<Self> {
        Number::from_f64(v).map(Value::Number)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(Number::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Number(Number::from(v))
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Number(Number::from(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

/// The flat key/value mapping a store holds.
///
/// A sorted map, so serialized snapshots have deterministic key order.
pub type State = BTreeMap<String, Value>;

/// The three JSON-Patch operation kinds the store records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    Add,
    Remove,
    Replace,
}

impl PatchOp {
    /// Wire-format name of the operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PatchOp::Add => "add",
            PatchOp::Remove => "remove",
            PatchOp::Replace => "replace",
        }
    }
}

impl fmt::Display for PatchOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single described mutation: operation kind, key, optional value.
///
/// `path` is the bare key name. The JSON-Patch vocabulary is borrowed for
/// the operation kinds only; there is no nested addressing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Patch {
    pub op: PatchOp,

    pub path: String,

    /// Present for `add` and `replace`, absent for `remove`. A `remove`
    /// applied to a missing key also yields an inverse `add` with no value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

/// The (inverse, forward) patch pair recording one mutation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChangePair {
    /// Undoes the mutation: applied to the state after it, restores the
    /// state before it.
    pub inverse: Patch,

    /// Replays the mutation going forward in time.
    pub forward: Patch,
}

/// Count of mutations applied to a store, replays included.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Version(pub u64);

impl Version {
    pub fn next(self) -> Self {
        Version(self.0 + 1)
    }
}

impl fmt::Debug for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Version({})", self.0)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

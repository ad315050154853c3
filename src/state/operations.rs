//! State operation application.
//!
//! Presence is always decided by map membership, never by the stored
//! value. An absent patch value writes absence: the key is removed from
//! (or never enters) the map, which keeps change pairs exact even for
//! removals of keys that were never present.

use crate::patches;
use crate::types::{ChangePair, State, Value};

/// Insert `value` at `key`. The inverse removes the key again.
pub fn apply_add(state: &mut State, key: &str, value: Option<Value>) -> ChangePair {
    let pair = ChangePair {
        inverse: patches::remove(key),
        forward: patches::add(key, value.clone()),
    };
    write_entry(state, key, value);
    pair
}

/// Delete `key`, capturing the current value for the inverse patch.
///
/// Removing an absent key succeeds; the inverse `add` then carries no
/// value, and replaying it reproduces the same absence.
pub fn apply_remove(state: &mut State, key: &str) -> ChangePair {
    let previous = state.remove(key);
    ChangePair {
        inverse: patches::add(key, previous),
        forward: patches::remove(key),
    }
}

/// Overwrite `key`, capturing the current value for the inverse patch.
pub fn apply_replace(state: &mut State, key: &str, value: Option<Value>) -> ChangePair {
    let pair = ChangePair {
        inverse: patches::replace(key, state.get(key).cloned()),
        forward: patches::replace(key, value.clone()),
    };
    write_entry(state, key, value);
    pair
}

fn write_entry(state: &mut State, key: &str, value: Option<Value>) {
    match value {
        Some(value) => {
            state.insert(key.to_string(), value);
        }
        None => {
            state.remove(key);
        }
    }
}

//! Subscription types.

use crate::types::Patch;
use std::fmt;

/// Events a store can emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A mutation was applied. Payload: the forward patch, alone in a
    /// one-element sequence.
    Change,
}

impl EventKind {
    /// Wire-format name of the event.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Change => "change",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unique identifier for a subscription. Never reused within a registry.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(pub u64);

impl fmt::Debug for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubscriptionId({})", self.0)
    }
}

/// Callback invoked synchronously with the event and its patch payload.
pub type EventCallback = Box<dyn FnMut(EventKind, Vec<Patch>)>;

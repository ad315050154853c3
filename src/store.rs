//! Main StateStore struct tying all components together.

use tracing::debug;

use crate::error::Result;
use crate::patches::{parse_patch, parse_patch_json};
use crate::state::{apply_add, apply_remove, apply_replace};
use crate::subscriptions::{EventKind, ObserverRegistry, SubscriptionId};
use crate::types::{ChangePair, Patch, PatchOp, State, Value, Version};

/// An observable, reversible key/value state store.
///
/// Holds a flat map from string keys to scalar values. Every mutation is
/// recorded as an (inverse, forward) patch pair in an append-only history,
/// and the forward patch is delivered synchronously to `change`
/// subscribers before the mutating call returns.
///
/// Replaying a recorded patch with [`apply_patch`](Self::apply_patch) is
/// itself a mutation: it appends a new pair and bumps the version, so
/// undo and redo never rewind the counter.
///
/// Single-threaded by design. Mutations take `&mut self` and there is no
/// internal locking; callers sharing a store across threads must serialize
/// access themselves.
pub struct StateStore {
    /// Current key/value state.
    state: State,

    /// Mutation counter, replays included.
    version: Version,

    /// Append-only change history, one pair per mutation.
    history: Vec<ChangePair>,

    /// Change-event subscribers.
    observers: ObserverRegistry,
}

impl StateStore {
    /// Create an empty store at version zero.
    pub fn new() -> Self {
        Self {
            state: State::new(),
            version: Version::default(),
            history: Vec::new(),
            observers: ObserverRegistry::new(),
        }
    }

    // --- Mutations ---

    /// Set `key` to `value`, as a replace when the key is present and an
    /// add when it is not. Presence means map membership; a key holding
    /// `false`, `0`, or an empty string is still present.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        let op = if self.has(key) {
            PatchOp::Replace
        } else {
            PatchOp::Add
        };
        self.make_change(op, key, Some(value.into()));
    }

    /// Delete `key`. Removing an absent key succeeds and records an
    /// inverse add patch carrying no value.
    pub fn remove(&mut self, key: &str) {
        self.make_change(PatchOp::Remove, key, None);
    }

    /// Apply one mutation, record its change pair, and notify subscribers.
    fn make_change(&mut self, op: PatchOp, path: &str, value: Option<Value>) {
        let pair = match op {
            PatchOp::Add => apply_add(&mut self.state, path, value),
            PatchOp::Remove => apply_remove(&mut self.state, path),
            PatchOp::Replace => apply_replace(&mut self.state, path, value),
        };
        self.version = self.version.next();
        debug!(op = %op, path, version = self.version.0, "applied mutation");

        let forward = pair.forward.clone();
        self.history.push(pair);
        self.observers.emit(EventKind::Change, &[forward]);
    }

    // --- Reads ---

    /// Current value at `key`, or `None` when absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.state.get(key)
    }

    /// Whether `key` is present in the state.
    pub fn has(&self, key: &str) -> bool {
        self.state.contains_key(key)
    }

    /// Number of keys currently present.
    pub fn len(&self) -> usize {
        self.state.len()
    }

    /// Whether the state holds no keys.
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Iterate the present keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.state.keys().map(String::as_str)
    }

    /// Mutation count, replays included. Equals the history length.
    pub fn version(&self) -> Version {
        self.version
    }

    /// JSON snapshot of the current state: an object literal mapping keys
    /// to scalars, sorted by key. No envelope, no version tag, no history.
    pub fn serialize(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.state)?)
    }

    // --- Patch Replay ---

    /// Re-apply a patch through the normal mutation path.
    ///
    /// The replay appends a fresh change pair and bumps the version, just
    /// like a direct mutation. Applying inverse patches newest-first
    /// undoes history; applying forward patches oldest-first redoes it.
    pub fn apply_patch(&mut self, patch: &Patch) {
        self.make_change(patch.op, &patch.path, patch.value.clone());
    }

    /// Apply a sequence of patches in the order presented, each exactly
    /// once.
    pub fn apply_patches(&mut self, patches: &[Patch]) {
        for patch in patches {
            self.apply_patch(patch);
        }
    }

    /// Validate and apply a wire-format patch (a decoded JSON object with
    /// `op`, `path`, and optional `value`).
    pub fn apply_wire_patch(&mut self, raw: &serde_json::Value) -> Result<()> {
        let patch = parse_patch(raw)?;
        self.apply_patch(&patch);
        Ok(())
    }

    /// Validate and apply a patch arriving as JSON text.
    pub fn apply_patch_json(&mut self, raw: &str) -> Result<()> {
        let patch = parse_patch_json(raw)?;
        self.apply_patch(&patch);
        Ok(())
    }

    // --- History ---

    /// Copy of the full change-pair history, in occurrence order.
    pub fn patches(&self) -> Vec<ChangePair> {
        self.history.clone()
    }

    /// Copies of just the inverse patches, in history order.
    pub fn reverse_patches(&self) -> Vec<Patch> {
        self.history.iter().map(|pair| pair.inverse.clone()).collect()
    }

    /// Copies of just the forward patches, in history order.
    pub fn forward_patches(&self) -> Vec<Patch> {
        self.history.iter().map(|pair| pair.forward.clone()).collect()
    }

    // --- Subscriptions ---

    /// Subscribe to an event. The callback runs synchronously inside each
    /// mutating call, with an owned copy of the forward-patch payload.
    pub fn on(
        &mut self,
        event: EventKind,
        callback: impl FnMut(EventKind, Vec<Patch>) + 'static,
    ) -> SubscriptionId {
        self.observers.subscribe(event, Box::new(callback))
    }

    /// Unsubscribe. Returns false if the id was not registered.
    pub fn off(&mut self, event: EventKind, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(event, id)
    }

    /// Number of live subscriptions for an event.
    pub fn subscriber_count(&self, event: EventKind) -> usize {
        self.observers.subscriber_count(event)
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

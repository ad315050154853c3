//! # Palimpsest
//!
//! An observable, reversible key/value state store. Every mutation is
//! recorded as a pair of JSON-Patch-style operations (forward and
//! inverse), enabling undo/redo and synchronous change notification.
//!
//! ## Core Concepts
//!
//! - **State**: a flat map from string keys to scalar values
//! - **Patches**: each mutation yields a forward patch and its inverse
//! - **History**: an append-only log of change pairs, one per mutation
//! - **Subscriptions**: callbacks fired with each forward patch, before
//!   the mutating call returns
//!
//! ## Example
//!
//! ```
//! use palimpsest::{EventKind, StateStore};
//!
//! let mut store = StateStore::new();
//! let id = store.on(EventKind::Change, |event, patches| {
//!     println!("{event}: {patches:?}");
//! });
//!
//! store.set("greeting", "hello");
//! store.set("count", 3);
//!
//! // Undo everything by replaying inverse patches newest-first.
//! for patch in store.reverse_patches().into_iter().rev() {
//!     store.apply_patch(&patch);
//! }
//! assert!(store.is_empty());
//!
//! store.off(EventKind::Change, id);
//! ```

pub mod error;
pub mod patches;
pub mod state;
pub mod store;
pub mod subscriptions;
pub mod types;

// Re-exports
pub use error::{Result, StoreError};
pub use state::{apply_add, apply_remove, apply_replace};
pub use store::StateStore;
pub use subscriptions::{EventCallback, EventKind, ObserverRegistry, SubscriptionId};
pub use types::{ChangePair, Patch, PatchOp, State, Value, Version};

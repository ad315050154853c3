//! Subscription system for change notification.
//!
//! Subscribers register a callback per event kind and receive the forward
//! patch of every mutation. Delivery is synchronous and happens in
//! registration order before the mutating call returns; each subscriber
//! gets its own copy of the payload.
//!
//! # Example
//!
//! ```
//! use palimpsest::subscriptions::{EventKind, ObserverRegistry};
//! use palimpsest::patches;
//!
//! let mut registry = ObserverRegistry::new();
//! let id = registry.subscribe(EventKind::Change, Box::new(|event, patches| {
//!     println!("{event}: {patches:?}");
//! }));
//!
//! registry.emit(EventKind::Change, &[patches::remove("k")]);
//! registry.unsubscribe(EventKind::Change, id);
//! ```

mod manager;
mod types;

pub use manager::ObserverRegistry;
pub use types::{EventCallback, EventKind, SubscriptionId};

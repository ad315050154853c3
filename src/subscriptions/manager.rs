//! Observer registry for broadcasting store events.

use std::collections::BTreeMap;
use tracing::trace;

use super::types::{EventCallback, EventKind, SubscriptionId};
use crate::types::Patch;

/// Subscribers for a single event kind.
///
/// Ids come from a monotonic counter and are never reused, so iterating
/// the ordered map visits subscribers in registration order.
struct ObserverSet {
    next_id: u64,
    subscribers: BTreeMap<SubscriptionId, EventCallback>,
}

impl ObserverSet {
    fn new() -> Self {
        Self {
            next_id: 0,
            subscribers: BTreeMap::new(),
        }
    }

    fn insert(&mut self, callback: EventCallback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.insert(id, callback);
        id
    }
}

/// Manages subscriptions and broadcasts events synchronously.
pub struct ObserverRegistry {
    change: ObserverSet,
}

impl ObserverRegistry {
    /// Create a registry with an empty subscriber set per event kind.
    pub fn new() -> Self {
        Self {
            change: ObserverSet::new(),
        }
    }

    /// Register a callback for an event. Returns the id to unsubscribe with.
    pub fn subscribe(&mut self, event: EventKind, callback: EventCallback) -> SubscriptionId {
        let id = self.set_mut(event).insert(callback);
        trace!(event = %event, id = id.0, "subscribed");
        id
    }

    /// Remove a subscription. Returns false if the id was not registered.
    pub fn unsubscribe(&mut self, event: EventKind, id: SubscriptionId) -> bool {
        let removed = self.set_mut(event).subscribers.remove(&id).is_some();
        if removed {
            trace!(event = %event, id = id.0, "unsubscribed");
        }
        removed
    }

    /// Number of live subscriptions for an event.
    pub fn subscriber_count(&self, event: EventKind) -> usize {
        self.set(event).subscribers.len()
    }

    /// Deliver `patches` to every subscriber of `event`, in registration
    /// order. Each subscriber receives its own copy of the payload and
    /// runs to completion before the next is invoked.
    pub fn emit(&mut self, event: EventKind, patches: &[Patch]) {
        let set = self.set_mut(event);
        trace!(
            event = %event,
            subscribers = set.subscribers.len(),
            "dispatching"
        );
        for callback in set.subscribers.values_mut() {
            callback(event, patches.to_vec());
        }
    }

    fn set(&self, event: EventKind) -> &ObserverSet {
        match event {
            EventKind::Change => &self.change,
        }
    }

    fn set_mut(&mut self, event: EventKind) -> &mut ObserverSet {
        match event {
            EventKind::Change => &mut self.change,
        }
    }
}

impl Default for ObserverRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patches;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_subscribe_unsubscribe() {
        let mut registry = ObserverRegistry::new();

        let id = registry.subscribe(EventKind::Change, Box::new(|_, _| {}));
        assert_eq!(registry.subscriber_count(EventKind::Change), 1);

        assert!(registry.unsubscribe(EventKind::Change, id));
        assert_eq!(registry.subscriber_count(EventKind::Change), 0);

        // Second removal is a no-op.
        assert!(!registry.unsubscribe(EventKind::Change, id));
    }

    #[test]
    fn test_emit_reaches_every_subscriber() {
        let mut registry = ObserverRegistry::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        for tag in ["first", "second"] {
            let seen = Rc::clone(&seen);
            registry.subscribe(
                EventKind::Change,
                Box::new(move |_, patches| {
                    seen.borrow_mut().push((tag, patches));
                }),
            );
        }

        registry.emit(EventKind::Change, &[patches::remove("k")]);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].0, "first");
        assert_eq!(seen[1].0, "second");
        assert_eq!(seen[0].1, vec![patches::remove("k")]);
    }

    #[test]
    fn test_delivery_in_registration_order() {
        let mut registry = ObserverRegistry::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        for i in 0..5 {
            let order = Rc::clone(&order);
            registry.subscribe(
                EventKind::Change,
                Box::new(move |_, _| order.borrow_mut().push(i)),
            );
        }

        registry.emit(EventKind::Change, &[]);
        assert_eq!(*order.borrow(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_ids_never_reused() {
        let mut registry = ObserverRegistry::new();

        let first = registry.subscribe(EventKind::Change, Box::new(|_, _| {}));
        registry.unsubscribe(EventKind::Change, first);

        let second = registry.subscribe(EventKind::Change, Box::new(|_, _| {}));
        assert_ne!(first, second);
        assert!(second > first);
    }

    #[test]
    fn test_unsubscribed_callback_not_invoked() {
        let mut registry = ObserverRegistry::new();
        let calls = Rc::new(RefCell::new(0));

        let id = {
            let calls = Rc::clone(&calls);
            registry.subscribe(
                EventKind::Change,
                Box::new(move |_, _| *calls.borrow_mut() += 1),
            )
        };

        registry.emit(EventKind::Change, &[]);
        registry.unsubscribe(EventKind::Change, id);
        registry.emit(EventKind::Change, &[]);

        assert_eq!(*calls.borrow(), 1);
    }
}

//! Change notifications

use std::fmt;

use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Subscriber registration key.
    pub struct SubscriberKey;
}

/// What changed in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    /// Cart contents changed.
    Cart,

    /// Wishlist membership changed.
    Wishlist,

    /// Authenticated-user snapshot changed.
    User,

    /// The cart panel was opened or closed.
    CartPanel,
}

type Callback = Box<dyn FnMut(StoreEvent)>;

/// Registry of change subscribers.
///
/// Consumers register a callback to re-render after any state-changing
/// operation, and unregister it when the consuming view is torn down. Any
/// number of subscribers may be active at once; removing one never disturbs
/// the others.
#[derive(Default)]
pub struct Subscribers {
    callbacks: SlotMap<SubscriberKey, Callback>,
}

impl Subscribers {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Subscribers::default()
    }

    /// Registers a callback; the returned key unregisters it.
    pub fn subscribe(&mut self, callback: impl FnMut(StoreEvent) + 'static) -> SubscriberKey {
        self.callbacks.insert(Box::new(callback))
    }

    /// Unregisters a callback.
    ///
    /// Returns `false` when the key had already been removed.
    pub fn unsubscribe(&mut self, key: SubscriberKey) -> bool {
        self.callbacks.remove(key).is_some()
    }

    /// Invokes every registered callback with the event.
    pub fn notify(&mut self, event: StoreEvent) {
        for callback in self.callbacks.values_mut() {
            callback(event);
        }
    }

    /// Get the number of active subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("len", &self.callbacks.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;

    #[test]
    fn every_subscriber_sees_each_event() {
        let mut subscribers = Subscribers::new();

        let first = Rc::new(Cell::new(0u32));
        let second = Rc::new(Cell::new(0u32));

        let first_count = Rc::clone(&first);
        subscribers.subscribe(move |_| first_count.set(first_count.get() + 1));

        let second_count = Rc::clone(&second);
        subscribers.subscribe(move |_| second_count.set(second_count.get() + 1));

        subscribers.notify(StoreEvent::Cart);
        subscribers.notify(StoreEvent::Wishlist);

        assert_eq!(first.get(), 2);
        assert_eq!(second.get(), 2);
    }

    #[test]
    fn unsubscribed_callback_stops_receiving() {
        let mut subscribers = Subscribers::new();

        let gone = Rc::new(Cell::new(0u32));
        let kept = Rc::new(Cell::new(0u32));

        let gone_count = Rc::clone(&gone);
        let key = subscribers.subscribe(move |_| gone_count.set(gone_count.get() + 1));

        let kept_count = Rc::clone(&kept);
        subscribers.subscribe(move |_| kept_count.set(kept_count.get() + 1));

        subscribers.notify(StoreEvent::Cart);

        assert!(subscribers.unsubscribe(key));

        subscribers.notify(StoreEvent::Cart);

        assert_eq!(gone.get(), 1);
        assert_eq!(kept.get(), 2);
    }

    #[test]
    fn double_unsubscribe_reports_absence() {
        let mut subscribers = Subscribers::new();

        let key = subscribers.subscribe(|_| {});

        assert!(subscribers.unsubscribe(key));
        assert!(!subscribers.unsubscribe(key));
        assert!(subscribers.is_empty());
    }

    #[test]
    fn events_carry_what_changed() {
        let mut subscribers = Subscribers::new();

        let seen = Rc::new(Cell::new(None));

        let seen_event = Rc::clone(&seen);
        subscribers.subscribe(move |event| seen_event.set(Some(event)));

        subscribers.notify(StoreEvent::CartPanel);

        assert_eq!(seen.get(), Some(StoreEvent::CartPanel));
    }
}

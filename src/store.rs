//! Store

use std::fmt;

use jiff::Timestamp;
use rusty_money::{Money, iso::Currency};
use tracing::{debug, warn};

use crate::{
    cart::Cart,
    config::{ConfigError, PersistMode, StoreConfig},
    items::LineItem,
    persistence::{Snapshot, StateStore},
    pricing::TotalError,
    subscribers::{StoreEvent, SubscriberKey, Subscribers},
    users::User,
    wishlist::Wishlist,
};

/// The single source of truth for cart, wishlist and session state.
///
/// One `Store` is constructed per client session and handed to the
/// application root; it is an owned value, never a global, so tests build a
/// fresh one per case. Every mutation is a synchronous in-memory transform
/// followed by a durable write (per the configured [`PersistMode`]) and a
/// subscriber notification. Reads never await anything: in-memory state is
/// authoritative, and a failed durable write costs durability, never the
/// current session's contents.
pub struct Store<S: StateStore> {
    config: StoreConfig,
    backend: S,
    cart: Cart,
    wishlist: Wishlist,
    user: Option<User>,
    cart_open: bool,
    subscribers: Subscribers,
    dirty: bool,
}

impl<S: StateStore> Store<S> {
    /// Opens a store, rehydrating any state persisted under the configured
    /// namespace.
    ///
    /// A missing, unreadable or corrupt snapshot falls back to an empty
    /// state with a logged warning; startup never fails on bad persisted
    /// data.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::UnknownCurrency`]: the configured currency code is
    ///   not a known ISO 4217 currency.
    pub fn open(config: StoreConfig, backend: S) -> Result<Self, ConfigError> {
        let currency = config.currency()?;

        let snapshot = match backend.load(&config.namespace) {
            Ok(Some(raw)) => match Snapshot::decode(&raw) {
                Ok(snapshot) => snapshot,
                Err(err) => {
                    warn!(
                        namespace = %config.namespace,
                        error = %err,
                        "corrupt persisted state, starting empty"
                    );
                    Snapshot::default()
                }
            },
            Ok(None) => Snapshot::default(),
            Err(err) => {
                warn!(
                    namespace = %config.namespace,
                    error = %err,
                    "failed to read persisted state, starting empty"
                );
                Snapshot::default()
            }
        };

        debug!(
            namespace = %config.namespace,
            items = snapshot.cart.len(),
            "hydrated store"
        );

        Ok(Store {
            cart: Cart::with_items(snapshot.cart, currency),
            wishlist: Wishlist::with_entries(snapshot.wishlist),
            user: snapshot.user,
            cart_open: false,
            subscribers: Subscribers::new(),
            dirty: false,
            backend,
            config,
        })
    }

    /// Adds an item to the cart, merging with an existing row on the same
    /// (product id, color, size) key.
    pub fn add_to_cart(&mut self, item: LineItem) {
        self.cart.add(item);
        self.after_mutation(StoreEvent::Cart);
    }

    /// Removes the cart row matching the key; a silent no-op when absent.
    pub fn remove_from_cart(&mut self, product_id: &str, color: &str, size: &str) {
        self.cart.remove(product_id, color, size);
        self.after_mutation(StoreEvent::Cart);
    }

    /// Sets a cart row's quantity to an absolute value; zero removes the
    /// row, and a missing key is a silent no-op.
    pub fn update_quantity(&mut self, product_id: &str, color: &str, size: &str, quantity: u32) {
        self.cart.set_quantity(product_id, color, size, quantity);
        self.after_mutation(StoreEvent::Cart);
    }

    /// Empties the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.after_mutation(StoreEvent::Cart);
    }

    /// Flips wishlist membership for a product, stamping a newly added
    /// entry with the current time.
    ///
    /// Returns whether the product is wishlisted after the call.
    pub fn toggle_wishlist(&mut self, product_id: &str) -> bool {
        let added = self.wishlist.toggle(product_id, Timestamp::now());
        self.after_mutation(StoreEvent::Wishlist);

        added
    }

    /// Stores the latest auth-provider snapshot; `None` signs the user out.
    pub fn set_user(&mut self, user: Option<User>) {
        self.user = user;
        self.after_mutation(StoreEvent::User);
    }

    /// Shows or hides the cart panel.
    ///
    /// UI-only state: subscribers are notified, but the flag is not
    /// persisted and a rehydrated store always starts with the panel
    /// closed.
    pub fn set_cart_open(&mut self, open: bool) {
        self.cart_open = open;
        self.subscribers.notify(StoreEvent::CartPanel);
    }

    /// Derived cart total: Σ unit price × quantity, recomputed on demand.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalError`] if a line or cart total overflowed the
    /// minor-unit range.
    pub fn cart_total(&self) -> Result<Money<'static, Currency>, TotalError> {
        self.cart.subtotal()
    }

    /// Total unit count across the cart, not distinct rows.
    #[must_use]
    pub fn cart_count(&self) -> u64 {
        self.cart.unit_count()
    }

    /// Read-only view of the cart.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Wishlist membership query.
    #[must_use]
    pub fn is_in_wishlist(&self, product_id: &str) -> bool {
        self.wishlist.contains(product_id)
    }

    /// Read-only view of the wishlist.
    #[must_use]
    pub fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    /// Latest auth-provider snapshot, when signed in.
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Whether a user is currently signed in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Whether the cart panel is shown.
    #[must_use]
    pub fn is_cart_open(&self) -> bool {
        self.cart_open
    }

    /// The store's configuration.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Whether in-memory state has changes the backend has not seen.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Registers a change subscriber; the returned key unregisters it via
    /// [`Store::unsubscribe`].
    pub fn subscribe(&mut self, callback: impl FnMut(StoreEvent) + 'static) -> SubscriberKey {
        self.subscribers.subscribe(callback)
    }

    /// Unregisters a change subscriber.
    ///
    /// Returns `false` when the key had already been removed.
    pub fn unsubscribe(&mut self, key: SubscriberKey) -> bool {
        self.subscribers.unsubscribe(key)
    }

    /// Writes any unpersisted state to the backend.
    ///
    /// Under [`PersistMode::Deferred`] this is the durability point; an
    /// immediate-mode store is normally already clean. Write failures are
    /// logged and swallowed, leaving the state dirty for a later retry: the
    /// in-memory state stays authoritative either way.
    pub fn flush(&mut self) {
        if self.dirty {
            self.persist_now();
        }
    }

    fn after_mutation(&mut self, event: StoreEvent) {
        self.dirty = true;

        if self.config.persist == PersistMode::Immediate {
            self.persist_now();
        }

        self.subscribers.notify(event);
    }

    fn persist_now(&mut self) {
        let snapshot = Snapshot {
            cart: self.cart.items().to_vec(),
            wishlist: self.wishlist.entries().to_vec(),
            user: self.user.clone(),
        };

        let encoded = match snapshot.encode() {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!(error = %err, "failed to encode state snapshot");
                return;
            }
        };

        match self.backend.save(&self.config.namespace, &encoded) {
            Ok(()) => self.dirty = false,
            Err(err) => {
                warn!(
                    namespace = %self.config.namespace,
                    error = %err,
                    "durable write failed; in-memory state unaffected"
                );
            }
        }
    }
}

impl<S: StateStore> fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("namespace", &self.config.namespace)
            .field("cart_rows", &self.cart.len())
            .field("wishlist", &self.wishlist.len())
            .field("authenticated", &self.is_authenticated())
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}

impl<S: StateStore> Drop for Store<S> {
    fn drop(&mut self) {
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, io, rc::Rc};

    use rusty_money::{Money, iso};
    use testresult::TestResult;

    use crate::{
        fixtures,
        persistence::{MemoryStore, PersistenceError},
        users::Role,
    };

    use super::*;

    fn open_store() -> Result<Store<MemoryStore>, ConfigError> {
        Store::open(StoreConfig::default(), MemoryStore::new())
    }

    fn line(product: crate::products::Product, quantity: u32, color: &str, size: &str) -> LineItem {
        LineItem::new(product, quantity, color, size)
    }

    /// Backend whose writes always fail.
    struct BrokenBackend;

    impl StateStore for BrokenBackend {
        fn load(&self, _key: &str) -> Result<Option<String>, PersistenceError> {
            Ok(None)
        }

        fn save(&mut self, _key: &str, _value: &str) -> Result<(), PersistenceError> {
            Err(PersistenceError::Io(io::Error::other("disk full")))
        }
    }

    #[test]
    fn repeated_adds_merge_and_total() -> TestResult {
        let mut store = open_store()?;

        store.add_to_cart(line(fixtures::oversized_hoodie(), 1, "Black", "M"));
        store.add_to_cart(line(fixtures::oversized_hoodie(), 1, "Black", "M"));

        assert_eq!(store.cart().len(), 1);
        assert_eq!(store.cart_count(), 2);
        assert_eq!(store.cart_total()?, Money::from_minor(17_800, iso::USD));

        Ok(())
    }

    #[test]
    fn update_quantity_to_zero_empties_the_cart() -> TestResult {
        let mut store = open_store()?;

        store.add_to_cart(line(fixtures::oversized_hoodie(), 2, "Black", "M"));
        store.update_quantity("hd-001", "Black", "M", 0);

        assert!(store.cart().is_empty());

        Ok(())
    }

    #[test]
    fn removing_from_an_empty_cart_is_harmless() -> TestResult {
        let mut store = open_store()?;

        store.remove_from_cart("hd-002", "Red", "S");

        assert!(store.cart().is_empty());

        Ok(())
    }

    #[test]
    fn every_mutation_notifies_subscribers() -> TestResult {
        let mut store = open_store()?;

        let events = Rc::new(Cell::new(0u32));
        let seen = Rc::clone(&events);
        store.subscribe(move |_| seen.set(seen.get() + 1));

        store.add_to_cart(line(fixtures::oversized_hoodie(), 1, "Black", "M"));
        store.update_quantity("hd-001", "Black", "M", 3);
        store.toggle_wishlist("hd-002");
        store.set_cart_open(true);
        store.clear_cart();

        assert_eq!(events.get(), 5);

        Ok(())
    }

    #[test]
    fn unsubscribed_views_stop_receiving() -> TestResult {
        let mut store = open_store()?;

        let events = Rc::new(Cell::new(0u32));
        let seen = Rc::clone(&events);
        let key = store.subscribe(move |_| seen.set(seen.get() + 1));

        store.add_to_cart(line(fixtures::oversized_hoodie(), 1, "Black", "M"));

        assert!(store.unsubscribe(key));

        store.clear_cart();

        assert_eq!(events.get(), 1);

        Ok(())
    }

    #[test]
    fn wishlist_toggle_flips_membership() -> TestResult {
        let mut store = open_store()?;

        assert!(store.toggle_wishlist("hd-001"));
        assert!(store.is_in_wishlist("hd-001"));

        assert!(!store.toggle_wishlist("hd-001"));
        assert!(!store.is_in_wishlist("hd-001"));

        Ok(())
    }

    #[test]
    fn set_user_drives_authentication() -> TestResult {
        let mut store = open_store()?;

        assert!(!store.is_authenticated());

        store.set_user(Some(User {
            id: "u-1".to_string(),
            email: "kai@example.com".to_string(),
            name: "Kai".to_string(),
            role: Role::Customer,
        }));

        assert!(store.is_authenticated());
        assert_eq!(store.user().map(|user| user.id.as_str()), Some("u-1"));

        store.set_user(None);

        assert!(!store.is_authenticated());

        Ok(())
    }

    #[test]
    fn immediate_mode_is_clean_after_each_mutation() -> TestResult {
        let mut store = open_store()?;

        store.add_to_cart(line(fixtures::oversized_hoodie(), 1, "Black", "M"));

        assert!(!store.is_dirty());

        Ok(())
    }

    #[test]
    fn deferred_mode_stays_dirty_until_flush() -> TestResult {
        let config = StoreConfig {
            persist: PersistMode::Deferred,
            ..StoreConfig::default()
        };
        let mut store = Store::open(config, MemoryStore::new())?;

        store.add_to_cart(line(fixtures::oversized_hoodie(), 1, "Black", "M"));

        assert!(store.is_dirty());

        store.flush();

        assert!(!store.is_dirty());

        Ok(())
    }

    #[test]
    fn failed_writes_never_roll_back_memory() -> TestResult {
        let mut store = Store::open(StoreConfig::default(), BrokenBackend)?;

        store.add_to_cart(line(fixtures::oversized_hoodie(), 2, "Black", "M"));

        assert_eq!(store.cart_count(), 2);
        assert!(store.is_dirty());

        Ok(())
    }

    #[test]
    fn panel_flag_is_session_state() -> TestResult {
        let mut store = open_store()?;

        store.set_cart_open(true);

        assert!(store.is_cart_open());
        assert!(!store.is_dirty());

        Ok(())
    }
}

//! Satchel prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::Cart,
    catalog::{CatalogError, ProductCatalog, StaticCatalog},
    checkout::{CheckoutError, CheckoutRates, OrderSummary, ShippingMethod, summarize},
    config::{ConfigError, PersistMode, StoreConfig},
    items::{Customization, DecalPosition, LineItem},
    persistence::{FileStore, MemoryStore, PersistenceError, Snapshot, StateStore},
    prices::Price,
    pricing::TotalError,
    products::{Product, ProductColor},
    receipt::Receipt,
    store::Store,
    subscribers::{StoreEvent, SubscriberKey},
    users::{Role, User},
    wishlist::{Wishlist, WishlistEntry},
};

//! Wishlist

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A wishlist entry: which product was liked, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistEntry {
    /// Product identifier.
    pub product_id: String,

    /// When the product was added to the wishlist.
    pub added_at: Timestamp,
}

/// A deduplicated, insertion-ordered set of liked products.
///
/// Much simpler than the cart: membership is keyed by product id alone and
/// there is no quantity concept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wishlist {
    entries: Vec<WishlistEntry>,
}

impl Wishlist {
    /// Creates an empty wishlist.
    #[must_use]
    pub fn new() -> Self {
        Wishlist::default()
    }

    /// Creates a wishlist from previously persisted entries.
    #[must_use]
    pub fn with_entries(entries: impl Into<Vec<WishlistEntry>>) -> Self {
        Wishlist {
            entries: entries.into(),
        }
    }

    /// Flips membership for a product.
    ///
    /// An absent product is added, stamped with `added_at`; a present
    /// product is removed. Repeated toggling always flips state
    /// deterministically. Returns whether the product is in the wishlist
    /// after the call.
    pub fn toggle(&mut self, product_id: &str, added_at: Timestamp) -> bool {
        if self.contains(product_id) {
            self.entries.retain(|entry| entry.product_id != product_id);
            false
        } else {
            self.entries.push(WishlistEntry {
                product_id: product_id.to_string(),
                added_at,
            });
            true
        }
    }

    /// Membership query.
    #[must_use]
    pub fn contains(&self, product_id: &str) -> bool {
        self.entries.iter().any(|entry| entry.product_id == product_id)
    }

    /// Entries in the order their products were first liked.
    #[must_use]
    pub fn entries(&self) -> &[WishlistEntry] {
        &self.entries
    }

    /// Get the number of liked products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the wishlist is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

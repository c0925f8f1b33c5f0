//! Cart

use rusty_money::{Money, iso::Currency};

use crate::{
    items::LineItem,
    pricing::{self, TotalError},
};

/// The shopping cart: an insertion-ordered sequence of line items, unique
/// per (product id, color, size) key.
///
/// All merge and quantity logic lives here. Rows are only created or
/// mutated through these operations, which keeps the invariants in one
/// place: at most one row per key, quantity at least 1, totals always
/// derived from current rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    items: Vec<LineItem>,
    currency: &'static Currency,
}

impl Cart {
    /// Creates an empty cart priced in the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            items: Vec::new(),
            currency,
        }
    }

    /// Creates a cart from previously persisted line items.
    #[must_use]
    pub fn with_items(items: impl Into<Vec<LineItem>>, currency: &'static Currency) -> Self {
        Cart {
            items: items.into(),
            currency,
        }
    }

    /// Adds an item, merging with an existing row on the same key.
    ///
    /// Repeated adds for one (product id, color, size) key accumulate into a
    /// single row; a new key is appended at the end, so rows keep the order
    /// in which distinct variants first entered the cart. Incoming
    /// quantities below 1 are floored to 1. A merge keeps the existing
    /// row's customization payload.
    ///
    /// Stock and variant validity are the caller's concern; nothing is
    /// validated here.
    pub fn add(&mut self, item: LineItem) {
        let quantity = item.quantity.max(1);

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|row| row.matches(&item.product.id, &item.color, &item.size))
        {
            existing.quantity = existing.quantity.saturating_add(quantity);
            return;
        }

        let mut item = item;
        item.quantity = quantity;
        self.items.push(item);
    }

    /// Removes the row matching the key.
    ///
    /// Silently does nothing when no row matches; a double remove is not an
    /// error.
    pub fn remove(&mut self, product_id: &str, color: &str, size: &str) {
        self.items.retain(|row| !row.matches(product_id, color, size));
    }

    /// Sets a row's quantity to an absolute value.
    ///
    /// A quantity of zero removes the row outright; the cart never holds a
    /// row with quantity below 1. Does nothing when no row matches the key.
    pub fn set_quantity(&mut self, product_id: &str, color: &str, size: &str, quantity: u32) {
        if quantity == 0 {
            self.remove(product_id, color, size);
            return;
        }

        if let Some(row) = self
            .items
            .iter_mut()
            .find(|row| row.matches(product_id, color, size))
        {
            row.quantity = quantity;
        }
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Finds the row matching the key.
    #[must_use]
    pub fn get(&self, product_id: &str, color: &str, size: &str) -> Option<&LineItem> {
        self.items
            .iter()
            .find(|row| row.matches(product_id, color, size))
    }

    /// Calculate the subtotal of the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalError`] if a line or cart total overflowed the
    /// minor-unit range.
    pub fn subtotal(&self) -> Result<Money<'static, Currency>, TotalError> {
        pricing::subtotal(&self.items, self.currency)
    }

    /// Total number of units across all rows.
    #[must_use]
    pub fn unit_count(&self) -> u64 {
        pricing::unit_count(&self.items)
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Get the number of distinct rows in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

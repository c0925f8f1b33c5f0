//! Derived totals

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::items::LineItem;

/// Errors that can occur while deriving cart totals.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TotalError {
    /// A line or cart total exceeded the representable minor-unit range.
    #[error("cart total overflowed the minor unit range")]
    Overflow,
}

/// Sums line totals (unit price × quantity) in minor units.
///
/// Totals are recomputed from the line items on every call; nothing is
/// cached. An empty slice totals zero.
///
/// # Errors
///
/// - [`TotalError::Overflow`]: a line or cart total exceeded the minor-unit range.
pub fn subtotal_minor(items: &[LineItem]) -> Result<u64, TotalError> {
    items.iter().try_fold(0u64, |acc, item| {
        let line = item.total_minor().ok_or(TotalError::Overflow)?;

        acc.checked_add(line).ok_or(TotalError::Overflow)
    })
}

/// Sums line totals into a [`Money`] amount in the given currency.
///
/// # Errors
///
/// - [`TotalError::Overflow`]: a line or cart total exceeded the minor-unit range.
pub fn subtotal(
    items: &[LineItem],
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, TotalError> {
    money_from_minor(subtotal_minor(items)?, currency)
}

/// Total number of units across all line items, not distinct rows.
#[must_use]
pub fn unit_count(items: &[LineItem]) -> u64 {
    items.iter().map(|item| u64::from(item.quantity)).sum()
}

/// Converts unsigned minor units to [`Money`] in the given currency.
///
/// # Errors
///
/// - [`TotalError::Overflow`]: the amount does not fit a signed minor-unit value.
pub fn money_from_minor(
    minor: u64,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, TotalError> {
    let Ok(minor) = i64::try_from(minor) else {
        return Err(TotalError::Overflow);
    };

    Ok(Money::from_minor(minor, currency))
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use testresult::TestResult;

    use crate::{prices::Price, products::Product};

    use super::*;

    fn item(id: &str, minor: u64, quantity: u32) -> LineItem {
        let product = Product {
            id: id.to_string(),
            name: id.to_string(),
            price: Price::new(minor),
            original_price: None,
            image: String::new(),
            category: "oversized".to_string(),
            description: String::new(),
            colors: smallvec::SmallVec::new(),
            sizes: smallvec::SmallVec::new(),
            in_stock: true,
            is_new: false,
            is_bestseller: false,
        };

        LineItem::new(product, quantity, "Black", "M")
    }

    #[test]
    fn subtotal_sums_price_times_quantity() -> TestResult {
        let items = [item("hd-001", 8900, 2), item("hd-003", 9900, 1)];

        assert_eq!(
            subtotal(&items, iso::USD)?,
            Money::from_minor(27_700, iso::USD)
        );

        Ok(())
    }

    #[test]
    fn subtotal_of_no_items_is_zero() -> TestResult {
        let items: [LineItem; 0] = [];

        assert_eq!(subtotal(&items, iso::USD)?, Money::from_minor(0, iso::USD));

        Ok(())
    }

    #[test]
    fn subtotal_overflow_errors() {
        let items = [item("hd-001", u64::MAX, 2)];

        assert_eq!(subtotal_minor(&items), Err(TotalError::Overflow));
    }

    #[test]
    fn unit_count_sums_quantities() {
        let items = [item("hd-001", 8900, 2), item("hd-003", 9900, 1)];

        assert_eq!(unit_count(&items), 3);
    }

    #[test]
    fn money_from_minor_rejects_unrepresentable_amounts() {
        assert_eq!(
            money_from_minor(u64::MAX, iso::USD),
            Err(TotalError::Overflow)
        );
    }
}

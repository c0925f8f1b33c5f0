//! Prices

use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// Represents a unit price in pence/cents.
///
/// Prices are non-negative by construction and stay in minor units until a
/// total is derived against the store currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price {
    value: u64,
}

impl Price {
    /// Creates a new Price
    #[must_use]
    pub fn new(value: u64) -> Self {
        Price { value }
    }

    /// Returns the price in minor units.
    #[must_use]
    pub fn minor(self) -> u64 {
        self.value
    }
}

impl Deref for Price {
    type Target = u64;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn new_price() {
        let price = Price::new(1000);

        assert_eq!(price.value, 1000);
    }

    #[test]
    fn price_derefs_to_u64() {
        let price = Price { value: 100 };

        assert_eq!(*price, 100);
    }

    #[test]
    fn price_serializes_transparently() -> TestResult {
        let price = Price::new(8900);

        assert_eq!(serde_json::to_string(&price)?, "8900");
        assert_eq!(serde_json::from_str::<Price>("8900")?, price);

        Ok(())
    }
}

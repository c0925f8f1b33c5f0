//! Line items

use serde::{Deserialize, Serialize};

use crate::products::Product;

/// Placement of a decal on a garment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecalPosition {
    /// Horizontal offset.
    pub x: f32,

    /// Vertical offset.
    pub y: f32,
}

/// Customizer output attached to a line item.
///
/// The fixed shape the garment customizer produces: an optional base color
/// override plus an optional decal with placement and scale. Cart logic
/// treats the payload as opaque; it only has to survive persistence intact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customization {
    /// Base garment color override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_color: Option<String>,

    /// Decal image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decal_image: Option<String>,

    /// Decal placement on the garment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decal_position: Option<DecalPosition>,

    /// Decal scale factor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decal_scale: Option<f32>,
}

/// One row in the cart: a product snapshot in a chosen color and size.
///
/// Two rows are the same row exactly when their (product id, color, size)
/// keys match; the customization payload is not part of the key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product snapshot taken when the item was added.
    pub product: Product,

    /// Unit count. Always at least 1 once the row is in a cart.
    pub quantity: u32,

    /// Chosen color name.
    pub color: String,

    /// Chosen size.
    pub size: String,

    /// Customizer payload, when the item came through the customizer flow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customization: Option<Customization>,
}

impl LineItem {
    /// Creates a line item for a product in the given color and size.
    #[must_use]
    pub fn new(
        product: Product,
        quantity: u32,
        color: impl Into<String>,
        size: impl Into<String>,
    ) -> Self {
        LineItem {
            product,
            quantity,
            color: color.into(),
            size: size.into(),
            customization: None,
        }
    }

    /// Creates a line item for a single unit, the default add quantity.
    #[must_use]
    pub fn single(product: Product, color: impl Into<String>, size: impl Into<String>) -> Self {
        LineItem::new(product, 1, color, size)
    }

    /// Attaches a customizer payload to the row.
    #[must_use]
    pub fn with_customization(mut self, customization: Customization) -> Self {
        self.customization = Some(customization);
        self
    }

    /// Whether this row matches the (product id, color, size) merge key.
    #[must_use]
    pub fn matches(&self, product_id: &str, color: &str, size: &str) -> bool {
        self.product.id == product_id && self.color == color && self.size == size
    }

    /// Line total in minor units, or `None` on arithmetic overflow.
    #[must_use]
    pub fn total_minor(&self) -> Option<u64> {
        self.product.price.minor().checked_mul(u64::from(self.quantity))
    }
}

#[cfg(test)]
mod tests {
    use crate::prices::Price;

    use super::*;

    fn hoodie(id: &str, minor: u64) -> Product {
        Product {
            id: id.to_string(),
            name: "Hoodie".to_string(),
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
        }
    }

    #[test]
    fn matches_requires_full_key() {
        let item = LineItem::new(hoodie("hd-001", 8900), 1, "Black", "M");

        assert!(item.matches("hd-001", "Black", "M"));
        assert!(!item.matches("hd-001", "Black", "L"));
        assert!(!item.matches("hd-001", "Gray", "M"));
        assert!(!item.matches("hd-002", "Black", "M"));
    }

    #[test]
    fn total_minor_multiplies_by_quantity() {
        let item = LineItem::new(hoodie("hd-001", 8900), 3, "Black", "M");

        assert_eq!(item.total_minor(), Some(26_700));
    }

    #[test]
    fn total_minor_overflow_is_none() {
        let item = LineItem::new(hoodie("hd-001", u64::MAX), 2, "Black", "M");

        assert_eq!(item.total_minor(), None);
    }
}

//! Products

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::prices::Price;

/// A named colorway offered for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductColor {
    /// Display name, e.g. "Black".
    pub name: String,

    /// Display value for the swatch, e.g. a hex code.
    pub value: String,
}

impl ProductColor {
    /// Creates a colorway from a name and display value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        ProductColor {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A catalog product.
///
/// The cart embeds a full `Product` value in every line item, so a product
/// here is a snapshot taken when the item was added: later catalog edits
/// (such as a price change) never alter rows already in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Unit price.
    pub price: Price,

    /// Pre-sale price, when the product is currently discounted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Price>,

    /// Primary image reference.
    pub image: String,

    /// Category label.
    pub category: String,

    /// Longer display copy.
    #[serde(default)]
    pub description: String,

    /// Available colorways. Empty when the product comes in a single finish.
    #[serde(default)]
    pub colors: SmallVec<[ProductColor; 4]>,

    /// Available sizes, in display order.
    #[serde(default)]
    pub sizes: SmallVec<[String; 6]>,

    /// Whether the product is currently purchasable.
    pub in_stock: bool,

    /// Whether the product is flagged as a new arrival.
    #[serde(default)]
    pub is_new: bool,

    /// Whether the product is flagged as a bestseller.
    #[serde(default)]
    pub is_bestseller: bool,
}

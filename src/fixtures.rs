//! Fixtures
//!
//! Sample catalog data for demos and tests, in the shape the storefront
//! seeds its catalog with.

use smallvec::SmallVec;

use crate::{
    prices::Price,
    products::{Product, ProductColor},
};

fn colorways() -> SmallVec<[ProductColor; 4]> {
    [
        ProductColor::new("Black", "#0B0C0F"),
        ProductColor::new("Gray", "#A6ACB8"),
        ProductColor::new("Navy", "#1F2A44"),
    ]
    .into_iter()
    .collect()
}

fn sizes() -> SmallVec<[String; 6]> {
    ["S", "M", "L", "XL"].iter().map(ToString::to_string).collect()
}

/// Builds a product in the standard hoodie shape.
#[must_use]
pub fn product(id: &str, name: &str, price_minor: u64, category: &str) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        price: Price::new(price_minor),
        original_price: None,
        image: format!("/images/products/{id}.png"),
        category: category.to_string(),
        description: String::new(),
        colors: colorways(),
        sizes: sizes(),
        in_stock: true,
        is_new: false,
        is_bestseller: false,
    }
}

/// Oversized hoodie at $89.00.
#[must_use]
pub fn oversized_hoodie() -> Product {
    product("hd-001", "Oversized Hoodie", 8900, "oversized")
}

/// Minimal hoodie at $79.00.
#[must_use]
pub fn minimal_hoodie() -> Product {
    product("hd-002", "Minimal Hoodie", 7900, "minimal")
}

/// Graphic hoodie at $99.00.
#[must_use]
pub fn graphic_hoodie() -> Product {
    product("hd-003", "Graphic Hoodie", 9900, "graphic")
}

/// The full sample catalog.
#[must_use]
pub fn products() -> Vec<Product> {
    vec![oversized_hoodie(), minimal_hoodie(), graphic_hoodie()]
}

//! Product catalog

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::products::Product;

/// Errors fetching the product list.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The backing catalog source could not be reached.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Read-only source of catalog products.
///
/// Fetching is asynchronous and owned by the surrounding application; the
/// store itself never fetches. UI components load the list and pass
/// individual [`Product`] values into the cart, which snapshots them.
pub trait ProductCatalog {
    /// Fetches the current product list, sorted by name ascending.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] when the backing source cannot be reached.
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError>;
}

/// In-memory catalog for demos and tests.
#[derive(Debug, Default)]
pub struct StaticCatalog {
    products: FxHashMap<String, Product>,
}

impl StaticCatalog {
    /// Builds a catalog from a product list.
    ///
    /// Later duplicates of an id replace earlier ones.
    #[must_use]
    pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
        let products = products
            .into_iter()
            .map(|product| (product.id.clone(), product))
            .collect();

        StaticCatalog { products }
    }

    /// Looks a product up by id.
    #[must_use]
    pub fn get(&self, product_id: &str) -> Option<&Product> {
        self.products.get(product_id)
    }

    /// Get the number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl ProductCatalog for StaticCatalog {
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        let mut products: Vec<Product> = self.products.values().cloned().collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(products)
    }
}

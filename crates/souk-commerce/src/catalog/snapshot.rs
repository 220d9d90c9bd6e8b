//! Point-in-time catalog snapshots.

use crate::catalog::Product;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A set of product records fetched at a single point in time.
///
/// Pricing and display both work against a snapshot so one request sees
/// one consistent view of the catalog; catalog edits after the snapshot
/// was taken are invisible to it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    products: BTreeMap<ProductId, Product>,
}

impl CatalogSnapshot {
    /// Build a snapshot from a batch of product records.
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            products: products.into_iter().map(|p| (p.id.clone(), p)).collect(),
        }
    }

    /// Look up a product by id.
    pub fn get(&self, product_id: &ProductId) -> Option<&Product> {
        self.products.get(product_id)
    }

    /// Whether the snapshot holds the product.
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.products.contains_key(product_id)
    }

    /// Number of products in the snapshot.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Iterate the snapshot's products in id order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }
}

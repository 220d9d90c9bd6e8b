//! Storage and identity collaborator contracts.

use crate::error::StoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use souk_commerce::checkout::{Order, OrderDraft};
use souk_commerce::ids::{BuyerId, ProductId, SellerId};
use souk_commerce::catalog::Product;
use std::collections::BTreeSet;

/// Which side of the marketplace an order listing is scoped to.
///
/// Buyer and seller listings are two statically distinct query paths,
/// not a string compared at each call site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderQuery {
    /// Orders placed by a buyer.
    ForBuyer(BuyerId),
    /// Orders routed to a seller.
    ForSeller(SellerId),
}

/// Authoritative source of product records.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Batch lookup by id.
    ///
    /// Returns the found subset (the caller checks cardinality against
    /// its request) or fails entirely on a storage error. It never
    /// returns a partially-resolved result.
    async fn find_products_by_ids(
        &self,
        ids: &BTreeSet<ProductId>,
    ) -> Result<Vec<Product>, StoreError>;
}

/// Durable, append-only-per-order persistence for orders.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Commit a single order record, assigning its id and creation
    /// timestamp.
    async fn create_order(&self, draft: OrderDraft) -> Result<Order, StoreError>;

    /// List orders for one side of the marketplace, newest first.
    async fn list_orders(&self, query: &OrderQuery) -> Result<Vec<Order>, StoreError>;

    /// Orders previously created for this buyer under the given
    /// idempotency key, in creation order. Empty when the key is unseen.
    async fn find_by_idempotency_key(
        &self,
        buyer_id: &BuyerId,
        key: &str,
    ) -> Result<Vec<Order>, StoreError>;
}

/// Identity collaborator seam: answers whether an account is authorized
/// to act as a seller.
#[async_trait]
pub trait SellerDirectory: Send + Sync {
    async fn is_seller(&self, seller_id: &SellerId) -> Result<bool, StoreError>;
}

//! In-process reference backend.
//!
//! Each store is a cheaply cloneable handle over shared state: open it
//! once at process startup, clone the handle wherever a request needs
//! one. This is the explicitly-owned form of the "connect once, reuse
//! forever" connection pattern: the handle is injected where it is
//! used instead of living in process-global mutable state.

use crate::error::StoreError;
use crate::traits::{OrderQuery, OrderStore, ProductCatalog, SellerDirectory};
use async_trait::async_trait;
use souk_commerce::catalog::Product;
use souk_commerce::checkout::{Order, OrderDraft};
use souk_commerce::ids::{BuyerId, OrderId, ProductId, SellerId};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, RwLock};
use tracing::debug;

/// In-memory product catalog.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    inner: Arc<RwLock<BTreeMap<ProductId, Product>>>,
}

impl MemoryCatalog {
    /// Open an empty catalog handle.
    pub fn open() -> Self {
        Self::default()
    }

    /// Open a catalog pre-seeded with products.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let catalog = Self::open();
        for product in products {
            catalog.upsert(product);
        }
        catalog
    }

    /// Insert or replace a product record.
    pub fn upsert(&self, product: Product) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(product.id.clone(), product);
        }
    }

    /// Remove a product record, returning it if present.
    pub fn remove(&self, product_id: &ProductId) -> Option<Product> {
        self.inner.write().ok()?.remove(product_id)
    }

    /// Number of listed products.
    pub fn len(&self) -> usize {
        self.inner.read().map(|map| map.len()).unwrap_or(0)
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ProductCatalog for MemoryCatalog {
    async fn find_products_by_ids(
        &self,
        ids: &BTreeSet<ProductId>,
    ) -> Result<Vec<Product>, StoreError> {
        let map = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        let found: Vec<Product> = ids.iter().filter_map(|id| map.get(id).cloned()).collect();
        debug!(requested = ids.len(), found = found.len(), "catalog batch lookup");
        Ok(found)
    }
}

/// In-memory order store.
///
/// Orders are held in creation order; listings walk the log backwards,
/// which is exactly newest-first since creation timestamps are assigned
/// monotonically with insertion.
#[derive(Debug, Clone, Default)]
pub struct MemoryOrderStore {
    inner: Arc<RwLock<Vec<Order>>>,
}

impl MemoryOrderStore {
    /// Open an empty order store handle.
    pub fn open() -> Self {
        Self::default()
    }

    /// Number of stored orders.
    pub fn len(&self) -> usize {
        self.inner.read().map(|log| log.len()).unwrap_or(0)
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fetch one order by id.
    pub fn get(&self, order_id: &OrderId) -> Option<Order> {
        self.inner
            .read()
            .ok()?
            .iter()
            .find(|o| &o.id == order_id)
            .cloned()
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn create_order(&self, draft: OrderDraft) -> Result<Order, StoreError> {
        let order = Order::from_draft(draft, OrderId::generate(), current_timestamp());
        let mut log = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;
        debug!(
            order_id = %order.id,
            seller_id = %order.seller_id,
            total_cents = order.total_amount.amount_cents,
            "order committed"
        );
        log.push(order.clone());
        Ok(order)
    }

    async fn list_orders(&self, query: &OrderQuery) -> Result<Vec<Order>, StoreError> {
        let log = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        let matches = |order: &Order| match query {
            OrderQuery::ForBuyer(buyer_id) => &order.buyer_id == buyer_id,
            OrderQuery::ForSeller(seller_id) => &order.seller_id == seller_id,
        };
        Ok(log.iter().rev().filter(|o| matches(o)).cloned().collect())
    }

    async fn find_by_idempotency_key(
        &self,
        buyer_id: &BuyerId,
        key: &str,
    ) -> Result<Vec<Order>, StoreError> {
        let log = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(log
            .iter()
            .filter(|o| {
                &o.buyer_id == buyer_id && o.idempotency_key.as_deref() == Some(key)
            })
            .cloned()
            .collect())
    }
}

/// In-memory seller registry standing in for the identity collaborator.
#[derive(Debug, Clone, Default)]
pub struct MemorySellerDirectory {
    inner: Arc<RwLock<BTreeSet<SellerId>>>,
}

impl MemorySellerDirectory {
    /// Open an empty directory handle.
    pub fn open() -> Self {
        Self::default()
    }

    /// Grant an account the seller role.
    pub fn register(&self, seller_id: SellerId) {
        if let Ok(mut set) = self.inner.write() {
            set.insert(seller_id);
        }
    }
}

#[async_trait]
impl SellerDirectory for MemorySellerDirectory {
    async fn is_seller(&self, seller_id: &SellerId) -> Result<bool, StoreError> {
        let set = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(set.contains(seller_id))
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

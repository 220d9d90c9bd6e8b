//! The order decomposition engine.
//!
//! Checkout turns one validated request into N independent per-seller
//! order writes. The hard invariants live here:
//!
//! - **price authority**: every unit price is re-resolved from the
//!   catalog at commit time; nothing client-supplied is priced in
//! - **all-or-nothing resolution**: a single unresolvable product aborts
//!   the whole checkout before anything is written
//! - **seller routing**: no order ever mixes products of two sellers
//! - **honest partial failure**: per-seller write outcomes are reported
//!   individually, never collapsed

use crate::error::{CheckoutError, SellerFailure};
use crate::request::PlaceOrdersRequest;
use souk_commerce::catalog::CatalogSnapshot;
use souk_commerce::checkout::{Order, OrderDraft, OrderLineItem};
use souk_commerce::ids::{ProductId, SellerId};
use souk_store::{OrderStore, ProductCatalog};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The server-side checkout engine.
///
/// Stateless between invocations: the only held state is the injected
/// store handles, which are opened once per process and shared. Nothing
/// is retried automatically; retry policy belongs to the caller, which
/// can make repeats safe by supplying an idempotency key.
pub struct CheckoutEngine {
    catalog: Arc<dyn ProductCatalog>,
    orders: Arc<dyn OrderStore>,
}

impl CheckoutEngine {
    /// Create an engine over the given collaborator handles.
    pub fn new(catalog: Arc<dyn ProductCatalog>, orders: Arc<dyn OrderStore>) -> Self {
        Self { catalog, orders }
    }

    /// Decompose a cart into one persisted order per owning seller.
    ///
    /// On full success returns every created order. A missing product
    /// fails the whole request with [`CheckoutError::ProductsNotFound`]
    /// before anything is written. When persistence fails for only some
    /// seller groups the committed subset is reported inside
    /// [`CheckoutError::PartialCommit`]; the caller clears the cart only
    /// after a full success.
    pub async fn place_orders(
        &self,
        request: PlaceOrdersRequest,
    ) -> Result<Vec<Order>, CheckoutError> {
        // Fail fast on structural problems; no storage is touched for an
        // empty cart or a malformed address.
        request.validate()?;
        let lines = request.normalized_lines()?;

        // A repeated submission under a known key returns the original
        // orders instead of creating duplicates.
        if let Some(key) = &request.idempotency_key {
            let existing = self
                .orders
                .find_by_idempotency_key(&request.buyer_id, key)
                .await?;
            if !existing.is_empty() {
                info!(
                    buyer_id = %request.buyer_id,
                    key = %key,
                    orders = existing.len(),
                    "idempotent replay, returning previously created orders"
                );
                return Ok(existing);
            }
        }

        // Resolve every distinct product in one batch. Resolution must
        // complete before any order is persisted.
        let ids: BTreeSet<ProductId> = lines.keys().cloned().collect();
        let products = self.catalog.find_products_by_ids(&ids).await?;
        let snapshot = CatalogSnapshot::from_products(products);
        debug!(requested = ids.len(), resolved = snapshot.len(), "catalog resolved");

        // Partition by owning seller, snapshotting effective unit prices
        // now. Unresolvable ids are collected, not dropped.
        let mut missing: Vec<ProductId> = Vec::new();
        let mut groups: BTreeMap<SellerId, Vec<OrderLineItem>> = BTreeMap::new();
        for (product_id, quantity) in &lines {
            match snapshot.get(product_id) {
                Some(product) => {
                    let item = OrderLineItem::new(
                        product_id.clone(),
                        *quantity,
                        product.effective_price(),
                    )
                    .map_err(|e| CheckoutError::InvalidRequest(e.to_string()))?;
                    groups
                        .entry(product.seller_id.clone())
                        .or_default()
                        .push(item);
                }
                None => missing.push(product_id.clone()),
            }
        }
        if !missing.is_empty() {
            warn!(missing = missing.len(), "aborting checkout, products not found");
            return Err(CheckoutError::ProductsNotFound { missing });
        }

        // Assemble every draft before the first write so a totals error
        // can still fail the request with nothing committed.
        let mut drafts: Vec<OrderDraft> = Vec::with_capacity(groups.len());
        for (seller_id, items) in groups {
            let mut draft = OrderDraft::new(
                request.buyer_id.clone(),
                seller_id,
                items,
                request.shipping_address.clone(),
                request.payment_method,
            )
            .map_err(|e| CheckoutError::InvalidRequest(e.to_string()))?;
            if let Some(key) = &request.idempotency_key {
                draft = draft.with_idempotency_key(key.clone());
            }
            drafts.push(draft);
        }

        // Per-seller commits are independent writes: the store offers no
        // cross-seller transaction, so outcomes are collected per group.
        let group_count = drafts.len();
        let mut created: Vec<Order> = Vec::with_capacity(group_count);
        let mut failures: Vec<SellerFailure> = Vec::new();
        for draft in drafts {
            let seller_id = draft.seller_id.clone();
            match self.orders.create_order(draft).await {
                Ok(order) => {
                    info!(
                        order_id = %order.id,
                        seller_id = %order.seller_id,
                        total_cents = order.total_amount.amount_cents,
                        "order created"
                    );
                    created.push(order);
                }
                Err(e) => {
                    warn!(seller_id = %seller_id, error = %e, "order persistence failed");
                    failures.push(SellerFailure {
                        seller_id,
                        reason: e.to_string(),
                    });
                }
            }
        }

        if failures.is_empty() {
            info!(
                buyer_id = %request.buyer_id,
                orders = created.len(),
                "checkout complete"
            );
            return Ok(created);
        }
        if created.is_empty() {
            // Every group failed and nothing was committed: the whole
            // request is safe to retry.
            return Err(CheckoutError::StorageUnavailable(format!(
                "no orders committed, all {} seller group(s) failed: {}",
                group_count, failures[0].reason
            )));
        }
        Err(CheckoutError::PartialCommit { created, failures })
    }
}

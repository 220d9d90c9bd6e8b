//! Order listings for buyers and sellers.
//!
//! The two sides of the marketplace get two statically distinct entry
//! points; the seller path additionally requires the identity
//! collaborator to confirm the seller role. Listings resolve product
//! display fields at read time, substituting a placeholder when a
//! product has since left the catalog, without ever rewriting the
//! immutable stored line items.

use crate::error::CheckoutError;
use serde::{Deserialize, Serialize};
use souk_commerce::catalog::CatalogSnapshot;
use souk_commerce::checkout::{Order, OrderStatus, PaymentMethod, ShippingAddress};
use souk_commerce::ids::{BuyerId, OrderId, ProductId, SellerId};
use souk_commerce::money::Money;
use souk_store::{OrderQuery, OrderStore, ProductCatalog, SellerDirectory};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

/// Display name shown for a line whose product no longer exists.
pub const PRODUCT_REMOVED: &str = "Product Removed";

/// One order line resolved for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineView {
    /// The stored product reference.
    pub product_id: ProductId,
    /// Product name at read time, or [`PRODUCT_REMOVED`].
    pub name: String,
    /// Primary product image at read time, if the product still exists.
    pub image: Option<String>,
    /// Quantity as stored on the order.
    pub quantity: i64,
    /// Unit price snapshot as stored on the order.
    pub unit_price: Money,
    /// Line total as stored on the order.
    pub line_total: Money,
}

/// An order resolved for a buyer or seller listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderView {
    pub id: OrderId,
    pub buyer_id: BuyerId,
    pub seller_id: SellerId,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub total_amount: Money,
    pub shipping_address: ShippingAddress,
    pub created_at: i64,
    pub items: Vec<OrderLineView>,
}

/// Read path over stored orders.
pub struct OrderHistory {
    orders: Arc<dyn OrderStore>,
    catalog: Arc<dyn ProductCatalog>,
    sellers: Arc<dyn SellerDirectory>,
}

impl OrderHistory {
    /// Create a read path over the given collaborator handles.
    pub fn new(
        orders: Arc<dyn OrderStore>,
        catalog: Arc<dyn ProductCatalog>,
        sellers: Arc<dyn SellerDirectory>,
    ) -> Self {
        Self {
            orders,
            catalog,
            sellers,
        }
    }

    /// Orders placed by the buyer, newest first.
    pub async fn list_for_buyer(
        &self,
        buyer_id: &BuyerId,
    ) -> Result<Vec<OrderView>, CheckoutError> {
        let orders = self
            .orders
            .list_orders(&OrderQuery::ForBuyer(buyer_id.clone()))
            .await?;
        self.render(orders).await
    }

    /// Orders routed to the seller, newest first.
    ///
    /// The caller's identity must hold the seller role; anyone else gets
    /// [`CheckoutError::Unauthorized`] and no data.
    pub async fn list_for_seller(
        &self,
        seller_id: &SellerId,
    ) -> Result<Vec<OrderView>, CheckoutError> {
        if !self.sellers.is_seller(seller_id).await? {
            return Err(CheckoutError::Unauthorized);
        }
        let orders = self
            .orders
            .list_orders(&OrderQuery::ForSeller(seller_id.clone()))
            .await?;
        self.render(orders).await
    }

    /// Resolve display fields for a page of orders with one catalog
    /// batch read.
    async fn render(&self, orders: Vec<Order>) -> Result<Vec<OrderView>, CheckoutError> {
        let ids: BTreeSet<ProductId> = orders
            .iter()
            .flat_map(|o| o.items.iter().map(|i| i.product_id.clone()))
            .collect();
        let snapshot = if ids.is_empty() {
            CatalogSnapshot::default()
        } else {
            CatalogSnapshot::from_products(self.catalog.find_products_by_ids(&ids).await?)
        };
        debug!(orders = orders.len(), products = snapshot.len(), "rendering order listing");
        Ok(orders
            .into_iter()
            .map(|order| render_order(order, &snapshot))
            .collect())
    }
}

fn render_order(order: Order, snapshot: &CatalogSnapshot) -> OrderView {
    let items = order
        .items
        .iter()
        .map(|item| {
            let product = snapshot.get(&item.product_id);
            OrderLineView {
                product_id: item.product_id.clone(),
                name: product
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| PRODUCT_REMOVED.to_string()),
                image: product.and_then(|p| p.primary_image().map(String::from)),
                quantity: item.quantity,
                unit_price: item.unit_price,
                line_total: item.line_total,
            }
        })
        .collect();
    OrderView {
        id: order.id,
        buyer_id: order.buyer_id,
        seller_id: order.seller_id,
        status: order.status,
        payment_method: order.payment_method,
        total_amount: order.total_amount,
        shipping_address: order.shipping_address,
        created_at: order.created_at,
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::CheckoutEngine;
    use crate::request::{ItemSelection, PlaceOrdersRequest};
    use souk_commerce::catalog::Product;
    use souk_commerce::money::Currency;
    use souk_store::memory::{MemoryCatalog, MemoryOrderStore, MemorySellerDirectory};

    fn product(id: &str, seller: &str, cents: i64) -> Product {
        let mut p = Product::new(
            ProductId::new(id),
            SellerId::new(seller),
            format!("{id} name"),
            Money::new(cents, Currency::USD),
        );
        p.images = vec![format!("{id}.jpg")];
        p
    }

    fn address() -> ShippingAddress {
        ShippingAddress::new(
            "Asha Rao",
            "+91-98765-43210",
            "12 MG Road",
            "Bengaluru",
            "Karnataka",
            "560001",
            "India",
        )
    }

    async fn checkout(
        catalog: &MemoryCatalog,
        store: &MemoryOrderStore,
        buyer: &str,
        items: &[(&str, i64)],
    ) {
        let engine = CheckoutEngine::new(Arc::new(catalog.clone()), Arc::new(store.clone()));
        let request = PlaceOrdersRequest::new(
            BuyerId::new(buyer),
            items
                .iter()
                .map(|(id, qty)| ItemSelection {
                    product_id: ProductId::new(*id),
                    quantity: *qty,
                })
                .collect(),
            address(),
            PaymentMethod::Cod,
        );
        engine.place_orders(request).await.unwrap();
    }

    fn history(
        catalog: &MemoryCatalog,
        store: &MemoryOrderStore,
        sellers: &MemorySellerDirectory,
    ) -> OrderHistory {
        OrderHistory::new(
            Arc::new(store.clone()),
            Arc::new(catalog.clone()),
            Arc::new(sellers.clone()),
        )
    }

    #[tokio::test]
    async fn test_buyer_listing_resolves_display_fields() {
        let catalog =
            MemoryCatalog::with_products(vec![product("P1", "S1", 100), product("P2", "S2", 50)]);
        let store = MemoryOrderStore::open();
        checkout(&catalog, &store, "b1", &[("P1", 2), ("P2", 1)]).await;

        let views = history(&catalog, &store, &MemorySellerDirectory::open())
            .list_for_buyer(&BuyerId::new("b1"))
            .await
            .unwrap();
        assert_eq!(views.len(), 2);
        let line = views
            .iter()
            .flat_map(|v| v.items.iter())
            .find(|l| l.product_id == ProductId::new("P1"))
            .unwrap();
        assert_eq!(line.name, "P1 name");
        assert_eq!(line.image.as_deref(), Some("P1.jpg"));
    }

    #[tokio::test]
    async fn test_removed_product_gets_placeholder_without_repricing() {
        let catalog = MemoryCatalog::with_products(vec![product("P1", "S1", 100)]);
        let store = MemoryOrderStore::open();
        checkout(&catalog, &store, "b1", &[("P1", 2)]).await;

        // product leaves the catalog after the order was placed
        catalog.remove(&ProductId::new("P1"));

        let views = history(&catalog, &store, &MemorySellerDirectory::open())
            .list_for_buyer(&BuyerId::new("b1"))
            .await
            .unwrap();
        let line = &views[0].items[0];
        assert_eq!(line.name, PRODUCT_REMOVED);
        assert!(line.image.is_none());
        // the stored snapshot is untouched by the display fallback
        assert_eq!(line.unit_price.amount_cents, 100);
        assert_eq!(views[0].total_amount.amount_cents, 200);
    }

    #[tokio::test]
    async fn test_seller_listing_requires_seller_role() {
        let catalog = MemoryCatalog::with_products(vec![product("P1", "S1", 100)]);
        let store = MemoryOrderStore::open();
        checkout(&catalog, &store, "b1", &[("P1", 1)]).await;

        let sellers = MemorySellerDirectory::open();
        let history = history(&catalog, &store, &sellers);

        let err = history
            .list_for_seller(&SellerId::new("S1"))
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::Unauthorized));

        sellers.register(SellerId::new("S1"));
        let views = history.list_for_seller(&SellerId::new("S1")).await.unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].seller_id, SellerId::new("S1"));
    }

    #[tokio::test]
    async fn test_seller_listing_is_scoped_to_that_seller() {
        let catalog =
            MemoryCatalog::with_products(vec![product("P1", "S1", 100), product("P2", "S2", 50)]);
        let store = MemoryOrderStore::open();
        checkout(&catalog, &store, "b1", &[("P1", 1), ("P2", 1)]).await;
        checkout(&catalog, &store, "b2", &[("P2", 2)]).await;

        let sellers = MemorySellerDirectory::open();
        sellers.register(SellerId::new("S2"));

        let views = history(&catalog, &store, &sellers)
            .list_for_seller(&SellerId::new("S2"))
            .await
            .unwrap();
        assert_eq!(views.len(), 2);
        assert!(views.iter().all(|v| v.seller_id == SellerId::new("S2")));
        // newest first
        assert_eq!(views[0].buyer_id, BuyerId::new("b2"));
    }
}

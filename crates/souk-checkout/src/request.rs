//! Checkout request shape and structural validation.

use crate::error::CheckoutError;
use serde::{Deserialize, Serialize};
use souk_commerce::cart::Cart;
use souk_commerce::checkout::{PaymentMethod, ShippingAddress};
use souk_commerce::ids::{BuyerId, ProductId};
use std::collections::BTreeMap;

/// One requested product/quantity pair.
///
/// Quantities are integers on the wire; a fractional quantity fails
/// deserialization outright rather than being floored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSelection {
    /// Product to purchase.
    #[serde(rename = "productId")]
    pub product_id: ProductId,
    /// Desired quantity, must be positive.
    pub quantity: i64,
}

/// The transport-agnostic checkout request.
///
/// `buyer_id` comes from the authentication collaborator, never from the
/// client payload, and no price appears anywhere in the request: the
/// engine re-resolves every price against the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceOrdersRequest {
    /// The authenticated buyer.
    pub buyer_id: BuyerId,
    /// Requested items; must be non-empty.
    pub items: Vec<ItemSelection>,
    /// Shipping address snapshot shared by all resulting orders.
    pub shipping_address: ShippingAddress,
    /// Payment method shared by all resulting orders.
    pub payment_method: PaymentMethod,
    /// Optional caller-supplied key; a repeated submission with the same
    /// key returns the originally created orders instead of duplicates.
    pub idempotency_key: Option<String>,
}

impl PlaceOrdersRequest {
    /// Create a request from explicit item selections.
    pub fn new(
        buyer_id: BuyerId,
        items: Vec<ItemSelection>,
        shipping_address: ShippingAddress,
        payment_method: PaymentMethod,
    ) -> Self {
        Self {
            buyer_id,
            items,
            shipping_address,
            payment_method,
            idempotency_key: None,
        }
    }

    /// Create a request from a buyer's cart.
    pub fn from_cart(
        buyer_id: BuyerId,
        cart: &Cart,
        shipping_address: ShippingAddress,
        payment_method: PaymentMethod,
    ) -> Self {
        let items = cart
            .lines()
            .map(|line| ItemSelection {
                product_id: line.product_id,
                quantity: line.quantity,
            })
            .collect();
        Self::new(buyer_id, items, shipping_address, payment_method)
    }

    /// Attach an idempotency key.
    #[must_use]
    pub fn with_idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }

    /// Structural validation, run before any storage access.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        if self.buyer_id.is_empty() {
            return Err(CheckoutError::Unauthorized);
        }
        if self.items.is_empty() {
            return Err(CheckoutError::InvalidRequest(
                "no items in order".to_string(),
            ));
        }
        for item in &self.items {
            if item.quantity <= 0 {
                return Err(CheckoutError::InvalidRequest(format!(
                    "invalid quantity {} for product {}",
                    item.quantity, item.product_id
                )));
            }
        }
        let missing = self.shipping_address.missing_fields();
        if !missing.is_empty() {
            return Err(CheckoutError::InvalidRequest(format!(
                "shipping address missing: {}",
                missing.join(", ")
            )));
        }
        Ok(())
    }

    /// Collapse the raw item list into one line per product, summing
    /// quantities: the same shape adding the items to a cart would have
    /// produced.
    pub fn normalized_lines(&self) -> Result<BTreeMap<ProductId, i64>, CheckoutError> {
        let mut lines: BTreeMap<ProductId, i64> = BTreeMap::new();
        for item in &self.items {
            let entry = lines.entry(item.product_id.clone()).or_insert(0);
            *entry = entry.checked_add(item.quantity).ok_or_else(|| {
                CheckoutError::InvalidRequest(format!(
                    "quantity overflow for product {}",
                    item.product_id
                ))
            })?;
        }
        Ok(lines)
    }
}

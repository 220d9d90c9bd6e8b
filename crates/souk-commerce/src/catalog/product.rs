//! Product types.

use crate::error::CommerceError;
use crate::ids::{ProductId, SellerId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// Read-only to the checkout core. `seller_id` is the routing key for
/// order decomposition: every line item of an order must resolve to a
/// product owned by that order's seller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// The seller who owns this listing.
    pub seller_id: SellerId,
    /// Product name.
    pub name: String,
    /// Full description.
    pub description: String,
    /// Category label for browsing/filtering.
    pub category: String,
    /// Regular price.
    pub list_price: Money,
    /// Discounted price, if the product is on offer.
    pub offer_price: Option<Money>,
    /// Image URLs, first one is the primary display image.
    pub images: Vec<String>,
    /// Unix timestamp of listing creation.
    pub created_at: i64,
}

impl Product {
    /// Create a product with the minimum fields; display fields default
    /// to empty.
    pub fn new(
        id: ProductId,
        seller_id: SellerId,
        name: impl Into<String>,
        list_price: Money,
    ) -> Self {
        Self {
            id,
            seller_id,
            name: name.into(),
            description: String::new(),
            category: String::new(),
            list_price,
            offer_price: None,
            images: Vec::new(),
            created_at: current_timestamp(),
        }
    }

    /// Set the offer price.
    #[must_use]
    pub fn with_offer_price(mut self, offer_price: Money) -> Self {
        self.offer_price = Some(offer_price);
        self
    }

    /// The price used for all estimate and order computations: the offer
    /// price when present, the list price otherwise.
    pub fn effective_price(&self) -> Money {
        self.offer_price.unwrap_or(self.list_price)
    }

    /// Whether the product is currently discounted.
    pub fn is_on_offer(&self) -> bool {
        self.offer_price
            .map(|offer| offer.amount_cents < self.list_price.amount_cents)
            .unwrap_or(false)
    }

    /// Primary display image, if any.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Validate the pricing rules: an offer price must not exceed the
    /// list price and must share its currency.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if let Some(offer) = self.offer_price {
            if offer.currency != self.list_price.currency {
                return Err(CommerceError::CurrencyMismatch {
                    expected: self.list_price.currency.code().to_string(),
                    got: offer.currency.code().to_string(),
                });
            }
            if offer.amount_cents > self.list_price.amount_cents {
                return Err(CommerceError::InvalidProduct {
                    product_id: self.id.to_string(),
                    reason: "offer price exceeds list price".to_string(),
                });
            }
        }
        Ok(())
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

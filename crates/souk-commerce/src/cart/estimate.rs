//! Advisory cart pricing.
//!
//! Computes the buyer-facing subtotal/tax/total shown before checkout.
//! The estimate is display-only and carries no commitment: checkout
//! re-resolves every price server-side against the live catalog.

use crate::cart::Cart;
use crate::catalog::CatalogSnapshot;
use crate::error::CommerceError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Pricing configuration for estimates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Flat tax rate in basis points (200 = 2%).
    pub tax_rate_bps: i64,
    /// Currency all estimates are computed in.
    pub currency: Currency,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            tax_rate_bps: 200,
            currency: Currency::default(),
        }
    }
}

impl PricingConfig {
    /// Create a configuration for the given currency.
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            ..Default::default()
        }
    }

    /// Set the flat tax rate in basis points.
    #[must_use]
    pub fn with_tax_rate_bps(mut self, tax_rate_bps: i64) -> Self {
        self.tax_rate_bps = tax_rate_bps;
        self
    }
}

/// The buyer-facing price breakdown for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEstimate {
    /// Sum of effective unit price × quantity over priceable lines.
    pub subtotal: Money,
    /// Flat-rate tax, floored once on the subtotal.
    pub tax: Money,
    /// `subtotal + tax`.
    pub total: Money,
}

impl CartEstimate {
    /// Price a cart against a catalog snapshot.
    ///
    /// Lines whose product is absent from the snapshot are silently
    /// excluded: the product may have been removed from the catalog
    /// since it was added to the cart. This tolerance is deliberate and
    /// belongs to the advisory path only; checkout validates the same
    /// condition strictly.
    pub fn compute(
        cart: &Cart,
        snapshot: &CatalogSnapshot,
        config: &PricingConfig,
    ) -> Result<CartEstimate, CommerceError> {
        let mut subtotal = Money::zero(config.currency);

        for line in cart.lines() {
            let Some(product) = snapshot.get(&line.product_id) else {
                continue;
            };
            let line_total = product
                .effective_price()
                .try_multiply(line.quantity)
                .ok_or(CommerceError::Overflow)?;
            if line_total.currency != config.currency {
                return Err(CommerceError::CurrencyMismatch {
                    expected: config.currency.code().to_string(),
                    got: line_total.currency.code().to_string(),
                });
            }
            subtotal = subtotal
                .try_add(&line_total)
                .ok_or(CommerceError::Overflow)?;
        }

        let tax = subtotal
            .basis_points(config.tax_rate_bps)
            .ok_or(CommerceError::Overflow)?;
        let total = subtotal.try_add(&tax).ok_or(CommerceError::Overflow)?;

        Ok(CartEstimate {
            subtotal,
            tax,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::ids::{ProductId, SellerId};

    fn product(id: &str, seller: &str, list: i64, offer: Option<i64>) -> Product {
        let mut p = Product::new(
            ProductId::new(id),
            SellerId::new(seller),
            id.to_string(),
            Money::new(list, Currency::USD),
        );
        p.offer_price = offer.map(|o| Money::new(o, Currency::USD));
        p
    }

    fn config() -> PricingConfig {
        PricingConfig::new(Currency::USD)
    }

    #[test]
    fn test_estimate_sums_effective_prices() {
        let snapshot = CatalogSnapshot::from_products(vec![
            product("p1", "s1", 10000, None),
            product("p2", "s2", 5000, None),
        ]);
        let cart = Cart::new()
            .with_quantity(&ProductId::new("p1"), 2)
            .unwrap()
            .with_quantity(&ProductId::new("p2"), 1)
            .unwrap();

        let estimate = CartEstimate::compute(&cart, &snapshot, &config()).unwrap();
        assert_eq!(estimate.subtotal.amount_cents, 25000);
        assert_eq!(estimate.tax.amount_cents, 500);
        assert_eq!(estimate.total.amount_cents, 25500);
    }

    #[test]
    fn test_estimate_uses_offer_price() {
        // offer 80.00 beats list 100.00
        let snapshot =
            CatalogSnapshot::from_products(vec![product("p1", "s1", 10000, Some(8000))]);
        let cart = Cart::new().add(&ProductId::new("p1"));

        let estimate = CartEstimate::compute(&cart, &snapshot, &config()).unwrap();
        assert_eq!(estimate.subtotal.amount_cents, 8000);
    }

    #[test]
    fn test_estimate_skips_missing_products() {
        let snapshot = CatalogSnapshot::from_products(vec![product("p1", "s1", 10000, None)]);
        let cart = Cart::new()
            .add(&ProductId::new("p1"))
            .add(&ProductId::new("ghost"));

        let estimate = CartEstimate::compute(&cart, &snapshot, &config()).unwrap();
        assert_eq!(estimate.subtotal.amount_cents, 10000);
    }

    #[test]
    fn test_tax_floors_once_on_subtotal() {
        // two lines of 4999: a per-line floor would give 99 + 99 = 198,
        // the single floor on the 9998 subtotal gives 199
        let snapshot = CatalogSnapshot::from_products(vec![
            product("p1", "s1", 4999, None),
            product("p2", "s1", 4999, None),
        ]);
        let cart = Cart::new()
            .add(&ProductId::new("p1"))
            .add(&ProductId::new("p2"));

        let estimate = CartEstimate::compute(&cart, &snapshot, &config()).unwrap();
        assert_eq!(estimate.tax.amount_cents, 199);
    }

    #[test]
    fn test_empty_cart_estimates_to_zero() {
        let snapshot = CatalogSnapshot::default();
        let estimate = CartEstimate::compute(&Cart::new(), &snapshot, &config()).unwrap();
        assert!(estimate.subtotal.is_zero());
        assert!(estimate.tax.is_zero());
        assert!(estimate.total.is_zero());
    }
}

//! The buyer's cart.
//!
//! A cart is client/session state only: a mapping from product id to a
//! positive quantity. It is never persisted; checkout consumes its lines
//! and the caller discards it once orders are confirmed.
//!
//! Edits are copy-on-write: every operation returns a new, independent
//! cart so concurrent readers of the previous state are unaffected. This
//! mirrors how the UI layer treats cart state as an immutable value.

use crate::error::CommerceError;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One product/quantity pair read out of a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// The product being purchased.
    pub product_id: ProductId,
    /// Desired quantity, always positive.
    pub quantity: i64,
}

/// A buyer's cart: product id mapped to a positive quantity.
///
/// Invariant: every stored quantity is > 0. A line whose quantity reaches
/// zero is removed, never stored as zero, and each product appears at most
/// once by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: BTreeMap<ProductId, i64>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a new cart with the product's quantity incremented by one
    /// (starting from zero if absent).
    #[must_use]
    pub fn add(&self, product_id: &ProductId) -> Cart {
        let mut items = self.items.clone();
        *items.entry(product_id.clone()).or_insert(0) += 1;
        Cart { items }
    }

    /// Return a new cart with the product's quantity set to `quantity`.
    ///
    /// A quantity of zero removes the entry entirely; negative quantities
    /// are rejected as an input-validation error.
    pub fn with_quantity(
        &self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<Cart, CommerceError> {
        if quantity < 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        let mut items = self.items.clone();
        if quantity == 0 {
            items.remove(product_id);
        } else {
            items.insert(product_id.clone(), quantity);
        }
        Ok(Cart { items })
    }

    /// Return a new cart without the product.
    #[must_use]
    pub fn without(&self, product_id: &ProductId) -> Cart {
        let mut items = self.items.clone();
        items.remove(product_id);
        Cart { items }
    }

    /// Quantity stored for a product, zero if absent.
    pub fn quantity_of(&self, product_id: &ProductId) -> i64 {
        self.items.get(product_id).copied().unwrap_or(0)
    }

    /// Whether the product has an entry.
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.items.contains_key(product_id)
    }

    /// Sum of all quantities; the "cart is empty" check uses this.
    pub fn count(&self) -> i64 {
        self.items.values().sum()
    }

    /// Number of distinct products.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate the cart as lines, in product-id order.
    pub fn lines(&self) -> impl Iterator<Item = CartLine> + '_ {
        self.items.iter().map(|(product_id, quantity)| CartLine {
            product_id: product_id.clone(),
            quantity: *quantity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(s: &str) -> ProductId {
        ProductId::new(s)
    }

    #[test]
    fn test_add_increments_from_zero() {
        let cart = Cart::new().add(&pid("p1")).add(&pid("p1")).add(&pid("p2"));
        assert_eq!(cart.quantity_of(&pid("p1")), 2);
        assert_eq!(cart.quantity_of(&pid("p2")), 1);
        assert_eq!(cart.count(), 3);
        assert_eq!(cart.unique_item_count(), 2);
    }

    #[test]
    fn test_add_does_not_mutate_input() {
        let before = Cart::new().add(&pid("p1"));
        let after = before.add(&pid("p1"));
        assert_eq!(before.quantity_of(&pid("p1")), 1);
        assert_eq!(after.quantity_of(&pid("p1")), 2);
    }

    #[test]
    fn test_set_quantity_is_idempotent() {
        let cart = Cart::new();
        let once = cart.with_quantity(&pid("p1"), 3).unwrap();
        let twice = once.with_quantity(&pid("p1"), 3).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_set_quantity_zero_removes_entry() {
        let cart = Cart::new().with_quantity(&pid("p1"), 3).unwrap();
        let cleared = cart.with_quantity(&pid("p1"), 0).unwrap();
        // key absent, not present-with-zero
        assert!(!cleared.contains(&pid("p1")));
        assert!(cleared.is_empty());
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let cart = Cart::new();
        let err = cart.with_quantity(&pid("p1"), -1).unwrap_err();
        assert!(matches!(err, CommerceError::InvalidQuantity(-1)));
    }

    #[test]
    fn test_without_removes_entry() {
        let cart = Cart::new().add(&pid("p1")).add(&pid("p2"));
        let trimmed = cart.without(&pid("p1"));
        assert!(!trimmed.contains(&pid("p1")));
        assert_eq!(trimmed.count(), 1);
    }

    #[test]
    fn test_lines_are_ordered_and_positive() {
        let cart = Cart::new()
            .with_quantity(&pid("b"), 2)
            .unwrap()
            .with_quantity(&pid("a"), 1)
            .unwrap();
        let lines: Vec<CartLine> = cart.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].product_id, pid("a"));
        assert!(lines.iter().all(|l| l.quantity > 0));
    }
}

//! Commerce domain types and logic for Souk.
//!
//! Souk is a storefront where independent sellers list products in one
//! catalog and a buyer checks out a single cart spanning several sellers.
//! This crate holds the pure domain layer shared by the storage and
//! checkout crates:
//!
//! - **Money**: integer minor-unit amounts with checked arithmetic
//! - **Cart**: the buyer-held product/quantity mapping and its edits
//! - **Catalog**: products with an owning seller and list/offer pricing
//! - **Checkout**: address snapshots, payment methods, orders
//!
//! # Example
//!
//! ```rust
//! use souk_commerce::prelude::*;
//!
//! let cart = Cart::new()
//!     .add(&ProductId::new("prod-1"))
//!     .add(&ProductId::new("prod-1"));
//! assert_eq!(cart.count(), 2);
//! ```
//!
//! Nothing in this crate performs I/O; persistence contracts live in
//! `souk-store` and the order decomposition engine in `souk-checkout`.

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Cart
    pub use crate::cart::{Cart, CartEstimate, CartLine, PricingConfig};

    // Catalog
    pub use crate::catalog::{CatalogSnapshot, Product};

    // Checkout
    pub use crate::checkout::{
        Order, OrderDraft, OrderLineItem, OrderStatus, PaymentMethod, ShippingAddress,
    };
}

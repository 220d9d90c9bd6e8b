//! Order decomposition and pricing reconciliation for Souk.
//!
//! This crate is the server-side core of the storefront. It takes a
//! buyer's raw cart (product ids and quantities chosen client-side,
//! where prices are never trusted), re-resolves every price against the
//! authoritative catalog, partitions the lines by owning seller, and
//! commits one seller-scoped order per group with server-computed
//! totals.
//!
//! # Example
//!
//! ```rust,ignore
//! use souk_checkout::prelude::*;
//!
//! let engine = CheckoutEngine::new(catalog, orders);
//! let request = PlaceOrdersRequest::from_cart(
//!     buyer_id, &cart, shipping_address, PaymentMethod::Cod,
//! );
//! let created = engine.place_orders(request).await?;
//! // one order per distinct seller in the cart
//! ```
//!
//! Failure reporting is deliberately fine-grained: validation rejects
//! before anything is written, a missing product aborts the whole
//! checkout naming the offending ids, and per-seller persistence
//! outcomes are never collapsed into one opaque failure.

pub mod engine;
pub mod error;
pub mod history;
pub mod request;

pub use engine::CheckoutEngine;
pub use error::{CheckoutError, SellerFailure};
pub use history::{OrderHistory, OrderLineView, OrderView, PRODUCT_REMOVED};
pub use request::{ItemSelection, PlaceOrdersRequest};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::engine::CheckoutEngine;
    pub use crate::error::{CheckoutError, SellerFailure};
    pub use crate::history::{OrderHistory, OrderLineView, OrderView, PRODUCT_REMOVED};
    pub use crate::request::{ItemSelection, PlaceOrdersRequest};

    pub use souk_commerce::checkout::{Order, PaymentMethod, ShippingAddress};
    pub use souk_store::{OrderQuery, OrderStore, ProductCatalog, SellerDirectory};
}

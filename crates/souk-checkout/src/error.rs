//! Checkout error taxonomy.
//!
//! Every failure path carries a discriminated kind, never a bare
//! success flag, so callers can tell "fix your input" from "prune the
//! cart" from "retry the whole request" from "reconcile a partial
//! commit". Messages name domain facts only; connection and backend
//! details stay out of the caller-visible surface.

use serde::{Deserialize, Serialize};
use souk_commerce::checkout::Order;
use souk_commerce::ids::{ProductId, SellerId};
use souk_store::StoreError;
use thiserror::Error;

/// One seller group whose order could not be persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerFailure {
    /// The seller whose order failed.
    pub seller_id: SellerId,
    /// Human-readable reason.
    pub reason: String,
}

/// Errors returned by the checkout engine and the order read path.
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// Malformed input: empty cart, non-positive quantity, incomplete
    /// address. Recoverable by the caller correcting the request.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Missing or invalid caller identity; terminal for the request.
    #[error("Unauthorized")]
    Unauthorized,

    /// One or more referenced products no longer exist. Carries the
    /// offending ids so the caller can prune the cart and retry; zero
    /// orders were created.
    #[error("Products not found: {}", fmt_ids(.missing))]
    ProductsNotFound { missing: Vec<ProductId> },

    /// Some per-seller orders were created, others failed. Enumerates
    /// both sides so the caller never double-charges or silently loses
    /// an order.
    #[error(
        "Partial commit: {} order(s) created, {} seller group(s) failed",
        .created.len(),
        .failures.len()
    )]
    PartialCommit {
        created: Vec<Order>,
        failures: Vec<SellerFailure>,
    },

    /// The catalog or order store could not be reached and nothing was
    /// committed; the whole request is safe to retry.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl CheckoutError {
    /// Stable wire identifier for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            CheckoutError::InvalidRequest(_) => "invalid_request",
            CheckoutError::Unauthorized => "unauthorized",
            CheckoutError::ProductsNotFound { .. } => "products_not_found",
            CheckoutError::PartialCommit { .. } => "partial_commit",
            CheckoutError::StorageUnavailable(_) => "storage_unavailable",
        }
    }

    /// Whether repeating the identical request is safe.
    ///
    /// A partial commit is NOT retryable as-is: the caller must first
    /// reconcile which seller groups already committed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CheckoutError::StorageUnavailable(_))
    }
}

impl From<StoreError> for CheckoutError {
    fn from(e: StoreError) -> Self {
        CheckoutError::StorageUnavailable(e.to_string())
    }
}

fn fmt_ids(ids: &[ProductId]) -> String {
    ids.iter()
        .map(|id| id.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

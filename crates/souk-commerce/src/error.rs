//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in commerce domain operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Quantity is zero or negative where a positive count is required.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Arithmetic overflow in a money calculation.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Two amounts in different currencies were combined.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// A product record violates its own pricing rules.
    #[error("Invalid product {product_id}: {reason}")]
    InvalidProduct { product_id: String, reason: String },

    /// An order line or order violates a structural rule.
    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::Serialization(e.to_string())
    }
}

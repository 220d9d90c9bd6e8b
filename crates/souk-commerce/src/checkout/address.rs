//! Shipping address snapshots.

use serde::{Deserialize, Serialize};

/// A shipping address, copied by value into every order it ships.
///
/// Orders hold a snapshot, not a reference into the buyer's address book:
/// later edits to a saved address must not alter past orders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ShippingAddress {
    /// Recipient full name.
    pub full_name: String,
    /// Contact phone number.
    pub phone_number: String,
    /// Street address.
    pub street: String,
    /// City.
    pub city: String,
    /// State/province.
    pub state: String,
    /// Postal/ZIP code.
    pub zip_code: String,
    /// Nearby landmark, optional.
    pub landmark: Option<String>,
    /// Country.
    pub country: String,
}

impl ShippingAddress {
    /// Create a complete address.
    pub fn new(
        full_name: impl Into<String>,
        phone_number: impl Into<String>,
        street: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zip_code: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            phone_number: phone_number.into(),
            street: street.into(),
            city: city.into(),
            state: state.into(),
            zip_code: zip_code.into(),
            landmark: None,
            country: country.into(),
        }
    }

    /// Names of required fields that are empty. Landmark is optional.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.full_name.trim().is_empty() {
            missing.push("fullName");
        }
        if self.phone_number.trim().is_empty() {
            missing.push("phoneNumber");
        }
        if self.street.trim().is_empty() {
            missing.push("street");
        }
        if self.city.trim().is_empty() {
            missing.push("city");
        }
        if self.state.trim().is_empty() {
            missing.push("state");
        }
        if self.zip_code.trim().is_empty() {
            missing.push("zipCode");
        }
        if self.country.trim().is_empty() {
            missing.push("country");
        }
        missing
    }

    /// Check if every required field is filled in.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Format as a single display line.
    pub fn one_line(&self) -> String {
        let mut parts = vec![self.street.clone()];
        if let Some(ref landmark) = self.landmark {
            parts.push(landmark.clone());
        }
        parts.push(self.city.clone());
        parts.push(self.state.clone());
        parts.push(self.zip_code.clone());
        parts.push(self.country.clone());
        parts.join(", ")
    }
}

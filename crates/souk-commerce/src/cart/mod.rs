//! Cart types: the buyer-held product/quantity mapping and the advisory
//! price resolver used wherever the cart is displayed.

mod cart;
mod estimate;

pub use cart::{Cart, CartLine};
pub use estimate::{CartEstimate, PricingConfig};

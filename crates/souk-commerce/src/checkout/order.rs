//! Order types.
//!
//! An order is created exactly once by the decomposition engine, is
//! scoped to a single seller, and is immutable afterwards except for its
//! status, which seller-side collaborators advance.

use crate::checkout::{PaymentMethod, ShippingAddress};
use crate::error::CommerceError;
use crate::ids::{BuyerId, OrderId, ProductId, SellerId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Order fulfilment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order placed, awaiting the seller.
    #[default]
    Pending,
    /// Seller is preparing the order.
    Processing,
    /// Order handed to the carrier.
    Shipped,
    /// Order delivered.
    Delivered,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
        }
    }

    /// Parse the wire form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(OrderStatus::Pending),
            "processing" => Some(OrderStatus::Processing),
            "shipped" => Some(OrderStatus::Shipped),
            "delivered" => Some(OrderStatus::Delivered),
            _ => None,
        }
    }

    /// Check if the order has reached its final state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered)
    }

    /// Statuses advance strictly forward, one step at a time.
    pub fn can_advance_to(&self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::Processing)
                | (OrderStatus::Processing, OrderStatus::Shipped)
                | (OrderStatus::Shipped, OrderStatus::Delivered)
        )
    }
}

/// A line item in an order.
///
/// `unit_price` is a snapshot of the product's effective price at
/// order-creation time; a later catalog change never reprices it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLineItem {
    /// Product being purchased.
    pub product_id: ProductId,
    /// Quantity ordered, always positive.
    pub quantity: i64,
    /// Effective unit price captured at creation time.
    pub unit_price: Money,
    /// `unit_price * quantity`, computed with checked arithmetic.
    pub line_total: Money,
}

impl OrderLineItem {
    /// Build a line item, computing its total.
    pub fn new(
        product_id: ProductId,
        quantity: i64,
        unit_price: Money,
    ) -> Result<Self, CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        let line_total = unit_price
            .try_multiply(quantity)
            .ok_or(CommerceError::Overflow)?;
        Ok(Self {
            product_id,
            quantity,
            unit_price,
            line_total,
        })
    }
}

/// An order before the store has assigned it an id and timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderDraft {
    /// The buyer placing the order.
    pub buyer_id: BuyerId,
    /// The single seller this order is scoped to.
    pub seller_id: SellerId,
    /// Line items, all owned by `seller_id`.
    pub items: Vec<OrderLineItem>,
    /// Exact sum of the line totals; excludes display-time tax.
    pub total_amount: Money,
    /// Shipping address snapshot.
    pub shipping_address: ShippingAddress,
    /// Selected payment method.
    pub payment_method: PaymentMethod,
    /// Caller-supplied key for replay detection, if any.
    pub idempotency_key: Option<String>,
}

impl OrderDraft {
    /// Assemble a draft, verifying conservation: the total must equal the
    /// exact sum of the line totals.
    pub fn new(
        buyer_id: BuyerId,
        seller_id: SellerId,
        items: Vec<OrderLineItem>,
        shipping_address: ShippingAddress,
        payment_method: PaymentMethod,
    ) -> Result<Self, CommerceError> {
        if items.is_empty() {
            return Err(CommerceError::InvalidOrder(
                "order must contain at least one line item".to_string(),
            ));
        }
        let currency = items[0].unit_price.currency;
        if let Some(item) = items.iter().find(|i| i.line_total.currency != currency) {
            return Err(CommerceError::CurrencyMismatch {
                expected: currency.code().to_string(),
                got: item.line_total.currency.code().to_string(),
            });
        }
        let total_amount = Money::try_sum(items.iter().map(|i| &i.line_total), currency)
            .ok_or(CommerceError::Overflow)?;
        Ok(Self {
            buyer_id,
            seller_id,
            items,
            total_amount,
            shipping_address,
            payment_method,
            idempotency_key: None,
        })
    }

    /// Attach an idempotency key.
    #[must_use]
    pub fn with_idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }
}

/// A persisted, seller-scoped order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Store-assigned unique identifier.
    pub id: OrderId,
    /// The buyer who placed the order.
    pub buyer_id: BuyerId,
    /// The seller the order is scoped to.
    pub seller_id: SellerId,
    /// Line items.
    pub items: Vec<OrderLineItem>,
    /// Server-computed total; never accepted from the client.
    pub total_amount: Money,
    /// Shipping address snapshot.
    pub shipping_address: ShippingAddress,
    /// Selected payment method.
    pub payment_method: PaymentMethod,
    /// Fulfilment status, the only mutable field.
    pub status: OrderStatus,
    /// Caller-supplied replay key, if any.
    pub idempotency_key: Option<String>,
    /// Unix timestamp assigned at creation.
    pub created_at: i64,
}

impl Order {
    /// Materialize a draft into a stored order. Called by the order
    /// store when it commits the record.
    pub fn from_draft(draft: OrderDraft, id: OrderId, created_at: i64) -> Self {
        Self {
            id,
            buyer_id: draft.buyer_id,
            seller_id: draft.seller_id,
            items: draft.items,
            total_amount: draft.total_amount,
            shipping_address: draft.shipping_address,
            payment_method: draft.payment_method,
            status: OrderStatus::Pending,
            idempotency_key: draft.idempotency_key,
            created_at,
        }
    }

    /// Total item count across the order's lines.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Recompute the total from the stored lines; equal to
    /// `total_amount` for any order this core created.
    pub fn computed_total(&self) -> Option<Money> {
        Money::try_sum(
            self.items.iter().map(|i| &i.line_total),
            self.total_amount.currency,
        )
    }

    /// Advance the status by one step, rejecting skips and regressions.
    pub fn advance_status(&mut self, next: OrderStatus) -> Result<(), CommerceError> {
        if !self.status.can_advance_to(next) {
            return Err(CommerceError::InvalidOrder(format!(
                "cannot advance order from {} to {}",
                self.status.as_str(),
                next.as_str()
            )));
        }
        self.status = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn line(id: &str, qty: i64, cents: i64) -> OrderLineItem {
        OrderLineItem::new(ProductId::new(id), qty, Money::new(cents, Currency::USD)).unwrap()
    }

    fn draft() -> OrderDraft {
        OrderDraft::new(
            BuyerId::new("buyer-1"),
            SellerId::new("seller-1"),
            vec![line("p1", 2, 10000), line("p2", 1, 5000)],
            ShippingAddress::default(),
            PaymentMethod::Cod,
        )
        .unwrap()
    }

    #[test]
    fn test_line_item_total() {
        let item = line("p1", 3, 2500);
        assert_eq!(item.line_total.amount_cents, 7500);
    }

    #[test]
    fn test_line_item_rejects_non_positive_quantity() {
        let err = OrderLineItem::new(
            ProductId::new("p1"),
            0,
            Money::new(100, Currency::USD),
        )
        .unwrap_err();
        assert!(matches!(err, CommerceError::InvalidQuantity(0)));
    }

    #[test]
    fn test_draft_total_is_sum_of_line_totals() {
        let d = draft();
        assert_eq!(d.total_amount.amount_cents, 25000);
    }

    #[test]
    fn test_draft_rejects_empty_items() {
        let err = OrderDraft::new(
            BuyerId::new("buyer-1"),
            SellerId::new("seller-1"),
            vec![],
            ShippingAddress::default(),
            PaymentMethod::Cod,
        )
        .unwrap_err();
        assert!(matches!(err, CommerceError::InvalidOrder(_)));
    }

    #[test]
    fn test_order_conserves_total() {
        let order = Order::from_draft(draft(), OrderId::new("o1"), 1_700_000_000);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.computed_total().unwrap(), order.total_amount);
    }

    #[test]
    fn test_status_advances_one_step() {
        let mut order = Order::from_draft(draft(), OrderId::new("o1"), 0);
        assert!(order.advance_status(OrderStatus::Shipped).is_err());
        order.advance_status(OrderStatus::Processing).unwrap();
        order.advance_status(OrderStatus::Shipped).unwrap();
        order.advance_status(OrderStatus::Delivered).unwrap();
        assert!(order.status.is_terminal());
        assert!(order.advance_status(OrderStatus::Pending).is_err());
    }
}

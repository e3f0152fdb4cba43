//! Order entities.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::{
    CustomerId, Email, OrderId, OrderItemId, OrderNumber, OrderStatus, PaymentMethod, ProductId,
};

/// A purchase transaction snapshot.
///
/// Customer contact fields are denormalized at order time: later edits to
/// the customer record never change what a historical order shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Internal numeric ID.
    pub id: OrderId,
    /// Externally visible unique identifier, immutable once assigned.
    pub order_number: OrderNumber,
    /// Soft reference to the customer; `None` once the customer is gone.
    pub customer_id: Option<CustomerId>,
    /// Customer name as entered at checkout.
    pub customer_name: String,
    /// Customer email as entered at checkout.
    pub customer_email: Email,
    /// Customer phone as entered at checkout.
    pub customer_phone: Option<String>,
    /// Shipping street address.
    pub shipping_address: String,
    /// Shipping city.
    pub shipping_city: Option<String>,
    /// Sum of line totals.
    pub subtotal: Decimal,
    /// Flat shipping cost.
    pub shipping_cost: Decimal,
    /// Amount owed.
    pub total: Decimal,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// Selected payment method.
    pub payment_method: PaymentMethod,
    /// Free-text customer notes.
    pub notes: Option<String>,
    /// When the order was created.
    pub created_at: DateTime<Utc>,
    /// When the order was last updated (bumped on status changes).
    pub updated_at: DateTime<Utc>,
}

/// A line item snapshot bound to exactly one order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    /// Soft reference to the catalog product; survives product deletion.
    pub product_id: Option<ProductId>,
    /// Product display name as shown at checkout.
    pub product_name: String,
    pub quantity: u32,
    /// Unit price.
    pub price: Decimal,
    /// Line total.
    pub total: Decimal,
}

/// An order together with its line items.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// One row of the append-only status transition audit trail.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingEntry {
    pub order_id: OrderId,
    /// Status the order entered.
    pub status: OrderStatus,
    /// Optional operator comment.
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

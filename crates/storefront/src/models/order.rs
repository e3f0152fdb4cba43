//! Order input types.

use rust_decimal::Decimal;

use souq_core::{CustomerId, Email, OrderNumber, OrderTotals, PaymentMethod, ProductId};

/// Input for persisting a new order row.
///
/// Built by the checkout service after validation and customer resolution;
/// the status is always `pending` at this point.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub order_number: OrderNumber,
    pub customer_id: Option<CustomerId>,
    pub customer_name: String,
    pub customer_email: Email,
    pub customer_phone: Option<String>,
    pub shipping_address: String,
    pub shipping_city: Option<String>,
    pub totals: OrderTotals,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
}

/// Input for persisting a single line item.
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub product_id: Option<ProductId>,
    pub product_name: String,
    pub quantity: u32,
    pub price: Decimal,
    pub total: Decimal,
}

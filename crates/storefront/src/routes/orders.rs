//! Order route handlers.
//!
//! The create handler is the single server-side entry point of the
//! client-orchestrated checkout wizard: by the time it is called the client
//! has collected identity, shipping and payment selections.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use souq_core::{CustomerId, OrderTotals, PaymentMethod, ProductId};

use crate::db::orders::OrderRepository;
use crate::error::{AppError, Result};
use crate::models::NewOrderItem;
use crate::services::checkout::{CheckoutService, CreateOrderRequest, ShippingInfo};
use crate::state::AppState;

/// A line item as submitted by the client cart.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemPayload {
    pub product_id: Option<ProductId>,
    pub product_name: String,
    pub quantity: u32,
    pub price: Decimal,
    pub total: Decimal,
}

/// Order creation payload (checkout submission).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderPayload {
    /// Customer id from a logged-in checkout; omitted on the guest path.
    pub customer_id: Option<CustomerId>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub shipping_address: String,
    #[serde(default)]
    pub shipping_city: String,
    pub subtotal: Decimal,
    #[serde(default)]
    pub shipping_cost: Decimal,
    pub total: Decimal,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
    pub items: Vec<OrderItemPayload>,
}

impl From<CreateOrderPayload> for CreateOrderRequest {
    fn from(payload: CreateOrderPayload) -> Self {
        Self {
            customer_id: payload.customer_id,
            shipping: ShippingInfo {
                name: payload.customer_name,
                email: payload.customer_email,
                phone: payload.customer_phone,
                address: payload.shipping_address,
                city: payload.shipping_city,
            },
            payment_method: payload.payment_method,
            notes: payload.notes,
            items: payload
                .items
                .into_iter()
                .map(|item| NewOrderItem {
                    product_id: item.product_id,
                    product_name: item.product_name,
                    quantity: item.quantity,
                    price: item.price,
                    total: item.total,
                })
                .collect(),
            totals: OrderTotals {
                subtotal: payload.subtotal,
                shipping_cost: payload.shipping_cost,
                total: payload.total,
            },
        }
    }
}

/// Query parameters for email-keyed lookups.
#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    #[serde(default)]
    pub email: String,
}

/// Create an order from a checkout submission.
///
/// POST /api/orders
#[instrument(skip(state, payload))]
pub async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderPayload>,
) -> Result<impl IntoResponse> {
    let service = CheckoutService::new(state.pool(), state.config().verify_totals);
    let created = service.create_order(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Get an order by its order number (confirmation view).
///
/// GET /api/orders/number/{order_number}
#[instrument(skip(state))]
pub async fn get_by_number(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
) -> Result<impl IntoResponse> {
    let repo = OrderRepository::new(state.pool());
    let order = repo
        .get_by_number(&order_number)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {order_number}")))?;

    Ok(Json(order))
}

/// List orders placed under an email address ("my orders").
///
/// GET /api/orders/by-email?email=
#[instrument(skip(state, query))]
pub async fn list_by_email(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> Result<impl IntoResponse> {
    if query.email.is_empty() {
        return Err(AppError::BadRequest("Email is required".to_owned()));
    }

    let repo = OrderRepository::new(state.pool());
    let orders = repo.list_by_email(&query.email).await?;

    Ok(Json(orders))
}

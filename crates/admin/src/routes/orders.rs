//! Order route handlers for admin.

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use souq_core::{OrderId, OrderStatus};

use crate::db::orders::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Status update payload.
#[derive(Debug, Deserialize)]
pub struct StatusPayload {
    /// One of the fixed status values (`pending`, `processing`, `shipped`,
    /// `delivered`, `cancelled`).
    pub status: OrderStatus,
    /// Optional comment recorded in the audit trail.
    pub comment: Option<String>,
}

/// List all orders, newest first.
///
/// GET /api/orders
#[instrument(skip(_admin, state))]
pub async fn list(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let repo = OrderRepository::new(state.pool());
    Ok(Json(repo.list().await?))
}

/// Get a single order with its items.
///
/// GET /api/orders/{id}
#[instrument(skip(_admin, state))]
pub async fn detail(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<impl IntoResponse> {
    let repo = OrderRepository::new(state.pool());
    let order = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    Ok(Json(order))
}

/// Update an order's status.
///
/// The active transition policy comes from configuration: by default any
/// status can be set to any other; with `ORDER_STATUS_STRICT` only the
/// transition table is accepted.
///
/// PATCH /api/orders/{id}/status
#[instrument(skip(admin, state, payload))]
pub async fn update_status(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(payload): Json<StatusPayload>,
) -> Result<impl IntoResponse> {
    let repo = OrderRepository::new(state.pool());
    let order = repo
        .update_status(
            id,
            payload.status,
            payload.comment.as_deref(),
            state.config().transition_policy(),
        )
        .await?;

    tracing::info!(
        order_number = %order.order_number,
        status = %order.status,
        admin = %admin.username,
        "order status updated"
    );

    Ok(Json(order))
}

/// Read an order's status transition audit trail.
///
/// GET /api/orders/{id}/tracking
#[instrument(skip(_admin, state))]
pub async fn tracking(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<impl IntoResponse> {
    let repo = OrderRepository::new(state.pool());

    // Distinguish "no transitions yet" from "no such order".
    if repo.get(id).await?.is_none() {
        return Err(AppError::NotFound(format!("order {id}")));
    }

    Ok(Json(repo.tracking_for(id).await?))
}

//! Customer route handlers for admin.

use axum::{Json, extract::State, response::IntoResponse};
use tracing::instrument;

use crate::db::customers::CustomerRepository;
use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// List all customers, newest first.
///
/// GET /api/customers
#[instrument(skip(_admin, state))]
pub async fn list(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let repo = CustomerRepository::new(state.pool());
    Ok(Json(repo.list().await?))
}

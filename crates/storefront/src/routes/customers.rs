//! Customer route handlers.

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use tracing::instrument;

use souq_core::Email;

use crate::db::customers::CustomerRepository;
use crate::error::{AppError, Result};
use crate::routes::orders::EmailQuery;
use crate::state::AppState;

/// Look up a customer by email, used by the checkout wizard to prefill the
/// shipping form.
///
/// GET /api/customers/by-email?email=
#[instrument(skip(state, query))]
pub async fn by_email(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> Result<impl IntoResponse> {
    if query.email.is_empty() {
        return Err(AppError::BadRequest("Email is required".to_owned()));
    }

    let email = Email::parse(&query.email)
        .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;

    let repo = CustomerRepository::new(state.pool());
    let customer = repo
        .get_by_email(&email)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("customer {email}")))?;

    Ok(Json(customer))
}

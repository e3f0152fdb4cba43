//! Customer authentication route handlers.
//!
//! Login and registration both establish a server-side session; the
//! session cookie is the only credential a customer holds.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_sessions::Session;
use tracing::instrument;

use souq_core::{CustomerId, Email};

use crate::error::{AppError, Result};
use crate::middleware::{RequireAuth, clear_current_customer, set_current_customer};
use crate::models::{CurrentCustomer, Customer};
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Registration payload.
#[derive(Debug, Deserialize)]
pub struct RegisterPayload {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login payload.
#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

/// Identity returned after login/registration and from `/me`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityResponse {
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub customer_email: Email,
}

impl From<&Customer> for IdentityResponse {
    fn from(customer: &Customer) -> Self {
        Self {
            customer_id: customer.id,
            customer_name: customer.name.clone(),
            customer_email: customer.email.clone(),
        }
    }
}

/// Register a new customer and log them in.
///
/// POST /api/auth/register
#[instrument(skip(state, session, payload))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<RegisterPayload>,
) -> Result<impl IntoResponse> {
    let service = AuthService::new(state.pool());
    let customer = service
        .register(&payload.name, &payload.email, &payload.password)
        .await?;

    start_session(&session, &customer).await?;

    Ok((StatusCode::CREATED, Json(IdentityResponse::from(&customer))))
}

/// Log a customer in.
///
/// POST /api/auth/login
#[instrument(skip(state, session, payload))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    let service = AuthService::new(state.pool());
    let customer = service.login(&payload.email, &payload.password).await?;

    start_session(&session, &customer).await?;

    Ok(Json(IdentityResponse::from(&customer)))
}

/// Log the current customer out.
///
/// POST /api/auth/logout
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<impl IntoResponse> {
    clear_current_customer(&session)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    Ok(Json(json!({ "success": true })))
}

/// Return the logged-in customer's identity.
///
/// GET /api/auth/me
#[instrument(skip(customer))]
pub async fn me(RequireAuth(customer): RequireAuth) -> Json<IdentityResponse> {
    Json(IdentityResponse {
        customer_id: customer.id,
        customer_name: customer.name,
        customer_email: customer.email,
    })
}

/// Store the customer identity in the session.
async fn start_session(session: &Session, customer: &Customer) -> Result<()> {
    let current = CurrentCustomer {
        id: customer.id,
        name: customer.name.clone(),
        email: customer.email.clone(),
    };
    set_current_customer(session, &current)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))
}

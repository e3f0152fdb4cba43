//! Authentication route handlers for admin.
//!
//! The back office has a single static credential pair; a successful login
//! stores the admin identity in a server-side session.

use axum::{Json, extract::State, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::{clear_current_admin, set_current_admin};
use crate::models::{CurrentAdmin, session_keys};
use crate::state::AppState;

/// Login payload.
#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub username: String,
    pub password: String,
}

/// Log in with the static admin credential pair.
///
/// POST /api/admin/login
#[instrument(skip(state, session, payload))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    if payload.username.is_empty() || payload.password.is_empty() {
        return Err(AppError::BadRequest(
            "Username and password are required".to_owned(),
        ));
    }

    if !state
        .config()
        .credentials_match(&payload.username, &payload.password)
    {
        tracing::warn!(username = %payload.username, "failed admin login attempt");
        return Err(AppError::Unauthorized(
            "Invalid username or password".to_owned(),
        ));
    }

    let admin = CurrentAdmin {
        username: payload.username,
    };
    set_current_admin(&session, &admin)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    Ok(Json(json!({ "success": true })))
}

/// Log the current admin out.
///
/// POST /api/admin/logout
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<impl IntoResponse> {
    clear_current_admin(&session)
        .await
        .map_err(|e| AppError::Internal(format!("session error: {e}")))?;

    Ok(Json(json!({ "success": true })))
}

/// Report whether the session carries an authenticated admin.
///
/// GET /api/admin/auth-status
#[instrument(skip(session))]
pub async fn auth_status(session: Session) -> Json<serde_json::Value> {
    let authenticated = session
        .get::<CurrentAdmin>(session_keys::CURRENT_ADMIN)
        .await
        .ok()
        .flatten()
        .is_some();

    Json(json!({ "isAuthenticated": authenticated }))
}

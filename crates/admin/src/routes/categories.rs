//! Category CRUD route handlers for admin.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::instrument;

use souq_core::CategoryId;

use crate::db::catalog::{CatalogRepository, CategoryPatch, NewCategory};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// List all categories, including inactive ones.
///
/// GET /api/categories
#[instrument(skip(_admin, state))]
pub async fn list(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let repo = CatalogRepository::new(state.pool());
    Ok(Json(repo.list_categories().await?))
}

/// Get a single category.
///
/// GET /api/categories/{id}
#[instrument(skip(_admin, state))]
pub async fn detail(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Result<impl IntoResponse> {
    let repo = CatalogRepository::new(state.pool());
    let category = repo
        .get_category(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("category {id}")))?;

    Ok(Json(category))
}

/// Create a category.
///
/// POST /api/categories
#[instrument(skip(_admin, state, payload))]
pub async fn create(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(payload): Json<NewCategory>,
) -> Result<impl IntoResponse> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be empty".to_owned()));
    }

    let repo = CatalogRepository::new(state.pool());
    let category = repo.create_category(&payload).await?;

    Ok((StatusCode::CREATED, Json(category)))
}

/// Apply a partial update to a category.
///
/// PATCH /api/categories/{id}
#[instrument(skip(_admin, state, payload))]
pub async fn update(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
    Json(payload): Json<CategoryPatch>,
) -> Result<impl IntoResponse> {
    let repo = CatalogRepository::new(state.pool());
    let category = repo.update_category(id, &payload).await?;

    Ok(Json(category))
}

/// Delete a category.
///
/// DELETE /api/categories/{id}
#[instrument(skip(_admin, state))]
pub async fn delete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Result<impl IntoResponse> {
    let repo = CatalogRepository::new(state.pool());
    if !repo.delete_category(id).await? {
        return Err(AppError::NotFound(format!("category {id}")));
    }

    Ok(StatusCode::NO_CONTENT)
}

//! Product CRUD route handlers for admin.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::instrument;

use souq_core::ProductId;

use crate::db::catalog::{CatalogRepository, NewProduct, ProductPatch};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// List all products, including inactive ones.
///
/// GET /api/products
#[instrument(skip(_admin, state))]
pub async fn list(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let repo = CatalogRepository::new(state.pool());
    Ok(Json(repo.list_products().await?))
}

/// Get a single product.
///
/// GET /api/products/{id}
#[instrument(skip(_admin, state))]
pub async fn detail(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<impl IntoResponse> {
    let repo = CatalogRepository::new(state.pool());
    let product = repo
        .get_product(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(Json(product))
}

/// Create a product.
///
/// POST /api/products
#[instrument(skip(_admin, state, payload))]
pub async fn create(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(payload): Json<NewProduct>,
) -> Result<impl IntoResponse> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be empty".to_owned()));
    }

    let repo = CatalogRepository::new(state.pool());
    let product = repo.create_product(&payload).await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// Apply a partial update to a product.
///
/// PATCH /api/products/{id}
#[instrument(skip(_admin, state, payload))]
pub async fn update(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(payload): Json<ProductPatch>,
) -> Result<impl IntoResponse> {
    let repo = CatalogRepository::new(state.pool());
    let product = repo.update_product(id, &payload).await?;

    Ok(Json(product))
}

/// Delete a product.
///
/// DELETE /api/products/{id}
#[instrument(skip(_admin, state))]
pub async fn delete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<impl IntoResponse> {
    let repo = CatalogRepository::new(state.pool());
    if !repo.delete_product(id).await? {
        return Err(AppError::NotFound(format!("product {id}")));
    }

    Ok(StatusCode::NO_CONTENT)
}

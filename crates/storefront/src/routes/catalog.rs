//! Catalog route handlers (read-only).

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::instrument;

use souq_core::{CategoryId, ProductId};

use crate::db::catalog::CatalogRepository;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// List all active products.
///
/// GET /api/products
#[instrument(skip(state))]
pub async fn list_products(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let repo = CatalogRepository::new(state.pool());
    Ok(Json(repo.list_active_products().await?))
}

/// Get a single active product.
///
/// GET /api/products/{id}
#[instrument(skip(state))]
pub async fn get_product(
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

/// List all active categories.
///
/// GET /api/categories
#[instrument(skip(state))]
pub async fn list_categories(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let repo = CatalogRepository::new(state.pool());
    Ok(Json(repo.list_active_categories().await?))
}

/// Get a single active category.
///
/// GET /api/categories/{id}
#[instrument(skip(state))]
pub async fn get_category(
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

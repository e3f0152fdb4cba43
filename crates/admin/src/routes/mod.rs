//! HTTP route handlers for the admin panel.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                       - Liveness check
//! GET  /health/ready                 - Readiness check (pings the database)
//!
//! # Auth (public)
//! POST /api/admin/login              - Login with the static credential pair
//! POST /api/admin/logout             - Logout
//! GET  /api/admin/auth-status        - Whether the session is authenticated
//!
//! # Orders (admin session required)
//! GET   /api/orders                  - Order listing, newest first
//! GET   /api/orders/{id}             - Order detail with items
//! PATCH /api/orders/{id}/status      - Status update (state machine)
//! GET   /api/orders/{id}/tracking    - Status transition audit trail
//!
//! # Customers (admin session required)
//! GET  /api/customers                - Customer listing
//!
//! # Catalog CRUD (admin session required)
//! POST   /api/products               - Create product
//! PATCH  /api/products/{id}          - Update product
//! DELETE /api/products/{id}          - Delete product
//! GET    /api/products               - List products (incl. inactive)
//! GET    /api/products/{id}          - Product detail
//! (categories mirror products)
//! ```

pub mod auth;
pub mod categories;
pub mod customers;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::state::AppState;

/// Create the full admin router (everything except health checks).
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/admin", auth_routes())
        .nest("/api", api_routes())
}

/// Create the admin auth routes router.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/auth-status", get(auth::auth_status))
}

/// Create the order, customer and catalog routes router.
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(orders::list))
        .route("/orders/{id}", get(orders::detail))
        .route("/orders/{id}/status", patch(orders::update_status))
        .route("/orders/{id}/tracking", get(orders::tracking))
        .route("/customers", get(customers::list))
        .route(
            "/products",
            get(products::list).post(products::create),
        )
        .route(
            "/products/{id}",
            get(products::detail)
                .patch(products::update)
                .delete(products::delete),
        )
        .route(
            "/categories",
            get(categories::list).post(categories::create),
        )
        .route(
            "/categories/{id}",
            get(categories::detail)
                .patch(categories::update)
                .delete(categories::delete),
        )
}

//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Liveness check
//! GET  /health/ready                    - Readiness check (pings the database)
//!
//! # Catalog (public, active entries only)
//! GET  /api/products                    - Product listing
//! GET  /api/products/{id}               - Product detail
//! GET  /api/categories                  - Category listing
//! GET  /api/categories/{id}             - Category detail
//!
//! # Customer auth (session cookie)
//! POST /api/auth/register               - Register (name, email, password)
//! POST /api/auth/login                  - Login (email, password)
//! POST /api/auth/logout                 - Logout
//! GET  /api/auth/me                     - Current customer (requires auth)
//!
//! # Customers
//! GET  /api/customers/by-email?email=   - Customer lookup for profile prefill
//!
//! # Orders
//! POST /api/orders                      - Create order (checkout submission)
//! GET  /api/orders/number/{number}      - Order confirmation lookup
//! GET  /api/orders/by-email?email=      - "My orders" listing
//! ```

pub mod auth;
pub mod catalog;
pub mod customers;
pub mod orders;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the full storefront router (everything except health checks).
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/auth", auth_routes())
        .nest("/api", api_routes())
}

/// Create the customer auth routes router.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create the catalog, customer and order routes router.
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(catalog::list_products))
        .route("/products/{id}", get(catalog::get_product))
        .route("/categories", get(catalog::list_categories))
        .route("/categories/{id}", get(catalog::get_category))
        .route("/customers/by-email", get(customers::by_email))
        .route("/orders", post(orders::create_order))
        .route("/orders/number/{order_number}", get(orders::get_by_number))
        .route("/orders/by-email", get(orders::list_by_email))
}

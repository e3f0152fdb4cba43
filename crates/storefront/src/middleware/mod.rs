//! Middleware for the storefront.

pub mod auth;
pub mod session;

pub use auth::{RequireAuth, clear_current_customer, set_current_customer};
pub use session::create_session_layer;

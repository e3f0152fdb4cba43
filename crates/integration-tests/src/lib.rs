//! Integration tests for Souq.
//!
//! # Running Tests
//!
//! These tests drive the real servers over HTTP and are `#[ignore]`d by
//! default. To run them:
//!
//! ```bash
//! # Start PostgreSQL and run migrations
//! cargo run -p souq-cli -- migrate
//!
//! # Start both servers
//! cargo run -p souq-storefront &
//! cargo run -p souq-admin &
//!
//! # Run the ignored tests
//! cargo test -p souq-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_BASE_URL` - storefront under test (default: `http://localhost:3000`)
//! - `ADMIN_BASE_URL` - admin panel under test (default: `http://localhost:3001`)
//! - `ADMIN_USERNAME` / `ADMIN_PASSWORD` - credentials the admin server was
//!   started with (defaults: `admin` / `admin123`)
//! - `DATABASE_URL` - used by tests that assert directly on table contents

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::Client;

/// Base URL for the storefront API (configurable via environment).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Base URL for the admin API (configurable via environment).
#[must_use]
pub fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// Create an HTTP client with a cookie store (sessions need one).
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Create a client and log it in as the admin.
///
/// # Panics
///
/// Panics if the login request fails or is rejected.
pub async fn admin_client() -> Client {
    let client = client();
    let base_url = admin_base_url();

    let username = std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());

    let resp = client
        .post(format!("{base_url}/api/admin/login"))
        .json(&serde_json::json!({ "username": username, "password": password }))
        .send()
        .await
        .expect("Failed to send admin login request");
    assert!(
        resp.status().is_success(),
        "admin login rejected: {}",
        resp.status()
    );

    client
}

/// A unique email address for test isolation.
///
/// # Panics
///
/// Panics if the system clock is before the Unix epoch.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    format!("{prefix}-{nanos}@test.example.com")
}

/// A checkout payload for the given email with one line item
/// (2 x 50.00 + 25.00 shipping), mirroring what the cart submits.
#[must_use]
pub fn sample_order_payload(email: &str) -> serde_json::Value {
    serde_json::json!({
        "customerName": "Sara",
        "customerEmail": email,
        "shippingAddress": "123 St",
        "shippingCity": "Riyadh",
        "subtotal": "100.00",
        "shippingCost": "25.00",
        "total": "125.00",
        "paymentMethod": "cod",
        "items": [{
            "productId": 7,
            "productName": "Ceramic coffee mug",
            "quantity": 2,
            "price": "50.00",
            "total": "100.00"
        }]
    })
}

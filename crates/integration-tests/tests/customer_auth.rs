//! Customer registration and login tests.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The storefront server running (cargo run -p souq-storefront)
//!
//! Run with: cargo test -p souq-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use souq_integration_tests::{client, sample_order_payload, storefront_base_url, unique_email};

#[tokio::test]
#[ignore = "Requires running storefront server and PostgreSQL"]
async fn test_register_then_login() {
    let client = client();
    let base_url = storefront_base_url();
    let email = unique_email("register");

    let resp = client
        .post(format!("{base_url}/api/auth/register"))
        .json(&json!({ "name": "Sara", "email": email, "password": "sesame6" }))
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let identity: Value = resp.json().await.expect("Failed to parse identity");
    assert_eq!(identity["customerEmail"], email.as_str());

    // Registration established a session.
    let resp = client
        .get(format!("{base_url}/api/auth/me"))
        .send()
        .await
        .expect("Failed to fetch identity");
    assert_eq!(resp.status(), StatusCode::OK);

    // A fresh client can log in with the same credentials.
    let fresh = souq_integration_tests::client();
    let resp = fresh
        .post(format!("{base_url}/api/auth/login"))
        .json(&json!({ "email": email, "password": "sesame6" }))
        .send()
        .await
        .expect("Failed to login");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running storefront server and PostgreSQL"]
async fn test_duplicate_registration_conflicts_and_keeps_first_password() {
    let client = client();
    let base_url = storefront_base_url();
    let email = unique_email("duplicate");

    let resp = client
        .post(format!("{base_url}/api/auth/register"))
        .json(&json!({ "name": "Sara", "email": email, "password": "first-password" }))
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Second registration with the same email is rejected.
    let resp = client
        .post(format!("{base_url}/api/auth/register"))
        .json(&json!({ "name": "Imposter", "email": email, "password": "other-password" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // The original password still logs in.
    let resp = client
        .post(format!("{base_url}/api/auth/login"))
        .json(&json!({ "email": email, "password": "first-password" }))
        .send()
        .await
        .expect("Failed to login");
    assert_eq!(resp.status(), StatusCode::OK);

    // The attempted replacement does not.
    let resp = client
        .post(format!("{base_url}/api/auth/login"))
        .json(&json!({ "email": email, "password": "other-password" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running storefront server and PostgreSQL"]
async fn test_short_password_is_rejected() {
    let client = client();
    let base_url = storefront_base_url();

    let resp = client
        .post(format!("{base_url}/api/auth/register"))
        .json(&json!({
            "name": "Sara",
            "email": unique_email("short"),
            "password": "12345"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running storefront server and PostgreSQL"]
async fn test_guest_customer_cannot_login() {
    let client = client();
    let base_url = storefront_base_url();
    let email = unique_email("guest");

    // Guest checkout implicitly creates a passwordless customer.
    let resp = client
        .post(format!("{base_url}/api/orders"))
        .json(&sample_order_payload(&email))
        .send()
        .await
        .expect("Failed to create order");
    assert_eq!(resp.status(), StatusCode::CREATED);

    // The guest row exists...
    let resp = client
        .get(format!("{base_url}/api/customers/by-email"))
        .query(&[("email", email.as_str())])
        .send()
        .await
        .expect("Failed to fetch customer");
    assert_eq!(resp.status(), StatusCode::OK);

    // ...but has no password to log in with.
    let resp = client
        .post(format!("{base_url}/api/auth/login"))
        .json(&json!({ "email": email, "password": "anything6" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

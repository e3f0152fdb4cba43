//! Admin order status tests.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - Both servers running (souq-storefront and souq-admin)
//! - The admin server started with the default lenient transition policy
//!
//! Run with: cargo test -p souq-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use souq_integration_tests::{
    admin_base_url, admin_client, client, sample_order_payload, storefront_base_url, unique_email,
};

/// Create an order through the storefront and return (id, order number, email).
async fn place_order() -> (i64, String, String) {
    let client = client();
    let email = unique_email("status");

    let resp = client
        .post(format!("{}/api/orders", storefront_base_url()))
        .json(&sample_order_payload(&email))
        .send()
        .await
        .expect("Failed to create order");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let order: Value = resp.json().await.expect("Failed to parse order");
    let id = order["id"].as_i64().expect("order id");
    let number = order["orderNumber"].as_str().expect("order number").to_owned();
    (id, number, email)
}

#[tokio::test]
#[ignore = "Requires running servers and PostgreSQL"]
async fn test_admin_status_update_visible_to_both_views() {
    let (id, _number, email) = place_order().await;
    let admin = admin_client().await;
    let admin_url = admin_base_url();

    // Admin moves the order to shipped.
    let resp = admin
        .patch(format!("{admin_url}/api/orders/{id}/status"))
        .json(&json!({ "status": "shipped" }))
        .send()
        .await
        .expect("Failed to update status");
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = resp.json().await.expect("Failed to parse order");
    assert_eq!(updated["status"], "shipped");

    // Visible in the admin detail view.
    let resp = admin
        .get(format!("{admin_url}/api/orders/{id}"))
        .send()
        .await
        .expect("Failed to fetch order");
    let detail: Value = resp.json().await.expect("Failed to parse order");
    assert_eq!(detail["status"], "shipped");

    // Visible in the customer's orders-by-email view.
    let resp = client()
        .get(format!("{}/api/orders/by-email", storefront_base_url()))
        .query(&[("email", email.as_str())])
        .send()
        .await
        .expect("Failed to list orders");
    let orders: Value = resp.json().await.expect("Failed to parse orders");
    assert_eq!(orders[0]["status"], "shipped");
}

#[tokio::test]
#[ignore = "Requires running servers and PostgreSQL"]
async fn test_status_update_without_session_is_unauthorized() {
    let (id, _number, _email) = place_order().await;

    // No login: plain client without an admin session.
    let resp = client()
        .patch(format!("{}/api/orders/{id}/status", admin_base_url()))
        .json(&json!({ "status": "shipped" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running servers and PostgreSQL"]
async fn test_status_update_appends_tracking_row() {
    let (id, _number, _email) = place_order().await;
    let admin = admin_client().await;
    let admin_url = admin_base_url();

    let resp = admin
        .patch(format!("{admin_url}/api/orders/{id}/status"))
        .json(&json!({ "status": "processing", "comment": "picked by warehouse" }))
        .send()
        .await
        .expect("Failed to update status");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = admin
        .get(format!("{admin_url}/api/orders/{id}/tracking"))
        .send()
        .await
        .expect("Failed to fetch tracking");
    assert_eq!(resp.status(), StatusCode::OK);
    let trail: Value = resp.json().await.expect("Failed to parse tracking");
    let entries = trail.as_array().expect("tracking array");
    assert!(!entries.is_empty());
    let last = entries.last().expect("last entry");
    assert_eq!(last["status"], "processing");
    assert_eq!(last["comment"], "picked by warehouse");
}

#[tokio::test]
#[ignore = "Requires running servers and PostgreSQL"]
async fn test_invalid_status_value_is_rejected() {
    let (id, _number, _email) = place_order().await;
    let admin = admin_client().await;

    let resp = admin
        .patch(format!("{}/api/orders/{id}/status", admin_base_url()))
        .json(&json!({ "status": "teleported" }))
        .send()
        .await
        .expect("Failed to send request");
    // Unknown enum value fails deserialization.
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

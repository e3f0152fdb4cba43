//! End-to-end checkout tests.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The storefront server running (cargo run -p souq-storefront)
//!
//! Run with: cargo test -p souq-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::Value;

use souq_core::OrderNumber;
use souq_integration_tests::{client, sample_order_payload, storefront_base_url, unique_email};

#[tokio::test]
#[ignore = "Requires running storefront server and PostgreSQL"]
async fn test_checkout_creates_order_with_items() {
    let client = client();
    let base_url = storefront_base_url();
    let email = unique_email("checkout");

    let resp = client
        .post(format!("{base_url}/api/orders"))
        .json(&sample_order_payload(&email))
        .send()
        .await
        .expect("Failed to create order");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let order: Value = resp.json().await.expect("Failed to parse order");

    // Status is forced to pending regardless of caller input.
    assert_eq!(order["status"], "pending");
    assert_eq!(order["paymentMethod"], "cod");

    // Money comes back as exact decimal strings.
    assert_eq!(order["subtotal"], "100.00");
    assert_eq!(order["total"], "125.00");

    // One item, quantity and line total preserved.
    let items = order["items"].as_array().expect("items array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"], 2);
    assert_eq!(items[0]["total"], "100.00");

    // The order number matches ORD-<base36>-<base36>{4}.
    let number = order["orderNumber"].as_str().expect("order number");
    assert!(
        OrderNumber::parse(number).is_ok(),
        "malformed order number {number}"
    );

    // Immediately retrievable by its order number.
    let resp = client
        .get(format!("{base_url}/api/orders/number/{number}"))
        .send()
        .await
        .expect("Failed to fetch order");
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Value = resp.json().await.expect("Failed to parse order");
    assert_eq!(fetched["orderNumber"], *number);
    assert_eq!(fetched["customerEmail"], email.as_str());
}

#[tokio::test]
#[ignore = "Requires running storefront server and PostgreSQL"]
async fn test_second_order_reuses_customer_row() {
    let client = client();
    let base_url = storefront_base_url();
    let email = unique_email("repeat");

    for _ in 0..2 {
        let resp = client
            .post(format!("{base_url}/api/orders"))
            .json(&sample_order_payload(&email))
            .send()
            .await
            .expect("Failed to create order");
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    // Both orders list under the email.
    let resp = client
        .get(format!("{base_url}/api/orders/by-email"))
        .query(&[("email", email.as_str())])
        .send()
        .await
        .expect("Failed to list orders");
    assert_eq!(resp.status(), StatusCode::OK);
    let orders: Value = resp.json().await.expect("Failed to parse orders");
    assert_eq!(orders.as_array().map(Vec::len), Some(2));

    // Exactly one customer row exists for the email.
    if let Ok(database_url) = std::env::var("DATABASE_URL") {
        let pool = sqlx::PgPool::connect(&database_url)
            .await
            .expect("Failed to connect to database");
        let (count,): (i64,) =
            sqlx::query_as("SELECT count(*) FROM customers WHERE email = $1")
                .bind(&email)
                .fetch_one(&pool)
                .await
                .expect("Failed to count customers");
        assert_eq!(count, 1);
    }
}

#[tokio::test]
#[ignore = "Requires running storefront server and PostgreSQL"]
async fn test_empty_cart_is_rejected_before_any_write() {
    let client = client();
    let base_url = storefront_base_url();
    let email = unique_email("empty-cart");

    let mut payload = sample_order_payload(&email);
    payload["items"] = serde_json::json!([]);

    let resp = client
        .post(format!("{base_url}/api/orders"))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // No order and no guest customer were created.
    let resp = client
        .get(format!("{base_url}/api/orders/by-email"))
        .query(&[("email", email.as_str())])
        .send()
        .await
        .expect("Failed to list orders");
    let orders: Value = resp.json().await.expect("Failed to parse orders");
    assert_eq!(orders.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
#[ignore = "Requires running storefront server and PostgreSQL"]
async fn test_order_lookup_miss_is_404() {
    let client = client();
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/api/orders/number/ORD-0-ZZZZ"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

//! Catalog seeding command.
//!
//! Inserts a small demo catalog so a fresh environment has something to
//! sell. Skipped when the products table already has rows.

use rust_decimal::Decimal;

use super::CommandError;

/// Demo products: (name, description, price, category).
const DEMO_PRODUCTS: &[(&str, &str, &str, &str)] = &[
    (
        "Ceramic coffee mug",
        "Hand-glazed stoneware mug, 350ml",
        "35.00",
        "Kitchen",
    ),
    (
        "Olive wood serving board",
        "Single-piece board, food-safe finish",
        "120.00",
        "Kitchen",
    ),
    (
        "Linen cushion cover",
        "45x45cm, hidden zipper",
        "55.00",
        "Home",
    ),
    (
        "Brass table lamp",
        "Warm-white bulb included",
        "240.00",
        "Home",
    ),
    (
        "Woven market basket",
        "Palm leaf, leather handles",
        "85.00",
        "Accessories",
    ),
];

/// Seed the catalog with demo categories and products.
///
/// # Errors
///
/// Returns `CommandError` if `DATABASE_URL` is missing or a query fails.
pub async fn run() -> Result<(), CommandError> {
    tracing::info!("Connecting to database...");
    let pool = super::connect().await?;

    let (existing,): (i64,) = sqlx::query_as("SELECT count(*) FROM products")
        .fetch_one(&pool)
        .await?;
    if existing > 0 {
        tracing::info!("Products table already has {existing} rows, skipping seed");
        return Ok(());
    }

    for (name, description, price, category) in DEMO_PRODUCTS {
        let (category_id,): (i32,) = sqlx::query_as(
            "WITH existing AS (SELECT id FROM categories WHERE name = $1), \
                  inserted AS (\
                      INSERT INTO categories (name) \
                      SELECT $1 WHERE NOT EXISTS (SELECT 1 FROM existing) \
                      RETURNING id) \
             SELECT id FROM existing UNION ALL SELECT id FROM inserted",
        )
        .bind(category)
        .fetch_one(&pool)
        .await?;

        let price: Decimal = price.parse().unwrap_or_default();
        sqlx::query(
            "INSERT INTO products (name, description, price, category_id, stock) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(category_id)
        .bind(25_i32)
        .execute(&pool)
        .await?;

        tracing::info!("Seeded product {name}");
    }

    tracing::info!("Seed complete!");
    Ok(())
}

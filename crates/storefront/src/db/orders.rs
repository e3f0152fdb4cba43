//! Order repository for database operations.
//!
//! Creating an order and its line items is the one multi-row write in the
//! system; it runs inside a single transaction so a partial order is never
//! observable.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use souq_core::{CustomerId, Email, OrderId, OrderItemId, OrderNumber, ProductId};

use super::RepositoryError;
use crate::models::{NewOrder, NewOrderItem, Order, OrderItem, OrderWithItems};

/// Database row for an order.
#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i32,
    order_number: String,
    customer_id: Option<i32>,
    customer_name: String,
    customer_email: String,
    customer_phone: Option<String>,
    shipping_address: String,
    shipping_city: Option<String>,
    subtotal: Decimal,
    shipping_cost: Decimal,
    total: Decimal,
    status: String,
    payment_method: String,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_domain(self) -> Result<Order, RepositoryError> {
        let order_number = OrderNumber::parse(&self.order_number).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid order number in database: {e}"))
        })?;
        let customer_email = Email::parse(&self.customer_email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        let status = self.status.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid status in database: {e}"))
        })?;
        let payment_method = self.payment_method.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid payment method in database: {e}"))
        })?;

        Ok(Order {
            id: OrderId::new(self.id),
            order_number,
            customer_id: self.customer_id.map(CustomerId::new),
            customer_name: self.customer_name,
            customer_email,
            customer_phone: self.customer_phone,
            shipping_address: self.shipping_address,
            shipping_city: self.shipping_city,
            subtotal: self.subtotal,
            shipping_cost: self.shipping_cost,
            total: self.total,
            status,
            payment_method,
            notes: self.notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Database row for an order line item.
#[derive(sqlx::FromRow)]
struct OrderItemRow {
    id: i32,
    order_id: i32,
    product_id: Option<i32>,
    product_name: String,
    quantity: i32,
    price: Decimal,
    total: Decimal,
}

impl OrderItemRow {
    fn into_domain(self) -> Result<OrderItem, RepositoryError> {
        let quantity = u32::try_from(self.quantity).map_err(|_| {
            RepositoryError::DataCorruption(format!(
                "negative quantity {} in database",
                self.quantity
            ))
        })?;

        Ok(OrderItem {
            id: OrderItemId::new(self.id),
            order_id: OrderId::new(self.order_id),
            product_id: self.product_id.map(ProductId::new),
            product_name: self.product_name,
            quantity,
            price: self.price,
            total: self.total,
        })
    }
}

const SELECT_ORDER: &str = "\
    SELECT id, order_number, customer_id, customer_name, customer_email, \
           customer_phone, shipping_address, shipping_city, subtotal, \
           shipping_cost, total, status, payment_method, notes, \
           created_at, updated_at \
    FROM orders";

const SELECT_ITEMS: &str = "\
    SELECT id, order_id, product_id, product_name, quantity, price, total \
    FROM order_items";

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist an order and all of its line items as one atomic unit.
    ///
    /// Either every row exists afterwards or none do. The order's status is
    /// always `pending` on insert.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the order number already
    /// exists (the caller retries with a freshly generated number).
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_with_items(
        &self,
        new_order: &NewOrder,
        items: &[NewOrderItem],
    ) -> Result<OrderWithItems, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let order_row = sqlx::query_as::<_, OrderRow>(
            "INSERT INTO orders (order_number, customer_id, customer_name, \
                                 customer_email, customer_phone, shipping_address, \
                                 shipping_city, subtotal, shipping_cost, total, \
                                 status, payment_method, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 'pending', $11, $12) \
             RETURNING id, order_number, customer_id, customer_name, customer_email, \
                       customer_phone, shipping_address, shipping_city, subtotal, \
                       shipping_cost, total, status, payment_method, notes, \
                       created_at, updated_at",
        )
        .bind(new_order.order_number.as_str())
        .bind(new_order.customer_id.map(|id| id.as_i32()))
        .bind(&new_order.customer_name)
        .bind(new_order.customer_email.as_str())
        .bind(&new_order.customer_phone)
        .bind(&new_order.shipping_address)
        .bind(&new_order.shipping_city)
        .bind(new_order.totals.subtotal)
        .bind(new_order.totals.shipping_cost)
        .bind(new_order.totals.total)
        .bind(new_order.payment_method.as_str())
        .bind(&new_order.notes)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_order_unique)?;

        let mut item_rows = Vec::with_capacity(items.len());
        for item in items {
            let row = sqlx::query_as::<_, OrderItemRow>(
                "INSERT INTO order_items (order_id, product_id, product_name, \
                                          quantity, price, total) \
                 VALUES ($1, $2, $3, $4, $5, $6) \
                 RETURNING id, order_id, product_id, product_name, quantity, price, total",
            )
            .bind(order_row.id)
            .bind(item.product_id.map(|id| id.as_i32()))
            .bind(&item.product_name)
            .bind(i32::try_from(item.quantity).unwrap_or(i32::MAX))
            .bind(item.price)
            .bind(item.total)
            .fetch_one(&mut *tx)
            .await?;
            item_rows.push(row);
        }

        tx.commit().await?;

        let order = order_row.into_domain()?;
        let items = item_rows
            .into_iter()
            .map(OrderItemRow::into_domain)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(OrderWithItems { order, items })
    }

    /// Get an order with its items by order number.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_number(
        &self,
        order_number: &str,
    ) -> Result<Option<OrderWithItems>, RepositoryError> {
        let row =
            sqlx::query_as::<_, OrderRow>(&format!("{SELECT_ORDER} WHERE order_number = $1"))
                .bind(order_number)
                .fetch_optional(self.pool)
                .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items = self.items_for(row.id).await?;
        let order = row.into_domain()?;

        Ok(Some(OrderWithItems { order, items }))
    }

    /// List all orders (with items) placed under the given email, newest
    /// first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_email(&self, email: &str) -> Result<Vec<OrderWithItems>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "{SELECT_ORDER} WHERE customer_email = $1 ORDER BY created_at DESC"
        ))
        .bind(email)
        .fetch_all(self.pool)
        .await?;

        self.attach_items(rows).await
    }

    /// Fetch the line items for a single order.
    async fn items_for(&self, order_id: i32) -> Result<Vec<OrderItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderItemRow>(&format!(
            "{SELECT_ITEMS} WHERE order_id = $1 ORDER BY id ASC"
        ))
        .bind(order_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(OrderItemRow::into_domain).collect()
    }

    /// Fetch items for a batch of orders in one query and zip them back
    /// onto their parents.
    async fn attach_items(
        &self,
        rows: Vec<OrderRow>,
    ) -> Result<Vec<OrderWithItems>, RepositoryError> {
        let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();

        let item_rows = sqlx::query_as::<_, OrderItemRow>(&format!(
            "{SELECT_ITEMS} WHERE order_id = ANY($1) ORDER BY id ASC"
        ))
        .bind(&ids)
        .fetch_all(self.pool)
        .await?;

        let mut by_order: HashMap<i32, Vec<OrderItem>> = HashMap::new();
        for item_row in item_rows {
            let order_id = item_row.order_id;
            by_order
                .entry(order_id)
                .or_default()
                .push(item_row.into_domain()?);
        }

        rows.into_iter()
            .map(|row| {
                let items = by_order.remove(&row.id).unwrap_or_default();
                Ok(OrderWithItems {
                    order: row.into_domain()?,
                    items,
                })
            })
            .collect()
    }
}

/// Map a unique-constraint violation on the order number to `Conflict`.
fn map_order_unique(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict("order number already exists".to_owned());
    }
    RepositoryError::Database(e)
}

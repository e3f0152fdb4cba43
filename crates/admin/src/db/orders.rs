//! Order repository for admin operations.
//!
//! Status updates run in a single transaction: the current status is read
//! under lock, checked against the transition policy, updated, and an
//! audit row is appended to `order_tracking`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use thiserror::Error;

use souq_core::{
    CustomerId, Email, OrderId, OrderItemId, OrderNumber, OrderStatus, ProductId, TransitionPolicy,
};

use super::RepositoryError;
use crate::models::{Order, OrderItem, OrderWithItems, TrackingEntry};

/// Errors from a status update.
#[derive(Debug, Error)]
pub enum OrderUpdateError {
    /// No order with the given id.
    #[error("order not found")]
    NotFound,

    /// The transition is not allowed under the active policy.
    #[error("illegal status transition from {from} to {to}")]
    InvalidTransition {
        from: OrderStatus,
        to: OrderStatus,
    },

    /// Repository/database error.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<sqlx::Error> for OrderUpdateError {
    fn from(e: sqlx::Error) -> Self {
        Self::Repository(RepositoryError::Database(e))
    }
}

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

/// Database row for a tracking entry.
#[derive(sqlx::FromRow)]
struct TrackingRow {
    order_id: i32,
    status: String,
    comment: Option<String>,
    created_at: DateTime<Utc>,
}

impl TrackingRow {
    fn into_domain(self) -> Result<TrackingEntry, RepositoryError> {
        let status = self.status.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid status in database: {e}"))
        })?;

        Ok(TrackingEntry {
            order_id: OrderId::new(self.order_id),
            status,
            comment: self.comment,
            created_at: self.created_at,
        })
    }
}

const SELECT_ORDER: &str = "\
    SELECT id, order_number, customer_id, customer_name, customer_email, \
           customer_phone, shipping_address, shipping_city, subtotal, \
           shipping_cost, total, status, payment_method, notes, \
           created_at, updated_at \
    FROM orders";

/// Repository for admin order operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all orders, newest first (without items).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows =
            sqlx::query_as::<_, OrderRow>(&format!("{SELECT_ORDER} ORDER BY created_at DESC"))
                .fetch_all(self.pool)
                .await?;

        rows.into_iter().map(OrderRow::into_domain).collect()
    }

    /// Get a single order with its items by internal id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: OrderId) -> Result<Option<OrderWithItems>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!("{SELECT_ORDER} WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let item_rows = sqlx::query_as::<_, OrderItemRow>(
            "SELECT id, order_id, product_id, product_name, quantity, price, total \
             FROM order_items WHERE order_id = $1 ORDER BY id ASC",
        )
        .bind(row.id)
        .fetch_all(self.pool)
        .await?;

        let order = row.into_domain()?;
        let items = item_rows
            .into_iter()
            .map(OrderItemRow::into_domain)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(OrderWithItems { order, items }))
    }

    /// Set an order's status, enforcing the given transition policy.
    ///
    /// The check, the update (which also bumps `updated_at`) and the audit
    /// row append happen in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `OrderUpdateError::NotFound` if the order doesn't exist.
    /// Returns `OrderUpdateError::InvalidTransition` if the policy rejects
    /// the jump.
    pub async fn update_status(
        &self,
        id: OrderId,
        new_status: OrderStatus,
        comment: Option<&str>,
        policy: TransitionPolicy,
    ) -> Result<Order, OrderUpdateError> {
        let mut tx = self.pool.begin().await?;

        let current: Option<(String,)> =
            sqlx::query_as("SELECT status FROM orders WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some((current,)) = current else {
            return Err(OrderUpdateError::NotFound);
        };

        let from: OrderStatus = current.parse().map_err(|e| {
            OrderUpdateError::Repository(RepositoryError::DataCorruption(format!(
                "invalid status in database: {e}"
            )))
        })?;

        if !policy.allows(from, new_status) {
            return Err(OrderUpdateError::InvalidTransition {
                from,
                to: new_status,
            });
        }

        let row = sqlx::query_as::<_, OrderRow>(
            "UPDATE orders SET status = $1, updated_at = now() WHERE id = $2 \
             RETURNING id, order_number, customer_id, customer_name, customer_email, \
                       customer_phone, shipping_address, shipping_city, subtotal, \
                       shipping_cost, total, status, payment_method, notes, \
                       created_at, updated_at",
        )
        .bind(new_status.as_str())
        .bind(id.as_i32())
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO order_tracking (order_id, status, comment) VALUES ($1, $2, $3)")
            .bind(id.as_i32())
            .bind(new_status.as_str())
            .bind(comment)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(row.into_domain()?)
    }

    /// The status transition audit trail for an order, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn tracking_for(&self, id: OrderId) -> Result<Vec<TrackingEntry>, RepositoryError> {
        let rows = sqlx::query_as::<_, TrackingRow>(
            "SELECT order_id, status, comment, created_at \
             FROM order_tracking WHERE order_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(id.as_i32())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TrackingRow::into_domain).collect()
    }
}

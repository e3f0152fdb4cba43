//! Customer repository for admin operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use souq_core::{CustomerId, Email};

use super::RepositoryError;
use crate::models::Customer;

/// Database row for a customer, without the password hash.
#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: i32,
    name: String,
    email: String,
    phone: Option<String>,
    address: Option<String>,
    city: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CustomerRow {
    fn into_domain(self) -> Result<Customer, RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Customer {
            id: CustomerId::new(self.id),
            name: self.name,
            email,
            phone: self.phone,
            address: self.address,
            city: self.city,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Repository for admin customer operations.
pub struct CustomerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all customers, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Customer>, RepositoryError> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            "SELECT id, name, email, phone, address, city, created_at, updated_at \
             FROM customers ORDER BY created_at DESC",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(CustomerRow::into_domain).collect()
    }
}

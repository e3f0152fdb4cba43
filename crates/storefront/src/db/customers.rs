//! Customer repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use souq_core::{CustomerId, Email};

use super::RepositoryError;
use crate::models::{Customer, GuestProfile};

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

/// Database row for a customer joined with their stored password hash.
#[derive(sqlx::FromRow)]
struct CustomerAuthRow {
    id: i32,
    name: String,
    email: String,
    password_hash: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    city: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

const SELECT_CUSTOMER: &str = "\
    SELECT id, name, email, phone, address, city, created_at, updated_at \
    FROM customers";

/// Repository for customer database operations.
pub struct CustomerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a customer by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored email is invalid.
    pub async fn get_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!("{SELECT_CUSTOMER} WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.map(CustomerRow::into_domain).transpose()
    }

    /// Get a customer by their email address (case-sensitive).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored email is invalid.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!("{SELECT_CUSTOMER} WHERE email = $1"))
            .bind(email.as_str())
            .fetch_optional(self.pool)
            .await?;

        row.map(CustomerRow::into_domain).transpose()
    }

    /// Create a registered customer with a password hash.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_registered(
        &self,
        name: &str,
        email: &Email,
        password_hash: &str,
    ) -> Result<Customer, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            "INSERT INTO customers (name, email, password_hash) \
             VALUES ($1, $2, $3) \
             RETURNING id, name, email, phone, address, city, created_at, updated_at",
        )
        .bind(name)
        .bind(email.as_str())
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(map_unique_email)?;

        row.into_domain()
    }

    /// Create a guest customer (no password) from checkout profile fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists - the
    /// caller absorbs the race by re-fetching the existing row.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_guest(&self, profile: &GuestProfile) -> Result<Customer, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            "INSERT INTO customers (name, email, phone, address, city) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, name, email, phone, address, city, created_at, updated_at",
        )
        .bind(&profile.name)
        .bind(profile.email.as_str())
        .bind(&profile.phone)
        .bind(&profile.address)
        .bind(&profile.city)
        .fetch_one(self.pool)
        .await
        .map_err(map_unique_email)?;

        row.into_domain()
    }

    /// Get a customer together with their password hash by email.
    ///
    /// Returns `None` if the customer doesn't exist or has no password set
    /// (guest customers cannot log in).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(Customer, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerAuthRow>(
            "SELECT id, name, email, password_hash, phone, address, city, \
                    created_at, updated_at \
             FROM customers \
             WHERE email = $1",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        let Some(r) = row else {
            return Ok(None);
        };

        let Some(password_hash) = r.password_hash else {
            return Ok(None);
        };

        let email = Email::parse(&r.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        let customer = Customer {
            id: CustomerId::new(r.id),
            name: r.name,
            email,
            phone: r.phone,
            address: r.address,
            city: r.city,
            created_at: r.created_at,
            updated_at: r.updated_at,
        };

        Ok(Some((customer, password_hash)))
    }
}

/// Map a unique-constraint violation on the email column to `Conflict`.
fn map_unique_email(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict("email already exists".to_owned());
    }
    RepositoryError::Database(e)
}

//! Customer entity.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::{CustomerId, Email};

/// A storefront buyer.
///
/// Created either through explicit registration (with a password) or
/// implicitly during guest checkout (without one). The password hash never
/// leaves the repository layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Unique customer ID.
    pub id: CustomerId,
    /// Display name.
    pub name: String,
    /// Email address, unique across all customers.
    pub email: Email,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// City.
    pub city: Option<String>,
    /// When the customer was created.
    pub created_at: DateTime<Utc>,
    /// When the customer was last updated.
    pub updated_at: DateTime<Utc>,
}

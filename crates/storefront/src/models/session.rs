//! Session-related types for customer authentication.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use souq_core::{CustomerId, Email};

/// Session-stored customer identity.
///
/// Minimal data stored in the session to identify the logged-in customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentCustomer {
    /// Customer's database ID.
    pub id: CustomerId,
    /// Customer's display name.
    pub name: String,
    /// Customer's email address.
    pub email: Email,
}

/// Session keys for customer authentication data.
pub mod session_keys {
    /// Key for storing the current logged-in customer.
    pub const CURRENT_CUSTOMER: &str = "current_customer";
}

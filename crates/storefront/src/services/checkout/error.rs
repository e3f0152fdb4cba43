//! Checkout error types.

use thiserror::Error;

use souq_core::CustomerId;

use crate::db::RepositoryError;

/// Errors that can occur while creating an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The line-item list was empty. Rejected before any write.
    #[error("cart is empty")]
    EmptyCart,

    /// A line item failed validation.
    #[error("invalid line item at index {index}: {reason}")]
    InvalidItem {
        /// Zero-based position in the submitted item list.
        index: usize,
        reason: String,
    },

    /// A required shipping field was empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The shipping email was not syntactically valid.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] souq_core::EmailError),

    /// An explicit customer id was supplied but no such customer exists.
    /// The resolver never falls through to an email lookup in this case,
    /// so an order cannot be attributed to a different identity.
    #[error("customer {0} not found")]
    CustomerNotFound(CustomerId),

    /// The submitted totals disagree with the line items (only checked
    /// when total verification is enabled).
    #[error("totals mismatch: {0}")]
    TotalsMismatch(String),

    /// Every generated order number collided with an existing order.
    #[error("could not allocate a unique order number")]
    OrderNumberExhausted,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

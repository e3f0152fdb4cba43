//! Customer input types.

use souq_core::Email;

/// Profile fields used to create a guest customer during checkout when no
/// existing customer matches the order's email.
#[derive(Debug, Clone)]
pub struct GuestProfile {
    pub name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
}

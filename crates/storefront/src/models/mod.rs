//! Model types for the storefront.
//!
//! Domain entities live in `souq_core::entities` and are shared with the
//! admin API; this module adds the storefront-side input types (new-order
//! inputs, guest profiles) and session state.

pub mod customer;
pub mod order;
pub mod session;

pub use souq_core::entities::{Category, Customer, Order, OrderItem, OrderWithItems, Product};

pub use customer::GuestProfile;
pub use order::{NewOrder, NewOrderItem};
pub use session::{CurrentCustomer, session_keys};

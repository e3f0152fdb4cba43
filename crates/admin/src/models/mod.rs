//! Model types for the admin panel.
//!
//! Domain entities live in `souq_core::entities`; this module adds the
//! admin-side session state.

pub mod session;

pub use souq_core::entities::{
    Category, Customer, Order, OrderItem, OrderWithItems, Product, TrackingEntry,
};

pub use session::{CurrentAdmin, session_keys};

//! Domain entities shared by the storefront and admin APIs.
//!
//! These are validated domain objects, separate from any database row
//! types; repository layers convert rows into them and surface invalid
//! stored data as corruption errors.

pub mod catalog;
pub mod customer;
pub mod order;

pub use catalog::{Category, Product};
pub use customer::Customer;
pub use order::{Order, OrderItem, OrderWithItems, TrackingEntry};

//! Checkout service: customer resolution and order assembly.
//!
//! This is the one place in the system with a real transactional boundary:
//! an order and its line items are persisted as a single atomic unit, after
//! the buying customer has been resolved (or created as a guest).

mod error;

pub use error::CheckoutError;

use sqlx::PgPool;

use souq_core::{CustomerId, Email, OrderNumber, OrderStatus, OrderTotals, PaymentMethod, money};

use crate::db::RepositoryError;
use crate::db::customers::CustomerRepository;
use crate::db::orders::OrderRepository;
use crate::models::{Customer, GuestProfile, NewOrder, NewOrderItem, OrderWithItems};

/// How many freshly generated order numbers to try before giving up.
///
/// A collision requires another order in the same millisecond with the same
/// random suffix, so a second attempt virtually always succeeds.
const MAX_ORDER_NUMBER_ATTEMPTS: u32 = 3;

/// Shipping and contact details collected by the checkout wizard.
#[derive(Debug, Clone)]
pub struct ShippingInfo {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: String,
    pub city: String,
}

/// A fully assembled order-creation request.
#[derive(Debug, Clone)]
pub struct CreateOrderRequest {
    /// Explicit customer id from a logged-in checkout, if any.
    pub customer_id: Option<CustomerId>,
    pub shipping: ShippingInfo,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
    pub items: Vec<NewOrderItem>,
    /// Caller-computed money summary. Trusted as submitted unless total
    /// verification is enabled.
    pub totals: OrderTotals,
}

/// Checkout service.
pub struct CheckoutService<'a> {
    customers: CustomerRepository<'a>,
    orders: OrderRepository<'a>,
    verify_totals: bool,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    ///
    /// `verify_totals` enables server-side recomputation of the submitted
    /// money summary from the line items.
    #[must_use]
    pub const fn new(pool: &'a PgPool, verify_totals: bool) -> Self {
        Self {
            customers: CustomerRepository::new(pool),
            orders: OrderRepository::new(pool),
            verify_totals,
        }
    }

    /// Find or create the customer an order will be attributed to.
    ///
    /// Resolution order:
    /// 1. an explicit id must match an existing customer - a miss is a hard
    ///    error, never a fallthrough to the email of a different identity;
    /// 2. an existing customer with the order's email is reused as-is
    ///    (profile fields in the order payload never update it);
    /// 3. otherwise a guest customer (no password) is inserted from the
    ///    shipping profile.
    ///
    /// Two concurrent checkouts for a brand-new email can both reach step 3;
    /// the email unique constraint decides the winner and the loser returns
    /// the winner's row. This method performs at most one insert and never
    /// an update.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::CustomerNotFound` if an explicit id matches
    /// nothing, or `CheckoutError::Repository` on database failures.
    pub async fn resolve_or_create_customer(
        &self,
        explicit_id: Option<CustomerId>,
        email: &Email,
        profile: &GuestProfile,
    ) -> Result<Customer, CheckoutError> {
        if let Some(id) = explicit_id {
            return self
                .customers
                .get_by_id(id)
                .await?
                .ok_or(CheckoutError::CustomerNotFound(id));
        }

        if let Some(existing) = self.customers.get_by_email(email).await? {
            return Ok(existing);
        }

        match self.customers.create_guest(profile).await {
            Ok(created) => Ok(created),
            Err(RepositoryError::Conflict(_)) => {
                // Lost the race against a concurrent checkout; the winner's
                // row is the customer.
                tracing::debug!(email = %email, "guest customer insert lost race, reusing existing row");
                self.customers
                    .get_by_email(email)
                    .await?
                    .ok_or(CheckoutError::Repository(RepositoryError::NotFound))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Validate and persist an order with its line items.
    ///
    /// The initial status is always `pending` regardless of caller input.
    /// An order-number collision on insert is retried transparently with a
    /// fresh number.
    ///
    /// # Errors
    ///
    /// Validation errors (`EmptyCart`, `InvalidItem`, `MissingField`,
    /// `InvalidEmail`, `TotalsMismatch`) are returned before any write.
    /// `OrderNumberExhausted` is returned if every attempt collided.
    pub async fn create_order(
        &self,
        request: CreateOrderRequest,
    ) -> Result<OrderWithItems, CheckoutError> {
        let email = validate_request(&request)?;

        if self.verify_totals {
            verify_totals(&request.items, &request.totals)?;
        }

        let profile = GuestProfile {
            name: request.shipping.name.clone(),
            email: email.clone(),
            phone: request.shipping.phone.clone(),
            address: Some(request.shipping.address.clone()),
            city: Some(request.shipping.city.clone()),
        };
        let customer = self
            .resolve_or_create_customer(request.customer_id, &email, &profile)
            .await?;

        let mut new_order = NewOrder {
            order_number: OrderNumber::generate(),
            customer_id: Some(customer.id),
            customer_name: request.shipping.name,
            customer_email: email,
            customer_phone: request.shipping.phone,
            shipping_address: request.shipping.address,
            shipping_city: Some(request.shipping.city),
            totals: request.totals,
            payment_method: request.payment_method,
            notes: request.notes,
        };

        for attempt in 1..=MAX_ORDER_NUMBER_ATTEMPTS {
            match self
                .orders
                .create_with_items(&new_order, &request.items)
                .await
            {
                Ok(created) => {
                    debug_assert_eq!(created.order.status, OrderStatus::Pending);
                    tracing::info!(
                        order_number = %created.order.order_number,
                        customer_id = %customer.id,
                        items = created.items.len(),
                        "order created"
                    );
                    return Ok(created);
                }
                Err(RepositoryError::Conflict(_)) => {
                    tracing::warn!(
                        order_number = %new_order.order_number,
                        attempt,
                        "order number collision, regenerating"
                    );
                    new_order.order_number = OrderNumber::generate();
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(CheckoutError::OrderNumberExhausted)
    }
}

/// Validate an order-creation request before any write.
///
/// Returns the parsed shipping email on success.
fn validate_request(request: &CreateOrderRequest) -> Result<Email, CheckoutError> {
    if request.items.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    for (index, item) in request.items.iter().enumerate() {
        if item.quantity == 0 {
            return Err(CheckoutError::InvalidItem {
                index,
                reason: "quantity must be positive".to_owned(),
            });
        }
        if item.product_name.trim().is_empty() {
            return Err(CheckoutError::InvalidItem {
                index,
                reason: "product name must not be empty".to_owned(),
            });
        }
    }

    if request.shipping.name.trim().is_empty() {
        return Err(CheckoutError::MissingField("name"));
    }
    if request.shipping.address.trim().is_empty() {
        return Err(CheckoutError::MissingField("address"));
    }
    if request.shipping.city.trim().is_empty() {
        return Err(CheckoutError::MissingField("city"));
    }

    Ok(Email::parse(&request.shipping.email)?)
}

/// Recompute the money summary from the line items and compare it with the
/// submitted one.
fn verify_totals(items: &[NewOrderItem], totals: &OrderTotals) -> Result<(), CheckoutError> {
    let mut items_subtotal = rust_decimal::Decimal::ZERO;

    for (index, item) in items.iter().enumerate() {
        let expected = money::line_total(item.quantity, item.price);
        if item.total != expected {
            return Err(CheckoutError::TotalsMismatch(format!(
                "line {index}: {} x {} = {expected}, got {}",
                item.quantity, item.price, item.total
            )));
        }
        items_subtotal += item.total;
    }

    if !totals.matches_items_subtotal(items_subtotal) {
        return Err(CheckoutError::TotalsMismatch(format!(
            "subtotal {} does not match line items sum {items_subtotal}",
            totals.subtotal
        )));
    }

    if !totals.is_internally_consistent() {
        return Err(CheckoutError::TotalsMismatch(format!(
            "total {} does not equal subtotal {} + shipping {}",
            totals.total, totals.subtotal, totals.shipping_cost
        )));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use souq_core::ProductId;

    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn item(quantity: u32, price: &str, total: &str) -> NewOrderItem {
        NewOrderItem {
            product_id: Some(ProductId::new(7)),
            product_name: "Ceramic mug".to_owned(),
            quantity,
            price: dec(price),
            total: dec(total),
        }
    }

    fn request() -> CreateOrderRequest {
        CreateOrderRequest {
            customer_id: None,
            shipping: ShippingInfo {
                name: "Sara".to_owned(),
                email: "sara@example.com".to_owned(),
                phone: None,
                address: "123 St".to_owned(),
                city: "Riyadh".to_owned(),
            },
            payment_method: PaymentMethod::Cod,
            notes: None,
            items: vec![item(2, "50.00", "100.00")],
            totals: OrderTotals {
                subtotal: dec("100.00"),
                shipping_cost: dec("25.00"),
                total: dec("125.00"),
            },
        }
    }

    #[test]
    fn test_valid_request_passes() {
        let email = validate_request(&request()).unwrap();
        assert_eq!(email.as_str(), "sara@example.com");
    }

    #[test]
    fn test_empty_cart_rejected() {
        let mut req = request();
        req.items.clear();
        assert!(matches!(
            validate_request(&req),
            Err(CheckoutError::EmptyCart)
        ));
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let mut req = request();
        req.items = vec![item(0, "50.00", "0.00")];
        assert!(matches!(
            validate_request(&req),
            Err(CheckoutError::InvalidItem { index: 0, .. })
        ));
    }

    #[test]
    fn test_blank_product_name_rejected() {
        let mut req = request();
        req.items.first_mut().unwrap().product_name = "   ".to_owned();
        assert!(matches!(
            validate_request(&req),
            Err(CheckoutError::InvalidItem { index: 0, .. })
        ));
    }

    #[test]
    fn test_missing_shipping_name_rejected() {
        let mut req = request();
        req.shipping.name = "   ".to_owned();
        assert!(matches!(
            validate_request(&req),
            Err(CheckoutError::MissingField("name"))
        ));
    }

    #[test]
    fn test_missing_shipping_address_rejected() {
        let mut req = request();
        req.shipping.address.clear();
        assert!(matches!(
            validate_request(&req),
            Err(CheckoutError::MissingField("address"))
        ));
    }

    #[test]
    fn test_missing_shipping_city_rejected() {
        let mut req = request();
        req.shipping.city.clear();
        assert!(matches!(
            validate_request(&req),
            Err(CheckoutError::MissingField("city"))
        ));
    }

    #[test]
    fn test_invalid_email_rejected() {
        let mut req = request();
        req.shipping.email = "not-an-email".to_owned();
        assert!(matches!(
            validate_request(&req),
            Err(CheckoutError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_verify_totals_accepts_consistent_request() {
        let req = request();
        assert!(verify_totals(&req.items, &req.totals).is_ok());
    }

    #[test]
    fn test_verify_totals_rejects_bad_line_total() {
        let items = vec![item(2, "50.00", "99.00")];
        let totals = OrderTotals {
            subtotal: dec("99.00"),
            shipping_cost: dec("0"),
            total: dec("99.00"),
        };
        assert!(matches!(
            verify_totals(&items, &totals),
            Err(CheckoutError::TotalsMismatch(_))
        ));
    }

    #[test]
    fn test_verify_totals_rejects_bad_subtotal() {
        let req = request();
        let totals = OrderTotals {
            subtotal: dec("90.00"),
            shipping_cost: dec("25.00"),
            total: dec("115.00"),
        };
        assert!(matches!(
            verify_totals(&req.items, &totals),
            Err(CheckoutError::TotalsMismatch(_))
        ));
    }

    #[test]
    fn test_verify_totals_rejects_inconsistent_grand_total() {
        let req = request();
        let totals = OrderTotals {
            subtotal: dec("100.00"),
            shipping_cost: dec("25.00"),
            total: dec("120.00"),
        };
        assert!(matches!(
            verify_totals(&req.items, &totals),
            Err(CheckoutError::TotalsMismatch(_))
        ));
    }
}

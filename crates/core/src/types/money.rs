//! Monetary totals for an order.
//!
//! All amounts are `rust_decimal::Decimal` end-to-end and serialize as
//! exact decimal strings - binary floating point never touches money.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The caller-computed money summary of an order.
///
/// The storefront historically trusts these values as submitted. The
/// consistency helpers exist for the hardened mode that recomputes them
/// from line items before accepting an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    /// Sum of all line totals.
    pub subtotal: Decimal,
    /// Flat shipping cost.
    #[serde(default)]
    pub shipping_cost: Decimal,
    /// Amount the customer owes: subtotal + shipping cost.
    pub total: Decimal,
}

impl OrderTotals {
    /// The total implied by subtotal and shipping cost.
    #[must_use]
    pub fn expected_total(&self) -> Decimal {
        self.subtotal + self.shipping_cost
    }

    /// Whether `total` equals `subtotal + shipping_cost`.
    #[must_use]
    pub fn is_internally_consistent(&self) -> bool {
        self.total == self.expected_total()
    }

    /// Whether `subtotal` equals the sum of line totals computed from the
    /// items themselves.
    #[must_use]
    pub fn matches_items_subtotal(&self, items_subtotal: Decimal) -> bool {
        self.subtotal == items_subtotal
    }
}

/// The line total for `quantity` units at `unit_price`.
#[must_use]
pub fn line_total(quantity: u32, unit_price: Decimal) -> Decimal {
    unit_price * Decimal::from(quantity)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_expected_total() {
        let totals = OrderTotals {
            subtotal: dec("100.00"),
            shipping_cost: dec("25.00"),
            total: dec("125.00"),
        };
        assert_eq!(totals.expected_total(), dec("125.00"));
        assert!(totals.is_internally_consistent());
    }

    #[test]
    fn test_inconsistent_total_detected() {
        let totals = OrderTotals {
            subtotal: dec("100.00"),
            shipping_cost: dec("25.00"),
            total: dec("1.00"),
        };
        assert!(!totals.is_internally_consistent());
    }

    #[test]
    fn test_line_total() {
        assert_eq!(line_total(2, dec("50.00")), dec("100.00"));
        assert_eq!(line_total(3, dec("9.99")), dec("29.97"));
        assert_eq!(line_total(0, dec("10.00")), dec("0.00"));
    }

    #[test]
    fn test_matches_items_subtotal() {
        let totals = OrderTotals {
            subtotal: dec("100.00"),
            shipping_cost: dec("0"),
            total: dec("100.00"),
        };
        assert!(totals.matches_items_subtotal(dec("100.00")));
        // Exact decimal comparison, including scale-insensitive equality.
        assert!(totals.matches_items_subtotal(dec("100.0")));
        assert!(!totals.matches_items_subtotal(dec("99.99")));
    }

    #[test]
    fn test_serializes_as_decimal_strings() {
        let totals = OrderTotals {
            subtotal: dec("100.00"),
            shipping_cost: dec("25.00"),
            total: dec("125.00"),
        };
        let json = serde_json::to_value(&totals).unwrap();
        assert_eq!(json["subtotal"], "100.00");
        assert_eq!(json["total"], "125.00");
    }
}

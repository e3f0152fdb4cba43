//! Human-legible order identifiers.
//!
//! An order number is the externally visible identifier for an order,
//! distinct from its internal numeric id. Customers see it on the
//! confirmation page and use it to look an order up.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Fixed prefix for all generated order numbers.
const PREFIX: &str = "ORD";

/// Length of the random suffix.
const SUFFIX_LEN: usize = 4;

const BASE36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Errors that can occur when parsing an [`OrderNumber`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum OrderNumberError {
    /// The input does not match `ORD-<base36>-<base36>{4}`.
    #[error("malformed order number: {0}")]
    Malformed(String),
}

/// A unique, sortable, human-legible order identifier.
///
/// Format: `ORD-<timestamp36>-<random4>`, all uppercase base36. The
/// timestamp segment encodes the creation time in milliseconds, so numbers
/// generated later sort after earlier ones; the random suffix separates
/// orders created within the same millisecond.
///
/// Generation is probabilistically unique only. The unique constraint on
/// the orders table is the real backstop: an insert that loses the race
/// surfaces as a conflict and the caller retries with a fresh number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Generate a new order number from the current time and a random
    /// suffix.
    #[must_use]
    pub fn generate() -> Self {
        use rand::Rng;

        let millis = chrono::Utc::now().timestamp_millis();
        let mut rng = rand::rng();
        let mut suffix = [0u8; SUFFIX_LEN];
        for slot in &mut suffix {
            let idx = rng.random_range(0..BASE36.len());
            *slot = BASE36[idx];
        }
        // suffix bytes are drawn from BASE36, always valid UTF-8
        let suffix = core::str::from_utf8(&suffix).unwrap_or("0000");

        Self::from_parts(millis, suffix)
    }

    /// Build an order number from an explicit timestamp and suffix.
    ///
    /// `generate` goes through here; tests use it directly to get
    /// deterministic values.
    #[must_use]
    pub fn from_parts(timestamp_millis: i64, suffix: &str) -> Self {
        Self(format!(
            "{PREFIX}-{}-{}",
            encode_base36(timestamp_millis.max(0)),
            suffix.to_uppercase()
        ))
    }

    /// Parse an `OrderNumber` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`OrderNumberError::Malformed`] if the input does not have
    /// the `ORD-<base36>-<base36>{4}` shape.
    pub fn parse(s: &str) -> Result<Self, OrderNumberError> {
        let malformed = || OrderNumberError::Malformed(s.to_owned());

        let rest = s.strip_prefix("ORD-").ok_or_else(malformed)?;
        let (timestamp, suffix) = rest.split_once('-').ok_or_else(malformed)?;

        let is_base36 = |part: &str| {
            !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit() || b.is_ascii_uppercase())
        };

        if !is_base36(timestamp) || !is_base36(suffix) || suffix.len() != SUFFIX_LEN {
            return Err(malformed());
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the order number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `OrderNumber` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for OrderNumber {
    type Err = OrderNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for OrderNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Encode a non-negative integer as uppercase base36.
fn encode_base36(mut value: i64) -> String {
    if value == 0 {
        return "0".to_owned();
    }

    let mut digits = Vec::new();
    while value > 0 {
        let idx = usize::try_from(value % 36).unwrap_or(0);
        digits.push(BASE36[idx]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_else(|_| "0".to_owned())
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for OrderNumber {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for OrderNumber {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for OrderNumber {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn assert_well_formed(s: &str) {
        let rest = s.strip_prefix("ORD-").expect("missing prefix");
        let (timestamp, suffix) = rest.split_once('-').expect("missing separator");
        assert!(!timestamp.is_empty());
        assert!(
            timestamp
                .bytes()
                .all(|b| b.is_ascii_digit() || b.is_ascii_uppercase())
        );
        assert_eq!(suffix.len(), 4);
        assert!(
            suffix
                .bytes()
                .all(|b| b.is_ascii_digit() || b.is_ascii_uppercase())
        );
    }

    #[test]
    fn test_generate_shape() {
        let number = OrderNumber::generate();
        assert_well_formed(number.as_str());
    }

    #[test]
    fn test_from_parts_is_deterministic() {
        let a = OrderNumber::from_parts(1_000_000, "AB12");
        let b = OrderNumber::from_parts(1_000_000, "AB12");
        assert_eq!(a, b);
        assert_well_formed(a.as_str());
    }

    #[test]
    fn test_later_timestamps_sort_after_earlier_ones() {
        // Same digit count: lexicographic order matches numeric order.
        let earlier = OrderNumber::from_parts(1_700_000_000_000, "0000");
        let later = OrderNumber::from_parts(1_700_000_000_001, "0000");
        assert!(later.as_str() > earlier.as_str());
    }

    #[test]
    fn test_suffix_distinguishes_same_millisecond() {
        let a = OrderNumber::from_parts(42, "AAAA");
        let b = OrderNumber::from_parts(42, "AAAB");
        assert_ne!(a, b);
    }

    #[test]
    fn test_parse_roundtrip() {
        let number = OrderNumber::generate();
        let parsed = OrderNumber::parse(number.as_str()).unwrap();
        assert_eq!(parsed, number);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in [
            "",
            "ORD-",
            "ORD-123",
            "ORD--ABCD",
            "XYZ-123-ABCD",
            "ORD-123-abc",
            "ORD-123-ABCDE",
            "ORD-12!-ABCD",
        ] {
            assert!(OrderNumber::parse(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_encode_base36() {
        assert_eq!(encode_base36(0), "0");
        assert_eq!(encode_base36(35), "Z");
        assert_eq!(encode_base36(36), "10");
        assert_eq!(encode_base36(36 * 36), "100");
    }

    #[test]
    fn test_serde_transparent() {
        let number = OrderNumber::from_parts(42, "AB12");
        let json = serde_json::to_string(&number).unwrap();
        assert_eq!(json, format!("\"{}\"", number.as_str()));
    }
}

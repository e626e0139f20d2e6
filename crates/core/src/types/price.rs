//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is zero. Products are never free.
    #[error("price must be greater than zero")]
    Zero,
    /// The amount is negative.
    #[error("price must not be negative")]
    Negative,
    /// More than [`Price::MAX_SCALE`] decimal places.
    #[error("price must have at most two decimal places")]
    TooPrecise,
    /// The amount does not fit the stored precision.
    #[error("price must be less than 10000000000")]
    TooLarge,
}

/// A product price in the store's standard currency unit (e.g. dollars, not cents).
///
/// Always strictly positive. Serializes as a decimal string so no precision
/// is lost on the wire; deserializes from either a string or a JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// Decimal places kept in storage (`NUMERIC(12, 2)`).
    pub const MAX_SCALE: u32 = 2;

    /// Exclusive upper bound: ten integer digits.
    pub const LIMIT: Decimal = Decimal::from_parts(1_410_065_408, 2, 0, false, 0);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Zero`] or [`PriceError::Negative`] when the amount
    /// is not strictly positive, [`PriceError::TooPrecise`] for sub-cent
    /// amounts and [`PriceError::TooLarge`] at or above [`Price::LIMIT`].
    /// Trailing zeros do not count towards the scale.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_zero() {
            return Err(PriceError::Zero);
        }
        if amount.is_sign_negative() {
            return Err(PriceError::Negative);
        }
        if amount.normalize().scale() > Self::MAX_SCALE {
            return Err(PriceError::TooPrecise);
        }
        if amount >= Self::LIMIT {
            return Err(PriceError::TooLarge);
        }
        Ok(Self(amount))
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Price {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Decimal as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Decimal as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Price {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let amount = <Decimal as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self::new(amount)?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Price {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Decimal as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_and_negative() {
        assert_eq!(Price::new(Decimal::ZERO), Err(PriceError::Zero));
        assert_eq!(Price::new(Decimal::new(-100, 2)), Err(PriceError::Negative));
    }

    #[test]
    fn test_rejects_what_storage_cannot_hold() {
        assert_eq!(Price::LIMIT, Decimal::new(10_000_000_000, 0));
        assert_eq!(Price::new(Decimal::new(1, 3)), Err(PriceError::TooPrecise));
        assert_eq!(Price::new(Price::LIMIT), Err(PriceError::TooLarge));
        assert_eq!(
            Price::new("99999999999999999999".parse().unwrap()),
            Err(PriceError::TooLarge)
        );
        assert!(Price::new(Decimal::new(999_999_999_999, 2)).is_ok());
        assert!(Price::new(Decimal::new(19_990, 3)).is_ok());
    }

    #[test]
    fn test_display_two_decimals() {
        let price = Price::new(Decimal::new(20, 0)).unwrap();
        assert_eq!(price.to_string(), "20.00");
    }

    #[test]
    fn test_deserialize_from_number_and_string() {
        let from_number: Price = serde_json::from_str("19.99").unwrap();
        let from_string: Price = serde_json::from_str("\"19.99\"").unwrap();
        assert_eq!(from_number, from_string);
        assert!(serde_json::from_str::<Price>("0").is_err());
    }
}

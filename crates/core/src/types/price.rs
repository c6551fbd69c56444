//! Non-negative unit prices using decimal arithmetic.
//!
//! Prices are stored in the cart's persisted layout as plain JSON numbers
//! (`"price": 1000`), which readers parse as `f64`. Every [`Price`] is
//! therefore held at the decimal spelling of its nearest `f64`, so the value
//! in memory is exactly the value that comes back from storage.
//!
//! There is no currency on a price: the storefront shows a single currency
//! and the cart never converts between them.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when building a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative: {0}")]
    Negative(Decimal),
    /// No number could be read from the text.
    #[error("no numeric price in {0:?}")]
    Unparseable(String),
    /// The number does not fit a decimal.
    #[error("price out of range: {0}")]
    OutOfRange(String),
}

/// A non-negative unit price.
///
/// ## Examples
///
/// ```
/// use aso_cart_core::Price;
/// use rust_decimal::Decimal;
///
/// assert!(Price::new(Decimal::new(1999, 2)).is_ok());
/// assert!(Price::new(Decimal::new(-1, 0)).is_err());
///
/// let price = Price::parse_leading("1.250.00").unwrap();
/// assert_eq!(price.to_string(), "1.25");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// The amount is rounded to the nearest `f64`, so digits beyond `f64`
    /// precision are dropped: `123456789012345678901` becomes
    /// `123456789012345680000`.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero, or
    /// [`PriceError::OutOfRange`] if the rounded amount no longer fits a
    /// decimal.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        let rounded = nearest_f64(amount)
            .and_then(|float| Decimal::from_str(&float.to_string()).ok())
            .ok_or_else(|| PriceError::OutOfRange(amount.to_string()))?;
        Ok(Self(rounded.normalize()))
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Keep only the characters of displayed price text that can belong to a
    /// number: ASCII digits and `.`.
    ///
    /// `"MAD 1,200.50"` becomes `"1200.50"`.
    #[must_use]
    pub fn clean_display_text(text: &str) -> String {
        text.chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect()
    }

    /// Parse the longest leading number of the form `digits[.digits]`.
    ///
    /// Anything after the number is ignored, so `"1.2.3"` reads as `1.2`.
    /// Either side of the point may be empty, but not both.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Unparseable`] if the text does not start with a
    /// number, or [`PriceError::OutOfRange`] if the number is too large.
    pub fn parse_leading(text: &str) -> Result<Self, PriceError> {
        let int_len = text.bytes().take_while(u8::is_ascii_digit).count();
        let (int_part, rest) = text.split_at(int_len);

        let frac_part = rest.strip_prefix('.').map_or("", |after| {
            let frac_len = after.bytes().take_while(u8::is_ascii_digit).count();
            after.split_at(frac_len).0
        });

        if int_part.is_empty() && frac_part.is_empty() {
            return Err(PriceError::Unparseable(text.to_owned()));
        }

        let int_part = if int_part.is_empty() { "0" } else { int_part };
        let normalized = if frac_part.is_empty() {
            int_part.to_owned()
        } else {
            format!("{int_part}.{frac_part}")
        };

        let amount =
            Decimal::from_str(&normalized).map_err(|_| PriceError::OutOfRange(normalized))?;
        Self::new(amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Price {
    fn from(amount: u32) -> Self {
        Self(Decimal::from(amount))
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount =
            Decimal::from_str(s.trim()).map_err(|_| PriceError::Unparseable(s.to_owned()))?;
        Self::new(amount)
    }
}

fn nearest_f64(amount: Decimal) -> Option<f64> {
    amount.to_string().parse().ok()
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match nearest_f64(self.0) {
            Some(float) => serializer.serialize_f64(float),
            None => Err(serde::ser::Error::custom(format!(
                "price {} is not a number",
                self.0
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount: Decimal = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

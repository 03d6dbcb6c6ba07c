//! Fixed-scale decimal prices
//!
//! Uses rust_decimal for deterministic arithmetic (no floating-point errors).
//! Every price carries exactly two fractional digits; values with more
//! precision are rounded HALF_UP (midpoint away from zero).

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::NumericError;

/// Number of fractional digits carried by every price.
pub const PRICE_SCALE: u32 = 2;

/// Round and rescale a decimal to the price scale.
pub fn to_price_scale(value: Decimal) -> Decimal {
    let mut scaled = value.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    scaled.rescale(PRICE_SCALE);
    if scaled.is_zero() {
        scaled.set_sign_positive(true);
    }
    scaled
}

/// An instrument price with a fixed scale of two fractional digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// `0.00`, the identity result for empty statistics.
    pub const ZERO: Price = Price(Decimal::from_parts(0, 0, 0, false, PRICE_SCALE));

    /// Largest accepted magnitude, `1_000_000_000_000_000.00`.
    ///
    /// Sums of in-range prices stay below `Decimal::MAX` for more than
    /// 7 * 10^13 terms, far beyond any window's tick count.
    pub const MAX: Price = Price(Decimal::from_parts(1_569_325_056, 23_283_064, 0, false, PRICE_SCALE));

    /// Create a price, rounding to two fractional digits.
    pub fn from_decimal(value: Decimal) -> Self {
        Self(to_price_scale(value))
    }

    /// Create a whole-unit price.
    pub fn from_u64(value: u64) -> Self {
        Self::from_decimal(Decimal::from(value))
    }

    /// Parse a price from its decimal string form.
    pub fn from_str(s: &str) -> Result<Self, NumericError> {
        Decimal::from_str(s)
            .map(Self::from_decimal)
            .map_err(|_| NumericError::InvalidDecimal(s.to_string()))
    }

    /// Inner decimal value (always at scale 2).
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Whether the price is at scale 2 and no larger in magnitude than
    /// [`Price::MAX`].
    ///
    /// Values too large to carry two fractional digits keep a smaller
    /// scale after rounding and fail this check.
    pub fn is_in_range(&self) -> bool {
        self.0.scale() == PRICE_SCALE && self.0.abs() <= Self::MAX.0
    }
}

impl Default for Price {
    fn default() -> Self {
        Price::ZERO
    }
}

impl From<Decimal> for Price {
    fn from(value: Decimal) -> Self {
        Self::from_decimal(value)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

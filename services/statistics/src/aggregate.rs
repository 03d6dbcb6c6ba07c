//! Incremental min/max/sum/count accumulator
//!
//! An `Aggregate` summarizes a set of prices without storing them. It can
//! absorb one price at a time, and it can have a previously absorbed
//! sub-aggregate taken back out again. Subtraction cannot recover the
//! extremes by itself, so the caller supplies the replacement min/max.

use rust_decimal::Decimal;
use types::numeric::{to_price_scale, Price};

/// Aggregated values over a set of prices.
///
/// Invariant: `count == 0` exactly when `min` and `max` are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregate {
    min: Option<Price>,
    max: Option<Price>,
    sum: Decimal,
    count: u64,
}

impl Aggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one price into the aggregate.
    ///
    /// Callers keep prices within [`Price::MAX`] so the sum cannot overflow.
    pub fn incorporate(&mut self, price: Price) {
        self.sum += price.as_decimal();
        self.count += 1;
        self.min = Some(self.min.map_or(price, |min| min.min(price)));
        self.max = Some(self.max.map_or(price, |max| max.max(price)));
    }

    /// Take a previously incorporated sub-aggregate back out.
    ///
    /// `min`/`max` become the supplied replacements, which the caller derives
    /// from whatever data remains. Pass `None` when nothing remains.
    pub fn subtract(&mut self, other: &Aggregate, min: Option<Price>, max: Option<Price>) {
        debug_assert!(other.count <= self.count);
        self.count -= other.count;
        self.sum -= other.sum;
        self.min = min;
        self.max = max;
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Exact sum of all incorporated prices, at price scale.
    pub fn sum(&self) -> Decimal {
        to_price_scale(self.sum)
    }

    /// Smallest price, or `0.00` when empty.
    pub fn min(&self) -> Price {
        self.min.unwrap_or(Price::ZERO)
    }

    /// Largest price, or `0.00` when empty.
    pub fn max(&self) -> Price {
        self.max.unwrap_or(Price::ZERO)
    }

    /// `(min, max)` if anything has been incorporated.
    pub fn bounds(&self) -> Option<(Price, Price)> {
        self.min.zip(self.max)
    }

    /// Mean price rounded HALF_UP to two digits, or `0.00` when empty.
    pub fn average(&self) -> Price {
        if self.count == 0 {
            return Price::ZERO;
        }
        Price::from_decimal(self.sum / Decimal::from(self.count))
    }
}

//! Tick types
//!
//! A tick is one price observation for an instrument, stamped with the
//! Unix time in milliseconds at which the price was observed.

use serde::{Deserialize, Serialize};

use crate::errors::TickError;
use crate::ids::InstrumentId;
use crate::numeric::Price;

/// Milliseconds per second, used to bucket ticks by epoch second.
pub const MILLIS_PER_SECOND: i64 = 1_000;

/// A single price observation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tick {
    pub instrument: InstrumentId,
    pub price: Price,
    /// Unix milliseconds
    pub timestamp: i64,
}

impl Tick {
    /// Create a new tick
    pub fn new(instrument: InstrumentId, price: Price, timestamp: i64) -> Self {
        Self {
            instrument,
            price,
            timestamp,
        }
    }

    /// Epoch second this tick falls into (floored, also for pre-epoch times).
    pub fn epoch_second(&self) -> i64 {
        self.timestamp.div_euclid(MILLIS_PER_SECOND)
    }

    /// Structural validation applied at the service boundary.
    ///
    /// Age is not checked here; that depends on the window and the clock.
    pub fn validate(&self) -> Result<(), TickError> {
        if self.instrument.is_blank() {
            return Err(TickError::BlankInstrument);
        }
        if self.price.is_negative() {
            return Err(TickError::InvalidPrice(format!("negative price {}", self.price)));
        }
        if !self.price.is_in_range() {
            return Err(TickError::PriceOutOfRange(self.price.to_string()));
        }
        Ok(())
    }
}

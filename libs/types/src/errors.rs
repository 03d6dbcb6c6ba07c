//! Error types for tick validation
//!
//! Comprehensive error taxonomy using thiserror

use thiserror::Error;

/// Numeric parsing errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NumericError {
    #[error("Invalid decimal: {0}")]
    InvalidDecimal(String),
}

/// Tick-specific errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TickError {
    #[error("Instrument identifier must not be blank")]
    BlankInstrument,

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Price out of range: {0}")]
    PriceOutOfRange(String),

    #[error("Numeric error: {0}")]
    Numeric(#[from] NumericError),
}

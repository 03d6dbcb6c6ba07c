//! Types library for the tick statistics service
//!
//! This library provides the core type definitions shared by the statistics
//! engine and the HTTP gateway, so both sides agree on how instruments,
//! prices and ticks are represented.
//!
//! # Modules
//! - `ids`: Instrument identifiers
//! - `numeric`: Fixed-scale decimal prices
//! - `tick`: Timestamped price observations
//! - `errors`: Error taxonomy

// Public modules
pub mod ids;
pub mod numeric;
pub mod tick;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::tick::*;
    pub use crate::errors::*;
}

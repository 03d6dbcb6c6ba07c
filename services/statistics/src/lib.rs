//! Tick Statistics Engine
//!
//! Consumes timestamped instrument prices and answers min/max/average/count
//! over a trailing fixed-length window, for all instruments together and
//! for each instrument individually, without storing individual ticks.
//!
//! # Architecture
//!
//! ```text
//!        Tick
//!          │
//!   ┌──────▼───────┐      periodic evict()
//!   │   Window     │◄──────────────── maintenance
//!   │  Aggregator  │
//!   └──┬───────┬───┘
//!      │       │
//! ┌────▼───┐ ┌─▼────────────┐
//! │Buckets │ │ RollingTotal │  ← aggregate + boundary multiset
//! │(1/sec) │ │  all / per   │    per scope
//! └────────┘ │  instrument  │
//!            └──────────────┘
//! ```
//!
//! Ticks are bucketed per epoch second. The rolling total is kept current
//! incrementally, and an expired bucket is subtracted from it as a whole
//! (subtract-on-evict). Queries are O(1), ingestion is O(log window).

pub mod aggregate;
pub mod boundary;
pub mod bucket;
pub mod clock;
pub mod config;
pub mod maintenance;
pub mod metrics;
pub mod rolling_total;
pub mod statistics;
pub mod window;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, WindowConfig};
pub use maintenance::spawn_maintenance;
pub use statistics::Statistics;
pub use window::WindowAggregator;

// Library version
pub const SERVICE_VERSION: &str = "0.1.0";

//! Per-second bucket
//!
//! Every tick whose timestamp truncates to the same epoch second lands in
//! the same bucket. A bucket keeps one aggregate for all instruments and one
//! per instrument seen during that second.

use std::collections::HashMap;

use types::ids::InstrumentId;
use types::numeric::Price;

use crate::aggregate::Aggregate;
use crate::boundary::Bounds;

/// A bucket's extremes for both scopes a tick touches, captured before the
/// tick is recorded so the rolling total can replace them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BucketBounds {
    pub all: Option<Bounds>,
    pub instrument: Option<Bounds>,
}

#[derive(Debug, Clone, Default)]
pub struct Bucket {
    all: Aggregate,
    instruments: HashMap<InstrumentId, Aggregate>,
}

impl Bucket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a price for `instrument` to this bucket.
    pub fn record(&mut self, instrument: &InstrumentId, price: Price) {
        self.all.incorporate(price);
        self.instruments
            .entry(instrument.clone())
            .or_default()
            .incorporate(price);
    }

    /// Aggregate across all instruments.
    pub fn aggregate(&self) -> &Aggregate {
        &self.all
    }

    /// Per-instrument aggregates.
    pub fn instruments(&self) -> &HashMap<InstrumentId, Aggregate> {
        &self.instruments
    }

    /// Aggregate for one instrument, `None` if it never traded this second.
    pub fn instrument(&self, instrument: &str) -> Option<&Aggregate> {
        self.instruments.get(instrument)
    }

    /// `(min, max)` for one instrument in this bucket.
    pub fn instrument_bounds(&self, instrument: &str) -> Option<Bounds> {
        self.instrument(instrument).and_then(Aggregate::bounds)
    }

    /// Current extremes for all instruments and for `instrument`.
    pub fn bounds_for(&self, instrument: &str) -> BucketBounds {
        BucketBounds {
            all: self.all.bounds(),
            instrument: self.instrument_bounds(instrument),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(v: u64) -> Price {
        Price::from_u64(v)
    }

    #[test]
    fn test_record_feeds_both_scopes() {
        let mut bucket = Bucket::new();
        let ibm = InstrumentId::new("IBM.N");
        let aapl = InstrumentId::new("AAPL");

        bucket.record(&ibm, p(10));
        bucket.record(&aapl, p(20));
        bucket.record(&ibm, p(5));

        assert_eq!(bucket.aggregate().count(), 3);
        assert_eq!(bucket.aggregate().min(), p(5));
        assert_eq!(bucket.aggregate().max(), p(20));

        assert_eq!(bucket.instruments().len(), 2);
        assert_eq!(bucket.instrument("IBM.N").unwrap().count(), 2);
        assert_eq!(bucket.instrument_bounds("IBM.N"), Some((p(5), p(10))));
        assert_eq!(bucket.instrument_bounds("AAPL"), Some((p(20), p(20))));
    }

    #[test]
    fn test_unknown_instrument_is_absent() {
        let mut bucket = Bucket::new();
        bucket.record(&InstrumentId::new("IBM.N"), p(1));

        assert!(bucket.instrument("NOPE").is_none());
        assert_eq!(bucket.instrument_bounds("NOPE"), None);
    }

    #[test]
    fn test_bounds_for_reports_both_scopes() {
        let mut bucket = Bucket::new();
        let ibm = InstrumentId::new("IBM.N");
        assert_eq!(bucket.bounds_for("IBM.N"), BucketBounds::default());

        bucket.record(&ibm, p(7));
        bucket.record(&InstrumentId::new("AAPL"), p(3));

        let bounds = bucket.bounds_for("IBM.N");
        assert_eq!(bounds.all, Some((p(3), p(7))));
        assert_eq!(bounds.instrument, Some((p(7), p(7))));
    }

    #[test]
    fn test_new_bucket_is_empty() {
        let bucket = Bucket::new();
        assert!(bucket.aggregate().is_empty());
        assert!(bucket.instruments().is_empty());
    }
}

//! Rolling total across all live buckets
//!
//! Maintained incrementally: ticks are added as they arrive, and a whole
//! bucket is subtracted when it leaves the window (subtract-on-evict).
//! Each scope keeps a boundary multiset holding the min and max of every
//! live bucket, so the remaining extremes are known right after a bucket is
//! taken out.

use std::collections::HashMap;

use tracing::warn;
use types::ids::InstrumentId;
use types::tick::Tick;

use crate::aggregate::Aggregate;
use crate::boundary::{BoundarySet, Bounds};
use crate::bucket::{Bucket, BucketBounds};
use crate::statistics::Statistics;

/// Aggregate plus boundary multiset for one scope.
#[derive(Debug, Clone, Default)]
struct Scope {
    aggregate: Aggregate,
    boundaries: BoundarySet,
}

impl Scope {
    fn add(&mut self, tick: &Tick, previous: Option<Bounds>, current: Option<Bounds>) {
        self.aggregate.incorporate(tick.price);
        if let Some(current) = current {
            self.boundaries.replace_pair(previous, current);
        }
    }

    fn evict(&mut self, evicted: &Aggregate, bounds: Bounds) {
        self.boundaries.remove_pair(bounds);
        let remaining = self.boundaries.bounds();
        self.aggregate.subtract(
            evicted,
            remaining.map(|(min, _)| min),
            remaining.map(|(_, max)| max),
        );
    }

    fn is_drained(&self) -> bool {
        self.boundaries.is_empty() || self.aggregate.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RollingTotal {
    all: Scope,
    instruments: HashMap<InstrumentId, Scope>,
}

impl RollingTotal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for `tick`, which has just been recorded into `bucket`.
    ///
    /// `previous` holds the bucket's extremes from before the tick, so the
    /// bucket's old boundary pair can be replaced with its current one.
    pub fn add(&mut self, tick: &Tick, previous: BucketBounds, bucket: &Bucket) {
        let current = bucket.bounds_for(tick.instrument.as_str());

        self.all.add(tick, previous.all, current.all);

        self.instruments
            .entry(tick.instrument.clone())
            .or_default()
            .add(tick, previous.instrument, current.instrument);
    }

    /// Subtract an expired bucket from the total.
    pub fn evict(&mut self, bucket: &Bucket) {
        let Some(bounds) = bucket.aggregate().bounds() else {
            return;
        };
        self.all.evict(bucket.aggregate(), bounds);

        for (instrument, evicted) in bucket.instruments() {
            let Some(bounds) = evicted.bounds() else {
                continue;
            };
            let Some(scope) = self.instruments.get_mut(instrument) else {
                warn!(%instrument, "Evicted bucket references untracked instrument");
                continue;
            };
            scope.evict(evicted, bounds);
            if scope.is_drained() {
                self.instruments.remove(instrument);
            }
        }
    }

    /// Statistics across all instruments.
    pub fn snapshot(&self) -> Statistics {
        Statistics::from(&self.all.aggregate)
    }

    /// Statistics for one instrument; all zeros if it has no live data.
    pub fn snapshot_for(&self, instrument: &str) -> Statistics {
        self.instruments
            .get(instrument)
            .map(|scope| Statistics::from(&scope.aggregate))
            .unwrap_or_else(Statistics::empty)
    }

    /// Number of instruments with live data.
    pub fn instrument_count(&self) -> usize {
        self.instruments.len()
    }

    /// Entries in the all-instruments boundary multiset.
    pub fn boundary_len(&self) -> usize {
        self.all.boundaries.len()
    }

    /// Entries in one instrument's boundary multiset, `None` if untracked.
    pub fn instrument_boundary_len(&self, instrument: &str) -> Option<usize> {
        self.instruments
            .get(instrument)
            .map(|scope| scope.boundaries.len())
    }
}

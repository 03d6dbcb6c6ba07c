//! Sliding-window aggregator
//!
//! Owns the per-second buckets and the rolling total, and slides the window
//! forward by evicting every bucket whose second has fallen out of it. The
//! eviction pass runs at the start of every operation, so results are
//! current even if the periodic maintenance task has not run lately.
//!
//! All state sits behind one mutex. Eviction touches the bucket map and the
//! rolling total as a single step that queries must never see half done.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use tracing::{debug, info, trace, warn};
use types::ids::InstrumentId;
use types::numeric::Price;
use types::tick::{Tick, MILLIS_PER_SECOND};

use crate::bucket::Bucket;
use crate::clock::{Clock, SystemClock};
use crate::config::WindowConfig;
use crate::metrics::ServiceMetrics;
use crate::rolling_total::RollingTotal;
use crate::statistics::Statistics;

#[derive(Debug, Default)]
struct WindowState {
    /// Buckets keyed by epoch second; sparse, one per second that saw a tick.
    buckets: BTreeMap<i64, Bucket>,
    total: RollingTotal,
}

impl WindowState {
    /// Evict every bucket older than `horizon`, oldest first.
    fn evict_before(&mut self, horizon: i64) -> u64 {
        let mut evicted = 0;
        while let Some((&second, _)) = self.buckets.first_key_value() {
            if second >= horizon {
                break;
            }
            if let Some((second, bucket)) = self.buckets.pop_first() {
                debug!(
                    second,
                    ticks = bucket.aggregate().count(),
                    instruments = bucket.instruments().len(),
                    "Evicting expired bucket"
                );
                self.total.evict(&bucket);
                evicted += 1;
            }
        }
        evicted
    }
}

/// Thread-safe trailing-window statistics over a stream of ticks.
pub struct WindowAggregator {
    window_seconds: i64,
    clock: Arc<dyn Clock>,
    state: Mutex<WindowState>,
    metrics: ServiceMetrics,
}

impl WindowAggregator {
    pub fn new(config: &WindowConfig, clock: Arc<dyn Clock>) -> Self {
        info!(
            window_seconds = config.window_seconds,
            "WindowAggregator initialized"
        );

        Self {
            window_seconds: i64::from(config.window_seconds),
            clock,
            state: Mutex::new(WindowState::default()),
            metrics: ServiceMetrics::new(),
        }
    }

    /// Create an aggregator reading wall-clock time.
    pub fn with_system_clock(config: &WindowConfig) -> Self {
        Self::new(config, Arc::new(SystemClock))
    }

    /// Whether `tick` is recent enough to belong to the window.
    ///
    /// A tick exactly `window_seconds` old is still accepted.
    pub fn is_valid(&self, tick: &Tick) -> bool {
        self.is_valid_at(tick, self.clock.now_millis())
    }

    /// Ingest a tick. Returns false, changing nothing, if it is too old or
    /// its price is outside [`Price::is_in_range`].
    pub fn record(&self, tick: &Tick) -> bool {
        let started = Instant::now();
        if !tick.price.is_in_range() {
            self.metrics.record_tick_rejected();
            warn!(
                instrument = %tick.instrument,
                price = %tick.price,
                "Rejecting tick with out-of-range price"
            );
            return false;
        }

        let mut state = self.lock();
        let now = self.clock.now_millis();

        if !self.is_valid_at(tick, now) {
            drop(state);
            self.metrics.record_tick_rejected();
            debug!(
                instrument = %tick.instrument,
                timestamp = tick.timestamp,
                now,
                "Rejecting tick outside window"
            );
            return false;
        }

        let evicted = state.evict_before(self.horizon(now));

        let WindowState { buckets, total } = &mut *state;
        let bucket = buckets.entry(tick.epoch_second()).or_default();
        let previous = bucket.bounds_for(tick.instrument.as_str());
        bucket.record(&tick.instrument, tick.price);
        total.add(tick, previous, bucket);
        drop(state);

        self.metrics.record_evicted(evicted);
        self.metrics
            .record_tick_accepted(started.elapsed().as_nanos() as u64);
        trace!(
            instrument = %tick.instrument,
            price = %tick.price,
            timestamp = tick.timestamp,
            "Tick recorded"
        );
        true
    }

    /// Convenience wrapper building the tick from its parts.
    pub fn record_price(&self, instrument: &str, price: Price, timestamp: i64) -> bool {
        match InstrumentId::try_new(instrument) {
            Some(instrument) => self.record(&Tick::new(instrument, price, timestamp)),
            None => false,
        }
    }

    /// Slide the window to the current second.
    ///
    /// Idempotent; returns the number of buckets evicted.
    pub fn evict(&self) -> u64 {
        let evicted = {
            let mut state = self.lock();
            let now = self.clock.now_millis();
            state.evict_before(self.horizon(now))
        };
        self.metrics.record_evicted(evicted);
        if evicted > 0 {
            debug!(evicted, "Window advanced");
        }
        evicted
    }

    /// Statistics across all instruments for the current window.
    pub fn statistics(&self) -> Statistics {
        let snapshot = {
            let mut state = self.lock();
            let evicted = state.evict_before(self.horizon(self.clock.now_millis()));
            self.metrics.record_evicted(evicted);
            state.total.snapshot()
        };
        self.metrics.record_query();
        snapshot
    }

    /// Statistics for one instrument; all zeros if it has no live data.
    pub fn statistics_for(&self, instrument: &str) -> Statistics {
        let snapshot = {
            let mut state = self.lock();
            let evicted = state.evict_before(self.horizon(self.clock.now_millis()));
            self.metrics.record_evicted(evicted);
            state.total.snapshot_for(instrument)
        };
        self.metrics.record_query();
        snapshot
    }

    pub fn window_seconds(&self) -> i64 {
        self.window_seconds
    }

    pub fn metrics(&self) -> &ServiceMetrics {
        &self.metrics
    }

    /// Live buckets, without sliding the window first.
    pub fn bucket_count(&self) -> usize {
        self.lock().buckets.len()
    }

    /// Instruments with live data, without sliding the window first.
    pub fn tracked_instruments(&self) -> usize {
        self.lock().total.instrument_count()
    }

    /// Entries in the all-instruments boundary multiset.
    pub fn boundary_entries(&self) -> usize {
        self.lock().total.boundary_len()
    }

    /// Entries in one instrument's boundary multiset, `None` if untracked.
    pub fn instrument_boundary_entries(&self, instrument: &str) -> Option<usize> {
        self.lock().total.instrument_boundary_len(instrument)
    }

    fn is_valid_at(&self, tick: &Tick, now_millis: i64) -> bool {
        tick.timestamp >= now_millis - self.window_seconds * MILLIS_PER_SECOND
    }

    /// First epoch second still inside the window at `now_millis`.
    fn horizon(&self, now_millis: i64) -> i64 {
        now_millis.div_euclid(MILLIS_PER_SECOND) - self.window_seconds
    }

    fn lock(&self) -> MutexGuard<'_, WindowState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for WindowAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowAggregator")
            .field("window_seconds", &self.window_seconds)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

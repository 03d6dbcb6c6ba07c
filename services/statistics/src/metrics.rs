//! Observability counters for the statistics engine
//!
//! Tracks accepted and rejected ticks, evicted buckets, maintenance passes
//! and record latency. Counters are atomics, so updating them never
//! contends with the aggregator lock.

use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Core metrics for the statistics engine.
pub struct ServiceMetrics {
    // Ingestion
    pub ticks_accepted: AtomicU64,
    pub ticks_rejected: AtomicU64,
    pub record_latency_ns: Mutex<LatencyTracker>,

    // Window maintenance
    pub buckets_evicted: AtomicU64,
    pub maintenance_runs: AtomicU64,

    // Queries
    pub queries_served: AtomicU64,
}

impl ServiceMetrics {
    pub fn new() -> Self {
        Self {
            ticks_accepted: AtomicU64::new(0),
            ticks_rejected: AtomicU64::new(0),
            record_latency_ns: Mutex::new(LatencyTracker::new(1000)),
            buckets_evicted: AtomicU64::new(0),
            maintenance_runs: AtomicU64::new(0),
            queries_served: AtomicU64::new(0),
        }
    }

    /// Record an accepted tick.
    pub fn record_tick_accepted(&self, latency_ns: u64) {
        self.ticks_accepted.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut tracker) = self.record_latency_ns.lock() {
            tracker.record(latency_ns);
        }
    }

    /// Record a tick rejected as too old.
    pub fn record_tick_rejected(&self) {
        self.ticks_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Record buckets removed by an eviction pass.
    pub fn record_evicted(&self, buckets: u64) {
        if buckets > 0 {
            self.buckets_evicted.fetch_add(buckets, Ordering::Relaxed);
        }
    }

    /// Record a periodic maintenance pass.
    pub fn record_maintenance_run(&self) {
        self.maintenance_runs.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a statistics query.
    pub fn record_query(&self) {
        self.queries_served.fetch_add(1, Ordering::Relaxed);
    }

    /// Export metrics as a BTreeMap for Prometheus-style exposition.
    pub fn export(&self) -> BTreeMap<String, u64> {
        let mut m = BTreeMap::new();
        m.insert("ticks_accepted".to_string(), self.ticks_accepted.load(Ordering::Relaxed));
        m.insert("ticks_rejected".to_string(), self.ticks_rejected.load(Ordering::Relaxed));
        m.insert("buckets_evicted".to_string(), self.buckets_evicted.load(Ordering::Relaxed));
        m.insert("maintenance_runs".to_string(), self.maintenance_runs.load(Ordering::Relaxed));
        m.insert("queries_served".to_string(), self.queries_served.load(Ordering::Relaxed));
        if let Ok(tracker) = self.record_latency_ns.lock() {
            if let Some(p99) = tracker.percentile(99) {
                m.insert("record_latency_p99_ns".to_string(), p99);
            }
            if let Some(avg) = tracker.average() {
                m.insert("record_latency_avg_ns".to_string(), avg);
            }
        }
        m
    }
}

impl Default for ServiceMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Tracks latency samples for percentile calculation.
pub struct LatencyTracker {
    samples: VecDeque<u64>,
    max_samples: usize,
}

impl LatencyTracker {
    pub fn new(max_samples: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(max_samples),
            max_samples,
        }
    }

    /// Record a latency sample.
    pub fn record(&mut self, value: u64) {
        if self.samples.len() >= self.max_samples {
            self.samples.pop_front();
        }
        self.samples.push_back(value);
    }

    /// Get a percentile value (0-100).
    pub fn percentile(&self, p: usize) -> Option<u64> {
        if self.samples.is_empty() {
            return None;
        }

        let mut sorted: Vec<u64> = self.samples.iter().copied().collect();
        sorted.sort_unstable();

        let idx = (p as f64 / 100.0 * (sorted.len() - 1) as f64) as usize;
        Some(sorted[idx.min(sorted.len() - 1)])
    }

    /// Average latency.
    pub fn average(&self) -> Option<u64> {
        if self.samples.is_empty() {
            return None;
        }
        let sum: u64 = self.samples.iter().sum();
        Some(sum / self.samples.len() as u64)
    }

    /// Number of samples recorded.
    pub fn count(&self) -> usize {
        self.samples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_recording() {
        let metrics = ServiceMetrics::new();

        metrics.record_tick_accepted(500);
        metrics.record_tick_accepted(1000);
        metrics.record_tick_rejected();

        let exported = metrics.export();
        assert_eq!(exported["ticks_accepted"], 2);
        assert_eq!(exported["ticks_rejected"], 1);
        assert_eq!(exported["record_latency_avg_ns"], 750);
    }

    #[test]
    fn test_eviction_metrics() {
        let metrics = ServiceMetrics::new();
        metrics.record_evicted(3);
        metrics.record_evicted(0);
        metrics.record_maintenance_run();
        metrics.record_query();

        let exported = metrics.export();
        assert_eq!(exported["buckets_evicted"], 3);
        assert_eq!(exported["maintenance_runs"], 1);
        assert_eq!(exported["queries_served"], 1);
    }

    #[test]
    fn test_latency_absent_without_samples() {
        let exported = ServiceMetrics::new().export();
        assert!(!exported.contains_key("record_latency_p99_ns"));
    }

    #[test]
    fn test_latency_tracker_percentile() {
        let mut tracker = LatencyTracker::new(100);

        for i in 1..=100 {
            tracker.record(i);
        }

        let p50 = tracker.percentile(50).unwrap();
        assert!(p50 >= 49 && p50 <= 51);

        let p99 = tracker.percentile(99).unwrap();
        assert!(p99 >= 98 && p99 <= 100);
    }

    #[test]
    fn test_latency_tracker_window_eviction() {
        let mut tracker = LatencyTracker::new(3);

        tracker.record(10);
        tracker.record(20);
        tracker.record(30);
        tracker.record(40); // Should evict 10

        assert_eq!(tracker.count(), 3);
        assert_eq!(tracker.average().unwrap(), 30); // (20+30+40)/3
    }
}

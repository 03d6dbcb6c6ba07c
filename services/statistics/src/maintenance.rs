//! Periodic window maintenance
//!
//! Slides the window on a fixed cadence so expired buckets are released
//! even when no ticks or queries arrive. Results never depend on this task:
//! every aggregator operation evicts first.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, trace};

use crate::window::WindowAggregator;

/// Spawn a task that calls [`WindowAggregator::evict`] every `period`.
///
/// The task runs until the returned handle is aborted.
pub fn spawn_maintenance(aggregator: Arc<WindowAggregator>, period: Duration) -> JoinHandle<()> {
    info!(period_ms = period.as_millis() as u64, "Starting window maintenance");

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            let evicted = aggregator.evict();
            aggregator.metrics().record_maintenance_run();
            if evicted > 0 {
                debug!(evicted, "Maintenance pass evicted buckets");
            } else {
                trace!("Maintenance pass idle");
            }
        }
    })
}

use statistics::WindowAggregator;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<WindowAggregator>,
}

impl AppState {
    pub fn new(aggregator: Arc<WindowAggregator>) -> Self {
        Self { aggregator }
    }
}

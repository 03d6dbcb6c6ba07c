use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
};
use statistics::Statistics;

pub async fn get_statistics(State(state): State<AppState>) -> Json<Statistics> {
    Json(state.aggregator.statistics())
}

pub async fn get_statistics_for_instrument(
    State(state): State<AppState>,
    Path(instrument): Path<String>,
) -> Json<Statistics> {
    Json(state.aggregator.statistics_for(&instrument))
}

use crate::error::AppError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use types::tick::Tick;

/// Store a tick: `201` when it is inside the window, `204` when too old.
pub async fn store_tick(
    State(state): State<AppState>,
    payload: Result<Json<Tick>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(tick) = payload?;
    tick.validate()?;

    if state.aggregator.is_valid(&tick) && state.aggregator.record(&tick) {
        Ok(StatusCode::CREATED)
    } else {
        Ok(StatusCode::NO_CONTENT)
    }
}

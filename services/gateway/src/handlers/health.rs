use crate::error::AppError;
use crate::models::HealthResponse;
use crate::state::AppState;
use axum::{Json, extract::State, http::Uri};
use std::collections::BTreeMap;

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: statistics::SERVICE_VERSION,
    })
}

pub async fn get_metrics(State(state): State<AppState>) -> Json<BTreeMap<String, u64>> {
    Json(state.aggregator.metrics().export())
}

pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

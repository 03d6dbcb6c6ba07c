use crate::handlers::{health, stats, ticks};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/ticks", post(ticks::store_tick))
        .route("/statistics", get(stats::get_statistics))
        .route(
            "/statistics/{instrument}",
            get(stats::get_statistics_for_instrument),
        )
        .route("/metrics", get(health::get_metrics))
        .route("/health", get(health::health));

    Router::new()
        .merge(api_routes)
        .fallback(health::not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
        response::Response,
    };
    use serde_json::{Value, json};
    use statistics::{ManualClock, WindowAggregator, WindowConfig};
    use std::sync::Arc;
    use tower::ServiceExt;

    const NOW: i64 = 1_700_000_000_000;

    fn app() -> (Arc<ManualClock>, Router) {
        let clock = Arc::new(ManualClock::new(NOW));
        let aggregator = Arc::new(WindowAggregator::new(
            &WindowConfig::default(),
            clock.clone(),
        ));
        (clock, create_router(AppState::new(aggregator)))
    }

    fn post_tick(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/ticks")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_store_fresh_tick_returns_created() {
        let (_clock, app) = app();
        let response = app
            .oneshot(post_tick(json!({"instrument": "IBM.N", "price": 143.82, "timestamp": NOW})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_store_stale_tick_returns_no_content() {
        let (_clock, app) = app();
        let response = app
            .oneshot(post_tick(
                json!({"instrument": "IBM.N", "price": 143.82, "timestamp": NOW - 61_000}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_malformed_tick_returns_bad_request() {
        let (_clock, app) = app();
        let response = app
            .oneshot(post_tick(json!({"instrument": "IBM.N", "price": "abc", "timestamp": NOW})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_negative_price_returns_bad_request() {
        let (_clock, app) = app();
        let response = app
            .oneshot(post_tick(json!({"instrument": "IBM.N", "price": -1.0, "timestamp": NOW})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "INVALID_TICK");
    }

    #[tokio::test]
    async fn test_oversized_price_returns_bad_request() {
        let (_clock, app) = app();
        let tick = json!({
            "instrument": "IBM.N",
            "price": "50000000000000000000000000000",
            "timestamp": NOW
        });
        let response = app.clone().oneshot(post_tick(tick)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "INVALID_TICK");

        let response = app.oneshot(get("/statistics")).await.unwrap();
        assert_eq!(json_body(response).await["count"], 0);
    }

    #[tokio::test]
    async fn test_statistics_reflect_stored_ticks() {
        let (_clock, app) = app();
        for (instrument, price) in [("IBM.N", 10.0), ("AAPL", 20.0), ("IBM.N", 30.0)] {
            let response = app
                .clone()
                .oneshot(post_tick(
                    json!({"instrument": instrument, "price": price, "timestamp": NOW}),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let body = json_body(app.clone().oneshot(get("/statistics")).await.unwrap()).await;
        assert_eq!(body, json!({"avg": "20.00", "max": "30.00", "min": "10.00", "count": 3}));

        let body = json_body(app.oneshot(get("/statistics/IBM.N")).await.unwrap()).await;
        assert_eq!(body, json!({"avg": "20.00", "max": "30.00", "min": "10.00", "count": 2}));
    }

    #[tokio::test]
    async fn test_unknown_instrument_returns_zeros() {
        let (_clock, app) = app();
        let response = app.oneshot(get("/statistics/NOPE")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!({"avg": "0.00", "max": "0.00", "min": "0.00", "count": 0})
        );
    }

    #[tokio::test]
    async fn test_statistics_expire_with_clock() {
        let (clock, app) = app();
        app.clone()
            .oneshot(post_tick(json!({"instrument": "IBM.N", "price": 1.5, "timestamp": NOW})))
            .await
            .unwrap();

        clock.advance_secs(61);

        let body = json_body(app.oneshot(get("/statistics")).await.unwrap()).await;
        assert_eq!(body["count"], 0);
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let (_clock, app) = app();
        app.clone()
            .oneshot(post_tick(json!({"instrument": "IBM.N", "price": 1.5, "timestamp": NOW})))
            .await
            .unwrap();

        let body = json_body(app.oneshot(get("/metrics")).await.unwrap()).await;
        assert_eq!(body["ticks_accepted"], 1);
    }

    #[tokio::test]
    async fn test_health_and_fallback() {
        let (_clock, app) = app();
        let body = json_body(app.clone().oneshot(get("/health")).await.unwrap()).await;
        assert_eq!(body["status"], "ok");

        let response = app.oneshot(get("/nope")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["error"], "NOT_FOUND");
    }
}

use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::prediction::{prediction_router, CustomerInput, PredictionService};

pub(super) fn basic_risky_input() -> CustomerInput {
    CustomerInput::new(24, 5, 2.0, "BASIC")
}

pub(super) fn premium_loyal_input() -> CustomerInput {
    CustomerInput::new(1, 0, 50.0, "PREMIUM")
}

pub(super) fn build_service() -> Arc<PredictionService> {
    Arc::new(PredictionService::default())
}

pub(super) fn router_with_service(service: Arc<PredictionService>) -> axum::Router {
    prediction_router(service)
}

pub(super) fn json_request(
    uri: &str,
    body: impl Into<axum::body::Body>,
) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::post(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .expect("request builds")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

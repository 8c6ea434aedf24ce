use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;
use tracing::warn;

use super::domain::CustomerInput;
use super::service::PredictionService;
use super::validation::ValidationError;

/// Router exposing the scoring endpoints.
pub fn prediction_router(service: Arc<PredictionService>) -> Router {
    Router::new()
        .route("/api/v1/churn/predict", post(predict_handler))
        .route("/api/v1/churn/explain", post(explain_handler))
        .with_state(service)
}

pub(crate) async fn predict_handler(
    State(service): State<Arc<PredictionService>>,
    payload: Result<Json<CustomerInput>, JsonRejection>,
) -> Response {
    let Json(input) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return malformed_body(rejection),
    };

    match service.predict(&input) {
        Ok(prediction) => (StatusCode::OK, Json(prediction)).into_response(),
        Err(error) => invalid_input(error),
    }
}

pub(crate) async fn explain_handler(
    State(service): State<Arc<PredictionService>>,
    payload: Result<Json<CustomerInput>, JsonRejection>,
) -> Response {
    let Json(input) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return malformed_body(rejection),
    };

    match service.explain(&input) {
        Ok(explained) => (StatusCode::OK, Json(explained)).into_response(),
        Err(error) => invalid_input(error),
    }
}

fn invalid_input(error: ValidationError) -> Response {
    let fields: Vec<_> = error.fields().collect();
    warn!(?fields, "rejected customer input");
    let payload = json!({
        "error": error.to_string(),
        "violations": error.violations,
    });
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}

fn malformed_body(rejection: JsonRejection) -> Response {
    let payload = json!({
        "error": rejection.body_text(),
    });
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}

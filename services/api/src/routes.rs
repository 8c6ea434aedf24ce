use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use churn_insight::batch::{BatchScorer, BatchSummary, RejectedRow, ScoredCustomer};
use churn_insight::error::AppError;
use churn_insight::prediction::{prediction_router, PredictionService};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ChurnReportRequest {
    pub(crate) csv: String,
    #[serde(default)]
    pub(crate) include_rows: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ChurnReportResponse {
    pub(crate) summary: BatchSummary,
    pub(crate) rejected: Vec<RejectedRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) rows: Option<Vec<ScoredCustomer>>,
}

pub(crate) fn with_prediction_routes(service: Arc<PredictionService>) -> axum::Router {
    prediction_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/churn/report",
            axum::routing::post(churn_report_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn churn_report_endpoint(
    Json(payload): Json<ChurnReportRequest>,
) -> Result<Json<ChurnReportResponse>, AppError> {
    let ChurnReportRequest { csv, include_rows } = payload;

    let report = BatchScorer::from_reader(Cursor::new(csv.into_bytes()))?;
    let rows = if include_rows {
        Some(report.scored)
    } else {
        None
    };

    Ok(Json(ChurnReportResponse {
        summary: report.summary,
        rejected: report.rejected,
        rows,
    }))
}

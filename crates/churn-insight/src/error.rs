use crate::batch::BatchImportError;
use crate::config::ConfigError;
use crate::prediction::ValidationError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("batch error: {0}")]
    Batch(#[from] BatchImportError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Batch(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_) | AppError::Telemetry(_) | AppError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::{validate, CustomerInput};

    #[test]
    fn validation_errors_are_client_errors() {
        let error = validate(&CustomerInput::default()).expect_err("empty input rejected");
        let app_error = AppError::from(error);

        assert_eq!(app_error.status(), StatusCode::BAD_REQUEST);
        assert!(app_error.to_string().starts_with("invalid customer input"));
    }

    #[test]
    fn io_errors_are_server_errors() {
        let app_error = AppError::from(std::io::Error::other("disk gone"));

        assert_eq!(
            app_error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}

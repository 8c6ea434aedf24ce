//! Request-facing prediction layer: boundary validation, id assignment and HTTP routes.

pub mod domain;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{CustomerInput, ExplainedPrediction, PredictionId, PredictionResponse};
pub use router::prediction_router;
pub use service::PredictionService;
pub use validation::{validate, FieldViolation, ValidationError};

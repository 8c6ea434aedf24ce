use std::fmt;

use serde::{Deserialize, Serialize};

use crate::scoring::{PredictionLabel, ScoreComponent};

/// Request payload accepted at the API boundary.
///
/// Fields stay optional and signed so validation can name every missing or
/// negative value instead of failing on the first deserialization error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInput {
    #[serde(default)]
    pub contract_months: Option<i64>,
    #[serde(default)]
    pub payment_delays: Option<i64>,
    #[serde(default)]
    pub monthly_usage: Option<f64>,
    #[serde(default)]
    pub plan_type: Option<String>,
}

impl CustomerInput {
    pub fn new(
        contract_months: i64,
        payment_delays: i64,
        monthly_usage: f64,
        plan_type: impl Into<String>,
    ) -> Self {
        Self {
            contract_months: Some(contract_months),
            payment_delays: Some(payment_delays),
            monthly_usage: Some(monthly_usage),
            plan_type: Some(plan_type.into()),
        }
    }
}

/// Identifier assigned to each prediction served by a [`super::PredictionService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictionId(pub u64);

impl fmt::Display for PredictionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub id: PredictionId,
    pub prediction: PredictionLabel,
    pub probability: f64,
}

/// Prediction plus the raw score and factor contributions behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainedPrediction {
    pub id: PredictionId,
    pub prediction: PredictionLabel,
    pub probability: f64,
    pub raw_score: f64,
    pub components: Vec<ScoreComponent>,
}

use std::fmt;

use serde::{Deserialize, Serialize};

/// Customer attributes consumed by the scorer.
///
/// Every field is optional so the scorer can be embedded without a validation
/// layer in front of it. A missing value contributes nothing to the raw score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerFeatures {
    pub contract_months: Option<u32>,
    pub payment_delays: Option<u32>,
    pub monthly_usage: Option<f64>,
    pub plan_type: Option<String>,
}

impl CustomerFeatures {
    pub fn new(
        contract_months: u32,
        payment_delays: u32,
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

/// Service tier recognised by the plan rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanType {
    Basic,
    Standard,
    Premium,
    Other,
}

impl PlanType {
    /// Matches trimmed, case-folded tags; anything unrecognised is `Other`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "BASIC" => Self::Basic,
            "STANDARD" => Self::Standard,
            "PREMIUM" => Self::Premium,
            _ => Self::Other,
        }
    }

    pub const fn weight(self) -> f64 {
        match self {
            PlanType::Basic => 0.15,
            PlanType::Standard => 0.05,
            PlanType::Premium => -0.05,
            PlanType::Other => 0.0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            PlanType::Basic => "BASIC",
            PlanType::Standard => "STANDARD",
            PlanType::Premium => "PREMIUM",
            PlanType::Other => "OTHER",
        }
    }
}

/// Features that contribute to the raw score, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChurnFactor {
    ContractMonths,
    PaymentDelays,
    MonthlyUsage,
    PlanType,
}

/// Categorical outcome of a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PredictionLabel {
    #[serde(rename = "Churn")]
    Churn,
    #[serde(rename = "No Churn")]
    NoChurn,
}

impl PredictionLabel {
    pub fn from_probability(probability: f64) -> Self {
        if probability >= super::CHURN_THRESHOLD {
            PredictionLabel::Churn
        } else {
            PredictionLabel::NoChurn
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            PredictionLabel::Churn => "Churn",
            PredictionLabel::NoChurn => "No Churn",
        }
    }

    pub const fn is_churn(self) -> bool {
        matches!(self, PredictionLabel::Churn)
    }
}

impl fmt::Display for PredictionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

//! Deterministic churn-risk scoring.
//!
//! Four independent rules each turn one customer attribute into a weight. The
//! weights are summed into a raw score, which is rescaled from its theoretical
//! range onto `[0, 1]` and labelled against [`CHURN_THRESHOLD`].

pub mod domain;
mod rules;

pub use domain::{ChurnFactor, CustomerFeatures, PlanType, PredictionLabel};
pub use rules::{
    contract_months_score, monthly_usage_score, payment_delays_score, plan_type_score,
};

use serde::{Deserialize, Serialize};

/// Lowest raw score the rule table can produce.
pub const MIN_RAW_SCORE: f64 = -0.25;
/// Highest raw score the rule table can produce.
pub const MAX_RAW_SCORE: f64 = 0.95;
/// Probabilities at or above this value are labelled churn.
pub const CHURN_THRESHOLD: f64 = 0.5;

const PROBABILITY_SCALE: f64 = 10_000.0;

/// Contribution of a single feature, kept for audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ChurnFactor,
    pub score: f64,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub label: PredictionLabel,
    pub probability: f64,
}

/// Prediction together with the raw score and per-feature trail that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub raw_score: f64,
    pub components: Vec<ScoreComponent>,
    pub result: ScoreResult,
}

/// Stateless scorer. Safe to share across threads and to copy freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChurnScorer;

impl ChurnScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn compute_raw_score(&self, features: &CustomerFeatures) -> f64 {
        let (_, raw_score) = rules::score_features(features);
        raw_score
    }

    /// Maps a raw score onto a probability with at most four decimal places.
    /// A NaN score maps to 0.0.
    pub fn normalize(&self, raw_score: f64) -> f64 {
        if raw_score.is_nan() {
            return 0.0;
        }
        let clamped = raw_score.clamp(MIN_RAW_SCORE, MAX_RAW_SCORE);
        let probability = (clamped - MIN_RAW_SCORE) / (MAX_RAW_SCORE - MIN_RAW_SCORE);
        let probability = probability.clamp(0.0, 1.0);
        (probability * PROBABILITY_SCALE).round() / PROBABILITY_SCALE
    }

    pub fn predict(&self, features: &CustomerFeatures) -> ScoreResult {
        let probability = self.normalize(self.compute_raw_score(features));
        ScoreResult {
            label: PredictionLabel::from_probability(probability),
            probability,
        }
    }

    pub fn explain(&self, features: &CustomerFeatures) -> ScoreBreakdown {
        let (components, raw_score) = rules::score_features(features);
        let probability = self.normalize(raw_score);

        ScoreBreakdown {
            raw_score,
            components,
            result: ScoreResult {
                label: PredictionLabel::from_probability(probability),
                probability,
            },
        }
    }
}

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use super::domain::{CustomerInput, ExplainedPrediction, PredictionId, PredictionResponse};
use super::validation::{validate, ValidationError};
use crate::scoring::ChurnScorer;

/// Validates requests, runs the scorer and assigns response identifiers.
///
/// The identifier sequence belongs to the service instance, so concurrent
/// handlers sharing one service through an `Arc` never hand out duplicates.
#[derive(Debug)]
pub struct PredictionService {
    scorer: ChurnScorer,
    sequence: AtomicU64,
}

impl Default for PredictionService {
    fn default() -> Self {
        Self::new(ChurnScorer::new())
    }
}

impl PredictionService {
    pub fn new(scorer: ChurnScorer) -> Self {
        Self::starting_at(scorer, 1)
    }

    pub fn starting_at(scorer: ChurnScorer, first_id: u64) -> Self {
        Self {
            scorer,
            sequence: AtomicU64::new(first_id),
        }
    }

    pub fn scorer(&self) -> ChurnScorer {
        self.scorer
    }

    /// Score a request, returning the labelled probability with a fresh id.
    pub fn predict(&self, input: &CustomerInput) -> Result<PredictionResponse, ValidationError> {
        let features = validate(input)?;
        let result = self.scorer.predict(&features);
        let id = self.next_id();

        debug!(
            %id,
            prediction = %result.label,
            probability = result.probability,
            "scored customer"
        );

        Ok(PredictionResponse {
            id,
            prediction: result.label,
            probability: result.probability,
        })
    }

    /// Same as [`Self::predict`] but keeps the raw score and factor breakdown.
    pub fn explain(&self, input: &CustomerInput) -> Result<ExplainedPrediction, ValidationError> {
        let features = validate(input)?;
        let breakdown = self.scorer.explain(&features);
        let id = self.next_id();

        debug!(
            %id,
            prediction = %breakdown.result.label,
            raw_score = breakdown.raw_score,
            "explained customer score"
        );

        Ok(ExplainedPrediction {
            id,
            prediction: breakdown.result.label,
            probability: breakdown.result.probability,
            raw_score: breakdown.raw_score,
            components: breakdown.components,
        })
    }

    fn next_id(&self) -> PredictionId {
        PredictionId(self.sequence.fetch_add(1, Ordering::Relaxed))
    }
}

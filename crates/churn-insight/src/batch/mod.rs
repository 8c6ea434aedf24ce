//! Scores whole customer datasets exported as CSV.

mod parser;

use std::io::Read;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::prediction::{validate, FieldViolation};
use crate::scoring::{ChurnScorer, PredictionLabel};

#[derive(Debug, thiserror::Error)]
pub enum BatchImportError {
    #[error("failed to read customer dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid customer dataset CSV: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCustomer {
    pub row: usize,
    pub customer_id: Option<String>,
    pub prediction: PredictionLabel,
    pub probability: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_churn: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedRow {
    pub row: usize,
    pub customer_id: Option<String>,
    pub violations: Vec<FieldViolation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub total_rows: usize,
    pub scored: usize,
    pub rejected: usize,
    pub predicted_churn: usize,
    pub mean_probability: Option<f64>,
    /// Scored rows that carried an observed churn flag.
    pub labelled: usize,
    /// Share of labelled rows where the prediction matched the observed flag.
    pub agreement_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub scored: Vec<ScoredCustomer>,
    pub rejected: Vec<RejectedRow>,
    pub summary: BatchSummary,
}

pub struct BatchScorer;

impl BatchScorer {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<BatchReport, BatchImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<BatchReport, BatchImportError> {
        let records = parser::parse_records(reader)?;
        let scorer = ChurnScorer::new();

        let mut scored = Vec::new();
        let mut rejected = Vec::new();

        for record in records {
            let outcome = validate(&record.input).map_err(|error| error.violations);
            let outcome = if record.cell_errors.is_empty() {
                outcome
            } else {
                Err(with_cell_errors(
                    record.cell_errors,
                    outcome.err().unwrap_or_default(),
                ))
            };

            match outcome {
                Ok(features) => {
                    let result = scorer.predict(&features);
                    scored.push(ScoredCustomer {
                        row: record.row,
                        customer_id: record.customer_id,
                        prediction: result.label,
                        probability: result.probability,
                        observed_churn: record.observed_churn,
                    });
                }
                Err(violations) => rejected.push(RejectedRow {
                    row: record.row,
                    customer_id: record.customer_id,
                    violations,
                }),
            }
        }

        let summary = summarize(&scored, rejected.len());
        info!(
            total = summary.total_rows,
            scored = summary.scored,
            rejected = summary.rejected,
            predicted_churn = summary.predicted_churn,
            "scored customer dataset"
        );

        Ok(BatchReport {
            scored,
            rejected,
            summary,
        })
    }
}

/// A cell that failed to parse is left empty, so validation reports it as null.
/// Swap those entries for the parse message and keep the rest in field order.
fn with_cell_errors(
    cell_errors: Vec<FieldViolation>,
    violations: Vec<FieldViolation>,
) -> Vec<FieldViolation> {
    let mut merged: Vec<FieldViolation> = violations
        .into_iter()
        .map(|violation| {
            cell_errors
                .iter()
                .find(|cell| cell.field == violation.field)
                .cloned()
                .unwrap_or(violation)
        })
        .collect();

    for cell in cell_errors {
        if !merged.iter().any(|violation| violation.field == cell.field) {
            merged.push(cell);
        }
    }
    merged
}

fn summarize(scored: &[ScoredCustomer], rejected: usize) -> BatchSummary {
    let predicted_churn = scored
        .iter()
        .filter(|customer| customer.prediction.is_churn())
        .count();

    let mean_probability = if scored.is_empty() {
        None
    } else {
        let total: f64 = scored.iter().map(|customer| customer.probability).sum();
        Some(total / scored.len() as f64)
    };

    let labelled: Vec<_> = scored
        .iter()
        .filter_map(|customer| {
            customer
                .observed_churn
                .map(|observed| observed == customer.prediction.is_churn())
        })
        .collect();
    let agreement_rate = if labelled.is_empty() {
        None
    } else {
        let agreed = labelled.iter().filter(|agreed| **agreed).count();
        Some(agreed as f64 / labelled.len() as f64)
    };

    BatchSummary {
        total_rows: scored.len() + rejected,
        scored: scored.len(),
        rejected,
        predicted_churn,
        mean_probability,
        labelled: labelled.len(),
        agreement_rate,
    }
}

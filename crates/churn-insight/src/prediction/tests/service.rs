use std::collections::HashSet;
use std::sync::Arc;

use super::common::*;
use crate::prediction::{CustomerInput, PredictionId, PredictionService};
use crate::scoring::{ChurnFactor, ChurnScorer, PredictionLabel};

#[test]
fn predict_assigns_sequential_ids() {
    let service = PredictionService::default();

    let first = service.predict(&basic_risky_input()).expect("valid input");
    let second = service.predict(&premium_loyal_input()).expect("valid input");

    assert_eq!(first.id, PredictionId(1));
    assert_eq!(second.id, PredictionId(2));
    assert_eq!(first.prediction, PredictionLabel::Churn);
    assert_eq!(first.probability, 0.75);
    assert_eq!(second.prediction, PredictionLabel::NoChurn);
    assert_eq!(second.probability, 0.25);
}

#[test]
fn rejected_input_does_not_consume_an_id() {
    let service = PredictionService::starting_at(ChurnScorer::new(), 10);

    assert!(service.predict(&CustomerInput::default()).is_err());
    let response = service.predict(&basic_risky_input()).expect("valid input");

    assert_eq!(response.id, PredictionId(10));
}

#[test]
fn explain_reports_components() {
    let service = PredictionService::default();

    let explained = service.explain(&basic_risky_input()).expect("valid input");

    assert_eq!(explained.prediction, PredictionLabel::Churn);
    assert!((explained.raw_score - 0.65).abs() < 1e-9);
    let delays = explained
        .components
        .iter()
        .find(|component| component.factor == ChurnFactor::PaymentDelays)
        .expect("payment delay component present");
    assert_eq!(delays.score, 0.30);
    assert_eq!(delays.notes, "5 late payment(s)");
}

#[test]
fn concurrent_predictions_receive_unique_ids() {
    let service = build_service();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = Arc::clone(&service);
            std::thread::spawn(move || {
                (0..50)
                    .map(|_| service.predict(&basic_risky_input()).expect("valid").id)
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut seen = HashSet::new();
    for handle in handles {
        for id in handle.join().expect("worker finished") {
            assert!(seen.insert(id), "duplicate id {id}");
        }
    }
    assert_eq!(seen.len(), 400);
}

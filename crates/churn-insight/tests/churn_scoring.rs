use churn_insight::scoring::{
    contract_months_score, monthly_usage_score, payment_delays_score, ChurnScorer,
    CustomerFeatures, PredictionLabel,
};

const PLANS: [&str; 5] = ["BASIC", "STANDARD", "PREMIUM", "legacy", " basic "];
const CONTRACTS: [u32; 9] = [0, 2, 3, 5, 6, 11, 12, 24, 120];
const DELAYS: [u32; 7] = [0, 1, 2, 3, 4, 6, 30];
const USAGE: [f64; 9] = [0.0, 4.99, 5.0, 9.99, 10.0, 29.99, 30.0, 150.0, 1e9];

fn every_customer() -> impl Iterator<Item = CustomerFeatures> {
    CONTRACTS.into_iter().flat_map(|contract| {
        DELAYS.into_iter().flat_map(move |delays| {
            USAGE.into_iter().flat_map(move |usage| {
                PLANS
                    .into_iter()
                    .map(move |plan| CustomerFeatures::new(contract, delays, usage, plan))
            })
        })
    })
}

#[test]
fn probabilities_stay_in_unit_interval_with_four_decimals() {
    let scorer = ChurnScorer::new();

    for features in every_customer() {
        let result = scorer.predict(&features);
        assert!(
            (0.0..=1.0).contains(&result.probability),
            "{features:?} -> {}",
            result.probability
        );
        let scaled = result.probability * 10_000.0;
        assert!(
            (scaled - scaled.round()).abs() < 1e-6,
            "{} has more than four decimals",
            result.probability
        );
    }
}

#[test]
fn label_follows_threshold() {
    let scorer = ChurnScorer::new();

    for features in every_customer() {
        let result = scorer.predict(&features);
        let expected = if result.probability >= 0.5 {
            PredictionLabel::Churn
        } else {
            PredictionLabel::NoChurn
        };
        assert_eq!(result.label, expected);
    }
}

#[test]
fn predictions_are_deterministic() {
    let scorer = ChurnScorer::new();
    let features = CustomerFeatures::new(7, 2, 12.5, "Standard");

    let first = scorer.predict(&features);
    for _ in 0..100 {
        assert_eq!(scorer.predict(&features), first);
    }
    assert_eq!(ChurnScorer::default().predict(&features), first);
}

#[test]
fn payment_delays_never_lower_the_score() {
    let scores: Vec<f64> = DELAYS
        .iter()
        .map(|delays| payment_delays_score(Some(*delays)))
        .collect();

    assert!(scores.windows(2).all(|pair| pair[0] <= pair[1]), "{scores:?}");
}

#[test]
fn longer_contracts_never_raise_the_score() {
    let scores: Vec<f64> = CONTRACTS
        .iter()
        .map(|months| contract_months_score(Some(*months)))
        .collect();

    assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]), "{scores:?}");
}

#[test]
fn heavier_usage_never_raises_the_score() {
    let scores: Vec<f64> = USAGE
        .iter()
        .map(|usage| monthly_usage_score(Some(*usage)))
        .collect();

    assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]), "{scores:?}");
}

#[test]
fn raw_score_is_monotonic_with_other_features_fixed() {
    let scorer = ChurnScorer::new();

    for plan in PLANS {
        let raw: Vec<f64> = DELAYS
            .iter()
            .map(|delays| scorer.compute_raw_score(&CustomerFeatures::new(8, *delays, 12.0, plan)))
            .collect();
        assert!(raw.windows(2).all(|pair| pair[0] <= pair[1] + 1e-12));

        let raw: Vec<f64> = CONTRACTS
            .iter()
            .map(|months| scorer.compute_raw_score(&CustomerFeatures::new(*months, 2, 12.0, plan)))
            .collect();
        assert!(raw.windows(2).all(|pair| pair[0] + 1e-12 >= pair[1]));
    }
}

#[test]
fn plan_spelling_variants_score_alike() {
    let scorer = ChurnScorer::new();
    let canonical = scorer.predict(&CustomerFeatures::new(6, 1, 20.0, "BASIC"));

    for plan in ["basic", " BASIC ", "Basic"] {
        assert_eq!(
            scorer.predict(&CustomerFeatures::new(6, 1, 20.0, plan)),
            canonical
        );
    }
}

#[test]
fn documented_scenarios() {
    let scorer = ChurnScorer::new();
    let cases = [
        (CustomerFeatures::new(1, 0, 50.0, "PREMIUM"), 0.25, PredictionLabel::NoChurn),
        (CustomerFeatures::new(24, 5, 2.0, "BASIC"), 0.75, PredictionLabel::Churn),
        (CustomerFeatures::new(12, 1, 15.0, "unknown"), 0.25, PredictionLabel::NoChurn),
    ];

    for (features, probability, label) in cases {
        let result = scorer.predict(&features);
        assert_eq!(result.probability, probability, "{features:?}");
        assert_eq!(result.label, label, "{features:?}");
    }

    assert_eq!(scorer.normalize(0.96), 1.0);
    assert_eq!(scorer.normalize(-0.26), 0.0);
}

#[test]
fn extreme_profiles_reach_the_range_ends() {
    let scorer = ChurnScorer::new();

    let riskiest = scorer.explain(&CustomerFeatures::new(0, 9, 0.0, "basic"));
    let safest = scorer.explain(&CustomerFeatures::new(36, 0, 300.0, "premium"));

    assert!((riskiest.raw_score - 0.95).abs() < 1e-9);
    assert_eq!(riskiest.result.probability, 1.0);
    assert!((safest.raw_score + 0.25).abs() < 1e-9);
    assert_eq!(safest.result.probability, 0.0);
}

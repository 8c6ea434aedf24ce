use super::domain::{ChurnFactor, CustomerFeatures, PlanType};
use super::ScoreComponent;

/// Newer customers churn more often.
pub fn contract_months_score(contract_months: Option<u32>) -> f64 {
    match contract_months {
        None => 0.0,
        Some(months) if months < 3 => 0.25,
        Some(months) if months < 6 => 0.15,
        Some(months) if months < 12 => 0.05,
        Some(_) => -0.05,
    }
}

pub fn payment_delays_score(payment_delays: Option<u32>) -> f64 {
    match payment_delays {
        None => 0.0,
        Some(0) => -0.05,
        Some(1) => 0.10,
        Some(2..=3) => 0.20,
        Some(_) => 0.30,
    }
}

/// Low usage raises the risk, heavy usage lowers it.
pub fn monthly_usage_score(monthly_usage: Option<f64>) -> f64 {
    match monthly_usage {
        None => 0.0,
        Some(usage) if usage < 5.0 => 0.25,
        Some(usage) if usage < 10.0 => 0.10,
        Some(usage) if usage < 30.0 => 0.0,
        Some(_) => -0.10,
    }
}

pub fn plan_type_score(plan_type: Option<&str>) -> f64 {
    plan_type.map(|raw| PlanType::parse(raw).weight()).unwrap_or(0.0)
}

/// Applies every rule in factor order and returns the audit trail with the raw sum.
pub(crate) fn score_features(features: &CustomerFeatures) -> (Vec<ScoreComponent>, f64) {
    let mut components = Vec::with_capacity(4);
    let mut raw_score = 0.0;

    let score = contract_months_score(features.contract_months);
    components.push(ScoreComponent {
        factor: ChurnFactor::ContractMonths,
        score,
        notes: match features.contract_months {
            Some(months) => format!("contract of {months} month(s)"),
            None => "contract length missing".to_string(),
        },
    });
    raw_score += score;

    let score = payment_delays_score(features.payment_delays);
    components.push(ScoreComponent {
        factor: ChurnFactor::PaymentDelays,
        score,
        notes: match features.payment_delays {
            Some(0) => "no late payments".to_string(),
            Some(delays) => format!("{delays} late payment(s)"),
            None => "payment history missing".to_string(),
        },
    });
    raw_score += score;

    let score = monthly_usage_score(features.monthly_usage);
    components.push(ScoreComponent {
        factor: ChurnFactor::MonthlyUsage,
        score,
        notes: match features.monthly_usage {
            Some(usage) => format!("monthly usage {usage:.2}"),
            None => "monthly usage missing".to_string(),
        },
    });
    raw_score += score;

    let score = plan_type_score(features.plan_type.as_deref());
    components.push(ScoreComponent {
        factor: ChurnFactor::PlanType,
        score,
        notes: match features.plan_type.as_deref().map(PlanType::parse) {
            Some(PlanType::Other) => "unrecognised plan scored as neutral".to_string(),
            Some(plan) => format!("{} plan", plan.label()),
            None => "plan type missing".to_string(),
        },
    });
    raw_score += score;

    (components, raw_score)
}

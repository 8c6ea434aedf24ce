use serde::Serialize;

use super::domain::CustomerInput;
use crate::scoring::CustomerFeatures;

/// A single rejected field with the message returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

impl FieldViolation {
    pub(crate) fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Raised when a request fails boundary validation. Lists every violation found.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid customer input: {}", summarize(.violations))]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.violations.iter().map(|violation| violation.field)
    }
}

fn summarize(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|violation| violation.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Checks the request against the boundary rules and produces scorer input.
pub fn validate(input: &CustomerInput) -> Result<CustomerFeatures, ValidationError> {
    let mut violations = Vec::new();

    let contract_months =
        non_negative_count("contractMonths", input.contract_months, &mut violations);
    let payment_delays =
        non_negative_count("paymentDelays", input.payment_delays, &mut violations);

    let monthly_usage = match input.monthly_usage {
        None => {
            violations.push(FieldViolation::new(
                "monthlyUsage",
                "monthlyUsage cannot be null",
            ));
            None
        }
        Some(usage) if !usage.is_finite() || usage < 0.0 => {
            violations.push(FieldViolation::new(
                "monthlyUsage",
                "monthlyUsage must be zero or positive",
            ));
            None
        }
        Some(usage) => Some(usage),
    };

    let plan_type = match input.plan_type.as_deref() {
        Some(plan) if !plan.trim().is_empty() => Some(plan.to_string()),
        _ => {
            violations.push(FieldViolation::new("planType", "planType cannot be blank"));
            None
        }
    };

    if !violations.is_empty() {
        return Err(ValidationError { violations });
    }

    Ok(CustomerFeatures {
        contract_months,
        payment_delays,
        monthly_usage,
        plan_type,
    })
}

fn non_negative_count(
    field: &'static str,
    value: Option<i64>,
    violations: &mut Vec<FieldViolation>,
) -> Option<u32> {
    match value {
        None => {
            violations.push(FieldViolation::new(field, format!("{field} cannot be null")));
            None
        }
        Some(count) if count < 0 => {
            violations.push(FieldViolation::new(
                field,
                format!("{field} cannot be negative"),
            ));
            None
        }
        Some(count) => match u32::try_from(count) {
            Ok(count) => Some(count),
            Err(_) => {
                violations.push(FieldViolation::new(field, format!("{field} is too large")));
                None
            }
        },
    }
}

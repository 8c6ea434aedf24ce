use churn_insight::batch::{BatchReport, BatchScorer};
use churn_insight::error::AppError;
use churn_insight::prediction::{CustomerInput, ExplainedPrediction, PredictionService};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct PredictArgs {
    /// Months since the contract started
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) contract_months: i64,
    /// Number of late payments on record
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) payment_delays: i64,
    /// Average monthly usage
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) monthly_usage: f64,
    /// Plan tier (BASIC, STANDARD, PREMIUM; anything else is neutral)
    #[arg(long)]
    pub(crate) plan_type: String,
    /// Print the per-factor breakdown behind the probability
    #[arg(long)]
    pub(crate) explain: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV export with contract_months, payment_delays, monthly_usage and plan_type columns
    pub(crate) csv: PathBuf,
    /// List every scored row, not just the summary
    #[arg(long)]
    pub(crate) list: bool,
    /// Emit the full report as JSON instead of text
    #[arg(long, conflicts_with = "list")]
    pub(crate) json: bool,
}

pub(crate) fn run_predict(args: PredictArgs) -> Result<(), AppError> {
    let PredictArgs {
        contract_months,
        payment_delays,
        monthly_usage,
        plan_type,
        explain,
    } = args;

    let input = CustomerInput::new(contract_months, payment_delays, monthly_usage, plan_type);
    let service = PredictionService::default();

    if explain {
        let explained = service.explain(&input)?;
        render_explanation(&explained);
    } else {
        let response = service.predict(&input)?;
        println!(
            "{} (probability {:.4})",
            response.prediction, response.probability
        );
    }

    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let report = BatchScorer::from_path(&args.csv)?;

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Report payload unavailable: {err}"),
        }
        return Ok(());
    }

    render_batch_report(&args.csv, &report, args.list);
    Ok(())
}

fn render_explanation(explained: &ExplainedPrediction) {
    println!(
        "{} (probability {:.4}, raw score {:.2})",
        explained.prediction, explained.probability, explained.raw_score
    );
    println!("Score components");
    for component in &explained.components {
        println!(
            "- {:?}: {:+.2} ({})",
            component.factor, component.score, component.notes
        );
    }
}

fn render_batch_report(source: &std::path::Path, report: &BatchReport, list: bool) {
    let summary = &report.summary;

    println!("Churn scoring report for {}", source.display());
    println!(
        "- {} rows | {} scored | {} rejected",
        summary.total_rows, summary.scored, summary.rejected
    );
    if summary.scored > 0 {
        println!(
            "- {} predicted to churn ({:.0}% of scored)",
            summary.predicted_churn,
            summary.predicted_churn as f64 / summary.scored as f64 * 100.0
        );
    }
    if let Some(mean) = summary.mean_probability {
        println!("- Mean churn probability {:.4}", mean);
    }
    match summary.agreement_rate {
        Some(rate) => println!(
            "- Agreement with observed churn: {:.1}% over {} labelled rows",
            rate * 100.0,
            summary.labelled
        ),
        None => println!("- Agreement with observed churn: no labelled rows"),
    }

    if report.rejected.is_empty() {
        println!("\nRejected rows: none");
    } else {
        println!("\nRejected rows");
        for rejected in &report.rejected {
            let messages: Vec<_> = rejected
                .violations
                .iter()
                .map(|violation| violation.message.as_str())
                .collect();
            println!("- row {}: {}", rejected.row, messages.join("; "));
        }
    }

    if list {
        println!("\nScored rows");
        for customer in &report.scored {
            let id = customer.customer_id.as_deref().unwrap_or("-");
            let observed = match customer.observed_churn {
                Some(true) => " | observed churn",
                Some(false) => " | observed retained",
                None => "",
            };
            println!(
                "- row {} | id {} | {} | {:.4}{}",
                customer.row, id, customer.prediction, customer.probability, observed
            );
        }
    }
}

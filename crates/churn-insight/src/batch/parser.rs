use serde::{Deserialize, Deserializer};
use std::io::Read;

use crate::prediction::{CustomerInput, FieldViolation};

/// One dataset row, reduced to the columns the scorer cares about.
#[derive(Debug)]
pub(crate) struct DatasetRecord {
    pub(crate) row: usize,
    pub(crate) customer_id: Option<String>,
    pub(crate) input: CustomerInput,
    pub(crate) observed_churn: Option<bool>,
    /// Cells that held text of the wrong type. The field is left empty in `input`.
    pub(crate) cell_errors: Vec<FieldViolation>,
}

/// Reads every row of the dataset. Only structural problems (bad UTF-8, ragged
/// rows, unreadable input) fail here; a bad cell is recorded on its row.
pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<DatasetRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (index, record) in csv_reader.deserialize::<DatasetRow>().enumerate() {
        let row = record?;
        let mut cell_errors = Vec::new();

        let contract_months = integer_cell("contractMonths", row.contract_months, &mut cell_errors);
        let payment_delays = integer_cell("paymentDelays", row.payment_delays, &mut cell_errors);
        let monthly_usage = number_cell("monthlyUsage", row.monthly_usage, &mut cell_errors);
        let observed_churn = churn_flag(row.churn, &mut cell_errors);

        records.push(DatasetRecord {
            row: index + 1,
            customer_id: row.id,
            observed_churn,
            input: CustomerInput {
                contract_months,
                payment_delays,
                monthly_usage,
                plan_type: row.plan_type,
            },
            cell_errors,
        });
    }

    Ok(records)
}

/// Columns follow the generated churn dataset; anything else in the file is ignored.
/// Cells are kept as text so one dirty value rejects its row, not the file.
#[derive(Debug, Deserialize)]
struct DatasetRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    contract_months: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    payment_delays: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    monthly_usage: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    plan_type: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    churn: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

// Spreadsheet and dataframe exports write whole numbers as `24.0` once a
// column has gaps, so integral decimals are accepted.
fn parse_whole_number(cell: &str) -> Option<i64> {
    if let Ok(value) = cell.parse::<i64>() {
        return Some(value);
    }
    match cell.parse::<f64>() {
        Ok(value)
            if value.is_finite() && value.fract() == 0.0 && value.abs() <= i64::MAX as f64 =>
        {
            Some(value as i64)
        }
        _ => None,
    }
}

fn integer_cell(
    field: &'static str,
    cell: Option<String>,
    errors: &mut Vec<FieldViolation>,
) -> Option<i64> {
    let cell = cell?;
    let value = parse_whole_number(&cell);
    if value.is_none() {
        errors.push(FieldViolation::new(field, format!("{field} must be an integer")));
    }
    value
}

fn number_cell(
    field: &'static str,
    cell: Option<String>,
    errors: &mut Vec<FieldViolation>,
) -> Option<f64> {
    let cell = cell?;
    match cell.parse::<f64>() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.push(FieldViolation::new(field, format!("{field} must be a number")));
            None
        }
    }
}

fn churn_flag(cell: Option<String>, errors: &mut Vec<FieldViolation>) -> Option<bool> {
    let cell = cell?;
    match parse_whole_number(&cell) {
        Some(0) => Some(false),
        Some(1) => Some(true),
        _ => {
            errors.push(FieldViolation::new("churn", "churn must be 0 or 1"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extra_columns_are_ignored() {
        let csv = "id,name,contract_months,payment_delays,monthly_usage,plan_type,device_type,churn\n\
7,Ana,3,1,42.5,BASIC,MOBILE,1\n";

        let records = parse_records(csv.as_bytes()).expect("parses");

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.row, 1);
        assert_eq!(record.customer_id.as_deref(), Some("7"));
        assert_eq!(record.input, CustomerInput::new(3, 1, 42.5, "BASIC"));
        assert_eq!(record.observed_churn, Some(true));
    }

    #[test]
    fn empty_cells_become_missing_values() {
        let csv = "contract_months,payment_delays,monthly_usage,plan_type\n,2,,  \n";

        let records = parse_records(csv.as_bytes()).expect("parses");

        let input = &records[0].input;
        assert_eq!(input.contract_months, None);
        assert_eq!(input.payment_delays, Some(2));
        assert_eq!(input.monthly_usage, None);
        assert_eq!(input.plan_type, None);
        assert_eq!(records[0].customer_id, None);
        assert_eq!(records[0].observed_churn, None);
    }

    #[test]
    fn integral_decimals_are_read_as_counts() {
        let csv = "contract_months,payment_delays,monthly_usage,plan_type,churn\n\
24.0,5.0,2,BASIC,1.0\n";

        let records = parse_records(csv.as_bytes()).expect("parses");

        assert!(records[0].cell_errors.is_empty());
        assert_eq!(records[0].input, CustomerInput::new(24, 5, 2.0, "BASIC"));
        assert_eq!(records[0].observed_churn, Some(true));
    }

    #[test]
    fn bad_cells_are_recorded_on_their_row() {
        let csv = "contract_months,payment_delays,monthly_usage,plan_type,churn\n\
2.5,many,lots,BASIC,yes\n\
3,1,12.0,STANDARD,0\n";

        let records = parse_records(csv.as_bytes()).expect("bad cells do not fail the file");

        assert_eq!(records.len(), 2);
        let messages: Vec<_> = records[0]
            .cell_errors
            .iter()
            .map(|violation| violation.message.as_str())
            .collect();
        assert_eq!(
            messages,
            vec![
                "contractMonths must be an integer",
                "paymentDelays must be an integer",
                "monthlyUsage must be a number",
                "churn must be 0 or 1",
            ]
        );
        assert_eq!(records[0].input.contract_months, None);
        assert_eq!(records[0].observed_churn, None);
        assert!(records[1].cell_errors.is_empty());
    }
}

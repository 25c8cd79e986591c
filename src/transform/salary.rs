use serde_json::Value;

use crate::models::offer::Record;
use crate::models::table::Table;
use crate::transform::literal::parse_literal;

pub const SALARY_MIN: &str = "salaryMin";
pub const SALARY_MAX: &str = "salaryMax";
pub const SALARY_PERIOD: &str = "salaryPeriod";

/// Extract `field` from a map-like literal such as `{'id': 3, 'value': '1.200 €'}`.
/// Missing fields, unparsable text and empty strings all yield `None`.
pub fn extract_field(structured_text: &str, field: &str) -> Option<Value> {
    let Value::Object(mut map) = parse_literal(structured_text)? else {
        return None;
    };
    match map.remove(field)? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        value => Some(value),
    }
}

/// Like [`extract_field`] for the conventional `value` key, as text.
pub fn extract_value(structured_text: &str) -> Option<String> {
    match extract_field(structured_text, "value")? {
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// Turn a salary descriptor like `{"value": "1.234,50 €"}` into `1234.5`.
pub fn normalize_salary(structured_text: &str) -> Option<f64> {
    match extract_field(structured_text, "value")? {
        Value::Number(n) => n.as_f64(),
        Value::String(raw) => parse_amount(&raw),
        _ => None,
    }
}

/// Spanish-formatted amount: `.` groups thousands, `,` is the decimal mark.
fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '.' | '€' | '$' | '£'))
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    cleaned.trim().parse().ok()
}

/// Pay period labels used by InfoJobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalaryPeriod {
    Monthly,
    Daily,
    Hourly,
    Other,
}

impl SalaryPeriod {
    pub fn from_label(label: &str) -> Self {
        match label {
            "Bruto/mes" => SalaryPeriod::Monthly,
            "Bruto/día" => SalaryPeriod::Daily,
            "Bruto/hora" => SalaryPeriod::Hourly,
            _ => SalaryPeriod::Other,
        }
    }

    /// Factor converting one period's pay to a yearly figure.
    pub fn multiplier(self) -> f64 {
        match self {
            SalaryPeriod::Monthly => 12.0,
            SalaryPeriod::Daily => 225.0,
            SalaryPeriod::Hourly => 1800.0,
            SalaryPeriod::Other => 1.0,
        }
    }
}

/// Scale `salaryMin`/`salaryMax` to a yearly basis according to `salaryPeriod`.
/// Non-numeric or missing bounds are left untouched.
pub fn annualize_salary_range(mut record: Record) -> Record {
    let period = record
        .get(SALARY_PERIOD)
        .and_then(Value::as_str)
        .map(|label| extract_value(label).unwrap_or_else(|| label.to_string()))
        .map(|label| SalaryPeriod::from_label(&label))
        .unwrap_or(SalaryPeriod::Other);
    let mult = period.multiplier();

    for key in [SALARY_MIN, SALARY_MAX] {
        if let Some(amount) = record.get(key).and_then(Value::as_f64)
            && let Some(scaled) = serde_json::Number::from_f64(amount * mult)
        {
            record.insert(key.to_string(), Value::Number(scaled));
        }
    }
    record
}

/// Normalize both salary bounds, drop rows where neither is known, then
/// annualize what remains.
pub fn prepare_salaries(table: Table) -> Table {
    let columns = table.columns;
    let rows = table
        .rows
        .into_iter()
        .filter_map(|mut row| {
            for key in [SALARY_MIN, SALARY_MAX] {
                let amount = row
                    .get(key)
                    .and_then(|v| match v {
                        Value::String(s) => normalize_salary(s)
                            .or_else(|| s.trim().parse::<f64>().ok())
                            .or_else(|| parse_amount(s)),
                        Value::Number(n) => n.as_f64(),
                        _ => None,
                    })
                    .and_then(serde_json::Number::from_f64);
                match amount {
                    Some(n) => row.insert(key.to_string(), Value::Number(n)),
                    None => row.shift_remove(key),
                };
            }
            (row.contains_key(SALARY_MIN) || row.contains_key(SALARY_MAX)).then_some(row)
        })
        .map(annualize_salary_range)
        .collect();
    Table { columns, rows }
}

/// Display label for a grouping cell: the `value` of a structured literal,
/// otherwise the raw text.
pub fn group_label(cell: &Value) -> Option<String> {
    match cell {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(extract_value(s).unwrap_or_else(|| s.clone())),
        Value::Object(map) => map.get("value").and_then(group_label),
        other => Some(other.to_string()),
    }
}

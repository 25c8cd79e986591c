// Salary charts rendered to SVG with plotters. Both charts expect a table
// that already went through `prepare_salaries`, so bounds are yearly numbers.

pub mod heatmap;
pub mod range;

use std::collections::HashMap;

use serde_json::Value;

use crate::error::AppError;
use crate::models::table::Table;
use crate::transform::salary::{SALARY_MAX, SALARY_MIN, group_label};

pub use heatmap::plot_salary_heatmap;
pub use range::plot_salary_range_by_group;

pub const DEFAULT_RANGE_GROUP: &str = "category";
pub const DEFAULT_HEATMAP_GROUP: &str = "Province";
pub const DEFAULT_HEATMAP_TITLE: &str = "Salary Heatmap";

const CHART_SIZE: (u32, u32) = (1600, 900);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    Min,
    Max,
}

impl Bound {
    fn label(self) -> &'static str {
        match self {
            Bound::Min => "Salary Min",
            Bound::Max => "Salary Max",
        }
    }
}

/// Salary observations for one distinct value of the grouping column.
#[derive(Debug, Clone, PartialEq)]
struct SalaryGroup {
    label: String,
    mins: Vec<f64>,
    maxs: Vec<f64>,
}

impl SalaryGroup {
    fn values(&self, bound: Bound) -> &[f64] {
        match bound {
            Bound::Min => &self.mins,
            Bound::Max => &self.maxs,
        }
    }

    fn mean(&self, bound: Bound) -> Option<f64> {
        let values = self.values(bound);
        (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Bucket numeric salary bounds by the group column, sorted by label.
/// Rows without a group label are ignored.
fn group_salaries(table: &Table, group_by: &str) -> Result<Vec<SalaryGroup>, AppError> {
    let column = table.column(group_by)?;
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<SalaryGroup> = Vec::new();

    for row in &table.rows {
        let Some(label) = row.get(column).and_then(group_label) else {
            continue;
        };
        let slot = *index.entry(label.clone()).or_insert_with(|| {
            groups.push(SalaryGroup {
                label,
                mins: Vec::new(),
                maxs: Vec::new(),
            });
            groups.len() - 1
        });
        if let Some(v) = row.get(SALARY_MIN).and_then(Value::as_f64) {
            groups[slot].mins.push(v);
        }
        if let Some(v) = row.get(SALARY_MAX).and_then(Value::as_f64) {
            groups[slot].maxs.push(v);
        }
    }

    groups.sort_by(|a, b| a.label.cmp(&b.label));
    Ok(groups)
}

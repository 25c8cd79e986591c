use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::charts::{Bound, CHART_SIZE, SalaryGroup, group_salaries};
use crate::error::AppError;
use crate::models::table::Table;

const LIGHTEST: (f64, f64, f64) = (247.0, 251.0, 255.0);
const DARKEST: (f64, f64, f64) = (8.0, 48.0, 107.0);

/// Render two single-column heatmaps of mean annual minimum and maximum
/// salary, one row per distinct value of `group_by`.
pub fn plot_salary_heatmap(
    table: &Table,
    group_by: &str,
    title: &str,
    path: &Path,
) -> Result<(), AppError> {
    let groups = group_salaries(table, group_by)?;
    tracing::info!(
        "Plotting salary heatmap for {} groups of '{group_by}' to {}",
        groups.len(),
        path.display()
    );

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let body = root.titled(title, ("sans-serif", 32))?;
    let panels = body.split_evenly((1, 2));
    draw_panel(&panels[0], &groups, Bound::Min, group_by, true)?;
    draw_panel(&panels[1], &groups, Bound::Max, group_by, false)?;
    root.present()?;
    Ok(())
}

fn draw_panel(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    groups: &[SalaryGroup],
    bound: Bound,
    group_by: &str,
    show_labels: bool,
) -> Result<(), AppError> {
    if groups.is_empty() {
        return Ok(());
    }

    let labels: Vec<String> = groups.iter().map(|g| g.label.clone()).collect();
    let means: Vec<Option<f64>> = groups.iter().map(|g| g.mean(bound)).collect();
    let (lo, hi) = means
        .iter()
        .flatten()
        .fold((f64::MAX, f64::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));

    let mut chart = ChartBuilder::on(area)
        .margin(20)
        .x_label_area_size(30)
        .y_label_area_size(if show_labels { 220 } else { 10 })
        .build_cartesian_2d(0f64..1f64, labels[..].into_segmented())?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(bound.label())
        .y_desc(if show_labels { group_by } else { "" })
        .y_labels(labels.len())
        .x_label_formatter(&|_: &f64| String::new())
        .y_label_formatter(&|v: &SegmentValue<&String>| match v {
            SegmentValue::CenterOf(label) if show_labels => (*label).clone(),
            _ => String::new(),
        })
        .draw()?;

    chart.draw_series(labels.iter().zip(&means).enumerate().filter_map(
        |(i, (label, mean))| {
            let mean = (*mean)?;
            let bottom = labels
                .get(i + 1)
                .map_or(SegmentValue::Last, SegmentValue::Exact);
            Some(Rectangle::new(
                [(0.0, SegmentValue::Exact(label)), (1.0, bottom)],
                shade(mean, lo, hi).filled(),
            ))
        },
    ))?;

    Ok(())
}

/// Blue scale from light (lowest mean) to dark (highest mean).
fn shade(value: f64, lo: f64, hi: f64) -> RGBColor {
    let t = if hi > lo {
        ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
    } else {
        1.0
    };
    let mix = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    RGBColor(
        mix(LIGHTEST.0, DARKEST.0),
        mix(LIGHTEST.1, DARKEST.1),
        mix(LIGHTEST.2, DARKEST.2),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::offer::Record;
    use serde_json::{Value, json};

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn shade_spans_the_scale() {
        assert_eq!(shade(10.0, 10.0, 20.0).rgb(), (247, 251, 255));
        assert_eq!(shade(20.0, 10.0, 20.0).rgb(), (8, 48, 107));
        assert_eq!(shade(5.0, 5.0, 5.0).rgb(), (8, 48, 107));
    }

    #[test]
    fn writes_svg_with_title_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heatmap.svg");
        let table = Table::from_records(vec![
            record(json!({"province": "{'id': 28, 'value': 'Madrid'}", "salaryMin": 24000.0, "salaryMax": 36000.0})),
            record(json!({"province": "{'id': 8, 'value': 'Barcelona'}", "salaryMin": 22000.0, "salaryMax": 33000.0})),
            record(json!({"province": "{'id': 46, 'value': 'Valencia'}", "salaryMin": 19000.0})),
        ]);

        plot_salary_heatmap(&table, "Province", "Salary by province", &path).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("Salary by province"));
        assert!(svg.contains("Barcelona"));
        assert!(svg.contains("Valencia"));
    }
}

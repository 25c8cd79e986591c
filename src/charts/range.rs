use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::charts::{Bound, CHART_SIZE, SalaryGroup, group_salaries};
use crate::error::AppError;
use crate::models::table::Table;

/// Render side-by-side horizontal box plots of annual minimum (left) and
/// maximum (right) salary, one box per value of `group_by`.
pub fn plot_salary_range_by_group(
    table: &Table,
    group_by: &str,
    path: &Path,
) -> Result<(), AppError> {
    let groups = group_salaries(table, group_by)?;
    tracing::info!(
        "Plotting salary ranges for {} groups of '{group_by}' to {}",
        groups.len(),
        path.display()
    );

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((1, 2));
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
    let title = format!("{} by {group_by}", bound.label());
    let series: Vec<(String, Quartiles)> = groups
        .iter()
        .filter(|g| !g.values(bound).is_empty())
        .map(|g| (g.label.clone(), Quartiles::new(g.values(bound))))
        .collect();

    if series.is_empty() {
        area.titled(&title, ("sans-serif", 24))?;
        return Ok(());
    }

    let labels: Vec<String> = series.iter().map(|(label, _)| label.clone()).collect();
    let (lo, hi) = series
        .iter()
        .flat_map(|(_, q)| q.values())
        .fold((f32::MAX, f32::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let pad = ((hi - lo) * 0.05).max(1.0);

    let mut chart = ChartBuilder::on(area)
        .caption(&title, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(if show_labels { 220 } else { 10 })
        .build_cartesian_2d(lo - pad..hi + pad, labels[..].into_segmented())?;

    chart
        .configure_mesh()
        .x_desc(bound.label())
        .y_desc(if show_labels { group_by } else { "" })
        .y_labels(labels.len())
        .y_label_formatter(&|v: &SegmentValue<&String>| match v {
            SegmentValue::CenterOf(label) if show_labels => (*label).clone(),
            _ => String::new(),
        })
        .draw()?;

    chart.draw_series(series.iter().map(|(label, quartiles)| {
        Boxplot::new_horizontal(SegmentValue::CenterOf(label), quartiles)
            .width(16)
            .whisker_width(0.5)
            .style(BLUE)
    }))?;

    Ok(())
}

//! Cached CSV -> salary preparation -> charts.

use tempfile::TempDir;

use jobdatasets::charts::{plot_salary_heatmap, plot_salary_range_by_group};
use jobdatasets::models::table::Table;
use jobdatasets::transform::prepare_salaries;

const CACHE: &str = r#"id,category,province,salaryMin,salaryMax,salaryPeriod
a1,"{""id"":1,""value"":""Informática y telecomunicaciones""}","{""id"":33,""value"":""Madrid""}","{""id"":10,""value"":""2.000 €""}","{""id"":11,""value"":""3.000 €""}","{""id"":3,""value"":""Bruto/mes""}"
a2,"{'id': 2, 'value': 'Ventas al detalle'}","{'id': 8, 'value': 'Barcelona'}","{'id': 20, 'value': '24.000 €'}","{'id': 21, 'value': '30.000 €'}","{'id': 4, 'value': 'Bruto/año'}"
a3,"{""id"":1,""value"":""Informática y telecomunicaciones""}","{""id"":8,""value"":""Barcelona""}","{""id"":0,""value"":""""}",,
"#;

fn load_cache(dir: &TempDir) -> Table {
    let path = dir.path().join("jobs_dataset.csv");
    std::fs::write(&path, CACHE).unwrap();
    prepare_salaries(Table::read_csv(&path).unwrap())
}

#[test]
fn prepares_mixed_literal_dialects() {
    let dir = TempDir::new().unwrap();
    let table = load_cache(&dir);

    assert_eq!(table.len(), 2);
    assert_eq!(table.rows[0]["salaryMin"].as_f64(), Some(24000.0));
    assert_eq!(table.rows[0]["salaryMax"].as_f64(), Some(36000.0));
    assert_eq!(table.rows[1]["salaryMin"].as_f64(), Some(24000.0));
    assert_eq!(table.rows[1]["salaryMax"].as_f64(), Some(30000.0));
}

#[test]
fn renders_both_charts_from_cache() {
    let dir = TempDir::new().unwrap();
    let table = load_cache(&dir);
    let range = dir.path().join("range.svg");
    let heatmap = dir.path().join("heatmap.svg");

    plot_salary_range_by_group(&table, "category", &range).unwrap();
    plot_salary_heatmap(&table, "Province", "Salary Heatmap", &heatmap).unwrap();

    let range_svg = std::fs::read_to_string(&range).unwrap();
    assert!(range_svg.contains("Ventas al detalle"));
    let heatmap_svg = std::fs::read_to_string(&heatmap).unwrap();
    assert!(heatmap_svg.contains("Salary Heatmap"));
    assert!(heatmap_svg.contains("Madrid"));
}

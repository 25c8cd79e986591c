use std::collections::HashSet;
use std::path::Path;

use serde_json::Value;
use tempfile::NamedTempFile;

use crate::error::AppError;
use crate::models::offer::Record;

/// In-memory tabular dataset: sparse rows plus the discovered column set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Record>,
}

impl Table {
    /// Build a table whose columns are the union of all row keys, in the
    /// order each key is first seen.
    pub fn from_records(rows: Vec<Record>) -> Self {
        let columns = discover_columns(&rows);
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Resolve a column name, falling back to a case-insensitive match.
    pub fn column(&self, name: &str) -> Result<&str, AppError> {
        self.columns
            .iter()
            .find(|c| c.as_str() == name)
            .or_else(|| self.columns.iter().find(|c| c.eq_ignore_ascii_case(name)))
            .map(String::as_str)
            .ok_or_else(|| AppError::MissingColumn(name.to_string()))
    }

    /// Write the table as CSV with a header row. The file only appears at
    /// `path` once it is completely written.
    pub fn write_csv_atomic(&self, path: &Path) -> Result<(), AppError> {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let tmp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = csv::Writer::from_writer(tmp.as_file());
            if !self.columns.is_empty() {
                writer.write_record(&self.columns)?;
            }
            for row in &self.rows {
                writer.write_record(self.columns.iter().map(|c| cell_text(row.get(c))))?;
            }
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(path)?;
        Ok(())
    }

    /// Load a cached CSV. Empty cells become absent fields and every other
    /// cell a string value.
    pub fn read_csv(path: &Path) -> Result<Self, AppError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)?;
        let columns: Vec<String> = reader.headers()?.iter().map(String::from).collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row = Record::new();
            for (column, cell) in columns.iter().zip(record.iter()) {
                if !cell.is_empty() {
                    row.insert(column.clone(), Value::String(cell.to_string()));
                }
            }
            rows.push(row);
        }

        Ok(Self { columns, rows })
    }
}

fn discover_columns(rows: &[Record]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut columns = Vec::new();
    for row in rows {
        for key in row.keys() {
            if seen.insert(key.as_str()) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

/// Text for one CSV cell. Nested values are kept as compact JSON so they can
/// be parsed back with the literal parser.
fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(nested) => nested.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn columns_are_sparse_union_in_first_seen_order() {
        let table = Table::from_records(vec![
            record(json!({"id": "1", "title": "Dev"})),
            record(json!({"id": "2", "city": "Bilbao"})),
            record(json!({"title": "Ops", "salaryMin": 1000})),
        ]);
        assert_eq!(table.columns, vec!["id", "title", "city", "salaryMin"]);
    }

    #[test]
    fn writes_blank_cells_for_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobs_dataset.csv");
        let table = Table {
            columns: vec!["id".into(), "city".into(), "salaryMin".into()],
            rows: vec![
                record(json!({"id": "1", "city": "Madrid"})),
                record(json!({"id": "2", "salaryMin": {"id": 3, "value": "1.200 €"}})),
            ],
        };

        table.write_csv_atomic(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "id,city,salaryMin");
        assert_eq!(lines[1], "1,Madrid,");
        assert_eq!(lines[2], r#"2,,"{""id"":3,""value"":""1.200 €""}""#);
    }

    #[test]
    fn read_back_drops_empty_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobs_dataset.csv");
        let table = Table {
            columns: vec!["id".into(), "city".into()],
            rows: vec![
                record(json!({"id": "1", "city": "Madrid"})),
                record(json!({"id": "2"})),
            ],
        };
        table.write_csv_atomic(&path).unwrap();

        let loaded = Table::read_csv(&path).unwrap();
        assert_eq!(loaded.columns, vec!["id", "city"]);
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.rows[0]["city"], "Madrid");
        assert!(loaded.rows[1].get("city").is_none());
    }

    #[test]
    fn atomic_write_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("country_dataset.csv");
        Table::from_records(vec![record(json!({"code": "es"}))])
            .write_csv_atomic(&path)
            .unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn column_lookup_falls_back_to_case_insensitive() {
        let table = Table {
            columns: vec!["province".into()],
            rows: vec![],
        };
        assert_eq!(table.column("Province").unwrap(), "province");
        assert!(matches!(
            table.column("category"),
            Err(AppError::MissingColumn(_))
        ));
    }
}

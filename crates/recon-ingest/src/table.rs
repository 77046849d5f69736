//! CSV table loading.
//!
//! Produces the `(headers, rows)` shape the column normalizer consumes.
//! Rows are keyed by header name so downstream code never depends on
//! column positions.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;

/// An ingested table: ordered headers plus one map per data row.
#[derive(Debug, Clone, Default)]
pub struct SourceTable {
    pub headers: Vec<String>,
    pub rows: Vec<BTreeMap<String, String>>,
}

impl SourceTable {
    pub fn new(headers: Vec<String>, rows: Vec<BTreeMap<String, String>>) -> Self {
        Self { headers, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn clean(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Reads a CSV file into a [`SourceTable`].
///
/// The first non-empty row is taken as the header row. Fully blank rows
/// are skipped; short rows are padded with empty cells.
pub fn read_csv_table(path: &Path) -> Result<SourceTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("read csv: {}", path.display()))?;

    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("read record: {}", path.display()))?;
        let cells: Vec<String> = record.iter().map(clean).collect();
        if cells.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        match &headers {
            None => headers = Some(cells),
            Some(names) => {
                let mut row = BTreeMap::new();
                for (idx, name) in names.iter().enumerate() {
                    if name.is_empty() {
                        continue;
                    }
                    let value = cells.get(idx).map(String::as_str).unwrap_or("");
                    row.insert(name.clone(), value.to_string());
                }
                rows.push(row);
            }
        }
    }

    Ok(SourceTable {
        headers: headers.unwrap_or_default(),
        rows,
    })
}

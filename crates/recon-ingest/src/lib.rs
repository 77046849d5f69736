#![deny(unsafe_code)]

//! Tabular ingestion: CSV loading, column normalization and initial
//! mapping record synthesis.

mod columns;
mod error;
mod records;
mod table;

pub use columns::{ColumnMap, detect_columns};
pub use error::{IngestError, IngestWarning};
pub use records::{IngestOptions, build_records};
pub use table::{SourceTable, read_csv_table};

use recon_model::MappingRecord;

/// Outcome of ingesting one table.
#[derive(Debug, Clone)]
pub struct IngestReport {
    pub records: Vec<MappingRecord>,
    pub columns: ColumnMap,
    pub warnings: Vec<IngestWarning>,
}

/// Normalizes columns and synthesizes records for a whole table.
///
/// Fails only when no source code column can be detected; every other
/// condition lands on the report as a warning.
pub fn ingest_table(
    table: &SourceTable,
    options: &IngestOptions,
) -> Result<IngestReport, IngestError> {
    let (columns, mut warnings) = detect_columns(&table.headers)?;
    let (records, row_warnings) = build_records(table, &columns, options);
    warnings.extend(row_warnings);
    Ok(IngestReport {
        records,
        columns,
        warnings,
    })
}

#![deny(unsafe_code)]

//! Denormalized tabular export of the record set.
//!
//! One row per record, fixed column order. Consumers treat the header
//! row as a contract, so the order never changes.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::Context;

use recon_model::MappingRecord;

/// Export column order. Append-only by convention.
pub const EXPORT_COLUMNS: [&str; 10] = [
    "Source Code",
    "Source Description",
    "Target Code",
    "Target Description",
    "Match Type",
    "Confidence",
    "Status",
    "Notes",
    "Last Modified",
    "Modified By",
];

/// Renders records into rows matching [`EXPORT_COLUMNS`].
pub fn export_rows(records: &[MappingRecord]) -> Vec<Vec<String>> {
    records
        .iter()
        .map(|record| {
            vec![
                record.source_code.clone(),
                record.source_description.clone(),
                record.target_code.clone(),
                record.target_description.clone(),
                record.match_type.as_str().to_string(),
                record.confidence.to_string(),
                record.status.as_str().to_string(),
                record.notes.clone(),
                record.last_modified.to_rfc3339(),
                record.modified_by.as_str().to_string(),
            ]
        })
        .collect()
}

/// Writes the export as CSV, header row first.
pub fn write_csv<W: Write>(writer: W, records: &[MappingRecord]) -> anyhow::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(EXPORT_COLUMNS)
        .context("failed to write export header")?;
    for row in export_rows(records) {
        csv_writer
            .write_record(&row)
            .context("failed to write export row")?;
    }
    csv_writer.flush().context("failed to flush export")?;
    Ok(())
}

pub fn write_csv_file(path: &Path, records: &[MappingRecord]) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create export file {}", path.display()))?;
    write_csv(file, records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use recon_model::{Actor, MappingStatus, MatchType, RecordId};

    fn record() -> MappingRecord {
        let now = Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap();
        let mut r = MappingRecord::from_source(
            RecordId::derive(&["export", "1000"]),
            "1000",
            "Cash",
            now,
        );
        r.target_code = "101000".to_string();
        r.target_description = "Cash - Operating".to_string();
        r.match_type = MatchType::Exact;
        r.confidence = 95;
        r.status = MappingStatus::Mapped;
        r.notes = "direct cash mapping".to_string();
        r.modified_by = Actor::Assistant;
        r
    }

    #[test]
    fn header_row_is_stable() {
        insta::assert_snapshot!(
            EXPORT_COLUMNS.join(","),
            @"Source Code,Source Description,Target Code,Target Description,Match Type,Confidence,Status,Notes,Last Modified,Modified By"
        );
    }

    #[test]
    fn rows_follow_column_order() {
        let rows = export_rows(&[record()]);
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.len(), EXPORT_COLUMNS.len());
        assert_eq!(row[0], "1000");
        assert_eq!(row[4], "Exact");
        assert_eq!(row[5], "95");
        assert_eq!(row[6], "mapped");
        assert_eq!(row[8], "2026-03-14T09:26:53+00:00");
        assert_eq!(row[9], "assistant");
    }

    #[test]
    fn csv_output_includes_header_and_rows() {
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &[record()]).expect("write");
        let text = String::from_utf8(buffer).expect("utf8");
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(EXPORT_COLUMNS.join(",").as_str()));
        let data = lines.next().expect("data row");
        assert!(data.starts_with("1000,Cash,101000,"));
    }
}

//! Record synthesis from normalized table rows.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use chrono::Utc;
use tracing::warn;

use recon_model::{
    MappingRecord, MappingStatus, MatchType, RecordId, metadata, token_overlap,
};

use crate::columns::ColumnMap;
use crate::error::IngestWarning;
use crate::table::SourceTable;

/// Similarity above which two descriptions count as a semantic match.
const SEMANTIC_THRESHOLD: f64 = 0.8;
/// Confidence assigned to pre-mapped rows we cannot score.
const MANUAL_CONFIDENCE: u8 = 50;

/// Provenance attached to ingested records.
#[derive(Debug, Clone, Default)]
pub struct IngestOptions {
    /// Session identifier stamped into record metadata.
    pub session_id: Option<String>,
    /// Originating file name stamped into record metadata.
    pub source_file: Option<String>,
}

/// Builds one mapping record per valid row.
///
/// Rows with an empty source code are dropped (counted in a warning);
/// duplicate source codes are warned about but kept as-is.
pub fn build_records(
    table: &SourceTable,
    columns: &ColumnMap,
    options: &IngestOptions,
) -> (Vec<MappingRecord>, Vec<IngestWarning>) {
    let mut records = Vec::new();
    let mut warnings = Vec::new();
    let mut seen_codes: BTreeSet<String> = BTreeSet::new();
    let mut dropped = 0usize;
    let mut duplicates = 0usize;
    let source_file = options.source_file.as_deref().unwrap_or("");

    for (row_index, row) in table.rows.iter().enumerate() {
        let source_code = cell(row, Some(&columns.source_code));
        if source_code.is_empty() {
            dropped += 1;
            continue;
        }
        if !seen_codes.insert(source_code.clone()) {
            duplicates += 1;
        }

        let source_description = cell(row, columns.source_description.as_deref());
        let target_code = cell(row, columns.target_code.as_deref());
        let target_description = cell(row, columns.target_description.as_deref());

        let id = RecordId::derive(&[source_file, &row_index.to_string(), &source_code]);
        let mut record =
            MappingRecord::from_source(id, source_code, source_description, Utc::now());
        if let Some(session) = &options.session_id {
            record
                .metadata
                .insert(metadata::SESSION_ID.to_string(), session.clone());
        }
        if !source_file.is_empty() {
            record
                .metadata
                .insert(metadata::SOURCE_FILE.to_string(), source_file.to_string());
        }
        apply_target(&mut record, target_code, target_description);
        records.push(record);
    }

    if dropped > 0 {
        warn!(dropped, "dropped rows with empty source code");
        warnings.push(IngestWarning::EmptySourceCodes { dropped });
    }
    if duplicates > 0 {
        warn!(duplicates, "duplicate source codes in ingested table");
        warnings.push(IngestWarning::DuplicateSourceCodes { duplicates });
    }

    (records, warnings)
}

/// Derives status, match type and confidence for a freshly ingested row.
fn apply_target(record: &mut MappingRecord, target_code: String, target_description: String) {
    if target_code.is_empty() {
        // No target: stays unmapped/None/0 from construction.
        return;
    }
    record.status = MappingStatus::Mapped;
    record.target_description = target_description;

    if target_code == record.source_code {
        record.match_type = MatchType::Exact;
        record.confidence = 100;
    } else if !record.source_description.is_empty() && !record.target_description.is_empty() {
        let similarity = token_overlap(&record.source_description, &record.target_description);
        if similarity > SEMANTIC_THRESHOLD {
            record.match_type = MatchType::Semantic;
            record.confidence = (similarity * 100.0).round() as u8;
        } else {
            record.match_type = MatchType::Manual;
            record.confidence = MANUAL_CONFIDENCE;
        }
    } else {
        record.match_type = MatchType::Manual;
        record.confidence = MANUAL_CONFIDENCE;
    }
    record.target_code = target_code;
}

fn cell(row: &BTreeMap<String, String>, header: Option<&str>) -> String {
    header
        .and_then(|name| row.get(name))
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

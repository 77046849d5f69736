//! Integration tests for table ingestion.

use std::collections::BTreeMap;

use recon_ingest::{IngestOptions, IngestWarning, SourceTable, ingest_table};
use recon_model::{MappingStatus, MatchType, metadata};

fn row(cells: &[(&str, &str)]) -> BTreeMap<String, String> {
    cells
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn table(headers: &[&str], rows: Vec<BTreeMap<String, String>>) -> SourceTable {
    SourceTable::new(headers.iter().map(|h| (*h).to_string()).collect(), rows)
}

fn options() -> IngestOptions {
    IngestOptions {
        session_id: Some("SESSION-1".to_string()),
        source_file: Some("chart.csv".to_string()),
    }
}

#[test]
fn rows_without_target_ingest_unmapped() {
    let table = table(
        &["Account_Code", "Account_Description"],
        vec![
            row(&[("Account_Code", "1000"), ("Account_Description", "Cash")]),
            row(&[
                ("Account_Code", "2000"),
                ("Account_Description", "Accounts Payable"),
            ]),
        ],
    );
    let report = ingest_table(&table, &options()).expect("ingest");
    assert_eq!(report.records.len(), 2);
    for record in &report.records {
        assert_eq!(record.status, MappingStatus::Unmapped);
        assert_eq!(record.match_type, MatchType::None);
        assert_eq!(record.confidence, 0);
        assert_eq!(
            record.metadata.get(metadata::SESSION_ID).map(String::as_str),
            Some("SESSION-1")
        );
        assert_eq!(
            record.metadata.get(metadata::SOURCE_FILE).map(String::as_str),
            Some("chart.csv")
        );
    }
}

#[test]
fn identical_codes_ingest_as_exact() {
    let table = table(
        &["Code", "Description", "Target_Code"],
        vec![row(&[
            ("Code", "1000"),
            ("Description", "Cash"),
            ("Target_Code", "1000"),
        ])],
    );
    let report = ingest_table(&table, &options()).expect("ingest");
    let record = &report.records[0];
    assert_eq!(record.status, MappingStatus::Mapped);
    assert_eq!(record.match_type, MatchType::Exact);
    assert_eq!(record.confidence, 100);
    assert_eq!(record.target_code, "1000");
}

#[test]
fn similar_descriptions_ingest_as_semantic() {
    let table = table(
        &["Code", "Description", "Target_Code", "Target_Description"],
        vec![row(&[
            ("Code", "1000"),
            ("Description", "Cash Operating Account"),
            ("Target_Code", "101000"),
            ("Target_Description", "cash operating account"),
        ])],
    );
    let report = ingest_table(&table, &options()).expect("ingest");
    let record = &report.records[0];
    assert_eq!(record.match_type, MatchType::Semantic);
    assert_eq!(record.confidence, 100);
    assert_eq!(record.status, MappingStatus::Mapped);
}

#[test]
fn dissimilar_descriptions_ingest_as_manual() {
    let table = table(
        &["Code", "Description", "Target_Code", "Target_Description"],
        vec![row(&[
            ("Code", "1300"),
            ("Description", "Prepaid Expenses"),
            ("Target_Code", "104200"),
            ("Target_Description", "Other Current Assets"),
        ])],
    );
    let report = ingest_table(&table, &options()).expect("ingest");
    let record = &report.records[0];
    assert_eq!(record.match_type, MatchType::Manual);
    assert_eq!(record.confidence, 50);
}

#[test]
fn target_without_descriptions_is_manual() {
    let table = table(
        &["Code", "Target_Code"],
        vec![row(&[("Code", "1000"), ("Target_Code", "101000")])],
    );
    let report = ingest_table(&table, &options()).expect("ingest");
    let record = &report.records[0];
    assert_eq!(record.match_type, MatchType::Manual);
    assert_eq!(record.confidence, 50);
    assert!(report
        .warnings
        .contains(&IngestWarning::MissingDescriptionColumn));
}

#[test]
fn empty_codes_dropped_with_count() {
    let table = table(
        &["Code", "Description"],
        vec![
            row(&[("Code", "1000"), ("Description", "Cash")]),
            row(&[("Code", ""), ("Description", "Mystery")]),
            row(&[("Code", "  "), ("Description", "Also mystery")]),
        ],
    );
    let report = ingest_table(&table, &options()).expect("ingest");
    assert_eq!(report.records.len(), 1);
    assert!(report
        .warnings
        .contains(&IngestWarning::EmptySourceCodes { dropped: 2 }));
}

#[test]
fn duplicate_codes_warned_not_deduplicated() {
    let table = table(
        &["Code", "Description"],
        vec![
            row(&[("Code", "1000"), ("Description", "Cash")]),
            row(&[("Code", "1000"), ("Description", "Cash again")]),
        ],
    );
    let report = ingest_table(&table, &options()).expect("ingest");
    assert_eq!(report.records.len(), 2);
    assert!(report
        .warnings
        .contains(&IngestWarning::DuplicateSourceCodes { duplicates: 1 }));
    // Ids stay unique even with duplicate codes.
    assert_ne!(report.records[0].id, report.records[1].id);
}

#[test]
fn missing_source_column_halts_ingestion() {
    let table = table(&["Balance", "Currency"], vec![row(&[("Balance", "10")])]);
    assert!(ingest_table(&table, &options()).is_err());
}

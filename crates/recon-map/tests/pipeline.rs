//! Parse-then-classify pipeline tests.

use chrono::Utc;
use recon_map::{ConfidenceBands, classify_suggestions};
use recon_model::{MappingRecord, MappingStatus, MatchType, RecordId};
use recon_parse::parse_response;

fn chart() -> Vec<MappingRecord> {
    ["1000", "2000", "6400"]
        .iter()
        .map(|code| {
            MappingRecord::from_source(
                RecordId::derive(&["chart.csv", code]),
                *code,
                format!("Account {code}"),
                Utc::now(),
            )
        })
        .collect()
}

#[test]
fn parsed_list_classifies_against_chart() {
    let records = chart();
    let response = "Suggested mappings:\n\
                    1. 6400 -> 60500 (100%)\n\
                    reasoning: same expense family\n\
                    2. 1000 -> 101000 (75%)\n\
                    3. 9999 -> 999000 (40%)";
    let suggestions = parse_response(response);
    assert_eq!(suggestions.len(), 3);

    let classified = classify_suggestions(&suggestions, &records, &ConfidenceBands::default());
    assert_eq!(classified.len(), 3);

    let exact = &classified[0];
    assert_eq!(exact.merge_target, Some(records[2].id));
    assert_eq!(exact.record.match_type, MatchType::Exact);
    assert_eq!(exact.record.notes, "same expense family");

    let semantic = &classified[1];
    assert_eq!(semantic.merge_target, Some(records[0].id));
    assert_eq!(semantic.record.match_type, MatchType::Semantic);

    let orphan = &classified[2];
    assert!(orphan.is_orphan());
    assert_eq!(orphan.record.match_type, MatchType::Manual);
    assert_eq!(orphan.record.status, MappingStatus::Pending);
}

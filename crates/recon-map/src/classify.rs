//! Candidate resolution and record synthesis for raw suggestions.

use chrono::Utc;
use tracing::debug;

use recon_model::{
    Actor, ClassifiedMapping, MappingRecord, MappingStatus, RawSuggestion, RecordId, metadata,
};

use crate::bands::ConfidenceBands;

/// Target description stamped when the suggestion carries none.
pub const SUGGESTED_DESCRIPTION: &str = "Suggested by assistant";

/// Turns raw suggestions into records ready for the store.
///
/// Each suggestion is resolved against `records` by source token: an
/// exact `source_code` match first, then bidirectional substring
/// containment. Resolved suggestions copy the matched record's source
/// fields and name it as merge target; unresolved ones become orphan
/// records flagged `unresolved` in metadata. Classification never
/// mutates `records`.
pub fn classify_suggestions(
    suggestions: &[RawSuggestion],
    records: &[MappingRecord],
    bands: &ConfidenceBands,
) -> Vec<ClassifiedMapping> {
    suggestions
        .iter()
        .map(|suggestion| classify_one(suggestion, records, bands))
        .collect()
}

fn classify_one(
    suggestion: &RawSuggestion,
    records: &[MappingRecord],
    bands: &ConfidenceBands,
) -> ClassifiedMapping {
    let resolved = resolve(&suggestion.source_token, records);
    let now = Utc::now();

    let (id, source_code, source_description, merge_target) = match resolved {
        Some(record) => (
            record.id,
            record.source_code.clone(),
            record.source_description.clone(),
            Some(record.id),
        ),
        None => {
            debug!(token = %suggestion.source_token, "suggestion source token did not resolve");
            let id = RecordId::derive(&[
                &suggestion.source_token,
                &suggestion.source_line.to_string(),
            ]);
            (id, suggestion.source_token.clone(), String::new(), None)
        }
    };

    let mut record = MappingRecord::from_source(id, source_code, source_description, now);
    record.target_code = suggestion.target_token.clone();
    record.target_description = suggestion
        .target_description
        .clone()
        .unwrap_or_else(|| SUGGESTED_DESCRIPTION.to_string());
    record.match_type = bands.classify(suggestion.confidence_percent);
    record.confidence = suggestion.confidence_percent;
    record.status = MappingStatus::Pending;
    record.modified_by = Actor::Assistant;
    record.notes = match &suggestion.reasoning {
        Some(reasoning) => reasoning.clone(),
        None => format!(
            "assistant suggestion, {}% confidence",
            suggestion.confidence_percent
        ),
    };

    record
        .metadata
        .insert(metadata::ASSISTANT_SUGGESTION.to_string(), "true".to_string());
    record.metadata.insert(
        metadata::SOURCE_LINE.to_string(),
        suggestion.source_line.to_string(),
    );
    if let Some(reasoning) = &suggestion.reasoning {
        record
            .metadata
            .insert(metadata::ASSISTANT_REASONING.to_string(), reasoning.clone());
    }
    if !suggestion.alternatives.is_empty() {
        record.metadata.insert(
            metadata::ALTERNATIVES.to_string(),
            suggestion.alternatives.join(","),
        );
    }
    if merge_target.is_none() {
        record
            .metadata
            .insert(metadata::UNRESOLVED.to_string(), "true".to_string());
    }

    ClassifiedMapping {
        record,
        merge_target,
    }
}

/// Finds the record a source token refers to.
///
/// Exact `source_code` equality wins; failing that, the first record
/// whose code contains the token or is contained by it (case
/// insensitive).
fn resolve<'a>(token: &str, records: &'a [MappingRecord]) -> Option<&'a MappingRecord> {
    if let Some(exact) = records.iter().find(|r| r.source_code == token) {
        return Some(exact);
    }
    let needle = token.to_lowercase();
    records.iter().find(|r| {
        let code = r.source_code.to_lowercase();
        !code.is_empty() && (code.contains(&needle) || needle.contains(&code))
    })
}

//! Pure, derived views over the record set.
//!
//! Views never mutate; they borrow the store's records and hand back
//! owned or borrowed subsets. Composite queries always apply in the
//! same order: status, then search, then confidence, then sort.

use recon_model::{MappingRecord, MappingStatus};

/// Sortable record fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    SourceCode,
    TargetCode,
    Confidence,
    Status,
    LastModified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// A composite view request.
#[derive(Debug, Clone, Default)]
pub struct ViewQuery {
    pub status: Option<MappingStatus>,
    pub search: Option<String>,
    pub confidence: Option<(u8, u8)>,
    pub sort: Option<(SortField, SortDirection)>,
}

pub fn filter_by_status(records: &[MappingRecord], status: MappingStatus) -> Vec<&MappingRecord> {
    records.iter().filter(|r| r.status == status).collect()
}

/// Inclusive confidence bounds.
pub fn filter_by_confidence_range(
    records: &[MappingRecord],
    min: u8,
    max: u8,
) -> Vec<&MappingRecord> {
    records
        .iter()
        .filter(|r| r.confidence >= min && r.confidence <= max)
        .collect()
}

/// Case-insensitive substring search over codes, descriptions and notes.
pub fn search<'a>(records: &'a [MappingRecord], term: &str) -> Vec<&'a MappingRecord> {
    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|r| matches_term(r, &needle))
        .collect()
}

/// The search predicate; `needle` must already be lowercased.
fn matches_term(record: &MappingRecord, needle: &str) -> bool {
    record.source_code.to_lowercase().contains(needle)
        || record.source_description.to_lowercase().contains(needle)
        || record.target_code.to_lowercase().contains(needle)
        || record.target_description.to_lowercase().contains(needle)
        || record.notes.to_lowercase().contains(needle)
}

pub fn sort_by(records: &mut [&MappingRecord], field: SortField, direction: SortDirection) {
    records.sort_by(|a, b| {
        let ordering = match field {
            SortField::SourceCode => a.source_code.cmp(&b.source_code),
            SortField::TargetCode => a.target_code.cmp(&b.target_code),
            SortField::Confidence => a.confidence.cmp(&b.confidence),
            SortField::Status => a.status.cmp(&b.status),
            SortField::LastModified => a.last_modified.cmp(&b.last_modified),
        };
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

/// Runs a composite query in canonical pipeline order.
pub fn query<'a>(records: &'a [MappingRecord], request: &ViewQuery) -> Vec<&'a MappingRecord> {
    let mut selected: Vec<&MappingRecord> = records.iter().collect();
    if let Some(status) = request.status {
        selected.retain(|r| r.status == status);
    }
    if let Some(term) = &request.search {
        let needle = term.to_lowercase();
        selected.retain(|r| matches_term(r, &needle));
    }
    if let Some((min, max)) = request.confidence {
        selected.retain(|r| r.confidence >= min && r.confidence <= max);
    }
    if let Some((field, direction)) = request.sort {
        sort_by(&mut selected, field, direction);
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use recon_model::RecordId;

    fn record(code: &str, description: &str, confidence: u8, status: MappingStatus) -> MappingRecord {
        let mut r = MappingRecord::from_source(
            RecordId::derive(&["views", code]),
            code,
            description,
            Utc::now(),
        );
        r.confidence = confidence;
        r.status = status;
        r
    }

    fn fixture() -> Vec<MappingRecord> {
        vec![
            record("1000", "Cash Operating", 100, MappingStatus::Mapped),
            record("2000", "Accounts Payable", 75, MappingStatus::Pending),
            record("3000", "Petty Cash", 40, MappingStatus::Unmapped),
            record("4000", "Deferred Revenue", 0, MappingStatus::Unmapped),
        ]
    }

    #[test]
    fn status_filter_selects_matching() {
        let records = fixture();
        let unmapped = filter_by_status(&records, MappingStatus::Unmapped);
        assert_eq!(unmapped.len(), 2);
    }

    #[test]
    fn confidence_range_is_inclusive() {
        let records = fixture();
        let mid = filter_by_confidence_range(&records, 40, 75);
        let codes: Vec<&str> = mid.iter().map(|r| r.source_code.as_str()).collect();
        assert_eq!(codes, vec!["2000", "3000"]);
    }

    #[test]
    fn search_is_case_insensitive() {
        let records = fixture();
        let hits = search(&records, "cash");
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn search_covers_notes() {
        let mut records = fixture();
        records[3].notes = "needs CFO review".to_string();
        let hits = search(&records, "cfo");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].source_code, "4000");
    }

    #[test]
    fn sort_descending_by_confidence() {
        let records = fixture();
        let mut view: Vec<&MappingRecord> = records.iter().collect();
        sort_by(&mut view, SortField::Confidence, SortDirection::Descending);
        let confidences: Vec<u8> = view.iter().map(|r| r.confidence).collect();
        assert_eq!(confidences, vec![100, 75, 40, 0]);
    }

    #[test]
    fn composite_query_applies_in_pipeline_order() {
        let records = fixture();
        let request = ViewQuery {
            status: Some(MappingStatus::Unmapped),
            search: Some("cash".to_string()),
            confidence: Some((0, 100)),
            sort: Some((SortField::SourceCode, SortDirection::Ascending)),
        };
        let view = query(&records, &request);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].source_code, "3000");
    }
}

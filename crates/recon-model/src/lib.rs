#![deny(unsafe_code)]

//! Core data model for the reconciliation engine.

pub mod aggregate;
pub mod change;
pub mod error;
pub mod ids;
pub mod record;
pub mod suggestion;
pub mod text;

pub use aggregate::{AggregateContext, StatusCounts};
pub use change::{ChangeEvent, DELETED_SENTINEL};
pub use error::{ModelError, Result};
pub use ids::RecordId;
pub use record::{Actor, MappingRecord, MappingStatus, MatchType, RecordPatch, fields, metadata};
pub use suggestion::{ClassifiedMapping, RawSuggestion};
pub use text::{normalize_text, token_overlap};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn classified_mapping_serializes() {
        let record = MappingRecord::from_source(
            RecordId::derive(&["session", "1000"]),
            "1000",
            "Cash",
            Utc::now(),
        );
        let classified = ClassifiedMapping {
            merge_target: Some(record.id),
            record,
        };
        let json = serde_json::to_string(&classified).expect("serialize classified");
        let round: ClassifiedMapping =
            serde_json::from_str(&json).expect("deserialize classified");
        assert_eq!(round, classified);
        assert!(!round.is_orphan());
    }
}

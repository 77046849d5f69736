//! Field-level change events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::RecordId;

/// Sentinel value recorded as `new_value` when a record is deleted.
pub const DELETED_SENTINEL: &str = "DELETED";

/// One field-level mutation of a mapping record.
///
/// Events are emitted by the store before the change is applied, in the
/// exact order mutations are issued. Timestamps serialize as ISO-8601
/// strings for transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEvent {
    pub row_id: RecordId,
    pub field: String,
    pub old_value: String,
    pub new_value: String,
    pub timestamp: DateTime<Utc>,
}

impl ChangeEvent {
    pub fn new(
        row_id: RecordId,
        field: impl Into<String>,
        old_value: impl Into<String>,
        new_value: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            row_id,
            field: field.into(),
            old_value: old_value.into(),
            new_value: new_value.into(),
            timestamp,
        }
    }

    /// True if this is the terminal event appended on deletion.
    pub fn is_deletion(&self) -> bool {
        self.new_value == DELETED_SENTINEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_timestamp_serializes_as_string() {
        let event = ChangeEvent::new(
            RecordId::derive(&["x"]),
            "status",
            "unmapped",
            "pending",
            Utc::now(),
        );
        let value = serde_json::to_value(&event).expect("serialize event");
        assert!(value["timestamp"].is_string());
        assert_eq!(value["oldValue"], "unmapped");
    }

    #[test]
    fn deletion_sentinel_detected() {
        let event = ChangeEvent::new(
            RecordId::derive(&["x"]),
            "record",
            "1000",
            DELETED_SENTINEL,
            Utc::now(),
        );
        assert!(event.is_deletion());
    }
}

//! Derived aggregate context.

use serde::{Deserialize, Serialize};

use crate::change::ChangeEvent;
use crate::record::MappingStatus;

/// Counts of records per workflow status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub unmapped: usize,
    pub pending: usize,
    pub mapped: usize,
    pub rejected: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.unmapped + self.pending + self.mapped + self.rejected
    }

    pub fn get(&self, status: MappingStatus) -> usize {
        match status {
            MappingStatus::Unmapped => self.unmapped,
            MappingStatus::Pending => self.pending,
            MappingStatus::Mapped => self.mapped,
            MappingStatus::Rejected => self.rejected,
        }
    }

    pub fn bump(&mut self, status: MappingStatus) {
        match status {
            MappingStatus::Unmapped => self.unmapped += 1,
            MappingStatus::Pending => self.pending += 1,
            MappingStatus::Mapped => self.mapped += 1,
            MappingStatus::Rejected => self.rejected += 1,
        }
    }
}

/// Snapshot of store state used as the assistant's operating context.
///
/// Recomputed on demand, never stored. Change events serialize with
/// string timestamps for transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateContext {
    pub status_counts: StatusCounts,
    /// Mean confidence over all records; 0.0 for an empty store.
    pub average_confidence: f64,
    /// Most recent change events, oldest first.
    pub recent_changes: Vec<ChangeEvent>,
    /// Session identifier taken from any record's metadata.
    pub session_id: Option<String>,
}

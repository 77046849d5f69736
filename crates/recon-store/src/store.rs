//! The mapping store: single owner of records and change history.

use std::time::Instant;

use chrono::Utc;
use tracing::{debug, warn};

use recon_model::{
    Actor, AggregateContext, ChangeEvent, ClassifiedMapping, DELETED_SENTINEL, MappingRecord,
    MappingStatus, RecordId, RecordPatch, StatusCounts, fields, metadata,
};

use crate::autosave::DirtyTracker;
use crate::changelog::ChangeLog;

/// Outcome of merging a batch of classified suggestions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    pub merged: usize,
    pub dropped: usize,
}

/// Owns the record set and change log; all mutation flows through here.
///
/// The store is the single logical writer: callers hold it exclusively
/// and read through borrowed views. Every mutation stamps the dirty
/// tracker so persistence can be scheduled by the caller.
#[derive(Debug, Default)]
pub struct MappingStore {
    records: Vec<MappingRecord>,
    changes: ChangeLog,
    tracker: DirtyTracker,
}

impl MappingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from persisted state. The tracker starts clean.
    pub fn from_parts(records: Vec<MappingRecord>, changes: Vec<ChangeEvent>) -> Self {
        Self {
            records,
            changes: ChangeLog::from_events(changes),
            tracker: DirtyTracker::new(),
        }
    }

    pub fn records(&self) -> &[MappingRecord] {
        &self.records
    }

    pub fn changes(&self) -> &ChangeLog {
        &self.changes
    }

    pub fn tracker(&self) -> &DirtyTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut DirtyTracker {
        &mut self.tracker
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&MappingRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Appends a record without emitting change events.
    ///
    /// Creation is not a field mutation; the change log tracks edits to
    /// existing records only.
    pub fn add(&mut self, record: MappingRecord) {
        self.records.push(record);
        self.tracker.mark_dirty_at(Instant::now());
    }

    pub fn add_all(&mut self, records: impl IntoIterator<Item = MappingRecord>) {
        let before = self.records.len();
        self.records.extend(records);
        if self.records.len() > before {
            self.tracker.mark_dirty_at(Instant::now());
        }
    }

    /// Applies a user edit to one record.
    ///
    /// Returns the number of fields actually changed. A missing id is a
    /// warned no-op; fields patched to their current value emit no
    /// event and do not dirty the store.
    pub fn update(&mut self, id: RecordId, patch: &RecordPatch) -> usize {
        self.apply_patch(id, patch, Actor::User)
    }

    /// Applies the same patch to several records, skipping missing ids.
    pub fn bulk_update(&mut self, ids: &[RecordId], patch: &RecordPatch) -> usize {
        ids.iter().map(|id| self.update(*id, patch)).sum()
    }

    fn apply_patch(&mut self, id: RecordId, patch: &RecordPatch, actor: Actor) -> usize {
        let Some(index) = self.records.iter().position(|r| r.id == id) else {
            warn!(%id, "update for unknown record ignored");
            return 0;
        };

        let now = Utc::now();
        let record = &mut self.records[index];
        let mut changed = 0usize;

        // Events are emitted before each field is overwritten so
        // old_value is authentic.
        if let Some(value) = &patch.source_description
            && *value != record.source_description
        {
            self.changes.push(ChangeEvent::new(
                id,
                fields::SOURCE_DESCRIPTION,
                record.source_description.clone(),
                value.clone(),
                now,
            ));
            record.source_description = value.clone();
            changed += 1;
        }
        if let Some(value) = &patch.target_code
            && *value != record.target_code
        {
            self.changes.push(ChangeEvent::new(
                id,
                fields::TARGET_CODE,
                record.target_code.clone(),
                value.clone(),
                now,
            ));
            record.target_code = value.clone();
            changed += 1;
        }
        if let Some(value) = &patch.target_description
            && *value != record.target_description
        {
            self.changes.push(ChangeEvent::new(
                id,
                fields::TARGET_DESCRIPTION,
                record.target_description.clone(),
                value.clone(),
                now,
            ));
            record.target_description = value.clone();
            changed += 1;
        }
        if let Some(value) = patch.match_type
            && value != record.match_type
        {
            self.changes.push(ChangeEvent::new(
                id,
                fields::MATCH_TYPE,
                record.match_type.as_str(),
                value.as_str(),
                now,
            ));
            record.match_type = value;
            changed += 1;
        }
        if let Some(value) = patch.confidence
            && value != record.confidence
        {
            self.changes.push(ChangeEvent::new(
                id,
                fields::CONFIDENCE,
                record.confidence.to_string(),
                value.to_string(),
                now,
            ));
            record.confidence = value;
            changed += 1;
        }
        if let Some(value) = patch.status
            && value != record.status
        {
            self.changes.push(ChangeEvent::new(
                id,
                fields::STATUS,
                record.status.as_str(),
                value.as_str(),
                now,
            ));
            record.status = value;
            changed += 1;
        }
        if let Some(value) = &patch.notes
            && *value != record.notes
        {
            self.changes.push(ChangeEvent::new(
                id,
                fields::NOTES,
                record.notes.clone(),
                value.clone(),
                now,
            ));
            record.notes = value.clone();
            changed += 1;
        }

        if changed > 0 {
            record.last_modified = now;
            record.modified_by = actor;
            self.tracker.mark_dirty_at(Instant::now());
        }
        changed
    }

    /// Removes a record, logging a terminal event.
    ///
    /// Returns the removed record, or `None` (with a warn log) when the
    /// id is unknown.
    pub fn remove(&mut self, id: RecordId) -> Option<MappingRecord> {
        let Some(index) = self.records.iter().position(|r| r.id == id) else {
            warn!(%id, "remove for unknown record ignored");
            return None;
        };
        let record = self.records.remove(index);
        self.changes.push(ChangeEvent::new(
            id,
            fields::RECORD,
            record.source_code.clone(),
            DELETED_SENTINEL,
            Utc::now(),
        ));
        self.tracker.mark_dirty_at(Instant::now());
        Some(record)
    }

    /// Merges classified suggestions into their target records.
    ///
    /// Only records still `unmapped` or `pending` are eligible; a
    /// suggestion against a `mapped` or `rejected` record is dropped,
    /// as is any unresolved (orphan) suggestion. Dropping is not an
    /// error: re-applying the same response against a settled store is
    /// a no-op by design of the eligibility rule.
    pub fn merge_suggestions(&mut self, classified: &[ClassifiedMapping]) -> MergeOutcome {
        let mut outcome = MergeOutcome::default();
        for mapping in classified {
            let Some(target_id) = mapping.merge_target else {
                debug!(source = %mapping.record.source_code, "dropping unresolved suggestion");
                outcome.dropped += 1;
                continue;
            };
            let Some(index) = self.records.iter().position(|r| r.id == target_id) else {
                debug!(%target_id, "dropping suggestion for vanished record");
                outcome.dropped += 1;
                continue;
            };
            let eligible = matches!(
                self.records[index].status,
                MappingStatus::Unmapped | MappingStatus::Pending
            );
            if !eligible {
                debug!(
                    %target_id,
                    status = %self.records[index].status,
                    "dropping suggestion for settled record"
                );
                outcome.dropped += 1;
                continue;
            }

            let suggestion = &mapping.record;
            let mut patch = RecordPatch::new()
                .with_target_code(suggestion.target_code.clone())
                .with_target_description(suggestion.target_description.clone())
                .with_match_type(suggestion.match_type)
                .with_confidence(suggestion.confidence)
                .with_status(MappingStatus::Mapped);
            if !suggestion.notes.is_empty() {
                let existing = &self.records[index].notes;
                let notes = if existing.is_empty() {
                    suggestion.notes.clone()
                } else {
                    format!("{existing}\n{}", suggestion.notes)
                };
                patch = patch.with_notes(notes);
            }
            // Same diff/emit/stamp path as a user edit.
            self.apply_patch(target_id, &patch, Actor::Assistant);
            let record = &mut self.records[index];
            for (key, value) in &suggestion.metadata {
                record.metadata.insert(key.clone(), value.clone());
            }
            outcome.merged += 1;
        }
        if outcome.merged > 0 {
            self.tracker.mark_dirty_at(Instant::now());
        }
        outcome
    }

    /// Drops all records and history.
    pub fn clear(&mut self) {
        self.records.clear();
        self.changes = ChangeLog::new();
        self.tracker.mark_dirty_at(Instant::now());
    }

    /// Recomputes the aggregate context from current state.
    pub fn aggregates(&self) -> AggregateContext {
        let mut counts = StatusCounts::default();
        let mut confidence_sum = 0u64;
        let mut session_id = None;
        for record in &self.records {
            counts.bump(record.status);
            confidence_sum += u64::from(record.confidence);
            if session_id.is_none() {
                session_id = record.metadata.get(metadata::SESSION_ID).cloned();
            }
        }
        let average_confidence = if self.records.is_empty() {
            0.0
        } else {
            confidence_sum as f64 / self.records.len() as f64
        };
        AggregateContext {
            status_counts: counts,
            average_confidence,
            recent_changes: self.changes.to_vec(),
            session_id,
        }
    }
}

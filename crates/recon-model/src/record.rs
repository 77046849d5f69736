//! Mapping record types.
//!
//! A [`MappingRecord`] is one proposed correspondence between a source
//! system item and a target system item. Records are created by ingestion
//! (in batch) or by the match classifier (singly, for orphan suggestions)
//! and mutated only through the mapping store.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::RecordId;

/// Coarse classification of mapping quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Exact,
    Semantic,
    Manual,
    None,
}

impl MatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "Exact",
            Self::Semantic => "Semantic",
            Self::Manual => "Manual",
            Self::None => "None",
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workflow status of a mapping record.
///
/// The usual progression is `unmapped -> pending -> {mapped, rejected}`,
/// but no transition is structurally forbidden: human override must
/// always be possible. Only suggestion merging checks eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingStatus {
    Unmapped,
    Pending,
    Mapped,
    Rejected,
}

impl MappingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unmapped => "unmapped",
            Self::Pending => "pending",
            Self::Mapped => "mapped",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for MappingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who performed the most recent mutation of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Actor {
    User,
    Assistant,
}

impl Actor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Well-known metadata keys carried in [`MappingRecord::metadata`].
///
/// Metadata is an open bag; these constants only name the keys the
/// engine itself reads or writes.
pub mod metadata {
    /// Originating file of an ingested record.
    pub const SOURCE_FILE: &str = "sourceFile";
    /// Active reconciliation session.
    pub const SESSION_ID: &str = "sessionId";
    /// Set to `"true"` on records touched by an assistant suggestion.
    pub const ASSISTANT_SUGGESTION: &str = "assistantSuggestion";
    /// Assistant-supplied reasoning text, preserved for audit.
    pub const ASSISTANT_REASONING: &str = "assistantReasoning";
    /// Transcript line the suggestion was parsed from.
    pub const SOURCE_LINE: &str = "sourceLine";
    /// Set to `"true"` on orphan records whose source token did not
    /// resolve to an existing record.
    pub const UNRESOLVED: &str = "unresolved";
    /// Comma-joined alternative target codes offered by the assistant.
    pub const ALTERNATIVES: &str = "alternatives";
}

/// Field names used in change events and patches.
pub mod fields {
    pub const SOURCE_DESCRIPTION: &str = "sourceDescription";
    pub const TARGET_CODE: &str = "targetCode";
    pub const TARGET_DESCRIPTION: &str = "targetDescription";
    pub const MATCH_TYPE: &str = "matchType";
    pub const CONFIDENCE: &str = "confidence";
    pub const STATUS: &str = "status";
    pub const NOTES: &str = "notes";
    /// Pseudo-field used for terminal (deletion) change events.
    pub const RECORD: &str = "record";
}

/// One candidate correspondence between a source item and a target item.
///
/// Field names serialize in camelCase and timestamps as ISO-8601 strings
/// to stay compatible with the persisted snapshot layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingRecord {
    /// Opaque unique identifier, immutable after creation.
    pub id: RecordId,
    /// Natural key used for candidate resolution. Not necessarily unique.
    pub source_code: String,
    pub source_description: String,
    /// Empty until mapped.
    pub target_code: String,
    pub target_description: String,
    pub match_type: MatchType,
    /// 0-100. `Exact` records usually carry 100 but source data may
    /// assign `Exact` with less; the invariant is advisory.
    pub confidence: u8,
    pub status: MappingStatus,
    /// Free text, append-only by convention.
    pub notes: String,
    pub last_modified: DateTime<Utc>,
    pub modified_by: Actor,
    /// Open key/value bag carrying provenance.
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl MappingRecord {
    /// Creates an unmapped record from ingested source fields.
    pub fn from_source(
        id: RecordId,
        source_code: impl Into<String>,
        source_description: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            source_code: source_code.into(),
            source_description: source_description.into(),
            target_code: String::new(),
            target_description: String::new(),
            match_type: MatchType::None,
            confidence: 0,
            status: MappingStatus::Unmapped,
            notes: String::new(),
            last_modified: now,
            modified_by: Actor::User,
            metadata: BTreeMap::new(),
        }
    }

    /// True if this record was flagged as an unresolved orphan.
    pub fn is_orphan(&self) -> bool {
        self.metadata
            .get(metadata::UNRESOLVED)
            .is_some_and(|v| v == "true")
    }
}

/// A partial update to a mapping record's mutable fields.
///
/// `None` fields are left untouched; `Some` fields equal to the current
/// value are treated as no-ops and produce no change event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordPatch {
    pub source_description: Option<String>,
    pub target_code: Option<String>,
    pub target_description: Option<String>,
    pub match_type: Option<MatchType>,
    pub confidence: Option<u8>,
    pub status: Option<MappingStatus>,
    pub notes: Option<String>,
}

impl RecordPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: MappingStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_target_code(mut self, code: impl Into<String>) -> Self {
        self.target_code = Some(code.into());
        self
    }

    pub fn with_target_description(mut self, description: impl Into<String>) -> Self {
        self.target_description = Some(description.into());
        self
    }

    pub fn with_match_type(mut self, match_type: MatchType) -> Self {
        self.match_type = Some(match_type);
        self
    }

    pub fn with_confidence(mut self, confidence: u8) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

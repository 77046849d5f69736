//! Suggestion types flowing from the parser through the classifier.

use serde::{Deserialize, Serialize};

use crate::ids::RecordId;
use crate::record::MappingRecord;

/// A candidate mapping extracted from unstructured assistant text.
///
/// Ephemeral: raw suggestions are classified into records and never
/// persisted. Tokens are trimmed verbatim; they are not assumed to equal
/// any record's `source_code` exactly - resolution happens in the
/// classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSuggestion {
    pub source_token: String,
    pub target_token: String,
    /// 0-100; parser defaults absent or unparsable values to 70.
    pub confidence_percent: u8,
    /// Captured from description-annotated lines only.
    pub target_description: Option<String>,
    /// Captured from a trailing `reasoning:` line, if present.
    pub reasoning: Option<String>,
    /// Alternative target codes from block-format responses.
    pub alternatives: Vec<String>,
    /// 1-based line number in the assistant response.
    pub source_line: usize,
}

impl RawSuggestion {
    pub fn new(
        source_token: impl Into<String>,
        target_token: impl Into<String>,
        confidence_percent: u8,
        source_line: usize,
    ) -> Self {
        Self {
            source_token: source_token.into(),
            target_token: target_token.into(),
            confidence_percent,
            target_description: None,
            reasoning: None,
            alternatives: Vec::new(),
            source_line,
        }
    }
}

/// A classified suggestion ready for merging into the store.
///
/// When `merge_target` is set, the record carries the resolved record's
/// id and source fields and the store applies it as an update. When it
/// is `None`, the record is an orphan: it enters the store through
/// `add`, never through merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedMapping {
    pub record: MappingRecord,
    pub merge_target: Option<RecordId>,
}

impl ClassifiedMapping {
    pub fn is_orphan(&self) -> bool {
        self.merge_target.is_none()
    }
}

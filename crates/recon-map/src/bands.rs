//! Confidence banding.

use recon_model::MatchType;

/// Thresholds dividing suggestion confidence into match types.
///
/// Both bounds are exclusive: a confidence strictly above `exact` bands
/// as [`MatchType::Exact`], strictly above `semantic` as
/// [`MatchType::Semantic`], everything else as [`MatchType::Manual`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfidenceBands {
    pub exact: u8,
    pub semantic: u8,
}

impl Default for ConfidenceBands {
    fn default() -> Self {
        Self {
            exact: 85,
            semantic: 70,
        }
    }
}

impl ConfidenceBands {
    pub fn classify(&self, confidence: u8) -> MatchType {
        if confidence > self.exact {
            MatchType::Exact
        } else if confidence > self.semantic {
            MatchType::Semantic
        } else {
            MatchType::Manual
        }
    }
}

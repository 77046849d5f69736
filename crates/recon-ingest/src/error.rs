//! Ingestion error taxonomy.
//!
//! Only a missing source-code column is fatal. Everything else is a
//! warning collected on the ingest report: ingestion proceeds and the
//! caller decides how loudly to surface them.

use std::fmt;

use thiserror::Error;

/// Fatal ingestion failure. Nothing is added to the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    /// No header could be resolved to the source code field.
    #[error("cannot detect a source code column in headers: {headers:?}")]
    MissingSourceColumn { headers: Vec<String> },
}

/// Non-fatal ingestion condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestWarning {
    /// No source description column; mapping quality is degraded.
    MissingDescriptionColumn,
    /// Rows with an empty source code were dropped.
    EmptySourceCodes { dropped: usize },
    /// The same source code appeared on more than one row. Duplicates
    /// are tolerated, never deduplicated.
    DuplicateSourceCodes { duplicates: usize },
}

impl fmt::Display for IngestWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDescriptionColumn => {
                write!(f, "no source description column detected; mapping quality degraded")
            }
            Self::EmptySourceCodes { dropped } => {
                write!(f, "dropped {dropped} row(s) with empty source code")
            }
            Self::DuplicateSourceCodes { duplicates } => {
                write!(f, "{duplicates} duplicate source code(s) across rows")
            }
        }
    }
}

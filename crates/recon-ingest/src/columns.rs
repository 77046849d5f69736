//! Column normalization.
//!
//! Maps arbitrary header names in an ingested table to the four
//! canonical mapping fields. Matching is deliberately permissive:
//! headers are normalized (lowercased, separators collapsed to spaces)
//! and an alias matches when either string contains the other, so
//! variants like `"Source_Code "`, `"CODE"` or `"acct-code"` all
//! resolve.

use tracing::debug;

use recon_model::normalize_text;

use crate::error::{IngestError, IngestWarning};

/// Known header aliases per canonical field, most specific first.
///
/// Aliases are written in normalized form; `normalize_text` folds
/// underscore/hyphen header variants onto them. The generic
/// `code`/`description` fallbacks sit last so that a specific alias
/// always claims its header before the fallback fires.
const SOURCE_CODE_ALIASES: &[&str] = &[
    "source code",
    "account code",
    "gl account",
    "acct code",
    "code",
];

const SOURCE_DESCRIPTION_ALIASES: &[&str] = &[
    "source description",
    "account description",
    "gl description",
    "account name",
    "description",
];

const TARGET_CODE_ALIASES: &[&str] = &[
    "target code",
    "target account",
    "mapped code",
    "destination code",
];

const TARGET_DESCRIPTION_ALIASES: &[&str] = &[
    "target description",
    "mapped description",
    "destination description",
];

/// Resolved header names for the canonical mapping fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub source_code: String,
    pub source_description: Option<String>,
    pub target_code: Option<String>,
    pub target_description: Option<String>,
}

/// Detects canonical columns in a header list.
///
/// Source code is required; its absence is fatal. A missing source
/// description degrades to a warning. Target columns are optional and
/// produce no warning - tables without them simply ingest as unmapped.
pub fn detect_columns(headers: &[String]) -> Result<(ColumnMap, Vec<IngestWarning>), IngestError> {
    let mut claimed: Vec<&str> = Vec::new();
    let source_code = find_header(headers, SOURCE_CODE_ALIASES, &claimed).ok_or_else(|| {
        IngestError::MissingSourceColumn {
            headers: headers.to_vec(),
        }
    })?;
    claimed.push(source_code);

    let source_description = find_header(headers, SOURCE_DESCRIPTION_ALIASES, &claimed);
    if let Some(header) = source_description {
        claimed.push(header);
    }
    let target_code = find_header(headers, TARGET_CODE_ALIASES, &claimed);
    if let Some(header) = target_code {
        claimed.push(header);
    }
    let target_description = find_header(headers, TARGET_DESCRIPTION_ALIASES, &claimed);

    let mut warnings = Vec::new();
    if source_description.is_none() {
        warnings.push(IngestWarning::MissingDescriptionColumn);
    }

    let map = ColumnMap {
        source_code: source_code.to_string(),
        source_description: source_description.map(String::from),
        target_code: target_code.map(String::from),
        target_description: target_description.map(String::from),
    };
    debug!(?map, "detected columns");
    Ok((map, warnings))
}

/// Finds the first header matching any alias, bidirectional containment.
///
/// Aliases are tried most specific first; within one alias, ties are
/// broken by header order in the original table.
fn find_header<'a>(
    headers: &'a [String],
    aliases: &[&str],
    claimed: &[&str],
) -> Option<&'a str> {
    for alias in aliases {
        for header in headers {
            if claimed.contains(&header.as_str()) {
                continue;
            }
            let normalized = normalize_text(header);
            if normalized.is_empty() {
                continue;
            }
            if normalized.contains(alias) || alias.contains(normalized.as_str()) {
                return Some(header.as_str());
            }
        }
    }
    None
}

//! Labeled-block suggestion format.
//!
//! Single-account responses arrive as a block of labeled lines:
//!
//! ```text
//! MAPPING: 101000
//! CONFIDENCE: 95
//! REASONING: Both are operating cash accounts
//! ALTERNATIVES: 102000, 104000
//! ```
//!
//! Labels are case-insensitive and may appear in any order; the block
//! names only the target, so the caller supplies the source code it
//! asked about.

use recon_model::RawSuggestion;

use crate::line::DEFAULT_CONFIDENCE;

/// Parses one labeled block into a suggestion for `source_code`.
///
/// Returns `None` when no `MAPPING:` line is present. `ALTERNATIVES:`
/// entries are comma-separated; empty entries and the literal `none`
/// are discarded.
pub fn parse_block_response(source_code: &str, text: &str) -> Option<RawSuggestion> {
    let mut target = None;
    let mut confidence = None;
    let mut reasoning = None;
    let mut alternatives = Vec::new();
    let mut mapping_line = 1usize;

    for (idx, line) in text.lines().enumerate() {
        if let Some(value) = labeled(line, "mapping") {
            target = Some(value.to_string());
            mapping_line = idx + 1;
        } else if let Some(value) = labeled(line, "confidence") {
            confidence = parse_percent(value);
        } else if let Some(value) = labeled(line, "reasoning") {
            if !value.is_empty() {
                reasoning = Some(value.to_string());
            }
        } else if let Some(value) = labeled(line, "alternatives") {
            alternatives = value
                .split(',')
                .map(str::trim)
                .filter(|alt| !alt.is_empty() && !alt.eq_ignore_ascii_case("none"))
                .map(String::from)
                .collect();
        }
    }

    let target = target.filter(|t| !t.is_empty())?;
    let mut suggestion = RawSuggestion::new(
        source_code,
        target,
        confidence.unwrap_or(DEFAULT_CONFIDENCE),
        mapping_line,
    );
    suggestion.reasoning = reasoning;
    suggestion.alternatives = alternatives;
    Some(suggestion)
}

fn labeled<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let (head, rest) = line.trim_start().split_once(':')?;
    if head.trim_end().eq_ignore_ascii_case(label) {
        Some(rest.trim())
    } else {
        None
    }
}

fn parse_percent(value: &str) -> Option<u8> {
    let digits = value.trim_end_matches('%').trim();
    let parsed: u32 = digits.parse().ok()?;
    Some(parsed.min(100) as u8)
}

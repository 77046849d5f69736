//! Line-oriented suggestion grammar.
//!
//! Two production rules, most specific first:
//!
//! 1. Description-annotated:
//!    `<src> -> <tgt> (<NN>%) # <anything> -> <target description>`
//! 2. Enumerated: `<ordinal>. <src> -> <tgt> (<NN>%)`
//!
//! Either may appear anywhere in the response. Lines matching neither
//! rule are skipped; the parser never fails on malformed input.

use tracing::trace;

use recon_model::RawSuggestion;

/// Confidence assigned when a line carries none, or an unparsable one.
pub const DEFAULT_CONFIDENCE: u8 = 70;

/// Extracts every recognizable suggestion from an assistant response.
///
/// A line immediately following a match that starts with the
/// case-insensitive literal `reasoning:` attaches its remainder to the
/// preceding suggestion.
pub fn parse_response(text: &str) -> Vec<RawSuggestion> {
    let lines: Vec<&str> = text.lines().collect();
    let mut suggestions = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        let Some(mut suggestion) = parse_line(line, idx + 1) else {
            continue;
        };
        if let Some(next) = lines.get(idx + 1)
            && let Some(reasoning) = reasoning_remainder(next)
        {
            suggestion.reasoning = Some(reasoning.to_string());
        }
        trace!(
            source = %suggestion.source_token,
            target = %suggestion.target_token,
            line = suggestion.source_line,
            "parsed suggestion"
        );
        suggestions.push(suggestion);
    }
    suggestions
}

fn parse_line(line: &str, number: usize) -> Option<RawSuggestion> {
    parse_annotated(line, number).or_else(|| parse_enumerated(line, number))
}

/// Production 1: arrow mapping with a `#` comment whose tail holds a
/// second arrow pointing at the target description.
fn parse_annotated(line: &str, number: usize) -> Option<RawSuggestion> {
    let (head, comment) = line.split_once('#')?;
    let (_, description) = comment.rsplit_once("->")?;
    let description = description.trim();
    if description.is_empty() {
        return None;
    }
    let (source, target, confidence) = parse_mapping(strip_ordinal(head))?;
    let mut suggestion = RawSuggestion::new(source, target, confidence, number);
    suggestion.target_description = Some(description.to_string());
    Some(suggestion)
}

/// Production 2: `<ordinal>. <src> -> <tgt> (<NN>%)`.
fn parse_enumerated(line: &str, number: usize) -> Option<RawSuggestion> {
    let rest = ordinal_remainder(line)?;
    let (source, target, confidence) = parse_mapping(rest)?;
    Some(RawSuggestion::new(source, target, confidence, number))
}

/// Splits `<src> -> <tgt> (<NN>%)` into its parts.
///
/// The confidence group is optional; absent or unparsable values fall
/// back to [`DEFAULT_CONFIDENCE`].
fn parse_mapping(text: &str) -> Option<(String, String, u8)> {
    let (source, rest) = text.split_once("->")?;
    let source = source.trim();
    if source.is_empty() {
        return None;
    }
    let (target, confidence) = match rest.split_once('(') {
        Some((target, tail)) => (target.trim(), parse_confidence(tail)),
        None => (rest.trim(), None),
    };
    if target.is_empty() {
        return None;
    }
    Some((
        source.to_string(),
        target.to_string(),
        confidence.unwrap_or(DEFAULT_CONFIDENCE),
    ))
}

fn parse_confidence(tail: &str) -> Option<u8> {
    let inner = tail.split(')').next()?;
    let digits = inner.trim().trim_end_matches('%').trim();
    let value: u32 = digits.parse().ok()?;
    Some(value.min(100) as u8)
}

fn ordinal_remainder(line: &str) -> Option<&str> {
    let (head, rest) = line.trim_start().split_once('.')?;
    if head.is_empty() || !head.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    Some(rest)
}

fn strip_ordinal(text: &str) -> &str {
    ordinal_remainder(text).unwrap_or(text)
}

fn reasoning_remainder(line: &str) -> Option<&str> {
    let (head, rest) = line.trim_start().split_once(':')?;
    if head.eq_ignore_ascii_case("reasoning") {
        Some(rest.trim())
    } else {
        None
    }
}

//! In-place edits on a [`RawDocument`].
//!
//! Every function here recomputes section spans with a fresh scan instead of
//! trusting a cached line index, because inserting a line shifts everything
//! after it. None of them delete or reorder lines. Callers rebuild the
//! [`ParsedModel`](super::ParsedModel) afterwards when the returned flag says
//! the document changed.
//!
//! # Duplicate keys
//!
//! A section may contain the same key more than once. The model keeps the
//! last occurrence. [`set`] rewrites every active occurrence and [`disable`]
//! comments out every active occurrence, so no stale duplicate can resurface.
//! [`enable`] uncomments only the first disabled occurrence.

use std::ops::Range;

use super::classify::{
    LineKind, classify, comment_out, extract_trailing_comment, format_entry, format_header,
    indentation, uncomment,
};
use super::document::RawDocument;

/// Sets `key` to `value` inside `section`.
///
/// - A key that only exists commented out is enabled first, then rewritten.
/// - An active key is rewritten in place, keeping indentation and any
///   trailing comment.
/// - A missing key is inserted right before the next header of the section's
///   last span.
/// - A missing section is appended as a header followed by the entry.
///
/// Returns `true` if the document changed.
pub fn set(document: &mut RawDocument, section: &str, key: &str, value: &str) -> bool {
    let spans = document.spans(section);

    let Some(last_span) = spans.last().cloned() else {
        document.push_line(format_header(section));
        document.push_line(format_entry("", key, value, None));
        return true;
    };

    let mut active = active_lines(document, &spans, key);
    let mut changed = false;

    if active.is_empty() {
        if let Some(index) = find_disabled(document, &spans, key) {
            uncomment_line(document, index);
            active.push(index);
            changed = true;
        }
    }

    if active.is_empty() {
        document.insert_line(last_span.end, format_entry("", key, value, None));
        return true;
    }

    for index in active {
        let line = &document.lines()[index];
        if is_exact_entry(line, key, value) {
            continue;
        }

        let rewritten = format_entry(
            indentation(line),
            key,
            value,
            extract_trailing_comment(line),
        );
        document.replace_line(index, rewritten);
        changed = true;
    }

    changed
}

/// Uncomments the first disabled occurrence of `key` in `section`.
///
/// Does nothing if the key is already active or no commented line matches.
/// Returns `true` if the document changed.
pub fn enable(document: &mut RawDocument, section: &str, key: &str) -> bool {
    let spans = document.spans(section);

    if !active_lines(document, &spans, key).is_empty() {
        return false;
    }

    match find_disabled(document, &spans, key) {
        Some(index) => {
            uncomment_line(document, index);
            true
        }
        None => false,
    }
}

/// Comments out every active occurrence of `key` in `section`.
///
/// Returns `true` if the document changed.
pub fn disable(document: &mut RawDocument, section: &str, key: &str) -> bool {
    let spans = document.spans(section);
    let active = active_lines(document, &spans, key);

    for &index in &active {
        let disabled = comment_out(&document.lines()[index]);
        document.replace_line(index, disabled);
    }

    !active.is_empty()
}

/// Returns `true` if `key` has no active line but a commented-out one.
#[must_use]
pub fn is_disabled(document: &RawDocument, section: &str, key: &str) -> bool {
    let spans = document.spans(section);
    active_lines(document, &spans, key).is_empty()
        && find_disabled(document, &spans, key).is_some()
}

/// Indices of active lines for `key`, in document order.
fn active_lines(document: &RawDocument, spans: &[Range<usize>], key: &str) -> Vec<usize> {
    spans
        .iter()
        .cloned()
        .flatten()
        .filter(|&index| entry_key_matches(&document.lines()[index], key))
        .collect()
}

/// Index of the first commented line whose uncommented text is an entry
/// for `key`.
fn find_disabled(document: &RawDocument, spans: &[Range<usize>], key: &str) -> Option<usize> {
    spans.iter().cloned().flatten().find(|&index| {
        uncomment(&document.lines()[index]).is_some_and(|line| entry_key_matches(&line, key))
    })
}

fn uncomment_line(document: &mut RawDocument, index: usize) {
    if let Some(line) = uncomment(&document.lines()[index]) {
        document.replace_line(index, line);
    }
}

fn entry_key_matches(line: &str, key: &str) -> bool {
    matches!(classify(line), LineKind::Entry { key: k, .. } if k.eq_ignore_ascii_case(key))
}

fn is_exact_entry(line: &str, key: &str, value: &str) -> bool {
    matches!(classify(line), LineKind::Entry { key: k, value: v, .. } if k == key && v == value)
}

#[cfg(test)]
#[path = "mutate_tests.rs"]
mod tests;

//! Line normalization and label splitting
//!
//! These functions work directly on byte slices. Input is not required to be
//! valid UTF-8: bytes outside ASCII are carried through unchanged.

use std::borrow::Cow;

/// Label separator.
pub const LABEL_SEPARATOR: u8 = b'.';

// =============================================================================
// Normalization
// =============================================================================

/// Whitespace stripped from both ends of a line.
#[inline]
fn is_line_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

/// Trim spaces, tabs, CR and LF from both ends of a line.
#[inline]
pub fn trim_line(line: &[u8]) -> &[u8] {
    let start = match line.iter().position(|&b| !is_line_space(b)) {
        Some(pos) => pos,
        None => return &[],
    };
    // A non-space byte exists, so rposition cannot fail here.
    let end = line.iter().rposition(|&b| !is_line_space(b)).map_or(start, |pos| pos + 1);
    &line[start..end]
}

/// Trim and case-fold a raw line.
///
/// Returns `None` for blank lines. The result borrows from `line` unless
/// some byte actually needed folding.
pub fn normalize_line(line: &[u8]) -> Option<Cow<'_, [u8]>> {
    let trimmed = trim_line(line);
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.iter().any(u8::is_ascii_uppercase) {
        Some(Cow::Owned(trimmed.to_ascii_lowercase()))
    } else {
        Some(Cow::Borrowed(trimmed))
    }
}

// =============================================================================
// Splitting
// =============================================================================

/// Split a normalized domain into labels, most specific label first.
///
/// Empty labels produced by leading, trailing or doubled dots are kept.
#[inline]
pub fn split_labels(domain: &[u8]) -> impl DoubleEndedIterator<Item = &[u8]> {
    domain.split(|&b| b == LABEL_SEPARATOR)
}

/// Split a normalized domain into labels, top-level label first.
///
/// This is the order used for trie insertion.
#[inline]
pub fn reversed_labels(domain: &[u8]) -> impl Iterator<Item = &[u8]> {
    domain.rsplit(|&b| b == LABEL_SEPARATOR)
}

/// Join labels given top-level first back into a conventional domain.
pub fn join_reversed(path: &[&[u8]]) -> Vec<u8> {
    let len = path.iter().map(|l| l.len()).sum::<usize>() + path.len().saturating_sub(1);
    let mut out = Vec::with_capacity(len);
    for (i, label) in path.iter().rev().enumerate() {
        if i > 0 {
            out.push(LABEL_SEPARATOR);
        }
        out.extend_from_slice(label);
    }
    out
}

//! Grapheme-cluster boundary and width helpers.
//!
//! Grounded on `core-text::grapheme`'s `prev_boundary`/`next_boundary`/
//! `visual_col` shape, built on `unicode_segmentation::UnicodeSegmentation`
//! rather than the base-codepoint-plus-combining-marks walk the original
//! C++ `unicodeGraphemeLen` uses — `unicode-segmentation` implements the
//! full UAX #29 algorithm, a strict superset of that simpler rule.

use unicode_segmentation::UnicodeSegmentation;

use crate::width::codepoint_width;

/// Length in bytes of the grapheme cluster starting at `pos`. Returns 0 at
/// end of buffer.
pub fn grapheme_len(s: &str, pos: usize) -> usize {
    if pos >= s.len() {
        return 0;
    }
    for (idx, g) in s.grapheme_indices(true) {
        if idx == pos {
            return g.len();
        }
    }
    0
}

/// Length in bytes of the grapheme cluster ending at `pos`. Returns 0 if
/// `pos == 0`.
pub fn prev_grapheme_len(s: &str, pos: usize) -> usize {
    if pos == 0 || pos > s.len() {
        return 0;
    }
    let mut start = 0;
    for (idx, _) in s.grapheme_indices(true) {
        if idx >= pos {
            break;
        }
        start = idx;
    }
    pos - start
}

/// Previous grapheme boundary at or before `pos`.
pub fn prev_boundary(s: &str, pos: usize) -> usize {
    pos - prev_grapheme_len(s, pos)
}

/// Next grapheme boundary at or after `pos`.
pub fn next_boundary(s: &str, pos: usize) -> usize {
    pos + grapheme_len(s, pos)
}

/// Iterate grapheme clusters of `s`.
pub fn iter(s: &str) -> impl Iterator<Item = &str> {
    s.graphemes(true)
}

/// Display width in terminal columns of one grapheme cluster: the sum of
/// its scalar values' widths (combining marks contribute 0).
pub fn cluster_width(g: &str) -> usize {
    g.chars().map(|c| codepoint_width(c as u32)).sum()
}

/// Display column of `pos` within `s`: sum of cluster widths of every
/// grapheme strictly before `pos`.
pub fn visual_col(s: &str, pos: usize) -> usize {
    let mut col = 0;
    for (idx, g) in s.grapheme_indices(true) {
        if idx >= pos {
            break;
        }
        col += cluster_width(g);
    }
    col
}

/// Byte span and display width of every grapheme cluster in `s`, in order.
/// Used by the renderer to slide/truncate the visible window by whole
/// graphemes rather than bytes or chars.
pub fn spans(s: &str) -> Vec<(usize, usize, usize)> {
    s.grapheme_indices(true)
        .map(|(start, g)| (start, start + g.len(), cluster_width(g)))
        .collect()
}

/// True iff the grapheme cluster starting at byte 0 of `g` looks like the
/// start of a "word" for delete-prev-word purposes: alphanumeric or `_`.
pub fn is_word(g: &str) -> bool {
    g.chars()
        .next()
        .map(|c| c == '_' || c.is_alphanumeric())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn boundaries_on_ascii() {
        let s = "abc";
        assert_eq!(grapheme_len(s, 0), 1);
        assert_eq!(prev_grapheme_len(s, 1), 1);
        assert_eq!(next_boundary(s, 0), 1);
        assert_eq!(prev_boundary(s, 1), 0);
    }

    #[test]
    fn combining_mark_joins_base_into_one_cluster() {
        // 'e' + combining acute accent is one grapheme cluster.
        let s = "e\u{0301}bc";
        assert_eq!(grapheme_len(s, 0), 3); // 'e' + 2-byte combining mark
        assert_eq!(cluster_width(&s[0..3]), 1);
    }

    #[test]
    fn wide_cjk_cluster_width_is_two() {
        let s = "あい";
        assert_eq!(cluster_width("あ"), 2);
        assert_eq!(visual_col(s, 3), 2); // after one 3-byte CJK grapheme
    }

    #[test]
    fn family_emoji_is_single_cluster() {
        // man + ZWJ + woman + ZWJ + girl: one grapheme cluster.
        let s = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}";
        let clusters: Vec<&str> = iter(s).collect();
        assert_eq!(clusters.len(), 1);
    }

    #[test]
    fn grapheme_len_at_end_is_zero() {
        let s = "abc";
        assert_eq!(grapheme_len(s, 3), 0);
        assert_eq!(prev_grapheme_len(s, 0), 0);
    }

    #[test]
    fn is_word_classifies_identifier_start() {
        assert!(is_word("a"));
        assert!(is_word("_"));
        assert!(!is_word(" "));
        assert!(!is_word("."));
    }
}

//! Multi-line (wrapped) display refresh.
//! Grounded byte-for-byte on `linenoise.hpp::refreshMultiLine`.

use rawline_edit::EditState;
use rawline_text::column_pos_multiline;
use std::fmt::Write as _;

/// Result of a multi-line render: the escape-sequence string to write, and
/// the `(maxrows, old_col_pos)` the caller should persist into `EditState`
/// — but only when rendering the *real* buffer, not a completion-candidate
/// override (a render-override design avoiding aliasing — the
/// override's layout must not leak into the session's persistent state).
pub struct MultiLineRender {
    pub bytes: String,
    pub maxrows: usize,
    pub old_col_pos: usize,
}

/// Render `buf`/`pos` into the multi-line escape sequence, using
/// `prev_maxrows`/`prev_old_col_pos` as the state of the previous paint to
/// clear.
pub fn render(
    state: &EditState,
    buf: &str,
    pos: usize,
    prev_maxrows: usize,
    prev_old_col_pos: usize,
) -> MultiLineRender {
    let prompt_cols = state.prompt_cols();
    debug_assert!(
        prompt_cols < state.cols,
        "prompt width must be smaller than terminal width"
    );
    let cols = state.cols;

    let colpos_end = column_pos_multiline(buf, buf.len(), cols, prompt_cols);
    let mut rows = (prompt_cols + colpos_end + cols - 1) / cols;
    let rpos = (prompt_cols + prev_old_col_pos + cols) / cols;
    let old_rows = prev_maxrows;
    let mut maxrows = prev_maxrows;
    if rows > maxrows {
        maxrows = rows;
    }

    let mut out = String::new();

    // Move to the bottom of the previous paint, then erase upward row by
    // row, finally erasing the top row.
    if old_rows > rpos {
        let _ = write!(out, "\x1b[{}B", old_rows - rpos);
    }
    for _ in 0..old_rows.saturating_sub(1) {
        out.push_str("\r\x1b[0K\x1b[1A");
    }
    out.push_str("\r\x1b[0K");

    out.push_str(&state.prompt);
    out.push_str(buf);

    let colpos2 = column_pos_multiline(buf, pos, cols, prompt_cols);

    // If the cursor sits exactly at the end of a row, reserve a parking
    // row by emitting a newline so the next write doesn't overwrite it.
    if pos > 0 && pos == buf.len() && (colpos2 + prompt_cols) % cols == 0 {
        out.push('\n');
        out.push('\r');
        rows += 1;
        if rows > maxrows {
            maxrows = rows;
        }
    }

    let rpos2 = (prompt_cols + colpos2 + cols) / cols;
    if rows > rpos2 {
        let _ = write!(out, "\x1b[{}A", rows - rpos2);
    }

    let col = (prompt_cols + colpos2) % cols;
    if col != 0 {
        out.push('\r');
        let _ = write!(out, "\x1b[{}C", col);
    } else {
        out.push('\r');
    }

    MultiLineRender {
        bytes: out,
        maxrows,
        old_col_pos: colpos2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn first_render_has_no_erase_sequences() {
        let s = EditState::new("> ", 10, true, 4096);
        let r = render(&s, "hello", 5, 0, 0);
        assert!(!r.bytes.contains("\x1b[1A"));
        assert!(r.bytes.contains("> "));
        assert!(r.bytes.contains("hello"));
    }

    #[test]
    fn wraps_to_second_row_when_content_exceeds_cols() {
        let s = EditState::new("> ", 5, true, 4096);
        // prompt width 2, cols 5: "abcdef" (6 cols) occupies 2 rows.
        let r = render(&s, "abcdef", 6, 0, 0);
        assert_eq!(r.maxrows, 2);
    }

    #[test]
    fn refresh_is_deterministic() {
        let s = EditState::new("> ", 10, true, 4096);
        let a = render(&s, "abc", 1, 0, 0);
        let b = render(&s, "abc", 1, 0, 0);
        assert_eq!(a.bytes, b.bytes);
        assert_eq!(a.maxrows, b.maxrows);
        assert_eq!(a.old_col_pos, b.old_col_pos);
    }

    #[test]
    fn wrap_places_cursor_at_expected_row() {
        // Invariant: cursor row == (P + col_pos(b,pos)) / cols.
        let s = EditState::new("> ", 4, true, 4096);
        let pos = 4usize;
        let r = render(&s, "abcdefgh", pos, 0, 0);
        let expected_row = (s.prompt_cols() + pos) / s.cols;
        // rpos2 computed internally; re-derive from public colpos for the check.
        let colpos = column_pos_multiline("abcdefgh", pos, s.cols, s.prompt_cols());
        assert_eq!((s.prompt_cols() + colpos) / s.cols, expected_row);
    }
}

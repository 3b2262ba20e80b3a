//! Single-line display refresh.
//! Grounded on `linenoise.hpp::refreshSingleLine`.

use rawline_edit::EditState;
use rawline_text::spans;

/// Render `buf`/`pos` (possibly a completion-candidate override, never the
/// persistent `state.buf`/`state.pos` directly — see [`crate::refresh`])
/// into one escape-sequence string ready for a single `write`.
pub fn render(state: &EditState, buf: &str, pos: usize) -> String {
    let prompt_cols = state.prompt_cols();
    debug_assert!(
        prompt_cols < state.cols,
        "prompt width must be smaller than terminal width"
    );
    let cols = state.cols;
    let graphemes = spans(buf);

    // Slide the visible window right by whole graphemes from the front
    // until the cursor fits, then truncate the tail by whole graphemes
    // from the back until the total width fits.
    let mut visible_start_idx = 0usize;
    let mut cursor_grapheme_idx = graphemes
        .iter()
        .position(|(s, e, _)| pos >= *s && pos <= *e)
        .unwrap_or(graphemes.len());

    let col_of = |from_idx: usize, to_idx: usize| -> usize {
        graphemes[from_idx..to_idx].iter().map(|(_, _, w)| w).sum()
    };

    while prompt_cols + col_of(visible_start_idx, cursor_grapheme_idx) >= cols
        && visible_start_idx < cursor_grapheme_idx
    {
        visible_start_idx += 1;
    }

    let mut visible_end_idx = graphemes.len();
    while visible_end_idx > visible_start_idx {
        let width: usize = prompt_cols + col_of(visible_start_idx, visible_end_idx);
        if width <= cols {
            break;
        }
        visible_end_idx -= 1;
    }
    if cursor_grapheme_idx > visible_end_idx {
        cursor_grapheme_idx = visible_end_idx;
    }

    let visible_start_byte = graphemes.get(visible_start_idx).map(|(s, _, _)| *s).unwrap_or(buf.len());
    let visible_end_byte = graphemes
        .get(visible_end_idx.saturating_sub(1))
        .map(|(_, e, _)| *e)
        .filter(|_| visible_end_idx > visible_start_idx)
        .unwrap_or(visible_start_byte);
    let visible = &buf[visible_start_byte..visible_end_byte.max(visible_start_byte)];

    let cursor_col = col_of(visible_start_idx, cursor_grapheme_idx);

    let mut out = String::new();
    out.push('\r');
    out.push_str(&state.prompt);
    out.push_str(visible);
    out.push_str("\x1b[0K");
    out.push('\r');
    let target_col = prompt_cols + cursor_col;
    if target_col > 0 {
        out.push_str(&format!("\x1b[{}C", target_col));
    }
    out
}

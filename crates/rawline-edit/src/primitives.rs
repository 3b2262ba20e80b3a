//! Editing primitives. Grounded on
//! `core-actions::dispatcher::edit::handle_edit`'s shape of
//! grapheme-boundary-aware mutation plus structured trace logging, and on
//! `linenoise.hpp`'s `linenoiseEdit*` functions for exact semantics.

use crate::state::EditState;
use rawline_text::{column_pos, next_boundary, prev_boundary};

/// Outcome of [`insert`]: whether the caller must trigger a full refresh or
/// may take the single-line fast path of just writing the inserted bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Buffer would exceed `line_length_limit`; nothing was changed.
    Rejected,
    /// Mutated; caller must call the refresh routine.
    Refresh,
    /// Mutated; single-line mode, cursor at end-of-line, and the new
    /// content still fits on the row — caller may just write `bytes` to
    /// the output stream instead of a full refresh.
    FastAppend,
}

/// Insert `grapheme` at `state.pos`. Fails closed (returns `Rejected`,
/// changes nothing) if it would grow the buffer past `line_length_limit`.
pub fn insert(state: &mut EditState, grapheme: &str) -> InsertOutcome {
    if state.buf.len() + grapheme.len() >= state.line_length_limit {
        return InsertOutcome::Rejected;
    }
    let was_append = state.pos == state.buf.len();
    state.buf.insert_str(state.pos, grapheme);
    state.pos += grapheme.len();
    tracing::trace!(target: "edit", op = "insert", grapheme, pos = state.pos, "edit");

    if !state.multiline
        && was_append
        && state.prompt_cols() + column_pos(&state.buf) < state.cols
    {
        InsertOutcome::FastAppend
    } else {
        InsertOutcome::Refresh
    }
}

/// `pos -= prev_grapheme_len(buf, pos)` if `pos > 0`.
pub fn move_left(state: &mut EditState) -> bool {
    if state.pos == 0 {
        return false;
    }
    state.pos = prev_boundary(&state.buf, state.pos);
    true
}

/// `pos += grapheme_len(buf, len, pos)` if `pos < len`.
pub fn move_right(state: &mut EditState) -> bool {
    if state.pos >= state.buf.len() {
        return false;
    }
    state.pos = next_boundary(&state.buf, state.pos);
    true
}

pub fn move_home(state: &mut EditState) -> bool {
    if state.pos == 0 {
        return false;
    }
    state.pos = 0;
    true
}

pub fn move_end(state: &mut EditState) -> bool {
    if state.pos == state.buf.len() {
        return false;
    }
    state.pos = state.buf.len();
    true
}

/// Remove the grapheme ending at `pos`.
pub fn backspace(state: &mut EditState) -> bool {
    if state.pos == 0 {
        return false;
    }
    let start = prev_boundary(&state.buf, state.pos);
    state.buf.replace_range(start..state.pos, "");
    state.pos = start;
    tracing::trace!(target: "edit", op = "backspace", pos = state.pos, "edit");
    true
}

/// Remove the grapheme starting at `pos`. Covers both Ctrl-D on a
/// non-empty buffer and the Delete key.
pub fn delete(state: &mut EditState) -> bool {
    if state.pos >= state.buf.len() {
        return false;
    }
    let end = next_boundary(&state.buf, state.pos);
    state.buf.replace_range(state.pos..end, "");
    tracing::trace!(target: "edit", op = "delete", pos = state.pos, "edit");
    true
}

/// Swap the graphemes immediately before and at/after `pos`, then advance
/// past the swapped pair. Grapheme-level rather than byte-level: the
/// original's byte-level swap (`std::swap(buf[pos-1], buf[pos])`) can split
/// a multi-byte code point, whereas this keeps the "bytes are valid UTF-8"
/// invariant intact for every primitive.
pub fn transpose(state: &mut EditState) -> bool {
    if state.pos == 0 || state.pos >= state.buf.len() {
        return false;
    }
    let left_start = prev_boundary(&state.buf, state.pos);
    let right_end = next_boundary(&state.buf, state.pos);
    let left = state.buf[left_start..state.pos].to_string();
    let right = state.buf[state.pos..right_end].to_string();
    state.buf.replace_range(left_start..right_end, &(right.clone() + &left));
    state.pos = if right_end < state.buf.len() {
        left_start + right.len() + left.len()
    } else {
        state.buf.len()
    };
    tracing::trace!(target: "edit", op = "transpose", pos = state.pos, "edit");
    true
}

/// Truncate the buffer at `pos` (Ctrl-K).
pub fn kill_line_to_end(state: &mut EditState) -> bool {
    if state.pos >= state.buf.len() {
        return false;
    }
    state.buf.truncate(state.pos);
    true
}

/// Clear the whole buffer (Ctrl-U).
pub fn kill_whole_line(state: &mut EditState) -> bool {
    if state.buf.is_empty() {
        return false;
    }
    state.buf.clear();
    state.pos = 0;
    true
}

/// Move `pos` left over trailing spaces then over non-spaces, deleting the
/// span (Ctrl-W).
pub fn delete_prev_word(state: &mut EditState) -> bool {
    if state.pos == 0 {
        return false;
    }
    let old_pos = state.pos;
    let mut p = state.pos;
    while p > 0 && state.buf.as_bytes()[p - 1] == b' ' {
        p -= 1;
    }
    while p > 0 && state.buf.as_bytes()[p - 1] != b' ' {
        p -= 1;
    }
    state.buf.replace_range(p..old_pos, "");
    state.pos = p;
    tracing::trace!(target: "edit", op = "delete_prev_word", pos = state.pos, "edit");
    true
}

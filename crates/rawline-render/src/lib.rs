//! Display refresh: one entry point, two algorithms.
//!
//! Grounded on `linenoise.hpp::refreshLine`'s dispatch-by-mode shape and on
//! `core-render::writer::Writer`'s discipline of assembling every escape
//! sequence into one buffer before a single `write`/`flush` call, so a
//! refresh never tears across multiple syscalls.

pub mod multi_line;
pub mod single_line;

use std::io::{self, Write};

use rawline_edit::EditState;

/// Redraw the edited line so the screen matches `state`.
///
/// `override_buf`, when `Some`, displays that string instead of
/// `state.buf`/`state.pos` (cursor implicitly at its end) without mutating
/// `state` — a render-override parameter in place
/// of the original's buf/len/pos pointer-swap-and-restore trick used by the
/// completion micro-mode.
pub fn refresh<W: Write>(
    state: &mut EditState,
    out: &mut W,
    override_buf: Option<&str>,
) -> io::Result<()> {
    let bytes = match override_buf {
        Some(candidate) => render_bytes(state, candidate, candidate.len(), false),
        None => render_bytes(state, &state.buf.clone(), state.pos, true),
    };
    out.write_all(bytes.as_bytes())?;
    out.flush()
}

fn render_bytes(state: &mut EditState, buf: &str, pos: usize, persist: bool) -> String {
    if state.multiline {
        let r = multi_line::render(state, buf, pos, state.maxrows, state.old_col_pos);
        if persist {
            state.maxrows = r.maxrows;
            state.old_col_pos = r.old_col_pos;
        }
        tracing::trace!(target: "render", mode = "multiline", rows = r.maxrows, "refresh");
        r.bytes
    } else {
        let bytes = single_line::render(state, buf, pos);
        tracing::trace!(target: "render", mode = "single_line", "refresh");
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn override_does_not_mutate_persistent_state() {
        let mut state = EditState::new("> ", 10, true, 4096);
        state.buf = "hi".to_string();
        state.pos = 2;
        let mut out = Vec::new();
        refresh(&mut state, &mut out, Some("candidate")).unwrap();
        // maxrows/old_col_pos must reflect the real buffer's own layout,
        // not the override's — since we haven't refreshed the real buffer
        // yet, they remain at their initial values.
        assert_eq!(state.maxrows, 0);
        assert_eq!(state.old_col_pos, 0);
        assert_eq!(state.buf, "hi");
        assert_eq!(state.pos, 2);
    }

    #[test]
    fn real_refresh_persists_layout() {
        let mut state = EditState::new("> ", 10, true, 4096);
        state.buf = "hello world".to_string();
        state.pos = state.buf.len();
        let mut out = Vec::new();
        refresh(&mut state, &mut out, None).unwrap();
        assert!(state.maxrows >= 1);
    }
}

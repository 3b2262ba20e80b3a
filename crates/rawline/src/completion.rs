//! Completion micro-mode. Grounded on
//! `linenoise.hpp::completeLine`, restructured around the render-override
//! parameter of [`rawline_render::refresh`] instead of the original's
//! buf/len/pos pointer-swap trick.

use std::io::{Read, Write};

use rawline_edit::EditState;

use crate::reader::{read_raw_key, Key, KeyReadOutcome};

/// A pure function from the current buffer to an ordered list of candidate
/// replacement strings (`CompletionCallback`).
pub type CompletionCallback = dyn Fn(&str) -> Vec<String> + Send + Sync;

/// What the outer input loop (C7) should do once completion mode exits.
pub enum CompletionOutcome {
    /// No candidates, or ESC cancelled the cycle: re-loop the outer input
    /// without dispatching anything.
    ReLoop,
    /// A non-TAB, non-ESC key ended the cycle; if a candidate was being
    /// displayed it has already been committed into `state.buf`. The outer
    /// loop must still dispatch this key normally.
    Dispatch(Key),
    /// The input stream ended while cycling.
    Eof,
}

/// Run the completion cycle. Entry: TAB was pressed and a callback is
/// registered.
pub fn run<R: Read, W: Write>(
    state: &mut EditState,
    reader: &mut R,
    out: &mut W,
    callback: &CompletionCallback,
) -> std::io::Result<CompletionOutcome> {
    let candidates = callback(&state.buf);
    if candidates.is_empty() {
        rawline_terminal::beep(out)?;
        return Ok(CompletionOutcome::ReLoop);
    }

    let mut i = 0usize;
    loop {
        if i < candidates.len() {
            rawline_render::refresh(state, out, Some(&candidates[i]))?;
        } else {
            rawline_render::refresh(state, out, None)?;
        }

        match read_raw_key(reader)? {
            KeyReadOutcome::Eof => return Ok(CompletionOutcome::Eof),
            KeyReadOutcome::Key(Key::Tab) => {
                i = (i + 1) % (candidates.len() + 1);
                if i == candidates.len() {
                    rawline_terminal::beep(out)?;
                }
            }
            KeyReadOutcome::Key(Key::Esc) => {
                rawline_render::refresh(state, out, None)?;
                return Ok(CompletionOutcome::ReLoop);
            }
            KeyReadOutcome::Key(key) => {
                if i < candidates.len() {
                    state.buf = candidates[i].clone();
                    state.pos = state.buf.len();
                }
                return Ok(CompletionOutcome::Dispatch(key));
            }
            KeyReadOutcome::Ignored => unreachable!("read_raw_key never drains a sequence"),
        }
    }
}

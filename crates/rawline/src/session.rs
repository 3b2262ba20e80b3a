//! Input loop and key dispatch. Grounded on
//! `linenoise.hpp::linenoiseEdit`'s switch-based dispatch.

use std::io::{Read, Write};

use rawline_edit::{self as edit, EditState};
use rawline_history::History;

use crate::completion::{self, CompletionCallback, CompletionOutcome};
use crate::reader::{read_key, Key, KeyReadOutcome};
use crate::ReadResult;

/// Outcome of a single dispatched key.
enum Flow {
    Continue,
    Commit,
    Interrupted,
    Eof,
}

/// Run one `Readline` session to completion: write the prompt, enter the
/// key-dispatch loop, and return once the user commits, cancels, or the
/// stream ends. `raw_in`/`raw_out` must already be in raw mode (the caller
/// owns the [`rawline_terminal::RawGuard`]).
pub fn run<R: Read, W: Write>(
    raw_in: &mut R,
    raw_out: &mut W,
    prompt: &str,
    cols: usize,
    multiline: bool,
    line_length_limit: usize,
    history: &mut History,
    completion_cb: Option<&CompletionCallback>,
) -> std::io::Result<ReadResult> {
    let mut state = EditState::new(prompt, cols, multiline, line_length_limit);
    // `state.history_index` starts at 0 (the live line). The sentinel's
    // array slot is fixed at push time and never moves during the
    // session, so it's tracked separately from the steps-back counter
    // `scroll` maintains.
    let sentinel_idx = history.push_sentinel();

    raw_out.write_all(prompt.as_bytes())?;
    raw_out.flush()?;

    loop {
        let key = match read_key(raw_in)? {
            KeyReadOutcome::Eof => {
                history.pop_sentinel(sentinel_idx);
                return Ok(ReadResult {
                    line: state.buf,
                    quit: true,
                });
            }
            KeyReadOutcome::Ignored => continue,
            KeyReadOutcome::Key(k) => k,
        };

        let key = if matches!(key, Key::Tab) {
            match completion_cb {
                Some(cb) => match completion::run(&mut state, raw_in, raw_out, cb)? {
                    CompletionOutcome::ReLoop => continue,
                    CompletionOutcome::Eof => {
                        history.pop_sentinel(sentinel_idx);
                        return Ok(ReadResult {
                            line: state.buf,
                            quit: true,
                        });
                    }
                    CompletionOutcome::Dispatch(k) => k,
                },
                None => key,
            }
        } else {
            key
        };

        match dispatch(&mut state, history, &key, raw_out)? {
            Flow::Continue => continue,
            Flow::Commit => {
                history.pop_sentinel(sentinel_idx);
                return Ok(ReadResult {
                    line: state.buf,
                    quit: false,
                });
            }
            Flow::Interrupted => {
                history.pop_sentinel(sentinel_idx);
                return Ok(ReadResult {
                    line: String::new(),
                    quit: true,
                });
            }
            Flow::Eof => {
                history.pop_sentinel(sentinel_idx);
                return Ok(ReadResult {
                    line: String::new(),
                    quit: true,
                });
            }
        }
    }
}

fn dispatch<W: Write>(
    state: &mut EditState,
    history: &mut History,
    key: &Key,
    out: &mut W,
) -> std::io::Result<Flow> {
    match key {
        Key::Enter => {
            if state.multiline && edit::move_end(state) {
                rawline_render::refresh(state, out, None)?;
            }
            return Ok(Flow::Commit);
        }
        Key::CtrlC => return Ok(Flow::Interrupted),
        Key::CtrlD => {
            if !state.buf.is_empty() {
                edit::delete(state);
            } else {
                return Ok(Flow::Eof);
            }
        }
        Key::Backspace => {
            edit::backspace(state);
        }
        Key::Delete => {
            edit::delete(state);
        }
        Key::CtrlT => {
            edit::transpose(state);
        }
        Key::CtrlB | Key::Left => {
            edit::move_left(state);
        }
        Key::CtrlF | Key::Right => {
            edit::move_right(state);
        }
        Key::CtrlA | Key::Home => {
            edit::move_home(state);
        }
        Key::CtrlE | Key::End => {
            edit::move_end(state);
        }
        Key::CtrlP | Key::Up => {
            edit::scroll(state, history, edit::Direction::Prev);
        }
        Key::CtrlN | Key::Down => {
            edit::scroll(state, history, edit::Direction::Next);
        }
        Key::CtrlU => {
            edit::kill_whole_line(state);
        }
        Key::CtrlK => {
            edit::kill_line_to_end(state);
        }
        Key::CtrlL => {
            rawline_terminal::clear_screen(out)?;
            state.maxrows = 0;
            state.old_col_pos = 0;
        }
        Key::CtrlW => {
            edit::delete_prev_word(state);
        }
        Key::Char(g) => {
            match edit::insert(state, g) {
                edit::InsertOutcome::Rejected => return Ok(Flow::Continue),
                edit::InsertOutcome::FastAppend => {
                    out.write_all(g.as_bytes())?;
                    out.flush()?;
                    return Ok(Flow::Continue);
                }
                edit::InsertOutcome::Refresh => {}
            }
        }
        // Tab reaching here means no completion callback was installed;
        // it falls through as ordinary input with no assigned primitive,
        // so it's a no-op.
        Key::Tab => return Ok(Flow::Continue),
    }
    rawline_render::refresh(state, out, None)?;
    Ok(Flow::Continue)
}

//! Single-line-input editor facade: raw-mode terminal input, grapheme-aware
//! editing, history, and tab-completion.
//!
//! Grounded on `ox-bin`'s single-entry-point-over-a-crate-family shape, and
//! on `linenoise.hpp`'s free-function API, restructured into an owned
//! [`Context`]: global interpreter state becomes an explicit, constructible
//! object, plus a default process-wide instance for drop-in convenience
//! callers.

mod completion;
mod reader;
mod session;

use std::io::{self, IsTerminal, Read, Write};
use std::sync::{Mutex, OnceLock};

use rawline_history::{History, HistoryError};
use rawline_terminal::{RawGuard, TerminalError};

pub use completion::CompletionCallback;
pub use reader::Key;

/// Everything that can keep a `readline` call from producing a line.
#[derive(Debug, thiserror::Error)]
pub enum ReadlineError {
    #[error(transparent)]
    Terminal(#[from] TerminalError),
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error("I/O error while reading or writing the terminal: {0}")]
    Io(#[from] io::Error),
}

/// The outcome of one `readline` call: the committed line (or, if `quit` is
/// set, whatever partial text existed at Ctrl-C/Ctrl-D/EOF) and whether the
/// caller's read loop should stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadResult {
    pub line: String,
    pub quit: bool,
}

/// An editing session's durable state: history, multiline mode, the
/// optional completion callback, and the line length limit. Owns no
/// terminal resources between calls — those are scoped to each
/// [`Context::readline`] invocation via [`RawGuard`].
pub struct Context {
    history: History,
    multiline: bool,
    line_length_limit: usize,
    completion_callback: Option<Box<CompletionCallback>>,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            history: History::new(),
            multiline: false,
            line_length_limit: 4096,
            completion_callback: None,
        }
    }
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a `Context` seeded from an on-disk or default [`rawline_config::Config`].
    pub fn from_config(config: &rawline_config::Config) -> Self {
        let mut history = History::new();
        history.set_max_len(config.file.history_max_len);
        Self {
            history,
            multiline: config.file.multiline,
            line_length_limit: config.file.line_length_limit,
            completion_callback: None,
        }
    }

    pub fn set_multiline(&mut self, multiline: bool) {
        self.multiline = multiline;
    }

    pub fn set_line_length_limit(&mut self, limit: usize) {
        self.line_length_limit = limit;
    }

    pub fn set_completion_callback<F>(&mut self, callback: F)
    where
        F: Fn(&str) -> Vec<String> + Send + Sync + 'static,
    {
        self.completion_callback = Some(Box::new(callback));
    }

    pub fn clear_completion_callback(&mut self) {
        self.completion_callback = None;
    }

    pub fn set_history_max_len(&mut self, n: usize) -> bool {
        self.history.set_max_len(n)
    }

    /// Add `line` to history, per the de-dup/eviction rules in [`History::add`].
    pub fn add_history(&mut self, line: impl Into<String>) -> bool {
        self.history.add(line)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn save_history(&self, path: impl AsRef<std::path::Path>) -> Result<(), ReadlineError> {
        self.history.save(path).map_err(ReadlineError::from)
    }

    pub fn load_history(&mut self, path: impl AsRef<std::path::Path>) -> Result<bool, ReadlineError> {
        self.history.load(path).map_err(ReadlineError::from)
    }

    /// Read one line from the controlling terminal, displaying `prompt` and
    /// running the full raw-mode edit loop. Falls back to a
    /// single plain-text `read_line` when stdin is not a tty or `TERM`
    /// names an unsupported terminal, matching `linenoise.hpp`'s
    /// non-interactive path.
    pub fn readline(&mut self, prompt: &str) -> Result<ReadResult, ReadlineError> {
        if !io::stdin().is_terminal() || rawline_terminal::is_unsupported_term() {
            return self.readline_plain(prompt);
        }

        let mut guard = RawGuard::enter()?;
        let cols = rawline_terminal::get_columns();
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let stdout = io::stdout();
        let mut output = stdout.lock();

        let result = self.readline_from(prompt, cols, &mut input, &mut output)?;

        output.write_all(b"\n")?;
        output.flush()?;
        guard.leave()?;

        Ok(result)
    }

    /// Run the edit loop against caller-supplied streams instead of the
    /// real terminal, at a caller-supplied column width. The caller is
    /// responsible for raw mode; this is the seam integration tests and
    /// embedders with their own terminal plumbing use in place of
    /// [`Context::readline`].
    pub fn readline_from<R: Read, W: Write>(
        &mut self,
        prompt: &str,
        cols: usize,
        input: &mut R,
        output: &mut W,
    ) -> Result<ReadResult, ReadlineError> {
        let result = session::run(
            input,
            output,
            prompt,
            cols,
            self.multiline,
            self.line_length_limit,
            &mut self.history,
            self.completion_callback.as_deref(),
        )?;
        Ok(result)
    }

    fn readline_plain(&mut self, prompt: &str) -> Result<ReadResult, ReadlineError> {
        let stdout = io::stdout();
        let mut output = stdout.lock();
        output.write_all(prompt.as_bytes())?;
        output.flush()?;

        let mut line = String::new();
        let n = io::stdin().read_line(&mut line)?;
        if n == 0 {
            return Ok(ReadResult {
                line: String::new(),
                quit: true,
            });
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(ReadResult { line, quit: false })
    }
}

static DEFAULT_CONTEXT: OnceLock<Mutex<Context>> = OnceLock::new();

fn default_context() -> &'static Mutex<Context> {
    DEFAULT_CONTEXT.get_or_init(|| Mutex::new(Context::new()))
}

/// Convenience free function delegating to a process-wide default
/// [`Context`], for callers that only ever need one session, mirroring
/// `linenoise.hpp`'s free-function surface.
pub fn readline(prompt: &str) -> Result<ReadResult, ReadlineError> {
    default_context().lock().unwrap().readline(prompt)
}

pub fn add_history(line: impl Into<String>) -> bool {
    default_context().lock().unwrap().add_history(line)
}

pub fn set_multiline(multiline: bool) {
    default_context().lock().unwrap().set_multiline(multiline);
}

pub fn set_history_max_len(n: usize) -> bool {
    default_context().lock().unwrap().set_history_max_len(n)
}

pub fn save_history(path: impl AsRef<std::path::Path>) -> Result<(), ReadlineError> {
    default_context().lock().unwrap().save_history(path)
}

pub fn load_history(path: impl AsRef<std::path::Path>) -> Result<bool, ReadlineError> {
    default_context().lock().unwrap().load_history(path)
}

pub fn set_completion_callback<F>(callback: F)
where
    F: Fn(&str) -> Vec<String> + Send + Sync + 'static,
{
    default_context()
        .lock()
        .unwrap()
        .set_completion_callback(callback);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_add_history_dedups_and_commits() {
        let mut ctx = Context::new();
        assert!(ctx.add_history("one"));
        assert!(!ctx.add_history("one"));
        assert_eq!(ctx.history().len(), 1);
    }

    #[test]
    fn from_config_applies_history_limit_and_multiline() {
        let cfg = rawline_config::Config {
            file: rawline_config::ConfigFile {
                line_length_limit: 128,
                history_max_len: 2,
                multiline: true,
            },
        };
        let mut ctx = Context::from_config(&cfg);
        assert!(ctx.multiline);
        assert_eq!(ctx.line_length_limit, 128);
        ctx.add_history("a");
        ctx.add_history("b");
        ctx.add_history("c");
        assert_eq!(ctx.history().len(), 2);
    }
}

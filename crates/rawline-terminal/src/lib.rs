//! Raw-mode terminal control.
//!
//! Grounded on `core-terminal::CrosstermBackend`/`TerminalGuard`'s
//! enter-guard/Drop shape, with the alternate-screen/cursor-hide calls
//! dropped (this library edits a line inline, it does not take over the
//! whole screen) and a process-wide panic-hook backstop added, following
//! `ox-bin::AppStartup::install_panic_hook`.

use std::io::{self, Write};
use std::sync::Once;

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

/// `TERM` values for which raw-mode editing is not attempted; a
/// "small blacklist" resolved to the exact three values
/// `linenoise.hpp::is_unsupported_term` lists.
const UNSUPPORTED_TERMS: &[&str] = &["dumb", "cons25", "emacs"];

#[derive(Debug, thiserror::Error)]
pub enum TerminalError {
    #[error("stdin/stdout is not a tty")]
    NotATty,
    #[error("TERM={0:?} does not support raw-mode editing")]
    UnsupportedTerminal(String),
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),
}

/// True iff the `TERM` environment variable names a terminal this library
/// refuses to raw-mode-edit on.
pub fn is_unsupported_term() -> bool {
    match std::env::var("TERM") {
        Ok(term) => UNSUPPORTED_TERMS.contains(&term.as_str()),
        Err(_) => false,
    }
}

static PANIC_HOOK: Once = Once::new();

/// Install a process-wide panic hook that restores the terminal before the
/// default hook prints. Idempotent; only the first call installs it. This
/// is the at-exit-hook guarantee: the scoped guard handles
/// normal exit paths, this handles the host aborting mid-session.
pub fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let default_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = disable_raw_mode();
            tracing::error!(target: "terminal", panic = %info, "panic during raw-mode session, terminal restored");
            default_hook(info);
        }));
    });
}

/// RAII scope for raw mode: [`RawGuard::enter`] enables it, `Drop` disables
/// it. Re-entrant calls are safe; `crossterm::enable_raw_mode` /
/// `disable_raw_mode` are themselves idempotent on the OS side.
pub struct RawGuard {
    active: bool,
}

impl RawGuard {
    /// Enable raw mode and install the panic-hook backstop. Fails with
    /// [`TerminalError::NotATty`] if stdin is not a tty, or
    /// [`TerminalError::UnsupportedTerminal`] per [`is_unsupported_term`].
    pub fn enter() -> Result<Self, TerminalError> {
        if !io::IsTerminal::is_terminal(&io::stdin()) {
            return Err(TerminalError::NotATty);
        }
        if is_unsupported_term() {
            let term = std::env::var("TERM").unwrap_or_default();
            return Err(TerminalError::UnsupportedTerminal(term));
        }
        install_panic_hook();
        enable_raw_mode()?;
        tracing::trace!(target: "terminal", "raw mode entered");
        Ok(Self { active: true })
    }

    /// Explicit early release; `Drop` becomes a no-op afterward.
    pub fn leave(&mut self) -> Result<(), TerminalError> {
        if self.active {
            disable_raw_mode()?;
            self.active = false;
            tracing::trace!(target: "terminal", "raw mode left");
        }
        Ok(())
    }
}

impl Drop for RawGuard {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

/// Query the terminal's column count. Tries `ioctl TIOCGWINSZ` (via
/// `crossterm::terminal::size`) first; on failure falls back to a DSR
/// round-trip (bump the cursor to the right edge, query its column, restore
/// it), and finally defaults to 80, matching `linenoise.hpp::getColumns`.
pub fn get_columns() -> usize {
    if let Ok((cols, _rows)) = crossterm::terminal::size() {
        if cols > 0 {
            return cols as usize;
        }
    }
    match get_columns_via_dsr() {
        Some(cols) => cols,
        None => {
            tracing::trace!(target: "terminal", "column detection fell back to default 80");
            80
        }
    }
}

fn get_columns_via_dsr() -> Option<usize> {
    use crossterm::cursor::{position, MoveRight, MoveTo};
    use crossterm::execute;

    let (start_col, start_row) = position().ok()?;
    execute!(io::stdout(), MoveRight(999)).ok()?;
    let (end_col, _) = position().ok()?;
    execute!(io::stdout(), MoveTo(start_col, start_row)).ok()?;
    let _ = io::stdout().flush();
    Some(end_col as usize + 1)
}

/// Emit `ESC[H ESC[2J`: home the cursor, then clear the whole screen.
pub fn clear_screen<W: Write>(out: &mut W) -> io::Result<()> {
    out.write_all(b"\x1b[H\x1b[2J")?;
    out.flush()
}

/// Write a single bell byte to `out`.
pub fn beep<W: Write>(out: &mut W) -> io::Result<()> {
    out.write_all(b"\x07")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unsupported_term_blacklist() {
        std::env::set_var("TERM", "dumb");
        assert!(is_unsupported_term());
        std::env::set_var("TERM", "xterm-256color");
        assert!(!is_unsupported_term());
    }

    #[test]
    fn clear_screen_emits_expected_bytes() {
        let mut buf = Vec::new();
        clear_screen(&mut buf).unwrap();
        assert_eq!(buf, b"\x1b[H\x1b[2J");
    }

    #[test]
    fn beep_emits_bell() {
        let mut buf = Vec::new();
        beep(&mut buf).unwrap();
        assert_eq!(buf, b"\x07");
    }
}

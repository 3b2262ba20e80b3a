//! Bounded, deduplicated line history.
//!
//! Grounded on `linenoise.hpp`'s `History`/`AddHistory`/`SetHistoryMaxLen`/
//! `SaveHistory`/`LoadHistory` functions, restructured from the original's
//! process-wide globals into an owned container: global state becomes an
//! explicit context object.

use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("history entry contains a newline, which the flat-file format cannot represent")]
    EmbeddedNewline,
    #[error("history file I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Ordered, bounded, deduplicated sequence of previously committed lines.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<String>,
    max_len: usize,
}

impl History {
    /// `max_len` defaults to 4, matching the example host in
    /// `example.cpp`'s `linenoise::SetHistoryMaxLen(4)` call.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            max_len: 4,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Entry at `idx`, most-recent-last (`idx == len()-1` is the newest).
    pub fn get(&self, idx: usize) -> Option<&str> {
        self.entries.get(idx).map(String::as_str)
    }

    /// Read-only view of all entries, oldest-first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// `n >= 1` required; returns `false` otherwise. If `n` is smaller than
    /// the current size, the oldest entries are evicted until `size == n`.
    pub fn set_max_len(&mut self, n: usize) -> bool {
        if n == 0 {
            return false;
        }
        self.max_len = n;
        while self.entries.len() > self.max_len {
            self.entries.remove(0);
        }
        true
    }

    /// Rejects if `max_len == 0`, if `line` duplicates the most recent
    /// entry, or if `line` contains `\n`/`\r` (such an entry cannot
    /// round-trip through the one-line-per-entry file format). Otherwise
    /// appends, evicting the oldest entry first if already at `max_len`.
    pub fn add(&mut self, line: impl Into<String>) -> bool {
        let line = line.into();
        if self.max_len == 0 {
            return false;
        }
        if line.contains('\n') || line.contains('\r') {
            return false;
        }
        if self.entries.last().map(String::as_str) == Some(line.as_str()) {
            return false;
        }
        if self.entries.len() >= self.max_len {
            self.entries.remove(0);
            tracing::trace!(target: "history", "evicted oldest entry at capacity");
        }
        self.entries.push(line);
        true
    }

    /// Overwrite the entry at `idx` in place, used when scrolling away from
    /// the live line so that returning to it is idempotent.
    pub fn set(&mut self, idx: usize, line: impl Into<String>) {
        if let Some(slot) = self.entries.get_mut(idx) {
            *slot = line.into();
        }
    }

    /// Append a sentinel empty "live line" slot at session start. Returns
    /// its index.
    pub fn push_sentinel(&mut self) -> usize {
        self.entries.push(String::new());
        self.entries.len() - 1
    }

    /// Remove the sentinel slot at `idx` on commit/Ctrl-D, matching
    /// `linenoiseEdit`'s `history.pop_back()` on those exits.
    pub fn pop_sentinel(&mut self, idx: usize) {
        if idx < self.entries.len() {
            self.entries.remove(idx);
        }
    }

    /// Write one entry per line, oldest-first. Returns `Err` if any entry
    /// contains a newline (should be unreachable given [`History::add`]'s
    /// rejection, but checked again since entries can also arrive via
    /// [`History::set`]).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), HistoryError> {
        let mut out = String::new();
        for entry in &self.entries {
            if entry.contains('\n') || entry.contains('\r') {
                return Err(HistoryError::EmbeddedNewline);
            }
            out.push_str(entry);
            out.push('\n');
        }
        fs::write(path, out)?;
        Ok(())
    }

    /// Read `path` line by line, feeding each line through [`History::add`]
    /// so all invariants (dedup, max length) are enforced. A missing file
    /// is not an error — returns `Ok(false)` — matching `LoadHistory`'s
    /// "missing file returns false without error".
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<bool, HistoryError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(false);
        }
        let content = fs::read_to_string(path)?;
        for line in content.lines() {
            self.add(line.to_string());
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn dedups_adjacent_entries() {
        let mut h = History::new();
        assert!(h.add("x"));
        assert!(!h.add("x"));
        assert_eq!(h.len(), 1);
    }

    #[test]
    fn evicts_oldest_past_max_len() {
        let mut h = History::new();
        h.set_max_len(2);
        h.add("a");
        h.add("b");
        h.add("c");
        assert_eq!(h.entries(), &["b".to_string(), "c".to_string()]);
    }

    #[test]
    fn set_max_len_zero_rejected() {
        let mut h = History::new();
        assert!(!h.set_max_len(0));
        assert_eq!(h.max_len(), 4);
    }

    #[test]
    fn rejects_embedded_newline() {
        let mut h = History::new();
        assert!(!h.add("line one\nline two"));
        assert_eq!(h.len(), 0);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.txt");
        let mut h = History::new();
        h.set_max_len(10);
        h.add("one");
        h.add("two");
        h.save(&path).unwrap();

        let mut loaded = History::new();
        loaded.set_max_len(10);
        assert!(loaded.load(&path).unwrap());
        assert_eq!(loaded.entries(), &["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn load_missing_file_returns_false() {
        let mut h = History::new();
        assert!(!h.load("/nonexistent/path/history.txt").unwrap());
    }

    #[test]
    fn sentinel_push_and_pop() {
        let mut h = History::new();
        h.add("one");
        let idx = h.push_sentinel();
        assert_eq!(h.len(), 2);
        h.set(idx, "edited");
        assert_eq!(h.get(idx), Some("edited"));
        h.pop_sentinel(idx);
        assert_eq!(h.len(), 1);
    }
}

//! The in-progress edit buffer and session state.

/// State for one `Readline` session. Lives only for the duration of a
/// single call.
pub struct EditState {
    /// Owned, mutable, always-valid-UTF-8 line buffer. Rust's `String`
    /// already upholds the "bytes `[0,len)` are valid UTF-8"
    /// invariant structurally; there is no separate NUL terminator or
    /// capacity field to track the way the C buffer needs one.
    pub buf: String,
    /// Byte offset of the cursor within `buf`. Always on a grapheme
    /// boundary.
    pub pos: usize,
    /// Prompt string, may contain ANSI color escapes.
    pub prompt: String,
    /// Sampled terminal width in columns at session start.
    pub cols: usize,
    /// Largest row-span ever occupied by this session (multi-line mode).
    pub maxrows: usize,
    /// Display column the cursor occupied after the last refresh.
    pub old_col_pos: usize,
    /// Steps back from the live line: 0 means this state mirrors the live
    /// line being edited, N means the Nth-from-most-recent history entry.
    /// The underlying history slot is `history.len() - 1 - history_index`;
    /// `history_nav::scroll` walks this counter up and down.
    pub history_index: usize,
    /// Single-line vs. multi-line refresh.
    pub multiline: bool,
    /// Maximum buffer length in bytes, the "line length limit" (default
    /// 4096).
    pub line_length_limit: usize,
}

impl EditState {
    pub fn new(prompt: impl Into<String>, cols: usize, multiline: bool, line_length_limit: usize) -> Self {
        Self {
            buf: String::new(),
            pos: 0,
            prompt: prompt.into(),
            cols,
            maxrows: 0,
            old_col_pos: 0,
            history_index: 0,
            multiline,
            line_length_limit,
        }
    }

    /// Escape-stripped display width of the prompt.
    pub fn prompt_cols(&self) -> usize {
        rawline_text::column_pos(&self.prompt)
    }

    #[cfg(debug_assertions)]
    pub fn assert_invariants(&self) {
        debug_assert!(self.pos <= self.buf.len());
        debug_assert!(self.buf.is_char_boundary(self.pos));
        debug_assert!(
            self.prompt_cols() < self.cols,
            "prompt width must be smaller than terminal width"
        );
    }
}

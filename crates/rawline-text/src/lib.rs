//! UTF-8 decoding, grapheme boundaries, and display-width accounting.
//!
//! All operations here are pure and total: malformed or truncated input
//! makes them return 0/`None` rather than panic, matching `linenoise.hpp`'s
//! own behavior for this layer.

pub mod ansi;
pub mod segment;
pub mod utf8;
pub mod width;

pub use ansi::{column_pos, column_pos_multiline, is_ansi_escape};
pub use segment::{
    cluster_width, grapheme_len, next_boundary, prev_boundary, prev_grapheme_len, spans,
};
pub use utf8::{decode, prev_utf8_len, utf8_char_length};
pub use width::{codepoint_width, is_combining, is_wide};

//! Edit buffer state and editing primitives.

pub mod history_nav;
pub mod primitives;
pub mod state;

pub use history_nav::{scroll, Direction};
pub use primitives::{
    backspace, delete, delete_prev_word, insert, kill_line_to_end, kill_whole_line, move_end,
    move_home, move_left, move_right, transpose, InsertOutcome,
};
pub use state::EditState;

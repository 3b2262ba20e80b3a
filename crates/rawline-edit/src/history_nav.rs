//! History scroll-recall, coupling [`EditState`] to [`rawline_history::History`]
//! with the edit buffer.

use crate::state::EditState;
use rawline_history::History;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// Only acts if `history.len() > 1`. Saves the current buffer into the slot
/// `history_index` steps back from the live line (so scrolling away and
/// back is idempotent), then moves `history_index` by one step: `Prev`
/// walks further into the past, `Next` walks back toward the live line.
/// A move that would leave `[0, len-1]` is clamped and left as a no-op —
/// no buffer swap, no refresh. Returns `true` if the buffer changed.
pub fn scroll(state: &mut EditState, history: &mut History, dir: Direction) -> bool {
    let len = history.len();
    if len <= 1 {
        return false;
    }

    let current_idx = len - 1 - state.history_index;
    history.set(current_idx, state.buf.clone());

    let new_history_index = match dir {
        Direction::Prev => state.history_index + 1,
        Direction::Next => match state.history_index.checked_sub(1) {
            Some(n) => n,
            None => return false,
        },
    };
    if new_history_index >= len {
        return false;
    }

    state.history_index = new_history_index;
    let idx = len - 1 - state.history_index;
    state.buf = history.get(idx).unwrap_or_default().to_string();
    state.pos = state.buf.len();
    tracing::trace!(target: "history", op = "scroll", dir = ?dir, index = state.history_index, "edit");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn setup() -> (EditState, History) {
        let mut h = History::new();
        h.set_max_len(10);
        h.add("one");
        h.add("two");
        h.add("three");
        h.push_sentinel();
        let s = EditState::new("> ", 80, false, 4096);
        (s, h)
    }

    #[test]
    fn scroll_prev_then_next_is_idempotent() {
        let (mut s, mut h) = setup();
        s.buf = "editing".to_string();
        s.pos = s.buf.len();

        scroll(&mut s, &mut h, Direction::Prev);
        scroll(&mut s, &mut h, Direction::Prev);
        assert_eq!(s.buf, "two");

        scroll(&mut s, &mut h, Direction::Next);
        scroll(&mut s, &mut h, Direction::Next);
        assert_eq!(s.history_index, 0);
        assert_eq!(s.buf, "editing");
    }

    #[test]
    fn scroll_prev_walks_oldest_first_and_clamps() {
        let (mut s, mut h) = setup();
        scroll(&mut s, &mut h, Direction::Prev);
        assert_eq!(s.buf, "three");
        scroll(&mut s, &mut h, Direction::Prev);
        assert_eq!(s.buf, "two");
        scroll(&mut s, &mut h, Direction::Prev);
        assert_eq!(s.buf, "one");
        // already at the oldest entry: one more Prev is a no-op
        assert!(!scroll(&mut s, &mut h, Direction::Prev));
        assert_eq!(s.buf, "one");
    }

    #[test]
    fn scroll_next_past_live_line_is_noop() {
        let (mut s, mut h) = setup();
        assert!(!scroll(&mut s, &mut h, Direction::Next));
        assert_eq!(s.history_index, 0);
    }

    #[test]
    fn scroll_is_noop_with_one_or_fewer_entries() {
        let mut h = History::new();
        h.push_sentinel();
        let mut s = EditState::new("> ", 80, false, 4096);
        assert!(!scroll(&mut s, &mut h, Direction::Prev));
    }
}

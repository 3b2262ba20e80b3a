//! Key reading: one UTF-8 character or escape sequence at a time.
//!
//! The escape-sequence branch is a small tagged state machine rather than
//! the original's ad-hoc two-byte read-ahead: unrecognized sequences are
//! drained and reported as [`KeyReadOutcome::Ignored`] instead of letting a
//! stray byte fall through to be mis-dispatched as ordinary input.

use std::io::{self, Read};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Enter,
    CtrlC,
    CtrlD,
    CtrlA,
    CtrlB,
    CtrlE,
    CtrlF,
    CtrlK,
    CtrlL,
    CtrlN,
    CtrlP,
    CtrlT,
    CtrlU,
    CtrlW,
    Backspace,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Delete,
    /// A decoded grapheme's raw UTF-8 bytes, ready for [`rawline_edit::insert`].
    Char(String),
    /// A bare ESC byte with no CSI/SS3 expansion — only produced by
    /// [`read_raw_key`], the completion micro-mode's single-character read.
    Esc,
}

fn classify_control(b: u8) -> Option<Key> {
    Some(match b {
        13 => Key::Enter,
        3 => Key::CtrlC,
        4 => Key::CtrlD,
        1 => Key::CtrlA,
        2 => Key::CtrlB,
        5 => Key::CtrlE,
        6 => Key::CtrlF,
        8 | 127 => Key::Backspace,
        9 => Key::Tab,
        11 => Key::CtrlK,
        12 => Key::CtrlL,
        14 => Key::CtrlN,
        16 => Key::CtrlP,
        20 => Key::CtrlT,
        21 => Key::CtrlU,
        23 => Key::CtrlW,
        _ => return None,
    })
}

/// Read exactly one raw UTF-8 character, the way `linenoise.hpp`'s
/// `completeLine` reads within the completion micro-mode: a bare ESC byte
/// is reported as `Key::Esc` immediately, with no attempt to expand a CSI
/// sequence (unlike [`read_key`]'s main-loop behavior).
pub fn read_raw_key<R: Read>(reader: &mut R) -> io::Result<KeyReadOutcome> {
    let mut lead = [0u8; 1];
    if reader.read(&mut lead)? == 0 {
        return Ok(KeyReadOutcome::Eof);
    }
    if lead[0] == 27 {
        return Ok(KeyReadOutcome::Key(Key::Esc));
    }
    if let Some(key) = classify_control(lead[0]) {
        return Ok(KeyReadOutcome::Key(key));
    }
    Ok(match read_char(reader, lead[0])? {
        Some(s) => KeyReadOutcome::Key(Key::Char(s)),
        None => KeyReadOutcome::Eof,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyReadOutcome {
    Key(Key),
    /// A recognized-but-unsupported or malformed escape sequence: drained,
    /// caller should just read the next key.
    Ignored,
    /// `read` returned 0 (EOF) or the stream closed.
    Eof,
}

/// Read one key from `reader`, which must be the raw-mode input stream.
pub fn read_key<R: Read>(reader: &mut R) -> io::Result<KeyReadOutcome> {
    let mut lead = [0u8; 1];
    if reader.read(&mut lead)? == 0 {
        return Ok(KeyReadOutcome::Eof);
    }
    if lead[0] == 27 {
        return read_escape_sequence(reader);
    }
    if let Some(key) = classify_control(lead[0]) {
        return Ok(KeyReadOutcome::Key(key));
    }
    Ok(match read_char(reader, lead[0])? {
        Some(s) => KeyReadOutcome::Key(Key::Char(s)),
        None => KeyReadOutcome::Eof,
    })
}

fn read_char<R: Read>(reader: &mut R, lead: u8) -> io::Result<Option<String>> {
    let mut bytes = vec![lead];
    let total_len = rawline_text::utf8_char_length(&bytes, 0);
    for _ in 1..total_len {
        let mut cont = [0u8; 1];
        if reader.read(&mut cont)? == 0 {
            return Ok(None);
        }
        bytes.push(cont[0]);
    }
    Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
}

fn read_escape_sequence<R: Read>(reader: &mut R) -> io::Result<KeyReadOutcome> {
    let mut b1 = [0u8; 1];
    if reader.read(&mut b1)? == 0 {
        return Ok(KeyReadOutcome::Eof);
    }
    let mut b2 = [0u8; 1];
    if reader.read(&mut b2)? == 0 {
        return Ok(KeyReadOutcome::Eof);
    }

    match (b1[0], b2[0]) {
        (b'[', c) if c.is_ascii_digit() => {
            let mut b3 = [0u8; 1];
            if reader.read(&mut b3)? == 0 {
                return Ok(KeyReadOutcome::Eof);
            }
            if b3[0] == b'~' && c == b'3' {
                Ok(KeyReadOutcome::Key(Key::Delete))
            } else {
                Ok(KeyReadOutcome::Ignored)
            }
        }
        (b'[', b'A') => Ok(KeyReadOutcome::Key(Key::Up)),
        (b'[', b'B') => Ok(KeyReadOutcome::Key(Key::Down)),
        (b'[', b'C') => Ok(KeyReadOutcome::Key(Key::Right)),
        (b'[', b'D') => Ok(KeyReadOutcome::Key(Key::Left)),
        (b'[', b'H') => Ok(KeyReadOutcome::Key(Key::Home)),
        (b'[', b'F') => Ok(KeyReadOutcome::Key(Key::End)),
        (b'O', b'H') => Ok(KeyReadOutcome::Key(Key::Home)),
        (b'O', b'F') => Ok(KeyReadOutcome::Key(Key::End)),
        _ => Ok(KeyReadOutcome::Ignored),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_plain_ascii() {
        let mut input: &[u8] = b"a";
        assert_eq!(
            read_key(&mut input).unwrap(),
            KeyReadOutcome::Key(Key::Char("a".to_string()))
        );
    }

    #[test]
    fn reads_multibyte_utf8_char() {
        let mut input = "あ".as_bytes();
        assert_eq!(
            read_key(&mut input).unwrap(),
            KeyReadOutcome::Key(Key::Char("あ".to_string()))
        );
    }

    #[test]
    fn reads_arrow_keys() {
        let mut input: &[u8] = b"\x1b[A";
        assert_eq!(read_key(&mut input).unwrap(), KeyReadOutcome::Key(Key::Up));
        let mut input: &[u8] = b"\x1b[D";
        assert_eq!(read_key(&mut input).unwrap(), KeyReadOutcome::Key(Key::Left));
    }

    #[test]
    fn reads_delete_key_extended_sequence() {
        let mut input: &[u8] = b"\x1b[3~";
        assert_eq!(
            read_key(&mut input).unwrap(),
            KeyReadOutcome::Key(Key::Delete)
        );
    }

    #[test]
    fn reads_ss3_home_end() {
        let mut input: &[u8] = b"\x1bOH";
        assert_eq!(read_key(&mut input).unwrap(), KeyReadOutcome::Key(Key::Home));
    }

    #[test]
    fn unrecognized_escape_sequence_is_ignored_not_mis_dispatched() {
        let mut input: &[u8] = b"\x1b[Z";
        assert_eq!(read_key(&mut input).unwrap(), KeyReadOutcome::Ignored);
    }

    #[test]
    fn control_chars_map_to_named_keys() {
        let mut input: &[u8] = &[3];
        assert_eq!(read_key(&mut input).unwrap(), KeyReadOutcome::Key(Key::CtrlC));
        let mut input: &[u8] = &[127];
        assert_eq!(
            read_key(&mut input).unwrap(),
            KeyReadOutcome::Key(Key::Backspace)
        );
    }

    #[test]
    fn empty_stream_is_eof() {
        let mut input: &[u8] = &[];
        assert_eq!(read_key(&mut input).unwrap(), KeyReadOutcome::Eof);
    }
}

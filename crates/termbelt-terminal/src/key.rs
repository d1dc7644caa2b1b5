//! Blocking single-keystroke input.
//!
//! [`KeyReader`] pulls one byte at a time off any [`Read`] source and decodes
//! it into a [`Key`]. Escape sequences (arrow keys, DEL) are consumed
//! atomically by a small state machine — ESC, a `[`/`O` introducer,
//! parameter bytes, one final byte — so a plain `A` keystroke is never
//! mistaken for an arrow key.
//!
//! Interactive widgets hold a [`RawModeGuard`] while their loop runs so the
//! terminal driver delivers keystrokes before RETURN and without echo.

use std::io::{self, Read};

/// A decoded keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A plain printable (or at least non-special) character.
    Char(char),
    /// Up arrow (`ESC [ A`).
    Up,
    /// Down arrow (`ESC [ B`).
    Down,
    /// Left arrow (`ESC [ D`).
    Left,
    /// Right arrow (`ESC [ C`).
    Right,
    /// Horizontal tab.
    Tab,
    /// RETURN / line feed.
    Enter,
    /// Backspace (0x7f or 0x08).
    Backspace,
    /// Forward delete (`ESC [ 3 ~`).
    Delete,
    /// A bare escape, or an escape sequence this toolkit does not map.
    Esc,
}

impl Key {
    /// The plain character carried by this key, if any.
    #[must_use]
    pub const fn as_char(self) -> Option<char> {
        match self {
            Self::Char(ch) => Some(ch),
            _ => None,
        }
    }
}

/// Blocking key reader over a byte stream.
///
/// Holds a one-byte pushback buffer so an ESC followed by an unrelated byte
/// can be delivered as two keystrokes.
#[derive(Debug)]
pub struct KeyReader<R> {
    input: R,
    pending: Option<u8>,
}

impl KeyReader<io::Stdin> {
    /// Reader over the process's standard input.
    #[must_use]
    pub fn stdin() -> Self {
        Self::new(io::stdin())
    }
}

impl<R: Read> KeyReader<R> {
    /// Wrap a byte source.
    pub const fn new(input: R) -> Self {
        Self {
            input,
            pending: None,
        }
    }

    /// Block until one keystroke is available and return it.
    ///
    /// # Errors
    ///
    /// Returns [`io::ErrorKind::UnexpectedEof`] when the stream closes
    /// before a keystroke arrives, and propagates any underlying read error.
    pub fn read_key(&mut self) -> io::Result<Key> {
        let byte = self.next_byte()?;
        Ok(match byte {
            0x1b => self.read_escape()?,
            b'\n' | b'\r' => Key::Enter,
            b'\t' => Key::Tab,
            0x7f | 0x08 => Key::Backspace,
            other => Key::Char(char::from(other)),
        })
    }

    /// Read one line, consuming up to and including the terminator.
    ///
    /// Surrounding whitespace is trimmed. Used by line-mode prompts where
    /// the terminal driver is left in cooked mode.
    pub fn read_line(&mut self) -> io::Result<String> {
        let mut raw = Vec::new();
        while let Some(byte) = self.try_next_byte()? {
            if byte == b'\n' {
                break;
            }
            raw.push(byte);
        }
        Ok(String::from_utf8_lossy(&raw).trim().to_string())
    }

    /// Consume a full escape sequence after its ESC introducer.
    fn read_escape(&mut self) -> io::Result<Key> {
        let Some(second) = self.try_next_byte()? else {
            return Ok(Key::Esc);
        };
        if second != b'[' && second != b'O' {
            // Not a sequence introducer: deliver ESC, replay the byte.
            self.pending = Some(second);
            return Ok(Key::Esc);
        }

        let mut params = Vec::new();
        loop {
            let Some(byte) = self.try_next_byte()? else {
                // Truncated sequence at end of stream.
                return Ok(Key::Esc);
            };
            match byte {
                b'0'..=b'9' | b';' | b'?' => params.push(byte),
                b'A' => return Ok(Key::Up),
                b'B' => return Ok(Key::Down),
                b'C' => return Ok(Key::Right),
                b'D' => return Ok(Key::Left),
                b'~' if params == b"3" => return Ok(Key::Delete),
                // Any other final byte ends the sequence unmapped.
                _ => return Ok(Key::Esc),
            }
        }
    }

    fn next_byte(&mut self) -> io::Result<u8> {
        self.try_next_byte()?.ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "input stream closed")
        })
    }

    /// One byte, or `None` at end of stream. Blocks cooperatively on the
    /// underlying descriptor — no polling.
    fn try_next_byte(&mut self) -> io::Result<Option<u8>> {
        if let Some(byte) = self.pending.take() {
            return Ok(Some(byte));
        }
        let mut buf = [0u8; 1];
        loop {
            match self.input.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        }
    }
}

/// Puts the terminal driver into cbreak mode — line buffering and echo off,
/// output processing untouched — restoring the saved attributes on drop.
///
/// When standard input is not a terminal (tests, pipes) there is nothing to
/// configure and the guard is inert.
#[derive(Debug)]
pub struct RawModeGuard {
    saved: Option<libc::termios>,
}

impl RawModeGuard {
    /// Enter cbreak mode on standard input.
    #[allow(unsafe_code)]
    pub fn new() -> io::Result<Self> {
        // SAFETY: isatty/tcgetattr/tcsetattr are called on the process's
        // own stdin descriptor with a locally owned termios buffer.
        unsafe {
            if libc::isatty(libc::STDIN_FILENO) == 0 {
                return Ok(Self { saved: None });
            }
            let mut attrs = std::mem::zeroed::<libc::termios>();
            if libc::tcgetattr(libc::STDIN_FILENO, &mut attrs) != 0 {
                return Err(io::Error::last_os_error());
            }
            let saved = attrs;
            attrs.c_lflag &= !(libc::ICANON | libc::ECHO);
            attrs.c_cc[libc::VMIN] = 1;
            attrs.c_cc[libc::VTIME] = 0;
            if libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, &attrs) != 0 {
                return Err(io::Error::last_os_error());
            }
            Ok(Self { saved: Some(saved) })
        }
    }
}

impl Drop for RawModeGuard {
    #[allow(unsafe_code)]
    fn drop(&mut self) {
        if let Some(saved) = self.saved {
            // SAFETY: restores the attributes captured in `new`.
            unsafe {
                let _ = libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, &saved);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reader(bytes: &[u8]) -> KeyReader<Cursor<Vec<u8>>> {
        KeyReader::new(Cursor::new(bytes.to_vec()))
    }

    #[test]
    fn test_plain_characters() {
        let mut keys = reader(b"ab1");
        assert_eq!(keys.read_key().unwrap(), Key::Char('a'));
        assert_eq!(keys.read_key().unwrap(), Key::Char('b'));
        assert_eq!(keys.read_key().unwrap(), Key::Char('1'));
    }

    #[test]
    fn test_arrow_sequences() {
        let mut keys = reader(b"\x1b[A\x1b[B\x1b[C\x1b[D");
        assert_eq!(keys.read_key().unwrap(), Key::Up);
        assert_eq!(keys.read_key().unwrap(), Key::Down);
        assert_eq!(keys.read_key().unwrap(), Key::Right);
        assert_eq!(keys.read_key().unwrap(), Key::Left);
    }

    #[test]
    fn test_ss3_arrow_sequences() {
        // Application cursor mode uses ESC O as the introducer.
        let mut keys = reader(b"\x1bOA\x1bOB");
        assert_eq!(keys.read_key().unwrap(), Key::Up);
        assert_eq!(keys.read_key().unwrap(), Key::Down);
    }

    #[test]
    fn test_plain_letter_a_is_not_up_arrow() {
        // A bare final byte without the ESC introducer is just a letter.
        let mut keys = reader(b"A");
        assert_eq!(keys.read_key().unwrap(), Key::Char('A'));
    }

    #[test]
    fn test_delete_sequence() {
        let mut keys = reader(b"\x1b[3~x");
        assert_eq!(keys.read_key().unwrap(), Key::Delete);
        assert_eq!(keys.read_key().unwrap(), Key::Char('x'));
    }

    #[test]
    fn test_unmapped_sequence_swallowed_atomically() {
        // Home key: the whole sequence goes, not byte by byte.
        let mut keys = reader(b"\x1b[1;5Hq");
        assert_eq!(keys.read_key().unwrap(), Key::Esc);
        assert_eq!(keys.read_key().unwrap(), Key::Char('q'));
    }

    #[test]
    fn test_escape_then_unrelated_byte() {
        let mut keys = reader(b"\x1bx");
        assert_eq!(keys.read_key().unwrap(), Key::Esc);
        assert_eq!(keys.read_key().unwrap(), Key::Char('x'));
    }

    #[test]
    fn test_bare_escape_at_end_of_stream() {
        let mut keys = reader(b"\x1b");
        assert_eq!(keys.read_key().unwrap(), Key::Esc);
    }

    #[test]
    fn test_control_keys() {
        let mut keys = reader(b"\t\n\r\x7f\x08");
        assert_eq!(keys.read_key().unwrap(), Key::Tab);
        assert_eq!(keys.read_key().unwrap(), Key::Enter);
        assert_eq!(keys.read_key().unwrap(), Key::Enter);
        assert_eq!(keys.read_key().unwrap(), Key::Backspace);
        assert_eq!(keys.read_key().unwrap(), Key::Backspace);
    }

    #[test]
    fn test_eof_is_unexpected_eof() {
        let mut keys = reader(b"");
        let err = keys.read_key().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_read_line_trims() {
        let mut keys = reader(b"  hello world \nrest");
        assert_eq!(keys.read_line().unwrap(), "hello world");
        assert_eq!(keys.read_key().unwrap(), Key::Char('r'));
    }

    #[test]
    fn test_as_char() {
        assert_eq!(Key::Char('z').as_char(), Some('z'));
        assert_eq!(Key::Enter.as_char(), None);
    }
}

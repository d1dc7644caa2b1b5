//! Terminal measurement: column width and ANSI-safe string length.

use regex::Regex;
use std::sync::LazyLock;

/// Escape sequences as emitted by this toolkit and common terminals:
/// ESC, one of `[` `(` `)`, optional `;`/`?`/digit parameter bytes, one
/// alphanumeric final byte.
static ANSI_SEQUENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b[\[()][;?0-9]*[0-9A-Za-z]").expect("valid ANSI pattern"));

/// Stray ETX/SUB control bytes, invisible but counted by `str::len`.
static CONTROL_BYTES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x03\x1a]").expect("valid control pattern"));

/// Current terminal width in columns, or 0 when the query fails (no tty,
/// width unavailable).
///
/// A width of 0 disables wrapping and alignment padding everywhere it is
/// consumed; callers must not treat it as an error. The value is probed on
/// every call, never cached, so resizes are picked up between redraws.
#[must_use]
pub fn terminal_width() -> usize {
    match crossterm::terminal::size() {
        Ok((columns, _rows)) => usize::from(columns),
        Err(err) => {
            log::debug!("terminal width unavailable: {err}");
            0
        }
    }
}

/// Remove ANSI escape sequences and stray control bytes from `text`.
///
/// A single replacement pass is not idempotent: removing a sequence can
/// splice the surrounding bytes into a new one (`ESC` + sequence + `[31m`).
/// The pass is repeated until the string stops shrinking, so stripping an
/// already-stripped string is always a no-op.
#[must_use]
pub fn strip_ansi(text: &str) -> String {
    let mut current = CONTROL_BYTES.replace_all(text, "").into_owned();
    loop {
        let next = ANSI_SEQUENCE.replace_all(&current, "").into_owned();
        if next == current {
            return next;
        }
        current = next;
    }
}

/// Display length of `text`: character count after [`strip_ansi`].
#[must_use]
pub fn display_length(text: &str) -> usize {
    strip_ansi(text).chars().count()
}

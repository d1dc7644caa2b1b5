//! Text layout: word wrapping and alignment padding.
//!
//! All measurement goes through [`display_length`] so embedded ANSI styling
//! never skews padding or wrap points. A width of 0 (terminal unavailable)
//! degrades every operation to the identity.

use crate::metrics::{display_length, terminal_width};

/// Horizontal alignment for lines and blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    /// No padding; text stays where it is.
    #[default]
    Left,
    /// Flush against the right edge of the width.
    Right,
    /// Centered, rounding the left pad down.
    Center,
}

/// Word-wrap `text` to at most `width` columns.
///
/// Breaks only at spaces, never mid-word: a word longer than `width`
/// overflows on its own line. Existing line breaks are preserved as hard
/// breaks. `width == 0` returns the text unmodified. Wrapping already
/// wrapped text at the same width is a no-op.
#[must_use]
pub fn wrap(text: &str, width: usize) -> String {
    if width == 0 {
        return text.to_string();
    }
    text.split('\n')
        .map(|line| wrap_line(line, width))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wrap `text` to the terminal width minus `pad_len` columns of decoration
/// (margins, box borders and the like).
///
/// Returns the text unmodified when the terminal width is unavailable or
/// `pad_len` consumes it entirely.
#[must_use]
pub fn wrap_to_terminal(text: &str, pad_len: usize) -> String {
    let width = terminal_width();
    if width == 0 {
        return text.to_string();
    }
    wrap(text, width.saturating_sub(pad_len))
}

fn wrap_line(line: &str, width: usize) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;
    loop {
        if display_length(rest) <= width {
            out.push_str(rest);
            return out;
        }

        // Break at the last space that keeps the prefix within `width`;
        // failing that, at the first space at all (overlong word overflows).
        // Columns are counted past ANSI escape sequences so styled text
        // wraps at its visible width.
        let mut break_at = None;
        let mut column = 0;
        let mut in_escape = false;
        for (index, ch) in rest.char_indices() {
            if in_escape {
                if matches!(ch, ';' | '?' | '(' | ')' | '[' | '0'..='9') {
                    continue;
                }
                in_escape = false;
                if ch.is_ascii_alphabetic() {
                    // Final byte of the sequence.
                    continue;
                }
            }
            if ch == '\x1b' {
                in_escape = true;
                continue;
            }
            if ch == '\x03' || ch == '\x1a' {
                continue;
            }
            if ch == ' ' {
                if column <= width {
                    break_at = Some(index);
                } else {
                    if break_at.is_none() {
                        break_at = Some(index);
                    }
                    break;
                }
            } else if column > width && break_at.is_some() {
                break;
            }
            column += 1;
        }

        match break_at {
            Some(index) => {
                out.push_str(&rest[..index]);
                out.push('\n');
                rest = &rest[index + 1..];
            }
            // A single unbreakable word; emit it as-is.
            None => {
                out.push_str(rest);
                return out;
            }
        }
    }
}

/// Left-pad `text` with spaces to align it within `width` columns.
///
/// [`Alignment::Left`] is the identity. If the computed pad is zero or
/// negative (text wider than `width`, or `width == 0`), the text is
/// returned unmodified — never truncated.
#[must_use]
pub fn pad(text: &str, alignment: Alignment, width: usize) -> String {
    if width == 0 {
        return text.to_string();
    }
    let length = display_length(text);
    let pad = match alignment {
        Alignment::Left => 0,
        Alignment::Right => width.saturating_sub(length),
        Alignment::Center => width.saturating_sub(length) / 2,
    };
    if pad == 0 {
        text.to_string()
    } else {
        format!("{}{}", " ".repeat(pad), text)
    }
}

/// Left-pad `text` to align it within the current terminal width.
#[must_use]
pub fn pad_to_terminal(text: &str, alignment: Alignment) -> String {
    pad(text, alignment, terminal_width())
}

/// Max display length across the lines of `block`.
#[must_use]
pub fn longest_line_length(block: &str) -> usize {
    longest_of(block.split('\n'))
}

/// Max display length across an already-split sequence of lines.
pub fn longest_of<I>(lines: I) -> usize
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    lines
        .into_iter()
        .map(|line| display_length(line.as_ref()))
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_wrap_breaks_at_spaces() {
        assert_eq!(wrap("one two three", 8), "one two\nthree");
        assert_eq!(wrap("one two three", 3), "one\ntwo\nthree");
    }

    #[test]
    fn test_wrap_zero_width_is_identity() {
        assert_eq!(wrap("anything at all", 0), "anything at all");
    }

    #[test]
    fn test_wrap_preserves_hard_breaks() {
        assert_eq!(wrap("ab\ncd ef", 5), "ab\ncd ef");
        assert_eq!(wrap("short\nlonger line here", 6), "short\nlonger\nline\nhere");
    }

    #[test]
    fn test_wrap_never_splits_words() {
        // The overlong word overflows rather than being cut.
        assert_eq!(wrap("hi unbreakableword hi", 6), "hi\nunbreakableword\nhi");
        assert_eq!(wrap("unbreakableword", 6), "unbreakableword");
    }

    #[test]
    fn test_wrap_exact_fit() {
        assert_eq!(wrap("abcd ef", 4), "abcd\nef");
    }

    #[test]
    fn test_wrap_positions_are_ansi_safe() {
        // "one two three" is 13 visible columns; the codes add 9 bytes.
        let styled = "\x1b[31mone\x1b[0m two three";
        assert_eq!(wrap(styled, 13), styled);
        assert_eq!(wrap(styled, 8), "\x1b[31mone\x1b[0m two\nthree");
    }

    #[test]
    fn test_pad_left_is_identity() {
        assert_eq!(pad("text", Alignment::Left, 40), "text");
    }

    #[test]
    fn test_pad_right() {
        assert_eq!(pad("abc", Alignment::Right, 10), "       abc");
    }

    #[test]
    fn test_pad_center_rounds_down() {
        assert_eq!(pad("abc", Alignment::Center, 10), "   abc");
    }

    #[test]
    fn test_pad_measures_ansi_safely() {
        let styled = "\x1b[31mabc\x1b[0m";
        let padded = pad(styled, Alignment::Right, 10);
        assert!(padded.starts_with("       "));
        assert!(padded.ends_with(styled));
    }

    #[test]
    fn test_pad_wider_than_width_unmodified() {
        assert_eq!(pad("0123456789", Alignment::Center, 4), "0123456789");
        assert_eq!(pad("0123456789", Alignment::Right, 0), "0123456789");
    }

    #[test]
    fn test_longest_line_length() {
        assert_eq!(longest_line_length("a\nlonger\nmid"), 6);
        assert_eq!(longest_line_length(""), 0);
        assert_eq!(longest_of(["xx", "\x1b[31myyy\x1b[0m"]), 3);
    }

    proptest! {
        #[test]
        fn prop_wrap_idempotent(text in "[a-z ]{0,80}", width in 1usize..40) {
            let once = wrap(&text, width);
            prop_assert_eq!(wrap(&once, width), once.clone());
        }

        #[test]
        fn prop_pad_never_shortens(
            text in "[a-zA-Z0-9 ]{0,40}",
            width in 0usize..60,
        ) {
            for alignment in [Alignment::Left, Alignment::Right, Alignment::Center] {
                let padded = pad(&text, alignment, width);
                prop_assert!(crate::metrics::display_length(&padded) >= crate::metrics::display_length(&text));
            }
            prop_assert_eq!(pad(&text, Alignment::Left, width), text.clone());
        }
    }
}

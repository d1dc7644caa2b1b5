//! Line-oriented prompts: any-key pauses, single-character choices, free
//! text, and masked password entry.
//!
//! Every prompt records what the user answered via
//! [`Console::set_last_input`], matching the interactive widgets.

use std::io::{self, Read, Write};

use termbelt_core::color::{BOLD, RESET};

use crate::console::Console;
use crate::key::{Key, KeyReader, RawModeGuard};

/// Pause until any single keystroke arrives.
///
/// Prints `prompt` (or a stock message) without a newline, reads one key
/// in cbreak mode, then moves to the next line. Returns the key pressed.
///
/// # Errors
///
/// Propagates stream failures and end-of-input.
pub fn any_key<R: Read, O: Write, E: Write>(
    keys: &mut KeyReader<R>,
    console: &mut Console<O, E>,
    prompt: Option<&str>,
) -> io::Result<Key> {
    console.write_inline(prompt.unwrap_or("Press any key to continue "))?;
    let _guard = RawModeGuard::new()?;
    let key = keys.read_key()?;
    console.write_inline("\n")?;
    Ok(key)
}

/// Prompt for one character out of `options`.
///
/// The option list renders inside brackets with the default (if any) in
/// bold: `Continue? [y,N]: `-style. A valid keystroke is echoed and
/// returned immediately. RETURN, or any key outside `options`, resolves to
/// the default when one is set; without a default the prompt is repeated
/// until a valid key arrives.
///
/// # Errors
///
/// Propagates stream failures and end-of-input.
pub fn prompt_choice<R: Read, O: Write, E: Write>(
    keys: &mut KeyReader<R>,
    console: &mut Console<O, E>,
    prompt: &str,
    options: &[char],
    default: Option<char>,
) -> io::Result<char> {
    let rendered_options = options
        .iter()
        .map(|&option| {
            if Some(option) == default {
                format!("{BOLD}{option}{RESET}")
            } else {
                option.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(",");
    let line = match default {
        Some(default) => format!("{prompt} [{rendered_options}](Default {default}): "),
        None => format!("{prompt} [{rendered_options}]: "),
    };

    let _guard = RawModeGuard::new()?;
    loop {
        console.write_inline(&line)?;
        let key = keys.read_key()?;
        match key {
            Key::Char(ch) if options.contains(&ch) => {
                console.write_inline(&format!("{ch}\n"))?;
                console.set_last_input(ch.to_string());
                return Ok(ch);
            }
            _ => {
                if let Some(default) = default {
                    console.write_inline("\n")?;
                    console.set_last_input(default.to_string());
                    return Ok(default);
                }
                // No default to fall back on; show what was typed and ask
                // again on a fresh line.
                if let Some(ch) = key.as_char() {
                    console.write_inline(&format!("{ch}"))?;
                }
                console.write_inline("\n")?;
            }
        }
    }
}

/// Yes/no convenience wrapper around [`prompt_choice`].
///
/// `default` is lowercased; anything other than `y`/`n` means no default.
///
/// # Errors
///
/// Propagates stream failures and end-of-input.
pub fn prompt_choice_yn<R: Read, O: Write, E: Write>(
    keys: &mut KeyReader<R>,
    console: &mut Console<O, E>,
    prompt: &str,
    default: Option<char>,
) -> io::Result<char> {
    let default = default
        .map(|ch| ch.to_ascii_lowercase())
        .filter(|ch| matches!(ch, 'y' | 'n'));
    prompt_choice(keys, console, prompt, &['y', 'n'], default)
}

/// Prompt for a free-form line of text.
///
/// Runs in cooked mode so the terminal driver handles editing; the answer
/// is trimmed and recorded as the last input.
///
/// # Errors
///
/// Propagates stream failures.
pub fn read_line<R: Read, O: Write, E: Write>(
    keys: &mut KeyReader<R>,
    console: &mut Console<O, E>,
    prompt: &str,
) -> io::Result<String> {
    console.write_inline(&format!("{prompt}: "))?;
    let answer = keys.read_line()?;
    console.set_last_input(answer.clone());
    Ok(answer)
}

/// Prompt for a line of text, echoing `*` per character.
///
/// Backspace and DEL remove the last character and its star. RETURN
/// finishes the entry.
///
/// # Errors
///
/// Propagates stream failures and end-of-input.
pub fn read_password<R: Read, O: Write, E: Write>(
    keys: &mut KeyReader<R>,
    console: &mut Console<O, E>,
    prompt: &str,
) -> io::Result<String> {
    console.write_inline(&format!("{prompt}: "))?;
    let _guard = RawModeGuard::new()?;
    let mut entry = String::new();
    loop {
        match keys.read_key()? {
            Key::Enter => break,
            Key::Backspace | Key::Delete => {
                if entry.pop().is_some() {
                    console.write_inline("\x08\x1b[0K")?;
                }
            }
            Key::Char(ch) => {
                entry.push(ch);
                console.write_inline("*")?;
            }
            _ => {}
        }
    }
    console.write_inline("\n")?;
    console.set_last_input(entry.clone());
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn fixture(bytes: &[u8]) -> (KeyReader<Cursor<Vec<u8>>>, Console<Vec<u8>, Vec<u8>>) {
        (
            KeyReader::new(Cursor::new(bytes.to_vec())),
            Console::with_streams(Vec::new(), Vec::new()).fixed_width(40),
        )
    }

    fn stdout_of(console: Console<Vec<u8>, Vec<u8>>) -> String {
        String::from_utf8(console.into_streams().0).unwrap()
    }

    #[test]
    fn test_any_key_returns_pressed_key() {
        let (mut keys, mut console) = fixture(b"q");
        let key = any_key(&mut keys, &mut console, Some("pause")).unwrap();
        assert_eq!(key, Key::Char('q'));
        assert_eq!(stdout_of(console), "pause\n");
    }

    #[test]
    fn test_prompt_choice_valid_key() {
        let (mut keys, mut console) = fixture(b"b");
        let choice =
            prompt_choice(&mut keys, &mut console, "Pick", &['a', 'b', 'c'], None).unwrap();
        assert_eq!(choice, 'b');
        assert_eq!(console.last_input(), Some("b"));
        let rendered = stdout_of(console);
        assert!(rendered.starts_with("Pick [a,b,c]: "));
        assert!(rendered.ends_with("b\n"));
    }

    #[test]
    fn test_prompt_choice_return_takes_default() {
        let (mut keys, mut console) = fixture(b"\n");
        let choice =
            prompt_choice(&mut keys, &mut console, "Pick", &['a', 'b'], Some('a')).unwrap();
        assert_eq!(choice, 'a');
        assert_eq!(console.last_input(), Some("a"));
    }

    #[test]
    fn test_prompt_choice_invalid_takes_default() {
        let (mut keys, mut console) = fixture(b"z");
        let choice =
            prompt_choice(&mut keys, &mut console, "Pick", &['a', 'b'], Some('b')).unwrap();
        assert_eq!(choice, 'b');
    }

    #[test]
    fn test_prompt_choice_no_default_reprompts() {
        let (mut keys, mut console) = fixture(b"za");
        let choice = prompt_choice(&mut keys, &mut console, "Pick", &['a', 'b'], None).unwrap();
        assert_eq!(choice, 'a');
        let rendered = stdout_of(console);
        assert_eq!(rendered.matches("Pick [a,b]: ").count(), 2);
    }

    #[test]
    fn test_prompt_choice_bolds_default() {
        let (mut keys, mut console) = fixture(b"y");
        prompt_choice(&mut keys, &mut console, "Go", &['y', 'n'], Some('n')).unwrap();
        let rendered = stdout_of(console);
        assert!(rendered.contains("[y,\x1b[1mn\x1b[0m](Default n): "));
    }

    #[test]
    fn test_prompt_choice_yn_normalizes_default() {
        let (mut keys, mut console) = fixture(b"\n");
        let choice = prompt_choice_yn(&mut keys, &mut console, "Sure", Some('Y')).unwrap();
        assert_eq!(choice, 'y');
    }

    #[test]
    fn test_read_line_trims_and_records() {
        let (mut keys, mut console) = fixture(b"  some answer \n");
        let answer = read_line(&mut keys, &mut console, "Name").unwrap();
        assert_eq!(answer, "some answer");
        assert_eq!(console.last_input(), Some("some answer"));
        assert_eq!(stdout_of(console), "Name: ");
    }

    #[test]
    fn test_read_password_masks_and_backspaces() {
        let (mut keys, mut console) = fixture(b"abc\x7fd\n");
        let secret = read_password(&mut keys, &mut console, "Pass").unwrap();
        assert_eq!(secret, "abd");
        assert_eq!(console.last_input(), Some("abd"));
        let rendered = stdout_of(console);
        assert_eq!(rendered.matches('*').count(), 4);
        assert!(rendered.contains("\x08\x1b[0K"));
    }

    #[test]
    fn test_read_password_backspace_on_empty() {
        let (mut keys, mut console) = fixture(b"\x7fa\n");
        let secret = read_password(&mut keys, &mut console, "Pass").unwrap();
        assert_eq!(secret, "a");
        let rendered = stdout_of(console);
        assert!(!rendered.contains('\x08'));
    }
}

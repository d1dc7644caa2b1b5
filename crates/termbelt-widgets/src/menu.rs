//! Vertical boxed menu.
//!
//! Options are ordered `(key, label)` pairs; the key of the accepted
//! option is returned. Navigation wraps top-to-bottom, TAB scrolls down,
//! and pressing a single-character option key accepts it directly.
//!
//! Building the boxed block (wrapping labels, padding keys, measuring the
//! widest line) is the expensive part of a redraw, so it is cached behind
//! an explicit key over everything the layout depends on; only the
//! highlight is re-applied per keystroke.

use std::io::{self, Read, Write};

use termbelt_core::{
    color::{sgr_open, BOLD, RESET, REVERSE},
    display_length, wrap, Alignment, Background, BeltError, Color, Result,
};
use termbelt_terminal::{Console, Key, KeyReader, RawModeGuard, Stream};

const BOX_MARGIN: usize = 2;
const INDENT: &str = "  ";
const KEY_PAD: &str = "  ";
const PROMPT: &str = "(Use up and down arrow keys, hit RETURN to select)";

/// Everything the built block depends on. A draw with a different key
/// discards the cached block.
#[derive(Debug, Clone, PartialEq)]
struct CacheKey {
    options: Vec<(String, String)>,
    inner_align: Alignment,
    outer_align: Alignment,
    foreground: Option<Color>,
    background: Option<Background>,
    width: usize,
}

/// One logical row of the box: a description/blank/prompt line group, or
/// the wrapped lines of one option.
#[derive(Debug, Clone)]
struct Row {
    option_index: Option<usize>,
    lines: Vec<String>,
}

#[derive(Debug, Clone)]
struct BuiltMenu {
    key: CacheKey,
    rows: Vec<Row>,
    content_width: usize,
}

/// A vertical menu in a `#` border box.
#[derive(Debug, Clone)]
pub struct Menu {
    description: String,
    options: Vec<(String, String)>,
    inner_align: Alignment,
    outer_align: Alignment,
    foreground: Option<Color>,
    background: Option<Background>,
    cache: Option<BuiltMenu>,
}

impl Menu {
    /// A menu with the given description and no options yet.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            options: Vec::new(),
            inner_align: Alignment::Left,
            outer_align: Alignment::Left,
            foreground: None,
            background: None,
            cache: None,
        }
    }

    /// Append one option. Keys should be unique; order is display and
    /// navigation order.
    #[must_use]
    pub fn option(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.push((key.into(), label.into()));
        self
    }

    /// Alignment of the content inside the box.
    #[must_use]
    pub const fn inner_align(mut self, alignment: Alignment) -> Self {
        self.inner_align = alignment;
        self
    }

    /// Alignment of the box within the terminal.
    #[must_use]
    pub const fn outer_align(mut self, alignment: Alignment) -> Self {
        self.outer_align = alignment;
        self
    }

    /// Foreground color of the whole box.
    #[must_use]
    pub const fn foreground(mut self, color: Color) -> Self {
        self.foreground = Some(color);
        self
    }

    /// Background color or style of the whole box.
    #[must_use]
    pub fn background(mut self, background: impl Into<Background>) -> Self {
        self.background = Some(background.into());
        self
    }

    /// Run the menu loop and return the key of the accepted option.
    ///
    /// The first option starts highlighted. DOWN/TAB and UP move the
    /// highlight with wraparound; RETURN accepts the highlighted option; a
    /// single-character option key accepts that option directly. Anything
    /// else is ignored. The accepted key is recorded as the console's last
    /// input, and the final accepted frame stays on screen.
    ///
    /// # Errors
    ///
    /// Fails when the menu has no options or on stream failure.
    pub fn run<R: Read, O: Write, E: Write>(
        &mut self,
        keys: &mut KeyReader<R>,
        console: &mut Console<O, E>,
    ) -> Result<String> {
        if self.options.is_empty() {
            return Err(BeltError::io(
                io::Error::new(io::ErrorKind::InvalidInput, "menu has no options"),
                "menu",
            ));
        }
        let io_err = |err| BeltError::io(err, "menu");
        let _guard = RawModeGuard::new().map_err(io_err)?;

        let mut selected = 0;
        self.draw(console, selected).map_err(io_err)?;

        let chosen = loop {
            match keys.read_key().map_err(io_err)? {
                Key::Down | Key::Tab => {
                    console.erase().map_err(io_err)?;
                    selected = (selected + 1) % self.options.len();
                    self.draw(console, selected).map_err(io_err)?;
                }
                Key::Up => {
                    console.erase().map_err(io_err)?;
                    selected = if selected == 0 {
                        self.options.len() - 1
                    } else {
                        selected - 1
                    };
                    self.draw(console, selected).map_err(io_err)?;
                }
                Key::Enter => break self.options[selected].0.clone(),
                Key::Char(ch) => {
                    let direct = self
                        .options
                        .iter()
                        .find(|(key, _)| key.chars().eq(std::iter::once(ch)));
                    if let Some((key, _)) = direct {
                        break key.clone();
                    }
                }
                _ => {}
            }
        };

        log::debug!("menu accepted key {chosen:?}");
        console.set_last_input(chosen.clone());
        self.cache = None;
        Ok(chosen)
    }

    fn draw<O: Write, E: Write>(
        &mut self,
        console: &mut Console<O, E>,
        selected: usize,
    ) -> io::Result<()> {
        let key = CacheKey {
            options: self.options.clone(),
            inner_align: self.inner_align,
            outer_align: self.outer_align,
            foreground: self.foreground,
            background: self.background,
            width: console.width(),
        };
        if self.cache.as_ref().map_or(true, |built| built.key != key) {
            self.cache = Some(self.build(key));
        }
        // The cache was just (re)filled above.
        let Some(built) = self.cache.as_ref() else {
            return Ok(());
        };

        let default = sgr_open(self.foreground, self.background).unwrap_or_default();
        let border = format!(
            "{default}{}{}",
            "#".repeat(built.content_width + 2 * BOX_MARGIN + 2),
            close(&default)
        );

        let mut block = Vec::new();
        block.push(border.clone());
        for row in &built.rows {
            let highlight = row.option_index == Some(selected);
            for line in &row.lines {
                block.push(boxed_line(
                    line,
                    built.content_width,
                    self.inner_align,
                    &default,
                    highlight,
                ));
            }
        }
        block.push(border);

        console.write(
            &block.join("\n"),
            Stream::Stdout,
            None,
            None,
            None,
            self.outer_align,
        )
    }

    /// Wrap, pad, and measure every line of the box content.
    fn build(&self, key: CacheKey) -> BuiltMenu {
        let width = key.width;
        let longest_key = self
            .options
            .iter()
            .map(|(k, _)| display_length(k))
            .max()
            .unwrap_or(0);
        // border + margin on each side.
        let text_chrome = 2 * BOX_MARGIN + 2;

        let mut rows = Vec::new();
        rows.push(Row {
            option_index: None,
            lines: split_wrapped(&self.description, width, text_chrome),
        });
        rows.push(blank_row());

        for (index, (option_key, label)) in self.options.iter().enumerate() {
            let key_len = display_length(option_key);
            let align_pad = if key.inner_align == Alignment::Left {
                " ".repeat(longest_key - key_len)
            } else {
                String::new()
            };
            let decoration = INDENT.len() + key_len + 1 + align_pad.len() + KEY_PAD.len();
            let wrapped = split_wrapped(label, width, text_chrome + decoration);

            let lines = wrapped
                .iter()
                .enumerate()
                .map(|(i, line)| {
                    if i == 0 {
                        format!("{INDENT}{option_key}){align_pad}{KEY_PAD}{line}")
                    } else {
                        // Continuations stay flush under the first value
                        // character, never re-keyed.
                        format!(
                            "{INDENT}{}{align_pad}{KEY_PAD}{line}",
                            " ".repeat(key_len + 1)
                        )
                    }
                })
                .collect();
            rows.push(Row {
                option_index: Some(index),
                lines,
            });
        }

        rows.push(blank_row());
        rows.push(Row {
            option_index: None,
            lines: split_wrapped(PROMPT, width, text_chrome),
        });

        let content_width = rows
            .iter()
            .flat_map(|row| row.lines.iter())
            .map(|line| display_length(line))
            .max()
            .unwrap_or(0);

        BuiltMenu {
            key,
            rows,
            content_width,
        }
    }
}

fn blank_row() -> Row {
    Row {
        option_index: None,
        lines: vec![String::new()],
    }
}

fn split_wrapped(text: &str, width: usize, chrome: usize) -> Vec<String> {
    let wrapped = if width == 0 {
        text.to_string()
    } else {
        wrap(text, width.saturating_sub(chrome))
    };
    wrapped.split('\n').map(str::to_string).collect()
}

fn close(default: &str) -> &'static str {
    if default.is_empty() {
        ""
    } else {
        RESET
    }
}

/// One bordered content line, optionally inverse-highlighted.
fn boxed_line(
    content: &str,
    content_width: usize,
    inner_align: Alignment,
    default: &str,
    highlight: bool,
) -> String {
    let slack = content_width.saturating_sub(display_length(content));
    let (pad_left, pad_right) = match inner_align {
        Alignment::Left => (0, slack),
        Alignment::Right => (slack, 0),
        Alignment::Center => (slack.div_ceil(2), slack / 2),
    };
    let margin = " ".repeat(BOX_MARGIN);

    let mut line = String::new();
    line.push_str(default);
    line.push('#');
    line.push_str(&margin);
    line.push_str(&" ".repeat(pad_left));
    if highlight {
        line.push_str(close(default));
        line.push_str(BOLD);
        line.push_str(REVERSE);
        line.push_str(content);
        line.push_str(RESET);
        line.push_str(default);
    } else {
        line.push_str(content);
    }
    line.push_str(&" ".repeat(pad_right));
    line.push_str(&margin);
    line.push('#');
    line.push_str(close(default));
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn fixture(bytes: &[u8]) -> (KeyReader<Cursor<Vec<u8>>>, Console<Vec<u8>, Vec<u8>>) {
        (
            KeyReader::new(Cursor::new(bytes.to_vec())),
            Console::with_streams(Vec::new(), Vec::new()).fixed_width(60),
        )
    }

    fn abc_menu() -> Menu {
        Menu::new("Pick one")
            .option("a", "first")
            .option("b", "second")
            .option("c", "third")
    }

    #[test]
    fn test_return_accepts_first_option() {
        let (mut keys, mut console) = fixture(b"\n");
        let chosen = abc_menu().run(&mut keys, &mut console).unwrap();
        assert_eq!(chosen, "a");
        assert_eq!(console.last_input(), Some("a"));
    }

    #[test]
    fn test_down_twice_up_once_selects_b() {
        let down = b"\x1b[B";
        let up = b"\x1b[A";
        let mut script = Vec::new();
        script.extend_from_slice(down);
        script.extend_from_slice(down);
        script.extend_from_slice(up);
        script.push(b'\n');
        let (mut keys, mut console) = fixture(&script);
        let chosen = abc_menu().run(&mut keys, &mut console).unwrap();
        assert_eq!(chosen, "b");
    }

    #[test]
    fn test_up_from_first_wraps_to_last() {
        let (mut keys, mut console) = fixture(b"\x1b[A\n");
        let chosen = abc_menu().run(&mut keys, &mut console).unwrap();
        assert_eq!(chosen, "c");
    }

    #[test]
    fn test_down_past_last_wraps_to_first() {
        let (mut keys, mut console) = fixture(b"\x1b[B\x1b[B\x1b[B\n");
        let chosen = abc_menu().run(&mut keys, &mut console).unwrap();
        assert_eq!(chosen, "a");
    }

    #[test]
    fn test_tab_scrolls_down() {
        let (mut keys, mut console) = fixture(b"\t\n");
        let chosen = abc_menu().run(&mut keys, &mut console).unwrap();
        assert_eq!(chosen, "b");
    }

    #[test]
    fn test_direct_key_accepts_immediately() {
        let (mut keys, mut console) = fixture(b"c");
        let chosen = abc_menu().run(&mut keys, &mut console).unwrap();
        assert_eq!(chosen, "c");
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let (mut keys, mut console) = fixture(b"zq9\n");
        let chosen = abc_menu().run(&mut keys, &mut console).unwrap();
        assert_eq!(chosen, "a");
    }

    #[test]
    fn test_empty_menu_fails_before_drawing() {
        let (mut keys, mut console) = fixture(b"\n");
        let err = Menu::new("empty").run(&mut keys, &mut console).unwrap_err();
        assert!(err.to_string().contains("menu"));
        let (out, _) = console.into_streams();
        assert!(out.is_empty());
    }

    #[test]
    fn test_rendered_box_structure() {
        let (mut keys, mut console) = fixture(b"\n");
        abc_menu().run(&mut keys, &mut console).unwrap();
        let rendered = String::from_utf8(console.into_streams().0).unwrap();
        let first_frame: Vec<&str> = rendered.lines().take(9).collect();
        assert!(first_frame[0].chars().all(|ch| ch == '#'));
        assert!(first_frame[1].contains("Pick one"));
        assert!(first_frame[3].contains("a)  first"));
        assert!(first_frame[7].contains(PROMPT));
        assert!(first_frame[8].chars().all(|ch| ch == '#'));
        // First option carries the inverse-video highlight.
        assert!(first_frame[3].contains(&format!("{BOLD}{REVERSE}")));
        assert!(!first_frame[4].contains(REVERSE));
    }

    #[test]
    fn test_keys_padded_for_flush_values() {
        let (mut keys, mut console) = fixture(b"\n");
        Menu::new("d")
            .option("a", "first")
            .option("long", "second")
            .run(&mut keys, &mut console)
            .unwrap();
        let rendered = String::from_utf8(console.into_streams().0).unwrap();
        assert!(rendered.contains("a)     first"));
        assert!(rendered.contains("long)  second"));
    }

    #[test]
    fn test_redraw_erases_previous_frame() {
        let (mut keys, mut console) = fixture(b"\x1b[B\n");
        abc_menu().run(&mut keys, &mut console).unwrap();
        let rendered = String::from_utf8(console.into_streams().0).unwrap();
        // 9 box lines erased once between the two frames.
        assert_eq!(rendered.matches("\x1b[F\x1b[2K").count(), 9);
    }

    #[test]
    fn test_colored_menu_embeds_codes() {
        let (mut keys, mut console) = fixture(b"\n");
        Menu::new("d")
            .option("a", "one")
            .foreground(Color::White)
            .background(Color::Blue)
            .run(&mut keys, &mut console)
            .unwrap();
        let rendered = String::from_utf8(console.into_streams().0).unwrap();
        assert!(rendered.contains("\x1b[37;44m"));
    }
}

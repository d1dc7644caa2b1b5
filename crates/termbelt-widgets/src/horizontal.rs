//! Single-line horizontal menu.
//!
//! Options render on one line with two-space gaps, the selection shown
//! inline in inverse video. LEFT/RIGHT (TAB = RIGHT) move with wraparound;
//! only RETURN accepts — there is no direct-key shortcut.

use std::io::{self, Read, Write};

use termbelt_core::{
    color::{sgr_open, BOLD, RESET, REVERSE},
    Alignment, Background, BeltError, Color, Result,
};
use termbelt_terminal::{Console, Key, KeyReader, RawModeGuard, Stream};

const OPTION_GAP: &str = "  ";
const PROMPT: &str = "(Use left and right arrow keys, hit RETURN to select)";

/// A one-line menu navigated with the horizontal arrows.
#[derive(Debug, Clone)]
pub struct HorizontalMenu {
    description: String,
    options: Vec<(String, String)>,
    initial_key: Option<String>,
    alignment: Alignment,
    foreground: Option<Color>,
    background: Option<Background>,
}

impl HorizontalMenu {
    /// A menu with the given description and no options yet.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            options: Vec::new(),
            initial_key: None,
            alignment: Alignment::Left,
            foreground: None,
            background: None,
        }
    }

    /// Append one option.
    #[must_use]
    pub fn option(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.push((key.into(), label.into()));
        self
    }

    /// Start with this key highlighted instead of the first option.
    /// Unknown keys fall back to the first option.
    #[must_use]
    pub fn initial_key(mut self, key: impl Into<String>) -> Self {
        self.initial_key = Some(key.into());
        self
    }

    /// Alignment of the menu block within the terminal.
    #[must_use]
    pub const fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Foreground color.
    #[must_use]
    pub const fn foreground(mut self, color: Color) -> Self {
        self.foreground = Some(color);
        self
    }

    /// Background color or style.
    #[must_use]
    pub fn background(mut self, background: impl Into<Background>) -> Self {
        self.background = Some(background.into());
        self
    }

    /// Run the menu loop and return the key of the accepted option.
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
                "horizontal_menu",
            ));
        }
        let io_err = |err| BeltError::io(err, "horizontal_menu");
        let _guard = RawModeGuard::new().map_err(io_err)?;

        let mut selected = self
            .initial_key
            .as_ref()
            .and_then(|initial| self.options.iter().position(|(key, _)| key == initial))
            .unwrap_or(0);
        self.draw(console, selected).map_err(io_err)?;

        let chosen = loop {
            match keys.read_key().map_err(io_err)? {
                Key::Right | Key::Tab => {
                    console.erase().map_err(io_err)?;
                    selected = (selected + 1) % self.options.len();
                    self.draw(console, selected).map_err(io_err)?;
                }
                Key::Left => {
                    console.erase().map_err(io_err)?;
                    selected = if selected == 0 {
                        self.options.len() - 1
                    } else {
                        selected - 1
                    };
                    self.draw(console, selected).map_err(io_err)?;
                }
                Key::Enter => break self.options[selected].0.clone(),
                _ => {}
            }
        };

        console.set_last_input(chosen.clone());
        Ok(chosen)
    }

    fn draw<O: Write, E: Write>(
        &self,
        console: &mut Console<O, E>,
        selected: usize,
    ) -> io::Result<()> {
        let default = sgr_open(self.foreground, self.background).unwrap_or_default();
        let strip = self
            .options
            .iter()
            .enumerate()
            .map(|(index, (_, label))| {
                if index == selected {
                    // Cancel the surrounding style, highlight, then reopen it
                    // so the rest of the line keeps its colors.
                    if default.is_empty() {
                        format!("{BOLD}{REVERSE}{label}{RESET}")
                    } else {
                        format!("{RESET}{BOLD}{REVERSE}{label}{RESET}{default}")
                    }
                } else {
                    label.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(OPTION_GAP);

        console.write(
            &format!("{}\n{strip}\n{PROMPT}", self.description),
            Stream::Stdout,
            None,
            self.foreground,
            self.background,
            self.alignment,
        )
    }
}

//! Interactive file selector.
//!
//! Presents a directory listing in a `#` border box with a five-row scroll
//! window. RETURN opens directories and accepts files; `o` accepts files
//! and, when enabled, directories. The listing shows `.` and `..` first and
//! otherwise keeps the order the OS enumerates entries in — it is never
//! re-sorted.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use termbelt_core::{
    color::{sgr_open, BOLD, RESET, REVERSE},
    display_length, longest_of, wrap, Alignment, Background, BeltError, Color, ErrorKind, Result,
};
use termbelt_terminal::{Console, Key, KeyReader, RawModeGuard, Stream};

const WINDOW_SIZE: usize = 5;
const BOX_MARGIN: usize = 4;
const PROMPT: &str = "(Use up and down arrow keys, 'o' to select, RETURN to open directory)";
const OPERATION: &str = "file_select";

#[derive(Debug, Clone)]
struct Entry {
    name: String,
    path: PathBuf,
    is_dir: bool,
}

impl Entry {
    fn display_name(&self) -> String {
        if self.is_dir {
            format!("  {}/", self.name)
        } else {
            format!("  {}", self.name)
        }
    }
}

/// A scrolling file picker over a starting directory.
#[derive(Debug, Clone)]
pub struct FileSelect {
    directory: PathBuf,
    description: String,
    alignment: Alignment,
    foreground: Option<Color>,
    background: Option<Background>,
    select_directories: bool,
}

impl FileSelect {
    /// A picker starting at `directory`.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            description: "Select a file".to_string(),
            alignment: Alignment::Left,
            foreground: None,
            background: None,
            select_directories: false,
        }
    }

    /// Description shown at the top of the box.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Alignment of the box within the terminal.
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

    /// Let `o` accept a directory instead of only files.
    #[must_use]
    pub const fn select_directories(mut self, enabled: bool) -> Self {
        self.select_directories = enabled;
        self
    }

    /// Run the selector loop and return the absolute path of the accepted
    /// entry.
    ///
    /// UP/DOWN (TAB = DOWN) move the selection, clamped at the listing
    /// bounds. RETURN on a file accepts it; RETURN on a directory descends
    /// into it. `o` accepts a file, and a directory too when directory
    /// selection is enabled; otherwise `o` on a directory is ignored.
    ///
    /// # Errors
    ///
    /// Fails before any rendering when the starting directory does not
    /// exist (code 1) or cannot be read (code 2), and on stream failure.
    pub fn run<R: Read, O: Write, E: Write>(
        &mut self,
        keys: &mut KeyReader<R>,
        console: &mut Console<O, E>,
    ) -> Result<PathBuf> {
        let io_err = |err| BeltError::io(err, OPERATION);

        if !self.directory.is_dir() {
            return Err(BeltError::new(
                ErrorKind::DirectoryNotFound(self.directory.clone()),
                OPERATION,
            ));
        }
        let mut directory = fs::canonicalize(&self.directory).map_err(io_err)?;
        let mut entries = scan(&directory)?;
        let mut selected = initial_index(&entries);

        let _guard = RawModeGuard::new().map_err(io_err)?;
        self.draw(console, &directory, &entries, selected)
            .map_err(io_err)?;

        loop {
            match keys.read_key().map_err(io_err)? {
                Key::Down | Key::Tab => {
                    console.erase().map_err(io_err)?;
                    if selected + 1 < entries.len() {
                        selected += 1;
                    }
                    self.draw(console, &directory, &entries, selected)
                        .map_err(io_err)?;
                }
                Key::Up => {
                    console.erase().map_err(io_err)?;
                    selected = selected.saturating_sub(1);
                    self.draw(console, &directory, &entries, selected)
                        .map_err(io_err)?;
                }
                key @ (Key::Enter | Key::Char('o')) => {
                    let entry = &entries[selected];
                    if !entry.is_dir || (key == Key::Char('o') && self.select_directories) {
                        let path = fs::canonicalize(&entry.path).map_err(io_err)?;
                        console.set_last_input(path.display().to_string());
                        return Ok(path);
                    }
                    if key == Key::Enter {
                        directory = fs::canonicalize(&entry.path).map_err(io_err)?;
                        log::debug!("file selector opening {}", directory.display());
                        entries = scan(&directory)?;
                        selected = initial_index(&entries);
                        console.erase().map_err(io_err)?;
                        self.draw(console, &directory, &entries, selected)
                            .map_err(io_err)?;
                    }
                    // 'o' on a directory without the flag falls through.
                }
                _ => {}
            }
        }
    }

    fn draw<O: Write, E: Write>(
        &self,
        console: &mut Console<O, E>,
        directory: &Path,
        entries: &[Entry],
        selected: usize,
    ) -> io::Result<()> {
        let width = console.width();
        let path_line = directory.display().to_string();
        let names: Vec<String> = entries.iter().map(Entry::display_name).collect();

        // Narrow listings make an unreadably thin box; keep it at least a
        // third of the terminal wide.
        let mut box_width = longest_of(&names).max(display_length(&path_line));
        if width / 3 > box_width {
            box_width = width / 3;
        }

        let default = sgr_open(self.foreground, self.background).unwrap_or_default();
        let border = "#".repeat(box_width + 2 * BOX_MARGIN + 2);
        let divider = format!(
            "#{margin}{}{margin}#",
            "-".repeat(box_width),
            margin = " ".repeat(BOX_MARGIN)
        );

        let (upper, lower) = window_bounds(entries.len(), selected);

        let mut lines = Vec::new();
        lines.push(border.clone());
        for line in wrap(&self.description, box_width).split('\n') {
            lines.push(text_line(line, box_width));
        }
        lines.push(text_line(&path_line, box_width));
        lines.push(divider.clone());
        for (index, name) in names.iter().enumerate().take(lower + 1).skip(upper) {
            if index == selected {
                lines.push(highlighted_line(name, box_width, &default));
            } else {
                lines.push(text_line(name, box_width));
            }
        }
        lines.push(divider);
        for line in wrap(PROMPT, box_width).split('\n') {
            lines.push(centered_line(line, box_width));
        }
        lines.push(border);

        console.write(
            &lines.join("\n"),
            Stream::Stdout,
            None,
            self.foreground,
            self.background,
            self.alignment,
        )
    }
}

/// `.` and `..` first, then the OS enumeration order untouched.
fn scan(directory: &Path) -> Result<Vec<Entry>> {
    let parent = directory.parent().unwrap_or(directory).to_path_buf();
    let mut entries = vec![
        Entry {
            name: ".".to_string(),
            path: directory.to_path_buf(),
            is_dir: true,
        },
        Entry {
            name: "..".to_string(),
            path: parent,
            is_dir: true,
        },
    ];

    let read = fs::read_dir(directory).map_err(|_| {
        BeltError::new(
            ErrorKind::DirectoryNotReadable(directory.to_path_buf()),
            OPERATION,
        )
    })?;
    for item in read {
        let item = item.map_err(|err| BeltError::io(err, OPERATION))?;
        entries.push(Entry {
            name: item.file_name().to_string_lossy().into_owned(),
            is_dir: item.file_type().is_ok_and(|kind| kind.is_dir()),
            path: item.path(),
        });
    }
    Ok(entries)
}

/// First entry after `.` and `..`, or the last entry of a shorter listing.
fn initial_index(entries: &[Entry]) -> usize {
    (entries.len() - 1).min(2)
}

/// Inclusive window over the listing that keeps `selected` visible.
fn window_bounds(len: usize, selected: usize) -> (usize, usize) {
    let lower = (WINDOW_SIZE - 1).min(len.saturating_sub(1));
    if selected >= WINDOW_SIZE {
        (selected + 1 - WINDOW_SIZE, selected)
    } else {
        (0, lower)
    }
}

fn text_line(content: &str, box_width: usize) -> String {
    let margin = " ".repeat(BOX_MARGIN);
    format!(
        "#{margin}{content}{}{margin}#",
        " ".repeat(box_width.saturating_sub(display_length(content)))
    )
}

fn centered_line(content: &str, box_width: usize) -> String {
    let margin = " ".repeat(BOX_MARGIN);
    let slack = box_width.saturating_sub(display_length(content));
    format!(
        "#{margin}{}{content}{}{margin}#",
        " ".repeat(slack.div_ceil(2)),
        " ".repeat(slack / 2)
    )
}

fn highlighted_line(content: &str, box_width: usize, default: &str) -> String {
    let margin = " ".repeat(BOX_MARGIN);
    let pad = " ".repeat(box_width.saturating_sub(display_length(content)));
    if default.is_empty() {
        format!("#{margin}{BOLD}{REVERSE}{content}{RESET}{pad}{margin}#")
    } else {
        format!("#{margin}{RESET}{BOLD}{REVERSE}{content}{RESET}{default}{pad}{margin}#")
    }
}

//! Interactive date picker.
//!
//! Three fields — year, month, day — edited either by arrow
//! increment/decrement or by typing directly into the focused field.
//! Typed keystrokes accumulate in a buffer that is cleared whenever the
//! focus moves; the buffer drives direct entry such as `19` → year 1900 or
//! `ma` → March.

use std::io::{self, Read, Write};

use chrono::{Datelike, Local, NaiveDate};
use termbelt_core::{
    color::{BOLD, RESET, REVERSE},
    BeltError, Result,
};
use termbelt_terminal::{Console, Key, KeyReader, RawModeGuard};

const OPERATION: &str = "date_picker";

const MONTH_ABBREVS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// The field currently taking input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Year,
    Month,
    Day,
}

impl Field {
    const fn next(self) -> Self {
        match self {
            Self::Year => Self::Month,
            Self::Month => Self::Day,
            Self::Day => Self::Year,
        }
    }

    const fn previous(self) -> Self {
        match self {
            Self::Year => Self::Day,
            Self::Month => Self::Year,
            Self::Day => Self::Month,
        }
    }
}

/// An arrow-and-keystroke driven date prompt.
#[derive(Debug, Clone)]
pub struct DatePicker {
    prompt: String,
    initial: Option<NaiveDate>,
}

impl DatePicker {
    /// A picker with the given prompt, starting at today's date.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            initial: None,
        }
    }

    /// Start from this date instead of today. The date also serves as the
    /// reference the buffer-overflow resets fall back to.
    #[must_use]
    pub const fn initial_date(mut self, date: NaiveDate) -> Self {
        self.initial = Some(date);
        self
    }

    /// Run the picker loop and return the composed date.
    ///
    /// TAB/RIGHT and LEFT move focus with wraparound and clear the typing
    /// buffer. UP/DOWN step the focused field: the year without bound, the
    /// month wrapping 1↔12 (clamping the day into the new month), the day
    /// wrapping within the month. Alphanumeric keys type into the focused
    /// field; BACKSPACE untypes. RETURN accepts.
    ///
    /// # Errors
    ///
    /// Fails on stream failure or end of input.
    pub fn run<R: Read, O: Write, E: Write>(
        &mut self,
        keys: &mut KeyReader<R>,
        console: &mut Console<O, E>,
    ) -> Result<NaiveDate> {
        let io_err = |err| BeltError::io(err, OPERATION);
        let _guard = RawModeGuard::new().map_err(io_err)?;

        let today = self.initial.unwrap_or_else(|| Local::now().date_naive());
        let mut state = State::starting_at(today);

        self.draw(console, &state).map_err(io_err)?;
        loop {
            match keys.read_key().map_err(io_err)? {
                Key::Enter => break,
                Key::Tab | Key::Right => {
                    state.buffer.clear();
                    state.focus = state.focus.next();
                    self.redraw(console, &state).map_err(io_err)?;
                }
                Key::Left => {
                    state.buffer.clear();
                    state.focus = state.focus.previous();
                    self.redraw(console, &state).map_err(io_err)?;
                }
                Key::Up => {
                    state.buffer.clear();
                    state.increment();
                    self.redraw(console, &state).map_err(io_err)?;
                }
                Key::Down => {
                    state.buffer.clear();
                    state.decrement();
                    self.redraw(console, &state).map_err(io_err)?;
                }
                Key::Char(ch) if ch.is_ascii_alphanumeric() => {
                    state.buffer.push(ch);
                    state.apply_buffer();
                    self.redraw(console, &state).map_err(io_err)?;
                }
                Key::Backspace => {
                    state.buffer.pop();
                    state.apply_buffer();
                    self.redraw(console, &state).map_err(io_err)?;
                }
                _ => {}
            }
        }

        let date = NaiveDate::from_ymd_opt(state.year, state.month, state.day).ok_or_else(|| {
            BeltError::io(
                io::Error::new(io::ErrorKind::InvalidData, "composed date out of range"),
                OPERATION,
            )
        })?;
        console.set_last_input(date.to_string());
        Ok(date)
    }

    fn redraw<O: Write, E: Write>(
        &self,
        console: &mut Console<O, E>,
        state: &State,
    ) -> io::Result<()> {
        console.erase()?;
        self.draw(console, state)
    }

    fn draw<O: Write, E: Write>(
        &self,
        console: &mut Console<O, E>,
        state: &State,
    ) -> io::Result<()> {
        let month_index = state.month.saturating_sub(1) as usize;
        let fields = [
            (Field::Year, state.year.to_string()),
            (
                Field::Month,
                MONTH_ABBREVS.get(month_index).copied().unwrap_or("???").to_string(),
            ),
            (Field::Day, state.day.to_string()),
        ];
        let line = fields
            .iter()
            .map(|(field, text)| {
                if *field == state.focus {
                    format!("{BOLD}{REVERSE}{text}{RESET}")
                } else {
                    text.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        console.printout(&format!("{}\n{line}", self.prompt))
    }
}

/// Mutable picker state: the three fields, the focus, the typing buffer,
/// and the reference date that overflow resets restore from.
#[derive(Debug, Clone)]
struct State {
    year: i32,
    month: u32,
    day: u32,
    focus: Field,
    buffer: String,
    reference: NaiveDate,
}

impl State {
    fn starting_at(reference: NaiveDate) -> Self {
        Self {
            year: reference.year(),
            month: reference.month(),
            day: reference.day(),
            focus: Field::Year,
            buffer: String::new(),
            reference,
        }
    }

    fn increment(&mut self) {
        match self.focus {
            Field::Year => self.year += 1,
            Field::Month => {
                self.month = if self.month >= 12 { 1 } else { self.month + 1 };
                self.clamp_day();
            }
            Field::Day => {
                self.day += 1;
                if self.day > days_in_month(self.year, self.month) {
                    self.day = 1;
                }
            }
        }
    }

    fn decrement(&mut self) {
        match self.focus {
            Field::Year => self.year -= 1,
            Field::Month => {
                self.month = if self.month <= 1 { 12 } else { self.month - 1 };
                self.clamp_day();
            }
            Field::Day => {
                self.day = if self.day <= 1 {
                    days_in_month(self.year, self.month)
                } else {
                    self.day - 1
                };
            }
        }
    }

    /// Recompute the focused field from the typing buffer.
    fn apply_buffer(&mut self) {
        match self.focus {
            Field::Year => {
                if self.buffer.is_empty() {
                    self.year = self.reference.year();
                } else if self.buffer.chars().count() > 4 {
                    // A fifth keystroke resets and starts the entry over.
                    self.year = self.reference.year();
                    self.buffer.clear();
                } else {
                    self.year = zero_right_padded(&self.buffer, 4);
                }
            }
            Field::Month => {
                if self.buffer.is_empty() {
                    self.month = self.reference.month();
                } else {
                    let typed = self.buffer.to_lowercase();
                    // First chronological prefix match: "ma" is March, not May.
                    let matched = MONTH_ABBREVS
                        .iter()
                        .position(|name| name.to_lowercase().starts_with(&typed));
                    if let Some(index) = matched {
                        self.month = u32::try_from(index).unwrap_or(0) + 1;
                    }
                }
                self.clamp_day();
            }
            Field::Day => {
                if self.buffer.is_empty() {
                    self.day = self.reference.day();
                } else if self.buffer.chars().count() > 2 {
                    self.day = self.reference.day();
                    self.buffer.clear();
                } else {
                    let typed = zero_right_padded(&self.buffer, 2);
                    let max = days_in_month(self.year, self.month);
                    self.day = u32::try_from(typed).unwrap_or(0).clamp(1, max);
                }
                self.clamp_day();
            }
        }
    }

    fn clamp_day(&mut self) {
        let max = days_in_month(self.year, self.month);
        if self.day > max {
            self.day = max;
        }
        if self.day < 1 {
            self.day = 1;
        }
    }
}

/// Parse digits zero-right-padded to `places`: "19" at 4 places is 1900.
/// Non-digit input parses to 0.
fn zero_right_padded(buffer: &str, places: usize) -> i32 {
    let mut padded = buffer.to_string();
    while padded.chars().count() < places {
        padded.push('0');
    }
    padded.parse().unwrap_or(0)
}

/// Day count of a month, leap years included.
fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map_or(31, |last| last.day())
}

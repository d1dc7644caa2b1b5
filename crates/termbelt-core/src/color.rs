//! ANSI SGR color and style codes.

/// Escape introducer for all emitted control sequences.
pub const ESC: &str = "\x1b";

/// SGR reset, reverting to default styling.
pub const RESET: &str = "\x1b[0m";

/// SGR bold.
pub const BOLD: &str = "\x1b[1m";

/// SGR inverse video, used to highlight the current selection.
pub const REVERSE: &str = "\x1b[7m";

/// The eight standard ANSI colors.
///
/// The numeric code selects the foreground slot; background use adds 10
/// (see [`Background`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// ANSI code 30.
    Black,
    /// ANSI code 31.
    Red,
    /// ANSI code 32.
    Green,
    /// ANSI code 33.
    Yellow,
    /// ANSI code 34.
    Blue,
    /// ANSI code 35.
    Magenta,
    /// ANSI code 36.
    Cyan,
    /// ANSI code 37.
    White,
}

impl Color {
    /// Foreground SGR code for this color.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Black => 30,
            Self::Red => 31,
            Self::Green => 32,
            Self::Yellow => 33,
            Self::Blue => 34,
            Self::Magenta => 35,
            Self::Cyan => 36,
            Self::White => 37,
        }
    }
}

/// ANSI text styles.
///
/// Style codes live below the color range and are never offset into the
/// background slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    /// SGR 0.
    Normal,
    /// SGR 1.
    Bold,
    /// SGR 3. Limited terminal support.
    Italic,
    /// SGR 4.
    Underline,
    /// SGR 7, swaps foreground and background.
    Reverse,
    /// SGR 9.
    Strikethrough,
}

impl Style {
    /// SGR code for this style.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::Bold => 1,
            Self::Italic => 3,
            Self::Underline => 4,
            Self::Reverse => 7,
            Self::Strikethrough => 9,
        }
    }
}

/// The background slot of a styled write: either a background color or a
/// text style.
///
/// Colors are offset by 10 into the ANSI background range (e.g. red 31 → 41);
/// styles keep their code unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Background {
    /// A background color, emitted as `code + 10`.
    Color(Color),
    /// A text style, emitted as-is.
    Style(Style),
}

impl Background {
    /// SGR code for this value.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Color(color) => color.code() + 10,
            Self::Style(style) => style.code(),
        }
    }
}

impl From<Color> for Background {
    fn from(color: Color) -> Self {
        Self::Color(color)
    }
}

/// SGR opener for a foreground/background pair, or `None` when both are
/// absent (callers then skip the closing [`RESET`] as well).
#[must_use]
pub fn sgr_open(foreground: Option<Color>, background: Option<Background>) -> Option<String> {
    let mut codes = Vec::new();
    if let Some(fg) = foreground {
        codes.push(fg.code().to_string());
    }
    if let Some(bg) = background {
        codes.push(bg.code().to_string());
    }
    if codes.is_empty() {
        None
    } else {
        Some(format!("{ESC}[{}m", codes.join(";")))
    }
}

impl From<Style> for Background {
    fn from(style: Style) -> Self {
        Self::Style(style)
    }
}

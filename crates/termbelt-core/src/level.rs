//! Severity level tags for classified output lines.

use crate::color::{Color, RESET};
use std::fmt;

/// The closed set of output severity levels.
///
/// Each level renders as a bracketed, colorized tag prepended to output
/// lines, e.g. `[ERROR] ` with the name in red.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// Successful completion. Non-standard addition to the RFC-5424 set.
    Ok,
    Debug,
    Info,
    Notice,
    Warning,
    Error,
    Critical,
    Alert,
    Emergency,
}

impl Level {
    /// Uppercase display name of the level.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Notice => "NOTICE",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
            Self::Alert => "ALERT",
            Self::Emergency => "EMERGENCY",
        }
    }

    /// Tag color: green for success, yellow up to warnings, red beyond.
    const fn color(self) -> Color {
        match self {
            Self::Ok => Color::Green,
            Self::Debug | Self::Info | Self::Notice | Self::Warning => Color::Yellow,
            Self::Error | Self::Critical | Self::Alert | Self::Emergency => Color::Red,
        }
    }

    /// Pre-colorized bracketed tag, including the trailing space that
    /// separates it from the tagged line.
    #[must_use]
    pub fn tag(self) -> String {
        format!("[\x1b[{}m{}{RESET}] ", self.color().code(), self.name())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//! Core types for the termbelt terminal toolkit.
//!
//! This crate holds the pieces every other termbelt crate builds on:
//! ANSI color/style/level codes, ANSI-safe string measurement, the
//! word-wrap and alignment-padding layout primitives, and the shared
//! error type.
//!
//! Everything here is pure with one exception: [`metrics::terminal_width`]
//! probes the controlling terminal on each call and reports 0 when no
//! terminal is available, which downgrades wrapping and padding to no-ops
//! throughout the toolkit.

pub mod color;
pub mod error;
pub mod layout;
pub mod level;
pub mod metrics;

pub use color::{Background, Color, Style};
pub use error::{BeltError, ErrorKind, Result};
pub use layout::{
    longest_line_length, longest_of, pad, pad_to_terminal, wrap, wrap_to_terminal, Alignment,
};
pub use level::Level;
pub use metrics::{display_length, strip_ansi, terminal_width};

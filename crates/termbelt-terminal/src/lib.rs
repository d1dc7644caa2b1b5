//! Terminal I/O for the termbelt toolkit.
//!
//! Three pieces live here: [`key::KeyReader`], which decodes blocking
//! keystrokes (including multi-byte escape sequences) from any byte
//! stream; [`console::Console`], the rendering session that owns the
//! output streams and the erasable-block state; and the [`prompt`]
//! helpers built on both.
//!
//! Generics over [`std::io::Read`]/[`std::io::Write`] keep everything
//! drivable from tests with in-memory buffers.

pub mod console;
pub mod key;
pub mod prompt;

pub use console::{Console, Stream};
pub use key::{Key, KeyReader, RawModeGuard};
pub use prompt::{any_key, prompt_choice, prompt_choice_yn, read_line, read_password};

//! Error types for termbelt operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias for widget-launching operations.
pub type Result<T> = std::result::Result<T, BeltError>;

/// An error raised by a widget-launching operation, carrying the failure
/// kind and the name of the operation it originated from.
///
/// All validation errors are raised synchronously before any rendering;
/// none are retried internally.
#[derive(Debug, Error)]
#[error("{operation}: {kind}")]
pub struct BeltError {
    kind: ErrorKind,
    operation: &'static str,
}

impl BeltError {
    /// Wrap an error kind with its originating operation name.
    #[must_use]
    pub fn new(kind: ErrorKind, operation: &'static str) -> Self {
        Self { kind, operation }
    }

    /// Wrap a stream/terminal I/O failure.
    #[must_use]
    pub fn io(err: io::Error, operation: &'static str) -> Self {
        Self::new(ErrorKind::Io(err), operation)
    }

    /// The failure kind.
    #[must_use]
    pub const fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Name of the operation the error originated from.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        self.operation
    }

    /// Stable numeric code of the failure kind.
    #[must_use]
    pub const fn code(&self) -> u8 {
        self.kind.code()
    }
}

/// The failure taxonomy.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Target directory for file selection does not exist.
    #[error("directory `{}` does not exist", .0.display())]
    DirectoryNotFound(PathBuf),

    /// Target directory for file selection is not readable.
    #[error("directory `{}` is not readable", .0.display())]
    DirectoryNotReadable(PathBuf),

    /// Stream or terminal I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ErrorKind {
    /// Stable numeric code for this kind. I/O failures have no taxonomy
    /// slot and report 0.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::DirectoryNotFound(_) => 1,
            Self::DirectoryNotReadable(_) => 2,
            Self::Io(_) => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_carries_operation_and_code() {
        let err = BeltError::new(
            ErrorKind::DirectoryNotFound(PathBuf::from("/nope")),
            "file_select",
        );
        assert_eq!(err.operation(), "file_select");
        assert_eq!(err.code(), 1);
        assert!(err.to_string().contains("file_select"));
        assert!(err.to_string().contains("/nope"));
    }

    #[test]
    fn test_not_readable_code() {
        let err = BeltError::new(
            ErrorKind::DirectoryNotReadable(PathBuf::from("/locked")),
            "file_select",
        );
        assert_eq!(err.code(), 2);
        assert!(err.to_string().contains("not readable"));
    }

    #[test]
    fn test_io_wrapping() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "gone");
        let err = BeltError::io(io_err, "menu");
        assert_eq!(err.code(), 0);
        assert!(err.to_string().contains("menu"));
        assert!(err.to_string().contains("gone"));
    }
}

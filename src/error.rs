//! Error types for scrollcue.
//!
//! Reveal operations themselves never fail: malformed markup is prose and
//! progress is clamped. Errors only come from configuration and content I/O.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result type alias for scrollcue operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for scrollcue operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error while reading chapter content.
    Io(io::Error),
    /// Chapter file is not valid UTF-8.
    InvalidUtf8 { path: PathBuf },
    /// Rejected reveal configuration.
    InvalidOptions { reason: &'static str },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidUtf8 { path } => {
                write!(f, "content is not valid UTF-8: {}", path.display())
            }
            Self::InvalidOptions { reason } => write!(f, "invalid reveal options: {reason}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidOptions {
            reason: "window_lines must be at least 1",
        };
        assert!(err.to_string().contains("invalid reveal options"));
        assert!(err.to_string().contains("window_lines"));

        let err = Error::InvalidUtf8 {
            path: PathBuf::from("chapter.txt"),
        };
        assert!(err.to_string().contains("chapter.txt"));
    }

    #[test]
    fn test_io_error_conversion() {
        use std::error::Error as _;

        let io_err = io::Error::new(io::ErrorKind::NotFound, "test");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.source().is_some());
    }
}

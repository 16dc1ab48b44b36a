//! Error types for sgrmouse.

use std::fmt;
use std::io;

/// Result type alias for sgrmouse operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for sgrmouse operations.
///
/// Malformed or unrecognized input bytes are never an error: the parser
/// skips them.
#[derive(Debug)]
pub enum Error {
    /// The input descriptor could not be read or reconfigured.
    Io(io::Error),
    /// The terminal line discipline could not be queried or changed.
    Configuration(io::Error),
    /// A mouse capture session is already active in this process.
    CaptureActive,
}

impl Error {
    /// The underlying OS error, if any.
    #[must_use]
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::Io(e) | Self::Configuration(e) => Some(e),
            Self::CaptureActive => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Configuration(e) => write!(f, "terminal configuration error: {e}"),
            Self::CaptureActive => write!(f, "mouse capture session already active"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) | Self::Configuration(e) => Some(e),
            Self::CaptureActive => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<Error> for io::Error {
    fn from(e: Error) -> Self {
        match e {
            Error::Io(e) | Error::Configuration(e) => e,
            Error::CaptureActive => io::Error::new(io::ErrorKind::AlreadyExists, e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display() {
        let err = Error::Configuration(io::Error::new(io::ErrorKind::Other, "tcgetattr"));
        assert!(err.to_string().contains("terminal configuration error"));
        assert!(err.to_string().contains("tcgetattr"));

        let err = Error::CaptureActive;
        assert!(err.to_string().contains("already active"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "test");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_capture_active_into_io_error() {
        let io_err: io::Error = Error::CaptureActive.into();
        assert_eq!(io_err.kind(), io::ErrorKind::AlreadyExists);
    }

    #[test]
    fn test_configuration_keeps_os_error() {
        let err = Error::Configuration(io::Error::from_raw_os_error(libc::ENOTTY));
        assert_eq!(err.io_error().and_then(io::Error::raw_os_error), Some(libc::ENOTTY));
        assert!(Error::CaptureActive.io_error().is_none());
    }
}

//! Error types for the byway routing toolkit

use std::fmt;

/// Main error type for byway operations
#[derive(Debug)]
pub enum Error {
    /// A query parameter is outside its documented domain
    InvalidArgument(String),

    /// The graph description text is malformed
    GraphFormat(String),

    /// File I/O error
    IoError(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(msg) => {
                write!(f, "Invalid argument: {msg}")
            }
            Error::GraphFormat(msg) => {
                write!(f, "Malformed graph description: {msg}")
            }
            Error::IoError(err) => {
                write!(f, "I/O error: {err}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}

/// Convenience result type for byway operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_parameter_detail() {
        let err = Error::InvalidArgument("k must be at least 1".to_string());
        assert_eq!(err.to_string(), "Invalid argument: k must be at least 1");
    }

    #[test]
    fn io_error_keeps_its_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = Error::from(io);
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("I/O error:"));
    }

    #[test]
    fn graph_format_has_no_source() {
        let err = Error::GraphFormat("missing header".to_string());
        assert!(std::error::Error::source(&err).is_none());
    }
}

//! Error types for the unroll library.
//!
//! Extraction itself never fails; these errors only surface at the edges:
//! building an extractor from configuration, reading page sources and
//! rendering output.

use std::io;
use thiserror::Error;

/// Result type alias for unroll operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur outside the extraction core.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading sources or configuration files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A lookup table or vocabulary file could not be understood.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A configured label produced a pattern that failed to compile.
    #[error("Pattern compilation error: {0}")]
    Pattern(#[from] regex::Error),

    /// Error during rendering (JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// An input path contained no text documents.
    #[error("No text documents found at {0}")]
    NoInput(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Config("states must be an object".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: states must be an object"
        );

        let err = Error::NoInput("rolls/".to_string());
        assert_eq!(err.to_string(), "No text documents found at rolls/");
    }

    #[test]
    fn test_io_error_conversion() {
        let err: Error = std::fs::read_to_string("/nonexistent/roll.txt")
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::Io(ref e) if e.kind() == io::ErrorKind::NotFound));
    }

    #[test]
    fn test_pattern_error_conversion() {
        let err: Error = regex::Regex::new("(unclosed").unwrap_err().into();
        assert!(matches!(err, Error::Pattern(_)));
    }
}

//! Error types for document reading and printing.

use std::io;

/// Error type for document operations.
///
/// Every variant is terminal for the operation that raised it. Messages that
/// point into the input embed 1-based line numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Nesting violates the 2-space rule (strict mode only)
    Indentation(String),
    /// Node shape cannot be determined, a value cannot be resolved, or a
    /// typed accessor was used on the wrong node kind
    Reading(String),
    /// The output sink failed
    Print(String),
    /// I/O error while loading
    Io(String),
    /// Path navigation error
    Path(String),
    /// Type mismatch on a query
    Type(String),
}

impl Error {
    pub(crate) fn indentation(line: usize, expected: usize, found: usize) -> Self {
        Error::Indentation(format!(
            "line {}: expected indentation of {} spaces, found {}",
            line + 1,
            expected,
            found
        ))
    }

    pub(crate) fn ambiguous(line: usize) -> Self {
        Error::Reading(format!("ambiguous block starting at line {}", line + 1))
    }
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

impl From<String> for Error {
    fn from(e: String) -> Self {
        Error::Reading(e)
    }
}

impl From<&str> for Error {
    fn from(e: &str) -> Self {
        Error::Reading(e.to_string())
    }
}

impl From<Error> for String {
    fn from(e: Error) -> Self {
        e.to_string()
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::Indentation(e) => write!(f, "bad indentation: {}", e),
            Error::Reading(e) => write!(f, "{}", e),
            Error::Print(e) => write!(f, "could not print document: {}", e),
            Error::Io(e) => write!(f, "{}", e),
            Error::Path(e) => write!(f, "{}", e),
            Error::Type(e) => write!(f, "{}", e),
        }
    }
}

//! Error types for building and exporting offer feeds.

use std::fmt::{self, Display};
use std::io;

/// Result type alias for offer_feed operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for offer validation and feed export.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
}

/// The kind of error that occurred.
#[derive(Debug)]
pub enum ErrorKind {
    /// A required attribute is absent from an attribute bag.
    MissingRequiredAttribute(String),
    /// Date components that do not name a calendar day.
    InvalidDate(String),
    /// An attribute key that is not a valid XML element name.
    InvalidElementName(String),
    /// An I/O error occurred while writing a document.
    Io(io::Error),
    /// JSON encoding failed.
    Json(serde_json::Error),
}

impl Error {
    /// Creates a new error with the given kind.
    #[inline]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    /// Returns the error kind.
    #[inline]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Creates a missing required attribute error.
    #[inline]
    pub fn missing_required<S: Into<String>>(key: S) -> Self {
        Self::new(ErrorKind::MissingRequiredAttribute(key.into()))
    }

    /// Creates an invalid date error.
    #[inline]
    pub fn invalid_date<S: Into<String>>(msg: S) -> Self {
        Self::new(ErrorKind::InvalidDate(msg.into()))
    }

    /// Creates an invalid element name error.
    #[inline]
    pub fn invalid_element_name<S: Into<String>>(name: S) -> Self {
        Self::new(ErrorKind::InvalidElementName(name.into()))
    }

    /// Returns the offending key if this is a missing required attribute error.
    pub fn missing_key(&self) -> Option<&str> {
        match &self.kind {
            ErrorKind::MissingRequiredAttribute(key) => Some(key),
            _ => None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::MissingRequiredAttribute(key) => {
                write!(f, "required attribute {} is missing", key)
            }
            ErrorKind::InvalidDate(msg) => write!(f, "invalid date: {}", msg),
            ErrorKind::InvalidElementName(name) => {
                write!(f, "invalid element name: {:?}", name)
            }
            ErrorKind::Io(e) => write!(f, "I/O error: {}", e),
            ErrorKind::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Io(e) => Some(e),
            ErrorKind::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::new(ErrorKind::Io(e))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::new(ErrorKind::Json(e))
    }
}

//! Error types for skyforest-survey

use std::fmt;
use std::io;

/// Result type for skyforest-survey operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in survey computations
#[derive(Debug)]
pub enum Error {
    /// I/O error
    Io(io::Error),

    /// Coordinate outside the WGS84 latitude/longitude range
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// XML that could not be read, even leniently
    Xml(String),

    /// Input bytes are not valid UTF-8
    Encoding(String),

    /// Projection error
    Projection(String),

    /// Invalid configuration value
    Config(String),

    /// Output document could not be produced
    Serialization(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::InvalidCoordinate { latitude, longitude } => {
                write!(f, "Invalid coordinate: lat={}, lon={}", latitude, longitude)
            }
            Error::Xml(msg) => write!(f, "XML error: {}", msg),
            Error::Encoding(msg) => write!(f, "Encoding error: {}", msg),
            Error::Projection(msg) => write!(f, "Projection error: {}", msg),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::Io(error)
    }
}

impl From<roxmltree::Error> for Error {
    fn from(error: roxmltree::Error) -> Self {
        Error::Xml(error.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(error: quick_xml::Error) -> Self {
        Error::Xml(error.to_string())
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(error: std::str::Utf8Error) -> Self {
        Error::Encoding(error.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Config(error.to_string())
    }
}

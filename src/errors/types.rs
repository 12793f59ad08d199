//! Custom error types for ESPFront

use std::fmt;

/// Main error type for ESPFront operations
#[derive(Debug)]
pub enum ESPFrontError {
    /// Locating or launching the external flashing tool
    Tool(String),
    /// Serial port enumeration errors
    Port(String),
    /// Flashing session state violations
    Session(String),
    /// Configuration related errors
    Config(String),
    /// General I/O errors
    Io(std::io::Error),
}

impl fmt::Display for ESPFrontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ESPFrontError::Tool(msg) => write!(f, "Tool error: {}", msg),
            ESPFrontError::Port(msg) => write!(f, "Serial port error: {}", msg),
            ESPFrontError::Session(msg) => write!(f, "Session error: {}", msg),
            ESPFrontError::Config(msg) => write!(f, "Configuration error: {}", msg),
            ESPFrontError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for ESPFrontError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ESPFrontError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ESPFrontError {
    fn from(err: std::io::Error) -> Self {
        ESPFrontError::Io(err)
    }
}

impl From<serialport::Error> for ESPFrontError {
    fn from(err: serialport::Error) -> Self {
        ESPFrontError::Port(err.to_string())
    }
}

/// Result type alias for ESPFront operations
pub type Result<T> = std::result::Result<T, ESPFrontError>;

//! Error types for ppscount

use thiserror::Error;

/// Result type alias for ppscount operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for ppscount
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error while writing a report
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Capture handle could not be opened or operated
    #[error("Packet capture error: {0}")]
    Capture(String),

    /// Interface not found
    #[error("Interface '{0}' not found")]
    InterfaceNotFound(String),

    /// Interface exists but cannot be used
    #[error("Interface error: {0}")]
    Interface(String),
}

impl Error {
    /// Create a capture error with a custom message
    pub fn capture<S: Into<String>>(msg: S) -> Self {
        Error::Capture(msg.into())
    }

    /// Create an interface error with a custom message
    pub fn interface<S: Into<String>>(msg: S) -> Self {
        Error::Interface(msg.into())
    }
}

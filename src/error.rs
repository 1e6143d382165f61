//! Error types for the site backend.

use thiserror::Error;

/// Common error type for the backend.
#[derive(Error, Debug)]
pub enum WsnError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Mail setup or delivery error.
    #[error("mail error: {0}")]
    Mail(#[from] crate::mail::MailError),
}

/// Result type alias for backend operations.
pub type Result<T> = std::result::Result<T, WsnError>;

//! Outbound notification mail.
//!
//! A thin abstraction over lettre: handlers depend on the [`Mailer`] trait so
//! tests can substitute a recording stub, and [`SmtpMailer`] is the
//! production transport built once at startup. Exactly one delivery attempt
//! is made per notification; there is no retry or queueing.

mod message;
mod smtp;

pub use message::Email;
pub use smtp::SmtpMailer;

use async_trait::async_trait;
use thiserror::Error;

/// Mail delivery errors.
#[derive(Debug, Error)]
pub enum MailError {
    /// Destination address is not configured (`MAIL_TO`).
    #[error("mail destination (MAIL_TO) is not configured")]
    MissingDestination,

    /// An address could not be parsed as a mailbox.
    #[error("invalid email address: {0}")]
    InvalidAddress(String),

    /// The message itself could not be assembled.
    #[error("failed to build message: {0}")]
    Build(String),

    /// Transport-level failure. `code` and `permanent` are best-effort
    /// diagnostics from the SMTP client; the server response text is carried
    /// in `message`. All of it is for logging, none of it reaches callers.
    #[error("SMTP error: {message}")]
    Smtp {
        message: String,
        code: Option<String>,
        permanent: Option<bool>,
    },
}

/// Async mail transport.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// Deliver one notification.
    async fn send(&self, email: &Email) -> Result<(), MailError>;
}

//! Backend for the WSN-Vertrieb marketing site.
//!
//! Serves the static site and relays the two contact forms (project inquiry
//! and job application) as notification mails over SMTP. Submissions are
//! transient: validated, formatted, handed to the mail transport, discarded.

pub mod config;
pub mod error;
pub mod form;
pub mod logging;
pub mod mail;
pub mod web;

pub use config::Config;
pub use error::{Result, WsnError};
pub use form::{validate, FormError, FormKind, ValidatedSubmission};
pub use mail::{Email, MailError, Mailer, SmtpMailer};
pub use web::{AppState, WebServer};

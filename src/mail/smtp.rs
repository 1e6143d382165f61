//! SMTP transport backed by lettre.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::{Mailbox, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{Email, MailError, Mailer};
use crate::config::MailConfig;

/// Production mailer. The underlying lettre transport pools connections;
/// cloning shares the pool.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Build the transport from `[mail]` configuration.
    ///
    /// `secure` selects implicit TLS (port 465 style); otherwise STARTTLS is
    /// used when the server offers it. Credentials are applied only when
    /// username and password are both present.
    pub fn from_config(config: &MailConfig) -> Result<Self, MailError> {
        let mut tls = TlsParameters::builder(config.smtp_host.clone());
        if config.allow_self_signed {
            tls = tls.dangerous_accept_invalid_certs(true);
        }
        let tls = tls.build().map_err(|e| MailError::Smtp {
            message: format!("TLS setup failed: {e}"),
            code: None,
            permanent: None,
        })?;

        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
                .timeout(Some(Duration::from_secs(config.timeout_secs)))
                .tls(if config.secure {
                    Tls::Wrapper(tls)
                } else {
                    Tls::Opportunistic(tls)
                });

        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            transport: builder.build(),
        })
    }

    fn build_message(&self, email: &Email) -> Result<Message, MailError> {
        let from: Mailbox = email
            .from
            .parse()
            .map_err(|_| MailError::InvalidAddress(email.from.clone()))?;
        let to: Mailbox = email
            .to
            .parse()
            .map_err(|_| MailError::InvalidAddress(email.to.clone()))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(email.subject.clone())
            .singlepart(SinglePart::html(email.html.clone()))
            .map_err(|e| MailError::Build(e.to_string()))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &Email) -> Result<(), MailError> {
        let message = self.build_message(email)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Smtp {
                message: e.to_string(),
                code: e.status().map(|c| c.to_string()),
                permanent: Some(e.is_permanent()),
            })?;

        Ok(())
    }
}

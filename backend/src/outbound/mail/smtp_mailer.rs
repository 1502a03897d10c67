//! SMTP mail transport adapter.
//!
//! The relay handle is built lazily on the first delivery and cached in a
//! process-wide once-initialised cell, so concurrent first sends cannot
//! construct two transports.

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use once_cell::sync::OnceCell;
use tracing::debug;

use crate::domain::email::OutboundEmail;
use crate::domain::ports::{MailDeliveryError, Mailer};

use super::settings::SmtpConnection;

/// Mailer delivering through an SMTP relay over STARTTLS.
pub struct SmtpMailer {
    connection: SmtpConnection,
    sender: String,
    transport: OnceCell<AsyncSmtpTransport<Tokio1Executor>>,
}

impl SmtpMailer {
    /// Create a mailer for the given relay and sender mailbox.
    ///
    /// No connection is opened here; the transport is initialised on first
    /// use and reused afterwards.
    pub fn new(connection: SmtpConnection, sender: impl Into<String>) -> Self {
        Self {
            connection,
            sender: sender.into(),
            transport: OnceCell::new(),
        }
    }

    fn transport(&self) -> Result<&AsyncSmtpTransport<Tokio1Executor>, MailDeliveryError> {
        self.transport
            .get_or_try_init(|| build_transport(&self.connection))
    }
}

fn build_transport(
    connection: &SmtpConnection,
) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailDeliveryError> {
    let builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&connection.host)
        .map_err(|err| MailDeliveryError::transport(err.to_string()))?;
    Ok(builder
        .port(connection.port)
        .credentials(Credentials::new(
            connection.user.clone(),
            connection.pass.clone(),
        ))
        .build())
}

pub(crate) fn build_message(
    sender: &str,
    email: &OutboundEmail,
) -> Result<Message, MailDeliveryError> {
    let from: Mailbox = sender
        .parse()
        .map_err(|err| MailDeliveryError::invalid_message(format!("sender mailbox: {err}")))?;
    let to: Mailbox = email
        .to
        .as_ref()
        .parse()
        .map_err(|err| MailDeliveryError::invalid_message(format!("recipient mailbox: {err}")))?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(email.subject.clone())
        .header(ContentType::TEXT_HTML)
        .body(email.html_body.clone())
        .map_err(|err| MailDeliveryError::invalid_message(err.to_string()))
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn deliver(&self, email: &OutboundEmail) -> Result<(), MailDeliveryError> {
        let message = build_message(&self.sender, email)?;
        let transport = self.transport()?;
        transport
            .send(message)
            .await
            .map_err(|err| MailDeliveryError::transport(err.to_string()))?;
        debug!(to = %email.to, subject = %email.subject, "email delivered via SMTP relay");
        Ok(())
    }
}

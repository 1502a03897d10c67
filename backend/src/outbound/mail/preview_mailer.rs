//! Preview mail transport for environments without SMTP credentials.
//!
//! Stands in for a disposable test account: nothing leaves the process, the
//! rendered message is logged so developers can inspect it.

use async_trait::async_trait;
use tracing::info;

use crate::domain::email::OutboundEmail;
use crate::domain::ports::{MailDeliveryError, Mailer};

/// Mailer that logs previews instead of delivering.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreviewMailer;

#[async_trait]
impl Mailer for PreviewMailer {
    async fn deliver(&self, email: &OutboundEmail) -> Result<(), MailDeliveryError> {
        info!(
            to = %email.to,
            subject = %email.subject,
            body = %email.html_body,
            "mail preview (no SMTP credentials configured; message not delivered)"
        );
        Ok(())
    }
}

//! Transactional email service.
//!
//! Wraps the [`Mailer`] port with the contract handlers rely on: sending
//! never raises past this boundary. A failed delivery is logged and reported
//! as `false`; retrying is a caller decision made at a higher level.

use std::sync::Arc;

use tracing::warn;
use url::Url;

use super::ports::Mailer;
use super::user::{DisplayName, EmailAddress};

/// Subject line of the password-reset email.
pub const PASSWORD_RESET_SUBJECT: &str = "Restablecer contraseña";

/// A fully-rendered message handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    /// Recipient address.
    pub to: EmailAddress,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html_body: String,
}

/// Facade over the mail transport for the storefront's transactional mail.
pub struct EmailService {
    mailer: Arc<dyn Mailer>,
    frontend_url: Url,
}

impl EmailService {
    /// Create a service delivering through `mailer`.
    ///
    /// `frontend_url` is the public base URL of the storefront; reset links
    /// are built against it.
    pub fn new(mailer: Arc<dyn Mailer>, frontend_url: Url) -> Self {
        Self {
            mailer,
            frontend_url,
        }
    }

    /// Deliver one HTML email.
    ///
    /// Returns `true` on success. Any transport failure is caught and
    /// logged; the caller only sees `false`.
    pub async fn send_email(&self, to: &EmailAddress, subject: &str, html_body: &str) -> bool {
        let email = OutboundEmail {
            to: to.clone(),
            subject: subject.to_owned(),
            html_body: html_body.to_owned(),
        };
        match self.mailer.deliver(&email).await {
            Ok(()) => true,
            Err(err) => {
                warn!(to = %to, error = %err, "email delivery failed");
                false
            }
        }
    }

    /// Build the password-reset link for `token`.
    pub fn reset_link(&self, token: &str) -> Url {
        let mut link = self.frontend_url.clone();
        link.set_path("/reset-password");
        link.query_pairs_mut().clear().append_pair("token", token);
        link
    }

    /// Render and send the password-reset email.
    ///
    /// The token is embedded as a query parameter of the reset link. The
    /// one-hour validity stated in the body is enforced by the token
    /// verifier, not here.
    pub async fn send_password_reset_email(
        &self,
        to: &EmailAddress,
        name: &DisplayName,
        token: &str,
    ) -> bool {
        let link = self.reset_link(token);
        let html_body = render_password_reset(name, &link);
        self.send_email(to, PASSWORD_RESET_SUBJECT, &html_body).await
    }
}

fn render_password_reset(name: &DisplayName, link: &Url) -> String {
    format!(
        "<div style=\"font-family: sans-serif; max-width: 480px; margin: 0 auto;\">\
         <h2>Hola {name},</h2>\
         <p>Recibimos un pedido para restablecer la contraseña de tu cuenta.</p>\
         <p style=\"margin: 24px 0;\">\
         <a href=\"{link}\" style=\"background: #1a1a2e; color: #ffffff; \
         padding: 12px 24px; text-decoration: none; border-radius: 4px;\">\
         Restablecer contraseña</a></p>\
         <p>El enlace es válido durante 1 hora.</p>\
         <p>Si no fuiste vos, podés ignorar este correo.</p>\
         </div>"
    )
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::sync::Mutex;

    use async_trait::async_trait;
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::MailDeliveryError;

    /// Records delivered messages; optionally rejects every delivery.
    #[derive(Default)]
    struct StubMailer {
        delivered: Mutex<Vec<OutboundEmail>>,
        reject: bool,
    }

    impl StubMailer {
        fn rejecting() -> Self {
            Self {
                reject: true,
                ..Self::default()
            }
        }

        fn delivered(&self) -> Vec<OutboundEmail> {
            self.delivered.lock().expect("delivered lock").clone()
        }
    }

    #[async_trait]
    impl Mailer for StubMailer {
        async fn deliver(&self, email: &OutboundEmail) -> Result<(), MailDeliveryError> {
            if self.reject {
                return Err(MailDeliveryError::transport("relay refused"));
            }
            self.delivered.lock().expect("delivered lock").push(email.clone());
            Ok(())
        }
    }

    fn service(mailer: Arc<StubMailer>, frontend_url: &str) -> EmailService {
        EmailService::new(mailer, Url::parse(frontend_url).expect("valid url"))
    }

    fn recipient() -> EmailAddress {
        EmailAddress::new("a@b.com").expect("valid email")
    }

    #[rstest]
    fn reset_links_embed_the_token_as_a_query_parameter() {
        let svc = service(Arc::new(StubMailer::default()), "http://x");
        let link = svc.reset_link("tok123");
        assert_eq!(link.as_str(), "http://x/reset-password?token=tok123");
    }

    #[tokio::test]
    async fn password_reset_email_carries_the_link_and_greeting() {
        let mailer = Arc::new(StubMailer::default());
        let svc = service(mailer.clone(), "http://x");
        let name = DisplayName::new("Ana").expect("valid name");

        let sent = svc
            .send_password_reset_email(&recipient(), &name, "tok123")
            .await;

        assert!(sent);
        let delivered = mailer.delivered();
        assert_eq!(delivered.len(), 1);
        let email = delivered.first().expect("one message");
        assert_eq!(email.to.as_ref(), "a@b.com");
        assert_eq!(email.subject, PASSWORD_RESET_SUBJECT);
        assert!(
            email
                .html_body
                .contains("http://x/reset-password?token=tok123")
        );
        assert!(email.html_body.contains("Hola Ana"));
        assert!(email.html_body.contains("1 hora"));
    }

    #[tokio::test]
    async fn transport_failures_are_reported_as_false_not_raised() {
        let svc = service(Arc::new(StubMailer::rejecting()), "http://x");
        let sent = svc
            .send_email(&recipient(), "Asunto", "<p>hola</p>")
            .await;
        assert!(!sent);
    }

    #[tokio::test]
    async fn successful_sends_report_true() {
        let mailer = Arc::new(StubMailer::default());
        let svc = service(mailer.clone(), "https://montura.example");
        let sent = svc.send_email(&recipient(), "Asunto", "<p>hola</p>").await;
        assert!(sent);
        assert_eq!(mailer.delivered().len(), 1);
    }
}

//! Mail transport configuration loaded via OrthoConfig.
//!
//! Provider selection happens exactly once, at startup: complete SMTP
//! credentials select the live relay, anything less selects the preview
//! transport. Handlers never probe the environment themselves.

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Default SMTP submission port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender mailbox when `SMTP_FROM` is not set.
const DEFAULT_SENDER: &str = "Montura <no-reply@montura.example>";

/// Configuration values for the outbound mail transport.
///
/// Loaded from the `SMTP_HOST`, `SMTP_PORT`, `SMTP_USER`, `SMTP_PASS`, and
/// `SMTP_FROM` environment variables.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SMTP")]
pub struct MailSettings {
    /// SMTP relay hostname.
    pub host: Option<String>,
    /// SMTP relay port; defaults to 587.
    pub port: Option<u16>,
    /// Relay username.
    pub user: Option<String>,
    /// Relay password.
    pub pass: Option<String>,
    /// Sender mailbox for outgoing mail.
    pub from: Option<String>,
}

/// Which transport the process runs against, resolved once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailerMode {
    /// Deliver through the configured SMTP relay.
    Live,
    /// No credentials configured: log previews instead of delivering.
    Preview,
}

/// Connection parameters for the live relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpConnection {
    /// Relay hostname.
    pub host: String,
    /// Relay port.
    pub port: u16,
    /// Relay username.
    pub user: String,
    /// Relay password.
    pub pass: String,
}

impl MailSettings {
    /// Resolve the transport mode from credential presence.
    pub fn mode(&self) -> MailerMode {
        match self.connection() {
            Some(_) => MailerMode::Live,
            None => MailerMode::Preview,
        }
    }

    /// Live relay parameters, when the settings are complete.
    pub fn connection(&self) -> Option<SmtpConnection> {
        let host = self.host.as_deref().filter(|v| !v.trim().is_empty())?;
        let user = self.user.as_deref().filter(|v| !v.trim().is_empty())?;
        let pass = self.pass.as_deref().filter(|v| !v.is_empty())?;
        Some(SmtpConnection {
            host: host.to_owned(),
            port: self.port.unwrap_or(DEFAULT_SMTP_PORT),
            user: user.to_owned(),
            pass: pass.to_owned(),
        })
    }

    /// Sender mailbox, falling back to the storefront default.
    pub fn sender(&self) -> &str {
        self.from.as_deref().unwrap_or(DEFAULT_SENDER)
    }
}

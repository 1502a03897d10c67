//! Outbound mail transport adapters.
//!
//! Two implementations of the `Mailer` port: a live SMTP relay and a
//! logging preview fallback. Which one runs is decided once at startup from
//! [`MailSettings`]; see `settings.rs`.

mod preview_mailer;
mod settings;
mod smtp_mailer;

pub use preview_mailer::PreviewMailer;
pub use settings::{MailSettings, MailerMode, SmtpConnection};
pub use smtp_mailer::SmtpMailer;

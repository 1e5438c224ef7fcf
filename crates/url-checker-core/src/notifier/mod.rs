//! Failure notification by e-mail.
//!
//! [`compose`] turns a failed check into an [`EmailMessage`]; a [`Mailer`]
//! delivers it. [`SmtpMailer`] is the production mailer: STARTTLS-only,
//! authenticated, one session per message.

mod error;
mod message;
mod smtp;

pub use error::NotifyError;
pub use message::{compose, EmailMessage};
pub use smtp::SmtpMailer;

use crate::config::{Config, DownloadTarget};
use crate::resolver::Resolution;

/// Delivers composed alerts.
pub trait Mailer {
    fn send(&self, message: &EmailMessage) -> Result<(), NotifyError>;
}

/// Composes the alert for `target` and sends it to every configured recipient.
pub fn notify(
    mailer: &dyn Mailer,
    config: &Config,
    target: &DownloadTarget,
    resolution: &Resolution,
) -> Result<(), NotifyError> {
    let message = compose(target, resolution, &config.email_address, &config.recipients);
    mailer.send(&message)?;
    tracing::info!(
        name = %target.name,
        status = resolution.status_code(),
        recipients = message.recipients.len(),
        "alert e-mail sent"
    );
    Ok(())
}

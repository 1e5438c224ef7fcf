//! SMTP delivery via lettre.

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use std::time::Duration;

use super::{EmailMessage, Mailer, NotifyError};
use crate::config::Config;

/// Sends mail through a STARTTLS relay, logging in with the sender account.
///
/// A new session is opened for every message and closed once it is sent.
/// Servers without STARTTLS are rejected rather than used in plaintext.
#[derive(Clone)]
pub struct SmtpMailer {
    server: String,
    port: u16,
    username: String,
    password: String,
    timeout: Duration,
}

impl SmtpMailer {
    pub fn from_config(config: &Config) -> Self {
        Self {
            server: config.smtp_server.clone(),
            port: config.smtp_port,
            username: config.email_address.clone(),
            password: config.email_password.clone(),
            timeout: config.timeout,
        }
    }

    fn transport(&self) -> Result<SmtpTransport, NotifyError> {
        let transport = SmtpTransport::starttls_relay(&self.server)?
            .port(self.port)
            .credentials(Credentials::new(
                self.username.clone(),
                self.password.clone(),
            ))
            .timeout(Some(self.timeout))
            .build();
        Ok(transport)
    }
}

impl Mailer for SmtpMailer {
    fn send(&self, message: &EmailMessage) -> Result<(), NotifyError> {
        let email = build_message(message)?;
        let transport = self.transport()?;
        tracing::debug!(
            server = %self.server,
            port = self.port,
            "submitting alert over STARTTLS"
        );
        transport.send(&email).map_err(|e| {
            tracing::error!(server = %self.server, port = self.port, error = %e, "SMTP send failed");
            e
        })?;
        Ok(())
    }
}

fn mailbox(address: &str) -> Result<Mailbox, NotifyError> {
    address
        .parse::<Mailbox>()
        .map_err(|source| NotifyError::InvalidAddress {
            address: address.to_string(),
            source,
        })
}

/// Converts a composed alert into a plain-text RFC 5322 message.
fn build_message(message: &EmailMessage) -> Result<Message, NotifyError> {
    let mut builder = Message::builder()
        .from(mailbox(&message.from)?)
        .subject(message.subject.clone())
        .header(ContentType::TEXT_PLAIN);
    for recipient in &message.recipients {
        builder = builder.to(mailbox(recipient)?);
    }
    Ok(builder.body(message.body.clone())?)
}

//! Alert e-mail composition.

use crate::config::DownloadTarget;
use crate::resolver::Resolution;

/// A composed alert, ready for a [`Mailer`](super::Mailer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub from: String,
    /// Delivered to in this order.
    pub recipients: Vec<String>,
    pub subject: String,
    pub body: String,
}

/// Builds the alert for a target whose resolution was not a success.
pub fn compose(
    target: &DownloadTarget,
    resolution: &Resolution,
    from: &str,
    recipients: &[String],
) -> EmailMessage {
    let detail = match resolution {
        Resolution::Status(code) => format!(
            "Received a {} response when sending a HEAD request.",
            code
        ),
        Resolution::TransportFailure(_) => format!(
            "An error occurred while checking it (status {}).",
            resolution.status_code()
        ),
    };

    EmailMessage {
        from: from.to_string(),
        recipients: recipients.to_vec(),
        subject: format!("{} unavailable", target.name),
        body: format!(
            "It does not seem like {} is available. {}\n\nURL: {}",
            target.name, detail, target.url
        ),
    }
}

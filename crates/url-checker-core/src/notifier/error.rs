use lettre::address::AddressError;
use thiserror::Error;

/// Failure to deliver an alert. Fatal for the run.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("invalid e-mail address {address:?}")]
    InvalidAddress {
        address: String,
        #[source]
        source: AddressError,
    },
    #[error("unable to build e-mail message")]
    Message(#[from] lettre::error::Error),
    #[error("SMTP delivery failed")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

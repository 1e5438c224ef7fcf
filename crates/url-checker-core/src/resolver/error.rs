//! Failures that abandon a resolution.

use thiserror::Error;

/// Why a URL could not be resolved to a status code.
///
/// Every variant is reported outward as the sentinel status.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// libcurl failed: DNS, connect, TLS, timeout, malformed response.
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// The URL (configured or redirect target) could not be parsed.
    #[error("invalid URL {url:?}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    /// Only http and https are checked.
    #[error("unsupported scheme {scheme:?} in {url}")]
    UnsupportedScheme { url: String, scheme: String },
    /// The transfer finished without an HTTP status line.
    #[error("no HTTP response from {url}")]
    NoResponse { url: String },
    /// A redirect arrived without a usable `Location` header.
    #[error("HTTP {status} redirect from {url} has no Location header")]
    MissingLocation { url: String, status: u32 },
    /// The `Location` header could not be turned into an absolute URL.
    #[error("invalid redirect target {location:?} from {url}")]
    InvalidLocation {
        url: String,
        location: String,
        #[source]
        source: url::ParseError,
    },
}

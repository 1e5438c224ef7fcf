//! Bounded redirect resolution.
//!
//! Sends HEAD requests with libcurl (via the `curl` crate) and follows 3xx
//! responses by hand so the hop count stays under our control. Transport
//! failures never escape as errors: they become
//! [`Resolution::TransportFailure`], reported outward as status 999.

mod error;
mod parse;

pub use error::ResolveError;

use std::str;
use std::time::Duration;
use url::Url;

/// Maximum number of redirects followed after the initial request.
pub const MAX_REDIRECT_HOPS: usize = 5;

/// Status reported when no HTTP status could be obtained.
pub const TRANSPORT_FAILURE_STATUS: u32 = 999;

/// The only status that counts as reachable.
pub const SUCCESS_STATUS: u32 = 200;

const USER_AGENT: &str = concat!("url-checker/", env!("CARGO_PKG_VERSION"));

/// Outcome of resolving one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Final HTTP status after following redirects.
    Status(u32),
    /// No usable response; carries the failure detail for logging.
    TransportFailure(String),
}

impl Resolution {
    /// Status code as reported to recipients (999 for transport failures).
    pub fn status_code(&self) -> u32 {
        match self {
            Resolution::Status(code) => *code,
            Resolution::TransportFailure(_) => TRANSPORT_FAILURE_STATUS,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code() == SUCCESS_STATUS
    }
}

/// Status and redirect target of a single HEAD request.
#[derive(Debug)]
struct HopResponse {
    status: u32,
    location: Option<String>,
}

fn is_redirect(status: u32) -> bool {
    (300..400).contains(&status)
}

/// Resolves `url` to a final status code, following at most
/// [`MAX_REDIRECT_HOPS`] redirects. Each request is bounded by `timeout`.
///
/// Blocks the current thread.
pub fn resolve(url: &str, timeout: Duration) -> Resolution {
    match follow(url, timeout) {
        Ok(status) => {
            tracing::debug!(url, status, "resolved");
            Resolution::Status(status)
        }
        Err(e) => {
            tracing::warn!(
                url,
                error = %e,
                "unable to resolve url, reporting status {}",
                TRANSPORT_FAILURE_STATUS
            );
            Resolution::TransportFailure(e.to_string())
        }
    }
}

fn follow(url: &str, timeout: Duration) -> Result<u32, ResolveError> {
    let mut current = url.to_string();
    let mut response = head(&current, timeout)?;
    let mut hops = 0;

    while is_redirect(response.status) {
        if hops == MAX_REDIRECT_HOPS {
            tracing::warn!(url, status = response.status, "too many redirects");
            break;
        }
        let location = response
            .location
            .take()
            .ok_or_else(|| ResolveError::MissingLocation {
                url: current.clone(),
                status: response.status,
            })?;
        let next = redirect_target(&current, &location)?;
        tracing::debug!(from = %current, to = %next, status = response.status, "following redirect");
        current = next;
        response = head(&current, timeout)?;
        hops += 1;
    }

    Ok(response.status)
}

/// Resolves a `Location` value (absolute or relative) against the URL that sent it.
fn redirect_target(base: &str, location: &str) -> Result<String, ResolveError> {
    let invalid = |source| ResolveError::InvalidLocation {
        url: base.to_string(),
        location: location.to_string(),
        source,
    };
    let base_url = Url::parse(base).map_err(invalid)?;
    let target = base_url.join(location).map_err(invalid)?;
    Ok(target.into())
}

/// Only http and https URLs are requested, including redirect targets.
fn ensure_http(url: &str) -> Result<(), ResolveError> {
    let parsed = Url::parse(url).map_err(|source| ResolveError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(ResolveError::UnsupportedScheme {
            url: url.to_string(),
            scheme: scheme.to_string(),
        }),
    }
}

/// Performs one HEAD request without following redirects.
fn head(url: &str, timeout: Duration) -> Result<HopResponse, ResolveError> {
    ensure_http(url)?;
    let mut lines: Vec<String> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.nobody(true)?; // HEAD request
    easy.follow_location(false)?;
    easy.useragent(USER_AGENT)?;
    easy.connect_timeout(timeout)?;
    easy.timeout(timeout)?;

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                lines.push(s.trim_end().to_string());
            }
            true
        })?;
        transfer.perform()?;
    }

    let status = easy.response_code()?;
    if status == 0 {
        return Err(ResolveError::NoResponse {
            url: url.to_string(),
        });
    }
    Ok(HopResponse {
        status,
        location: parse::location_header(&lines),
    })
}

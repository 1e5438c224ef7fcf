//! Configuration loaded from `~/.config/url_checker/config.yml`.
//!
//! The file is read into an all-optional `RawConfig` first so that every
//! missing or invalid field can be reported at once, then validated into
//! [`Config`].

use serde::Deserialize;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Timeout applied to each HTTP request when the config omits `timeout`.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// A URL to check and the label used for it in alert e-mails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    pub name: String,
    pub url: String,
}

/// Validated configuration for one run.
#[derive(Clone)]
pub struct Config {
    pub smtp_server: String,
    pub smtp_port: u16,
    /// Sender address; also the SMTP login.
    pub email_address: String,
    pub email_password: String,
    /// At least one entry.
    pub recipients: Vec<String>,
    pub downloads: Vec<DownloadTarget>,
    /// Per-request timeout for HTTP and SMTP.
    pub timeout: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("smtp_server", &self.smtp_server)
            .field("smtp_port", &self.smtp_port)
            .field("email_address", &self.email_address)
            .field("email_password", &"<redacted>")
            .field("recipients", &self.recipients)
            .field("downloads", &self.downloads)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to determine the configuration directory")]
    Xdg(#[from] xdg::BaseDirectoriesError),
    #[error("unable to open configuration file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("configuration file is empty")]
    Empty,
    #[error("malformed configuration file")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid configuration: {}", problems.join("; "))]
    Invalid { problems: Vec<String> },
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    smtp_server: Option<String>,
    smtp_port: Option<u16>,
    email_address: Option<String>,
    email_password: Option<String>,
    recipients: Option<Vec<String>>,
    downloads: Option<Vec<RawDownload>>,
    timeout: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct RawDownload {
    name: Option<String>,
    url: Option<String>,
}

/// Location of the config file under the XDG config home.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("url_checker")?;
    Ok(xdg_dirs.get_config_file("config.yml"))
}

/// Load and validate the config file at `path`.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let cfg = Config::from_yaml(&data)?;
    tracing::debug!("loaded config from {}: {:?}", path.display(), cfg);
    Ok(cfg)
}

impl Config {
    /// Parse and validate a YAML document.
    pub fn from_yaml(data: &str) -> Result<Config, ConfigError> {
        if data.trim().is_empty() {
            return Err(ConfigError::Empty);
        }
        let raw: Option<RawConfig> = serde_yaml::from_str(data)?;
        let raw = raw.ok_or(ConfigError::Empty)?;
        validate(raw)
    }
}

fn require<T>(value: Option<T>, key: &str, problems: &mut Vec<String>) -> Option<T> {
    if value.is_none() {
        problems.push(format!("{} is not present", key));
    }
    value
}

fn validate(raw: RawConfig) -> Result<Config, ConfigError> {
    let mut problems = Vec::new();

    let smtp_server = require(raw.smtp_server, "smtp_server", &mut problems);
    let smtp_port = require(raw.smtp_port, "smtp_port", &mut problems);
    let email_address = require(raw.email_address, "email_address", &mut problems);
    let email_password = require(raw.email_password, "email_password", &mut problems);
    let recipients = require(raw.recipients, "recipients", &mut problems);
    let downloads = require(raw.downloads, "downloads", &mut problems);

    if let Some(recipients) = &recipients {
        if recipients.is_empty() {
            problems.push("at least one recipient is required".to_string());
        }
    }

    let mut targets = Vec::new();
    for (index, download) in downloads.into_iter().flatten().enumerate() {
        match (download.name, download.url) {
            (Some(name), Some(url)) => targets.push(DownloadTarget { name, url }),
            (name, url) => {
                if url.is_none() {
                    problems.push(format!("download #{} is missing url", index + 1));
                }
                if name.is_none() {
                    problems.push(format!("download #{} is missing name", index + 1));
                }
            }
        }
    }

    let timeout_secs = match raw.timeout {
        Some(0) => {
            problems.push("timeout must be at least 1 second".to_string());
            DEFAULT_TIMEOUT_SECS
        }
        Some(secs) => secs,
        None => {
            tracing::info!(
                "no timeout specified, using {} seconds",
                DEFAULT_TIMEOUT_SECS
            );
            DEFAULT_TIMEOUT_SECS
        }
    };

    if !problems.is_empty() {
        for problem in &problems {
            tracing::error!("invalid config: {}", problem);
        }
        return Err(ConfigError::Invalid { problems });
    }

    // All required values were checked above.
    match (
        smtp_server,
        smtp_port,
        email_address,
        email_password,
        recipients,
    ) {
        (
            Some(smtp_server),
            Some(smtp_port),
            Some(email_address),
            Some(email_password),
            Some(recipients),
        ) => Ok(Config {
            smtp_server,
            smtp_port,
            email_address,
            email_password,
            recipients,
            downloads: targets,
            timeout: Duration::from_secs(timeout_secs),
        }),
        _ => Err(ConfigError::Invalid { problems }),
    }
}

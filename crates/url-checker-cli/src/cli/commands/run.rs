//! `url-checker run`: one pass over every configured download.

use anyhow::{Context, Result};
use std::path::Path;
use url_checker_core::config;
use url_checker_core::driver::{self, RunOptions};
use url_checker_core::notifier::SmtpMailer;

pub fn run_checks(config_path: Option<&Path>, dry_run: bool) -> Result<()> {
    let path = match config_path {
        Some(p) => p.to_path_buf(),
        None => config::config_path()?,
    };
    let cfg = config::load(&path)
        .with_context(|| format!("unable to load configuration from {}", path.display()))?;

    let mailer = SmtpMailer::from_config(&cfg);
    let summary = driver::run(&cfg, &mailer, RunOptions { dry_run })?;

    println!(
        "checked {}, unavailable {}, alerts sent {}",
        summary.checked, summary.failures, summary.notified
    );
    Ok(())
}

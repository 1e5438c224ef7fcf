//! One checking pass over every configured target.

use anyhow::{Context, Result};

use crate::config::Config;
use crate::notifier::{self, Mailer};
use crate::resolver;

/// Options for a single pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Log alerts instead of sending them.
    pub dry_run: bool,
}

/// What a pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub checked: usize,
    pub failures: usize,
    pub notified: usize,
}

/// Checks every target in configuration order and mails an alert for each
/// one that does not resolve to 200.
///
/// Resolution failures never stop the pass. A failed alert does: the error is
/// returned and the remaining targets are not checked.
pub fn run(config: &Config, mailer: &dyn Mailer, opts: RunOptions) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    for target in &config.downloads {
        let resolution = resolver::resolve(&target.url, config.timeout);
        summary.checked += 1;

        if resolution.is_success() {
            tracing::info!(name = %target.name, url = %target.url, "available");
            continue;
        }

        summary.failures += 1;
        tracing::warn!(
            name = %target.name,
            url = %target.url,
            status = resolution.status_code(),
            "unavailable"
        );

        if opts.dry_run {
            let message = notifier::compose(
                target,
                &resolution,
                &config.email_address,
                &config.recipients,
            );
            tracing::info!(
                subject = %message.subject,
                recipients = ?message.recipients,
                "dry run, alert not sent"
            );
            continue;
        }

        notifier::notify(mailer, config, target, &resolution).with_context(|| {
            format!("e-mail failed to send for {} ({})", target.name, target.url)
        })?;
        summary.notified += 1;
    }

    tracing::info!(
        checked = summary.checked,
        failures = summary.failures,
        notified = summary.notified,
        "check pass finished"
    );
    Ok(summary)
}

//! CLI for url-checker.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{run_check, run_checks, run_config_path};

/// Top-level CLI. Without a subcommand, behaves like `run`.
#[derive(Debug, Parser)]
#[command(name = "url-checker")]
#[command(about = "Checks that files can be downloaded, e-mails if they can't", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Check every configured download and e-mail an alert for each failure.
    Run {
        /// Config file to use instead of ~/.config/url_checker/config.yml.
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
        /// Log alerts instead of sending them.
        #[arg(long)]
        dry_run: bool,
    },

    /// Resolve a single URL and print its final status code. Sends no e-mail.
    Check {
        /// HTTP/HTTPS URL to check.
        url: String,
        /// Per-request timeout in seconds.
        #[arg(long, default_value = "5", value_name = "SECS")]
        timeout: u64,
    },

    /// Print the location of the configuration file.
    ConfigPath,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            None => run_checks(None, false)?,
            Some(CliCommand::Run { config, dry_run }) => run_checks(config.as_deref(), dry_run)?,
            Some(CliCommand::Check { url, timeout }) => run_check(&url, timeout)?,
            Some(CliCommand::ConfigPath) => run_config_path()?,
        }

        Ok(())
    }
}

//! `url-checker check <URL>`: resolve one URL without config or e-mail.

use anyhow::{ensure, Result};
use std::time::Duration;
use url_checker_core::resolver::{self, Resolution};

pub fn run_check(url: &str, timeout_secs: u64) -> Result<()> {
    ensure!(timeout_secs > 0, "timeout must be at least 1 second");
    let resolution = resolver::resolve(url, Duration::from_secs(timeout_secs));
    match &resolution {
        Resolution::Status(code) => println!("{}  {}", code, url),
        Resolution::TransportFailure(detail) => {
            println!("{}  {}  ({})", resolution.status_code(), url, detail)
        }
    }
    Ok(())
}

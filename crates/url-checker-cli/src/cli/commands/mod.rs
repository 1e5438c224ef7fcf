//! CLI command handlers.

mod check;
mod config_path;
mod run;

pub use check::run_check;
pub use config_path::run_config_path;
pub use run::run_checks;

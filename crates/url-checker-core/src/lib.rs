pub mod config;
pub mod logging;

pub mod driver;
pub mod notifier;
pub mod resolver;

//! Process-level plumbing shared by Greenlight binaries: layered configuration
//! and logging setup.

pub mod config;
pub mod logging;

pub use config::{AppConfig, Environment, LoggingConfig, Section};
pub use logging::init_logging_from_config;

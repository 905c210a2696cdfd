//! Logger setup.
//!
//! The rest of the workspace only talks to the `log` facade; this module picks
//! and configures the `env_logger` backend once.

mod init;

pub use init::{init_logging, LoggingConfig, DEFAULT_FILTER};

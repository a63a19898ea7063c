//! Logging utilities.
//!
//! Centralizes logger initialization; everything else logs through the `log` facade.

mod init;

pub use init::{init_logging, LoggingConfig};

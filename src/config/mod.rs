//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, ports, redirect limits)
//! - Library configuration types and validation
//! - CLI option types and parsing

mod cli;
mod constants;
mod types;

// Re-export all constants
pub use cli::Opt;
pub use constants::*;
pub use types::{Config, ConfigValidationError, LogFormat, LogLevel, OutputFormat};

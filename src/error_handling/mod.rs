//! Error handling and validation statistics.
//!
//! This module provides:
//! - Setup error types (logger, HTTP client, resolver, TLS configuration)
//! - The flat error taxonomy shared by the checkers
//! - Batch statistics (verdicts and per-kind error counts)

mod stats;
mod types;

// Re-export public API
pub use stats::ValidationStats;
pub use types::{ErrorKind, InitializationError, QueryError};

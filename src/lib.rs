//! domain_validator library: DNS, HTTPS and TLS certificate checks for a domain
//!
//! For each domain this library resolves its A and CNAME records, probes its
//! HTTPS endpoint, and inspects the certificate it serves. The three checks run
//! concurrently and their results are combined into a [`ValidationReport`] whose
//! `overall_ok` is true only if every check passed.
//!
//! # Example
//!
//! ```no_run
//! use domain_validator::{Config, DomainQuery, NetworkValidator};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! domain_validator::initialization::init_crypto_provider();
//! let validator = NetworkValidator::from_config(&Config::default())?;
//! let query = DomainQuery::new("example.com", Some("93.184.215.14"), None)?;
//!
//! let report = validator.validate(&query).await;
//! for message in report.error_messages() {
//!     println!("{message}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod config;
pub mod dns;
pub mod error_handling;
pub mod https;
pub mod initialization;
pub mod input;
pub mod models;
pub mod output;
pub mod test_support;
pub mod tls;
mod validator;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, OutputFormat};
pub use error_handling::{ErrorKind, InitializationError, QueryError, ValidationStats};
pub use models::{CertResult, DnsResult, DomainQuery, HttpsResult, ValidationReport};
pub use run::{run_validation, RunReport};
pub use validator::{NetworkValidator, Validator};

// Internal run module (batch validation over the network)
mod run {
    use anyhow::{Context, Result};
    use log::info;
    use std::time::Instant;

    use crate::config::Config;
    use crate::error_handling::ValidationStats;
    use crate::models::{DomainQuery, ValidationReport};
    use crate::validator::NetworkValidator;

    /// Results of a batch validation run.
    pub struct RunReport {
        /// One report per query, in query order
        pub reports: Vec<ValidationReport>,
        /// Verdict and error-kind counters for the batch
        pub stats: ValidationStats,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    impl RunReport {
        /// True if every domain in the batch passed.
        pub fn all_passed(&self) -> bool {
            self.stats.failed() == 0
        }
    }

    /// Validates `queries` with real network clients built from `config`.
    ///
    /// At most `config.max_concurrency` domains are in flight at once.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or a network client
    /// cannot be initialized. Failing checks are not errors; they are in the
    /// returned reports.
    pub async fn run_validation(queries: &[DomainQuery], config: &Config) -> Result<RunReport> {
        config.validate().context("Invalid configuration")?;
        let validator =
            NetworkValidator::from_config(config).context("Failed to initialize network clients")?;

        info!(
            "Validating {} domain(s) with concurrency {}",
            queries.len(),
            config.max_concurrency
        );
        let start = Instant::now();
        let reports = validator
            .validate_many(queries, config.max_concurrency)
            .await;

        let stats = ValidationStats::new();
        for report in &reports {
            stats.record(report);
        }

        let elapsed_seconds = start.elapsed().as_secs_f64();
        info!(
            "Validated {} domain(s) ({} passed, {} failed) in {:.1}s",
            stats.total(),
            stats.passed(),
            stats.failed(),
            elapsed_seconds
        );

        Ok(RunReport {
            reports,
            stats,
            elapsed_seconds,
        })
    }
}

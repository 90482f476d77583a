//! Configuration types.
//!
//! This module defines enums and structs shared by the library and the
//! command-line front end.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::config::constants::{
    DEFAULT_MAX_CONCURRENCY, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, MAX_TIMEOUT_SECS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl LogLevel {
    /// Accepted values for `--log-level`.
    pub const VARIANTS: &'static [&'static str] = &["error", "warn", "info", "debug", "trace"];
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!("unknown log level '{other}'")),
        }
    }
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

impl LogFormat {
    /// Accepted values for `--log-format`.
    pub const VARIANTS: &'static [&'static str] = &["plain", "json"];
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plain" => Ok(LogFormat::Plain),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

/// Report output format for the binary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// One human-readable block per domain
    Text,
    /// A JSON array of reports
    Json,
}

impl OutputFormat {
    /// Accepted values for `--output`.
    pub const VARIANTS: &'static [&'static str] = &["text", "json"];
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{other}'")),
        }
    }
}

/// A configuration value that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Name of the offending field
    pub field: &'static str,
    /// What is wrong and what is accepted
    pub message: String,
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigValidationError {}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```
/// use domain_validator::Config;
///
/// let config = Config {
///     timeout_seconds: 5,
///     expiry_warning_days: Some(14),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Timeout in seconds for each network operation
    pub timeout_seconds: u64,

    /// Maximum domains validated concurrently in batch mode
    pub max_concurrency: usize,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Verify the certificate chain against the bundled web PKI roots while
    /// connecting. Off by default so expired and self-signed certificates are
    /// still surfaced for inspection.
    pub verify_chain: bool,

    /// Add an advisory warning when a valid certificate expires within this
    /// many days. Never affects the pass/fail verdict.
    pub expiry_warning_days: Option<i64>,
}

impl Config {
    /// Per-operation timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Checks that the configuration values are usable.
    ///
    /// # Errors
    ///
    /// Returns the first offending field with a message describing the
    /// accepted range.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.timeout_seconds == 0 {
            return Err(ConfigValidationError {
                field: "timeout_seconds",
                message: "must be greater than 0".to_string(),
            });
        }
        if self.timeout_seconds > MAX_TIMEOUT_SECS {
            return Err(ConfigValidationError {
                field: "timeout_seconds",
                message: format!("must be at most {MAX_TIMEOUT_SECS} seconds"),
            });
        }
        if self.max_concurrency == 0 {
            return Err(ConfigValidationError {
                field: "max_concurrency",
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(days) = self.expiry_warning_days {
            if days < 0 {
                return Err(ConfigValidationError {
                    field: "expiry_warning_days",
                    message: "must not be negative".to_string(),
                });
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            verify_chain: false,
            expiry_warning_days: None,
        }
    }
}

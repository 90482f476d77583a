//! Command-line options.

use std::path::PathBuf;

use structopt::StructOpt;

use crate::config::constants::{DEFAULT_MAX_CONCURRENCY, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::config::types::{Config, LogFormat, LogLevel, OutputFormat};

/// Command-line options for the `domain_validator` binary.
///
/// Domains come from positional arguments, from `--file`, or both. The
/// expectations apply to every domain in the run.
#[derive(Debug, Clone, StructOpt)]
#[structopt(
    name = "domain_validator",
    about = "Checks a domain's DNS records, HTTPS endpoint and TLS certificate"
)]
pub struct Opt {
    /// Domains to validate
    #[structopt(name = "DOMAIN")]
    pub domains: Vec<String>,

    /// File with one domain per line (`#` starts a comment, `-` reads stdin)
    #[structopt(short, long, parse(from_os_str))]
    pub file: Option<PathBuf>,

    /// IPv4 address expected among the A records
    #[structopt(long)]
    pub expected_ip: Option<String>,

    /// Hostname expected as the CNAME target
    #[structopt(long)]
    pub expected_cname: Option<String>,

    /// Timeout in seconds for each network operation
    #[structopt(long, default_value = "10")]
    pub timeout_seconds: u64,

    /// Maximum domains validated concurrently
    #[structopt(long, default_value = "8")]
    pub max_concurrency: usize,

    /// Verify the certificate chain against the web PKI roots while connecting
    #[structopt(long)]
    pub verify_chain: bool,

    /// Warn (without failing) when a certificate expires within this many days
    #[structopt(long)]
    pub expiry_warning_days: Option<i64>,

    /// HTTP User-Agent header value
    #[structopt(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Log level
    #[structopt(long, default_value = "info", possible_values = LogLevel::VARIANTS, case_insensitive = true)]
    pub log_level: LogLevel,

    /// Log format
    #[structopt(long, default_value = "plain", possible_values = LogFormat::VARIANTS, case_insensitive = true)]
    pub log_format: LogFormat,

    /// Report format
    #[structopt(long, default_value = "text", possible_values = OutputFormat::VARIANTS, case_insensitive = true)]
    pub output: OutputFormat,
}

impl Opt {
    /// Builds the library configuration from the parsed options.
    pub fn to_config(&self) -> Config {
        Config {
            log_level: self.log_level.clone(),
            log_format: self.log_format.clone(),
            timeout_seconds: self.timeout_seconds,
            max_concurrency: self.max_concurrency,
            user_agent: self.user_agent.clone(),
            verify_chain: self.verify_chain,
            expiry_warning_days: self.expiry_warning_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_library_defaults() {
        let opt = Opt::from_iter(["domain_validator", "example.com"]);
        let config = opt.to_config();
        assert_eq!(opt.domains, vec!["example.com".to_string()]);
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.max_concurrency, DEFAULT_MAX_CONCURRENCY);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(opt.output, OutputFormat::Text);
        assert!(opt.expected_ip.is_none());
    }

    #[test]
    fn test_all_flags_parse() {
        let opt = Opt::from_iter([
            "domain_validator",
            "a.example",
            "b.example",
            "--expected-ip",
            "192.0.2.10",
            "--expected-cname",
            "lb.example.net.",
            "--timeout-seconds",
            "3",
            "--max-concurrency",
            "2",
            "--verify-chain",
            "--expiry-warning-days",
            "21",
            "--log-level",
            "DEBUG",
            "--log-format",
            "json",
            "--output",
            "json",
        ]);
        assert_eq!(opt.domains.len(), 2);
        assert_eq!(opt.expected_ip.as_deref(), Some("192.0.2.10"));
        assert_eq!(opt.expected_cname.as_deref(), Some("lb.example.net."));
        assert_eq!(opt.log_level, LogLevel::Debug);
        assert_eq!(opt.log_format, LogFormat::Json);
        assert_eq!(opt.output, OutputFormat::Json);

        let config = opt.to_config();
        assert_eq!(config.timeout_seconds, 3);
        assert_eq!(config.max_concurrency, 2);
        assert!(config.verify_chain);
        assert_eq!(config.expiry_warning_days, Some(21));
    }

    #[test]
    fn test_invalid_output_format_rejected() {
        let result = Opt::from_iter_safe(["domain_validator", "x.example", "--output", "xml"]);
        assert!(result.is_err());
    }
}

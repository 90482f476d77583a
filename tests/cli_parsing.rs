//! Tests for command-line parsing.

use domain_validator::config::{Opt, DEFAULT_USER_AGENT};
use domain_validator::{LogFormat, LogLevel, OutputFormat};
use std::path::PathBuf;
use structopt::StructOpt;

#[test]
fn test_positional_domains_and_file() {
    let opt = Opt::from_iter(["domain_validator", "a.example", "b.example", "-f", "list.txt"]);
    assert_eq!(opt.domains, vec!["a.example", "b.example"]);
    assert_eq!(opt.file, Some(PathBuf::from("list.txt")));
}

#[test]
fn test_file_only_invocation() {
    let opt = Opt::from_iter(["domain_validator", "--file", "-"]);
    assert!(opt.domains.is_empty());
    assert_eq!(opt.file, Some(PathBuf::from("-")));
}

#[test]
fn test_defaults() {
    let opt = Opt::from_iter(["domain_validator", "example.com"]);
    assert_eq!(opt.timeout_seconds, 10);
    assert_eq!(opt.max_concurrency, 8);
    assert_eq!(opt.user_agent, DEFAULT_USER_AGENT);
    assert_eq!(opt.log_level, LogLevel::Info);
    assert_eq!(opt.log_format, LogFormat::Plain);
    assert_eq!(opt.output, OutputFormat::Text);
    assert!(!opt.verify_chain);
    assert_eq!(opt.expiry_warning_days, None);
}

#[test]
fn test_case_insensitive_enums() {
    let opt = Opt::from_iter([
        "domain_validator",
        "example.com",
        "--log-level",
        "Warn",
        "--output",
        "JSON",
    ]);
    assert_eq!(opt.log_level, LogLevel::Warn);
    assert_eq!(opt.output, OutputFormat::Json);
}

#[test]
fn test_rejects_unknown_log_format() {
    let result = Opt::from_iter_safe(["domain_validator", "example.com", "--log-format", "xml"]);
    assert!(result.is_err());
}

#[test]
fn test_rejects_non_numeric_timeout() {
    let result = Opt::from_iter_safe(["domain_validator", "example.com", "--timeout-seconds", "soon"]);
    assert!(result.is_err());
}

#[test]
fn test_opt_builds_valid_config() {
    let opt = Opt::from_iter(["domain_validator", "example.com", "--expiry-warning-days", "14"]);
    let config = opt.to_config();
    assert!(config.validate().is_ok());
    assert_eq!(config.expiry_warning_days, Some(14));
}

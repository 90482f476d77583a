//! Tests to ensure error messages are actionable and consistent
//!
//! These tests verify that configuration and input errors name the offending
//! field and the accepted range.

use domain_validator::config::ConfigValidationError;
use domain_validator::{Config, DomainQuery, QueryError};

fn field_error(config: &Config) -> ConfigValidationError {
    config.validate().expect_err("configuration should be rejected")
}

#[test]
fn test_default_config_is_valid() {
    assert!(Config::default().validate().is_ok());
}

#[test]
fn test_config_validation_errors_are_descriptive() {
    let e = field_error(&Config {
        max_concurrency: 0,
        ..Default::default()
    });
    assert_eq!(e.field, "max_concurrency");
    assert!(e.message.contains("greater than 0"));

    let e = field_error(&Config {
        timeout_seconds: 0,
        ..Default::default()
    });
    assert_eq!(e.field, "timeout_seconds");
    assert!(e.message.contains("greater than 0"));

    let e = field_error(&Config {
        timeout_seconds: 600,
        ..Default::default()
    });
    assert_eq!(e.field, "timeout_seconds");
    assert!(e.message.contains("120"), "message should name the maximum: {}", e.message);

    let e = field_error(&Config {
        expiry_warning_days: Some(-1),
        ..Default::default()
    });
    assert_eq!(e.field, "expiry_warning_days");
    assert_eq!(e.to_string(), "invalid expiry_warning_days: must not be negative");
}

#[test]
fn test_zero_expiry_warning_days_is_allowed() {
    let config = Config {
        expiry_warning_days: Some(0),
        ..Default::default()
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_domain_message() {
    for raw in ["", "   ", "\t\n"] {
        let err = DomainQuery::new(raw, Some("192.0.2.1"), None).unwrap_err();
        assert_eq!(err, QueryError::EmptyDomain);
        assert_eq!(err.to_string(), "Please enter a domain.");
    }
}

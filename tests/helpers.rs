// Shared test helpers for building validators over in-memory capabilities.
//
// This module provides common scenarios used across multiple test files to reduce duplication.

use chrono::Duration;
use domain_validator::test_support::{peer_certificate, MockCertSource, MockDns, MockProbe};
use domain_validator::Validator;

pub type MockValidator = Validator<MockDns, MockProbe, MockCertSource>;

/// A validator that knows a healthy `good.example`, a CNAME-fronted
/// `www.good.example`, and a broken `broken.example`.
#[allow(dead_code)] // Used by other test files
pub fn scenario_validator() -> MockValidator {
    Validator::new(
        MockDns::new()
            .with_a("good.example", &["192.0.2.10", "192.0.2.11"])
            .with_cname("www.good.example", "edge.cdn.example.net.")
            .with_a("broken.example", &["198.51.100.7"]),
        MockProbe::new()
            .with_status("https://good.example", 200)
            .with_status("https://www.good.example", 301)
            .with_status("https://broken.example", 503),
        MockCertSource::new()
            .with_certificate(
                "good.example",
                peer_certificate(&["good.example", "*.good.example"], Duration::days(60)),
            )
            .with_certificate(
                "www.good.example",
                peer_certificate(&["good.example", "*.good.example"], Duration::days(60)),
            )
            .with_certificate(
                "broken.example",
                peer_certificate(&["other.example"], Duration::hours(-60)),
            ),
    )
}

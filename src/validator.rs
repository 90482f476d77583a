//! Validation aggregator.
//!
//! Runs the DNS, HTTPS and certificate checkers for a query concurrently,
//! joins all three, and combines them into a [`ValidationReport`].

use futures::stream::{self, StreamExt};
use log::{info, warn};

use crate::config::Config;
use crate::dns::{check_dns, DnsLookup, TrustDnsLookup};
use crate::error_handling::InitializationError;
use crate::https::{check_https, HttpsProbe, ReqwestProbe};
use crate::initialization::{init_client, init_resolver};
use crate::models::{DomainQuery, ValidationReport};
use crate::tls::{check_cert, CertificateSource, RustlsCertificateSource};

/// Validates domains using the three capabilities it owns.
///
/// Holds no per-request state: one validator can serve any number of
/// concurrent `validate` calls.
#[derive(Clone)]
pub struct Validator<D, H, C> {
    dns: D,
    https: H,
    certs: C,
    expiry_warning_days: Option<i64>,
}

/// The validator wired to real DNS, HTTP and TLS clients.
pub type NetworkValidator = Validator<TrustDnsLookup, ReqwestProbe, RustlsCertificateSource>;

impl NetworkValidator {
    /// Builds the resolver, HTTP client and TLS connector from `config`.
    ///
    /// # Errors
    ///
    /// Returns an `InitializationError` if any of the three clients cannot be
    /// built.
    pub fn from_config(config: &Config) -> Result<Self, InitializationError> {
        let resolver = init_resolver(config)?;
        let client = init_client(config)?;
        let certs = RustlsCertificateSource::new(config)?;

        Ok(Validator::new(
            TrustDnsLookup::new(resolver),
            ReqwestProbe::new(client),
            certs,
        )
        .with_expiry_warning_days(config.expiry_warning_days))
    }
}

impl<D, H, C> Validator<D, H, C>
where
    D: DnsLookup,
    H: HttpsProbe,
    C: CertificateSource,
{
    /// A validator over the given capabilities, with no expiry warning.
    pub fn new(dns: D, https: H, certs: C) -> Self {
        Self {
            dns,
            https,
            certs,
            expiry_warning_days: None,
        }
    }

    /// Adds an advisory warning for certificates expiring within `days`.
    pub fn with_expiry_warning_days(mut self, days: Option<i64>) -> Self {
        self.expiry_warning_days = days;
        self
    }

    /// Runs all three checks for `query`.
    ///
    /// Never fails: checker problems are reported inside the result they
    /// belong to.
    pub async fn validate(&self, query: &DomainQuery) -> ValidationReport {
        let domain = query.domain();
        info!("Validating {domain}");

        let (dns, https, cert) = tokio::join!(
            check_dns(
                &self.dns,
                domain,
                query.expected_ip(),
                query.expected_cname()
            ),
            check_https(&self.https, domain),
            check_cert(&self.certs, domain, self.expiry_warning_days),
        );

        let report = ValidationReport::new(query.clone(), dns, https, cert);
        if report.overall_ok() {
            info!("{domain} passed validation");
        } else {
            warn!(
                "{domain} failed validation with {} error(s)",
                report.error_count()
            );
        }
        report
    }

    /// Validates several queries, at most `max_concurrency` at a time.
    ///
    /// Reports come back in the order of `queries`.
    pub async fn validate_many(
        &self,
        queries: &[DomainQuery],
        max_concurrency: usize,
    ) -> Vec<ValidationReport> {
        stream::iter(queries.iter().map(|query| self.validate(query)))
            .buffered(max_concurrency.max(1))
            .collect()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::ErrorKind;
    use crate::https::ProbeError;
    use crate::test_support::{peer_certificate, MockCertSource, MockDns, MockProbe};
    use chrono::Duration as ChronoDuration;
    use std::time::Duration;

    fn good_validator() -> Validator<MockDns, MockProbe, MockCertSource> {
        Validator::new(
            MockDns::new().with_a("good.example", &["192.0.2.10"]),
            MockProbe::new().with_status("https://good.example", 200),
            MockCertSource::new().with_certificate(
                "good.example",
                peer_certificate(&["good.example"], ChronoDuration::days(90)),
            ),
        )
    }

    #[tokio::test]
    async fn test_good_domain_passes_with_no_errors() {
        let validator = good_validator();
        let query = DomainQuery::new("good.example", Some(""), Some("")).unwrap();
        let report = validator.validate(&query).await;

        assert!(report.overall_ok());
        assert!(report.dns().ok);
        assert!(report.https().ok);
        assert!(report.cert().ok);
        assert_eq!(report.error_count(), 0);
        assert_eq!(report.query(), &query);
    }

    #[tokio::test]
    async fn test_single_failing_checker_fails_overall() {
        let validator = Validator::new(
            MockDns::new().with_a("good.example", &["192.0.2.10"]),
            MockProbe::new().with_status("https://good.example", 404),
            MockCertSource::new().with_certificate(
                "good.example",
                peer_certificate(&["good.example"], ChronoDuration::days(90)),
            ),
        );
        let query = DomainQuery::new("good.example", None, None).unwrap();
        let report = validator.validate(&query).await;

        assert!(!report.overall_ok());
        assert!(report.dns().ok);
        assert!(report.cert().ok);
        assert_eq!(report.error_kinds(), vec![ErrorKind::HttpErrorStatus]);
    }

    #[tokio::test]
    async fn test_unknown_domain_surfaces_all_errors_untouched() {
        let validator = good_validator();
        let query = DomainQuery::new("nowhere.example", Some("192.0.2.10"), None).unwrap();
        let report = validator.validate(&query).await;

        assert!(!report.overall_ok());
        assert_eq!(
            report.error_kinds(),
            vec![
                ErrorKind::NoRecordsFound,
                ErrorKind::ExpectedIpMismatch,
                ErrorKind::ConnectionFailure,
                ErrorKind::RetrievalFailure
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_checkers_run_concurrently() {
        let delay = Duration::from_secs(10);
        let validator = Validator::new(
            MockDns::new()
                .with_a("slow.example", &["192.0.2.10"])
                .with_delay(delay),
            MockProbe::new()
                .with_status("https://slow.example", 200)
                .with_delay(delay),
            MockCertSource::new()
                .with_certificate(
                    "slow.example",
                    peer_certificate(&["slow.example"], ChronoDuration::days(90)),
                )
                .with_delay(delay),
        );
        let query = DomainQuery::new("slow.example", None, None).unwrap();

        let started = tokio::time::Instant::now();
        let report = validator.validate(&query).await;
        let elapsed = started.elapsed();

        assert!(report.overall_ok());
        // Bounded by the slowest single operation, not the sum of all four.
        assert!(elapsed >= delay);
        assert!(elapsed < delay * 2, "took {elapsed:?}");
    }

    #[tokio::test]
    async fn test_expiry_warning_threshold_is_forwarded() {
        let validator = Validator::new(
            MockDns::new().with_a("soon.example", &["192.0.2.10"]),
            MockProbe::new().with_status("https://soon.example", 200),
            MockCertSource::new().with_certificate(
                "soon.example",
                peer_certificate(&["soon.example"], ChronoDuration::days(3)),
            ),
        )
        .with_expiry_warning_days(Some(14));
        let query = DomainQuery::new("soon.example", None, None).unwrap();
        let report = validator.validate(&query).await;

        assert!(report.overall_ok());
        assert_eq!(report.cert().warnings.len(), 1);
    }

    #[tokio::test]
    async fn test_validate_many_keeps_input_order() {
        let validator = Validator::new(
            MockDns::new()
                .with_a("a.example", &["192.0.2.1"])
                .with_a("b.example", &["192.0.2.2"]),
            MockProbe::new()
                .with_status("https://a.example", 200)
                .with_error(
                    "https://b.example",
                    ProbeError::Timeout("operation timed out".to_string()),
                ),
            MockCertSource::new()
                .with_certificate("a.example", peer_certificate(&["a.example"], ChronoDuration::days(30)))
                .with_certificate("b.example", peer_certificate(&["b.example"], ChronoDuration::days(30))),
        );
        let queries = vec![
            DomainQuery::new("b.example", None, None).unwrap(),
            DomainQuery::new("a.example", None, None).unwrap(),
            DomainQuery::new("c.example", None, None).unwrap(),
        ];

        let reports = validator.validate_many(&queries, 2).await;
        let domains: Vec<&str> = reports.iter().map(|r| r.domain()).collect();
        assert_eq!(domains, vec!["b.example", "a.example", "c.example"]);
        assert!(!reports[0].overall_ok());
        assert!(reports[1].overall_ok());
        assert!(!reports[2].overall_ok());
    }

    #[tokio::test]
    async fn test_validate_many_with_zero_concurrency_still_runs() {
        let validator = good_validator();
        let queries = vec![DomainQuery::new("good.example", None, None).unwrap()];
        let reports = validator.validate_many(&queries, 0).await;
        assert_eq!(reports.len(), 1);
        assert!(reports[0].overall_ok());
    }
}

//! In-memory capability doubles.
//!
//! Each double answers from a table filled in with builder methods and can
//! simulate latency, so validations can run without touching the network.
//!
//! These are test-only helpers. Builders panic on malformed fixture input
//! instead of returning errors; production code never calls them.
//!
//! ```
//! use domain_validator::test_support::{peer_certificate, MockCertSource, MockDns, MockProbe};
//! use domain_validator::{DomainQuery, Validator};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let validator = Validator::new(
//!     MockDns::new().with_a("good.example", &["192.0.2.10"]),
//!     MockProbe::new().with_status("https://good.example", 200),
//!     MockCertSource::new().with_certificate(
//!         "good.example",
//!         peer_certificate(&["good.example"], chrono::Duration::days(60)),
//!     ),
//! );
//! let query = DomainQuery::new("good.example", None, None).unwrap();
//! assert!(validator.validate(&query).await.overall_ok());
//! # }
//! ```

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::time::Duration;

use chrono::Utc;

use crate::dns::{DnsLookup, LookupError};
use crate::https::{HttpsProbe, ProbeError};
use crate::models::{CertResult, DnsResult, DomainQuery, HttpsResult, ValidationReport};
use crate::tls::{CertFetchError, CertificateSource, PeerCertificate};

async fn simulate_latency(delay: Option<Duration>) {
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
}

/// DNS double. Unknown names answer `LookupError::NotFound`.
#[derive(Debug, Clone, Default)]
pub struct MockDns {
    a_records: HashMap<String, Result<Vec<Ipv4Addr>, LookupError>>,
    cname_records: HashMap<String, Result<Vec<String>, LookupError>>,
    delay: Option<Duration>,
}

impl MockDns {
    /// An empty table: every name answers `NotFound`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers A records.
    ///
    /// # Panics
    ///
    /// Panics if an address is not a dotted quad.
    pub fn with_a(mut self, domain: &str, addrs: &[&str]) -> Self {
        let parsed = addrs
            .iter()
            .map(|a| a.parse().expect("mock A record must be an IPv4 address"))
            .collect();
        self.a_records.insert(domain.to_lowercase(), Ok(parsed));
        self
    }

    /// Registers a single CNAME target.
    pub fn with_cname(self, domain: &str, target: &str) -> Self {
        self.with_cnames(domain, &[target])
    }

    /// Registers CNAME targets in answer order.
    pub fn with_cnames(mut self, domain: &str, targets: &[&str]) -> Self {
        let targets = targets.iter().map(|t| t.to_string()).collect();
        self.cname_records.insert(domain.to_lowercase(), Ok(targets));
        self
    }

    /// Makes the A lookup for `domain` fail with `error`.
    pub fn fail_a(mut self, domain: &str, error: LookupError) -> Self {
        self.a_records.insert(domain.to_lowercase(), Err(error));
        self
    }

    /// Makes the CNAME lookup for `domain` fail with `error`.
    pub fn fail_cname(mut self, domain: &str, error: LookupError) -> Self {
        self.cname_records.insert(domain.to_lowercase(), Err(error));
        self
    }

    /// Delays every answer, for concurrency tests.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

impl DnsLookup for MockDns {
    async fn lookup_a(&self, name: &str) -> Result<Vec<Ipv4Addr>, LookupError> {
        simulate_latency(self.delay).await;
        self.a_records
            .get(&name.to_lowercase())
            .cloned()
            .unwrap_or(Err(LookupError::NotFound))
    }

    async fn lookup_cname(&self, name: &str) -> Result<Vec<String>, LookupError> {
        simulate_latency(self.delay).await;
        self.cname_records
            .get(&name.to_lowercase())
            .cloned()
            .unwrap_or(Err(LookupError::NotFound))
    }
}

/// HTTP double keyed by full URL. Unknown URLs fail with a connect error.
#[derive(Debug, Clone, Default)]
pub struct MockProbe {
    responses: HashMap<String, Result<u16, ProbeError>>,
    delay: Option<Duration>,
}

impl MockProbe {
    /// An empty table: every URL fails to connect.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `url` with `status`.
    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.responses.insert(url.to_string(), Ok(status));
        self
    }

    /// Fails `url` with `error`.
    pub fn with_error(mut self, url: &str, error: ProbeError) -> Self {
        self.responses.insert(url.to_string(), Err(error));
        self
    }

    /// Delays every answer.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

impl HttpsProbe for MockProbe {
    async fn head(&self, url: &str) -> Result<u16, ProbeError> {
        simulate_latency(self.delay).await;
        self.responses.get(url).cloned().unwrap_or_else(|| {
            Err(ProbeError::Connect(format!(
                "error sending request for url ({url})"
            )))
        })
    }
}

/// TLS double keyed by domain. Unknown domains fail to connect.
#[derive(Debug, Clone, Default)]
pub struct MockCertSource {
    certificates: HashMap<String, Result<PeerCertificate, CertFetchError>>,
    delay: Option<Duration>,
}

impl MockCertSource {
    /// An empty table: every domain refuses the connection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `cert` for `domain`.
    pub fn with_certificate(mut self, domain: &str, cert: PeerCertificate) -> Self {
        self.certificates.insert(domain.to_lowercase(), Ok(cert));
        self
    }

    /// Fails the handshake for `domain` with `error`.
    pub fn with_error(mut self, domain: &str, error: CertFetchError) -> Self {
        self.certificates.insert(domain.to_lowercase(), Err(error));
        self
    }

    /// Delays every answer.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

impl CertificateSource for MockCertSource {
    async fn fetch(&self, domain: &str) -> Result<PeerCertificate, CertFetchError> {
        simulate_latency(self.delay).await;
        self.certificates
            .get(&domain.to_lowercase())
            .cloned()
            .unwrap_or_else(|| {
                Err(CertFetchError::Connect {
                    host: domain.to_string(),
                    port: crate::config::HTTPS_PORT,
                    detail: "Connection refused (os error 111)".to_string(),
                })
            })
    }
}

/// A certificate for `sans` that expires `valid_for` from now (negative for
/// an already expired one).
pub fn peer_certificate(sans: &[&str], valid_for: chrono::Duration) -> PeerCertificate {
    PeerCertificate {
        not_after: Some(Utc::now() + valid_for),
        subject_alt_names: sans.iter().map(|s| s.to_string()).collect(),
        common_name: None,
    }
}

/// A report where every check passed.
///
/// # Panics
///
/// Panics if `domain` is empty after trimming.
pub fn passing_report(domain: &str) -> ValidationReport {
    let query = DomainQuery::new(domain, None, None).expect("non-empty domain");
    let dns = DnsResult::new(vec!["192.0.2.10".to_string()], None);
    let https = HttpsResult::from_status(200);
    let mut cert = CertResult::new();
    cert.sans = vec![domain.to_string()];
    cert.covers_domain = true;
    ValidationReport::new(query, dns, https, cert)
}

/// A report with one DNS, one HTTPS and one certificate error.
///
/// # Panics
///
/// Panics if `domain` is empty after trimming.
pub fn failing_report(domain: &str) -> ValidationReport {
    let query = DomainQuery::new(domain, None, None).expect("non-empty domain");
    let mut dns = DnsResult::new(Vec::new(), None);
    dns.fail(crate::dns::DnsError::NoRecordsFound {
        domain: domain.to_string(),
    });
    let https = HttpsResult::from_failure(crate::https::HttpsError::ConnectionFailure {
        detail: "connection error: dns error".to_string(),
    });
    let cert = CertResult::from_failure(crate::tls::CertError::RetrievalFailure {
        detail: format!("TCP connection to {domain}:443 failed: no address"),
    });
    ValidationReport::new(query, dns, https, cert)
}

//! DNS resolution and expectation matching.
//!
//! The checker resolves A and CNAME records for a domain and compares them
//! against the optional expected IP and CNAME target. Each lookup is its own
//! failure boundary: both lookups run concurrently and a failed A lookup
//! never hides the CNAME answer.
//!
//! Lookups go through the [`DnsLookup`] capability; [`TrustDnsLookup`] is the
//! production implementation over `trust-dns-resolver`.

mod resolution;

use std::future::Future;
use std::net::Ipv4Addr;

use log::{debug, warn};
use thiserror::Error;

use crate::error_handling::ErrorKind;
use crate::models::DnsResult;

// Re-export public API
pub use resolution::TrustDnsLookup;

/// Why a single lookup produced no answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// NXDOMAIN or an empty answer section.
    #[error("no records found")]
    NotFound,
    /// The query did not complete in time.
    #[error("query timed out")]
    Timeout,
    /// Transport or server failure.
    #[error("{0}")]
    Failed(String),
    /// The domain cannot be encoded as a DNS name, so no query was sent.
    #[error("invalid DNS name '{name}': {reason}")]
    InvalidName {
        /// The rejected name
        name: String,
        /// Parser message
        reason: String,
    },
}

impl LookupError {
    /// Absent-record outcomes are expected and silently mean "no records";
    /// anything else is a fault of the resolution layer itself.
    pub fn is_fault(&self) -> bool {
        matches!(self, LookupError::InvalidName { .. })
    }
}

/// DNS resolution capability consumed by the checker.
pub trait DnsLookup: Send + Sync {
    /// IPv4 addresses from the domain's A records.
    fn lookup_a(&self, name: &str)
        -> impl Future<Output = Result<Vec<Ipv4Addr>, LookupError>> + Send;

    /// CNAME targets, in answer order, as presented by the server.
    fn lookup_cname(&self, name: &str)
        -> impl Future<Output = Result<Vec<String>, LookupError>> + Send;
}

/// DNS checker failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DnsError {
    /// Neither lookup returned a record.
    #[error("No A or CNAME records found for {domain}")]
    NoRecordsFound {
        /// The queried domain
        domain: String,
    },

    /// The expected IP is not among the A records.
    #[error("Expected IP {expected} NOT found in A records.")]
    ExpectedIpMismatch {
        /// The address that was looked for
        expected: String,
    },

    /// The first CNAME target differs from the expected one.
    #[error("CNAME does not match expected. Found: '{}'", .found.as_deref().unwrap_or("none"))]
    ExpectedCnameMismatch {
        /// The target that was looked for
        expected: String,
        /// The target the server returned, if any
        found: Option<String>,
    },

    /// The resolution layer itself failed.
    #[error("DNS check failed: {detail}")]
    ResolutionFailure {
        /// Underlying failure message
        detail: String,
    },
}

impl DnsError {
    /// Category used for batch statistics.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DnsError::NoRecordsFound { .. } => ErrorKind::NoRecordsFound,
            DnsError::ExpectedIpMismatch { .. } => ErrorKind::ExpectedIpMismatch,
            DnsError::ExpectedCnameMismatch { .. } => ErrorKind::ExpectedCnameMismatch,
            DnsError::ResolutionFailure { .. } => ErrorKind::ResolutionFailure,
        }
    }
}

/// Strips the trailing root-label dot from a hostname.
pub fn normalize_hostname(name: &str) -> &str {
    name.trim_end_matches('.')
}

/// Resolves A and CNAME records for `domain` and checks them against the
/// optional expectations.
///
/// Never fails: every problem becomes an entry in `DnsResult::errors` and
/// clears `ok`.
pub async fn check_dns<L: DnsLookup>(
    lookup: &L,
    domain: &str,
    expected_ip: Option<&str>,
    expected_cname: Option<&str>,
) -> DnsResult {
    let mut faults = Vec::new();

    debug!("Resolving A and CNAME records for {domain}");
    let (a_lookup, cname_lookup) =
        tokio::join!(lookup.lookup_a(domain), lookup.lookup_cname(domain));

    let a_records: Vec<String> = match a_lookup {
        Ok(addrs) => addrs.iter().map(ToString::to_string).collect(),
        Err(e) => {
            absorb_lookup_error(domain, "A", e, &mut faults);
            Vec::new()
        }
    };

    let cname = match cname_lookup {
        Ok(targets) => targets
            .into_iter()
            .next()
            .map(|target| normalize_hostname(&target).to_string())
            .filter(|target| !target.is_empty()),
        Err(e) => {
            absorb_lookup_error(domain, "CNAME", e, &mut faults);
            None
        }
    };

    let mut result = DnsResult::new(a_records, cname);

    if result.a_records.is_empty() && result.cname.is_none() {
        result.fail(DnsError::NoRecordsFound {
            domain: domain.to_string(),
        });
    }

    if let Some(expected) = expected_ip.filter(|ip| !ip.is_empty()) {
        if result.a_records.iter().any(|record| record == expected) {
            result.note(format!("Expected IP {expected} present in A records."));
        } else {
            result.fail(DnsError::ExpectedIpMismatch {
                expected: expected.to_string(),
            });
        }
    }

    if let Some(expected) = expected_cname.filter(|cname| !cname.is_empty()) {
        let found = normalize_hostname(result.cname.as_deref().unwrap_or(""));
        if found.eq_ignore_ascii_case(normalize_hostname(expected)) {
            result.note(format!("CNAME matches expected ({expected})."));
        } else {
            let found = result.cname.clone();
            result.fail(DnsError::ExpectedCnameMismatch {
                expected: expected.to_string(),
                found,
            });
        }
    }

    for detail in faults {
        result.fail(DnsError::ResolutionFailure { detail });
    }

    debug!(
        "DNS check for {domain}: ok={}, {} A record(s), cname={:?}",
        result.ok,
        result.a_records.len(),
        result.cname
    );
    result
}

fn absorb_lookup_error(domain: &str, record_type: &str, error: LookupError, faults: &mut Vec<String>) {
    if error.is_fault() {
        warn!("{record_type} lookup for {domain} failed: {error}");
        faults.push(error.to_string());
    } else {
        debug!("No {record_type} records for {domain}: {error}");
    }
}

//! Validation request and result types.
//!
//! Every result type serializes to primitives, strings, booleans, optionals
//! and sequences only. Typed checker errors serialize as their message text.

use std::fmt::Display;

use serde::{Serialize, Serializer};

use crate::dns::DnsError;
use crate::error_handling::{ErrorKind, QueryError};
use crate::https::HttpsError;
use crate::tls::CertError;

#[allow(clippy::ptr_arg)] // serde hands over the field as `&Vec<T>`
fn serialize_messages<S, T>(items: &Vec<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Display,
{
    serializer.collect_seq(items.iter().map(|item| item.to_string()))
}

/// A single validation request.
///
/// Inputs are trimmed; empty expectations mean "no expectation".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainQuery {
    domain: String,
    expected_ip: Option<String>,
    expected_cname: Option<String>,
}

impl DomainQuery {
    /// Builds a query from raw form-style input.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::EmptyDomain` if `domain` is empty after trimming.
    pub fn new(
        domain: &str,
        expected_ip: Option<&str>,
        expected_cname: Option<&str>,
    ) -> Result<Self, QueryError> {
        let domain = domain.trim();
        if domain.is_empty() {
            return Err(QueryError::EmptyDomain);
        }
        let non_empty = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        Ok(Self {
            domain: domain.to_string(),
            expected_ip: non_empty(expected_ip),
            expected_cname: non_empty(expected_cname),
        })
    }

    /// The trimmed domain name.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Expected IPv4 address in the A records, if any.
    pub fn expected_ip(&self) -> Option<&str> {
        self.expected_ip.as_deref()
    }

    /// Expected CNAME target, if any.
    pub fn expected_cname(&self) -> Option<&str> {
        self.expected_cname.as_deref()
    }
}

/// Outcome of the DNS checker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsResult {
    /// True while no error has been recorded
    pub ok: bool,
    /// IPv4 addresses in dotted-quad form
    pub a_records: Vec<String>,
    /// First CNAME target without its trailing dot
    pub cname: Option<String>,
    /// Failures, serialized as their messages
    #[serde(serialize_with = "serialize_messages")]
    pub errors: Vec<DnsError>,
    /// Informational notes about matched expectations
    pub notes: Vec<String>,
}

impl DnsResult {
    pub(crate) fn new(a_records: Vec<String>, cname: Option<String>) -> Self {
        Self {
            ok: true,
            a_records,
            cname,
            errors: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Records an error. `ok` never flips back once cleared.
    pub(crate) fn fail(&mut self, error: DnsError) {
        self.ok = false;
        self.errors.push(error);
    }

    pub(crate) fn note(&mut self, note: String) {
        self.notes.push(note);
    }
}

/// Outcome of the HTTPS checker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HttpsResult {
    /// True if a status below 400 came back
    pub ok: bool,
    /// Final status after redirects; `None` if no response arrived
    pub status: Option<u16>,
    /// Failures, serialized as their messages
    #[serde(serialize_with = "serialize_messages")]
    pub errors: Vec<HttpsError>,
}

impl HttpsResult {
    /// A completed exchange; statuses of 400 and above fail.
    pub(crate) fn from_status(status: u16) -> Self {
        let mut errors = Vec::new();
        if status >= 400 {
            errors.push(HttpsError::HttpErrorStatus { status });
        }
        Self {
            ok: errors.is_empty(),
            status: Some(status),
            errors,
        }
    }

    /// The exchange never produced a status.
    pub(crate) fn from_failure(error: HttpsError) -> Self {
        Self {
            ok: false,
            status: None,
            errors: vec![error],
        }
    }
}

/// Outcome of the certificate checker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertResult {
    /// True while no error has been recorded
    pub ok: bool,
    /// Expiry as RFC 3339 UTC
    pub not_after: Option<String>,
    /// Whole days until expiry, rounded down; negative once expired
    pub days_left: Option<i64>,
    /// DNS names from the subjectAltName extension
    pub sans: Vec<String>,
    /// Whether any SAN matches the domain
    pub covers_domain: bool,
    /// Failures, serialized as their messages
    #[serde(serialize_with = "serialize_messages")]
    pub errors: Vec<CertError>,
    /// Advisory notes that do not affect `ok`
    pub warnings: Vec<String>,
}

impl CertResult {
    pub(crate) fn new() -> Self {
        Self {
            ok: true,
            not_after: None,
            days_left: None,
            sans: Vec::new(),
            covers_domain: false,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub(crate) fn from_failure(error: CertError) -> Self {
        let mut result = Self::new();
        result.fail(error);
        result
    }

    pub(crate) fn fail(&mut self, error: CertError) {
        self.ok = false;
        self.errors.push(error);
    }

    pub(crate) fn warn(&mut self, warning: String) {
        self.warnings.push(warning);
    }
}

/// The combined verdict for one query.
///
/// Read-only once built, so `overall_ok` always agrees with the three
/// checker results.
///
/// ```
/// use domain_validator::test_support::failing_report;
///
/// let report = failing_report("bad.example");
/// assert!(!report.overall_ok());
/// assert!(!report.dns().ok && !report.https().ok && !report.cert().ok);
/// assert_eq!(report.query().domain(), "bad.example");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    query: DomainQuery,
    dns: DnsResult,
    https: HttpsResult,
    cert: CertResult,
    overall_ok: bool,
}

impl ValidationReport {
    /// Combines three checker results; `overall_ok` is the AND of their flags.
    pub fn new(query: DomainQuery, dns: DnsResult, https: HttpsResult, cert: CertResult) -> Self {
        let overall_ok = dns.ok && https.ok && cert.ok;
        Self {
            query,
            dns,
            https,
            cert,
            overall_ok,
        }
    }

    /// The query this report answers.
    pub fn query(&self) -> &DomainQuery {
        &self.query
    }

    /// Shorthand for `query().domain()`.
    pub fn domain(&self) -> &str {
        self.query.domain()
    }

    /// DNS checker outcome.
    pub fn dns(&self) -> &DnsResult {
        &self.dns
    }

    /// HTTPS checker outcome.
    pub fn https(&self) -> &HttpsResult {
        &self.https
    }

    /// Certificate checker outcome.
    pub fn cert(&self) -> &CertResult {
        &self.cert
    }

    /// True only if all three checkers passed.
    pub fn overall_ok(&self) -> bool {
        self.overall_ok
    }

    /// All error messages in checker order (DNS, HTTPS, certificate).
    pub fn error_messages(&self) -> Vec<String> {
        self.dns
            .errors
            .iter()
            .map(ToString::to_string)
            .chain(self.https.errors.iter().map(ToString::to_string))
            .chain(self.cert.errors.iter().map(ToString::to_string))
            .collect()
    }

    /// Error categories in the same order as `error_messages`.
    pub fn error_kinds(&self) -> Vec<ErrorKind> {
        self.dns
            .errors
            .iter()
            .map(DnsError::kind)
            .chain(self.https.errors.iter().map(HttpsError::kind))
            .chain(self.cert.errors.iter().map(CertError::kind))
            .collect()
    }

    /// Total errors across all three checkers.
    pub fn error_count(&self) -> usize {
        self.dns.errors.len() + self.https.errors.len() + self.cert.errors.len()
    }
}

//! TLS certificate retrieval and evaluation.
//!
//! This module connects to `{domain}:443`, extracts the leaf certificate the
//! server presents and evaluates it:
//! - Expiry (`not_after` and signed days left)
//! - Subject Alternative Names, with the subject Common Name as fallback
//! - Hostname coverage, including single-wildcard SAN entries
//!
//! Uses `tokio-rustls` for the handshake and `x509-parser` for certificate
//! parsing. The chain is not validated unless explicitly configured, so
//! expired and self-signed certificates can still be inspected.

mod connect;
mod coverage;
mod extract;

use std::future::Future;

use chrono::{DateTime, Utc};
use log::{debug, warn};
use thiserror::Error;

use crate::error_handling::ErrorKind;
use crate::models::CertResult;

// Re-export public API
pub use connect::RustlsCertificateSource;
pub use coverage::covers;

const SECONDS_PER_DAY: i64 = 86_400;

/// The parts of a peer certificate the checker looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerCertificate {
    /// End of the validity period, if it could be read.
    pub not_after: Option<DateTime<Utc>>,
    /// DNS names from the Subject Alternative Name extension.
    pub subject_alt_names: Vec<String>,
    /// First Common Name of the subject.
    pub common_name: Option<String>,
}

/// Why no certificate could be obtained.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CertFetchError {
    /// The domain is not a valid SNI name
    #[error("invalid server name '{0}'")]
    InvalidServerName(String),
    /// TCP connect failed
    #[error("TCP connection to {host}:{port} failed: {detail}")]
    Connect {
        /// Target host
        host: String,
        /// Target port
        port: u16,
        /// OS error message
        detail: String,
    },
    /// A stage exceeded the configured timeout
    #[error("{stage} timed out after {seconds}s")]
    Timeout {
        /// `"TCP connect"` or `"TLS handshake"`
        stage: &'static str,
        /// The timeout that elapsed
        seconds: u64,
    },
    /// The TLS handshake was rejected
    #[error("TLS handshake failed: {0}")]
    Handshake(String),
    /// The handshake completed without a peer certificate
    #[error("server presented no certificate")]
    NoCertificate,
    /// The leaf certificate is not valid DER X.509
    #[error("certificate could not be parsed: {0}")]
    Parse(String),
}

/// TLS capability consumed by the checker.
pub trait CertificateSource: Send + Sync {
    /// Connects to the domain with SNI set to it and returns the leaf certificate.
    fn fetch(&self, domain: &str)
        -> impl Future<Output = Result<PeerCertificate, CertFetchError>> + Send;
}

/// Certificate checker failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CertError {
    /// The certificate has no notAfter date.
    #[error("No certificate end date present.")]
    MissingExpiry,

    /// notAfter is in the past.
    #[error("Certificate has expired.")]
    CertificateExpired {
        /// Whole days until expiry, negative here
        days_left: i64,
    },

    /// No SAN matches the domain.
    #[error("Certificate does NOT cover domain {domain}.")]
    DomainNotCovered {
        /// The queried domain
        domain: String,
    },

    /// No certificate could be obtained.
    #[error("Certificate retrieval failed: {detail}")]
    RetrievalFailure {
        /// Fetch failure message
        detail: String,
    },
}

impl CertError {
    /// Category used for batch statistics.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CertError::MissingExpiry => ErrorKind::MissingExpiry,
            CertError::CertificateExpired { .. } => ErrorKind::CertificateExpired,
            CertError::DomainNotCovered { .. } => ErrorKind::DomainNotCovered,
            CertError::RetrievalFailure { .. } => ErrorKind::RetrievalFailure,
        }
    }
}

/// Renders an expiry the way OpenSSL prints it, e.g. `Aug 13 15:04:05 2025 GMT`.
pub fn format_not_after(not_after: &DateTime<Utc>) -> String {
    not_after.format("%b %e %H:%M:%S %Y GMT").to_string()
}

/// Whole days from `now` until `not_after`, rounded down.
///
/// Negative once the certificate has expired; a certificate that expired an
/// hour ago reports -1, not 0.
pub fn days_left(not_after: &DateTime<Utc>, now: &DateTime<Utc>) -> i64 {
    (*not_after - *now).num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// Evaluates expiry and hostname coverage of an already retrieved certificate.
///
/// `expiry_warning_days` only ever adds an advisory warning; it never changes
/// `ok`.
pub fn evaluate_certificate(
    domain: &str,
    cert: &PeerCertificate,
    now: DateTime<Utc>,
    expiry_warning_days: Option<i64>,
) -> CertResult {
    let mut result = CertResult::new();

    match cert.not_after {
        Some(not_after) => {
            let remaining = days_left(&not_after, &now);
            result.not_after = Some(format_not_after(&not_after));
            result.days_left = Some(remaining);
            if remaining < 0 {
                result.fail(CertError::CertificateExpired {
                    days_left: remaining,
                });
            } else if let Some(threshold) = expiry_warning_days {
                if remaining < threshold {
                    result.warn(format!("Certificate expires in {remaining} days."));
                }
            }
        }
        None => result.fail(CertError::MissingExpiry),
    }

    result.sans = if cert.subject_alt_names.is_empty() {
        cert.common_name.iter().cloned().collect()
    } else {
        cert.subject_alt_names.clone()
    };

    result.covers_domain = result.sans.iter().any(|san| covers(domain, san));
    if !result.covers_domain {
        result.fail(CertError::DomainNotCovered {
            domain: domain.to_string(),
        });
    }

    result
}

/// Retrieves the certificate for `domain` and evaluates it against the
/// current time.
pub async fn check_cert<S: CertificateSource>(
    source: &S,
    domain: &str,
    expiry_warning_days: Option<i64>,
) -> CertResult {
    debug!("Retrieving certificate for {domain}");
    match source.fetch(domain).await {
        Ok(cert) => {
            let result = evaluate_certificate(domain, &cert, Utc::now(), expiry_warning_days);
            debug!(
                "Certificate for {domain}: ok={}, days_left={:?}, {} SAN(s)",
                result.ok,
                result.days_left,
                result.sans.len()
            );
            result
        }
        Err(e) => {
            warn!("Certificate retrieval for {domain} failed: {e}");
            CertResult::from_failure(CertError::RetrievalFailure {
                detail: e.to_string(),
            })
        }
    }
}

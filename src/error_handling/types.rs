//! Error type definitions.
//!
//! This module defines the setup errors and the error taxonomy shared by the
//! three checkers.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// Error initializing the DNS resolver.
    #[error("DNS resolver initialization error: {0}")]
    DnsResolverError(String),

    /// Error building the TLS client configuration.
    #[error("TLS configuration error: {0}")]
    TlsConfigError(#[from] rustls::Error),
}

/// Rejected validation input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The domain was empty after trimming.
    #[error("Please enter a domain.")]
    EmptyDomain,
}

/// Every kind of failure a checker can report.
///
/// Each checker has its own error enum; this flat view is what batch
/// statistics are counted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIterMacro)]
pub enum ErrorKind {
    // DNS
    /// See [`DnsError::NoRecordsFound`](crate::dns::DnsError::NoRecordsFound)
    NoRecordsFound,
    /// See [`DnsError::ExpectedIpMismatch`](crate::dns::DnsError::ExpectedIpMismatch)
    ExpectedIpMismatch,
    /// See [`DnsError::ExpectedCnameMismatch`](crate::dns::DnsError::ExpectedCnameMismatch)
    ExpectedCnameMismatch,
    /// See [`DnsError::ResolutionFailure`](crate::dns::DnsError::ResolutionFailure)
    ResolutionFailure,
    // HTTPS
    /// See [`HttpsError::ConnectionFailure`](crate::https::HttpsError::ConnectionFailure)
    ConnectionFailure,
    /// See [`HttpsError::HttpErrorStatus`](crate::https::HttpsError::HttpErrorStatus)
    HttpErrorStatus,
    // Certificate
    /// See [`CertError::MissingExpiry`](crate::tls::CertError::MissingExpiry)
    MissingExpiry,
    /// See [`CertError::CertificateExpired`](crate::tls::CertError::CertificateExpired)
    CertificateExpired,
    /// See [`CertError::DomainNotCovered`](crate::tls::CertError::DomainNotCovered)
    DomainNotCovered,
    /// See [`CertError::RetrievalFailure`](crate::tls::CertError::RetrievalFailure)
    RetrievalFailure,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorKind {
    /// Short label for summaries, prefixed with the checker name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NoRecordsFound => "DNS: no A or CNAME records",
            ErrorKind::ExpectedIpMismatch => "DNS: expected IP missing",
            ErrorKind::ExpectedCnameMismatch => "DNS: CNAME mismatch",
            ErrorKind::ResolutionFailure => "DNS: resolution failure",
            ErrorKind::ConnectionFailure => "HTTPS: connection failure",
            ErrorKind::HttpErrorStatus => "HTTPS: error status",
            ErrorKind::MissingExpiry => "Certificate: no end date",
            ErrorKind::CertificateExpired => "Certificate: expired",
            ErrorKind::DomainNotCovered => "Certificate: domain not covered",
            ErrorKind::RetrievalFailure => "Certificate: retrieval failure",
        }
    }
}

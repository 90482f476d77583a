//! Configuration constants.
//!
//! This module defines the constants used throughout the validator, mostly
//! network timeouts and protocol parameters.

/// Default per-operation timeout in seconds.
///
/// Applies separately to the DNS queries, the HTTPS request, the TCP connect
/// and the TLS handshake.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Upper bound accepted for `timeout_seconds`.
pub const MAX_TIMEOUT_SECS: u64 = 120;

/// Default number of domains validated at once in batch mode.
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// Port used for both the HTTPS probe and the certificate retrieval.
pub const HTTPS_PORT: u16 = 443;

/// Maximum redirect hops followed by the HTTPS probe.
pub const MAX_REDIRECTS: usize = 10;

/// DNS attempts per record type (no retries).
pub const DNS_ATTEMPTS: usize = 1;

/// Default User-Agent string for the HTTPS probe.
pub const DEFAULT_USER_AGENT: &str = concat!("domain_validator/", env!("CARGO_PKG_VERSION"));

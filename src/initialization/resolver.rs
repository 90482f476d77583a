//! DNS resolver initialization.

use std::sync::Arc;

use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

use crate::config::{Config, DNS_ATTEMPTS};
use crate::error_handling::InitializationError;

/// Initializes the DNS resolver for A and CNAME lookups.
///
/// Uses the default upstream configuration (Google DNS) with the configured
/// timeout per query. `ndots` is 0 so no search domain is ever appended to
/// the names being validated.
///
/// # Errors
///
/// Returns `InitializationError::DnsResolverError` if the resolver options
/// are unusable.
pub fn init_resolver(config: &Config) -> Result<Arc<TokioAsyncResolver>, InitializationError> {
    if config.timeout_seconds == 0 {
        return Err(InitializationError::DnsResolverError(
            "DNS timeout must be greater than 0".to_string(),
        ));
    }

    let mut opts = ResolverOpts::default();
    opts.timeout = config.timeout();
    opts.attempts = DNS_ATTEMPTS;
    opts.ndots = 0;

    Ok(Arc::new(TokioAsyncResolver::tokio(
        ResolverConfig::default(),
        opts,
    )))
}

//! A and CNAME resolution over `trust-dns-resolver`.

use std::net::Ipv4Addr;
use std::sync::Arc;

use trust_dns_resolver::error::{ResolveError, ResolveErrorKind};
use trust_dns_resolver::proto::rr::{Name, RData, RecordType};
use trust_dns_resolver::TokioAsyncResolver;

use super::{DnsLookup, LookupError};

/// [`DnsLookup`] backed by a shared `TokioAsyncResolver`.
#[derive(Clone)]
pub struct TrustDnsLookup {
    resolver: Arc<TokioAsyncResolver>,
}

impl TrustDnsLookup {
    /// Wraps a resolver built by [`init_resolver`](crate::initialization::init_resolver).
    pub fn new(resolver: Arc<TokioAsyncResolver>) -> Self {
        Self { resolver }
    }
}

/// Parses `domain` as a fully-qualified name so no search suffix is appended.
fn parse_name(domain: &str) -> Result<Name, LookupError> {
    let mut name = Name::from_utf8(domain).map_err(|e| LookupError::InvalidName {
        name: domain.to_string(),
        reason: e.to_string(),
    })?;
    name.set_fqdn(true);
    Ok(name)
}

fn classify_error(error: &ResolveError) -> LookupError {
    match error.kind() {
        ResolveErrorKind::NoRecordsFound { .. } => LookupError::NotFound,
        ResolveErrorKind::Timeout => LookupError::Timeout,
        _ => LookupError::Failed(error.to_string()),
    }
}

impl DnsLookup for TrustDnsLookup {
    async fn lookup_a(&self, name: &str) -> Result<Vec<Ipv4Addr>, LookupError> {
        let fqdn = parse_name(name)?;
        match self.resolver.ipv4_lookup(fqdn).await {
            Ok(lookup) => Ok(lookup.iter().map(|a| a.0).collect()),
            Err(e) => Err(classify_error(&e)),
        }
    }

    async fn lookup_cname(&self, name: &str) -> Result<Vec<String>, LookupError> {
        let fqdn = parse_name(name)?;
        match self.resolver.lookup(fqdn, RecordType::CNAME).await {
            Ok(lookup) => {
                // The answer may carry the chased target's records too; keep CNAMEs only.
                let targets: Vec<String> = lookup
                    .iter()
                    .filter_map(|rdata| match rdata {
                        RData::CNAME(cname) => Some(cname.0.to_utf8()),
                        _ => None,
                    })
                    .collect();
                if targets.is_empty() {
                    Err(LookupError::NotFound)
                } else {
                    Ok(targets)
                }
            }
            Err(e) => Err(classify_error(&e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trust_dns_resolver::proto::op::{Query, ResponseCode};

    #[test]
    fn test_parse_name_marks_fqdn() {
        let name = parse_name("www.example.com").unwrap();
        assert!(name.is_fqdn());
        assert_eq!(name.num_labels(), 3);
    }

    #[test]
    fn test_parse_name_accepts_trailing_dot() {
        let name = parse_name("example.com.").unwrap();
        assert!(name.is_fqdn());
        assert_eq!(name.num_labels(), 2);
    }

    fn no_records(code: ResponseCode) -> ResolveError {
        let name = Name::from_utf8("missing.example.").unwrap();
        ResolveError::from(ResolveErrorKind::NoRecordsFound {
            query: Box::new(Query::query(name, RecordType::A)),
            soa: None,
            negative_ttl: None,
            response_code: code,
            trusted: true,
        })
    }

    #[test]
    fn test_classify_nxdomain_and_no_data_as_not_found() {
        assert_eq!(classify_error(&no_records(ResponseCode::NXDomain)), LookupError::NotFound);
        assert_eq!(classify_error(&no_records(ResponseCode::NoError)), LookupError::NotFound);
    }

    #[test]
    fn test_classify_timeout() {
        let error = ResolveError::from(ResolveErrorKind::Timeout);
        assert_eq!(classify_error(&error), LookupError::Timeout);
    }

    #[test]
    fn test_classify_other_failures_keep_message() {
        let error = ResolveError::from(ResolveErrorKind::Message("request refused"));
        let classified = classify_error(&error);
        assert!(!classified.is_fault());
        assert_eq!(classified, LookupError::Failed("request refused".to_string()));
    }

    #[test]
    fn test_parse_name_rejects_oversized_label() {
        let label = "a".repeat(64);
        let err = parse_name(&format!("{label}.example.com")).unwrap_err();
        assert!(err.is_fault());
        assert!(matches!(err, LookupError::InvalidName { .. }));
    }
}

//! Hostname coverage rules for certificate names.

/// Whether a certificate name `san` covers `domain`.
///
/// - Exact match (ASCII case-insensitive) covers.
/// - `*.rest` covers `domain` when `domain` ends with `.rest` and has at least
///   one more label than `rest`. The wildcard therefore never covers the bare
///   `rest`, while deeper names such as `a.b.rest` are covered.
pub fn covers(domain: &str, san: &str) -> bool {
    let domain = domain.to_ascii_lowercase();
    let san = san.to_ascii_lowercase();

    if san == domain {
        return true;
    }

    match san.strip_prefix('*') {
        Some(suffix) if suffix.starts_with('.') => domain
            .strip_suffix(suffix)
            .is_some_and(|labels| !labels.is_empty()),
        _ => false,
    }
}

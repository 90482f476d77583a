//! Certificate extraction utilities.

use chrono::{DateTime, TimeZone, Utc};
use x509_parser::certificate::X509Certificate;
use x509_parser::extensions::{GeneralName, ParsedExtension};
use x509_parser::time::ASN1Time;

use super::{CertFetchError, PeerCertificate};

impl PeerCertificate {
    /// Parses a DER-encoded X.509 certificate.
    ///
    /// # Errors
    ///
    /// Returns `CertFetchError::Parse` if the bytes are not a certificate.
    pub fn from_der(der: &[u8]) -> Result<Self, CertFetchError> {
        let (_, cert) = x509_parser::parse_x509_certificate(der)
            .map_err(|e| CertFetchError::Parse(e.to_string()))?;

        Ok(Self {
            not_after: asn1_time_to_datetime(cert.validity().not_after),
            subject_alt_names: extract_certificate_sans(&cert),
            common_name: extract_common_name(&cert),
        })
    }
}

/// Converts an ASN.1 time; `None` if it does not fit a `DateTime<Utc>`.
fn asn1_time_to_datetime(time: ASN1Time) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(time.timestamp(), 0).single()
}

/// Extracts DNS names from the Subject Alternative Name extension.
///
/// Other name types (IP addresses, email addresses, URIs) are ignored since
/// hostname coverage only considers DNS names.
pub(crate) fn extract_certificate_sans(cert: &X509Certificate<'_>) -> Vec<String> {
    let mut sans = Vec::new();

    for ext in cert.extensions() {
        if let ParsedExtension::SubjectAlternativeName(san) = ext.parsed_extension() {
            for general_name in &san.general_names {
                if let GeneralName::DNSName(dns_name) = general_name {
                    sans.push(dns_name.to_string());
                }
            }
        }
    }

    sans
}

/// First Common Name in the subject, if it is a readable string.
pub(crate) fn extract_common_name(cert: &X509Certificate<'_>) -> Option<String> {
    cert.subject()
        .iter_common_name()
        .next()
        .and_then(|cn| cn.as_str().ok())
        .map(str::to_string)
}

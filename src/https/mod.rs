//! HTTPS reachability check.
//!
//! Issues a single HEAD request to `https://{domain}` (redirects followed)
//! and fails on transport errors or a final status of 400 and above.

mod probe;

use std::future::Future;

use log::{debug, warn};
use thiserror::Error;

use crate::error_handling::ErrorKind;
use crate::models::HttpsResult;

// Re-export public API
pub use probe::ReqwestProbe;

/// Why a HEAD request produced no status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// Connect or request timeout
    #[error("timed out: {0}")]
    Timeout(String),
    /// DNS, TCP or TLS failure before a response
    #[error("connection error: {0}")]
    Connect(String),
    /// Redirect loop or limit exceeded
    #[error("redirect error: {0}")]
    Redirect(String),
    /// The URL could not be turned into a request
    #[error("invalid request: {0}")]
    Builder(String),
    /// Anything else the client reported
    #[error("{0}")]
    Other(String),
}

/// HTTP capability consumed by the checker.
pub trait HttpsProbe: Send + Sync {
    /// Sends a HEAD request, following redirects, and returns the final status.
    fn head(&self, url: &str) -> impl Future<Output = Result<u16, ProbeError>> + Send;
}

/// HTTPS checker failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpsError {
    /// No response was received.
    #[error("HTTPS request failed to connect: {detail}")]
    ConnectionFailure {
        /// Probe failure message
        detail: String,
    },

    /// The final response had a status of 400 or above.
    #[error("HTTPS endpoint returned HTTP {status}")]
    HttpErrorStatus {
        /// Final status code
        status: u16,
    },
}

impl HttpsError {
    /// Category used for batch statistics.
    pub fn kind(&self) -> ErrorKind {
        match self {
            HttpsError::ConnectionFailure { .. } => ErrorKind::ConnectionFailure,
            HttpsError::HttpErrorStatus { .. } => ErrorKind::HttpErrorStatus,
        }
    }
}

/// Checks that `https://{domain}` answers a HEAD request with a non-error status.
pub async fn check_https<P: HttpsProbe>(probe: &P, domain: &str) -> HttpsResult {
    let url = format!("https://{domain}");
    debug!("Sending HEAD {url}");

    match probe.head(&url).await {
        Ok(status) => {
            debug!("HEAD {url} returned {status}");
            HttpsResult::from_status(status)
        }
        Err(e) => {
            warn!("HEAD {url} failed: {e}");
            HttpsResult::from_failure(HttpsError::ConnectionFailure {
                detail: e.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockProbe;

    #[tokio::test]
    async fn test_ok_status_passes() {
        let probe = MockProbe::new().with_status("https://good.example", 200);
        let result = check_https(&probe, "good.example").await;

        assert!(result.ok);
        assert_eq!(result.status, Some(200));
        assert!(result.errors.is_empty());
    }

    #[tokio::test]
    async fn test_redirect_status_below_400_passes() {
        let probe = MockProbe::new().with_status("https://moved.example", 304);
        let result = check_https(&probe, "moved.example").await;
        assert!(result.ok);
    }

    #[tokio::test]
    async fn test_not_found_fails_with_status() {
        let probe = MockProbe::new().with_status("https://missing.example", 404);
        let result = check_https(&probe, "missing.example").await;

        assert!(!result.ok);
        assert_eq!(result.status, Some(404));
        assert_eq!(
            result.errors,
            vec![HttpsError::HttpErrorStatus { status: 404 }]
        );
        assert_eq!(
            result.errors[0].to_string(),
            "HTTPS endpoint returned HTTP 404"
        );
    }

    #[tokio::test]
    async fn test_server_error_fails() {
        let probe = MockProbe::new().with_status("https://broken.example", 502);
        let result = check_https(&probe, "broken.example").await;
        assert!(!result.ok);
        assert_eq!(result.errors[0].kind(), ErrorKind::HttpErrorStatus);
    }

    #[tokio::test]
    async fn test_unreachable_host_fails_without_status() {
        let probe = MockProbe::new().with_error(
            "https://down.example",
            ProbeError::Connect("connection refused".to_string()),
        );
        let result = check_https(&probe, "down.example").await;

        assert!(!result.ok);
        assert_eq!(result.status, None);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].kind(), ErrorKind::ConnectionFailure);
        assert_eq!(
            result.errors[0].to_string(),
            "HTTPS request failed to connect: connection error: connection refused"
        );
    }

    #[tokio::test]
    async fn test_requests_https_scheme() {
        // Only the https URL is registered; any other URL is unreachable.
        let probe = MockProbe::new().with_status("https://scheme.example", 200);
        assert!(check_https(&probe, "scheme.example").await.ok);
    }
}

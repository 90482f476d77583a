//! HEAD requests over `reqwest`.

use std::error::Error as StdError;
use std::sync::Arc;

use super::{HttpsProbe, ProbeError};

/// [`HttpsProbe`] backed by a shared `reqwest::Client`.
///
/// Timeout and redirect policy come from the client; see
/// [`init_client`](crate::initialization::init_client).
#[derive(Clone)]
pub struct ReqwestProbe {
    client: Arc<reqwest::Client>,
}

impl ReqwestProbe {
    /// Wraps a configured client.
    pub fn new(client: Arc<reqwest::Client>) -> Self {
        Self { client }
    }
}

/// Joins an error with its sources, since `reqwest::Error`'s own message
/// omits the underlying cause.
fn error_chain(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Categorizes a `reqwest::Error` into a [`ProbeError`].
pub(crate) fn categorize_reqwest_error(error: &reqwest::Error) -> ProbeError {
    let detail = error_chain(error);
    if error.is_timeout() {
        ProbeError::Timeout(detail)
    } else if error.is_connect() {
        ProbeError::Connect(detail)
    } else if error.is_redirect() {
        ProbeError::Redirect(detail)
    } else if error.is_builder() {
        ProbeError::Builder(detail)
    } else {
        ProbeError::Other(detail)
    }
}

impl HttpsProbe for ReqwestProbe {
    async fn head(&self, url: &str) -> Result<u16, ProbeError> {
        let response = self
            .client
            .head(url)
            .send()
            .await
            .map_err(|e| categorize_reqwest_error(&e))?;
        Ok(response.status().as_u16())
    }
}

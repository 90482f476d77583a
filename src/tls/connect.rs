//! TLS connection and peer certificate retrieval.

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::{ring, CryptoProvider};
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{DigitallySignedStruct, Error as RustlsError, SignatureScheme};
use tokio::net::TcpStream;
use tokio_rustls::rustls::{ClientConfig, RootCertStore};
use tokio_rustls::TlsConnector;

use super::{CertFetchError, CertificateSource, PeerCertificate};
use crate::config::{Config, HTTPS_PORT};
use crate::error_handling::InitializationError;

/// Accepts whatever certificate the server presents.
///
/// Handshake signatures are still checked with the provider's algorithms,
/// only the chain and name checks are skipped.
#[derive(Debug)]
struct AcceptAnyCertVerifier {
    provider: Arc<CryptoProvider>,
}

impl ServerCertVerifier for AcceptAnyCertVerifier {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, RustlsError> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, RustlsError> {
        rustls::crypto::verify_tls12_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, RustlsError> {
        rustls::crypto::verify_tls13_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.provider
            .signature_verification_algorithms
            .supported_schemes()
    }
}

/// Builds the client configuration, with or without chain verification.
fn build_client_config(verify_chain: bool) -> Result<ClientConfig, InitializationError> {
    let provider = Arc::new(ring::default_provider());
    let builder = ClientConfig::builder_with_provider(Arc::clone(&provider))
        .with_safe_default_protocol_versions()?;

    let config = if verify_chain {
        let mut root_store = RootCertStore::empty();
        root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
        builder
            .with_root_certificates(root_store)
            .with_no_client_auth()
    } else {
        builder
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(AcceptAnyCertVerifier { provider }))
            .with_no_client_auth()
    };
    Ok(config)
}

/// [`CertificateSource`] that performs a real TLS handshake with `tokio-rustls`.
#[derive(Clone)]
pub struct RustlsCertificateSource {
    connector: TlsConnector,
    timeout: Duration,
    port: u16,
}

impl RustlsCertificateSource {
    /// Creates a source connecting to port 443 with the configured timeout
    /// applied separately to the TCP connect and the TLS handshake.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::TlsConfigError` if the TLS client
    /// configuration cannot be built.
    pub fn new(config: &Config) -> Result<Self, InitializationError> {
        let tls_config = build_client_config(config.verify_chain)?;
        Ok(Self {
            connector: TlsConnector::from(Arc::new(tls_config)),
            timeout: config.timeout(),
            port: HTTPS_PORT,
        })
    }

    /// Connects to `port` instead of 443.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}

impl CertificateSource for RustlsCertificateSource {
    async fn fetch(&self, domain: &str) -> Result<PeerCertificate, CertFetchError> {
        let server_name = ServerName::try_from(domain.to_string())
            .map_err(|_| CertFetchError::InvalidServerName(domain.to_string()))?;

        debug!("Connecting to {domain}:{}", self.port);
        let sock = match tokio::time::timeout(self.timeout, TcpStream::connect((domain, self.port))).await {
            Ok(Ok(sock)) => sock,
            Ok(Err(e)) => {
                return Err(CertFetchError::Connect {
                    host: domain.to_string(),
                    port: self.port,
                    detail: e.to_string(),
                })
            }
            Err(_) => {
                return Err(CertFetchError::Timeout {
                    stage: "TCP connect",
                    seconds: self.timeout.as_secs(),
                })
            }
        };

        let tls_stream = match tokio::time::timeout(
            self.timeout,
            self.connector.connect(server_name, sock),
        )
        .await
        {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => return Err(CertFetchError::Handshake(e.to_string())),
            Err(_) => {
                return Err(CertFetchError::Timeout {
                    stage: "TLS handshake",
                    seconds: self.timeout.as_secs(),
                })
            }
        };

        let leaf = tls_stream
            .get_ref()
            .1
            .peer_certificates()
            .and_then(|certs| certs.first())
            .ok_or(CertFetchError::NoCertificate)?;

        debug!("Parsing certificate presented by {domain}");
        PeerCertificate::from_der(leaf.as_ref())
    }
}

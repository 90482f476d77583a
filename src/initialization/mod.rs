//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources the
//! checkers run on:
//! - HTTP client (timeout, redirect limit, user agent)
//! - DNS resolver
//! - Logger
//! - Process-wide TLS crypto provider

mod client;
mod logger;
mod resolver;

use rustls::crypto::{ring::default_provider, CryptoProvider};

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;
pub use resolver::init_resolver;

/// Initializes the crypto provider for TLS operations.
///
/// Installs `ring` as the process-wide `rustls` provider. Call it before any
/// TLS connection is made; the certificate source builds its own config from
/// the same provider either way.
pub fn init_crypto_provider() {
    // An already installed provider is left in place
    let _ = CryptoProvider::install_default(default_provider());
}

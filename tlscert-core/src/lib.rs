//! # tlscert core
//!
//! Certificate handling for the TLS 1.3 handshake.
//!
//! This crate turns raw certificate material into the protocol objects a
//! handshake needs, and turns received certificate bytes back into a
//! verifiable peer identity:
//! - Key classification of certificate public keys
//! - CertificateVerify signing contexts
//! - Certificate / CertificateVerify message construction and wire format
//! - Typed peer certificates (verification) and self certificates (signing)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │     Handshake engine (external)         │
//! └─────────────────┬───────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────┐
//! │       tlscert-core (this crate)         │
//! │  ┌──────────────────────────────────┐   │
//! │  │   PeerCert / SelfCert factories  │   │
//! │  ├──────────────────────────────────┤   │
//! │  │   Certificate messages           │   │
//! │  ├──────────────────────────────────┤   │
//! │  │   Signing context                │   │
//! │  ├──────────────────────────────────┤   │
//! │  │   Key classification             │   │
//! │  └──────────────────────────────────┘   │
//! └─────────────────┬───────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────┐
//! │   tlscert-crypto (sign/verify, keys)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! Chain-of-trust validation is not performed here.

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub,
    unused_qualifications
)]
#![forbid(unsafe_code)]

// Re-export crypto interface
pub use tlscert_crypto;

pub mod cert;
pub mod error;
pub mod key_inspector;
pub mod messages;
pub mod peer_cert;
pub mod self_cert;
pub mod signing_context;

// Re-exports
pub use cert::{Cert, IdentityCert};
pub use error::{AlertDescription, Error, Result};
pub use messages::{build_certificate_message, CertificateEntry, CertificateMsg, CertificateVerify};
pub use peer_cert::{make_peer_cert, make_peer_cert_with, PeerCert, PeerCertImpl};
pub use self_cert::{
    make_self_cert, make_self_cert_from_pem, make_self_cert_from_pem_with, make_self_cert_with,
    SelfCert, SelfCertImpl,
};
pub use signing_context::{build_signature_message, CertificateVerifyContext};
pub use tlscert_crypto::{KeyType, PrivateKey, SignatureScheme};

/// What to do with bytes that follow a peer certificate's DER encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailingDataPolicy {
    /// Ignore them and log a diagnostic
    #[default]
    Allow,
    /// Fail with `DecodeError`
    Reject,
}

/// Certificate handling configuration.
///
/// # Example
///
/// ```rust
/// use tlscert_core::{CertConfig, TrailingDataPolicy};
///
/// let config = CertConfig::builder()
///     .with_trailing_data(TrailingDataPolicy::Reject)
///     .build();
/// assert!(config.verify_key_match);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertConfig {
    /// Handling of bytes after a peer certificate (default: allow)
    pub trailing_data: TrailingDataPolicy,

    /// Check that a self certificate's private key matches the leaf public key
    /// (default: true)
    pub verify_key_match: bool,
}

impl Default for CertConfig {
    fn default() -> Self {
        Self {
            trailing_data: TrailingDataPolicy::Allow,
            verify_key_match: true,
        }
    }
}

impl CertConfig {
    /// Create a new configuration builder.
    pub fn builder() -> CertConfigBuilder {
        CertConfigBuilder::default()
    }
}

/// Configuration builder for certificate handling.
#[derive(Debug, Default)]
pub struct CertConfigBuilder {
    config: CertConfig,
}

impl CertConfigBuilder {
    /// Set the trailing data policy for peer certificates.
    pub fn with_trailing_data(mut self, policy: TrailingDataPolicy) -> Self {
        self.config.trailing_data = policy;
        self
    }

    /// Enable or disable the private key / leaf public key check.
    pub fn with_key_match_check(mut self, enable: bool) -> Self {
        self.config.verify_key_match = enable;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> CertConfig {
        self.config
    }
}

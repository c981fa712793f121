//! Error types for the signature primitives.

use thiserror::Error;

/// Result type for cryptographic operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during key decoding, signing and verification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The signature scheme cannot be used with this key type.
    #[error("Signature scheme {scheme} not supported for {key_type} keys")]
    UnsupportedScheme {
        /// Requested scheme name
        scheme: &'static str,
        /// Key type the scheme was requested for
        key_type: &'static str,
    },

    /// Signature verification failed.
    #[error("Signature verification failed")]
    SignatureVerificationFailed,

    /// Invalid signature format.
    #[error("Invalid signature format")]
    InvalidSignature,

    /// Invalid public key.
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Invalid private key.
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// Signing failed.
    #[error("Signing failed: {0}")]
    SigningFailed(String),
}

//! Error types for certificate handling.

use thiserror::Error;
use tlscert_crypto::{KeyType, SignatureScheme};

/// Result type for certificate operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur while building or using certificates.
///
/// Every error is terminal for the operation that produced it; no partially
/// built object is ever returned alongside one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No input was supplied (empty certificate bytes or an empty chain)
    #[error("Empty input")]
    EmptyInput,

    /// Certificate bytes could not be decoded
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// Private key bytes could not be decoded
    #[error("Private key decode error: {0}")]
    KeyDecodeError(String),

    /// The certificate carries no usable public key
    #[error("Certificate has no usable public key")]
    MissingPublicKey,

    /// The certificate key is not RSA, P-256, P-384 or P-521
    #[error("Unsupported key type: {0}")]
    UnsupportedKeyType(String),

    /// A certificate could not be DER-encoded
    #[error("Encoding error: {0}")]
    EncodingError(String),

    /// The private key does not belong to the leaf certificate
    #[error("Private key does not match certificate public key")]
    KeyMismatch,

    /// The signature scheme cannot be used with the certificate key
    #[error("Signature scheme {scheme} not supported for {key_type} keys")]
    UnsupportedSignatureScheme {
        /// Requested scheme
        scheme: SignatureScheme,
        /// Key type of the certificate
        key_type: KeyType,
    },

    /// Signature verification failed
    #[error("Signature verification failed")]
    SignatureVerificationFailed,

    /// Invalid message format
    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    /// Cryptographic error
    #[error("Cryptographic error: {0}")]
    CryptoError(String),
}

impl Error {
    /// Alert the handshake should send when this error aborts it.
    pub const fn alert(&self) -> AlertDescription {
        match self {
            Error::EmptyInput | Error::DecodeError(_) | Error::InvalidMessage(_) => {
                AlertDescription::DecodeError
            },
            Error::MissingPublicKey => AlertDescription::BadCertificate,
            Error::UnsupportedKeyType(_) => AlertDescription::UnsupportedCertificate,
            Error::UnsupportedSignatureScheme { .. } => AlertDescription::IllegalParameter,
            Error::SignatureVerificationFailed => AlertDescription::DecryptError,
            Error::KeyDecodeError(_)
            | Error::EncodingError(_)
            | Error::KeyMismatch
            | Error::CryptoError(_) => AlertDescription::InternalError,
        }
    }
}

impl From<tlscert_crypto::Error> for Error {
    fn from(e: tlscert_crypto::Error) -> Self {
        match e {
            tlscert_crypto::Error::SignatureVerificationFailed
            | tlscert_crypto::Error::InvalidSignature => Error::SignatureVerificationFailed,
            tlscert_crypto::Error::InvalidPrivateKey(msg) => Error::KeyDecodeError(msg),
            other => Error::CryptoError(other.to_string()),
        }
    }
}

/// TLS alert descriptions raised by certificate handling (RFC 8446 Section 6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AlertDescription {
    /// Handshake failure
    HandshakeFailure = 40,

    /// Bad certificate
    BadCertificate = 42,

    /// Unsupported certificate
    UnsupportedCertificate = 43,

    /// Certificate unknown
    CertificateUnknown = 46,

    /// Illegal parameter
    IllegalParameter = 47,

    /// Decode error
    DecodeError = 50,

    /// Decrypt error
    DecryptError = 51,

    /// Internal error
    InternalError = 80,
}

impl AlertDescription {
    /// Convert from wire format (u8).
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            40 => Some(AlertDescription::HandshakeFailure),
            42 => Some(AlertDescription::BadCertificate),
            43 => Some(AlertDescription::UnsupportedCertificate),
            46 => Some(AlertDescription::CertificateUnknown),
            47 => Some(AlertDescription::IllegalParameter),
            50 => Some(AlertDescription::DecodeError),
            51 => Some(AlertDescription::DecryptError),
            80 => Some(AlertDescription::InternalError),
            _ => None,
        }
    }

    /// Convert to wire format (u8).
    pub const fn to_u8(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_wire_values() {
        assert_eq!(AlertDescription::BadCertificate.to_u8(), 42);
        assert_eq!(AlertDescription::DecryptError.to_u8(), 51);
        assert_eq!(
            AlertDescription::from_u8(43),
            Some(AlertDescription::UnsupportedCertificate)
        );
        assert_eq!(AlertDescription::from_u8(0), None);
    }

    #[test]
    fn test_error_alerts() {
        assert_eq!(Error::EmptyInput.alert(), AlertDescription::DecodeError);
        assert_eq!(
            Error::UnsupportedKeyType("Ed25519".into()).alert(),
            AlertDescription::UnsupportedCertificate
        );
        assert_eq!(
            Error::SignatureVerificationFailed.alert(),
            AlertDescription::DecryptError
        );
        assert_eq!(Error::KeyMismatch.alert(), AlertDescription::InternalError);
    }

    #[test]
    fn test_from_crypto_error() {
        assert_eq!(
            Error::from(tlscert_crypto::Error::InvalidSignature),
            Error::SignatureVerificationFailed
        );
        assert!(matches!(
            Error::from(tlscert_crypto::Error::InvalidPrivateKey("bad".into())),
            Error::KeyDecodeError(msg) if msg == "bad"
        ));
        assert!(matches!(
            Error::from(tlscert_crypto::Error::SigningFailed("rng".into())),
            Error::CryptoError(_)
        ));
    }
}

//! Peer certificates.
//!
//! A peer certificate is the end-entity certificate received in the peer's
//! Certificate message. Parsing classifies its public key once; from then on
//! the key representation and the verification primitive are fixed by the
//! [`PeerCert`] variant.

use crate::cert::{self, Cert};
use crate::error::{Error, Result};
use crate::key_inspector;
use crate::signing_context::{build_signature_message, CertificateVerifyContext};
use crate::{CertConfig, TrailingDataPolicy};
use core::fmt;
use core::marker::PhantomData;
use der::{Decode, Reader, SliceReader};
use tlscert_crypto::{EcdsaP256, EcdsaP384, EcdsaP521, KeyAlgorithm, KeyType, Rsa, SignatureScheme};
use x509_cert::Certificate;

/// A peer certificate whose key has been decoded for algorithm `A`.
pub struct PeerCertImpl<A: KeyAlgorithm> {
    cert: Certificate,
    public_key: A::PublicKey,
    _algorithm: PhantomData<A>,
}

impl<A: KeyAlgorithm> Clone for PeerCertImpl<A> {
    fn clone(&self) -> Self {
        Self {
            cert: self.cert.clone(),
            public_key: self.public_key.clone(),
            _algorithm: PhantomData,
        }
    }
}

impl<A: KeyAlgorithm> fmt::Debug for PeerCertImpl<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PeerCertImpl")
            .field("key_type", &A::KEY_TYPE)
            .field("identity", &cert::common_name(&self.cert))
            .finish_non_exhaustive()
    }
}

impl<A: KeyAlgorithm> PeerCertImpl<A> {
    /// Decode the public key of `cert` for algorithm `A`.
    ///
    /// The caller is responsible for having classified the key as `A`.
    ///
    /// # Errors
    ///
    /// - `MissingPublicKey` if the key bits cannot be decoded for `A`
    pub fn new(cert: Certificate) -> Result<Self> {
        let key_bits = cert
            .tbs_certificate
            .subject_public_key_info
            .subject_public_key
            .as_bytes()
            .ok_or(Error::MissingPublicKey)?;

        let public_key = A::decode_public_key(key_bits).map_err(|e| {
            tracing::debug!("Peer {} public key rejected: {}", A::KEY_TYPE, e);
            Error::MissingPublicKey
        })?;

        Ok(Self {
            cert,
            public_key,
            _algorithm: PhantomData,
        })
    }

    /// Subject common name.
    pub fn identity(&self) -> String {
        cert::common_name(&self.cert)
    }

    /// The parsed certificate.
    pub fn x509(&self) -> &Certificate {
        &self.cert
    }

    /// The decoded public key.
    pub fn public_key(&self) -> &A::PublicKey {
        &self.public_key
    }

    /// Verify a CertificateVerify signature over `to_be_signed`.
    ///
    /// # Errors
    ///
    /// - `UnsupportedSignatureScheme` if `scheme` does not fit the key type
    /// - `SignatureVerificationFailed` if the signature is malformed or wrong
    pub fn verify(
        &self,
        scheme: SignatureScheme,
        context: CertificateVerifyContext,
        to_be_signed: &[u8],
        signature: &[u8],
    ) -> Result<()> {
        if !A::KEY_TYPE.supports(scheme) {
            return Err(Error::UnsupportedSignatureScheme {
                scheme,
                key_type: A::KEY_TYPE,
            });
        }

        let message = build_signature_message(context, to_be_signed);
        A::verify(&self.public_key, scheme, &message, signature)?;
        Ok(())
    }
}

/// A peer certificate, tagged by key type.
#[derive(Debug, Clone)]
pub enum PeerCert {
    /// RSA key
    Rsa(PeerCertImpl<Rsa>),
    /// ECDSA P-256 key
    P256(PeerCertImpl<EcdsaP256>),
    /// ECDSA P-384 key
    P384(PeerCertImpl<EcdsaP384>),
    /// ECDSA P-521 key
    P521(PeerCertImpl<EcdsaP521>),
}

impl PeerCert {
    /// Classify the key of an already parsed certificate and wrap it.
    ///
    /// # Errors
    ///
    /// - `UnsupportedKeyType` if the key is not RSA, P-256, P-384 or P-521
    /// - `MissingPublicKey` if the key bits cannot be decoded
    pub fn from_x509(cert: Certificate) -> Result<Self> {
        let key_type = key_inspector::classify(&cert.tbs_certificate.subject_public_key_info)
            .map_err(|e| {
                tracing::warn!("Rejecting peer certificate: {}", e);
                e
            })?;

        let peer = match key_type {
            KeyType::Rsa => PeerCert::Rsa(PeerCertImpl::new(cert)?),
            KeyType::P256 => PeerCert::P256(PeerCertImpl::new(cert)?),
            KeyType::P384 => PeerCert::P384(PeerCertImpl::new(cert)?),
            KeyType::P521 => PeerCert::P521(PeerCertImpl::new(cert)?),
        };

        tracing::debug!("Parsed {} peer certificate", key_type);
        Ok(peer)
    }

    /// Key type of the certificate.
    pub fn key_type(&self) -> KeyType {
        match self {
            PeerCert::Rsa(_) => KeyType::Rsa,
            PeerCert::P256(_) => KeyType::P256,
            PeerCert::P384(_) => KeyType::P384,
            PeerCert::P521(_) => KeyType::P521,
        }
    }

    /// Verify a CertificateVerify signature over `to_be_signed`.
    ///
    /// See [`PeerCertImpl::verify`].
    pub fn verify(
        &self,
        scheme: SignatureScheme,
        context: CertificateVerifyContext,
        to_be_signed: &[u8],
        signature: &[u8],
    ) -> Result<()> {
        match self {
            PeerCert::Rsa(c) => c.verify(scheme, context, to_be_signed, signature),
            PeerCert::P256(c) => c.verify(scheme, context, to_be_signed, signature),
            PeerCert::P384(c) => c.verify(scheme, context, to_be_signed, signature),
            PeerCert::P521(c) => c.verify(scheme, context, to_be_signed, signature),
        }
    }

    fn cert(&self) -> &Certificate {
        match self {
            PeerCert::Rsa(c) => c.x509(),
            PeerCert::P256(c) => c.x509(),
            PeerCert::P384(c) => c.x509(),
            PeerCert::P521(c) => c.x509(),
        }
    }
}

impl Cert for PeerCert {
    fn identity(&self) -> String {
        cert::common_name(self.cert())
    }

    fn x509(&self) -> Option<&Certificate> {
        Some(self.cert())
    }
}

/// Parse a DER certificate received from the peer, with the default
/// configuration.
///
/// See [`make_peer_cert_with`].
pub fn make_peer_cert(cert_data: &[u8]) -> Result<PeerCert> {
    make_peer_cert_with(&CertConfig::default(), cert_data)
}

/// Parse a DER certificate received from the peer.
///
/// `cert_data` must start with one DER certificate. Bytes after it are
/// handled according to `config.trailing_data`.
///
/// # Errors
///
/// - `EmptyInput` if `cert_data` is empty
/// - `DecodeError` if no certificate can be decoded, or on trailing bytes
///   under [`TrailingDataPolicy::Reject`]
/// - `MissingPublicKey` if the public key cannot be decoded
/// - `UnsupportedKeyType` if the key is not RSA, P-256, P-384 or P-521
pub fn make_peer_cert_with(config: &CertConfig, cert_data: &[u8]) -> Result<PeerCert> {
    if cert_data.is_empty() {
        return Err(Error::EmptyInput);
    }

    let mut reader =
        SliceReader::new(cert_data).map_err(|e| Error::DecodeError(e.to_string()))?;
    let cert = Certificate::decode(&mut reader).map_err(|e| Error::DecodeError(e.to_string()))?;

    let trailing = reader.remaining_len();
    if !trailing.is_zero() {
        match config.trailing_data {
            TrailingDataPolicy::Allow => {
                tracing::debug!("Ignoring {} trailing bytes after peer certificate", trailing);
            },
            TrailingDataPolicy::Reject => {
                return Err(Error::DecodeError(format!(
                    "{} trailing bytes after certificate",
                    trailing
                )));
            },
        }
    }

    PeerCert::from_x509(cert)
}

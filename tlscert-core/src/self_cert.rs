//! Self certificates.
//!
//! A self certificate pairs the local private key with the certificate chain
//! sent to the peer. It signs CertificateVerify contexts and builds the
//! Certificate message for the chain.

use crate::cert::{self, Cert};
use crate::error::{Error, Result};
use crate::key_inspector;
use crate::messages::certificate::{build_certificate_message, CertificateMsg};
use crate::signing_context::{build_signature_message, CertificateVerifyContext};
use crate::CertConfig;
use core::fmt;
use core::marker::PhantomData;
use der::{Decode, Reader, SliceReader};
use tlscert_crypto::{
    EcdsaP256, EcdsaP384, EcdsaP521, KeyAlgorithm, KeyType, PrivateKey, Rsa, SignatureScheme,
};
use x509_cert::Certificate;

/// Tag byte of a DER `SEQUENCE`.
const DER_SEQUENCE: u8 = 0x30;

/// A private key for algorithm `A` and its certificate chain.
///
/// The chain is never empty; index 0 is the leaf.
pub struct SelfCertImpl<A: KeyAlgorithm> {
    key: A::PrivateKey,
    chain: Vec<Certificate>,
    _algorithm: PhantomData<A>,
}

impl<A: KeyAlgorithm> fmt::Debug for SelfCertImpl<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelfCertImpl")
            .field("key_type", &A::KEY_TYPE)
            .field("identity", &self.identity())
            .field("chain_len", &self.chain.len())
            .field("key", &"<redacted>")
            .finish()
    }
}

impl<A: KeyAlgorithm> SelfCertImpl<A> {
    /// Pair `key` with `chain`.
    ///
    /// The caller is responsible for having classified the leaf key as `A`.
    ///
    /// # Errors
    ///
    /// - `EmptyInput` if `chain` is empty
    /// - `MissingPublicKey` if the leaf public key cannot be decoded for `A`
    /// - `KeyMismatch` if `config.verify_key_match` is set and `key` is not the
    ///   leaf's private key
    pub fn new(config: &CertConfig, key: A::PrivateKey, chain: Vec<Certificate>) -> Result<Self> {
        let leaf = chain.first().ok_or(Error::EmptyInput)?;

        let key_bits = leaf
            .tbs_certificate
            .subject_public_key_info
            .subject_public_key
            .as_bytes()
            .ok_or(Error::MissingPublicKey)?;
        let leaf_key = A::decode_public_key(key_bits).map_err(|e| {
            tracing::debug!("Leaf {} public key rejected: {}", A::KEY_TYPE, e);
            Error::MissingPublicKey
        })?;

        if config.verify_key_match && !A::same_public_key(&A::public_key(&key), &leaf_key) {
            tracing::debug!("{} private key does not match leaf certificate", A::KEY_TYPE);
            return Err(Error::KeyMismatch);
        }

        Ok(Self {
            key,
            chain,
            _algorithm: PhantomData,
        })
    }

    /// Signature schemes this certificate can sign with, in order of preference.
    pub fn sig_schemes(&self) -> &'static [SignatureScheme] {
        A::KEY_TYPE.sig_schemes()
    }

    /// Sign the CertificateVerify context for `to_be_signed`.
    ///
    /// # Errors
    ///
    /// - `UnsupportedSignatureScheme` if `scheme` does not fit the key type
    /// - `CryptoError` if the signature primitive fails
    pub fn sign(
        &self,
        scheme: SignatureScheme,
        context: CertificateVerifyContext,
        to_be_signed: &[u8],
    ) -> Result<Vec<u8>> {
        if !A::KEY_TYPE.supports(scheme) {
            return Err(Error::UnsupportedSignatureScheme {
                scheme,
                key_type: A::KEY_TYPE,
            });
        }

        let message = build_signature_message(context, to_be_signed);
        Ok(A::sign(&self.key, scheme, &message)?)
    }

    /// Subject common name of the leaf.
    pub fn identity(&self) -> String {
        cert::common_name(self.x509())
    }

    /// DNS subjectAltNames of the leaf.
    pub fn alt_identities(&self) -> Vec<String> {
        cert::alt_names(self.x509())
    }

    /// The leaf certificate.
    pub fn x509(&self) -> &Certificate {
        &self.chain[0]
    }

    /// The full chain, leaf first.
    pub fn chain(&self) -> &[Certificate] {
        &self.chain
    }

    /// The private key.
    pub fn private_key(&self) -> &A::PrivateKey {
        &self.key
    }

    /// Build the Certificate message for the chain.
    ///
    /// # Errors
    ///
    /// - `EncodingError` if a certificate cannot be DER-encoded
    pub fn cert_message(&self, request_context: Vec<u8>) -> Result<CertificateMsg> {
        build_certificate_message(&self.chain, request_context)
    }
}

/// A self certificate, tagged by key type.
#[derive(Debug)]
pub enum SelfCert {
    /// RSA key
    Rsa(SelfCertImpl<Rsa>),
    /// ECDSA P-256 key
    P256(SelfCertImpl<EcdsaP256>),
    /// ECDSA P-384 key
    P384(SelfCertImpl<EcdsaP384>),
    /// ECDSA P-521 key
    P521(SelfCertImpl<EcdsaP521>),
}

impl SelfCert {
    /// Key type of the certificate.
    pub fn key_type(&self) -> KeyType {
        match self {
            SelfCert::Rsa(_) => KeyType::Rsa,
            SelfCert::P256(_) => KeyType::P256,
            SelfCert::P384(_) => KeyType::P384,
            SelfCert::P521(_) => KeyType::P521,
        }
    }

    /// Signature schemes this certificate can sign with.
    pub fn sig_schemes(&self) -> &'static [SignatureScheme] {
        self.key_type().sig_schemes()
    }

    /// Sign the CertificateVerify context for `to_be_signed`.
    ///
    /// See [`SelfCertImpl::sign`].
    pub fn sign(
        &self,
        scheme: SignatureScheme,
        context: CertificateVerifyContext,
        to_be_signed: &[u8],
    ) -> Result<Vec<u8>> {
        match self {
            SelfCert::Rsa(c) => c.sign(scheme, context, to_be_signed),
            SelfCert::P256(c) => c.sign(scheme, context, to_be_signed),
            SelfCert::P384(c) => c.sign(scheme, context, to_be_signed),
            SelfCert::P521(c) => c.sign(scheme, context, to_be_signed),
        }
    }

    /// DNS subjectAltNames of the leaf.
    pub fn alt_identities(&self) -> Vec<String> {
        cert::alt_names(self.leaf())
    }

    /// The full chain, leaf first.
    pub fn chain(&self) -> &[Certificate] {
        match self {
            SelfCert::Rsa(c) => c.chain(),
            SelfCert::P256(c) => c.chain(),
            SelfCert::P384(c) => c.chain(),
            SelfCert::P521(c) => c.chain(),
        }
    }

    /// Build the Certificate message for the chain.
    pub fn cert_message(&self, request_context: Vec<u8>) -> Result<CertificateMsg> {
        build_certificate_message(self.chain(), request_context)
    }

    fn leaf(&self) -> &Certificate {
        &self.chain()[0]
    }
}

impl Cert for SelfCert {
    fn identity(&self) -> String {
        cert::common_name(self.leaf())
    }

    fn x509(&self) -> Option<&Certificate> {
        Some(self.leaf())
    }
}

/// Pair a private key with a certificate chain, with the default
/// configuration.
///
/// See [`make_self_cert_with`].
pub fn make_self_cert(certs: Vec<Certificate>, key: PrivateKey) -> Result<SelfCert> {
    make_self_cert_with(&CertConfig::default(), certs, key)
}

/// Pair a private key with a certificate chain.
///
/// `certs[0]` is the leaf; its key type selects the [`SelfCert`] variant.
///
/// # Errors
///
/// - `EmptyInput` if `certs` is empty
/// - `MissingPublicKey` if the leaf public key cannot be decoded
/// - `UnsupportedKeyType` if the leaf key is not RSA, P-256, P-384 or P-521
/// - `KeyMismatch` if `key` is of another algorithm than the leaf key, or if
///   the key check is enabled and `key` is not the leaf's private key
pub fn make_self_cert_with(
    config: &CertConfig,
    certs: Vec<Certificate>,
    key: PrivateKey,
) -> Result<SelfCert> {
    let leaf = certs.first().ok_or(Error::EmptyInput)?;
    let spki = &leaf.tbs_certificate.subject_public_key_info;
    if spki.subject_public_key.as_bytes().is_none() {
        return Err(Error::MissingPublicKey);
    }
    let key_type = key_inspector::classify(spki)?;
    let chain_len = certs.len();

    let self_cert = match (key_type, key) {
        (KeyType::Rsa, PrivateKey::Rsa(k)) => SelfCert::Rsa(SelfCertImpl::new(config, k, certs)?),
        (KeyType::P256, PrivateKey::P256(k)) => {
            SelfCert::P256(SelfCertImpl::new(config, k, certs)?)
        },
        (KeyType::P384, PrivateKey::P384(k)) => {
            SelfCert::P384(SelfCertImpl::new(config, k, certs)?)
        },
        (KeyType::P521, PrivateKey::P521(k)) => {
            SelfCert::P521(SelfCertImpl::new(config, k, certs)?)
        },
        (expected, key) => {
            tracing::debug!(
                "Private key type {} does not match {} leaf certificate",
                key.key_type(),
                expected
            );
            return Err(Error::KeyMismatch);
        },
    };

    tracing::debug!(
        "Loaded {} self certificate with chain of {}",
        key_type,
        chain_len
    );
    Ok(self_cert)
}

/// Load a self certificate from encoded chain and key bytes, with the default
/// configuration.
///
/// See [`make_self_cert_from_pem_with`].
pub fn make_self_cert_from_pem(cert_chain: &[u8], private_key: &[u8]) -> Result<SelfCert> {
    make_self_cert_from_pem_with(&CertConfig::default(), cert_chain, private_key)
}

/// Load a self certificate from encoded chain and key bytes.
///
/// `cert_chain` is a PEM certificate chain or concatenated DER certificates,
/// leaf first. Text around the PEM sections and sections other than
/// `CERTIFICATE` are skipped. `private_key` is a PKCS#8, PKCS#1 or SEC1 PEM key, or a PKCS#8
/// DER key.
///
/// # Errors
///
/// - `DecodeError` if the chain is malformed or holds no certificate
/// - `KeyDecodeError` if the private key cannot be read
/// - any error of [`make_self_cert_with`]
pub fn make_self_cert_from_pem_with(
    config: &CertConfig,
    cert_chain: &[u8],
    private_key: &[u8],
) -> Result<SelfCert> {
    let certs = parse_chain(cert_chain)?;
    let key =
        PrivateKey::from_pem(private_key).map_err(|e| Error::KeyDecodeError(e.to_string()))?;
    make_self_cert_with(config, certs, key)
}

fn parse_chain(data: &[u8]) -> Result<Vec<Certificate>> {
    let mut reader = data;
    let pem_certs = rustls_pemfile::certs(&mut reader)
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| Error::DecodeError(format!("PEM: {}", e)))?;

    let certs = if !pem_certs.is_empty() {
        pem_certs
            .iter()
            .map(|cert| Certificate::from_der(cert.as_ref()))
            .collect::<der::Result<Vec<_>>>()
            .map_err(|e| Error::DecodeError(e.to_string()))?
    } else if data.first() == Some(&DER_SEQUENCE) {
        parse_der_chain(data)?
    } else {
        Vec::new()
    };

    if certs.is_empty() {
        return Err(Error::DecodeError("no certificates in chain".into()));
    }
    Ok(certs)
}

fn parse_der_chain(data: &[u8]) -> Result<Vec<Certificate>> {
    let mut reader = SliceReader::new(data).map_err(|e| Error::DecodeError(e.to_string()))?;
    let mut certs = Vec::new();
    while !reader.is_finished() {
        let cert =
            Certificate::decode(&mut reader).map_err(|e| Error::DecodeError(e.to_string()))?;
        certs.push(cert);
    }
    Ok(certs)
}

#[cfg(test)]
mod tests {
    use super::*;

    const P256_PEM: &[u8] = include_bytes!("../tests/data/p256.pem");
    const P256_KEY: &[u8] = include_bytes!("../tests/data/p256.key.pem");

    #[test]
    fn test_parse_chain_formats() {
        assert_eq!(parse_chain(P256_PEM).unwrap().len(), 1);

        let mut der = include_bytes!("../tests/data/p256.der").to_vec();
        der.extend_from_slice(include_bytes!("../tests/data/rsa.der"));
        let chain = parse_chain(&der).unwrap();
        assert_eq!(chain.len(), 2);
        assert_eq!(cert::common_name(&chain[1]), "rsa.example.com");
    }

    #[test]
    fn test_parse_chain_rejects_bad_input() {
        assert!(matches!(parse_chain(b""), Err(Error::DecodeError(_))));
        assert!(matches!(parse_chain(b"\n\n"), Err(Error::DecodeError(_))));
        assert!(matches!(
            parse_chain(&[0x30, 0x03, 0x01, 0x01]),
            Err(Error::DecodeError(_))
        ));
        assert!(matches!(
            parse_chain(b"-----BEGIN CERTIFICATE-----\nAAAA\n"),
            Err(Error::DecodeError(_))
        ));
        // A key file holds no certificate
        assert!(matches!(parse_chain(P256_KEY), Err(Error::DecodeError(_))));
    }

    #[test]
    fn test_parse_chain_skips_surrounding_text() {
        let mut pem = b"subject=CN=p256.example.com\nissuer=CN=p256.example.com\n".to_vec();
        pem.extend_from_slice(P256_PEM);
        pem.extend_from_slice(b"\nBag Attributes\n    friendlyName: rsa\n");
        pem.extend_from_slice(include_bytes!("../tests/data/rsa.pem"));
        pem.extend_from_slice(b"-- end of bundle --\n");

        let chain = parse_chain(&pem).unwrap();
        assert_eq!(chain.len(), 2);
        assert_eq!(cert::common_name(&chain[0]), "p256.example.com");
        assert_eq!(cert::common_name(&chain[1]), "rsa.example.com");
    }

    #[test]
    fn test_parse_chain_skips_key_sections() {
        let mut pem = P256_KEY.to_vec();
        pem.extend_from_slice(P256_PEM);
        assert_eq!(parse_chain(&pem).unwrap().len(), 1);
    }

    #[test]
    fn test_empty_chain_rejected() {
        let key = PrivateKey::from_pem(P256_KEY).unwrap();
        assert_eq!(make_self_cert(Vec::new(), key).unwrap_err(), Error::EmptyInput);
    }

    #[test]
    fn test_self_cert_accessors() {
        let self_cert = make_self_cert_from_pem(P256_PEM, P256_KEY).unwrap();
        assert_eq!(self_cert.key_type(), KeyType::P256);
        assert_eq!(self_cert.sig_schemes(), &[SignatureScheme::EcdsaSecp256r1Sha256]);
        assert_eq!(self_cert.identity(), "p256.example.com");
        assert_eq!(
            self_cert.alt_identities(),
            vec!["p256.example.com".to_string(), "alt.p256.example.com".to_string()]
        );
        assert_eq!(self_cert.chain().len(), 1);
        assert_eq!(self_cert.x509(), self_cert.chain().first());

        let debug = format!("{:?}", self_cert);
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_sign_rejects_foreign_scheme() {
        let self_cert = make_self_cert_from_pem(P256_PEM, P256_KEY).unwrap();
        assert_eq!(
            self_cert.sign(
                SignatureScheme::EcdsaSecp384r1Sha384,
                CertificateVerifyContext::Server,
                &[0; 32],
            ),
            Err(Error::UnsupportedSignatureScheme {
                scheme: SignatureScheme::EcdsaSecp384r1Sha384,
                key_type: KeyType::P256,
            })
        );
    }
}

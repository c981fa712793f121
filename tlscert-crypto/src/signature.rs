//! Signature schemes and certificate key types for TLS 1.3.

use core::fmt;

/// TLS 1.3 SignatureScheme values (RFC 8446 Section 4.2.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureScheme {
    // ECDSA
    /// ECDSA with P-256 and SHA-256
    EcdsaSecp256r1Sha256,
    /// ECDSA with P-384 and SHA-384
    EcdsaSecp384r1Sha384,
    /// ECDSA with P-521 and SHA-512
    EcdsaSecp521r1Sha512,

    // RSA-PSS with rsaEncryption public keys
    /// RSA-PSS with SHA-256
    RsaPssRsaeSha256,
    /// RSA-PSS with SHA-384
    RsaPssRsaeSha384,
    /// RSA-PSS with SHA-512
    RsaPssRsaeSha512,

    // EdDSA
    /// Ed25519
    Ed25519,
    /// Ed448
    Ed448,

    // RSA PKCS#1 v1.5 (legacy, only valid in certificates, never in CertificateVerify)
    /// RSA PKCS#1 v1.5 with SHA-256
    RsaPkcs1Sha256,
    /// RSA PKCS#1 v1.5 with SHA-384
    RsaPkcs1Sha384,
    /// RSA PKCS#1 v1.5 with SHA-512
    RsaPkcs1Sha512,
}

impl SignatureScheme {
    /// Get the IANA TLS SignatureScheme codepoint.
    pub const fn to_u16(self) -> u16 {
        match self {
            SignatureScheme::EcdsaSecp256r1Sha256 => 0x0403,
            SignatureScheme::EcdsaSecp384r1Sha384 => 0x0503,
            SignatureScheme::EcdsaSecp521r1Sha512 => 0x0603,
            SignatureScheme::RsaPssRsaeSha256 => 0x0804,
            SignatureScheme::RsaPssRsaeSha384 => 0x0805,
            SignatureScheme::RsaPssRsaeSha512 => 0x0806,
            SignatureScheme::Ed25519 => 0x0807,
            SignatureScheme::Ed448 => 0x0808,
            SignatureScheme::RsaPkcs1Sha256 => 0x0401,
            SignatureScheme::RsaPkcs1Sha384 => 0x0501,
            SignatureScheme::RsaPkcs1Sha512 => 0x0601,
        }
    }

    /// Create from IANA codepoint.
    pub const fn from_u16(value: u16) -> Option<Self> {
        match value {
            0x0403 => Some(SignatureScheme::EcdsaSecp256r1Sha256),
            0x0503 => Some(SignatureScheme::EcdsaSecp384r1Sha384),
            0x0603 => Some(SignatureScheme::EcdsaSecp521r1Sha512),
            0x0804 => Some(SignatureScheme::RsaPssRsaeSha256),
            0x0805 => Some(SignatureScheme::RsaPssRsaeSha384),
            0x0806 => Some(SignatureScheme::RsaPssRsaeSha512),
            0x0807 => Some(SignatureScheme::Ed25519),
            0x0808 => Some(SignatureScheme::Ed448),
            0x0401 => Some(SignatureScheme::RsaPkcs1Sha256),
            0x0501 => Some(SignatureScheme::RsaPkcs1Sha384),
            0x0601 => Some(SignatureScheme::RsaPkcs1Sha512),
            _ => None,
        }
    }

    /// Get the IANA name of the scheme.
    pub const fn name(self) -> &'static str {
        match self {
            SignatureScheme::EcdsaSecp256r1Sha256 => "ecdsa_secp256r1_sha256",
            SignatureScheme::EcdsaSecp384r1Sha384 => "ecdsa_secp384r1_sha384",
            SignatureScheme::EcdsaSecp521r1Sha512 => "ecdsa_secp521r1_sha512",
            SignatureScheme::RsaPssRsaeSha256 => "rsa_pss_rsae_sha256",
            SignatureScheme::RsaPssRsaeSha384 => "rsa_pss_rsae_sha384",
            SignatureScheme::RsaPssRsaeSha512 => "rsa_pss_rsae_sha512",
            SignatureScheme::Ed25519 => "ed25519",
            SignatureScheme::Ed448 => "ed448",
            SignatureScheme::RsaPkcs1Sha256 => "rsa_pkcs1_sha256",
            SignatureScheme::RsaPkcs1Sha384 => "rsa_pkcs1_sha384",
            SignatureScheme::RsaPkcs1Sha512 => "rsa_pkcs1_sha512",
        }
    }

    /// Check if this scheme may appear in a TLS 1.3 CertificateVerify.
    ///
    /// TLS 1.3 forbids RSA PKCS#1 v1.5 signatures.
    pub const fn allowed_in_tls13(self) -> bool {
        !matches!(
            self,
            SignatureScheme::RsaPkcs1Sha256
                | SignatureScheme::RsaPkcs1Sha384
                | SignatureScheme::RsaPkcs1Sha512
        )
    }
}

impl fmt::Display for SignatureScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Key types a certificate can be classified as.
///
/// The set is closed: a certificate whose key is not one of these is
/// rejected rather than mapped to a catch-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// RSA (rsaEncryption)
    Rsa,
    /// ECDSA on secp256r1
    P256,
    /// ECDSA on secp384r1
    P384,
    /// ECDSA on secp521r1
    P521,
}

impl KeyType {
    /// All key types, in a stable order.
    pub const ALL: [KeyType; 4] = [KeyType::Rsa, KeyType::P256, KeyType::P384, KeyType::P521];

    /// Signature schemes usable with this key type in a TLS 1.3 CertificateVerify,
    /// in order of preference.
    pub const fn sig_schemes(self) -> &'static [SignatureScheme] {
        match self {
            KeyType::Rsa => &[
                SignatureScheme::RsaPssRsaeSha256,
                SignatureScheme::RsaPssRsaeSha384,
                SignatureScheme::RsaPssRsaeSha512,
            ],
            KeyType::P256 => &[SignatureScheme::EcdsaSecp256r1Sha256],
            KeyType::P384 => &[SignatureScheme::EcdsaSecp384r1Sha384],
            KeyType::P521 => &[SignatureScheme::EcdsaSecp521r1Sha512],
        }
    }

    /// Check whether `scheme` can be produced or verified with this key type.
    pub fn supports(self, scheme: SignatureScheme) -> bool {
        self.sig_schemes().contains(&scheme)
    }

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            KeyType::Rsa => "RSA",
            KeyType::P256 => "P-256",
            KeyType::P384 => "P-384",
            KeyType::P521 => "P-521",
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

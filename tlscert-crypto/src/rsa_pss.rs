//! RSA-PSS for rsaEncryption keys (`rsa_pss_rsae_*`).
//!
//! The salt length is the digest length, as RFC 8446 Section 4.2.3 requires.

use crate::algorithm::KeyAlgorithm;
use crate::error::{Error, Result};
use crate::signature::{KeyType, SignatureScheme};
use rand::rngs::OsRng;
use rsa::{BigUint, Pss, RsaPrivateKey, RsaPublicKey};
use sha2::digest::DynDigest;
use sha2::{Digest, Sha256, Sha384, Sha512};

/// Largest accepted RSA modulus, in bits.
///
/// `rsa` caps public keys at 4096 bits by default; peers and local
/// certificates may carry larger keys.
pub const MAX_RSA_MODULUS_BITS: usize = 16384;

/// RSA with PSS padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rsa;

impl KeyAlgorithm for Rsa {
    const KEY_TYPE: KeyType = KeyType::Rsa;

    type PublicKey = RsaPublicKey;
    type PrivateKey = RsaPrivateKey;

    fn decode_public_key(subject_public_key: &[u8]) -> Result<Self::PublicKey> {
        let key = rsa::pkcs1::RsaPublicKey::try_from(subject_public_key)
            .map_err(|e| Error::InvalidPublicKey(format!("RSA public key: {}", e)))?;

        RsaPublicKey::new_with_max_size(
            BigUint::from_bytes_be(key.modulus.as_bytes()),
            BigUint::from_bytes_be(key.public_exponent.as_bytes()),
            MAX_RSA_MODULUS_BITS,
        )
        .map_err(|e| Error::InvalidPublicKey(format!("RSA public key: {}", e)))
    }

    fn public_key(private_key: &Self::PrivateKey) -> Self::PublicKey {
        private_key.to_public_key()
    }

    fn same_public_key(a: &Self::PublicKey, b: &Self::PublicKey) -> bool {
        a == b
    }

    fn sign(
        private_key: &Self::PrivateKey,
        scheme: SignatureScheme,
        message: &[u8],
    ) -> Result<Vec<u8>> {
        Self::check_scheme(scheme)?;

        match scheme {
            SignatureScheme::RsaPssRsaeSha256 => pss_sign::<Sha256>(private_key, message),
            SignatureScheme::RsaPssRsaeSha384 => pss_sign::<Sha384>(private_key, message),
            SignatureScheme::RsaPssRsaeSha512 => pss_sign::<Sha512>(private_key, message),
            other => Err(Error::UnsupportedScheme {
                scheme: other.name(),
                key_type: Self::KEY_TYPE.name(),
            }),
        }
    }

    fn verify(
        public_key: &Self::PublicKey,
        scheme: SignatureScheme,
        message: &[u8],
        signature: &[u8],
    ) -> Result<()> {
        Self::check_scheme(scheme)?;

        match scheme {
            SignatureScheme::RsaPssRsaeSha256 => pss_verify::<Sha256>(public_key, message, signature),
            SignatureScheme::RsaPssRsaeSha384 => pss_verify::<Sha384>(public_key, message, signature),
            SignatureScheme::RsaPssRsaeSha512 => pss_verify::<Sha512>(public_key, message, signature),
            other => Err(Error::UnsupportedScheme {
                scheme: other.name(),
                key_type: Self::KEY_TYPE.name(),
            }),
        }
    }
}

fn pss_sign<D>(private_key: &RsaPrivateKey, message: &[u8]) -> Result<Vec<u8>>
where
    D: 'static + Digest + DynDigest + Send + Sync,
{
    let hashed = D::digest(message);
    private_key
        .sign_with_rng(&mut OsRng, Pss::new::<D>(), &hashed)
        .map_err(|e| Error::SigningFailed(format!("RSA-PSS: {}", e)))
}

fn pss_verify<D>(public_key: &RsaPublicKey, message: &[u8], signature: &[u8]) -> Result<()>
where
    D: 'static + Digest + DynDigest + Send + Sync,
{
    let hashed = D::digest(message);
    public_key
        .verify(Pss::new::<D>(), &hashed, signature)
        .map_err(|_| Error::SignatureVerificationFailed)
}

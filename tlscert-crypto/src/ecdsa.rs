//! ECDSA over the NIST curves.
//!
//! Signatures travel as ASN.1 DER `Ecdsa-Sig-Value` in TLS, and the digest is
//! fixed by the curve: SHA-256 for P-256, SHA-384 for P-384, SHA-512 for P-521.

use crate::algorithm::KeyAlgorithm;
use crate::error::{Error, Result};
use crate::signature::{KeyType, SignatureScheme};
use p256::ecdsa::signature::{Signer, Verifier};

macro_rules! ecdsa_algorithm {
    ($(#[$meta:meta])* $name:ident, $curve:ident, $key_type:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name;

        impl KeyAlgorithm for $name {
            const KEY_TYPE: KeyType = $key_type;

            type PublicKey = $curve::ecdsa::VerifyingKey;
            type PrivateKey = $curve::ecdsa::SigningKey;

            fn decode_public_key(subject_public_key: &[u8]) -> Result<Self::PublicKey> {
                $curve::ecdsa::VerifyingKey::from_sec1_bytes(subject_public_key).map_err(|e| {
                    Error::InvalidPublicKey(format!("{} point: {}", Self::KEY_TYPE, e))
                })
            }

            fn public_key(private_key: &Self::PrivateKey) -> Self::PublicKey {
                $curve::ecdsa::VerifyingKey::from(private_key)
            }

            fn same_public_key(a: &Self::PublicKey, b: &Self::PublicKey) -> bool {
                a.to_encoded_point(false) == b.to_encoded_point(false)
            }

            fn sign(
                private_key: &Self::PrivateKey,
                scheme: SignatureScheme,
                message: &[u8],
            ) -> Result<Vec<u8>> {
                Self::check_scheme(scheme)?;

                let signature: $curve::ecdsa::Signature = private_key
                    .try_sign(message)
                    .map_err(|e| Error::SigningFailed(format!("{}: {}", scheme, e)))?;

                Ok(signature.to_der().as_bytes().to_vec())
            }

            fn verify(
                public_key: &Self::PublicKey,
                scheme: SignatureScheme,
                message: &[u8],
                signature: &[u8],
            ) -> Result<()> {
                Self::check_scheme(scheme)?;

                let signature = $curve::ecdsa::Signature::from_der(signature)
                    .map_err(|_| Error::InvalidSignature)?;

                public_key
                    .verify(message, &signature)
                    .map_err(|_| Error::SignatureVerificationFailed)
            }
        }
    };
}

ecdsa_algorithm!(
    /// ECDSA P-256 (secp256r1) with SHA-256.
    EcdsaP256,
    p256,
    KeyType::P256
);

ecdsa_algorithm!(
    /// ECDSA P-384 (secp384r1) with SHA-384.
    EcdsaP384,
    p384,
    KeyType::P384
);

ecdsa_algorithm!(
    /// ECDSA P-521 (secp521r1) with SHA-512.
    EcdsaP521,
    p521,
    KeyType::P521
);

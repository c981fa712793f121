//! Per-algorithm sign/verify primitives.
//!
//! Each certificate key type has a zero-sized marker implementing
//! [`KeyAlgorithm`]. Certificate objects are generic over the marker, so the
//! key representation and the signature primitive are fixed at compile time
//! once a certificate has been classified.

use crate::error::{Error, Result};
use crate::signature::{KeyType, SignatureScheme};

/// Signing and verification for one certificate key type.
pub trait KeyAlgorithm: Send + Sync + 'static {
    /// Key type implemented by this algorithm.
    const KEY_TYPE: KeyType;

    /// Decoded public key.
    type PublicKey: Clone + Send + Sync;

    /// Decoded private key.
    type PrivateKey: Send + Sync;

    /// Decode the `subjectPublicKey` BIT STRING contents of a certificate.
    ///
    /// # Errors
    ///
    /// - `InvalidPublicKey` if the bytes are not a valid key for this algorithm
    fn decode_public_key(subject_public_key: &[u8]) -> Result<Self::PublicKey>;

    /// Derive the public half of a private key.
    fn public_key(private_key: &Self::PrivateKey) -> Self::PublicKey;

    /// Compare two public keys.
    fn same_public_key(a: &Self::PublicKey, b: &Self::PublicKey) -> bool;

    /// Sign `message` with `scheme`.
    ///
    /// `message` is the full signed content; hashing is done by the scheme.
    ///
    /// # Errors
    ///
    /// - `UnsupportedScheme` if `scheme` is not valid for this key type
    /// - `SigningFailed` if the primitive fails
    fn sign(
        private_key: &Self::PrivateKey,
        scheme: SignatureScheme,
        message: &[u8],
    ) -> Result<Vec<u8>>;

    /// Verify `signature` over `message` with `scheme`.
    ///
    /// # Errors
    ///
    /// - `UnsupportedScheme` if `scheme` is not valid for this key type
    /// - `InvalidSignature` if the signature cannot be decoded
    /// - `SignatureVerificationFailed` if the signature does not match
    fn verify(
        public_key: &Self::PublicKey,
        scheme: SignatureScheme,
        message: &[u8],
        signature: &[u8],
    ) -> Result<()>;

    /// Reject schemes that do not belong to this key type.
    fn check_scheme(scheme: SignatureScheme) -> Result<()> {
        if Self::KEY_TYPE.supports(scheme) {
            Ok(())
        } else {
            Err(Error::UnsupportedScheme {
                scheme: scheme.name(),
                key_type: Self::KEY_TYPE.name(),
            })
        }
    }
}

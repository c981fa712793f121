//! # tlscert signature primitives
//!
//! Key types, signature schemes and the sign/verify primitives used by the
//! certificate layer in `tlscert-core`.
//!
//! ## Architecture
//!
//! ```text
//! KeyAlgorithm (per key type, static dispatch)
//! ├── Rsa        (RSA-PSS, rsa_pss_rsae_sha256/384/512)
//! ├── EcdsaP256  (ecdsa_secp256r1_sha256)
//! ├── EcdsaP384  (ecdsa_secp384r1_sha384)
//! └── EcdsaP521  (ecdsa_secp521r1_sha512)
//! ```
//!
//! [`PrivateKey`] decodes PKCS#8, PKCS#1 and SEC1 keys into one of the four
//! supported key types.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use tlscert_crypto::{EcdsaP256, KeyAlgorithm, PrivateKey, SignatureScheme};
//!
//! let key = PrivateKey::from_pem(pem_bytes)?;
//! if let PrivateKey::P256(key) = key {
//!     let sig = EcdsaP256::sign(&key, SignatureScheme::EcdsaSecp256r1Sha256, message)?;
//!     EcdsaP256::verify(&EcdsaP256::public_key(&key), SignatureScheme::EcdsaSecp256r1Sha256, message, &sig)?;
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    unused_qualifications,
    missing_debug_implementations
)]

pub mod algorithm;
pub mod ecdsa;
pub mod error;
pub mod private_key;
pub mod rsa_pss;
pub mod signature;

pub use algorithm::KeyAlgorithm;
pub use ecdsa::{EcdsaP256, EcdsaP384, EcdsaP521};
pub use error::{Error, Result};
pub use private_key::PrivateKey;
pub use rsa_pss::{Rsa, MAX_RSA_MODULUS_BITS};
pub use signature::{KeyType, SignatureScheme};

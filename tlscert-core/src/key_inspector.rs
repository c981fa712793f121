//! Classification of certificate public keys.
//!
//! Maps a SubjectPublicKeyInfo onto the closed [`KeyType`] set. Anything that
//! is not `rsaEncryption` or `id-ecPublicKey` on one of the three NIST curves
//! is rejected, including RSA-PSS-only keys and EdDSA keys.

use crate::error::{Error, Result};
use const_oid::db::rfc5912::{
    ID_EC_PUBLIC_KEY, RSA_ENCRYPTION, SECP_256_R_1, SECP_384_R_1, SECP_521_R_1,
};
use const_oid::ObjectIdentifier;
use spki::SubjectPublicKeyInfoOwned;
use tlscert_crypto::KeyType;

/// Determine the key type of a public key.
///
/// RSA keys are accepted regardless of modulus size.
///
/// # Errors
///
/// - `UnsupportedKeyType` if the algorithm or curve is not supported, or if
///   an EC key does not name its curve
pub fn classify(spki: &SubjectPublicKeyInfoOwned) -> Result<KeyType> {
    let algorithm = spki.algorithm.oid;

    if algorithm == RSA_ENCRYPTION {
        return Ok(KeyType::Rsa);
    }

    if algorithm != ID_EC_PUBLIC_KEY {
        return Err(Error::UnsupportedKeyType(format!("algorithm {}", algorithm)));
    }

    let curve = spki
        .algorithm
        .parameters
        .as_ref()
        .and_then(|params| params.decode_as::<ObjectIdentifier>().ok())
        .ok_or_else(|| Error::UnsupportedKeyType("EC key without named curve".into()))?;

    curve_key_type(curve)
}

fn curve_key_type(curve: ObjectIdentifier) -> Result<KeyType> {
    if curve == SECP_256_R_1 {
        Ok(KeyType::P256)
    } else if curve == SECP_384_R_1 {
        Ok(KeyType::P384)
    } else if curve == SECP_521_R_1 {
        Ok(KeyType::P521)
    } else {
        Err(Error::UnsupportedKeyType(format!("curve {}", curve)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use der::asn1::BitString;
    use der::{Any, Decode};
    use spki::AlgorithmIdentifierOwned;
    use x509_cert::Certificate;

    fn spki_of(der: &[u8]) -> SubjectPublicKeyInfoOwned {
        Certificate::from_der(der)
            .unwrap()
            .tbs_certificate
            .subject_public_key_info
    }

    fn ec_spki(params: Option<Any>) -> SubjectPublicKeyInfoOwned {
        SubjectPublicKeyInfoOwned {
            algorithm: AlgorithmIdentifierOwned {
                oid: ID_EC_PUBLIC_KEY,
                parameters: params,
            },
            subject_public_key: BitString::from_bytes(&[0x04]).unwrap(),
        }
    }

    #[test]
    fn test_classify_certificates() {
        let cases: [(&[u8], KeyType); 4] = [
            (include_bytes!("../tests/data/rsa.der"), KeyType::Rsa),
            (include_bytes!("../tests/data/p256.der"), KeyType::P256),
            (include_bytes!("../tests/data/p384.der"), KeyType::P384),
            (include_bytes!("../tests/data/p521.der"), KeyType::P521),
        ];
        for (der, expected) in cases {
            assert_eq!(classify(&spki_of(der)).unwrap(), expected);
        }
    }

    #[test]
    fn test_classify_unsupported_certificates() {
        for der in [
            &include_bytes!("../tests/data/p192.der")[..],
            &include_bytes!("../tests/data/ed25519.der")[..],
        ] {
            assert!(matches!(
                classify(&spki_of(der)),
                Err(Error::UnsupportedKeyType(_))
            ));
        }
    }

    #[test]
    fn test_ec_without_named_curve() {
        assert!(matches!(
            classify(&ec_spki(None)),
            Err(Error::UnsupportedKeyType(_))
        ));
        assert!(matches!(
            classify(&ec_spki(Some(Any::null()))),
            Err(Error::UnsupportedKeyType(_))
        ));
    }

    #[test]
    fn test_ec_named_curve_parameter() {
        let params = Any::encode_from(&SECP_384_R_1).unwrap();
        assert_eq!(classify(&ec_spki(Some(params))).unwrap(), KeyType::P384);
    }
}

//! Peer Certificate Integration Tests
//!
//! Parses OpenSSL-generated certificates the way they arrive in a peer's
//! Certificate message and checks the resulting key classification.
//!
//! Tests verify:
//! - Key type classification for RSA, P-256, P-384 and P-521
//! - RSA keys above 4096 bits (RSA-8192)
//! - MissingPublicKey for a key that does not decode
//! - Rejection of P-192 and Ed25519 certificates
//! - Rejection of empty, garbage and PEM input
//! - Identity extraction after a Certificate message round trip

use tlscert_core::{
    build_certificate_message, make_peer_cert, Cert, CertificateMsg, Error, KeyType, PeerCert,
};
use x509_cert::der::Decode;
use x509_cert::Certificate;

const RSA_CERT: &[u8] = include_bytes!("data/rsa.der");
const P256_CERT: &[u8] = include_bytes!("data/p256.der");
const P384_CERT: &[u8] = include_bytes!("data/p384.der");
const P521_CERT: &[u8] = include_bytes!("data/p521.der");
const P192_CERT: &[u8] = include_bytes!("data/p192.der");
const ED25519_CERT: &[u8] = include_bytes!("data/ed25519.der");
const P256_CERT_PEM: &[u8] = include_bytes!("data/p256.pem");
const RSA_8192_CERT: &[u8] = include_bytes!("data/rsa8192.der");
// p256.der with the SEC1 point tag 0x04 replaced by 0x05
const P256_BAD_POINT_CERT: &[u8] = include_bytes!("data/p256-badpoint.der");

/// Test that each supported certificate maps to the matching variant
#[test]
fn test_peer_cert_key_types() {
    let cases = [
        (RSA_CERT, KeyType::Rsa, "rsa.example.com"),
        (P256_CERT, KeyType::P256, "p256.example.com"),
        (P384_CERT, KeyType::P384, "p384.example.com"),
        (P521_CERT, KeyType::P521, "p521.example.com"),
    ];

    for (der, key_type, identity) in cases {
        let peer = make_peer_cert(der).expect("Failed to parse peer certificate");
        assert_eq!(peer.key_type(), key_type);
        assert_eq!(peer.identity(), identity);

        let variant_matches = matches!(
            (&peer, key_type),
            (PeerCert::Rsa(_), KeyType::Rsa)
                | (PeerCert::P256(_), KeyType::P256)
                | (PeerCert::P384(_), KeyType::P384)
                | (PeerCert::P521(_), KeyType::P521)
        );
        assert!(variant_matches, "wrong variant for {}", key_type);
    }
}

/// Test that an 8192-bit RSA certificate is accepted
#[test]
fn test_peer_cert_rsa_8192() {
    let peer = make_peer_cert(RSA_8192_CERT).expect("Failed to parse RSA-8192 certificate");
    assert_eq!(peer.key_type(), KeyType::Rsa);
    assert_eq!(peer.identity(), "rsa8192.example.com");
    assert!(matches!(peer, PeerCert::Rsa(_)));
}

/// Test that a classified key whose bits do not decode is reported as missing
#[test]
fn test_peer_cert_undecodable_key() {
    let err = make_peer_cert(P256_BAD_POINT_CERT).unwrap_err();
    assert_eq!(err, Error::MissingPublicKey);
    assert_eq!(err.alert(), tlscert_core::AlertDescription::BadCertificate);
}

/// Test that keys outside the supported set are rejected
#[test]
fn test_peer_cert_unsupported_keys() {
    for der in [P192_CERT, ED25519_CERT] {
        let err = make_peer_cert(der).unwrap_err();
        assert!(matches!(err, Error::UnsupportedKeyType(_)), "got {:?}", err);
        assert_eq!(err.alert(), tlscert_core::AlertDescription::UnsupportedCertificate);
    }
}

/// Test rejection of input that is not one DER certificate
#[test]
fn test_peer_cert_malformed_input() {
    assert_eq!(make_peer_cert(&[]).unwrap_err(), Error::EmptyInput);
    assert!(matches!(
        make_peer_cert(b"certificate"),
        Err(Error::DecodeError(_))
    ));
    assert!(matches!(
        make_peer_cert(P256_CERT_PEM),
        Err(Error::DecodeError(_))
    ));
    // A bare SEQUENCE header claiming more content than supplied
    assert!(matches!(
        make_peer_cert(&[0x30, 0x82, 0x01, 0x00, 0x30]),
        Err(Error::DecodeError(_))
    ));
}

/// Test that the identity survives encoding into a Certificate message
#[test]
fn test_identity_round_trip_through_certificate_message() {
    for der in [RSA_CERT, P256_CERT, P384_CERT, P521_CERT] {
        let cert = Certificate::from_der(der).expect("Failed to decode certificate");
        let expected = make_peer_cert(der).unwrap().identity();

        let msg = build_certificate_message(&[cert], Vec::new())
            .expect("Failed to build Certificate message");
        let wire = msg.encode().expect("Failed to encode Certificate message");
        let decoded = CertificateMsg::decode(&wire).expect("Failed to decode Certificate message");

        assert_eq!(decoded.certificate_list.len(), 1);
        let peer = make_peer_cert(&decoded.certificate_list[0].cert_data)
            .expect("Failed to parse round-tripped certificate");
        assert_eq!(peer.identity(), expected);
        assert_eq!(decoded.certificate_list[0].cert_data, der);
    }
}

/// Test that peer certificates can be shared across threads
#[test]
fn test_peer_cert_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PeerCert>();

    let peer = std::sync::Arc::new(make_peer_cert(P384_CERT).unwrap());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let peer = peer.clone();
            std::thread::spawn(move || peer.identity())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), "p384.example.com");
    }
}

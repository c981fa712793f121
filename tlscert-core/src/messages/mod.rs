//! TLS 1.3 authentication messages.
//!
//! Wire formats for the `Certificate` (RFC 8446 Section 4.4.2) and
//! `CertificateVerify` (RFC 8446 Section 4.4.3) handshake message bodies.

pub mod certificate;
pub mod certificate_verify;
pub mod extensions;

// Re-exports
pub use certificate::{build_certificate_message, CertificateEntry, CertificateMsg};
pub use certificate_verify::CertificateVerify;
pub use extensions::{Extension, Extensions};

//! CertificateVerify signing context (RFC 8446 Section 4.4.3).
//!
//! The signature in a CertificateVerify message is not computed over the
//! transcript hash directly but over the following structure:
//!
//! ```text
//! "                                " (64 spaces)
//! "TLS 1.3, server CertificateVerify" (or "TLS 1.3, client CertificateVerify")
//! 0x00
//! transcript_hash
//! ```
//!
//! The leading padding and the context string keep a TLS 1.3 signature from
//! being valid in any earlier protocol version or in the other direction.

use core::fmt;

/// Context string for server CertificateVerify signatures.
const SERVER_CONTEXT: &[u8] = b"TLS 1.3, server CertificateVerify";

/// Context string for client CertificateVerify signatures.
const CLIENT_CONTEXT: &[u8] = b"TLS 1.3, client CertificateVerify";

/// Padding for signature messages (64 spaces).
const SIGNATURE_PADDING: [u8; 64] = [0x20; 64];

/// Which side of the handshake produced a CertificateVerify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CertificateVerifyContext {
    /// Signature sent by the server
    Server,
    /// Signature sent by the client
    Client,
}

impl CertificateVerifyContext {
    /// The ASCII label for this context, without a terminator.
    pub const fn label(self) -> &'static [u8] {
        match self {
            CertificateVerifyContext::Server => SERVER_CONTEXT,
            CertificateVerifyContext::Client => CLIENT_CONTEXT,
        }
    }
}

impl fmt::Display for CertificateVerifyContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CertificateVerifyContext::Server => f.write_str("server"),
            CertificateVerifyContext::Client => f.write_str("client"),
        }
    }
}

/// Build the signature message for CertificateVerify.
///
/// # Format (RFC 8446 Section 4.4.3)
///
/// ```text
/// message = padding || label || 0x00 || to_be_signed
/// where:
///   padding = 64 spaces (0x20)
///   label   = "TLS 1.3, server CertificateVerify" or "TLS 1.3, client CertificateVerify"
/// ```
///
/// `to_be_signed` is copied verbatim; it is normally the transcript hash but
/// this function places no constraint on its length.
pub fn build_signature_message(context: CertificateVerifyContext, to_be_signed: &[u8]) -> Vec<u8> {
    let label = context.label();

    let mut message = Vec::with_capacity(SIGNATURE_PADDING.len() + label.len() + 1 + to_be_signed.len());
    message.extend_from_slice(&SIGNATURE_PADDING);
    message.extend_from_slice(label);
    message.push(0x00);
    message.extend_from_slice(to_be_signed);

    tracing::trace!(
        "Built {} CertificateVerify context over {} bytes",
        context,
        to_be_signed.len()
    );

    message
}

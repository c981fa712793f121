//! CertificateVerify message (RFC 8446 Section 4.4.3).

use crate::error::{Error, Result};
use bytes::{Buf, BufMut, BytesMut};
use tlscert_crypto::SignatureScheme;

/// CertificateVerify message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateVerify {
    /// Signature scheme
    pub scheme: SignatureScheme,

    /// Signature
    pub signature: Vec<u8>,
}

impl CertificateVerify {
    /// Create a new CertificateVerify message.
    pub fn new(scheme: SignatureScheme, signature: Vec<u8>) -> Self {
        Self { scheme, signature }
    }

    /// Encode to bytes.
    pub fn encode(&self) -> Result<Vec<u8>> {
        if self.signature.len() > 0xFFFF {
            return Err(Error::InvalidMessage("Signature too large".into()));
        }
        let mut buf = BytesMut::with_capacity(4 + self.signature.len());
        buf.put_u16(self.scheme.to_u16());
        buf.put_u16(self.signature.len() as u16);
        buf.put_slice(&self.signature);
        Ok(buf.to_vec())
    }

    /// Decode from bytes.
    pub fn decode(mut data: &[u8]) -> Result<Self> {
        if data.len() < 4 {
            return Err(Error::InvalidMessage("CertificateVerify too short".into()));
        }
        let scheme_raw = data.get_u16();
        let scheme = SignatureScheme::from_u16(scheme_raw).ok_or_else(|| {
            Error::InvalidMessage(format!("Unknown signature scheme: {:#06x}", scheme_raw))
        })?;
        let sig_len = data.get_u16() as usize;
        if data.len() != sig_len {
            return Err(Error::InvalidMessage("Signature length mismatch".into()));
        }
        Ok(Self {
            scheme,
            signature: data.to_vec(),
        })
    }
}

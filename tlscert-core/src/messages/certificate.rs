//! Certificate message (RFC 8446 Section 4.4.2).
//!
//! ```text
//! struct {
//!     opaque cert_data<1..2^24-1>;
//!     Extension extensions<0..2^16-1>;
//! } CertificateEntry;
//!
//! struct {
//!     opaque certificate_request_context<0..2^8-1>;
//!     CertificateEntry certificate_list<0..2^24-1>;
//! } Certificate;
//! ```

use crate::error::{Error, Result};
use crate::messages::extensions::Extensions;
use bytes::{Buf, BufMut, BytesMut};
use der::Encode;
use x509_cert::Certificate;

const MAX_U24: usize = 0xFF_FFFF;

/// Certificate entry with extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateEntry {
    /// Certificate data (DER-encoded X.509)
    pub cert_data: Vec<u8>,

    /// Extensions for this certificate
    pub extensions: Extensions,
}

impl CertificateEntry {
    /// Create an entry with no extensions.
    pub fn new(cert_data: Vec<u8>) -> Self {
        Self {
            cert_data,
            extensions: Extensions::new(),
        }
    }
}

/// Certificate message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertificateMsg {
    /// Certificate request context (empty for server authentication)
    pub certificate_request_context: Vec<u8>,

    /// Certificate chain, end-entity first
    pub certificate_list: Vec<CertificateEntry>,
}

/// Build a Certificate message from a certificate chain.
///
/// Each certificate becomes one entry with an empty extension list, in input
/// order. `request_context` is carried over unchanged.
///
/// # Errors
///
/// - `EncodingError` if any certificate cannot be DER-encoded
pub fn build_certificate_message(
    certs: &[Certificate],
    request_context: Vec<u8>,
) -> Result<CertificateMsg> {
    let certificate_list = certs
        .iter()
        .map(|cert| {
            cert.to_der()
                .map(CertificateEntry::new)
                .map_err(|e| Error::EncodingError(e.to_string()))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CertificateMsg {
        certificate_request_context: request_context,
        certificate_list,
    })
}

impl CertificateMsg {
    /// Create a new Certificate message from DER certificates, with an empty
    /// request context.
    pub fn new(cert_list: Vec<Vec<u8>>) -> Self {
        Self {
            certificate_request_context: Vec::new(),
            certificate_list: cert_list.into_iter().map(CertificateEntry::new).collect(),
        }
    }

    /// Encode to bytes.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut buf = BytesMut::new();

        if self.certificate_request_context.len() > 255 {
            return Err(Error::InvalidMessage("Context too long".into()));
        }
        buf.put_u8(self.certificate_request_context.len() as u8);
        buf.put_slice(&self.certificate_request_context);

        let mut cert_list_buf = BytesMut::new();
        for entry in &self.certificate_list {
            if entry.cert_data.is_empty() {
                return Err(Error::InvalidMessage("Empty certificate".into()));
            }
            if entry.cert_data.len() > MAX_U24 {
                return Err(Error::InvalidMessage("Certificate too large".into()));
            }
            cert_list_buf.put_uint(entry.cert_data.len() as u64, 3);
            cert_list_buf.put_slice(&entry.cert_data);
            entry.extensions.encode(&mut cert_list_buf)?;
        }

        if cert_list_buf.len() > MAX_U24 {
            return Err(Error::InvalidMessage("Certificate list too large".into()));
        }
        buf.put_uint(cert_list_buf.len() as u64, 3);
        buf.put_slice(&cert_list_buf);

        Ok(buf.to_vec())
    }

    /// Decode from bytes.
    ///
    /// The whole input must be consumed.
    pub fn decode(mut data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::InvalidMessage("Certificate too short".into()));
        }

        // Certificate request context
        let ctx_len = data.get_u8() as usize;
        if data.len() < ctx_len {
            return Err(Error::InvalidMessage("Incomplete context".into()));
        }
        let certificate_request_context = data[..ctx_len].to_vec();
        data.advance(ctx_len);

        // Certificate list
        if data.len() < 3 {
            return Err(Error::InvalidMessage("Missing cert list length".into()));
        }
        let list_len = data.get_uint(3) as usize;
        if data.len() != list_len {
            return Err(Error::InvalidMessage("Cert list length mismatch".into()));
        }

        let mut certificate_list = Vec::new();
        while data.has_remaining() {
            if data.len() < 3 {
                return Err(Error::InvalidMessage("Missing cert length".into()));
            }
            let cert_len = data.get_uint(3) as usize;
            if cert_len == 0 {
                return Err(Error::InvalidMessage("Empty certificate".into()));
            }
            if data.len() < cert_len {
                return Err(Error::InvalidMessage("Incomplete cert data".into()));
            }
            let cert_data = data[..cert_len].to_vec();
            data.advance(cert_len);

            let (extensions, consumed) = Extensions::decode(data)?;
            data.advance(consumed);

            certificate_list.push(CertificateEntry {
                cert_data,
                extensions,
            });
        }

        Ok(Self {
            certificate_request_context,
            certificate_list,
        })
    }
}

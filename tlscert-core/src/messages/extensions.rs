//! Per-entry extension blocks of a Certificate message.
//!
//! Extension types are kept as raw codepoints; interpreting them (OCSP status,
//! SCTs) belongs to the handshake engine.

use crate::error::{Error, Result};
use bytes::{Buf, BufMut, BytesMut};

/// A single extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    /// Extension type codepoint
    pub extension_type: u16,

    /// Extension data
    pub data: Vec<u8>,
}

impl Extension {
    /// Create a new extension.
    pub fn new(extension_type: u16, data: Vec<u8>) -> Self {
        Self {
            extension_type,
            data,
        }
    }
}

/// Extension list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extensions {
    extensions: Vec<Extension>,
}

impl Extensions {
    /// Create a new empty extension list.
    pub fn new() -> Self {
        Self {
            extensions: Vec::new(),
        }
    }

    /// Add an extension.
    pub fn add(&mut self, extension: Extension) {
        self.extensions.push(extension);
    }

    /// Get an extension by type.
    pub fn get(&self, extension_type: u16) -> Option<&Extension> {
        self.extensions
            .iter()
            .find(|e| e.extension_type == extension_type)
    }

    /// Number of extensions.
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Iterate over the extensions in wire order.
    pub fn iter(&self) -> impl Iterator<Item = &Extension> {
        self.extensions.iter()
    }

    /// Encode all extensions with a 2-byte total length prefix.
    pub fn encode(&self, buf: &mut BytesMut) -> Result<()> {
        let mut body = BytesMut::new();
        for ext in &self.extensions {
            if ext.data.len() > 0xFFFF {
                return Err(Error::InvalidMessage("Extension too large".into()));
            }
            body.put_u16(ext.extension_type);
            body.put_u16(ext.data.len() as u16);
            body.put_slice(&ext.data);
        }

        if body.len() > 0xFFFF {
            return Err(Error::InvalidMessage("Extensions too large".into()));
        }
        buf.put_u16(body.len() as u16);
        buf.put_slice(&body);
        Ok(())
    }

    /// Decode an extension block, returning it with the number of bytes consumed.
    pub fn decode(data: &[u8]) -> Result<(Self, usize)> {
        let mut cursor = data;
        if cursor.len() < 2 {
            return Err(Error::InvalidMessage("Extensions too short".into()));
        }

        let total_length = cursor.get_u16() as usize;
        if cursor.len() < total_length {
            return Err(Error::InvalidMessage("Incomplete extensions".into()));
        }

        let mut block = &cursor[..total_length];
        let mut extensions = Vec::new();
        while block.has_remaining() {
            if block.len() < 4 {
                return Err(Error::InvalidMessage("Extension too short".into()));
            }
            let extension_type = block.get_u16();
            let length = block.get_u16() as usize;
            if block.len() < length {
                return Err(Error::InvalidMessage("Incomplete extension data".into()));
            }
            extensions.push(Extension::new(extension_type, block[..length].to_vec()));
            block.advance(length);
        }

        Ok((Self { extensions }, 2 + total_length))
    }
}

impl From<Vec<Extension>> for Extensions {
    fn from(extensions: Vec<Extension>) -> Self {
        Self { extensions }
    }
}

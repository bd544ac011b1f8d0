//! Node identifiers and their six wire forms.
//!
//! The first byte selects the form; in an [`ExpandedNodeId`] its two high
//! bits also flag a namespace URI and a server index following the id.

use std::fmt;

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::{BinaryDecode, BinaryEncode, ByteString, CodecError, Guid};

const TWO_BYTE: u8 = 0x00;
const FOUR_BYTE: u8 = 0x01;
const NUMERIC: u8 = 0x02;
const STRING: u8 = 0x03;
const GUID: u8 = 0x04;
const OPAQUE: u8 = 0x05;

const NAMESPACE_URI_FLAG: u8 = 0x80;
const SERVER_INDEX_FLAG: u8 = 0x40;
const FORM_MASK: u8 = 0x3F;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Identifier {
    Numeric(u32),
    String(String),
    Guid(Guid),
    Opaque(ByteString),
}

impl Default for Identifier {
    fn default() -> Self {
        Self::Numeric(0)
    }
}

/// Identifier of a node within a namespace. The default is the null id `i=0`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    pub namespace: u16,
    pub identifier: Identifier,
}

impl NodeId {
    pub fn numeric(namespace: u16, id: u32) -> Self {
        Self {
            namespace,
            identifier: Identifier::Numeric(id),
        }
    }

    pub fn string(namespace: u16, id: impl Into<String>) -> Self {
        Self {
            namespace,
            identifier: Identifier::String(id.into()),
        }
    }

    pub fn guid(namespace: u16, id: Guid) -> Self {
        Self {
            namespace,
            identifier: Identifier::Guid(id),
        }
    }

    pub fn opaque(namespace: u16, id: impl Into<ByteString>) -> Self {
        Self {
            namespace,
            identifier: Identifier::Opaque(id.into()),
        }
    }

    pub fn is_null(&self) -> bool {
        self.namespace == 0 && self.identifier == Identifier::Numeric(0)
    }

    /// The numeric id when this is a numeric id in namespace 0.
    pub fn ns0_numeric(&self) -> Option<u32> {
        match self.identifier {
            Identifier::Numeric(id) if self.namespace == 0 => Some(id),
            _ => None,
        }
    }

    /// Numeric ids use the most compact form that fits.
    fn encode_with_flags(&self, buf: &mut BytesMut, flags: u8) -> Result<(), CodecError> {
        match &self.identifier {
            Identifier::Numeric(id) => {
                if self.namespace == 0 && *id <= u32::from(u8::MAX) {
                    buf.put_u8(TWO_BYTE | flags);
                    buf.put_u8(*id as u8);
                } else if self.namespace <= u16::from(u8::MAX) && *id <= u32::from(u16::MAX) {
                    buf.put_u8(FOUR_BYTE | flags);
                    buf.put_u8(self.namespace as u8);
                    buf.put_u16_le(*id as u16);
                } else {
                    buf.put_u8(NUMERIC | flags);
                    buf.put_u16_le(self.namespace);
                    buf.put_u32_le(*id);
                }
                Ok(())
            }
            Identifier::String(s) => {
                buf.put_u8(STRING | flags);
                buf.put_u16_le(self.namespace);
                s.encode(buf)
            }
            Identifier::Guid(g) => {
                buf.put_u8(GUID | flags);
                buf.put_u16_le(self.namespace);
                g.encode(buf)
            }
            Identifier::Opaque(b) => {
                buf.put_u8(OPAQUE | flags);
                buf.put_u16_le(self.namespace);
                b.encode(buf)
            }
        }
    }

    /// Decode the id and return it with the flag bits of its leading byte.
    fn decode_with_flags(buf: &mut Bytes) -> Result<(Self, u8), CodecError> {
        let byte = buf.try_get_u8()?;
        let flags = byte & !FORM_MASK;
        let id = match byte & FORM_MASK {
            TWO_BYTE => Self::numeric(0, u32::from(buf.try_get_u8()?)),
            FOUR_BYTE => {
                let namespace = u16::from(buf.try_get_u8()?);
                Self::numeric(namespace, u32::from(buf.try_get_u16_le()?))
            }
            NUMERIC => {
                let namespace = buf.try_get_u16_le()?;
                Self::numeric(namespace, buf.try_get_u32_le()?)
            }
            STRING => {
                let namespace = buf.try_get_u16_le()?;
                Self::string(namespace, String::decode(buf)?)
            }
            GUID => {
                let namespace = buf.try_get_u16_le()?;
                Self::guid(namespace, Guid::decode(buf)?)
            }
            OPAQUE => {
                let namespace = buf.try_get_u16_le()?;
                Self::opaque(namespace, ByteString::decode(buf)?)
            }
            _ => return Err(CodecError::UnsupportedNodeIdEncoding(byte)),
        };
        Ok((id, flags))
    }
}

/// `ns=<n>;` prefix omitted for namespace 0, then `i=`, `s=`, `g=` or `b=`.
impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace != 0 {
            write!(f, "ns={};", self.namespace)?;
        }
        match &self.identifier {
            Identifier::Numeric(id) => write!(f, "i={id}"),
            Identifier::String(s) => write!(f, "s={s}"),
            Identifier::Guid(g) => write!(f, "g={g}"),
            Identifier::Opaque(b) => {
                f.write_str("b=")?;
                for byte in b.as_bytes() {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
        }
    }
}

impl BinaryEncode for NodeId {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), CodecError> {
        self.encode_with_flags(buf, 0)
    }
}

impl BinaryDecode for NodeId {
    fn decode(buf: &mut Bytes) -> Result<Self, CodecError> {
        let leading = buf.first().copied();
        let (id, flags) = Self::decode_with_flags(buf)?;
        if flags != 0 {
            // Expanded forms are only valid where an ExpandedNodeId is expected.
            return Err(CodecError::UnsupportedNodeIdEncoding(
                leading.unwrap_or(flags),
            ));
        }
        Ok(id)
    }
}

/// A [`NodeId`] optionally qualified by a namespace URI and a server index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ExpandedNodeId {
    pub node_id: NodeId,
    pub namespace_uri: Option<String>,
    /// Zero is the local server.
    pub server_index: u32,
}

impl From<NodeId> for ExpandedNodeId {
    fn from(node_id: NodeId) -> Self {
        Self {
            node_id,
            ..Self::default()
        }
    }
}

impl BinaryEncode for ExpandedNodeId {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), CodecError> {
        let mut flags = 0;
        if self.namespace_uri.is_some() {
            flags |= NAMESPACE_URI_FLAG;
        }
        if self.server_index != 0 {
            flags |= SERVER_INDEX_FLAG;
        }
        self.node_id.encode_with_flags(buf, flags)?;
        if let Some(uri) = &self.namespace_uri {
            uri.encode(buf)?;
        }
        if self.server_index != 0 {
            self.server_index.encode(buf)?;
        }
        Ok(())
    }
}

impl BinaryDecode for ExpandedNodeId {
    fn decode(buf: &mut Bytes) -> Result<Self, CodecError> {
        let (node_id, flags) = NodeId::decode_with_flags(buf)?;
        let namespace_uri = if flags & NAMESPACE_URI_FLAG != 0 {
            Some(String::decode(buf)?)
        } else {
            None
        };
        let server_index = if flags & SERVER_INDEX_FLAG != 0 {
            u32::decode(buf)?
        } else {
            0
        };
        Ok(Self {
            node_id,
            namespace_uri,
            server_index,
        })
    }
}

use bytes::{BufMut, Bytes, BytesMut};

use crate::{
    BinaryDecode, BinaryEncode, CodecError,
    codec::{read_bytes, read_length, write_length},
};

/// Opaque byte sequence; `None` is the null byte string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ByteString(pub Option<Vec<u8>>);

impl ByteString {
    pub fn null() -> Self {
        Self(None)
    }

    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_deref().unwrap_or_default()
    }
}

impl From<Vec<u8>> for ByteString {
    fn from(v: Vec<u8>) -> Self {
        Self(Some(v))
    }
}

impl From<&[u8]> for ByteString {
    fn from(v: &[u8]) -> Self {
        Self(Some(v.to_vec()))
    }
}

impl BinaryEncode for ByteString {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), CodecError> {
        let Some(data) = &self.0 else {
            return write_length(buf, None);
        };
        write_length(buf, Some(data.len()))?;
        buf.put_slice(data);
        Ok(())
    }
}

impl BinaryDecode for ByteString {
    fn decode(buf: &mut Bytes) -> Result<Self, CodecError> {
        match read_length(buf)? {
            None => Ok(Self(None)),
            Some(len) => Ok(Self(Some(read_bytes(buf, len)?.to_vec()))),
        }
    }
}

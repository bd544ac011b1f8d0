use std::fmt;

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::{BinaryDecode, BinaryEncode, CodecError, codec::read_bytes};

/// 16-byte globally unique identifier.
///
/// The first three groups are little-endian on the wire, the last eight bytes
/// are written as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Guid {
    pub data1: u32,
    pub data2: u16,
    pub data3: u16,
    pub data4: [u8; 8],
}

impl Guid {
    pub const fn new(data1: u32, data2: u16, data3: u16, data4: [u8; 8]) -> Self {
        Self {
            data1,
            data2,
            data3,
            data4,
        }
    }
}

/// Canonical `XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX` form.
impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.data4;
        write!(
            f,
            "{:08X}-{:04X}-{:04X}-{:02X}{:02X}-{:02X}{:02X}{:02X}{:02X}{:02X}{:02X}",
            self.data1, self.data2, self.data3, d[0], d[1], d[2], d[3], d[4], d[5], d[6], d[7]
        )
    }
}

impl BinaryEncode for Guid {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), CodecError> {
        buf.put_u32_le(self.data1);
        buf.put_u16_le(self.data2);
        buf.put_u16_le(self.data3);
        buf.put_slice(&self.data4);
        Ok(())
    }
}

impl BinaryDecode for Guid {
    fn decode(buf: &mut Bytes) -> Result<Self, CodecError> {
        let mut raw = read_bytes(buf, 16)?;
        let data1 = raw.get_u32_le();
        let data2 = raw.get_u16_le();
        let data3 = raw.get_u16_le();
        let mut data4 = [0u8; 8];
        raw.copy_to_slice(&mut data4);
        Ok(Self::new(data1, data2, data3, data4))
    }
}

use std::fmt;

use bytes::{Bytes, BytesMut};

use crate::{BinaryDecode, BinaryEncode, CodecError};

/// Result code of an operation. The top two bits carry the severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StatusCode(pub u32);

impl StatusCode {
    const SEVERITY_MASK: u32 = 0xC000_0000;
    const SEVERITY_UNCERTAIN: u32 = 0x4000_0000;
    const SEVERITY_BAD: u32 = 0x8000_0000;

    pub const GOOD: Self = Self(0);
    pub const BAD_UNEXPECTED_ERROR: Self = Self(0x8001_0000);
    pub const BAD_INTERNAL_ERROR: Self = Self(0x8002_0000);
    pub const BAD_DECODING_ERROR: Self = Self(0x8007_0000);
    pub const BAD_ENCODING_ERROR: Self = Self(0x8006_0000);
    pub const BAD_TIMEOUT: Self = Self(0x800A_0000);
    pub const BAD_SERVICE_UNSUPPORTED: Self = Self(0x800B_0000);
    pub const BAD_NOTHING_TO_DO: Self = Self(0x800F_0000);
    pub const BAD_TOO_MANY_OPERATIONS: Self = Self(0x8010_0000);
    pub const BAD_NODE_ID_UNKNOWN: Self = Self(0x8034_0000);
    pub const BAD_ATTRIBUTE_ID_INVALID: Self = Self(0x8035_0000);

    pub fn is_good(self) -> bool {
        self.0 & Self::SEVERITY_MASK == 0
    }

    pub fn is_uncertain(self) -> bool {
        self.0 & Self::SEVERITY_MASK == Self::SEVERITY_UNCERTAIN
    }

    pub fn is_bad(self) -> bool {
        self.0 & Self::SEVERITY_BAD != 0
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

impl BinaryEncode for StatusCode {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), CodecError> {
        self.0.encode(buf)
    }
}

impl BinaryDecode for StatusCode {
    fn decode(buf: &mut Bytes) -> Result<Self, CodecError> {
        u32::decode(buf).map(Self)
    }
}

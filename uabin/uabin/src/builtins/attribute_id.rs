use bytes::{Bytes, BytesMut};

use crate::{BinaryDecode, BinaryEncode, CodecError};

/// Attribute of a node, encoded as a `u32`.
///
/// Every dictionary field named `AttributeId` uses this type whatever its
/// declared type is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttributeId(pub u32);

impl AttributeId {
    pub const INVALID: Self = Self(0);
    pub const NODE_ID: Self = Self(1);
    pub const NODE_CLASS: Self = Self(2);
    pub const BROWSE_NAME: Self = Self(3);
    pub const DISPLAY_NAME: Self = Self(4);
    pub const DESCRIPTION: Self = Self(5);
    pub const WRITE_MASK: Self = Self(6);
    pub const USER_WRITE_MASK: Self = Self(7);
    pub const IS_ABSTRACT: Self = Self(8);
    pub const SYMMETRIC: Self = Self(9);
    pub const INVERSE_NAME: Self = Self(10);
    pub const CONTAINS_NO_LOOPS: Self = Self(11);
    pub const EVENT_NOTIFIER: Self = Self(12);
    pub const VALUE: Self = Self(13);
    pub const DATA_TYPE: Self = Self(14);
    pub const VALUE_RANK: Self = Self(15);
    pub const ARRAY_DIMENSIONS: Self = Self(16);
    pub const ACCESS_LEVEL: Self = Self(17);
    pub const USER_ACCESS_LEVEL: Self = Self(18);
    pub const MINIMUM_SAMPLING_INTERVAL: Self = Self(19);
    pub const HISTORIZING: Self = Self(20);
    pub const EXECUTABLE: Self = Self(21);
    pub const USER_EXECUTABLE: Self = Self(22);
    pub const DATA_TYPE_DEFINITION: Self = Self(23);
    pub const ROLE_PERMISSIONS: Self = Self(24);
    pub const USER_ROLE_PERMISSIONS: Self = Self(25);
    pub const ACCESS_RESTRICTIONS: Self = Self(26);
    pub const ACCESS_LEVEL_EX: Self = Self(27);
}

impl BinaryEncode for AttributeId {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), CodecError> {
        self.0.encode(buf)
    }
}

impl BinaryDecode for AttributeId {
    fn decode(buf: &mut Bytes) -> Result<Self, CodecError> {
        u32::decode(buf).map(Self)
    }
}

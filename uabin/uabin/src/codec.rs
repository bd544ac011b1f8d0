//! Binary codec traits and the encodings of primitives, strings and arrays.
//!
//! All integers and floats are little-endian. Strings and arrays carry an
//! `i32` length prefix where `-1` marks the null value; declared lengths are
//! validated against the remaining input before anything is allocated.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::CodecError;

/// Upper bound on the element count of a decoded array.
pub const MAX_ARRAY_LENGTH: usize = 1 << 20;

/// Length prefix marking a null string, byte string or array.
pub const NULL_LENGTH: i32 = -1;

pub trait BinaryEncode {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), CodecError>;
}

pub trait BinaryDecode: Sized {
    fn decode(buf: &mut Bytes) -> Result<Self, CodecError>;
}

/// Encode `value` into a fresh byte vector.
pub fn encode_to_vec<T: BinaryEncode + ?Sized>(value: &T) -> Result<Vec<u8>, CodecError> {
    let mut buf = BytesMut::new();
    value.encode(&mut buf)?;
    Ok(buf.to_vec())
}

/// Decode a `T` that must span all of `data`.
pub fn decode_exact<T: BinaryDecode>(data: &[u8]) -> Result<T, CodecError> {
    let mut buf = Bytes::copy_from_slice(data);
    let value = T::decode(&mut buf)?;
    if buf.has_remaining() {
        return Err(CodecError::TrailingBytes(buf.remaining()));
    }
    Ok(value)
}

impl From<bytes::TryGetError> for CodecError {
    fn from(e: bytes::TryGetError) -> Self {
        Self::UnexpectedEof {
            needed: e.requested,
            remaining: e.available,
        }
    }
}

macro_rules! impl_primitive {
    ($($ty:ty => $put:ident, $get:ident;)*) => {
        $(
            impl BinaryEncode for $ty {
                fn encode(&self, buf: &mut BytesMut) -> Result<(), CodecError> {
                    buf.$put(*self);
                    Ok(())
                }
            }

            impl BinaryDecode for $ty {
                fn decode(buf: &mut Bytes) -> Result<Self, CodecError> {
                    Ok(buf.$get()?)
                }
            }
        )*
    };
}

impl_primitive! {
    u8 => put_u8, try_get_u8;
    i8 => put_i8, try_get_i8;
    u16 => put_u16_le, try_get_u16_le;
    i16 => put_i16_le, try_get_i16_le;
    u32 => put_u32_le, try_get_u32_le;
    i32 => put_i32_le, try_get_i32_le;
    u64 => put_u64_le, try_get_u64_le;
    i64 => put_i64_le, try_get_i64_le;
    f32 => put_f32_le, try_get_f32_le;
    f64 => put_f64_le, try_get_f64_le;
}

impl BinaryEncode for bool {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), CodecError> {
        buf.put_u8(u8::from(*self));
        Ok(())
    }
}

impl BinaryDecode for bool {
    fn decode(buf: &mut Bytes) -> Result<Self, CodecError> {
        Ok(buf.try_get_u8()? != 0)
    }
}

/// Write a length prefix; `None` writes the null marker.
pub fn write_length(buf: &mut BytesMut, len: Option<usize>) -> Result<(), CodecError> {
    let prefix = match len {
        None => NULL_LENGTH,
        Some(n) => i32::try_from(n).map_err(|_| CodecError::LengthOverflow(n))?,
    };
    buf.put_i32_le(prefix);
    Ok(())
}

/// Read a length prefix; `None` is the null marker.
pub fn read_length(buf: &mut Bytes) -> Result<Option<usize>, CodecError> {
    match buf.try_get_i32_le()? {
        NULL_LENGTH => Ok(None),
        n if n < NULL_LENGTH => Err(CodecError::InvalidLength(n)),
        n => Ok(Some(n as usize)),
    }
}

/// Split off exactly `len` bytes, failing before any copy when the input is short.
pub fn read_bytes(buf: &mut Bytes, len: usize) -> Result<Bytes, CodecError> {
    if buf.remaining() < len {
        return Err(CodecError::UnexpectedEof {
            needed: len,
            remaining: buf.remaining(),
        });
    }
    Ok(buf.split_to(len))
}

/// Strings encode empty as null and decode null as empty.
impl BinaryEncode for String {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), CodecError> {
        if self.is_empty() {
            return write_length(buf, None);
        }
        write_length(buf, Some(self.len()))?;
        buf.put_slice(self.as_bytes());
        Ok(())
    }
}

impl BinaryDecode for String {
    fn decode(buf: &mut Bytes) -> Result<Self, CodecError> {
        let Some(len) = read_length(buf)? else {
            return Ok(String::new());
        };
        let bytes = read_bytes(buf, len)?;
        Ok(String::from_utf8(bytes.to_vec())?)
    }
}

/// `None` is the null array (`FF FF FF FF`), `Some(vec![])` the empty one.
impl<T: BinaryEncode> BinaryEncode for Option<Vec<T>> {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), CodecError> {
        let Some(items) = self else {
            return write_length(buf, None);
        };
        write_length(buf, Some(items.len()))?;
        for item in items {
            item.encode(buf)?;
        }
        Ok(())
    }
}

impl<T: BinaryDecode> BinaryDecode for Option<Vec<T>> {
    fn decode(buf: &mut Bytes) -> Result<Self, CodecError> {
        let Some(len) = read_length(buf)? else {
            return Ok(None);
        };
        if len > MAX_ARRAY_LENGTH {
            return Err(CodecError::LengthLimit {
                len,
                limit: MAX_ARRAY_LENGTH,
            });
        }
        // Capacity never exceeds the input actually present.
        let mut items = Vec::with_capacity(len.min(buf.remaining()));
        for _ in 0..len {
            items.push(T::decode(buf)?);
        }
        Ok(Some(items))
    }
}

/// Absent references encode as the zero value of `T`; decoding always yields one.
impl<T: BinaryEncode + Default> BinaryEncode for Option<Box<T>> {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), CodecError> {
        match self {
            Some(value) => value.encode(buf),
            None => T::default().encode(buf),
        }
    }
}

impl<T: BinaryDecode> BinaryDecode for Option<Box<T>> {
    fn decode(buf: &mut Bytes) -> Result<Self, CodecError> {
        T::decode(buf).map(|v| Some(Box::new(v)))
    }
}

//! Byte-exact round-trip checks against reference encodings.
//!
//! A [`CodecTestCase`] pairs a value with the bytes it must encode to. A case
//! passes when encoding the value yields exactly those bytes and decoding the
//! bytes consumes all of them and yields a value equal to the original.

use std::fmt::{self, Write as _};

use bytes::{Buf, Bytes, BytesMut};

use crate::{BinaryDecode, BinaryEncode, CodecError};

#[derive(Debug, Clone)]
pub struct CodecTestCase<T> {
    pub name: &'static str,
    pub value: T,
    pub bytes: Vec<u8>,
}

impl<T> CodecTestCase<T> {
    pub fn new(name: &'static str, value: T, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name,
            value,
            bytes: bytes.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConformanceError {
    #[error("{case}: encode failed: {source}")]
    Encode {
        case: &'static str,
        #[source]
        source: CodecError,
    },

    #[error("{case}: encoded bytes differ\n  expected: {expected}\n  actual:   {actual}")]
    BytesMismatch {
        case: &'static str,
        expected: HexBytes,
        actual: HexBytes,
    },

    #[error("{case}: decode failed: {source}")]
    Decode {
        case: &'static str,
        #[source]
        source: CodecError,
    },

    #[error("{case}: {remaining} bytes left after decoding")]
    TrailingBytes { case: &'static str, remaining: usize },

    #[error("{case}: decoded value differs\n  expected: {expected}\n  actual:   {actual}")]
    ValueMismatch {
        case: &'static str,
        expected: String,
        actual: String,
    },
}

/// Space separated hex rendering of a byte sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexBytes(pub Vec<u8>);

impl fmt::Display for HexBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::with_capacity(self.0.len() * 3);
        for (i, b) in self.0.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            write!(out, "{b:02x}")?;
        }
        f.write_str(&out)
    }
}

/// Check both directions of one case.
pub fn check_codec_case<T>(case: &CodecTestCase<T>) -> Result<(), ConformanceError>
where
    T: BinaryEncode + BinaryDecode + PartialEq + fmt::Debug,
{
    let mut encoded = BytesMut::new();
    case.value
        .encode(&mut encoded)
        .map_err(|source| ConformanceError::Encode {
            case: case.name,
            source,
        })?;
    if encoded[..] != case.bytes[..] {
        return Err(ConformanceError::BytesMismatch {
            case: case.name,
            expected: HexBytes(case.bytes.clone()),
            actual: HexBytes(encoded.to_vec()),
        });
    }

    let mut buf = Bytes::copy_from_slice(&case.bytes);
    let decoded = T::decode(&mut buf).map_err(|source| ConformanceError::Decode {
        case: case.name,
        source,
    })?;
    if buf.has_remaining() {
        return Err(ConformanceError::TrailingBytes {
            case: case.name,
            remaining: buf.remaining(),
        });
    }
    if decoded != case.value {
        return Err(ConformanceError::ValueMismatch {
            case: case.name,
            expected: format!("{:?}", case.value),
            actual: format!("{decoded:?}"),
        });
    }
    Ok(())
}

/// Run every case, panicking with the first failure.
///
/// # Panics
///
/// Panics when any case fails [`check_codec_case`].
pub fn run_codec_test<T>(cases: &[CodecTestCase<T>])
where
    T: BinaryEncode + BinaryDecode + PartialEq + fmt::Debug,
{
    for case in cases {
        if let Err(e) = check_codec_case(case) {
            panic!("codec conformance failure: {e}");
        }
    }
}

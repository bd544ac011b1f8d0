use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::{BinaryDecode, BinaryEncode, CodecError, StatusCode};

/// Deepest chain of inner diagnostics accepted when decoding.
pub const MAX_DIAGNOSTIC_DEPTH: usize = 100;

const SYMBOLIC_ID: u8 = 0x01;
const NAMESPACE_URI: u8 = 0x02;
const LOCALIZED_TEXT: u8 = 0x04;
const LOCALE: u8 = 0x08;
const ADDITIONAL_INFO: u8 = 0x10;
const INNER_STATUS_CODE: u8 = 0x20;
const INNER_DIAGNOSTIC_INFO: u8 = 0x40;

/// Vendor diagnostics attached to a result. Each member is present on the
/// wire only when its bit is set in the leading mask byte, so the default
/// value encodes as a single `00`.
///
/// The string members are indexes into the response header string table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DiagnosticInfo {
    pub symbolic_id: Option<i32>,
    pub namespace_uri: Option<i32>,
    pub locale: Option<i32>,
    pub localized_text: Option<i32>,
    pub additional_info: Option<String>,
    pub inner_status_code: Option<StatusCode>,
    pub inner_diagnostic_info: Option<Box<DiagnosticInfo>>,
}

impl DiagnosticInfo {
    fn mask(&self) -> u8 {
        let mut mask = 0;
        for (present, bit) in [
            (self.symbolic_id.is_some(), SYMBOLIC_ID),
            (self.namespace_uri.is_some(), NAMESPACE_URI),
            (self.localized_text.is_some(), LOCALIZED_TEXT),
            (self.locale.is_some(), LOCALE),
            (self.additional_info.is_some(), ADDITIONAL_INFO),
            (self.inner_status_code.is_some(), INNER_STATUS_CODE),
            (self.inner_diagnostic_info.is_some(), INNER_DIAGNOSTIC_INFO),
        ] {
            if present {
                mask |= bit;
            }
        }
        mask
    }

    fn decode_nested(buf: &mut Bytes, depth: usize) -> Result<Self, CodecError> {
        if depth > MAX_DIAGNOSTIC_DEPTH {
            return Err(CodecError::NestingTooDeep(MAX_DIAGNOSTIC_DEPTH));
        }
        let mask = buf.try_get_u8()?;
        let mut info = Self::default();
        if mask & SYMBOLIC_ID != 0 {
            info.symbolic_id = Some(i32::decode(buf)?);
        }
        if mask & NAMESPACE_URI != 0 {
            info.namespace_uri = Some(i32::decode(buf)?);
        }
        if mask & LOCALE != 0 {
            info.locale = Some(i32::decode(buf)?);
        }
        if mask & LOCALIZED_TEXT != 0 {
            info.localized_text = Some(i32::decode(buf)?);
        }
        if mask & ADDITIONAL_INFO != 0 {
            info.additional_info = Some(String::decode(buf)?);
        }
        if mask & INNER_STATUS_CODE != 0 {
            info.inner_status_code = Some(StatusCode::decode(buf)?);
        }
        if mask & INNER_DIAGNOSTIC_INFO != 0 {
            info.inner_diagnostic_info = Some(Box::new(Self::decode_nested(buf, depth + 1)?));
        }
        Ok(info)
    }
}

impl BinaryEncode for DiagnosticInfo {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), CodecError> {
        buf.put_u8(self.mask());
        for v in [self.symbolic_id, self.namespace_uri, self.locale, self.localized_text]
            .into_iter()
            .flatten()
        {
            v.encode(buf)?;
        }
        if let Some(info) = &self.additional_info {
            info.encode(buf)?;
        }
        if let Some(code) = self.inner_status_code {
            code.encode(buf)?;
        }
        if let Some(inner) = &self.inner_diagnostic_info {
            inner.encode(buf)?;
        }
        Ok(())
    }
}

impl BinaryDecode for DiagnosticInfo {
    fn decode(buf: &mut Bytes) -> Result<Self, CodecError> {
        Self::decode_nested(buf, 0)
    }
}

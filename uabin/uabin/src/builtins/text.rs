use std::fmt;

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::{BinaryDecode, BinaryEncode, CodecError};

/// Name qualified by a namespace index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    pub namespace_index: u16,
    pub name: String,
}

impl QualifiedName {
    pub fn new(namespace_index: u16, name: impl Into<String>) -> Self {
        Self {
            namespace_index,
            name: name.into(),
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace_index != 0 {
            write!(f, "{}:", self.namespace_index)?;
        }
        f.write_str(&self.name)
    }
}

impl BinaryEncode for QualifiedName {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), CodecError> {
        self.namespace_index.encode(buf)?;
        self.name.encode(buf)
    }
}

impl BinaryDecode for QualifiedName {
    fn decode(buf: &mut Bytes) -> Result<Self, CodecError> {
        Ok(Self {
            namespace_index: u16::decode(buf)?,
            name: String::decode(buf)?,
        })
    }
}

const LOCALE_FLAG: u8 = 0x01;
const TEXT_FLAG: u8 = 0x02;

/// Human readable text with an optional locale. Empty members are omitted
/// from the wire form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LocalizedText {
    pub locale: String,
    pub text: String,
}

impl LocalizedText {
    pub fn new(locale: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            text: text.into(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new("", text)
    }
}

impl fmt::Display for LocalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl BinaryEncode for LocalizedText {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), CodecError> {
        let mut mask = 0;
        if !self.locale.is_empty() {
            mask |= LOCALE_FLAG;
        }
        if !self.text.is_empty() {
            mask |= TEXT_FLAG;
        }
        buf.put_u8(mask);
        if mask & LOCALE_FLAG != 0 {
            self.locale.encode(buf)?;
        }
        if mask & TEXT_FLAG != 0 {
            self.text.encode(buf)?;
        }
        Ok(())
    }
}

impl BinaryDecode for LocalizedText {
    fn decode(buf: &mut Bytes) -> Result<Self, CodecError> {
        let mask = buf.try_get_u8()?;
        let mut value = Self::default();
        if mask & LOCALE_FLAG != 0 {
            value.locale = String::decode(buf)?;
        }
        if mask & TEXT_FLAG != 0 {
            value.text = String::decode(buf)?;
        }
        Ok(value)
    }
}

/// XML fragment carried as a length-prefixed UTF-8 string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct XmlElement(pub String);

impl BinaryEncode for XmlElement {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), CodecError> {
        self.0.encode(buf)
    }
}

impl BinaryDecode for XmlElement {
    fn decode(buf: &mut Bytes) -> Result<Self, CodecError> {
        String::decode(buf).map(Self)
    }
}

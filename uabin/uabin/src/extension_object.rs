//! The polymorphic payload container and the object-safe body trait every
//! generated structure implements.

use std::{any::Any, cell::Cell, fmt};

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::{
    BinaryDecode, BinaryEncode, CodecError, NodeId,
    codec::{NULL_LENGTH, read_bytes, read_length, write_length},
    generated::types::{Request, Response},
    registry::registries,
};

const NO_BODY: u8 = 0x00;
const BINARY_BODY: u8 = 0x01;

/// Deepest chain of extension object bodies nested inside one another
/// accepted when decoding.
pub const MAX_EXTENSION_OBJECT_DEPTH: usize = 100;

thread_local! {
    static BODY_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Counts one level of body nesting on the current thread while alive.
pub(crate) struct BodyDepthGuard;

impl BodyDepthGuard {
    pub(crate) fn enter() -> Result<Self, CodecError> {
        BODY_DEPTH.with(|depth| {
            let next = depth.get() + 1;
            if next > MAX_EXTENSION_OBJECT_DEPTH {
                return Err(CodecError::NestingTooDeep(MAX_EXTENSION_OBJECT_DEPTH));
            }
            depth.set(next);
            Ok(Self)
        })
    }
}

impl Drop for BodyDepthGuard {
    fn drop(&mut self) {
        BODY_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

/// Operations on a type-erased body. Implemented for every
/// [`ExtensionObjectBody`] type; not meant to be implemented by hand.
pub trait DynBody: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn clone_body(&self) -> Box<dyn ExtensionObjectBody>;
    fn eq_body(&self, other: &dyn ExtensionObjectBody) -> bool;
    fn encode_body(&self, buf: &mut BytesMut) -> Result<(), CodecError>;
    /// Replace `self` with a value decoded from `buf`.
    fn decode_body(&mut self, buf: &mut Bytes) -> Result<(), CodecError>;
}

impl<T> DynBody for T
where
    T: ExtensionObjectBody + BinaryEncode + BinaryDecode + Clone + PartialEq,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn clone_body(&self) -> Box<dyn ExtensionObjectBody> {
        Box::new(self.clone())
    }

    fn eq_body(&self, other: &dyn ExtensionObjectBody) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| other == self)
    }

    fn encode_body(&self, buf: &mut BytesMut) -> Result<(), CodecError> {
        self.encode(buf)
    }

    fn decode_body(&mut self, buf: &mut Bytes) -> Result<(), CodecError> {
        *self = T::decode(buf)?;
        Ok(())
    }
}

/// A concrete type that can travel inside an [`ExtensionObject`].
pub trait ExtensionObjectBody: DynBody + fmt::Debug + Send + Sync {
    /// Dictionary name of the type.
    fn type_name(&self) -> &'static str;

    /// Numeric identifier of the type's binary encoding.
    fn encoding_id(&self) -> u32;

    fn as_request(&self) -> Option<&dyn Request> {
        None
    }

    fn as_request_mut(&mut self) -> Option<&mut dyn Request> {
        None
    }

    fn as_response(&self) -> Option<&dyn Response> {
        None
    }

    fn as_response_mut(&mut self) -> Option<&mut dyn Response> {
        None
    }
}

impl dyn ExtensionObjectBody {
    pub fn downcast_ref<T: ExtensionObjectBody>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    pub fn downcast_mut<T: ExtensionObjectBody>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut()
    }
}

impl Clone for Box<dyn ExtensionObjectBody> {
    fn clone(&self) -> Self {
        self.clone_body()
    }
}

impl PartialEq for Box<dyn ExtensionObjectBody> {
    fn eq(&self, other: &Self) -> bool {
        self.eq_body(other.as_ref())
    }
}

/// A body tagged with the identifier of its encoding.
///
/// Without a body only `type_id` and a `00` mask are written, so the default
/// value encodes as `00 00 00`. With a body, the identifier written is always
/// the body's own binary encoding id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtensionObject {
    pub type_id: NodeId,
    pub body: Option<Box<dyn ExtensionObjectBody>>,
}

impl ExtensionObject {
    pub fn new(body: impl ExtensionObjectBody) -> Self {
        Self::from_boxed(Box::new(body))
    }

    pub fn from_boxed(body: Box<dyn ExtensionObjectBody>) -> Self {
        Self {
            type_id: NodeId::numeric(0, body.encoding_id()),
            body: Some(body),
        }
    }

    /// An object without a body.
    pub fn null() -> Self {
        Self::default()
    }

    pub fn body_as<T: ExtensionObjectBody>(&self) -> Option<&T> {
        self.body.as_deref()?.downcast_ref()
    }
}

impl BinaryEncode for ExtensionObject {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), CodecError> {
        let Some(body) = &self.body else {
            self.type_id.encode(buf)?;
            buf.put_u8(NO_BODY);
            return Ok(());
        };
        NodeId::numeric(0, body.encoding_id()).encode(buf)?;
        buf.put_u8(BINARY_BODY);
        let mut encoded = BytesMut::new();
        body.encode_body(&mut encoded)?;
        write_length(buf, Some(encoded.len()))?;
        buf.put_slice(&encoded);
        Ok(())
    }
}

impl BinaryDecode for ExtensionObject {
    fn decode(buf: &mut Bytes) -> Result<Self, CodecError> {
        let type_id = NodeId::decode(buf)?;
        match buf.try_get_u8()? {
            NO_BODY => Ok(Self {
                type_id,
                body: None,
            }),
            BINARY_BODY => {
                // A null body is written with the `00` mask, never as a null length.
                let len = read_length(buf)?.ok_or(CodecError::InvalidLength(NULL_LENGTH))?;
                let mut data = read_bytes(buf, len)?;
                let id = type_id
                    .ns0_numeric()
                    .ok_or_else(|| CodecError::NonNumericTypeId(type_id.to_string()))?;
                let registry = &registries()?.extension_objects;
                let mut body = registry.new_value(id).ok_or(CodecError::UnregisteredType {
                    registry: registry.kind(),
                    id,
                })?;
                let _depth = BodyDepthGuard::enter()?;
                body.decode_body(&mut data)?;
                if data.has_remaining() {
                    return Err(CodecError::TrailingBytes(data.remaining()));
                }
                Ok(Self {
                    type_id,
                    body: Some(body),
                })
            }
            mask => Err(CodecError::UnsupportedEncoding(mask)),
        }
    }
}

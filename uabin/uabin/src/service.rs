//! Service message framing: the binary encoding id as a [`NodeId`] followed
//! by the message body.

use bytes::{Bytes, BytesMut};

use crate::{
    BinaryDecode, BinaryEncode, CodecError, NodeId,
    extension_object::{BodyDepthGuard, ExtensionObjectBody},
    registry::registries,
};

/// Decode a service message whose concrete type is picked from the service
/// registry by the leading identifier.
pub fn decode_service(buf: &mut Bytes) -> Result<Box<dyn ExtensionObjectBody>, CodecError> {
    let type_id = NodeId::decode(buf)?;
    let id = type_id
        .ns0_numeric()
        .ok_or_else(|| CodecError::NonNumericTypeId(type_id.to_string()))?;
    let registry = &registries()?.services;
    let mut body = registry.new_value(id).ok_or(CodecError::UnregisteredType {
        registry: registry.kind(),
        id,
    })?;
    tracing::trace!(id, name = body.type_name(), "decoding service message");
    let _depth = BodyDepthGuard::enter()?;
    body.decode_body(buf)?;
    Ok(body)
}

/// Encode a service message. Only registered service types are accepted.
pub fn encode_service(
    body: &dyn ExtensionObjectBody,
    buf: &mut BytesMut,
) -> Result<(), CodecError> {
    let id = body.encoding_id();
    let registry = &registries()?.services;
    if !registry.contains(id) {
        return Err(CodecError::UnregisteredType {
            registry: registry.kind(),
            id,
        });
    }
    NodeId::numeric(0, id).encode(buf)?;
    body.encode_body(buf)
}

//! Binary codec, generated message types and identifier registries for the UA
//! binary protocol.
//!
//! The message structures, enumerations, identifier constants and registry
//! initializers are generated at build time by `uabin-codegen` from the
//! bundled dictionary. Every generated type implements [`BinaryEncode`] and
//! [`BinaryDecode`]; structures additionally implement
//! [`ExtensionObjectBody`] so they can travel inside an [`ExtensionObject`]
//! or be dispatched by identifier through [`decode_service`].
//!
//! # Typical Flow
//! ```rust
//! use bytes::BytesMut;
//! use uabin::{
//!     CancelRequest, ExtensionObjectBody, RequestHeader, decode_service, encode_service,
//! };
//!
//! let mut request = CancelRequest::default();
//! request.request_handle = 7;
//! request.request_header = Some(Box::new(RequestHeader::default()));
//!
//! let mut buf = BytesMut::new();
//! encode_service(&request, &mut buf).unwrap();
//!
//! let decoded = decode_service(&mut buf.freeze()).unwrap();
//! assert!(decoded.as_request().is_some());
//! let cancel = decoded.downcast_ref::<CancelRequest>().unwrap();
//! assert_eq!(cancel.request_handle, 7);
//! ```

mod builtins;
mod codec;
pub mod conformance;
mod error;
mod extension_object;
mod generated;
mod registry;
mod service;

pub use builtins::*;
pub use codec::{
    BinaryDecode, BinaryEncode, MAX_ARRAY_LENGTH, NULL_LENGTH, decode_exact, encode_to_vec,
    read_bytes, read_length, write_length,
};
pub use error::{CodecError, RegistryError, UnknownEnumName};
pub use extension_object::{
    DynBody, ExtensionObject, ExtensionObjectBody, MAX_EXTENSION_OBJECT_DEPTH,
};
pub use generated::{enums::*, id, types::*};
pub use registry::{BodyFactory, Registries, TypeRegistry, registries};
pub use service::{decode_service, encode_service};

/// Names every generated file imports.
#[doc(hidden)]
pub mod gen_prelude {
    pub use crate::{
        builtins::*,
        codec::{BinaryDecode, BinaryEncode},
        error::{CodecError, RegistryError, UnknownEnumName},
        extension_object::{ExtensionObject, ExtensionObjectBody},
        generated::{enums::*, id, types::*},
        registry::TypeRegistry,
    };
}

//! Error types for the binary codec and the identifier registries.

/// Error returned by [`BinaryEncode`](crate::BinaryEncode) and
/// [`BinaryDecode`](crate::BinaryDecode) implementations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The buffer ended before a value was complete.
    #[error("unexpected end of buffer: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    /// A length prefix is negative but not the null marker.
    #[error("invalid length prefix {0}")]
    InvalidLength(i32),

    /// A declared length exceeds what the buffer or the configured limit allows.
    #[error("declared length {len} exceeds limit of {limit}")]
    LengthLimit { len: usize, limit: usize },

    /// A length does not fit the 32-bit wire prefix.
    #[error("length {0} does not fit in a 32-bit length prefix")]
    LengthOverflow(usize),

    #[error("invalid UTF-8 in string: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("unsupported node id encoding byte 0x{0:02x}")]
    UnsupportedNodeIdEncoding(u8),

    /// An extension object carries a body encoding other than binary.
    #[error("unsupported extension object encoding mask 0x{0:02x}")]
    UnsupportedEncoding(u8),

    /// An extension object type id is not numeric in namespace 0.
    #[error("extension object type id {0} is not a numeric id in namespace 0")]
    NonNumericTypeId(String),

    /// No type is registered for a wire identifier.
    #[error("no {registry} type registered for identifier {id}")]
    UnregisteredType { registry: &'static str, id: u32 },

    /// Nested diagnostics or extension object bodies go deeper than the limit.
    #[error("nesting exceeds {0} levels")]
    NestingTooDeep(usize),

    /// A length-delimited value left unread bytes behind.
    #[error("{0} trailing bytes after decoded value")]
    TrailingBytes(usize),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Failure inside a field of a generated type.
    #[error("{type_name}.{field}: {source}")]
    Field {
        type_name: &'static str,
        field: &'static str,
        #[source]
        source: Box<CodecError>,
    },
}

impl CodecError {
    /// Attach the type and field being processed to this error.
    pub fn in_field(self, type_name: &'static str, field: &'static str) -> Self {
        Self::Field {
            type_name,
            field,
            source: Box::new(self),
        }
    }

    /// Innermost error, with all field context stripped.
    pub fn root_cause(&self) -> &CodecError {
        match self {
            Self::Field { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Field path from the outermost to the innermost type, e.g. `CancelResponse.ResponseHeader`.
    pub fn field_path(&self) -> Vec<&'static str> {
        let mut path = Vec::new();
        let mut current = self;
        while let Self::Field {
            type_name,
            field,
            source,
        } = current
        {
            if path.is_empty() {
                path.push(*type_name);
            }
            path.push(*field);
            current = source.as_ref();
        }
        path
    }
}

/// Errors raised while populating a [`TypeRegistry`](crate::TypeRegistry).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Two types were registered under one identifier.
    #[error("{registry} identifier {id} registered for both '{existing}' and '{new}'")]
    DuplicateIdentifier {
        registry: &'static str,
        id: u32,
        existing: &'static str,
        new: &'static str,
    },
}

/// Returned by generated `from_name` lookups for names that are not members.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{name}' is not a member of enum {enum_name}")]
pub struct UnknownEnumName {
    pub enum_name: &'static str,
    pub name: String,
}

impl UnknownEnumName {
    pub fn new(enum_name: &'static str, name: &str) -> Self {
        Self {
            enum_name,
            name: name.to_string(),
        }
    }
}

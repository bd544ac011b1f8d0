//! Intermediate type model shared by the resolver, the emitter and the
//! registry builder. Built once per generation run and never mutated after.

use crate::field_type::TypeExpr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Enum,
    ExtensionObject,
}

/// Unsigned integer width chosen for an enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EnumRepr {
    U8,
    U16,
    U32,
    U64,
}

impl EnumRepr {
    /// Smallest width from {8, 16, 32, 64} covering `bits`.
    pub fn for_bits(bits: u32) -> Option<Self> {
        match bits {
            0 => None,
            1..=8 => Some(Self::U8),
            9..=16 => Some(Self::U16),
            17..=32 => Some(Self::U32),
            33..=64 => Some(Self::U64),
            _ => None,
        }
    }

    pub fn rust_type(&self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
        }
    }

    pub fn max_value(&self) -> u64 {
        match self {
            Self::U8 => u8::MAX.into(),
            Self::U16 => u16::MAX.into(),
            Self::U32 => u32::MAX.into(),
            Self::U64 => u64::MAX,
        }
    }
}

/// A generated type: either an enumeration or an extension object structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Type {
    pub name: String,
    pub kind: Kind,
    /// Integer width, for enums.
    pub repr: Option<EnumRepr>,
    /// Name of the type this one derives from, for extension objects.
    pub base: Option<String>,
    /// Struct fields in declaration order. The order is the wire order.
    pub fields: Vec<Field>,
    /// Enum members in declaration order.
    pub values: Vec<Value>,
}

impl Type {
    /// A request carries a `RequestHeader` reference as its first field.
    pub fn is_request(&self) -> bool {
        self.fields
            .first()
            .is_some_and(|f| f.ty.is_reference_to("RequestHeader"))
    }

    /// A response carries a `ResponseHeader` reference as its first field.
    pub fn is_response(&self) -> bool {
        self.fields
            .first()
            .is_some_and(|f| f.ty.is_reference_to("ResponseHeader"))
    }

    /// Service messages are dispatched by wire id in the service registry.
    pub fn is_service(&self) -> bool {
        self.name.ends_with("Request")
            || self.name.ends_with("Response")
            || self.name == "ServiceFault"
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Name as declared in the dictionary.
    pub name: String,
    /// Rust identifier.
    pub ident: String,
    pub ty: TypeExpr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value {
    /// Rust constant identifier.
    pub name: String,
    /// Member name as declared in the dictionary.
    pub short_name: String,
    pub value: i64,
}

//! Field Type Mapper: schema field type names → Rust type expressions.
//!
//! Rules, applied in order:
//!
//! 1. A field named `AttributeId` is forced to the runtime `AttributeId` value type.
//! 2. A builtin type name maps through the fixed [`Builtin`] table.
//! 3. Otherwise the `ua:`/`tns:` prefix is stripped and the name resolves to an
//!    enum (value type) or a structure (nullable owned reference).
//! 4. Array fields wrap the resolved expression in a sequence.

use std::{collections::HashSet, fmt};

use crate::{
    error::GenerateError,
    schema::{StructDef, StructField},
};

/// Complex built-ins provided by the runtime rather than by the dictionary.
pub const KNOWN_UA_TYPES: &[&str] = &[
    "NodeId",
    "ExpandedNodeId",
    "DiagnosticInfo",
    "LocalizedText",
    "QualifiedName",
    "ExtensionObject",
    "XmlElement",
];

/// Runtime value type that every `AttributeId` field is forced to.
pub const ATTRIBUTE_ID_TYPE: &str = "AttributeId";

/// Builtin primitives with a fixed Rust mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Boolean,
    Byte,
    SByte,
    Int16,
    Int32,
    Int64,
    UInt16,
    UInt32,
    UInt64,
    Float,
    Double,
    String,
    DateTime,
    ByteString,
    StatusCode,
    Guid,
}

impl Builtin {
    pub fn from_type_name(type_name: &str) -> Option<Self> {
        Some(match type_name {
            "opc:Boolean" => Self::Boolean,
            "opc:Byte" => Self::Byte,
            "opc:SByte" => Self::SByte,
            "opc:Int16" => Self::Int16,
            "opc:Int32" => Self::Int32,
            "opc:Int64" => Self::Int64,
            "opc:UInt16" => Self::UInt16,
            "opc:UInt32" => Self::UInt32,
            "opc:UInt64" => Self::UInt64,
            "opc:Float" => Self::Float,
            "opc:Double" => Self::Double,
            "opc:String" => Self::String,
            "opc:DateTime" => Self::DateTime,
            "opc:ByteString" => Self::ByteString,
            "ua:StatusCode" => Self::StatusCode,
            "opc:Guid" => Self::Guid,
            _ => return None,
        })
    }

    pub fn rust_type(&self) -> &'static str {
        match self {
            Self::Boolean => "bool",
            Self::Byte => "u8",
            Self::SByte => "i8",
            Self::Int16 => "i16",
            Self::Int32 => "i32",
            Self::Int64 => "i64",
            Self::UInt16 => "u16",
            Self::UInt32 => "u32",
            Self::UInt64 => "u64",
            Self::Float => "f32",
            Self::Double => "f64",
            Self::String => "String",
            Self::DateTime => "DateTime",
            Self::ByteString => "ByteString",
            Self::StatusCode => "StatusCode",
            Self::Guid => "Guid",
        }
    }
}

/// Resolved type of a generated field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    Builtin(Builtin),
    /// Enumerated value type; never nullable.
    Enum(String),
    /// Nullable owned reference to a structure or complex built-in.
    Reference(String),
    /// Length-prefixed array of the (already nullability-resolved) element.
    Sequence(Box<TypeExpr>),
}

impl TypeExpr {
    pub fn rust_type(&self) -> String {
        match self {
            Self::Builtin(b) => b.rust_type().to_string(),
            Self::Enum(name) => name.clone(),
            Self::Reference(name) => format!("Option<Box<{name}>>"),
            Self::Sequence(elem) => format!("Option<Vec<{}>>", elem.rust_type()),
        }
    }

    /// True for a non-array reference to the type called `name`.
    pub fn is_reference_to(&self, name: &str) -> bool {
        matches!(self, Self::Reference(n) if n == name)
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rust_type())
    }
}

/// Names a field may refer to: dictionary enums and structures that end up generated.
#[derive(Debug, Clone, Default)]
pub struct TypeScope<'a> {
    pub enums: HashSet<&'a str>,
    pub structs: HashSet<&'a str>,
}

/// Strip the `ua:` or `tns:` namespace prefix from a type name.
pub fn strip_namespace(type_name: &str) -> &str {
    type_name
        .strip_prefix("ua:")
        .or_else(|| type_name.strip_prefix("tns:"))
        .unwrap_or(type_name)
}

/// Map one schema field of `owner` to its Rust type expression.
pub fn map_field_type(
    scope: &TypeScope<'_>,
    owner: &StructDef,
    field: &StructField,
) -> Result<TypeExpr, GenerateError> {
    let unknown = || GenerateError::UnknownFieldType {
        type_name: owner.name.clone(),
        field: field.name.clone(),
        field_type: field.type_name.clone(),
    };

    let elem = if field.name.eq_ignore_ascii_case(ATTRIBUTE_ID_TYPE) {
        TypeExpr::Enum(ATTRIBUTE_ID_TYPE.to_string())
    } else if let Some(builtin) = Builtin::from_type_name(&field.type_name) {
        TypeExpr::Builtin(builtin)
    } else if let Some(name) = field.type_name.strip_prefix("tns:") {
        if scope.enums.contains(name) {
            TypeExpr::Enum(name.to_string())
        } else if scope.structs.contains(name) {
            TypeExpr::Reference(name.to_string())
        } else {
            return Err(unknown());
        }
    } else if let Some(name) = field.type_name.strip_prefix("ua:") {
        if !KNOWN_UA_TYPES.contains(&name) {
            return Err(unknown());
        }
        TypeExpr::Reference(name.to_string())
    } else {
        return Err(unknown());
    };

    if field.is_array() {
        Ok(TypeExpr::Sequence(Box::new(elem)))
    } else {
        Ok(elem)
    }
}

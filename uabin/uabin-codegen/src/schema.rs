//! Parsed type dictionary consumed by the generator.
//!
//! Reading the raw XML schema is left to an external parser; this module only
//! defines the structured form it hands over, deserializable from JSON with
//! camelCase keys.

use serde::Deserialize;

use crate::error::GenerateError;

/// All enumerations and structures of one type dictionary, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDictionary {
    #[serde(default)]
    pub target_namespace: String,
    #[serde(default)]
    pub enums: Vec<EnumDef>,
    #[serde(default)]
    pub structs: Vec<StructDef>,
}

impl TypeDictionary {
    /// Deserialize a dictionary from its JSON rendition.
    pub fn from_json(text: &str) -> Result<Self, GenerateError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn enum_def(&self, name: &str) -> Option<&EnumDef> {
        self.enums.iter().find(|e| e.name == name)
    }
}

/// An enumerated type (`opc:EnumeratedType`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumDef {
    pub name: String,
    /// Declared bit width of the wire value.
    pub length_in_bits: u32,
    /// Members in declaration order; values need not be contiguous or zero-based.
    pub values: Vec<EnumValueDef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EnumValueDef {
    pub name: String,
    pub value: i64,
}

/// A structured type (`opc:StructuredType`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructDef {
    pub name: String,
    /// Namespace-qualified base type, e.g. `ua:ExtensionObject` or `tns:EnumValueType`.
    #[serde(default)]
    pub base_type: Option<String>,
    #[serde(default)]
    pub fields: Vec<StructField>,
}

impl StructDef {
    /// Returns true when `field` only carries the length of an array field.
    ///
    /// Such fields are elided because the array type carries its own length prefix.
    pub fn is_length_field(&self, field: &StructField) -> bool {
        self.fields
            .iter()
            .any(|f| f.length_field.as_deref() == Some(field.name.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructField {
    pub name: String,
    /// Namespace-qualified type name, e.g. `opc:UInt32` or `tns:RequestHeader`.
    pub type_name: String,
    /// Name of the companion field holding the element count, for arrays.
    #[serde(default)]
    pub length_field: Option<String>,
}

impl StructField {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            length_field: None,
        }
    }

    #[must_use]
    pub fn with_length_field(mut self, length_field: impl Into<String>) -> Self {
        self.length_field = Some(length_field.into());
        self
    }

    pub fn is_array(&self) -> bool {
        self.length_field.is_some()
    }
}

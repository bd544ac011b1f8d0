//! Error type for dictionary resolution and code generation.
//!
//! Every variant is fatal for a generation run: no partial output is usable.

/// Errors produced while turning a [`TypeDictionary`](crate::TypeDictionary) into code.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The dictionary JSON could not be deserialized.
    #[error("failed to read type dictionary: {0}")]
    Dictionary(#[from] serde_json::Error),

    /// Two structures or enumerations share a name.
    #[error("type '{name}' is defined more than once")]
    DuplicateType { name: String },

    /// A structure derives from a `tns:` type that the dictionary does not define.
    #[error("base type '{base}' of '{type_name}' is not defined in the dictionary")]
    UnresolvedBase { type_name: String, base: String },

    /// Following base types from `type_name` leads back to itself.
    #[error("base type chain of '{type_name}' is cyclic")]
    BaseCycle { type_name: String },

    /// A field refers to a type that is neither builtin, known nor defined.
    #[error("field '{type_name}.{field}' has unknown type '{field_type}'")]
    UnknownFieldType {
        type_name: String,
        field: String,
        field_type: String,
    },

    /// Two fields of one structure map to the same Rust identifier.
    #[error("fields of '{type_name}' collide on identifier '{ident}'")]
    DuplicateField { type_name: String, ident: String },

    #[error("enum '{name}' declares unsupported width of {bits} bits")]
    UnsupportedEnumWidth { name: String, bits: u32 },

    #[error("value {value} of '{name}.{member}' does not fit in {repr}")]
    EnumValueOutOfRange {
        name: String,
        member: String,
        value: i64,
        repr: &'static str,
    },

    /// Two members of one enum map to the same constant name.
    #[error("members of enum '{name}' collide on constant '{constant}'")]
    DuplicateEnumMember { name: String, constant: String },

    #[error("invalid identifier table at line {line}: {detail}")]
    InvalidIdTable { line: usize, detail: String },

    /// Two table names map to the same Rust constant.
    #[error("identifier names '{first}' and '{second}' both map to constant {ident}")]
    IdentifierCollision {
        first: String,
        second: String,
        ident: String,
    },

    /// A registered type has no binary encoding identifier in the table.
    #[error("identifier table has no entry '{name}'")]
    MissingIdentifier { name: String },

    /// Two registered types resolve to the same numeric identifier.
    #[error("identifier {id} is assigned to both '{first}' and '{second}'")]
    DuplicateIdentifier {
        id: u32,
        first: String,
        second: String,
    },

    #[error("failed to write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Format(#[from] std::fmt::Error),
}

//! Type dictionary → Rust code generator for the UA binary protocol.
//!
//! # Pipeline
//!
//! ```text
//! TypeDictionary (parsed externally, JSON)
//!   ├─ enums                 – width selection, exact member values → enum Types
//!   └─ extension_objects     – two-pass hierarchy resolution + field type mapping
//!       └─ emit_*            – Rust definitions with codec impls, in field order
//!           └─ register_*    – registry initializers keyed by encoding identifier
//! ```
//!
//! [`generate`] runs all steps and returns the text of every file; writing
//! them out is a separate step ([`GeneratedFiles::write_to`]).

mod emit;
mod enums;
mod error;
mod field_type;
mod generate;
mod ids;
mod model;
mod names;
mod register;
mod resolver;
mod schema;

pub use emit::{
    GENERATED_MARKER, emit_enums, emit_extension_objects, format_type, format_types, write_header,
};
pub use enums::enums;
pub use error::GenerateError;
pub use field_type::{
    ATTRIBUTE_ID_TYPE, Builtin, KNOWN_UA_TYPES, TypeExpr, TypeScope, map_field_type,
    strip_namespace,
};
pub use generate::{GenerateOptions, GeneratedFiles, generate};
pub use ids::{IdEntry, IdTable, emit_ids};
pub use model::{EnumRepr, Field, Kind, Type, Value};
pub use names::{const_ident, encoding_id_name, field_ident, snake_case};
pub use register::{emit_register_extension_objects, emit_register_services, validate_identifiers};
pub use resolver::{HierarchyRoots, extension_objects};
pub use schema::{EnumDef, EnumValueDef, StructDef, StructField, TypeDictionary};

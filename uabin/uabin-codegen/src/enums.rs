//! Enumeration models.

use std::collections::HashSet;

use crate::{
    error::GenerateError,
    model::{EnumRepr, Kind, Type, Value},
    names::const_ident,
    schema::TypeDictionary,
};

/// Build one enum [`Type`] per dictionary enumeration, in declaration order.
///
/// Member values are kept exactly as declared; a value that does not fit the
/// chosen unsigned width is rejected rather than truncated.
pub fn enums(dict: &TypeDictionary) -> Result<Vec<Type>, GenerateError> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(dict.enums.len());

    for def in &dict.enums {
        if !seen.insert(def.name.as_str()) {
            return Err(GenerateError::DuplicateType {
                name: def.name.clone(),
            });
        }
        let repr = EnumRepr::for_bits(def.length_in_bits).ok_or_else(|| {
            GenerateError::UnsupportedEnumWidth {
                name: def.name.clone(),
                bits: def.length_in_bits,
            }
        })?;

        let mut constants = HashSet::new();
        let mut values = Vec::with_capacity(def.values.len());
        for v in &def.values {
            if v.value < 0 || v.value as u64 > repr.max_value() {
                return Err(GenerateError::EnumValueOutOfRange {
                    name: def.name.clone(),
                    member: v.name.clone(),
                    value: v.value,
                    repr: repr.rust_type(),
                });
            }
            let name = const_ident(&v.name);
            if !constants.insert(name.clone()) {
                return Err(GenerateError::DuplicateEnumMember {
                    name: def.name.clone(),
                    constant: name,
                });
            }
            values.push(Value {
                name,
                short_name: v.name.clone(),
                value: v.value,
            });
        }

        tracing::debug!(name = %def.name, repr = repr.rust_type(), "resolved enum");
        out.push(Type {
            name: def.name.clone(),
            kind: Kind::Enum,
            repr: Some(repr),
            base: None,
            fields: Vec::new(),
            values,
        });
    }
    Ok(out)
}

//! Registry Builder: emits the initializers that populate the extension
//! object and service registries, keyed by binary encoding identifier.

use std::{collections::HashMap, fmt::Write as _};

use crate::{
    emit::write_header,
    error::GenerateError,
    ids::IdTable,
    model::Type,
    names::{const_ident, encoding_id_name},
};

/// Check that every type has an encoding identifier and that no two types share one.
///
/// Registration would otherwise fail at process start; catching it here makes
/// a dictionary/table mismatch a generation error.
pub fn validate_identifiers<'a>(
    types: impl IntoIterator<Item = &'a Type>,
    ids: &IdTable,
) -> Result<(), GenerateError> {
    let mut owners: HashMap<u32, &str> = HashMap::new();
    for t in types {
        let name = encoding_id_name(&t.name);
        let id = ids
            .get(&name)
            .ok_or(GenerateError::MissingIdentifier { name })?;
        if let Some(first) = owners.insert(id, &t.name) {
            return Err(GenerateError::DuplicateIdentifier {
                id,
                first: first.to_string(),
                second: t.name.clone(),
            });
        }
    }
    Ok(())
}

/// Render `register_extension_objects`, registering every extension object type.
pub fn emit_register_extension_objects(
    objects: &[Type],
    prelude: &str,
) -> Result<String, GenerateError> {
    emit_register_fn(
        objects.iter(),
        prelude,
        "register_extension_objects",
        "Register every generated extension object under its binary encoding identifier.",
    )
}

/// Render `register_services`, registering request, response and fault messages only.
pub fn emit_register_services(objects: &[Type], prelude: &str) -> Result<String, GenerateError> {
    emit_register_fn(
        objects.iter().filter(|t| t.is_service()),
        prelude,
        "register_services",
        "Register every service message under its binary encoding identifier.",
    )
}

fn emit_register_fn<'a>(
    types: impl Iterator<Item = &'a Type>,
    prelude: &str,
    fn_name: &str,
    doc: &str,
) -> Result<String, GenerateError> {
    let mut out = String::new();
    write_header(&mut out, Some(prelude))?;
    writeln!(out)?;
    writeln!(out, "/// {doc}")?;
    writeln!(
        out,
        "pub fn {fn_name}(registry: &mut TypeRegistry) -> Result<(), RegistryError> {{"
    )?;
    let mut count = 0usize;
    for t in types {
        writeln!(
            out,
            "    registry.register::<{}>(id::{}, \"{}\")?;",
            t.name,
            const_ident(&encoding_id_name(&t.name)),
            t.name
        )?;
        count += 1;
    }
    writeln!(out, "    Ok(())")?;
    writeln!(out, "}}")?;
    tracing::debug!(function = fn_name, count, "emitted registry initializer");
    Ok(out)
}

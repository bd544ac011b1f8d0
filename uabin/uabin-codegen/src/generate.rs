//! Pipeline driver tying resolution, emission and registry building together.

use std::{fs, path::Path};

use crate::{
    emit::{emit_enums, emit_extension_objects},
    enums::enums,
    error::GenerateError,
    ids::{IdTable, emit_ids},
    register::{emit_register_extension_objects, emit_register_services, validate_identifiers},
    resolver::{HierarchyRoots, extension_objects},
    schema::TypeDictionary,
};

/// Options for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Module path glob-imported by every generated file. It must provide the
    /// codec traits, built-in types, registry types and the `id` module.
    pub prelude: String,
    pub roots: HierarchyRoots,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            prelude: "crate::gen_prelude".to_string(),
            roots: HierarchyRoots::default(),
        }
    }
}

/// Source text of every generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFiles {
    pub enums: String,
    pub extension_objects: String,
    pub register_extension_objects: String,
    pub register_services: String,
    /// Present when an identifier table was supplied.
    pub ids: Option<String>,
}

impl GeneratedFiles {
    pub const ENUMS_FILE: &'static str = "enums_gen.rs";
    pub const EXTENSION_OBJECTS_FILE: &'static str = "extobjs_gen.rs";
    pub const REGISTER_EXTENSION_OBJECTS_FILE: &'static str = "register_extobjs_gen.rs";
    pub const REGISTER_SERVICES_FILE: &'static str = "service_gen.rs";
    pub const IDS_FILE: &'static str = "id_gen.rs";

    /// `(file name, contents)` pairs in a stable order.
    pub fn files(&self) -> Vec<(&'static str, &str)> {
        let mut files = vec![
            (Self::ENUMS_FILE, self.enums.as_str()),
            (Self::EXTENSION_OBJECTS_FILE, self.extension_objects.as_str()),
            (
                Self::REGISTER_EXTENSION_OBJECTS_FILE,
                self.register_extension_objects.as_str(),
            ),
            (Self::REGISTER_SERVICES_FILE, self.register_services.as_str()),
        ];
        if let Some(ids) = &self.ids {
            files.push((Self::IDS_FILE, ids.as_str()));
        }
        files
    }

    /// Write every file into `dir`, creating it when missing.
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<(), GenerateError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|source| GenerateError::Write {
            path: dir.display().to_string(),
            source,
        })?;
        for (name, contents) in self.files() {
            let path = dir.join(name);
            fs::write(&path, contents).map_err(|source| GenerateError::Write {
                path: path.display().to_string(),
                source,
            })?;
            tracing::info!(path = %path.display(), "wrote generated file");
        }
        Ok(())
    }
}

/// Run the whole pipeline over `dict`.
///
/// When `ids` is given, every registered type must have a unique binary
/// encoding identifier in it and the table itself is rendered as `id_gen.rs`.
pub fn generate(
    dict: &TypeDictionary,
    ids: Option<&IdTable>,
    options: &GenerateOptions,
) -> Result<GeneratedFiles, GenerateError> {
    let enum_types = enums(dict)?;
    let objects = extension_objects(dict, &options.roots)?;
    tracing::debug!(
        enums = enum_types.len(),
        extension_objects = objects.len(),
        "resolved type dictionary"
    );

    match ids {
        Some(ids) => validate_identifiers(&objects, ids)?,
        None => tracing::warn!("no identifier table given; skipping identifier validation"),
    }

    Ok(GeneratedFiles {
        enums: emit_enums(&enum_types, &options.prelude)?,
        extension_objects: emit_extension_objects(&objects, &options.prelude)?,
        register_extension_objects: emit_register_extension_objects(&objects, &options.prelude)?,
        register_services: emit_register_services(&objects, &options.prelude)?,
        ids: ids.map(emit_ids).transpose()?,
    })
}

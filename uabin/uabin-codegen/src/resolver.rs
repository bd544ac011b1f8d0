//! Hierarchy resolution: selects the structures that derive, directly or
//! transitively, from one of the abstract roots and turns them into
//! extension object [`Type`]s.
//!
//! # Resolution strategy
//!
//! Resolution runs in two passes so that the order of definitions in the
//! dictionary does not matter:
//!
//! 1. **Collect**: index every structure by name.
//! 2. **Walk**: follow each structure's base chain (memoized) until it hits a
//!    root (member), a base outside the dictionary namespace (not a member),
//!    or an error.
//!
//! A `tns:` base that names no structure of the dictionary is an error, as is
//! a cyclic chain. Members are emitted in dictionary order.

use std::collections::{HashMap, HashSet};

use crate::{
    error::GenerateError,
    field_type::{TypeScope, map_field_type, strip_namespace},
    model::{Field, Kind, Type},
    names::field_ident,
    schema::{StructDef, TypeDictionary},
};

/// The two abstract roots every extension object derives from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyRoots {
    /// Qualified names, e.g. `ua:ExtensionObject`.
    pub roots: [String; 2],
}

impl HierarchyRoots {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            roots: [first.into(), second.into()],
        }
    }

    pub fn contains(&self, qualified: &str) -> bool {
        self.roots.iter().any(|r| r == qualified)
    }
}

impl Default for HierarchyRoots {
    /// `DataTypeDefinition` is referenced by the standard dictionary but never
    /// defined there; it is an abstract base without fields.
    fn default() -> Self {
        Self::new("ua:ExtensionObject", "tns:DataTypeDefinition")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Membership {
    Visiting,
    Resolved(bool),
}

struct Walker<'a> {
    roots: &'a HierarchyRoots,
    structs: HashMap<&'a str, &'a StructDef>,
    state: HashMap<&'a str, Membership>,
}

impl<'a> Walker<'a> {
    fn derives_from_root(&mut self, def: &'a StructDef) -> Result<bool, GenerateError> {
        match self.state.get(def.name.as_str()) {
            Some(Membership::Resolved(member)) => return Ok(*member),
            Some(Membership::Visiting) => {
                return Err(GenerateError::BaseCycle {
                    type_name: def.name.clone(),
                });
            }
            None => {}
        }
        self.state.insert(&def.name, Membership::Visiting);

        let member = match def.base_type.as_deref() {
            None => false,
            Some(base) if self.roots.contains(base) => true,
            Some(base) => match base.strip_prefix("tns:") {
                Some(name) => {
                    let parent = self.structs.get(name).copied().ok_or_else(|| {
                        GenerateError::UnresolvedBase {
                            type_name: def.name.clone(),
                            base: base.to_string(),
                        }
                    })?;
                    self.derives_from_root(parent)?
                }
                None => false,
            },
        };

        self.state.insert(&def.name, Membership::Resolved(member));
        Ok(member)
    }
}

/// Resolve every structure of `dict` deriving from one of `roots`.
pub fn extension_objects(
    dict: &TypeDictionary,
    roots: &HierarchyRoots,
) -> Result<Vec<Type>, GenerateError> {
    let mut structs = HashMap::with_capacity(dict.structs.len());
    for def in &dict.structs {
        let clashes_with_enum = dict.enum_def(&def.name).is_some();
        if structs.insert(def.name.as_str(), def).is_some() || clashes_with_enum {
            return Err(GenerateError::DuplicateType {
                name: def.name.clone(),
            });
        }
    }

    let mut walker = Walker {
        roots,
        structs,
        state: HashMap::new(),
    };
    let mut members = Vec::new();
    for def in &dict.structs {
        if walker.derives_from_root(def)? {
            members.push(def);
        } else {
            tracing::debug!(
                name = %def.name,
                base = def.base_type.as_deref().unwrap_or("<none>"),
                "skipping structure outside the extension object hierarchy"
            );
        }
    }

    let scope = TypeScope {
        enums: dict.enums.iter().map(|e| e.name.as_str()).collect(),
        structs: members.iter().map(|d| d.name.as_str()).collect(),
    };

    members
        .into_iter()
        .map(|def| resolve_struct(&scope, def))
        .collect()
}

fn resolve_struct(scope: &TypeScope<'_>, def: &StructDef) -> Result<Type, GenerateError> {
    let mut idents = HashSet::new();
    let mut fields = Vec::with_capacity(def.fields.len());

    for f in &def.fields {
        if def.is_length_field(f) {
            continue;
        }
        let ident = field_ident(&f.name);
        if !idents.insert(ident.clone()) {
            return Err(GenerateError::DuplicateField {
                type_name: def.name.clone(),
                ident,
            });
        }
        fields.push(Field {
            name: f.name.clone(),
            ident,
            ty: map_field_type(scope, def, f)?,
        });
    }

    let base = def.base_type.as_deref().map(strip_namespace).map(str::to_string);
    tracing::debug!(name = %def.name, base = ?base, fields = fields.len(), "resolved structure");

    Ok(Type {
        name: def.name.clone(),
        kind: Kind::ExtensionObject,
        repr: None,
        base,
        fields,
        values: Vec::new(),
    })
}

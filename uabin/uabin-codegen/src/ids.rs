//! Numeric identifier table (`Name,Id,Kind` CSV).

use std::{collections::HashMap, fmt::Write as _};

use crate::{emit::write_header, error::GenerateError, names::const_ident};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdEntry {
    pub name: String,
    pub id: u32,
    /// Node class of the entry, e.g. `DataType` or `Object`.
    pub kind: String,
}

/// Name → numeric identifier mapping, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdTable {
    entries: Vec<IdEntry>,
    by_name: HashMap<String, usize>,
}

impl IdTable {
    /// Parse the CSV form. Blank lines and `#` comments are skipped.
    pub fn from_csv(text: &str) -> Result<Self, GenerateError> {
        let mut table = Self::default();
        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let invalid = |detail: String| GenerateError::InvalidIdTable {
                line: line_no,
                detail,
            };

            let cols: Vec<&str> = line.split(',').map(str::trim).collect();
            let [name, id, kind] = cols.as_slice() else {
                return Err(invalid(format!("expected 3 columns, found {}", cols.len())));
            };
            if name.is_empty() {
                return Err(invalid("empty name".to_string()));
            }
            let id = id
                .parse::<u32>()
                .map_err(|e| invalid(format!("invalid id '{id}': {e}")))?;
            table
                .insert(IdEntry {
                    name: name.to_string(),
                    id,
                    kind: kind.to_string(),
                })
                .map_err(|name| invalid(format!("duplicate name '{name}'")))?;
        }
        Ok(table)
    }

    /// Append an entry; returns the name back when it is already present.
    pub fn insert(&mut self, entry: IdEntry) -> Result<(), String> {
        if self.by_name.contains_key(&entry.name) {
            return Err(entry.name);
        }
        self.by_name.insert(entry.name.clone(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.by_name.get(name).map(|&i| self.entries[i].id)
    }

    pub fn entries(&self) -> &[IdEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Render one `pub const` per table entry.
pub fn emit_ids(table: &IdTable) -> Result<String, GenerateError> {
    let mut out = String::new();
    write_header(&mut out, None)?;
    writeln!(out)?;

    let mut seen: HashMap<String, &str> = HashMap::new();
    for e in table.entries() {
        let ident = const_ident(&e.name);
        if let Some(first) = seen.insert(ident.clone(), &e.name) {
            return Err(GenerateError::IdentifierCollision {
                first: first.to_string(),
                second: e.name.clone(),
                ident,
            });
        }
        writeln!(out, "/// `{}` ({}).", e.name, e.kind)?;
        writeln!(out, "pub const {ident}: u32 = {};", e.id)?;
    }
    Ok(out)
}

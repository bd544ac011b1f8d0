//! Identifier-keyed registries mapping a wire identifier to a zero-value
//! factory of the concrete type.
//!
//! Both registries are populated by the generated initializers exactly once,
//! on first access through [`registries`], and are read-only afterwards.

use std::{
    collections::{BTreeMap, btree_map::Entry},
    sync::LazyLock,
};

use crate::{
    error::RegistryError,
    extension_object::ExtensionObjectBody,
    generated::register::{register_extension_objects, register_services},
};

/// Builds the zero value of a registered type.
pub type BodyFactory = fn() -> Box<dyn ExtensionObjectBody>;

fn new_body<T: ExtensionObjectBody + Default>() -> Box<dyn ExtensionObjectBody> {
    Box::new(T::default())
}

#[derive(Debug, Clone, Copy)]
struct Registration {
    name: &'static str,
    factory: BodyFactory,
}

#[derive(Debug, Clone)]
pub struct TypeRegistry {
    kind: &'static str,
    entries: BTreeMap<u32, Registration>,
}

impl TypeRegistry {
    /// An empty registry; `kind` names it in errors and logs.
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            entries: BTreeMap::new(),
        }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Register `T` under `id`.
    pub fn register<T: ExtensionObjectBody + Default>(
        &mut self,
        id: u32,
        name: &'static str,
    ) -> Result<(), RegistryError> {
        self.register_factory(id, name, new_body::<T>)
    }

    /// Register a factory under `id`. An id can be registered only once.
    pub fn register_factory(
        &mut self,
        id: u32,
        name: &'static str,
        factory: BodyFactory,
    ) -> Result<(), RegistryError> {
        match self.entries.entry(id) {
            Entry::Occupied(existing) => Err(RegistryError::DuplicateIdentifier {
                registry: self.kind,
                id,
                existing: existing.get().name,
                new: name,
            }),
            Entry::Vacant(slot) => {
                slot.insert(Registration { name, factory });
                Ok(())
            }
        }
    }

    /// Zero value of the type registered under `id`.
    pub fn new_value(&self, id: u32) -> Option<Box<dyn ExtensionObjectBody>> {
        self.entries.get(&id).map(|r| (r.factory)())
    }

    pub fn name(&self, id: u32) -> Option<&'static str> {
        self.entries.get(&id).map(|r| r.name)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(id, name)` pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &'static str)> + '_ {
        self.entries.iter().map(|(&id, r)| (id, r.name))
    }
}

/// The extension object registry and the service registry.
#[derive(Debug, Clone)]
pub struct Registries {
    /// Every generated extension object, keyed by binary encoding id.
    pub extension_objects: TypeRegistry,
    /// Request, response and fault messages, keyed by binary encoding id.
    pub services: TypeRegistry,
}

impl Registries {
    /// Populate fresh registries with every generated type.
    pub fn build() -> Result<Self, RegistryError> {
        let mut extension_objects = TypeRegistry::new("extension object");
        register_extension_objects(&mut extension_objects)?;
        let mut services = TypeRegistry::new("service");
        register_services(&mut services)?;
        tracing::debug!(
            extension_objects = extension_objects.len(),
            services = services.len(),
            "populated type registries"
        );
        Ok(Self {
            extension_objects,
            services,
        })
    }
}

static REGISTRIES: LazyLock<Result<Registries, RegistryError>> = LazyLock::new(Registries::build);

/// The process-wide registries, built on first call.
///
/// Every decode path that needs a registry goes through here, so the
/// registries are complete before the first lookup.
pub fn registries() -> Result<&'static Registries, RegistryError> {
    REGISTRIES.as_ref().map_err(Clone::clone)
}

use std::any::TypeId;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::descriptor::{Configurable, PropertyMetadata};
use crate::types::declared::short_type_name;

/// Module grouping information attached to a configurable type
///
/// A module carries a description and references to other configurable
/// types whose properties belong to the same documentation group.
#[derive(Debug, Clone, Default)]
pub struct ModuleInfo {
    description: String,
    refs: Vec<TypeRef>,
}

impl ModuleInfo {
    /// Create a new module with a description and no references
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            refs: Vec::new(),
        }
    }

    /// Add a referenced configurable type
    pub fn with_ref<T: Configurable>(mut self) -> Self {
        self.refs.push(TypeRef::of::<T>());
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn refs(&self) -> &[TypeRef] {
        &self.refs
    }
}

/// Type-erased handle to a configurable type
#[derive(Clone, Copy)]
pub struct TypeRef {
    type_id: TypeId,
    type_name: &'static str,
    properties: fn() -> Vec<PropertyMetadata>,
    module: fn() -> Option<ModuleInfo>,
}

impl TypeRef {
    pub fn of<T: Configurable>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            properties: || T::properties().metadata(),
            module: T::module,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn short_name(&self) -> &'static str {
        short_type_name(self.type_name)
    }

    /// Every declared property of the type, in declaration order
    pub fn properties(&self) -> Vec<PropertyMetadata> {
        (self.properties)()
    }

    pub fn module(&self) -> Option<ModuleInfo> {
        (self.module)()
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for TypeRef {}

impl Hash for TypeRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeRef").field(&self.type_name).finish()
    }
}

/// Properties declared directly on the given types
///
/// Each distinct type contributes once; module references are not followed.
pub fn annotated_properties(types: &[TypeRef]) -> Vec<PropertyMetadata> {
    let mut seen = HashSet::new();
    types
        .iter()
        .filter(|ty| seen.insert(ty.type_id))
        .flat_map(TypeRef::properties)
        .collect()
}

/// The given types plus every type reachable through module references
///
/// Depth-first in reference order, each type once. Reference cycles terminate.
pub fn referenced_types(types: &[TypeRef]) -> Vec<TypeRef> {
    let mut visited = HashSet::new();
    let mut ordered = Vec::new();
    for ty in types {
        visit(*ty, &mut visited, &mut ordered);
    }
    ordered
}

fn visit(ty: TypeRef, visited: &mut HashSet<TypeId>, ordered: &mut Vec<TypeRef>) {
    if !visited.insert(ty.type_id) {
        return;
    }
    ordered.push(ty);

    if let Some(module) = ty.module() {
        tracing::debug!(
            "Following {} module references of {}",
            module.refs().len(),
            ty.short_name()
        );
        for referenced in module.refs() {
            visit(*referenced, visited, ordered);
        }
    }
}

/// Properties of the given types and of every type they reference
pub fn referenced_properties(types: &[TypeRef]) -> Vec<PropertyMetadata> {
    referenced_types(types)
        .iter()
        .flat_map(TypeRef::properties)
        .collect()
}

use confix_core::{referenced_types, PropertyMetadata, TypeRef};
use serde::{Deserialize, Serialize};

use crate::error::ToolsResult;

/// Documented properties of one configurable type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Type name without its module path
    pub type_name: String,
    /// Description of the module the type declares, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    pub properties: Vec<PropertyMetadata>,
}

/// Machine-readable catalog of configuration properties, grouped per type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Catalog of `types` and every type reachable through module references
    pub fn from_types(types: &[TypeRef]) -> Self {
        let entries = referenced_types(types)
            .iter()
            .map(|ty| CatalogEntry {
                type_name: ty.short_name().to_string(),
                module: ty.module().map(|m| m.description().to_string()),
                properties: ty.properties(),
            })
            .collect();
        Self { entries }
    }

    /// Every property across all entries, in catalog order
    pub fn properties(&self) -> impl Iterator<Item = &PropertyMetadata> {
        self.entries.iter().flat_map(|entry| entry.properties.iter())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> ToolsResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> ToolsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> ToolsResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confix_core::{Configurable, ModuleInfo, PropertyDescriptor, PropertyTable};

    #[derive(Default)]
    struct Queue {
        depth: i32,
    }

    struct Jobs;

    impl Configurable for Queue {
        fn properties() -> PropertyTable<Self> {
            PropertyTable::new().with(
                PropertyDescriptor::field("queue.depth", |q: &mut Queue| &mut q.depth)
                    .with_default("64")
                    .with_description("maximum queued jobs"),
            )
        }
    }

    impl Configurable for Jobs {
        fn properties() -> PropertyTable<Self> {
            PropertyTable::new()
        }

        fn module() -> Option<ModuleInfo> {
            Some(ModuleInfo::new("background jobs").with_ref::<Queue>())
        }
    }

    #[test]
    fn test_catalog_groups_per_type() {
        let catalog = Catalog::from_types(&[TypeRef::of::<Jobs>()]);

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.entries[0].type_name, "Jobs");
        assert_eq!(catalog.entries[0].module.as_deref(), Some("background jobs"));
        assert_eq!(catalog.entries[1].type_name, "Queue");
        assert_eq!(catalog.entries[1].module, None);
        assert_eq!(catalog.properties().count(), 1);
    }

    #[test]
    fn test_catalog_json() {
        let catalog = Catalog::from_types(&[TypeRef::of::<Queue>()]);
        let json = catalog.to_json_pretty().unwrap();

        assert!(json.contains("\"key\": \"queue.depth\""));
        assert!(json.contains("\"member\": \"field\""));
        assert!(!json.contains("\"module\""));
        assert_eq!(Catalog::from_json(&json).unwrap(), catalog);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(Catalog::from_json("{\"entries\": 3}").is_err());
    }
}

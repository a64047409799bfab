use confix_core::{annotated_properties, referenced_properties, PropertyMetadata, TypeRef, ValueSource};
use std::collections::{BTreeSet, HashSet};

/// Compares declared property keys with the keys a source actually supplies
#[derive(Debug, Clone)]
pub struct Analyzer {
    properties: Vec<PropertyMetadata>,
    prefix: String,
}

impl Analyzer {
    /// Analyze the properties declared directly on `types`
    pub fn new(types: &[TypeRef]) -> Self {
        Self::from_metadata(annotated_properties(types))
    }

    /// Analyze `types` and every type their modules reference
    pub fn with_references(types: &[TypeRef]) -> Self {
        Self::from_metadata(referenced_properties(types))
    }

    pub fn from_metadata(properties: Vec<PropertyMetadata>) -> Self {
        Self {
            properties,
            prefix: String::new(),
        }
    }

    /// Compare against keys scoped under `prefix`
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Declared keys the source does not supply, in declaration order
    pub fn missing<S: ValueSource + ?Sized>(&self, source: &S) -> Vec<String> {
        let mut seen = HashSet::new();
        self.properties
            .iter()
            .map(|property| format!("{}{}", self.prefix, property.key))
            .filter(|key| !source.contains_key(key))
            .filter(|key| seen.insert(key.clone()))
            .collect()
    }

    /// Supplied keys no declared property consumes, sorted
    pub fn extra<S: ValueSource + ?Sized>(&self, source: &S) -> Vec<String> {
        let declared: HashSet<String> = self
            .properties
            .iter()
            .map(|property| format!("{}{}", self.prefix, property.key))
            .collect();

        let extra: BTreeSet<String> = source
            .keys()
            .into_iter()
            .filter(|key| !declared.contains(key))
            .collect();

        if !extra.is_empty() {
            tracing::debug!("{} supplied keys are not declared by any property", extra.len());
        }
        extra.into_iter().collect()
    }
}

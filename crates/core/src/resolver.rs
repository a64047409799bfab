use std::fmt;
use std::sync::Arc;

use crate::converter::{Converter, ConverterRegistry};
use crate::descriptor::{
    Configurable, MemberKind, PropertyDescriptor, PropertyMetadata, PropertyTable,
};

/// A descriptor paired with the converter selected for its declared type
pub struct ResolvedProperty<T> {
    descriptor: PropertyDescriptor<T>,
    converter: Arc<dyn Converter>,
}

impl<T> ResolvedProperty<T> {
    pub fn descriptor(&self) -> &PropertyDescriptor<T> {
        &self.descriptor
    }

    pub fn converter(&self) -> &dyn Converter {
        self.converter.as_ref()
    }

    pub fn key(&self) -> &str {
        self.descriptor.key()
    }
}

impl<T> Clone for ResolvedProperty<T> {
    fn clone(&self) -> Self {
        Self {
            descriptor: self.descriptor.clone(),
            converter: self.converter.clone(),
        }
    }
}

impl<T> fmt::Debug for ResolvedProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedProperty")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

/// The resolved, immutable property list of one target type
///
/// Order is fields first, then setters, each in table order. For duplicate
/// keys every descriptor is injected, so the last one in this order wins.
pub struct ResolvedPropertySet<T> {
    type_name: &'static str,
    properties: Vec<ResolvedProperty<T>>,
    skipped: Vec<PropertyMetadata>,
}

impl<T: 'static> ResolvedPropertySet<T> {
    /// Resolve an explicit descriptor table against a registry
    pub fn from_table(table: PropertyTable<T>, registry: &ConverterRegistry) -> Self {
        let type_name = std::any::type_name::<T>();
        let (fields, setters): (Vec<_>, Vec<_>) = table
            .into_iter()
            .partition(|descriptor| descriptor.member() == MemberKind::Field);

        let mut properties = Vec::with_capacity(fields.len() + setters.len());
        let mut skipped = Vec::new();

        for descriptor in fields.into_iter().chain(setters) {
            if descriptor.key().is_empty() {
                tracing::warn!(
                    "Skipping property of type {} on {}: key is empty",
                    descriptor.declared_type().short_name(),
                    type_name
                );
                skipped.push(descriptor.metadata());
                continue;
            }

            match registry.lookup(descriptor.declared_type()) {
                Some(converter) => properties.push(ResolvedProperty {
                    descriptor,
                    converter,
                }),
                None => {
                    tracing::debug!(
                        "No converter for property '{}' of type {} on {}, leaving it unmanaged",
                        descriptor.key(),
                        descriptor.declared_type().type_name(),
                        type_name
                    );
                    skipped.push(descriptor.metadata());
                }
            }
        }

        tracing::debug!(
            "Resolved {} properties for {} ({} skipped)",
            properties.len(),
            type_name,
            skipped.len()
        );

        Self {
            type_name,
            properties,
            skipped,
        }
    }
}

impl<T> ResolvedPropertySet<T> {
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResolvedProperty<T>> {
        self.properties.iter()
    }

    /// Unprefixed keys in resolution order
    pub fn keys(&self) -> Vec<&str> {
        self.properties.iter().map(ResolvedProperty::key).collect()
    }

    /// Documentation view of the managed properties in resolution order
    pub fn metadata(&self) -> Vec<PropertyMetadata> {
        self.properties
            .iter()
            .map(|property| property.descriptor.metadata())
            .collect()
    }

    /// Declared properties left unmanaged because no converter matched
    pub fn skipped(&self) -> &[PropertyMetadata] {
        &self.skipped
    }

    /// Render the values of `target` after injection, one line per property
    ///
    /// Each line reads `key = value [default value = d]`; the value is left
    /// out when it equals the default text. Setter values cannot be read back
    /// and fields need a [reader](PropertyDescriptor::with_reader), so both
    /// show a placeholder instead.
    pub fn describe(&self, target: &T) -> String {
        let mut out = String::new();

        for property in &self.properties {
            let descriptor = &property.descriptor;
            let value = match descriptor.member() {
                MemberKind::Setter => UNREADABLE_SETTER.to_string(),
                MemberKind::Field => descriptor
                    .read_value(target)
                    .unwrap_or_else(|| UNREADABLE_FIELD.to_string()),
            };

            out.push_str(descriptor.key());
            out.push_str(" = ");
            if value != descriptor.default_value() {
                out.push_str(&value);
                out.push(' ');
            }
            out.push_str("[default value = ");
            out.push_str(descriptor.default_value());
            out.push_str("]\n");
        }

        out
    }
}

const UNREADABLE_SETTER: &str = "[unknown - method properties not supported]";
const UNREADABLE_FIELD: &str = "[unknown - error accessing field]";

impl<'a, T> IntoIterator for &'a ResolvedPropertySet<T> {
    type Item = &'a ResolvedProperty<T>;
    type IntoIter = std::slice::Iter<'a, ResolvedProperty<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.iter()
    }
}

impl<T> fmt::Debug for ResolvedPropertySet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedPropertySet")
            .field("type_name", &self.type_name)
            .field("properties", &self.properties)
            .field("skipped", &self.skipped)
            .finish()
    }
}

/// One summary line per managed property
impl<T> fmt::Display for ResolvedPropertySet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for property in &self.properties {
            let descriptor = &property.descriptor;
            writeln!(
                f,
                "{{ key : {} }} {{ description : {} }} {{ type : {} }} {{ default : {} }}",
                descriptor.key(),
                descriptor.description(),
                descriptor.declared_type().short_name(),
                descriptor.default_value()
            )?;
        }
        Ok(())
    }
}

/// Resolve the descriptor table of `T` against a registry
///
/// Resolution has no side effects: resolving the same type against an
/// unchanged registry yields an equivalent set.
pub fn resolve<T: Configurable>(registry: &ConverterRegistry) -> ResolvedPropertySet<T> {
    ResolvedPropertySet::from_table(T::properties(), registry)
}

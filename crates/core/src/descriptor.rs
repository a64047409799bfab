use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt::Display;
use std::sync::Arc;

use crate::errors::AccessError;
use crate::module::ModuleInfo;
use crate::types::{BoxedValue, ConfigEnum, DeclaredType};

/// Erased write capability shared by field slots and setters
type Assign<T> = Arc<dyn Fn(&mut T, BoxedValue) -> Result<(), AccessError> + Send + Sync>;

/// Renders the current value of a field for [`describe`](crate::ResolvedPropertySet::describe)
type Read<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// How a property reaches its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    /// A field slot written in place
    Field,
    /// A single-value setter
    Setter,
}

/// Static metadata binding a configuration key to a type and an assignment target
pub struct PropertyDescriptor<T> {
    key: String,
    default_value: String,
    description: String,
    declared_type: DeclaredType,
    member: MemberKind,
    assign: Assign<T>,
    read: Option<Read<T>>,
}

impl<T: 'static> PropertyDescriptor<T> {
    /// Property stored directly in a field slot
    pub fn field<V: Any + Send>(key: impl Into<String>, slot: fn(&mut T) -> &mut V) -> Self {
        Self::new(key, DeclaredType::of::<V>(), MemberKind::Field, slot_writer(slot))
    }

    /// Enumeration property stored directly in a field slot
    pub fn enum_field<E: ConfigEnum>(key: impl Into<String>, slot: fn(&mut T) -> &mut E) -> Self {
        Self::new(
            key,
            DeclaredType::enumeration::<E>(),
            MemberKind::Field,
            slot_writer(slot),
        )
    }

    /// Property forwarded to a single-value setter
    pub fn setter<V, F>(key: impl Into<String>, setter: F) -> Self
    where
        V: Any + Send,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        Self::try_setter(key, move |target: &mut T, value: V| {
            setter(target, value);
            Ok::<(), std::convert::Infallible>(())
        })
    }

    /// Property forwarded to a setter that may reject the value
    ///
    /// A rejection surfaces as an access failure, not a parse failure.
    pub fn try_setter<V, E, F>(key: impl Into<String>, setter: F) -> Self
    where
        V: Any + Send,
        E: Display,
        F: Fn(&mut T, V) -> Result<(), E> + Send + Sync + 'static,
    {
        Self::new(
            key,
            DeclaredType::of::<V>(),
            MemberKind::Setter,
            setter_writer(setter),
        )
    }

    /// Enumeration property forwarded to a single-value setter
    pub fn enum_setter<E, F>(key: impl Into<String>, setter: F) -> Self
    where
        E: ConfigEnum,
        F: Fn(&mut T, E) + Send + Sync + 'static,
    {
        Self::new(
            key,
            DeclaredType::enumeration::<E>(),
            MemberKind::Setter,
            setter_writer(move |target: &mut T, value: E| {
                setter(target, value);
                Ok::<(), std::convert::Infallible>(())
            }),
        )
    }

    fn new(
        key: impl Into<String>,
        declared_type: DeclaredType,
        member: MemberKind,
        assign: Assign<T>,
    ) -> Self {
        Self {
            key: key.into(),
            default_value: String::new(),
            description: String::new(),
            declared_type,
            member,
            assign,
            read: None,
        }
    }
}

impl<T> PropertyDescriptor<T> {
    /// Set the text used when the key is absent or unparsable
    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = default_value.into();
        self
    }

    /// Set the free-text description used by documentation tooling
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Render the current value of a field property when describing a target
    ///
    /// Ignored for setters, whose values cannot be read back.
    pub fn with_reader<F>(mut self, reader: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.read = Some(Arc::new(reader));
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn default_value(&self) -> &str {
        &self.default_value
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn declared_type(&self) -> &DeclaredType {
        &self.declared_type
    }

    pub fn member(&self) -> MemberKind {
        self.member
    }

    /// Export the documentation view of this property
    pub fn metadata(&self) -> PropertyMetadata {
        PropertyMetadata {
            key: self.key.clone(),
            default_value: self.default_value.clone(),
            description: self.description.clone(),
            type_name: self.declared_type.short_name().to_string(),
            member: self.member,
        }
    }

    /// Write an already converted value into `target`
    pub fn assign(&self, target: &mut T, value: BoxedValue) -> Result<(), AccessError> {
        (self.assign)(target, value)
    }

    /// Current value of a field property, if it has a reader
    pub fn read_value(&self, target: &T) -> Option<String> {
        match self.member {
            MemberKind::Field => self.read.as_ref().map(|read| read(target)),
            MemberKind::Setter => None,
        }
    }
}

impl<T> Clone for PropertyDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            default_value: self.default_value.clone(),
            description: self.description.clone(),
            declared_type: self.declared_type,
            member: self.member,
            assign: self.assign.clone(),
            read: self.read.clone(),
        }
    }
}

impl<T> std::fmt::Debug for PropertyDescriptor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("key", &self.key)
            .field("default_value", &self.default_value)
            .field("description", &self.description)
            .field("declared_type", &self.declared_type)
            .field("member", &self.member)
            .field("readable", &self.read.is_some())
            .finish()
    }
}

fn slot_writer<T: 'static, V: Any + Send>(slot: fn(&mut T) -> &mut V) -> Assign<T> {
    Arc::new(move |target: &mut T, value: BoxedValue| {
        let value = downcast::<V>(value)?;
        *slot(target) = value;
        Ok(())
    })
}

fn setter_writer<T, V, E, F>(setter: F) -> Assign<T>
where
    T: 'static,
    V: Any + Send,
    E: Display,
    F: Fn(&mut T, V) -> Result<(), E> + Send + Sync + 'static,
{
    Arc::new(move |target: &mut T, value: BoxedValue| {
        let value = downcast::<V>(value)?;
        setter(target, value).map_err(|e| AccessError::rejected(e.to_string()))
    })
}

fn downcast<V: Any>(value: BoxedValue) -> Result<V, AccessError> {
    value
        .downcast::<V>()
        .map(|value| *value)
        .map_err(|_| AccessError::TypeMismatch {
            expected: std::any::type_name::<V>(),
        })
}

/// Documentation view of a property, consumed by template and analysis tooling
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyMetadata {
    pub key: String,
    pub default_value: String,
    pub description: String,
    pub type_name: String,
    pub member: MemberKind,
}

/// Ordered descriptor table of one target type
pub struct PropertyTable<T> {
    descriptors: Vec<PropertyDescriptor<T>>,
}

impl<T> PropertyTable<T> {
    pub fn new() -> Self {
        Self {
            descriptors: Vec::new(),
        }
    }

    /// Append a descriptor
    pub fn with(mut self, descriptor: PropertyDescriptor<T>) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    pub fn push(&mut self, descriptor: PropertyDescriptor<T>) {
        self.descriptors.push(descriptor);
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Descriptors in declaration order
    pub fn iter(&self) -> std::slice::Iter<'_, PropertyDescriptor<T>> {
        self.descriptors.iter()
    }

    /// Documentation view of every declared property, supported or not
    pub fn metadata(&self) -> Vec<PropertyMetadata> {
        self.descriptors.iter().map(PropertyDescriptor::metadata).collect()
    }
}

impl<T> Default for PropertyTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IntoIterator for PropertyTable<T> {
    type Item = PropertyDescriptor<T>;
    type IntoIter = std::vec::IntoIter<PropertyDescriptor<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.descriptors.into_iter()
    }
}

impl<T> FromIterator<PropertyDescriptor<T>> for PropertyTable<T> {
    fn from_iter<I: IntoIterator<Item = PropertyDescriptor<T>>>(iter: I) -> Self {
        Self {
            descriptors: iter.into_iter().collect(),
        }
    }
}

impl<T> std::fmt::Debug for PropertyTable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.descriptors.iter()).finish()
    }
}

/// A type whose members are populated from configuration
///
/// `properties` is the explicit descriptor table of the type; it is called
/// once per resolution, so building it should have no side effects.
pub trait Configurable: Sized + 'static {
    /// Descriptor table in declaration order
    fn properties() -> PropertyTable<Self>;

    /// Module grouping information for documentation tooling
    fn module() -> Option<ModuleInfo> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Limits {
        max: i64,
        labels: Vec<String>,
    }

    impl Limits {
        fn add_label(&mut self, label: String) -> Result<(), String> {
            if label.is_empty() {
                return Err("label must not be empty".to_string());
            }
            self.labels.push(label);
            Ok(())
        }
    }

    #[test]
    fn test_field_descriptor_writes_slot() {
        let descriptor = PropertyDescriptor::field("max", |l: &mut Limits| &mut l.max)
            .with_default("10")
            .with_description("upper bound");
        let mut limits = Limits::default();

        descriptor.assign(&mut limits, Box::new(25_i64)).unwrap();
        assert_eq!(limits.max, 25);
        assert_eq!(descriptor.key(), "max");
        assert_eq!(descriptor.default_value(), "10");
        assert_eq!(descriptor.member(), MemberKind::Field);
    }

    #[test]
    fn test_wrong_value_type_is_access_error() {
        let descriptor = PropertyDescriptor::field("max", |l: &mut Limits| &mut l.max);
        let mut limits = Limits::default();

        let error = descriptor
            .assign(&mut limits, Box::new("25".to_string()))
            .unwrap_err();
        assert!(matches!(error, AccessError::TypeMismatch { expected: "i64" }));
        assert_eq!(limits.max, 0);
    }

    #[test]
    fn test_setter_rejection_is_access_error() {
        let descriptor = PropertyDescriptor::try_setter("label", Limits::add_label);
        let mut limits = Limits::default();

        descriptor
            .assign(&mut limits, Box::new("a".to_string()))
            .unwrap();
        let error = descriptor
            .assign(&mut limits, Box::new(String::new()))
            .unwrap_err();

        assert_eq!(error, AccessError::rejected("label must not be empty"));
        assert_eq!(limits.labels, vec!["a".to_string()]);
        assert_eq!(descriptor.member(), MemberKind::Setter);
    }

    #[test]
    fn test_metadata_export() {
        let descriptor = PropertyDescriptor::setter("label", |l: &mut Limits, v: String| {
            l.labels.push(v)
        })
        .with_default("none")
        .with_description("a label");

        assert_eq!(
            descriptor.metadata(),
            PropertyMetadata {
                key: "label".to_string(),
                default_value: "none".to_string(),
                description: "a label".to_string(),
                type_name: "String".to_string(),
                member: MemberKind::Setter,
            }
        );
    }

    #[test]
    fn test_table_preserves_declaration_order() {
        let table: PropertyTable<Limits> = PropertyTable::new()
            .with(PropertyDescriptor::field("b", |l: &mut Limits| &mut l.max))
            .with(PropertyDescriptor::field("a", |l: &mut Limits| &mut l.max));

        let keys: Vec<_> = table.iter().map(|d| d.key().to_string()).collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(table.metadata().len(), 2);
    }
}

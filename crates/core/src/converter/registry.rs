use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;

use crate::converter::{
    BoolConverter, Converter, EnumConverter, LocatorConverter, NumericConverter, StringConverter,
};
use crate::types::{short_type_name, BigDecimal, BigInteger, DeclaredType};

/// Registered converter together with the name of the type it serves
#[derive(Clone)]
struct ConverterEntry {
    type_name: &'static str,
    converter: Arc<dyn Converter>,
}

/// Mapping from declared value type to converter
///
/// Registries are plain values: every engine owns its own, and there is no
/// process-wide default. [`ConverterRegistry::standard`] builds the built-in
/// set.
#[derive(Clone)]
pub struct ConverterRegistry {
    converters: HashMap<TypeId, ConverterEntry>,
    enum_converter: Option<Arc<dyn Converter>>,
}

impl ConverterRegistry {
    /// Create a registry with no converters at all
    pub fn empty() -> Self {
        Self {
            converters: HashMap::new(),
            enum_converter: None,
        }
    }

    /// Create a registry seeded with the standard converter set
    ///
    /// | Rust type | Converter |
    /// |---|---|
    /// | `bool` | [`BoolConverter`] |
    /// | `i32`, `i64`, `f32`, `f64` | [`NumericConverter`] (fallback 0) |
    /// | [`BigInteger`], [`BigDecimal`] | [`NumericConverter`] (fallback 0) |
    /// | `String` | [`StringConverter`] |
    /// | `url::Url`, `http::Uri`, `PathBuf`, `IpAddr` | [`LocatorConverter`] |
    /// | any [`ConfigEnum`](crate::ConfigEnum) | [`EnumConverter`] |
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry
            .register::<bool>(BoolConverter)
            .register::<i32>(NumericConverter::int32())
            .register::<i64>(NumericConverter::int64())
            .register::<f32>(NumericConverter::float32())
            .register::<f64>(NumericConverter::float64())
            .register::<BigInteger>(NumericConverter::big_integer())
            .register::<BigDecimal>(NumericConverter::big_decimal())
            .register::<String>(StringConverter)
            .register::<url::Url>(LocatorConverter::url())
            .register::<http::Uri>(LocatorConverter::uri())
            .register::<PathBuf>(LocatorConverter::path())
            .register::<IpAddr>(LocatorConverter::inet_address())
            .register_enum_converter(EnumConverter);
        registry
    }

    /// Register the converter for values of type `V`, replacing any existing one
    pub fn register<V: Any + Send>(&mut self, converter: impl Converter + 'static) -> &mut Self {
        self.register_shared::<V>(Arc::new(converter))
    }

    /// Register an already shared converter for values of type `V`
    pub fn register_shared<V: Any + Send>(&mut self, converter: Arc<dyn Converter>) -> &mut Self {
        self.converters.insert(
            TypeId::of::<V>(),
            ConverterEntry {
                type_name: std::any::type_name::<V>(),
                converter,
            },
        );
        self
    }

    /// Replace the converter used for enumerations without an exact registration
    pub fn register_enum_converter(&mut self, converter: impl Converter + 'static) -> &mut Self {
        self.enum_converter = Some(Arc::new(converter));
        self
    }

    /// Find the converter for a declared type
    ///
    /// An exact registration wins; otherwise enumerations fall back to the
    /// generic enum converter.
    pub fn lookup(&self, ty: &DeclaredType) -> Option<Arc<dyn Converter>> {
        if let Some(entry) = self.converters.get(&ty.type_id()) {
            return Some(entry.converter.clone());
        }
        if ty.is_enum() {
            return self.enum_converter.clone();
        }
        None
    }

    /// Check if an exact converter is registered for `V`
    pub fn contains<V: Any>(&self) -> bool {
        self.converters.contains_key(&TypeId::of::<V>())
    }

    pub fn has_enum_converter(&self) -> bool {
        self.enum_converter.is_some()
    }

    /// Number of exact registrations
    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty() && self.enum_converter.is_none()
    }

    /// Short names of the types with an exact registration, sorted
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self
            .converters
            .values()
            .map(|entry| short_type_name(entry.type_name))
            .collect();
        names.sort_unstable();
        names
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConverterRegistry")
            .field("types", &self.type_names())
            .field("enum_converter", &self.has_enum_converter())
            .finish()
    }
}

use std::any::{Any, TypeId};
use std::fmt;

use crate::types::ConfigEnum;

/// A converted value on its way to an assignment target
pub type BoxedValue = Box<dyn Any + Send>;

/// Semantic type of a property member, used as the converter registry key
#[derive(Clone, Copy)]
pub struct DeclaredType {
    type_id: TypeId,
    type_name: &'static str,
    enumeration: Option<EnumShape>,
}

impl DeclaredType {
    /// Declared type of a plain value type
    pub fn of<V: Any + Send>() -> Self {
        Self {
            type_id: TypeId::of::<V>(),
            type_name: std::any::type_name::<V>(),
            enumeration: None,
        }
    }

    /// Declared type of an enumeration, eligible for the generic enum converter
    pub fn enumeration<E: ConfigEnum>() -> Self {
        Self {
            type_id: TypeId::of::<E>(),
            type_name: std::any::type_name::<E>(),
            enumeration: Some(EnumShape {
                variants: E::VARIANTS,
                parse: parse_variant::<E>,
            }),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Fully qualified Rust type name
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Type name without its module path
    pub fn short_name(&self) -> &'static str {
        short_type_name(self.type_name)
    }

    pub fn is_enum(&self) -> bool {
        self.enumeration.is_some()
    }

    pub fn enum_shape(&self) -> Option<&EnumShape> {
        self.enumeration.as_ref()
    }
}

impl PartialEq for DeclaredType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for DeclaredType {}

impl fmt::Debug for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeclaredType")
            .field("type_name", &self.type_name)
            .field("is_enum", &self.is_enum())
            .finish()
    }
}

/// Constant table of an enumeration type
#[derive(Clone, Copy)]
pub struct EnumShape {
    variants: &'static [&'static str],
    parse: fn(&str) -> Option<BoxedValue>,
}

impl EnumShape {
    /// Declared constant names, in declaration order
    pub fn variants(&self) -> &'static [&'static str] {
        self.variants
    }

    /// Exact, case-sensitive constant lookup
    pub fn parse(&self, name: &str) -> Option<BoxedValue> {
        (self.parse)(name)
    }
}

impl fmt::Debug for EnumShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumShape")
            .field("variants", &self.variants)
            .finish()
    }
}

fn parse_variant<E: ConfigEnum>(name: &str) -> Option<BoxedValue> {
    E::from_variant(name).map(|value| Box::new(value) as BoxedValue)
}

/// Strip module paths from a type name, keeping generic arguments readable
pub(crate) fn short_type_name(name: &'static str) -> &'static str {
    match name.find('<') {
        Some(generic_start) => {
            let head = &name[..generic_start];
            match head.rfind("::") {
                Some(index) => &name[index + 2..],
                None => name,
            }
        }
        None => name.rsplit("::").next().unwrap_or(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    crate::config_enum! {
        #[derive(Debug, PartialEq)]
        enum Level {
            Low,
            High,
        }
    }

    #[test]
    fn test_plain_declared_type() {
        let ty = DeclaredType::of::<PathBuf>();
        assert_eq!(ty.type_id(), TypeId::of::<PathBuf>());
        assert_eq!(ty.short_name(), "PathBuf");
        assert!(!ty.is_enum());
        assert_eq!(ty, DeclaredType::of::<PathBuf>());
        assert_ne!(ty, DeclaredType::of::<String>());
    }

    #[test]
    fn test_enum_declared_type_parses_exact_names() {
        let ty = DeclaredType::enumeration::<Level>();
        let shape = ty.enum_shape().unwrap();

        assert_eq!(shape.variants(), &["Low", "High"]);
        let value = shape.parse("High").unwrap();
        assert_eq!(*value.downcast::<Level>().unwrap(), Level::High);
        assert!(shape.parse("high").is_none());
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("alloc::string::String"), "String");
        assert_eq!(short_type_name("i32"), "i32");
        assert_eq!(
            short_type_name("core::option::Option<alloc::string::String>"),
            "Option<alloc::string::String>"
        );
    }
}

pub mod builtin;
pub mod registry;

pub use builtin::*;
pub use registry::*;

use std::any::Any;
use std::marker::PhantomData;

use crate::errors::ConversionError;
use crate::types::{BoxedValue, DeclaredType};

/// Turns property text into a value of a declared type
///
/// When the supplied text fails to parse, the injector retries with the
/// property's default text; enumerations are the exception and fail at once.
/// If the default text fails too, a converter that returns a
/// [`fallback`](Converter::fallback) assigns it, and one without a fallback
/// is strict and the parse failure is surfaced.
pub trait Converter: Send + Sync {
    /// Parse `text` into a value of `ty`
    fn convert(&self, ty: &DeclaredType, text: &str) -> Result<BoxedValue, ConversionError>;

    /// Value assigned when neither the supplied nor the default text parses
    fn fallback(&self, _ty: &DeclaredType) -> Option<BoxedValue> {
        None
    }
}

/// Converter backed by a closure, for custom value types; it has no fallback
pub struct FnConverter<V, F> {
    parse: F,
    _value: PhantomData<fn() -> V>,
}

/// Build a converter without fallback from a parse closure
pub fn from_fn<V, F>(parse: F) -> FnConverter<V, F>
where
    V: Any + Send,
    F: Fn(&str) -> Result<V, ConversionError> + Send + Sync,
{
    FnConverter {
        parse,
        _value: PhantomData,
    }
}

impl<V, F> Converter for FnConverter<V, F>
where
    V: Any + Send,
    F: Fn(&str) -> Result<V, ConversionError> + Send + Sync,
{
    fn convert(&self, _ty: &DeclaredType, text: &str) -> Result<BoxedValue, ConversionError> {
        (self.parse)(text).map(|value| Box::new(value) as BoxedValue)
    }
}

impl<V, F> std::fmt::Debug for FnConverter<V, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnConverter")
            .field("value", &std::any::type_name::<V>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Endpoint {
        host: String,
        port: u16,
    }

    fn endpoint_converter() -> impl Converter {
        from_fn(|text: &str| {
            let (host, port) = text
                .split_once(':')
                .ok_or_else(|| ConversionError::invalid_value("Endpoint", text, "missing ':'"))?;
            let port = port
                .parse()
                .map_err(|_| ConversionError::invalid_value("Endpoint", text, "bad port"))?;
            Ok(Endpoint {
                host: host.to_string(),
                port,
            })
        })
    }

    #[test]
    fn test_fn_converter_parses_custom_type() {
        let converter = endpoint_converter();
        let ty = DeclaredType::of::<Endpoint>();

        let value = converter.convert(&ty, "localhost:8080").unwrap();
        assert_eq!(
            *value.downcast::<Endpoint>().unwrap(),
            Endpoint {
                host: "localhost".to_string(),
                port: 8080
            }
        );
    }

    #[test]
    fn test_fn_converter_is_strict() {
        let converter = endpoint_converter();
        let ty = DeclaredType::of::<Endpoint>();

        assert!(converter.convert(&ty, "localhost").is_err());
        assert!(converter.fallback(&ty).is_none());
    }
}

use std::any::Any;
use std::fmt::Display;
use std::net::IpAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::converter::Converter;
use crate::errors::ConversionError;
use crate::types::{short_type_name, BigDecimal, BigInteger, BoxedValue, DeclaredType};

/// Parse function shared by the table-driven converters
pub type ParseFn<V> = fn(&str) -> Result<V, ConversionError>;

/// Lenient converter for numeric types
///
/// One generic converter covers every numeric type: it is parameterized by
/// a parse function and the fallback value assigned when both the supplied
/// and the default text fail to parse.
#[derive(Debug, Clone)]
pub struct NumericConverter<V> {
    parse: ParseFn<V>,
    fallback: V,
}

impl<V> NumericConverter<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(parse: ParseFn<V>, fallback: V) -> Self {
        Self { parse, fallback }
    }

    /// Replace the fallback value
    pub fn with_fallback(mut self, fallback: V) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn fallback_value(&self) -> &V {
        &self.fallback
    }
}

impl NumericConverter<i32> {
    pub fn int32() -> Self {
        Self::new(parse_from_str::<i32>, 0)
    }
}

impl NumericConverter<i64> {
    pub fn int64() -> Self {
        Self::new(parse_from_str::<i64>, 0)
    }
}

impl NumericConverter<f32> {
    pub fn float32() -> Self {
        Self::new(parse_float::<f32>, 0.0)
    }
}

impl NumericConverter<f64> {
    pub fn float64() -> Self {
        Self::new(parse_float::<f64>, 0.0)
    }
}

impl NumericConverter<BigInteger> {
    pub fn big_integer() -> Self {
        Self::new(BigInteger::from_str, BigInteger::zero())
    }
}

impl NumericConverter<BigDecimal> {
    pub fn big_decimal() -> Self {
        Self::new(BigDecimal::from_str, BigDecimal::zero())
    }
}

impl<V> Converter for NumericConverter<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn convert(&self, _ty: &DeclaredType, text: &str) -> Result<BoxedValue, ConversionError> {
        (self.parse)(text).map(|value| Box::new(value) as BoxedValue)
    }

    fn fallback(&self, _ty: &DeclaredType) -> Option<BoxedValue> {
        Some(Box::new(self.fallback.clone()))
    }
}

/// `true` for any casing of "true", `false` for everything else
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolConverter;

impl Converter for BoolConverter {
    fn convert(&self, _ty: &DeclaredType, text: &str) -> Result<BoxedValue, ConversionError> {
        Ok(Box::new(text.eq_ignore_ascii_case("true")))
    }

    fn fallback(&self, _ty: &DeclaredType) -> Option<BoxedValue> {
        Some(Box::new(false))
    }
}

/// Identity conversion
#[derive(Debug, Clone, Copy, Default)]
pub struct StringConverter;

impl Converter for StringConverter {
    fn convert(&self, _ty: &DeclaredType, text: &str) -> Result<BoxedValue, ConversionError> {
        Ok(Box::new(text.to_string()))
    }

    fn fallback(&self, _ty: &DeclaredType) -> Option<BoxedValue> {
        Some(Box::new(String::new()))
    }
}

/// Generic converter for every type declared through [`DeclaredType::enumeration`]
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumConverter;

impl Converter for EnumConverter {
    fn convert(&self, ty: &DeclaredType, text: &str) -> Result<BoxedValue, ConversionError> {
        let shape = ty.enum_shape().ok_or_else(|| ConversionError::NotAnEnum {
            type_name: ty.type_name().to_string(),
        })?;
        shape.parse(text).ok_or_else(|| {
            ConversionError::unknown_variant(ty.short_name(), text, shape.variants())
        })
    }
}

/// Converter without fallback for resource-locator types (URL, URI, path, address)
#[derive(Debug, Clone)]
pub struct LocatorConverter<V> {
    parse: ParseFn<V>,
}

impl<V> LocatorConverter<V>
where
    V: Send + 'static,
{
    pub fn new(parse: ParseFn<V>) -> Self {
        Self { parse }
    }
}

impl LocatorConverter<url::Url> {
    /// Absolute URLs only
    pub fn url() -> Self {
        Self::new(|text| {
            url::Url::parse(text)
                .map_err(|e| ConversionError::invalid_value("URL", text, e.to_string()))
        })
    }
}

impl LocatorConverter<http::Uri> {
    /// Absolute or relative URI references
    pub fn uri() -> Self {
        Self::new(|text| {
            text.parse::<http::Uri>()
                .map_err(|e| ConversionError::invalid_value("URI", text, e.to_string()))
        })
    }
}

impl LocatorConverter<PathBuf> {
    pub fn path() -> Self {
        Self::new(|text| {
            if text.is_empty() {
                return Err(ConversionError::invalid_value("path", text, "path is empty"));
            }
            if text.contains('\0') {
                return Err(ConversionError::invalid_value(
                    "path",
                    text,
                    "path contains a NUL byte",
                ));
            }
            Ok(PathBuf::from(text))
        })
    }
}

impl LocatorConverter<IpAddr> {
    /// IPv4 or IPv6 literals; host names are not resolved
    pub fn inet_address() -> Self {
        Self::new(|text| {
            text.parse::<IpAddr>()
                .map_err(|e| ConversionError::invalid_value("inet address", text, e.to_string()))
        })
    }
}

impl<V> Converter for LocatorConverter<V>
where
    V: Send + 'static,
{
    fn convert(&self, _ty: &DeclaredType, text: &str) -> Result<BoxedValue, ConversionError> {
        (self.parse)(text).map(|value| Box::new(value) as BoxedValue)
    }
}

/// Base-10 parse through [`FromStr`], without trimming
pub fn parse_from_str<V>(text: &str) -> Result<V, ConversionError>
where
    V: FromStr + Any,
    V::Err: Display,
{
    text.parse::<V>().map_err(|e| {
        ConversionError::invalid_value(short_type_name(std::any::type_name::<V>()), text, e.to_string())
    })
}

/// Locale-independent float parse; surrounding whitespace is ignored
pub fn parse_float<V>(text: &str) -> Result<V, ConversionError>
where
    V: FromStr + Any,
    V::Err: Display,
{
    parse_from_str(text.trim())
}

use std::borrow::Cow;

use crate::config::CoercionPolicy;
use crate::errors::{InjectionError, InjectionResult};
use crate::resolver::{ResolvedProperty, ResolvedPropertySet};
use crate::source::{SourceValue, ValueSource};
use crate::types::BoxedValue;

/// Assign every resolved property of `target` from `source`
///
/// For each property the value at `prefix + key` is used when present,
/// otherwise the default text. Unparsable supplied text is replaced by the
/// default text, except for enumerations which must name a declared
/// constant. When the default text fails too, the converter's fallback is
/// assigned, or the parse failure is surfaced if it has none. Write failures
/// are always surfaced.
///
/// The resolved set is only read, so concurrent calls on different targets
/// may share it.
pub fn inject<T, S>(
    target: &mut T,
    source: &S,
    resolved: &ResolvedPropertySet<T>,
    prefix: &str,
    coercion: CoercionPolicy,
) -> InjectionResult<()>
where
    S: ValueSource + ?Sized,
{
    let mut key = String::with_capacity(prefix.len() + 32);

    for property in resolved {
        key.clear();
        key.push_str(prefix);
        key.push_str(property.key());

        let supplied = candidate_text(source.lookup(&key), coercion);
        let value = convert(property, &key, supplied.as_deref())?;

        property
            .descriptor()
            .assign(target, value)
            .map_err(|e| InjectionError::access(key.as_str(), e))?;
    }

    Ok(())
}

fn candidate_text(value: Option<SourceValue<'_>>, coercion: CoercionPolicy) -> Option<Cow<'_, str>> {
    match (value?, coercion) {
        (SourceValue::Text(text), _) => Some(Cow::Borrowed(text)),
        (SourceValue::Typed(value), CoercionPolicy::Stringify) => Some(Cow::Owned(value.to_string())),
        (SourceValue::Typed(_), CoercionPolicy::Ignore) => None,
    }
}

fn convert<T>(
    property: &ResolvedProperty<T>,
    key: &str,
    supplied: Option<&str>,
) -> InjectionResult<BoxedValue> {
    let descriptor = property.descriptor();
    let converter = property.converter();
    let ty = descriptor.declared_type();
    let default_text = descriptor.default_value();
    let text = supplied.unwrap_or(default_text);

    let error = match converter.convert(ty, text) {
        Ok(value) => return Ok(value),
        Err(error) => error,
    };

    if ty.is_enum() {
        return Err(InjectionError::conversion(key, error));
    }

    if supplied.is_some() {
        if let Ok(value) = converter.convert(ty, default_text) {
            tracing::warn!(
                "Invalid value for property '{}' ({}), using default '{}'",
                key,
                error,
                default_text
            );
            return Ok(value);
        }
    }

    let Some(fallback) = converter.fallback(ty) else {
        return Err(InjectionError::conversion(key, error));
    };

    tracing::debug!(
        "Default value '{}' for property '{}' is not a valid {}, using fallback",
        default_text,
        key,
        ty.short_name()
    );
    Ok(fallback)
}

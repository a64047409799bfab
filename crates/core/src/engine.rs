use parking_lot::RwLock;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::config::{CoercionPolicy, EngineOptions};
use crate::converter::{Converter, ConverterRegistry};
use crate::descriptor::Configurable;
use crate::errors::InjectionResult;
use crate::injector;
use crate::resolver::ResolvedPropertySet;
use crate::source::ValueSource;

struct EngineState<T> {
    registry: ConverterRegistry,
    options: EngineOptions,
    prefix: Arc<str>,
    resolved: Option<Arc<ResolvedPropertySet<T>>>,
}

impl<T: Configurable> EngineState<T> {
    fn resolved(&mut self) -> Arc<ResolvedPropertySet<T>> {
        if let Some(resolved) = &self.resolved {
            return resolved.clone();
        }

        let resolved = Arc::new(crate::resolver::resolve::<T>(&self.registry));
        self.resolved = Some(resolved.clone());
        resolved
    }

    fn set_options(&mut self, options: EngineOptions) {
        self.prefix = Arc::from(options.prefix.as_str());
        self.options = options;
    }
}

/// Per-type injection engine
///
/// Owns a converter registry and options, and lazily resolves the property
/// set of `T` the first time it is needed. The resolved set is cached until
/// a converter registration invalidates it. Prefix and coercion changes take
/// effect on the next injection without re-resolving.
///
/// All methods take `&self`, so one engine can be shared across threads.
pub struct PropertyEngine<T: Configurable> {
    state: RwLock<EngineState<T>>,
}

impl<T: Configurable> PropertyEngine<T> {
    /// Create a new engine with the standard converters and default options
    pub fn new() -> Self {
        Self::with_registry(ConverterRegistry::standard())
    }

    /// Create a new engine over an explicit registry
    pub fn with_registry(registry: ConverterRegistry) -> Self {
        Self {
            state: RwLock::new(EngineState {
                registry,
                options: EngineOptions::default(),
                prefix: Arc::from(""),
                resolved: None,
            }),
        }
    }

    /// Replace the engine options
    pub fn with_options(self, options: EngineOptions) -> Self {
        self.state.write().set_options(options);
        self
    }

    /// Set the key prefix
    pub fn with_prefix(self, prefix: impl Into<String>) -> Self {
        self.set_prefix(prefix);
        self
    }

    /// Register a converter for `V`
    pub fn register<V: Any + Send>(self, converter: impl Converter + 'static) -> Self {
        self.register_converter::<V>(converter);
        self
    }

    /// Replace the generic enumeration converter
    pub fn register_enum_converter(self, converter: impl Converter + 'static) -> Self {
        self.set_enum_converter(converter);
        self
    }

    /// Register a converter for `V` on a shared engine
    ///
    /// Replaces any converter for the same type and drops the cached property
    /// set; the next resolution sees the new converter.
    pub fn register_converter<V: Any + Send>(&self, converter: impl Converter + 'static) {
        let mut state = self.state.write();
        state.registry.register::<V>(converter);
        if state.resolved.take().is_some() {
            tracing::debug!(
                "Converter for {} registered, dropping resolved properties of {}",
                std::any::type_name::<V>(),
                std::any::type_name::<T>()
            );
        }
    }

    /// Replace the generic enumeration converter on a shared engine
    ///
    /// Enumerations with an exact registration keep their own converter.
    pub fn set_enum_converter(&self, converter: impl Converter + 'static) {
        let mut state = self.state.write();
        state.registry.register_enum_converter(converter);
        if state.resolved.take().is_some() {
            tracing::debug!(
                "Enum converter replaced, dropping resolved properties of {}",
                std::any::type_name::<T>()
            );
        }
    }

    pub fn set_prefix(&self, prefix: impl Into<String>) {
        let prefix = prefix.into();
        let mut state = self.state.write();
        state.prefix = Arc::from(prefix.as_str());
        state.options.prefix = prefix;
    }

    pub fn prefix(&self) -> String {
        self.state.read().options.prefix.clone()
    }

    pub fn set_coercion(&self, coercion: CoercionPolicy) {
        self.state.write().options.coercion = coercion;
    }

    pub fn options(&self) -> EngineOptions {
        self.state.read().options.clone()
    }

    /// Resolved property set of `T`, computed on first use
    pub fn resolve(&self) -> Arc<ResolvedPropertySet<T>> {
        if let Some(resolved) = &self.state.read().resolved {
            return resolved.clone();
        }

        self.state.write().resolved()
    }

    pub fn is_resolved(&self) -> bool {
        self.state.read().resolved.is_some()
    }

    /// Populate `target` from `source`
    ///
    /// On error the properties before the failing one have already been
    /// written and `target` is left partially updated.
    pub fn inject<S: ValueSource + ?Sized>(&self, target: &mut T, source: &S) -> InjectionResult<()> {
        let (resolved, prefix, coercion) = self.snapshot();
        injector::inject(target, source, &resolved, &prefix, coercion)
    }

    /// Render the current values of `target` next to their defaults
    ///
    /// See [`ResolvedPropertySet::describe`].
    pub fn describe(&self, target: &T) -> String {
        self.resolve().describe(target)
    }

    /// Resolved set and options under a single lock acquisition
    ///
    /// The lock is released before injection so setters may call back into
    /// the engine.
    fn snapshot(&self) -> (Arc<ResolvedPropertySet<T>>, Arc<str>, CoercionPolicy) {
        {
            let state = self.state.read();
            if let Some(resolved) = &state.resolved {
                return (resolved.clone(), state.prefix.clone(), state.options.coercion);
            }
        }

        let mut state = self.state.write();
        let resolved = state.resolved();
        (resolved, state.prefix.clone(), state.options.coercion)
    }

    /// One summary line per managed property
    pub fn summary(&self) -> String {
        self.resolve().to_string()
    }
}

impl<T: Configurable> Default for PropertyEngine<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Configurable> fmt::Debug for PropertyEngine<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("PropertyEngine")
            .field("type", &std::any::type_name::<T>())
            .field("registry", &state.registry)
            .field("options", &state.options)
            .field("resolved", &state.resolved.is_some())
            .finish()
    }
}

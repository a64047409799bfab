use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::EngineOptions;
use crate::converter::ConverterRegistry;
use crate::descriptor::Configurable;
use crate::errors::InjectionResult;
use crate::injector;
use crate::resolver::{resolve, ResolvedPropertySet};
use crate::source::ValueSource;

type CachedSet = Arc<dyn Any + Send + Sync>;

/// Resolved property sets of many target types over one shared registry
///
/// Each type is resolved once, on first use. The registry is frozen when the
/// cache is built; build a new cache to pick up new converters.
pub struct ResolutionCache {
    registry: Arc<ConverterRegistry>,
    entries: RwLock<HashMap<TypeId, CachedSet>>,
}

impl ResolutionCache {
    pub fn new(registry: ConverterRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Create a cache over the standard converter set
    pub fn standard() -> Self {
        Self::new(ConverterRegistry::standard())
    }

    pub fn registry(&self) -> &ConverterRegistry {
        &self.registry
    }

    /// Resolved property set of `T`, computed on first use
    pub fn get<T: Configurable>(&self) -> Arc<ResolvedPropertySet<T>> {
        let type_id = TypeId::of::<T>();

        if let Some(resolved) = self.entries.read().get(&type_id).and_then(downcast::<T>) {
            return resolved;
        }

        let mut entries = self.entries.write();
        if let Some(resolved) = entries.get(&type_id).and_then(downcast::<T>) {
            return resolved;
        }

        let resolved = Arc::new(resolve::<T>(&self.registry));
        entries.insert(type_id, resolved.clone() as CachedSet);
        resolved
    }

    /// Populate `target` from `source` using the cached set of `T`
    pub fn inject<T, S>(&self, target: &mut T, source: &S, options: &EngineOptions) -> InjectionResult<()>
    where
        T: Configurable,
        S: ValueSource + ?Sized,
    {
        let resolved = self.get::<T>();
        injector::inject(target, source, &resolved, &options.prefix, options.coercion)
    }

    /// Number of resolved types
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drop every resolved set
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

impl Default for ResolutionCache {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for ResolutionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionCache")
            .field("registry", &self.registry)
            .field("resolved_types", &self.len())
            .finish()
    }
}

fn downcast<T: 'static>(entry: &CachedSet) -> Option<Arc<ResolvedPropertySet<T>>> {
    entry.clone().downcast::<ResolvedPropertySet<T>>().ok()
}

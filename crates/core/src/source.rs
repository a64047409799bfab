use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;

/// A value exposed by a [`ValueSource`] at some key
#[derive(Clone, Copy)]
pub enum SourceValue<'a> {
    /// Literal string value
    Text(&'a str),
    /// Already-typed value; only usable as text through its `Display` form
    Typed(&'a dyn fmt::Display),
}

impl SourceValue<'_> {
    pub fn is_text(&self) -> bool {
        matches!(self, SourceValue::Text(_))
    }
}

impl fmt::Debug for SourceValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceValue::Text(text) => f.debug_tuple("Text").field(text).finish(),
            SourceValue::Typed(value) => f.debug_tuple("Typed").field(&value.to_string()).finish(),
        }
    }
}

/// Flat key/value input for injection
pub trait ValueSource {
    /// Value stored at `key`, if any
    fn lookup(&self, key: &str) -> Option<SourceValue<'_>>;

    /// Every key present in the source
    fn keys(&self) -> Vec<String>;

    fn contains_key(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }
}

impl<V: ValueSource + ?Sized> ValueSource for &V {
    fn lookup(&self, key: &str) -> Option<SourceValue<'_>> {
        (**self).lookup(key)
    }

    fn keys(&self) -> Vec<String> {
        (**self).keys()
    }
}

impl<S: BuildHasher> ValueSource for HashMap<String, String, S> {
    fn lookup(&self, key: &str) -> Option<SourceValue<'_>> {
        self.get(key).map(|value| SourceValue::Text(value))
    }

    fn keys(&self) -> Vec<String> {
        HashMap::keys(self).cloned().collect()
    }
}

impl<'k, S: BuildHasher> ValueSource for HashMap<&'k str, &'k str, S> {
    fn lookup(&self, key: &str) -> Option<SourceValue<'_>> {
        self.get(key).map(|value| SourceValue::Text(value))
    }

    fn keys(&self) -> Vec<String> {
        HashMap::keys(self).map(|key| key.to_string()).collect()
    }
}

impl ValueSource for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<SourceValue<'_>> {
        self.get(key).map(|value| SourceValue::Text(value))
    }

    fn keys(&self) -> Vec<String> {
        BTreeMap::keys(self).cloned().collect()
    }
}

/// Pairs are searched from the end, so a repeated key resolves to its last value
impl<'k> ValueSource for [(&'k str, &'k str)] {
    fn lookup(&self, key: &str) -> Option<SourceValue<'_>> {
        self.iter()
            .rev()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, value)| SourceValue::Text(value))
    }

    fn keys(&self) -> Vec<String> {
        self.iter().map(|(key, _)| key.to_string()).collect()
    }
}

impl<S: BuildHasher> ValueSource for HashMap<String, Value, S> {
    fn lookup(&self, key: &str) -> Option<SourceValue<'_>> {
        self.get(key).and_then(json_value)
    }

    fn keys(&self) -> Vec<String> {
        HashMap::keys(self).cloned().collect()
    }
}

impl ValueSource for BTreeMap<String, Value> {
    fn lookup(&self, key: &str) -> Option<SourceValue<'_>> {
        self.get(key).and_then(json_value)
    }

    fn keys(&self) -> Vec<String> {
        BTreeMap::keys(self).cloned().collect()
    }
}

impl ValueSource for serde_json::Map<String, Value> {
    fn lookup(&self, key: &str) -> Option<SourceValue<'_>> {
        self.get(key).and_then(json_value)
    }

    fn keys(&self) -> Vec<String> {
        serde_json::Map::keys(self).cloned().collect()
    }
}

/// JSON strings are literal text, `null` is absent, everything else is typed
fn json_value(value: &Value) -> Option<SourceValue<'_>> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(SourceValue::Text(text)),
        other => Some(SourceValue::Typed(other)),
    }
}

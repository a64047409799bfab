use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Policy for source values that are not literal strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoercionPolicy {
    /// Use the value's `Display` form as the candidate text
    #[default]
    Stringify,
    /// Treat the key as absent and use the default text
    Ignore,
}

/// Engine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Prepended to every property key before lookup
    pub prefix: String,
    /// Handling of non-string source values
    pub coercion: CoercionPolicy,
}

impl EngineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the key prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the coercion policy
    pub fn with_coercion(mut self, coercion: CoercionPolicy) -> Self {
        self.coercion = coercion;
        self
    }

    /// Load options from a JSON document; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

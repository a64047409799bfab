use thiserror::Error;

/// Error raised when property text cannot be turned into a value of the declared type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("Invalid {expected} value '{value}': {reason}")]
    InvalidValue {
        expected: String,
        value: String,
        reason: String,
    },

    #[error("Unknown constant '{value}' for enum {enum_name}. Expected one of: {expected}")]
    UnknownVariant {
        enum_name: String,
        value: String,
        expected: String,
    },

    #[error("Type {type_name} is not an enumeration")]
    NotAnEnum { type_name: String },
}

impl ConversionError {
    /// Create an invalid value error
    pub fn invalid_value(
        expected: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            expected: expected.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an unknown enum constant error listing the declared constants
    pub fn unknown_variant(
        enum_name: impl Into<String>,
        value: impl Into<String>,
        variants: &[&str],
    ) -> Self {
        Self::UnknownVariant {
            enum_name: enum_name.into(),
            value: value.into(),
            expected: variants.join(", "),
        }
    }
}

/// Error raised when a converted value cannot be written into its target
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("expected a value of type {expected}")]
    TypeMismatch { expected: &'static str },

    #[error("write rejected: {message}")]
    Rejected { message: String },
}

impl AccessError {
    /// Create a rejected write error
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }
}

/// The single failure surfaced to callers of `inject`
///
/// Malformed supplied input only produces this error when it cannot be
/// replaced: an enumeration that names no constant, or a value whose default
/// text is also unparsable and whose converter has no fallback. Targets that
/// cannot be written produce the access variant.
#[derive(Debug, Error)]
pub enum InjectionError {
    #[error("Unable to parse value for property '{key}': {source}")]
    Conversion {
        key: String,
        #[source]
        source: ConversionError,
    },

    #[error("Unable to write property '{key}': {source}")]
    Access {
        key: String,
        #[source]
        source: AccessError,
    },
}

impl InjectionError {
    /// Create a conversion failure for a property key
    pub fn conversion(key: impl Into<String>, source: ConversionError) -> Self {
        Self::Conversion {
            key: key.into(),
            source,
        }
    }

    /// Create an access failure for a property key
    pub fn access(key: impl Into<String>, source: AccessError) -> Self {
        Self::Access {
            key: key.into(),
            source,
        }
    }

    /// The (prefixed) key of the property that failed
    pub fn key(&self) -> &str {
        match self {
            Self::Conversion { key, .. } | Self::Access { key, .. } => key,
        }
    }

    /// Check if the error is a conversion failure
    pub fn is_conversion(&self) -> bool {
        matches!(self, Self::Conversion { .. })
    }

    /// Check if the error is an access failure
    pub fn is_access(&self) -> bool {
        matches!(self, Self::Access { .. })
    }
}

/// Result type for injection operations
pub type InjectionResult<T> = Result<T, InjectionError>;

/// Engine configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

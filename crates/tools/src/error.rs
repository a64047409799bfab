use thiserror::Error;

/// Errors raised by template generation, catalog export and file loading
#[derive(Debug, Error)]
pub enum ToolsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Format error: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("Malformed properties at line {line}: {message}")]
    Properties { line: usize, message: String },
}

impl ToolsError {
    /// Create a properties parse error
    pub fn properties(line: usize, message: impl Into<String>) -> Self {
        Self::Properties {
            line,
            message: message.into(),
        }
    }

    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }

    pub fn is_properties(&self) -> bool {
        matches!(self, Self::Properties { .. })
    }
}

pub type ToolsResult<T> = Result<T, ToolsError>;

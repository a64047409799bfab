use std::fs;
use std::path::Path;

use crate::error::ToolsResult;

/// Writes generated files, leaving unchanged files untouched
pub struct TemplateWriter;

impl TemplateWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write `content` to `path`, creating parent directories
    ///
    /// Returns `false` when the file already held exactly `content`.
    pub fn write_if_changed(&self, path: &Path, content: &str) -> ToolsResult<bool> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        if path.exists() {
            let existing = fs::read_to_string(path)?;
            if existing == content {
                tracing::debug!("{} is up to date", path.display());
                return Ok(false);
            }
        }

        fs::write(path, content)?;
        tracing::debug!("Wrote {}", path.display());
        Ok(true)
    }
}

impl Default for TemplateWriter {
    fn default() -> Self {
        Self::new()
    }
}

use confix_core::{referenced_properties, PropertyMetadata, TypeRef};
use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::error::ToolsResult;
use crate::template::{HadoopTemplate, PropertiesTemplate};
use crate::writer::TemplateWriter;

/// Writes the configuration templates of a set of types into a directory
///
/// Produces `<name>.properties`, `<name>-site.xml` and `<name>.catalog.json`,
/// covering the given types and every type their modules reference.
pub struct TemplateGenerator {
    output_dir: PathBuf,
    name: String,
    types: Vec<TypeRef>,
    ignore_empty_defaults: bool,
    writer: TemplateWriter,
}

impl TemplateGenerator {
    pub fn new(output_dir: impl Into<PathBuf>, name: impl Into<String>, types: &[TypeRef]) -> Self {
        Self {
            output_dir: output_dir.into(),
            name: name.into(),
            types: types.to_vec(),
            ignore_empty_defaults: false,
            writer: TemplateWriter::new(),
        }
    }

    /// Leave out properties whose default text is empty
    pub fn ignore_empty_defaults(mut self) -> Self {
        self.ignore_empty_defaults = true;
        self
    }

    pub fn properties_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.properties", self.name))
    }

    pub fn hadoop_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}-site.xml", self.name))
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.catalog.json", self.name))
    }

    /// Write every output; returns the paths whose content changed
    pub fn generate_all(&self) -> ToolsResult<Vec<PathBuf>> {
        let properties = referenced_properties(&self.types);
        let mut changed = Vec::new();

        self.write(&self.properties_path(), &self.properties_template(&properties), &mut changed)?;
        self.write(&self.hadoop_path(), &self.hadoop_template(&properties), &mut changed)?;
        self.write(
            &self.catalog_path(),
            &Catalog::from_types(&self.types).to_json_pretty()?,
            &mut changed,
        )?;

        tracing::info!(
            "Generated {} templates for {} properties ({} changed)",
            self.name,
            properties.len(),
            changed.len()
        );
        Ok(changed)
    }

    fn properties_template(&self, properties: &[PropertyMetadata]) -> String {
        let template = PropertiesTemplate::from_metadata(properties.to_vec());
        if self.ignore_empty_defaults {
            template.ignore_empty_defaults().render()
        } else {
            template.render()
        }
    }

    fn hadoop_template(&self, properties: &[PropertyMetadata]) -> String {
        let template = HadoopTemplate::from_metadata(properties.to_vec());
        if self.ignore_empty_defaults {
            template.ignore_empty_defaults().render()
        } else {
            template.render()
        }
    }

    fn write(&self, path: &Path, content: &str, changed: &mut Vec<PathBuf>) -> ToolsResult<()> {
        if self.writer.write_if_changed(path, content)? {
            changed.push(path.to_path_buf());
        }
        Ok(())
    }
}

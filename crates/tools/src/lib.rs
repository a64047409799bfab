//! # confix-tools
//!
//! Tooling built on the property metadata exported by `confix-core`:
//!
//! - **Templates**: `.properties` and Hadoop-style XML files listing every key with its default
//! - **Catalog**: JSON export of the documented properties, grouped per type
//! - **Analyzer**: keys a source is missing, and keys it supplies that nothing consumes
//! - **Properties files**: a `.properties` loader usable as an injection source

pub mod analyzer;
pub mod catalog;
pub mod error;
pub mod generator;
pub mod properties;
pub mod template;
pub mod writer;

pub use analyzer::Analyzer;
pub use catalog::{Catalog, CatalogEntry};
pub use error::{ToolsError, ToolsResult};
pub use generator::TemplateGenerator;
pub use properties::PropertiesFile;
pub use template::{HadoopTemplate, PropertiesTemplate};
pub use writer::TemplateWriter;

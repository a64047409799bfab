use confix_core::{annotated_properties, referenced_properties, PropertyMetadata, TypeRef};
use std::fmt;

/// Properties shared by every template flavour, with the empty-default filter
#[derive(Debug, Clone)]
struct TemplateProperties {
    properties: Vec<PropertyMetadata>,
    ignore_empty_defaults: bool,
}

impl TemplateProperties {
    fn included(&self) -> impl Iterator<Item = &PropertyMetadata> {
        self.properties
            .iter()
            .filter(move |p| !(self.ignore_empty_defaults && p.default_value.is_empty()))
    }
}

/// `key=default` template of a `.properties` file
///
/// Each property renders as an optional `# description` line, the
/// `key=default` line and a blank separator line.
#[derive(Debug, Clone)]
pub struct PropertiesTemplate {
    inner: TemplateProperties,
}

impl PropertiesTemplate {
    /// Template for the properties declared directly on `types`
    pub fn new(types: &[TypeRef]) -> Self {
        Self::from_metadata(annotated_properties(types))
    }

    /// Template for `types` and every type their modules reference
    pub fn with_references(types: &[TypeRef]) -> Self {
        Self::from_metadata(referenced_properties(types))
    }

    pub fn from_metadata(properties: Vec<PropertyMetadata>) -> Self {
        Self {
            inner: TemplateProperties {
                properties,
                ignore_empty_defaults: false,
            },
        }
    }

    /// Leave out properties whose default text is empty
    pub fn ignore_empty_defaults(mut self) -> Self {
        self.inner.ignore_empty_defaults = true;
        self
    }

    /// Append the template to `out`
    pub fn write_to<W: fmt::Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        for property in self.inner.included() {
            if !property.description.is_empty() {
                writeln!(out, "# {}", property.description)?;
            }
            write!(out, "{}={}\n\n", property.key, property.default_value)?;
        }
        Ok(())
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PropertiesTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

/// Hadoop-style `<configuration>` XML template
#[derive(Debug, Clone)]
pub struct HadoopTemplate {
    inner: TemplateProperties,
}

impl HadoopTemplate {
    /// Template for the properties declared directly on `types`
    pub fn new(types: &[TypeRef]) -> Self {
        Self::from_metadata(annotated_properties(types))
    }

    /// Template for `types` and every type their modules reference
    pub fn with_references(types: &[TypeRef]) -> Self {
        Self::from_metadata(referenced_properties(types))
    }

    pub fn from_metadata(properties: Vec<PropertyMetadata>) -> Self {
        Self {
            inner: TemplateProperties {
                properties,
                ignore_empty_defaults: false,
            },
        }
    }

    /// Leave out properties whose default text is empty
    pub fn ignore_empty_defaults(mut self) -> Self {
        self.inner.ignore_empty_defaults = true;
        self
    }

    /// Append the template to `out`; the closing tag has no trailing newline
    pub fn write_to<W: fmt::Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        out.write_str("<configuration>\n")?;
        for property in self.inner.included() {
            out.write_str("\t<property>\n")?;
            writeln!(out, "\t\t<name>{}</name>", XmlEscaped(&property.key))?;
            writeln!(out, "\t\t<value>{}</value>", XmlEscaped(&property.default_value))?;
            if !property.description.is_empty() {
                writeln!(
                    out,
                    "\t\t<description>{}</description>",
                    XmlEscaped(&property.description)
                )?;
            }
            out.write_str("\t</property>\n")?;
        }
        out.write_str("</configuration>")
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for HadoopTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

struct XmlEscaped<'a>(&'a str);

impl fmt::Display for XmlEscaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rest = self.0;
        while let Some(index) = rest.find(['&', '<', '>', '"', '\'']) {
            f.write_str(&rest[..index])?;
            let entity = match rest.as_bytes()[index] {
                b'&' => "&amp;",
                b'<' => "&lt;",
                b'>' => "&gt;",
                b'"' => "&quot;",
                _ => "&apos;",
            };
            f.write_str(entity)?;
            rest = &rest[index + 1..];
        }
        f.write_str(rest)
    }
}

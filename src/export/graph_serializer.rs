use crate::core::errors::MetadataError;
use crate::core::types::{Component, OutputFormat};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::collections::BTreeMap;

/// Namespace of the package manifest schema.
pub const METADATA_NAMESPACE: &str = "http://soap.sforce.com/2006/04/metadata";

/// Serialized graph together with the content type it should be served as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub content_type: &'static str,
    pub body: String,
}

/// Renders a resolved component list as JSON, CSV or a package manifest.
///
/// The manifest output is a pure function of the component set: the input
/// order never changes a byte of it.
///
/// # Examples
///
/// ```rust
/// use metadeps::core::{Component, OutputFormat};
/// use metadeps::export::GraphSerializer;
///
/// let serializer = GraphSerializer::new("61.0");
/// let components = vec![Component::new("01p", "ApexClass", "AccountService")];
/// let rendered = serializer.render(&components, OutputFormat::Package).unwrap();
/// assert_eq!(rendered.content_type, "text/xml");
/// assert!(rendered.body.contains("<members>AccountService</members>"));
/// ```
#[derive(Debug, Clone)]
pub struct GraphSerializer {
    api_version: String,
}

impl GraphSerializer {
    /// `api_version` is written into the manifest's `<version>` element.
    pub fn new(api_version: impl Into<String>) -> Self {
        Self {
            api_version: api_version.into(),
        }
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn render(
        &self,
        components: &[Component],
        format: OutputFormat,
    ) -> Result<Rendered, MetadataError> {
        let body = match format {
            OutputFormat::Json => self.to_json(components)?,
            OutputFormat::Csv => self.to_csv(components)?,
            OutputFormat::Package => self.to_package_xml(components)?,
        };
        Ok(Rendered {
            content_type: format.content_type(),
            body,
        })
    }

    /// The list as-is.
    pub fn to_json(&self, components: &[Component]) -> Result<String, MetadataError> {
        serde_json::to_string(components).map_err(|e| MetadataError::render("json", e))
    }

    /// `fullName,type` with a header row.
    pub fn to_csv(&self, components: &[Component]) -> Result<String, MetadataError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(["fullName", "type"])
            .map_err(|e| MetadataError::render("csv", e))?;
        for component in components {
            writer
                .write_record([&component.full_name, &component.component_type])
                .map_err(|e| MetadataError::render("csv", e))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| MetadataError::render("csv", e))?;
        String::from_utf8(bytes).map_err(|e| MetadataError::render("csv", e))
    }

    /// package.xml grouped by type, members sorted by full name.
    pub fn to_package_xml(&self, components: &[Component]) -> Result<String, MetadataError> {
        let mut by_type: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for component in components {
            by_type
                .entry(component.component_type.as_str())
                .or_default()
                .push(component.full_name.as_str());
        }
        for members in by_type.values_mut() {
            members.sort_unstable();
        }

        let bytes = self
            .write_package(&by_type)
            .map_err(|e| MetadataError::render("package", e))?;
        String::from_utf8(bytes).map_err(|e| MetadataError::render("package", e))
    }

    fn write_package(
        &self,
        by_type: &BTreeMap<&str, Vec<&str>>,
    ) -> Result<Vec<u8>, quick_xml::Error> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut package = BytesStart::new("Package");
        package.push_attribute(("xmlns", METADATA_NAMESPACE));
        writer.write_event(Event::Start(package))?;

        for (component_type, members) in by_type {
            writer.write_event(Event::Start(BytesStart::new("types")))?;
            for member in members {
                writer
                    .create_element("members")
                    .write_text_content(BytesText::new(member))?;
            }
            writer
                .create_element("name")
                .write_text_content(BytesText::new(component_type))?;
            writer.write_event(Event::End(BytesEnd::new("types")))?;
        }

        writer
            .create_element("version")
            .write_text_content(BytesText::new(&self.api_version))?;
        writer.write_event(Event::End(BytesEnd::new("Package")))?;

        Ok(writer.into_inner())
    }
}

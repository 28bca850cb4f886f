#![cfg_attr(docsrs, feature(doc_cfg))]
//! JCA deployment descriptors: one entry point for every supported dialect.
//!
//! The dialect is picked from the root element, so callers hand over a
//! document without knowing in advance which schema it follows.
//!
//! ```
//! use jca_descriptors::{Dialect, ToXml};
//!
//! let xml = r#"<datasources>
//!   <xa-datasource jndi-name="java:/XAExampleDS" pool-name="ExamplePool">
//!     <xa-datasource-property name="URL">jdbc:example://host/db</xa-datasource-property>
//!     <xa-datasource-class>com.example.Driver</xa-datasource-class>
//!   </xa-datasource>
//! </datasources>"#;
//! let descriptor = jca_descriptors::parse_str(xml).expect("parse");
//! assert_eq!(descriptor.dialect(), Dialect::DataSources);
//! let set = descriptor.as_data_sources().expect("datasources");
//! assert_eq!(set.xa_data_sources()[0].jndi_name(), "java:/XAExampleDS");
//!
//! let again = jca_descriptors::parse_str(&descriptor.to_canonical_xml()).expect("reparse");
//! assert_eq!(again, descriptor);
//! ```

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

pub use descriptor_xml::{ParseError, ParserOptions, ToXml, ValidateError, XmlWriter};
pub use ds_descriptor;
pub use ds_descriptor::{DescriptorSet, DsParser};
pub use wls_descriptor;
pub use wls_descriptor::{WeblogicConnector, WlsParser};

use descriptor_xml::EventReader;

/// Schema family of a descriptor document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Dialect {
    /// IronJacamar `<datasources>`.
    DataSources,
    /// WebLogic `<weblogic-connector>`.
    WeblogicConnector,
}

impl Dialect {
    pub const ALL: [Dialect; 2] = [Dialect::DataSources, Dialect::WeblogicConnector];

    /// Map a root element local name to its dialect.
    pub fn detect(root_local_name: &str) -> Option<Dialect> {
        Self::ALL
            .into_iter()
            .find(|dialect| dialect.root_element() == root_local_name)
    }

    pub fn root_element(self) -> &'static str {
        match self {
            Dialect::DataSources => ds_descriptor::ROOT_ELEMENT,
            Dialect::WeblogicConnector => wls_descriptor::ROOT_ELEMENT,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.root_element())
    }
}

/// A parsed document of any supported dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "dialect", content = "descriptor", rename_all = "kebab-case")
)]
pub enum Descriptor {
    DataSources(DescriptorSet),
    WeblogicConnector(WeblogicConnector),
}

impl Descriptor {
    pub fn dialect(&self) -> Dialect {
        match self {
            Descriptor::DataSources(_) => Dialect::DataSources,
            Descriptor::WeblogicConnector(_) => Dialect::WeblogicConnector,
        }
    }

    pub fn as_data_sources(&self) -> Option<&DescriptorSet> {
        match self {
            Descriptor::DataSources(set) => Some(set),
            Descriptor::WeblogicConnector(_) => None,
        }
    }

    pub fn as_weblogic_connector(&self) -> Option<&WeblogicConnector> {
        match self {
            Descriptor::WeblogicConnector(connector) => Some(connector),
            Descriptor::DataSources(_) => None,
        }
    }
}

impl ToXml for Descriptor {
    fn write_xml(&self, writer: &mut XmlWriter) {
        match self {
            Descriptor::DataSources(set) => set.write_xml(writer),
            Descriptor::WeblogicConnector(connector) => connector.write_xml(writer),
        }
    }
}

impl From<DescriptorSet> for Descriptor {
    fn from(set: DescriptorSet) -> Self {
        Descriptor::DataSources(set)
    }
}

impl From<WeblogicConnector> for Descriptor {
    fn from(connector: WeblogicConnector) -> Self {
        Descriptor::WeblogicConnector(connector)
    }
}

/// Parser that dispatches on the root element.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptorParser {
    options: ParserOptions,
}

impl DescriptorParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParserOptions) -> Self {
        Self { options }
    }

    pub fn parse_str(&self, xml: &str) -> Result<Descriptor, ParseError> {
        self.parse_events(EventReader::from_str(xml, self.options))
    }

    /// Parse from any buffered source; the source is dropped on return.
    pub fn parse_reader<R: BufRead>(&self, source: R) -> Result<Descriptor, ParseError> {
        self.parse_events(EventReader::from_reader(source, self.options))
    }

    /// Open `path` and parse it; the file is closed on every exit path.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Descriptor, ParseError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading descriptor");
        let file = File::open(path)?;
        self.parse_reader(BufReader::new(file))
    }

    fn parse_events<R: BufRead>(&self, mut reader: EventReader<R>) -> Result<Descriptor, ParseError> {
        let root = reader.root()?;
        let dialect = Dialect::detect(root.name())
            .ok_or_else(|| ParseError::UnsupportedDialect(root.name().to_string()))?;
        debug!(%dialect, "detected descriptor dialect");
        let descriptor: Descriptor = match dialect {
            Dialect::DataSources => ds_descriptor::parse_datasources(&mut reader, &root)?.into(),
            Dialect::WeblogicConnector => {
                wls_descriptor::parse_weblogic_connector(&mut reader, &root)?.into()
            }
        };
        reader.finish()?;
        Ok(descriptor)
    }
}

/// Parse a document of any dialect with default options.
pub fn parse_str(xml: &str) -> Result<Descriptor, ParseError> {
    DescriptorParser::new().parse_str(xml)
}

/// Parse a document from a buffered source with default options.
pub fn parse_reader<R: BufRead>(source: R) -> Result<Descriptor, ParseError> {
    DescriptorParser::new().parse_reader(source)
}

/// Parse the file at `path` with default options.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Descriptor, ParseError> {
    DescriptorParser::new().parse_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_maps_known_roots() {
        assert_eq!(Dialect::detect("datasources"), Some(Dialect::DataSources));
        assert_eq!(
            Dialect::detect("weblogic-connector"),
            Some(Dialect::WeblogicConnector)
        );
        assert_eq!(Dialect::detect("connector"), None);
        assert_eq!(Dialect::WeblogicConnector.to_string(), "weblogic-connector");
    }

    #[test]
    fn unknown_root_is_unsupported() {
        let err = parse_str("<ironjacamar/>").expect_err("unsupported");
        assert!(matches!(err, ParseError::UnsupportedDialect(ref name) if name == "ironjacamar"));
    }

    #[test]
    fn dispatches_on_root_element() {
        let ds = parse_str("<datasources/>").expect("datasources");
        assert_eq!(ds.dialect(), Dialect::DataSources);
        assert!(ds.as_weblogic_connector().is_none());

        let wls = parse_str("<weblogic-connector><jndi-name>eis/X</jndi-name></weblogic-connector>")
            .expect("weblogic");
        let connector = wls.as_weblogic_connector().expect("connector");
        assert_eq!(connector.jndi_name(), Some("eis/X"));
    }

    #[test]
    fn trailing_element_after_root_is_rejected() {
        let err = parse_str("<datasources/><datasources/>").expect_err("trailing");
        assert!(matches!(err, ParseError::UnexpectedElement(_) | ParseError::Malformed(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = parse_file("/nonexistent/descriptor-ds.xml").expect_err("missing");
        assert!(matches!(err, ParseError::Io(_)));
    }
}

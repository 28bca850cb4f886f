//! Metadata shared by the descriptor dialects: extension points, credentials,
//! recovery settings, pool capacity policies and flush strategies.

use std::fmt;
use std::io::BufRead;

use indexmap::IndexMap;
use tracing::trace;

use crate::error::{ParseError, ValidateError};
use crate::reader::{EventReader, StartTag, XmlEvent};
use crate::tags::TagSet;
use crate::writer::{Attrs, ToXml, XmlWriter};

/// Insertion-ordered `name -> value` property mapping.
pub type Properties = IndexMap<String, String>;

crate::tag_set! {
    /// Attributes of an extension point element.
    pub enum ExtensionAttr {
        ClassName => "class-name",
    }
}

crate::tag_set! {
    /// Children of an extension point element.
    pub enum ExtensionTag {
        ConfigProperty => "config-property",
    }
}

crate::tag_set! {
    /// Attributes of `config-property` style elements.
    pub enum PropertyAttr {
        Name => "name",
    }
}

crate::tag_set! {
    pub enum RecoveryAttr {
        NoRecovery => "no-recovery",
    }
}

crate::tag_set! {
    pub enum RecoveryTag {
        RecoverCredential => "recover-credential",
        RecoverPlugin => "recover-plugin",
    }
}

crate::tag_set! {
    pub enum CredentialTag {
        UserName => "user-name",
        Password => "password",
        SecurityDomain => "security-domain",
    }
}

crate::tag_set! {
    pub enum CapacityTag {
        Incrementer => "incrementer",
        Decrementer => "decrementer",
    }
}

/// Default for `recovery/@no-recovery`.
pub const NO_RECOVERY: bool = false;

/// A pluggable class reference plus its configuration properties.
///
/// Used for connection listeners, checkers, sorters, reauth and recovery
/// plugins, and capacity policies.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Extension {
    class_name: String,
    properties: Properties,
}

impl Extension {
    /// Build an extension point owned by the element `tag`.
    pub fn new(
        tag: &str,
        class_name: Option<String>,
        properties: Properties,
    ) -> Result<Self, ValidateError> {
        let class_name = class_name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| ValidateError::missing_attribute("class-name", tag).within(tag))?;
        Ok(Self {
            class_name,
            properties,
        })
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Render as the element `name`.
    pub fn write_xml(&self, name: &str, writer: &mut XmlWriter) {
        let attrs = Attrs::new().text("class-name", &self.class_name);
        writer.element(name, &attrs, |w| {
            write_properties(w, "config-property", &self.properties)
        });
    }
}

/// Write each entry as `<element name="key">value</element>`.
pub fn write_properties(writer: &mut XmlWriter, element: &str, properties: &Properties) {
    for (key, value) in properties {
        writer.text_element(element, &Attrs::new().text("name", key), value);
    }
}

/// Credentials used by the transaction manager during XA recovery.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Credential {
    pub user_name: Option<String>,
    pub password: Option<String>,
    pub security_domain: Option<String>,
}

impl Credential {
    pub fn write_xml(&self, name: &str, writer: &mut XmlWriter) {
        writer.element(name, &Attrs::new(), |w| {
            w.opt_text("user-name", self.user_name.as_deref());
            w.opt_text("password", self.password.as_deref());
            w.opt_text("security-domain", self.security_domain.as_deref());
        });
    }
}

/// XA recovery settings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Recovery {
    no_recovery: bool,
    credential: Option<Credential>,
    plugin: Option<Extension>,
}

impl Recovery {
    pub fn new(no_recovery: bool, credential: Option<Credential>, plugin: Option<Extension>) -> Self {
        Self {
            no_recovery,
            credential,
            plugin,
        }
    }

    pub fn no_recovery(&self) -> bool {
        self.no_recovery
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn plugin(&self) -> Option<&Extension> {
        self.plugin.as_ref()
    }
}

impl ToXml for Recovery {
    fn write_xml(&self, writer: &mut XmlWriter) {
        let attrs = Attrs::new().flag("no-recovery", self.no_recovery, NO_RECOVERY);
        writer.element("recovery", &attrs, |w| {
            if let Some(credential) = &self.credential {
                credential.write_xml("recover-credential", w);
            }
            if let Some(plugin) = &self.plugin {
                plugin.write_xml("recover-plugin", w);
            }
        });
    }
}

/// Pool growth and shrink policies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Capacity {
    pub incrementer: Option<Extension>,
    pub decrementer: Option<Extension>,
}

impl ToXml for Capacity {
    fn write_xml(&self, writer: &mut XmlWriter) {
        writer.element("capacity", &Attrs::new(), |w| {
            if let Some(incrementer) = &self.incrementer {
                incrementer.write_xml("incrementer", w);
            }
            if let Some(decrementer) = &self.decrementer {
                decrementer.write_xml("decrementer", w);
            }
        });
    }
}

/// Which connections a pool destroys after a connection error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FlushStrategy {
    #[default]
    FailingConnectionOnly,
    InvalidIdleConnections,
    IdleConnections,
    Gracefully,
    EntirePool,
    AllInvalidIdleConnections,
    AllIdleConnections,
    AllGracefully,
    AllConnections,
}

impl FlushStrategy {
    const ALL: [FlushStrategy; 9] = [
        FlushStrategy::FailingConnectionOnly,
        FlushStrategy::InvalidIdleConnections,
        FlushStrategy::IdleConnections,
        FlushStrategy::Gracefully,
        FlushStrategy::EntirePool,
        FlushStrategy::AllInvalidIdleConnections,
        FlushStrategy::AllIdleConnections,
        FlushStrategy::AllGracefully,
        FlushStrategy::AllConnections,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FlushStrategy::FailingConnectionOnly => "FailingConnectionOnly",
            FlushStrategy::InvalidIdleConnections => "InvalidIdleConnections",
            FlushStrategy::IdleConnections => "IdleConnections",
            FlushStrategy::Gracefully => "Gracefully",
            FlushStrategy::EntirePool => "EntirePool",
            FlushStrategy::AllInvalidIdleConnections => "AllInvalidIdleConnections",
            FlushStrategy::AllIdleConnections => "AllIdleConnections",
            FlushStrategy::AllGracefully => "AllGracefully",
            FlushStrategy::AllConnections => "AllConnections",
        }
    }

    /// Parse the text of a `flush-strategy` element.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let value = raw.trim();
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == value)
            .ok_or_else(|| ParseError::invalid_value("flush-strategy", raw, "a known flush strategy"))
    }
}

impl fmt::Display for FlushStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read a `config-property` style element into `(name, value)`.
pub fn parse_named_property<R: BufRead>(
    reader: &mut EventReader<R>,
    start: &StartTag,
) -> Result<(String, String), ParseError> {
    start.check_attributes::<PropertyAttr>()?;
    let name = start.required(&PropertyAttr::Name)?;
    let value = reader.read_text(start.name())?;
    Ok((name, value))
}

/// Read an extension point element such as `<exception-sorter class-name="..">`.
pub fn parse_extension<R: BufRead>(
    reader: &mut EventReader<R>,
    start: &StartTag,
) -> Result<Extension, ParseError> {
    trace!(element = start.name(), "extension");
    start.check_attributes::<ExtensionAttr>()?;
    let class_name = start.string(&ExtensionAttr::ClassName);
    let mut properties = Properties::new();
    loop {
        match reader.next_tag()? {
            XmlEvent::Start(child) => match ExtensionTag::resolve(child.name()) {
                ExtensionTag::ConfigProperty => {
                    let (name, value) = parse_named_property(reader, &child)?;
                    properties.insert(name, value);
                }
                ExtensionTag::Unknown(name) => return Err(ParseError::UnexpectedElement(name)),
            },
            XmlEvent::End(name) if name == start.name() => {
                return Ok(Extension::new(start.name(), class_name, properties)?);
            }
            XmlEvent::End(name) => return Err(ParseError::UnexpectedEndTag(name)),
            XmlEvent::Eof => return Err(ParseError::UnexpectedEndOfDocument),
        }
    }
}

/// Read a credential element (`recover-credential`).
pub fn parse_credential<R: BufRead>(
    reader: &mut EventReader<R>,
    start: &StartTag,
) -> Result<Credential, ParseError> {
    start.check_no_attributes()?;
    let mut credential = Credential::default();
    loop {
        match reader.next_tag()? {
            XmlEvent::Start(child) => match CredentialTag::resolve(child.name()) {
                CredentialTag::UserName => credential.user_name = reader.read_string(child.name())?,
                CredentialTag::Password => credential.password = reader.read_string(child.name())?,
                CredentialTag::SecurityDomain => {
                    credential.security_domain = reader.read_string(child.name())?
                }
                CredentialTag::Unknown(name) => return Err(ParseError::UnexpectedElement(name)),
            },
            XmlEvent::End(name) if name == start.name() => return Ok(credential),
            XmlEvent::End(name) => return Err(ParseError::UnexpectedEndTag(name)),
            XmlEvent::Eof => return Err(ParseError::UnexpectedEndOfDocument),
        }
    }
}

/// Read a `recovery` element.
pub fn parse_recovery<R: BufRead>(
    reader: &mut EventReader<R>,
    start: &StartTag,
) -> Result<Recovery, ParseError> {
    start.check_attributes::<RecoveryAttr>()?;
    let no_recovery = start.boolean(&RecoveryAttr::NoRecovery, NO_RECOVERY)?;
    let mut credential = None;
    let mut plugin = None;
    loop {
        match reader.next_tag()? {
            XmlEvent::Start(child) => match RecoveryTag::resolve(child.name()) {
                RecoveryTag::RecoverCredential => {
                    credential = Some(parse_credential(reader, &child)?)
                }
                RecoveryTag::RecoverPlugin => plugin = Some(parse_extension(reader, &child)?),
                RecoveryTag::Unknown(name) => return Err(ParseError::UnexpectedElement(name)),
            },
            XmlEvent::End(name) if name == start.name() => {
                return Ok(Recovery::new(no_recovery, credential, plugin));
            }
            XmlEvent::End(name) => return Err(ParseError::UnexpectedEndTag(name)),
            XmlEvent::Eof => return Err(ParseError::UnexpectedEndOfDocument),
        }
    }
}

/// Read a pool `capacity` element.
pub fn parse_capacity<R: BufRead>(
    reader: &mut EventReader<R>,
    start: &StartTag,
) -> Result<Capacity, ParseError> {
    start.check_no_attributes()?;
    let mut capacity = Capacity::default();
    loop {
        match reader.next_tag()? {
            XmlEvent::Start(child) => match CapacityTag::resolve(child.name()) {
                CapacityTag::Incrementer => {
                    capacity.incrementer = Some(parse_extension(reader, &child)?)
                }
                CapacityTag::Decrementer => {
                    capacity.decrementer = Some(parse_extension(reader, &child)?)
                }
                CapacityTag::Unknown(name) => return Err(ParseError::UnexpectedElement(name)),
            },
            XmlEvent::End(name) if name == start.name() => return Ok(capacity),
            XmlEvent::End(name) => return Err(ParseError::UnexpectedEndTag(name)),
            XmlEvent::Eof => return Err(ParseError::UnexpectedEndOfDocument),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::ParserOptions;

    fn read<'a, T>(
        xml: &'a str,
        f: impl FnOnce(&mut EventReader<&'a [u8]>, &StartTag) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let mut reader = EventReader::from_str(xml, ParserOptions::default());
        let start = reader.root()?;
        f(&mut reader, &start)
    }

    #[test]
    fn extension_keeps_property_order() {
        let xml = r#"<exception-sorter class-name="org.example.Sorter">
                <config-property name="b">2</config-property>
                <config-property name="a">1</config-property>
            </exception-sorter>"#;
        let ext = read(xml, parse_extension).expect("extension");
        assert_eq!(ext.class_name(), "org.example.Sorter");
        let keys: Vec<_> = ext.properties().keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn extension_without_class_name_is_wrapped() {
        let err = read("<valid-connection-checker/>", parse_extension).expect_err("class-name");
        match err {
            ParseError::Validate(ValidateError::InvalidTag { tag, source }) => {
                assert_eq!(tag, "valid-connection-checker");
                assert!(matches!(*source, ValidateError::MissingRequiredAttribute { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn property_name_is_required() {
        let xml = r#"<exception-sorter class-name="x"><config-property>1</config-property></exception-sorter>"#;
        let err = read(xml, parse_extension).expect_err("name");
        assert_eq!(err.offending_name(), Some("name"));
    }

    #[test]
    fn recovery_reads_credential_and_plugin() {
        let xml = r#"<recovery no-recovery="true">
                <recover-credential><user-name>sa</user-name><password>pw</password></recover-credential>
                <recover-plugin class-name="org.example.Plugin"/>
            </recovery>"#;
        let recovery = read(xml, parse_recovery).expect("recovery");
        assert!(recovery.no_recovery());
        let credential = recovery.credential().expect("credential");
        assert_eq!(credential.user_name.as_deref(), Some("sa"));
        assert_eq!(credential.security_domain, None);
        assert_eq!(recovery.plugin().map(Extension::class_name), Some("org.example.Plugin"));

        let xml = recovery.to_canonical_xml();
        let again = read(&xml, parse_recovery).expect("reparse");
        assert_eq!(again, recovery);
    }

    #[test]
    fn capacity_rejects_unknown_children() {
        let err = read("<capacity><grower/></capacity>", parse_capacity).expect_err("grower");
        assert!(matches!(err, ParseError::UnexpectedElement(ref name) if name == "grower"));
    }

    #[test]
    fn flush_strategy_names() {
        assert_eq!(FlushStrategy::default(), FlushStrategy::FailingConnectionOnly);
        assert_eq!(FlushStrategy::parse(" EntirePool ").expect("known"), FlushStrategy::EntirePool);
        assert!(FlushStrategy::parse("Everything").is_err());
    }
}

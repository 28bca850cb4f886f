#![cfg_attr(docsrs, feature(doc_cfg))]
//! WebLogic `<weblogic-connector>` descriptors (`weblogic-ra.xml`).
//!
//! The parser validates while it builds, so a returned [`WeblogicConnector`]
//! already satisfies every structural rule of the dialect.
//!
//! ```
//! use wls_descriptor::{ToXml, WlsParser};
//!
//! let xml = r#"<weblogic-connector>
//!   <outbound-resource-adapter>
//!     <connection-definition-group>
//!       <connection-factory-interface>javax.sql.DataSource</connection-factory-interface>
//!       <connection-instance><jndi-name>eis/Example</jndi-name></connection-instance>
//!     </connection-definition-group>
//!   </outbound-resource-adapter>
//! </weblogic-connector>"#;
//! let connector = WlsParser::new().parse_str(xml).expect("parse");
//! assert_eq!(connector.connection_instances().count(), 1);
//! let again = WlsParser::new().parse_str(&connector.to_canonical_xml()).expect("reparse");
//! assert_eq!(again, connector);
//! ```

pub mod connection;
pub mod connector;
mod parser;
pub mod security;
mod serialize;
pub mod tags;
pub mod work_manager;

pub use connection::{
    ConfigProperty, ConnectionProperties, ConnectionPropertiesParams, Logging, LoggingFields,
    PoolParams, PoolParamsFields, TransactionSupport,
};
pub use connector::{
    AdminObjectGroup, AdminObjectGroupParams, AdminObjectInstance, AdminObjects,
    ConnectionDefinitionGroup, ConnectionDefinitionGroupParams, ConnectionInstance,
    OutboundResourceAdapter, WeblogicConnector, WeblogicConnectorParams,
};
pub use descriptor_xml::{ParseError, ParserOptions, ToXml, ValidateError};
pub use parser::{parse_weblogic_connector, WlsParser, ROOT_ELEMENT};
pub use security::{
    AnonPrincipal, CallerPrincipal, CallerPrincipalMapping, GroupPrincipalMapping,
    ResourceAdapterSecurity, ResourceAdapterSecurityParams, SecurityWorkContext,
    SecurityWorkContextParams,
};
pub use work_manager::{
    ConnectorWorkManager, NamedCount, RequestClass, ShutdownTrigger, WorkManager,
    WorkManagerParams,
};

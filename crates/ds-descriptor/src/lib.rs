#![cfg_attr(docsrs, feature(doc_cfg))]
//! IronJacamar `<datasources>` descriptors: immutable model, validating
//! recursive-descent parser and canonical serializer.
//!
//! ```
//! use ds_descriptor::{DsParser, ToXml};
//!
//! let xml = r#"<datasources>
//!   <xa-datasource jndi-name="java:/XAExampleDS" pool-name="ExamplePool">
//!     <xa-datasource-property name="URL">jdbc:example://host/db</xa-datasource-property>
//!     <xa-datasource-class>com.example.Driver</xa-datasource-class>
//!   </xa-datasource>
//! </datasources>"#;
//! let set = DsParser::new().parse_str(xml).expect("parse");
//! let xa = &set.xa_data_sources()[0];
//! assert_eq!(xa.pool_name(), "ExamplePool");
//! let again = DsParser::new().parse_str(&set.to_canonical_xml()).expect("reparse");
//! assert_eq!(again, set);
//! ```

pub mod datasource;
pub mod defaults;
mod parser;
pub mod pool;
mod serialize;
pub mod settings;
pub mod tags;

pub use datasource::{
    DataSource, DataSourceBase, DataSourceBaseParams, DataSourceParams, DescriptorSet, Driver,
    DriverParams, XaDataSource, XaDataSourceParams,
};
pub use descriptor_xml::{
    Capacity, Credential, Extension, FlushStrategy, ParseError, ParserOptions, Properties,
    Recovery, ToXml, ValidateError,
};
pub use parser::{parse_datasources, DsParser, ROOT_ELEMENT};
pub use pool::{Pool, PoolParams, XaPool, XaPoolParams};
pub use settings::{
    Security, Statement, TimeOut, TimeOutParams, TrackStatements, TransactionIsolation,
    Validation, ValidationParams,
};

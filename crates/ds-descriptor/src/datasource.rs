//! Data source value objects and the `<datasources>` aggregate.

use descriptor_xml::{require_element, Properties, Recovery, ValidateError};
use indexmap::IndexMap;
use tracing::debug;

use crate::defaults;
use crate::pool::{Pool, XaPool};
use crate::settings::{Security, Statement, TimeOut, TransactionIsolation, Validation};

/// Unvalidated fields shared by `<datasource>` and `<xa-datasource>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSourceBaseParams {
    pub jndi_name: Option<String>,
    pub pool_name: Option<String>,
    pub enabled: bool,
    pub use_java_context: bool,
    pub spy: bool,
    pub use_ccm: bool,
    pub connectable: bool,
    pub tracking: Option<bool>,
    pub mcp: Option<String>,
    pub enlistment_trace: bool,
    pub transaction_isolation: Option<TransactionIsolation>,
    pub time_out: Option<TimeOut>,
    pub security: Option<Security>,
    pub statement: Option<Statement>,
    pub validation: Option<Validation>,
    pub url_delimiter: Option<String>,
    pub url_selector_strategy_class_name: Option<String>,
    /// Name of a driver declared under `<drivers>`.
    pub driver: Option<String>,
    pub new_connection_sql: Option<String>,
}

impl Default for DataSourceBaseParams {
    fn default() -> Self {
        Self {
            jndi_name: None,
            pool_name: None,
            enabled: defaults::ENABLED,
            use_java_context: defaults::USE_JAVA_CONTEXT,
            spy: defaults::SPY,
            use_ccm: defaults::USE_CCM,
            connectable: defaults::CONNECTABLE,
            tracking: None,
            mcp: None,
            enlistment_trace: defaults::ENLISTMENT_TRACE,
            transaction_isolation: None,
            time_out: None,
            security: None,
            statement: None,
            validation: None,
            url_delimiter: None,
            url_selector_strategy_class_name: None,
            driver: None,
            new_connection_sql: None,
        }
    }
}

/// Fields common to every data source variant.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DataSourceBase {
    jndi_name: String,
    pool_name: String,
    enabled: bool,
    use_java_context: bool,
    spy: bool,
    use_ccm: bool,
    connectable: bool,
    tracking: Option<bool>,
    mcp: Option<String>,
    enlistment_trace: bool,
    transaction_isolation: Option<TransactionIsolation>,
    time_out: Option<TimeOut>,
    security: Option<Security>,
    statement: Option<Statement>,
    validation: Option<Validation>,
    url_delimiter: Option<String>,
    url_selector_strategy_class_name: Option<String>,
    driver: Option<String>,
    new_connection_sql: Option<String>,
}

impl DataSourceBase {
    /// `element` names the owning element in error messages.
    pub fn new(element: &str, params: DataSourceBaseParams) -> Result<Self, ValidateError> {
        let jndi_name = required_attribute(params.jndi_name, "jndi-name", element)?;
        let pool_name = required_attribute(params.pool_name, "pool-name", element)?;
        Ok(Self {
            jndi_name,
            pool_name,
            enabled: params.enabled,
            use_java_context: params.use_java_context,
            spy: params.spy,
            use_ccm: params.use_ccm,
            connectable: params.connectable,
            tracking: params.tracking,
            mcp: params.mcp,
            enlistment_trace: params.enlistment_trace,
            transaction_isolation: params.transaction_isolation,
            time_out: params.time_out,
            security: params.security,
            statement: params.statement,
            validation: params.validation,
            url_delimiter: params.url_delimiter,
            url_selector_strategy_class_name: params.url_selector_strategy_class_name,
            driver: params.driver,
            new_connection_sql: params.new_connection_sql,
        })
    }

    pub fn jndi_name(&self) -> &str {
        &self.jndi_name
    }

    pub fn pool_name(&self) -> &str {
        &self.pool_name
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn use_java_context(&self) -> bool {
        self.use_java_context
    }

    pub fn spy(&self) -> bool {
        self.spy
    }

    pub fn use_ccm(&self) -> bool {
        self.use_ccm
    }

    pub fn connectable(&self) -> bool {
        self.connectable
    }

    pub fn tracking(&self) -> Option<bool> {
        self.tracking
    }

    pub fn mcp(&self) -> Option<&str> {
        self.mcp.as_deref()
    }

    pub fn enlistment_trace(&self) -> bool {
        self.enlistment_trace
    }

    pub fn transaction_isolation(&self) -> Option<TransactionIsolation> {
        self.transaction_isolation
    }

    pub fn time_out(&self) -> Option<&TimeOut> {
        self.time_out.as_ref()
    }

    pub fn security(&self) -> Option<&Security> {
        self.security.as_ref()
    }

    pub fn statement(&self) -> Option<&Statement> {
        self.statement.as_ref()
    }

    pub fn validation(&self) -> Option<&Validation> {
        self.validation.as_ref()
    }

    pub fn url_delimiter(&self) -> Option<&str> {
        self.url_delimiter.as_deref()
    }

    pub fn url_selector_strategy_class_name(&self) -> Option<&str> {
        self.url_selector_strategy_class_name.as_deref()
    }

    pub fn driver(&self) -> Option<&str> {
        self.driver.as_deref()
    }

    pub fn new_connection_sql(&self) -> Option<&str> {
        self.new_connection_sql.as_deref()
    }
}

fn required_attribute(
    value: Option<String>,
    attribute: &str,
    element: &str,
) -> Result<String, ValidateError> {
    value
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ValidateError::missing_attribute(attribute, element))
}

fn has_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|value| !value.trim().is_empty())
}

/// Unvalidated `<datasource>` contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSourceParams {
    pub base: DataSourceBaseParams,
    pub connection_url: Option<String>,
    pub driver_class: Option<String>,
    pub data_source_class: Option<String>,
    pub connection_properties: Properties,
    pub jta: bool,
    pub pool: Option<Pool>,
}

impl Default for DataSourceParams {
    fn default() -> Self {
        Self {
            base: DataSourceBaseParams::default(),
            connection_url: None,
            driver_class: None,
            data_source_class: None,
            connection_properties: Properties::new(),
            jta: defaults::JTA,
            pool: None,
        }
    }
}

/// A non-XA JDBC data source.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DataSource {
    base: DataSourceBase,
    connection_url: Option<String>,
    driver_class: Option<String>,
    data_source_class: Option<String>,
    connection_properties: Properties,
    jta: bool,
    pool: Option<Pool>,
}

impl DataSource {
    pub const ELEMENT: &'static str = "datasource";

    pub fn new(params: DataSourceParams) -> Result<Self, ValidateError> {
        let base = DataSourceBase::new(Self::ELEMENT, params.base)?;
        if has_text(&params.driver_class) {
            require_element(
                params.connection_url.as_deref(),
                "connection-url",
                Self::ELEMENT,
            )?;
        }
        if !has_text(&params.driver_class)
            && !has_text(&params.data_source_class)
            && !has_text(&base.driver)
        {
            return Err(ValidateError::missing_element("driver-class", Self::ELEMENT));
        }
        Ok(Self {
            base,
            connection_url: params.connection_url,
            driver_class: params.driver_class,
            data_source_class: params.data_source_class,
            connection_properties: params.connection_properties,
            jta: params.jta,
            pool: params.pool,
        })
    }

    pub fn base(&self) -> &DataSourceBase {
        &self.base
    }

    pub fn jndi_name(&self) -> &str {
        self.base.jndi_name()
    }

    pub fn pool_name(&self) -> &str {
        self.base.pool_name()
    }

    pub fn connection_url(&self) -> Option<&str> {
        self.connection_url.as_deref()
    }

    pub fn driver_class(&self) -> Option<&str> {
        self.driver_class.as_deref()
    }

    pub fn data_source_class(&self) -> Option<&str> {
        self.data_source_class.as_deref()
    }

    pub fn connection_properties(&self) -> &Properties {
        &self.connection_properties
    }

    pub fn jta(&self) -> bool {
        self.jta
    }

    pub fn pool(&self) -> Option<&Pool> {
        self.pool.as_ref()
    }

    /// Patch the driver class after parsing, e.g. from a referenced driver.
    pub fn force_driver_class(&mut self, driver_class: Option<String>) {
        self.driver_class = driver_class;
    }

    /// Patch the data source class after parsing.
    pub fn force_data_source_class(&mut self, data_source_class: Option<String>) {
        self.data_source_class = data_source_class;
    }
}

/// Unvalidated `<xa-datasource>` contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XaDataSourceParams {
    pub base: DataSourceBaseParams,
    pub xa_data_source_class: Option<String>,
    pub xa_data_source_properties: Properties,
    pub url_property: Option<String>,
    pub xa_pool: Option<XaPool>,
    pub recovery: Option<Recovery>,
}

/// An XA-capable JDBC data source.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct XaDataSource {
    base: DataSourceBase,
    xa_data_source_class: Option<String>,
    xa_data_source_properties: Properties,
    url_property: Option<String>,
    xa_pool: Option<XaPool>,
    recovery: Option<Recovery>,
}

impl XaDataSource {
    pub const ELEMENT: &'static str = "xa-datasource";

    pub fn new(params: XaDataSourceParams) -> Result<Self, ValidateError> {
        let base = DataSourceBase::new(Self::ELEMENT, params.base)?;
        if !has_text(&params.xa_data_source_class) && !has_text(&base.driver) {
            return Err(ValidateError::missing_element(
                "xa-datasource-class",
                Self::ELEMENT,
            ));
        }
        if params.xa_data_source_properties.is_empty() {
            return Err(ValidateError::missing_element(
                "xa-datasource-property",
                Self::ELEMENT,
            ));
        }
        Ok(Self {
            base,
            xa_data_source_class: params.xa_data_source_class,
            xa_data_source_properties: params.xa_data_source_properties,
            url_property: params.url_property,
            xa_pool: params.xa_pool,
            recovery: params.recovery,
        })
    }

    pub fn base(&self) -> &DataSourceBase {
        &self.base
    }

    pub fn jndi_name(&self) -> &str {
        self.base.jndi_name()
    }

    pub fn pool_name(&self) -> &str {
        self.base.pool_name()
    }

    pub fn xa_data_source_class(&self) -> Option<&str> {
        self.xa_data_source_class.as_deref()
    }

    pub fn xa_data_source_properties(&self) -> &Properties {
        &self.xa_data_source_properties
    }

    pub fn url_property(&self) -> Option<&str> {
        self.url_property.as_deref()
    }

    pub fn xa_pool(&self) -> Option<&XaPool> {
        self.xa_pool.as_ref()
    }

    pub fn recovery(&self) -> Option<&Recovery> {
        self.recovery.as_ref()
    }

    /// Patch the XA data source class after parsing.
    pub fn force_xa_data_source_class(&mut self, xa_data_source_class: Option<String>) {
        self.xa_data_source_class = xa_data_source_class;
    }
}

/// Unvalidated `<driver>` contents (inside `<drivers>`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriverParams {
    pub name: Option<String>,
    pub major_version: Option<i32>,
    pub minor_version: Option<i32>,
    pub module: Option<String>,
    pub driver_class: Option<String>,
    pub data_source_class: Option<String>,
    pub xa_data_source_class: Option<String>,
}

/// A named JDBC driver that data sources reference through `<driver>`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Driver {
    name: String,
    major_version: Option<i32>,
    minor_version: Option<i32>,
    module: Option<String>,
    driver_class: Option<String>,
    data_source_class: Option<String>,
    xa_data_source_class: Option<String>,
}

impl Driver {
    pub const ELEMENT: &'static str = "driver";

    pub fn new(params: DriverParams) -> Result<Self, ValidateError> {
        let name = required_attribute(params.name, "name", Self::ELEMENT)?;
        Ok(Self {
            name,
            major_version: params.major_version,
            minor_version: params.minor_version,
            module: params.module,
            driver_class: params.driver_class,
            data_source_class: params.data_source_class,
            xa_data_source_class: params.xa_data_source_class,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn major_version(&self) -> Option<i32> {
        self.major_version
    }

    pub fn minor_version(&self) -> Option<i32> {
        self.minor_version
    }

    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    pub fn driver_class(&self) -> Option<&str> {
        self.driver_class.as_deref()
    }

    pub fn data_source_class(&self) -> Option<&str> {
        self.data_source_class.as_deref()
    }

    pub fn xa_data_source_class(&self) -> Option<&str> {
        self.xa_data_source_class.as_deref()
    }
}

/// Everything declared by one `<datasources>` document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DescriptorSet {
    data_sources: Vec<DataSource>,
    xa_data_sources: Vec<XaDataSource>,
    drivers: IndexMap<String, Driver>,
}

impl DescriptorSet {
    /// Driver names must be unique; list order is kept.
    pub fn new(
        data_sources: Vec<DataSource>,
        xa_data_sources: Vec<XaDataSource>,
        drivers: Vec<Driver>,
    ) -> Result<Self, ValidateError> {
        let mut by_name = IndexMap::with_capacity(drivers.len());
        for driver in drivers {
            if by_name.contains_key(driver.name()) {
                return Err(ValidateError::DuplicateName {
                    element: Driver::ELEMENT.into(),
                    name: driver.name().to_string(),
                });
            }
            by_name.insert(driver.name().to_string(), driver);
        }
        Ok(Self {
            data_sources,
            xa_data_sources,
            drivers: by_name,
        })
    }

    pub fn data_sources(&self) -> &[DataSource] {
        &self.data_sources
    }

    pub fn xa_data_sources(&self) -> &[XaDataSource] {
        &self.xa_data_sources
    }

    pub fn drivers(&self) -> &IndexMap<String, Driver> {
        &self.drivers
    }

    pub fn driver(&self, name: &str) -> Option<&Driver> {
        self.drivers.get(name)
    }

    /// Fill in classes that data sources only name indirectly through a
    /// `<driver>` reference. Returns the number of patched fields.
    pub fn resolve_driver_references(&mut self) -> usize {
        let mut patched = 0;
        for ds in &mut self.data_sources {
            let Some(driver) = ds.base.driver.as_deref().and_then(|name| self.drivers.get(name))
            else {
                continue;
            };
            if ds.driver_class.is_none() && driver.driver_class.is_some() {
                ds.force_driver_class(driver.driver_class.clone());
                patched += 1;
            }
            if ds.data_source_class.is_none() && driver.data_source_class.is_some() {
                ds.force_data_source_class(driver.data_source_class.clone());
                patched += 1;
            }
        }
        for xa in &mut self.xa_data_sources {
            let Some(driver) = xa.base.driver.as_deref().and_then(|name| self.drivers.get(name))
            else {
                continue;
            };
            if xa.xa_data_source_class.is_none() && driver.xa_data_source_class.is_some() {
                xa.force_xa_data_source_class(driver.xa_data_source_class.clone());
                patched += 1;
            }
        }
        debug!(patched, "resolved driver references");
        patched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(jndi: Option<&str>, pool: Option<&str>) -> DataSourceBaseParams {
        DataSourceBaseParams {
            jndi_name: jndi.map(str::to_string),
            pool_name: pool.map(str::to_string),
            ..DataSourceBaseParams::default()
        }
    }

    #[test]
    fn jndi_name_is_required() {
        let err = DataSource::new(DataSourceParams {
            base: base(None, Some("pool")),
            data_source_class: Some("org.h2.jdbcx.JdbcDataSource".into()),
            ..DataSourceParams::default()
        })
        .expect_err("jndi-name");
        assert_eq!(err, ValidateError::missing_attribute("jndi-name", "datasource"));
    }

    #[test]
    fn driver_class_requires_connection_url() {
        let err = DataSource::new(DataSourceParams {
            base: base(Some("java:/H2DS"), Some("H2DS")),
            driver_class: Some("org.h2.Driver".into()),
            ..DataSourceParams::default()
        })
        .expect_err("connection-url");
        assert_eq!(err, ValidateError::missing_element("connection-url", "datasource"));
    }

    #[test]
    fn some_driver_family_is_required() {
        let err = DataSource::new(DataSourceParams {
            base: base(Some("java:/H2DS"), Some("H2DS")),
            connection_url: Some("jdbc:h2:mem:test".into()),
            ..DataSourceParams::default()
        })
        .expect_err("driver family");
        assert_eq!(err.offending_name(), "driver-class");

        let mut by_reference = base(Some("java:/H2DS"), Some("H2DS"));
        by_reference.driver = Some("h2".into());
        let ds = DataSource::new(DataSourceParams {
            base: by_reference,
            ..DataSourceParams::default()
        })
        .expect("driver reference suffices");
        assert_eq!(ds.base().driver(), Some("h2"));
        assert!(ds.jta());
    }

    #[test]
    fn xa_rules() {
        let mut props = Properties::new();
        props.insert("URL".into(), "jdbc:example://host/db".into());

        let err = XaDataSource::new(XaDataSourceParams {
            base: base(Some("java:/XA"), Some("XA")),
            xa_data_source_properties: props.clone(),
            ..XaDataSourceParams::default()
        })
        .expect_err("class");
        assert_eq!(err.offending_name(), "xa-datasource-class");

        let err = XaDataSource::new(XaDataSourceParams {
            base: base(Some("java:/XA"), Some("XA")),
            xa_data_source_class: Some("com.example.Driver".into()),
            ..XaDataSourceParams::default()
        })
        .expect_err("properties");
        assert_eq!(err.offending_name(), "xa-datasource-property");

        let xa = XaDataSource::new(XaDataSourceParams {
            base: base(Some("java:/XA"), Some("XA")),
            xa_data_source_class: Some("com.example.Driver".into()),
            xa_data_source_properties: props,
            ..XaDataSourceParams::default()
        })
        .expect("valid");
        assert_eq!(xa.pool_name(), "XA");
    }

    #[test]
    fn duplicate_driver_names_are_rejected() {
        let driver = |name: &str| {
            Driver::new(DriverParams {
                name: Some(name.into()),
                ..DriverParams::default()
            })
            .expect("driver")
        };
        let err = DescriptorSet::new(vec![], vec![], vec![driver("h2"), driver("h2")])
            .expect_err("duplicate");
        assert!(matches!(err, ValidateError::DuplicateName { ref name, .. } if name == "h2"));
        assert!(Driver::new(DriverParams::default()).is_err());
    }

    #[test]
    fn driver_references_are_resolved() {
        let mut reference = base(Some("java:/H2DS"), Some("H2DS"));
        reference.driver = Some("h2".into());
        let ds = DataSource::new(DataSourceParams {
            base: reference.clone(),
            connection_url: Some("jdbc:h2:mem:test".into()),
            ..DataSourceParams::default()
        })
        .expect("ds");
        let mut props = Properties::new();
        props.insert("URL".into(), "jdbc:h2:mem:xa".into());
        let xa = XaDataSource::new(XaDataSourceParams {
            base: reference,
            xa_data_source_properties: props,
            ..XaDataSourceParams::default()
        })
        .expect("xa");
        let driver = Driver::new(DriverParams {
            name: Some("h2".into()),
            driver_class: Some("org.h2.Driver".into()),
            xa_data_source_class: Some("org.h2.jdbcx.JdbcDataSource".into()),
            ..DriverParams::default()
        })
        .expect("driver");

        let mut set = DescriptorSet::new(vec![ds], vec![xa], vec![driver]).expect("set");
        assert_eq!(set.resolve_driver_references(), 2);
        assert_eq!(set.data_sources()[0].driver_class(), Some("org.h2.Driver"));
        assert_eq!(
            set.xa_data_sources()[0].xa_data_source_class(),
            Some("org.h2.jdbcx.JdbcDataSource")
        );
        assert_eq!(set.resolve_driver_references(), 0);
    }
}

//! Recursive-descent builders for the `<datasources>` dialect.

use std::io::BufRead;

use descriptor_xml::{
    parse_capacity, parse_extension, parse_named_property, parse_recovery, EventReader,
    FlushStrategy, ParseError, ParserOptions, StartTag, TagSet, XmlEvent,
};
use tracing::{debug, trace};

use crate::datasource::{
    DataSource, DataSourceBaseParams, DataSourceParams, DescriptorSet, Driver, DriverParams,
    XaDataSource, XaDataSourceParams,
};
use crate::defaults;
use crate::pool::{Pool, XaPool, XaPoolParams};
use crate::settings::{
    Security, Statement, TimeOut, TimeOutParams, TrackStatements, TransactionIsolation,
    Validation, ValidationParams,
};
use crate::tags::{
    DataSourceAttr, DataSourceTag, DataSourcesTag, DriverAttr, DriverTag, DriversTag, PoolTag,
    SecurityTag, StatementTag, TimeOutTag, ValidationTag, XaDataSourceAttr, XaDataSourceTag,
};

/// Root element of the dialect.
pub const ROOT_ELEMENT: &str = "datasources";

/// Parser for `<datasources>` documents.
///
/// ```
/// use ds_descriptor::DsParser;
///
/// let xml = r#"<datasources>
///   <datasource jndi-name="java:/H2DS" pool-name="H2DS">
///     <connection-url>jdbc:h2:mem:test</connection-url>
///     <driver-class>org.h2.Driver</driver-class>
///   </datasource>
/// </datasources>"#;
/// let set = DsParser::new().parse_str(xml).expect("parse");
/// assert_eq!(set.data_sources()[0].pool_name(), "H2DS");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DsParser {
    options: ParserOptions,
}

impl DsParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParserOptions) -> Self {
        Self { options }
    }

    pub fn parse_str(&self, xml: &str) -> Result<DescriptorSet, ParseError> {
        self.parse_events(EventReader::from_str(xml, self.options))
    }

    /// Parse from any buffered source; the source is dropped on return.
    pub fn parse_reader<R: BufRead>(&self, source: R) -> Result<DescriptorSet, ParseError> {
        self.parse_events(EventReader::from_reader(source, self.options))
    }

    fn parse_events<R: BufRead>(
        &self,
        mut reader: EventReader<R>,
    ) -> Result<DescriptorSet, ParseError> {
        let root = reader.root()?;
        if root.name() != ROOT_ELEMENT {
            return Err(ParseError::UnexpectedElement(root.name().to_string()));
        }
        let set = parse_datasources(&mut reader, &root)?;
        reader.finish()?;
        Ok(set)
    }
}

/// Build the aggregate from an already opened `<datasources>` element.
pub fn parse_datasources<R: BufRead>(
    reader: &mut EventReader<R>,
    start: &StartTag,
) -> Result<DescriptorSet, ParseError> {
    start.check_no_attributes()?;
    let mut data_sources = Vec::new();
    let mut xa_data_sources = Vec::new();
    let mut drivers = Vec::new();
    loop {
        match reader.next_tag()? {
            XmlEvent::Start(child) => match DataSourcesTag::resolve(child.name()) {
                DataSourcesTag::DataSource => data_sources.push(parse_datasource(reader, &child)?),
                DataSourcesTag::XaDataSource => {
                    xa_data_sources.push(parse_xa_datasource(reader, &child)?)
                }
                DataSourcesTag::Drivers => drivers.extend(parse_drivers(reader, &child)?),
                DataSourcesTag::Unknown(name) => return Err(ParseError::UnexpectedElement(name)),
            },
            XmlEvent::End(name) if name == start.name() => {
                let set = DescriptorSet::new(data_sources, xa_data_sources, drivers)?;
                debug!(
                    datasources = set.data_sources().len(),
                    xa_datasources = set.xa_data_sources().len(),
                    drivers = set.drivers().len(),
                    "parsed datasources descriptor"
                );
                return Ok(set);
            }
            XmlEvent::End(name) => return Err(ParseError::UnexpectedEndTag(name)),
            XmlEvent::Eof => return Err(ParseError::UnexpectedEndOfDocument),
        }
    }
}

fn read_child_text<R: BufRead>(
    reader: &mut EventReader<R>,
    child: &StartTag,
) -> Result<Option<String>, ParseError> {
    child.check_no_attributes()?;
    reader.read_string(child.name())
}

fn read_base_attributes(
    start: &StartTag,
    base: &mut DataSourceBaseParams,
) -> Result<(), ParseError> {
    base.jndi_name = start.string(&DataSourceAttr::JndiName);
    base.pool_name = start.string(&DataSourceAttr::PoolName);
    base.enabled = start.boolean(&DataSourceAttr::Enabled, defaults::ENABLED)?;
    base.use_java_context =
        start.boolean(&DataSourceAttr::UseJavaContext, defaults::USE_JAVA_CONTEXT)?;
    base.spy = start.boolean(&DataSourceAttr::Spy, defaults::SPY)?;
    base.use_ccm = start.boolean(&DataSourceAttr::UseCcm, defaults::USE_CCM)?;
    base.connectable = start.boolean(&DataSourceAttr::Connectable, defaults::CONNECTABLE)?;
    base.tracking = start.optional_boolean(&DataSourceAttr::Tracking)?;
    base.mcp = start.string(&DataSourceAttr::Mcp);
    base.enlistment_trace =
        start.boolean(&DataSourceAttr::EnlistmentTrace, defaults::ENLISTMENT_TRACE)?;
    Ok(())
}

fn parse_datasource<R: BufRead>(
    reader: &mut EventReader<R>,
    start: &StartTag,
) -> Result<DataSource, ParseError> {
    start.check_attributes::<DataSourceAttr>()?;
    trace!(jndi_name = ?start.value(&DataSourceAttr::JndiName), "datasource");
    let mut params = DataSourceParams::default();
    read_base_attributes(start, &mut params.base)?;
    params.jta = start.boolean(&DataSourceAttr::Jta, defaults::JTA)?;
    loop {
        match reader.next_tag()? {
            XmlEvent::Start(child) => match DataSourceTag::resolve(child.name()) {
                DataSourceTag::ConnectionUrl => {
                    params.connection_url = read_child_text(reader, &child)?
                }
                DataSourceTag::DriverClass => params.driver_class = read_child_text(reader, &child)?,
                DataSourceTag::DataSourceClass => {
                    params.data_source_class = read_child_text(reader, &child)?
                }
                DataSourceTag::Driver => params.base.driver = read_child_text(reader, &child)?,
                DataSourceTag::ConnectionProperty => {
                    let (name, value) = parse_named_property(reader, &child)?;
                    params.connection_properties.insert(name, value);
                }
                DataSourceTag::NewConnectionSql => {
                    params.base.new_connection_sql = read_child_text(reader, &child)?
                }
                DataSourceTag::TransactionIsolation => {
                    params.base.transaction_isolation =
                        Some(parse_transaction_isolation(reader, &child)?)
                }
                DataSourceTag::UrlDelimiter => {
                    params.base.url_delimiter = read_child_text(reader, &child)?
                }
                DataSourceTag::UrlSelectorStrategyClassName => {
                    params.base.url_selector_strategy_class_name =
                        read_child_text(reader, &child)?
                }
                DataSourceTag::Pool => params.pool = Some(parse_pool(reader, &child)?),
                DataSourceTag::Security => {
                    params.base.security = Some(parse_security(reader, &child)?)
                }
                DataSourceTag::Validation => {
                    params.base.validation = Some(parse_validation(reader, &child)?)
                }
                DataSourceTag::Timeout => {
                    params.base.time_out = Some(parse_timeout(reader, &child)?)
                }
                DataSourceTag::Statement => {
                    params.base.statement = Some(parse_statement(reader, &child)?)
                }
                DataSourceTag::Unknown(name) => return Err(ParseError::UnexpectedElement(name)),
            },
            XmlEvent::End(name) if name == start.name() => return Ok(DataSource::new(params)?),
            XmlEvent::End(name) => return Err(ParseError::UnexpectedEndTag(name)),
            XmlEvent::Eof => return Err(ParseError::UnexpectedEndOfDocument),
        }
    }
}

fn parse_xa_datasource<R: BufRead>(
    reader: &mut EventReader<R>,
    start: &StartTag,
) -> Result<XaDataSource, ParseError> {
    start.check_attributes::<XaDataSourceAttr>()?;
    trace!(jndi_name = ?start.value(&XaDataSourceAttr::JndiName), "xa-datasource");
    let mut params = XaDataSourceParams::default();
    read_base_attributes(start, &mut params.base)?;
    loop {
        match reader.next_tag()? {
            XmlEvent::Start(child) => match XaDataSourceTag::resolve(child.name()) {
                XaDataSourceTag::XaDataSourceProperty => {
                    let (name, value) = parse_named_property(reader, &child)?;
                    params.xa_data_source_properties.insert(name, value);
                }
                XaDataSourceTag::XaDataSourceClass => {
                    params.xa_data_source_class = read_child_text(reader, &child)?
                }
                XaDataSourceTag::Driver => params.base.driver = read_child_text(reader, &child)?,
                XaDataSourceTag::UrlDelimiter => {
                    params.base.url_delimiter = read_child_text(reader, &child)?
                }
                XaDataSourceTag::UrlProperty => {
                    params.url_property = read_child_text(reader, &child)?
                }
                XaDataSourceTag::UrlSelectorStrategyClassName => {
                    params.base.url_selector_strategy_class_name =
                        read_child_text(reader, &child)?
                }
                XaDataSourceTag::NewConnectionSql => {
                    params.base.new_connection_sql = read_child_text(reader, &child)?
                }
                XaDataSourceTag::TransactionIsolation => {
                    params.base.transaction_isolation =
                        Some(parse_transaction_isolation(reader, &child)?)
                }
                XaDataSourceTag::XaPool => params.xa_pool = Some(parse_xa_pool(reader, &child)?),
                XaDataSourceTag::Security => {
                    params.base.security = Some(parse_security(reader, &child)?)
                }
                XaDataSourceTag::Validation => {
                    params.base.validation = Some(parse_validation(reader, &child)?)
                }
                XaDataSourceTag::Timeout => {
                    params.base.time_out = Some(parse_timeout(reader, &child)?)
                }
                XaDataSourceTag::Statement => {
                    params.base.statement = Some(parse_statement(reader, &child)?)
                }
                XaDataSourceTag::Recovery => {
                    params.recovery = Some(parse_recovery(reader, &child)?)
                }
                XaDataSourceTag::Unknown(name) => {
                    return Err(ParseError::UnexpectedElement(name))
                }
            },
            XmlEvent::End(name) if name == start.name() => {
                return Ok(XaDataSource::new(params)?)
            }
            XmlEvent::End(name) => return Err(ParseError::UnexpectedEndTag(name)),
            XmlEvent::Eof => return Err(ParseError::UnexpectedEndOfDocument),
        }
    }
}

fn parse_transaction_isolation<R: BufRead>(
    reader: &mut EventReader<R>,
    child: &StartTag,
) -> Result<TransactionIsolation, ParseError> {
    child.check_no_attributes()?;
    let text = reader.read_text(child.name())?;
    TransactionIsolation::parse(&text)
}

fn parse_pool<R: BufRead>(
    reader: &mut EventReader<R>,
    start: &StartTag,
) -> Result<Pool, ParseError> {
    let params = parse_pool_params(reader, start, false)?;
    Ok(Pool::new(params.pool)?)
}

fn parse_xa_pool<R: BufRead>(
    reader: &mut EventReader<R>,
    start: &StartTag,
) -> Result<XaPool, ParseError> {
    let params = parse_pool_params(reader, start, true)?;
    Ok(XaPool::new(params)?)
}

fn parse_pool_params<R: BufRead>(
    reader: &mut EventReader<R>,
    start: &StartTag,
    xa: bool,
) -> Result<XaPoolParams, ParseError> {
    start.check_no_attributes()?;
    let mut params = XaPoolParams::default();
    loop {
        match reader.next_tag()? {
            XmlEvent::Start(child) => {
                let tag = PoolTag::resolve(child.name());
                if tag.is_xa_only() && !xa {
                    return Err(ParseError::UnexpectedElement(child.name().to_string()));
                }
                if !matches!(tag, PoolTag::Capacity | PoolTag::ConnectionListener) {
                    child.check_no_attributes()?;
                }
                let name = child.name();
                match tag {
                    PoolTag::MinPoolSize => params.pool.min_pool_size = reader.read_i32(name)?,
                    PoolTag::InitialPoolSize => {
                        params.pool.initial_pool_size = Some(reader.read_i32(name)?)
                    }
                    PoolTag::MaxPoolSize => params.pool.max_pool_size = reader.read_i32(name)?,
                    PoolTag::Prefill => params.pool.prefill = reader.read_bool(name)?,
                    PoolTag::UseStrictMin => params.pool.use_strict_min = reader.read_bool(name)?,
                    PoolTag::FlushStrategy => {
                        params.pool.flush_strategy = FlushStrategy::parse(&reader.read_text(name)?)?
                    }
                    PoolTag::AllowMultipleUsers => {
                        params.pool.allow_multiple_users = reader.read_bool(name)?
                    }
                    PoolTag::Capacity => {
                        params.pool.capacity = Some(parse_capacity(reader, &child)?)
                    }
                    PoolTag::Fair => params.pool.fair = reader.read_bool(name)?,
                    PoolTag::ConnectionListener => {
                        params.pool.connection_listener = Some(parse_extension(reader, &child)?)
                    }
                    PoolTag::IsSameRmOverride => {
                        params.is_same_rm_override = Some(reader.read_bool(name)?)
                    }
                    PoolTag::Interleaving => params.interleaving = reader.read_bool(name)?,
                    PoolTag::NoTxSeparatePools => {
                        params.no_tx_separate_pool = reader.read_bool(name)?
                    }
                    PoolTag::PadXid => params.pad_xid = reader.read_bool(name)?,
                    PoolTag::WrapXaResource => params.wrap_xa_resource = reader.read_bool(name)?,
                    PoolTag::Unknown(name) => return Err(ParseError::UnexpectedElement(name)),
                }
            }
            XmlEvent::End(name) if name == start.name() => return Ok(params),
            XmlEvent::End(name) => return Err(ParseError::UnexpectedEndTag(name)),
            XmlEvent::Eof => return Err(ParseError::UnexpectedEndOfDocument),
        }
    }
}

fn parse_security<R: BufRead>(
    reader: &mut EventReader<R>,
    start: &StartTag,
) -> Result<Security, ParseError> {
    start.check_no_attributes()?;
    let mut user_name = None;
    let mut password = None;
    let mut security_domain = None;
    let mut reauth_plugin = None;
    loop {
        match reader.next_tag()? {
            XmlEvent::Start(child) => match SecurityTag::resolve(child.name()) {
                SecurityTag::UserName => user_name = read_child_text(reader, &child)?,
                SecurityTag::Password => password = read_child_text(reader, &child)?,
                SecurityTag::SecurityDomain => security_domain = read_child_text(reader, &child)?,
                SecurityTag::ReauthPlugin => reauth_plugin = Some(parse_extension(reader, &child)?),
                SecurityTag::Unknown(name) => return Err(ParseError::UnexpectedElement(name)),
            },
            XmlEvent::End(name) if name == start.name() => {
                return Ok(Security::new(
                    user_name,
                    password,
                    security_domain,
                    reauth_plugin,
                ))
            }
            XmlEvent::End(name) => return Err(ParseError::UnexpectedEndTag(name)),
            XmlEvent::Eof => return Err(ParseError::UnexpectedEndOfDocument),
        }
    }
}

fn parse_validation<R: BufRead>(
    reader: &mut EventReader<R>,
    start: &StartTag,
) -> Result<Validation, ParseError> {
    start.check_no_attributes()?;
    let mut params = ValidationParams::default();
    loop {
        match reader.next_tag()? {
            XmlEvent::Start(child) => match ValidationTag::resolve(child.name()) {
                ValidationTag::ValidConnectionChecker => {
                    params.valid_connection_checker = Some(parse_extension(reader, &child)?)
                }
                ValidationTag::CheckValidConnectionSql => {
                    params.check_valid_connection_sql = read_child_text(reader, &child)?
                }
                ValidationTag::ValidateOnMatch => {
                    child.check_no_attributes()?;
                    params.validate_on_match = reader.read_bool(child.name())?
                }
                ValidationTag::BackgroundValidation => {
                    child.check_no_attributes()?;
                    params.background_validation = reader.read_bool(child.name())?
                }
                ValidationTag::BackgroundValidationMillis => {
                    child.check_no_attributes()?;
                    params.background_validation_millis = Some(reader.read_i64(child.name())?)
                }
                ValidationTag::UseFastFail => {
                    child.check_no_attributes()?;
                    params.use_fast_fail = reader.read_bool(child.name())?
                }
                ValidationTag::StaleConnectionChecker => {
                    params.stale_connection_checker = Some(parse_extension(reader, &child)?)
                }
                ValidationTag::ExceptionSorter => {
                    params.exception_sorter = Some(parse_extension(reader, &child)?)
                }
                ValidationTag::Unknown(name) => return Err(ParseError::UnexpectedElement(name)),
            },
            XmlEvent::End(name) if name == start.name() => return Ok(Validation::new(params)?),
            XmlEvent::End(name) => return Err(ParseError::UnexpectedEndTag(name)),
            XmlEvent::Eof => return Err(ParseError::UnexpectedEndOfDocument),
        }
    }
}

fn parse_timeout<R: BufRead>(
    reader: &mut EventReader<R>,
    start: &StartTag,
) -> Result<TimeOut, ParseError> {
    start.check_no_attributes()?;
    let mut params = TimeOutParams {
        set_tx_query_timeout: defaults::SET_TX_QUERY_TIMEOUT,
        ..TimeOutParams::default()
    };
    loop {
        match reader.next_tag()? {
            XmlEvent::Start(child) => {
                child.check_no_attributes()?;
                let name = child.name();
                match TimeOutTag::resolve(name) {
                    TimeOutTag::BlockingTimeoutMillis => {
                        params.blocking_timeout_millis = Some(reader.read_i64(name)?)
                    }
                    TimeOutTag::IdleTimeoutMinutes => {
                        params.idle_timeout_minutes = Some(reader.read_i64(name)?)
                    }
                    TimeOutTag::SetTxQueryTimeout => {
                        params.set_tx_query_timeout = reader.read_bool(name)?
                    }
                    TimeOutTag::QueryTimeout => params.query_timeout = Some(reader.read_i64(name)?),
                    TimeOutTag::UseTryLock => params.use_try_lock = Some(reader.read_i64(name)?),
                    TimeOutTag::AllocationRetry => {
                        params.allocation_retry = Some(reader.read_i32(name)?)
                    }
                    TimeOutTag::AllocationRetryWaitMillis => {
                        params.allocation_retry_wait_millis = Some(reader.read_i64(name)?)
                    }
                    TimeOutTag::XaResourceTimeout => {
                        params.xa_resource_timeout = Some(reader.read_i32(name)?)
                    }
                    TimeOutTag::ValidationQueryTimeout => {
                        params.validation_query_timeout = Some(reader.read_i64(name)?)
                    }
                    TimeOutTag::Unknown(name) => return Err(ParseError::UnexpectedElement(name)),
                }
            }
            XmlEvent::End(name) if name == start.name() => return Ok(TimeOut::new(params)?),
            XmlEvent::End(name) => return Err(ParseError::UnexpectedEndTag(name)),
            XmlEvent::Eof => return Err(ParseError::UnexpectedEndOfDocument),
        }
    }
}

fn parse_statement<R: BufRead>(
    reader: &mut EventReader<R>,
    start: &StartTag,
) -> Result<Statement, ParseError> {
    start.check_no_attributes()?;
    let mut track_statements = defaults::TRACK_STATEMENTS;
    let mut cache_size = None;
    let mut share = defaults::SHARE_PREPARED_STATEMENTS;
    loop {
        match reader.next_tag()? {
            XmlEvent::Start(child) => {
                child.check_no_attributes()?;
                let name = child.name();
                match StatementTag::resolve(name) {
                    StatementTag::TrackStatements => {
                        track_statements = TrackStatements::parse(&reader.read_text(name)?)?
                    }
                    StatementTag::PreparedStatementCacheSize => {
                        cache_size = Some(reader.read_i64(name)?)
                    }
                    StatementTag::SharePreparedStatements => share = reader.read_bool(name)?,
                    StatementTag::Unknown(name) => return Err(ParseError::UnexpectedElement(name)),
                }
            }
            XmlEvent::End(name) if name == start.name() => {
                return Ok(Statement::new(track_statements, cache_size, share)?)
            }
            XmlEvent::End(name) => return Err(ParseError::UnexpectedEndTag(name)),
            XmlEvent::Eof => return Err(ParseError::UnexpectedEndOfDocument),
        }
    }
}

fn parse_drivers<R: BufRead>(
    reader: &mut EventReader<R>,
    start: &StartTag,
) -> Result<Vec<Driver>, ParseError> {
    start.check_no_attributes()?;
    let mut drivers = Vec::new();
    loop {
        match reader.next_tag()? {
            XmlEvent::Start(child) => match DriversTag::resolve(child.name()) {
                DriversTag::Driver => drivers.push(parse_driver(reader, &child)?),
                DriversTag::Unknown(name) => return Err(ParseError::UnexpectedElement(name)),
            },
            XmlEvent::End(name) if name == start.name() => return Ok(drivers),
            XmlEvent::End(name) => return Err(ParseError::UnexpectedEndTag(name)),
            XmlEvent::Eof => return Err(ParseError::UnexpectedEndOfDocument),
        }
    }
}

fn parse_driver<R: BufRead>(
    reader: &mut EventReader<R>,
    start: &StartTag,
) -> Result<Driver, ParseError> {
    start.check_attributes::<DriverAttr>()?;
    let mut params = DriverParams {
        name: start.string(&DriverAttr::Name),
        major_version: start.integer(&DriverAttr::MajorVersion)?,
        minor_version: start.integer(&DriverAttr::MinorVersion)?,
        module: start.string(&DriverAttr::Module),
        ..DriverParams::default()
    };
    loop {
        match reader.next_tag()? {
            XmlEvent::Start(child) => match DriverTag::resolve(child.name()) {
                DriverTag::DriverClass => params.driver_class = read_child_text(reader, &child)?,
                DriverTag::DataSourceClass => {
                    params.data_source_class = read_child_text(reader, &child)?
                }
                DriverTag::XaDataSourceClass => {
                    params.xa_data_source_class = read_child_text(reader, &child)?
                }
                DriverTag::Unknown(name) => return Err(ParseError::UnexpectedElement(name)),
            },
            XmlEvent::End(name) if name == start.name() => return Ok(Driver::new(params)?),
            XmlEvent::End(name) => return Err(ParseError::UnexpectedEndTag(name)),
            XmlEvent::Eof => return Err(ParseError::UnexpectedEndOfDocument),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use descriptor_xml::{ToXml, ValidateError};

    fn parse(xml: &str) -> Result<DescriptorSet, ParseError> {
        DsParser::new().parse_str(xml)
    }

    fn with_pool(pool: &str) -> String {
        format!(
            r#"<datasources><datasource jndi-name="java:/H2DS" pool-name="H2DS">
                <connection-url>jdbc:h2:mem:test</connection-url>
                <driver-class>org.h2.Driver</driver-class>
                {pool}
            </datasource></datasources>"#
        )
    }

    #[test]
    fn missing_jndi_name_is_reported() {
        let err = parse(
            r#"<datasources><datasource pool-name="p"><datasource-class>x</datasource-class></datasource></datasources>"#,
        )
        .expect_err("jndi-name");
        assert!(matches!(
            err,
            ParseError::Validate(ValidateError::MissingRequiredAttribute { ref attribute, ref element })
                if attribute == "jndi-name" && element == "datasource"
        ));
    }

    #[test]
    fn driver_class_without_url_is_reported() {
        let err = parse(
            r#"<datasources><datasource jndi-name="java:/A" pool-name="A"><driver-class>org.h2.Driver</driver-class></datasource></datasources>"#,
        )
        .expect_err("connection-url");
        assert!(matches!(
            err,
            ParseError::Validate(ValidateError::MissingRequiredElement { ref element, .. })
                if element == "connection-url"
        ));
    }

    #[test]
    fn absent_min_pool_size_uses_default() {
        let set = parse(&with_pool("<pool><max-pool-size>50</max-pool-size></pool>")).expect("parse");
        let pool = set.data_sources()[0].pool().expect("pool");
        assert_eq!(pool.min_pool_size(), defaults::MIN_POOL_SIZE);
        assert_ne!(pool.min_pool_size(), 0);
        assert_eq!(pool.max_pool_size(), 50);
    }

    #[test]
    fn empty_boolean_elements_mean_true() {
        let set = parse(&with_pool(
            "<pool><prefill/><allow-multiple-users/><flush-strategy>IdleConnections</flush-strategy></pool>",
        ))
        .expect("parse");
        let pool = set.data_sources()[0].pool().expect("pool");
        assert!(pool.prefill());
        assert!(pool.allow_multiple_users());
        assert_eq!(pool.flush_strategy(), FlushStrategy::IdleConnections);
    }

    #[test]
    fn unknown_pool_child_is_rejected() {
        let err = parse(&with_pool("<pool><max-pool-sise>5</max-pool-sise></pool>"))
            .expect_err("unknown");
        assert!(matches!(err, ParseError::UnexpectedElement(ref name) if name == "max-pool-sise"));

        let err = parse(&with_pool("<pool><pad-xid>true</pad-xid></pool>")).expect_err("xa only");
        assert!(matches!(err, ParseError::UnexpectedElement(ref name) if name == "pad-xid"));
    }

    #[test]
    fn query_timeout_sign_is_checked() {
        let timeout = |value: &str| {
            parse(&with_pool(&format!(
                "<timeout><query-timeout>{value}</query-timeout></timeout>"
            )))
        };
        let err = timeout("-1").expect_err("negative");
        assert!(matches!(
            err,
            ParseError::Validate(ValidateError::InvalidNegativeValue { ref element })
                if element == "query-timeout"
        ));
        for ok in ["0", "15"] {
            let set = timeout(ok).expect("non-negative");
            let value = set.data_sources()[0]
                .base()
                .time_out()
                .and_then(TimeOut::query_timeout);
            assert_eq!(value, ok.parse().ok());
        }
    }

    #[test]
    fn malformed_numbers_name_the_element() {
        let err = parse(&with_pool("<pool><min-pool-size>lots</min-pool-size></pool>"))
            .expect_err("number");
        assert_eq!(err.offending_name(), Some("min-pool-size"));
    }

    #[test]
    fn unexpected_attribute_is_rejected() {
        let err = parse(
            r#"<datasources><datasource jndi-name="j" pool-name="p" colour="red"><datasource-class>x</datasource-class></datasource></datasources>"#,
        )
        .expect_err("attribute");
        assert!(matches!(err, ParseError::UnexpectedAttribute { ref attribute, .. } if attribute == "colour"));
    }

    #[test]
    fn truncated_document_fails() {
        let err = parse(r#"<datasources><datasource jndi-name="j" pool-name="p">"#)
            .expect_err("eof");
        assert!(matches!(
            err,
            ParseError::UnexpectedEndOfDocument | ParseError::Malformed(_)
        ));
    }

    #[test]
    fn wrong_root_is_rejected() {
        let err = parse("<connector/>").expect_err("root");
        assert!(matches!(err, ParseError::UnexpectedElement(ref name) if name == "connector"));
    }

    #[test]
    fn drivers_and_references() {
        let xml = r#"<datasources>
            <datasource jndi-name="java:/H2DS" pool-name="H2DS" enabled="false">
                <connection-url>jdbc:h2:mem:test</connection-url>
                <driver>h2</driver>
                <connection-property name="char.encoding">UTF-8</connection-property>
                <transaction-isolation>TRANSACTION_READ_COMMITTED</transaction-isolation>
            </datasource>
            <drivers>
                <driver name="h2" module="com.h2database.h2" major-version="1" minor-version="4">
                    <driver-class>org.h2.Driver</driver-class>
                    <xa-datasource-class>org.h2.jdbcx.JdbcDataSource</xa-datasource-class>
                </driver>
            </drivers>
        </datasources>"#;
        let mut set = parse(xml).expect("parse");
        let ds = &set.data_sources()[0];
        assert!(!ds.base().enabled());
        assert_eq!(ds.base().driver(), Some("h2"));
        assert_eq!(ds.connection_properties().get("char.encoding").map(String::as_str), Some("UTF-8"));
        assert_eq!(
            ds.base().transaction_isolation(),
            Some(TransactionIsolation::ReadCommitted)
        );
        let driver = set.driver("h2").expect("driver");
        assert_eq!(driver.major_version(), Some(1));
        assert_eq!(driver.module(), Some("com.h2database.h2"));

        assert_eq!(set.resolve_driver_references(), 1);
        assert_eq!(set.data_sources()[0].driver_class(), Some("org.h2.Driver"));
    }

    #[test]
    fn duplicate_drivers_are_rejected() {
        let xml = r#"<datasources><drivers>
            <driver name="h2"/><driver name="h2"/>
        </drivers></datasources>"#;
        let err = parse(xml).expect_err("duplicate");
        assert!(matches!(err, ParseError::Validate(ValidateError::DuplicateName { .. })));
    }

    #[test]
    fn parse_reader_matches_parse_str() {
        let xml = with_pool("<pool><min-pool-size>2</min-pool-size></pool>");
        let from_reader = DsParser::new()
            .parse_reader(std::io::Cursor::new(xml.as_bytes()))
            .expect("reader");
        assert_eq!(from_reader, parse(&xml).expect("str"));
    }

    #[test]
    fn empty_statement_takes_table_defaults() {
        let set = parse(&with_pool("<statement/>")).expect("parse");
        let statement = set.data_sources()[0].base().statement().expect("statement");
        assert_eq!(statement.track_statements(), defaults::TRACK_STATEMENTS);
        assert_eq!(statement.prepared_statement_cache_size(), None);
        assert_eq!(
            statement.share_prepared_statements(),
            defaults::SHARE_PREPARED_STATEMENTS
        );
    }

    #[test]
    fn blank_boolean_attribute_reads_as_false() {
        let xml = r#"<datasources><datasource jndi-name="java:/H2DS" pool-name="H2DS" enabled="" tracking="">
                <connection-url>jdbc:h2:mem:test</connection-url>
                <driver-class>org.h2.Driver</driver-class>
            </datasource></datasources>"#;
        let set = parse(xml).expect("parse");
        let base = set.data_sources()[0].base();
        assert!(!base.enabled());
        assert_eq!(base.tracking(), Some(false));
        assert!(base.use_java_context());

        let again = parse(&set.to_canonical_xml()).expect("reparse");
        assert_eq!(again, set);
    }
}

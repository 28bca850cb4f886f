//! Recursive-descent builders for `<weblogic-connector>`.

use std::io::BufRead;

use descriptor_xml::{EventReader, ParseError, ParserOptions, StartTag, TagSet, XmlEvent};
use tracing::{debug, trace};

use crate::connection::{
    ConfigProperty, ConnectionProperties, ConnectionPropertiesParams, Logging, LoggingFields,
    PoolParams, PoolParamsFields, TransactionSupport,
};
use crate::connector::{
    AdminObjectGroup, AdminObjectGroupParams, AdminObjectInstance, AdminObjects,
    ConnectionDefinitionGroup, ConnectionDefinitionGroupParams, ConnectionInstance,
    OutboundResourceAdapter, WeblogicConnector, WeblogicConnectorParams,
};
use crate::security::{
    AnonPrincipal, CallerPrincipal, CallerPrincipalMapping, GroupPrincipalMapping,
    ResourceAdapterSecurity, ResourceAdapterSecurityParams, SecurityWorkContext,
    SecurityWorkContextParams,
};
use crate::tags::{
    AdminObjectGroupTag, AdminObjectInstanceTag, AdminObjectsTag, CallerMappingTag,
    ConnectionDefinitionGroupTag, ConnectionInstanceTag, ConnectionPropertiesTag, ConnectorAttr,
    ConnectorTag, ConnectorWorkManagerTag, GroupMappingTag, LoggingTag, OutboundTag,
    PoolParamsTag, PrincipalTag, PropertiesTag, PropertyTag, RequestClassTag, SecurityTag,
    SecurityWorkContextTag, ShutdownTriggerTag, WorkManagerTag,
};
use crate::work_manager::{
    ConnectorWorkManager, NamedCount, RequestClass, ShutdownTrigger, WorkManager,
    WorkManagerParams,
};

/// Root element of the dialect.
pub const ROOT_ELEMENT: &str = "weblogic-connector";

/// Parser for `weblogic-ra.xml` documents.
///
/// ```
/// use wls_descriptor::WlsParser;
///
/// let xml = r#"<weblogic-connector version="1.3">
///   <jndi-name>eis/ExampleRA</jndi-name>
/// </weblogic-connector>"#;
/// let connector = WlsParser::new().parse_str(xml).expect("parse");
/// assert_eq!(connector.jndi_name(), Some("eis/ExampleRA"));
/// assert_eq!(connector.version(), Some("1.3"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct WlsParser {
    options: ParserOptions,
}

impl WlsParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParserOptions) -> Self {
        Self { options }
    }

    pub fn parse_str(&self, xml: &str) -> Result<WeblogicConnector, ParseError> {
        self.parse_events(EventReader::from_str(xml, self.options))
    }

    /// Parse from any buffered source; the source is dropped on return.
    pub fn parse_reader<R: BufRead>(&self, source: R) -> Result<WeblogicConnector, ParseError> {
        self.parse_events(EventReader::from_reader(source, self.options))
    }

    fn parse_events<R: BufRead>(
        &self,
        mut reader: EventReader<R>,
    ) -> Result<WeblogicConnector, ParseError> {
        let root = reader.root()?;
        if root.name() != ROOT_ELEMENT {
            return Err(ParseError::UnexpectedElement(root.name().to_string()));
        }
        let connector = parse_weblogic_connector(&mut reader, &root)?;
        reader.finish()?;
        Ok(connector)
    }
}

/// Build the aggregate from an already opened `<weblogic-connector>` element.
pub fn parse_weblogic_connector<R: BufRead>(
    reader: &mut EventReader<R>,
    start: &StartTag,
) -> Result<WeblogicConnector, ParseError> {
    start.check_attributes::<ConnectorAttr>()?;
    let mut params = WeblogicConnectorParams {
        version: start.string(&ConnectorAttr::Version),
        id: start.string(&ConnectorAttr::Id),
        ..WeblogicConnectorParams::default()
    };
    for_each_child(reader, start, |reader, child| {
        match ConnectorTag::resolve(child.name()) {
            ConnectorTag::NativeLibdir => params.native_libdir = text(reader, &child)?,
            ConnectorTag::JndiName => params.jndi_name = text(reader, &child)?,
            ConnectorTag::EnableAccessOutsideApp => {
                params.enable_access_outside_app = flag(reader, &child)?
            }
            ConnectorTag::EnableGlobalAccessToClasses => {
                params.enable_global_access_to_classes = flag(reader, &child)?
            }
            ConnectorTag::WorkManager => {
                params.work_manager = Some(parse_work_manager(reader, &child)?)
            }
            ConnectorTag::ConnectorWorkManager => {
                params.connector_work_manager = Some(parse_connector_work_manager(reader, &child)?)
            }
            ConnectorTag::Security => params.security = Some(parse_security(reader, &child)?),
            ConnectorTag::Properties => params.properties = parse_properties(reader, &child)?,
            ConnectorTag::AdminObjects => {
                params.admin_objects = Some(parse_admin_objects(reader, &child)?)
            }
            ConnectorTag::OutboundResourceAdapter => {
                params.outbound_resource_adapter = Some(parse_outbound(reader, &child)?)
            }
            ConnectorTag::Unknown(name) => return Err(ParseError::UnexpectedElement(name)),
        }
        Ok(())
    })?;
    let connector = WeblogicConnector::new(params)?;
    debug!(
        version = connector.version().unwrap_or("unversioned"),
        connection_instances = connector.connection_instances().count(),
        admin_object_instances = connector.admin_object_instances().count(),
        "parsed weblogic-connector descriptor"
    );
    Ok(connector)
}

/// Feed every child start tag of `start` to `visit` until its end tag.
fn for_each_child<R, F>(
    reader: &mut EventReader<R>,
    start: &StartTag,
    mut visit: F,
) -> Result<(), ParseError>
where
    R: BufRead,
    F: FnMut(&mut EventReader<R>, StartTag) -> Result<(), ParseError>,
{
    loop {
        match reader.next_tag()? {
            XmlEvent::Start(child) => visit(reader, child)?,
            XmlEvent::End(name) if name == start.name() => return Ok(()),
            XmlEvent::End(name) => return Err(ParseError::UnexpectedEndTag(name)),
            XmlEvent::Eof => return Err(ParseError::UnexpectedEndOfDocument),
        }
    }
}

fn text<R: BufRead>(
    reader: &mut EventReader<R>,
    child: &StartTag,
) -> Result<Option<String>, ParseError> {
    child.check_no_attributes()?;
    reader.read_string(child.name())
}

fn flag<R: BufRead>(
    reader: &mut EventReader<R>,
    child: &StartTag,
) -> Result<Option<bool>, ParseError> {
    child.check_no_attributes()?;
    reader.read_bool(child.name()).map(Some)
}

fn number<R: BufRead>(
    reader: &mut EventReader<R>,
    child: &StartTag,
) -> Result<Option<i32>, ParseError> {
    child.check_no_attributes()?;
    reader.read_i32(child.name()).map(Some)
}

fn parse_work_manager<R: BufRead>(
    reader: &mut EventReader<R>,
    start: &StartTag,
) -> Result<WorkManager, ParseError> {
    start.check_no_attributes()?;
    let mut params = WorkManagerParams::default();
    for_each_child(reader, start, |reader, child| {
        match WorkManagerTag::resolve(child.name()) {
            WorkManagerTag::Name => params.name = text(reader, &child)?,
            WorkManagerTag::ResponseTimeRequestClass | WorkManagerTag::FairShareRequestClass => {
                params.request_class = Some(parse_request_class(reader, &child)?)
            }
            WorkManagerTag::RequestClassName => params.request_class_name = text(reader, &child)?,
            WorkManagerTag::MinThreadsConstraint => {
                params.min_threads_constraint = Some(parse_named_count(reader, &child)?)
            }
            WorkManagerTag::MinThreadsConstraintName => {
                params.min_threads_constraint_name = text(reader, &child)?
            }
            WorkManagerTag::MaxThreadsConstraint => {
                params.max_threads_constraint = Some(parse_named_count(reader, &child)?)
            }
            WorkManagerTag::MaxThreadsConstraintName => {
                params.max_threads_constraint_name = text(reader, &child)?
            }
            WorkManagerTag::Capacity => params.capacity = Some(parse_named_count(reader, &child)?),
            WorkManagerTag::CapacityName => params.capacity_name = text(reader, &child)?,
            WorkManagerTag::ShutdownTrigger => {
                params.shutdown_trigger = Some(parse_shutdown_trigger(reader, &child)?)
            }
            WorkManagerTag::IgnoreStuckThreads => {
                params.ignore_stuck_threads = flag(reader, &child)?
            }
            WorkManagerTag::Unknown(name) => return Err(ParseError::UnexpectedElement(name)),
        }
        Ok(())
    })?;
    Ok(WorkManager::new(params)?)
}

fn parse_request_class<R: BufRead>(
    reader: &mut EventReader<R>,
    start: &StartTag,
) -> Result<RequestClass, ParseError> {
    start.check_no_attributes()?;
    let fair_share = start.name() == RequestClass::FAIR_SHARE;
    let mut name = None;
    let mut amount = None;
    for_each_child(reader, start, |reader, child| {
        match RequestClassTag::resolve(child.name()) {
            RequestClassTag::Name => name = text(reader, &child)?,
            RequestClassTag::FairShare if fair_share => amount = number(reader, &child)?,
            RequestClassTag::GoalMs if !fair_share => amount = number(reader, &child)?,
            other => return Err(ParseError::UnexpectedElement(other.to_string())),
        }
        Ok(())
    })?;
    let class = if fair_share {
        RequestClass::fair_share(name, amount)?
    } else {
        RequestClass::response_time(name, amount)?
    };
    Ok(class)
}

fn parse_named_count<R: BufRead>(
    reader: &mut EventReader<R>,
    start: &StartTag,
) -> Result<NamedCount, ParseError> {
    start.check_no_attributes()?;
    let mut name = None;
    let mut count = None;
    for_each_child(reader, start, |reader, child| {
        match RequestClassTag::resolve(child.name()) {
            RequestClassTag::Name => name = text(reader, &child)?,
            RequestClassTag::Count => count = number(reader, &child)?,
            other => return Err(ParseError::UnexpectedElement(other.to_string())),
        }
        Ok(())
    })?;
    Ok(NamedCount::new(start.name(), name, count)?)
}

fn parse_shutdown_trigger<R: BufRead>(
    reader: &mut EventReader<R>,
    start: &StartTag,
) -> Result<ShutdownTrigger, ParseError> {
    start.check_no_attributes()?;
    let mut max_stuck_thread_time = None;
    let mut stuck_thread_count = None;
    for_each_child(reader, start, |reader, child| {
        match ShutdownTriggerTag::resolve(child.name()) {
            ShutdownTriggerTag::MaxStuckThreadTime => {
                max_stuck_thread_time = number(reader, &child)?
            }
            ShutdownTriggerTag::StuckThreadCount => stuck_thread_count = number(reader, &child)?,
            ShutdownTriggerTag::Unknown(name) => return Err(ParseError::UnexpectedElement(name)),
        }
        Ok(())
    })?;
    Ok(ShutdownTrigger::new(max_stuck_thread_time, stuck_thread_count)?)
}

fn parse_connector_work_manager<R: BufRead>(
    reader: &mut EventReader<R>,
    start: &StartTag,
) -> Result<ConnectorWorkManager, ParseError> {
    start.check_no_attributes()?;
    let mut max_requests = None;
    for_each_child(reader, start, |reader, child| {
        match ConnectorWorkManagerTag::resolve(child.name()) {
            ConnectorWorkManagerTag::MaxConcurrentLongRunningRequests => {
                max_requests = number(reader, &child)?
            }
            ConnectorWorkManagerTag::Unknown(name) => {
                return Err(ParseError::UnexpectedElement(name))
            }
        }
        Ok(())
    })?;
    Ok(ConnectorWorkManager::new(max_requests)?)
}

fn parse_security<R: BufRead>(
    reader: &mut EventReader<R>,
    start: &StartTag,
) -> Result<ResourceAdapterSecurity, ParseError> {
    start.check_no_attributes()?;
    let mut security = ResourceAdapterSecurityParams::default();
    for_each_child(reader, start, |reader, child| {
        match SecurityTag::resolve(child.name()) {
            SecurityTag::DefaultPrincipalName => {
                security.default_principal_name = Some(parse_anon_principal(reader, &child)?)
            }
            SecurityTag::ManageAsPrincipalName => {
                security.manage_as_principal_name = Some(parse_anon_principal(reader, &child)?)
            }
            SecurityTag::RunAsPrincipalName => {
                security.run_as_principal_name = Some(parse_caller_principal(reader, &child)?)
            }
            SecurityTag::RunWorkAsPrincipalName => {
                security.run_work_as_principal_name = Some(parse_caller_principal(reader, &child)?)
            }
            SecurityTag::SecurityWorkContext => {
                security.security_work_context = Some(parse_security_work_context(reader, &child)?)
            }
            SecurityTag::Unknown(name) => return Err(ParseError::UnexpectedElement(name)),
        }
        Ok(())
    })?;
    Ok(ResourceAdapterSecurity::new(security))
}

fn parse_anon_principal<R: BufRead>(
    reader: &mut EventReader<R>,
    start: &StartTag,
) -> Result<AnonPrincipal, ParseError> {
    let caller = parse_caller_principal(reader, start)?;
    if caller.use_caller_identity().is_some() {
        return Err(ParseError::UnexpectedElement(
            PrincipalTag::UseCallerIdentity.to_string(),
        ));
    }
    Ok(AnonPrincipal::new(
        caller.use_anonymous_identity(),
        caller.principal_name().map(str::to_string),
    ))
}

fn parse_caller_principal<R: BufRead>(
    reader: &mut EventReader<R>,
    start: &StartTag,
) -> Result<CallerPrincipal, ParseError> {
    start.check_no_attributes()?;
    let mut use_anonymous_identity = None;
    let mut use_caller_identity = None;
    let mut principal_name = None;
    for_each_child(reader, start, |reader, child| {
        match PrincipalTag::resolve(child.name()) {
            PrincipalTag::UseAnonymousIdentity => use_anonymous_identity = flag(reader, &child)?,
            PrincipalTag::UseCallerIdentity => use_caller_identity = flag(reader, &child)?,
            PrincipalTag::PrincipalName => principal_name = text(reader, &child)?,
            PrincipalTag::Unknown(name) => return Err(ParseError::UnexpectedElement(name)),
        }
        Ok(())
    })?;
    Ok(CallerPrincipal::new(
        use_anonymous_identity,
        use_caller_identity,
        principal_name,
    ))
}

fn parse_security_work_context<R: BufRead>(
    reader: &mut EventReader<R>,
    start: &StartTag,
) -> Result<SecurityWorkContext, ParseError> {
    start.check_no_attributes()?;
    let mut context = SecurityWorkContextParams::default();
    for_each_child(reader, start, |reader, child| {
        match SecurityWorkContextTag::resolve(child.name()) {
            SecurityWorkContextTag::InboundMappingRequired => {
                context.inbound_mapping_required = flag(reader, &child)?
            }
            SecurityWorkContextTag::CallerPrincipalDefaultMapped => {
                context.caller_principal_default_mapped =
                    Some(parse_anon_principal(reader, &child)?)
            }
            SecurityWorkContextTag::CallerPrincipalMapping => context
                .caller_principal_mappings
                .push(parse_caller_mapping(reader, &child)?),
            SecurityWorkContextTag::GroupPrincipalDefaultMapped => {
                context.group_principal_default_mapped = text(reader, &child)?
            }
            SecurityWorkContextTag::GroupPrincipalMapping => context
                .group_principal_mappings
                .push(parse_group_mapping(reader, &child)?),
            SecurityWorkContextTag::Unknown(name) => {
                return Err(ParseError::UnexpectedElement(name))
            }
        }
        Ok(())
    })?;
    Ok(SecurityWorkContext::new(context))
}

fn parse_caller_mapping<R: BufRead>(
    reader: &mut EventReader<R>,
    start: &StartTag,
) -> Result<CallerPrincipalMapping, ParseError> {
    start.check_no_attributes()?;
    let mut eis_principal = None;
    let mut mapped_principal = None;
    for_each_child(reader, start, |reader, child| {
        match CallerMappingTag::resolve(child.name()) {
            CallerMappingTag::EisCallerPrincipal => eis_principal = text(reader, &child)?,
            CallerMappingTag::MappedCallerPrincipal => {
                mapped_principal = Some(parse_anon_principal(reader, &child)?)
            }
            CallerMappingTag::Unknown(name) => return Err(ParseError::UnexpectedElement(name)),
        }
        Ok(())
    })?;
    Ok(CallerPrincipalMapping::new(eis_principal, mapped_principal))
}

fn parse_group_mapping<R: BufRead>(
    reader: &mut EventReader<R>,
    start: &StartTag,
) -> Result<GroupPrincipalMapping, ParseError> {
    start.check_no_attributes()?;
    let mut eis_principal = None;
    let mut mapped_principal = None;
    for_each_child(reader, start, |reader, child| {
        match GroupMappingTag::resolve(child.name()) {
            GroupMappingTag::EisGroupPrincipal => eis_principal = text(reader, &child)?,
            GroupMappingTag::MappedGroupPrincipal => mapped_principal = text(reader, &child)?,
            GroupMappingTag::Unknown(name) => return Err(ParseError::UnexpectedElement(name)),
        }
        Ok(())
    })?;
    Ok(GroupPrincipalMapping::new(eis_principal, mapped_principal))
}

/// `properties`, `default-properties` and the nested `properties` of
/// connection and admin object instances.
fn parse_properties<R: BufRead>(
    reader: &mut EventReader<R>,
    start: &StartTag,
) -> Result<Vec<ConfigProperty>, ParseError> {
    start.check_no_attributes()?;
    let mut properties = Vec::new();
    for_each_child(reader, start, |reader, child| {
        match PropertiesTag::resolve(child.name()) {
            PropertiesTag::Property => properties.push(parse_property(reader, &child)?),
            PropertiesTag::Unknown(name) => return Err(ParseError::UnexpectedElement(name)),
        }
        Ok(())
    })?;
    Ok(properties)
}

fn parse_property<R: BufRead>(
    reader: &mut EventReader<R>,
    start: &StartTag,
) -> Result<ConfigProperty, ParseError> {
    start.check_no_attributes()?;
    let mut name = None;
    let mut value = None;
    for_each_child(reader, start, |reader, child| {
        match PropertyTag::resolve(child.name()) {
            PropertyTag::Name => name = text(reader, &child)?,
            PropertyTag::Value => value = text(reader, &child)?,
            PropertyTag::Unknown(name) => return Err(ParseError::UnexpectedElement(name)),
        }
        Ok(())
    })?;
    trace!(name = ?name, "property");
    Ok(ConfigProperty::new(name, value)?)
}

fn parse_admin_objects<R: BufRead>(
    reader: &mut EventReader<R>,
    start: &StartTag,
) -> Result<AdminObjects, ParseError> {
    start.check_no_attributes()?;
    let mut default_properties = Vec::new();
    let mut groups = Vec::new();
    for_each_child(reader, start, |reader, child| {
        match AdminObjectsTag::resolve(child.name()) {
            AdminObjectsTag::DefaultProperties => {
                default_properties = parse_properties(reader, &child)?
            }
            AdminObjectsTag::AdminObjectGroup => {
                groups.push(parse_admin_object_group(reader, &child)?)
            }
            AdminObjectsTag::Unknown(name) => return Err(ParseError::UnexpectedElement(name)),
        }
        Ok(())
    })?;
    Ok(AdminObjects::new(default_properties, groups))
}

fn parse_admin_object_group<R: BufRead>(
    reader: &mut EventReader<R>,
    start: &StartTag,
) -> Result<AdminObjectGroup, ParseError> {
    start.check_no_attributes()?;
    let mut params = AdminObjectGroupParams::default();
    for_each_child(reader, start, |reader, child| {
        match AdminObjectGroupTag::resolve(child.name()) {
            AdminObjectGroupTag::AdminObjectInterface => {
                params.admin_object_interface = text(reader, &child)?
            }
            AdminObjectGroupTag::AdminObjectClass => {
                params.admin_object_class = text(reader, &child)?
            }
            AdminObjectGroupTag::DefaultProperties => {
                params.default_properties = parse_properties(reader, &child)?
            }
            AdminObjectGroupTag::AdminObjectInstance => params
                .instances
                .push(parse_admin_object_instance(reader, &child)?),
            AdminObjectGroupTag::Unknown(name) => return Err(ParseError::UnexpectedElement(name)),
        }
        Ok(())
    })?;
    Ok(AdminObjectGroup::new(params)?)
}

fn parse_admin_object_instance<R: BufRead>(
    reader: &mut EventReader<R>,
    start: &StartTag,
) -> Result<AdminObjectInstance, ParseError> {
    start.check_no_attributes()?;
    let mut jndi_name = None;
    let mut properties = Vec::new();
    for_each_child(reader, start, |reader, child| {
        match AdminObjectInstanceTag::resolve(child.name()) {
            AdminObjectInstanceTag::JndiName => jndi_name = text(reader, &child)?,
            AdminObjectInstanceTag::Properties => properties = parse_properties(reader, &child)?,
            AdminObjectInstanceTag::Unknown(name) => {
                return Err(ParseError::UnexpectedElement(name))
            }
        }
        Ok(())
    })?;
    Ok(AdminObjectInstance::new(jndi_name, properties)?)
}

fn parse_outbound<R: BufRead>(
    reader: &mut EventReader<R>,
    start: &StartTag,
) -> Result<OutboundResourceAdapter, ParseError> {
    start.check_no_attributes()?;
    let mut defaults = None;
    let mut groups = Vec::new();
    for_each_child(reader, start, |reader, child| {
        match OutboundTag::resolve(child.name()) {
            OutboundTag::DefaultConnectionProperties => {
                defaults = Some(parse_connection_properties(reader, &child)?)
            }
            OutboundTag::ConnectionDefinitionGroup => {
                groups.push(parse_connection_definition_group(reader, &child)?)
            }
            OutboundTag::Unknown(name) => return Err(ParseError::UnexpectedElement(name)),
        }
        Ok(())
    })?;
    Ok(OutboundResourceAdapter::new(defaults, groups))
}

fn parse_connection_definition_group<R: BufRead>(
    reader: &mut EventReader<R>,
    start: &StartTag,
) -> Result<ConnectionDefinitionGroup, ParseError> {
    start.check_no_attributes()?;
    let mut params = ConnectionDefinitionGroupParams::default();
    for_each_child(reader, start, |reader, child| {
        match ConnectionDefinitionGroupTag::resolve(child.name()) {
            ConnectionDefinitionGroupTag::ConnectionFactoryInterface => {
                params.connection_factory_interface = text(reader, &child)?
            }
            ConnectionDefinitionGroupTag::DefaultConnectionProperties => {
                params.default_connection_properties =
                    Some(parse_connection_properties(reader, &child)?)
            }
            ConnectionDefinitionGroupTag::ConnectionInstance => params
                .instances
                .push(parse_connection_instance(reader, &child)?),
            ConnectionDefinitionGroupTag::Unknown(name) => {
                return Err(ParseError::UnexpectedElement(name))
            }
        }
        Ok(())
    })?;
    Ok(ConnectionDefinitionGroup::new(params)?)
}

fn parse_connection_instance<R: BufRead>(
    reader: &mut EventReader<R>,
    start: &StartTag,
) -> Result<ConnectionInstance, ParseError> {
    start.check_no_attributes()?;
    let mut description = None;
    let mut jndi_name = None;
    let mut properties = None;
    for_each_child(reader, start, |reader, child| {
        match ConnectionInstanceTag::resolve(child.name()) {
            ConnectionInstanceTag::Description => description = text(reader, &child)?,
            ConnectionInstanceTag::JndiName => jndi_name = text(reader, &child)?,
            ConnectionInstanceTag::ConnectionProperties => {
                properties = Some(parse_connection_properties(reader, &child)?)
            }
            ConnectionInstanceTag::Unknown(name) => {
                return Err(ParseError::UnexpectedElement(name))
            }
        }
        Ok(())
    })?;
    trace!(jndi_name = ?jndi_name, "connection-instance");
    Ok(ConnectionInstance::new(description, jndi_name, properties)?)
}

fn parse_connection_properties<R: BufRead>(
    reader: &mut EventReader<R>,
    start: &StartTag,
) -> Result<ConnectionProperties, ParseError> {
    start.check_no_attributes()?;
    let mut props = ConnectionPropertiesParams::default();
    for_each_child(reader, start, |reader, child| {
        match ConnectionPropertiesTag::resolve(child.name()) {
            ConnectionPropertiesTag::PoolParams => {
                props.pool_params = Some(parse_pool_params(reader, &child)?)
            }
            ConnectionPropertiesTag::Logging => props.logging = Some(parse_logging(reader, &child)?),
            ConnectionPropertiesTag::TransactionSupport => {
                child.check_no_attributes()?;
                let raw = reader.read_text(child.name())?;
                props.transaction_support = Some(TransactionSupport::parse(&raw)?)
            }
            ConnectionPropertiesTag::AuthenticationMechanism => {
                props.authentication_mechanism = text(reader, &child)?
            }
            ConnectionPropertiesTag::ReauthenticationSupport => {
                props.reauthentication_support = flag(reader, &child)?
            }
            ConnectionPropertiesTag::Properties => {
                props.properties = parse_properties(reader, &child)?
            }
            ConnectionPropertiesTag::ResAuth => props.res_auth = text(reader, &child)?,
            ConnectionPropertiesTag::Unknown(name) => {
                return Err(ParseError::UnexpectedElement(name))
            }
        }
        Ok(())
    })?;
    Ok(ConnectionProperties::new(props))
}

fn parse_pool_params<R: BufRead>(
    reader: &mut EventReader<R>,
    start: &StartTag,
) -> Result<PoolParams, ParseError> {
    start.check_no_attributes()?;
    let mut fields = PoolParamsFields::default();
    for_each_child(reader, start, |reader, child| {
        let f = &mut fields;
        match PoolParamsTag::resolve(child.name()) {
            PoolParamsTag::InitialCapacity => f.initial_capacity = number(reader, &child)?,
            PoolParamsTag::MaxCapacity => f.max_capacity = number(reader, &child)?,
            PoolParamsTag::CapacityIncrement => f.capacity_increment = number(reader, &child)?,
            PoolParamsTag::ShrinkingEnabled => f.shrinking_enabled = flag(reader, &child)?,
            PoolParamsTag::ShrinkFrequencySeconds => {
                f.shrink_frequency_seconds = number(reader, &child)?
            }
            PoolParamsTag::HighestNumWaiters => f.highest_num_waiters = number(reader, &child)?,
            PoolParamsTag::HighestNumUnavailable => {
                f.highest_num_unavailable = number(reader, &child)?
            }
            PoolParamsTag::ConnectionCreationRetryFrequencySeconds => {
                f.connection_creation_retry_frequency_seconds = number(reader, &child)?
            }
            PoolParamsTag::ConnectionReserveTimeoutSeconds => {
                f.connection_reserve_timeout_seconds = number(reader, &child)?
            }
            PoolParamsTag::TestFrequencySeconds => {
                f.test_frequency_seconds = number(reader, &child)?
            }
            PoolParamsTag::TestConnectionsOnCreate => {
                f.test_connections_on_create = flag(reader, &child)?
            }
            PoolParamsTag::TestConnectionsOnRelease => {
                f.test_connections_on_release = flag(reader, &child)?
            }
            PoolParamsTag::TestConnectionsOnReserve => {
                f.test_connections_on_reserve = flag(reader, &child)?
            }
            PoolParamsTag::ProfileHarvestFrequencySeconds => {
                f.profile_harvest_frequency_seconds = number(reader, &child)?
            }
            PoolParamsTag::IgnoreInUseConnectionsEnabled => {
                f.ignore_in_use_connections_enabled = flag(reader, &child)?
            }
            PoolParamsTag::MatchConnectionsSupported => {
                f.match_connections_supported = flag(reader, &child)?
            }
            PoolParamsTag::UseFirstAvailable => f.use_first_available = flag(reader, &child)?,
            PoolParamsTag::Unknown(name) => return Err(ParseError::UnexpectedElement(name)),
        }
        Ok(())
    })?;
    Ok(PoolParams::new(fields)?)
}

fn parse_logging<R: BufRead>(
    reader: &mut EventReader<R>,
    start: &StartTag,
) -> Result<Logging, ParseError> {
    start.check_no_attributes()?;
    let mut logging = LoggingFields::default();
    for_each_child(reader, start, |reader, child| {
        let l = &mut logging;
        match LoggingTag::resolve(child.name()) {
            LoggingTag::LogFilename => l.log_filename = text(reader, &child)?,
            LoggingTag::LoggingEnabled => l.logging_enabled = flag(reader, &child)?,
            LoggingTag::RotationType => l.rotation_type = text(reader, &child)?,
            LoggingTag::NumberOfFilesLimited => l.number_of_files_limited = flag(reader, &child)?,
            LoggingTag::FileCount => l.file_count = number(reader, &child)?,
            LoggingTag::FileSizeLimit => l.file_size_limit = number(reader, &child)?,
            LoggingTag::RotateLogOnStartup => l.rotate_log_on_startup = flag(reader, &child)?,
            LoggingTag::LogFileRotationDir => l.log_file_rotation_dir = text(reader, &child)?,
            LoggingTag::RotationTime => l.rotation_time = text(reader, &child)?,
            LoggingTag::FileTimeSpan => l.file_time_span = number(reader, &child)?,
            LoggingTag::DateFormatPattern => l.date_format_pattern = text(reader, &child)?,
            LoggingTag::Unknown(name) => return Err(ParseError::UnexpectedElement(name)),
        }
        Ok(())
    })?;
    Ok(Logging::new(logging))
}

//! Root aggregate and the admin object / outbound adapter hierarchies.

use descriptor_xml::{require_element, ValidateError};

use crate::connection::{ConfigProperty, ConnectionProperties};
use crate::security::ResourceAdapterSecurity;
use crate::work_manager::{ConnectorWorkManager, WorkManager};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AdminObjectInstance {
    jndi_name: String,
    properties: Vec<ConfigProperty>,
}

impl AdminObjectInstance {
    pub const ELEMENT: &'static str = "admin-object-instance";

    pub fn new(
        jndi_name: Option<String>,
        properties: Vec<ConfigProperty>,
    ) -> Result<Self, ValidateError> {
        let jndi_name = require_element(jndi_name.as_deref(), "jndi-name", Self::ELEMENT)?;
        Ok(Self {
            jndi_name: jndi_name.to_string(),
            properties,
        })
    }

    pub fn jndi_name(&self) -> &str {
        &self.jndi_name
    }

    pub fn properties(&self) -> &[ConfigProperty] {
        &self.properties
    }
}

/// Unvalidated `<admin-object-group>` contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminObjectGroupParams {
    pub admin_object_interface: Option<String>,
    pub admin_object_class: Option<String>,
    pub default_properties: Vec<ConfigProperty>,
    pub instances: Vec<AdminObjectInstance>,
}

/// Admin objects sharing one interface.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AdminObjectGroup {
    admin_object_interface: String,
    admin_object_class: Option<String>,
    default_properties: Vec<ConfigProperty>,
    instances: Vec<AdminObjectInstance>,
}

impl AdminObjectGroup {
    pub const ELEMENT: &'static str = "admin-object-group";

    pub fn new(params: AdminObjectGroupParams) -> Result<Self, ValidateError> {
        let interface = require_element(
            params.admin_object_interface.as_deref(),
            "admin-object-interface",
            Self::ELEMENT,
        )?;
        Ok(Self {
            admin_object_interface: interface.to_string(),
            admin_object_class: params.admin_object_class,
            default_properties: params.default_properties,
            instances: params.instances,
        })
    }

    pub fn admin_object_interface(&self) -> &str {
        &self.admin_object_interface
    }

    pub fn admin_object_class(&self) -> Option<&str> {
        self.admin_object_class.as_deref()
    }

    pub fn default_properties(&self) -> &[ConfigProperty] {
        &self.default_properties
    }

    pub fn instances(&self) -> &[AdminObjectInstance] {
        &self.instances
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AdminObjects {
    default_properties: Vec<ConfigProperty>,
    groups: Vec<AdminObjectGroup>,
}

impl AdminObjects {
    pub const ELEMENT: &'static str = "admin-objects";

    pub fn new(default_properties: Vec<ConfigProperty>, groups: Vec<AdminObjectGroup>) -> Self {
        Self {
            default_properties,
            groups,
        }
    }

    pub fn default_properties(&self) -> &[ConfigProperty] {
        &self.default_properties
    }

    pub fn groups(&self) -> &[AdminObjectGroup] {
        &self.groups
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConnectionInstance {
    description: Option<String>,
    jndi_name: String,
    connection_properties: Option<ConnectionProperties>,
}

impl ConnectionInstance {
    pub const ELEMENT: &'static str = "connection-instance";

    pub fn new(
        description: Option<String>,
        jndi_name: Option<String>,
        connection_properties: Option<ConnectionProperties>,
    ) -> Result<Self, ValidateError> {
        let jndi_name = require_element(jndi_name.as_deref(), "jndi-name", Self::ELEMENT)?;
        Ok(Self {
            description,
            jndi_name: jndi_name.to_string(),
            connection_properties,
        })
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn jndi_name(&self) -> &str {
        &self.jndi_name
    }

    pub fn connection_properties(&self) -> Option<&ConnectionProperties> {
        self.connection_properties.as_ref()
    }
}

/// Unvalidated `<connection-definition-group>` contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionDefinitionGroupParams {
    pub connection_factory_interface: Option<String>,
    pub default_connection_properties: Option<ConnectionProperties>,
    pub instances: Vec<ConnectionInstance>,
}

/// Connection factories sharing one interface.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConnectionDefinitionGroup {
    connection_factory_interface: String,
    default_connection_properties: Option<ConnectionProperties>,
    instances: Vec<ConnectionInstance>,
}

impl ConnectionDefinitionGroup {
    pub const ELEMENT: &'static str = "connection-definition-group";

    pub fn new(params: ConnectionDefinitionGroupParams) -> Result<Self, ValidateError> {
        let interface = require_element(
            params.connection_factory_interface.as_deref(),
            "connection-factory-interface",
            Self::ELEMENT,
        )?;
        Ok(Self {
            connection_factory_interface: interface.to_string(),
            default_connection_properties: params.default_connection_properties,
            instances: params.instances,
        })
    }

    pub fn connection_factory_interface(&self) -> &str {
        &self.connection_factory_interface
    }

    pub fn default_connection_properties(&self) -> Option<&ConnectionProperties> {
        self.default_connection_properties.as_ref()
    }

    pub fn instances(&self) -> &[ConnectionInstance] {
        &self.instances
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OutboundResourceAdapter {
    default_connection_properties: Option<ConnectionProperties>,
    groups: Vec<ConnectionDefinitionGroup>,
}

impl OutboundResourceAdapter {
    pub const ELEMENT: &'static str = "outbound-resource-adapter";

    pub fn new(
        default_connection_properties: Option<ConnectionProperties>,
        groups: Vec<ConnectionDefinitionGroup>,
    ) -> Self {
        Self {
            default_connection_properties,
            groups,
        }
    }

    pub fn default_connection_properties(&self) -> Option<&ConnectionProperties> {
        self.default_connection_properties.as_ref()
    }

    pub fn groups(&self) -> &[ConnectionDefinitionGroup] {
        &self.groups
    }
}

/// Unvalidated `<weblogic-connector>` contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeblogicConnectorParams {
    pub version: Option<String>,
    pub id: Option<String>,
    pub native_libdir: Option<String>,
    pub jndi_name: Option<String>,
    pub enable_access_outside_app: Option<bool>,
    pub enable_global_access_to_classes: Option<bool>,
    pub work_manager: Option<WorkManager>,
    pub connector_work_manager: Option<ConnectorWorkManager>,
    pub security: Option<ResourceAdapterSecurity>,
    pub properties: Vec<ConfigProperty>,
    pub admin_objects: Option<AdminObjects>,
    pub outbound_resource_adapter: Option<OutboundResourceAdapter>,
}

/// A parsed `weblogic-ra.xml`.
///
/// Every JNDI name bound by a connection or admin object instance is unique
/// within the descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WeblogicConnector {
    version: Option<String>,
    id: Option<String>,
    native_libdir: Option<String>,
    jndi_name: Option<String>,
    enable_access_outside_app: Option<bool>,
    enable_global_access_to_classes: Option<bool>,
    work_manager: Option<WorkManager>,
    connector_work_manager: Option<ConnectorWorkManager>,
    security: Option<ResourceAdapterSecurity>,
    properties: Vec<ConfigProperty>,
    admin_objects: Option<AdminObjects>,
    outbound_resource_adapter: Option<OutboundResourceAdapter>,
}

impl WeblogicConnector {
    pub fn new(params: WeblogicConnectorParams) -> Result<Self, ValidateError> {
        let connector = Self {
            version: params.version,
            id: params.id,
            native_libdir: params.native_libdir,
            jndi_name: params.jndi_name,
            enable_access_outside_app: params.enable_access_outside_app,
            enable_global_access_to_classes: params.enable_global_access_to_classes,
            work_manager: params.work_manager,
            connector_work_manager: params.connector_work_manager,
            security: params.security,
            properties: params.properties,
            admin_objects: params.admin_objects,
            outbound_resource_adapter: params.outbound_resource_adapter,
        };
        let mut seen: Vec<(&str, &'static str)> = Vec::new();
        let bound = connector
            .connection_instances()
            .map(|instance| (instance.jndi_name(), ConnectionInstance::ELEMENT))
            .chain(
                connector
                    .admin_object_instances()
                    .map(|instance| (instance.jndi_name(), AdminObjectInstance::ELEMENT)),
            );
        for (jndi_name, element) in bound {
            if seen.iter().any(|(name, _)| *name == jndi_name) {
                return Err(ValidateError::DuplicateName {
                    element: element.to_string(),
                    name: jndi_name.to_string(),
                });
            }
            seen.push((jndi_name, element));
        }
        Ok(connector)
    }

    /// Schema version declared on the root; informational only.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn native_libdir(&self) -> Option<&str> {
        self.native_libdir.as_deref()
    }

    pub fn jndi_name(&self) -> Option<&str> {
        self.jndi_name.as_deref()
    }

    pub fn enable_access_outside_app(&self) -> Option<bool> {
        self.enable_access_outside_app
    }

    pub fn enable_global_access_to_classes(&self) -> Option<bool> {
        self.enable_global_access_to_classes
    }

    pub fn work_manager(&self) -> Option<&WorkManager> {
        self.work_manager.as_ref()
    }

    pub fn connector_work_manager(&self) -> Option<&ConnectorWorkManager> {
        self.connector_work_manager.as_ref()
    }

    pub fn security(&self) -> Option<&ResourceAdapterSecurity> {
        self.security.as_ref()
    }

    pub fn properties(&self) -> &[ConfigProperty] {
        &self.properties
    }

    pub fn admin_objects(&self) -> Option<&AdminObjects> {
        self.admin_objects.as_ref()
    }

    pub fn outbound_resource_adapter(&self) -> Option<&OutboundResourceAdapter> {
        self.outbound_resource_adapter.as_ref()
    }

    /// Every connection instance across all definition groups.
    pub fn connection_instances(&self) -> impl Iterator<Item = &ConnectionInstance> {
        self.outbound_resource_adapter
            .iter()
            .flat_map(|outbound| outbound.groups())
            .flat_map(|group| group.instances().iter())
    }

    /// Every admin object instance across all groups.
    pub fn admin_object_instances(&self) -> impl Iterator<Item = &AdminObjectInstance> {
        self.admin_objects
            .iter()
            .flat_map(|objects| objects.groups())
            .flat_map(|group| group.instances().iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance(jndi: &str) -> ConnectionInstance {
        ConnectionInstance::new(None, Some(jndi.into()), None).expect("instance")
    }

    fn outbound(instances: Vec<ConnectionInstance>) -> OutboundResourceAdapter {
        let group = ConnectionDefinitionGroup::new(ConnectionDefinitionGroupParams {
            connection_factory_interface: Some("javax.resource.cci.ConnectionFactory".into()),
            instances,
            ..ConnectionDefinitionGroupParams::default()
        })
        .expect("group");
        OutboundResourceAdapter::new(None, vec![group])
    }

    #[test]
    fn groups_require_their_interface() {
        let err = AdminObjectGroup::new(AdminObjectGroupParams::default()).expect_err("interface");
        assert_eq!(
            err,
            ValidateError::missing_element("admin-object-interface", "admin-object-group")
        );
        let err = ConnectionDefinitionGroup::new(ConnectionDefinitionGroupParams::default())
            .expect_err("interface");
        assert_eq!(err.offending_name(), "connection-factory-interface");
    }

    #[test]
    fn instances_require_a_jndi_name() {
        let err = ConnectionInstance::new(Some("d".into()), Some(" ".into()), None).expect_err("jndi");
        assert_eq!(err, ValidateError::missing_element("jndi-name", "connection-instance"));
        assert!(AdminObjectInstance::new(None, Vec::new()).is_err());
    }

    #[test]
    fn jndi_names_are_unique_across_instances() {
        let err = WeblogicConnector::new(WeblogicConnectorParams {
            outbound_resource_adapter: Some(outbound(vec![instance("eis/A"), instance("eis/A")])),
            ..WeblogicConnectorParams::default()
        })
        .expect_err("duplicate");
        assert!(matches!(err, ValidateError::DuplicateName { ref name, .. } if name == "eis/A"));

        let connector = WeblogicConnector::new(WeblogicConnectorParams {
            outbound_resource_adapter: Some(outbound(vec![instance("eis/A"), instance("eis/B")])),
            ..WeblogicConnectorParams::default()
        })
        .expect("distinct");
        let names: Vec<_> = connector.connection_instances().map(ConnectionInstance::jndi_name).collect();
        assert_eq!(names, ["eis/A", "eis/B"]);
    }
}

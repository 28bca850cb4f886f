//! Canonical XML for the WebLogic connector dialect.
//!
//! Children are written in schema order and absent optionals are skipped.

use descriptor_xml::{Attrs, ToXml, XmlWriter};

use crate::connection::{ConfigProperty, ConnectionProperties, Logging, PoolParams};
use crate::connector::{
    AdminObjectGroup, AdminObjectInstance, AdminObjects, ConnectionDefinitionGroup,
    ConnectionInstance, OutboundResourceAdapter, WeblogicConnector,
};
use crate::parser::ROOT_ELEMENT;
use crate::security::{
    AnonPrincipal, CallerPrincipal, ResourceAdapterSecurity, SecurityWorkContext,
};
use crate::work_manager::{
    ConnectorWorkManager, NamedCount, RequestClass, ShutdownTrigger, WorkManager,
};

impl ToXml for WeblogicConnector {
    fn write_xml(&self, writer: &mut XmlWriter) {
        let attrs = Attrs::new()
            .with("version", self.version())
            .with("id", self.id());
        writer.element(ROOT_ELEMENT, &attrs, |w| {
            w.opt_text("native-libdir", self.native_libdir());
            w.opt_text("jndi-name", self.jndi_name());
            w.value("enable-access-outside-app", self.enable_access_outside_app());
            w.value(
                "enable-global-access-to-classes",
                self.enable_global_access_to_classes(),
            );
            if let Some(work_manager) = self.work_manager() {
                work_manager.write_xml(w);
            }
            if let Some(cwm) = self.connector_work_manager() {
                cwm.write_xml(w);
            }
            if let Some(security) = self.security() {
                security.write_xml(w);
            }
            write_config_properties(w, "properties", self.properties());
            if let Some(admin_objects) = self.admin_objects() {
                admin_objects.write_xml(w);
            }
            if let Some(outbound) = self.outbound_resource_adapter() {
                outbound.write_xml(w);
            }
        });
    }
}

fn write_config_properties(w: &mut XmlWriter, element: &str, properties: &[ConfigProperty]) {
    if properties.is_empty() {
        return;
    }
    w.element(element, &Attrs::new(), |w| {
        for property in properties {
            w.element(ConfigProperty::ELEMENT, &Attrs::new(), |w| {
                w.text("name", property.name());
                w.opt_text("value", property.value());
            });
        }
    });
}

fn write_named_count(w: &mut XmlWriter, element: &str, count: Option<&NamedCount>) {
    if let Some(count) = count {
        w.element(element, &Attrs::new(), |w| {
            w.text("name", count.name());
            w.value("count", Some(count.count()));
        });
    }
}

impl ToXml for WorkManager {
    fn write_xml(&self, writer: &mut XmlWriter) {
        writer.element(WorkManager::ELEMENT, &Attrs::new(), |w| {
            w.text("name", self.name());
            if let Some(class) = self.request_class() {
                w.element(class.element(), &Attrs::new(), |w| {
                    w.text("name", class.name());
                    match class {
                        RequestClass::ResponseTime { goal_ms, .. } => w.value("goal-ms", Some(goal_ms)),
                        RequestClass::FairShare { fair_share, .. } => {
                            w.value("fair-share", Some(fair_share))
                        }
                    }
                });
            }
            w.opt_text("request-class-name", self.request_class_name());
            write_named_count(w, "min-threads-constraint", self.min_threads_constraint());
            w.opt_text("min-threads-constraint-name", self.min_threads_constraint_name());
            write_named_count(w, "max-threads-constraint", self.max_threads_constraint());
            w.opt_text("max-threads-constraint-name", self.max_threads_constraint_name());
            write_named_count(w, "capacity", self.capacity());
            w.opt_text("capacity-name", self.capacity_name());
            if let Some(trigger) = self.shutdown_trigger() {
                w.element(ShutdownTrigger::ELEMENT, &Attrs::new(), |w| {
                    w.value("max-stuck-thread-time", trigger.max_stuck_thread_time());
                    w.value("stuck-thread-count", trigger.stuck_thread_count());
                });
            }
            w.value("ignore-stuck-threads", self.ignore_stuck_threads());
        });
    }
}

impl ToXml for ConnectorWorkManager {
    fn write_xml(&self, writer: &mut XmlWriter) {
        writer.element(ConnectorWorkManager::ELEMENT, &Attrs::new(), |w| {
            w.value(
                "max-concurrent-long-running-requests",
                self.max_concurrent_long_running_requests(),
            );
        });
    }
}

fn write_anon_principal(w: &mut XmlWriter, element: &str, principal: Option<&AnonPrincipal>) {
    if let Some(principal) = principal {
        w.element(element, &Attrs::new(), |w| {
            w.value("use-anonymous-identity", principal.use_anonymous_identity());
            w.opt_text("principal-name", principal.principal_name());
        });
    }
}

fn write_caller_principal(w: &mut XmlWriter, element: &str, principal: Option<&CallerPrincipal>) {
    if let Some(principal) = principal {
        w.element(element, &Attrs::new(), |w| {
            w.value("use-anonymous-identity", principal.use_anonymous_identity());
            w.value("use-caller-identity", principal.use_caller_identity());
            w.opt_text("principal-name", principal.principal_name());
        });
    }
}

impl ToXml for ResourceAdapterSecurity {
    fn write_xml(&self, writer: &mut XmlWriter) {
        writer.element(ResourceAdapterSecurity::ELEMENT, &Attrs::new(), |w| {
            write_anon_principal(w, "default-principal-name", self.default_principal_name());
            write_anon_principal(
                w,
                "manage-as-principal-name",
                self.manage_as_principal_name(),
            );
            write_caller_principal(w, "run-as-principal-name", self.run_as_principal_name());
            write_caller_principal(
                w,
                "run-work-as-principal-name",
                self.run_work_as_principal_name(),
            );
            if let Some(context) = self.security_work_context() {
                context.write_xml(w);
            }
        });
    }
}

impl ToXml for SecurityWorkContext {
    fn write_xml(&self, writer: &mut XmlWriter) {
        writer.element(SecurityWorkContext::ELEMENT, &Attrs::new(), |w| {
            w.value("inbound-mapping-required", self.inbound_mapping_required());
            write_anon_principal(
                w,
                "caller-principal-default-mapped",
                self.caller_principal_default_mapped(),
            );
            for mapping in self.caller_principal_mappings() {
                w.element("caller-principal-mapping", &Attrs::new(), |w| {
                    w.opt_text("eis-caller-principal", mapping.eis_caller_principal());
                    write_anon_principal(
                        w,
                        "mapped-caller-principal",
                        mapping.mapped_caller_principal(),
                    );
                });
            }
            w.opt_text(
                "group-principal-default-mapped",
                self.group_principal_default_mapped(),
            );
            for mapping in self.group_principal_mappings() {
                w.element("group-principal-mapping", &Attrs::new(), |w| {
                    w.opt_text("eis-group-principal", mapping.eis_group_principal());
                    w.opt_text("mapped-group-principal", mapping.mapped_group_principal());
                });
            }
        });
    }
}

impl ToXml for AdminObjects {
    fn write_xml(&self, writer: &mut XmlWriter) {
        writer.element(AdminObjects::ELEMENT, &Attrs::new(), |w| {
            write_config_properties(w, "default-properties", self.default_properties());
            for group in self.groups() {
                group.write_xml(w);
            }
        });
    }
}

impl ToXml for AdminObjectGroup {
    fn write_xml(&self, writer: &mut XmlWriter) {
        writer.element(AdminObjectGroup::ELEMENT, &Attrs::new(), |w| {
            w.text("admin-object-interface", self.admin_object_interface());
            w.opt_text("admin-object-class", self.admin_object_class());
            write_config_properties(w, "default-properties", self.default_properties());
            for instance in self.instances() {
                instance.write_xml(w);
            }
        });
    }
}

impl ToXml for AdminObjectInstance {
    fn write_xml(&self, writer: &mut XmlWriter) {
        writer.element(AdminObjectInstance::ELEMENT, &Attrs::new(), |w| {
            w.text("jndi-name", self.jndi_name());
            write_config_properties(w, "properties", self.properties());
        });
    }
}

impl ToXml for OutboundResourceAdapter {
    fn write_xml(&self, writer: &mut XmlWriter) {
        writer.element(OutboundResourceAdapter::ELEMENT, &Attrs::new(), |w| {
            if let Some(defaults) = self.default_connection_properties() {
                write_connection_properties(w, "default-connection-properties", defaults);
            }
            for group in self.groups() {
                group.write_xml(w);
            }
        });
    }
}

impl ToXml for ConnectionDefinitionGroup {
    fn write_xml(&self, writer: &mut XmlWriter) {
        writer.element(ConnectionDefinitionGroup::ELEMENT, &Attrs::new(), |w| {
            w.text("connection-factory-interface", self.connection_factory_interface());
            if let Some(defaults) = self.default_connection_properties() {
                write_connection_properties(w, "default-connection-properties", defaults);
            }
            for instance in self.instances() {
                instance.write_xml(w);
            }
        });
    }
}

impl ToXml for ConnectionInstance {
    fn write_xml(&self, writer: &mut XmlWriter) {
        writer.element(ConnectionInstance::ELEMENT, &Attrs::new(), |w| {
            w.opt_text("description", self.description());
            w.text("jndi-name", self.jndi_name());
            if let Some(props) = self.connection_properties() {
                write_connection_properties(w, "connection-properties", props);
            }
        });
    }
}

fn write_connection_properties(w: &mut XmlWriter, element: &str, props: &ConnectionProperties) {
    w.element(element, &Attrs::new(), |w| {
        if let Some(pool) = props.pool_params() {
            pool.write_xml(w);
        }
        if let Some(logging) = props.logging() {
            logging.write_xml(w);
        }
        w.value("transaction-support", props.transaction_support());
        w.opt_text("authentication-mechanism", props.authentication_mechanism());
        w.value("reauthentication-support", props.reauthentication_support());
        write_config_properties(w, "properties", props.properties());
        w.opt_text("res-auth", props.res_auth());
    });
}

impl ToXml for PoolParams {
    fn write_xml(&self, writer: &mut XmlWriter) {
        writer.element(PoolParams::ELEMENT, &Attrs::new(), |w| {
            w.value("initial-capacity", self.initial_capacity());
            w.value("max-capacity", self.max_capacity());
            w.value("capacity-increment", self.capacity_increment());
            w.value("shrinking-enabled", self.shrinking_enabled());
            w.value("shrink-frequency-seconds", self.shrink_frequency_seconds());
            w.value("highest-num-waiters", self.highest_num_waiters());
            w.value("highest-num-unavailable", self.highest_num_unavailable());
            w.value(
                "connection-creation-retry-frequency-seconds",
                self.connection_creation_retry_frequency_seconds(),
            );
            w.value(
                "connection-reserve-timeout-seconds",
                self.connection_reserve_timeout_seconds(),
            );
            w.value("test-frequency-seconds", self.test_frequency_seconds());
            w.value("test-connections-on-create", self.test_connections_on_create());
            w.value("test-connections-on-release", self.test_connections_on_release());
            w.value("test-connections-on-reserve", self.test_connections_on_reserve());
            w.value(
                "profile-harvest-frequency-seconds",
                self.profile_harvest_frequency_seconds(),
            );
            w.value(
                "ignore-in-use-connections-enabled",
                self.ignore_in_use_connections_enabled(),
            );
            w.value("match-connections-supported", self.match_connections_supported());
            w.value("use-first-available", self.use_first_available());
        });
    }
}

impl ToXml for Logging {
    fn write_xml(&self, writer: &mut XmlWriter) {
        writer.element(Logging::ELEMENT, &Attrs::new(), |w| {
            w.opt_text("log-filename", self.log_filename());
            w.value("logging-enabled", self.logging_enabled());
            w.opt_text("rotation-type", self.rotation_type());
            w.value("number-of-files-limited", self.number_of_files_limited());
            w.value("file-count", self.file_count());
            w.value("file-size-limit", self.file_size_limit());
            w.value("rotate-log-on-startup", self.rotate_log_on_startup());
            w.opt_text("log-file-rotation-dir", self.log_file_rotation_dir());
            w.opt_text("rotation-time", self.rotation_time());
            w.value("file-time-span", self.file_time_span());
            w.opt_text("date-format-pattern", self.date_format_pattern());
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WlsParser;

    const FULL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<weblogic-connector xmlns="http://xmlns.oracle.com/weblogic/weblogic-connector" version="1.3">
  <native-libdir>/opt/ra/lib</native-libdir>
  <jndi-name>eis/ExampleRA</jndi-name>
  <enable-access-outside-app>true</enable-access-outside-app>
  <work-manager>
    <name>RAWorkManager</name>
    <response-time-request-class><name>rt</name><goal-ms>500</goal-ms></response-time-request-class>
    <min-threads-constraint><name>min</name><count>2</count></min-threads-constraint>
    <capacity-name>shared-capacity</capacity-name>
  </work-manager>
  <security>
    <manage-as-principal-name><principal-name>admin</principal-name></manage-as-principal-name>
  </security>
  <properties>
    <property><name>Mode</name><value>strict</value></property>
  </properties>
  <admin-objects>
    <admin-object-group>
      <admin-object-interface>javax.jms.Queue</admin-object-interface>
      <admin-object-class>com.example.QueueImpl</admin-object-class>
      <admin-object-instance><jndi-name>jms/Orders</jndi-name></admin-object-instance>
    </admin-object-group>
  </admin-objects>
  <outbound-resource-adapter>
    <default-connection-properties>
      <transaction-support>XATransaction</transaction-support>
    </default-connection-properties>
    <connection-definition-group>
      <connection-factory-interface>javax.resource.cci.ConnectionFactory</connection-factory-interface>
      <connection-instance>
        <jndi-name>eis/Primary</jndi-name>
        <connection-properties>
          <pool-params><initial-capacity>1</initial-capacity><max-capacity>8</max-capacity></pool-params>
          <logging><log-filename>ra.log</log-filename><file-count>7</file-count></logging>
          <res-auth>Container</res-auth>
        </connection-properties>
      </connection-instance>
    </connection-definition-group>
  </outbound-resource-adapter>
</weblogic-connector>"#;

    #[test]
    fn full_descriptor_round_trips() {
        let parser = WlsParser::new();
        let first = parser.parse_str(FULL).expect("parse");
        let canonical = first.to_canonical_xml();
        let second = parser.parse_str(&canonical).expect("reparse");
        assert_eq!(first, second);
        assert_eq!(canonical, second.to_canonical_xml());
    }

    #[test]
    fn absent_optionals_are_not_written() {
        let xml = r#"<weblogic-connector><jndi-name>eis/A</jndi-name><properties/></weblogic-connector>"#;
        let connector = WlsParser::new().parse_str(xml).expect("parse");
        assert_eq!(
            connector.to_canonical_xml(),
            "<weblogic-connector>\n  <jndi-name>eis/A</jndi-name>\n</weblogic-connector>\n"
        );
    }

    #[test]
    fn property_without_value_keeps_its_name() {
        let xml = r#"<weblogic-connector version="1.2"><properties><property><name>Flag</name></property></properties></weblogic-connector>"#;
        let connector = WlsParser::new().parse_str(xml).expect("parse");
        assert_eq!(
            connector.to_canonical_xml(),
            "<weblogic-connector version=\"1.2\">\n  <properties>\n    <property>\n      <name>Flag</name>\n    </property>\n  </properties>\n</weblogic-connector>\n"
        );
    }
}

use std::path::Path;

use anyhow::Result;
use jca_descriptors::{Descriptor, DescriptorSet, ParserOptions, WeblogicConnector};

use crate::common;

pub fn run(path: &Path, options: ParserOptions, json: bool) -> Result<()> {
    let descriptor = common::load(path, options)?;
    if json {
        return common::print_json(&descriptor);
    }
    for line in summary(&descriptor) {
        println!("{line}");
    }
    Ok(())
}

/// Human readable outline, one line per item.
pub fn summary(descriptor: &Descriptor) -> Vec<String> {
    let mut lines = vec![format!("dialect: {}", descriptor.dialect())];
    match descriptor {
        Descriptor::DataSources(set) => datasources_summary(set, &mut lines),
        Descriptor::WeblogicConnector(connector) => connector_summary(connector, &mut lines),
    }
    lines
}

fn datasources_summary(set: &DescriptorSet, lines: &mut Vec<String>) {
    for ds in set.data_sources() {
        let state = if ds.base().enabled() { "" } else { " [disabled]" };
        lines.push(format!(
            "datasource {} pool={} url={}{state}",
            ds.jndi_name(),
            ds.pool_name(),
            ds.connection_url().unwrap_or("-"),
        ));
    }
    for xa in set.xa_data_sources() {
        let state = if xa.base().enabled() { "" } else { " [disabled]" };
        lines.push(format!(
            "xa-datasource {} pool={} class={} properties={}{state}",
            xa.jndi_name(),
            xa.pool_name(),
            xa.xa_data_source_class().unwrap_or("-"),
            xa.xa_data_source_properties().len(),
        ));
    }
    for driver in set.drivers().values() {
        lines.push(format!(
            "driver {} module={}",
            driver.name(),
            driver.module().unwrap_or("-")
        ));
    }
}

fn connector_summary(connector: &WeblogicConnector, lines: &mut Vec<String>) {
    if let Some(version) = connector.version() {
        lines.push(format!("version: {version}"));
    }
    if let Some(jndi_name) = connector.jndi_name() {
        lines.push(format!("jndi-name: {jndi_name}"));
    }
    if let Some(work_manager) = connector.work_manager() {
        lines.push(format!("work-manager {}", work_manager.name()));
    }
    for instance in connector.connection_instances() {
        let tx = instance
            .connection_properties()
            .and_then(|props| props.transaction_support())
            .map(|tx| tx.to_string());
        lines.push(format!(
            "connection-instance {} tx={}",
            instance.jndi_name(),
            tx.as_deref().unwrap_or("-")
        ));
    }
    for instance in connector.admin_object_instances() {
        lines.push(format!("admin-object-instance {}", instance.jndi_name()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datasource_summary_lists_each_item() {
        let descriptor = jca_descriptors::parse_str(
            r#"<datasources>
                <datasource jndi-name="java:/A" pool-name="A" enabled="false">
                    <connection-url>jdbc:h2:mem:a</connection-url>
                    <driver>h2</driver>
                </datasource>
                <drivers><driver name="h2" module="com.h2database.h2"/></drivers>
            </datasources>"#,
        )
        .expect("parse");
        let lines = summary(&descriptor);
        assert_eq!(lines[0], "dialect: datasources");
        assert_eq!(lines[1], "datasource java:/A pool=A url=jdbc:h2:mem:a [disabled]");
        assert_eq!(lines[2], "driver h2 module=com.h2database.h2");
    }

    #[test]
    fn connector_summary_lists_instances() {
        let descriptor = jca_descriptors::parse_str(
            r#"<weblogic-connector version="1.3">
                <outbound-resource-adapter><connection-definition-group>
                    <connection-factory-interface>javax.sql.DataSource</connection-factory-interface>
                    <connection-instance>
                        <jndi-name>eis/A</jndi-name>
                        <connection-properties><transaction-support>NoTransaction</transaction-support></connection-properties>
                    </connection-instance>
                </connection-definition-group></outbound-resource-adapter>
            </weblogic-connector>"#,
        )
        .expect("parse");
        assert_eq!(
            summary(&descriptor),
            [
                "dialect: weblogic-connector",
                "version: 1.3",
                "connection-instance eis/A tx=NoTransaction",
            ]
        );
    }
}

use std::path::Path;

use anyhow::{bail, Result};
use jca_descriptors::{Descriptor, DescriptorSet, ParserOptions};
use serde::Serialize;
use tracing::info;

use crate::common;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct DriverRow {
    pub jndi_name: String,
    pub driver: Option<String>,
    pub class: Option<String>,
}

pub fn run(path: &Path, options: ParserOptions, json: bool) -> Result<()> {
    let mut set = match common::load(path, options)? {
        Descriptor::DataSources(set) => set,
        other => bail!(
            "{} is a {} descriptor; drivers only apply to datasources",
            path.display(),
            other.dialect()
        ),
    };
    let resolved = set.resolve_driver_references();
    info!(resolved, "resolved driver references");
    let rows = rows(&set);

    if json {
        return common::print_json(&rows);
    }
    if rows.is_empty() {
        println!("No data sources declared.");
        return Ok(());
    }
    println!("{:<32} {:<16} {}", "JNDI", "DRIVER", "CLASS");
    for row in &rows {
        println!(
            "{:<32} {:<16} {}",
            row.jndi_name,
            row.driver.as_deref().unwrap_or("-"),
            row.class.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}

/// Effective driver class of every data source, plain ones first.
pub fn rows(set: &DescriptorSet) -> Vec<DriverRow> {
    let plain = set.data_sources().iter().map(|ds| DriverRow {
        jndi_name: ds.jndi_name().to_string(),
        driver: ds.base().driver().map(str::to_string),
        class: ds
            .driver_class()
            .or(ds.data_source_class())
            .map(str::to_string),
    });
    let xa = set.xa_data_sources().iter().map(|xa| DriverRow {
        jndi_name: xa.jndi_name().to_string(),
        driver: xa.base().driver().map(str::to_string),
        class: xa.xa_data_source_class().map(str::to_string),
    });
    plain.chain(xa).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_show_resolved_classes() {
        let descriptor = jca_descriptors::parse_str(
            r#"<datasources>
                <datasource jndi-name="java:/A" pool-name="A">
                    <connection-url>jdbc:h2:mem:a</connection-url>
                    <driver>h2</driver>
                </datasource>
                <xa-datasource jndi-name="java:/XA" pool-name="XA">
                    <xa-datasource-property name="URL">jdbc:h2:mem:xa</xa-datasource-property>
                    <driver>h2</driver>
                </xa-datasource>
                <drivers><driver name="h2">
                    <driver-class>org.h2.Driver</driver-class>
                    <xa-datasource-class>org.h2.jdbcx.JdbcDataSource</xa-datasource-class>
                </driver></drivers>
            </datasources>"#,
        )
        .expect("parse");
        let mut set = descriptor.as_data_sources().expect("datasources").clone();
        assert_eq!(rows(&set)[0].class, None);

        set.resolve_driver_references();
        let rows = rows(&set);
        assert_eq!(rows[0].class.as_deref(), Some("org.h2.Driver"));
        assert_eq!(rows[1].class.as_deref(), Some("org.h2.jdbcx.JdbcDataSource"));
        assert_eq!(rows[1].driver.as_deref(), Some("h2"));
    }
}

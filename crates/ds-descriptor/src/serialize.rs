//! Canonical XML for the datasource dialect.
//!
//! Children follow schema order and any field equal to its default is
//! omitted, so `parse(render(parse(doc))) == parse(doc)`.

use descriptor_xml::{write_properties, Attrs, ToXml, XmlWriter};

use crate::datasource::{DataSource, DataSourceBase, DescriptorSet, Driver, XaDataSource};
use crate::defaults;
use crate::parser::ROOT_ELEMENT;
use crate::pool::{Pool, XaPool};
use crate::settings::{Security, Statement, TimeOut, Validation};

impl ToXml for DescriptorSet {
    fn write_xml(&self, writer: &mut XmlWriter) {
        writer.element(ROOT_ELEMENT, &Attrs::new(), |w| {
            for ds in self.data_sources() {
                ds.write_xml(w);
            }
            for xa in self.xa_data_sources() {
                xa.write_xml(w);
            }
            if !self.drivers().is_empty() {
                w.element("drivers", &Attrs::new(), |w| {
                    for driver in self.drivers().values() {
                        driver.write_xml(w);
                    }
                });
            }
        });
    }
}

fn base_attrs(base: &DataSourceBase) -> Attrs {
    Attrs::new()
        .text("jndi-name", base.jndi_name())
        .text("pool-name", base.pool_name())
        .flag("enabled", base.enabled(), defaults::ENABLED)
        .flag("use-java-context", base.use_java_context(), defaults::USE_JAVA_CONTEXT)
        .flag("spy", base.spy(), defaults::SPY)
        .flag("use-ccm", base.use_ccm(), defaults::USE_CCM)
        .flag("connectable", base.connectable(), defaults::CONNECTABLE)
        .with("tracking", base.tracking())
        .with("mcp", base.mcp())
        .flag("enlistment-trace", base.enlistment_trace(), defaults::ENLISTMENT_TRACE)
}

fn write_settings(base: &DataSourceBase, w: &mut XmlWriter) {
    if let Some(security) = base.security() {
        security.write_xml(w);
    }
    if let Some(validation) = base.validation() {
        validation.write_xml(w);
    }
    if let Some(time_out) = base.time_out() {
        time_out.write_xml(w);
    }
    if let Some(statement) = base.statement() {
        statement.write_xml(w);
    }
}

impl ToXml for DataSource {
    fn write_xml(&self, writer: &mut XmlWriter) {
        let base = self.base();
        let attrs = base_attrs(base).flag("jta", self.jta(), defaults::JTA);
        writer.element(DataSource::ELEMENT, &attrs, |w| {
            w.opt_text("connection-url", self.connection_url());
            w.opt_text("driver-class", self.driver_class());
            w.opt_text("datasource-class", self.data_source_class());
            w.opt_text("driver", base.driver());
            write_properties(w, "connection-property", self.connection_properties());
            w.opt_text("new-connection-sql", base.new_connection_sql());
            w.value("transaction-isolation", base.transaction_isolation());
            w.opt_text("url-delimiter", base.url_delimiter());
            w.opt_text(
                "url-selector-strategy-class-name",
                base.url_selector_strategy_class_name(),
            );
            if let Some(pool) = self.pool() {
                pool.write_xml(w);
            }
            write_settings(base, w);
        });
    }
}

impl ToXml for XaDataSource {
    fn write_xml(&self, writer: &mut XmlWriter) {
        let base = self.base();
        writer.element(XaDataSource::ELEMENT, &base_attrs(base), |w| {
            write_properties(w, "xa-datasource-property", self.xa_data_source_properties());
            w.opt_text("xa-datasource-class", self.xa_data_source_class());
            w.opt_text("driver", base.driver());
            w.opt_text("url-delimiter", base.url_delimiter());
            w.opt_text("url-property", self.url_property());
            w.opt_text(
                "url-selector-strategy-class-name",
                base.url_selector_strategy_class_name(),
            );
            w.opt_text("new-connection-sql", base.new_connection_sql());
            w.value("transaction-isolation", base.transaction_isolation());
            if let Some(xa_pool) = self.xa_pool() {
                xa_pool.write_xml(w);
            }
            write_settings(base, w);
            if let Some(recovery) = self.recovery() {
                recovery.write_xml(w);
            }
        });
    }
}

fn write_pool(pool: &Pool, w: &mut XmlWriter) {
    if pool.min_pool_size() != defaults::MIN_POOL_SIZE {
        w.value("min-pool-size", Some(pool.min_pool_size()));
    }
    w.value("initial-pool-size", pool.initial_pool_size());
    if pool.max_pool_size() != defaults::MAX_POOL_SIZE {
        w.value("max-pool-size", Some(pool.max_pool_size()));
    }
    w.flag("prefill", pool.prefill(), defaults::PREFILL);
    w.flag("use-strict-min", pool.use_strict_min(), defaults::USE_STRICT_MIN);
    if pool.flush_strategy() != defaults::FLUSH_STRATEGY {
        w.value("flush-strategy", Some(pool.flush_strategy()));
    }
    w.flag(
        "allow-multiple-users",
        pool.allow_multiple_users(),
        defaults::ALLOW_MULTIPLE_USERS,
    );
    if let Some(capacity) = pool.capacity() {
        capacity.write_xml(w);
    }
    w.flag("fair", pool.fair(), defaults::FAIR);
    if let Some(listener) = pool.connection_listener() {
        listener.write_xml("connection-listener", w);
    }
}

impl ToXml for Pool {
    fn write_xml(&self, writer: &mut XmlWriter) {
        writer.element("pool", &Attrs::new(), |w| write_pool(self, w));
    }
}

impl ToXml for XaPool {
    fn write_xml(&self, writer: &mut XmlWriter) {
        writer.element("xa-pool", &Attrs::new(), |w| {
            write_pool(self.pool(), w);
            w.value("is-same-rm-override", self.is_same_rm_override());
            w.flag("interleaving", self.interleaving(), defaults::INTERLEAVING);
            w.flag(
                "no-tx-separate-pools",
                self.no_tx_separate_pool(),
                defaults::NO_TX_SEPARATE_POOL,
            );
            w.flag("pad-xid", self.pad_xid(), defaults::PAD_XID);
            w.flag(
                "wrap-xa-resource",
                self.wrap_xa_resource(),
                defaults::WRAP_XA_RESOURCE,
            );
        });
    }
}

impl ToXml for Security {
    fn write_xml(&self, writer: &mut XmlWriter) {
        writer.element("security", &Attrs::new(), |w| {
            w.opt_text("user-name", self.user_name());
            w.opt_text("password", self.password());
            w.opt_text("security-domain", self.security_domain());
            if let Some(plugin) = self.reauth_plugin() {
                plugin.write_xml("reauth-plugin", w);
            }
        });
    }
}

impl ToXml for Validation {
    fn write_xml(&self, writer: &mut XmlWriter) {
        writer.element("validation", &Attrs::new(), |w| {
            if let Some(checker) = self.valid_connection_checker() {
                checker.write_xml("valid-connection-checker", w);
            }
            w.opt_text("check-valid-connection-sql", self.check_valid_connection_sql());
            w.flag(
                "validate-on-match",
                self.validate_on_match(),
                defaults::VALIDATE_ON_MATCH,
            );
            w.flag(
                "background-validation",
                self.background_validation(),
                defaults::BACKGROUND_VALIDATION,
            );
            w.value(
                "background-validation-millis",
                self.background_validation_millis(),
            );
            w.flag("use-fast-fail", self.use_fast_fail(), defaults::USE_FAST_FAIL);
            if let Some(checker) = self.stale_connection_checker() {
                checker.write_xml("stale-connection-checker", w);
            }
            if let Some(sorter) = self.exception_sorter() {
                sorter.write_xml("exception-sorter", w);
            }
        });
    }
}

impl ToXml for TimeOut {
    fn write_xml(&self, writer: &mut XmlWriter) {
        writer.element("timeout", &Attrs::new(), |w| {
            w.value("blocking-timeout-millis", self.blocking_timeout_millis());
            w.value("idle-timeout-minutes", self.idle_timeout_minutes());
            w.flag(
                "set-tx-query-timeout",
                self.set_tx_query_timeout(),
                defaults::SET_TX_QUERY_TIMEOUT,
            );
            w.value("query-timeout", self.query_timeout());
            w.value("use-try-lock", self.use_try_lock());
            w.value("allocation-retry", self.allocation_retry());
            w.value(
                "allocation-retry-wait-millis",
                self.allocation_retry_wait_millis(),
            );
            w.value("xa-resource-timeout", self.xa_resource_timeout());
            w.value("validation-query-timeout", self.validation_query_timeout());
        });
    }
}

impl ToXml for Statement {
    fn write_xml(&self, writer: &mut XmlWriter) {
        writer.element("statement", &Attrs::new(), |w| {
            if self.track_statements() != defaults::TRACK_STATEMENTS {
                w.value("track-statements", Some(self.track_statements()));
            }
            w.value(
                "prepared-statement-cache-size",
                self.prepared_statement_cache_size(),
            );
            w.flag(
                "share-prepared-statements",
                self.share_prepared_statements(),
                defaults::SHARE_PREPARED_STATEMENTS,
            );
        });
    }
}

impl ToXml for Driver {
    fn write_xml(&self, writer: &mut XmlWriter) {
        let attrs = Attrs::new()
            .text("name", self.name())
            .with("major-version", self.major_version())
            .with("minor-version", self.minor_version())
            .with("module", self.module());
        writer.element(Driver::ELEMENT, &attrs, |w| {
            w.opt_text("driver-class", self.driver_class());
            w.opt_text("datasource-class", self.data_source_class());
            w.opt_text("xa-datasource-class", self.xa_data_source_class());
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DsParser;

    const FULL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<datasources xmlns="http://www.ironjacamar.org/doc/schema">
  <datasource jndi-name="java:/H2DS" pool-name="H2DS" spy="true" jta="false" tracking="true" mcp="org.example.Mcp">
    <connection-url>jdbc:h2:mem:test;DB_CLOSE_DELAY=-1</connection-url>
    <driver-class>org.h2.Driver</driver-class>
    <connection-property name="b">2 &amp; 3</connection-property>
    <connection-property name="a">1</connection-property>
    <new-connection-sql>select 1</new-connection-sql>
    <transaction-isolation>2048</transaction-isolation>
    <pool>
      <min-pool-size>5</min-pool-size>
      <initial-pool-size>6</initial-pool-size>
      <max-pool-size>10</max-pool-size>
      <prefill/>
      <flush-strategy>EntirePool</flush-strategy>
      <capacity>
        <incrementer class-name="org.example.Inc">
          <config-property name="size">2</config-property>
        </incrementer>
      </capacity>
      <fair>false</fair>
      <connection-listener class-name="org.example.Listener"/>
    </pool>
    <security>
      <user-name>sa</user-name>
      <password>sa</password>
      <reauth-plugin class-name="org.example.Reauth"/>
    </security>
    <validation>
      <valid-connection-checker class-name="org.example.Checker"/>
      <check-valid-connection-sql>select 1</check-valid-connection-sql>
      <validate-on-match>true</validate-on-match>
      <background-validation-millis>0</background-validation-millis>
      <exception-sorter class-name="org.example.Sorter">
        <config-property name="x">y</config-property>
      </exception-sorter>
    </validation>
    <timeout>
      <blocking-timeout-millis>5000</blocking-timeout-millis>
      <set-tx-query-timeout/>
      <query-timeout>0</query-timeout>
      <use-try-lock>60</use-try-lock>
      <allocation-retry>2</allocation-retry>
    </timeout>
    <statement>
      <track-statements>NOWARN</track-statements>
      <prepared-statement-cache-size>32</prepared-statement-cache-size>
      <share-prepared-statements/>
    </statement>
  </datasource>
  <xa-datasource jndi-name="java:/XAExampleDS" pool-name="ExamplePool" enabled="false">
    <xa-datasource-property name="URL">jdbc:example://host/db</xa-datasource-property>
    <xa-datasource-class>com.example.Driver</xa-datasource-class>
    <url-property>URL</url-property>
    <xa-pool>
      <is-same-rm-override>false</is-same-rm-override>
      <interleaving/>
      <wrap-xa-resource>false</wrap-xa-resource>
    </xa-pool>
    <recovery no-recovery="true">
      <recover-credential><security-domain>recovery</security-domain></recover-credential>
    </recovery>
  </xa-datasource>
  <drivers>
    <driver name="h2" module="com.h2database.h2">
      <xa-datasource-class>org.h2.jdbcx.JdbcDataSource</xa-datasource-class>
    </driver>
  </drivers>
</datasources>"#;

    #[test]
    fn canonical_form_round_trips() {
        let parser = DsParser::new();
        let first = parser.parse_str(FULL).expect("parse fixture");
        let xml = first.to_canonical_xml();
        let second = parser.parse_str(&xml).expect("parse canonical");
        assert_eq!(first, second);
        assert_eq!(xml, second.to_canonical_xml());
    }

    #[test]
    fn defaults_are_not_emitted() {
        let xml = r#"<datasources><datasource jndi-name="java:/A" pool-name="A" enabled="true">
            <datasource-class>org.h2.jdbcx.JdbcDataSource</datasource-class>
            <pool><min-pool-size>1</min-pool-size><fair>true</fair></pool>
        </datasource></datasources>"#;
        let set = DsParser::new().parse_str(xml).expect("parse");
        assert_eq!(
            set.to_canonical_xml(),
            "<datasources>\n  <datasource jndi-name=\"java:/A\" pool-name=\"A\">\n    \
             <datasource-class>org.h2.jdbcx.JdbcDataSource</datasource-class>\n    \
             <pool/>\n  </datasource>\n</datasources>\n"
        );
    }

    #[test]
    fn empty_set_renders_empty_root() {
        assert_eq!(DescriptorSet::default().to_canonical_xml(), "<datasources/>\n");
    }
}

use std::io::Cursor;

use jca_descriptors::ds_descriptor::defaults as ds_defaults;
use jca_descriptors::ds_descriptor::{FlushStrategy, TrackStatements, TransactionIsolation};
use jca_descriptors::wls_descriptor::{RequestClass, TransactionSupport};
use jca_descriptors::{
    parse_reader, parse_str, DescriptorParser, Dialect, ParseError, ParserOptions, ToXml,
    ValidateError,
};

const XA_EXAMPLE: &str = include_str!("fixtures/xa-example-ds.xml");
const H2: &str = include_str!("fixtures/h2-ds.xml");
const WEBLOGIC: &str = include_str!("fixtures/weblogic-ra.xml");

const FIXTURES: [&str; 3] = [XA_EXAMPLE, H2, WEBLOGIC];

#[test]
fn canonical_form_round_trips_every_fixture() {
    for fixture in FIXTURES {
        let first = parse_str(fixture).expect("fixture parses");
        let canonical = first.to_canonical_xml();
        let second = parse_str(&canonical).expect("canonical form parses");
        assert_eq!(first, second, "round trip changed the tree:\n{canonical}");
        assert_eq!(canonical, second.to_canonical_xml(), "canonical form is not stable");
    }
}

#[test]
fn xa_example_end_to_end() {
    let descriptor = parse_str(XA_EXAMPLE).expect("parse");
    assert_eq!(descriptor.dialect(), Dialect::DataSources);
    let set = descriptor.as_data_sources().expect("datasources");
    assert!(set.data_sources().is_empty());
    let xa = &set.xa_data_sources()[0];
    assert_eq!(xa.jndi_name(), "java:/XAExampleDS");
    assert_eq!(xa.pool_name(), "ExamplePool");
    assert_eq!(xa.xa_data_source_class(), Some("com.example.Driver"));
    let properties: Vec<_> = xa
        .xa_data_source_properties()
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    assert_eq!(properties, [("URL", "jdbc:example://host/db")]);
}

#[test]
fn h2_fixture_resolves_defaults_and_drivers() {
    let descriptor = parse_str(H2).expect("parse");
    let mut set = descriptor.as_data_sources().expect("datasources").clone();

    let ds = &set.data_sources()[0];
    assert!(!ds.base().use_ccm());
    assert!(ds.base().enabled());
    assert_eq!(
        ds.base().transaction_isolation(),
        Some(TransactionIsolation::RepeatableRead)
    );
    let pool = ds.pool().expect("pool");
    assert_eq!(pool.min_pool_size(), ds_defaults::MIN_POOL_SIZE);
    assert_ne!(pool.min_pool_size(), 0);
    assert_eq!(pool.max_pool_size(), 30);
    assert_eq!(pool.flush_strategy(), FlushStrategy::IdleConnections);
    assert_eq!(
        ds.base().statement().map(|s| s.track_statements()),
        Some(TrackStatements::True)
    );

    let xa = &set.xa_data_sources()[0];
    let xa_pool = xa.xa_pool().expect("xa-pool");
    assert!(xa_pool.pad_xid());
    assert!(xa_pool.no_tx_separate_pool());
    assert_eq!(xa_pool.pool().min_pool_size(), 0);
    let recovery = xa.recovery().expect("recovery");
    assert_eq!(
        recovery.credential().and_then(|c| c.user_name.as_deref()),
        Some("sa")
    );

    assert_eq!(set.resolve_driver_references(), 2);
    assert_eq!(set.data_sources()[0].driver_class(), Some("org.h2.Driver"));
    assert_eq!(
        set.xa_data_sources()[0].xa_data_source_class(),
        Some("org.h2.jdbcx.JdbcDataSource")
    );
}

#[test]
fn weblogic_fixture_is_fully_read() {
    let descriptor = parse_str(WEBLOGIC).expect("parse");
    assert_eq!(descriptor.dialect(), Dialect::WeblogicConnector);
    let connector = descriptor.as_weblogic_connector().expect("connector");
    assert_eq!(connector.version(), Some("1.3"));
    assert_eq!(connector.enable_global_access_to_classes(), Some(true));

    let wm = connector.work_manager().expect("work-manager");
    assert!(matches!(
        wm.request_class(),
        Some(RequestClass::FairShare { name, fair_share: 90 }) if name == "high"
    ));

    let property = &connector.properties()[0];
    assert_eq!(property.name(), "ServerName");
    assert_eq!(property.value(), Some("localhost"));

    let instances: Vec<_> = connector.connection_instances().collect();
    assert_eq!(instances.len(), 2);
    let primary = instances[0].connection_properties().expect("properties");
    assert_eq!(primary.transaction_support(), Some(TransactionSupport::XaTransaction));
    assert_eq!(
        primary.logging().and_then(|l| l.file_time_span()),
        Some(24)
    );
    assert!(instances[1].connection_properties().is_none());

    let defaults = connector
        .outbound_resource_adapter()
        .and_then(|o| o.default_connection_properties())
        .and_then(|p| p.pool_params())
        .expect("default pool-params");
    assert_eq!(defaults.max_capacity(), Some(20));
}

#[test]
fn missing_jndi_name_is_rejected() {
    let err = parse_str(
        r#"<datasources><datasource pool-name="P"><connection-url>jdbc:x</connection-url><driver-class>x.Driver</driver-class></datasource></datasources>"#,
    )
    .expect_err("jndi-name");
    assert!(matches!(
        err,
        ParseError::Validate(ValidateError::MissingRequiredAttribute { ref attribute, .. })
            if attribute == "jndi-name"
    ));
}

#[test]
fn driver_class_without_connection_url_is_rejected() {
    let err = parse_str(
        r#"<datasources><datasource jndi-name="java:/A" pool-name="A"><driver-class>x.Driver</driver-class></datasource></datasources>"#,
    )
    .expect_err("connection-url");
    assert_eq!(err.offending_name(), Some("connection-url"));
}

fn with_timeout(query_timeout: &str) -> String {
    format!(
        r#"<datasources><datasource jndi-name="java:/A" pool-name="A">
            <connection-url>jdbc:x</connection-url>
            <driver-class>x.Driver</driver-class>
            <timeout><query-timeout>{query_timeout}</query-timeout></timeout>
        </datasource></datasources>"#
    )
}

#[test]
fn negative_query_timeout_is_rejected() {
    let err = parse_str(&with_timeout("-1")).expect_err("negative");
    assert!(matches!(
        err,
        ParseError::Validate(ValidateError::InvalidNegativeValue { ref element })
            if element == "query-timeout"
    ));
    for ok in ["0", "1", "300"] {
        parse_str(&with_timeout(ok)).expect("non-negative timeout");
    }
}

#[test]
fn unknown_pool_child_is_rejected() {
    let err = parse_str(
        r#"<datasources><datasource jndi-name="java:/A" pool-name="A">
            <connection-url>jdbc:x</connection-url>
            <driver-class>x.Driver</driver-class>
            <pool><max-pool-size>5</max-pool-size><pool-colour>blue</pool-colour></pool>
        </datasource></datasources>"#,
    )
    .expect_err("unknown tag");
    assert!(matches!(err, ParseError::UnexpectedElement(ref name) if name == "pool-colour"));
}

#[test]
fn reader_and_string_inputs_agree() {
    for fixture in FIXTURES {
        let from_reader = parse_reader(Cursor::new(fixture.as_bytes())).expect("reader");
        assert_eq!(from_reader, parse_str(fixture).expect("str"));
    }
}

#[test]
fn expressions_can_be_left_unresolved() {
    let parser = DescriptorParser::with_options(ParserOptions {
        resolve_expressions: false,
    });
    let descriptor = parser.parse_str(WEBLOGIC).expect("parse");
    let connector = descriptor.as_weblogic_connector().expect("connector");
    assert_eq!(connector.properties()[0].value(), Some("${eis.host:localhost}"));
}

#[test]
fn file_input_is_supported() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/xa-example-ds.xml");
    let from_file = jca_descriptors::parse_file(path).expect("file");
    assert_eq!(from_file, parse_str(XA_EXAMPLE).expect("str"));
}

#[test]
fn truncated_document_is_rejected() {
    let cut = &WEBLOGIC[..WEBLOGIC.len() / 2];
    let err = parse_str(cut).expect_err("truncated");
    assert!(matches!(
        err,
        ParseError::UnexpectedEndOfDocument | ParseError::Malformed(_)
    ));
}

#[test]
fn nested_expression_default_round_trips() {
    let xml = r#"<datasources><datasource jndi-name="java:/Nested" pool-name="Nested">
        <connection-url>${JCA_TEST_UNSET_URL:${JCA_TEST_UNSET_FALLBACK:jdbc:h2:mem:fallback}}</connection-url>
        <driver-class>org.h2.Driver</driver-class>
    </datasource></datasources>"#;
    let first = parse_str(xml).expect("parse");
    let set = first.as_data_sources().expect("datasources");
    assert_eq!(
        set.data_sources()[0].connection_url(),
        Some("jdbc:h2:mem:fallback")
    );

    let canonical = first.to_canonical_xml();
    assert!(!canonical.contains("${"), "unexpanded expression:\n{canonical}");
    assert_eq!(first, parse_str(&canonical).expect("canonical form parses"));
}

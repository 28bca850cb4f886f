//! Outbound connection settings shared by defaults and instances.

use std::fmt;

use descriptor_xml::{check_non_negative, require_element, ParseError, ValidateError};

/// One `<property>` of a `properties` list.
///
/// Lists keep document order and may repeat a name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConfigProperty {
    name: String,
    value: Option<String>,
}

impl ConfigProperty {
    pub const ELEMENT: &'static str = "property";

    pub fn new(name: Option<String>, value: Option<String>) -> Result<Self, ValidateError> {
        let name = require_element(name.as_deref(), "name", Self::ELEMENT)?.to_string();
        Ok(Self { name, value })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

/// Transaction level a connection factory supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TransactionSupport {
    NoTransaction,
    LocalTransaction,
    XaTransaction,
}

impl TransactionSupport {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionSupport::NoTransaction => "NoTransaction",
            TransactionSupport::LocalTransaction => "LocalTransaction",
            TransactionSupport::XaTransaction => "XATransaction",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        match raw.trim() {
            "NoTransaction" => Ok(TransactionSupport::NoTransaction),
            "LocalTransaction" => Ok(TransactionSupport::LocalTransaction),
            "XATransaction" => Ok(TransactionSupport::XaTransaction),
            _ => Err(ParseError::invalid_value(
                "transaction-support",
                raw,
                "NoTransaction, LocalTransaction or XATransaction",
            )),
        }
    }
}

impl fmt::Display for TransactionSupport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unvalidated `<pool-params>` contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PoolParamsFields {
    pub initial_capacity: Option<i32>,
    pub max_capacity: Option<i32>,
    pub capacity_increment: Option<i32>,
    pub shrinking_enabled: Option<bool>,
    pub shrink_frequency_seconds: Option<i32>,
    pub highest_num_waiters: Option<i32>,
    pub highest_num_unavailable: Option<i32>,
    pub connection_creation_retry_frequency_seconds: Option<i32>,
    pub connection_reserve_timeout_seconds: Option<i32>,
    pub test_frequency_seconds: Option<i32>,
    pub test_connections_on_create: Option<bool>,
    pub test_connections_on_release: Option<bool>,
    pub test_connections_on_reserve: Option<bool>,
    pub profile_harvest_frequency_seconds: Option<i32>,
    pub ignore_in_use_connections_enabled: Option<bool>,
    pub match_connections_supported: Option<bool>,
    pub use_first_available: Option<bool>,
}

/// Connection pool sizing and testing for one connection factory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PoolParams {
    #[cfg_attr(feature = "serde", serde(flatten))]
    fields: PoolParamsFields,
}

impl PoolParams {
    pub const ELEMENT: &'static str = "pool-params";

    pub fn new(fields: PoolParamsFields) -> Result<Self, ValidateError> {
        let numeric = [
            ("initial-capacity", fields.initial_capacity),
            ("max-capacity", fields.max_capacity),
            ("capacity-increment", fields.capacity_increment),
            ("shrink-frequency-seconds", fields.shrink_frequency_seconds),
            ("highest-num-waiters", fields.highest_num_waiters),
            ("highest-num-unavailable", fields.highest_num_unavailable),
            (
                "connection-creation-retry-frequency-seconds",
                fields.connection_creation_retry_frequency_seconds,
            ),
            (
                "connection-reserve-timeout-seconds",
                fields.connection_reserve_timeout_seconds,
            ),
            ("test-frequency-seconds", fields.test_frequency_seconds),
            (
                "profile-harvest-frequency-seconds",
                fields.profile_harvest_frequency_seconds,
            ),
        ];
        for (element, value) in numeric {
            check_non_negative(element, value)?;
        }
        if let (Some(initial), Some(max)) = (fields.initial_capacity, fields.max_capacity) {
            if initial > max {
                return Err(ValidateError::InvalidRange {
                    element: "initial-capacity".into(),
                    reason: format!("initial-capacity ({initial}) exceeds max-capacity ({max})"),
                });
            }
        }
        Ok(Self { fields })
    }

    pub fn initial_capacity(&self) -> Option<i32> {
        self.fields.initial_capacity
    }

    pub fn max_capacity(&self) -> Option<i32> {
        self.fields.max_capacity
    }

    pub fn capacity_increment(&self) -> Option<i32> {
        self.fields.capacity_increment
    }

    pub fn shrinking_enabled(&self) -> Option<bool> {
        self.fields.shrinking_enabled
    }

    pub fn shrink_frequency_seconds(&self) -> Option<i32> {
        self.fields.shrink_frequency_seconds
    }

    pub fn highest_num_waiters(&self) -> Option<i32> {
        self.fields.highest_num_waiters
    }

    pub fn highest_num_unavailable(&self) -> Option<i32> {
        self.fields.highest_num_unavailable
    }

    pub fn connection_creation_retry_frequency_seconds(&self) -> Option<i32> {
        self.fields.connection_creation_retry_frequency_seconds
    }

    pub fn connection_reserve_timeout_seconds(&self) -> Option<i32> {
        self.fields.connection_reserve_timeout_seconds
    }

    pub fn test_frequency_seconds(&self) -> Option<i32> {
        self.fields.test_frequency_seconds
    }

    pub fn test_connections_on_create(&self) -> Option<bool> {
        self.fields.test_connections_on_create
    }

    pub fn test_connections_on_release(&self) -> Option<bool> {
        self.fields.test_connections_on_release
    }

    pub fn test_connections_on_reserve(&self) -> Option<bool> {
        self.fields.test_connections_on_reserve
    }

    pub fn profile_harvest_frequency_seconds(&self) -> Option<i32> {
        self.fields.profile_harvest_frequency_seconds
    }

    pub fn ignore_in_use_connections_enabled(&self) -> Option<bool> {
        self.fields.ignore_in_use_connections_enabled
    }

    pub fn match_connections_supported(&self) -> Option<bool> {
        self.fields.match_connections_supported
    }

    pub fn use_first_available(&self) -> Option<bool> {
        self.fields.use_first_available
    }
}

/// Raw `<logging>` contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LoggingFields {
    pub log_filename: Option<String>,
    pub logging_enabled: Option<bool>,
    pub rotation_type: Option<String>,
    pub number_of_files_limited: Option<bool>,
    pub file_count: Option<i32>,
    pub file_size_limit: Option<i32>,
    pub rotate_log_on_startup: Option<bool>,
    pub log_file_rotation_dir: Option<String>,
    pub rotation_time: Option<String>,
    pub file_time_span: Option<i32>,
    pub date_format_pattern: Option<String>,
}

/// Server log file settings of a connection factory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Logging {
    #[cfg_attr(feature = "serde", serde(flatten))]
    fields: LoggingFields,
}

impl Logging {
    pub const ELEMENT: &'static str = "logging";

    pub fn new(fields: LoggingFields) -> Self {
        Self { fields }
    }

    pub fn log_filename(&self) -> Option<&str> {
        self.fields.log_filename.as_deref()
    }

    pub fn logging_enabled(&self) -> Option<bool> {
        self.fields.logging_enabled
    }

    pub fn rotation_type(&self) -> Option<&str> {
        self.fields.rotation_type.as_deref()
    }

    pub fn number_of_files_limited(&self) -> Option<bool> {
        self.fields.number_of_files_limited
    }

    pub fn file_count(&self) -> Option<i32> {
        self.fields.file_count
    }

    pub fn file_size_limit(&self) -> Option<i32> {
        self.fields.file_size_limit
    }

    pub fn rotate_log_on_startup(&self) -> Option<bool> {
        self.fields.rotate_log_on_startup
    }

    pub fn log_file_rotation_dir(&self) -> Option<&str> {
        self.fields.log_file_rotation_dir.as_deref()
    }

    pub fn rotation_time(&self) -> Option<&str> {
        self.fields.rotation_time.as_deref()
    }

    pub fn file_time_span(&self) -> Option<i32> {
        self.fields.file_time_span
    }

    pub fn date_format_pattern(&self) -> Option<&str> {
        self.fields.date_format_pattern.as_deref()
    }
}

/// Unvalidated `<connection-properties>` contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionPropertiesParams {
    pub pool_params: Option<PoolParams>,
    pub logging: Option<Logging>,
    pub transaction_support: Option<TransactionSupport>,
    pub authentication_mechanism: Option<String>,
    pub reauthentication_support: Option<bool>,
    pub properties: Vec<ConfigProperty>,
    pub res_auth: Option<String>,
}

/// `connection-properties` or `default-connection-properties`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConnectionProperties {
    pool_params: Option<PoolParams>,
    logging: Option<Logging>,
    transaction_support: Option<TransactionSupport>,
    authentication_mechanism: Option<String>,
    reauthentication_support: Option<bool>,
    properties: Vec<ConfigProperty>,
    res_auth: Option<String>,
}

impl ConnectionProperties {
    pub fn new(params: ConnectionPropertiesParams) -> Self {
        Self {
            pool_params: params.pool_params,
            logging: params.logging,
            transaction_support: params.transaction_support,
            authentication_mechanism: params.authentication_mechanism,
            reauthentication_support: params.reauthentication_support,
            properties: params.properties,
            res_auth: params.res_auth,
        }
    }

    pub fn pool_params(&self) -> Option<&PoolParams> {
        self.pool_params.as_ref()
    }

    pub fn logging(&self) -> Option<&Logging> {
        self.logging.as_ref()
    }

    pub fn transaction_support(&self) -> Option<TransactionSupport> {
        self.transaction_support
    }

    pub fn authentication_mechanism(&self) -> Option<&str> {
        self.authentication_mechanism.as_deref()
    }

    pub fn reauthentication_support(&self) -> Option<bool> {
        self.reauthentication_support
    }

    pub fn properties(&self) -> &[ConfigProperty] {
        &self.properties
    }

    pub fn res_auth(&self) -> Option<&str> {
        self.res_auth.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_requires_a_name() {
        let err = ConfigProperty::new(None, Some("v".into())).expect_err("name");
        assert_eq!(err, ValidateError::missing_element("name", "property"));
        let prop = ConfigProperty::new(Some("Host".into()), None).expect("valueless");
        assert_eq!(prop.name(), "Host");
        assert_eq!(prop.value(), None);
    }

    #[test]
    fn transaction_support_is_a_closed_set() {
        assert_eq!(
            TransactionSupport::parse(" XATransaction ").expect("xa"),
            TransactionSupport::XaTransaction
        );
        assert_eq!(TransactionSupport::XaTransaction.to_string(), "XATransaction");
        let err = TransactionSupport::parse("Sometimes").expect_err("unknown");
        assert_eq!(err.offending_name(), Some("transaction-support"));
    }

    #[test]
    fn pool_capacities_are_checked() {
        let err = PoolParams::new(PoolParamsFields {
            initial_capacity: Some(10),
            max_capacity: Some(5),
            ..PoolParamsFields::default()
        })
        .expect_err("range");
        assert!(matches!(err, ValidateError::InvalidRange { ref element, .. } if element == "initial-capacity"));

        let err = PoolParams::new(PoolParamsFields {
            test_frequency_seconds: Some(-30),
            ..PoolParamsFields::default()
        })
        .expect_err("negative");
        assert_eq!(err, ValidateError::negative("test-frequency-seconds"));

        let pool = PoolParams::new(PoolParamsFields {
            initial_capacity: Some(5),
            max_capacity: Some(5),
            ..PoolParamsFields::default()
        })
        .expect("equal bounds");
        assert_eq!(pool.max_capacity(), Some(5));
    }
}

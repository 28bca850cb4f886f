//! Per-datasource settings blocks: isolation, timeouts, validation,
//! statement caching and security.

use std::fmt;

use descriptor_xml::{check_non_negative, Extension, ParseError, ValidateError};

use crate::defaults;

/// JDBC transaction isolation, by name or as a custom numeric level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TransactionIsolation {
    None,
    ReadUncommitted,
    ReadCommitted,
    RepeatableRead,
    Serializable,
    /// Driver-specific level outside the JDBC constants.
    Custom(i32),
}

impl TransactionIsolation {
    /// Parse `TRANSACTION_*` names or an integer level.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let value = raw.trim();
        let isolation = match value {
            "TRANSACTION_NONE" => TransactionIsolation::None,
            "TRANSACTION_READ_UNCOMMITTED" => TransactionIsolation::ReadUncommitted,
            "TRANSACTION_READ_COMMITTED" => TransactionIsolation::ReadCommitted,
            "TRANSACTION_REPEATABLE_READ" => TransactionIsolation::RepeatableRead,
            "TRANSACTION_SERIALIZABLE" => TransactionIsolation::Serializable,
            other => {
                let level = other.parse::<i32>().map_err(|_| {
                    ParseError::invalid_value(
                        "transaction-isolation",
                        raw,
                        "a TRANSACTION_* name or an integer level",
                    )
                })?;
                Self::from_level(level)
            }
        };
        Ok(isolation)
    }

    pub fn from_level(level: i32) -> Self {
        match level {
            0 => TransactionIsolation::None,
            1 => TransactionIsolation::ReadUncommitted,
            2 => TransactionIsolation::ReadCommitted,
            4 => TransactionIsolation::RepeatableRead,
            8 => TransactionIsolation::Serializable,
            other => TransactionIsolation::Custom(other),
        }
    }

    /// The `java.sql.Connection` level constant.
    pub fn level(&self) -> i32 {
        match self {
            TransactionIsolation::None => 0,
            TransactionIsolation::ReadUncommitted => 1,
            TransactionIsolation::ReadCommitted => 2,
            TransactionIsolation::RepeatableRead => 4,
            TransactionIsolation::Serializable => 8,
            TransactionIsolation::Custom(level) => *level,
        }
    }
}

impl fmt::Display for TransactionIsolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionIsolation::None => f.write_str("TRANSACTION_NONE"),
            TransactionIsolation::ReadUncommitted => f.write_str("TRANSACTION_READ_UNCOMMITTED"),
            TransactionIsolation::ReadCommitted => f.write_str("TRANSACTION_READ_COMMITTED"),
            TransactionIsolation::RepeatableRead => f.write_str("TRANSACTION_REPEATABLE_READ"),
            TransactionIsolation::Serializable => f.write_str("TRANSACTION_SERIALIZABLE"),
            TransactionIsolation::Custom(level) => write!(f, "{level}"),
        }
    }
}

/// Whether unclosed statements and result sets are tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TrackStatements {
    #[default]
    False,
    True,
    /// Track, but do not warn about unclosed statements.
    NoWarn,
}

impl TrackStatements {
    /// Case-insensitive; empty text means `False`.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let value = raw.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("false") {
            Ok(TrackStatements::False)
        } else if value.eq_ignore_ascii_case("true") {
            Ok(TrackStatements::True)
        } else if value.eq_ignore_ascii_case("nowarn") {
            Ok(TrackStatements::NoWarn)
        } else {
            Err(ParseError::invalid_value(
                "track-statements",
                raw,
                "true, false or nowarn",
            ))
        }
    }
}

impl fmt::Display for TrackStatements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TrackStatements::False => "false",
            TrackStatements::True => "true",
            TrackStatements::NoWarn => "nowarn",
        })
    }
}

/// Unvalidated `<timeout>` contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeOutParams {
    pub blocking_timeout_millis: Option<i64>,
    pub idle_timeout_minutes: Option<i64>,
    pub set_tx_query_timeout: bool,
    pub query_timeout: Option<i64>,
    /// Seconds to wait for the pool lock; `0` disables try-lock.
    pub use_try_lock: Option<i64>,
    pub allocation_retry: Option<i32>,
    pub allocation_retry_wait_millis: Option<i64>,
    pub xa_resource_timeout: Option<i32>,
    pub validation_query_timeout: Option<i64>,
}

/// Connection acquisition and query timeouts.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TimeOut {
    blocking_timeout_millis: Option<i64>,
    idle_timeout_minutes: Option<i64>,
    set_tx_query_timeout: bool,
    query_timeout: Option<i64>,
    use_try_lock: Option<i64>,
    allocation_retry: Option<i32>,
    allocation_retry_wait_millis: Option<i64>,
    xa_resource_timeout: Option<i32>,
    validation_query_timeout: Option<i64>,
}

impl TimeOut {
    pub fn new(params: TimeOutParams) -> Result<Self, ValidateError> {
        check_non_negative("blocking-timeout-millis", params.blocking_timeout_millis)?;
        check_non_negative("idle-timeout-minutes", params.idle_timeout_minutes)?;
        check_non_negative("query-timeout", params.query_timeout)?;
        check_non_negative("use-try-lock", params.use_try_lock)?;
        check_non_negative("allocation-retry", params.allocation_retry)?;
        check_non_negative(
            "allocation-retry-wait-millis",
            params.allocation_retry_wait_millis,
        )?;
        check_non_negative("xa-resource-timeout", params.xa_resource_timeout)?;
        check_non_negative("validation-query-timeout", params.validation_query_timeout)?;
        Ok(Self {
            blocking_timeout_millis: params.blocking_timeout_millis,
            idle_timeout_minutes: params.idle_timeout_minutes,
            set_tx_query_timeout: params.set_tx_query_timeout,
            query_timeout: params.query_timeout,
            use_try_lock: params.use_try_lock,
            allocation_retry: params.allocation_retry,
            allocation_retry_wait_millis: params.allocation_retry_wait_millis,
            xa_resource_timeout: params.xa_resource_timeout,
            validation_query_timeout: params.validation_query_timeout,
        })
    }

    pub fn blocking_timeout_millis(&self) -> Option<i64> {
        self.blocking_timeout_millis
    }

    pub fn idle_timeout_minutes(&self) -> Option<i64> {
        self.idle_timeout_minutes
    }

    pub fn set_tx_query_timeout(&self) -> bool {
        self.set_tx_query_timeout
    }

    pub fn query_timeout(&self) -> Option<i64> {
        self.query_timeout
    }

    pub fn use_try_lock(&self) -> Option<i64> {
        self.use_try_lock
    }

    pub fn allocation_retry(&self) -> Option<i32> {
        self.allocation_retry
    }

    pub fn allocation_retry_wait_millis(&self) -> Option<i64> {
        self.allocation_retry_wait_millis
    }

    pub fn xa_resource_timeout(&self) -> Option<i32> {
        self.xa_resource_timeout
    }

    pub fn validation_query_timeout(&self) -> Option<i64> {
        self.validation_query_timeout
    }
}

/// Unvalidated `<validation>` contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationParams {
    pub valid_connection_checker: Option<Extension>,
    pub check_valid_connection_sql: Option<String>,
    pub validate_on_match: bool,
    pub background_validation: bool,
    pub background_validation_millis: Option<i64>,
    pub use_fast_fail: bool,
    pub stale_connection_checker: Option<Extension>,
    pub exception_sorter: Option<Extension>,
}

impl Default for ValidationParams {
    fn default() -> Self {
        Self {
            valid_connection_checker: None,
            check_valid_connection_sql: None,
            validate_on_match: defaults::VALIDATE_ON_MATCH,
            background_validation: defaults::BACKGROUND_VALIDATION,
            background_validation_millis: None,
            use_fast_fail: defaults::USE_FAST_FAIL,
            stale_connection_checker: None,
            exception_sorter: None,
        }
    }
}

/// Connection validation policy.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Validation {
    valid_connection_checker: Option<Extension>,
    check_valid_connection_sql: Option<String>,
    validate_on_match: bool,
    background_validation: bool,
    background_validation_millis: Option<i64>,
    use_fast_fail: bool,
    stale_connection_checker: Option<Extension>,
    exception_sorter: Option<Extension>,
}

impl Validation {
    /// Extension points arrive already validated by [`Extension::new`].
    pub fn new(params: ValidationParams) -> Result<Self, ValidateError> {
        check_non_negative(
            "background-validation-millis",
            params.background_validation_millis,
        )?;
        Ok(Self {
            valid_connection_checker: params.valid_connection_checker,
            check_valid_connection_sql: params.check_valid_connection_sql,
            validate_on_match: params.validate_on_match,
            background_validation: params.background_validation,
            background_validation_millis: params.background_validation_millis,
            use_fast_fail: params.use_fast_fail,
            stale_connection_checker: params.stale_connection_checker,
            exception_sorter: params.exception_sorter,
        })
    }

    pub fn valid_connection_checker(&self) -> Option<&Extension> {
        self.valid_connection_checker.as_ref()
    }

    pub fn check_valid_connection_sql(&self) -> Option<&str> {
        self.check_valid_connection_sql.as_deref()
    }

    pub fn validate_on_match(&self) -> bool {
        self.validate_on_match
    }

    pub fn background_validation(&self) -> bool {
        self.background_validation
    }

    pub fn background_validation_millis(&self) -> Option<i64> {
        self.background_validation_millis
    }

    pub fn use_fast_fail(&self) -> bool {
        self.use_fast_fail
    }

    pub fn stale_connection_checker(&self) -> Option<&Extension> {
        self.stale_connection_checker.as_ref()
    }

    pub fn exception_sorter(&self) -> Option<&Extension> {
        self.exception_sorter.as_ref()
    }
}

/// Prepared statement cache settings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Statement {
    track_statements: TrackStatements,
    prepared_statement_cache_size: Option<i64>,
    share_prepared_statements: bool,
}

impl Statement {
    pub fn new(
        track_statements: TrackStatements,
        prepared_statement_cache_size: Option<i64>,
        share_prepared_statements: bool,
    ) -> Result<Self, ValidateError> {
        check_non_negative(
            "prepared-statement-cache-size",
            prepared_statement_cache_size,
        )?;
        Ok(Self {
            track_statements,
            prepared_statement_cache_size,
            share_prepared_statements,
        })
    }

    pub fn track_statements(&self) -> TrackStatements {
        self.track_statements
    }

    pub fn prepared_statement_cache_size(&self) -> Option<i64> {
        self.prepared_statement_cache_size
    }

    pub fn share_prepared_statements(&self) -> bool {
        self.share_prepared_statements
    }
}

/// Credentials used to open physical connections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Security {
    user_name: Option<String>,
    password: Option<String>,
    security_domain: Option<String>,
    reauth_plugin: Option<Extension>,
}

impl Security {
    pub fn new(
        user_name: Option<String>,
        password: Option<String>,
        security_domain: Option<String>,
        reauth_plugin: Option<Extension>,
    ) -> Self {
        Self {
            user_name,
            password,
            security_domain,
            reauth_plugin,
        }
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn security_domain(&self) -> Option<&str> {
        self.security_domain.as_deref()
    }

    pub fn reauth_plugin(&self) -> Option<&Extension> {
        self.reauth_plugin.as_ref()
    }
}

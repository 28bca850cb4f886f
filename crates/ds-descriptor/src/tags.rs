//! Element and attribute vocabularies of the datasource dialect.

use descriptor_xml::tag_set;

tag_set! {
    /// Children of the `<datasources>` root.
    pub enum DataSourcesTag {
        DataSource => "datasource",
        XaDataSource => "xa-datasource",
        Drivers => "drivers",
    }
}

tag_set! {
    /// Attributes of `<datasource>`.
    pub enum DataSourceAttr {
        JndiName => "jndi-name",
        PoolName => "pool-name",
        Enabled => "enabled",
        UseJavaContext => "use-java-context",
        Spy => "spy",
        UseCcm => "use-ccm",
        Jta => "jta",
        Connectable => "connectable",
        Tracking => "tracking",
        Mcp => "mcp",
        EnlistmentTrace => "enlistment-trace",
    }
}

tag_set! {
    /// Attributes of `<xa-datasource>`; `jta` is implied.
    pub enum XaDataSourceAttr {
        JndiName => "jndi-name",
        PoolName => "pool-name",
        Enabled => "enabled",
        UseJavaContext => "use-java-context",
        Spy => "spy",
        UseCcm => "use-ccm",
        Connectable => "connectable",
        Tracking => "tracking",
        Mcp => "mcp",
        EnlistmentTrace => "enlistment-trace",
    }
}

tag_set! {
    /// Children of `<datasource>`.
    pub enum DataSourceTag {
        ConnectionUrl => "connection-url",
        DriverClass => "driver-class",
        DataSourceClass => "datasource-class",
        Driver => "driver",
        ConnectionProperty => "connection-property",
        NewConnectionSql => "new-connection-sql",
        TransactionIsolation => "transaction-isolation",
        UrlDelimiter => "url-delimiter",
        UrlSelectorStrategyClassName => "url-selector-strategy-class-name",
        Pool => "pool",
        Security => "security",
        Validation => "validation",
        Timeout => "timeout",
        Statement => "statement",
    }
}

tag_set! {
    /// Children of `<xa-datasource>`.
    pub enum XaDataSourceTag {
        XaDataSourceProperty => "xa-datasource-property",
        XaDataSourceClass => "xa-datasource-class",
        Driver => "driver",
        UrlDelimiter => "url-delimiter",
        UrlProperty => "url-property",
        UrlSelectorStrategyClassName => "url-selector-strategy-class-name",
        NewConnectionSql => "new-connection-sql",
        TransactionIsolation => "transaction-isolation",
        XaPool => "xa-pool",
        Security => "security",
        Validation => "validation",
        Timeout => "timeout",
        Statement => "statement",
        Recovery => "recovery",
    }
}

tag_set! {
    /// Children of `<pool>` and `<xa-pool>`.
    pub enum PoolTag {
        MinPoolSize => "min-pool-size",
        InitialPoolSize => "initial-pool-size",
        MaxPoolSize => "max-pool-size",
        Prefill => "prefill",
        UseStrictMin => "use-strict-min",
        FlushStrategy => "flush-strategy",
        AllowMultipleUsers => "allow-multiple-users",
        Capacity => "capacity",
        Fair => "fair",
        ConnectionListener => "connection-listener",
        IsSameRmOverride => "is-same-rm-override",
        Interleaving => "interleaving",
        NoTxSeparatePools => "no-tx-separate-pools",
        PadXid => "pad-xid",
        WrapXaResource => "wrap-xa-resource",
    }
}

impl PoolTag {
    /// Children only legal inside `<xa-pool>`.
    pub fn is_xa_only(&self) -> bool {
        matches!(
            self,
            PoolTag::IsSameRmOverride
                | PoolTag::Interleaving
                | PoolTag::NoTxSeparatePools
                | PoolTag::PadXid
                | PoolTag::WrapXaResource
        )
    }
}

tag_set! {
    /// Children of `<security>`.
    pub enum SecurityTag {
        UserName => "user-name",
        Password => "password",
        SecurityDomain => "security-domain",
        ReauthPlugin => "reauth-plugin",
    }
}

tag_set! {
    /// Children of `<validation>`.
    pub enum ValidationTag {
        ValidConnectionChecker => "valid-connection-checker",
        CheckValidConnectionSql => "check-valid-connection-sql",
        ValidateOnMatch => "validate-on-match",
        BackgroundValidation => "background-validation",
        BackgroundValidationMillis => "background-validation-millis",
        UseFastFail => "use-fast-fail",
        StaleConnectionChecker => "stale-connection-checker",
        ExceptionSorter => "exception-sorter",
    }
}

tag_set! {
    /// Children of `<timeout>`.
    pub enum TimeOutTag {
        BlockingTimeoutMillis => "blocking-timeout-millis",
        IdleTimeoutMinutes => "idle-timeout-minutes",
        SetTxQueryTimeout => "set-tx-query-timeout",
        QueryTimeout => "query-timeout",
        UseTryLock => "use-try-lock",
        AllocationRetry => "allocation-retry",
        AllocationRetryWaitMillis => "allocation-retry-wait-millis",
        XaResourceTimeout => "xa-resource-timeout",
        ValidationQueryTimeout => "validation-query-timeout",
    }
}

tag_set! {
    /// Children of `<statement>`.
    pub enum StatementTag {
        TrackStatements => "track-statements",
        PreparedStatementCacheSize => "prepared-statement-cache-size",
        SharePreparedStatements => "share-prepared-statements",
    }
}

tag_set! {
    /// Children of `<drivers>`.
    pub enum DriversTag {
        Driver => "driver",
    }
}

tag_set! {
    /// Attributes of `<driver>` inside `<drivers>`.
    pub enum DriverAttr {
        Name => "name",
        MajorVersion => "major-version",
        MinorVersion => "minor-version",
        Module => "module",
    }
}

tag_set! {
    /// Children of `<driver>` inside `<drivers>`.
    pub enum DriverTag {
        DriverClass => "driver-class",
        DataSourceClass => "datasource-class",
        XaDataSourceClass => "xa-datasource-class",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use descriptor_xml::{names_are_unique, TagSet};

    #[test]
    fn vocabularies_have_unique_names() {
        assert!(names_are_unique::<DataSourcesTag>());
        assert!(names_are_unique::<DataSourceAttr>());
        assert!(names_are_unique::<XaDataSourceAttr>());
        assert!(names_are_unique::<DataSourceTag>());
        assert!(names_are_unique::<XaDataSourceTag>());
        assert!(names_are_unique::<PoolTag>());
        assert!(names_are_unique::<SecurityTag>());
        assert!(names_are_unique::<ValidationTag>());
        assert!(names_are_unique::<TimeOutTag>());
        assert!(names_are_unique::<StatementTag>());
        assert!(names_are_unique::<DriverAttr>());
        assert!(names_are_unique::<DriverTag>());
    }

    #[test]
    fn jta_is_not_an_xa_attribute() {
        assert!(!DataSourceAttr::resolve("jta").is_unknown());
        assert!(XaDataSourceAttr::resolve("jta").is_unknown());
    }

    #[test]
    fn xa_only_pool_children() {
        assert!(PoolTag::resolve("pad-xid").is_xa_only());
        assert!(!PoolTag::resolve("prefill").is_xa_only());
    }
}

//! Element and attribute vocabularies of `<weblogic-connector>`.

use descriptor_xml::tag_set;

tag_set! {
    /// Attributes of the root element.
    pub enum ConnectorAttr {
        Version => "version",
        Id => "id",
    }
}

tag_set! {
    /// Children of `<weblogic-connector>`.
    pub enum ConnectorTag {
        NativeLibdir => "native-libdir",
        JndiName => "jndi-name",
        EnableAccessOutsideApp => "enable-access-outside-app",
        EnableGlobalAccessToClasses => "enable-global-access-to-classes",
        WorkManager => "work-manager",
        ConnectorWorkManager => "connector-work-manager",
        Security => "security",
        Properties => "properties",
        AdminObjects => "admin-objects",
        OutboundResourceAdapter => "outbound-resource-adapter",
    }
}

tag_set! {
    pub enum WorkManagerTag {
        Name => "name",
        ResponseTimeRequestClass => "response-time-request-class",
        FairShareRequestClass => "fair-share-request-class",
        RequestClassName => "request-class-name",
        MinThreadsConstraint => "min-threads-constraint",
        MinThreadsConstraintName => "min-threads-constraint-name",
        MaxThreadsConstraint => "max-threads-constraint",
        MaxThreadsConstraintName => "max-threads-constraint-name",
        Capacity => "capacity",
        CapacityName => "capacity-name",
        ShutdownTrigger => "work-manager-shutdown-trigger",
        IgnoreStuckThreads => "ignore-stuck-threads",
    }
}

tag_set! {
    /// Children of the two request class elements and of the named counts.
    pub enum RequestClassTag {
        Name => "name",
        GoalMs => "goal-ms",
        FairShare => "fair-share",
        Count => "count",
    }
}

tag_set! {
    pub enum ShutdownTriggerTag {
        MaxStuckThreadTime => "max-stuck-thread-time",
        StuckThreadCount => "stuck-thread-count",
    }
}

tag_set! {
    pub enum ConnectorWorkManagerTag {
        MaxConcurrentLongRunningRequests => "max-concurrent-long-running-requests",
    }
}

tag_set! {
    /// Children of the resource adapter `<security>` element.
    pub enum SecurityTag {
        DefaultPrincipalName => "default-principal-name",
        ManageAsPrincipalName => "manage-as-principal-name",
        RunAsPrincipalName => "run-as-principal-name",
        RunWorkAsPrincipalName => "run-work-as-principal-name",
        SecurityWorkContext => "security-work-context",
    }
}

tag_set! {
    /// Children of anonymous and caller principal elements.
    pub enum PrincipalTag {
        UseAnonymousIdentity => "use-anonymous-identity",
        UseCallerIdentity => "use-caller-identity",
        PrincipalName => "principal-name",
    }
}

tag_set! {
    pub enum SecurityWorkContextTag {
        InboundMappingRequired => "inbound-mapping-required",
        CallerPrincipalDefaultMapped => "caller-principal-default-mapped",
        CallerPrincipalMapping => "caller-principal-mapping",
        GroupPrincipalDefaultMapped => "group-principal-default-mapped",
        GroupPrincipalMapping => "group-principal-mapping",
    }
}

tag_set! {
    pub enum CallerMappingTag {
        EisCallerPrincipal => "eis-caller-principal",
        MappedCallerPrincipal => "mapped-caller-principal",
    }
}

tag_set! {
    pub enum GroupMappingTag {
        EisGroupPrincipal => "eis-group-principal",
        MappedGroupPrincipal => "mapped-group-principal",
    }
}

tag_set! {
    /// Children of every `properties`-like element.
    pub enum PropertiesTag {
        Property => "property",
    }
}

tag_set! {
    pub enum PropertyTag {
        Name => "name",
        Value => "value",
    }
}

tag_set! {
    pub enum AdminObjectsTag {
        DefaultProperties => "default-properties",
        AdminObjectGroup => "admin-object-group",
    }
}

tag_set! {
    pub enum AdminObjectGroupTag {
        AdminObjectInterface => "admin-object-interface",
        AdminObjectClass => "admin-object-class",
        DefaultProperties => "default-properties",
        AdminObjectInstance => "admin-object-instance",
    }
}

tag_set! {
    pub enum AdminObjectInstanceTag {
        JndiName => "jndi-name",
        Properties => "properties",
    }
}

tag_set! {
    pub enum OutboundTag {
        DefaultConnectionProperties => "default-connection-properties",
        ConnectionDefinitionGroup => "connection-definition-group",
    }
}

tag_set! {
    pub enum ConnectionDefinitionGroupTag {
        ConnectionFactoryInterface => "connection-factory-interface",
        DefaultConnectionProperties => "default-connection-properties",
        ConnectionInstance => "connection-instance",
    }
}

tag_set! {
    pub enum ConnectionInstanceTag {
        Description => "description",
        JndiName => "jndi-name",
        ConnectionProperties => "connection-properties",
    }
}

tag_set! {
    /// Children of `connection-properties` and `default-connection-properties`.
    pub enum ConnectionPropertiesTag {
        PoolParams => "pool-params",
        Logging => "logging",
        TransactionSupport => "transaction-support",
        AuthenticationMechanism => "authentication-mechanism",
        ReauthenticationSupport => "reauthentication-support",
        Properties => "properties",
        ResAuth => "res-auth",
    }
}

tag_set! {
    pub enum PoolParamsTag {
        InitialCapacity => "initial-capacity",
        MaxCapacity => "max-capacity",
        CapacityIncrement => "capacity-increment",
        ShrinkingEnabled => "shrinking-enabled",
        ShrinkFrequencySeconds => "shrink-frequency-seconds",
        HighestNumWaiters => "highest-num-waiters",
        HighestNumUnavailable => "highest-num-unavailable",
        ConnectionCreationRetryFrequencySeconds => "connection-creation-retry-frequency-seconds",
        ConnectionReserveTimeoutSeconds => "connection-reserve-timeout-seconds",
        TestFrequencySeconds => "test-frequency-seconds",
        TestConnectionsOnCreate => "test-connections-on-create",
        TestConnectionsOnRelease => "test-connections-on-release",
        TestConnectionsOnReserve => "test-connections-on-reserve",
        ProfileHarvestFrequencySeconds => "profile-harvest-frequency-seconds",
        IgnoreInUseConnectionsEnabled => "ignore-in-use-connections-enabled",
        MatchConnectionsSupported => "match-connections-supported",
        UseFirstAvailable => "use-first-available",
    }
}

tag_set! {
    pub enum LoggingTag {
        LogFilename => "log-filename",
        LoggingEnabled => "logging-enabled",
        RotationType => "rotation-type",
        NumberOfFilesLimited => "number-of-files-limited",
        FileCount => "file-count",
        FileSizeLimit => "file-size-limit",
        RotateLogOnStartup => "rotate-log-on-startup",
        LogFileRotationDir => "log-file-rotation-dir",
        RotationTime => "rotation-time",
        FileTimeSpan => "file-time-span",
        DateFormatPattern => "date-format-pattern",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use descriptor_xml::{names_are_unique, TagSet};

    #[test]
    fn vocabularies_have_unique_names() {
        assert!(names_are_unique::<ConnectorTag>());
        assert!(names_are_unique::<WorkManagerTag>());
        assert!(names_are_unique::<PoolParamsTag>());
        assert!(names_are_unique::<LoggingTag>());
        assert!(names_are_unique::<ConnectionPropertiesTag>());
    }

    #[test]
    fn shutdown_trigger_uses_its_long_name() {
        assert_eq!(
            WorkManagerTag::resolve("work-manager-shutdown-trigger"),
            WorkManagerTag::ShutdownTrigger
        );
        assert!(WorkManagerTag::resolve("shutdown-trigger").is_unknown());
    }
}

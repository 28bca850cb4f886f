//! Thread scheduling for inbound work.

use descriptor_xml::{check_non_negative, require_element, ValidateError};

/// How the work manager prioritises requests.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum RequestClass {
    ResponseTime { name: String, goal_ms: i32 },
    FairShare { name: String, fair_share: i32 },
}

impl RequestClass {
    pub const RESPONSE_TIME: &'static str = "response-time-request-class";
    pub const FAIR_SHARE: &'static str = "fair-share-request-class";

    pub fn response_time(name: Option<String>, goal_ms: Option<i32>) -> Result<Self, ValidateError> {
        let owner = Self::RESPONSE_TIME;
        let name = require_element(name.as_deref(), "name", owner)?.to_string();
        let goal_ms = goal_ms.ok_or_else(|| ValidateError::missing_element("goal-ms", owner))?;
        check_non_negative("goal-ms", Some(goal_ms))?;
        Ok(RequestClass::ResponseTime { name, goal_ms })
    }

    pub fn fair_share(name: Option<String>, fair_share: Option<i32>) -> Result<Self, ValidateError> {
        let owner = Self::FAIR_SHARE;
        let name = require_element(name.as_deref(), "name", owner)?.to_string();
        let fair_share =
            fair_share.ok_or_else(|| ValidateError::missing_element("fair-share", owner))?;
        check_non_negative("fair-share", Some(fair_share))?;
        Ok(RequestClass::FairShare { name, fair_share })
    }

    pub fn name(&self) -> &str {
        match self {
            RequestClass::ResponseTime { name, .. } | RequestClass::FairShare { name, .. } => name,
        }
    }

    pub fn element(&self) -> &'static str {
        match self {
            RequestClass::ResponseTime { .. } => Self::RESPONSE_TIME,
            RequestClass::FairShare { .. } => Self::FAIR_SHARE,
        }
    }
}

/// A named thread or queue bound: min/max threads constraints and capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NamedCount {
    name: String,
    count: i32,
}

impl NamedCount {
    pub fn new(owner: &str, name: Option<String>, count: Option<i32>) -> Result<Self, ValidateError> {
        let name = require_element(name.as_deref(), "name", owner)?.to_string();
        let count = count.ok_or_else(|| ValidateError::missing_element("count", owner))?;
        check_non_negative("count", Some(count))?;
        Ok(Self { name, count })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn count(&self) -> i32 {
        self.count
    }
}

/// When stuck threads should shut the work manager down.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ShutdownTrigger {
    max_stuck_thread_time: Option<i32>,
    stuck_thread_count: Option<i32>,
}

impl ShutdownTrigger {
    pub const ELEMENT: &'static str = "work-manager-shutdown-trigger";

    pub fn new(
        max_stuck_thread_time: Option<i32>,
        stuck_thread_count: Option<i32>,
    ) -> Result<Self, ValidateError> {
        check_non_negative("max-stuck-thread-time", max_stuck_thread_time)?;
        check_non_negative("stuck-thread-count", stuck_thread_count)?;
        Ok(Self {
            max_stuck_thread_time,
            stuck_thread_count,
        })
    }

    pub fn max_stuck_thread_time(&self) -> Option<i32> {
        self.max_stuck_thread_time
    }

    pub fn stuck_thread_count(&self) -> Option<i32> {
        self.stuck_thread_count
    }
}

/// Unvalidated `<work-manager>` contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkManagerParams {
    pub name: Option<String>,
    pub request_class: Option<RequestClass>,
    pub request_class_name: Option<String>,
    pub min_threads_constraint: Option<NamedCount>,
    pub min_threads_constraint_name: Option<String>,
    pub max_threads_constraint: Option<NamedCount>,
    pub max_threads_constraint_name: Option<String>,
    pub capacity: Option<NamedCount>,
    pub capacity_name: Option<String>,
    pub shutdown_trigger: Option<ShutdownTrigger>,
    pub ignore_stuck_threads: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WorkManager {
    name: String,
    request_class: Option<RequestClass>,
    request_class_name: Option<String>,
    min_threads_constraint: Option<NamedCount>,
    min_threads_constraint_name: Option<String>,
    max_threads_constraint: Option<NamedCount>,
    max_threads_constraint_name: Option<String>,
    capacity: Option<NamedCount>,
    capacity_name: Option<String>,
    shutdown_trigger: Option<ShutdownTrigger>,
    ignore_stuck_threads: Option<bool>,
}

impl WorkManager {
    pub const ELEMENT: &'static str = "work-manager";

    pub fn new(params: WorkManagerParams) -> Result<Self, ValidateError> {
        let name = require_element(params.name.as_deref(), "name", Self::ELEMENT)?.to_string();
        if let (Some(min), Some(max)) = (&params.min_threads_constraint, &params.max_threads_constraint)
        {
            if min.count() > max.count() {
                return Err(ValidateError::InvalidRange {
                    element: "min-threads-constraint".into(),
                    reason: format!(
                        "count {} exceeds max-threads-constraint count {}",
                        min.count(),
                        max.count()
                    ),
                });
            }
        }
        Ok(Self {
            name,
            request_class: params.request_class,
            request_class_name: params.request_class_name,
            min_threads_constraint: params.min_threads_constraint,
            min_threads_constraint_name: params.min_threads_constraint_name,
            max_threads_constraint: params.max_threads_constraint,
            max_threads_constraint_name: params.max_threads_constraint_name,
            capacity: params.capacity,
            capacity_name: params.capacity_name,
            shutdown_trigger: params.shutdown_trigger,
            ignore_stuck_threads: params.ignore_stuck_threads,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn request_class(&self) -> Option<&RequestClass> {
        self.request_class.as_ref()
    }

    /// Reference to a request class declared elsewhere in the domain.
    pub fn request_class_name(&self) -> Option<&str> {
        self.request_class_name.as_deref()
    }

    pub fn min_threads_constraint(&self) -> Option<&NamedCount> {
        self.min_threads_constraint.as_ref()
    }

    pub fn min_threads_constraint_name(&self) -> Option<&str> {
        self.min_threads_constraint_name.as_deref()
    }

    pub fn max_threads_constraint(&self) -> Option<&NamedCount> {
        self.max_threads_constraint.as_ref()
    }

    pub fn max_threads_constraint_name(&self) -> Option<&str> {
        self.max_threads_constraint_name.as_deref()
    }

    pub fn capacity(&self) -> Option<&NamedCount> {
        self.capacity.as_ref()
    }

    pub fn capacity_name(&self) -> Option<&str> {
        self.capacity_name.as_deref()
    }

    pub fn shutdown_trigger(&self) -> Option<&ShutdownTrigger> {
        self.shutdown_trigger.as_ref()
    }

    pub fn ignore_stuck_threads(&self) -> Option<bool> {
        self.ignore_stuck_threads
    }
}

/// `<connector-work-manager>`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConnectorWorkManager {
    max_concurrent_long_running_requests: Option<i32>,
}

impl ConnectorWorkManager {
    pub const ELEMENT: &'static str = "connector-work-manager";

    pub fn new(max_concurrent_long_running_requests: Option<i32>) -> Result<Self, ValidateError> {
        check_non_negative(
            "max-concurrent-long-running-requests",
            max_concurrent_long_running_requests,
        )?;
        Ok(Self {
            max_concurrent_long_running_requests,
        })
    }

    pub fn max_concurrent_long_running_requests(&self) -> Option<i32> {
        self.max_concurrent_long_running_requests
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn work_manager_requires_a_name() {
        let err = WorkManager::new(WorkManagerParams::default()).expect_err("name");
        assert_eq!(err, ValidateError::missing_element("name", "work-manager"));
    }

    #[test]
    fn negative_counts_are_rejected() {
        let err = NamedCount::new("capacity", Some("cap".into()), Some(-5)).expect_err("negative");
        assert_eq!(err, ValidateError::negative("count"));
        let err = RequestClass::fair_share(Some("fs".into()), Some(-1)).expect_err("negative");
        assert_eq!(err, ValidateError::negative("fair-share"));
        assert!(ShutdownTrigger::new(Some(0), Some(-2)).is_err());
        assert!(ConnectorWorkManager::new(Some(-1)).is_err());
    }

    #[test]
    fn request_class_needs_its_goal() {
        let err = RequestClass::response_time(Some("rt".into()), None).expect_err("goal");
        assert_eq!(
            err,
            ValidateError::missing_element("goal-ms", RequestClass::RESPONSE_TIME)
        );
        let class = RequestClass::response_time(Some("rt".into()), Some(250)).expect("valid");
        assert_eq!(class.name(), "rt");
        assert_eq!(class.element(), "response-time-request-class");
    }

    #[test]
    fn min_threads_cannot_exceed_max_threads() {
        let count = |n| NamedCount::new("c", Some("c".into()), Some(n)).expect("count");
        let err = WorkManager::new(WorkManagerParams {
            name: Some("wm".into()),
            min_threads_constraint: Some(count(8)),
            max_threads_constraint: Some(count(4)),
            ..WorkManagerParams::default()
        })
        .expect_err("range");
        assert!(matches!(err, ValidateError::InvalidRange { .. }));
    }
}

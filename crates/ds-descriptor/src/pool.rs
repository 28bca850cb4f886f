//! Connection pool settings for plain and XA data sources.

use descriptor_xml::{check_non_negative, Capacity, Extension, FlushStrategy, ValidateError};
use tracing::warn;

use crate::defaults;

/// Unvalidated `<pool>` contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolParams {
    pub min_pool_size: i32,
    pub initial_pool_size: Option<i32>,
    pub max_pool_size: i32,
    pub prefill: bool,
    pub use_strict_min: bool,
    pub flush_strategy: FlushStrategy,
    pub allow_multiple_users: bool,
    pub capacity: Option<Capacity>,
    pub connection_listener: Option<Extension>,
    pub fair: bool,
}

impl Default for PoolParams {
    fn default() -> Self {
        Self {
            min_pool_size: defaults::MIN_POOL_SIZE,
            initial_pool_size: None,
            max_pool_size: defaults::MAX_POOL_SIZE,
            prefill: defaults::PREFILL,
            use_strict_min: defaults::USE_STRICT_MIN,
            flush_strategy: defaults::FLUSH_STRATEGY,
            allow_multiple_users: defaults::ALLOW_MULTIPLE_USERS,
            capacity: None,
            connection_listener: None,
            fair: defaults::FAIR,
        }
    }
}

/// Sizing and flushing policy of a connection pool.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Pool {
    min_pool_size: i32,
    initial_pool_size: Option<i32>,
    max_pool_size: i32,
    prefill: bool,
    use_strict_min: bool,
    flush_strategy: FlushStrategy,
    allow_multiple_users: bool,
    capacity: Option<Capacity>,
    connection_listener: Option<Extension>,
    fair: bool,
}

impl Pool {
    pub fn new(params: PoolParams) -> Result<Self, ValidateError> {
        check_non_negative("min-pool-size", Some(params.min_pool_size))?;
        check_non_negative("max-pool-size", Some(params.max_pool_size))?;
        check_non_negative("initial-pool-size", params.initial_pool_size)?;
        if params.min_pool_size > params.max_pool_size {
            return Err(ValidateError::InvalidRange {
                element: "min-pool-size".into(),
                reason: format!(
                    "min-pool-size ({}) exceeds max-pool-size ({})",
                    params.min_pool_size, params.max_pool_size
                ),
            });
        }
        if params.prefill && params.allow_multiple_users {
            warn!(
                "prefill is set together with allow-multiple-users; prefilled connections \
                 cannot be associated with a user"
            );
        }
        Ok(Self {
            min_pool_size: params.min_pool_size,
            initial_pool_size: params.initial_pool_size,
            max_pool_size: params.max_pool_size,
            prefill: params.prefill,
            use_strict_min: params.use_strict_min,
            flush_strategy: params.flush_strategy,
            allow_multiple_users: params.allow_multiple_users,
            capacity: params.capacity,
            connection_listener: params.connection_listener,
            fair: params.fair,
        })
    }

    pub fn min_pool_size(&self) -> i32 {
        self.min_pool_size
    }

    pub fn initial_pool_size(&self) -> Option<i32> {
        self.initial_pool_size
    }

    pub fn max_pool_size(&self) -> i32 {
        self.max_pool_size
    }

    pub fn prefill(&self) -> bool {
        self.prefill
    }

    pub fn use_strict_min(&self) -> bool {
        self.use_strict_min
    }

    pub fn flush_strategy(&self) -> FlushStrategy {
        self.flush_strategy
    }

    pub fn allow_multiple_users(&self) -> bool {
        self.allow_multiple_users
    }

    pub fn capacity(&self) -> Option<&Capacity> {
        self.capacity.as_ref()
    }

    pub fn connection_listener(&self) -> Option<&Extension> {
        self.connection_listener.as_ref()
    }

    pub fn fair(&self) -> bool {
        self.fair
    }
}

/// Unvalidated `<xa-pool>` contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XaPoolParams {
    pub pool: PoolParams,
    pub is_same_rm_override: Option<bool>,
    pub interleaving: bool,
    pub pad_xid: bool,
    pub wrap_xa_resource: bool,
    pub no_tx_separate_pool: bool,
}

impl Default for XaPoolParams {
    fn default() -> Self {
        Self {
            pool: PoolParams::default(),
            is_same_rm_override: None,
            interleaving: defaults::INTERLEAVING,
            pad_xid: defaults::PAD_XID,
            wrap_xa_resource: defaults::WRAP_XA_RESOURCE,
            no_tx_separate_pool: defaults::NO_TX_SEPARATE_POOL,
        }
    }
}

/// A pool plus the XA resource handling flags.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct XaPool {
    pool: Pool,
    is_same_rm_override: Option<bool>,
    interleaving: bool,
    pad_xid: bool,
    wrap_xa_resource: bool,
    no_tx_separate_pool: bool,
}

impl XaPool {
    pub fn new(params: XaPoolParams) -> Result<Self, ValidateError> {
        Ok(Self {
            pool: Pool::new(params.pool)?,
            is_same_rm_override: params.is_same_rm_override,
            interleaving: params.interleaving,
            pad_xid: params.pad_xid,
            wrap_xa_resource: params.wrap_xa_resource,
            no_tx_separate_pool: params.no_tx_separate_pool,
        })
    }

    /// Settings shared with plain pools.
    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    pub fn is_same_rm_override(&self) -> Option<bool> {
        self.is_same_rm_override
    }

    pub fn interleaving(&self) -> bool {
        self.interleaving
    }

    pub fn pad_xid(&self) -> bool {
        self.pad_xid
    }

    pub fn wrap_xa_resource(&self) -> bool {
        self.wrap_xa_resource
    }

    pub fn no_tx_separate_pool(&self) -> bool {
        self.no_tx_separate_pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_come_from_the_table() {
        let pool = Pool::new(PoolParams::default()).expect("default pool");
        assert_eq!(pool.min_pool_size(), defaults::MIN_POOL_SIZE);
        assert_eq!(pool.max_pool_size(), defaults::MAX_POOL_SIZE);
        assert_eq!(pool.flush_strategy(), FlushStrategy::FailingConnectionOnly);
        assert!(pool.fair());
    }

    #[test]
    fn min_above_max_is_rejected() {
        let err = Pool::new(PoolParams {
            min_pool_size: 30,
            max_pool_size: 10,
            ..PoolParams::default()
        })
        .expect_err("range");
        assert!(matches!(err, ValidateError::InvalidRange { .. }));
    }

    #[test]
    fn negative_sizes_are_rejected() {
        let err = Pool::new(PoolParams {
            initial_pool_size: Some(-2),
            ..PoolParams::default()
        })
        .expect_err("negative");
        assert_eq!(err, ValidateError::negative("initial-pool-size"));
    }

    #[test]
    fn prefill_with_multiple_users_is_only_advisory() {
        let pool = Pool::new(PoolParams {
            prefill: true,
            allow_multiple_users: true,
            ..PoolParams::default()
        })
        .expect("warning only");
        assert!(pool.prefill() && pool.allow_multiple_users());
    }

    #[test]
    fn xa_pool_validates_inner_pool() {
        let mut params = XaPoolParams::default();
        params.pool.max_pool_size = -1;
        assert!(XaPool::new(params).is_err());
        let xa = XaPool::new(XaPoolParams::default()).expect("defaults");
        assert!(xa.wrap_xa_resource());
        assert_eq!(xa.is_same_rm_override(), None);
    }
}

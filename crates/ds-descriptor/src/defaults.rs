//! Schema-declared defaults for the datasource dialect.
//!
//! Builders seed their scratch values from this table and serializers omit
//! any field still equal to its entry here.

use descriptor_xml::FlushStrategy;

use crate::settings::TrackStatements;

// datasource / xa-datasource attributes
pub const ENABLED: bool = true;
pub const USE_JAVA_CONTEXT: bool = true;
pub const SPY: bool = false;
pub const USE_CCM: bool = true;
pub const JTA: bool = true;
pub const CONNECTABLE: bool = false;
pub const ENLISTMENT_TRACE: bool = true;

// pool
pub const MIN_POOL_SIZE: i32 = 1;
pub const MAX_POOL_SIZE: i32 = 20;
pub const PREFILL: bool = false;
pub const USE_STRICT_MIN: bool = false;
pub const FLUSH_STRATEGY: FlushStrategy = FlushStrategy::FailingConnectionOnly;
pub const ALLOW_MULTIPLE_USERS: bool = false;
pub const FAIR: bool = true;

// xa-pool
pub const INTERLEAVING: bool = false;
pub const PAD_XID: bool = false;
pub const WRAP_XA_RESOURCE: bool = true;
pub const NO_TX_SEPARATE_POOL: bool = false;

// validation
pub const VALIDATE_ON_MATCH: bool = false;
pub const BACKGROUND_VALIDATION: bool = false;
pub const USE_FAST_FAIL: bool = false;

// timeout
pub const SET_TX_QUERY_TIMEOUT: bool = false;

// statement
pub const SHARE_PREPARED_STATEMENTS: bool = false;
pub const TRACK_STATEMENTS: TrackStatements = TrackStatements::False;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_bounds_are_consistent() {
        assert!(MIN_POOL_SIZE > 0);
        assert!(MIN_POOL_SIZE <= MAX_POOL_SIZE);
    }
}

//! Whitelist lookup consumed by the planner.

use std::collections::{BTreeSet, HashSet};

use crate::domain::PoolId;

/// Pools exempt from the DEEP requirement.
pub trait WhitelistRegistry: Send + Sync {
    fn is_whitelisted(&self, pool: &PoolId) -> bool;
}

impl WhitelistRegistry for HashSet<PoolId> {
    fn is_whitelisted(&self, pool: &PoolId) -> bool {
        self.contains(pool)
    }
}

impl WhitelistRegistry for BTreeSet<PoolId> {
    fn is_whitelisted(&self, pool: &PoolId) -> bool {
        self.contains(pool)
    }
}

//! In-memory whitelist registry.

use std::collections::BTreeSet;

use deepfront_core::{PoolId, WhitelistRegistry};

/// Set of pools exempt from the DEEP requirement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryWhitelist {
    pools: BTreeSet<PoolId>,
}

impl InMemoryWhitelist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the pool was already whitelisted.
    pub fn add(&mut self, pool: PoolId) -> bool {
        self.pools.insert(pool)
    }

    /// Returns false if the pool was not whitelisted.
    pub fn remove(&mut self, pool: &PoolId) -> bool {
        self.pools.remove(pool)
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PoolId> {
        self.pools.iter()
    }
}

impl FromIterator<PoolId> for InMemoryWhitelist {
    fn from_iter<I: IntoIterator<Item = PoolId>>(iter: I) -> Self {
        Self {
            pools: iter.into_iter().collect(),
        }
    }
}

impl WhitelistRegistry for InMemoryWhitelist {
    fn is_whitelisted(&self, pool: &PoolId) -> bool {
        self.pools.contains(pool)
    }
}

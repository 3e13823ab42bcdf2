//! Point-in-time view of the three custody locations.

use serde::{Deserialize, Serialize};

/// Read-only balances observed at call time.
///
/// The wallet and balance-manager each hold three coins (DEEP, the order's
/// input coin, and the fee settlement unit); the reserve holds DEEP only.
/// The planner never mutates these.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceSnapshot {
    pub wallet_deep: u64,
    pub balance_manager_deep: u64,
    pub wallet_input: u64,
    pub balance_manager_input: u64,
    pub wallet_settlement: u64,
    pub balance_manager_settlement: u64,
    pub reserve_deep: u64,
}

impl BalanceSnapshot {
    /// Settlement units the trader owns across both personal custody locations.
    pub fn user_settlement(&self) -> u64 {
        self.wallet_settlement
            .saturating_add(self.balance_manager_settlement)
    }
}

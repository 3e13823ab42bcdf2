//! Fee collection planner.
//!
//! Prices the DEEP borrowed from the reserve in settlement units, adds the
//! protocol surcharge, and allocates payment across balance-manager and wallet.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::FeeConfig;
use crate::math::mul_fixed;

/// Settlement-unit fee for one order and where it is paid from.
///
/// When `sufficient` is false both sub-amounts are zero but `amount` still
/// carries the unpaid fee so callers can report the shortfall.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeePlan {
    pub amount: u64,
    pub from_wallet: u64,
    pub from_balance_manager: u64,
    pub sufficient: bool,
}

impl FeePlan {
    pub const ZERO: FeePlan = FeePlan {
        amount: 0,
        from_wallet: 0,
        from_balance_manager: 0,
        sufficient: true,
    };

    /// Settlement units the trader is missing, zero when sufficient.
    pub fn shortfall(&self, wallet: u64, balance_manager: u64) -> u64 {
        if self.sufficient {
            0
        } else {
            self.amount
                .saturating_sub(wallet.saturating_add(balance_manager))
        }
    }
}

/// Market value of the borrowed DEEP in settlement units.
pub fn coverage_fee(deep_borrowed: u64, stable_per_deep: u64) -> u64 {
    mul_fixed(deep_borrowed, stable_per_deep)
}

/// Protocol surcharge: the borrowed amount is scaled by the rate first, then priced.
pub fn protocol_fee(deep_borrowed: u64, protocol_fee_rate: u64, stable_per_deep: u64) -> u64 {
    mul_fixed(mul_fixed(deep_borrowed, protocol_fee_rate), stable_per_deep)
}

/// Coverage fee plus protocol fee, each floored independently.
pub fn reserve_coverage_fee(
    deep_borrowed: u64,
    stable_per_deep: u64,
    protocol_fee_rate: u64,
) -> u64 {
    coverage_fee(deep_borrowed, stable_per_deep)
        .saturating_add(protocol_fee(deep_borrowed, protocol_fee_rate, stable_per_deep))
}

/// Plan the fee with the default protocol fee rate.
pub fn get_fee_plan(
    use_reserve: bool,
    deep_borrowed: u64,
    pool_whitelisted: bool,
    stable_per_deep: u64,
    wallet_settlement: u64,
    balance_manager_settlement: u64,
) -> FeePlan {
    get_fee_plan_with_config(
        &FeeConfig::default(),
        use_reserve,
        deep_borrowed,
        pool_whitelisted,
        stable_per_deep,
        wallet_settlement,
        balance_manager_settlement,
    )
}

/// Plan the fee, draining the balance-manager before the wallet.
pub fn get_fee_plan_with_config(
    config: &FeeConfig,
    use_reserve: bool,
    deep_borrowed: u64,
    pool_whitelisted: bool,
    stable_per_deep: u64,
    wallet_settlement: u64,
    balance_manager_settlement: u64,
) -> FeePlan {
    if pool_whitelisted || !use_reserve {
        return FeePlan::ZERO;
    }

    let amount = reserve_coverage_fee(deep_borrowed, stable_per_deep, config.protocol_fee_rate);
    let plan = allocate_fee(amount, wallet_settlement, balance_manager_settlement);
    debug!(
        deep_borrowed,
        stable_per_deep,
        amount,
        from_balance_manager = plan.from_balance_manager,
        from_wallet = plan.from_wallet,
        sufficient = plan.sufficient,
        "fee plan"
    );
    plan
}

fn allocate_fee(amount: u64, wallet: u64, balance_manager: u64) -> FeePlan {
    if balance_manager >= amount {
        return FeePlan {
            amount,
            from_wallet: 0,
            from_balance_manager: amount,
            sufficient: true,
        };
    }

    let remainder = amount - balance_manager;
    if wallet >= remainder {
        FeePlan {
            amount,
            from_wallet: remainder,
            from_balance_manager: balance_manager,
            sufficient: true,
        }
    } else {
        FeePlan {
            amount,
            from_wallet: 0,
            from_balance_manager: 0,
            sufficient: false,
        }
    }
}

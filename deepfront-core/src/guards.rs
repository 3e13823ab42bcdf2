//! Sufficiency and slippage guards.
//!
//! - `has_enough_input_coin`: cheap boolean probe mirroring the deposit planner.
//! - `validate_fees_against_max`: post-hoc ceiling check of realized DEEP and
//!   fee against caller estimates inflated by their tolerances.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{order_amount, OrderSide};
use crate::error::PlanError;
use crate::math::apply_slippage;
use crate::planner::deposit::allocate_deposit;
use crate::planner::reserve_coverage_fee;

/// True when balance-manager plus wallet can fund the order's principal.
pub fn has_enough_input_coin(
    side: OrderSide,
    quantity: u64,
    price: u64,
    balance_manager_input: u64,
    wallet_input: u64,
) -> bool {
    allocate_deposit(
        order_amount(side, quantity, price),
        balance_manager_input,
        wallet_input,
    )
    .sufficient
}

/// Caller-side cost estimate with tolerances in billionths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub deep_required: u64,
    #[serde(default)]
    pub deep_slippage: u64,
    pub fee: u64,
    #[serde(default)]
    pub fee_slippage: u64,
}

impl CostEstimate {
    pub fn max_deep_required(&self) -> u64 {
        apply_slippage(self.deep_required, self.deep_slippage)
    }

    pub fn max_fee(&self) -> u64 {
        apply_slippage(self.fee, self.fee_slippage)
    }
}

/// Reject realized costs above the caller's declared ceiling.
///
/// The DEEP ceiling is checked before the fee ceiling. With no reserve draw
/// there is no fee, so the fee check is skipped.
pub fn validate_fees_against_max(
    actual_deep_required: u64,
    deep_from_reserve: u64,
    protocol_fee_rate: u64,
    stable_per_deep: u64,
    estimate: &CostEstimate,
) -> Result<(), PlanError> {
    let max_deep = estimate.max_deep_required();
    if actual_deep_required > max_deep {
        warn!(actual_deep_required, max_deep, "DEEP requirement above ceiling");
        return Err(PlanError::DeepRequiredExceedsMax {
            actual: actual_deep_required,
            max: max_deep,
        });
    }

    if deep_from_reserve == 0 {
        return Ok(());
    }

    let actual_fee = reserve_coverage_fee(deep_from_reserve, stable_per_deep, protocol_fee_rate);
    let max_fee = estimate.max_fee();
    if actual_fee > max_fee {
        warn!(actual_fee, max_fee, deep_from_reserve, "coverage fee above ceiling");
        return Err(PlanError::FeeExceedsMax {
            actual: actual_fee,
            max: max_fee,
        });
    }

    Ok(())
}

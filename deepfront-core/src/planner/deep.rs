//! DEEP requirement planner.
//!
//! Decides how much of an order's DEEP requirement the trader supplies and
//! how much is borrowed from the protocol reserve.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Where the DEEP for one order comes from.
///
/// `from_wallet` is what must move from the wallet into the balance-manager;
/// whatever the balance-manager already holds is consumed in place and not
/// tracked here. When `sufficient` is false both draws are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeepPlan {
    pub use_reserve: bool,
    pub from_wallet: u64,
    pub from_reserve: u64,
    pub sufficient: bool,
}

impl DeepPlan {
    /// Nothing to source: whitelisted pool or zero requirement.
    pub const EXEMPT: DeepPlan = DeepPlan {
        use_reserve: false,
        from_wallet: 0,
        from_reserve: 0,
        sufficient: true,
    };

    /// Reserve cannot cover the shortfall.
    pub const INSUFFICIENT: DeepPlan = DeepPlan {
        use_reserve: true,
        from_wallet: 0,
        from_reserve: 0,
        sufficient: false,
    };
}

/// Plan the DEEP sourcing for one order.
///
/// Trader funds are used first (balance-manager before wallet); only the
/// remaining deficit is borrowed. Total for every input, never aborts.
pub fn determine_deep_requirements(
    total_required: u64,
    pool_whitelisted: bool,
    balance_manager_deep: u64,
    wallet_deep: u64,
    reserve_deep: u64,
) -> DeepPlan {
    if pool_whitelisted || total_required == 0 {
        debug!(total_required, pool_whitelisted, "deep requirement exempt");
        return DeepPlan::EXEMPT;
    }

    let user_owned = balance_manager_deep.saturating_add(wallet_deep);
    if user_owned >= total_required {
        let plan = DeepPlan {
            use_reserve: false,
            from_wallet: total_required.saturating_sub(balance_manager_deep),
            from_reserve: 0,
            sufficient: true,
        };
        debug!(total_required, from_wallet = plan.from_wallet, "deep covered by trader");
        return plan;
    }

    let deficit = total_required - user_owned;
    if reserve_deep >= deficit {
        debug!(total_required, deficit, reserve_deep, "deep borrowed from reserve");
        DeepPlan {
            use_reserve: true,
            from_wallet: wallet_deep,
            from_reserve: deficit,
            sufficient: true,
        }
    } else {
        debug!(total_required, deficit, reserve_deep, "reserve cannot cover deep deficit");
        DeepPlan::INSUFFICIENT
    }
}

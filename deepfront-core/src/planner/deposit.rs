//! Input-coin deposit planner.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{order_amount, OrderSide};

/// How much of the order's input coin must come from the wallet.
///
/// `amount_needed` is the order's principal regardless of the trader's funds.
/// `from_wallet` is zero unless wallet funds are actually required and
/// available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputCoinDepositPlan {
    pub amount_needed: u64,
    pub from_wallet: u64,
    pub sufficient: bool,
}

/// Plan the input-coin deposit against balance-manager funds first.
///
/// `balance_manager_input` must already exclude anything reserved for the fee
/// when the fee is paid in the same coin.
pub fn plan_input_coin_deposit(
    side: OrderSide,
    quantity: u64,
    price: u64,
    balance_manager_input: u64,
    wallet_input: u64,
) -> InputCoinDepositPlan {
    let amount_needed = order_amount(side, quantity, price);
    let plan = allocate_deposit(amount_needed, balance_manager_input, wallet_input);
    debug!(
        ?side,
        amount_needed,
        from_wallet = plan.from_wallet,
        sufficient = plan.sufficient,
        "input coin deposit plan"
    );
    plan
}

pub(crate) fn allocate_deposit(
    amount_needed: u64,
    balance_manager_input: u64,
    wallet_input: u64,
) -> InputCoinDepositPlan {
    if balance_manager_input >= amount_needed {
        return InputCoinDepositPlan {
            amount_needed,
            from_wallet: 0,
            sufficient: true,
        };
    }

    let deficit = amount_needed - balance_manager_input;
    if wallet_input >= deficit {
        InputCoinDepositPlan {
            amount_needed,
            from_wallet: deficit,
            sufficient: true,
        }
    } else {
        InputCoinDepositPlan {
            amount_needed,
            from_wallet: 0,
            sufficient: false,
        }
    }
}

//! Dry-run settlement: apply a committed plan to a balance snapshot.
//!
//! Models the transfers that happen before the order is placed:
//! - DEEP borrowed from the reserve and DEEP pulled from the wallet both land
//!   in the balance-manager.
//! - The fee is debited from the balance-manager and wallet settlement slots.
//! - The wallet share of the principal moves into the balance-manager.
//!
//! DEEP consumed by the exchange at placement is not modelled; the result is
//! the snapshot the order is placed against.

use std::fmt;

use deepfront_core::{BalanceSnapshot, Order, OrderPlan, RejectionReason};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// A single custody slot in a [`BalanceSnapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceSlot {
    WalletDeep,
    BalanceManagerDeep,
    WalletInput,
    BalanceManagerInput,
    WalletSettlement,
    BalanceManagerSettlement,
    ReserveDeep,
}

impl BalanceSlot {
    fn get_mut(self, balances: &mut BalanceSnapshot) -> &mut u64 {
        match self {
            BalanceSlot::WalletDeep => &mut balances.wallet_deep,
            BalanceSlot::BalanceManagerDeep => &mut balances.balance_manager_deep,
            BalanceSlot::WalletInput => &mut balances.wallet_input,
            BalanceSlot::BalanceManagerInput => &mut balances.balance_manager_input,
            BalanceSlot::WalletSettlement => &mut balances.wallet_settlement,
            BalanceSlot::BalanceManagerSettlement => &mut balances.balance_manager_settlement,
            BalanceSlot::ReserveDeep => &mut balances.reserve_deep,
        }
    }
}

impl fmt::Display for BalanceSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BalanceSlot::WalletDeep => "wallet_deep",
            BalanceSlot::BalanceManagerDeep => "balance_manager_deep",
            BalanceSlot::WalletInput => "wallet_input",
            BalanceSlot::BalanceManagerInput => "balance_manager_input",
            BalanceSlot::WalletSettlement => "wallet_settlement",
            BalanceSlot::BalanceManagerSettlement => "balance_manager_settlement",
            BalanceSlot::ReserveDeep => "reserve_deep",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum SettlementError {
    #[error("plan was rejected: {0}")]
    Rejected(RejectionReason),
    #[error("{slot} holds {available}, cannot debit {amount}")]
    Underflow {
        slot: BalanceSlot,
        amount: u64,
        available: u64,
    },
    #[error("{slot} overflows when credited {amount}")]
    Overflow { slot: BalanceSlot, amount: u64 },
}

/// Post-transfer state of a settled plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub balances: BalanceSnapshot,
    pub deep_borrowed: u64,
    pub fee_collected: u64,
    pub input_deposited: u64,
}

struct Ledger {
    balances: BalanceSnapshot,
}

impl Ledger {
    fn debit(&mut self, slot: BalanceSlot, amount: u64) -> Result<(), SettlementError> {
        let value = slot.get_mut(&mut self.balances);
        *value = value
            .checked_sub(amount)
            .ok_or(SettlementError::Underflow {
                slot,
                amount,
                available: *value,
            })?;
        Ok(())
    }

    fn credit(&mut self, slot: BalanceSlot, amount: u64) -> Result<(), SettlementError> {
        let value = slot.get_mut(&mut self.balances);
        *value = value
            .checked_add(amount)
            .ok_or(SettlementError::Overflow { slot, amount })?;
        Ok(())
    }

    fn transfer(
        &mut self,
        from: BalanceSlot,
        to: BalanceSlot,
        amount: u64,
    ) -> Result<(), SettlementError> {
        if amount == 0 {
            return Ok(());
        }
        self.debit(from, amount)?;
        self.credit(to, amount)
    }
}

/// Apply `plan` for `order` to `snapshot`, returning the new balances.
///
/// Rejected plans move nothing. When the order's input coin is also the fee
/// settlement unit, the input and settlement slots describe the same coin and
/// every movement is mirrored across both.
pub fn settle(
    snapshot: &BalanceSnapshot,
    order: &Order,
    plan: &OrderPlan,
) -> Result<Settlement, SettlementError> {
    if let Some(reason) = plan.rejection() {
        return Err(SettlementError::Rejected(reason));
    }

    use BalanceSlot::*;
    let shared = order.input_coin_pays_fee();
    let mut ledger = Ledger {
        balances: *snapshot,
    };

    ledger.transfer(ReserveDeep, BalanceManagerDeep, plan.deep.from_reserve)?;
    ledger.transfer(WalletDeep, BalanceManagerDeep, plan.deep.from_wallet)?;

    ledger.debit(BalanceManagerSettlement, plan.fee.from_balance_manager)?;
    ledger.debit(WalletSettlement, plan.fee.from_wallet)?;
    if shared {
        ledger.debit(BalanceManagerInput, plan.fee.from_balance_manager)?;
        ledger.debit(WalletInput, plan.fee.from_wallet)?;
    }

    ledger.transfer(WalletInput, BalanceManagerInput, plan.deposit.from_wallet)?;
    if shared {
        ledger.transfer(
            WalletSettlement,
            BalanceManagerSettlement,
            plan.deposit.from_wallet,
        )?;
    }

    let settlement = Settlement {
        balances: ledger.balances,
        deep_borrowed: plan.deep.from_reserve,
        fee_collected: plan
            .fee
            .from_balance_manager
            .saturating_add(plan.fee.from_wallet),
        input_deposited: plan.deposit.from_wallet,
    };
    debug!(
        deep_borrowed = settlement.deep_borrowed,
        fee_collected = settlement.fee_collected,
        input_deposited = settlement.input_deposited,
        shared,
        "plan settled"
    );
    Ok(settlement)
}

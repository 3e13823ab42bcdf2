//! Order orchestrator.
//!
//! Composes the DEEP, fee and deposit planners into one decision. Planning is
//! purely computational: nothing is committed until all three plans exist,
//! and the caller only moves assets for a [`OrderOutcome::Committed`] plan.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::PlannerConfig;
use crate::domain::{BalanceSnapshot, Order};

use super::deep::{determine_deep_requirements, DeepPlan};
use super::deposit::{plan_input_coin_deposit, InputCoinDepositPlan};
use super::fee::{get_fee_plan_with_config, FeePlan};

/// Why a plan cannot be executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectionReason {
    InsufficientDeep,
    InsufficientFee,
    InsufficientInputCoin,
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectionReason::InsufficientDeep => write!(f, "InsufficientDeep"),
            RejectionReason::InsufficientFee => write!(f, "InsufficientFee"),
            RejectionReason::InsufficientInputCoin => write!(f, "InsufficientInputCoin"),
        }
    }
}

/// The three plans for one order, in the order they were computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPlan {
    pub deep: DeepPlan,
    pub fee: FeePlan,
    pub deposit: InputCoinDepositPlan,
}

impl OrderPlan {
    /// First insufficient plan in DEEP → fee → deposit order.
    pub fn rejection(&self) -> Option<RejectionReason> {
        if !self.deep.sufficient {
            Some(RejectionReason::InsufficientDeep)
        } else if !self.fee.sufficient {
            Some(RejectionReason::InsufficientFee)
        } else if !self.deposit.sufficient {
            Some(RejectionReason::InsufficientInputCoin)
        } else {
            None
        }
    }

    pub fn is_committed(&self) -> bool {
        self.rejection().is_none()
    }

    pub fn into_outcome(self) -> OrderOutcome {
        match self.rejection() {
            None => OrderOutcome::Committed(self),
            Some(reason) => OrderOutcome::Rejected { reason, plan: self },
        }
    }
}

/// Terminal state of a planning pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OrderOutcome {
    /// All three plans are jointly satisfiable.
    Committed(OrderPlan),
    /// At least one plan is insufficient; the caller must not move assets.
    Rejected {
        reason: RejectionReason,
        plan: OrderPlan,
    },
}

impl OrderOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, OrderOutcome::Committed(_))
    }
}

/// Stateless planner bound to a configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderPlanner {
    config: PlannerConfig,
}

impl OrderPlanner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Run DEEP → fee → deposit planning for one order.
    ///
    /// `deep_required` comes from the exchange integration and
    /// `stable_per_deep` from a live price (billionths).
    pub fn plan(
        &self,
        order: &Order,
        balances: &BalanceSnapshot,
        deep_required: u64,
        stable_per_deep: u64,
    ) -> OrderPlan {
        let deep = determine_deep_requirements(
            deep_required,
            order.pool_whitelisted,
            balances.balance_manager_deep,
            balances.wallet_deep,
            balances.reserve_deep,
        );

        let fee = get_fee_plan_with_config(
            &self.config.fees,
            deep.use_reserve,
            deep.from_reserve,
            order.pool_whitelisted,
            stable_per_deep,
            balances.wallet_settlement,
            balances.balance_manager_settlement,
        );

        // The same coin cannot count toward both the fee and the principal.
        let (manager_input, wallet_input) = if order.input_coin_pays_fee() {
            (
                balances
                    .balance_manager_input
                    .saturating_sub(fee.from_balance_manager),
                balances.wallet_input.saturating_sub(fee.from_wallet),
            )
        } else {
            (balances.balance_manager_input, balances.wallet_input)
        };

        let deposit = plan_input_coin_deposit(
            order.side,
            order.quantity,
            order.price,
            manager_input,
            wallet_input,
        );

        let plan = OrderPlan { deep, fee, deposit };
        match plan.rejection() {
            None => debug!(
                side = ?order.side,
                deep_from_reserve = deep.from_reserve,
                fee = fee.amount,
                amount_needed = deposit.amount_needed,
                "order plan committed"
            ),
            Some(reason) => warn!(
                side = ?order.side,
                %reason,
                deep_required,
                fee = fee.amount,
                amount_needed = deposit.amount_needed,
                "order plan rejected"
            ),
        }
        plan
    }

    /// Same as [`OrderPlanner::plan`], folded into a terminal outcome.
    pub fn decide(
        &self,
        order: &Order,
        balances: &BalanceSnapshot,
        deep_required: u64,
        stable_per_deep: u64,
    ) -> OrderOutcome {
        self.plan(order, balances, deep_required, stable_per_deep)
            .into_outcome()
    }
}

/// Plan an order with the default configuration.
pub fn create_order_plan(
    order: &Order,
    balances: &BalanceSnapshot,
    deep_required: u64,
    stable_per_deep: u64,
) -> OrderPlan {
    OrderPlanner::default().plan(order, balances, deep_required, stable_per_deep)
}

//! Resource planners: DEEP sourcing, fee collection, input-coin deposit, and
//! the orchestrator that composes them.

pub mod deep;
pub mod deposit;
pub mod fee;
pub mod order;

pub use deep::{determine_deep_requirements, DeepPlan};
pub use deposit::{plan_input_coin_deposit, InputCoinDepositPlan};
pub use fee::{
    coverage_fee, get_fee_plan, get_fee_plan_with_config, protocol_fee, reserve_coverage_fee,
    FeePlan,
};
pub use order::{create_order_plan, OrderOutcome, OrderPlan, OrderPlanner, RejectionReason};

//! DeepFront Core: resource planning and fee allocation for orders placed
//! through the DEEP reserve.
//!
//! Everything here is a pure function of its inputs:
//! - Fixed-point arithmetic on a billionths scale
//! - DEEP requirement planner (trader funds first, reserve for the deficit)
//! - Fee collection planner (coverage + protocol fee, balance-manager first)
//! - Input-coin deposit planner
//! - Order orchestrator composing the three
//! - Sufficiency and slippage guards
//!
//! Callers execute asset transfers only for committed plans.

pub mod config;
pub mod domain;
pub mod error;
pub mod guards;
pub mod math;
pub mod planner;
pub mod price;
pub mod registry;

pub use config::{FeeConfig, PlannerConfig, PROTOCOL_FEE_RATE};
pub use domain::{BalanceSnapshot, FeeCoin, Order, OrderSide, PoolId};
pub use error::PlanError;
pub use guards::{has_enough_input_coin, validate_fees_against_max, CostEstimate};
pub use math::{apply_slippage, div_fixed, mul_fixed, MathError, SCALE};
pub use planner::{
    coverage_fee, create_order_plan, determine_deep_requirements, get_fee_plan,
    get_fee_plan_with_config, plan_input_coin_deposit, protocol_fee, reserve_coverage_fee,
    DeepPlan, FeePlan, InputCoinDepositPlan, OrderOutcome, OrderPlan, OrderPlanner,
    RejectionReason,
};
pub use price::{PriceFeed, PriceQuote};
pub use registry::WhitelistRegistry;

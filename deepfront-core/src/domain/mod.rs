//! Domain types shared by every planner.

pub mod balances;
pub mod ids;
pub mod order;

pub use balances::BalanceSnapshot;
pub use ids::PoolId;
pub use order::{order_amount, FeeCoin, Order, OrderSide};

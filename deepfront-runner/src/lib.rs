//! DeepFront Runner: scenario files, collaborators and batch planning.
//!
//! This crate builds on `deepfront-core` to provide:
//! - TOML/JSON scenario files with validation and fingerprinting
//! - In-memory whitelist registry and static price feed
//! - Dry-run settlement of committed plans against a balance snapshot
//! - Batch runner producing per-scenario reports and a summary

pub mod config;
pub mod price_feed;
pub mod runner;
pub mod settlement;
pub mod whitelist;

pub use config::{ConfigError, Scenario, ScenarioFile, EXAMPLE_TOML};
pub use price_feed::StaticPriceFeed;
pub use runner::{
    run_batch, BatchReport, BatchSummary, ScenarioReport, ScenarioRunner, ScenarioStatus,
    SCHEMA_VERSION,
};
pub use settlement::{settle, BalanceSlot, Settlement, SettlementError};
pub use whitelist::InMemoryWhitelist;

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn reports_are_send_sync() {
        assert_send::<BatchReport>();
        assert_sync::<BatchReport>();
        assert_send::<ScenarioFile>();
        assert_sync::<ScenarioFile>();
    }

    #[test]
    fn default_runner_is_send_sync() {
        assert_send::<ScenarioRunner>();
        assert_sync::<ScenarioRunner>();
    }
}

//! Batch scenario runner: plan, guard and dry-run settle every scenario.
//!
//! Entry points:
//! - `ScenarioRunner::run_scenario()`: one scenario against the runner's
//!   whitelist and price feed.
//! - `run_batch()`: every scenario in a file, plus a summary.

use deepfront_core::{
    validate_fees_against_max, MathError, Order, OrderPlan, OrderPlanner, PlanError,
    PlannerConfig, PoolId, PriceFeed, RejectionReason, WhitelistRegistry,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::{ConfigError, Scenario, ScenarioFile};
use crate::price_feed::StaticPriceFeed;
use crate::settlement::{settle, Settlement, SettlementError};
use crate::whitelist::InMemoryWhitelist;

/// Current schema version for serialized batch reports.
pub const SCHEMA_VERSION: u32 = 1;

/// How a single scenario ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScenarioStatus {
    Committed,
    Rejected { reason: RejectionReason },
    /// Realized DEEP or fee exceeded the scenario's cost estimate.
    GuardFailed { error: PlanError },
    /// The price could not be converted; nothing was planned.
    Aborted { error: MathError },
    /// The plan committed but could not be applied to the snapshot.
    SettlementFailed { error: SettlementError },
}

impl ScenarioStatus {
    pub fn is_committed(&self) -> bool {
        matches!(self, ScenarioStatus::Committed)
    }
}

/// Result of planning one scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub name: String,
    pub pool: PoolId,
    pub whitelisted: bool,
    pub status: ScenarioStatus,
    /// Settlement units per DEEP used for the fee, billionths.
    pub stable_per_deep: Option<u64>,
    pub plan: Option<OrderPlan>,
    /// Settlement units missing when the fee could not be covered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_shortfall: Option<u64>,
    pub settlement: Option<Settlement>,
}

/// Aggregate counts over a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub scenarios: usize,
    pub committed: usize,
    pub rejected: usize,
    pub guard_failures: usize,
    pub aborted: usize,
    pub settlement_failures: usize,
    /// Fees collected across committed scenarios, settlement units.
    pub total_fees: u64,
    /// DEEP borrowed from the reserve across committed scenarios.
    pub total_deep_borrowed: u64,
}

impl BatchSummary {
    fn record(&mut self, report: &ScenarioReport) {
        self.scenarios += 1;
        match report.status {
            ScenarioStatus::Committed => self.committed += 1,
            ScenarioStatus::Rejected { .. } => self.rejected += 1,
            ScenarioStatus::GuardFailed { .. } => self.guard_failures += 1,
            ScenarioStatus::Aborted { .. } => self.aborted += 1,
            ScenarioStatus::SettlementFailed { .. } => self.settlement_failures += 1,
        }
        if let Some(s) = &report.settlement {
            self.total_fees = self.total_fees.saturating_add(s.fee_collected);
            self.total_deep_borrowed = self.total_deep_borrowed.saturating_add(s.deep_borrowed);
        }
    }
}

/// Complete output of a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    /// BLAKE3 fingerprint of the scenario file that produced this report.
    pub fingerprint: String,
    pub summary: BatchSummary,
    pub reports: Vec<ScenarioReport>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl BatchReport {
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Planner bound to a whitelist and a price feed.
pub struct ScenarioRunner<W = InMemoryWhitelist, F = StaticPriceFeed> {
    planner: OrderPlanner,
    whitelist: W,
    feed: F,
}

impl ScenarioRunner {
    /// Build the default runner for a scenario file.
    pub fn from_file(file: &ScenarioFile) -> Self {
        Self::new(
            file.planner_config(),
            file.whitelist.iter().cloned().collect(),
            StaticPriceFeed::new(file.price),
        )
    }
}

impl<W: WhitelistRegistry, F: PriceFeed> ScenarioRunner<W, F> {
    pub fn new(config: PlannerConfig, whitelist: W, feed: F) -> Self {
        Self {
            planner: OrderPlanner::new(config),
            whitelist,
            feed,
        }
    }

    /// Plan one scenario.
    ///
    /// A guard failure takes precedence over an insufficient plan: the
    /// submission would abort before any sufficiency outcome is acted on.
    pub fn run_scenario(&self, scenario: &Scenario) -> ScenarioReport {
        let whitelisted = self.whitelist.is_whitelisted(&scenario.pool);
        let mut report = ScenarioReport {
            name: scenario.name.clone(),
            pool: scenario.pool.clone(),
            whitelisted,
            status: ScenarioStatus::Committed,
            stable_per_deep: None,
            plan: None,
            fee_shortfall: None,
            settlement: None,
        };

        let price = match scenario.quote {
            Some(quote) => quote.stable_per_deep(),
            None => self.feed.stable_per_deep(),
        };
        let stable_per_deep = match price {
            Ok(p) => p,
            Err(error) => {
                warn!(scenario = %scenario.name, %error, "price conversion failed");
                report.status = ScenarioStatus::Aborted { error };
                return report;
            }
        };
        report.stable_per_deep = Some(stable_per_deep);

        let order = Order::new(scenario.side, scenario.quantity, scenario.price)
            .whitelisted(whitelisted)
            .with_fee_coin(scenario.fee_coin);
        let plan = self.planner.plan(
            &order,
            &scenario.balances,
            scenario.deep_required,
            stable_per_deep,
        );
        report.plan = Some(plan);

        // Whitelisted pools owe no DEEP, so there is nothing to hold to the ceiling.
        let actual_deep_required = if whitelisted {
            0
        } else {
            scenario.deep_required
        };
        if let Some(estimate) = &scenario.estimate {
            if let Err(error) = validate_fees_against_max(
                actual_deep_required,
                plan.deep.from_reserve,
                self.planner.config().fees.protocol_fee_rate,
                stable_per_deep,
                estimate,
            ) {
                warn!(scenario = %scenario.name, %error, "cost guard failed");
                report.status = ScenarioStatus::GuardFailed { error };
                return report;
            }
        }

        if let Some(reason) = plan.rejection() {
            if reason == RejectionReason::InsufficientFee {
                report.fee_shortfall = Some(plan.fee.shortfall(
                    scenario.balances.wallet_settlement,
                    scenario.balances.balance_manager_settlement,
                ));
            }
            info!(
                scenario = %scenario.name,
                %reason,
                fee_shortfall = ?report.fee_shortfall,
                "scenario rejected"
            );
            report.status = ScenarioStatus::Rejected { reason };
            return report;
        }

        match settle(&scenario.balances, &order, &plan) {
            Ok(settlement) => {
                info!(
                    scenario = %scenario.name,
                    deep_borrowed = settlement.deep_borrowed,
                    fee = settlement.fee_collected,
                    deposited = settlement.input_deposited,
                    "scenario committed"
                );
                report.settlement = Some(settlement);
            }
            Err(error) => {
                warn!(scenario = %scenario.name, %error, "settlement failed");
                report.status = ScenarioStatus::SettlementFailed { error };
            }
        }
        report
    }

    /// Plan every scenario in order.
    pub fn run_all(&self, scenarios: &[Scenario]) -> (Vec<ScenarioReport>, BatchSummary) {
        let mut summary = BatchSummary::default();
        let reports: Vec<ScenarioReport> = scenarios
            .iter()
            .map(|s| {
                let report = self.run_scenario(s);
                summary.record(&report);
                report
            })
            .collect();
        (reports, summary)
    }
}

/// Validate `file` and run every scenario with the default runner.
pub fn run_batch(file: &ScenarioFile) -> Result<BatchReport, ConfigError> {
    file.validate()?;
    let fingerprint = file.fingerprint()?;
    let runner = ScenarioRunner::from_file(file);
    let (reports, summary) = runner.run_all(&file.scenarios);
    info!(
        fingerprint = %fingerprint,
        scenarios = summary.scenarios,
        committed = summary.committed,
        rejected = summary.rejected,
        guard_failures = summary.guard_failures,
        "batch complete"
    );
    Ok(BatchReport {
        schema_version: SCHEMA_VERSION,
        fingerprint,
        summary,
        reports,
    })
}

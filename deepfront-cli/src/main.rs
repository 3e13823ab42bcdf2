//! DeepFront CLI: plan scenario files and check fee ceilings.
//!
//! Commands:
//! - `plan`: plan, guard and dry-run settle every scenario in a TOML/JSON file
//! - `check-fees`: compare a realized DEEP requirement and reserve draw
//!   against a cost estimate
//! - `example`: print a sample scenario file

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use deepfront_core::{
    reserve_coverage_fee, validate_fees_against_max, CostEstimate, PROTOCOL_FEE_RATE, SCALE,
};
use deepfront_runner::{
    run_batch, BatchReport, ScenarioFile, ScenarioReport, ScenarioStatus, EXAMPLE_TOML,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "deepfront",
    about = "DeepFront CLI: DEEP reserve planning and fee allocation"
)]
struct Cli {
    /// Log filter (e.g. `debug`, `deepfront_core=debug`). Overrides RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan every scenario in a scenario file.
    Plan {
        /// Path to a `.toml` or `.json` scenario file.
        #[arg(long)]
        config: PathBuf,

        /// Only run the scenario with this name.
        #[arg(long)]
        scenario: Option<String>,

        /// Print the full report as JSON instead of a summary.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Also write the JSON report to this file.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Exit non-zero unless every scenario commits.
        #[arg(long, default_value_t = false)]
        strict: bool,
    },
    /// Check realized costs against a cost estimate. Amounts are raw units,
    /// prices and tolerances are billionths.
    CheckFees {
        /// DEEP the exchange actually requires.
        #[arg(long)]
        deep_required: u64,

        /// DEEP that would be borrowed from the reserve.
        #[arg(long, default_value_t = 0)]
        deep_from_reserve: u64,

        /// Settlement units per DEEP.
        #[arg(long)]
        stable_per_deep: u64,

        /// Protocol surcharge on borrowed DEEP.
        #[arg(long, default_value_t = PROTOCOL_FEE_RATE)]
        protocol_fee_rate: u64,

        /// Estimated DEEP requirement.
        #[arg(long)]
        estimate_deep: u64,

        /// Tolerance on the DEEP estimate.
        #[arg(long, default_value_t = 0)]
        deep_slippage: u64,

        /// Estimated coverage fee.
        #[arg(long, default_value_t = 0)]
        estimate_fee: u64,

        /// Tolerance on the fee estimate.
        #[arg(long, default_value_t = 0)]
        fee_slippage: u64,
    },
    /// Print a sample scenario file.
    Example,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref())?;

    match cli.command {
        Commands::Plan {
            config,
            scenario,
            json,
            output,
            strict,
        } => run_plan(config, scenario, json, output, strict),
        Commands::CheckFees {
            deep_required,
            deep_from_reserve,
            stable_per_deep,
            protocol_fee_rate,
            estimate_deep,
            deep_slippage,
            estimate_fee,
            fee_slippage,
        } => run_check_fees(
            deep_required,
            deep_from_reserve,
            stable_per_deep,
            protocol_fee_rate,
            CostEstimate {
                deep_required: estimate_deep,
                deep_slippage,
                fee: estimate_fee,
                fee_slippage,
            },
        ),
        Commands::Example => {
            print!("{EXAMPLE_TOML}");
            Ok(())
        }
    }
}

fn init_tracing(level: Option<&str>) -> Result<()> {
    let filter = match level {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("invalid --log-level '{directives}'"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn run_plan(
    config_path: PathBuf,
    only: Option<String>,
    json: bool,
    output: Option<PathBuf>,
    strict: bool,
) -> Result<()> {
    let mut file = ScenarioFile::from_file(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    if let Some(name) = only {
        if file.scenario(&name).is_none() {
            bail!("no scenario named '{name}' in {}", config_path.display());
        }
        file.scenarios.retain(|s| s.name == name);
    }

    let batch = run_batch(&file)?;
    let rendered = batch.to_json_pretty()?;

    if let Some(path) = &output {
        std::fs::write(path, &rendered)
            .with_context(|| format!("writing report to {}", path.display()))?;
        info!(path = %path.display(), "report written");
    }

    if json {
        println!("{rendered}");
    } else {
        print_summary(&batch);
    }

    if strict && batch.summary.committed != batch.summary.scenarios {
        bail!(
            "{} of {} scenarios did not commit",
            batch.summary.scenarios - batch.summary.committed,
            batch.summary.scenarios
        );
    }
    Ok(())
}

fn run_check_fees(
    deep_required: u64,
    deep_from_reserve: u64,
    stable_per_deep: u64,
    protocol_fee_rate: u64,
    estimate: CostEstimate,
) -> Result<()> {
    if stable_per_deep == 0 {
        bail!("--stable-per-deep must be non-zero");
    }
    if deep_from_reserve > deep_required {
        bail!("--deep-from-reserve cannot exceed --deep-required");
    }

    let fee = reserve_coverage_fee(deep_from_reserve, stable_per_deep, protocol_fee_rate);
    println!("DEEP required:  {deep_required} (max {})", estimate.max_deep_required());
    println!("Reserve draw:   {deep_from_reserve}");
    println!("Coverage fee:   {fee} (max {})", estimate.max_fee());
    println!(
        "DEEP price:     {}.{:09}",
        stable_per_deep / SCALE,
        stable_per_deep % SCALE
    );

    validate_fees_against_max(
        deep_required,
        deep_from_reserve,
        protocol_fee_rate,
        stable_per_deep,
        &estimate,
    )?;
    println!("OK: within estimate");
    Ok(())
}

fn print_summary(batch: &BatchReport) {
    println!();
    println!("=== Batch Result ===");
    println!("Fingerprint:    {}", batch.fingerprint);
    println!("Scenarios:      {}", batch.summary.scenarios);
    println!("Committed:      {}", batch.summary.committed);
    println!("Rejected:       {}", batch.summary.rejected);
    println!("Guard failures: {}", batch.summary.guard_failures);
    println!("Aborted:        {}", batch.summary.aborted);
    if batch.summary.settlement_failures > 0 {
        println!("Settle errors:  {}", batch.summary.settlement_failures);
    }
    println!("DEEP borrowed:  {}", batch.summary.total_deep_borrowed);
    println!("Fees collected: {}", batch.summary.total_fees);
    println!();
    println!("--- Scenarios ---");
    for report in &batch.reports {
        println!("{}", describe(report));
    }
}

fn describe(report: &ScenarioReport) -> String {
    let outcome = match &report.status {
        ScenarioStatus::Committed => match &report.settlement {
            Some(s) => format!(
                "committed  borrowed={} fee={} deposited={}",
                s.deep_borrowed, s.fee_collected, s.input_deposited
            ),
            None => "committed".to_string(),
        },
        ScenarioStatus::Rejected { reason } => match report.fee_shortfall {
            Some(shortfall) => format!("rejected   {reason} shortfall={shortfall}"),
            None => format!("rejected   {reason}"),
        },
        ScenarioStatus::GuardFailed { error } => format!("guard      {error}"),
        ScenarioStatus::Aborted { error } => format!("aborted    {error}"),
        ScenarioStatus::SettlementFailed { error } => format!("settlement {error}"),
    };
    let pool = if report.whitelisted {
        format!("{} (whitelisted)", report.pool)
    } else {
        report.pool.to_string()
    };
    format!("{:<28} {:<24} {outcome}", report.name, pool)
}

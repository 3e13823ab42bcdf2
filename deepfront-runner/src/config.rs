//! Scenario files: the serializable input to a batch planning run.
//!
//! A scenario file carries the fee parameters, the pool whitelist, the
//! DEEP/settlement price and a list of orders with their balance snapshots.
//! TOML is the primary format; `.json` files are accepted by extension.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use deepfront_core::{
    BalanceSnapshot, CostEstimate, FeeCoin, FeeConfig, MathError, OrderSide, PlannerConfig,
    PoolId, PriceQuote,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read scenario file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse scenario TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("scenario JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported scenario file extension: {0}")]
    UnsupportedFormat(PathBuf),
    #[error("scenario '{name}': order price must be non-zero")]
    ZeroOrderPrice { name: String },
    #[error("duplicate scenario name '{0}'")]
    DuplicateScenario(String),
    #[error("{context}: invalid price quote: {source}")]
    InvalidQuote {
        context: String,
        #[source]
        source: MathError,
    },
}

/// One order to plan, with the balances observed when it was submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub pool: PoolId,
    pub side: OrderSide,
    /// Base-asset units.
    pub quantity: u64,
    /// Quote per base, billionths.
    pub price: u64,
    #[serde(default)]
    pub fee_coin: FeeCoin,
    /// DEEP the exchange requires for this order.
    #[serde(default)]
    pub deep_required: u64,
    #[serde(default)]
    pub balances: BalanceSnapshot,
    /// Overrides the file-level price for this scenario only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<PriceQuote>,
    /// When present, realized DEEP and fee are checked against it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimate: Option<CostEstimate>,
}

/// Top-level scenario file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioFile {
    #[serde(default)]
    pub fees: FeeConfig,
    #[serde(default)]
    pub whitelist: Vec<PoolId>,
    pub price: PriceQuote,
    #[serde(rename = "scenario", default)]
    pub scenarios: Vec<Scenario>,
}

impl ScenarioFile {
    /// Load and validate a scenario file. `.json` is parsed as JSON,
    /// `.toml` (or no extension) as TOML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content),
            Some("toml") | None => Self::from_toml(&content),
            Some(_) => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let file: ScenarioFile = toml::from_str(content)?;
        file.validate()?;
        Ok(file)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let file: ScenarioFile = serde_json::from_str(content)?;
        file.validate()?;
        Ok(file)
    }

    /// Reject inputs the planner treats as precondition violations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.price
            .stable_per_deep()
            .map_err(|source| ConfigError::InvalidQuote {
                context: "[price]".to_string(),
                source,
            })?;

        let mut seen = HashSet::new();
        for scenario in &self.scenarios {
            if !seen.insert(scenario.name.as_str()) {
                return Err(ConfigError::DuplicateScenario(scenario.name.clone()));
            }
            if scenario.price == 0 {
                return Err(ConfigError::ZeroOrderPrice {
                    name: scenario.name.clone(),
                });
            }
            if let Some(quote) = &scenario.quote {
                quote
                    .stable_per_deep()
                    .map_err(|source| ConfigError::InvalidQuote {
                        context: format!("scenario '{}'", scenario.name),
                        source,
                    })?;
            }
        }
        Ok(())
    }

    pub fn planner_config(&self) -> PlannerConfig {
        PlannerConfig { fees: self.fees }
    }

    pub fn scenario(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.name == name)
    }

    /// Deterministic BLAKE3 hash of the canonical JSON form.
    ///
    /// Two files that parse to the same content share a fingerprint regardless
    /// of format, key order or whitespace.
    pub fn fingerprint(&self) -> Result<String, ConfigError> {
        let json = serde_json::to_string(self)?;
        Ok(blake3::hash(json.as_bytes()).to_hex().to_string())
    }
}

/// A commented sample file, printed by `deepfront example`.
pub const EXAMPLE_TOML: &str = r#"# Pools exempt from the DEEP requirement.
whitelist = ["0xwhitelisted"]

# Fee parameters (billionths). 10_000_000 = 1%.
[fees]
protocol_fee_rate = 10_000_000

# Settlement units per DEEP, billionths.
[price]
kind = "direct"
stable_per_deep = 37_815_000

[[scenario]]
name = "bid-borrows-from-reserve"
pool = "0xsui_usdc"
side = "bid"
quantity = 10_000
price = 2_500_000_000
deep_required = 200_000
fee_coin = "quote"

[scenario.balances]
wallet_deep = 50_000
balance_manager_deep = 0
reserve_deep = 1_000_000
wallet_input = 40_000
balance_manager_input = 0
wallet_settlement = 40_000
balance_manager_settlement = 0

[scenario.estimate]
deep_required = 200_000
deep_slippage = 50_000_000
fee = 6_000
fee_slippage = 100_000_000

[[scenario]]
name = "ask-on-whitelisted-pool"
pool = "0xwhitelisted"
side = "ask"
quantity = 500
price = 1_000_000_000
deep_required = 10_000

[scenario.balances]
balance_manager_input = 200
wallet_input = 300
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use deepfront_core::SCALE;

    fn minimal(scenarios: &str) -> String {
        format!(
            r#"
[price]
kind = "direct"
stable_per_deep = 1_000_000_000
{scenarios}
"#
        )
    }

    #[test]
    fn example_parses_and_validates() {
        let file = ScenarioFile::from_toml(EXAMPLE_TOML).unwrap();
        assert_eq!(file.fees.protocol_fee_rate, 10_000_000);
        assert_eq!(file.whitelist, vec![PoolId::from("0xwhitelisted")]);
        assert_eq!(file.scenarios.len(), 2);

        let bid = file.scenario("bid-borrows-from-reserve").unwrap();
        assert_eq!(bid.side, OrderSide::Bid);
        assert_eq!(bid.fee_coin, FeeCoin::Quote);
        assert_eq!(bid.balances.reserve_deep, 1_000_000);
        assert_eq!(bid.estimate.unwrap().fee, 6_000);

        let ask = file.scenario("ask-on-whitelisted-pool").unwrap();
        assert_eq!(ask.fee_coin, FeeCoin::Distinct);
        assert_eq!(ask.balances.wallet_deep, 0);
        assert!(ask.estimate.is_none());
    }

    #[test]
    fn fees_default_when_table_missing() {
        let file = ScenarioFile::from_toml(&minimal("")).unwrap();
        assert_eq!(file.fees, FeeConfig::default());
        assert!(file.whitelist.is_empty());
        assert!(file.scenarios.is_empty());
    }

    #[test]
    fn zero_file_price_rejected() {
        let toml = r#"
[price]
kind = "inverted"
deep_per_stable = 0
"#;
        let err = ScenarioFile::from_toml(toml).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidQuote {
                source: MathError::DivisionByZero,
                ..
            }
        ));
    }

    #[test]
    fn zero_scenario_quote_rejected() {
        let toml = minimal(
            r#"
[[scenario]]
name = "a"
pool = "0x1"
side = "bid"
quantity = 1
price = 1
quote = { kind = "cross", deep_usd = 1, stable_usd = 0 }
"#,
        );
        let err = ScenarioFile::from_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("scenario 'a'"));
    }

    #[test]
    fn zero_order_price_rejected() {
        let toml = minimal(
            r#"
[[scenario]]
name = "free"
pool = "0x1"
side = "ask"
quantity = 1
price = 0
"#,
        );
        assert!(matches!(
            ScenarioFile::from_toml(&toml),
            Err(ConfigError::ZeroOrderPrice { name }) if name == "free"
        ));
    }

    #[test]
    fn duplicate_names_rejected() {
        let one = r#"
[[scenario]]
name = "dup"
pool = "0x1"
side = "ask"
quantity = 1
price = 1
"#;
        let toml = minimal(&format!("{one}{one}"));
        assert!(matches!(
            ScenarioFile::from_toml(&toml),
            Err(ConfigError::DuplicateScenario(name)) if name == "dup"
        ));
    }

    #[test]
    fn json_and_toml_share_fingerprint() {
        let from_toml = ScenarioFile::from_toml(EXAMPLE_TOML).unwrap();
        let json = serde_json::to_string_pretty(&from_toml).unwrap();
        let from_json = ScenarioFile::from_json(&json).unwrap();
        assert_eq!(from_toml, from_json);
        assert_eq!(
            from_toml.fingerprint().unwrap(),
            from_json.fingerprint().unwrap()
        );
    }

    #[test]
    fn fingerprint_tracks_content() {
        let a = ScenarioFile::from_toml(EXAMPLE_TOML).unwrap();
        let mut b = a.clone();
        b.fees.protocol_fee_rate = 0;
        assert_eq!(a.fingerprint().unwrap().len(), 64);
        assert_ne!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
    }

    #[test]
    fn planner_config_carries_fee_rate() {
        let mut file = ScenarioFile::from_toml(&minimal("")).unwrap();
        file.fees.protocol_fee_rate = SCALE / 50;
        assert_eq!(file.planner_config().fees.protocol_fee_rate, 20_000_000);
    }
}

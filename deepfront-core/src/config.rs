//! Planner configuration.

use serde::{Deserialize, Serialize};

/// Protocol surcharge on borrowed DEEP, billionths (1%).
pub const PROTOCOL_FEE_RATE: u64 = 10_000_000;

/// Fee parameters for reserve coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeConfig {
    /// Surcharge applied to the borrowed DEEP amount before pricing it, billionths.
    #[serde(default = "default_protocol_fee_rate")]
    pub protocol_fee_rate: u64,
}

fn default_protocol_fee_rate() -> u64 {
    PROTOCOL_FEE_RATE
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            protocol_fee_rate: PROTOCOL_FEE_RATE,
        }
    }
}

/// Everything the order planner is parameterized on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default)]
    pub fees: FeeConfig,
}

impl PlannerConfig {
    pub fn with_protocol_fee_rate(rate: u64) -> Self {
        Self {
            fees: FeeConfig {
                protocol_fee_rate: rate,
            },
        }
    }
}

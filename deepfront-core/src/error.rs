use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::math::MathError;

/// Fatal precondition violations. The whole order submission aborts on any of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum PlanError {
    #[error("math error: {0}")]
    Math(#[from] MathError),
    #[error("DEEP required {actual} exceeds maximum {max}")]
    DeepRequiredExceedsMax { actual: u64, max: u64 },
    #[error("reserve coverage fee {actual} exceeds maximum {max}")]
    FeeExceedsMax { actual: u64, max: u64 },
}

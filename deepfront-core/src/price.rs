//! DEEP price in settlement units.
//!
//! The fee planner needs `stable_per_deep` in billionths. Price sources quote
//! it directly, inverted, or as two prices against a common unit.

use serde::{Deserialize, Serialize};

use crate::math::{div_fixed, MathError, SCALE};

/// A raw price observation for the DEEP/settlement pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PriceQuote {
    /// Settlement units per DEEP.
    Direct { stable_per_deep: u64 },
    /// DEEP per settlement unit, e.g. from a SETTLEMENT/DEEP pool.
    Inverted { deep_per_stable: u64 },
    /// Both assets priced in a common unit such as USD.
    Cross { deep_usd: u64, stable_usd: u64 },
}

impl PriceQuote {
    /// Settlement units per DEEP, billionths. Zero rates are precondition violations.
    pub fn stable_per_deep(&self) -> Result<u64, MathError> {
        match *self {
            PriceQuote::Direct { stable_per_deep } => {
                if stable_per_deep == 0 {
                    Err(MathError::DivisionByZero)
                } else {
                    Ok(stable_per_deep)
                }
            }
            PriceQuote::Inverted { deep_per_stable } => div_fixed(SCALE, deep_per_stable),
            PriceQuote::Cross {
                deep_usd,
                stable_usd,
            } => div_fixed(deep_usd, stable_usd),
        }
    }
}

/// Live source of the DEEP/settlement exchange rate.
pub trait PriceFeed: Send + Sync {
    fn quote(&self) -> PriceQuote;

    fn stable_per_deep(&self) -> Result<u64, MathError> {
        self.quote().stable_per_deep()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_passes_through() {
        let q = PriceQuote::Direct {
            stable_per_deep: 37_815_000_000,
        };
        assert_eq!(q.stable_per_deep().unwrap(), 37_815_000_000);
    }

    #[test]
    fn inverted_is_reciprocal() {
        let q = PriceQuote::Inverted {
            deep_per_stable: 4 * SCALE,
        };
        assert_eq!(q.stable_per_deep().unwrap(), 250_000_000);
    }

    #[test]
    fn cross_rate() {
        // DEEP at $0.15, settlement unit at $3.00 -> 0.05 per DEEP.
        let q = PriceQuote::Cross {
            deep_usd: 150_000_000,
            stable_usd: 3 * SCALE,
        };
        assert_eq!(q.stable_per_deep().unwrap(), 50_000_000);
    }

    #[test]
    fn zero_rates_are_rejected() {
        let zero = [
            PriceQuote::Direct { stable_per_deep: 0 },
            PriceQuote::Inverted { deep_per_stable: 0 },
            PriceQuote::Cross {
                deep_usd: SCALE,
                stable_usd: 0,
            },
        ];
        for q in zero {
            assert_eq!(q.stable_per_deep(), Err(MathError::DivisionByZero));
        }
    }

    #[test]
    fn feed_default_method_uses_quote() {
        struct Fixed;
        impl PriceFeed for Fixed {
            fn quote(&self) -> PriceQuote {
                PriceQuote::Inverted {
                    deep_per_stable: 2 * SCALE,
                }
            }
        }
        assert_eq!(Fixed.stable_per_deep().unwrap(), 500_000_000);
    }
}

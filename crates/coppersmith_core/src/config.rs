//! Tunable parameters for reduction, elimination and root search
//!
//! Lattice multiplicities (m, t, tx, ty) are not here: they are per-call
//! arguments of the drivers. These structs hold the knobs that are usually
//! left at their defaults.

use crate::error::{CoppersmithError, CoppersmithResult};
use crate::rational::Rational;

/// LLL configuration parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LLLConfig {
    /// Lovász parameter δ (default 3/4).
    /// Must satisfy 1/4 < δ ≤ 1. Higher values give better reduction but run longer.
    pub delta: Rational,
}

impl Default for LLLConfig {
    fn default() -> Self {
        Self {
            delta: Rational::ratio(3, 4),
        }
    }
}

impl LLLConfig {
    /// δ = 99/100 (strong reduction)
    pub fn strong() -> Self {
        Self {
            delta: Rational::ratio(99, 100),
        }
    }

    /// δ = 1/2 (fast but weaker reduction)
    pub fn fast() -> Self {
        Self {
            delta: Rational::ratio(1, 2),
        }
    }

    pub fn with_delta(delta: Rational) -> CoppersmithResult<Self> {
        let config = Self { delta };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CoppersmithResult<()> {
        if self.delta <= Rational::ratio(1, 4) || self.delta > Rational::one() {
            return Err(CoppersmithError::InvalidDelta(self.delta.clone()));
        }
        Ok(())
    }
}

/// Sampling parameters for resultant-by-interpolation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EliminationConfig {
    /// Sample points are drawn from [-(X + margin), X + margin].
    pub window_margin: u64,
}

impl Default for EliminationConfig {
    fn default() -> Self {
        Self { window_margin: 3 }
    }
}

/// Everything the small-root drivers need beyond the lattice multiplicities
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub lll: LLLConfig,
    /// How many of the shortest reduced rows the univariate driver scans
    pub candidate_rows: usize,
    pub elimination: EliminationConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            lll: LLLConfig::default(),
            candidate_rows: 12,
            elimination: EliminationConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(LLLConfig::default().validate().is_ok());
        assert!(LLLConfig::strong().validate().is_ok());
        assert!(LLLConfig::fast().validate().is_ok());
        assert!(LLLConfig::with_delta(Rational::one()).is_ok());
    }

    #[test]
    fn test_delta_bounds() {
        assert_eq!(
            LLLConfig::with_delta(Rational::ratio(1, 4)),
            Err(CoppersmithError::InvalidDelta(Rational::ratio(1, 4)))
        );
        assert!(LLLConfig::with_delta(Rational::ratio(5, 4)).is_err());
        assert!(LLLConfig::with_delta(Rational::ratio(-3, 4)).is_err());
    }

    #[test]
    fn test_search_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.candidate_rows, 12);
        assert_eq!(config.elimination.window_margin, 3);
        assert_eq!(config.lll.delta, Rational::ratio(3, 4));
    }
}

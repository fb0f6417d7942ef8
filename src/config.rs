//! Benchmark configuration.
//!
//! All parameters are fixed constants grouped into two profiles. The process
//! takes no arguments; a handful of environment variables pick the profile,
//! the seed and the counter source.

use std::env;
use std::fmt;

use crate::error::{contract_violation, invalid_config, Result};
use crate::strategy::{Strategy, SCALAR, SIMD2X1_NO_ALIGN, SIMD8X1_NO_ALIGN, SIMD8X4_NO_ALIGN};

/// Number of values summed by every strategy.
pub const ELEMENT_COUNT: usize = 64 * 1024;

/// Largest accepted absolute difference between a strategy's result and the reference sum.
pub const TOLERANCE: f64 = 0.001;

pub const DEFAULT_SEED: u64 = 42;

pub const PROFILE_VAR: &str = "SUMBENCH_PROFILE";
pub const SEED_VAR: &str = "SUMBENCH_SEED";
pub const COUNTER_VAR: &str = "SUMBENCH_COUNTER";

/// Repetition count and strategy roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    /// 10,000 repetitions of every strategy.
    #[default]
    Full,
    /// 1,000 repetitions of the scalar and width-8 strategies.
    Quick,
}

impl Profile {
    pub fn repetitions(self) -> usize {
        match self {
            Profile::Full => 10_000,
            Profile::Quick => 1_000,
        }
    }

    pub fn roster(self) -> Vec<Strategy> {
        match self {
            Profile::Full => vec![SCALAR, SIMD2X1_NO_ALIGN, SIMD8X1_NO_ALIGN, SIMD8X4_NO_ALIGN],
            Profile::Quick => vec![SCALAR, SIMD8X1_NO_ALIGN, SIMD8X4_NO_ALIGN],
        }
    }

    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(Profile::Full),
            "quick" => Ok(Profile::Quick),
            _ => Err(invalid_config(PROFILE_VAR, value, "expected `full` or `quick`")),
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profile::Full => f.write_str("full"),
            Profile::Quick => f.write_str("quick"),
        }
    }
}

/// Source of the cycle counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CounterKind {
    /// Hardware cycles of the process ([`crate::timer::ProcessCycles`]).
    #[default]
    Cycles,
    /// Process CPU time in nanoseconds ([`crate::timer::ProcessCpuTime`]).
    CpuTime,
}

impl CounterKind {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "cycles" => Ok(CounterKind::Cycles),
            "cpu-time" | "cpu_time" => Ok(CounterKind::CpuTime),
            _ => Err(invalid_config(COUNTER_VAR, value, "expected `cycles` or `cpu-time`")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BenchConfig {
    pub profile: Profile,
    pub element_count: usize,
    pub repetitions: usize,
    pub tolerance: f64,
    pub seed: u64,
    pub counter: CounterKind,
    pub strategies: Vec<Strategy>,
}

impl BenchConfig {
    pub fn for_profile(profile: Profile) -> Self {
        Self {
            profile,
            element_count: ELEMENT_COUNT,
            repetitions: profile.repetitions(),
            tolerance: TOLERANCE,
            seed: DEFAULT_SEED,
            counter: CounterKind::default(),
            strategies: profile.roster(),
        }
    }

    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from `lookup`, which maps a variable name to
    /// its value if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let profile = match lookup(PROFILE_VAR) {
            Some(value) => Profile::parse(&value)?,
            None => Profile::default(),
        };

        let mut config = Self::for_profile(profile);

        if let Some(value) = lookup(SEED_VAR) {
            config.seed = value
                .trim()
                .parse()
                .map_err(|e| invalid_config(SEED_VAR, value.as_str(), format!("{e}")))?;
        }

        if let Some(value) = lookup(COUNTER_VAR) {
            config.counter = CounterKind::parse(&value)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Largest block length in the roster; the element count must be a multiple of it.
    pub fn largest_block(&self) -> usize {
        self.strategies
            .iter()
            .map(Strategy::block_len)
            .max()
            .unwrap_or(1)
    }

    /// Checks that every strategy in the roster can process the dataset.
    pub fn validate(&self) -> Result<()> {
        let block = self.largest_block();
        if self.element_count == 0 || self.element_count % block != 0 {
            return Err(contract_violation(
                self.element_count,
                block,
                "element count must be a positive multiple of every strategy's block length",
            ));
        }
        Ok(())
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self::for_profile(Profile::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fault;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    fn names(strategies: &[Strategy]) -> Vec<&'static str> {
        strategies.iter().map(Strategy::name).collect()
    }

    #[test]
    fn test_defaults() {
        let config = BenchConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.profile, Profile::Full);
        assert_eq!(config.element_count, 65_536);
        assert_eq!(config.repetitions, 10_000);
        assert_eq!(config.tolerance, 0.001);
        assert_eq!(config.seed, DEFAULT_SEED);
        assert_eq!(config.counter, CounterKind::Cycles);
        assert_eq!(
            names(&config.strategies),
            ["scalar", "simd2x1_no_align", "simd8x1_no_align", "simd8x4_no_align"]
        );
    }

    #[test]
    fn test_quick_profile() {
        let config = BenchConfig::from_lookup(lookup_from(&[(PROFILE_VAR, "Quick")])).unwrap();

        assert_eq!(config.repetitions, 1_000);
        assert_eq!(
            names(&config.strategies),
            ["scalar", "simd8x1_no_align", "simd8x4_no_align"]
        );
    }

    #[test]
    fn test_seed_and_counter_overrides() {
        let config = BenchConfig::from_lookup(lookup_from(&[
            (SEED_VAR, " 7 "),
            (COUNTER_VAR, "cpu-time"),
        ]))
        .unwrap();

        assert_eq!(config.seed, 7);
        assert_eq!(config.counter, CounterKind::CpuTime);
    }

    #[test]
    fn test_rejects_unknown_values() {
        for (key, value) in [
            (PROFILE_VAR, "turbo"),
            (SEED_VAR, "-1"),
            (COUNTER_VAR, "wallclock"),
        ] {
            let error = BenchConfig::from_lookup(lookup_from(&[(key, value)])).unwrap_err();
            assert!(
                matches!(error, Fault::InvalidConfig { key: k, .. } if k == key),
                "{key}={value} gave {error}"
            );
        }
    }

    #[test]
    fn test_validate_rejects_partial_blocks() {
        let mut config = BenchConfig::default();
        config.element_count = 1_000;

        let error = config.validate().unwrap_err();
        assert!(matches!(
            error,
            Fault::ContractViolation {
                count: 1_000,
                block: 32,
                ..
            }
        ));
    }

    #[test]
    fn test_profile_display() {
        assert_eq!(Profile::Full.to_string(), "full");
        assert_eq!(Profile::Quick.to_string(), "quick");
    }
}

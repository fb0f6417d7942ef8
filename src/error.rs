//! Fault types for sumbench.
//!
//! Every failure the harness can hit is fatal: a benchmark must never print a
//! throughput number it cannot vouch for. Faults are still ordinary values so
//! that the measurement code can propagate them with `?` and tests can inspect
//! them; [`Fault::raise`] is the single place where a fault ends the run.

use std::fmt;

/// Unrecoverable conditions that terminate a benchmark run.
#[derive(Debug, Clone, PartialEq)]
pub enum Fault {
    /// The host facility backing the cycle counter (or stdout) failed.
    EnvironmentFault {
        /// The facility that failed, e.g. `perf_event_open`.
        facility: &'static str,
        /// Human-readable error message.
        message: String,
    },
    /// A strategy or generator was handed an element count it cannot process.
    ContractViolation {
        /// The element count that was provided.
        count: usize,
        /// The block length the count must be a multiple of.
        block: usize,
        /// Human-readable error message.
        message: String,
    },
    /// A strategy returned a sum outside the accepted tolerance.
    CorrectnessFailure {
        /// Name of the offending strategy.
        strategy: String,
        /// Index of the first failing repetition.
        repetition: usize,
        /// The reference sum.
        expected: f64,
        /// The value the strategy produced.
        actual: f64,
        /// Absolute tolerance that was exceeded.
        tolerance: f64,
    },
    /// A configuration value could not be understood.
    InvalidConfig {
        /// Environment variable name.
        key: &'static str,
        /// The rejected value.
        value: String,
        /// Human-readable error message.
        message: String,
    },
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::EnvironmentFault { facility, message } => {
                write!(f, "environment fault: {facility}: {message}")
            }
            Fault::ContractViolation {
                count,
                block,
                message,
            } => write!(
                f,
                "contract violation: {message} (count: {count}, block: {block})"
            ),
            Fault::CorrectnessFailure {
                strategy,
                repetition,
                expected,
                actual,
                tolerance,
            } => write!(
                f,
                "correctness failure: {strategy} returned {actual} on repetition {repetition}, \
                 expected {expected} within {tolerance}"
            ),
            Fault::InvalidConfig {
                key,
                value,
                message,
            } => write!(f, "invalid configuration: {key}={value:?}: {message}"),
        }
    }
}

impl std::error::Error for Fault {}

impl Fault {
    /// Ends the run.
    ///
    /// The fault is logged and then turned into a panic carrying its `Display`
    /// text. Binaries are built with `panic = "abort"`, so outside of the test
    /// harness this terminates the process immediately.
    pub fn raise(self) -> ! {
        tracing::error!(fault = ?self, "aborting benchmark run");
        panic!("{self}")
    }
}

/// Result type alias for sumbench operations.
pub type Result<T> = std::result::Result<T, Fault>;

/// Creates an environment fault.
pub fn environment_fault(facility: &'static str, message: impl Into<String>) -> Fault {
    Fault::EnvironmentFault {
        facility,
        message: message.into(),
    }
}

/// Creates a contract violation.
pub fn contract_violation(count: usize, block: usize, message: impl Into<String>) -> Fault {
    Fault::ContractViolation {
        count,
        block,
        message: message.into(),
    }
}

/// Creates a correctness failure.
pub fn correctness_failure(
    strategy: impl Into<String>,
    repetition: usize,
    expected: f64,
    actual: f64,
    tolerance: f64,
) -> Fault {
    Fault::CorrectnessFailure {
        strategy: strategy.into(),
        repetition,
        expected,
        actual,
        tolerance,
    }
}

/// Creates a configuration error.
pub fn invalid_config(key: &'static str, value: impl Into<String>, message: impl Into<String>) -> Fault {
    Fault::InvalidConfig {
        key,
        value: value.into(),
        message: message.into(),
    }
}

/// Raises a contract violation unless `count` is a multiple of `block`.
#[inline(always)]
pub fn require_divisible(count: usize, block: usize) {
    if count % block != 0 {
        contract_violation(count, block, "element count is not a multiple of the block length")
            .raise();
    }
}

//! Cycle-counted throughput harness for `f64` summation strategies.
//!
//! A seeded [`Dataset`] is generated once; every strategy of the configured
//! roster is then run through a [`Runner`], which times its repetitions with a
//! [`CycleCounter`], verifies each result against the reference sum and emits
//! one report line.
//!
//! ```rust
//! use sumbench::{strategy, Dataset};
//!
//! let dataset = Dataset::from_seed(1024, 42).unwrap();
//! let sum = strategy::simd8x4_no_align(dataset.values());
//! assert!((sum - dataset.reference_sum()).abs() < 0.001);
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod report;
pub mod runner;
pub mod simd;
pub mod strategy;
pub mod timer;

use std::io::Write;

pub use config::{BenchConfig, CounterKind, Profile};
pub use dataset::Dataset;
pub use error::{Fault, Result};
pub use runner::{RunResult, Runner};
pub use strategy::Strategy;
pub use timer::{CycleCounter, ProcessCpuTime, ProcessCycles};

/// Opens the counter selected by `kind`.
pub fn open_counter(kind: CounterKind) -> Result<Box<dyn CycleCounter>> {
    Ok(match kind {
        CounterKind::Cycles => Box::new(ProcessCycles::open()?),
        CounterKind::CpuTime => Box::new(ProcessCpuTime::new()),
    })
}

/// Runs every strategy of `config` on `dataset` in roster order, writing one
/// report line per strategy to `out`.
///
/// Any fault ends the run through [`Fault::raise`]; lines written for earlier
/// strategies stay written.
pub fn run_all<C, W>(config: &BenchConfig, dataset: &Dataset, counter: C, out: &mut W) -> Vec<RunResult>
where
    C: CycleCounter,
    W: Write + ?Sized,
{
    let mut runner = Runner::new(counter, config.repetitions, config.tolerance);

    config
        .strategies
        .iter()
        .map(|strategy| {
            runner
                .run(strategy, dataset, &mut *out)
                .unwrap_or_else(|fault| fault.raise())
        })
        .collect()
}

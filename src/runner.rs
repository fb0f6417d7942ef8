//! Benchmark runner: times repeated invocations of one strategy and checks
//! every result against the dataset's reference sum.

use std::cmp::Ordering;
use std::hint::black_box;
use std::io::Write;

use crate::dataset::Dataset;
use crate::error::{contract_violation, correctness_failure, environment_fault, Result};
use crate::report;
use crate::strategy::Strategy;
use crate::timer::{CycleCounter, Unit};

/// Aggregate measurement of one strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    name: &'static str,
    element_count: usize,
    repetitions: usize,
    elapsed: u64,
    unit: Unit,
}

impl RunResult {
    pub fn new(
        name: &'static str,
        element_count: usize,
        repetitions: usize,
        elapsed: u64,
        unit: Unit,
    ) -> Self {
        Self {
            name,
            element_count,
            repetitions,
            elapsed,
            unit,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn element_count(&self) -> usize {
        self.element_count
    }

    pub fn repetitions(&self) -> usize {
        self.repetitions
    }

    /// Counter delta over the whole repetition loop.
    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Elements summed across all repetitions.
    pub fn total_elements(&self) -> u64 {
        (self.element_count as u64) * (self.repetitions as u64)
    }

    pub fn mega_cycles(&self) -> f64 {
        self.elapsed as f64 / 1_000_000.0
    }

    pub fn cycles_per_element(&self) -> f64 {
        self.elapsed as f64 / self.total_elements() as f64
    }

    pub fn elements_per_cycle(&self) -> f64 {
        self.total_elements() as f64 / self.elapsed as f64
    }
}

/// Drives a [`CycleCounter`] around `repetitions` calls of a strategy.
#[derive(Debug)]
pub struct Runner<C> {
    counter: C,
    repetitions: usize,
    tolerance: f64,
}

impl<C: CycleCounter> Runner<C> {
    pub fn new(counter: C, repetitions: usize, tolerance: f64) -> Self {
        Self {
            counter,
            repetitions,
            tolerance,
        }
    }

    pub fn repetitions(&self) -> usize {
        self.repetitions
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn counter(&self) -> &C {
        &self.counter
    }

    pub fn into_counter(self) -> C {
        self.counter
    }

    /// Times `repetitions` invocations of `strategy` on `dataset`.
    ///
    /// Only the invocation loop sits between the two counter samples; the
    /// result buffer is allocated before and checked after. Every stored
    /// result must lie strictly within the tolerance of the reference sum.
    pub fn measure(&mut self, strategy: &Strategy, dataset: &Dataset) -> Result<RunResult> {
        let data = dataset.values();
        if data.len() % strategy.block_len() != 0 {
            return Err(contract_violation(
                data.len(),
                strategy.block_len(),
                format!("{} cannot split the dataset into whole blocks", strategy.name()),
            ));
        }

        tracing::debug!(
            strategy = strategy.name(),
            repetitions = self.repetitions,
            "measuring"
        );

        let mut results = vec![0.0f64; self.repetitions];

        let before = self.counter.cycles_now()?;
        for slot in results.iter_mut() {
            *slot = black_box(strategy.sum(black_box(data)));
        }
        let after = self.counter.cycles_now()?;

        let expected = dataset.reference_sum();
        if let Some((repetition, &actual)) = results
            .iter()
            .enumerate()
            .find(|(_, &actual)| !self.within_tolerance(actual, expected))
        {
            return Err(correctness_failure(
                strategy.name(),
                repetition,
                expected,
                actual,
                self.tolerance,
            ));
        }

        let elapsed = after.checked_sub(before).ok_or_else(|| {
            environment_fault(
                "cycle counter",
                format!("counter went backwards from {before} to {after}"),
            )
        })?;
        if elapsed == 0 {
            return Err(environment_fault(
                "cycle counter",
                format!("counter stalled at {before} across {} repetitions", self.repetitions),
            ));
        }

        let result = RunResult::new(
            strategy.name(),
            data.len(),
            self.repetitions,
            elapsed,
            self.counter.unit(),
        );

        tracing::info!(
            strategy = result.name(),
            elapsed = result.elapsed(),
            per_element = result.cycles_per_element(),
            "measured"
        );

        Ok(result)
    }

    /// [`Runner::measure`] followed by writing the report line to `out`.
    pub fn run<W: Write + ?Sized>(
        &mut self,
        strategy: &Strategy,
        dataset: &Dataset,
        out: &mut W,
    ) -> Result<RunResult> {
        let result = self.measure(strategy, dataset)?;
        report::emit(out, &result)?;
        Ok(result)
    }

    // NaN compares as neither less nor greater and therefore fails
    fn within_tolerance(&self, actual: f64, expected: f64) -> bool {
        (actual - expected).abs().partial_cmp(&self.tolerance) == Some(Ordering::Less)
    }
}

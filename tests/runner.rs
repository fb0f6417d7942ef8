//! End-to-end tests of the benchmark runner with injected counters.

use std::panic::{self, AssertUnwindSafe};

use sumbench::error::{environment_fault, Result};
use sumbench::strategy::{SCALAR, SIMD8X4_NO_ALIGN};
use sumbench::timer::{CycleCounter, Unit};
use sumbench::{run_all, BenchConfig, Dataset, ProcessCpuTime, Profile, Runner};

const TOLERANCE: f64 = 0.001;

/// Advances by a fixed step on every sample.
struct Stepping {
    now: u64,
    step: u64,
    samples: usize,
}

impl Stepping {
    fn new(step: u64) -> Self {
        Self {
            now: 0,
            step,
            samples: 0,
        }
    }
}

impl CycleCounter for Stepping {
    fn cycles_now(&mut self) -> Result<u64> {
        self.now += self.step;
        self.samples += 1;
        Ok(self.now)
    }
}

struct Broken;

impl CycleCounter for Broken {
    fn cycles_now(&mut self) -> Result<u64> {
        Err(environment_fault("broken", "counter unavailable"))
    }
}

#[test]
fn test_scalar_end_to_end() {
    let dataset = Dataset::from_seed(1_024, 42).unwrap();
    let mut runner = Runner::new(Stepping::new(10_240), 10, TOLERANCE);
    let mut out = Vec::new();

    let result = runner.run(&SCALAR, &dataset, &mut out).unwrap();

    assert_eq!(result.repetitions(), 10);
    assert_eq!(result.element_count(), 1_024);
    assert_eq!(result.elapsed(), 10_240);
    assert_eq!(result.cycles_per_element(), 1.0);
    assert_eq!(runner.counter().samples, 2);

    let line = String::from_utf8(out).unwrap();
    assert!(line.contains("scalar"), "{line}");
    assert!(line.contains("1.000 cycles/element"), "{line}");
}

#[test]
fn test_simd8x4_end_to_end_matches_scalar() {
    let dataset = Dataset::from_seed(1_024, 42).unwrap();
    let mut runner = Runner::new(Stepping::new(1), 10, TOLERANCE);

    let scalar = runner.measure(&SCALAR, &dataset).unwrap();
    let unrolled = runner.measure(&SIMD8X4_NO_ALIGN, &dataset).unwrap();

    assert_eq!(scalar.total_elements(), unrolled.total_elements());
    assert!(
        (SIMD8X4_NO_ALIGN.sum(dataset.values()) - SCALAR.sum(dataset.values())).abs() < TOLERANCE
    );
}

#[test]
fn test_counter_failure_is_reported() {
    let dataset = Dataset::from_seed(64, 1).unwrap();
    let mut runner = Runner::new(Broken, 1, TOLERANCE);

    let error = runner.measure(&SCALAR, &dataset).unwrap_err();

    assert_eq!(error, environment_fault("broken", "counter unavailable"));
}

/// Real process CPU time never runs backwards and grows with the repetition count.
#[test]
fn test_cpu_time_delta_grows_with_repetitions() {
    let dataset = Dataset::from_seed(1_024, 42).unwrap();

    let mut few = Runner::new(ProcessCpuTime::new(), 100, TOLERANCE);
    let short = few.measure(&SCALAR, &dataset).unwrap();

    let mut many = Runner::new(ProcessCpuTime::new(), 10_000, TOLERANCE);
    let long = many.measure(&SCALAR, &dataset).unwrap();

    assert_eq!(short.unit(), Unit::NANOSECONDS);
    assert!(
        long.elapsed() >= short.elapsed(),
        "{} ns for 10,000 repetitions < {} ns for 100",
        long.elapsed(),
        short.elapsed()
    );
}

#[test]
fn test_run_all_reports_roster_in_order() {
    let mut config = BenchConfig::for_profile(Profile::Full);
    config.element_count = 1_024;
    config.repetitions = 5;
    config.validate().unwrap();

    let dataset = Dataset::from_seed(config.element_count, config.seed).unwrap();
    let mut out = Vec::new();

    let results = run_all(&config, &dataset, Stepping::new(5_120), &mut out);

    let names: Vec<&str> = results.iter().map(|r| r.name()).collect();
    assert_eq!(
        names,
        ["scalar", "simd2x1_no_align", "simd8x1_no_align", "simd8x4_no_align"]
    );

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    for (line, name) in lines.iter().zip(names) {
        assert_eq!(line.split(':').next().map(str::trim), Some(name));
        assert!(line.contains("1.000 cycles/element"), "{line}");
    }
}

/// Lines already written stay written; the faulting strategy writes nothing.
#[test]
fn test_run_all_raises_on_indivisible_dataset() {
    let config = BenchConfig::for_profile(Profile::Quick);
    let dataset = Dataset::from_seed(48, 1).unwrap();
    let mut out = Vec::new();

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        run_all(&config, &dataset, Stepping::new(1), &mut out)
    }));

    let payload = outcome.unwrap_err();
    let message = payload.downcast_ref::<String>().unwrap();
    assert!(message.contains("contract violation"), "{message}");
    assert!(message.contains("count: 48, block: 32"), "{message}");

    let text = String::from_utf8(out).unwrap();
    let names: Vec<&str> = text
        .lines()
        .filter_map(|line| line.split(':').next().map(str::trim))
        .collect();
    assert_eq!(names, ["scalar", "simd8x1_no_align"], "{text}");
    assert!(!text.contains("simd8x4_no_align"), "{text}");
}

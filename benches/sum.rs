//! Wall-clock comparison of the summation strategies.
//!
//! The `sumbench` binary measures the same strategies in cycles; this suite
//! gives criterion's statistical view across sizes that fit in L1, L2 and L3.

use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sumbench::{strategy, Dataset};

/// Element counts (f64 = 8 bytes): 8 KiB, 512 KiB, 8 MiB. All multiples of 32.
const VECTOR_SIZES: &[usize] = &[1_024, 65_536, 1_048_576];

fn configure_criterion() -> Criterion {
    Criterion::default()
        .warm_up_time(Duration::from_secs(1))
        .measurement_time(Duration::from_secs(3))
        .sample_size(100)
}

fn benchmark_summation_strategies(c: &mut Criterion) {
    for &size in VECTOR_SIZES {
        let mut group = c.benchmark_group("Summation");
        group.throughput(Throughput::Elements(size as u64));

        // Fixed seed for comparable runs
        let dataset = Dataset::from_seed(size, 42).expect("non-empty dataset");

        for strategy in strategy::ALL {
            group.bench_with_input(
                BenchmarkId::new(strategy.name(), size),
                dataset.values(),
                |bencher, data| bencher.iter(|| black_box(strategy.sum(black_box(data)))),
            );
        }

        group.finish();
    }
}

criterion_group! {
    name = benches;
    config = configure_criterion();
    targets = benchmark_summation_strategies
}
criterion_main!(benches);

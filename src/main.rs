use std::io;

use sumbench::{open_counter, run_all, simd, BenchConfig, Dataset};
use tracing::info;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = BenchConfig::from_env().unwrap_or_else(|fault| fault.raise());

    info!(
        profile = %config.profile,
        elements = config.element_count,
        repetitions = config.repetitions,
        seed = config.seed,
        counter = ?config.counter,
        backend = simd::BACKEND,
        "starting benchmark"
    );

    let dataset = Dataset::from_seed(config.element_count, config.seed)
        .unwrap_or_else(|fault| fault.raise());
    let counter = open_counter(config.counter).unwrap_or_else(|fault| fault.raise());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let results = run_all(&config, &dataset, counter, &mut out);

    info!(strategies = results.len(), "benchmark complete");
}

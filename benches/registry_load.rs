//! Benchmark suite for loading and dumping card registries
//!
//! Uses the divan benchmarking framework.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! ```
//!
//! Stores are generated in memory with a mix of valid records and records
//! that the registry skips (bad numbers, bad PINs, malformed lines), roughly
//! one skipped record in ten.

use atm_simulator::core::registry::DEFAULT_CASH;
use atm_simulator::core::CardRegistry;

fn main() {
    divan::main();
}

const SIZES: &[usize] = &[100, 1_000, 10_000];

/// Generate `count` store lines, every tenth one invalid
fn store_lines(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| match i % 10 {
            3 => format!("{:04}-BAD-{:04} 4321 {}", i % 10_000, i % 10_000, i),
            7 => format!("C{:03}-AAAA-BBBB-{:04} 12 {}", i % 1000, i % 10_000, i),
            9 => "not a record".to_string(),
            _ => format!("C{:03}-AAAA-BBBB-{:04} {} {}", i % 1000, i % 10_000, 1000 + i % 9000, i),
        })
        .collect()
}

/// Benchmark parsing and validating a store into an empty registry
#[divan::bench(args = SIZES)]
fn load_from_lines(bencher: divan::Bencher, size: usize) {
    let lines = store_lines(size);

    bencher.bench_local(|| {
        let mut registry = CardRegistry::new(DEFAULT_CASH);
        registry.load_from_lines(divan::black_box(&lines));
        registry
    });
}

/// Benchmark serializing a loaded registry back to lines
#[divan::bench(args = SIZES)]
fn dump_to_lines(bencher: divan::Bencher, size: usize) {
    let mut registry = CardRegistry::new(DEFAULT_CASH);
    registry.load_from_lines(store_lines(size));

    bencher.bench_local(|| divan::black_box(&registry).dump_to_lines());
}

/// Benchmark authenticating the last card of a loaded registry (linear scan)
#[divan::bench(args = SIZES)]
fn authenticate_last_card(bencher: divan::Bencher, size: usize) {
    let mut registry = CardRegistry::new(DEFAULT_CASH);
    registry.load_from_lines(store_lines(size));
    let last = registry
        .cards()
        .last()
        .map(|card| card.raw_number().to_string())
        .unwrap_or_default();
    let pin = registry
        .dump_to_lines()
        .last()
        .and_then(|line| line.split(' ').nth(1).and_then(|p| p.parse().ok()))
        .unwrap_or(1000);

    bencher.bench_local(|| registry.authenticate_or_create(divan::black_box(&last), pin));
}

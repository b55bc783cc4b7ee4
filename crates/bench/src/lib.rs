use std::time::Duration;

use criterion::BenchmarkGroup;
use criterion::measurement::Measurement;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const SMALL_RUNTIME_SAMPLE_SIZE: usize = 15;
const SMALL_RUNTIME_WARM_UP_MS: u64 = 100;
const SMALL_RUNTIME_MEASURE_MS: u64 = 200;
const MEDIUM_RUNTIME_SAMPLE_SIZE: usize = 15;
const MEDIUM_RUNTIME_WARM_UP_MS: u64 = 500;
const MEDIUM_RUNTIME_MEASURE_MS: u64 = 1000;
const LARGE_RUNTIME_SAMPLE_SIZE: usize = 10;
const LARGE_RUNTIME_WARM_UP_MS: u64 = 800;
const LARGE_RUNTIME_MEASURE_MS: u64 = 1500;
const RNG_SEED: u64 = 0x5EED_2026;

pub fn apply_small_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(SMALL_RUNTIME_SAMPLE_SIZE);
    group.warm_up_time(Duration::from_millis(SMALL_RUNTIME_WARM_UP_MS));
    group.measurement_time(Duration::from_millis(SMALL_RUNTIME_MEASURE_MS));
}

pub fn apply_medium_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(MEDIUM_RUNTIME_SAMPLE_SIZE);
    group.warm_up_time(Duration::from_millis(MEDIUM_RUNTIME_WARM_UP_MS));
    group.measurement_time(Duration::from_millis(MEDIUM_RUNTIME_MEASURE_MS));
}

pub fn apply_large_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(LARGE_RUNTIME_SAMPLE_SIZE);
    group.warm_up_time(Duration::from_millis(LARGE_RUNTIME_WARM_UP_MS));
    group.measurement_time(Duration::from_millis(LARGE_RUNTIME_MEASURE_MS));
}

/// Picks a runtime preset by input size.
pub fn apply_runtime_for_size<M: Measurement>(group: &mut BenchmarkGroup<'_, M>, size: usize) {
    if size <= 4096 {
        apply_small_runtime_config(group);
    } else if size <= 65536 {
        apply_medium_runtime_config(group);
    } else {
        apply_large_runtime_config(group);
    }
}

pub fn default_rng() -> StdRng {
    StdRng::seed_from_u64(RNG_SEED)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Distribution {
    RandomUniform,
    FewUnique,
    /// Ascending input with 1% random swaps. Degenerate for first-element pivots.
    NearlySorted1pctSwaps,
}

pub const ALL_DISTRIBUTIONS: [Distribution; 3] = [
    Distribution::RandomUniform,
    Distribution::FewUnique,
    Distribution::NearlySorted1pctSwaps,
];

impl Distribution {
    pub fn label(self) -> &'static str {
        match self {
            Self::RandomUniform => "random_uniform",
            Self::FewUnique => "few_unique",
            Self::NearlySorted1pctSwaps => "nearly_sorted_1pct_swaps",
        }
    }
}

pub fn generate_dataset<R: Rng + ?Sized>(rng: &mut R, dist: Distribution, size: usize) -> Vec<i32> {
    match dist {
        Distribution::RandomUniform => (0..size).map(|_| rng.random::<i32>()).collect(),
        Distribution::FewUnique => (0..size).map(|_| rng.random_range(0..16) * 97).collect(),
        Distribution::NearlySorted1pctSwaps => {
            let mut data: Vec<i32> = (0..size).map(|i| i as i32).collect();
            if size > 0 {
                let swaps = (size / 100).max(1);
                for _ in 0..swaps {
                    let a = rng.random_range(0..size);
                    let b = rng.random_range(0..size);
                    data.swap(a, b);
                }
            }
            data
        }
    }
}

/// A shuffled permutation of `0..size`, i.e. distinct keys only.
pub fn distinct_shuffled<R: Rng + ?Sized>(rng: &mut R, size: usize) -> Vec<i32> {
    let mut data: Vec<i32> = (0..size).map(|i| i as i32).collect();
    data.shuffle(rng);
    data
}

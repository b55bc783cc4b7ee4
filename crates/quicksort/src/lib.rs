mod concurrent;
mod config;
mod error;
mod input;
mod merge;
mod partition;
mod sequential;

pub use concurrent::{ConcurrentOutcome, ConcurrentSorter, sort_concurrent};
pub use config::{ConcurrencyConfig, DEFAULT_CONCURRENCY, DEFAULT_STACK_SIZE, SpawnPolicy};
pub use error::{InputError, SortError};
pub use input::{read_integers, read_integers_from_path};
pub use merge::{merge, merged};
pub use partition::{Partition, partition};
pub use sequential::sort_sequential;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SortStrategy {
    Sequential,
    ConcurrentPool,
    ConcurrentThreads,
}

pub const ALL_STRATEGIES: [SortStrategy; 3] = [
    SortStrategy::Sequential,
    SortStrategy::ConcurrentPool,
    SortStrategy::ConcurrentThreads,
];

pub fn all_strategies() -> &'static [SortStrategy] {
    &ALL_STRATEGIES
}

pub fn strategy_name(strategy: SortStrategy) -> &'static str {
    match strategy {
        SortStrategy::Sequential => "sequential",
        SortStrategy::ConcurrentPool => "concurrent_pool",
        SortStrategy::ConcurrentThreads => "concurrent_threads",
    }
}

/// Output of a single strategy run. `tasks_spawned` is `None` for the
/// sequential strategy, which has no notion of tasks.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SortRun {
    pub sorted: Vec<i32>,
    pub tasks_spawned: Option<usize>,
}

pub fn sort_i32(strategy: SortStrategy, data: &[i32]) -> Result<SortRun, SortError> {
    sort_i32_with_config(strategy, data, DEFAULT_CONCURRENCY)
}

/// Runs `strategy` over `data`. For the concurrent strategies the policy in
/// `config` is overridden by the strategy; cutoff and thread count are kept.
pub fn sort_i32_with_config(
    strategy: SortStrategy,
    data: &[i32],
    config: ConcurrencyConfig,
) -> Result<SortRun, SortError> {
    let policy = match strategy {
        SortStrategy::Sequential => {
            return Ok(SortRun {
                sorted: sort_sequential(data)?,
                tasks_spawned: None,
            });
        }
        SortStrategy::ConcurrentPool => SpawnPolicy::Pool,
        SortStrategy::ConcurrentThreads => SpawnPolicy::Threads,
    };

    let outcome = ConcurrentSorter::new(ConcurrencyConfig { policy, ..config })?.sort(data)?;
    Ok(SortRun {
        sorted: outcome.sorted,
        tasks_spawned: Some(outcome.tasks_spawned),
    })
}

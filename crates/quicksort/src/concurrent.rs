use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::{self, ScopedJoinHandle};

use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, trace};

use crate::SortError;
use crate::config::{ConcurrencyConfig, SpawnPolicy};
use crate::merge::merged;
use crate::partition::{Partition, partition};

/// Counts logical sort tasks across all workers.
///
/// Increments are relaxed; the value is only read after the top-level task
/// has joined, which orders every increment before the read.
#[derive(Debug, Default)]
pub(crate) struct TaskCounter(AtomicUsize);

impl TaskCounter {
    #[inline]
    fn record(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    fn into_inner(self) -> usize {
        self.0.into_inner()
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConcurrentOutcome {
    pub sorted: Vec<i32>,
    /// Logical task invocations, the top-level one included.
    pub tasks_spawned: usize,
}

type TaskResult = Result<Vec<i32>, SortError>;
type Partitioner = fn(&[i32], i32) -> Result<Partition, SortError>;

/// Fork-join three-way quicksort.
///
/// Each invocation partitions its slice and recurses into the non-empty
/// `less` and `more` partitions as two concurrent tasks, joining both before
/// merging. Where those tasks actually run is decided by the
/// [`ConcurrencyConfig`]; the task count is the same under every policy.
#[derive(Debug)]
pub struct ConcurrentSorter {
    config: ConcurrencyConfig,
    pool: Option<ThreadPool>,
    partitioner: Partitioner,
}

impl ConcurrentSorter {
    pub fn new(config: ConcurrencyConfig) -> Result<Self, SortError> {
        let pool = match config.policy {
            SpawnPolicy::Pool => Some(
                ThreadPoolBuilder::new()
                    .num_threads(config.threads.unwrap_or(0))
                    .stack_size(config.stack_size)
                    .thread_name(|i| format!("quicksort-worker-{i}"))
                    .build()?,
            ),
            SpawnPolicy::Threads => None,
        };
        Ok(Self {
            config,
            pool,
            partitioner: partition,
        })
    }

    #[cfg(test)]
    fn with_partitioner(mut self, partitioner: Partitioner) -> Self {
        self.partitioner = partitioner;
        self
    }

    /// Sorts `data` into a new vector and reports how many tasks it took.
    pub fn sort(&self, data: &[i32]) -> Result<ConcurrentOutcome, SortError> {
        let counter = TaskCounter::default();
        let sorted = match &self.pool {
            Some(pool) => pool.install(|| self.task(data, &counter)),
            None => self.task(data, &counter),
        }?;
        let tasks_spawned = counter.into_inner();

        debug!(
            len = sorted.len(),
            tasks_spawned,
            policy = self.config.policy.name(),
            "concurrent sort finished"
        );
        Ok(ConcurrentOutcome {
            sorted,
            tasks_spawned,
        })
    }

    fn task(&self, data: &[i32], counter: &TaskCounter) -> TaskResult {
        counter.record();
        let Some(&pivot) = data.first() else {
            return Ok(Vec::new());
        };

        let parts = (self.partitioner)(data, pivot)?;
        trace!(
            len = data.len(),
            less = parts.less.len(),
            more = parts.more.len(),
            "task partitioned"
        );

        let (sorted_less, sorted_more) = self.fork(&parts.less, &parts.more, counter)?;
        merged(&sorted_less, &parts.equal, &sorted_more)
    }

    fn fork(
        &self,
        less: &[i32],
        more: &[i32],
        counter: &TaskCounter,
    ) -> Result<(Vec<i32>, Vec<i32>), SortError> {
        let child = |part: &[i32]| -> TaskResult {
            if part.is_empty() {
                Ok(Vec::new())
            } else {
                self.task(part, counter)
            }
        };

        if less.len() + more.len() < self.config.sequential_cutoff {
            return Ok((child(less)?, child(more)?));
        }

        match self.config.policy {
            SpawnPolicy::Pool => {
                let (sorted_less, sorted_more) = rayon::join(|| child(less), || child(more));
                Ok((sorted_less?, sorted_more?))
            }
            // Both handles are joined before either result is inspected, so a
            // panicking sibling is reported instead of resurfacing in `scope`.
            SpawnPolicy::Threads => thread::scope(|scope| -> Result<_, SortError> {
                let less_task = spawn_child(scope, less, || child(less));
                let more_task = spawn_child(scope, more, || child(more));
                let sorted_less = join_task(less_task);
                let sorted_more = join_task(more_task);
                Ok((sorted_less?, sorted_more?))
            }),
        }
    }
}

type Spawned<'scope> = Result<Option<ScopedJoinHandle<'scope, TaskResult>>, SortError>;

fn spawn_child<'scope, F>(
    scope: &'scope thread::Scope<'scope, '_>,
    part: &[i32],
    f: F,
) -> Spawned<'scope>
where
    F: FnOnce() -> TaskResult + Send + 'scope,
{
    if part.is_empty() {
        return Ok(None);
    }
    thread::Builder::new()
        .name("quicksort-task".into())
        .spawn_scoped(scope, f)
        .map(Some)
        .map_err(SortError::Spawn)
}

fn join_task(task: Spawned<'_>) -> TaskResult {
    match task? {
        Some(handle) => handle.join().map_err(|_| SortError::TaskPanicked)?,
        None => Ok(Vec::new()),
    }
}

/// Sorts with [`ConcurrencyConfig::default`].
pub fn sort_concurrent(data: &[i32]) -> Result<ConcurrentOutcome, SortError> {
    ConcurrentSorter::new(ConcurrencyConfig::default())?.sort(data)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::DEFAULT_CONCURRENCY;

    fn overflow_error() -> SortError {
        SortError::Allocation(Vec::<i32>::new().try_reserve(usize::MAX).unwrap_err())
    }

    fn fail_on_seven(data: &[i32], pivot: i32) -> Result<Partition, SortError> {
        if pivot == 7 {
            return Err(overflow_error());
        }
        partition(data, pivot)
    }

    fn panic_on_outer_values(data: &[i32], pivot: i32) -> Result<Partition, SortError> {
        if pivot == 1 || pivot == 9 {
            panic!("partition of {pivot} blew up");
        }
        partition(data, pivot)
    }

    fn configs() -> Vec<ConcurrencyConfig> {
        vec![
            ConcurrencyConfig::default(),
            ConcurrencyConfig::unrestricted(SpawnPolicy::Pool),
            ConcurrencyConfig::unrestricted(SpawnPolicy::Threads),
            ConcurrencyConfig {
                policy: SpawnPolicy::Pool,
                sequential_cutoff: 16,
                threads: Some(2),
                ..DEFAULT_CONCURRENCY
            },
            ConcurrencyConfig {
                policy: SpawnPolicy::Threads,
                sequential_cutoff: 64,
                ..DEFAULT_CONCURRENCY
            },
        ]
    }

    fn sort_with(config: ConcurrencyConfig, data: &[i32]) -> ConcurrentOutcome {
        ConcurrentSorter::new(config).unwrap().sort(data).unwrap()
    }

    #[test]
    fn example() {
        for config in configs() {
            let out = sort_with(config, &[5, 3, 8, 3, 1]);
            assert_eq!(out.sorted, vec![1, 3, 3, 5, 8], "{config:?}");
            // pivots 5, 3, 8, 1
            assert_eq!(out.tasks_spawned, 4, "{config:?}");
        }
    }

    #[test]
    fn empty_and_singleton_count_one_task() {
        for config in configs() {
            let empty = sort_with(config, &[]);
            assert!(empty.sorted.is_empty());
            assert_eq!(empty.tasks_spawned, 1);

            let single = sort_with(config, &[-7]);
            assert_eq!(single.sorted, vec![-7]);
            assert_eq!(single.tasks_spawned, 1);
        }
    }

    #[test]
    fn distinct_values_count_one_task_each() {
        let mut rng = StdRng::seed_from_u64(0x5EED_2026);
        let mut data: Vec<i32> = (-250..250).collect();
        data.shuffle(&mut rng);

        for config in configs() {
            let out = sort_with(config, &data);
            assert_eq!(out.tasks_spawned, data.len(), "{config:?}");
            assert!(out.sorted.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn sorted_input_still_counts_every_pivot() {
        let data: Vec<i32> = (0..300).collect();
        let rev: Vec<i32> = data.iter().rev().copied().collect();
        for config in configs() {
            assert_eq!(sort_with(config, &data).tasks_spawned, 300);
            assert_eq!(sort_with(config, &rev).sorted, data);
        }
    }

    #[test]
    fn deep_sorted_input_under_default_config() {
        let data: Vec<i32> = (0..5000).collect();
        let out = sort_with(DEFAULT_CONCURRENCY, &data);
        assert_eq!(out.tasks_spawned, 5000);
        assert_eq!(out.sorted, data);

        let rev: Vec<i32> = data.iter().rev().copied().collect();
        let out = sort_concurrent(&rev).unwrap();
        assert_eq!(out.tasks_spawned, 5000);
        assert_eq!(out.sorted, data);
    }

    #[test]
    fn deep_sorted_input_without_cutoff() {
        let data: Vec<i32> = (0..3000).collect();
        let out = sort_with(ConcurrencyConfig::unrestricted(SpawnPolicy::Pool), &data);
        assert_eq!(out.tasks_spawned, 3000);
        assert_eq!(out.sorted, data);
    }

    #[test]
    fn child_failure_fails_whole_sort() {
        // 5 -> more [8, 7, 9] -> less [7] fails while the sibling [3, 1] succeeds
        let data = [5, 3, 8, 7, 9, 1];
        for config in configs() {
            let sorter = ConcurrentSorter::new(config)
                .unwrap()
                .with_partitioner(fail_on_seven);
            let err = sorter.sort(&data).unwrap_err();
            assert!(matches!(err, SortError::Allocation(_)), "{config:?}: {err:?}");

            // the sorter stays usable after a failed sort
            assert_eq!(sorter.sort(&[3, 1, 2]).unwrap().sorted, vec![1, 2, 3]);
        }
    }

    #[test]
    fn top_level_failure_is_reported() {
        for config in configs() {
            let sorter = ConcurrentSorter::new(config)
                .unwrap()
                .with_partitioner(fail_on_seven);
            assert!(matches!(sorter.sort(&[7, 1, 9]), Err(SortError::Allocation(_))));
        }
    }

    #[test]
    fn panicking_children_become_task_errors() {
        // both children of 5 panic; each must be joined and reported, not re-raised
        let sorter = ConcurrentSorter::new(ConcurrencyConfig::unrestricted(SpawnPolicy::Threads))
            .unwrap()
            .with_partitioner(panic_on_outer_values);
        assert!(matches!(sorter.sort(&[5, 1, 9]), Err(SortError::TaskPanicked)));
        assert!(matches!(sorter.sort(&[5, 3, 9, 4]), Err(SortError::TaskPanicked)));
    }

    #[test]
    fn duplicates_count_distinct_values() {
        let data = [4, 4, 4, 1, 1, 9, 4, 1];
        for config in configs() {
            let out = sort_with(config, &data);
            assert_eq!(out.sorted, vec![1, 1, 1, 4, 4, 4, 4, 9]);
            assert_eq!(out.tasks_spawned, 3, "{config:?}");
        }
    }

    #[test]
    fn matches_sequential_on_random_input() {
        let mut rng = StdRng::seed_from_u64(0xD0D1_2026);
        for &size in &[2_usize, 31, 512, 5000] {
            let data: Vec<i32> = (0..size).map(|_| rng.random_range(-1000..1000)).collect();
            let expected = crate::sort_sequential(&data).unwrap();
            for config in configs() {
                assert_eq!(sort_with(config, &data).sorted, expected, "size={size} {config:?}");
            }
        }
    }

    #[test]
    fn convenience_uses_default_config() {
        let out = sort_concurrent(&[2, 1]).unwrap();
        assert_eq!(out.sorted, vec![1, 2]);
        assert_eq!(out.tasks_spawned, 2);
    }

    #[test]
    fn zero_threads_uses_rayon_default() {
        // rayon treats 0 as "pick automatically"
        let sorter = ConcurrentSorter::new(ConcurrencyConfig {
            threads: Some(0),
            ..DEFAULT_CONCURRENCY
        })
        .unwrap();
        assert_eq!(sorter.sort(&[3, 1, 2]).unwrap().sorted, vec![1, 2, 3]);
    }
}

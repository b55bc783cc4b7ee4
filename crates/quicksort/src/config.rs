/// How the concurrent sorter executes the `less`/`more` recursions.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum SpawnPolicy {
    /// Fork-join on a bounded rayon worker pool.
    #[default]
    Pool,
    /// One scoped OS thread per non-empty partition, no bound on fan-out.
    Threads,
}

impl SpawnPolicy {
    pub fn name(self) -> &'static str {
        match self {
            SpawnPolicy::Pool => "pool",
            SpawnPolicy::Threads => "threads",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ConcurrencyConfig {
    pub policy: SpawnPolicy,
    /// Partitions whose `less` and `more` lengths sum below this recurse
    /// inline instead of forking. Inline calls are still counted as tasks.
    pub sequential_cutoff: usize,
    /// Worker count for the pool. `None` lets rayon pick one per core.
    /// Ignored by [`SpawnPolicy::Threads`].
    pub threads: Option<usize>,
    /// Stack size in bytes of each pool worker. First-element pivots nest one
    /// join per element on sorted input, so this bounds the input depth the
    /// pool can take. Ignored by [`SpawnPolicy::Threads`], where every level
    /// runs on its own thread.
    pub stack_size: usize,
}

pub const DEFAULT_STACK_SIZE: usize = 64 << 20;

pub const DEFAULT_CONCURRENCY: ConcurrencyConfig = ConcurrencyConfig {
    policy: SpawnPolicy::Pool,
    sequential_cutoff: 1024,
    threads: None,
    stack_size: DEFAULT_STACK_SIZE,
};

impl Default for ConcurrencyConfig {
    fn default() -> Self {
        DEFAULT_CONCURRENCY
    }
}

impl ConcurrencyConfig {
    /// Every recursion forks, mirroring the naive one-task-per-partition scheme.
    pub fn unrestricted(policy: SpawnPolicy) -> Self {
        Self {
            policy,
            sequential_cutoff: 0,
            ..DEFAULT_CONCURRENCY
        }
    }
}

use std::collections::TryReserveError;
use std::io;

use thiserror::Error;

/// Errors raised by the sorters.
///
/// A sort either completes in full or fails with one of these; there is no
/// partial result.
#[derive(Debug, Error)]
pub enum SortError {
    #[error("failed to allocate sort buffer: {0}")]
    Allocation(#[from] TryReserveError),

    #[error("merge destination holds {available} elements but {needed} are required")]
    MergeCapacity { needed: usize, available: usize },

    #[error("failed to spawn sort task: {0}")]
    Spawn(#[source] io::Error),

    #[error("sort task panicked")]
    TaskPanicked,

    #[error("failed to build worker pool: {0}")]
    PoolBuild(#[from] rayon::ThreadPoolBuildError),
}

/// Errors raised while materializing the input sequence.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to allocate input buffer: {0}")]
    Allocation(#[from] TryReserveError),
}

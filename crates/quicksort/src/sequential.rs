use tracing::debug;

use crate::SortError;
use crate::merge::merged;
use crate::partition::partition;

/// Sorts `data` into a new vector on the calling thread.
///
/// The input is left untouched. Each recursion step allocates its own
/// partitions and releases them once merged.
pub fn sort_sequential(data: &[i32]) -> Result<Vec<i32>, SortError> {
    let sorted = quicksort(data)?;
    debug!(len = sorted.len(), "sequential sort finished");
    Ok(sorted)
}

fn quicksort(data: &[i32]) -> Result<Vec<i32>, SortError> {
    let Some(&pivot) = data.first() else {
        return Ok(Vec::new());
    };

    let parts = partition(data, pivot)?;
    let sorted_less = quicksort(&parts.less)?;
    let sorted_more = quicksort(&parts.more)?;

    merged(&sorted_less, &parts.equal, &sorted_more)
}

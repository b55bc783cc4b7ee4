use crate::SortError;

/// Writes `less`, `equal` and `more` back to back into the front of `dst`.
///
/// Fails without touching `dst` if it cannot hold all three runs.
pub fn merge(dst: &mut [i32], less: &[i32], equal: &[i32], more: &[i32]) -> Result<(), SortError> {
    let needed = less.len() + equal.len() + more.len();
    if dst.len() < needed {
        return Err(SortError::MergeCapacity {
            needed,
            available: dst.len(),
        });
    }

    let mut index = 0;
    for run in [less, equal, more] {
        dst[index..index + run.len()].copy_from_slice(run);
        index += run.len();
    }
    Ok(())
}

/// Allocates an exact-size buffer and merges the three runs into it.
pub fn merged(less: &[i32], equal: &[i32], more: &[i32]) -> Result<Vec<i32>, SortError> {
    let len = less.len() + equal.len() + more.len();
    let mut out = Vec::new();
    out.try_reserve_exact(len)?;
    out.resize(len, 0);
    merge(&mut out, less, equal, more)?;
    Ok(out)
}

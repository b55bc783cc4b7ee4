use crate::SortError;

/// Result of a three-way split around a pivot.
///
/// `less` holds the elements strictly below the pivot, `equal` the ones equal
/// to it and `more` the ones strictly above. Concatenated in that order they
/// form a permutation of the partitioned slice.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Partition {
    pub less: Vec<i32>,
    pub equal: Vec<i32>,
    pub more: Vec<i32>,
}

impl Partition {
    #[inline]
    pub fn len(&self) -> usize {
        self.less.len() + self.equal.len() + self.more.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Splits `data` into fresh `less`/`equal`/`more` buffers around `pivot`.
///
/// Buffers are sized exactly from a counting pass before any element is
/// copied. If one of the reservations fails the buffers obtained so far are
/// dropped and the error is returned.
pub fn partition(data: &[i32], pivot: i32) -> Result<Partition, SortError> {
    let (mut n_less, mut n_more) = (0usize, 0usize);
    for &x in data {
        n_less += usize::from(x < pivot);
        n_more += usize::from(x > pivot);
    }
    let n_equal = data.len() - n_less - n_more;

    let mut out = Partition::default();
    out.less.try_reserve_exact(n_less)?;
    out.equal.try_reserve_exact(n_equal)?;
    out.more.try_reserve_exact(n_more)?;

    for &x in data {
        if x < pivot {
            out.less.push(x);
        } else if x > pivot {
            out.more.push(x);
        } else {
            out.equal.push(x);
        }
    }

    debug_assert_eq!(out.len(), data.len());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    #[test]
    fn splits_example_around_first_element() {
        let data = [5, 3, 8, 3, 1];
        let p = partition(&data, data[0]).unwrap();
        assert_eq!(p.less, vec![3, 3, 1]);
        assert_eq!(p.equal, vec![5]);
        assert_eq!(p.more, vec![8]);
    }

    #[test]
    fn empty_input_gives_empty_groups() {
        let p = partition(&[], 0).unwrap();
        assert!(p.is_empty());
    }

    #[test]
    fn pivot_outside_range() {
        let data = [4, -2, 9, 0];
        let below = partition(&data, i32::MIN).unwrap();
        assert!(below.less.is_empty() && below.equal.is_empty());
        assert_eq!(below.more, data.to_vec());

        let above = partition(&data, i32::MAX).unwrap();
        assert_eq!(above.less, data.to_vec());
        assert!(above.equal.is_empty() && above.more.is_empty());
    }

    #[test]
    fn buffers_are_exactly_sized() {
        let data = [2, 7, 2, 2, -1, 7, 0];
        let p = partition(&data, 2).unwrap();
        assert_eq!(p.less.capacity(), p.less.len());
        assert_eq!(p.equal.capacity(), p.equal.len());
        assert_eq!(p.more.capacity(), p.more.len());
    }

    #[test]
    fn fixed_seed_random_cases() {
        let mut rng = StdRng::seed_from_u64(0x5EED_2026);
        for &size in &[1_usize, 2, 17, 256, 4096] {
            let data: Vec<i32> = (0..size).map(|_| rng.random_range(-64..64)).collect();
            let pivot = data[rng.random_range(0..size)];
            let p = partition(&data, pivot).unwrap();

            assert_eq!(p.len(), size);
            assert!(p.less.iter().all(|&x| x < pivot));
            assert!(p.equal.iter().all(|&x| x == pivot));
            assert!(p.more.iter().all(|&x| x > pivot));
            assert_eq!(
                p.equal.len(),
                data.iter().filter(|&&x| x == pivot).count(),
                "size={size}"
            );
        }
    }
}

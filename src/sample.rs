//! Uniform random subsets of `0..n` without replacement.
use crate::error::ErrorKind;
use crate::rng::RandomSource;
use thiserror::Error;

/// Draws `k` distinct indices from `0..n`, in ascending order.
///
/// Every size-`k` subset is equally likely. Exactly `n` draws are taken from
/// `rng`, one per candidate, so the result for a given source state is fixed.
pub fn random_subset<R: RandomSource + ?Sized>(
    rng: &mut R,
    n: usize,
    k: usize,
) -> Result<Vec<usize>, SampleError> {
    if k > n {
        return Err(SampleError::SampleTooLarge { k, n });
    }

    let mut picked = Vec::with_capacity(k);
    let mut remaining = k;
    for i in 0..n {
        // Accept `i` with probability `remaining / (n - i)`.
        if rng.uniform_below(n - i) < remaining {
            picked.push(i);
            remaining -= 1;
        }
    }
    debug_assert_eq!(remaining, 0);
    debug_assert_eq!(picked.len(), k);
    Ok(picked)
}

/// Like [`random_subset`], then permutes the picked indices uniformly.
///
/// The permutation consumes `k - 1` additional draws after the selection pass.
pub fn random_subset_shuffled<R: RandomSource + ?Sized>(
    rng: &mut R,
    n: usize,
    k: usize,
) -> Result<Vec<usize>, SampleError> {
    let mut picked = random_subset(rng, n, k)?;
    shuffle(rng, &mut picked);
    Ok(picked)
}

fn shuffle<R: RandomSource + ?Sized, T>(rng: &mut R, xs: &mut [T]) {
    for i in (1..xs.len()).rev() {
        let j = rng.uniform_below(i + 1);
        xs.swap(i, j);
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SampleError {
    #[error("k must be <= n (k = {k}, n = {n})")]
    SampleTooLarge { k: usize, n: usize },
}

impl SampleError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidArgument
    }
}

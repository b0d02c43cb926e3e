//! Uniform random source used by the samplers
//!
//! Every `rand` generator is a [`RandomSource`], so callers pick the
//! generator (and its seed) instead of relying on a hidden global one.

use rand::{Rng, RngCore};

/// Source of uniform random numbers for sampling decisions
pub trait RandomSource {
    /// Uniform fraction in `[0, 1)`
    fn next_fraction(&mut self) -> f64;

    /// Uniform index in `[0, bound)`; `bound` must be positive
    fn next_index(&mut self, bound: usize) -> usize;
}

impl<R: RngCore> RandomSource for R {
    #[inline]
    fn next_fraction(&mut self) -> f64 {
        self.random::<f64>()
    }

    #[inline]
    fn next_index(&mut self, bound: usize) -> usize {
        self.random_range(0..bound)
    }
}

/// Replays fixed lists of fractions and indices, in order
#[cfg(test)]
pub(crate) struct Scripted {
    fractions: Vec<f64>,
    indices: Vec<usize>,
}

#[cfg(test)]
impl Scripted {
    pub(crate) fn new(fractions: Vec<f64>, indices: Vec<usize>) -> Self {
        Self { fractions, indices }
    }
}

#[cfg(test)]
impl RandomSource for Scripted {
    fn next_fraction(&mut self) -> f64 {
        assert!(!self.fractions.is_empty(), "no scripted fraction left");
        self.fractions.remove(0)
    }

    fn next_index(&mut self, bound: usize) -> usize {
        assert!(!self.indices.is_empty(), "no scripted index left");
        let i = self.indices.remove(0);
        assert!(i < bound, "scripted index {} out of bound {}", i, bound);
        i
    }
}

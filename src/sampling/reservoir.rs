//! Reservoir sampling for uniform random sampling from streams
//!
//! Reservoir sampling maintains a fixed-size uniform random sample from
//! a stream of unknown length. Each item in the stream has equal probability
//! of being in the final sample.

use core::num::NonZeroUsize;

use super::RandomSource;
use crate::traits::MergeError;

#[cfg(feature = "std")]
use std::{format, vec::Vec};

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::{format, vec::Vec};

/// Offer one stream item to a retained sample
///
/// `stream_length` is the 1-based position of `value` in the stream. While
/// the stream still fits (`stream_length <= max_retained`) the item is stored
/// at index `stream_length - 1`, overwriting whatever is already there, so
/// replaying a position is idempotent. Past that point the item is kept with
/// probability `max_retained / stream_length` and replaces a uniformly chosen
/// slot.
///
/// # Example
///
/// ```
/// use core::num::NonZeroUsize;
/// use histostats::sampling::offer;
/// use rand::{rngs::SmallRng, SeedableRng};
///
/// let mut rng = SmallRng::seed_from_u64(1);
/// let cap = NonZeroUsize::new(3).unwrap();
/// let mut retained = Vec::new();
///
/// for (i, v) in [1.0, 2.0, 3.0, 4.0, 5.0].into_iter().enumerate() {
///     offer(&mut retained, i as u64 + 1, v, cap, &mut rng);
/// }
/// assert_eq!(retained.len(), 3);
/// ```
pub fn offer<T, R>(
    retained: &mut Vec<T>,
    stream_length: u64,
    value: T,
    max_retained: NonZeroUsize,
    rng: &mut R,
) where
    R: RandomSource + ?Sized,
{
    let cap = max_retained.get();

    if stream_length <= cap as u64 {
        let slot = stream_length.saturating_sub(1) as usize;
        if slot < retained.len() {
            tracing::debug!(slot, "replaying fill-phase position");
            retained[slot] = value;
        } else {
            retained.push(value);
        }
        return;
    }

    let keep_probability = cap as f64 / stream_length as f64;
    if rng.next_fraction() > keep_probability {
        return;
    }

    let slot = rng.next_index(cap);
    if slot < retained.len() {
        retained[slot] = value;
    } else {
        // Only reachable when earlier positions were skipped (e.g. NaNs
        // counted toward the stream length but never retained).
        retained.push(value);
    }
}

/// Reservoir of a bounded uniform sample
///
/// Holds the retained items plus the number of stream items seen. The random
/// source is passed to each call, so the reservoir stays a plain value and
/// tests can drive it with a seeded generator.
///
/// # Example
///
/// ```
/// use core::num::NonZeroUsize;
/// use histostats::sampling::Reservoir;
/// use rand::{rngs::SmallRng, SeedableRng};
///
/// let mut rng = SmallRng::seed_from_u64(42);
/// let mut reservoir = Reservoir::new(NonZeroUsize::new(5).unwrap());
///
/// for i in 0..100 {
///     reservoir.add(i, &mut rng);
/// }
///
/// assert_eq!(reservoir.len(), 5);
/// assert_eq!(reservoir.items_seen(), 100);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Reservoir<T> {
    /// Maximum sample size
    capacity: NonZeroUsize,
    /// Current sample, in retention order
    retained: Vec<T>,
    /// Stream length so far
    seen: u64,
}

impl<T> Reservoir<T> {
    /// Create an empty reservoir holding at most `capacity` items
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            capacity,
            retained: Vec::with_capacity(capacity.get()),
            seen: 0,
        }
    }

    /// Add the next stream item
    pub fn add<R: RandomSource + ?Sized>(&mut self, item: T, rng: &mut R) {
        self.seen += 1;
        offer(&mut self.retained, self.seen, item, self.capacity, rng);
    }

    /// Offer an item at an explicit 1-based stream position
    ///
    /// Use when the caller tracks stream length itself, e.g. when positions
    /// also count items that were never offered.
    pub fn offer_at<R: RandomSource + ?Sized>(&mut self, stream_length: u64, item: T, rng: &mut R) {
        self.seen = self.seen.max(stream_length);
        offer(&mut self.retained, stream_length, item, self.capacity, rng);
    }

    /// Get the current sample
    pub fn sample(&self) -> &[T] {
        &self.retained
    }

    /// Consume the reservoir and return the sample
    pub fn into_sample(self) -> Vec<T> {
        self.retained
    }

    /// Get the reservoir capacity
    pub fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }

    /// Get the current sample size
    pub fn len(&self) -> usize {
        self.retained.len()
    }

    /// Check if reservoir is empty
    pub fn is_empty(&self) -> bool {
        self.retained.is_empty()
    }

    /// Check if reservoir is full
    pub fn is_full(&self) -> bool {
        self.retained.len() >= self.capacity.get()
    }

    /// Get the number of items seen
    pub fn items_seen(&self) -> u64 {
        self.seen
    }

    /// Probability that any given stream item is in the current sample
    pub fn sampling_probability(&self) -> f64 {
        if self.seen == 0 {
            0.0
        } else {
            (self.capacity.get() as f64 / self.seen as f64).min(1.0)
        }
    }

    /// Drop the sample and reset the stream length
    pub fn clear(&mut self) {
        self.retained.clear();
        self.seen = 0;
    }
}

impl<T: Clone> Reservoir<T> {
    /// Merge another reservoir into this one
    ///
    /// The result is a uniform sample of the concatenated streams: each output
    /// slot is drawn from `self` with probability `self.seen / total` and from
    /// `other` otherwise. No retained item is picked twice.
    pub fn merge_from<R: RandomSource + ?Sized>(
        &mut self,
        other: &Self,
        rng: &mut R,
    ) -> Result<(), MergeError> {
        if self.capacity != other.capacity {
            return Err(MergeError::IncompatibleConfig {
                expected: format!("capacity={}", self.capacity),
                found: format!("capacity={}", other.capacity),
            });
        }

        if other.seen == 0 {
            return Ok(());
        }

        if self.seen == 0 {
            self.retained = other.retained.clone();
            self.seen = other.seen;
            return Ok(());
        }

        let total = self.seen + other.seen;
        let self_len = self.retained.len();
        let other_len = other.retained.len();

        if self_len + other_len <= self.capacity.get() {
            self.retained.extend(other.retained.iter().cloned());
        } else {
            let output_len = self.capacity.get().min(self_len + other_len);
            let self_weight = self.seen as f64 / total as f64;
            let mut merged = Vec::with_capacity(output_len);

            // Draw without replacement: every index leaves its pool once taken.
            let mut self_pool: Vec<usize> = (0..self_len).collect();
            let mut other_pool: Vec<usize> = (0..other_len).collect();

            for _ in 0..output_len {
                let from_self = if other_pool.is_empty() {
                    true
                } else if self_pool.is_empty() {
                    false
                } else {
                    rng.next_fraction() < self_weight
                };

                if from_self {
                    let idx = self_pool.swap_remove(rng.next_index(self_pool.len()));
                    merged.push(self.retained[idx].clone());
                } else {
                    let idx = other_pool.swap_remove(rng.next_index(other_pool.len()));
                    merged.push(other.retained[idx].clone());
                }
            }

            self.retained = merged;
        }

        self.seen = total;
        Ok(())
    }
}

//! Running statistics (count, mean, min, max, sum, variance, mean of logs)
//!
//! Computes streaming statistics using Welford's numerically stable online algorithm.
//! Supports merging for distributed computation.

use crate::math;
use crate::traits::{MergeError, Sketch};

/// Running statistics calculator using Welford's algorithm
///
/// Keeps exact aggregates over a stream of samples in O(1) memory. Besides
/// the usual moments it tracks the running mean of `ln(|x|)`, which backs the
/// geometric mean. That mean of logarithms is only defined while every sample
/// is non-negative: the first negative sample switches it off for the rest of
/// the accumulator's life.
///
/// # Example
///
/// ```
/// use histostats::statistics::RunningStatistics;
///
/// let mut stats = RunningStatistics::new();
///
/// for value in [10.0, 20.0, 30.0, 40.0] {
///     stats.add(value);
/// }
///
/// assert_eq!(stats.count(), 4);
/// assert_eq!(stats.mean(), 25.0);
/// assert_eq!(stats.sum(), 100.0);
/// assert!((stats.variance() - 166.667).abs() < 0.001);
/// assert_eq!(stats.min(), Some(10.0));
/// assert_eq!(stats.max(), Some(40.0));
/// assert!(stats.meanlogs_valid());
/// ```
///
/// # Distributed Usage
///
/// ```
/// use histostats::statistics::RunningStatistics;
/// use histostats::traits::Sketch;
///
/// let mut stats1 = RunningStatistics::new();
/// let mut stats2 = RunningStatistics::new();
///
/// for v in [1.0, 2.0, 3.0] {
///     stats1.add(v);
/// }
/// for v in [4.0, 5.0, 6.0] {
///     stats2.add(v);
/// }
///
/// stats1.merge(&stats2).unwrap();
/// assert!((stats1.mean() - 3.5).abs() < 0.001);
/// ```
#[derive(Clone, Debug)]
pub struct RunningStatistics {
    /// Number of values seen
    count: u64,
    /// Running mean
    mean: f64,
    /// Minimum value
    min: f64,
    /// Maximum value
    max: f64,
    /// Sum of all values
    sum: f64,
    /// Sum of squared differences from mean (M2 in Welford's algorithm)
    variance_acc: f64,
    /// Running mean of ln(|x|)
    meanlogs: f64,
    /// Cleared forever by the first negative sample
    meanlogs_valid: bool,
}

impl Default for RunningStatistics {
    fn default() -> Self {
        Self::new()
    }
}

impl RunningStatistics {
    /// Create a new empty statistics accumulator
    pub fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            sum: 0.0,
            variance_acc: 0.0,
            meanlogs: 0.0,
            meanlogs_valid: true,
        }
    }

    /// Add a value to the statistics
    ///
    /// The value must not be NaN; filter those out before calling. Infinite
    /// values are accepted and handled without producing `inf - inf`.
    pub fn add(&mut self, value: f64) {
        debug_assert!(!value.is_nan(), "NaN must be filtered before RunningStatistics::add");

        self.count += 1;

        if value > self.max {
            self.max = value;
        }
        if value < self.min {
            self.min = value;
        }

        self.sum += value;

        if value < 0.0 {
            if self.meanlogs_valid {
                tracing::debug!(value, "negative sample, mean of logs disabled");
            }
            self.meanlogs_valid = false;
        } else if self.meanlogs_valid {
            self.meanlogs += (math::ln(value.abs()) - self.meanlogs) / self.count as f64;
        }

        if self.count == 1 {
            self.mean = value;
            self.variance_acc = 0.0;
        } else {
            let old_mean = self.mean;
            if old_mean.is_infinite() {
                self.mean = self.sum / self.count as f64;
            } else {
                self.mean = old_mean + (value - old_mean) / self.count as f64;
            }
            self.variance_acc += (value - old_mean) * (value - self.mean);
        }
    }

    /// Get the number of values
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Get the mean (average)
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// Get the sample variance
    ///
    /// Bessel-corrected: divides by `count - 1`. Zero for fewer than two
    /// samples.
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.variance_acc / (self.count - 1) as f64
        }
    }

    /// Get the sample standard deviation
    pub fn stddev(&self) -> f64 {
        math::sqrt(self.variance())
    }

    /// Get the minimum value
    pub fn min(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.min)
        }
    }

    /// Get the maximum value
    pub fn max(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.max)
        }
    }

    /// Get the sum of all values
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Whether the mean of logarithms is still defined
    pub fn meanlogs_valid(&self) -> bool {
        self.meanlogs_valid
    }

    /// Get the running mean of `ln(|x|)`
    ///
    /// Returns `None` once a negative sample has been seen. A zero sample
    /// contributes `ln(0) = -inf`, so the value is `-inf` while only zeros
    /// (and no positives) follow, and becomes NaN after the next positive
    /// sample. The validity flag stays set in both cases; check
    /// `is_finite()` if a usable number is required.
    pub fn meanlogs(&self) -> Option<f64> {
        if self.meanlogs_valid {
            Some(self.meanlogs)
        } else {
            None
        }
    }

    /// Get the geometric mean, `exp(meanlogs)`
    ///
    /// `None` when empty or when the mean of logarithms is invalid. Follows
    /// [`meanlogs`](Self::meanlogs) through zero samples: `0.0` while the
    /// mean of logs is `-inf`, NaN once it is NaN.
    pub fn geometric_mean(&self) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        self.meanlogs().map(math::exp)
    }

    /// Merge with another RunningStatistics using the parallel algorithm
    ///
    /// Uses Chan et al.'s parallel algorithm for combining mean and variance.
    /// The mean of logarithms survives only if both sides still have one.
    pub fn merge_stats(&mut self, other: &Self) {
        if other.count == 0 {
            return;
        }

        if self.count == 0 {
            *self = other.clone();
            return;
        }

        let self_count = self.count as f64;
        let other_count = other.count as f64;
        let combined_count = self.count + other.count;
        let n = combined_count as f64;

        let (combined_mean, spread) = if self.mean.is_infinite() || other.mean.is_infinite() {
            // `other.mean - self.mean` may be `inf - inf`; skip the cross term.
            ((self.sum + other.sum) / n, 0.0)
        } else {
            let delta = other.mean - self.mean;
            (
                self.mean + delta * (other_count / n),
                delta * delta * (self_count * other_count / n),
            )
        };

        let combined_acc = self.variance_acc + other.variance_acc + spread;

        self.meanlogs_valid = self.meanlogs_valid && other.meanlogs_valid;
        if self.meanlogs_valid {
            self.meanlogs = (self.meanlogs * self_count + other.meanlogs * other_count) / n;
        }

        self.count = combined_count;
        self.mean = combined_mean;
        self.variance_acc = combined_acc;
        self.sum += other.sum;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }
}

impl Sketch for RunningStatistics {
    type Item = f64;

    /// NaN items are skipped
    fn update(&mut self, item: &Self::Item) {
        if !item.is_nan() {
            self.add(*item);
        }
    }

    fn merge(&mut self, other: &Self) -> Result<(), MergeError> {
        self.merge_stats(other);
        Ok(())
    }

    fn clear(&mut self) {
        *self = Self::new();
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>()
    }

    fn count(&self) -> u64 {
        self.count
    }
}

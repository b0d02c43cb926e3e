//! Per-metric histogram builder
//!
//! Feeds every finite sample to a [`RunningStatistics`] and a bounded
//! [`Reservoir`], counts NaN samples separately, and keeps diagnostics,
//! a description and summary options alongside.

use core::num::NonZeroUsize;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use super::config::DEFAULT_MAX_NUM_SAMPLE_VALUES_NZ;
use super::{
    ConfigError, Diagnostic, DiagnosticMap, HistogramConfig, HistogramSnapshot, RunningSnapshot,
    SummaryOptions, UnitAndDirection,
};
use crate::sampling::{RandomSource, Reservoir};
use crate::statistics::RunningStatistics;
use crate::traits::MergeError;

#[cfg(feature = "std")]
use std::{format, string::String};

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::{format, string::String};

/// Incrementally built histogram of one named metric
///
/// Mutation takes `&mut self` and [`snapshot`](Self::snapshot) takes `&self`,
/// so any number of snapshots can be read at once but never while a sample
/// is being added. Callers with several producers must funnel them through
/// one owner (a mutex or a channel).
///
/// # Example
///
/// ```
/// use histostats::histogram::{Diagnostic, HistogramBuilder, Unit};
///
/// let mut hist = HistogramBuilder::with_seed("load_time", Unit::Ms, 7);
/// hist.set_description("Time to first paint");
/// hist.add_diagnostic("bots", Diagnostic::generic_set(["\"linux-perf\""]));
///
/// for v in [1.0, 2.0, f64::NAN, 3.0, 4.0] {
///     hist.add_sample(v);
/// }
///
/// let snapshot = hist.snapshot();
/// assert_eq!(snapshot.num_nans, 1);
/// assert_eq!(snapshot.sample_values, vec![1.0, 2.0, 3.0, 4.0]);
/// assert_eq!(snapshot.running.unwrap().count, 4);
/// ```
#[derive(Clone, Debug)]
pub struct HistogramBuilder<R = SmallRng> {
    name: String,
    description: String,
    unit: UnitAndDirection,
    diagnostics: DiagnosticMap,
    running: RunningStatistics,
    reservoir: Reservoir<f64>,
    num_nans: u64,
    summary_options: Option<SummaryOptions>,
    rng: R,
}

#[cfg(feature = "std")]
impl HistogramBuilder<SmallRng> {
    /// Create a builder with the default sample cap, seeded from the OS
    pub fn new(name: impl Into<String>, unit: impl Into<UnitAndDirection>) -> Self {
        Self::from_parts(
            name.into(),
            unit.into(),
            DEFAULT_MAX_NUM_SAMPLE_VALUES_NZ,
            SmallRng::from_os_rng(),
        )
    }

    /// Create a builder from a configuration, seeded from the OS
    pub fn with_config(
        name: impl Into<String>,
        unit: impl Into<UnitAndDirection>,
        config: &HistogramConfig,
    ) -> Result<Self, ConfigError> {
        Self::with_rng(name, unit, config, SmallRng::from_os_rng())
    }
}

impl HistogramBuilder<SmallRng> {
    /// Create a builder with the default sample cap and a fixed seed
    ///
    /// Two builders with the same seed fed the same samples retain the same
    /// values.
    pub fn with_seed(name: impl Into<String>, unit: impl Into<UnitAndDirection>, seed: u64) -> Self {
        Self::from_parts(
            name.into(),
            unit.into(),
            DEFAULT_MAX_NUM_SAMPLE_VALUES_NZ,
            SmallRng::seed_from_u64(seed),
        )
    }
}

impl<R: RandomSource> HistogramBuilder<R> {
    /// Create a builder with an explicit configuration and random source
    pub fn with_rng(
        name: impl Into<String>,
        unit: impl Into<UnitAndDirection>,
        config: &HistogramConfig,
        rng: R,
    ) -> Result<Self, ConfigError> {
        let cap = config.validate()?;
        Ok(Self::from_parts(name.into(), unit.into(), cap, rng))
    }

    fn from_parts(name: String, unit: UnitAndDirection, cap: NonZeroUsize, rng: R) -> Self {
        Self {
            name,
            description: String::new(),
            unit,
            diagnostics: DiagnosticMap::new(),
            running: RunningStatistics::new(),
            reservoir: Reservoir::new(cap),
            num_nans: 0,
            summary_options: None,
            rng,
        }
    }

    /// Add one sample
    ///
    /// NaN only bumps the NaN count. Other values update the running
    /// statistics and are offered to the reservoir at stream position
    /// `num_nans + count`, so NaNs still advance the stream.
    pub fn add_sample(&mut self, value: f64) {
        if value.is_nan() {
            self.num_nans += 1;
            tracing::trace!(histogram = %self.name, num_nans = self.num_nans, "NaN sample");
            return;
        }

        self.running.add(value);
        let stream_length = self.num_nans + self.running.count();
        self.reservoir.offer_at(stream_length, value, &mut self.rng);
    }

    /// Add every sample from `values`, in order
    pub fn add_samples(&mut self, values: impl IntoIterator<Item = f64>) {
        for value in values {
            self.add_sample(value);
        }
    }

    /// Attach a diagnostic, replacing any previous one under `key`
    pub fn add_diagnostic(&mut self, key: impl Into<String>, value: Diagnostic) {
        self.diagnostics.insert(key, value);
    }

    /// Set the free-text description
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Set which summary statistics consumers should display
    pub fn set_summary_options(&mut self, options: SummaryOptions) {
        self.summary_options = Some(options);
    }

    /// Get the metric name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the description, empty if never set
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Get the unit and improvement direction
    pub fn unit(&self) -> UnitAndDirection {
        self.unit
    }

    /// Get the attached diagnostics
    pub fn diagnostics(&self) -> &DiagnosticMap {
        &self.diagnostics
    }

    /// Get the running statistics over every finite sample
    pub fn running(&self) -> &RunningStatistics {
        &self.running
    }

    /// Retained samples, in retention order
    pub fn sample_values(&self) -> &[f64] {
        self.reservoir.sample()
    }

    /// Get the maximum number of retained samples
    pub fn max_num_sample_values(&self) -> usize {
        self.reservoir.capacity().get()
    }

    /// Get the number of NaN samples seen
    pub fn num_nans(&self) -> u64 {
        self.num_nans
    }

    /// Get the summary options, `None` when never set
    pub fn summary_options(&self) -> Option<&SummaryOptions> {
        self.summary_options.as_ref()
    }

    /// Assemble a detached snapshot of the current state
    pub fn snapshot(&self) -> HistogramSnapshot {
        HistogramSnapshot {
            name: self.name.clone(),
            description: self.description.clone(),
            unit: self.unit,
            diagnostics: self.diagnostics.clone(),
            sample_values: self.reservoir.sample().to_vec(),
            max_num_sample_values: self.max_num_sample_values(),
            num_nans: self.num_nans,
            running: RunningSnapshot::capture(&self.running),
            summary_options: self.summary_options.clone(),
        }
    }

    /// Fold another histogram of the same metric into this one
    ///
    /// Statistics and NaN counts add up, the retained samples are resampled
    /// in proportion to each side's stream length, and `other`'s diagnostics
    /// overwrite ours on key collisions. Our description and summary options
    /// win when set.
    pub fn merge<S>(&mut self, other: &HistogramBuilder<S>) -> Result<(), MergeError> {
        if self.name != other.name {
            return Err(MergeError::IncompatibleConfig {
                expected: format!("name={}", self.name),
                found: format!("name={}", other.name),
            });
        }
        if self.unit != other.unit {
            return Err(MergeError::IncompatibleConfig {
                expected: format!("unit={}", self.unit),
                found: format!("unit={}", other.unit),
            });
        }

        self.reservoir.merge_from(&other.reservoir, &mut self.rng)?;
        self.running.merge_stats(&other.running);
        self.num_nans += other.num_nans;
        self.diagnostics.extend_from(&other.diagnostics);

        if self.description.is_empty() {
            self.description.clone_from(&other.description);
        }
        if self.summary_options.is_none() {
            self.summary_options.clone_from(&other.summary_options);
        }

        tracing::debug!(
            histogram = %self.name,
            count = self.running.count(),
            num_nans = self.num_nans,
            "merged histogram"
        );
        Ok(())
    }
}

//! Immutable histogram snapshots
//!
//! A snapshot is a detached copy of a builder's state, shaped for an
//! external serializer. With the `serde` feature it serializes with
//! camelCase keys; `running.meanlogs` is left out entirely when the mean of
//! logarithms is undefined or not finite, so consumers can tell "absent"
//! from zero and never see a bare `null`.

use super::{DiagnosticMap, SummaryOptions, UnitAndDirection};
use crate::statistics::RunningStatistics;

#[cfg(feature = "std")]
use std::{string::String, vec::Vec};

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};

/// Running-statistics record of a snapshot
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RunningSnapshot {
    pub count: u64,
    pub mean: f64,
    pub max: f64,
    pub min: f64,
    pub sum: f64,
    /// Mean of `ln(|x|)`; `None` after a negative sample or when the
    /// accumulated value is infinite or NaN (zero samples)
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub meanlogs: Option<f64>,
    /// Bessel-corrected sample variance
    pub variance: f64,
}

impl RunningSnapshot {
    /// Capture `stats`, or `None` if it has not seen any sample
    pub fn capture(stats: &RunningStatistics) -> Option<Self> {
        let (min, max) = (stats.min()?, stats.max()?);
        Some(Self {
            count: stats.count(),
            mean: stats.mean(),
            max,
            min,
            sum: stats.sum(),
            meanlogs: stats.meanlogs().filter(|m| m.is_finite()),
            variance: stats.variance(),
        })
    }
}

/// Point-in-time view of a histogram
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct HistogramSnapshot {
    pub name: String,
    pub description: String,
    pub unit: UnitAndDirection,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "DiagnosticMap::is_empty"))]
    pub diagnostics: DiagnosticMap,
    /// Retained samples in retention order
    pub sample_values: Vec<f64>,
    pub max_num_sample_values: usize,
    pub num_nans: u64,
    /// `None` until a finite sample has been added
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub running: Option<RunningSnapshot>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub summary_options: Option<SummaryOptions>,
}

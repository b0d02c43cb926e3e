//! Summary-reporting preferences
//!
//! Tell the dashboard which derived statistics to display for a histogram.
//! The builder stores them as-is; nothing here is validated.

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Which summary statistics to report
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct SummaryOptions {
    pub avg: bool,
    pub count: bool,
    pub max: bool,
    pub min: bool,
    pub std: bool,
    pub sum: bool,
    pub nans: bool,
    pub geometric_mean: bool,
    /// Percentiles to report, as fractions in `[0, 1]`
    pub percentile: Vec<f64>,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            avg: true,
            count: true,
            max: true,
            min: true,
            std: true,
            sum: true,
            nans: false,
            geometric_mean: false,
            percentile: Vec::new(),
        }
    }
}

impl SummaryOptions {
    /// Options with every statistic switched off
    pub fn none() -> Self {
        Self {
            avg: false,
            count: false,
            max: false,
            min: false,
            std: false,
            sum: false,
            nans: false,
            geometric_mean: false,
            percentile: Vec::new(),
        }
    }

    /// Set whether the geometric mean is displayed
    pub fn with_geometric_mean(mut self, enabled: bool) -> Self {
        self.geometric_mean = enabled;
        self
    }

    /// Set whether the NaN count is displayed
    pub fn with_nans(mut self, enabled: bool) -> Self {
        self.nans = enabled;
        self
    }

    /// Set the percentiles to display
    pub fn with_percentiles(mut self, percentiles: impl IntoIterator<Item = f64>) -> Self {
        self.percentile = percentiles.into_iter().collect();
        self
    }
}

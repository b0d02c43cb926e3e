//! Histogram builder configuration

use core::num::NonZeroUsize;

/// Default number of raw sample values a histogram retains
pub const DEFAULT_MAX_NUM_SAMPLE_VALUES: usize = 10;

pub(crate) const DEFAULT_MAX_NUM_SAMPLE_VALUES_NZ: NonZeroUsize =
    match NonZeroUsize::new(DEFAULT_MAX_NUM_SAMPLE_VALUES) {
        Some(n) => n,
        None => panic!("default sample cap must be positive"),
    };

/// Error raised when a configuration cannot be used
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The reservoir needs room for at least one sample
    #[error("max_num_sample_values must be greater than 0")]
    ZeroMaxNumSampleValues,
}

/// Construction-time settings for a [`HistogramBuilder`](super::HistogramBuilder)
///
/// ```
/// use histostats::histogram::{ConfigError, HistogramConfig};
///
/// let config = HistogramConfig::default();
/// assert_eq!(config.max_num_sample_values, 10);
///
/// let bad = HistogramConfig::default().with_max_num_sample_values(0);
/// assert_eq!(bad.validate(), Err(ConfigError::ZeroMaxNumSampleValues));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct HistogramConfig {
    /// Upper bound on retained raw samples
    pub max_num_sample_values: usize,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            max_num_sample_values: DEFAULT_MAX_NUM_SAMPLE_VALUES,
        }
    }
}

impl HistogramConfig {
    /// Set the maximum number of retained samples
    pub fn with_max_num_sample_values(mut self, max: usize) -> Self {
        self.max_num_sample_values = max;
        self
    }

    /// Check the settings, returning the validated sample cap
    pub fn validate(&self) -> Result<NonZeroUsize, ConfigError> {
        NonZeroUsize::new(self.max_num_sample_values).ok_or_else(|| {
            tracing::debug!("rejected histogram config with zero sample cap");
            ConfigError::ZeroMaxNumSampleValues
        })
    }
}

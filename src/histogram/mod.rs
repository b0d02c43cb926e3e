//! Per-metric histograms
//!
//! A [`HistogramBuilder`] combines exact [`RunningStatistics`] with a bounded
//! uniform sample of raw values, plus the metadata a dashboard needs: unit,
//! description, diagnostics and summary options. [`HistogramBuilder::snapshot`]
//! hands out an immutable [`HistogramSnapshot`] for serialization.
//!
//! # Example
//!
//! ```
//! use histostats::histogram::{HistogramBuilder, UnitAndDirection};
//!
//! let unit = UnitAndDirection::from_legacy_name("ms_smallerIsBetter");
//! let mut hist = HistogramBuilder::with_seed("frame_time", unit, 1);
//!
//! for v in 0..1000 {
//!     hist.add_sample(v as f64);
//! }
//!
//! let snapshot = hist.snapshot();
//! assert_eq!(snapshot.sample_values.len(), 10);
//! assert_eq!(snapshot.running.unwrap().count, 1000);
//! ```
//!
//! [`RunningStatistics`]: crate::statistics::RunningStatistics

mod builder;
mod config;
mod diagnostic;
mod snapshot;
mod summary;
mod unit;

pub use builder::HistogramBuilder;
pub use config::{ConfigError, HistogramConfig, DEFAULT_MAX_NUM_SAMPLE_VALUES};
pub use diagnostic::{Diagnostic, DiagnosticMap};
pub use snapshot::{HistogramSnapshot, RunningSnapshot};
pub use summary::SummaryOptions;
pub use unit::{ImprovementDirection, Unit, UnitAndDirection};

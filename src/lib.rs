//! # Histostats
//!
//! Streaming performance histograms for Rust.
//!
//! Histostats ingests an unbounded stream of measurements per metric and keeps
//! two things in constant memory: exact running aggregates, and a bounded
//! uniform sample of the raw values.
//!
//! ## Features
//!
//! - **Running Statistics**: count, mean, min, max, sum, sample variance and
//!   mean of logarithms via Welford's method
//! - **Reservoir Sampling**: bounded, uniformly random subset of the stream
//!   with an injectable random source
//! - **Histogram Builder**: per-metric orchestration with NaN accounting,
//!   diagnostics, units and detached snapshots
//! - **Mergeability**: statistics, reservoirs and histograms combine across
//!   workers
//!
//! ## Quick Start
//!
//! ```rust
//! use histostats::prelude::*;
//!
//! let mut hist = HistogramBuilder::with_seed("load_time", Unit::Ms, 42);
//! for v in [12.0, 15.5, f64::NAN, 11.25] {
//!     hist.add_sample(v);
//! }
//!
//! let snapshot = hist.snapshot();
//! assert_eq!(snapshot.num_nans, 1);
//! assert_eq!(snapshot.running.unwrap().count, 3);
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Standard library support, OS-seeded builders
//! - `serde`: Serialize snapshots, deserialize configuration
//! - `libm`: Float math for `no_std` builds (`--no-default-features
//!   --features libm`)

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("histostats needs either the `std` or the `libm` feature for float math");

// Core traits always available
pub mod traits;

mod math;

pub mod histogram;
pub mod sampling;
pub mod statistics;

pub mod prelude {
    pub use crate::traits::*;

    pub use crate::histogram::{
        Diagnostic, HistogramBuilder, HistogramConfig, HistogramSnapshot, SummaryOptions, Unit,
        UnitAndDirection,
    };
    pub use crate::sampling::{RandomSource, Reservoir};
    pub use crate::statistics::RunningStatistics;
}

pub use histogram::{HistogramBuilder, HistogramSnapshot};
pub use sampling::Reservoir;
pub use statistics::RunningStatistics;

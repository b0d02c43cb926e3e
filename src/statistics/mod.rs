//! Statistical summaries for streaming data
//!
//! This module provides algorithms for computing statistics over streams
//! in a single pass with constant memory.
//!
//! # Example
//!
//! ```
//! use histostats::statistics::RunningStatistics;
//!
//! let mut stats = RunningStatistics::new();
//!
//! for value in [1.0, 2.0, 3.0, 4.0, 5.0] {
//!     stats.add(value);
//! }
//!
//! println!("Mean: {}", stats.mean());
//! println!("Stddev: {}", stats.stddev());
//! println!("Min: {:?}", stats.min());
//! println!("Max: {:?}", stats.max());
//! println!("Geometric mean: {:?}", stats.geometric_mean());
//! ```

mod running;

pub use running::RunningStatistics;

//! Stream sampling algorithms
//!
//! This module provides algorithms for maintaining random samples from streams.
//! Useful when you need representative samples but can't store all data.
//!
//! # Example
//!
//! ```
//! use core::num::NonZeroUsize;
//! use histostats::sampling::Reservoir;
//! use rand::{rngs::SmallRng, SeedableRng};
//!
//! let mut rng = SmallRng::seed_from_u64(7);
//! let mut reservoir = Reservoir::new(NonZeroUsize::new(10).unwrap());
//!
//! // Stream a million items, keep a uniform sample of 10
//! for i in 0..1_000_000 {
//!     reservoir.add(i, &mut rng);
//! }
//!
//! assert_eq!(reservoir.sample().len(), 10);
//! ```

mod random;
mod reservoir;

pub use random::RandomSource;
#[cfg(test)]
pub(crate) use random::Scripted;
pub use reservoir::{offer, Reservoir};

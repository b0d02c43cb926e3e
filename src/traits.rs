//! Core traits for streaming accumulators
//!
//! The leaf accumulators implement the base [`Sketch`] trait so they can be
//! fed, combined and reset through one interface.

use core::fmt::Debug;

#[cfg(feature = "std")]
use std::string::String;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::string::String;

/// Error during a merge of two accumulators
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    /// Accumulators have incompatible configurations
    #[error("incompatible config: expected {expected}, found {found}")]
    IncompatibleConfig {
        expected: String,
        found: String,
    },
}

/// Core trait for streaming accumulators
pub trait Sketch: Clone + Debug {
    /// The type of item this sketch processes
    type Item: ?Sized;

    /// Add an item to the sketch
    fn update(&mut self, item: &Self::Item);

    /// Merge another sketch into this one
    ///
    /// Returns an error if sketches are incompatible
    fn merge(&mut self, other: &Self) -> Result<(), MergeError>;

    /// Reset sketch to empty state
    fn clear(&mut self);

    /// Memory usage in bytes
    fn size_bytes(&self) -> usize;

    /// Number of items processed
    fn count(&self) -> u64;

    /// Check if sketch is empty
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_error_display() {
        let err = MergeError::IncompatibleConfig {
            expected: "capacity=10".into(),
            found: "capacity=20".into(),
        };

        assert_eq!(
            err.to_string(),
            "incompatible config: expected capacity=10, found capacity=20"
        );
    }
}

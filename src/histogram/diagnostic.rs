//! Diagnostics attached to a histogram
//!
//! A diagnostic is caller-defined metadata (provenance, grouping, bot name,
//! ...). The builder never looks inside one; it only stores them by key.

#[cfg(feature = "std")]
use std::{collections::BTreeMap, string::String, vec::Vec};

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::{collections::BTreeMap, string::String, vec::Vec};

/// Opaque per-histogram annotation
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub enum Diagnostic {
    /// Set of JSON-encoded values
    GenericSet(Vec<String>),
    /// Reference to a diagnostic shared across histograms, by GUID
    #[cfg_attr(feature = "serde", serde(rename = "sharedDiagnosticGuid"))]
    SharedDiagnostic(String),
}

impl Diagnostic {
    /// Build a generic set from anything string-like
    ///
    /// ```
    /// use histostats::histogram::Diagnostic;
    ///
    /// let bots = Diagnostic::generic_set(["\"linux-perf\""]);
    /// assert_eq!(bots, Diagnostic::GenericSet(vec!["\"linux-perf\"".to_string()]));
    /// ```
    pub fn generic_set<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Diagnostic::GenericSet(values.into_iter().map(Into::into).collect())
    }

    /// Reference a shared diagnostic by GUID
    pub fn shared(guid: impl Into<String>) -> Self {
        Diagnostic::SharedDiagnostic(guid.into())
    }
}

/// Diagnostics keyed by name; inserting under an existing key replaces it
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct DiagnosticMap {
    entries: BTreeMap<String, Diagnostic>,
}

impl DiagnosticMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite, returning the replaced value
    pub fn insert(&mut self, key: impl Into<String>, value: Diagnostic) -> Option<Diagnostic> {
        self.entries.insert(key.into(), value)
    }

    /// Get the diagnostic stored under `key`
    pub fn get(&self, key: &str) -> Option<&Diagnostic> {
        self.entries.get(key)
    }

    /// Check if a diagnostic is stored under `key`
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Get the number of diagnostics
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no diagnostic is attached
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Diagnostic)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Copy every entry of `other` over this map
    pub fn extend_from(&mut self, other: &DiagnosticMap) {
        for (key, value) in &other.entries {
            self.entries.insert(key.clone(), value.clone());
        }
    }
}

//! Units and improvement directions
//!
//! Metrics arrive tagged with short legacy unit names such as `"ms"` or
//! `"sizeInBytes_smallerIsBetter"`. These map onto the canonical [`Unit`]
//! identifiers the dashboard ingests.

use core::fmt;

/// Canonical measurement unit
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum Unit {
    Ms,
    MsBestFitFormat,
    TsMs,
    NPercent,
    SizeInBytes,
    BytesPerSecond,
    J,
    W,
    A,
    V,
    Hertz,
    #[default]
    Unitless,
    Count,
    Sigma,
}

impl Unit {
    /// Map a legacy unit name to its canonical unit
    ///
    /// Everything from the first `_` on is an improvement-direction suffix
    /// and is ignored. Unknown names map to [`Unit::Unitless`].
    ///
    /// ```
    /// use histostats::histogram::Unit;
    ///
    /// assert_eq!(Unit::from_legacy_name("ms"), Unit::Ms);
    /// assert_eq!(Unit::from_legacy_name("ms_smallerIsBetter"), Unit::Ms);
    /// assert_eq!(Unit::from_legacy_name("notaunit"), Unit::Unitless);
    /// ```
    pub fn from_legacy_name(name: &str) -> Self {
        let base = match name.find('_') {
            Some(idx) => &name[..idx],
            None => name,
        };

        match base {
            "ms" => Unit::Ms,
            "msBestFitFormat" => Unit::MsBestFitFormat,
            "tsMs" => Unit::TsMs,
            "n%" => Unit::NPercent,
            "sizeInBytes" => Unit::SizeInBytes,
            "bytesPerSecond" => Unit::BytesPerSecond,
            "J" => Unit::J,
            "W" => Unit::W,
            "A" => Unit::A,
            "V" => Unit::V,
            "Hz" => Unit::Hertz,
            "unitless" => Unit::Unitless,
            "count" => Unit::Count,
            "sigma" => Unit::Sigma,
            _ => Unit::Unitless,
        }
    }

    /// Legacy short name, without direction suffix
    pub fn legacy_name(self) -> &'static str {
        match self {
            Unit::Ms => "ms",
            Unit::MsBestFitFormat => "msBestFitFormat",
            Unit::TsMs => "tsMs",
            Unit::NPercent => "n%",
            Unit::SizeInBytes => "sizeInBytes",
            Unit::BytesPerSecond => "bytesPerSecond",
            Unit::J => "J",
            Unit::W => "W",
            Unit::A => "A",
            Unit::V => "V",
            Unit::Hertz => "Hz",
            Unit::Unitless => "unitless",
            Unit::Count => "count",
            Unit::Sigma => "sigma",
        }
    }

    /// Canonical identifier, e.g. `"TS_MS"`
    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Ms => "MS",
            Unit::MsBestFitFormat => "MS_BEST_FIT_FORMAT",
            Unit::TsMs => "TS_MS",
            Unit::NPercent => "N_PERCENT",
            Unit::SizeInBytes => "SIZE_IN_BYTES",
            Unit::BytesPerSecond => "BYTES_PER_SECOND",
            Unit::J => "J",
            Unit::W => "W",
            Unit::A => "A",
            Unit::V => "V",
            Unit::Hertz => "HERTZ",
            Unit::Unitless => "UNITLESS",
            Unit::Count => "COUNT",
            Unit::Sigma => "SIGMA",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which way a metric should move to count as an improvement
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum ImprovementDirection {
    #[default]
    NotSpecified,
    BiggerIsBetter,
    SmallerIsBetter,
}

/// A unit together with its improvement direction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct UnitAndDirection {
    pub unit: Unit,
    pub improvement_direction: ImprovementDirection,
}

impl UnitAndDirection {
    /// Pair a unit with an improvement direction
    pub fn new(unit: Unit, improvement_direction: ImprovementDirection) -> Self {
        Self {
            unit,
            improvement_direction,
        }
    }

    /// Parse a legacy name including its optional direction suffix
    ///
    /// ```
    /// use histostats::histogram::{ImprovementDirection, Unit, UnitAndDirection};
    ///
    /// let parsed = UnitAndDirection::from_legacy_name("tsMs_smallerIsBetter");
    /// assert_eq!(parsed.unit, Unit::TsMs);
    /// assert_eq!(parsed.improvement_direction, ImprovementDirection::SmallerIsBetter);
    /// ```
    pub fn from_legacy_name(name: &str) -> Self {
        let improvement_direction = match name.split_once('_') {
            Some((_, "biggerIsBetter")) => ImprovementDirection::BiggerIsBetter,
            Some((_, "smallerIsBetter")) => ImprovementDirection::SmallerIsBetter,
            _ => ImprovementDirection::NotSpecified,
        };

        Self {
            unit: Unit::from_legacy_name(name),
            improvement_direction,
        }
    }
}

impl From<Unit> for UnitAndDirection {
    fn from(unit: Unit) -> Self {
        Self::new(unit, ImprovementDirection::NotSpecified)
    }
}

impl fmt::Display for UnitAndDirection {
    /// Formats as the legacy name, e.g. `sigma_biggerIsBetter`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.unit.legacy_name())?;
        match self.improvement_direction {
            ImprovementDirection::NotSpecified => Ok(()),
            ImprovementDirection::BiggerIsBetter => f.write_str("_biggerIsBetter"),
            ImprovementDirection::SmallerIsBetter => f.write_str("_smallerIsBetter"),
        }
    }
}

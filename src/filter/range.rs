//! Range filters.
//!
//! A [`RangeFilter`] is a `min`/`max` pair clamped to a domain. Depth, magnitude
//! and intensity filtering are thin wrappers that fix the value name, the domain
//! and (for depth) the unit of the exposed bounds.

use std::fmt;

use crate::config::{MAX_INTENSITY, MIN_INTENSITY};
use crate::error_handling::FilterError;
use crate::units::DistanceUnit;

/// A bounded `min <= max` pair inside `[domain_min, domain_max]`.
///
/// ±infinity is a legal bound meaning "no bound". Every mutation is checked
/// against the domain and against the current value of the other endpoint; a
/// rejected mutation leaves the filter unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeFilter {
    min: f64,
    max: f64,
    value_name: &'static str,
    domain_min: f64,
    domain_max: f64,
}

impl RangeFilter {
    /// Creates a range over an open domain (`-inf..=inf`).
    pub fn new(min: f64, max: f64, value_name: &'static str) -> Result<Self, FilterError> {
        Self::with_domain(min, max, value_name, f64::NEG_INFINITY, f64::INFINITY)
    }

    /// Creates a range clamped to `[domain_min, domain_max]`.
    ///
    /// # Errors
    ///
    /// - [`FilterError::NotANumber`] if either bound is NaN
    /// - [`FilterError::OutOfRange`] if a bound leaves the domain or `min > max`
    pub fn with_domain(
        min: f64,
        max: f64,
        value_name: &'static str,
        domain_min: f64,
        domain_max: f64,
    ) -> Result<Self, FilterError> {
        // Start from the whole domain so each endpoint is checked exactly the
        // way a later setter would check it.
        let mut range = Self::unbounded(value_name, domain_min, domain_max);
        range.set_min(min)?;
        range.set_max(max)?;
        Ok(range)
    }

    /// A range spanning its whole domain.
    pub(crate) const fn unbounded(value_name: &'static str, domain_min: f64, domain_max: f64) -> Self {
        Self {
            min: domain_min,
            max: domain_max,
            value_name,
            domain_min,
            domain_max,
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn value_name(&self) -> &'static str {
        self.value_name
    }

    pub fn domain_min(&self) -> f64 {
        self.domain_min
    }

    pub fn domain_max(&self) -> f64 {
        self.domain_max
    }

    /// Sets the lower bound, re-checking it against the current maximum.
    pub fn set_min(&mut self, min: f64) -> Result<(), FilterError> {
        if min.is_nan() {
            return Err(FilterError::NotANumber { field: "min" });
        }
        if min < self.domain_min {
            return Err(FilterError::out_of_range(
                "min",
                format!(
                    "{} must not be less than {}",
                    capitalize(self.value_name),
                    self.domain_min
                ),
            ));
        }
        if min > self.max {
            return Err(FilterError::out_of_range(
                "min",
                format!(
                    "Minimum {0} must not be greater than the maximum {0}.",
                    self.value_name
                ),
            ));
        }
        self.min = min;
        Ok(())
    }

    /// Sets the upper bound, re-checking it against the current minimum.
    pub fn set_max(&mut self, max: f64) -> Result<(), FilterError> {
        if max.is_nan() {
            return Err(FilterError::NotANumber { field: "max" });
        }
        if max > self.domain_max {
            return Err(FilterError::out_of_range(
                "max",
                format!(
                    "{} must not be greater than {}",
                    capitalize(self.value_name),
                    self.domain_max
                ),
            ));
        }
        if max < self.min {
            return Err(FilterError::out_of_range(
                "max",
                format!(
                    "Maximum {0} must not be less than minimum {0}.",
                    self.value_name
                ),
            ));
        }
        self.max = max;
        Ok(())
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Writes `"<label>: <value>"`, or `"<label>: No restriction"` for an infinite bound.
fn write_bound(f: &mut fmt::Formatter<'_>, label: &str, value: f64, suffix: impl fmt::Display) -> fmt::Result {
    if value.is_infinite() {
        write!(f, "{label}: No restriction")
    } else {
        write!(f, "{label}: {value}{suffix}")
    }
}

/// Filters events by hypocentre depth.
///
/// Depth is stored in kilometres and can be read or written in miles. It may be
/// negative: very shallow events are sometimes located above the reference
/// surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthFilter {
    range: RangeFilter,
}

impl DepthFilter {
    /// Creates a depth filter with bounds given in `unit` (`"km"` or `"mi"`).
    ///
    /// # Errors
    ///
    /// - [`FilterError::InvalidUnit`] if `unit` is not `km`/`mi` after trimming
    /// - [`FilterError::OutOfRange`] if `min > max`
    pub fn new(min_depth: f64, max_depth: f64, unit: &str) -> Result<Self, FilterError> {
        let unit = DistanceUnit::parse(unit)?;
        let range = RangeFilter::new(
            unit.convert(min_depth, DistanceUnit::Km),
            unit.convert(max_depth, DistanceUnit::Km),
            "depth",
        )?;
        Ok(Self { range })
    }

    /// Creates a depth filter with bounds in kilometres.
    pub fn km(min_depth: f64, max_depth: f64) -> Result<Self, FilterError> {
        Ok(Self {
            range: RangeFilter::new(min_depth, max_depth, "depth")?,
        })
    }

    pub fn min_km(&self) -> f64 {
        self.range.min()
    }

    pub fn max_km(&self) -> f64 {
        self.range.max()
    }

    pub fn min_mi(&self) -> f64 {
        DistanceUnit::Km.convert(self.min_km(), DistanceUnit::Mi)
    }

    pub fn max_mi(&self) -> f64 {
        DistanceUnit::Km.convert(self.max_km(), DistanceUnit::Mi)
    }

    pub fn set_min_km(&mut self, min_km: f64) -> Result<(), FilterError> {
        self.range.set_min(min_km)
    }

    pub fn set_max_km(&mut self, max_km: f64) -> Result<(), FilterError> {
        self.range.set_max(max_km)
    }

    pub fn set_min_mi(&mut self, min_mi: f64) -> Result<(), FilterError> {
        self.range
            .set_min(DistanceUnit::Mi.convert(min_mi, DistanceUnit::Km))
    }

    pub fn set_max_mi(&mut self, max_mi: f64) -> Result<(), FilterError> {
        self.range
            .set_max(DistanceUnit::Mi.convert(max_mi, DistanceUnit::Km))
    }
}

impl Default for DepthFilter {
    /// No depth restriction.
    fn default() -> Self {
        Self {
            range: RangeFilter::unbounded("depth", f64::NEG_INFINITY, f64::INFINITY),
        }
    }
}

impl fmt::Display for DepthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_bound(f, "Minimum depth", self.min_km(), format_args!("km ({}mi)", self.min_mi()))?;
        f.write_str("\n")?;
        write_bound(f, "Maximum depth", self.max_km(), format_args!("km ({}mi)", self.max_mi()))
    }
}

/// Filters events by magnitude.
///
/// The scale is logarithmic, so negative magnitudes are legal (if unremarkable).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnitudeFilter {
    range: RangeFilter,
}

impl MagnitudeFilter {
    pub fn new(min_mag: f64, max_mag: f64) -> Result<Self, FilterError> {
        Ok(Self {
            range: RangeFilter::new(min_mag, max_mag, "magnitude")?,
        })
    }

    /// Only a lower bound; no maximum.
    pub fn at_least(min_mag: f64) -> Result<Self, FilterError> {
        Self::new(min_mag, f64::INFINITY)
    }

    pub fn min(&self) -> f64 {
        self.range.min()
    }

    pub fn max(&self) -> f64 {
        self.range.max()
    }

    pub fn set_min(&mut self, min_mag: f64) -> Result<(), FilterError> {
        self.range.set_min(min_mag)
    }

    pub fn set_max(&mut self, max_mag: f64) -> Result<(), FilterError> {
        self.range.set_max(max_mag)
    }
}

impl Default for MagnitudeFilter {
    /// No magnitude restriction.
    fn default() -> Self {
        Self {
            range: RangeFilter::unbounded("magnitude", f64::NEG_INFINITY, f64::INFINITY),
        }
    }
}

impl fmt::Display for MagnitudeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_bound(f, "Minimum magnitude", self.min(), "")?;
        f.write_str("\n")?;
        write_bound(f, "Maximum magnitude", self.max(), "")
    }
}

/// Filters events by maximum reported intensity on the Modified Mercalli
/// scale, which runs from 0 to 12.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntensityFilter {
    range: RangeFilter,
}

impl IntensityFilter {
    pub fn new(min_intensity: f64, max_intensity: f64) -> Result<Self, FilterError> {
        Ok(Self {
            range: RangeFilter::with_domain(
                min_intensity,
                max_intensity,
                "intensity",
                MIN_INTENSITY,
                MAX_INTENSITY,
            )?,
        })
    }

    pub fn min(&self) -> f64 {
        self.range.min()
    }

    pub fn max(&self) -> f64 {
        self.range.max()
    }

    pub fn set_min(&mut self, min_intensity: f64) -> Result<(), FilterError> {
        self.range.set_min(min_intensity)
    }

    pub fn set_max(&mut self, max_intensity: f64) -> Result<(), FilterError> {
        self.range.set_max(max_intensity)
    }
}

impl Default for IntensityFilter {
    /// The full intensity scale.
    fn default() -> Self {
        Self {
            range: RangeFilter::unbounded("intensity", MIN_INTENSITY, MAX_INTENSITY),
        }
    }
}

impl fmt::Display for IntensityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Minimum intensity: {}\nMaximum intensity: {}",
            self.min(),
            self.max()
        )
    }
}

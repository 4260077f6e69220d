//! The composite earthquake filter.
//!
//! [`EarthquakeFilter`] owns one of every sub-filter plus the impact level and
//! the minimum report count. Omitted sub-filters are replaced once, at
//! construction, by their canonical unrestricted instance.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use super::location::{
    CircleDistanceLocationFilter, CircleLocationFilter, LocationFilter, RectLocationFilter,
};
use super::range::{DepthFilter, IntensityFilter, MagnitudeFilter};
use super::time::TimeFilter;
use crate::config::MIN_REPORTS;
use crate::error_handling::{FilterError, TypeMismatch, ValueKind};

/// PAGER impact level: the estimated severity of an event's human and
/// economic impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum ImpactLevel {
    /// Little or no damage
    Green,
    /// Slight damage
    Yellow,
    /// Moderate damage
    Orange,
    /// Severe damage
    Red,
}

impl ImpactLevel {
    /// Parses a level, ignoring surrounding whitespace. Case-sensitive.
    pub fn parse(level: &str) -> Result<Self, FilterError> {
        let trimmed = level.trim();
        ImpactLevel::from_str(trimmed)
            .map_err(|_| FilterError::InvalidImpactLevel(trimmed.to_string()))
    }
}

/// A settable field of [`EarthquakeFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Field {
    TimeFilter,
    LocationFilter,
    DepthFilter,
    MagnitudeFilter,
    IntensityFilter,
    ImpactLevel,
    MinReports,
}

impl Field {
    /// Field name as it appears in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Field::TimeFilter => "time_filter",
            Field::LocationFilter => "location_filter",
            Field::DepthFilter => "depth_filter",
            Field::MagnitudeFilter => "magnitude_filter",
            Field::IntensityFilter => "intensity_filter",
            Field::ImpactLevel => "impact_level",
            Field::MinReports => "min_reports",
        }
    }
}

/// A loosely-typed value for dynamic assignment to an [`EarthquakeFilter`].
///
/// Used when filter settings arrive without static types (configuration
/// files, scripting bindings). Every assignment is checked against the kinds
/// the target field accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    None,
    Integer(i64),
    Float(f64),
    Text(String),
    Instant(NaiveDateTime),
    Time(TimeFilter),
    Location(LocationFilter),
    Depth(DepthFilter),
    Magnitude(MagnitudeFilter),
    Intensity(IntensityFilter),
}

impl FilterValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            FilterValue::None => ValueKind::None,
            FilterValue::Integer(_) => ValueKind::Integer,
            FilterValue::Float(_) => ValueKind::Float,
            FilterValue::Text(_) => ValueKind::Text,
            FilterValue::Instant(_) => ValueKind::Instant,
            FilterValue::Time(_) => ValueKind::TimeFilter,
            FilterValue::Location(location) => location.kind(),
            FilterValue::Depth(_) => ValueKind::DepthFilter,
            FilterValue::Magnitude(_) => ValueKind::MagnitudeFilter,
            FilterValue::Intensity(_) => ValueKind::IntensityFilter,
        }
    }
}

macro_rules! filter_value_from {
    ($($source:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$source> for FilterValue {
                fn from(value: $source) -> Self {
                    FilterValue::$variant(value.into())
                }
            }
        )*
    };
}

filter_value_from! {
    i64 => Integer,
    f64 => Float,
    String => Text,
    &str => Text,
    NaiveDateTime => Instant,
    TimeFilter => Time,
    LocationFilter => Location,
    RectLocationFilter => Location,
    CircleLocationFilter => Location,
    CircleDistanceLocationFilter => Location,
    DepthFilter => Depth,
    MagnitudeFilter => Magnitude,
    IntensityFilter => Intensity,
}

fn mismatch(field: Field, expected: &[ValueKind], value: &FilterValue) -> FilterError {
    FilterError::Type(TypeMismatch {
        field: field.name(),
        expected: expected.to_vec(),
        actual: value.kind(),
    })
}

fn check_min_reports(min_reports: i64) -> Result<u64, FilterError> {
    u64::try_from(min_reports).map_err(|_| {
        FilterError::out_of_range(
            "min_reports",
            format!("Minimum reports must not be less than {MIN_REPORTS}"),
        )
    })
}

/// The complete search: every sub-filter plus the scalar restrictions.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use quake_query::{EarthquakeFilter, MagnitudeFilter, TimeFilter};
///
/// let start = NaiveDate::from_ymd_opt(1960, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let end = NaiveDate::from_ymd_opt(1961, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
///
/// let filter = EarthquakeFilter::builder()
///     .time_filter(TimeFilter::between(start, end)?)
///     .magnitude_filter(MagnitudeFilter::at_least(9.4)?)
///     .build()?;
/// assert_eq!(filter.magnitude_filter().min(), 9.4);
/// # Ok::<(), quake_query::FilterError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EarthquakeFilter {
    time_filter: TimeFilter,
    location_filter: LocationFilter,
    depth_filter: DepthFilter,
    magnitude_filter: MagnitudeFilter,
    intensity_filter: IntensityFilter,
    impact_level: Option<ImpactLevel>,
    min_reports: u64,
}

impl Default for EarthquakeFilter {
    /// Everything in the last 30 days, anywhere, of any size.
    fn default() -> Self {
        Self {
            time_filter: TimeFilter::default(),
            location_filter: LocationFilter::default(),
            depth_filter: DepthFilter::default(),
            magnitude_filter: MagnitudeFilter::default(),
            intensity_filter: IntensityFilter::default(),
            impact_level: None,
            min_reports: MIN_REPORTS,
        }
    }
}

impl EarthquakeFilter {
    pub fn builder() -> EarthquakeFilterBuilder {
        EarthquakeFilterBuilder::default()
    }

    /// Builds a filter from dynamically-typed field values.
    ///
    /// Fields not listed (or given [`FilterValue::None`]) take their canonical
    /// default. A field listed twice keeps its last value.
    ///
    /// # Errors
    ///
    /// - [`FilterError::Type`] naming the field, the accepted kinds and the
    ///   received kind
    /// - any validation error of the value itself
    pub fn from_fields<I, V>(fields: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = (Field, V)>,
        V: Into<FilterValue>,
    {
        let mut builder = Self::builder();
        for (field, value) in fields {
            let value = value.into();
            builder = match (field, value) {
                (Field::TimeFilter, FilterValue::Time(time)) => builder.time_filter(time),
                (Field::LocationFilter, FilterValue::Location(location)) => {
                    builder.location_filter(location)
                }
                (Field::DepthFilter, FilterValue::Depth(depth)) => builder.depth_filter(depth),
                (Field::MagnitudeFilter, FilterValue::Magnitude(magnitude)) => {
                    builder.magnitude_filter(magnitude)
                }
                (Field::IntensityFilter, FilterValue::Intensity(intensity)) => {
                    builder.intensity_filter(intensity)
                }
                (Field::ImpactLevel, FilterValue::Text(level)) => builder.impact_level(level),
                (Field::MinReports, FilterValue::Integer(count)) => {
                    builder.min_reports(check_min_reports(count)?)
                }
                (field, FilterValue::None) if field != Field::MinReports => builder.clear(field),
                (field, value) => {
                    let mut expected = Self::accepted_kinds(field);
                    if field != Field::MinReports && !expected.contains(&ValueKind::None) {
                        expected.push(ValueKind::None);
                    }
                    return Err(mismatch(field, &expected, &value));
                }
            };
        }
        builder.build()
    }

    /// Kinds a field accepts on assignment.
    pub fn accepted_kinds(field: Field) -> Vec<ValueKind> {
        match field {
            Field::TimeFilter => vec![ValueKind::TimeFilter],
            Field::LocationFilter => LocationFilter::KINDS.to_vec(),
            Field::DepthFilter => vec![ValueKind::DepthFilter],
            Field::MagnitudeFilter => vec![ValueKind::MagnitudeFilter],
            Field::IntensityFilter => vec![ValueKind::IntensityFilter],
            Field::ImpactLevel => vec![ValueKind::Text, ValueKind::None],
            Field::MinReports => vec![ValueKind::Integer],
        }
    }

    /// Assigns one field from a dynamically-typed value.
    ///
    /// Applies the same validation as the typed setters. Sub-filters cannot be
    /// cleared this way: defaults are resolved only at construction.
    pub fn set_field(&mut self, field: Field, value: impl Into<FilterValue>) -> Result<(), FilterError> {
        match (field, value.into()) {
            (Field::TimeFilter, FilterValue::Time(time)) => self.set_time_filter(time),
            (Field::LocationFilter, FilterValue::Location(location)) => {
                self.set_location_filter(location)
            }
            (Field::DepthFilter, FilterValue::Depth(depth)) => self.set_depth_filter(depth),
            (Field::MagnitudeFilter, FilterValue::Magnitude(magnitude)) => {
                self.set_magnitude_filter(magnitude)
            }
            (Field::IntensityFilter, FilterValue::Intensity(intensity)) => {
                self.set_intensity_filter(intensity)
            }
            (Field::ImpactLevel, FilterValue::Text(level)) => self.set_impact_level(Some(level.as_str()))?,
            (Field::ImpactLevel, FilterValue::None) => self.set_impact_level(None)?,
            (Field::MinReports, FilterValue::Integer(count)) => {
                self.set_min_reports(check_min_reports(count)?)
            }
            (field, value) => return Err(mismatch(field, &Self::accepted_kinds(field), &value)),
        }
        Ok(())
    }

    pub fn time_filter(&self) -> &TimeFilter {
        &self.time_filter
    }

    pub fn location_filter(&self) -> &LocationFilter {
        &self.location_filter
    }

    pub fn depth_filter(&self) -> &DepthFilter {
        &self.depth_filter
    }

    pub fn magnitude_filter(&self) -> &MagnitudeFilter {
        &self.magnitude_filter
    }

    pub fn intensity_filter(&self) -> &IntensityFilter {
        &self.intensity_filter
    }

    pub fn impact_level(&self) -> Option<ImpactLevel> {
        self.impact_level
    }

    pub fn min_reports(&self) -> u64 {
        self.min_reports
    }

    // In-place access; the sub-filters' own setters keep them valid.

    pub fn time_filter_mut(&mut self) -> &mut TimeFilter {
        &mut self.time_filter
    }

    pub fn location_filter_mut(&mut self) -> &mut LocationFilter {
        &mut self.location_filter
    }

    pub fn depth_filter_mut(&mut self) -> &mut DepthFilter {
        &mut self.depth_filter
    }

    pub fn magnitude_filter_mut(&mut self) -> &mut MagnitudeFilter {
        &mut self.magnitude_filter
    }

    pub fn intensity_filter_mut(&mut self) -> &mut IntensityFilter {
        &mut self.intensity_filter
    }

    pub fn set_time_filter(&mut self, time_filter: TimeFilter) {
        self.time_filter = time_filter;
    }

    pub fn set_location_filter(&mut self, location_filter: impl Into<LocationFilter>) {
        self.location_filter = location_filter.into();
    }

    pub fn set_depth_filter(&mut self, depth_filter: DepthFilter) {
        self.depth_filter = depth_filter;
    }

    pub fn set_magnitude_filter(&mut self, magnitude_filter: MagnitudeFilter) {
        self.magnitude_filter = magnitude_filter;
    }

    pub fn set_intensity_filter(&mut self, intensity_filter: IntensityFilter) {
        self.intensity_filter = intensity_filter;
    }

    /// Sets the impact level from a string (trimmed, case-sensitive), or clears it.
    pub fn set_impact_level(&mut self, impact_level: Option<&str>) -> Result<(), FilterError> {
        self.impact_level = impact_level.map(ImpactLevel::parse).transpose()?;
        Ok(())
    }

    pub fn set_impact(&mut self, impact_level: Option<ImpactLevel>) {
        self.impact_level = impact_level;
    }

    pub fn set_min_reports(&mut self, min_reports: u64) {
        self.min_reports = min_reports;
    }
}

impl fmt::Display for EarthquakeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "----- Earthquake Filter -----")?;
        writeln!(f, "--- Time ---\n{}\n", self.time_filter)?;
        writeln!(f, "--- Location ---\n{}\n", self.location_filter)?;
        writeln!(f, "--- Depth ---\n{}\n", self.depth_filter)?;
        writeln!(f, "--- Magnitude ---\n{}\n", self.magnitude_filter)?;
        writeln!(f, "--- Intensity ---\n{}\n", self.intensity_filter)?;
        match self.impact_level {
            Some(level) => writeln!(f, "--- Impact level ---\n{level}\n")?,
            None => writeln!(f, "--- Impact level ---\nNo restriction\n")?,
        }
        write!(f, "--- Minimum reports ---\n{}", self.min_reports)
    }
}

/// Collects the optional parts of an [`EarthquakeFilter`].
///
/// Nothing is defaulted until [`build`](Self::build), so the default time
/// window is anchored at build time.
#[derive(Debug, Clone, Default)]
pub struct EarthquakeFilterBuilder {
    time_filter: Option<TimeFilter>,
    location_filter: Option<LocationFilter>,
    depth_filter: Option<DepthFilter>,
    magnitude_filter: Option<MagnitudeFilter>,
    intensity_filter: Option<IntensityFilter>,
    impact_level: Option<String>,
    min_reports: u64,
}

impl EarthquakeFilterBuilder {
    pub fn time_filter(mut self, time_filter: TimeFilter) -> Self {
        self.time_filter = Some(time_filter);
        self
    }

    pub fn location_filter(mut self, location_filter: impl Into<LocationFilter>) -> Self {
        self.location_filter = Some(location_filter.into());
        self
    }

    pub fn depth_filter(mut self, depth_filter: DepthFilter) -> Self {
        self.depth_filter = Some(depth_filter);
        self
    }

    pub fn magnitude_filter(mut self, magnitude_filter: MagnitudeFilter) -> Self {
        self.magnitude_filter = Some(magnitude_filter);
        self
    }

    pub fn intensity_filter(mut self, intensity_filter: IntensityFilter) -> Self {
        self.intensity_filter = Some(intensity_filter);
        self
    }

    /// Impact level as text; validated by [`build`](Self::build).
    pub fn impact_level(mut self, impact_level: impl Into<String>) -> Self {
        self.impact_level = Some(impact_level.into());
        self
    }

    pub fn min_reports(mut self, min_reports: u64) -> Self {
        self.min_reports = min_reports;
        self
    }

    /// Forgets a previously set field so it falls back to its default.
    pub fn clear(mut self, field: Field) -> Self {
        match field {
            Field::TimeFilter => self.time_filter = None,
            Field::LocationFilter => self.location_filter = None,
            Field::DepthFilter => self.depth_filter = None,
            Field::MagnitudeFilter => self.magnitude_filter = None,
            Field::IntensityFilter => self.intensity_filter = None,
            Field::ImpactLevel => self.impact_level = None,
            Field::MinReports => self.min_reports = MIN_REPORTS,
        }
        self
    }

    /// Validates the collected values and fills every omitted sub-filter with
    /// its canonical unrestricted instance.
    ///
    /// # Errors
    ///
    /// [`FilterError::InvalidImpactLevel`] for an unknown impact level.
    pub fn build(self) -> Result<EarthquakeFilter, FilterError> {
        let impact_level = self
            .impact_level
            .as_deref()
            .map(ImpactLevel::parse)
            .transpose()?;
        Ok(EarthquakeFilter {
            time_filter: self.time_filter.unwrap_or_default(),
            location_filter: self.location_filter.unwrap_or_default(),
            depth_filter: self.depth_filter.unwrap_or_default(),
            magnitude_filter: self.magnitude_filter.unwrap_or_default(),
            intensity_filter: self.intensity_filter.unwrap_or_default(),
            impact_level,
            min_reports: self.min_reports,
        })
    }
}

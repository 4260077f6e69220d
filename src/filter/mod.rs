//! Earthquake filtering.
//!
//! Searches must always go through a filter: the catalog holds far too many
//! events to retrieve unfiltered. This module provides:
//! - Range filters for depth, magnitude and intensity
//! - Location filters (rectangle, degree circle, distance circle)
//! - The time filter with its derived defaults
//! - The composite [`EarthquakeFilter`]
//!
//! Every constructor and setter validates; a rejected mutation leaves the
//! filter unchanged.

mod earthquake;
mod location;
mod range;
mod time;

// Re-export public API
pub use earthquake::{EarthquakeFilter, EarthquakeFilterBuilder, Field, FilterValue, ImpactLevel};
pub use location::{
    CircleDistanceLocationFilter, CircleLocationFilter, LocationFilter, RectLocationFilter,
};
pub use range::{DepthFilter, IntensityFilter, MagnitudeFilter, RangeFilter};
pub use time::TimeFilter;

//! quake_query library: filtered counts over a seismic-event catalog
//!
//! This library lets a caller describe a search over the USGS earthquake
//! catalog (time window, location, depth, magnitude, intensity, impact level,
//! number of felt reports) as validated filter objects, turns that filter into
//! the service's query parameters, and counts the matching events with bounded
//! retries.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use chrono::NaiveDate;
//! use quake_query::{EarthquakeFilter, MagnitudeFilter, Requester, RetryBudget, TimeFilter};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let start = NaiveDate::from_ymd_opt(1960, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let end = NaiveDate::from_ymd_opt(1961, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let filter = EarthquakeFilter::builder()
//!     .time_filter(TimeFilter::between(start, end)?)
//!     .magnitude_filter(MagnitudeFilter::at_least(9.4)?)
//!     .build()?;
//!
//! let requester = Requester::new(Default::default())?;
//! let n = requester.count(&filter, Some(Duration::from_secs(30)), RetryBudget::Limited(3))?;
//! println!("{n} matching events");
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! Requests are synchronous and block the calling thread. Do not call the
//! requester from inside an async runtime; use `spawn_blocking` there.

pub mod config;
mod error_handling;
pub mod filter;
pub mod initialization;
pub mod query;
pub mod request;
pub mod units;

// Re-export public API
pub use config::{ClientConfig, ConfigValidationError, LogFormat, LogLevel};
pub use error_handling::{
    FilterError, InitializationError, RequestError, TypeMismatch, ValueKind,
};
pub use filter::{
    CircleDistanceLocationFilter, CircleLocationFilter, DepthFilter, EarthquakeFilter,
    EarthquakeFilterBuilder, Field, FilterValue, ImpactLevel, IntensityFilter, LocationFilter,
    MagnitudeFilter, RangeFilter, RectLocationFilter, TimeFilter,
};
pub use query::{build_query_params, count_url, query_url, QueryParams};
pub use request::{count, count_with, CountTransport, HttpTransport, Requester, RetryBudget};
pub use units::DistanceUnit;

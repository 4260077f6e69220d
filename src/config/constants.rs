//! Configuration constants.
//!
//! This module defines the domain bounds enforced by the filters, the narrower
//! service bounds applied while serializing a query, and the operational
//! parameters of the count requester.

use std::time::Duration;

// Remote service
/// Base URL of the USGS FDSN event web service
pub const BASE_URL: &str = "https://earthquake.usgs.gov/fdsnws/event/1";
/// Path of the endpoint returning the number of matching events
pub const COUNT_PATH: &str = "count";
/// Path of the paginated endpoint returning the matching events
pub const QUERY_PATH: &str = "query";
/// Output format requested from the service
pub const OUTPUT_FORMAT: &str = "geojson";

/// Default User-Agent string for HTTP requests.
///
/// Sent on every attempt. Override through [`ClientConfig::user_agent`](crate::config::ClientConfig).
pub const DEFAULT_USER_AGENT: &str = concat!("quake_query/", env!("CARGO_PKG_VERSION"));

// Time filter
/// Days between the default start time and the end time
pub const DEFAULT_DAYS_GAP: i64 = 30;

// Earth co-ordinate domain bounds
pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;
/// Rectangles get a doubled longitude range so they can cross the date line
pub const RECT_MIN_LONGITUDE: f64 = MIN_LONGITUDE * 2.0;
/// Rectangles get a doubled longitude range so they can cross the date line
pub const RECT_MAX_LONGITUDE: f64 = MAX_LONGITUDE * 2.0;

// Circle radius domain bounds (degrees; the distance circle only has the floor)
pub const MIN_RADIUS: f64 = 0.0;
pub const MAX_RADIUS: f64 = 180.0;

// Modified Mercalli intensity scale
pub const MIN_INTENSITY: f64 = 0.0;
pub const MAX_INTENSITY: f64 = 12.0;

/// Minimum number of public reports ("felt" reports)
pub const MIN_REPORTS: u64 = 0;

// Service bounds
// The service rejects or chokes on extreme values, so the serializer
// narrows them silently. These are always inside the domain bounds above.
/// Shallowest depth sent to the service (km)
pub const SERVICE_MIN_DEPTH_KM: f64 = -100.0;
/// Deepest depth sent to the service (km)
pub const SERVICE_MAX_DEPTH_KM: f64 = 9999.0;
pub const SERVICE_MIN_MAGNITUDE: f64 = -5.0;
pub const SERVICE_MAX_MAGNITUDE: f64 = 12.0;
/// Largest distance radius sent to the service (km)
pub const SERVICE_MAX_RADIUS_KM: f64 = 99999.0;
pub const SERVICE_MAX_REPORTS: u64 = 999_999_999;
/// Page-size ceiling of the query endpoint
pub const MAX_LIMIT: u32 = 20_000;

// Requester
/// Shortest accepted per-attempt timeout
pub const MIN_TIMEOUT: Duration = Duration::from_millis(10);
/// Longest accepted per-attempt timeout (one day; the server gives up long before)
pub const MAX_TIMEOUT: Duration = Duration::from_secs(86_400);
/// Retry count substituted for an unbounded retry budget
pub const MAX_RETRY_COUNT: u64 = 1_000_000_000_000_000;

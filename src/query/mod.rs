//! Query serialization.
//!
//! Turns a validated [`EarthquakeFilter`] into the ordered parameter set the
//! event service understands. Unrestricted fields are omitted and extreme
//! values are narrowed to what the service accepts. Narrowing never fails:
//! the filters already rejected anything outside their (wider) domains.

use chrono::{NaiveDateTime, Timelike};
use url::Url;

use crate::config::{
    ClientConfig, ConfigValidationError, COUNT_PATH, MAX_INTENSITY, MAX_LIMIT, MIN_INTENSITY,
    OUTPUT_FORMAT, QUERY_PATH, SERVICE_MAX_DEPTH_KM, SERVICE_MAX_MAGNITUDE, SERVICE_MAX_RADIUS_KM,
    SERVICE_MAX_REPORTS, SERVICE_MIN_DEPTH_KM, SERVICE_MIN_MAGNITUDE,
};
use crate::filter::{EarthquakeFilter, LocationFilter};

/// Ordered key/value query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: Vec<(&'static str, String)>,
}

impl QueryParams {
    fn push(&mut self, key: &'static str, value: impl ToString) {
        self.params.push((key, value.to_string()));
    }

    /// Value of `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.params.iter().map(|(k, _)| *k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.params.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Appends every parameter, in order, to the query string of `url`.
    pub fn apply_to(&self, url: &mut Url) {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in self.iter() {
            pairs.append_pair(key, value);
        }
    }
}

/// Formats an instant as ISO-8601 without an offset (`1960-01-01T00:00:00`).
///
/// Sub-second precision is written as microseconds, and only when non-zero.
pub fn format_instant(instant: &NaiveDateTime) -> String {
    if instant.nanosecond() == 0 {
        instant.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        instant.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

/// Builds the query parameters for `filter`.
///
/// # Arguments
///
/// * `filter` - The validated filter to serialize
/// * `limit` - Optional result-count cap, narrowed to `1..=MAX_LIMIT`
///
/// # Returns
///
/// Parameters in a fixed order: format and times, location, depth, magnitude,
/// intensity, impact level, minimum reports, limit.
pub fn build_query_params(filter: &EarthquakeFilter, limit: Option<u32>) -> QueryParams {
    let mut params = QueryParams::default();

    let time = filter.time_filter();
    params.push("format", OUTPUT_FORMAT);
    params.push("starttime", format_instant(&time.start()));
    params.push("endtime", format_instant(&time.end()));
    params.push("updatedafter", format_instant(&time.updated()));

    match filter.location_filter() {
        LocationFilter::Rect(rect) => {
            params.push("minlatitude", rect.min_lat());
            params.push("minlongitude", rect.min_long());
            params.push("maxlatitude", rect.max_lat());
            params.push("maxlongitude", rect.max_long());
        }
        LocationFilter::Circle(circle) => {
            params.push("latitude", circle.lat());
            params.push("longitude", circle.long());
            params.push("radius", circle.radius());
        }
        LocationFilter::CircleDistance(circle) => {
            params.push("latitude", circle.lat());
            params.push("longitude", circle.long());
            params.push("radiuskm", circle.radius_km().min(SERVICE_MAX_RADIUS_KM));
        }
    }

    let depth = filter.depth_filter();
    if depth.min_km().is_finite() {
        params.push(
            "mindepth",
            depth.min_km().clamp(SERVICE_MIN_DEPTH_KM, SERVICE_MAX_DEPTH_KM),
        );
    }
    if depth.max_km().is_finite() {
        params.push(
            "maxdepth",
            depth.max_km().clamp(SERVICE_MIN_DEPTH_KM, SERVICE_MAX_DEPTH_KM),
        );
    }

    let magnitude = filter.magnitude_filter();
    if magnitude.min().is_finite() {
        params.push(
            "minmag",
            magnitude.min().clamp(SERVICE_MIN_MAGNITUDE, SERVICE_MAX_MAGNITUDE),
        );
    }
    if magnitude.max().is_finite() {
        params.push(
            "maxmag",
            magnitude.max().clamp(SERVICE_MIN_MAGNITUDE, SERVICE_MAX_MAGNITUDE),
        );
    }

    let intensity = filter.intensity_filter();
    if intensity.min() != MIN_INTENSITY {
        params.push("minmmi", intensity.min());
    }
    if intensity.max() != MAX_INTENSITY {
        params.push("maxmmi", intensity.max());
    }

    if let Some(level) = filter.impact_level() {
        params.push("alertlevel", level);
    }
    if filter.min_reports() != 0 {
        params.push("minfelt", filter.min_reports().min(SERVICE_MAX_REPORTS));
    }

    if let Some(limit) = limit {
        params.push("limit", limit.clamp(1, MAX_LIMIT));
    }

    params
}

/// URL of the count endpoint for `filter`.
pub fn count_url(
    config: &ClientConfig,
    filter: &EarthquakeFilter,
) -> Result<Url, ConfigValidationError> {
    let mut url = config.endpoint(COUNT_PATH)?;
    build_query_params(filter, None).apply_to(&mut url);
    Ok(url)
}

/// URL of one page of the query endpoint for `filter`.
///
/// The event records it returns are decoded elsewhere; only the parameter
/// rules are shared.
pub fn query_url(
    config: &ClientConfig,
    filter: &EarthquakeFilter,
    limit: u32,
) -> Result<Url, ConfigValidationError> {
    let mut url = config.endpoint(QUERY_PATH)?;
    build_query_params(filter, Some(limit)).apply_to(&mut url);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{
        CircleDistanceLocationFilter, CircleLocationFilter, DepthFilter, IntensityFilter,
        MagnitudeFilter, TimeFilter,
    };
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_default_filter_omits_unrestricted_fields() {
        let filter = EarthquakeFilter::default();
        let params = build_query_params(&filter, None);
        for key in [
            "mindepth",
            "maxdepth",
            "minmag",
            "maxmag",
            "minmmi",
            "maxmmi",
            "alertlevel",
            "minfelt",
            "limit",
        ] {
            assert!(!params.contains_key(key), "unexpected {key}");
        }
        assert_eq!(
            params.keys().collect::<Vec<_>>(),
            [
                "format",
                "starttime",
                "endtime",
                "updatedafter",
                "minlatitude",
                "minlongitude",
                "maxlatitude",
                "maxlongitude"
            ]
        );
        assert_eq!(params.get("format"), Some("geojson"));
        assert_eq!(params.get("minlatitude"), Some("-90"));
        assert_eq!(params.get("minlongitude"), Some("-360"));
        assert_eq!(params.get("maxlatitude"), Some("90"));
        assert_eq!(params.get("maxlongitude"), Some("360"));
        assert_eq!(
            params.get("starttime").unwrap(),
            format_instant(&filter.time_filter().start())
        );
    }

    #[test]
    fn test_partial_filter() {
        let filter = EarthquakeFilter::builder()
            .location_filter(CircleLocationFilter::new(32.32, 34.34, 90.0).unwrap())
            .magnitude_filter(MagnitudeFilter::at_least(7.5).unwrap())
            .impact_level("orange")
            .min_reports(10)
            .build()
            .unwrap();
        let params = build_query_params(&filter, None);
        assert_eq!(params.get("latitude"), Some("32.32"));
        assert_eq!(params.get("longitude"), Some("34.34"));
        assert_eq!(params.get("radius"), Some("90"));
        assert_eq!(params.get("minmag"), Some("7.5"));
        assert_eq!(params.get("alertlevel"), Some("orange"));
        assert_eq!(params.get("minfelt"), Some("10"));
        assert!(!params.contains_key("maxmag"));
        assert!(!params.contains_key("minlatitude"));
        assert!(!params.contains_key("radiuskm"));
    }

    #[test]
    fn test_full_filter() {
        let filter = EarthquakeFilter::builder()
            .time_filter(
                TimeFilter::new(
                    Some(at(2015, 6, 1, 0, 0, 0)),
                    Some(at(2015, 6, 30, 23, 59, 59)),
                    Some(at(2020, 1, 1, 0, 0, 0)),
                )
                .unwrap(),
            )
            .location_filter(CircleDistanceLocationFilter::new(45.0, 45.0, 100.0, "mi").unwrap())
            .depth_filter(DepthFilter::km(10.0, 50.0).unwrap())
            .magnitude_filter(MagnitudeFilter::new(5.0, 7.0).unwrap())
            .intensity_filter(IntensityFilter::new(6.0, 10.0).unwrap())
            .impact_level("orange")
            .min_reports(25)
            .build()
            .unwrap();
        let params = build_query_params(&filter, Some(500));
        let expected = [
            ("format", "geojson".to_string()),
            ("starttime", "2015-06-01T00:00:00".to_string()),
            ("endtime", "2015-06-30T23:59:59".to_string()),
            ("updatedafter", "2020-01-01T00:00:00".to_string()),
            ("latitude", "45".to_string()),
            ("longitude", "45".to_string()),
            ("radiuskm", (100.0 * 1.609344_f64).to_string()),
            ("mindepth", "10".to_string()),
            ("maxdepth", "50".to_string()),
            ("minmag", "5".to_string()),
            ("maxmag", "7".to_string()),
            ("minmmi", "6".to_string()),
            ("maxmmi", "10".to_string()),
            ("alertlevel", "orange".to_string()),
            ("minfelt", "25".to_string()),
            ("limit", "500".to_string()),
        ];
        let actual: Vec<(&str, String)> = params.iter().map(|(k, v)| (k, v.to_string())).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_extreme_values_are_clamped() {
        let filter = EarthquakeFilter::builder()
            .time_filter(
                TimeFilter::new(
                    Some(at(1, 1, 1, 1, 1, 1)),
                    Some(at(9999, 9, 9, 9, 9, 9)),
                    Some(at(13, 12, 11, 10, 9, 8)),
                )
                .unwrap(),
            )
            .location_filter(CircleDistanceLocationFilter::new(90.0, 180.0, 238_794.234, "mi").unwrap())
            .depth_filter(DepthFilter::new(922_489.0, 9_323_342.324, "mi").unwrap())
            .magnitude_filter(MagnitudeFilter::new(50.0, 500.0).unwrap())
            .intensity_filter(IntensityFilter::new(6.66, 6.66).unwrap())
            .impact_level("red")
            .min_reports(u64::MAX)
            .build()
            .unwrap();
        let params = build_query_params(&filter, Some(21_000));
        assert_eq!(params.get("starttime"), Some("0001-01-01T01:01:01"));
        assert_eq!(params.get("updatedafter"), Some("0013-12-11T10:09:08"));
        assert_eq!(params.get("radiuskm"), Some("99999"));
        assert_eq!(params.get("mindepth"), Some("9999"));
        assert_eq!(params.get("maxdepth"), Some("9999"));
        assert_eq!(params.get("minmag"), Some("12"));
        assert_eq!(params.get("maxmag"), Some("12"));
        assert_eq!(params.get("minmmi"), Some("6.66"));
        assert_eq!(params.get("maxmmi"), Some("6.66"));
        assert_eq!(params.get("alertlevel"), Some("red"));
        assert_eq!(params.get("minfelt"), Some("999999999"));
        assert_eq!(params.get("limit"), Some("20000"));
    }

    #[test]
    fn test_depth_and_magnitude_floors() {
        let filter = EarthquakeFilter::builder()
            .depth_filter(DepthFilter::km(-5000.0, 10_000_000.0).unwrap())
            .magnitude_filter(MagnitudeFilter::new(-20.0, f64::INFINITY).unwrap())
            .build()
            .unwrap();
        let params = build_query_params(&filter, None);
        assert_eq!(params.get("mindepth"), Some("-100"));
        assert_eq!(params.get("maxdepth"), Some("9999"));
        assert_eq!(params.get("minmag"), Some("-5"));
        assert!(!params.contains_key("maxmag"));
    }

    #[test]
    fn test_limit_floor() {
        let params = build_query_params(&EarthquakeFilter::default(), Some(0));
        assert_eq!(params.get("limit"), Some("1"));
    }

    #[test]
    fn test_format_instant_fraction() {
        let instant = at(2020, 2, 29, 12, 0, 0)
            .with_nanosecond(123_456_000)
            .unwrap();
        assert_eq!(format_instant(&instant), "2020-02-29T12:00:00.123456");
    }

    #[test]
    fn test_count_url() {
        let filter = EarthquakeFilter::builder()
            .time_filter(TimeFilter::between(at(1960, 1, 1, 0, 0, 0), at(1961, 1, 1, 0, 0, 0)).unwrap())
            .build()
            .unwrap();
        let url = count_url(&ClientConfig::default(), &filter).unwrap();
        assert_eq!(url.path(), "/fdsnws/event/1/count");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[0], ("format".to_string(), "geojson".to_string()));
        assert!(pairs.contains(&("starttime".to_string(), "1960-01-01T00:00:00".to_string())));
        assert!(!pairs.iter().any(|(k, _)| k == "limit"));
    }

    #[test]
    fn test_query_url_has_limit() {
        let url = query_url(&ClientConfig::default(), &EarthquakeFilter::default(), 10).unwrap();
        assert_eq!(url.path(), "/fdsnws/event/1/query");
        assert!(url
            .query_pairs()
            .any(|(k, v)| k == "limit" && v == "10"));
    }
}

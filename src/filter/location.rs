//! Location filters.
//!
//! Three mutually exclusive shapes: a latitude/longitude rectangle, a circle
//! with a radius in degrees, and a circle with a radius in kilometres (or
//! miles). They share the coordinate checks below and are carried as the
//! closed [`LocationFilter`] enum.

use std::fmt;

use crate::config::{
    MAX_LATITUDE, MAX_LONGITUDE, MAX_RADIUS, MIN_LATITUDE, MIN_LONGITUDE, MIN_RADIUS,
    RECT_MAX_LONGITUDE, RECT_MIN_LONGITUDE,
};
use crate::error_handling::{FilterError, ValueKind};
use crate::units::DistanceUnit;

fn check_number(field: &'static str, value: f64) -> Result<(), FilterError> {
    if value.is_nan() {
        return Err(FilterError::NotANumber { field });
    }
    Ok(())
}

fn check_within(
    field: &'static str,
    label: &str,
    value: f64,
    lower: f64,
    upper: f64,
) -> Result<(), FilterError> {
    check_number(field, value)?;
    if value < lower {
        return Err(FilterError::out_of_range(
            field,
            format!("{label} must not be less than {lower}"),
        ));
    }
    if value > upper {
        return Err(FilterError::out_of_range(
            field,
            format!("{label} must not be greater than {upper}"),
        ));
    }
    Ok(())
}

fn check_latitude(field: &'static str, lat: f64) -> Result<(), FilterError> {
    check_within(field, "Latitude", lat, MIN_LATITUDE, MAX_LATITUDE)
}

fn check_longitude(field: &'static str, long: f64) -> Result<(), FilterError> {
    check_within(field, "Longitude", long, MIN_LONGITUDE, MAX_LONGITUDE)
}

/// Checks the lower end of a min/max pair against its floor and the current maximum.
fn check_min_bound(
    field: &'static str,
    orient: &str,
    value: f64,
    floor: f64,
    current_max: f64,
) -> Result<(), FilterError> {
    check_number(field, value)?;
    if value < floor {
        return Err(FilterError::out_of_range(
            field,
            format!("Minimum {orient} must not be less than {floor}"),
        ));
    }
    if value > current_max {
        return Err(FilterError::out_of_range(
            field,
            format!("Minimum {orient} must not be greater than maximum {orient}"),
        ));
    }
    Ok(())
}

/// Checks the upper end of a min/max pair against its ceiling and the current minimum.
fn check_max_bound(
    field: &'static str,
    orient: &str,
    value: f64,
    ceiling: f64,
    current_min: f64,
) -> Result<(), FilterError> {
    check_number(field, value)?;
    if value > ceiling {
        return Err(FilterError::out_of_range(
            field,
            format!("Maximum {orient} must not be greater than {ceiling}"),
        ));
    }
    if value < current_min {
        return Err(FilterError::out_of_range(
            field,
            format!("Maximum {orient} must not be less than minimum {orient}"),
        ));
    }
    Ok(())
}

/// A rectangular search area bounded by latitude and longitude.
///
/// Longitude may range over `[-360, 360]` rather than `[-180, 180]` so that a
/// rectangle can cross the International Date Line: longitudes -200 to -100
/// describe the same strip as 160 to 260.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectLocationFilter {
    min_lat: f64,
    min_long: f64,
    max_lat: f64,
    max_long: f64,
}

impl RectLocationFilter {
    /// Creates a rectangle. Arguments are in the order the bounds are checked.
    ///
    /// # Errors
    ///
    /// [`FilterError::OutOfRange`] if a bound leaves its domain or a minimum
    /// exceeds its maximum.
    pub fn new(min_lat: f64, min_long: f64, max_lat: f64, max_long: f64) -> Result<Self, FilterError> {
        let mut rect = Self::whole_earth();
        rect.set_min_lat(min_lat)?;
        rect.set_min_long(min_long)?;
        rect.set_max_lat(max_lat)?;
        rect.set_max_long(max_long)?;
        Ok(rect)
    }

    /// The rectangle spanning the entire domain.
    pub const fn whole_earth() -> Self {
        Self {
            min_lat: MIN_LATITUDE,
            min_long: RECT_MIN_LONGITUDE,
            max_lat: MAX_LATITUDE,
            max_long: RECT_MAX_LONGITUDE,
        }
    }

    pub fn min_lat(&self) -> f64 {
        self.min_lat
    }

    pub fn min_long(&self) -> f64 {
        self.min_long
    }

    pub fn max_lat(&self) -> f64 {
        self.max_lat
    }

    pub fn max_long(&self) -> f64 {
        self.max_long
    }

    pub fn set_min_lat(&mut self, min_lat: f64) -> Result<(), FilterError> {
        check_min_bound("min_lat", "latitude", min_lat, MIN_LATITUDE, self.max_lat)?;
        self.min_lat = min_lat;
        Ok(())
    }

    pub fn set_min_long(&mut self, min_long: f64) -> Result<(), FilterError> {
        check_min_bound(
            "min_long",
            "longitude",
            min_long,
            RECT_MIN_LONGITUDE,
            self.max_long,
        )?;
        self.min_long = min_long;
        Ok(())
    }

    pub fn set_max_lat(&mut self, max_lat: f64) -> Result<(), FilterError> {
        check_max_bound("max_lat", "latitude", max_lat, MAX_LATITUDE, self.min_lat)?;
        self.max_lat = max_lat;
        Ok(())
    }

    pub fn set_max_long(&mut self, max_long: f64) -> Result<(), FilterError> {
        check_max_bound(
            "max_long",
            "longitude",
            max_long,
            RECT_MAX_LONGITUDE,
            self.min_long,
        )?;
        self.max_long = max_long;
        Ok(())
    }
}

impl fmt::Display for RectLocationFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Minimum latitude: {}\nMinimum longitude: {}\n\
             Maximum latitude: {}\nMaximum longitude: {}",
            self.min_lat, self.min_long, self.max_lat, self.max_long
        )
    }
}

/// A circular search area: every point within `radius` degrees of a centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleLocationFilter {
    lat: f64,
    long: f64,
    radius: f64,
}

impl CircleLocationFilter {
    /// Creates a circle centred on (`lat`, `long`) with a radius in `[0, 180]` degrees.
    pub fn new(lat: f64, long: f64, radius: f64) -> Result<Self, FilterError> {
        check_latitude("lat", lat)?;
        check_longitude("long", long)?;
        check_radius_degrees(radius)?;
        Ok(Self { lat, long, radius })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn long(&self) -> f64 {
        self.long
    }

    /// Radius in degrees.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn set_lat(&mut self, lat: f64) -> Result<(), FilterError> {
        check_latitude("lat", lat)?;
        self.lat = lat;
        Ok(())
    }

    pub fn set_long(&mut self, long: f64) -> Result<(), FilterError> {
        check_longitude("long", long)?;
        self.long = long;
        Ok(())
    }

    pub fn set_radius(&mut self, radius: f64) -> Result<(), FilterError> {
        check_radius_degrees(radius)?;
        self.radius = radius;
        Ok(())
    }
}

fn check_radius_degrees(radius: f64) -> Result<(), FilterError> {
    check_within("radius", "Radius", radius, MIN_RADIUS, MAX_RADIUS)
}

impl fmt::Display for CircleLocationFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Latitude: {}\nLongitude: {}\nRadius (degrees): {}",
            self.lat, self.long, self.radius
        )
    }
}

/// A circular search area: every point within a distance of a centre.
///
/// The radius is stored in kilometres; miles are a derived view. The unit
/// given at construction only affects how the input is read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleDistanceLocationFilter {
    lat: f64,
    long: f64,
    radius_km: f64,
}

impl CircleDistanceLocationFilter {
    /// Creates a circle whose `radius` is given in `radius_unit` (`"km"` or `"mi"`).
    ///
    /// # Errors
    ///
    /// - [`FilterError::InvalidUnit`] for any unit other than `km`/`mi` (after trimming)
    /// - [`FilterError::OutOfRange`] for a bad coordinate or a negative radius
    pub fn new(lat: f64, long: f64, radius: f64, radius_unit: &str) -> Result<Self, FilterError> {
        check_latitude("lat", lat)?;
        check_longitude("long", long)?;
        let unit = DistanceUnit::parse(radius_unit)?;
        let radius_km = unit.convert(radius, DistanceUnit::Km);
        check_radius_distance("radius", radius_km)?;
        Ok(Self {
            lat,
            long,
            radius_km,
        })
    }

    /// Creates a circle with the radius in kilometres.
    pub fn km(lat: f64, long: f64, radius_km: f64) -> Result<Self, FilterError> {
        Self::new(lat, long, radius_km, "km")
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn long(&self) -> f64 {
        self.long
    }

    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    pub fn radius_mi(&self) -> f64 {
        DistanceUnit::Km.convert(self.radius_km, DistanceUnit::Mi)
    }

    pub fn set_lat(&mut self, lat: f64) -> Result<(), FilterError> {
        check_latitude("lat", lat)?;
        self.lat = lat;
        Ok(())
    }

    pub fn set_long(&mut self, long: f64) -> Result<(), FilterError> {
        check_longitude("long", long)?;
        self.long = long;
        Ok(())
    }

    pub fn set_radius_km(&mut self, radius_km: f64) -> Result<(), FilterError> {
        check_radius_distance("radius_km", radius_km)?;
        self.radius_km = radius_km;
        Ok(())
    }

    pub fn set_radius_mi(&mut self, radius_mi: f64) -> Result<(), FilterError> {
        check_number("radius_mi", radius_mi)?;
        let radius_km = DistanceUnit::Mi.convert(radius_mi, DistanceUnit::Km);
        check_radius_distance("radius_mi", radius_km)?;
        self.radius_km = radius_km;
        Ok(())
    }
}

fn check_radius_distance(field: &'static str, radius_km: f64) -> Result<(), FilterError> {
    check_within(field, "Radius", radius_km, MIN_RADIUS, f64::INFINITY)
}

impl fmt::Display for CircleDistanceLocationFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Latitude: {}\nLongitude: {}\nRadius (km): {}\nRadius (mi): {}",
            self.lat,
            self.long,
            self.radius_km,
            self.radius_mi()
        )
    }
}

/// Where to search: one of the three location shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationFilter {
    Rect(RectLocationFilter),
    Circle(CircleLocationFilter),
    CircleDistance(CircleDistanceLocationFilter),
}

impl LocationFilter {
    /// Kind tag of the active shape.
    pub fn kind(&self) -> ValueKind {
        match self {
            LocationFilter::Rect(_) => ValueKind::RectLocationFilter,
            LocationFilter::Circle(_) => ValueKind::CircleLocationFilter,
            LocationFilter::CircleDistance(_) => ValueKind::CircleDistanceLocationFilter,
        }
    }

    /// Kinds accepted wherever a location filter is expected.
    pub const KINDS: [ValueKind; 3] = [
        ValueKind::RectLocationFilter,
        ValueKind::CircleLocationFilter,
        ValueKind::CircleDistanceLocationFilter,
    ];
}

impl Default for LocationFilter {
    /// The whole Earth: location is irrelevant.
    fn default() -> Self {
        LocationFilter::Rect(RectLocationFilter::whole_earth())
    }
}

impl From<RectLocationFilter> for LocationFilter {
    fn from(rect: RectLocationFilter) -> Self {
        LocationFilter::Rect(rect)
    }
}

impl From<CircleLocationFilter> for LocationFilter {
    fn from(circle: CircleLocationFilter) -> Self {
        LocationFilter::Circle(circle)
    }
}

impl From<CircleDistanceLocationFilter> for LocationFilter {
    fn from(circle: CircleDistanceLocationFilter) -> Self {
        LocationFilter::CircleDistance(circle)
    }
}

impl fmt::Display for LocationFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationFilter::Rect(rect) => fmt::Display::fmt(rect, f),
            LocationFilter::Circle(circle) => fmt::Display::fmt(circle, f),
            LocationFilter::CircleDistance(circle) => fmt::Display::fmt(circle, f),
        }
    }
}

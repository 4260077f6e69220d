//! Unit conversion.
//!
//! Values are converted through a table of ratios relative to a reference
//! unit: `value * (table[from] / table[to])`.

use std::str::FromStr;

use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::error_handling::FilterError;

/// Kilometres per kilometre (the reference distance unit)
pub const KM_PER_KM: f64 = 1.0;
/// Kilometres per statute mile
pub const KM_PER_MI: f64 = 1.609344;

/// Distance units and their size in kilometres.
pub const DISTANCE_UNITS: &[(&str, f64)] = &[("km", KM_PER_KM), ("mi", KM_PER_MI)];

/// Converts `value` from one unit to another using a ratio table.
///
/// # Errors
///
/// Returns [`FilterError::UnknownUnit`] if either unit is absent from `table`.
///
/// # Examples
///
/// ```
/// use quake_query::units::{convert, DISTANCE_UNITS};
///
/// let km = convert(10.0, "mi", "km", DISTANCE_UNITS).unwrap();
/// assert!((km - 16.09344).abs() < 1e-9);
/// ```
pub fn convert(value: f64, from: &str, to: &str, table: &[(&str, f64)]) -> Result<f64, FilterError> {
    let ratio = |unit: &str| {
        table
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, ratio)| *ratio)
            .ok_or_else(|| FilterError::UnknownUnit(unit.to_string()))
    };
    Ok(value * (ratio(from)? / ratio(to)?))
}

/// A distance unit accepted by the depth and distance-circle filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, AsRefStr, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    Km,
    Mi,
}

impl DistanceUnit {
    /// Parses a unit string, ignoring surrounding whitespace.
    ///
    /// Matching is case-sensitive: only `"km"` and `"mi"` are accepted.
    pub fn parse(unit: &str) -> Result<Self, FilterError> {
        let trimmed = unit.trim();
        DistanceUnit::from_str(trimmed).map_err(|_| FilterError::InvalidUnit(trimmed.to_string()))
    }

    /// Size of one of this unit in kilometres.
    pub fn ratio(self) -> f64 {
        match self {
            DistanceUnit::Km => KM_PER_KM,
            DistanceUnit::Mi => KM_PER_MI,
        }
    }

    /// Converts `value` expressed in `self` into `to`.
    pub fn convert(self, value: f64, to: DistanceUnit) -> f64 {
        value * (self.ratio() / to.ratio())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_convert_identity() {
        for (unit, _) in DISTANCE_UNITS {
            assert_eq!(convert(42.5, unit, unit, DISTANCE_UNITS).unwrap(), 42.5);
        }
    }

    #[test]
    fn test_convert_mi_to_km() {
        let km = convert(1.0, "mi", "km", DISTANCE_UNITS).unwrap();
        assert_eq!(km, KM_PER_MI);
        let mi = convert(KM_PER_MI, "km", "mi", DISTANCE_UNITS).unwrap();
        assert!((mi - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_convert_custom_table() {
        let table = [("m", 1.0), ("cm", 0.01), ("mm", 0.001)];
        assert!((convert(250.0, "cm", "m", &table).unwrap() - 2.5).abs() < 1e-12);
        assert!((convert(2.0, "m", "mm", &table).unwrap() - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn test_convert_unknown_unit() {
        assert_eq!(
            convert(1.0, "ly", "km", DISTANCE_UNITS),
            Err(FilterError::UnknownUnit("ly".to_string()))
        );
        assert_eq!(
            convert(1.0, "km", "nmi", DISTANCE_UNITS),
            Err(FilterError::UnknownUnit("nmi".to_string()))
        );
    }

    #[test]
    fn test_convert_infinity_stays_infinite() {
        assert_eq!(
            convert(f64::INFINITY, "km", "mi", DISTANCE_UNITS).unwrap(),
            f64::INFINITY
        );
        assert_eq!(
            convert(f64::NEG_INFINITY, "mi", "km", DISTANCE_UNITS).unwrap(),
            f64::NEG_INFINITY
        );
    }

    #[test]
    fn test_distance_unit_parse() {
        assert_eq!(DistanceUnit::parse("km").unwrap(), DistanceUnit::Km);
        assert_eq!(DistanceUnit::parse("  mi\t").unwrap(), DistanceUnit::Mi);
        assert_eq!(
            DistanceUnit::parse("KM"),
            Err(FilterError::InvalidUnit("KM".to_string()))
        );
        assert!(DistanceUnit::parse("miles").is_err());
        assert!(DistanceUnit::parse("").is_err());
    }

    #[test]
    fn test_distance_unit_matches_table() {
        for unit in DistanceUnit::iter() {
            let by_table = convert(3.0, unit.as_ref(), "km", DISTANCE_UNITS).unwrap();
            assert_eq!(unit.convert(3.0, DistanceUnit::Km), by_table);
        }
    }
}

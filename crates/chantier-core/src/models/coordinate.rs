//! WGS 84 latitude/longitude pair.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ChantierError, Result};

/// A point on the Earth in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting non-finite or out-of-range values
    pub fn try_new(lat: f64, lon: f64) -> Result<Self> {
        let invalid = |reason: &str| ChantierError::InvalidCoordinate {
            lat,
            lon,
            reason: reason.to_string(),
        };

        if !lat.is_finite() || !lon.is_finite() {
            return Err(invalid("coordinates must be finite"));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(invalid("latitude must be within [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(invalid("longitude must be within [-180, 180]"));
        }

        Ok(Self { lat, lon })
    }

    /// Build a coordinate without range checks.
    ///
    /// Used for records loaded from the store, which were validated on the way in.
    pub fn new_unchecked(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Re-run validation on an existing value
    pub fn validate(&self) -> Result<()> {
        Self::try_new(self.lat, self.lon).map(|_| ())
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.lat, self.lon)
    }
}

impl std::str::FromStr for Coordinate {
    type Err = ChantierError;

    /// Parse `"lat,lon"`
    fn from_str(s: &str) -> Result<Self> {
        let (lat, lon) = s.split_once(',').ok_or_else(|| ChantierError::ConfigInvalid {
            key: "coordinate".to_string(),
            reason: format!("expected 'lat,lon', got '{}'", s),
        })?;

        let parse = |part: &str| {
            part.trim().parse::<f64>().map_err(|e| ChantierError::ConfigInvalid {
                key: "coordinate".to_string(),
                reason: format!("'{}' is not a number: {}", part.trim(), e),
            })
        };

        Self::try_new(parse(lat)?, parse(lon)?)
    }
}

/// Conversion for the `geo` ecosystem; `geo` points are (x = lon, y = lat)
impl From<Coordinate> for geo::Point<f64> {
    fn from(c: Coordinate) -> Self {
        geo::Point::new(c.lon, c.lat)
    }
}

/// Anything positioned on the map
pub trait Located {
    fn coordinate(&self) -> Coordinate;
}

impl Located for Coordinate {
    fn coordinate(&self) -> Coordinate {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_coordinate() {
        let c = Coordinate::try_new(43.2965, 5.3698).unwrap();
        assert_eq!(c.lat, 43.2965);
        assert_eq!(c.lon, 5.3698);
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(Coordinate::try_new(90.5, 0.0).is_err());
        assert!(Coordinate::try_new(-91.0, 0.0).is_err());
        assert!(Coordinate::try_new(0.0, 180.1).is_err());
        assert!(Coordinate::try_new(0.0, -181.0).is_err());
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(Coordinate::try_new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::try_new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(Coordinate::try_new(90.0, 180.0).is_ok());
        assert!(Coordinate::try_new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn test_parse_lat_lon() {
        let c: Coordinate = "43.0, 5.0".parse().unwrap();
        assert_eq!(c, Coordinate::new_unchecked(43.0, 5.0));

        assert!("43.0".parse::<Coordinate>().is_err());
        assert!("abc,5".parse::<Coordinate>().is_err());
        assert!("95,5".parse::<Coordinate>().is_err());
    }

    #[test]
    fn test_geo_point_axis_order() {
        let p: geo::Point<f64> = Coordinate::new_unchecked(43.0, 5.0).into();
        assert_eq!(p.x(), 5.0);
        assert_eq!(p.y(), 43.0);
    }
}

use serde::{Deserialize, Serialize};

use crate::cartesian::Point2d;
use crate::error::JotimapTypesError;
use crate::geo::impls::GeoPoint2d;
use crate::geo::{Crs, NewGeoPoint, ProjectionService};

/// A point tagged with the reference system it is expressed in.
///
/// Local and geographic coordinates never compare equal to each other; to compare them, convert
/// one side first with [`Coordinate::to_geographic`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Coordinate {
    /// Point of the local RD grid.
    Local(Point2d),
    /// WGS84 point.
    Geographic(GeoPoint2d),
}

impl Coordinate {
    /// Local coordinate from easting and northing in metres.
    pub fn local(x: f64, y: f64) -> Self {
        Self::Local(Point2d::new(x, y))
    }

    /// Geographic coordinate from latitude and longitude in degrees.
    pub fn latlon(lat: f64, lon: f64) -> Self {
        Self::Geographic(GeoPoint2d::latlon(lat, lon))
    }

    /// Builds a coordinate from an axis pair given in the order the CRS uses in GeoJSON:
    /// `[lon, lat]` for WGS84, `[x, y]` for the local grid.
    ///
    /// WGS84 pairs go through [`Coordinate::infer`], so a grid point stored as `[x, y]` in a
    /// WGS84 document is still read as a local coordinate.
    pub fn from_pair(crs: Crs, first: f64, second: f64) -> Self {
        match crs {
            Crs::Wgs84 => Self::infer(second, first),
            Crs::RdNew => Self::local(first, second),
        }
    }

    /// Builds a coordinate from a latitude/longitude pair that may hold grid values instead.
    ///
    /// If either value is outside of the range of degrees (`|v| > 180`), the pair is read as a
    /// local grid point with `latitude` holding the northing and `longitude` the easting.
    pub fn infer(latitude: f64, longitude: f64) -> Self {
        if latitude.abs() > 180.0 || longitude.abs() > 180.0 {
            Self::local(longitude, latitude)
        } else {
            Self::latlon(latitude, longitude)
        }
    }

    /// Parses a coordinate from a pair of user supplied strings, see [`Coordinate::parse_value`]
    /// and [`Coordinate::infer`].
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self, JotimapTypesError> {
        let lat = Self::parse_value(latitude)?;
        let lon = Self::parse_value(longitude)?;

        Ok(Self::infer(lat, lon))
    }

    /// Parses a single coordinate value. The value is trimmed and a decimal comma is accepted.
    pub fn parse_value(value: &str) -> Result<f64, JotimapTypesError> {
        value
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .map_err(|_| JotimapTypesError::Conversion(format!("'{value}' is not a number")))
    }

    /// Reference system of the coordinate.
    pub fn crs(&self) -> Crs {
        match self {
            Coordinate::Local(_) => Crs::RdNew,
            Coordinate::Geographic(_) => Crs::Wgs84,
        }
    }

    /// Returns the geographic point, converting local coordinates with the given service.
    pub fn to_geographic(&self, service: &ProjectionService) -> GeoPoint2d {
        match self {
            Coordinate::Local(point) => service.to_geographic(point),
            Coordinate::Geographic(point) => *point,
        }
    }
}

impl From<GeoPoint2d> for Coordinate {
    fn from(value: GeoPoint2d) -> Self {
        Self::Geographic(value)
    }
}

impl From<Point2d> for Coordinate {
    fn from(value: Point2d) -> Self {
        Self::Local(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartesian::CartesianPoint2d;
    use crate::geo::GeoPoint;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    #[test]
    fn systems_never_compare_equal() {
        let local = Coordinate::local(52.0, 5.8);
        let geographic = Coordinate::latlon(52.0, 5.8);
        assert_ne!(local, geographic);
    }

    #[test]
    fn parse_degrees() {
        let coordinate = Coordinate::parse(" 52,1 ", "5.8").expect("failed to parse");
        assert_eq!(coordinate, Coordinate::latlon(52.1, 5.8));
    }

    #[test]
    fn parse_grid() {
        let coordinate = Coordinate::parse("463000", "155000").expect("failed to parse");
        let Coordinate::Local(point) = coordinate else {
            panic!("expected a local coordinate, got {coordinate:?}");
        };
        assert_eq!(point.x(), 155_000.0);
        assert_eq!(point.y(), 463_000.0);
    }

    #[test]
    fn infer_grid_from_range() {
        assert_eq!(Coordinate::infer(52.0, 5.8), Coordinate::latlon(52.0, 5.8));
        assert_eq!(
            Coordinate::infer(463_000.0, 155_000.0),
            Coordinate::local(155_000.0, 463_000.0)
        );
        assert_eq!(
            Coordinate::infer(52.0, -181.0),
            Coordinate::local(-181.0, 52.0)
        );
        assert_eq!(Coordinate::parse_value(" 6,1 ").ok(), Some(6.1));
    }

    #[test]
    fn parse_garbage() {
        assert_matches!(
            Coordinate::parse("north", "5.8"),
            Err(JotimapTypesError::Conversion(_))
        );
    }

    #[test]
    fn pair_order_follows_crs() {
        assert_eq!(
            Coordinate::from_pair(Crs::Wgs84, 5.8, 52.0),
            Coordinate::latlon(52.0, 5.8)
        );
        assert_eq!(
            Coordinate::from_pair(Crs::RdNew, 155_000.0, 463_000.0),
            Coordinate::local(155_000.0, 463_000.0)
        );
        assert_eq!(
            Coordinate::from_pair(Crs::Wgs84, 155_000.0, 463_000.0),
            Coordinate::local(155_000.0, 463_000.0)
        );
    }

    #[test]
    fn geographic_passes_through() {
        let service = ProjectionService::new();
        let point = Coordinate::latlon(52.0, 5.8).to_geographic(&service);
        assert_eq!(point.lat(), 52.0);
        assert_eq!(point.lon(), 5.8);
    }

    #[test]
    fn local_is_converted() {
        let service = ProjectionService::new();
        let point = Coordinate::local(155_000.0, 463_000.0).to_geographic(&service);
        assert_abs_diff_eq!(point.lat(), 52.1551744, epsilon = 1e-5);
        assert_abs_diff_eq!(point.lon(), 5.3872035, epsilon = 1e-5);
        assert_eq!(Coordinate::from(point).crs(), Crs::Wgs84);
    }
}

use serde::{Deserialize, Serialize};

use crate::geo::datum::Datum;

/// Coordinate reference system a point is expressed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum Crs {
    /// WGS84 latitude and longitude in degrees.
    #[default]
    #[serde(alias = "wgs84", alias = "EPSG:4326")]
    Wgs84,
    /// Local Dutch grid (Amersfoort / RD New), easting and northing in metres.
    #[serde(alias = "rd", alias = "EPSG:28992")]
    RdNew,
}

impl Crs {
    /// Ellipsoid the coordinates refer to.
    pub fn datum(&self) -> Datum {
        match self {
            Crs::Wgs84 => Datum::WGS84,
            Crs::RdNew => Datum::BESSEL_1841,
        }
    }
}

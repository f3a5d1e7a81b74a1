use crate::cartesian::{CartesianPoint2d, Point2d};
use crate::geo::crs::Crs;
use crate::geo::datum::Datum;
use crate::geo::impls::point::GeoPoint2d;
use crate::geo::impls::projection::helmert::HelmertTransform;
use crate::geo::impls::projection::stereographic::ObliqueStereographic;
use crate::geo::traits::point::{GeoPoint, NewGeoPoint};
use crate::geo::traits::projection::Projection;

const LAT_0: f64 = 52.15616055555555;
const LON_0: f64 = 5.38763888888889;
const SCALE: f64 = 0.9999079;
const FALSE_EASTING: f64 = 155_000.0;
const FALSE_NORTHING: f64 = 463_000.0;

const TO_WGS84_TRANSLATION: [f64; 3] = [565.417, 50.3319, 465.552];
const TO_WGS84_ROTATION: [f64; 3] = [-0.398957, 0.343988, -1.8774];
const TO_WGS84_SCALE_PPM: f64 = 4.0725;

/// Amersfoort / RD New (EPSG:28992) grid.
///
/// Projects WGS84 points into RD coordinates in metres and back. Internally the point is moved
/// onto the Bessel ellipsoid with a Helmert transform and then projected with the oblique
/// stereographic projection centered on Amersfoort.
///
/// Non-finite input is not rejected: it comes out as non-finite output.
#[derive(Debug, Clone, Copy)]
pub struct RdNew {
    stereographic: ObliqueStereographic<GeoPoint2d, Point2d>,
    datum_shift: HelmertTransform,
}

impl RdNew {
    /// Creates the projection.
    pub fn new() -> Self {
        Self {
            stereographic: ObliqueStereographic::new(
                Crs::RdNew.datum(),
                LAT_0,
                LON_0,
                SCALE,
                FALSE_EASTING,
                FALSE_NORTHING,
            ),
            datum_shift: HelmertTransform::new(
                TO_WGS84_TRANSLATION,
                TO_WGS84_ROTATION,
                TO_WGS84_SCALE_PPM,
            ),
        }
    }

    /// Converts a WGS84 point into the local grid.
    pub fn to_local(&self, point: &GeoPoint2d) -> Point2d {
        let wgs84 = Datum::WGS84.geodetic_to_geocentric(point.lat_rad(), point.lon_rad(), 0.0);
        let bessel = self.datum_shift.inverse(&wgs84);
        let (lat, lon) = self.stereographic.datum().geocentric_to_geodetic(&bessel);
        let (x, y) = self.stereographic.forward(lat, lon);

        Point2d::new(x, y)
    }

    /// Converts a point of the local grid into WGS84.
    pub fn to_wgs84(&self, point: &Point2d) -> GeoPoint2d {
        let (lat, lon) = self.stereographic.inverse(point.x(), point.y());
        let bessel = self
            .stereographic
            .datum()
            .geodetic_to_geocentric(lat, lon, 0.0);
        let wgs84 = self.datum_shift.forward(&bessel);
        let (lat, lon) = Datum::WGS84.geocentric_to_geodetic(&wgs84);

        GeoPoint2d::latlon(lat.to_degrees(), lon.to_degrees())
    }
}

impl Default for RdNew {
    fn default() -> Self {
        Self::new()
    }
}

impl Projection for RdNew {
    type InPoint = GeoPoint2d;
    type OutPoint = Point2d;

    fn project(&self, input: &GeoPoint2d) -> Option<Point2d> {
        Some(self.to_local(input))
    }

    fn unproject(&self, input: &Point2d) -> Option<GeoPoint2d> {
        Some(self.to_wgs84(input))
    }
}

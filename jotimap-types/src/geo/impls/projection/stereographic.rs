use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};
use std::marker::PhantomData;

use crate::cartesian::NewCartesianPoint2d;
use crate::geo::datum::Datum;
use crate::geo::traits::point::NewGeoPoint;
use crate::geo::traits::projection::Projection;

const GAUSS_TOLERANCE: f64 = 1e-14;
const MAX_GAUSS_ITERATIONS: usize = 20;

/// Oblique stereographic projection of an ellipsoid (double projection through the Gauss
/// conformal sphere).
///
/// Geographic points are given on the projection's own datum; no datum shift is applied.
#[derive(Debug, Clone, Copy)]
pub struct ObliqueStereographic<In, Out> {
    datum: Datum,
    lon_0: f64,
    scale: f64,
    false_easting: f64,
    false_northing: f64,
    gauss: GaussSphere,
    sin_chi_0: f64,
    cos_chi_0: f64,
    chi_0: f64,
    r2: f64,
    phantom_in: PhantomData<In>,
    phantom_out: PhantomData<Out>,
}

/// Constants of the conformal mapping from the ellipsoid to the sphere.
#[derive(Debug, Clone, Copy)]
struct GaussSphere {
    e: f64,
    c: f64,
    k: f64,
    ratexp: f64,
}

fn srat(esinp: f64, exp: f64) -> f64 {
    ((1.0 - esinp) / (1.0 + esinp)).powf(exp)
}

impl GaussSphere {
    /// Returns the constants, the conformal latitude of the origin and the conformal radius
    /// (in units of the semi-major axis).
    fn new(datum: &Datum, lat_0: f64) -> (Self, f64, f64) {
        let es = datum.eccentricity_sq();
        let e = datum.eccentricity();
        let sin_phi = lat_0.sin();
        let cos_phi_sq = lat_0.cos().powi(2);

        let rc = (1.0 - es).sqrt() / (1.0 - es * sin_phi * sin_phi);
        let c = (1.0 + es * cos_phi_sq * cos_phi_sq / (1.0 - es)).sqrt();
        let chi = (sin_phi / c).asin();
        let ratexp = 0.5 * c * e;
        let k = (0.5 * chi + FRAC_PI_4).tan()
            / ((0.5 * lat_0 + FRAC_PI_4).tan().powf(c) * srat(e * sin_phi, ratexp));

        (Self { e, c, k, ratexp }, chi, rc)
    }

    fn conformal(&self, lat: f64, lon: f64) -> (f64, f64) {
        let slat = 2.0
            * (self.k
                * (0.5 * lat + FRAC_PI_4).tan().powf(self.c)
                * srat(self.e * lat.sin(), self.ratexp))
            .atan()
            - FRAC_PI_2;
        (slat, self.c * lon)
    }

    fn geodetic(&self, slat: f64, slon: f64) -> (f64, f64) {
        let num = ((0.5 * slat + FRAC_PI_4).tan() / self.k).powf(1.0 / self.c);
        let lon = slon / self.c;

        let mut lat = slat;
        for _ in 0..MAX_GAUSS_ITERATIONS {
            let next = 2.0 * (num * srat(self.e * lat.sin(), -0.5 * self.e)).atan() - FRAC_PI_2;
            let delta = (next - lat).abs();
            lat = next;

            if delta < GAUSS_TOLERANCE {
                break;
            }
        }

        (lat, lon)
    }
}

impl<In, Out> ObliqueStereographic<In, Out> {
    /// Creates the projection. Origin latitude and longitude are in degrees, false origin offsets
    /// in metres.
    pub fn new(
        datum: Datum,
        lat_0: f64,
        lon_0: f64,
        scale: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> Self {
        let (gauss, chi_0, rc) = GaussSphere::new(&datum, lat_0.to_radians());

        Self {
            datum,
            lon_0: lon_0.to_radians(),
            scale,
            false_easting,
            false_northing,
            gauss,
            sin_chi_0: chi_0.sin(),
            cos_chi_0: chi_0.cos(),
            chi_0,
            r2: 2.0 * rc,
            phantom_in: Default::default(),
            phantom_out: Default::default(),
        }
    }

    /// Datum of the projected ellipsoid.
    pub fn datum(&self) -> Datum {
        self.datum
    }

    /// Projects latitude and longitude (radians) into easting and northing (metres).
    pub fn forward(&self, lat: f64, lon: f64) -> (f64, f64) {
        let (slat, slon) = self.gauss.conformal(lat, lon - self.lon_0);
        let (sin_c, cos_c) = slat.sin_cos();
        let cos_l = slon.cos();

        let k =
            self.scale * self.r2 / (1.0 + self.sin_chi_0 * sin_c + self.cos_chi_0 * cos_c * cos_l);
        let x = k * cos_c * slon.sin();
        let y = k * (self.cos_chi_0 * sin_c - self.sin_chi_0 * cos_c * cos_l);

        let a = self.datum.semimajor();
        (a * x + self.false_easting, a * y + self.false_northing)
    }

    /// Converts easting and northing (metres) back into latitude and longitude (radians).
    pub fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        let a = self.datum.semimajor();
        let x = (x - self.false_easting) / a / self.scale;
        let y = (y - self.false_northing) / a / self.scale;

        let rho = x.hypot(y);
        let (slat, slon) = if rho != 0.0 {
            let c = 2.0 * rho.atan2(self.r2);
            let (sin_c, cos_c) = c.sin_cos();
            let slat = (cos_c * self.sin_chi_0 + y * sin_c * self.cos_chi_0 / rho).asin();
            let slon = (x * sin_c).atan2(rho * self.cos_chi_0 * cos_c - y * self.sin_chi_0 * sin_c);
            (slat, slon)
        } else {
            (self.chi_0, 0.0)
        };

        let (lat, lon) = self.gauss.geodetic(slat, slon);
        (lat, lon + self.lon_0)
    }
}

impl<In: NewGeoPoint<f64>, Out: NewCartesianPoint2d<f64>> Projection
    for ObliqueStereographic<In, Out>
{
    type InPoint = In;
    type OutPoint = Out;

    fn project(&self, input: &In) -> Option<Out> {
        let (x, y) = self.forward(input.lat_rad(), input.lon_rad());
        Some(Out::new(x, y))
    }

    fn unproject(&self, input: &Out) -> Option<In> {
        let (lat, lon) = self.inverse(input.x(), input.y());
        Some(In::latlon(lat.to_degrees(), lon.to_degrees()))
    }
}

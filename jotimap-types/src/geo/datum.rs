use nalgebra::Vector3;

const GEODETIC_TOLERANCE: f64 = 1e-14;
const MAX_GEODETIC_ITERATIONS: usize = 30;

/// Reference ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Datum {
    semimajor: f64,
    inv_flattening: f64,
}

impl Datum {
    /// WGS84 ellipsoid.
    pub const WGS84: Self = Datum {
        semimajor: 6_378_137.0,
        inv_flattening: 298.257223563,
    };

    /// Bessel 1841 ellipsoid, used by the Amersfoort datum of the RD grid.
    pub const BESSEL_1841: Self = Datum {
        semimajor: 6_377_397.155,
        inv_flattening: 299.1528128,
    };

    /// Semi-major axis in metres.
    pub fn semimajor(&self) -> f64 {
        self.semimajor
    }

    /// Squared first eccentricity.
    pub fn eccentricity_sq(&self) -> f64 {
        let f = 1.0 / self.inv_flattening;
        2.0 * f - f * f
    }

    /// First eccentricity.
    pub fn eccentricity(&self) -> f64 {
        self.eccentricity_sq().sqrt()
    }

    /// Converts geodetic coordinates (radians, metres above the ellipsoid) into earth-centered
    /// cartesian coordinates.
    pub fn geodetic_to_geocentric(&self, lat: f64, lon: f64, height: f64) -> Vector3<f64> {
        let es = self.eccentricity_sq();
        let (sin_lat, cos_lat) = lat.sin_cos();
        let n = self.semimajor / (1.0 - es * sin_lat * sin_lat).sqrt();

        Vector3::new(
            (n + height) * cos_lat * lon.cos(),
            (n + height) * cos_lat * lon.sin(),
            (n * (1.0 - es) + height) * sin_lat,
        )
    }

    /// Converts earth-centered cartesian coordinates into geodetic latitude and longitude in
    /// radians. The height above the ellipsoid is dropped.
    pub fn geocentric_to_geodetic(&self, xyz: &Vector3<f64>) -> (f64, f64) {
        let es = self.eccentricity_sq();
        let lon = xyz.y.atan2(xyz.x);
        let p = xyz.x.hypot(xyz.y);

        let mut lat = xyz.z.atan2(p * (1.0 - es));
        for _ in 0..MAX_GEODETIC_ITERATIONS {
            let sin_lat = lat.sin();
            let n = self.semimajor / (1.0 - es * sin_lat * sin_lat).sqrt();
            let height = p / lat.cos() - n;
            let next = xyz.z.atan2(p * (1.0 - es * n / (n + height)));
            let delta = (next - lat).abs();
            lat = next;

            if delta < GEODETIC_TOLERANCE {
                break;
            }
        }

        (lat, lon)
    }
}

impl Default for Datum {
    fn default() -> Self {
        Self::WGS84
    }
}

use crate::cartesian::Point2d;
use crate::geo::impls::projection::RdNew;
use crate::geo::impls::GeoPoint2d;

/// Stateless conversion between the local grid and WGS84.
///
/// The projection definition is fixed (see [`RdNew`]); there is nothing to configure. The service
/// is cheap to copy and can be handed to every component that accepts local coordinates.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectionService {
    projection: RdNew,
}

impl ProjectionService {
    /// Creates the service.
    pub fn new() -> Self {
        Self {
            projection: RdNew::new(),
        }
    }

    /// Converts a local point into a geographic one.
    pub fn to_geographic(&self, local: &Point2d) -> GeoPoint2d {
        self.projection.to_wgs84(local)
    }

    /// Converts a geographic point into the local grid.
    pub fn to_local(&self, geographic: &GeoPoint2d) -> Point2d {
        self.projection.to_local(geographic)
    }
}

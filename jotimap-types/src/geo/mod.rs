//! Geometries in geographic coordinates (latitude and longitude) (see [`GeoPoint`]) and conversion
//! between the local grid and geographic coordinates (see [`Projection`] and
//! [`ProjectionService`]).

mod crs;
mod datum;
pub mod impls;
mod service;
mod traits;

pub use crs::Crs;
pub use datum::Datum;
pub use service::ProjectionService;
pub use traits::point::{GeoPoint, NewGeoPoint};
pub use traits::projection::Projection;

//! Implementations of the geographic traits.

mod point;
pub mod projection;

pub use point::GeoPoint2d;

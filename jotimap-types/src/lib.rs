//! Coordinate types for the jotimap engine.
//!
//! Points live in one of two reference systems: the local Dutch grid (RD New, see
//! [`geo::impls::projection::RdNew`]) expressed as [`cartesian::Point2d`], or WGS84 latitude and
//! longitude expressed as [`geo::impls::GeoPoint2d`]. The two are separate types, and the only way
//! to get from one to the other is through a [`geo::Projection`], usually via
//! [`geo::ProjectionService`]. [`Coordinate`] tags a point with its system for data that may come
//! in either form.

pub mod cartesian;
mod coordinate;
pub mod error;
pub mod geo;

pub use coordinate::Coordinate;

//! Points in a projected (cartesian) coordinate system, such as the local RD New grid.

mod point;

pub use point::{CartesianPoint2d, NewCartesianPoint2d, Point2d};

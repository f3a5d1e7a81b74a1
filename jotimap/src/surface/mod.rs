//! The [`MapSurface`] capability trait and the handles it hands out.
//!
//! A surface owns everything that is actually drawn: the viewport, the base tiles, markers and
//! polylines. Jotimap never mirrors that state; it only keeps the handles it got from the
//! surface and issues commands through them.

mod recording;

pub use recording::{RecordedLine, RecordedMarker, RecordingSurface, SurfaceCommand};

use std::sync::Arc;

use jotimap_types::geo::impls::GeoPoint2d;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::config::TileLayerConfig;
use crate::icon::{Icon, MarkerColor};

/// Surface shared between the components of a session.
pub type SharedSurface<S> = Arc<RwLock<S>>;

/// Marker created by a surface.
///
/// The handle is intentionally neither `Clone` nor `Copy`: every marker is referenced from
/// exactly one place, and giving the handle back to [`MapSurface::remove_layer`] consumes it.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct MarkerHandle(u64);

impl MarkerHandle {
    /// Wraps the surface's own marker identifier.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The surface's marker identifier.
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Polyline created by a surface. Like [`MarkerHandle`], it cannot be duplicated.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct LineHandle(u64);

impl LineHandle {
    /// Wraps the surface's own line identifier.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The surface's line identifier.
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Anything that can be removed from a surface.
#[derive(Debug, PartialEq, Eq)]
pub enum LayerHandle {
    /// A marker.
    Marker(MarkerHandle),
    /// A polyline.
    Line(LineHandle),
}

impl From<MarkerHandle> for LayerHandle {
    fn from(value: MarkerHandle) -> Self {
        Self::Marker(value)
    }
}

impl From<LineHandle> for LayerHandle {
    fn from(value: LineHandle) -> Self {
        Self::Line(value)
    }
}

/// Look of a polyline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub weight: f64,
}

impl LineStyle {
    /// Default stroke width.
    pub const DEFAULT_WEIGHT: f64 = 3.0;

    /// Line in the color of the given markers.
    pub fn new(color: MarkerColor) -> Self {
        Self {
            color: color.to_color(),
            weight: Self::DEFAULT_WEIGHT,
        }
    }

    /// Sets the stroke width.
    pub fn with_weight(self, weight: f64) -> Self {
        Self { weight, ..self }
    }
}

/// Rendering widget the map state is shown on.
///
/// All methods are commands: a surface must accept them in any order, and commands addressed to
/// handles it does not know must be ignored.
pub trait MapSurface {
    /// Creates the viewport centered on `center` at the given zoom level.
    fn create_viewport(center: GeoPoint2d, zoom: u8) -> Self
    where
        Self: Sized;

    /// Adds a base tile layer.
    fn add_tile_layer(&mut self, layer: &TileLayerConfig);

    /// Places a marker with the default icon and returns its handle.
    fn place_marker(
        &mut self,
        position: GeoPoint2d,
        tooltip: Option<&str>,
        popup: Option<&str>,
    ) -> MarkerHandle;

    /// Replaces the icon of a marker.
    fn set_marker_icon(&mut self, marker: &MarkerHandle, icon: &Icon);

    /// Moves a marker.
    fn set_marker_position(&mut self, marker: &MarkerHandle, position: GeoPoint2d);

    /// Removes a marker or a polyline from the map.
    fn remove_layer(&mut self, layer: LayerHandle);

    /// Creates an empty polyline.
    fn create_polyline(&mut self, style: &LineStyle) -> LineHandle;

    /// Appends a vertex to the end of a polyline.
    fn extend_polyline(&mut self, line: &LineHandle, position: GeoPoint2d);

    /// Animates the viewport to the given position.
    fn fly_to(&mut self, position: GeoPoint2d);
}

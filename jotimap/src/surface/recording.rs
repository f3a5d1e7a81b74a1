use std::collections::BTreeMap;

use jotimap_types::geo::impls::GeoPoint2d;

use crate::config::TileLayerConfig;
use crate::icon::Icon;
use crate::surface::{LayerHandle, LineHandle, LineStyle, MapSurface, MarkerHandle};

/// Command received by a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCommand {
    /// [`MapSurface::add_tile_layer`].
    AddTileLayer(String),
    /// [`MapSurface::place_marker`], with the id of the created marker.
    PlaceMarker(u64),
    /// [`MapSurface::set_marker_icon`].
    SetMarkerIcon(u64),
    /// [`MapSurface::set_marker_position`].
    SetMarkerPosition(u64),
    /// [`MapSurface::remove_layer`] for a marker.
    RemoveMarker(u64),
    /// [`MapSurface::remove_layer`] for a polyline.
    RemoveLine(u64),
    /// [`MapSurface::create_polyline`], with the id of the created line.
    CreatePolyline(u64),
    /// [`MapSurface::extend_polyline`].
    ExtendPolyline(u64),
    /// [`MapSurface::fly_to`].
    FlyTo(GeoPoint2d),
}

/// Marker as seen by a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedMarker {
    /// Current position.
    pub position: GeoPoint2d,
    /// Tooltip text.
    pub tooltip: Option<String>,
    /// Popup text.
    pub popup: Option<String>,
    /// Current icon, `None` until the first icon is set.
    pub icon: Option<Icon>,
}

/// Polyline as seen by a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedLine {
    /// Line style.
    pub style: LineStyle,
    /// Vertices in the order they were added.
    pub points: Vec<GeoPoint2d>,
}

/// Headless surface that keeps what would be drawn in memory.
///
/// Useful for server side processing, for snapshots of the map state and for tests. Every
/// command is also appended to a log, see [`RecordingSurface::commands`].
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    center: GeoPoint2d,
    zoom: u8,
    tile_layers: Vec<TileLayerConfig>,
    markers: BTreeMap<u64, RecordedMarker>,
    lines: BTreeMap<u64, RecordedLine>,
    next_id: u64,
    commands: Vec<SurfaceCommand>,
}

impl RecordingSurface {
    /// Current viewport center.
    pub fn center(&self) -> GeoPoint2d {
        self.center
    }

    /// Current zoom level.
    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Base layers in the order they were added.
    pub fn tile_layers(&self) -> &[TileLayerConfig] {
        &self.tile_layers
    }

    /// Returns the marker, if it is still on the map.
    pub fn marker(&self, handle: &MarkerHandle) -> Option<&RecordedMarker> {
        self.markers.get(&handle.id())
    }

    /// Markers currently on the map.
    pub fn markers(&self) -> impl Iterator<Item = &RecordedMarker> + '_ {
        self.markers.values()
    }

    /// Number of markers currently on the map.
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Returns the line, if it is still on the map.
    pub fn line(&self, handle: &LineHandle) -> Option<&RecordedLine> {
        self.lines.get(&handle.id())
    }

    /// Number of polylines currently on the map.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// All commands received so far.
    pub fn commands(&self) -> &[SurfaceCommand] {
        &self.commands
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl MapSurface for RecordingSurface {
    fn create_viewport(center: GeoPoint2d, zoom: u8) -> Self {
        Self {
            center,
            zoom,
            tile_layers: vec![],
            markers: BTreeMap::new(),
            lines: BTreeMap::new(),
            next_id: 0,
            commands: vec![],
        }
    }

    fn add_tile_layer(&mut self, layer: &TileLayerConfig) {
        self.commands
            .push(SurfaceCommand::AddTileLayer(layer.url_template.clone()));
        self.tile_layers.push(layer.clone());
    }

    fn place_marker(
        &mut self,
        position: GeoPoint2d,
        tooltip: Option<&str>,
        popup: Option<&str>,
    ) -> MarkerHandle {
        let id = self.next_id();
        self.markers.insert(
            id,
            RecordedMarker {
                position,
                tooltip: tooltip.map(str::to_string),
                popup: popup.map(str::to_string),
                icon: None,
            },
        );
        self.commands.push(SurfaceCommand::PlaceMarker(id));

        MarkerHandle::new(id)
    }

    fn set_marker_icon(&mut self, marker: &MarkerHandle, icon: &Icon) {
        self.commands
            .push(SurfaceCommand::SetMarkerIcon(marker.id()));
        match self.markers.get_mut(&marker.id()) {
            Some(recorded) => recorded.icon = Some(icon.clone()),
            None => log::warn!("Icon set for unknown marker {}", marker.id()),
        }
    }

    fn set_marker_position(&mut self, marker: &MarkerHandle, position: GeoPoint2d) {
        self.commands
            .push(SurfaceCommand::SetMarkerPosition(marker.id()));
        match self.markers.get_mut(&marker.id()) {
            Some(recorded) => recorded.position = position,
            None => log::warn!("Position set for unknown marker {}", marker.id()),
        }
    }

    fn remove_layer(&mut self, layer: LayerHandle) {
        match layer {
            LayerHandle::Marker(marker) => {
                self.commands
                    .push(SurfaceCommand::RemoveMarker(marker.id()));
                self.markers.remove(&marker.id());
            }
            LayerHandle::Line(line) => {
                self.commands.push(SurfaceCommand::RemoveLine(line.id()));
                self.lines.remove(&line.id());
            }
        }
    }

    fn create_polyline(&mut self, style: &LineStyle) -> LineHandle {
        let id = self.next_id();
        self.lines.insert(
            id,
            RecordedLine {
                style: *style,
                points: vec![],
            },
        );
        self.commands.push(SurfaceCommand::CreatePolyline(id));

        LineHandle::new(id)
    }

    fn extend_polyline(&mut self, line: &LineHandle, position: GeoPoint2d) {
        self.commands
            .push(SurfaceCommand::ExtendPolyline(line.id()));
        match self.lines.get_mut(&line.id()) {
            Some(recorded) => recorded.points.push(position),
            None => log::warn!("Vertex added to unknown line {}", line.id()),
        }
    }

    fn fly_to(&mut self, position: GeoPoint2d) {
        self.commands.push(SurfaceCommand::FlyTo(position));
        self.center = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::{IconCatalog, MarkerColor};
    use crate::registry::EntityKind;
    use jotimap_types::latlon;

    #[test]
    fn marker_lifecycle() {
        let mut surface = RecordingSurface::create_viewport(latlon!(52.0, 5.8), 10);
        let marker = surface.place_marker(latlon!(52.1, 5.9), Some("Fox A"), Some("Fox A"));
        assert_eq!(surface.marker_count(), 1);
        assert_eq!(
            surface.marker(&marker).and_then(|m| m.tooltip.as_deref()),
            Some("Fox A")
        );

        let catalog = IconCatalog::default();
        let icon = catalog.icon_for(EntityKind::Point, catalog.style_for(None, false));
        surface.set_marker_icon(&marker, &icon);
        surface.set_marker_position(&marker, latlon!(52.2, 6.0));

        let recorded = surface.marker(&marker).expect("marker is gone");
        assert_eq!(recorded.position, latlon!(52.2, 6.0));
        assert_eq!(
            recorded.icon.as_ref().map(|i| i.style.color),
            Some(MarkerColor::Grey)
        );

        let id = marker.id();
        surface.remove_layer(marker.into());
        assert_eq!(surface.marker_count(), 0);
        assert_eq!(
            surface.commands().last(),
            Some(&SurfaceCommand::RemoveMarker(id))
        );
    }

    #[test]
    fn polyline_keeps_vertex_order() {
        let mut surface = RecordingSurface::create_viewport(latlon!(52.0, 5.8), 10);
        let line = surface.create_polyline(&LineStyle::new(MarkerColor::Red));
        for lat in [52.0, 52.1, 51.9] {
            surface.extend_polyline(&line, latlon!(lat, 5.8));
        }

        let points = &surface.line(&line).expect("line is gone").points;
        assert_eq!(
            points,
            &vec![latlon!(52.0, 5.8), latlon!(52.1, 5.8), latlon!(51.9, 5.8)]
        );

        surface.remove_layer(line.into());
        assert_eq!(surface.line_count(), 0);
    }

    #[test]
    fn fly_to_moves_center() {
        let mut surface = RecordingSurface::create_viewport(latlon!(52.0, 5.8), 10);
        surface.add_tile_layer(&TileLayerConfig::default());
        surface.fly_to(latlon!(51.5, 5.0));

        assert_eq!(surface.center(), latlon!(51.5, 5.0));
        assert_eq!(surface.zoom(), 10);
        assert_eq!(surface.tile_layers().len(), 1);
    }
}

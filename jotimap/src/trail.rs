use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use jotimap_types::geo::impls::GeoPoint2d;
use jotimap_types::geo::ProjectionService;
use jotimap_types::Coordinate;

use crate::registry::EntityId;
use crate::surface::{LineHandle, LineStyle, MapSurface, SharedSurface};

/// Identifier of a trail in a [`TrailManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrailId(u64);

impl Display for TrailId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "trail#{}", self.0)
    }
}

/// Path history of a tracked entity, shown as a polyline.
#[derive(Debug)]
pub struct Trail {
    id: TrailId,
    entity: EntityId,
    style: LineStyle,
    points: Vec<GeoPoint2d>,
    line: LineHandle,
}

impl Trail {
    /// Identifier of the trail.
    pub fn id(&self) -> TrailId {
        self.id
    }

    /// Entity the trail was started for. The entity may have been removed since.
    pub fn entity(&self) -> EntityId {
        self.entity
    }

    /// Style of the polyline.
    pub fn style(&self) -> LineStyle {
        self.style
    }

    /// Vertices in the order they were appended.
    pub fn points(&self) -> &[GeoPoint2d] {
        &self.points
    }

    /// Handle of the polyline.
    pub fn line(&self) -> &LineHandle {
        &self.line
    }
}

/// Owner of the trails drawn on a surface.
///
/// Trails only grow: a point, once appended, is never moved or dropped. A trail that has to
/// change otherwise is removed and started again. Removing an entity from the
/// [`MarkerRegistry`](crate::MarkerRegistry) does not remove its trails.
pub struct TrailManager<S> {
    surface: SharedSurface<S>,
    projection: ProjectionService,
    trails: BTreeMap<TrailId, Trail>,
    next_id: u64,
}

impl<S: MapSurface> TrailManager<S> {
    /// Creates a manager without trails.
    pub fn new(surface: SharedSurface<S>) -> Self {
        Self {
            surface,
            projection: ProjectionService::new(),
            trails: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Starts an empty trail for the entity.
    pub fn start_trail(&mut self, entity: EntityId, style: LineStyle) -> TrailId {
        let id = TrailId(self.next_id);
        self.next_id += 1;

        let line = self.surface.write().create_polyline(&style);
        self.trails.insert(
            id,
            Trail {
                id,
                entity,
                style,
                points: vec![],
                line,
            },
        );

        log::debug!("Started {id} for entity {entity}");
        id
    }

    /// Appends a point to the end of the trail. Does nothing if the trail is unknown.
    pub fn append_point(&mut self, id: TrailId, coord: impl Into<Coordinate>) {
        let Some(trail) = self.trails.get_mut(&id) else {
            log::debug!("Ignoring point appended to unknown {id}");
            return;
        };

        let position = coord.into().to_geographic(&self.projection);
        trail.points.push(position);
        self.surface.write().extend_polyline(&trail.line, position);
    }

    /// Removes the trail and its polyline. Removing a trail twice is a no-op.
    pub fn remove_trail(&mut self, id: TrailId) {
        if let Some(trail) = self.trails.remove(&id) {
            self.surface.write().remove_layer(trail.line.into());
            log::debug!("Removed {id}");
        }
    }

    /// Returns the trail if it exists.
    pub fn get(&self, id: TrailId) -> Option<&Trail> {
        self.trails.get(&id)
    }

    /// Points of the trail, empty for unknown trails.
    pub fn points(&self, id: TrailId) -> &[GeoPoint2d] {
        self.trails
            .get(&id)
            .map(|trail| trail.points())
            .unwrap_or_default()
    }

    /// Trails started for the entity, oldest first.
    pub fn trails_of(&self, entity: EntityId) -> impl Iterator<Item = &Trail> + '_ {
        self.trails
            .values()
            .filter(move |trail| trail.entity == entity)
    }

    /// Number of trails.
    pub fn len(&self) -> usize {
        self.trails.len()
    }

    /// Returns true if there are no trails.
    pub fn is_empty(&self) -> bool {
        self.trails.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::icon::{IconCatalog, MarkerColor};
    use crate::registry::MarkerRegistry;
    use crate::surface::RecordingSurface;
    use approx::assert_abs_diff_eq;
    use jotimap_types::geo::GeoPoint;
    use jotimap_types::latlon;
    use parking_lot::RwLock;

    fn surface() -> SharedSurface<RecordingSurface> {
        let viewport = RecordingSurface::create_viewport(latlon!(52.0, 5.8), 10);
        Arc::new(RwLock::new(viewport))
    }

    fn entity(
        surface: &SharedSurface<RecordingSurface>,
    ) -> (MarkerRegistry<RecordingSurface>, EntityId) {
        let mut registry = MarkerRegistry::new(surface.clone(), IconCatalog::default());
        let id = registry.add(latlon!(52.0, 5.8), Some("Fox A"), None);
        (registry, id)
    }

    #[test]
    fn append_never_reorders() {
        let surface = surface();
        let (_, entity) = entity(&surface);
        let mut trails = TrailManager::new(surface.clone());
        let trail = trails.start_trail(entity, LineStyle::new(MarkerColor::Violet));

        let expected = [
            latlon!(52.0, 5.8),
            latlon!(52.3, 5.1),
            latlon!(51.9, 6.2),
            latlon!(52.0, 5.8),
        ];
        for point in expected {
            trails.append_point(trail, point);
        }

        assert_eq!(trails.points(trail), &expected);
        let line = trails.get(trail).expect("trail is missing").line();
        assert_eq!(
            surface.read().line(line).map(|l| l.points.clone()),
            Some(expected.to_vec())
        );
    }

    #[test]
    fn local_points_are_converted() {
        let surface = surface();
        let (_, entity) = entity(&surface);
        let mut trails = TrailManager::new(surface);
        let trail = trails.start_trail(entity, LineStyle::new(MarkerColor::Red));
        trails.append_point(trail, Coordinate::local(155_000.0, 463_000.0));

        let point = trails.points(trail)[0];
        assert_abs_diff_eq!(point.lat(), 52.1551744, epsilon = 1e-5);
        assert_abs_diff_eq!(point.lon(), 5.3872035, epsilon = 1e-5);
    }

    #[test]
    fn removing_entity_keeps_trail() {
        let surface = surface();
        let (mut registry, entity) = entity(&surface);
        let mut trails = TrailManager::new(surface.clone());
        let trail = trails.start_trail(entity, LineStyle::new(MarkerColor::Blue));
        trails.append_point(trail, latlon!(52.0, 5.8));

        registry.remove(entity);

        assert_eq!(trails.len(), 1);
        assert_eq!(trails.points(trail).len(), 1);
        assert_eq!(surface.read().line_count(), 1);
        assert_eq!(trails.trails_of(entity).count(), 1);
    }

    #[test]
    fn remove_trail() {
        let surface = surface();
        let (_, entity) = entity(&surface);
        let mut trails = TrailManager::new(surface.clone());
        let first = trails.start_trail(entity, LineStyle::new(MarkerColor::Green));
        let second = trails.start_trail(entity, LineStyle::new(MarkerColor::Green));

        trails.remove_trail(first);
        trails.remove_trail(first);
        trails.append_point(first, latlon!(52.0, 5.8));

        assert!(trails.get(first).is_none());
        assert!(trails.points(first).is_empty());
        assert_eq!(
            trails.trails_of(entity).map(|t| t.id()).collect::<Vec<_>>(),
            vec![second]
        );
        assert_eq!(surface.read().line_count(), 1);
        assert!(!trails.is_empty());
    }
}

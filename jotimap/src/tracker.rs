use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use jotimap_types::Coordinate;
use serde::{Deserialize, Serialize};

use crate::icon::Area;
use crate::registry::{EntityId, EntityKind, MarkerRegistry};
use crate::surface::{LineStyle, MapSurface};
use crate::trail::{TrailId, TrailManager};

/// Key of a fox sighting. Keys are ordered by day, then time, then fox name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SightingKey {
    /// Day of the hunt.
    pub day: String,
    /// Time of the sighting, in a format that sorts chronologically (e.g. `14:00`).
    pub time: String,
    /// Name of the fox team, usually an area name.
    pub fox_name: String,
}

impl SightingKey {
    /// Creates a key.
    pub fn new(
        day: impl Into<String>,
        time: impl Into<String>,
        fox_name: impl Into<String>,
    ) -> Self {
        Self {
            day: day.into(),
            time: time.into(),
            fox_name: fox_name.into(),
        }
    }
}

impl Display for SightingKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.fox_name, self.day, self.time)
    }
}

/// Location of a sighting as entered by a user.
///
/// Both values are kept as text. See [`Coordinate::parse`] for the accepted formats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sighting {
    /// Latitude, or northing for local grid points.
    pub latitude: String,
    /// Longitude, or easting for local grid points.
    pub longitude: String,
}

impl Sighting {
    /// Creates a sighting.
    pub fn new(latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        Self {
            latitude: latitude.into(),
            longitude: longitude.into(),
        }
    }
}

#[derive(Debug)]
struct Tracked {
    entity: EntityId,
    coord: Coordinate,
}

#[derive(Debug, Default)]
struct FoxTrack {
    sightings: BTreeMap<SightingKey, Tracked>,
    emphasized: Option<EntityId>,
    trail: Option<TrailId>,
}

impl FoxTrack {
    fn newest(&self) -> Option<(&SightingKey, &Tracked)> {
        self.sightings.last_key_value()
    }
}

/// Keeps fox sighting markers and trails in sync with the sightings table.
///
/// Every sighting is shown as a [`EntityKind::Fox`] marker colored by the fox's area. For each
/// fox the newest sighting is emphasized and a trail connects all sightings in key order.
/// Sightings arriving in order extend the trail; any other change removes the trail and draws it
/// again, so trails are never edited in place.
#[derive(Debug, Default)]
pub struct HuntTracker {
    foxes: BTreeMap<String, FoxTrack>,
}

impl HuntTracker {
    /// Creates a tracker without sightings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies an edit of the sightings table: `Some` inserts or replaces the sighting, `None`
    /// deletes it.
    ///
    /// Returns the entity created for the sighting, if any. Sightings with coordinates that
    /// cannot be parsed are ignored.
    pub fn apply<S: MapSurface>(
        &mut self,
        registry: &mut MarkerRegistry<S>,
        trails: &mut TrailManager<S>,
        key: SightingKey,
        sighting: Option<Sighting>,
    ) -> Option<EntityId> {
        match sighting {
            Some(sighting) => self.upsert(registry, trails, key, sighting),
            None => {
                self.delete(registry, trails, &key);
                None
            }
        }
    }

    fn upsert<S: MapSurface>(
        &mut self,
        registry: &mut MarkerRegistry<S>,
        trails: &mut TrailManager<S>,
        key: SightingKey,
        sighting: Sighting,
    ) -> Option<EntityId> {
        let coord = match Coordinate::parse(&sighting.latitude, &sighting.longitude) {
            Ok(coord) => coord,
            Err(err) => {
                log::warn!("Ignoring sighting {key}: {err}");
                return None;
            }
        };

        let area = Area::parse(&key.fox_name);
        let entity = registry.add_entity(coord, Some(&key.to_string()), area, EntityKind::Fox);

        let track = self.foxes.entry(key.fox_name.clone()).or_default();
        let is_newest = track.newest().is_none_or(|(newest, _)| *newest < key);
        let replaced = track.sightings.insert(key, Tracked { entity, coord });

        if let Some(replaced) = &replaced {
            registry.remove(replaced.entity);
        }

        update_emphasis(track, registry);

        if is_newest && replaced.is_none() {
            match track.trail {
                Some(trail) => trails.append_point(trail, coord),
                None => rebuild_trail(track, area, registry, trails),
            }
        } else {
            rebuild_trail(track, area, registry, trails);
        }

        Some(entity)
    }

    fn delete<S: MapSurface>(
        &mut self,
        registry: &mut MarkerRegistry<S>,
        trails: &mut TrailManager<S>,
        key: &SightingKey,
    ) {
        let Some(track) = self.foxes.get_mut(&key.fox_name) else {
            log::debug!("Ignoring removal of unknown sighting {key}");
            return;
        };
        let Some(removed) = track.sightings.remove(key) else {
            log::debug!("Ignoring removal of unknown sighting {key}");
            return;
        };

        registry.remove(removed.entity);

        if track.sightings.is_empty() {
            if let Some(trail) = track.trail.take() {
                trails.remove_trail(trail);
            }
            self.foxes.remove(&key.fox_name);
            return;
        }

        update_emphasis(track, registry);
        rebuild_trail(track, Area::parse(&key.fox_name), registry, trails);
    }

    /// Entity showing the sighting.
    pub fn entity(&self, key: &SightingKey) -> Option<EntityId> {
        self.foxes
            .get(&key.fox_name)?
            .sightings
            .get(key)
            .map(|tracked| tracked.entity)
    }

    /// Entity showing the newest sighting of the fox.
    pub fn newest(&self, fox_name: &str) -> Option<EntityId> {
        self.foxes
            .get(fox_name)?
            .newest()
            .map(|(_, tracked)| tracked.entity)
    }

    /// Trail of the fox.
    pub fn trail(&self, fox_name: &str) -> Option<TrailId> {
        self.foxes.get(fox_name)?.trail
    }

    /// Sighting keys of the fox in key order.
    pub fn sightings<'a>(&'a self, fox_name: &str) -> impl Iterator<Item = &'a SightingKey> + 'a {
        self.foxes
            .get(fox_name)
            .into_iter()
            .flat_map(|track| track.sightings.keys())
    }

    /// Total number of sightings.
    pub fn len(&self) -> usize {
        self.foxes.values().map(|track| track.sightings.len()).sum()
    }

    /// Returns true if there are no sightings.
    pub fn is_empty(&self) -> bool {
        self.foxes.is_empty()
    }
}

fn update_emphasis<S: MapSurface>(track: &mut FoxTrack, registry: &mut MarkerRegistry<S>) {
    let newest = track.newest().map(|(_, tracked)| tracked.entity);
    if newest == track.emphasized {
        return;
    }

    if let Some(previous) = track.emphasized {
        registry.set_emphasis(previous, false);
    }
    if let Some(newest) = newest {
        registry.set_emphasis(newest, true);
    }
    track.emphasized = newest;
}

fn rebuild_trail<S: MapSurface>(
    track: &mut FoxTrack,
    area: Option<Area>,
    registry: &MarkerRegistry<S>,
    trails: &mut TrailManager<S>,
) {
    if let Some(trail) = track.trail.take() {
        trails.remove_trail(trail);
    }

    let Some((_, newest)) = track.newest() else {
        return;
    };

    let style = LineStyle::new(registry.catalog().color_for(area));
    let trail = trails.start_trail(newest.entity, style);
    for tracked in track.sightings.values() {
        trails.append_point(trail, tracked.coord);
    }

    track.trail = Some(trail);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::icon::{IconCatalog, MarkerColor, SizeTier};
    use crate::registry::EntityState;
    use crate::surface::{RecordingSurface, SharedSurface};
    use jotimap_types::geo::impls::GeoPoint2d;
    use jotimap_types::latlon;
    use parking_lot::RwLock;

    struct Fixture {
        surface: SharedSurface<RecordingSurface>,
        registry: MarkerRegistry<RecordingSurface>,
        trails: TrailManager<RecordingSurface>,
        tracker: HuntTracker,
    }

    impl Fixture {
        fn new() -> Self {
            let viewport = RecordingSurface::create_viewport(latlon!(52.0, 5.8), 10);
            let surface = Arc::new(RwLock::new(viewport));
            Self {
                registry: MarkerRegistry::new(surface.clone(), IconCatalog::default()),
                trails: TrailManager::new(surface.clone()),
                surface,
                tracker: HuntTracker::new(),
            }
        }

        fn sighting(&mut self, time: &str, fox: &str, lat: &str, lon: &str) -> Option<EntityId> {
            self.tracker.apply(
                &mut self.registry,
                &mut self.trails,
                SightingKey::new("zaterdag", time, fox),
                Some(Sighting::new(lat, lon)),
            )
        }

        fn delete(&mut self, time: &str, fox: &str) {
            self.tracker.apply(
                &mut self.registry,
                &mut self.trails,
                SightingKey::new("zaterdag", time, fox),
                None,
            );
        }

        fn trail_points(&self, fox: &str) -> Vec<GeoPoint2d> {
            let trail = self.tracker.trail(fox).expect("fox has no trail");
            self.trails.points(trail).to_vec()
        }

        fn emphasized(&self) -> Vec<EntityId> {
            self.registry
                .iter()
                .filter(|entity| entity.emphasis())
                .map(|entity| entity.id())
                .collect()
        }
    }

    #[test]
    fn sighting_marker() {
        let mut fixture = Fixture::new();
        let id = fixture
            .sighting("10:00", "Alpha", "52.0", "5.8")
            .expect("sighting was ignored");

        let entity = fixture.registry.get(id).expect("entity is missing");
        assert_eq!(entity.name(), Some("Alpha zaterdag 10:00"));
        assert_eq!(entity.kind(), EntityKind::Fox);
        assert_eq!(entity.area(), Some(Area::Alpha));
        assert_eq!(entity.style().color, MarkerColor::Violet);
        assert_eq!(entity.style().size, SizeTier::Full);
        assert_eq!(entity.position(), latlon!(52.0, 5.8));
    }

    #[test]
    fn newest_sighting_is_emphasized() {
        let mut fixture = Fixture::new();
        let first = fixture.sighting("10:00", "Bravo", "52.0", "5.8");
        let second = fixture.sighting("11:00", "Bravo", "52.1", "5.9");
        let other = fixture.sighting("10:30", "Charlie", "51.9", "5.7");

        let mut expected = vec![second.expect("ignored"), other.expect("ignored")];
        expected.sort();
        assert_eq!(fixture.emphasized(), expected);
        assert_eq!(
            fixture
                .registry
                .get(first.expect("ignored"))
                .map(|e| e.style().size),
            Some(SizeTier::Reduced)
        );

        fixture.sighting("09:00", "Bravo", "51.8", "5.6");
        assert_eq!(fixture.emphasized(), expected);
        assert_eq!(fixture.tracker.newest("Bravo"), second);
    }

    #[test]
    fn trail_in_key_order() {
        let mut fixture = Fixture::new();
        fixture.sighting("10:00", "Delta", "52.0", "5.8");
        fixture.sighting("12:00", "Delta", "52.2", "6.0");
        let trail = fixture.tracker.trail("Delta");
        fixture.sighting("13:00", "Delta", "52.3", "6.1");

        assert_eq!(fixture.tracker.trail("Delta"), trail);
        assert_eq!(
            fixture.trail_points("Delta"),
            vec![latlon!(52.0, 5.8), latlon!(52.2, 6.0), latlon!(52.3, 6.1)]
        );

        fixture.sighting("11:00", "Delta", "52.1", "5.9");
        assert_ne!(fixture.tracker.trail("Delta"), trail);
        assert_eq!(
            fixture.trail_points("Delta"),
            vec![
                latlon!(52.0, 5.8),
                latlon!(52.1, 5.9),
                latlon!(52.2, 6.0),
                latlon!(52.3, 6.1)
            ]
        );
        assert_eq!(fixture.trails.len(), 1);
        assert_eq!(fixture.surface.read().line_count(), 1);

        let style = fixture
            .trails
            .get(fixture.tracker.trail("Delta").expect("no trail"))
            .map(|t| t.style());
        assert_eq!(style, Some(LineStyle::new(MarkerColor::Green)));
    }

    #[test]
    fn replace_sighting() {
        let mut fixture = Fixture::new();
        let old = fixture
            .sighting("10:00", "Echo", "52.0", "5.8")
            .expect("ignored");
        let new = fixture
            .sighting("10:00", "Echo", "52.05", "5.85")
            .expect("ignored");

        assert_eq!(fixture.registry.state(old), EntityState::Removed);
        assert_eq!(fixture.registry.len(), 1);
        assert_eq!(fixture.emphasized(), vec![new]);
        assert_eq!(fixture.trail_points("Echo"), vec![latlon!(52.05, 5.85)]);
        assert_eq!(fixture.tracker.len(), 1);
    }

    #[test]
    fn delete_sightings() {
        let mut fixture = Fixture::new();
        let first = fixture.sighting("10:00", "Foxtrot", "52.0", "5.8");
        fixture.sighting("11:00", "Foxtrot", "52.1", "5.9");

        fixture.delete("11:00", "Foxtrot");
        assert_eq!(fixture.emphasized(), vec![first.expect("ignored")]);
        assert_eq!(fixture.trail_points("Foxtrot"), vec![latlon!(52.0, 5.8)]);

        fixture.delete("11:00", "Foxtrot");
        fixture.delete("10:00", "Foxtrot");
        assert!(fixture.tracker.is_empty());
        assert!(fixture.registry.is_empty());
        assert!(fixture.tracker.trail("Foxtrot").is_none());
        assert_eq!(fixture.surface.read().line_count(), 0);
        assert_eq!(fixture.tracker.sightings("Foxtrot").count(), 0);
    }

    #[test]
    fn grid_and_invalid_sightings() {
        let mut fixture = Fixture::new();
        let id = fixture
            .sighting("10:00", "Golf", "463000", "155000")
            .expect("ignored");
        assert!(fixture.sighting("11:00", "Golf", "noord", "5.8").is_none());

        let entity = fixture.registry.get(id).expect("entity is missing");
        assert_eq!(entity.area(), None);
        assert_eq!(entity.style().color, MarkerColor::Grey);
        assert_eq!(fixture.tracker.len(), 1);
        assert_eq!(
            fixture
                .tracker
                .entity(&SightingKey::new("zaterdag", "10:00", "Golf")),
            Some(id)
        );
    }
}

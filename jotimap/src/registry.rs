use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use jotimap_types::geo::impls::GeoPoint2d;
use jotimap_types::geo::ProjectionService;
use jotimap_types::Coordinate;
use serde::{Deserialize, Serialize};

use crate::icon::{Area, IconCatalog, Style};
use crate::surface::{MapSurface, MarkerHandle, SharedSurface};

/// Identifier of an entity in a [`MarkerRegistry`]. Identifiers are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(u64);

impl Display for EntityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What an entity on the map represents. Selects the icon glyph; never the color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// Organization point from the dataset.
    #[default]
    Point,
    /// Fox sighting.
    Fox,
    /// Human helper.
    Helper,
}

impl EntityKind {
    /// Name of the kind as used in icon url templates.
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Point => "point",
            EntityKind::Fox => "fox",
            EntityKind::Helper => "helper",
        }
    }
}

/// Lifecycle state of an entity id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityState {
    /// The id was never handed out by this registry.
    Unregistered,
    /// The entity is on the map.
    Active,
    /// The entity was removed. This state is final.
    Removed,
}

/// Logical object shown on the map by exactly one marker.
#[derive(Debug)]
pub struct Entity {
    id: EntityId,
    name: Option<String>,
    position: GeoPoint2d,
    area: Option<Area>,
    kind: EntityKind,
    emphasis: bool,
    style: Style,
    marker: MarkerHandle,
}

impl Entity {
    /// Identifier of the entity.
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Display name, used as the marker tooltip and popup.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Current position.
    pub fn position(&self) -> GeoPoint2d {
        self.position
    }

    /// Area the entity belongs to.
    pub fn area(&self) -> Option<Area> {
        self.area
    }

    /// Kind of the entity.
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Whether the entity is shown as the most recent one.
    pub fn emphasis(&self) -> bool {
        self.emphasis
    }

    /// Style currently applied to the marker.
    pub fn style(&self) -> Style {
        self.style
    }

    /// Handle of the marker showing the entity.
    pub fn marker(&self) -> &MarkerHandle {
        &self.marker
    }
}

/// Set of entities shown on a surface.
///
/// Every entity owns one marker. All state changes go through the registry, which issues the
/// matching surface commands, so the marker always shows the entity's current position and style.
///
/// Operations addressed to unknown or removed entities are ignored: events referring to an
/// entity may race with the user removing it.
pub struct MarkerRegistry<S> {
    surface: SharedSurface<S>,
    catalog: IconCatalog,
    projection: ProjectionService,
    entities: BTreeMap<EntityId, Entity>,
    next_id: u64,
}

impl<S: MapSurface> MarkerRegistry<S> {
    /// Creates an empty registry drawing on the given surface.
    pub fn new(surface: SharedSurface<S>, catalog: IconCatalog) -> Self {
        Self {
            surface,
            catalog,
            projection: ProjectionService::new(),
            entities: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Adds an organization point.
    pub fn add(
        &mut self,
        coord: impl Into<Coordinate>,
        name: Option<&str>,
        area: Option<Area>,
    ) -> EntityId {
        self.add_entity(coord, name, area, EntityKind::Point)
    }

    /// Adds an entity of any kind. The entity starts without emphasis.
    pub fn add_entity(
        &mut self,
        coord: impl Into<Coordinate>,
        name: Option<&str>,
        area: Option<Area>,
        kind: EntityKind,
    ) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;

        let position = coord.into().to_geographic(&self.projection);
        let style = self.catalog.style_for(area, false);
        let icon = self.catalog.icon_for(kind, style);

        let marker = {
            let mut surface = self.surface.write();
            let marker = surface.place_marker(position, name, name);
            surface.set_marker_icon(&marker, &icon);
            marker
        };

        log::debug!("Added {} {id} ({name:?}) at {position:?}", kind.name());
        self.entities.insert(
            id,
            Entity {
                id,
                name: name.map(str::to_string),
                position,
                area,
                kind,
                emphasis: false,
                style,
                marker,
            },
        );

        id
    }

    /// Moves the entity. Does nothing if the entity is not active.
    pub fn update_position(&mut self, id: EntityId, coord: impl Into<Coordinate>) {
        let Some(entity) = self.entities.get_mut(&id) else {
            log::debug!("Ignoring position update of inactive entity {id}");
            return;
        };

        entity.position = coord.into().to_geographic(&self.projection);
        self.surface
            .write()
            .set_marker_position(&entity.marker, entity.position);
    }

    /// Sets the emphasis flag and swaps the marker icon accordingly. Does nothing if the entity
    /// is not active.
    pub fn set_emphasis(&mut self, id: EntityId, emphasis: bool) {
        let Some(entity) = self.entities.get_mut(&id) else {
            log::debug!("Ignoring emphasis change of inactive entity {id}");
            return;
        };

        entity.emphasis = emphasis;
        entity.style = self.catalog.style_for(entity.area, emphasis);
        let icon = self.catalog.icon_for(entity.kind, entity.style);
        self.surface.write().set_marker_icon(&entity.marker, &icon);
    }

    /// Removes the entity and its marker. Removing an entity twice is a no-op.
    pub fn remove(&mut self, id: EntityId) {
        let Some(entity) = self.entities.remove(&id) else {
            return;
        };

        self.surface.write().remove_layer(entity.marker.into());
        log::debug!("Removed entity {id}");
    }

    /// Flies the viewport to the entity. Does nothing if the entity is not active.
    pub fn focus(&self, id: EntityId) {
        if let Some(entity) = self.entities.get(&id) {
            self.surface.write().fly_to(entity.position);
        }
    }

    /// Returns the entity if it is active.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Lifecycle state of the id.
    pub fn state(&self, id: EntityId) -> EntityState {
        if self.entities.contains_key(&id) {
            EntityState::Active
        } else if id.0 < self.next_id {
            EntityState::Removed
        } else {
            EntityState::Unregistered
        }
    }

    /// Iterates over the active entities in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.values()
    }

    /// Number of active entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if there are no active entities.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Icon catalog used to style the markers.
    pub fn catalog(&self) -> &IconCatalog {
        &self.catalog
    }
}

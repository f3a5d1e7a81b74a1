use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::MapConfig;
use crate::dataset::DatasetIngestor;
use crate::error::JotimapError;
use crate::icon::IconCatalog;
use crate::registry::{EntityId, MarkerRegistry};
use crate::surface::{MapSurface, SharedSurface};
use crate::tracker::{HuntTracker, Sighting, SightingKey};
use crate::trail::TrailManager;

/// Flag telling whether the view a session draws on is still alive.
///
/// Clones share the flag, so one clone can be handed to whatever tears the view down while the
/// session checks another one after every suspension point.
#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    /// Returns false once [`dispose`](Self::dispose) was called on any clone.
    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Marks the view as torn down.
    pub fn dispose(&self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Map state bound to one surface.
///
/// The session creates the surface from its [`MapConfig`] and shares it between the
/// [`MarkerRegistry`], the [`TrailManager`] and the [`HuntTracker`].
pub struct MapSession<S> {
    config: MapConfig,
    surface: SharedSurface<S>,
    registry: MarkerRegistry<S>,
    trails: TrailManager<S>,
    tracker: HuntTracker,
    liveness: Liveness,
}

impl<S: MapSurface> MapSession<S> {
    /// Creates the viewport and the base layer.
    pub fn new(config: MapConfig) -> Self {
        let mut surface = S::create_viewport(config.center, config.zoom);
        surface.add_tile_layer(&config.tile_layer);
        let surface = Arc::new(RwLock::new(surface));

        log::info!(
            "Created map session at {:?}, zoom {}",
            config.center,
            config.zoom
        );

        Self {
            registry: MarkerRegistry::new(surface.clone(), IconCatalog::new(config.icons.clone())),
            trails: TrailManager::new(surface.clone()),
            tracker: HuntTracker::new(),
            liveness: Liveness::new(),
            surface,
            config,
        }
    }

    /// Loads the dataset from the configured url and adds a marker per feature.
    pub async fn ingest<I>(&mut self, ingestor: &I) -> Result<Vec<EntityId>, JotimapError>
    where
        I: DatasetIngestor + ?Sized,
    {
        let url = self.config.dataset_url.clone();
        self.ingest_from(ingestor, &url).await
    }

    /// Loads the dataset from `url` and adds a marker per feature.
    ///
    /// Either all features are added or none: on a fetch or decoding error, or if the session
    /// was disposed while the fetch was in flight, the surface is not touched.
    pub async fn ingest_from<I>(
        &mut self,
        ingestor: &I,
        url: &str,
    ) -> Result<Vec<EntityId>, JotimapError>
    where
        I: DatasetIngestor + ?Sized,
    {
        if !self.liveness.is_alive() {
            return Err(JotimapError::Disposed);
        }

        let features = match ingestor.fetch_features(url).await {
            Ok(features) => features,
            Err(err) => {
                log::warn!("Failed to load dataset from {url}: {err}");
                return Err(err);
            }
        };

        if !self.liveness.is_alive() {
            log::debug!(
                "Session disposed while loading {url}, dropping {} features",
                features.len()
            );
            return Err(JotimapError::Disposed);
        }

        let ids = features
            .into_iter()
            .map(|feature| {
                self.registry
                    .add(feature.coord, Some(&feature.name), feature.category)
            })
            .collect::<Vec<_>>();

        log::info!("Added {} dataset points from {url}", ids.len());
        Ok(ids)
    }

    /// Applies an edit of the fox sightings table, see [`HuntTracker::apply`].
    pub fn apply_sighting(
        &mut self,
        key: SightingKey,
        sighting: Option<Sighting>,
    ) -> Option<EntityId> {
        if !self.liveness.is_alive() {
            log::debug!("Ignoring sighting {key} for a disposed session");
            return None;
        }

        self.tracker
            .apply(&mut self.registry, &mut self.trails, key, sighting)
    }

    /// Marks the session as torn down. Pending and later ingestion cycles leave the surface
    /// alone.
    pub fn dispose(&self) {
        self.liveness.dispose();
    }

    /// Liveness flag of the session.
    pub fn liveness(&self) -> Liveness {
        self.liveness.clone()
    }

    /// Configuration the session was created with.
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Surface the session draws on.
    pub fn surface(&self) -> &SharedSurface<S> {
        &self.surface
    }

    /// Entities on the map.
    pub fn registry(&self) -> &MarkerRegistry<S> {
        &self.registry
    }

    /// Entities on the map.
    pub fn registry_mut(&mut self) -> &mut MarkerRegistry<S> {
        &mut self.registry
    }

    /// Trails on the map.
    pub fn trails(&self) -> &TrailManager<S> {
        &self.trails
    }

    /// Trails on the map.
    pub fn trails_mut(&mut self) -> &mut TrailManager<S> {
        &mut self.trails
    }

    /// Fox sightings shown on the map.
    pub fn tracker(&self) -> &HuntTracker {
        &self.tracker
    }
}

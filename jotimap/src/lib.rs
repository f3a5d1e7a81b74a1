//! Jotimap keeps the markers and trails of a fox hunt map in sync with the hunt data.
//!
//! The crate does not draw anything itself. Rendering, tiles and user interaction belong to a
//! [`MapSurface`], a small capability trait implemented by whatever widget hosts the map (a
//! Leaflet binding in the browser, a native renderer, or the in-memory [`RecordingSurface`]).
//! Jotimap issues commands to the surface and keeps the logical state next to it:
//!
//! * [`MarkerRegistry`] tracks every entity on the map (organization points, fox sightings,
//!   helpers) together with the marker that shows it, and makes sure the marker icon always
//!   matches the entity's area and emphasis;
//! * [`TrailManager`] keeps an append-only polyline per tracked fox;
//! * [`IconCatalog`] decides how an entity looks, based on its [`Area`] and whether it is the
//!   most recent one;
//! * [`dataset`] fetches and decodes the remote point dataset;
//! * [`HuntTracker`] turns fox sighting edits into markers, emphasis changes and trails;
//! * [`MapSession`] ties all of the above to a single surface and runs the
//!   fetch-then-render cycle.
//!
//! Coordinates may be given either in the local RD grid or in WGS84 (see
//! [`jotimap_types::Coordinate`]); everything stored by the crate is WGS84.
//!
//! ```no_run
//! use jotimap::{MapConfig, MapSession, RecordingSurface};
//! use jotimap::dataset::{GeoJsonDecoder, UrlDatasetIngestor};
//!
//! # tokio_test::block_on(async {
//! let mut session = MapSession::<RecordingSurface>::new(MapConfig::default());
//! let ingestor = UrlDatasetIngestor::new(GeoJsonDecoder::default()).expect("http client");
//! let added = session.ingest(&ingestor).await.expect("failed to load dataset");
//! println!("{} groups on the map", added.len());
//! # });
//! ```

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

mod color;
mod config;
pub mod dataset;
pub mod error;
pub mod icon;
mod registry;
mod session;
pub mod surface;
mod tracker;
mod trail;

pub use color::Color;
pub use config::{IconConfig, MapConfig, TileLayerConfig};
pub use icon::{Area, IconCatalog, MarkerColor, SizeTier, Style};
pub use registry::{Entity, EntityId, EntityKind, EntityState, MarkerRegistry};
pub use session::{Liveness, MapSession};
pub use surface::{MapSurface, RecordingSurface, SharedSurface};
pub use tracker::{HuntTracker, Sighting, SightingKey};
pub use trail::{Trail, TrailId, TrailManager};

// Reexport jotimap_types
pub use jotimap_types;

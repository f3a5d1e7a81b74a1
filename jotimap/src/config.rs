use jotimap_types::geo::impls::GeoPoint2d;
use jotimap_types::geo::NewGeoPoint;
use serde::{Deserialize, Serialize};

/// Default url template of the base map tiles.
pub const OSM_TILE_URL_TEMPLATE: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
/// Default attribution of the base map tiles.
pub const OSM_ATTRIBUTION: &str = "© OpenStreetMap";
/// Default url of the organization dataset.
pub const DEFAULT_DATASET_URL: &str = "https://jotihunt.nl/api/2.0/subscriptions";
/// Default marker image url template.
pub const DEFAULT_ICON_URL_TEMPLATE: &str =
    "https://raw.githubusercontent.com/pointhi/leaflet-color-markers/master/img/marker-icon-2x-{color}.png";
/// Default marker shadow url.
pub const DEFAULT_SHADOW_URL: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/images/marker-shadow.png";

/// Base map tile layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileLayerConfig {
    /// Tile url with `{z}`, `{x}` and `{y}` placeholders.
    pub url_template: String,
    /// Maximum zoom level the tile server provides.
    pub max_zoom: u8,
    /// Attribution text shown on the map.
    pub attribution: String,
}

impl Default for TileLayerConfig {
    fn default() -> Self {
        Self {
            url_template: OSM_TILE_URL_TEMPLATE.to_string(),
            max_zoom: 19,
            attribution: OSM_ATTRIBUTION.to_string(),
        }
    }
}

/// Marker image urls used by the [`IconCatalog`](crate::IconCatalog).
///
/// Templates may use the `{color}` (see [`MarkerColor::name`](crate::MarkerColor::name)) and
/// `{kind}` (see [`EntityKind::name`](crate::EntityKind::name)) placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconConfig {
    /// Marker image url template.
    pub icon_url_template: String,
    /// Marker shadow url template.
    pub shadow_url: String,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            icon_url_template: DEFAULT_ICON_URL_TEMPLATE.to_string(),
            shadow_url: DEFAULT_SHADOW_URL.to_string(),
        }
    }
}

/// Configuration of a [`MapSession`](crate::MapSession).
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```
/// use jotimap::MapConfig;
///
/// let config: MapConfig = serde_json::from_str(r#"{"zoom": 12}"#).unwrap();
/// assert_eq!(config.zoom, 12);
/// assert_eq!(config.tile_layer.max_zoom, 19);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Initial center of the viewport.
    pub center: GeoPoint2d,
    /// Initial zoom level.
    pub zoom: u8,
    /// Base map layer.
    pub tile_layer: TileLayerConfig,
    /// Url of the organization dataset.
    pub dataset_url: String,
    /// Marker images.
    pub icons: IconConfig,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: GeoPoint2d::latlon(52.0, 5.8),
            zoom: 10,
            tile_layer: TileLayerConfig::default(),
            dataset_url: DEFAULT_DATASET_URL.to_string(),
            icons: IconConfig::default(),
        }
    }
}

impl MapConfig {
    /// Sets the initial viewport.
    pub fn with_view(mut self, center: GeoPoint2d, zoom: u8) -> Self {
        self.center = center;
        self.zoom = zoom;
        self
    }

    /// Sets the base map layer.
    pub fn with_tile_layer(mut self, tile_layer: TileLayerConfig) -> Self {
        self.tile_layer = tile_layer;
        self
    }

    /// Sets the dataset url.
    pub fn with_dataset_url(mut self, url: impl Into<String>) -> Self {
        self.dataset_url = url.into();
        self
    }

    /// Sets the marker images.
    pub fn with_icons(mut self, icons: IconConfig) -> Self {
        self.icons = icons;
        self
    }
}

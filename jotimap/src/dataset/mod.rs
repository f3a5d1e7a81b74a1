//! Loading of the organization point dataset.
//!
//! A [`DatasetIngestor`] produces the list of [`Feature`]s for one fetch cycle. The crate comes
//! with [`UrlDatasetIngestor`], which downloads a document over HTTP and hands it to a
//! [`DatasetDecoder`]. Two decoders are provided: [`GeoJsonDecoder`] for GeoJSON point
//! collections and [`SubscriptionsDecoder`] for the hunt API's subscriptions list.
//!
//! Decoding is all-or-nothing: a single malformed feature fails the whole document, so a fetch
//! cycle either adds every feature or none.

mod geojson;
mod subscriptions;
#[cfg(all(feature = "http", not(target_arch = "wasm32")))]
mod url_ingestor;

pub use geojson::GeoJsonDecoder;
pub use subscriptions::SubscriptionsDecoder;
#[cfg(all(feature = "http", not(target_arch = "wasm32")))]
pub use url_ingestor::UrlDatasetIngestor;

use async_trait::async_trait;
use bytes::Bytes;
use jotimap_types::Coordinate;
use serde::Deserialize;

use crate::error::JotimapError;
use crate::icon::Area;

/// Single point of the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Position of the point.
    pub coord: Coordinate,
    /// Name shown in the marker tooltip.
    pub name: String,
    /// Area the point belongs to, if the label names one.
    pub category: Option<Area>,
}

/// Asynchronous source of dataset features.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait DatasetIngestor {
    /// Loads all features from the given url.
    async fn fetch_features(&self, url: &str) -> Result<Vec<Feature>, JotimapError>;
}

/// Converts a raw dataset document into features.
pub trait DatasetDecoder {
    /// Decodes the document.
    fn decode(&self, bytes: Bytes) -> Result<Vec<Feature>, JotimapError>;
}

/// Numeric value that may be encoded as a JSON number or as a string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    String(String),
}

impl NumberOrString {
    fn value(&self) -> Result<f64, JotimapError> {
        match self {
            NumberOrString::Number(v) => Ok(*v),
            NumberOrString::String(s) => Ok(Coordinate::parse_value(s)?),
        }
    }
}

fn category(label: Option<&str>) -> Option<Area> {
    let label = label?;
    let area = Area::parse(label);
    if area.is_none() {
        log::debug!("Label '{label}' is not an area name");
    }

    area
}

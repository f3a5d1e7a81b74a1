use bytes::Bytes;
use jotimap_types::Coordinate;
use serde::Deserialize;

use crate::dataset::{category, DatasetDecoder, Feature};
use crate::error::JotimapError;

#[derive(Debug, Deserialize)]
struct Subscriptions {
    data: Vec<Group>,
}

#[derive(Debug, Deserialize)]
struct Group {
    name: String,
    lat: String,
    long: String,
    area: Option<String>,
}

/// Decoder of the hunt API's subscriptions list:
///
/// ```json
/// {"data": [{"name": "Scouting Alpha", "lat": "52.0", "long": "5.8", "area": "Alpha"}]}
/// ```
///
/// Coordinates are strings; pairs outside of the degree range are read as local grid points.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubscriptionsDecoder;

impl DatasetDecoder for SubscriptionsDecoder {
    fn decode(&self, bytes: Bytes) -> Result<Vec<Feature>, JotimapError> {
        let subscriptions: Subscriptions = serde_json::from_slice(&bytes)?;
        subscriptions
            .data
            .into_iter()
            .map(|group| -> Result<Feature, JotimapError> {
                Ok(Feature {
                    coord: Coordinate::parse(&group.lat, &group.long)?,
                    category: category(group.area.as_deref()),
                    name: group.name,
                })
            })
            .collect()
    }
}

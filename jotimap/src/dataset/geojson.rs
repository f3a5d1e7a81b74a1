use bytes::Bytes;
use jotimap_types::geo::Crs;
use jotimap_types::Coordinate;
use serde::Deserialize;

use crate::dataset::{category, DatasetDecoder, Feature, NumberOrString};
use crate::error::JotimapError;

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(rename = "type")]
    kind: String,
    features: Vec<GeoJsonFeature>,
}

#[derive(Debug, Deserialize)]
struct GeoJsonFeature {
    geometry: Option<Geometry>,
    #[serde(default)]
    properties: Properties,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    Point {
        coordinates: Vec<NumberOrString>,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Default, Deserialize)]
struct Properties {
    name: Option<String>,
    area: Option<String>,
}

/// Decoder of a GeoJSON `FeatureCollection` of points.
///
/// The feature name is taken from `properties.name` and the category from `properties.area`.
/// Coordinate values may be JSON numbers or numeric strings, read the same way as the hunt API
/// subscriptions (see [`Coordinate::parse`]). Features without a geometry or with a geometry
/// other than `Point` are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoJsonDecoder {
    crs: Crs,
}

impl GeoJsonDecoder {
    /// Creates a decoder for coordinates in the given reference system.
    pub fn new(crs: Crs) -> Self {
        Self { crs }
    }

    /// Reference system of the decoded coordinates.
    pub fn crs(&self) -> Crs {
        self.crs
    }

    fn convert(
        &self,
        index: usize,
        feature: GeoJsonFeature,
    ) -> Result<Option<Feature>, JotimapError> {
        let coordinates = match feature.geometry {
            Some(Geometry::Point { coordinates }) => coordinates,
            Some(Geometry::Other) => {
                log::debug!("Skipping feature {index}: not a point");
                return Ok(None);
            }
            None => {
                log::debug!("Skipping feature {index}: no geometry");
                return Ok(None);
            }
        };

        let [first, second, ..] = coordinates.as_slice() else {
            return Err(JotimapError::Decoding(format!(
                "feature {index} has {} coordinates, expected at least 2",
                coordinates.len()
            )));
        };

        let Some(name) = feature.properties.name else {
            return Err(JotimapError::Decoding(format!(
                "feature {index} has no name"
            )));
        };

        Ok(Some(Feature {
            coord: Coordinate::from_pair(self.crs, first.value()?, second.value()?),
            name,
            category: category(feature.properties.area.as_deref()),
        }))
    }
}

impl DatasetDecoder for GeoJsonDecoder {
    fn decode(&self, bytes: Bytes) -> Result<Vec<Feature>, JotimapError> {
        let collection: FeatureCollection = serde_json::from_slice(&bytes)?;
        if collection.kind != "FeatureCollection" {
            return Err(JotimapError::Decoding(format!(
                "expected a FeatureCollection, got {}",
                collection.kind
            )));
        }

        let mut features = Vec::with_capacity(collection.features.len());
        for (index, feature) in collection.features.into_iter().enumerate() {
            if let Some(feature) = self.convert(index, feature)? {
                features.push(feature);
            }
        }

        Ok(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::SubscriptionsDecoder;
    use crate::icon::Area;
    use assert_matches::assert_matches;

    fn decode(decoder: GeoJsonDecoder, json: &'static str) -> Result<Vec<Feature>, JotimapError> {
        decoder.decode(Bytes::from_static(json.as_bytes()))
    }

    #[test]
    fn string_coordinates() {
        let features = decode(
            GeoJsonDecoder::default(),
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {
                        "type": "Feature",
                        "geometry": {"type": "Point", "coordinates": ["5.8", "52.0"]},
                        "properties": {"name": "Scouting Alpha", "area": "Alpha"}
                    },
                    {
                        "type": "Feature",
                        "geometry": {"type": "Point", "coordinates": [5.9, 52.1]},
                        "properties": {"name": "Groep zonder gebied", "area": null}
                    }
                ]
            }"#,
        )
        .expect("failed to decode");

        assert_eq!(
            features,
            vec![
                Feature {
                    coord: Coordinate::latlon(52.0, 5.8),
                    name: "Scouting Alpha".to_string(),
                    category: Some(Area::Alpha),
                },
                Feature {
                    coord: Coordinate::latlon(52.1, 5.9),
                    name: "Groep zonder gebied".to_string(),
                    category: None,
                },
            ]
        );
    }

    #[test]
    fn same_groups_as_subscriptions() {
        let geojson = decode(
            GeoJsonDecoder::default(),
            r#"{"type": "FeatureCollection", "features": [
                {
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": ["6,1", "51,9"]},
                    "properties": {"name": "Scouting Echo", "area": "Echo"}
                },
                {
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": ["155000", "463000"]},
                    "properties": {"name": "Grid group", "area": null}
                }
            ]}"#,
        )
        .expect("failed to decode geojson");

        let subscriptions = SubscriptionsDecoder
            .decode(Bytes::from_static(
                br#"{"data": [
                    {"name": "Scouting Echo", "lat": "51,9", "long": "6,1", "area": "Echo"},
                    {"name": "Grid group", "lat": "463000", "long": "155000", "area": null}
                ]}"#,
            ))
            .expect("failed to decode subscriptions");

        assert_eq!(geojson, subscriptions);
        assert_eq!(geojson[0].coord, Coordinate::latlon(51.9, 6.1));
        assert_eq!(geojson[1].coord, Coordinate::local(155_000.0, 463_000.0));
    }

    #[test]
    fn local_crs() {
        let features = decode(
            GeoJsonDecoder::new(Crs::RdNew),
            r#"{"type": "FeatureCollection", "features": [{
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [155000, 463000]},
                "properties": {"name": "Amersfoort", "area": "delta"}
            }]}"#,
        )
        .expect("failed to decode");

        assert_eq!(features[0].coord, Coordinate::local(155_000.0, 463_000.0));
        assert_eq!(features[0].category, Some(Area::Delta));
    }

    #[test]
    fn skips_non_points() {
        let features = decode(
            GeoJsonDecoder::default(),
            r#"{"type": "FeatureCollection", "features": [
                {
                    "type": "Feature",
                    "geometry": null,
                    "properties": {"name": "Nowhere"}
                },
                {
                    "type": "Feature",
                    "geometry": {"type": "LineString", "coordinates": [[5.0, 52.0], [5.1, 52.1]]},
                    "properties": {"name": "Route"}
                },
                {
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [5.0, 52.0]},
                    "properties": {"name": "Kept", "area": "Golf"}
                }
            ]}"#,
        )
        .expect("failed to decode");

        assert_eq!(features.len(), 1);
        assert_eq!(features[0].name, "Kept");
        assert_eq!(features[0].category, None);
    }

    #[test]
    fn malformed_point_fails_whole_collection() {
        let result = decode(
            GeoJsonDecoder::default(),
            r#"{"type": "FeatureCollection", "features": [
                {
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [5.0, 52.0]},
                    "properties": {"name": "Good"}
                },
                {
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": ["five", "52"]},
                    "properties": {"name": "Bad"}
                }
            ]}"#,
        );
        assert_matches!(result, Err(JotimapError::Coordinate(_)));

        let result = decode(
            GeoJsonDecoder::default(),
            r#"{"type": "FeatureCollection", "features": [
                {
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [5.0]},
                    "properties": {"name": "Short"}
                }
            ]}"#,
        );
        assert_matches!(result, Err(JotimapError::Decoding(_)));
    }

    #[test]
    fn invalid_documents() {
        assert_matches!(
            decode(GeoJsonDecoder::default(), "not json"),
            Err(JotimapError::Json(_))
        );
        assert_matches!(
            decode(
                GeoJsonDecoder::default(),
                r#"{"type": "GeometryCollection", "features": []}"#
            ),
            Err(JotimapError::Decoding(_))
        );
    }
}

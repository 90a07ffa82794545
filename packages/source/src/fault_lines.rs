//! Static `GeoJSON` fault map fetcher.
//!
//! Downloads a `FeatureCollection` of fault traces from a fixed URL and
//! flattens every line-like geometry into coordinate sequences.

use std::time::Duration;

use async_trait::async_trait;
use geojson::{Feature, GeoJson};
use quake_map_event_models::{Coordinate, FaultFeature};

use crate::{FaultSource, SourceError, http};

/// Default tectonic map of Myanmar (2011).
pub const DEFAULT_FAULT_URL: &str = "https://raw.githubusercontent.com/drtinkooo/myanmar-earthquake-archive/main/Myanmar_Tectonic_Map_2011.geojson";

/// Fault source backed by a direct `GeoJSON` URL.
pub struct GeoJsonFaultSource {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl GeoJsonFaultSource {
    /// Creates a source downloading `url` with `client`.
    #[must_use]
    pub fn new(client: reqwest::Client, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            url: url.into(),
            timeout,
        }
    }
}

#[async_trait]
impl FaultSource for GeoJsonFaultSource {
    fn id(&self) -> &str {
        "geojson_faults"
    }

    async fn fetch_faults(&self) -> Result<Vec<FaultFeature>, SourceError> {
        log::info!("Requesting fault geometry from {}", self.url);
        let body = http::send_text(self.client.get(&self.url), self.timeout).await?;
        let faults = parse_fault_collection(&body)?;
        log::info!("Received {} fault feature(s)", faults.len());
        Ok(faults)
    }
}

/// Parses a fault map `FeatureCollection`.
///
/// Line strings, polygons, their multi-part forms, and geometry
/// collections are flattened into coordinate sequences. Features with no
/// line geometry (points, null geometry) are skipped.
///
/// # Errors
///
/// Returns [`SourceError::Parse`] if `text` is not a `GeoJSON`
/// `FeatureCollection`.
pub fn parse_fault_collection(text: &str) -> Result<Vec<FaultFeature>, SourceError> {
    let geojson: GeoJson = text.parse().map_err(|e| SourceError::Parse {
        message: format!("Failed to parse fault GeoJSON: {e}"),
    })?;

    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(SourceError::Parse {
            message: "Fault document is not a FeatureCollection".to_string(),
        });
    };

    Ok(collection
        .features
        .into_iter()
        .filter_map(parse_fault_feature)
        .collect())
}

fn parse_fault_feature(feature: Feature) -> Option<FaultFeature> {
    let name = ["Name", "name"]
        .iter()
        .find_map(|key| feature.property(key).and_then(serde_json::Value::as_str))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from);

    let geometry: geo::Geometry<f64> = feature.geometry?.try_into().ok()?;

    let mut lines = Vec::new();
    collect_lines(&geometry, &mut lines);
    lines.retain(|line| !line.is_empty());
    if lines.is_empty() {
        return None;
    }

    Some(FaultFeature { name, lines })
}

fn collect_lines(geometry: &geo::Geometry<f64>, lines: &mut Vec<Vec<Coordinate>>) {
    match geometry {
        geo::Geometry::LineString(line) => lines.push(to_coordinates(line)),
        geo::Geometry::MultiLineString(multi) => {
            lines.extend(multi.0.iter().map(to_coordinates));
        }
        geo::Geometry::Polygon(polygon) => push_rings(polygon, lines),
        geo::Geometry::MultiPolygon(multi) => {
            for polygon in &multi.0 {
                push_rings(polygon, lines);
            }
        }
        geo::Geometry::GeometryCollection(collection) => {
            for inner in &collection.0 {
                collect_lines(inner, lines);
            }
        }
        _ => {}
    }
}

fn push_rings(polygon: &geo::Polygon<f64>, lines: &mut Vec<Vec<Coordinate>>) {
    lines.push(to_coordinates(polygon.exterior()));
    lines.extend(polygon.interiors().iter().map(to_coordinates));
}

fn to_coordinates(line: &geo::LineString<f64>) -> Vec<Coordinate> {
    line.coords()
        .map(|c| Coordinate {
            longitude: c.x,
            latitude: c.y,
        })
        .collect()
}

//! Parsing of event-feed `GeoJSON` into [`SeismicEvent`] values.
//!
//! Each feature is expected to carry a point geometry of
//! `[longitude, latitude, depth_km]` and `mag`, `time`, and `place`
//! properties. Features missing any required value are skipped and
//! counted rather than failing the whole batch.

use chrono::DateTime;
use geojson::{Feature, GeoJson, feature::Id};
use quake_map_event_models::SeismicEvent;

use crate::SourceError;

/// Result of parsing one feed response.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedEvents {
    /// Usable events in feed order.
    pub events: Vec<SeismicEvent>,
    /// Number of features dropped for missing magnitude, depth, time, or
    /// position.
    pub skipped: usize,
}

/// Parses a `GeoJSON` `FeatureCollection` of events.
///
/// # Errors
///
/// Returns [`SourceError::Parse`] if `text` is not valid `GeoJSON` or is not
/// a `FeatureCollection`.
pub fn parse_event_collection(text: &str) -> Result<ParsedEvents, SourceError> {
    let geojson: GeoJson = text.parse().map_err(|e| SourceError::Parse {
        message: format!("Failed to parse event GeoJSON: {e}"),
    })?;

    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(SourceError::Parse {
            message: "Event response is not a FeatureCollection".to_string(),
        });
    };

    let total = collection.features.len();
    let events: Vec<SeismicEvent> = collection
        .features
        .iter()
        .filter_map(parse_event_feature)
        .collect();

    Ok(ParsedEvents {
        skipped: total - events.len(),
        events,
    })
}

/// Converts one feature, returning `None` if a required value is missing.
fn parse_event_feature(feature: &Feature) -> Option<SeismicEvent> {
    let geojson::Value::Point(position) = &feature.geometry.as_ref()?.value else {
        return None;
    };

    let [longitude, latitude, depth_km] = position.get(..3)? else {
        return None;
    };

    let magnitude = get_f64(feature, "mag")?;
    let timestamp_ms = get_millis(feature, "time")?;
    let place = feature
        .property("place")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default()
        .to_string();

    Some(SeismicEvent {
        id: feature.id.as_ref().map(id_string),
        timestamp_ms,
        magnitude,
        depth_km: *depth_km,
        longitude: *longitude,
        latitude: *latitude,
        place,
    })
}

fn get_f64(feature: &Feature, key: &str) -> Option<f64> {
    feature.property(key).and_then(serde_json::Value::as_f64)
}

/// Epoch milliseconds that map to a calendar date.
#[allow(clippy::cast_possible_truncation)]
fn get_millis(feature: &Feature, key: &str) -> Option<i64> {
    let value = feature.property(key)?;
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|v| v.is_finite()).map(|v| v as i64))
        .filter(|&ms| DateTime::from_timestamp_millis(ms).is_some())
}

fn id_string(id: &Id) -> String {
    match id {
        Id::String(s) => s.clone(),
        Id::Number(n) => n.to_string(),
    }
}

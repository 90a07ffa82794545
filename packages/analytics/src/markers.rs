//! Map marker projection.

use quake_map_analytics_models::MapMarker;
use quake_map_classifier::{color_for, radius_for};
use quake_map_event_models::SeismicEvent;

use crate::utc_date_key;

/// One circle marker per event, sized and colored by magnitude.
#[must_use]
pub fn project_markers(events: &[SeismicEvent]) -> Vec<MapMarker> {
    events
        .iter()
        .map(|event| MapMarker {
            latitude: event.latitude,
            longitude: event.longitude,
            radius: radius_for(event.magnitude),
            color: color_for(event.magnitude),
            popup: popup_text(event),
        })
        .collect()
}

/// Marker popup: magnitude, place, depth, and UTC date on separate lines.
#[must_use]
pub fn popup_text(event: &SeismicEvent) -> String {
    format!(
        "M {}\n{}\nDepth: {} km\n{}",
        event.magnitude,
        event.place,
        event.depth_km,
        utc_date_key(event).unwrap_or_default(),
    )
}

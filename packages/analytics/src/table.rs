//! Major-events table projection.
//!
//! The table shows the first significant events in input order. The event
//! feed is requested with `orderby=time`, so input order is already
//! newest-first; nothing here re-sorts.

use quake_map_analytics_models::{MapFocus, TableRow};
use quake_map_classifier::color_for;
use quake_map_event_models::SeismicEvent;

use crate::utc_date_key;

/// Smallest magnitude shown in the table.
pub const TABLE_MIN_MAGNITUDE: f64 = 4.5;

/// Maximum number of table rows.
pub const TABLE_MAX_ROWS: usize = 50;

/// Zoom level used when recentering the map on a selected row.
pub const FOCUS_ZOOM: u8 = 9;

/// Filters to magnitude >= [`TABLE_MIN_MAGNITUDE`], keeps input order, and
/// truncates to [`TABLE_MAX_ROWS`].
#[must_use]
pub fn project_table(events: &[SeismicEvent]) -> Vec<TableRow> {
    events
        .iter()
        .filter(|e| e.magnitude >= TABLE_MIN_MAGNITUDE)
        .take(TABLE_MAX_ROWS)
        .map(to_row)
        .collect()
}

fn to_row(event: &SeismicEvent) -> TableRow {
    TableRow {
        date: utc_date_key(event).unwrap_or_default(),
        magnitude: event.magnitude,
        color: color_for(event.magnitude),
        depth_km: event.depth_km,
        place: event.place.clone(),
        focus: MapFocus {
            latitude: event.latitude,
            longitude: event.longitude,
            zoom: FOCUS_ZOOM,
        },
    }
}

#[cfg(test)]
mod tests {
    use quake_map_classifier::MagnitudeColor;

    use super::*;
    use crate::test_support::{BASE_MS, event};

    #[test]
    fn keeps_only_significant_events() {
        let events = vec![
            event(4.49, 10.0, BASE_MS),
            event(4.5, 10.0, BASE_MS),
            event(3.2, 10.0, BASE_MS),
            event(6.3, 10.0, BASE_MS),
        ];
        let rows = project_table(&events);
        let mags: Vec<f64> = rows.iter().map(|r| r.magnitude).collect();
        assert_eq!(mags, [4.5, 6.3]);
    }

    #[test]
    fn truncates_to_fifty_rows_in_input_order() {
        let events: Vec<_> = (0..120)
            .map(|i| event(4.5 + f64::from(i % 3), 10.0, BASE_MS - i64::from(i) * 60_000))
            .collect();
        let rows = project_table(&events);
        assert_eq!(rows.len(), TABLE_MAX_ROWS);
        assert!(rows.iter().all(|r| r.magnitude >= TABLE_MIN_MAGNITUDE));
        assert!((rows[0].magnitude - 4.5).abs() < f64::EPSILON);
        assert!((rows[1].magnitude - 5.5).abs() < f64::EPSILON);
        assert!((rows[2].magnitude - 6.5).abs() < f64::EPSILON);
    }

    #[test]
    fn does_not_resort_unordered_input() {
        let events = vec![
            event(5.0, 10.0, BASE_MS - 86_400_000),
            event(5.1, 10.0, BASE_MS),
        ];
        let rows = project_table(&events);
        assert_eq!(rows[0].date, "2025-03-27");
        assert_eq!(rows[1].date, "2025-03-28");
    }

    #[test]
    fn row_carries_color_and_focus() {
        let mut quake = event(7.7, 10.0, BASE_MS);
        quake.latitude = 22.013;
        quake.longitude = 95.922;
        quake.place = "16 km NNW of Sagaing, Myanmar".to_string();

        let rows = project_table(&[quake]);
        let row = &rows[0];
        assert_eq!(row.color, MagnitudeColor::Strong);
        assert_eq!(row.place, "16 km NNW of Sagaing, Myanmar");
        assert_eq!(row.date, "2025-03-28");
        assert_eq!(
            row.focus,
            MapFocus {
                latitude: 22.013,
                longitude: 95.922,
                zoom: FOCUS_ZOOM,
            }
        );
    }

    #[test]
    fn empty_input_gives_empty_table() {
        assert!(project_table(&[]).is_empty());
    }
}

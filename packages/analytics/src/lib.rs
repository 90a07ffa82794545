#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregation and projection of seismic events into dashboard views.
//!
//! Every function here is pure: the same event slice always produces the
//! same output, and nothing touches rendering or network state. The
//! orchestrator calls [`derive_view`] once per refresh after the event
//! fetch resolves.

pub mod faults;
pub mod histogram;
pub mod markers;
pub mod stats;
pub mod table;

use chrono::{DateTime, Utc};
use quake_map_analytics_models::DerivedView;
use quake_map_event_models::SeismicEvent;

/// Builds the complete [`DerivedView`] for an event list.
///
/// An empty slice yields [`DerivedView::no_data`].
#[must_use]
pub fn derive_view(events: &[SeismicEvent]) -> DerivedView {
    let view = DerivedView {
        stats: stats::summarize(events),
        markers: markers::project_markers(events),
        table_rows: table::project_table(events),
        daily_counts: histogram::daily_counts(events),
        magnitude_distribution: histogram::magnitude_distribution(events),
    };

    log::debug!(
        "Derived view: {} events, {} table rows, {} days",
        view.stats.count,
        view.table_rows.len(),
        view.daily_counts.len(),
    );

    view
}

/// UTC calendar date of an event as `YYYY-MM-DD`.
///
/// Returns `None` for timestamps outside the representable range.
#[must_use]
pub fn utc_date_key(event: &SeismicEvent) -> Option<String> {
    event.occurred_at().map(format_date)
}

fn format_date(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}


#[cfg(test)]
mod tests {
    use super::test_support::{BASE_MS, DAY_MS, event};
    use super::*;

    #[test]
    fn derives_reference_view() {
        let events: Vec<SeismicEvent> = [3.0, 4.9, 5.5, 6.8, 7.2]
            .iter()
            .map(|&m| event(m, 10.0, BASE_MS))
            .collect();

        let view = derive_view(&events);

        assert_eq!(view.stats.count, 5);
        assert_eq!(view.stats.max_magnitude, Some(7.2));
        assert_eq!(view.stats.strong_count, 3);
        assert_eq!(view.stats.avg_depth_km, Some(10.0));
        assert_eq!(view.magnitude_distribution.counts, [1, 1, 1, 2]);
        assert_eq!(view.markers.len(), 5);
        assert_eq!(view.table_rows.len(), 4);
        assert_eq!(view.daily_counts.len(), 1);
    }

    #[test]
    fn empty_input_yields_no_data_view() {
        assert_eq!(derive_view(&[]), DerivedView::no_data());
    }

    #[test]
    fn derivation_is_idempotent() {
        let events = vec![
            event(4.6, 12.0, BASE_MS),
            event(2.7, 35.0, BASE_MS + DAY_MS),
            event(5.1, 8.0, BASE_MS + 3 * DAY_MS),
        ];
        assert_eq!(derive_view(&events), derive_view(&events));
    }

    #[test]
    fn date_key_uses_utc() {
        // 2025-03-28T23:30:00Z is already the 29th in Myanmar (UTC+6:30).
        let late = event(4.0, 10.0, 1_743_204_600_000);
        assert_eq!(utc_date_key(&late).as_deref(), Some("2025-03-28"));
    }
}

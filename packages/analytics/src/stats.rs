//! Stat card aggregation.

use quake_map_analytics_models::SummaryStats;
use quake_map_event_models::SeismicEvent;

/// Magnitude at or above which an event counts as strong.
pub const STRONG_MAGNITUDE: f64 = 5.0;

/// Computes count, maximum magnitude, strong-event count, and mean depth.
///
/// Maximum and mean are `None` for an empty slice rather than a sentinel
/// or a division by zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn summarize(events: &[SeismicEvent]) -> SummaryStats {
    if events.is_empty() {
        return SummaryStats::default();
    }

    let count = events.len() as u64;

    let max_magnitude = events
        .iter()
        .map(|e| e.magnitude)
        .filter(|m| !m.is_nan())
        .reduce(f64::max);

    let strong_count = events
        .iter()
        .filter(|e| e.magnitude >= STRONG_MAGNITUDE)
        .count() as u64;

    let total_depth: f64 = events.iter().map(|e| e.depth_km).sum();

    SummaryStats {
        count,
        max_magnitude,
        strong_count,
        avg_depth_km: Some(total_depth / events.len() as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{BASE_MS, event};

    #[test]
    fn empty_events_have_no_max_or_average() {
        let stats = summarize(&[]);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.strong_count, 0);
        assert!(stats.max_magnitude.is_none());
        assert!(stats.avg_depth_km.is_none());
    }

    #[test]
    fn strong_threshold_is_inclusive() {
        let events = vec![
            event(4.99, 10.0, BASE_MS),
            event(5.0, 10.0, BASE_MS),
            event(6.1, 10.0, BASE_MS),
        ];
        assert_eq!(summarize(&events).strong_count, 2);
    }

    #[test]
    fn strong_count_never_exceeds_count() {
        let events: Vec<_> = (0..40)
            .map(|i| event(2.5 + f64::from(i) * 0.15, 10.0, BASE_MS))
            .collect();
        let stats = summarize(&events);
        assert!(stats.strong_count <= stats.count);
        assert_eq!(stats.count, 40);
    }

    #[test]
    fn average_depth_includes_negative_depths() {
        let events = vec![
            event(3.1, -2.0, BASE_MS),
            event(3.4, 14.0, BASE_MS),
            event(4.0, 30.0, BASE_MS),
        ];
        let stats = summarize(&events);
        let avg = stats.avg_depth_km.unwrap();
        assert!((avg - 14.0).abs() < 1e-9);
    }

    #[test]
    fn max_magnitude_is_largest_value() {
        let events = vec![
            event(2.8, 10.0, BASE_MS),
            event(7.7, 10.0, BASE_MS),
            event(5.5, 10.0, BASE_MS),
        ];
        assert_eq!(summarize(&events).max_magnitude, Some(7.7));
    }

    #[test]
    fn nan_magnitudes_are_ignored_by_max() {
        let events = vec![event(f64::NAN, 10.0, BASE_MS), event(4.2, 10.0, BASE_MS)];
        assert_eq!(summarize(&events).max_magnitude, Some(4.2));

        let only_nan = vec![event(f64::NAN, 10.0, BASE_MS)];
        let stats = summarize(&only_nan);
        assert_eq!(stats.count, 1);
        assert!(stats.max_magnitude.is_none());
    }
}

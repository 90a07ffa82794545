//! Chart series: daily event counts and the magnitude distribution.

use std::collections::BTreeMap;

use quake_map_analytics_models::{DailyCount, MagnitudeDistribution};
use quake_map_classifier::MagnitudeBucket;
use quake_map_event_models::SeismicEvent;

use crate::utc_date_key;

/// Counts events per UTC calendar day.
///
/// Returns one entry per distinct date present, sorted ascending by the
/// `YYYY-MM-DD` key. Days with no events are not filled in.
#[must_use]
pub fn daily_counts(events: &[SeismicEvent]) -> Vec<DailyCount> {
    let mut by_date: BTreeMap<String, u64> = BTreeMap::new();

    for event in events {
        let Some(date) = utc_date_key(event) else {
            log::debug!(
                "Skipping event with unrepresentable timestamp {} in daily counts",
                event.timestamp_ms
            );
            continue;
        };
        *by_date.entry(date).or_default() += 1;
    }

    by_date
        .into_iter()
        .map(|(date, count)| DailyCount { date, count })
        .collect()
}

/// Sorts every event into exactly one of the four magnitude buckets.
#[must_use]
pub fn magnitude_distribution(events: &[SeismicEvent]) -> MagnitudeDistribution {
    let mut distribution = MagnitudeDistribution::default();

    for event in events {
        distribution.counts[MagnitudeBucket::for_magnitude(event.magnitude).index()] += 1;
    }

    distribution
}

//! Plain-text rendering of dashboard pieces.

use quake_map_analytics_models::{
    DailyCount, FaultOverlay, MagnitudeDistribution, MapMarker, SummaryStats, TableRow,
};
use quake_map_classifier::MagnitudeColor;

/// Width of the longest distribution bar.
const BAR_WIDTH: u64 = 40;

/// Placeholder for an absent stat value.
const NO_DATA: &str = "-";

/// Stat cards as `label: value` lines.
#[must_use]
pub fn stats_lines(stats: &SummaryStats) -> Vec<String> {
    let max = stats
        .max_magnitude
        .map_or_else(|| NO_DATA.to_string(), |m| format!("M {m:.1}"));
    let depth = stats
        .avg_depth_km
        .map_or_else(|| NO_DATA.to_string(), |d| format!("{d:.1} km"));

    vec![
        format!("Total events:    {}", stats.count),
        format!("Max magnitude:   {max}"),
        format!("M5.0+ events:    {}", stats.strong_count),
        format!("Average depth:   {depth}"),
    ]
}

/// Marker counts per color tier.
#[must_use]
pub fn marker_lines(markers: &[MapMarker]) -> Vec<String> {
    let mut lines = vec![format!("Map markers: {}", markers.len())];
    for tier in [
        MagnitudeColor::Strong,
        MagnitudeColor::Moderate,
        MagnitudeColor::Minor,
    ] {
        let count = markers.iter().filter(|m| m.color == tier).count();
        if count > 0 {
            lines.push(format!("  {:<9} {count:>5}  ({})", tier.as_ref(), tier.hex()));
        }
    }
    lines
}

/// The major-events table.
#[must_use]
pub fn table_lines(rows: &[TableRow]) -> Vec<String> {
    if rows.is_empty() {
        return vec!["No M4.5+ events".to_string()];
    }

    let mut lines = vec![
        format!("{:<10}  {:>5}  {:>8}  PLACE", "DATE", "MAG", "DEPTH"),
        "-".repeat(60),
    ];
    lines.extend(rows.iter().map(|row| {
        format!(
            "{:<10}  {:>5.1}  {:>5.1} km  {}",
            row.date, row.magnitude, row.depth_km, row.place
        )
    }));
    lines
}

/// Timeline summary: span, active days, and the busiest day.
#[must_use]
pub fn timeline_lines(daily: &[DailyCount]) -> Vec<String> {
    let (Some(first), Some(last)) = (daily.first(), daily.last()) else {
        return vec!["Timeline: no events".to_string()];
    };

    let mut lines = vec![format!(
        "Timeline: {} to {}, {} day(s) with events",
        first.date,
        last.date,
        daily.len()
    )];

    if let Some(busiest) = daily.iter().max_by(|a, b| {
        a.count
            .cmp(&b.count)
            .then_with(|| b.date.cmp(&a.date))
    }) {
        lines.push(format!(
            "  Busiest day: {} ({} events)",
            busiest.date, busiest.count
        ));
    }
    lines
}

/// Horizontal bar chart of the magnitude distribution.
#[must_use]
pub fn distribution_lines(distribution: &MagnitudeDistribution) -> Vec<String> {
    let slices = distribution.slices();
    let peak = slices.iter().map(|s| s.count).max().unwrap_or(0);

    slices
        .iter()
        .map(|slice| {
            let width = if peak == 0 {
                0
            } else {
                (slice.count * BAR_WIDTH).div_ceil(peak)
            };
            let bar = "#".repeat(usize::try_from(width).unwrap_or(0));
            format!("{:<7} {:>5}  {bar}", slice.label, slice.count)
        })
        .collect()
}

/// Fault overlay names.
#[must_use]
pub fn fault_lines(faults: &[FaultOverlay]) -> Vec<String> {
    let mut lines = vec![format!("Fault overlays: {}", faults.len())];
    lines.extend(faults.iter().map(|f| format!("  {}", f.popup)));
    lines
}

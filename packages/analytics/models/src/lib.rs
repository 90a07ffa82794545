#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Derived dashboard view types.
//!
//! A [`DerivedView`] is rebuilt from scratch from the current event list
//! on every refresh and handed to the renderer as a whole. None of these
//! types hold references to rendering state; a table row carries the map
//! position it should recenter on instead of a callback.

use quake_map_classifier::{MagnitudeBucket, MagnitudeColor};
use quake_map_event_models::Coordinate;
use serde::{Deserialize, Serialize};

/// Headline numbers for the stat cards.
///
/// `max_magnitude` and `avg_depth_km` are `None` when there are no events,
/// which renderers show as a blank "no data" value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    /// Total number of events.
    pub count: u64,
    /// Largest magnitude observed.
    pub max_magnitude: Option<f64>,
    /// Number of events at or above the strong-event threshold.
    pub strong_count: u64,
    /// Mean hypocenter depth in kilometers.
    pub avg_depth_km: Option<f64>,
}

impl SummaryStats {
    /// Whether these stats describe an empty event list.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Event count for one UTC calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCount {
    /// Date key in `YYYY-MM-DD` form.
    pub date: String,
    /// Number of events on that day.
    pub count: u64,
}

/// Four-bucket magnitude histogram.
///
/// Indexed by [`MagnitudeBucket::index`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MagnitudeDistribution {
    /// Per-bucket counts in [`MagnitudeBucket::all`] order.
    pub counts: [u64; MagnitudeBucket::COUNT],
}

impl MagnitudeDistribution {
    /// Count for a single bucket.
    #[must_use]
    pub const fn count(&self, bucket: MagnitudeBucket) -> u64 {
        self.counts[bucket.index()]
    }

    /// Sum of all bucket counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Chart segments with their labels and colors.
    #[must_use]
    pub fn slices(&self) -> Vec<DistributionSlice> {
        MagnitudeBucket::all()
            .iter()
            .map(|&bucket| DistributionSlice {
                bucket,
                label: bucket.label().to_string(),
                color: bucket.hex().to_string(),
                count: self.count(bucket),
            })
            .collect()
    }
}

/// A single labelled segment of the magnitude distribution chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionSlice {
    /// Which bucket this is.
    pub bucket: MagnitudeBucket,
    /// Legend label (e.g. `"M 5-6"`).
    pub label: String,
    /// Segment color.
    pub color: String,
    /// Number of events in the bucket.
    pub count: u64,
}

/// Where the map should move when a table row is selected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapFocus {
    /// Target latitude.
    pub latitude: f64,
    /// Target longitude.
    pub longitude: f64,
    /// Target zoom level.
    pub zoom: u8,
}

/// One row of the major-events table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    /// Origin date as `YYYY-MM-DD` (UTC).
    pub date: String,
    /// Magnitude as reported.
    pub magnitude: f64,
    /// Color tier of the magnitude cell.
    pub color: MagnitudeColor,
    /// Depth in kilometers.
    pub depth_km: f64,
    /// Location description.
    pub place: String,
    /// Recenter target for row selection.
    pub focus: MapFocus,
}

/// Stroke and fill settings shared by every event marker.
pub struct MarkerStyle;

impl MarkerStyle {
    /// Outline color.
    pub const STROKE_COLOR: &'static str = "#fff";
    /// Outline width in pixels.
    pub const STROKE_WEIGHT: f64 = 0.5;
    /// Outline opacity.
    pub const STROKE_OPACITY: f64 = 1.0;
    /// Fill opacity.
    pub const FILL_OPACITY: f64 = 0.7;
}

/// A circle marker for one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapMarker {
    /// Marker latitude.
    pub latitude: f64,
    /// Marker longitude.
    pub longitude: f64,
    /// Circle radius in pixels.
    pub radius: f64,
    /// Fill color tier.
    pub color: MagnitudeColor,
    /// Popup text, one field per line.
    pub popup: String,
}

/// Line style for the fault overlay.
pub struct FaultStyle;

impl FaultStyle {
    /// Line color.
    pub const COLOR: &'static str = "#f59e0b";
    /// Line width in pixels.
    pub const WEIGHT: f64 = 2.0;
    /// Line opacity.
    pub const OPACITY: f64 = 0.6;
}

/// Dark CARTO raster basemap under both layers.
pub struct Basemap;

impl Basemap {
    /// Leaflet-style tile URL template.
    pub const TILE_URL: &'static str =
        "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png";
    /// Attribution shown in the map corner.
    pub const ATTRIBUTION: &'static str = "&copy; OpenStreetMap & CARTO";
}

/// Headings of the two charts.
pub struct ChartTitles;

impl ChartTitles {
    /// Daily-count timeline.
    pub const DAILY: &'static str = "Daily Seismicity Trend";
    /// Magnitude distribution.
    pub const MAGNITUDE: &'static str = "Magnitude Distribution";
}

/// A fault trace ready for the map overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaultOverlay {
    /// Display name (`"Unknown"` when the source has none).
    pub name: String,
    /// Coordinate sequences to draw.
    pub lines: Vec<Vec<Coordinate>>,
    /// Popup text.
    pub popup: String,
}

/// Everything the dashboard derives from one event list.
///
/// [`DerivedView::default`] is the "no data" view: zero counts, blank
/// stats, and empty table, markers, and charts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedView {
    /// Stat card values.
    pub stats: SummaryStats,
    /// Map markers, one per event.
    pub markers: Vec<MapMarker>,
    /// Major-events table rows.
    pub table_rows: Vec<TableRow>,
    /// Daily event counts in ascending date order.
    pub daily_counts: Vec<DailyCount>,
    /// Magnitude histogram.
    pub magnitude_distribution: MagnitudeDistribution,
}

impl DerivedView {
    /// The empty view rendered when no events are available.
    #[must_use]
    pub fn no_data() -> Self {
        Self::default()
    }
}

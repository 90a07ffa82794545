#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the quake map server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the dashboard's internal types to allow independent evolution of
//! the API contract.

use chrono::{DateTime, Utc};
use quake_map_analytics_models::{
    Basemap, ChartTitles, DailyCount, DistributionSlice, FaultOverlay, FaultStyle, MapMarker,
    MarkerStyle, SummaryStats, TableRow,
};
use quake_map_dashboard::{FeedStatus, MapView, RefreshReport, RefreshState};
use quake_map_event_models::BoundingBox;
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the server is healthy.
    pub healthy: bool,
    /// Server version.
    pub version: String,
}

/// Error body returned with non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Human-readable message.
    pub error: String,
}

/// Stroke and fill settings for one map layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiLayerStyle {
    /// Stroke color.
    pub color: String,
    /// Stroke width in pixels.
    pub weight: f64,
    /// Stroke opacity.
    pub opacity: f64,
    /// Fill opacity, for filled shapes only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
}

impl ApiLayerStyle {
    /// Style for event circle markers.
    #[must_use]
    pub fn markers() -> Self {
        Self {
            color: MarkerStyle::STROKE_COLOR.to_string(),
            weight: MarkerStyle::STROKE_WEIGHT,
            opacity: MarkerStyle::STROKE_OPACITY,
            fill_opacity: Some(MarkerStyle::FILL_OPACITY),
        }
    }

    /// Style for fault polylines.
    #[must_use]
    pub fn faults() -> Self {
        Self {
            color: FaultStyle::COLOR.to_string(),
            weight: FaultStyle::WEIGHT,
            opacity: FaultStyle::OPACITY,
            fill_opacity: None,
        }
    }
}

/// Raster tile layer under the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiBasemap {
    /// Tile URL template with `{s}`, `{z}`, `{x}`, `{y}`, and `{r}` slots.
    pub url: String,
    /// Attribution HTML.
    pub attribution: String,
}

impl Default for ApiBasemap {
    fn default() -> Self {
        Self {
            url: Basemap::TILE_URL.to_string(),
            attribution: Basemap::ATTRIBUTION.to_string(),
        }
    }
}

/// Chart headings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiChartTitles {
    /// Daily-count timeline heading.
    pub daily: String,
    /// Magnitude distribution heading.
    pub magnitude: String,
}

impl Default for ApiChartTitles {
    fn default() -> Self {
        Self {
            daily: ChartTitles::DAILY.to_string(),
            magnitude: ChartTitles::MAGNITUDE.to_string(),
        }
    }
}

/// Initial map setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMapView {
    /// Center and zoom.
    #[serde(flatten)]
    pub view: MapView,
    /// Region covered by the event query.
    pub bbox: BoundingBox,
    /// Event marker style.
    pub marker_style: ApiLayerStyle,
    /// Fault line style.
    pub fault_style: ApiLayerStyle,
    /// Basemap tiles.
    pub basemap: ApiBasemap,
    /// Chart headings.
    pub chart_titles: ApiChartTitles,
}

impl ApiMapView {
    /// Builds the map setup for `view` and `bbox`.
    #[must_use]
    pub fn new(view: MapView, bbox: BoundingBox) -> Self {
        Self {
            view,
            bbox,
            marker_style: ApiLayerStyle::markers(),
            fault_style: ApiLayerStyle::faults(),
            basemap: ApiBasemap::default(),
            chart_titles: ApiChartTitles::default(),
        }
    }
}

/// Everything the dashboard has rendered so far.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDashboard {
    /// Current refresh state.
    pub state: RefreshState,
    /// Whether the loading indicator is showing.
    pub loading: bool,
    /// Event feed status line, once a refresh has finished its event branch.
    pub feed_status: Option<FeedStatus>,
    /// When event data was last loaded.
    pub last_updated: Option<DateTime<Utc>>,
    /// Stat card values.
    pub stats: SummaryStats,
    /// Event markers.
    pub markers: Vec<MapMarker>,
    /// Major-events table.
    pub table_rows: Vec<TableRow>,
    /// Daily event counts.
    pub daily_counts: Vec<DailyCount>,
    /// Magnitude distribution chart segments.
    pub magnitude_distribution: Vec<DistributionSlice>,
    /// Fault-line overlays.
    pub faults: Vec<FaultOverlay>,
}

/// Result of `POST /api/refresh`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRefreshResult {
    /// Terminal state of the refresh.
    pub state: RefreshState,
    /// Event feed status.
    pub feed_status: FeedStatus,
    /// Number of events in the view.
    pub event_count: u64,
    /// Number of fault overlays, or `None` if the fault fetch failed.
    pub fault_count: Option<usize>,
    /// Refresh time if events were loaded.
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<RefreshReport> for ApiRefreshResult {
    fn from(report: RefreshReport) -> Self {
        Self {
            state: report.state,
            feed_status: report.feed_status,
            event_count: report.view.stats.count,
            fault_count: report.faults.as_ref().map(Vec::len),
            updated_at: report.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use quake_map_analytics_models::DerivedView;
    use quake_map_dashboard::FailedFeed;

    use super::*;

    #[test]
    fn map_view_flattens_center() {
        let view = MapView {
            center_lat: 21.9,
            center_lon: 96.0,
            zoom: 6,
        };
        let bbox = BoundingBox::new(92.0, 101.2, 9.5, 28.5).unwrap();
        let json = serde_json::to_value(ApiMapView::new(view, bbox)).unwrap();

        assert_eq!(json["centerLat"], 21.9);
        assert_eq!(json["centerLon"], 96.0);
        assert_eq!(json["zoom"], 6);
        assert_eq!(json["bbox"]["minLon"], 92.0);
        assert_eq!(json["markerStyle"]["color"], "#fff");
        assert_eq!(json["markerStyle"]["fillOpacity"], 0.7);
        assert_eq!(json["faultStyle"]["color"], "#f59e0b");
        assert!(json["faultStyle"].get("fillOpacity").is_none());
    }

    #[test]
    fn map_view_carries_basemap_and_chart_titles() {
        let view = MapView {
            center_lat: 21.9,
            center_lon: 96.0,
            zoom: 6,
        };
        let bbox = BoundingBox::new(92.0, 101.2, 9.5, 28.5).unwrap();
        let json = serde_json::to_value(ApiMapView::new(view, bbox)).unwrap();

        assert_eq!(
            json["basemap"]["url"],
            "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png"
        );
        assert_eq!(json["basemap"]["attribution"], "&copy; OpenStreetMap & CARTO");
        assert_eq!(json["chartTitles"]["daily"], "Daily Seismicity Trend");
        assert_eq!(json["chartTitles"]["magnitude"], "Magnitude Distribution");
    }

    #[test]
    fn refresh_result_from_failed_fault_branch() {
        let report = RefreshReport {
            state: RefreshState::PartialFailure(FailedFeed::Faults),
            view: DerivedView::no_data(),
            faults: None,
            updated_at: None,
            feed_status: FeedStatus::Empty,
        };
        let result = ApiRefreshResult::from(report);
        assert_eq!(result.event_count, 0);
        assert!(result.fault_count.is_none());

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["state"]["state"], "partial_failure");
        assert_eq!(json["feedStatus"]["status"], "empty");
    }
}

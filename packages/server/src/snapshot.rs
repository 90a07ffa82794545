//! In-memory renderer backing the JSON API.

use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};
use quake_map_analytics_models::{
    DailyCount, FaultOverlay, MagnitudeDistribution, MapMarker, SummaryStats, TableRow,
};
use quake_map_dashboard::{DashboardRenderer, FeedStatus, RefreshState};
use quake_map_server_models::ApiDashboard;

/// Keeps the latest rendered dashboard so handlers can serve it.
#[derive(Default)]
pub struct SnapshotRenderer {
    snapshot: RwLock<ApiDashboard>,
}

impl SnapshotRenderer {
    /// Copy of the current snapshot, tagged with `state`.
    #[must_use]
    pub fn snapshot(&self, state: RefreshState) -> ApiDashboard {
        let mut snapshot = self
            .snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        snapshot.state = state;
        snapshot
    }

    fn update(&self, f: impl FnOnce(&mut ApiDashboard)) {
        f(&mut self.snapshot.write().unwrap_or_else(PoisonError::into_inner));
    }
}

impl DashboardRenderer for SnapshotRenderer {
    fn show_loading(&self) {
        self.update(|s| s.loading = true);
    }

    fn hide_loading(&self) {
        self.update(|s| s.loading = false);
    }

    fn update_event_layer(&self, markers: &[MapMarker]) {
        self.update(|s| s.markers = markers.to_vec());
    }

    fn update_stats(&self, stats: &SummaryStats) {
        self.update(|s| s.stats = stats.clone());
    }

    fn update_table(&self, rows: &[TableRow]) {
        self.update(|s| s.table_rows = rows.to_vec());
    }

    fn update_timeline_chart(&self, daily: &[DailyCount]) {
        self.update(|s| s.daily_counts = daily.to_vec());
    }

    fn update_magnitude_chart(&self, distribution: &MagnitudeDistribution) {
        self.update(|s| s.magnitude_distribution = distribution.slices());
    }

    fn update_fault_layer(&self, faults: &[FaultOverlay]) {
        self.update(|s| s.faults = faults.to_vec());
    }

    fn set_feed_status(&self, status: &FeedStatus) {
        self.update(|s| s.feed_status = Some(status.clone()));
    }

    fn set_last_updated(&self, at: DateTime<Utc>) {
        self.update(|s| s.last_updated = Some(at));
    }
}

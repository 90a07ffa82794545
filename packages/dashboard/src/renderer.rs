//! Rendering collaborators driven by the refresh cycle.
//!
//! A [`DashboardRenderer`] receives each piece of the dashboard as soon as
//! it is available. Methods take `&self` so the event and fault branches
//! of a refresh can render concurrently; implementations use interior
//! mutability where they keep state.

use chrono::{DateTime, Utc};
use quake_map_analytics_models::{
    DailyCount, DerivedView, FaultOverlay, MagnitudeDistribution, MapMarker, SummaryStats, TableRow,
};

use crate::state::FeedStatus;

/// Receives rendered dashboard pieces.
pub trait DashboardRenderer: Send + Sync {
    /// Show the loading indicator.
    fn show_loading(&self);

    /// Hide the loading indicator.
    fn hide_loading(&self);

    /// Replace every event marker on the map.
    fn update_event_layer(&self, markers: &[MapMarker]);

    /// Replace the stat cards.
    fn update_stats(&self, stats: &SummaryStats);

    /// Replace the major-events table.
    fn update_table(&self, rows: &[TableRow]);

    /// Replace the daily-count timeline chart.
    fn update_timeline_chart(&self, daily: &[DailyCount]);

    /// Replace the magnitude distribution chart.
    fn update_magnitude_chart(&self, distribution: &MagnitudeDistribution);

    /// Replace the fault-line overlay.
    fn update_fault_layer(&self, faults: &[FaultOverlay]);

    /// Show the feed status line.
    fn set_feed_status(&self, status: &FeedStatus);

    /// Show when the event data was last refreshed.
    fn set_last_updated(&self, at: DateTime<Utc>);
}

/// Shows the loading indicator on creation and hides it on drop.
///
/// Hiding happens exactly once, whichever way the refresh exits.
pub struct LoadingGuard<'a, R: DashboardRenderer + ?Sized> {
    renderer: &'a R,
}

impl<'a, R: DashboardRenderer + ?Sized> LoadingGuard<'a, R> {
    /// Shows the loading indicator on `renderer`.
    pub fn show(renderer: &'a R) -> Self {
        renderer.show_loading();
        Self { renderer }
    }
}

impl<R: DashboardRenderer + ?Sized> Drop for LoadingGuard<'_, R> {
    fn drop(&mut self) {
        self.renderer.hide_loading();
    }
}

/// Pushes every event-derived piece of `view` to `renderer`.
pub fn render_view<R: DashboardRenderer + ?Sized>(renderer: &R, view: &DerivedView) {
    renderer.update_event_layer(&view.markers);
    renderer.update_stats(&view.stats);
    renderer.update_table(&view.table_rows);
    renderer.update_timeline_chart(&view.daily_counts);
    renderer.update_magnitude_chart(&view.magnitude_distribution);
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[derive(Default)]
    struct Counter {
        shown: AtomicUsize,
        hidden: AtomicUsize,
    }

    impl DashboardRenderer for Counter {
        fn show_loading(&self) {
            self.shown.fetch_add(1, Ordering::SeqCst);
        }
        fn hide_loading(&self) {
            self.hidden.fetch_add(1, Ordering::SeqCst);
        }
        fn update_event_layer(&self, _markers: &[MapMarker]) {}
        fn update_stats(&self, _stats: &SummaryStats) {}
        fn update_table(&self, _rows: &[TableRow]) {}
        fn update_timeline_chart(&self, _daily: &[DailyCount]) {}
        fn update_magnitude_chart(&self, _distribution: &MagnitudeDistribution) {}
        fn update_fault_layer(&self, _faults: &[FaultOverlay]) {}
        fn set_feed_status(&self, _status: &FeedStatus) {}
        fn set_last_updated(&self, _at: DateTime<Utc>) {}
    }

    #[test]
    fn guard_hides_once_on_drop() {
        let counter = Counter::default();
        {
            let _guard = LoadingGuard::show(&counter);
            assert_eq!(counter.shown.load(Ordering::SeqCst), 1);
            assert_eq!(counter.hidden.load(Ordering::SeqCst), 0);
        }
        assert_eq!(counter.hidden.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn guard_hides_on_early_return() {
        fn bail(counter: &Counter) -> Result<(), &'static str> {
            let _guard = LoadingGuard::show(counter);
            if counter.shown.load(Ordering::SeqCst) > 0 {
                return Err("failed");
            }
            Ok(())
        }

        let counter = Counter::default();
        assert!(bail(&counter).is_err());
        assert_eq!(counter.shown.load(Ordering::SeqCst), 1);
        assert_eq!(counter.hidden.load(Ordering::SeqCst), 1);
    }
}

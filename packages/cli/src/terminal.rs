//! Terminal renderer and logger setup.
//!
//! The loading indicator is an `indicatif` spinner. Log lines go through
//! `indicatif-log-bridge` so they are suspended while the spinner redraws,
//! and every rendered section is printed through the same
//! [`MultiProgress`].

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use quake_map_analytics_models::{
    ChartTitles, DailyCount, FaultOverlay, MagnitudeDistribution, MapMarker, SummaryStats,
    TableRow,
};
use quake_map_dashboard::{DashboardRenderer, FeedStatus};

use crate::format;

/// Initializes the global logger wrapped in `indicatif-log-bridge` so that
/// `log::info!` and friends are suspended while the spinner redraws.
///
/// Returns the [`MultiProgress`] that the spinner must be added to.
#[must_use]
pub fn init_logger() -> MultiProgress {
    let multi = MultiProgress::new();

    let logger = pretty_env_logger::formatted_builder()
        .parse_env("RUST_LOG")
        .build();
    let level = logger.filter();

    indicatif_log_bridge::LogWrapper::new(multi.clone(), logger)
        .try_init()
        .ok();

    log::set_max_level(level);

    multi
}

/// Prints each dashboard section as soon as it is rendered.
pub struct TerminalRenderer {
    multi: MultiProgress,
    spinner: Mutex<Option<ProgressBar>>,
}

impl TerminalRenderer {
    /// Creates a renderer drawing into `multi`.
    #[must_use]
    pub const fn new(multi: MultiProgress) -> Self {
        Self {
            multi,
            spinner: Mutex::new(None),
        }
    }

    fn section(&self, title: &str, lines: &[String]) {
        self.multi.suspend(|| {
            println!();
            println!("== {title} ==");
            for line in lines {
                println!("{line}");
            }
        });
    }
}

impl DashboardRenderer for TerminalRenderer {
    fn show_loading(&self) {
        let bar = self.multi.add(ProgressBar::new_spinner());
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message("Loading seismic data...");
        bar.enable_steady_tick(Duration::from_millis(100));

        let mut spinner = self.spinner.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = spinner.replace(bar) {
            previous.finish_and_clear();
        }
    }

    fn hide_loading(&self) {
        let bar = self
            .spinner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(bar) = bar {
            bar.finish_and_clear();
            self.multi.remove(&bar);
        }
    }

    fn update_event_layer(&self, markers: &[MapMarker]) {
        self.section("Map", &format::marker_lines(markers));
    }

    fn update_stats(&self, stats: &SummaryStats) {
        self.section("Summary", &format::stats_lines(stats));
    }

    fn update_table(&self, rows: &[TableRow]) {
        self.section("Major events (M4.5+)", &format::table_lines(rows));
    }

    fn update_timeline_chart(&self, daily: &[DailyCount]) {
        self.section(ChartTitles::DAILY, &format::timeline_lines(daily));
    }

    fn update_magnitude_chart(&self, distribution: &MagnitudeDistribution) {
        self.section(
            ChartTitles::MAGNITUDE,
            &format::distribution_lines(distribution),
        );
    }

    fn update_fault_layer(&self, faults: &[FaultOverlay]) {
        self.section("Faults", &format::fault_lines(faults));
    }

    fn set_feed_status(&self, status: &FeedStatus) {
        self.section("Feed", &[status.message()]);
    }

    fn set_last_updated(&self, at: DateTime<Utc>) {
        self.section(
            "Last updated",
            &[at.format("%Y-%m-%d %H:%M:%S UTC").to_string()],
        );
    }
}

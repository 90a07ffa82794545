#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Refresh orchestration for the seismicity dashboard.
//!
//! A [`Dashboard`] owns one event source, one fault source, and a
//! [`DashboardRenderer`]. Each [`Dashboard::refresh`] requests the last
//! calendar year of events and the fault geometry concurrently, renders
//! each branch as soon as it resolves, and settles into a terminal
//! [`RefreshState`]. A failing event feed renders the no-data view; a
//! failing fault document leaves the fault layer untouched.

pub mod config;
pub mod renderer;
pub mod state;

use std::future::Future;
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use quake_map_analytics::{derive_view, faults::project_faults};
use quake_map_analytics_models::{DerivedView, FaultOverlay};
use quake_map_event_models::{FaultFeature, QueryWindow, SeismicEvent};
use quake_map_source::{
    EventQuery, EventSource, FaultSource, SourceError, build_client,
    fault_lines::GeoJsonFaultSource, usgs::UsgsEventSource,
};

pub use config::{ConfigError, DashboardConfig, MapView};
pub use renderer::{DashboardRenderer, LoadingGuard, render_view};
pub use state::{FailedFeed, FeedStatus, RefreshState};

/// Errors returned by the orchestrator itself.
///
/// Remote fetch failures are not errors here; they are reported through
/// [`RefreshReport::state`] and [`FeedStatus`].
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Another refresh is still running.
    #[error("A refresh is already in progress")]
    RefreshInProgress,

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP client could not be built.
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Everything one refresh produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshReport {
    /// Terminal state of the refresh.
    pub state: RefreshState,
    /// View rendered from the event branch (the no-data view on failure).
    pub view: DerivedView,
    /// Fault overlays rendered, or `None` if the fault fetch failed.
    pub faults: Option<Vec<FaultOverlay>>,
    /// Refresh time, set only when the event fetch succeeded.
    pub updated_at: Option<DateTime<Utc>>,
    /// Event feed status shown to the user.
    pub feed_status: FeedStatus,
}

struct EventsOutcome {
    view: DerivedView,
    feed_status: FeedStatus,
    updated_at: Option<DateTime<Utc>>,
}

/// The dashboard orchestrator.
pub struct Dashboard<E, F, R> {
    config: DashboardConfig,
    events: E,
    faults: F,
    renderer: R,
    state: RwLock<RefreshState>,
    refresh_lock: tokio::sync::Mutex<()>,
}

impl<R: DashboardRenderer> Dashboard<UsgsEventSource, GeoJsonFaultSource, R> {
    /// Builds a dashboard wired to the configured remote sources.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Source`] if the HTTP client cannot be
    /// created.
    pub fn connect(config: DashboardConfig, renderer: R) -> Result<Self, DashboardError> {
        let timeout = config.request_timeout;
        let client = build_client(timeout)?;
        let events = UsgsEventSource::new(client.clone(), config.event_endpoint.clone(), timeout);
        let faults = GeoJsonFaultSource::new(client, config.fault_url.clone(), timeout);
        Ok(Self::new(config, events, faults, renderer))
    }
}

impl<E, F, R> Dashboard<E, F, R>
where
    E: EventSource,
    F: FaultSource,
    R: DashboardRenderer,
{
    /// Creates an idle dashboard.
    pub fn new(config: DashboardConfig, events: E, faults: F, renderer: R) -> Self {
        Self {
            config,
            events,
            faults,
            renderer,
            state: RwLock::new(RefreshState::Idle),
            refresh_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Current refresh state.
    #[must_use]
    pub fn state(&self) -> RefreshState {
        *self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// The renderer receiving updates.
    #[must_use]
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Refreshes with the current time as the end of the window.
    ///
    /// # Errors
    ///
    /// See [`Self::refresh`].
    pub async fn refresh_now(&self) -> Result<RefreshReport, DashboardError> {
        self.refresh(Utc::now()).await
    }

    /// Runs one refresh cycle ending at `now`.
    ///
    /// Remote failures do not make this return `Err`; they settle the
    /// state into [`RefreshState::PartialFailure`] or
    /// [`RefreshState::FullFailure`].
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::RefreshInProgress`] if another refresh on
    /// this dashboard has not finished.
    pub async fn refresh(&self, now: DateTime<Utc>) -> Result<RefreshReport, DashboardError> {
        let Ok(_running) = self.refresh_lock.try_lock() else {
            log::warn!("Refresh requested while another is running; ignoring");
            return Err(DashboardError::RefreshInProgress);
        };

        self.set_state(RefreshState::Loading);
        let _loading = LoadingGuard::show(&self.renderer);

        let query = EventQuery {
            window: QueryWindow::one_year_ending(now),
            bbox: self.config.region,
            min_magnitude: self.config.min_magnitude,
        };
        let timeout = self.config.request_timeout;

        log::info!(
            "Refreshing dashboard for {} to {}",
            query.window.start,
            query.window.end
        );

        let events_branch = async {
            let result = with_timeout(timeout, self.events.fetch_events(&query)).await;
            self.render_events(result, now)
        };
        let faults_branch = async {
            let result = with_timeout(timeout, self.faults.fetch_faults()).await;
            self.render_faults(result)
        };

        let (events, faults) = futures::future::join(events_branch, faults_branch).await;

        let state = RefreshState::settle(events.updated_at.is_some(), faults.is_some());
        self.set_state(state);
        log::info!("Refresh finished: {state:?}");

        Ok(RefreshReport {
            state,
            view: events.view,
            faults,
            updated_at: events.updated_at,
            feed_status: events.feed_status,
        })
    }

    fn render_events(
        &self,
        result: Result<Vec<SeismicEvent>, SourceError>,
        now: DateTime<Utc>,
    ) -> EventsOutcome {
        match result {
            Ok(events) => {
                let view = derive_view(&events);
                let feed_status = FeedStatus::from_count(events.len());
                render_view(&self.renderer, &view);
                self.renderer.set_feed_status(&feed_status);
                self.renderer.set_last_updated(now);
                EventsOutcome {
                    view,
                    feed_status,
                    updated_at: Some(now),
                }
            }
            Err(e) => {
                log::error!("Event fetch from '{}' failed: {e}", self.events.id());
                let view = DerivedView::no_data();
                let feed_status = FeedStatus::Unavailable {
                    reason: e.to_string(),
                };
                render_view(&self.renderer, &view);
                self.renderer.set_feed_status(&feed_status);
                EventsOutcome {
                    view,
                    feed_status,
                    updated_at: None,
                }
            }
        }
    }

    fn render_faults(
        &self,
        result: Result<Vec<FaultFeature>, SourceError>,
    ) -> Option<Vec<FaultOverlay>> {
        match result {
            Ok(features) => {
                let overlays = project_faults(&features);
                log::debug!("Rendering {} fault overlay(s)", overlays.len());
                self.renderer.update_fault_layer(&overlays);
                Some(overlays)
            }
            Err(e) => {
                log::error!("Fault fetch from '{}' failed: {e}", self.faults.id());
                None
            }
        }
    }

    fn set_state(&self, state: RefreshState) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = state;
    }
}

async fn with_timeout<T>(
    after: Duration,
    fut: impl Future<Output = Result<T, SourceError>>,
) -> Result<T, SourceError> {
    tokio::time::timeout(after, fut)
        .await
        .unwrap_or(Err(SourceError::Timeout { after }))
}

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Seismic event feed and fault geometry fetchers.
//!
//! The dashboard depends only on the [`EventSource`] and [`FaultSource`]
//! traits. [`usgs::UsgsEventSource`] queries an FDSN event web service and
//! [`fault_lines::GeoJsonFaultSource`] downloads a static `GeoJSON` fault
//! map. Neither retries; a failed request is terminal for that refresh.

pub mod fault_lines;
pub mod http;
pub mod parsing;
pub mod usgs;

use std::time::Duration;

use async_trait::async_trait;
use quake_map_event_models::{BoundingBox, FaultFeature, QueryWindow, SeismicEvent};

/// Errors that can occur while fetching from a remote source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed at the transport level.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status {
        /// Response status code.
        status: reqwest::StatusCode,
        /// Requested URL.
        url: String,
    },

    /// Response body was not the expected document.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of what went wrong.
        message: String,
    },

    /// No response within the configured deadline.
    #[error("Request timed out after {after:?}")]
    Timeout {
        /// The deadline that elapsed.
        after: Duration,
    },
}

/// Parameters for one event-feed request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventQuery {
    /// Time range to request.
    pub window: QueryWindow,
    /// Region to request.
    pub bbox: BoundingBox,
    /// Server-side minimum magnitude filter.
    pub min_magnitude: f64,
}

/// A read-only query interface returning seismic events.
///
/// Implementations must return events in chronological feed order
/// (newest first for the USGS feed); callers rely on that order for the
/// event table.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Returns a short identifier for log messages (e.g., `"usgs"`).
    fn id(&self) -> &str;

    /// Fetches all events matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the request fails, the server returns a
    /// non-success status, or the payload cannot be parsed.
    async fn fetch_events(&self, query: &EventQuery) -> Result<Vec<SeismicEvent>, SourceError>;
}

/// A source of fault-line geometry.
#[async_trait]
pub trait FaultSource: Send + Sync {
    /// Returns a short identifier for log messages.
    fn id(&self) -> &str;

    /// Fetches every fault feature in the document.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the document cannot be fetched or parsed.
    async fn fetch_faults(&self) -> Result<Vec<FaultFeature>, SourceError>;
}

/// Builds the HTTP client shared by both sources.
///
/// `timeout` bounds each whole request, from connect to the end of the body.
///
/// # Errors
///
/// Returns [`SourceError::Http`] if the TLS backend cannot be initialized.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, SourceError> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("quake-map/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()?;
    Ok(client)
}

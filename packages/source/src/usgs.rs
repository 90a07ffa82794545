//! USGS FDSN event web service fetcher.
//!
//! Issues a single `fdsnws/event/1/query` request for the configured
//! window and bounding box with `format=geojson&orderby=time`, so events
//! arrive newest first.

use std::time::Duration;

use async_trait::async_trait;
use chrono::SecondsFormat;
use quake_map_event_models::SeismicEvent;

use crate::parsing::parse_event_collection;
use crate::{EventQuery, EventSource, SourceError, http};

/// Default FDSN event query endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://earthquake.usgs.gov/fdsnws/event/1/query";

/// Event source backed by an FDSN event query endpoint.
pub struct UsgsEventSource {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl UsgsEventSource {
    /// Creates a source querying `endpoint` with `client`.
    ///
    /// `timeout` should match the deadline configured on `client`; it is
    /// only used to describe timeout errors.
    #[must_use]
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        }
    }
}

/// Builds the FDSN query string parameters for `query`.
#[must_use]
pub fn query_params(query: &EventQuery) -> Vec<(&'static str, String)> {
    vec![
        ("format", "geojson".to_string()),
        (
            "starttime",
            query
                .window
                .start
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        ),
        (
            "endtime",
            query.window.end.to_rfc3339_opts(SecondsFormat::Millis, true),
        ),
        ("minlongitude", query.bbox.min_lon().to_string()),
        ("maxlongitude", query.bbox.max_lon().to_string()),
        ("minlatitude", query.bbox.min_lat().to_string()),
        ("maxlatitude", query.bbox.max_lat().to_string()),
        ("minmagnitude", query.min_magnitude.to_string()),
        ("orderby", "time".to_string()),
    ]
}

#[async_trait]
impl EventSource for UsgsEventSource {
    fn id(&self) -> &str {
        "usgs"
    }

    async fn fetch_events(&self, query: &EventQuery) -> Result<Vec<SeismicEvent>, SourceError> {
        let params = query_params(query);
        log::info!(
            "Requesting events {} to {} (M{}+)",
            query.window.start,
            query.window.end,
            query.min_magnitude
        );

        let body = http::send_text(
            self.client.get(&self.endpoint).query(&params),
            self.timeout,
        )
        .await?;

        let parsed = parse_event_collection(&body)?;
        if parsed.skipped > 0 {
            log::warn!(
                "Skipped {} event(s) missing magnitude, depth, time, or position",
                parsed.skipped
            );
        }
        log::info!("Received {} event(s)", parsed.events.len());

        Ok(parsed.events)
    }
}

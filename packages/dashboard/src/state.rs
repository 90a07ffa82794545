//! Refresh lifecycle and feed status.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Which remote fetch failed during a partially failed refresh.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FailedFeed {
    /// The event feed.
    Events,
    /// The fault-geometry document.
    Faults,
}

/// Where the dashboard is in its refresh cycle.
///
/// `Idle -> Loading -> (Ready | PartialFailure | FullFailure)`, and back
/// to `Loading` on the next refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "failed", rename_all = "snake_case")]
pub enum RefreshState {
    /// No refresh has started yet.
    #[default]
    Idle,
    /// A refresh is in flight.
    Loading,
    /// Both fetches succeeded.
    Ready,
    /// One fetch failed; the other was rendered.
    PartialFailure(FailedFeed),
    /// Both fetches failed.
    FullFailure,
}

impl RefreshState {
    /// Terminal state for a refresh given which fetches succeeded.
    #[must_use]
    pub const fn settle(events_ok: bool, faults_ok: bool) -> Self {
        match (events_ok, faults_ok) {
            (true, true) => Self::Ready,
            (false, true) => Self::PartialFailure(FailedFeed::Events),
            (true, false) => Self::PartialFailure(FailedFeed::Faults),
            (false, false) => Self::FullFailure,
        }
    }
}

/// Outcome of the most recent event fetch, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FeedStatus {
    /// Events were received.
    Loaded {
        /// Number of events received.
        count: usize,
    },
    /// The feed answered with zero events.
    Empty,
    /// The feed could not be reached or read.
    Unavailable {
        /// Human-readable failure description.
        reason: String,
    },
}

impl FeedStatus {
    /// Status for a successful fetch of `count` events.
    #[must_use]
    pub const fn from_count(count: usize) -> Self {
        if count == 0 {
            Self::Empty
        } else {
            Self::Loaded { count }
        }
    }

    /// Banner text for the status line.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Loaded { count } => format!("{count} events in the last 12 months"),
            Self::Empty => "No events reported in the last 12 months".to_string(),
            Self::Unavailable { reason } => format!("No events available ({reason})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settle_covers_every_outcome() {
        assert_eq!(RefreshState::settle(true, true), RefreshState::Ready);
        assert_eq!(
            RefreshState::settle(false, true),
            RefreshState::PartialFailure(FailedFeed::Events)
        );
        assert_eq!(
            RefreshState::settle(true, false),
            RefreshState::PartialFailure(FailedFeed::Faults)
        );
        assert_eq!(RefreshState::settle(false, false), RefreshState::FullFailure);
    }

    #[test]
    fn zero_events_is_empty_not_unavailable() {
        assert_eq!(FeedStatus::from_count(0), FeedStatus::Empty);
        assert_eq!(FeedStatus::from_count(3), FeedStatus::Loaded { count: 3 });
    }

    #[test]
    fn state_serializes_with_tag() {
        let json = serde_json::to_value(RefreshState::PartialFailure(FailedFeed::Faults)).unwrap();
        assert_eq!(json["state"], "partial_failure");
        assert_eq!(json["failed"], "faults");

        let json = serde_json::to_value(RefreshState::Idle).unwrap();
        assert_eq!(json["state"], "idle");
    }

    #[test]
    fn feed_status_messages() {
        assert_eq!(
            FeedStatus::Loaded { count: 12 }.message(),
            "12 events in the last 12 months"
        );
        assert!(
            FeedStatus::Unavailable {
                reason: "HTTP 503".to_string()
            }
            .message()
            .contains("HTTP 503")
        );
    }
}

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Seismic event and fault geometry types.
//!
//! These are the records fetched fresh from the remote event feed and the
//! fault-geometry document on every refresh. Both are immutable once
//! parsed; nothing downstream mutates them.

use chrono::{DateTime, Datelike as _, Days, Months, Utc};
use serde::{Deserialize, Serialize};

/// A single reported earthquake.
///
/// Records missing a magnitude, depth, origin time, or position never
/// become a `SeismicEvent`; the source parser drops them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeismicEvent {
    /// Upstream feature identifier (e.g. `"us7000pn9s"`), if provided.
    pub id: Option<String>,
    /// Origin time in epoch milliseconds.
    pub timestamp_ms: i64,
    /// Reported magnitude. Conventionally 0-10 but not bounded.
    pub magnitude: f64,
    /// Hypocenter depth in kilometers. May be negative.
    pub depth_km: f64,
    /// Epicenter longitude.
    pub longitude: f64,
    /// Epicenter latitude.
    pub latitude: f64,
    /// Human-readable location description. May be empty.
    pub place: String,
}

impl SeismicEvent {
    /// Returns the origin time as a UTC timestamp.
    ///
    /// Returns `None` if the millisecond value is outside the range
    /// representable by [`DateTime`].
    #[must_use]
    pub fn occurred_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp_ms)
    }
}

/// A longitude/latitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    /// Longitude in degrees.
    pub longitude: f64,
    /// Latitude in degrees.
    pub latitude: f64,
}

/// A tectonic fault trace from the fault-geometry document.
///
/// Rendered independently of the seismic events; the two only share
/// geographic space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaultFeature {
    /// Fault name, when the feature carries one.
    pub name: Option<String>,
    /// One coordinate sequence per line segment of the trace.
    pub lines: Vec<Vec<Coordinate>>,
}

impl FaultFeature {
    /// Name shown for the fault, falling back to `"Unknown"`.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }
}

/// Error returned when a [`BoundingBox`] would have an empty or inverted
/// extent.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error(
    "invalid bounding box (lon {min_lon}..{max_lon}, lat {min_lat}..{max_lat}): \
     minimums must be finite and strictly less than maximums"
)]
pub struct InvalidBoundingBoxError {
    /// Requested western edge.
    pub min_lon: f64,
    /// Requested eastern edge.
    pub max_lon: f64,
    /// Requested southern edge.
    pub min_lat: f64,
    /// Requested northern edge.
    pub max_lat: f64,
}

/// Rectangular query region in degrees.
///
/// Always satisfies `min_lon < max_lon` and `min_lat < max_lat`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawBoundingBox")]
pub struct BoundingBox {
    min_lon: f64,
    max_lon: f64,
    min_lat: f64,
    max_lat: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBoundingBox {
    #[serde(alias = "min_lon")]
    min_lon: f64,
    #[serde(alias = "max_lon")]
    max_lon: f64,
    #[serde(alias = "min_lat")]
    min_lat: f64,
    #[serde(alias = "max_lat")]
    max_lat: f64,
}

impl TryFrom<RawBoundingBox> for BoundingBox {
    type Error = InvalidBoundingBoxError;

    fn try_from(raw: RawBoundingBox) -> Result<Self, Self::Error> {
        Self::new(raw.min_lon, raw.max_lon, raw.min_lat, raw.max_lat)
    }
}

impl BoundingBox {
    /// Creates a bounding box.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidBoundingBoxError`] if any edge is not finite or a
    /// minimum is not strictly less than its maximum.
    pub fn new(
        min_lon: f64,
        max_lon: f64,
        min_lat: f64,
        max_lat: f64,
    ) -> Result<Self, InvalidBoundingBoxError> {
        let finite = [min_lon, max_lon, min_lat, max_lat]
            .iter()
            .all(|v| v.is_finite());

        if !finite || min_lon >= max_lon || min_lat >= max_lat {
            return Err(InvalidBoundingBoxError {
                min_lon,
                max_lon,
                min_lat,
                max_lat,
            });
        }

        Ok(Self {
            min_lon,
            max_lon,
            min_lat,
            max_lat,
        })
    }

    /// Western edge.
    #[must_use]
    pub const fn min_lon(&self) -> f64 {
        self.min_lon
    }

    /// Eastern edge.
    #[must_use]
    pub const fn max_lon(&self) -> f64 {
        self.max_lon
    }

    /// Southern edge.
    #[must_use]
    pub const fn min_lat(&self) -> f64 {
        self.min_lat
    }

    /// Northern edge.
    #[must_use]
    pub const fn max_lat(&self) -> f64 {
        self.max_lat
    }
}

/// Time range requested from the event feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryWindow {
    /// Inclusive start of the window.
    pub start: DateTime<Utc>,
    /// End of the window (the refresh time).
    pub end: DateTime<Utc>,
}

impl QueryWindow {
    /// The calendar year ending at `end`.
    ///
    /// Subtracts one from the year and keeps month, day, and time, so the
    /// window is not a fixed 365 days. February 29 has no counterpart in
    /// the previous year and rolls over to March 1.
    #[must_use]
    pub fn one_year_ending(end: DateTime<Utc>) -> Self {
        let start = end.with_year(end.year() - 1).unwrap_or_else(|| {
            end.checked_sub_months(Months::new(12))
                .and_then(|feb_28| feb_28.checked_add_days(Days::new(1)))
                .unwrap_or(end)
        });
        Self { start, end }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;

    use super::*;

    #[test]
    fn bounding_box_accepts_ordered_edges() {
        let bbox = BoundingBox::new(92.0, 101.2, 9.5, 28.5).unwrap();
        assert!((bbox.min_lon() - 92.0).abs() < f64::EPSILON);
        assert!((bbox.max_lat() - 28.5).abs() < f64::EPSILON);
    }

    #[test]
    fn bounding_box_rejects_inverted_or_degenerate_edges() {
        assert!(BoundingBox::new(101.2, 92.0, 9.5, 28.5).is_err());
        assert!(BoundingBox::new(92.0, 101.2, 28.5, 28.5).is_err());
        assert!(BoundingBox::new(f64::NAN, 101.2, 9.5, 28.5).is_err());
    }

    #[test]
    fn bounding_box_deserialization_validates() {
        let ok: Result<BoundingBox, _> = serde_json::from_str(
            r#"{"minLon": 92.0, "maxLon": 101.2, "minLat": 9.5, "maxLat": 28.5}"#,
        );
        assert!(ok.is_ok());

        let bad: Result<BoundingBox, _> = serde_json::from_str(
            r#"{"min_lon": 100.0, "max_lon": 90.0, "min_lat": 9.5, "max_lat": 28.5}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn window_subtracts_one_calendar_year() {
        let end = Utc.with_ymd_and_hms(2025, 3, 28, 6, 20, 52).unwrap();
        let window = QueryWindow::one_year_ending(end);
        assert_eq!(
            window.start,
            Utc.with_ymd_and_hms(2024, 3, 28, 6, 20, 52).unwrap()
        );
        assert_eq!(window.end, end);
    }

    #[test]
    fn window_spans_leap_day_as_calendar_year() {
        let end = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let window = QueryWindow::one_year_ending(end);
        assert_eq!(window.start, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
        assert_eq!((window.end - window.start).num_days(), 365);

        let end = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let window = QueryWindow::one_year_ending(end);
        assert_eq!((window.end - window.start).num_days(), 366);
    }

    #[test]
    fn window_rolls_leap_day_over_to_march() {
        let end = Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap();
        let window = QueryWindow::one_year_ending(end);
        assert_eq!(
            window.start,
            Utc.with_ymd_and_hms(2023, 3, 1, 12, 0, 0).unwrap()
        );
        assert_eq!((window.end - window.start).num_days(), 365);
    }

    #[test]
    fn window_keeps_time_of_day() {
        let end = Utc.with_ymd_and_hms(2025, 2, 28, 23, 59, 59).unwrap();
        let window = QueryWindow::one_year_ending(end);
        assert_eq!(
            window.start,
            Utc.with_ymd_and_hms(2024, 2, 28, 23, 59, 59).unwrap()
        );
    }

    #[test]
    fn event_exposes_utc_origin_time() {
        let event = SeismicEvent {
            id: None,
            timestamp_ms: 1_743_143_452_000,
            magnitude: 7.7,
            depth_km: 10.0,
            longitude: 95.925,
            latitude: 22.001,
            place: "Mandalay".to_string(),
        };
        assert_eq!(
            event.occurred_at(),
            Some(Utc.with_ymd_and_hms(2025, 3, 28, 6, 30, 52).unwrap())
        );
    }

    #[test]
    fn unnamed_fault_displays_unknown() {
        let fault = FaultFeature {
            name: None,
            lines: Vec::new(),
        };
        assert_eq!(fault.display_name(), "Unknown");
    }
}

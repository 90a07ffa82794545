#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Magnitude classification.
//!
//! Maps a single magnitude value onto the marker radius, the three-tier
//! color used by the map and table, and the four-bucket histogram used by
//! the distribution chart. The color tiers (breakpoints 5 and 6) and the
//! histogram buckets (breakpoints 4, 5 and 6) are intentionally distinct.
//!
//! Every classifier compares with `>=` from the top tier down, so a NaN
//! magnitude lands in the lowest tier and `+inf` in the highest.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Marker radius for a magnitude.
///
/// `>= 7.0` → 15, `>= 6.0` → 10, `>= 5.0` → 7, otherwise 4. Each
/// boundary value belongs to the higher tier.
#[must_use]
pub fn radius_for(magnitude: f64) -> f64 {
    if magnitude >= 7.0 {
        15.0
    } else if magnitude >= 6.0 {
        10.0
    } else if magnitude >= 5.0 {
        7.0
    } else {
        4.0
    }
}

/// Color tier for a magnitude. See [`MagnitudeColor::for_magnitude`].
#[must_use]
pub fn color_for(magnitude: f64) -> MagnitudeColor {
    MagnitudeColor::for_magnitude(magnitude)
}

/// Categorical color token used for map markers and table magnitudes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MagnitudeColor {
    /// Below M5.0
    Minor,
    /// M5.0 up to M6.0
    Moderate,
    /// M6.0 and above
    Strong,
}

impl MagnitudeColor {
    /// Classifies a magnitude: `>= 6.0` strong, `>= 5.0` moderate,
    /// otherwise minor.
    #[must_use]
    pub fn for_magnitude(magnitude: f64) -> Self {
        if magnitude >= 6.0 {
            Self::Strong
        } else if magnitude >= 5.0 {
            Self::Moderate
        } else {
            Self::Minor
        }
    }

    /// CSS hex color for this tier.
    #[must_use]
    pub const fn hex(self) -> &'static str {
        match self {
            Self::Minor => "#3b82f6",
            Self::Moderate => "#f97316",
            Self::Strong => "#ef4444",
        }
    }
}

/// One of the four fixed magnitude-distribution buckets.
///
/// Upper bounds are exclusive: `[-inf, 4)`, `[4, 5)`, `[5, 6)`, `[6, +inf]`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MagnitudeBucket {
    /// Below M4
    BelowFour,
    /// M4 up to M5
    FourToFive,
    /// M5 up to M6
    FiveToSix,
    /// M6 and above
    SixPlus,
}

impl MagnitudeBucket {
    /// Number of buckets.
    pub const COUNT: usize = 4;

    /// Returns all buckets in ascending magnitude order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::BelowFour, Self::FourToFive, Self::FiveToSix, Self::SixPlus]
    }

    /// Bucket containing `magnitude`.
    #[must_use]
    pub fn for_magnitude(magnitude: f64) -> Self {
        if magnitude >= 6.0 {
            Self::SixPlus
        } else if magnitude >= 5.0 {
            Self::FiveToSix
        } else if magnitude >= 4.0 {
            Self::FourToFive
        } else {
            Self::BelowFour
        }
    }

    /// Position of this bucket in [`MagnitudeBucket::all`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Chart legend label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::BelowFour => "< M4",
            Self::FourToFive => "M 4-5",
            Self::FiveToSix => "M 5-6",
            Self::SixPlus => "M 6+",
        }
    }

    /// CSS hex color for the chart segment.
    #[must_use]
    pub const fn hex(self) -> &'static str {
        match self {
            Self::BelowFour => "#94a3b8",
            Self::FourToFive => "#3b82f6",
            Self::FiveToSix => "#f97316",
            Self::SixPlus => "#ef4444",
        }
    }
}

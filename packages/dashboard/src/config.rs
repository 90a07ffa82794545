//! Dashboard configuration.
//!
//! The default configuration is embedded at compile time from
//! `dashboard.toml`. A different file can be selected with the
//! `QUAKE_MAP_CONFIG` environment variable or an explicit path.

use std::path::{Path, PathBuf};
use std::time::Duration;

use quake_map_event_models::{BoundingBox, InvalidBoundingBoxError};
use serde::{Deserialize, Serialize};

/// Environment variable naming an alternate configuration file.
pub const CONFIG_ENV_VAR: &str = "QUAKE_MAP_CONFIG";

const DEFAULT_TOML: &str = include_str!("../dashboard.toml");

const fn default_timeout_secs() -> u64 {
    20
}

const fn default_min_magnitude() -> f64 {
    2.5
}

/// Errors from loading or validating a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// Configuration was not valid TOML for [`DashboardConfig`].
    #[error("Failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    /// The `[region]` table does not describe a valid box.
    #[error(transparent)]
    InvalidBoundingBox(#[from] InvalidBoundingBoxError),

    /// A value is out of range.
    #[error("Invalid value for {field}: {message}")]
    InvalidValue {
        /// Dotted path of the offending key.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },
}

/// Initial map view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    /// Latitude of the initial center.
    #[serde(alias = "center_lat")]
    pub center_lat: f64,
    /// Longitude of the initial center.
    #[serde(alias = "center_lon")]
    pub center_lon: f64,
    /// Initial zoom level.
    pub zoom: u8,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default = "default_timeout_secs")]
    request_timeout_secs: u64,
    event_source: EventSourceSection,
    fault_source: FaultSourceSection,
    region: RegionSection,
    map: MapView,
}

#[derive(Debug, Deserialize)]
struct EventSourceSection {
    endpoint: String,
    #[serde(default = "default_min_magnitude")]
    min_magnitude: f64,
}

#[derive(Debug, Deserialize)]
struct FaultSourceSection {
    url: String,
}

#[derive(Debug, Deserialize)]
struct RegionSection {
    min_lon: f64,
    max_lon: f64,
    min_lat: f64,
    max_lat: f64,
}

/// Validated dashboard settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Deadline applied to each remote fetch.
    pub request_timeout: Duration,
    /// FDSN event query endpoint.
    pub event_endpoint: String,
    /// Server-side minimum magnitude filter.
    pub min_magnitude: f64,
    /// URL of the fault-geometry `GeoJSON` document.
    pub fault_url: String,
    /// Region requested from the event feed.
    pub region: BoundingBox,
    /// Initial map view.
    pub map: MapView,
}

impl DashboardConfig {
    /// The configuration compiled into the binary.
    ///
    /// # Panics
    ///
    /// Panics if the embedded `dashboard.toml` is invalid.
    #[must_use]
    pub fn embedded() -> Self {
        Self::from_toml_str(DEFAULT_TOML)
            .unwrap_or_else(|e| panic!("Failed to parse embedded dashboard.toml: {e}"))
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the document cannot be parsed or a value
    /// is out of range.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(text)?;
        Self::try_from(file)
    }

    /// Reads and validates the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or any error
    /// from [`Self::from_toml_str`].
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Loads from `path`, else from `QUAKE_MAP_CONFIG`, else the embedded
    /// default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a selected file cannot be read or is
    /// invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            log::info!("Loading config from {}", path.display());
            return Self::from_path(path);
        }

        if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR)
            && !env_path.trim().is_empty()
        {
            log::info!("Loading config from {CONFIG_ENV_VAR}={env_path}");
            return Self::from_path(Path::new(&env_path));
        }

        log::debug!("Using embedded dashboard.toml");
        Self::from_toml_str(DEFAULT_TOML)
    }
}

impl TryFrom<ConfigFile> for DashboardConfig {
    type Error = ConfigError;

    fn try_from(file: ConfigFile) -> Result<Self, Self::Error> {
        if file.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_secs",
                message: "must be at least 1".to_string(),
            });
        }

        if !file.event_source.min_magnitude.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "event_source.min_magnitude",
                message: format!("{} is not finite", file.event_source.min_magnitude),
            });
        }

        for (field, url) in [
            ("event_source.endpoint", &file.event_source.endpoint),
            ("fault_source.url", &file.fault_source.url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::InvalidValue {
                    field,
                    message: format!("'{url}' is not an http(s) URL"),
                });
            }
        }

        let map = file.map;
        if !(-90.0..=90.0).contains(&map.center_lat) || !(-180.0..=180.0).contains(&map.center_lon)
        {
            return Err(ConfigError::InvalidValue {
                field: "map",
                message: format!(
                    "center ({}, {}) is outside valid coordinates",
                    map.center_lat, map.center_lon
                ),
            });
        }

        let r = file.region;
        let region = BoundingBox::new(r.min_lon, r.max_lon, r.min_lat, r.max_lat)?;

        Ok(Self {
            request_timeout: Duration::from_secs(file.request_timeout_secs),
            event_endpoint: file.event_source.endpoint,
            min_magnitude: file.event_source.min_magnitude,
            fault_url: file.fault_source.url,
            region,
            map,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(region: &str, extra: &str) -> String {
        format!(
            r#"
            {extra}
            [event_source]
            endpoint = "https://example.test/fdsnws/event/1/query"

            [fault_source]
            url = "https://example.test/faults.geojson"

            [region]
            {region}

            [map]
            center_lat = 21.9
            center_lon = 96.0
            zoom = 6
            "#
        )
    }

    #[test]
    fn embedded_config_parses() {
        let config = DashboardConfig::embedded();
        assert_eq!(config.request_timeout, Duration::from_secs(20));
        assert!((config.min_magnitude - 2.5).abs() < f64::EPSILON);
        assert!((config.region.min_lon() - 92.0).abs() < f64::EPSILON);
        assert!((config.region.max_lon() - 101.2).abs() < f64::EPSILON);
        assert!((config.region.min_lat() - 9.5).abs() < f64::EPSILON);
        assert!((config.region.max_lat() - 28.5).abs() < f64::EPSILON);
        assert!((config.map.center_lat - 21.9).abs() < f64::EPSILON);
        assert!((config.map.center_lon - 96.0).abs() < f64::EPSILON);
        assert_eq!(config.map.zoom, 6);
        assert!(config.fault_url.ends_with("Myanmar_Tectonic_Map_2011.geojson"));
    }

    #[test]
    fn defaults_apply_when_optional_keys_missing() {
        let text = config_with(
            "min_lon = 92.0\nmax_lon = 101.2\nmin_lat = 9.5\nmax_lat = 28.5",
            "",
        );
        let config = DashboardConfig::from_toml_str(&text).unwrap();
        assert_eq!(config.request_timeout, Duration::from_secs(20));
        assert!((config.min_magnitude - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn inverted_region_is_rejected() {
        let text = config_with(
            "min_lon = 101.2\nmax_lon = 92.0\nmin_lat = 9.5\nmax_lat = 28.5",
            "",
        );
        assert!(matches!(
            DashboardConfig::from_toml_str(&text),
            Err(ConfigError::InvalidBoundingBox(_))
        ));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let text = config_with(
            "min_lon = 92.0\nmax_lon = 101.2\nmin_lat = 9.5\nmax_lat = 28.5",
            "request_timeout_secs = 0",
        );
        assert!(matches!(
            DashboardConfig::from_toml_str(&text),
            Err(ConfigError::InvalidValue {
                field: "request_timeout_secs",
                ..
            })
        ));
    }

    #[test]
    fn missing_section_is_toml_error() {
        assert!(matches!(
            DashboardConfig::from_toml_str("request_timeout_secs = 5"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = DashboardConfig::from_path(Path::new("/nonexistent/quake_map.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}

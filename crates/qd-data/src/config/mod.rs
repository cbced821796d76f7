//! Settings file loading
//!
//! Settings live in an optional JSON file. Missing keys take their defaults;
//! a missing file means all defaults.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use qd_core::DashboardSettings;

use crate::DataError;

/// Settings file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "quake-dashboard.json";

/// Environment variable pointing at an alternative settings file
pub const CONFIG_ENV_VAR: &str = "QUAKE_DASHBOARD_CONFIG";

/// Where to look for the settings file
pub fn settings_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Read and validate a settings file; `Ok(None)` when it does not exist
pub fn read_settings(path: &Path) -> Result<Option<DashboardSettings>, DataError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let settings: DashboardSettings = serde_json::from_str(&text)?;
    settings.validate().map_err(DataError::Config)?;
    Ok(Some(settings))
}

/// Settings for this run
///
/// A broken settings file is logged and replaced by the defaults so that the
/// dashboard still comes up. `data_override` replaces the configured data
/// path.
pub fn load_settings(path: &Path, data_override: Option<PathBuf>) -> DashboardSettings {
    let mut settings = match read_settings(path) {
        Ok(Some(settings)) => {
            info!("Loaded settings from {}", path.display());
            settings
        }
        Ok(None) => {
            debug!("No settings file at {}, using defaults", path.display());
            DashboardSettings::default()
        }
        Err(e) => {
            error!("Ignoring settings file {}: {}", path.display(), e);
            DashboardSettings::default()
        }
    };

    if let Some(data_path) = data_override {
        settings.data_path = data_path;
    }
    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(DEFAULT_CONFIG_FILE);

        assert!(matches!(read_settings(&path), Ok(None)));
        assert_eq!(load_settings(&path, None), DashboardSettings::default());
    }

    #[test]
    fn test_partial_file_and_override() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, r#"{ "year_zoom": 9.0, "data_path": "quakes.geojson" }"#).expect("write");

        let settings = load_settings(&path, None);
        assert_eq!(settings.year_zoom, 9.0);
        assert_eq!(settings.data_path, PathBuf::from("quakes.geojson"));

        let settings = load_settings(&path, Some(PathBuf::from("other.json")));
        assert_eq!(settings.data_path, PathBuf::from("other.json"));
        assert_eq!(settings.year_zoom, 9.0);
    }

    #[test]
    fn test_broken_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(DEFAULT_CONFIG_FILE);

        std::fs::write(&path, "{ not json").expect("write");
        assert!(matches!(read_settings(&path), Err(DataError::Json(_))));
        assert_eq!(load_settings(&path, None), DashboardSettings::default());

        std::fs::write(&path, r#"{ "popup_delay_ms": 10 }"#).expect("write");
        assert!(matches!(read_settings(&path), Err(DataError::Config(_))));
    }
}

//! Dashboard settings

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::filter::{FilterThresholds, ALL_TIME_YEAR};
use crate::list::{STRONG_QUAKE_LIMIT, STRONG_QUAKE_THRESHOLD};
use crate::map::{Viewpoint, MAX_ZOOM, MIN_ZOOM};

/// User-tunable settings, all with defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// GeoJSON feature collection to load
    pub data_path: PathBuf,

    /// Thresholds applied at startup and on reset
    pub default_thresholds: FilterThresholds,

    /// Minimum magnitude for the strong-quake list
    pub strong_quake_threshold: f64,

    /// Maximum rows in the strong-quake list
    pub strong_quake_limit: usize,

    /// Map view at startup and on reset
    pub initial_view: Viewpoint,

    /// Zoom used when focusing a single quake
    pub focus_zoom: f64,

    /// Zoom used when focusing a year
    pub year_zoom: f64,

    pub camera_animation_ms: u64,

    /// Delay before a focused quake's popup opens; longer than the animation
    pub popup_delay_ms: u64,

    /// Range of the magnitude slider
    pub magnitude_range: (f64, f64),

    /// Upper end of the year slider; the lower end is "all time"
    pub max_year: i32,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/earthquakes.json"),
            default_thresholds: FilterThresholds::default(),
            strong_quake_threshold: STRONG_QUAKE_THRESHOLD,
            strong_quake_limit: STRONG_QUAKE_LIMIT,
            initial_view: Viewpoint::default(),
            focus_zoom: 10.0,
            year_zoom: 8.0,
            camera_animation_ms: 350,
            popup_delay_ms: 450,
            magnitude_range: (0.0, 8.0),
            max_year: 2025,
        }
    }
}

impl DashboardSettings {
    pub fn camera_animation(&self) -> Duration {
        Duration::from_millis(self.camera_animation_ms)
    }

    pub fn popup_delay(&self) -> Duration {
        Duration::from_millis(self.popup_delay_ms)
    }

    /// Check the values that would otherwise produce a broken dashboard
    pub fn validate(&self) -> Result<(), String> {
        let (lo, hi) = self.magnitude_range;
        if !(lo < hi) {
            return Err(format!("magnitude_range must be increasing, got ({}, {})", lo, hi));
        }
        if self.max_year <= ALL_TIME_YEAR {
            return Err(format!("max_year must be after {}", ALL_TIME_YEAR));
        }
        if self.popup_delay_ms <= self.camera_animation_ms {
            return Err("popup_delay_ms must exceed camera_animation_ms".to_string());
        }
        for (name, zoom) in [
            ("focus_zoom", self.focus_zoom),
            ("year_zoom", self.year_zoom),
            ("initial_view.zoom", self.initial_view.zoom),
        ] {
            if !(MIN_ZOOM..=MAX_ZOOM).contains(&zoom) {
                return Err(format!("{} must be within [{}, {}], got {}", name, MIN_ZOOM, MAX_ZOOM, zoom));
            }
        }
        Ok(())
    }
}

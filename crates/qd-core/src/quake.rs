//! Earthquake event model

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in degrees (WGS84), latitude first
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoCoord {
    pub lat: f64,
    pub lon: f64,
}

impl GeoCoord {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Build from a GeoJSON position, which is longitude first
    pub fn from_lon_lat(lon: f64, lat: f64) -> Self {
        Self { lat, lon }
    }
}

/// One recorded earthquake
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quake {
    /// Identifier, unique within a dataset
    pub id: String,

    /// Event time in epoch milliseconds
    pub time_ms: i64,

    /// Reported magnitude, if any
    pub magnitude: Option<f64>,

    /// Free-text place description, e.g. "12 km SSE of Sylhet, Bangladesh"
    pub place: String,

    /// Number of "felt" reports
    pub felt: Option<u32>,

    pub coord: GeoCoord,

    /// Hypocenter depth in km
    pub depth_km: Option<f64>,
}

impl Quake {
    /// Create a new quake with no felt reports and unknown depth
    pub fn new(
        id: impl Into<String>,
        time_ms: i64,
        magnitude: Option<f64>,
        place: impl Into<String>,
        coord: GeoCoord,
    ) -> Self {
        Self {
            id: id.into(),
            time_ms,
            magnitude,
            place: place.into(),
            felt: None,
            coord,
            depth_km: None,
        }
    }

    pub fn with_felt(mut self, felt: u32) -> Self {
        self.felt = Some(felt);
        self
    }

    pub fn with_depth(mut self, depth_km: f64) -> Self {
        self.depth_km = Some(depth_km);
        self
    }

    /// Magnitude used for coloring, sizing and filtering; missing counts as zero
    pub fn magnitude_or_zero(&self) -> f64 {
        self.magnitude.unwrap_or(0.0)
    }

    /// Event time as a UTC date-time
    pub fn datetime(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp_millis(self.time_ms).unwrap_or_default()
    }

    /// Calendar year of the event (UTC)
    pub fn year(&self) -> i32 {
        self.datetime().year()
    }

    /// First comma-delimited segment of the place name
    pub fn short_place(&self) -> &str {
        self.place.split(',').next().unwrap_or_default().trim()
    }

    /// Date formatted day-first, e.g. "07/03/2021"
    pub fn date_label(&self) -> String {
        self.datetime().format("%d/%m/%Y").to_string()
    }

    /// Felt report count, only when there is at least one report
    pub fn felt_reports(&self) -> Option<u32> {
        self.felt.filter(|&n| n > 0)
    }

    /// Magnitude label with one decimal place
    pub fn magnitude_label(&self) -> String {
        format_magnitude(self.magnitude)
    }

    /// Build the detail popup shown on the map
    pub fn popup(&self) -> QuakePopup {
        QuakePopup {
            magnitude: self.magnitude_label(),
            place: self.place.clone(),
            date: self.date_label(),
            depth: self.depth_km.map(|d| format!("Depth {:.1} km", d)),
            felt: self.felt_reports().map(felt_label),
        }
    }
}

/// Format a magnitude as "M 5.2", or "M ?" when unknown
pub fn format_magnitude(magnitude: Option<f64>) -> String {
    match magnitude {
        Some(m) => format!("M {:.1}", m),
        None => "M ?".to_string(),
    }
}

/// "Felt by N people" annotation
pub fn felt_label(count: u32) -> String {
    if count == 1 {
        "Felt by 1 person".to_string()
    } else {
        format!("Felt by {} people", count)
    }
}

/// Detail popup contents for a single quake
#[derive(Debug, Clone, PartialEq)]
pub struct QuakePopup {
    pub magnitude: String,
    pub place: String,
    pub date: String,
    pub depth: Option<String>,
    pub felt: Option<String>,
}

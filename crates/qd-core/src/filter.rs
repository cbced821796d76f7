//! Filter engine: derives the visible subset from the filter thresholds

use serde::{Deserialize, Serialize};

use crate::quake::Quake;

/// Default minimum magnitude shown on the map
pub const DEFAULT_MIN_MAGNITUDE: f64 = 2.5;

/// Year threshold meaning "no lower bound"
pub const ALL_TIME_YEAR: i32 = 1900;

/// The two slider-controlled thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterThresholds {
    pub min_magnitude: f64,
    pub min_year: i32,
}

impl Default for FilterThresholds {
    fn default() -> Self {
        Self {
            min_magnitude: DEFAULT_MIN_MAGNITUDE,
            min_year: ALL_TIME_YEAR,
        }
    }
}

impl FilterThresholds {
    pub fn new(min_magnitude: f64, min_year: i32) -> Self {
        Self {
            min_magnitude,
            min_year,
        }
    }

    /// Whether a quake passes both thresholds
    pub fn matches(&self, quake: &Quake) -> bool {
        quake.magnitude_or_zero() >= self.min_magnitude && quake.year() >= self.min_year
    }

    /// Readout next to the magnitude slider, e.g. "≥ 2.5"
    pub fn magnitude_label(&self) -> String {
        format!("≥ {:.1}", self.min_magnitude)
    }

    /// Readout next to the year slider
    pub fn year_label(&self) -> String {
        if self.min_year <= ALL_TIME_YEAR {
            "All time".to_string()
        } else {
            format!("{}+", self.min_year)
        }
    }
}

/// Quakes passing both thresholds, in dataset order
pub fn visible_subset<'a>(quakes: &'a [Quake], thresholds: &FilterThresholds) -> Vec<&'a Quake> {
    quakes.iter().filter(|q| thresholds.matches(q)).collect()
}

/// Quakes whose event year equals `year`, in dataset order
pub fn quakes_in_year(quakes: &[Quake], year: i32) -> Vec<&Quake> {
    quakes.iter().filter(|q| q.year() == year).collect()
}

//! Magnitude classification shared by the map markers and the list

use serde::{Deserialize, Serialize};

/// Smallest marker radius in pixels, regardless of magnitude
pub const MIN_MARKER_RADIUS: f32 = 6.0;

/// Marker radius growth per magnitude unit
pub const RADIUS_PER_MAGNITUDE: f32 = 3.0;

/// Four-step magnitude bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MagnitudeBand {
    /// M6 and above
    Major,
    /// M5 to M6
    Strong,
    /// M4 to M5
    Moderate,
    /// Below M4, or unknown
    Light,
}

impl MagnitudeBand {
    pub fn classify(magnitude: f64) -> Self {
        if magnitude >= 6.0 {
            MagnitudeBand::Major
        } else if magnitude >= 5.0 {
            MagnitudeBand::Strong
        } else if magnitude >= 4.0 {
            MagnitudeBand::Moderate
        } else {
            MagnitudeBand::Light
        }
    }

    /// 0 for the strongest band
    pub fn rank(self) -> u8 {
        match self {
            MagnitudeBand::Major => 0,
            MagnitudeBand::Strong => 1,
            MagnitudeBand::Moderate => 2,
            MagnitudeBand::Light => 3,
        }
    }

    /// Fill color as RGB
    pub fn rgb(self) -> [u8; 3] {
        match self {
            MagnitudeBand::Major => [0xdc, 0x26, 0x26],
            MagnitudeBand::Strong => [0xef, 0x44, 0x44],
            MagnitudeBand::Moderate => [0xf9, 0x73, 0x16],
            MagnitudeBand::Light => [0x60, 0xa5, 0xfa],
        }
    }

    /// Hex color, e.g. "#dc2626"
    pub fn hex(self) -> String {
        let [r, g, b] = self.rgb();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// CSS class used by the HTML snapshot
    pub fn css_class(self) -> &'static str {
        match self {
            MagnitudeBand::Major => "mag-6",
            MagnitudeBand::Strong => "mag-5",
            MagnitudeBand::Moderate => "mag-4",
            MagnitudeBand::Light => "mag-3",
        }
    }
}

/// Marker radius for a magnitude, never below [`MIN_MARKER_RADIUS`]
pub fn marker_radius(magnitude: f64) -> f32 {
    (magnitude as f32 * RADIUS_PER_MAGNITUDE).max(MIN_MARKER_RADIUS)
}

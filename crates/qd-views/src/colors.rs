//! Colors shared by the dashboard views

use egui::Color32;

use qd_core::{MagnitudeBand, RiskLevel};

pub const BACKGROUND: Color32 = Color32::from_rgb(0x1b, 0x26, 0x3b);
pub const BORDER: Color32 = Color32::from_rgb(0x6b, 0x8f, 0x71);
pub const GRATICULE: Color32 = Color32::from_rgba_premultiplied(0x40, 0x50, 0x60, 0x60);
pub const FAULT_LINE: Color32 = Color32::from_rgb(0xfa, 0xcc, 0x15);
pub const MARKER_OUTLINE: Color32 = Color32::WHITE;
pub const COUNT_BARS: Color32 = Color32::from_rgb(0x60, 0xa5, 0xfa);
pub const MAGNITUDE_LINE: Color32 = Color32::from_rgb(0xef, 0x44, 0x44);

/// Marker and label color for a magnitude band
pub fn band_color(band: MagnitudeBand) -> Color32 {
    let [r, g, b] = band.rgb();
    Color32::from_rgb(r, g, b)
}

/// Marker fill, slightly translucent so overlapping markers stay readable
pub fn marker_fill(band: MagnitudeBand) -> Color32 {
    let [r, g, b] = band.rgb();
    Color32::from_rgba_unmultiplied(r, g, b, 205)
}

pub fn risk_stroke(level: RiskLevel) -> Color32 {
    let [r, g, b] = level.rgb();
    Color32::from_rgb(r, g, b)
}

pub fn risk_fill(level: RiskLevel) -> Color32 {
    let [r, g, b] = level.rgb();
    let alpha = (level.fill_opacity().clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(r, g, b, alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_colors_match_core_palette() {
        assert_eq!(band_color(MagnitudeBand::Major), Color32::from_rgb(0xdc, 0x26, 0x26));
        assert_eq!(band_color(MagnitudeBand::Light), Color32::from_rgb(0x60, 0xa5, 0xfa));
    }

    #[test]
    fn test_risk_fill_is_translucent() {
        for level in [RiskLevel::High, RiskLevel::Moderate, RiskLevel::Low] {
            let fill = risk_fill(level);
            assert!(fill.a() > 0 && fill.a() < 255);
        }
    }
}

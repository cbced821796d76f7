//! Static overlay layers: seismic risk zones and fault lines
//!
//! Both layers come from fixed tables and never depend on the loaded dataset
//! or the filter thresholds. Each layer is either absent or present exactly
//! once.

use std::fmt;

use geo_types::{LineString, Polygon};

/// Which overlay layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    RiskZones,
    FaultLines,
}

impl OverlayKind {
    pub const ALL: [OverlayKind; 2] = [OverlayKind::RiskZones, OverlayKind::FaultLines];

    pub fn label(self) -> &'static str {
        match self {
            OverlayKind::RiskZones => "Seismic risk zones",
            OverlayKind::FaultLines => "Fault lines",
        }
    }
}

impl fmt::Display for OverlayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    High,
    Moderate,
    Low,
}

impl RiskLevel {
    pub fn rgb(self) -> [u8; 3] {
        match self {
            RiskLevel::High => [0xdc, 0x26, 0x26],
            RiskLevel::Moderate => [0xf5, 0x9e, 0x0b],
            RiskLevel::Low => [0x10, 0xb9, 0x81],
        }
    }

    /// Fill opacity in [0, 1]
    pub fn fill_opacity(self) -> f32 {
        match self {
            RiskLevel::High => 0.30,
            RiskLevel::Moderate => 0.22,
            RiskLevel::Low => 0.15,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::High => "High risk",
            RiskLevel::Moderate => "Moderate risk",
            RiskLevel::Low => "Low risk",
        }
    }
}

/// One shaded seismic risk polygon
#[derive(Debug, Clone, PartialEq)]
pub struct RiskZone {
    pub name: &'static str,
    pub level: RiskLevel,
    /// Convex ring; coordinates are (x = longitude, y = latitude)
    pub outline: Polygon<f64>,
}

/// One fault trace
#[derive(Debug, Clone, PartialEq)]
pub struct FaultLine {
    pub name: &'static str,
    /// Coordinates are (x = longitude, y = latitude)
    pub path: LineString<f64>,
}

// Convex (lon, lat) rings, clockwise
const RISK_ZONE_TABLE: &[(&str, RiskLevel, &[(f64, f64)])] = &[
    (
        "Sylhet–Mymensingh belt",
        RiskLevel::High,
        &[(89.8, 25.3), (92.6, 25.3), (92.6, 24.2), (91.0, 24.0), (89.8, 24.4)],
    ),
    (
        "Chittagong coastal belt",
        RiskLevel::High,
        &[(91.6, 22.2), (92.0, 23.0), (92.7, 22.8), (92.6, 21.0), (91.9, 21.2)],
    ),
    (
        "Dhaka–Comilla region",
        RiskLevel::Moderate,
        &[(89.0, 23.6), (89.5, 24.4), (91.0, 24.0), (92.0, 23.0), (91.6, 22.2), (89.8, 22.6)],
    ),
    (
        "Southwest delta",
        RiskLevel::Low,
        &[(88.6, 22.2), (88.6, 23.6), (89.6, 23.2), (90.5, 22.0), (89.0, 21.6)],
    ),
];

const FAULT_LINE_TABLE: &[(&str, &[(f64, f64)])] = &[
    ("Dauki Fault", &[(89.9, 25.2), (91.0, 25.17), (92.0, 25.1), (92.6, 25.05)]),
    ("Madhupur Blind Fault", &[(90.1, 24.9), (90.2, 24.3), (90.3, 23.8)]),
    (
        "Chittagong–Myanmar Plate Boundary",
        &[(92.3, 24.6), (92.4, 23.5), (92.2, 22.4), (91.9, 21.2)],
    ),
    ("Sylhet Fault", &[(91.4, 24.9), (91.8, 24.6), (92.2, 24.3)]),
];

/// Build the risk-zone table
pub fn risk_zones() -> Vec<RiskZone> {
    RISK_ZONE_TABLE
        .iter()
        .map(|(name, level, ring)| RiskZone {
            name,
            level: *level,
            outline: Polygon::new(LineString::from(ring.to_vec()), vec![]),
        })
        .collect()
}

/// Build the fault-line table
pub fn fault_lines() -> Vec<FaultLine> {
    FAULT_LINE_TABLE
        .iter()
        .map(|(name, path)| FaultLine {
            name,
            path: LineString::from(path.to_vec()),
        })
        .collect()
}

/// Which overlay layers are on the map
#[derive(Debug, Clone, Default)]
pub struct OverlayState {
    risk_zones: Option<Vec<RiskZone>>,
    fault_lines: Option<Vec<FaultLine>>,
}

impl OverlayState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch a layer on or off; returns whether anything changed
    ///
    /// Switching on an already present layer, or off an absent one, is a no-op.
    pub fn set(&mut self, kind: OverlayKind, enabled: bool) -> bool {
        match (kind, enabled) {
            (OverlayKind::RiskZones, true) if self.risk_zones.is_none() => {
                self.risk_zones = Some(risk_zones());
                true
            }
            (OverlayKind::RiskZones, false) => self.risk_zones.take().is_some(),
            (OverlayKind::FaultLines, true) if self.fault_lines.is_none() => {
                self.fault_lines = Some(fault_lines());
                true
            }
            (OverlayKind::FaultLines, false) => self.fault_lines.take().is_some(),
            _ => false,
        }
    }

    pub fn is_enabled(&self, kind: OverlayKind) -> bool {
        match kind {
            OverlayKind::RiskZones => self.risk_zones.is_some(),
            OverlayKind::FaultLines => self.fault_lines.is_some(),
        }
    }

    /// Remove both layers
    pub fn clear(&mut self) {
        self.risk_zones = None;
        self.fault_lines = None;
    }

    pub fn risk_zones(&self) -> Option<&[RiskZone]> {
        self.risk_zones.as_deref()
    }

    pub fn fault_lines(&self) -> Option<&[FaultLine]> {
        self.fault_lines.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_well_formed() {
        let zones = risk_zones();
        assert_eq!(zones.len(), RISK_ZONE_TABLE.len());
        for zone in &zones {
            // Polygon::new closes the ring
            assert!(zone.outline.exterior().coords().count() >= 4);
            assert!(zone.outline.exterior().is_closed());
        }
        for fault in fault_lines() {
            assert!(fault.path.coords().count() >= 2);
        }
    }

    #[test]
    fn test_risk_zone_rings_are_convex() {
        for zone in risk_zones() {
            let ring: Vec<_> = zone.outline.exterior().coords().copied().collect();
            // Drop the closing point
            let ring = &ring[..ring.len() - 1];
            let n = ring.len();
            for i in 0..n {
                let (a, b, c) = (ring[i], ring[(i + 1) % n], ring[(i + 2) % n]);
                let turn = (b.x - a.x) * (c.y - b.y) - (b.y - a.y) * (c.x - b.x);
                // Clear margin so the projected ring stays convex too
                assert!(turn < -0.1, "{} bends the wrong way at vertex {}", zone.name, (i + 1) % n);
            }
        }
    }

    #[test]
    fn test_double_toggle_on_keeps_one_layer() {
        let mut overlays = OverlayState::new();
        assert!(overlays.set(OverlayKind::FaultLines, true));
        assert!(!overlays.set(OverlayKind::FaultLines, true));
        assert_eq!(overlays.fault_lines().map(|f| f.len()), Some(FAULT_LINE_TABLE.len()));
        assert!(!overlays.is_enabled(OverlayKind::RiskZones));
    }

    #[test]
    fn test_toggle_off() {
        let mut overlays = OverlayState::new();
        assert!(!overlays.set(OverlayKind::RiskZones, false));
        overlays.set(OverlayKind::RiskZones, true);
        assert!(overlays.set(OverlayKind::RiskZones, false));
        assert!(overlays.risk_zones().is_none());
    }

    #[test]
    fn test_clear() {
        let mut overlays = OverlayState::new();
        for kind in OverlayKind::ALL {
            overlays.set(kind, true);
        }
        overlays.clear();
        assert!(OverlayKind::ALL.iter().all(|k| !overlays.is_enabled(*k)));
    }
}

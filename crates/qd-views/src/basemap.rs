//! Offline base map: a coarse national outline and a graticule

use qd_core::GeoCoord;

/// Approximate outline of Bangladesh as (lon, lat)
pub const COUNTRY_OUTLINE: &[(f64, f64)] = &[
    (88.40, 26.60),
    (89.00, 26.30),
    (89.80, 25.95),
    (90.30, 25.20),
    (91.00, 25.20),
    (92.00, 25.10),
    (92.50, 24.70),
    (92.25, 24.20),
    (91.60, 24.10),
    (91.30, 24.05),
    (91.15, 23.55),
    (91.40, 23.05),
    (91.80, 23.05),
    (92.30, 23.65),
    (92.60, 22.00),
    (92.60, 21.20),
    (92.30, 20.70),
    (91.90, 21.40),
    (91.80, 22.30),
    (91.40, 22.80),
    (90.80, 22.60),
    (90.40, 22.00),
    (89.90, 21.90),
    (89.10, 21.70),
    (88.90, 21.65),
    (89.00, 22.50),
    (88.80, 23.20),
    (88.60, 23.70),
    (88.10, 24.30),
    (88.10, 24.60),
    (88.50, 25.20),
    (88.10, 25.60),
    (88.30, 26.10),
];

pub fn country_outline() -> impl Iterator<Item = GeoCoord> {
    COUNTRY_OUTLINE.iter().map(|&(lon, lat)| GeoCoord::from_lon_lat(lon, lat))
}

/// Graticule spacing in degrees for a zoom level
pub fn graticule_step(zoom: f64) -> f64 {
    if zoom >= 9.0 {
        0.25
    } else if zoom >= 7.0 {
        1.0
    } else {
        5.0
    }
}

//! Web Mercator projection
//!
//! World coordinates are zoom-0 pixels: both axes span `[0, TILE_SIZE)`, with
//! y growing southwards. At zoom `z` one world unit covers `2^z` screen pixels.

use std::f64::consts::PI;

use crate::quake::GeoCoord;

/// Edge length of the zoom-0 world, in pixels
pub const TILE_SIZE: f64 = 256.0;

/// Latitude limit of the square Mercator world
pub const MAX_LATITUDE: f64 = 85.051_128_78;

/// Project a coordinate into world space
pub fn to_world(coord: GeoCoord) -> [f64; 2] {
    let lat = coord.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (coord.lon + 180.0) / 360.0;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0;
    [x * TILE_SIZE, y * TILE_SIZE]
}

/// Inverse of [`to_world`]
pub fn from_world(world: [f64; 2]) -> GeoCoord {
    let lon = world[0] / TILE_SIZE * 360.0 - 180.0;
    let n = PI * (1.0 - 2.0 * world[1] / TILE_SIZE);
    let lat = n.sinh().atan().to_degrees();
    GeoCoord::new(lat, lon)
}

/// Screen pixels per world unit at a zoom level
pub fn scale(zoom: f64) -> f64 {
    zoom.exp2()
}

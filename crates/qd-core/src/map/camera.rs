//! Map camera: center and zoom, with eased transitions

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::projection::{from_world, scale, to_world, MAX_LATITUDE};
use crate::quake::GeoCoord;

pub const MIN_ZOOM: f64 = 3.0;
pub const MAX_ZOOM: f64 = 14.0;

/// Initial map center, over central Bangladesh
pub const DEFAULT_CENTER: GeoCoord = GeoCoord::new(23.7, 90.4);
pub const DEFAULT_ZOOM: f64 = 7.0;

/// A map center plus Web Mercator zoom level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewpoint {
    pub center: GeoCoord,
    pub zoom: f64,
}

impl Default for Viewpoint {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl Viewpoint {
    /// Create a viewpoint; zoom is clamped to [`MIN_ZOOM`, `MAX_ZOOM`]
    pub fn new(center: GeoCoord, zoom: f64) -> Self {
        Self {
            center: GeoCoord::new(center.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE), center.lon),
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
        }
    }

    /// Screen position of a world point in a viewport of `size` pixels
    pub fn world_to_screen(&self, world: [f64; 2], size: [f64; 2]) -> [f64; 2] {
        let center = to_world(self.center);
        let s = scale(self.zoom);
        [
            (world[0] - center[0]) * s + size[0] / 2.0,
            (world[1] - center[1]) * s + size[1] / 2.0,
        ]
    }

    /// World point under a screen position
    pub fn screen_to_world(&self, screen: [f64; 2], size: [f64; 2]) -> [f64; 2] {
        let center = to_world(self.center);
        let s = scale(self.zoom);
        [
            center[0] + (screen[0] - size[0] / 2.0) / s,
            center[1] + (screen[1] - size[1] / 2.0) / s,
        ]
    }

    pub fn project(&self, coord: GeoCoord, size: [f64; 2]) -> [f64; 2] {
        self.world_to_screen(to_world(coord), size)
    }

    pub fn unproject(&self, screen: [f64; 2], size: [f64; 2]) -> GeoCoord {
        from_world(self.screen_to_world(screen, size))
    }

    fn lerp(&self, to: &Viewpoint, t: f64) -> Viewpoint {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Viewpoint {
            center: GeoCoord::new(
                mix(self.center.lat, to.center.lat),
                mix(self.center.lon, to.center.lon),
            ),
            zoom: mix(self.zoom, to.zoom),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Flight {
    from: Viewpoint,
    to: Viewpoint,
    start: Instant,
    duration: Duration,
}

impl Flight {
    fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start).as_secs_f64();
        (elapsed / self.duration.as_secs_f64()).min(1.0)
    }
}

/// Cubic ease-out
fn ease_out(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// Camera state, optionally mid-flight towards a target viewpoint
#[derive(Debug, Clone)]
pub struct Camera {
    view: Viewpoint,
    flight: Option<Flight>,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Viewpoint::default())
    }
}

impl Camera {
    pub fn new(view: Viewpoint) -> Self {
        Self { view, flight: None }
    }

    /// Viewpoint as seen at `now`
    pub fn view_at(&self, now: Instant) -> Viewpoint {
        match &self.flight {
            Some(flight) => {
                let t = flight.progress(now);
                if t >= 1.0 {
                    flight.to
                } else {
                    flight.from.lerp(&flight.to, ease_out(t))
                }
            }
            None => self.view,
        }
    }

    /// Where the camera rests once any flight has finished
    pub fn target(&self) -> Viewpoint {
        self.flight.map_or(self.view, |f| f.to)
    }

    /// Animate from the current position to `target`
    ///
    /// A flight already under way is replaced, starting from wherever it had
    /// reached.
    pub fn fly_to(&mut self, target: Viewpoint, now: Instant, duration: Duration) {
        let from = self.view_at(now);
        self.view = from;
        self.flight = Some(Flight {
            from,
            to: target,
            start: now,
            duration,
        });
    }

    /// Move immediately, cancelling any flight
    pub fn jump_to(&mut self, target: Viewpoint) {
        self.view = target;
        self.flight = None;
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.flight.map_or(false, |f| f.progress(now) < 1.0)
    }

    /// Freeze the camera at its position at `now`
    pub fn settle(&mut self, now: Instant) {
        self.view = self.view_at(now);
        self.flight = None;
    }

    /// Drag the map by a screen delta
    pub fn pan_pixels(&mut self, delta: [f64; 2], now: Instant) {
        self.settle(now);
        let mut center = to_world(self.view.center);
        let s = scale(self.view.zoom);
        center[0] -= delta[0] / s;
        center[1] -= delta[1] / s;
        self.view = Viewpoint::new(from_world(center), self.view.zoom);
    }

    /// Zoom by `delta` levels, keeping the point under `anchor` fixed
    pub fn zoom_by(&mut self, delta: f64, anchor: [f64; 2], size: [f64; 2], now: Instant) {
        self.settle(now);
        let zoom = (self.view.zoom + delta).clamp(MIN_ZOOM, MAX_ZOOM);
        if zoom == self.view.zoom {
            return;
        }

        let anchor_world = self.view.screen_to_world(anchor, size);
        let s = scale(zoom);
        let center = [
            anchor_world[0] - (anchor[0] - size[0] / 2.0) / s,
            anchor_world[1] - (anchor[1] - size[1] / 2.0) / s,
        ];
        self.view = Viewpoint::new(from_world(center), zoom);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: [f64; 2] = [800.0, 600.0];

    fn target() -> Viewpoint {
        Viewpoint::new(GeoCoord::new(24.8, 91.9), 10.0)
    }

    #[test]
    fn test_zoom_is_clamped() {
        assert_eq!(Viewpoint::new(DEFAULT_CENTER, 1.0).zoom, MIN_ZOOM);
        assert_eq!(Viewpoint::new(DEFAULT_CENTER, 20.0).zoom, MAX_ZOOM);

        let mut camera = Camera::default();
        let now = Instant::now();
        camera.zoom_by(50.0, [400.0, 300.0], SIZE, now);
        assert_eq!(camera.view_at(now).zoom, MAX_ZOOM);
    }

    #[test]
    fn test_flight_eases_to_target() {
        let start = Instant::now();
        let mut camera = Camera::default();
        camera.fly_to(target(), start, Duration::from_millis(300));

        assert_eq!(camera.view_at(start), Viewpoint::default());
        assert!(camera.is_animating(start + Duration::from_millis(100)));

        let midway = camera.view_at(start + Duration::from_millis(150));
        // Ease-out covers more than half the distance at half time
        assert!(midway.zoom > 8.5 && midway.zoom < 10.0);

        let end = start + Duration::from_millis(300);
        assert!(!camera.is_animating(end));
        assert_eq!(camera.view_at(end), target());
        assert_eq!(camera.target(), target());
    }

    #[test]
    fn test_jump_cancels_flight() {
        let start = Instant::now();
        let mut camera = Camera::default();
        camera.fly_to(target(), start, Duration::from_millis(300));
        camera.jump_to(Viewpoint::default());
        assert!(!camera.is_animating(start));
        assert_eq!(camera.view_at(start + Duration::from_millis(10)), Viewpoint::default());
    }

    #[test]
    fn test_center_projects_to_middle() {
        let view = Viewpoint::default();
        let screen = view.project(view.center, SIZE);
        assert!((screen[0] - 400.0).abs() < 1e-6 && (screen[1] - 300.0).abs() < 1e-6);
    }

    #[test]
    fn test_pan_moves_center() {
        let now = Instant::now();
        let mut camera = Camera::default();
        camera.pan_pixels([100.0, 0.0], now);
        // Dragging right reveals what lies to the west
        assert!(camera.view_at(now).center.lon < DEFAULT_CENTER.lon);
    }

    #[test]
    fn test_zoom_keeps_anchor_fixed() {
        let now = Instant::now();
        let mut camera = Camera::default();
        let anchor = [600.0, 150.0];
        let before = camera.view_at(now).unproject(anchor, SIZE);

        camera.zoom_by(1.0, anchor, SIZE, now);
        let after = camera.view_at(now).unproject(anchor, SIZE);
        assert!((before.lat - after.lat).abs() < 1e-9);
        assert!((before.lon - after.lon).abs() < 1e-9);
    }
}

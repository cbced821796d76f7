use rstar::{PointDistance, RTreeObject, AABB};

use crate::magnitude::{marker_radius, MagnitudeBand};
use crate::quake::{GeoCoord, Quake, QuakePopup};

use super::projection::to_world;

/// Handle to a marker drawn by the current render
///
/// Handles are only valid until the next render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerHandle(pub(crate) usize);

impl MarkerHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One quake as drawn on the map
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMarker {
    pub handle: MarkerHandle,
    pub quake_id: String,
    pub coord: GeoCoord,

    /// Zoom-0 world position
    pub world: [f64; 2],

    /// Radius in screen pixels
    pub radius: f32,
    pub band: MagnitudeBand,
    pub popup: QuakePopup,

    /// Hover label, e.g. "M 5.2 • 14 km SSE of Sylhet"
    pub label: String,
}

impl RenderedMarker {
    pub(crate) fn from_quake(handle: MarkerHandle, quake: &Quake) -> Self {
        let magnitude = quake.magnitude_or_zero();
        Self {
            handle,
            quake_id: quake.id.clone(),
            coord: quake.coord,
            world: to_world(quake.coord),
            radius: marker_radius(magnitude),
            band: MagnitudeBand::classify(magnitude),
            popup: quake.popup(),
            label: format!("{} • {}", quake.magnitude_label(), quake.short_place()),
        }
    }
}

/// R-tree entry pointing back at a marker
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct IndexedMarker {
    pub handle: MarkerHandle,
    pub world: [f64; 2],
}

impl RTreeObject for IndexedMarker {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.world)
    }
}

impl PointDistance for IndexedMarker {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.world[0] - point[0];
        let dy = self.world[1] - point[1];
        dx * dx + dy * dy
    }
}

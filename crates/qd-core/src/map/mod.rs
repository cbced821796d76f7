//! Map model: rendered markers, their handle table, camera and popups
//!
//! Everything here is UI-toolkit agnostic. The map view in `qd-views` asks
//! this layer what to draw and where, and feeds pointer input back in.

pub mod camera;
pub mod cluster;
pub mod markers;
pub mod projection;

use std::time::Instant;

use ahash::AHashMap;
use rstar::{PointDistance, RTree};
use tracing::debug;

use crate::quake::Quake;

pub use camera::{Camera, Viewpoint, MAX_ZOOM, MIN_ZOOM};
pub use cluster::{cluster_markers, clustering_active, Cluster};
pub use markers::{MarkerHandle, RenderedMarker};

use markers::IndexedMarker;
use projection::scale;

/// Extra pixels around a marker that still count as a hit
pub const PICK_SLACK_PX: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingPopup {
    handle: MarkerHandle,
    due: Instant,
}

/// The marker layer plus the view over it
#[derive(Debug)]
pub struct MapLayer {
    markers: Vec<RenderedMarker>,
    handles: AHashMap<String, MarkerHandle>,
    index: RTree<IndexedMarker>,
    max_radius: f32,
    camera: Camera,
    open_popup: Option<MarkerHandle>,
    pending_popup: Option<PendingPopup>,
}

impl Default for MapLayer {
    fn default() -> Self {
        Self::new(Viewpoint::default())
    }
}

impl MapLayer {
    pub fn new(view: Viewpoint) -> Self {
        Self {
            markers: Vec::new(),
            handles: AHashMap::new(),
            index: RTree::new(),
            max_radius: 0.0,
            camera: Camera::new(view),
            open_popup: None,
            pending_popup: None,
        }
    }

    /// Replace every marker with one per quake
    ///
    /// The handle table is rebuilt from scratch and popups are dropped, since
    /// handles from the previous render no longer point at anything.
    pub fn render<'a, I>(&mut self, quakes: I)
    where
        I: IntoIterator<Item = &'a Quake>,
    {
        self.markers.clear();
        self.handles.clear();
        self.open_popup = None;
        self.pending_popup = None;

        for (idx, quake) in quakes.into_iter().enumerate() {
            let handle = MarkerHandle(idx);
            self.markers.push(RenderedMarker::from_quake(handle, quake));
            self.handles.insert(quake.id.clone(), handle);
        }

        let entries: Vec<IndexedMarker> = self
            .markers
            .iter()
            .map(|m| IndexedMarker {
                handle: m.handle,
                world: m.world,
            })
            .collect();
        self.index = RTree::bulk_load(entries);
        self.max_radius = self.markers.iter().map(|m| m.radius).fold(0.0, f32::max);

        debug!("Rendered {} markers", self.markers.len());
    }

    pub fn handle_for(&self, quake_id: &str) -> Option<MarkerHandle> {
        self.handles.get(quake_id).copied()
    }

    pub fn marker(&self, handle: MarkerHandle) -> Option<&RenderedMarker> {
        self.markers.get(handle.0)
    }

    /// Markers in drawing order
    pub fn markers(&self) -> &[RenderedMarker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Identifiers in the handle table, in no particular order
    pub fn quake_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.handles.keys().map(String::as_str)
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn view_at(&self, now: Instant) -> Viewpoint {
        self.camera.view_at(now)
    }

    /// Topmost marker within reach of a screen position
    pub fn pick(&self, screen: [f64; 2], view: &Viewpoint, size: [f64; 2]) -> Option<MarkerHandle> {
        let world = view.screen_to_world(screen, size);
        let s = scale(view.zoom);
        let reach = (self.max_radius as f64 + PICK_SLACK_PX) / s;

        self.index
            .locate_within_distance(world, reach * reach)
            .filter_map(|entry| {
                let marker = self.markers.get(entry.handle.0)?;
                let distance_px = entry.distance_2(&world).sqrt() * s;
                (distance_px <= marker.radius as f64 + PICK_SLACK_PX).then_some((distance_px, entry.handle))
            })
            // Later markers are drawn on top
            .min_by(|a, b| a.0.total_cmp(&b.0).then_with(|| b.1.cmp(&a.1)))
            .map(|(_, handle)| handle)
    }

    /// Open a popup right away, replacing any open or pending one
    pub fn open_popup(&mut self, handle: MarkerHandle) -> bool {
        if self.marker(handle).is_none() {
            return false;
        }
        self.pending_popup = None;
        self.open_popup = Some(handle);
        true
    }

    pub fn close_popup(&mut self) {
        self.open_popup = None;
    }

    /// Open a popup once `due` has passed
    ///
    /// Only one popup can be pending; a later request replaces an earlier
    /// one. The open popup closes straight away.
    pub fn schedule_popup(&mut self, handle: MarkerHandle, due: Instant) -> bool {
        if self.marker(handle).is_none() {
            return false;
        }
        self.open_popup = None;
        self.pending_popup = Some(PendingPopup { handle, due });
        true
    }

    /// Drop both the open and the pending popup
    pub fn clear_popups(&mut self) {
        self.open_popup = None;
        self.pending_popup = None;
    }

    pub fn open_popup_handle(&self) -> Option<MarkerHandle> {
        self.open_popup
    }

    /// Marker whose popup is open
    pub fn popup_marker(&self) -> Option<&RenderedMarker> {
        self.open_popup.and_then(|h| self.marker(h))
    }

    pub fn pending_popup(&self) -> Option<(MarkerHandle, Instant)> {
        self.pending_popup.map(|p| (p.handle, p.due))
    }

    /// Advance time; opens a due popup and reports whether it did
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.pending_popup {
            Some(pending) if pending.due <= now => {
                self.pending_popup = None;
                self.open_popup = Some(pending.handle);
                true
            }
            _ => false,
        }
    }

    /// Whether frames must keep coming without user input
    pub fn needs_repaint(&self, now: Instant) -> bool {
        self.camera.is_animating(now) || self.pending_popup.is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::time::Duration;

    use super::*;
    use crate::quake::GeoCoord;

    const SIZE: [f64; 2] = [800.0, 600.0];

    fn quakes() -> Vec<Quake> {
        vec![
            Quake::new("sylhet", 3_000, Some(5.1), "Sylhet, Bangladesh", GeoCoord::new(24.9, 91.9)),
            Quake::new("dhaka", 2_000, Some(3.2), "Dhaka, Bangladesh", GeoCoord::new(23.7, 90.4)),
            Quake::new("ctg", 1_000, None, "Chittagong, Bangladesh", GeoCoord::new(22.3, 91.8)),
        ]
    }

    #[test]
    fn test_handle_table_matches_render() {
        let data = quakes();
        let mut map = MapLayer::default();
        map.render(&data);

        let ids: BTreeSet<&str> = map.quake_ids().collect();
        assert_eq!(ids, BTreeSet::from(["sylhet", "dhaka", "ctg"]));

        for quake in &data {
            let handle = map.handle_for(&quake.id).expect("handle");
            assert_eq!(map.marker(handle).map(|m| m.quake_id.as_str()), Some(quake.id.as_str()));
        }
    }

    #[test]
    fn test_rerender_leaves_no_stale_handles() {
        let data = quakes();
        let mut map = MapLayer::default();
        map.render(&data);
        map.render(data.iter().filter(|q| q.id == "dhaka"));

        assert_eq!(map.len(), 1);
        assert_eq!(map.quake_ids().collect::<Vec<_>>(), vec!["dhaka"]);
        assert!(map.handle_for("sylhet").is_none());

        map.render(std::iter::empty::<&Quake>());
        assert!(map.is_empty());
        assert_eq!(map.quake_ids().count(), 0);
    }

    #[test]
    fn test_marker_styling() {
        let data = quakes();
        let mut map = MapLayer::default();
        map.render(&data);

        let sylhet = map.handle_for("sylhet").and_then(|h| map.marker(h)).cloned().expect("marker");
        assert!((sylhet.radius - 15.3).abs() < 1e-4);
        assert_eq!(sylhet.label, "M 5.1 • Sylhet");

        let ctg = map.handle_for("ctg").and_then(|h| map.marker(h)).cloned().expect("marker");
        assert_eq!(ctg.radius, crate::magnitude::MIN_MARKER_RADIUS);
        assert_eq!(ctg.popup.magnitude, "M ?");
    }

    #[test]
    fn test_pick() {
        let data = quakes();
        let mut map = MapLayer::default();
        map.render(&data);

        let view = Viewpoint::new(GeoCoord::new(23.7, 90.4), 7.0);
        let dhaka = view.project(GeoCoord::new(23.7, 90.4), SIZE);
        assert_eq!(map.pick(dhaka, &view, SIZE), map.handle_for("dhaka"));

        let near = [dhaka[0] + 5.0, dhaka[1]];
        assert_eq!(map.pick(near, &view, SIZE), map.handle_for("dhaka"));

        let far = [dhaka[0] + 40.0, dhaka[1] + 40.0];
        assert_eq!(map.pick(far, &view, SIZE), None);
    }

    #[test]
    fn test_scheduled_popup_opens_when_due() {
        let data = quakes();
        let mut map = MapLayer::default();
        map.render(&data);

        let now = Instant::now();
        let handle = map.handle_for("sylhet").expect("handle");
        assert!(map.schedule_popup(handle, now + Duration::from_millis(400)));
        assert!(map.needs_repaint(now));

        assert!(!map.tick(now + Duration::from_millis(100)));
        assert_eq!(map.open_popup_handle(), None);

        assert!(map.tick(now + Duration::from_millis(400)));
        assert_eq!(map.popup_marker().map(|m| m.quake_id.as_str()), Some("sylhet"));
        assert!(!map.needs_repaint(now + Duration::from_millis(400)));
    }

    #[test]
    fn test_later_schedule_replaces_pending() {
        let data = quakes();
        let mut map = MapLayer::default();
        map.render(&data);

        let now = Instant::now();
        let first = map.handle_for("sylhet").expect("handle");
        let second = map.handle_for("ctg").expect("handle");
        map.schedule_popup(first, now + Duration::from_millis(400));
        map.schedule_popup(second, now + Duration::from_millis(500));

        assert!(!map.tick(now + Duration::from_millis(450)));
        assert!(map.tick(now + Duration::from_millis(500)));
        assert_eq!(map.open_popup_handle(), Some(second));
    }

    #[test]
    fn test_render_drops_popups() {
        let data = quakes();
        let mut map = MapLayer::default();
        map.render(&data);

        let handle = map.handle_for("dhaka").expect("handle");
        assert!(map.open_popup(handle));
        map.render(&data);
        assert_eq!(map.open_popup_handle(), None);
        assert!(!map.open_popup(MarkerHandle(99)));
    }

    #[test]
    fn test_clusters_merge_at_low_zoom() {
        let data = vec![
            Quake::new("a", 2, Some(4.2), "A", GeoCoord::new(23.40, 90.20)),
            Quake::new("b", 1, Some(6.3), "B", GeoCoord::new(23.41, 90.21)),
            Quake::new("far", 0, Some(3.0), "C", GeoCoord::new(21.0, 88.0)),
        ];
        let mut map = MapLayer::default();
        map.render(&data);

        let view = Viewpoint::new(GeoCoord::new(23.7, 90.4), 5.0);
        assert!(clustering_active(&view));
        let clusters = cluster_markers(map.markers(), &view);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].len(), 2);
        assert_eq!(clusters[0].band, crate::magnitude::MagnitudeBand::Major);
        assert!(clusters[1].is_single());

        assert!(!clustering_active(&Viewpoint::new(GeoCoord::new(23.7, 90.4), 10.0)));
    }
}

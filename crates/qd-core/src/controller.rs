//! Dashboard controller: the single owner of the session state
//!
//! The controller holds the loaded dataset, the filter thresholds, the map
//! model and the overlays, plus the stats, list and chart series derived once
//! from the full dataset. Every user action goes through one of its methods,
//! which keeps the map, cards, list and chart consistent with each other.
//!
//! Time is passed in explicitly so that camera flights and delayed popups can
//! be driven deterministically.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::chart::{centroid, YearSeries};
use crate::dataset::Dataset;
use crate::events::events::{DashboardReset, FiltersApplied, OverlayToggled, QuakeFocused, YearFocused};
use crate::events::EventBus;
use crate::filter::{quakes_in_year, visible_subset, FilterThresholds};
use crate::list::{strong_quakes, ListRow};
use crate::map::{MapLayer, MarkerHandle, Viewpoint};
use crate::overlay::{OverlayKind, OverlayState};
use crate::settings::DashboardSettings;
use crate::stats::StatsSummary;

pub struct DashboardController {
    dataset: Dataset,
    settings: DashboardSettings,
    bus: Arc<EventBus>,

    thresholds: FilterThresholds,
    stats: StatsSummary,
    strong_quakes: Vec<ListRow>,
    year_series: YearSeries,

    map: MapLayer,
    overlays: OverlayState,
    focused_year: Option<i32>,
}

impl DashboardController {
    /// Build the dashboard for a freshly loaded dataset
    ///
    /// Stats, list and chart series are computed here and never again; the
    /// map starts out showing the default visible subset.
    pub fn new(dataset: Dataset, settings: DashboardSettings, bus: Arc<EventBus>) -> Self {
        let stats = StatsSummary::compute(dataset.quakes());
        let strong = strong_quakes(
            dataset.quakes(),
            settings.strong_quake_threshold,
            settings.strong_quake_limit,
        );
        let year_series = YearSeries::from_quakes(dataset.quakes());

        let mut controller = Self {
            thresholds: settings.default_thresholds,
            map: MapLayer::new(settings.initial_view),
            dataset,
            settings,
            bus,
            stats,
            strong_quakes: strong,
            year_series,
            overlays: OverlayState::new(),
            focused_year: None,
        };
        controller.apply_filters();

        info!(
            "Dashboard ready: {} quakes, {} strong, {} years",
            controller.dataset.len(),
            controller.strong_quakes.len(),
            controller.year_series.buckets().len()
        );
        controller
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    pub fn thresholds(&self) -> FilterThresholds {
        self.thresholds
    }

    pub fn stats(&self) -> &StatsSummary {
        &self.stats
    }

    pub fn strong_quakes(&self) -> &[ListRow] {
        &self.strong_quakes
    }

    pub fn year_series(&self) -> &YearSeries {
        &self.year_series
    }

    pub fn map(&self) -> &MapLayer {
        &self.map
    }

    /// Mutable map access for direct manipulation (pan, zoom, popup clicks)
    pub fn map_mut(&mut self) -> &mut MapLayer {
        &mut self.map
    }

    pub fn overlays(&self) -> &OverlayState {
        &self.overlays
    }

    /// Year the map is currently restricted to, if a year was focused
    pub fn focused_year(&self) -> Option<i32> {
        self.focused_year
    }

    /// Number of markers on the map
    pub fn visible_count(&self) -> usize {
        self.map.len()
    }

    pub fn set_min_magnitude(&mut self, min_magnitude: f64) {
        self.thresholds.min_magnitude = min_magnitude;
        self.apply_filters();
    }

    pub fn set_min_year(&mut self, min_year: i32) {
        self.thresholds.min_year = min_year;
        self.apply_filters();
    }

    pub fn set_thresholds(&mut self, thresholds: FilterThresholds) {
        self.thresholds = thresholds;
        self.apply_filters();
    }

    /// Redraw the map from the current thresholds
    pub fn apply_filters(&mut self) {
        let visible = visible_subset(self.dataset.quakes(), &self.thresholds);
        let visible_count = visible.len();
        self.map.render(visible);
        self.focused_year = None;

        debug!(
            "Filter {} {} -> {} of {} quakes",
            self.thresholds.magnitude_label(),
            self.thresholds.year_label(),
            visible_count,
            self.dataset.len()
        );
        self.bus.publish(FiltersApplied {
            thresholds: self.thresholds,
            visible_count,
        });
    }

    /// Fly to a quake on the map and open its popup after the flight
    ///
    /// Returns `false` and leaves everything untouched when the quake has no
    /// marker, either because the id is unknown or because it is filtered out.
    pub fn focus_on_quake(&mut self, quake_id: &str, now: Instant) -> bool {
        let Some(handle) = self.map.handle_for(quake_id) else {
            warn!("No marker for quake {}, ignoring focus request", quake_id);
            return false;
        };
        let Some(marker) = self.map.marker(handle) else {
            return false;
        };
        let coord = marker.coord;
        let label = marker.label.clone();

        let target = Viewpoint::new(coord, self.settings.focus_zoom);
        self.map
            .camera_mut()
            .fly_to(target, now, self.settings.camera_animation());
        self.map.schedule_popup(handle, now + self.settings.popup_delay());

        info!("Focusing quake {} ({})", quake_id, label);
        self.bus.publish(QuakeFocused {
            quake_id: quake_id.to_string(),
            label,
        });
        true
    }

    /// Show only the given year's quakes and fly to their centroid
    ///
    /// Year focus draws every quake of that year regardless of the slider
    /// thresholds. Returns `false` when the dataset has no quake in `year`.
    pub fn focus_on_year(&mut self, year: i32, now: Instant) -> bool {
        let quakes = quakes_in_year(self.dataset.quakes(), year);
        let Some(center) = centroid(quakes.iter().copied()) else {
            warn!("No quakes recorded in {}, ignoring focus request", year);
            return false;
        };
        let quake_count = quakes.len();

        self.map.render(quakes);
        self.focused_year = Some(year);

        let target = Viewpoint::new(center, self.settings.year_zoom);
        self.map
            .camera_mut()
            .fly_to(target, now, self.settings.camera_animation());

        info!("Focusing year {} ({} quakes)", year, quake_count);
        self.bus.publish(YearFocused { year, quake_count });
        true
    }

    /// Open the popup of a clicked marker
    pub fn select_marker(&mut self, handle: MarkerHandle) -> bool {
        self.map.open_popup(handle)
    }

    /// Switch an overlay layer; returns whether anything changed
    pub fn set_overlay(&mut self, kind: OverlayKind, enabled: bool) -> bool {
        let changed = self.overlays.set(kind, enabled);
        if changed {
            debug!("{} {}", kind, if enabled { "on" } else { "off" });
            self.bus.publish(OverlayToggled { kind, enabled });
        }
        changed
    }

    /// Restore thresholds, view and overlays to their initial state
    pub fn reset(&mut self) {
        self.thresholds = self.settings.default_thresholds;
        self.overlays.clear();
        self.apply_filters();
        self.map.clear_popups();
        self.map.camera_mut().jump_to(self.settings.initial_view);

        info!("Dashboard reset");
        self.bus.publish(DashboardReset);
    }

    /// Advance scheduled work; returns whether a popup opened
    pub fn tick(&mut self, now: Instant) -> bool {
        self.map.tick(now)
    }

    pub fn needs_repaint(&self, now: Instant) -> bool {
        self.map.needs_repaint(now)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::time::Duration;

    use parking_lot::Mutex;

    use super::*;
    use crate::events::{handler_from_fn, Event};
    use crate::quake::{GeoCoord, Quake};

    const Y2010: i64 = 1_262_304_000_000; // 2010-01-01T00:00:00Z
    const Y2020: i64 = 1_577_836_800_000; // 2020-01-01T00:00:00Z
    const DAY: i64 = 86_400_000;

    fn dataset() -> Dataset {
        Dataset::new(vec![
            Quake::new("old-weak", Y2010 + DAY, Some(3.0), "Dhaka, BD", GeoCoord::new(23.7, 90.4)),
            Quake::new("old-strong", Y2010 + 2 * DAY, Some(5.8), "Sylhet, BD", GeoCoord::new(24.9, 91.9)),
            Quake::new("new-mid", Y2020 + DAY, Some(4.6), "Chittagong, BD", GeoCoord::new(22.3, 91.8)),
            Quake::new("new-none", Y2020 + 2 * DAY, None, "Bay of Bengal", GeoCoord::new(21.0, 90.0)),
            Quake::new("new-major", Y2020 + 3 * DAY, Some(6.2), "Myanmar border", GeoCoord::new(22.0, 92.5)),
        ])
    }

    fn controller() -> DashboardController {
        DashboardController::new(dataset(), DashboardSettings::default(), Arc::new(EventBus::new()))
    }

    fn marker_ids(controller: &DashboardController) -> BTreeSet<String> {
        controller.map().quake_ids().map(str::to_string).collect()
    }

    fn expected_ids(controller: &DashboardController) -> BTreeSet<String> {
        visible_subset(controller.dataset().quakes(), &controller.thresholds())
            .into_iter()
            .map(|q| q.id.clone())
            .collect()
    }

    #[test]
    fn test_markers_match_visible_subset() {
        let mut controller = controller();
        assert_eq!(controller.visible_count(), 4);
        assert_eq!(marker_ids(&controller), expected_ids(&controller));

        for (magnitude, year) in [(4.5, 1900), (0.0, 2015), (6.0, 2020), (9.0, 1900)] {
            controller.set_thresholds(FilterThresholds::new(magnitude, year));
            assert_eq!(marker_ids(&controller), expected_ids(&controller));
        }
        assert_eq!(controller.visible_count(), 0);
    }

    #[test]
    fn test_derived_panels_ignore_filters() {
        let mut controller = controller();
        let stats = controller.stats().clone();
        let list = controller.strong_quakes().to_vec();
        let series = controller.year_series().clone();

        controller.set_min_magnitude(7.0);
        controller.set_min_year(2021);

        assert_eq!(controller.stats(), &stats);
        assert_eq!(controller.strong_quakes(), list.as_slice());
        assert_eq!(controller.year_series(), &series);
        assert_eq!(stats.total, 5);
    }

    #[test]
    fn test_focus_known_quake() {
        let mut controller = controller();
        let settings = controller.settings().clone();
        let now = Instant::now();

        assert!(controller.focus_on_quake("old-strong", now));
        let target = controller.map().camera().target();
        assert_eq!(target.center, GeoCoord::new(24.9, 91.9));
        assert_eq!(target.zoom, settings.focus_zoom);
        assert!(controller.needs_repaint(now));

        // Popup waits for the flight to land
        let landed = now + settings.camera_animation();
        assert!(!controller.tick(landed));
        assert!(controller.tick(now + settings.popup_delay()));
        let open = controller.map().popup_marker().map(|m| m.quake_id.clone());
        assert_eq!(open.as_deref(), Some("old-strong"));
    }

    #[test]
    fn test_focus_unknown_or_hidden_quake_is_noop() {
        let mut controller = controller();
        let now = Instant::now();
        let before = controller.map().camera().target();

        assert!(!controller.focus_on_quake("does-not-exist", now));
        // Filtered out by the default 2.5 threshold
        assert!(!controller.focus_on_quake("new-none", now));

        assert_eq!(controller.map().camera().target(), before);
        assert!(controller.map().pending_popup().is_none());
    }

    #[test]
    fn test_latest_focus_wins() {
        let mut controller = controller();
        let settings = controller.settings().clone();
        let now = Instant::now();

        controller.focus_on_quake("old-strong", now);
        let later = now + Duration::from_millis(100);
        controller.focus_on_quake("new-mid", later);

        assert!(!controller.tick(now + settings.popup_delay()));
        assert!(controller.tick(later + settings.popup_delay()));
        let open = controller.map().popup_marker().map(|m| m.quake_id.clone());
        assert_eq!(open.as_deref(), Some("new-mid"));
        assert_eq!(controller.map().camera().target().center, GeoCoord::new(22.3, 91.8));
    }

    #[test]
    fn test_focus_on_year() {
        let mut controller = controller();
        let now = Instant::now();

        assert!(controller.focus_on_year(2010, now));
        assert_eq!(controller.focused_year(), Some(2010));
        assert_eq!(
            marker_ids(&controller),
            BTreeSet::from(["old-weak".to_string(), "old-strong".to_string()])
        );
        let target = controller.map().camera().target();
        assert!((target.center.lat - 24.3).abs() < 1e-9);
        assert!((target.center.lon - 91.15).abs() < 1e-9);
        assert_eq!(target.zoom, controller.settings().year_zoom);

        assert!(!controller.focus_on_year(1999, now));
        assert_eq!(controller.focused_year(), Some(2010));

        controller.apply_filters();
        assert_eq!(controller.focused_year(), None);
    }

    #[test]
    fn test_year_focus_includes_quakes_below_threshold() {
        let mut controller = controller();
        controller.focus_on_year(2020, Instant::now());
        assert!(controller.map().handle_for("new-none").is_some());
        assert_eq!(controller.visible_count(), 3);
    }

    #[test]
    fn test_reset() {
        let mut controller = controller();
        let settings = controller.settings().clone();
        let now = Instant::now();

        controller.set_thresholds(FilterThresholds::new(5.0, 2015));
        controller.set_overlay(OverlayKind::RiskZones, true);
        controller.set_overlay(OverlayKind::FaultLines, true);
        controller.focus_on_quake("new-major", now);

        controller.reset();

        assert_eq!(controller.thresholds(), settings.default_thresholds);
        assert_eq!(marker_ids(&controller), expected_ids(&controller));
        assert!(OverlayKind::ALL.iter().all(|k| !controller.overlays().is_enabled(*k)));
        assert!(controller.map().pending_popup().is_none());
        assert!(controller.map().open_popup_handle().is_none());
        assert_eq!(controller.map().view_at(now), settings.initial_view);
        assert!(!controller.needs_repaint(now));
    }

    #[test]
    fn test_overlay_toggle_publishes_changes_only() {
        let bus = Arc::new(EventBus::new());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        bus.subscribe::<OverlayToggled>(handler_from_fn(move |event: &dyn Event| {
            sink.lock().push(event.describe());
        }));

        let mut controller = DashboardController::new(dataset(), DashboardSettings::default(), bus);
        assert!(controller.set_overlay(OverlayKind::FaultLines, true));
        assert!(!controller.set_overlay(OverlayKind::FaultLines, true));
        assert!(controller.set_overlay(OverlayKind::FaultLines, false));

        assert_eq!(seen.lock().len(), 2);
    }

    #[test]
    fn test_two_event_scenario() {
        let dataset = Dataset::new(vec![
            Quake::new("a", 1_000, Some(5.2), "A, BD", GeoCoord::new(23.0, 90.0)),
            Quake::new("b", 2_000, Some(6.1), "B, BD", GeoCoord::new(24.0, 91.0)),
        ]);
        let mut controller =
            DashboardController::new(dataset, DashboardSettings::default(), Arc::new(EventBus::new()));

        assert_eq!(controller.stats().total, 2);
        let [_, strongest, latest] = controller.stats().cards();
        assert_eq!(strongest.quake_id.as_deref(), Some("b"));
        assert_eq!(latest.quake_id.as_deref(), Some("b"));

        let list: Vec<&str> = controller.strong_quakes().iter().map(|r| r.quake_id.as_str()).collect();
        assert_eq!(list, vec!["b", "a"]);

        controller.set_min_magnitude(6.0);
        assert_eq!(marker_ids(&controller), BTreeSet::from(["b".to_string()]));
    }

    #[test]
    fn test_empty_dataset() {
        let mut controller =
            DashboardController::new(Dataset::default(), DashboardSettings::default(), Arc::new(EventBus::new()));
        assert_eq!(controller.visible_count(), 0);
        assert!(controller.year_series().is_empty());
        assert!(!controller.focus_on_year(2020, Instant::now()));
        controller.reset();
    }
}

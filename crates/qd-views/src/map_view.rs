//! Interactive quake map drawn with the egui painter

use std::time::Instant;

use egui::{pos2, vec2, Align2, Color32, FontId, Painter, Pos2, Rect, Response, RichText, Sense, Shape, Stroke, Ui};

use qd_core::map::cluster::{cluster_markers, clustering_active, Cluster};
use qd_core::map::projection::from_world;
use qd_core::map::Camera;
use qd_core::{DashboardController, GeoCoord, MagnitudeBand, OverlayState, RenderedMarker, Viewpoint};

use crate::basemap::{country_outline, graticule_step};
use crate::colors;
use crate::{SpaceView, SpaceViewId, ViewerContext};

/// Scroll distance, in points, that zooms by one level
const SCROLL_POINTS_PER_ZOOM: f64 = 150.0;

/// Zoom levels gained when clicking a cluster
const CLUSTER_ZOOM_STEP: f64 = 2.0;

const LEGEND: [(MagnitudeBand, &str); 4] = [
    (MagnitudeBand::Major, "M6+"),
    (MagnitudeBand::Strong, "M5–6"),
    (MagnitudeBand::Moderate, "M4–5"),
    (MagnitudeBand::Light, "<M4"),
];

/// Maps geographic and world coordinates into the map's screen rect
struct Projector {
    view: Viewpoint,
    rect: Rect,
    size: [f64; 2],
}

impl Projector {
    fn new(view: Viewpoint, rect: Rect) -> Self {
        Self {
            view,
            rect,
            size: [rect.width() as f64, rect.height() as f64],
        }
    }

    fn geo(&self, coord: GeoCoord) -> Pos2 {
        self.screen(self.view.project(coord, self.size))
    }

    fn world(&self, world: [f64; 2]) -> Pos2 {
        self.screen(self.view.world_to_screen(world, self.size))
    }

    fn screen(&self, p: [f64; 2]) -> Pos2 {
        pos2(self.rect.min.x + p[0] as f32, self.rect.min.y + p[1] as f32)
    }

    fn local(&self, pos: Pos2) -> [f64; 2] {
        [(pos.x - self.rect.min.x) as f64, (pos.y - self.rect.min.y) as f64]
    }
}

/// What lies under the pointer
enum Hit<'a> {
    Marker(&'a RenderedMarker),
    Cluster(&'a Cluster),
}

pub struct QuakeMapView {
    title: String,
}

impl Default for QuakeMapView {
    fn default() -> Self {
        Self::new()
    }
}

impl QuakeMapView {
    pub fn new() -> Self {
        Self {
            title: "Map".to_string(),
        }
    }

    fn map_ui(&mut self, dashboard: &mut DashboardController, ui: &mut Ui) {
        let now = Instant::now();
        dashboard.tick(now);

        self.toolbar(dashboard, ui, now);

        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        handle_navigation(dashboard.map_mut().camera_mut(), ui, &response, now);

        let projector = Projector::new(dashboard.map().view_at(now), response.rect);
        let clusters = clustering_active(&projector.view)
            .then(|| cluster_markers(dashboard.map().markers(), &projector.view));

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                handle_click(dashboard, &projector, clusters.as_deref(), pos, now);
            }
        }

        painter.rect_filled(response.rect, 0.0, colors::BACKGROUND);
        draw_graticule(&painter, &projector);
        draw_country(&painter, &projector);
        draw_overlays(&painter, &projector, dashboard.overlays());

        match &clusters {
            Some(clusters) => draw_clusters(&painter, &projector, dashboard.map().markers(), clusters),
            None => {
                for marker in dashboard.map().markers() {
                    draw_marker(&painter, &projector, marker);
                }
            }
        }

        if let Some(pos) = response.hover_pos() {
            let hit = hit_test(dashboard, &projector, clusters.as_deref(), pos);
            show_hover(ui, hit);
        }

        show_popup(dashboard, ui, &projector);

        if dashboard.needs_repaint(now) {
            ui.ctx().request_repaint();
        }
    }

    fn toolbar(&self, dashboard: &mut DashboardController, ui: &mut Ui, now: Instant) {
        let view = dashboard.map().view_at(now);
        let home = dashboard.settings().initial_view;
        let animation = dashboard.settings().camera_animation();

        ui.horizontal(|ui| {
            let camera = dashboard.map_mut().camera_mut();
            if ui.button("➖").on_hover_text("Zoom out").clicked() {
                zoom_about_center(camera, -1.0, now);
            }
            if ui.button("➕").on_hover_text("Zoom in").clicked() {
                zoom_about_center(camera, 1.0, now);
            }
            if ui.button("🏠").on_hover_text("Back to the initial view").clicked() {
                camera.fly_to(home, now, animation);
            }
            ui.label(RichText::new(format!("Zoom {:.1}", view.zoom)).weak());

            ui.separator();
            ui.label(format!("{} on map", dashboard.visible_count()));
            if let Some(year) = dashboard.focused_year() {
                ui.label(RichText::new(format!("Year {}", year)).strong());
                if ui.small_button("Back to filters").clicked() {
                    dashboard.apply_filters();
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                for (band, label) in LEGEND.iter().rev() {
                    ui.label(RichText::new(*label).small());
                    ui.colored_label(colors::band_color(*band), "●");
                }
            });
        });
    }
}

impl SpaceView for QuakeMapView {
    fn id(&self) -> SpaceViewId {
        SpaceViewId::Map
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) {
        ctx.with_dashboard(ui, |dashboard, ui| self.map_ui(dashboard, ui));
    }
}

fn zoom_about_center(camera: &mut Camera, delta: f64, now: Instant) {
    // A zero-sized viewport puts the anchor at the center
    camera.zoom_by(delta, [0.0, 0.0], [0.0, 0.0], now);
}

fn handle_navigation(camera: &mut Camera, ui: &Ui, response: &Response, now: Instant) {
    let rect = response.rect;

    if response.dragged() {
        let delta = response.drag_delta();
        if delta != egui::Vec2::ZERO {
            camera.pan_pixels([delta.x as f64, delta.y as f64], now);
        }
    }

    if response.hovered() {
        let scroll = ui.input(|i| i.scroll_delta.y);
        if scroll != 0.0 {
            let anchor = response
                .hover_pos()
                .map(|p| [(p.x - rect.min.x) as f64, (p.y - rect.min.y) as f64])
                .unwrap_or([rect.width() as f64 / 2.0, rect.height() as f64 / 2.0]);
            let size = [rect.width() as f64, rect.height() as f64];
            camera.zoom_by(scroll as f64 / SCROLL_POINTS_PER_ZOOM, anchor, size, now);
        }
    }
}

fn cluster_radius(cluster: &Cluster) -> f32 {
    12.0 + 4.0 * (cluster.len() as f32).ln()
}

fn hit_test<'a>(
    dashboard: &'a DashboardController,
    projector: &Projector,
    clusters: Option<&'a [Cluster]>,
    pos: Pos2,
) -> Option<Hit<'a>> {
    if let Some(clusters) = clusters {
        let hit = clusters
            .iter()
            .filter(|c| !c.is_single())
            .find(|c| projector.world(c.world).distance(pos) <= cluster_radius(c));
        if let Some(cluster) = hit {
            return Some(Hit::Cluster(cluster));
        }
    }

    let map = dashboard.map();
    let handle = map.pick(projector.local(pos), &projector.view, projector.size)?;
    let marker = map.marker(handle)?;

    // Markers folded into a cluster are not on screen
    let folded = clusters.map_or(false, |clusters| {
        clusters.iter().any(|c| !c.is_single() && c.members.contains(&handle))
    });
    (!folded).then_some(Hit::Marker(marker))
}

fn handle_click(
    dashboard: &mut DashboardController,
    projector: &Projector,
    clusters: Option<&[Cluster]>,
    pos: Pos2,
    now: Instant,
) {
    enum Action {
        ZoomInto(GeoCoord),
        Open(qd_core::MarkerHandle),
        Close,
    }

    let action = match hit_test(dashboard, projector, clusters, pos) {
        Some(Hit::Cluster(cluster)) => Action::ZoomInto(from_world(cluster.world)),
        Some(Hit::Marker(marker)) => Action::Open(marker.handle),
        None => Action::Close,
    };

    match action {
        Action::ZoomInto(center) => {
            let animation = dashboard.settings().camera_animation();
            let target = Viewpoint::new(center, projector.view.zoom + CLUSTER_ZOOM_STEP);
            dashboard.map_mut().camera_mut().fly_to(target, now, animation);
        }
        Action::Open(handle) => {
            dashboard.select_marker(handle);
        }
        Action::Close => dashboard.map_mut().close_popup(),
    }
}

fn draw_graticule(painter: &Painter, projector: &Projector) {
    let rect = projector.rect;
    let step = graticule_step(projector.view.zoom);
    let north_west = projector.view.unproject([0.0, 0.0], projector.size);
    let south_east = projector.view.unproject(projector.size, projector.size);

    let stroke = Stroke::new(1.0, colors::GRATICULE);
    let font = FontId::monospace(10.0);

    let mut lon = (north_west.lon / step).ceil() * step;
    while lon <= south_east.lon {
        let x = projector.geo(GeoCoord::new(projector.view.center.lat, lon)).x;
        painter.line_segment([pos2(x, rect.top()), pos2(x, rect.bottom())], stroke);
        painter.text(
            pos2(x + 2.0, rect.bottom() - 2.0),
            Align2::LEFT_BOTTOM,
            format!("{}°E", lon),
            font.clone(),
            colors::GRATICULE,
        );
        lon += step;
    }

    let mut lat = (south_east.lat / step).ceil() * step;
    while lat <= north_west.lat {
        let y = projector.geo(GeoCoord::new(lat, projector.view.center.lon)).y;
        painter.line_segment([pos2(rect.left(), y), pos2(rect.right(), y)], stroke);
        painter.text(
            pos2(rect.left() + 2.0, y - 2.0),
            Align2::LEFT_BOTTOM,
            format!("{}°N", lat),
            font.clone(),
            colors::GRATICULE,
        );
        lat += step;
    }
}

fn draw_country(painter: &Painter, projector: &Projector) {
    let points: Vec<Pos2> = country_outline().map(|c| projector.geo(c)).collect();
    painter.add(Shape::closed_line(points, Stroke::new(1.5, colors::BORDER)));
}

fn draw_overlays(painter: &Painter, projector: &Projector, overlays: &OverlayState) {
    if let Some(zones) = overlays.risk_zones() {
        for zone in zones {
            let points: Vec<Pos2> = zone
                .outline
                .exterior()
                .coords()
                .map(|c| projector.geo(GeoCoord::from_lon_lat(c.x, c.y)))
                .collect();
            let label_pos = centroid(&points);
            painter.add(Shape::convex_polygon(
                points,
                colors::risk_fill(zone.level),
                Stroke::new(1.0, colors::risk_stroke(zone.level)),
            ));
            if let Some(pos) = label_pos {
                painter.text(
                    pos,
                    Align2::CENTER_CENTER,
                    format!("{}\n{}", zone.name, zone.level.label()),
                    FontId::proportional(11.0),
                    Color32::WHITE,
                );
            }
        }
    }

    if let Some(faults) = overlays.fault_lines() {
        for fault in faults {
            let points: Vec<Pos2> = fault
                .path
                .coords()
                .map(|c| projector.geo(GeoCoord::from_lon_lat(c.x, c.y)))
                .collect();
            painter.extend(Shape::dashed_line(&points, Stroke::new(2.5, colors::FAULT_LINE), 8.0, 4.0));
            if let Some(mid) = points.get(points.len() / 2) {
                painter.text(
                    *mid + vec2(6.0, 0.0),
                    Align2::LEFT_CENTER,
                    fault.name,
                    FontId::proportional(11.0),
                    colors::FAULT_LINE,
                );
            }
        }
    }
}

fn centroid(points: &[Pos2]) -> Option<Pos2> {
    if points.is_empty() {
        return None;
    }
    let sum = points.iter().fold(vec2(0.0, 0.0), |acc, p| acc + p.to_vec2());
    Some((sum / points.len() as f32).to_pos2())
}

fn draw_marker(painter: &Painter, projector: &Projector, marker: &RenderedMarker) {
    let center = projector.geo(marker.coord);
    if !projector.rect.expand(marker.radius).contains(center) {
        return;
    }
    painter.circle(
        center,
        marker.radius,
        colors::marker_fill(marker.band),
        Stroke::new(1.0, colors::MARKER_OUTLINE),
    );
}

fn draw_clusters(painter: &Painter, projector: &Projector, markers: &[RenderedMarker], clusters: &[Cluster]) {
    for cluster in clusters {
        if cluster.is_single() {
            if let Some(marker) = markers.get(cluster.members[0].index()) {
                draw_marker(painter, projector, marker);
            }
            continue;
        }

        let center = projector.world(cluster.world);
        let radius = cluster_radius(cluster);
        if !projector.rect.expand(radius).contains(center) {
            continue;
        }
        painter.circle(
            center,
            radius,
            colors::marker_fill(cluster.band),
            Stroke::new(2.0, colors::MARKER_OUTLINE),
        );
        painter.text(
            center,
            Align2::CENTER_CENTER,
            cluster.len().to_string(),
            FontId::proportional(12.0),
            Color32::WHITE,
        );
    }
}

fn show_hover(ui: &Ui, hit: Option<Hit<'_>>) {
    let text = match hit {
        Some(Hit::Marker(marker)) => marker.label.clone(),
        Some(Hit::Cluster(cluster)) => format!("{} earthquakes, click to zoom in", cluster.len()),
        None => return,
    };
    egui::show_tooltip_at_pointer(ui.ctx(), egui::Id::new("quake_map_hover"), |ui| {
        ui.label(text);
    });
}

fn show_popup(dashboard: &mut DashboardController, ui: &Ui, projector: &Projector) {
    let Some(marker) = dashboard.map().popup_marker() else {
        return;
    };
    let anchor = projector.geo(marker.coord);
    if !projector.rect.contains(anchor) {
        return;
    }
    let popup = marker.popup.clone();
    let band = marker.band;
    let radius = marker.radius;

    let mut close = false;
    egui::Area::new(egui::Id::new("quake_map_popup"))
        .order(egui::Order::Foreground)
        .pivot(Align2::CENTER_BOTTOM)
        .fixed_pos(anchor - vec2(0.0, radius + 4.0))
        .show(ui.ctx(), |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_max_width(240.0);
                ui.horizontal(|ui| {
                    ui.label(RichText::new(&popup.magnitude).strong().size(16.0).color(colors::band_color(band)));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        close = ui.small_button("✕").clicked();
                    });
                });
                ui.label(popup.place.as_str());
                ui.label(RichText::new(&popup.date).weak());
                if let Some(depth) = &popup.depth {
                    ui.label(RichText::new(depth.as_str()).weak());
                }
                if let Some(felt) = &popup.felt {
                    ui.label(felt.as_str());
                }
            });
        });

    if close {
        dashboard.map_mut().close_popup();
    }
}

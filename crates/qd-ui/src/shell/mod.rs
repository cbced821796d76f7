use std::sync::Arc;

use egui::{Context, RichText, TopBottomPanel};
use parking_lot::Mutex;

use qd_core::events::events::{
    DashboardReset, DatasetLoaded, FiltersApplied, OverlayToggled, QuakeFocused, YearFocused,
};
use qd_core::{handler_from_fn, Event, EventBus};
use qd_views::LoadState;

use crate::theme;

/// Something picked from the menu bar, handled by the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    ExportSnapshot,
    ResetDashboard,
    ResetLayout,
    Quit,
}

/// Last dashboard event, as shown in the status bar
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    last: Arc<Mutex<Option<String>>>,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to every event the dashboard publishes
    pub fn attach(&self, bus: &EventBus) {
        bus.subscribe::<DatasetLoaded>(self.recorder());
        bus.subscribe::<FiltersApplied>(self.recorder());
        bus.subscribe::<QuakeFocused>(self.recorder());
        bus.subscribe::<YearFocused>(self.recorder());
        bus.subscribe::<OverlayToggled>(self.recorder());
        bus.subscribe::<DashboardReset>(self.recorder());
    }

    pub fn text(&self) -> Option<String> {
        self.last.lock().clone()
    }

    fn recorder(&self) -> Box<dyn qd_core::EventHandler> {
        let last = Arc::clone(&self.last);
        handler_from_fn(move |event: &dyn Event| {
            *last.lock() = Some(event.describe());
        })
    }
}

/// Render the menu bar
pub fn menu_bar(ctx: &Context, dashboard_loaded: bool) -> Option<MenuAction> {
    let mut action = None;

    TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui
                    .add_enabled(dashboard_loaded, egui::Button::new("Export snapshot…"))
                    .clicked()
                {
                    action = Some(MenuAction::ExportSnapshot);
                    ui.close_menu();
                }

                ui.separator();

                if ui.button("Quit").clicked() {
                    action = Some(MenuAction::Quit);
                    ui.close_menu();
                }
            });

            ui.menu_button("View", |ui| {
                if ui
                    .add_enabled(dashboard_loaded, egui::Button::new("Reset dashboard"))
                    .clicked()
                {
                    action = Some(MenuAction::ResetDashboard);
                    ui.close_menu();
                }

                if ui.button("Reset layout").clicked() {
                    action = Some(MenuAction::ResetLayout);
                    ui.close_menu();
                }
            });
        });
    });

    action
}

/// Render the status bar: load state on the left, last event on the right
pub fn status_bar(ctx: &Context, load_state: &LoadState, status: &StatusLine) {
    TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            match load_state {
                LoadState::Loading => {
                    ui.spinner();
                    ui.label("Loading earthquakes…");
                }
                LoadState::Loaded => {
                    ui.label(RichText::new("Ready").weak());
                }
                LoadState::Failed(message) => {
                    ui.label(RichText::new(format!("⚠ {}", message)).color(theme::error_color()));
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if let Some(text) = status.text() {
                    ui.label(RichText::new(text).weak());
                }
            });
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use qd_core::OverlayKind;

    #[test]
    fn test_status_line_tracks_latest_event() {
        let bus = EventBus::new();
        let status = StatusLine::new();
        assert_eq!(status.text(), None);

        status.attach(&bus);
        bus.publish(OverlayToggled {
            kind: OverlayKind::FaultLines,
            enabled: true,
        });
        let first = status.text().expect("status after overlay toggle");

        bus.publish(DashboardReset);
        let second = status.text().expect("status after reset");
        assert_ne!(first, second);
        assert_eq!(second, DashboardReset.describe());
    }

    #[test]
    fn test_status_line_clones_share_state() {
        let bus = EventBus::new();
        let status = StatusLine::new();
        let shown = status.clone();
        status.attach(&bus);

        bus.publish(YearFocused {
            year: 2021,
            quake_count: 3,
        });
        assert_eq!(shown.text(), Some(YearFocused { year: 2021, quake_count: 3 }.describe()));
    }
}

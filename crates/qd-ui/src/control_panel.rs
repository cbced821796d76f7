//! Filter sliders, overlay toggles and the reset button

use egui::{RichText, Slider, Ui};

use qd_core::filter::ALL_TIME_YEAR;
use qd_core::{DashboardController, FilterThresholds, OverlayKind};

/// Magnitude slider step
const MAGNITUDE_STEP: f64 = 0.1;

/// Left-hand control panel
#[derive(Debug, Default)]
pub struct ControlPanel {
    /// Slider positions; synced from the dashboard every frame so a reset
    /// or a year focus elsewhere moves them too
    thresholds: FilterThresholds,
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ui(&mut self, ui: &mut Ui, dashboard: &mut DashboardController) {
        self.thresholds = dashboard.thresholds();
        let settings = dashboard.settings();
        let (mag_lo, mag_hi) = settings.magnitude_range;
        let max_year = settings.max_year;

        ui.heading("Filters");
        ui.add_space(4.0);

        ui.label("Minimum magnitude");
        ui.horizontal(|ui| {
            let slider = Slider::new(&mut self.thresholds.min_magnitude, mag_lo..=mag_hi)
                .step_by(MAGNITUDE_STEP)
                .show_value(false);
            if ui.add(slider).changed() {
                dashboard.set_min_magnitude(self.thresholds.min_magnitude);
            }
            ui.label(RichText::new(self.thresholds.magnitude_label()).strong());
        });

        ui.add_space(4.0);
        ui.label("From year");
        ui.horizontal(|ui| {
            let slider = Slider::new(&mut self.thresholds.min_year, ALL_TIME_YEAR..=max_year)
                .show_value(false);
            if ui.add(slider).changed() {
                dashboard.set_min_year(self.thresholds.min_year);
            }
            ui.label(RichText::new(self.thresholds.year_label()).strong());
        });

        ui.add_space(4.0);
        let on_map = match dashboard.focused_year() {
            Some(year) => format!("{} on map (year {})", dashboard.visible_count(), year),
            None => format!("{} on map", dashboard.visible_count()),
        };
        ui.label(RichText::new(on_map).weak());

        ui.separator();
        ui.heading("Overlays");
        for kind in OverlayKind::ALL {
            let mut enabled = dashboard.overlays().is_enabled(kind);
            if ui.checkbox(&mut enabled, kind.label()).changed() {
                dashboard.set_overlay(kind, enabled);
            }
        }

        ui.separator();
        if ui
            .button("Reset dashboard")
            .on_hover_text("Restore default filters, map view and overlays")
            .clicked()
        {
            dashboard.reset();
        }
    }
}

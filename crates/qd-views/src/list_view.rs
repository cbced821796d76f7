//! Strong-quake list

use std::time::Instant;

use egui::{Label, RichText, Sense, Ui};
use egui_extras::{Column, TableBuilder};

use qd_core::{DashboardController, ListRow};

use crate::colors;
use crate::{SpaceView, SpaceViewId, ViewerContext};

pub struct StrongQuakesView {
    title: String,
}

impl Default for StrongQuakesView {
    fn default() -> Self {
        Self::new()
    }
}

impl StrongQuakesView {
    pub fn new() -> Self {
        Self {
            title: "Strong quakes".to_string(),
        }
    }

    fn list_ui(&mut self, dashboard: &mut DashboardController, ui: &mut Ui) {
        let threshold = dashboard.settings().strong_quake_threshold;
        ui.label(RichText::new(format!("Magnitude {:.1} and above, most recent first", threshold)).small().weak());

        let rows = dashboard.strong_quakes();
        if rows.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No strong earthquakes recorded").weak());
            });
            return;
        }

        let clicked = strong_quake_table(ui, rows);
        if let Some(quake_id) = clicked {
            dashboard.focus_on_quake(&quake_id, Instant::now());
        }
    }
}

/// Draw the table; returns the id of a clicked row
fn strong_quake_table(ui: &mut Ui, rows: &[ListRow]) -> Option<String> {
    let text_height = egui::TextStyle::Body.resolve(ui.style()).size * 1.6;
    let mut clicked = None;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::initial(56.0).at_least(48.0))
        .column(Column::remainder().at_least(120.0).clip(true))
        .column(Column::initial(84.0).at_least(76.0))
        .column(Column::initial(72.0).at_least(56.0))
        .min_scrolled_height(0.0)
        .vscroll(true)
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Mag");
            });
            header.col(|ui| {
                ui.strong("Place");
            });
            header.col(|ui| {
                ui.strong("Date");
            });
            header.col(|ui| {
                ui.strong("Felt");
            });
        })
        .body(|body| {
            body.rows(text_height, rows.len(), |row_index, mut row| {
                let entry = &rows[row_index];
                let mut row_clicked = false;

                row.col(|ui| {
                    let text = RichText::new(&entry.magnitude_label)
                        .strong()
                        .color(colors::band_color(entry.band));
                    row_clicked |= ui.add(Label::new(text).sense(Sense::click())).clicked();
                });
                row.col(|ui| {
                    let response = ui
                        .add(Label::new(entry.place_label.as_str()).sense(Sense::click()))
                        .on_hover_text("Show on map");
                    row_clicked |= response.clicked();
                });
                row.col(|ui| {
                    ui.label(RichText::new(&entry.date_label).weak());
                });
                row.col(|ui| {
                    if let Some(badge) = entry.felt_badge() {
                        ui.label(RichText::new(badge).small());
                    }
                });

                if row_clicked {
                    clicked = Some(entry.quake_id.clone());
                }
            });
        });

    clicked
}

impl SpaceView for StrongQuakesView {
    fn id(&self) -> SpaceViewId {
        SpaceViewId::StrongQuakes
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) {
        ctx.with_dashboard(ui, |dashboard, ui| self.list_ui(dashboard, ui));
    }
}

//! Stat cards: total, strongest and latest

use std::time::Instant;

use egui::{Align, Layout, RichText, Sense, Stroke, Ui};

use qd_core::{DashboardController, StatCard};

use crate::colors;
use crate::{SpaceView, SpaceViewId, ViewerContext};

const CARD_MIN_WIDTH: f32 = 160.0;

pub struct StatCardsView {
    title: String,
}

impl Default for StatCardsView {
    fn default() -> Self {
        Self::new()
    }
}

impl StatCardsView {
    pub fn new() -> Self {
        Self {
            title: "Summary".to_string(),
        }
    }

    fn cards_ui(&mut self, dashboard: &mut DashboardController, ui: &mut Ui) {
        let cards = dashboard.stats().cards();
        let mut clicked = None;

        let width = ((ui.available_width() - 2.0 * ui.spacing().item_spacing.x) / 3.0).max(CARD_MIN_WIDTH);
        ui.horizontal(|ui| {
            for card in &cards {
                if card_ui(ui, card, width) {
                    clicked = card.quake_id.clone();
                }
            }
        });

        if let Some(quake_id) = clicked {
            dashboard.focus_on_quake(&quake_id, Instant::now());
        }
    }
}

/// Draw one card; true when an interactive card was clicked
fn card_ui(ui: &mut Ui, card: &StatCard, width: f32) -> bool {
    let headline_color = card
        .band
        .map(colors::band_color)
        .unwrap_or_else(|| ui.visuals().strong_text_color());

    let frame = egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(width);
        ui.with_layout(Layout::top_down(Align::Min), |ui| {
            ui.label(RichText::new(&card.caption).small().weak());
            ui.label(RichText::new(&card.headline).heading().strong().color(headline_color));
            match &card.detail {
                Some(detail) => ui.label(RichText::new(detail).small()),
                None => ui.label(RichText::new(" ").small()),
            };
        });
    });

    if !card.is_interactive() {
        return false;
    }

    let id = ui.id().with(("stat_card", card.kind as u8));
    let response = ui
        .interact(frame.response.rect, id, Sense::click())
        .on_hover_text("Show on map");
    if response.hovered() {
        ui.painter().rect_stroke(
            frame.response.rect,
            4.0,
            Stroke::new(1.5, ui.visuals().selection.stroke.color),
        );
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    response.clicked()
}

impl SpaceView for StatCardsView {
    fn id(&self) -> SpaceViewId {
        SpaceViewId::StatCards
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) {
        ctx.with_dashboard(ui, |dashboard, ui| self.cards_ui(dashboard, ui));
    }
}

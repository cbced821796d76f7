//! Space view abstraction - base trait for the dashboard panels

use egui::Ui;

use crate::ViewerContext;

/// Identifies one of the dashboard panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpaceViewId {
    Map,
    StatCards,
    StrongQuakes,
    YearChart,
}

/// Base trait for all panels
pub trait SpaceView: Send + Sync {
    fn id(&self) -> SpaceViewId;

    /// Tab title
    fn display_name(&self) -> &str;

    /// Draw the UI
    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui);
}

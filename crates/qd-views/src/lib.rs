//! Views for the earthquake dashboard

mod basemap;
mod chart_view;
pub mod colors;
pub mod export;
mod list_view;
mod map_view;
mod space_view;
mod stats_view;
mod viewport;

pub use chart_view::YearChartView;
pub use export::{escape_html, render_snapshot_html, write_snapshot};
pub use list_view::StrongQuakesView;
pub use map_view::QuakeMapView;
pub use space_view::{SpaceView, SpaceViewId};
pub use stats_view::StatCardsView;
pub use viewport::Viewport;

use std::sync::Arc;

use parking_lot::RwLock;

use qd_core::DashboardController;

/// Progress of the one-shot dataset load
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Loaded,
    Failed(String),
}

/// Context passed to views during rendering
#[derive(Clone, Default)]
pub struct ViewerContext {
    /// The dashboard, once the dataset has loaded
    pub dashboard: Arc<RwLock<Option<DashboardController>>>,

    pub load_state: Arc<RwLock<LoadState>>,
}

impl ViewerContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` against the loaded dashboard, or show a placeholder
    pub(crate) fn with_dashboard<R>(
        &self,
        ui: &mut egui::Ui,
        f: impl FnOnce(&mut DashboardController, &mut egui::Ui) -> R,
    ) -> Option<R> {
        let mut guard = self.dashboard.write();
        match guard.as_mut() {
            Some(dashboard) => Some(f(dashboard, ui)),
            None => {
                ui.centered_and_justified(|ui| {
                    ui.label(egui::RichText::new("No earthquake data loaded").weak());
                });
                None
            }
        }
    }
}

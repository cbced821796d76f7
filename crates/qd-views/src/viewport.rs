//! Viewport - docks the map, the strong-quake list and the timeline

use std::collections::HashMap;

use egui::Ui;
use egui_dock::{DockArea, DockState, NodeIndex, TabViewer};

use crate::{QuakeMapView, SpaceView, SpaceViewId, StrongQuakesView, ViewerContext, YearChartView};

/// Dockable area holding the dashboard panels
pub struct Viewport {
    dock_state: DockState<SpaceViewId>,
    space_views: HashMap<SpaceViewId, Box<dyn SpaceView>>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    /// Map on the left, list above timeline on the right
    pub fn new() -> Self {
        let views: Vec<Box<dyn SpaceView>> = vec![
            Box::new(QuakeMapView::new()),
            Box::new(StrongQuakesView::new()),
            Box::new(YearChartView::new()),
        ];
        let space_views = views.into_iter().map(|v| (v.id(), v)).collect();

        Self {
            dock_state: default_layout(),
            space_views,
        }
    }

    /// Restore the default arrangement
    pub fn reset_layout(&mut self) {
        self.dock_state = default_layout();
    }

    pub fn ui(&mut self, ui: &mut Ui, viewer_context: &ViewerContext) {
        DockArea::new(&mut self.dock_state)
            .show_close_buttons(false)
            .draggable_tabs(true)
            .show_tab_name_on_hover(true)
            .show_inside(
                ui,
                &mut ViewportTabViewer {
                    space_views: &mut self.space_views,
                    viewer_context,
                },
            );
    }
}

fn default_layout() -> DockState<SpaceViewId> {
    let mut dock_state = DockState::new(vec![SpaceViewId::Map]);
    let surface = dock_state.main_surface_mut();
    let [_map, list] = surface.split_right(NodeIndex::root(), 0.62, vec![SpaceViewId::StrongQuakes]);
    surface.split_below(list, 0.5, vec![SpaceViewId::YearChart]);
    dock_state
}

struct ViewportTabViewer<'a> {
    space_views: &'a mut HashMap<SpaceViewId, Box<dyn SpaceView>>,
    viewer_context: &'a ViewerContext,
}

impl<'a> TabViewer for ViewportTabViewer<'a> {
    type Tab = SpaceViewId;

    fn title(&mut self, tab: &mut Self::Tab) -> egui::WidgetText {
        match self.space_views.get(tab) {
            Some(view) => view.display_name().into(),
            None => "Unknown".into(),
        }
    }

    fn ui(&mut self, ui: &mut Ui, tab: &mut Self::Tab) {
        if let Some(view) = self.space_views.get_mut(tab) {
            view.ui(self.viewer_context, ui);
        }
    }

    fn closeable(&mut self, _tab: &mut Self::Tab) -> bool {
        false
    }
}

//! Earthquake dashboard entry point

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use eframe::egui::{self, Context, RichText, Ui};
use tracing::{error, info};

use qd_core::events::events::DatasetLoaded;
use qd_core::{DashboardController, DashboardSettings, EventBus};
use qd_data::{load_settings, settings_path, GeoJsonFileSource, QuakeSource};
use qd_ui::{menu_bar, status_bar, ControlPanel, MenuAction, StatusLine, Theme};
use qd_views::{write_snapshot, LoadState, SpaceView, StatCardsView, ViewerContext, Viewport};

/// Main application state
struct QuakeDashboardApp {
    /// Map, strong-quake list and timeline
    viewport: Viewport,

    stat_cards: StatCardsView,
    control_panel: ControlPanel,
    viewer_context: ViewerContext,
    status: StatusLine,

    /// Runs the dataset load; kept alive for the lifetime of the app
    runtime: tokio::runtime::Runtime,
}

impl QuakeDashboardApp {
    fn new(
        cc: &eframe::CreationContext<'_>,
        settings: DashboardSettings,
        runtime: tokio::runtime::Runtime,
    ) -> Self {
        qd_ui::apply_theme(&cc.egui_ctx, &Theme::default());

        let bus = Arc::new(EventBus::new());
        let status = StatusLine::new();
        status.attach(&bus);

        let app = Self {
            viewport: Viewport::new(),
            stat_cards: StatCardsView::new(),
            control_panel: ControlPanel::new(),
            viewer_context: ViewerContext::new(),
            status,
            runtime,
        };
        app.start_loading(cc.egui_ctx.clone(), settings, bus);
        app
    }

    /// Load the dataset in the background; the dashboard appears once it lands
    fn start_loading(&self, ctx: Context, settings: DashboardSettings, bus: Arc<EventBus>) {
        let source = GeoJsonFileSource::new(settings.data_path.clone());
        let viewer_context = self.viewer_context.clone();

        self.runtime.spawn(async move {
            match source.load().await {
                Ok(dataset) => {
                    let quake_count = dataset.len();
                    let controller = DashboardController::new(dataset, settings, Arc::clone(&bus));
                    *viewer_context.dashboard.write() = Some(controller);
                    *viewer_context.load_state.write() = LoadState::Loaded;
                    bus.publish(DatasetLoaded {
                        source_name: source.source_name().to_string(),
                        quake_count,
                    });
                }
                Err(e) => {
                    error!("Failed to load {}: {}", source.source_name(), e);
                    *viewer_context.load_state.write() = LoadState::Failed(e.to_string());
                }
            }
            ctx.request_repaint();
        });
    }

    fn handle_menu_action(&mut self, ctx: &Context, action: MenuAction) {
        match action {
            MenuAction::ExportSnapshot => self.export_snapshot(),
            MenuAction::ResetDashboard => {
                if let Some(dashboard) = self.viewer_context.dashboard.write().as_mut() {
                    dashboard.reset();
                }
            }
            MenuAction::ResetLayout => self.viewport.reset_layout(),
            MenuAction::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
        }
    }

    fn export_snapshot(&self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("HTML", &["html"])
            .set_file_name("quake-snapshot.html")
            .save_file()
        else {
            return;
        };

        if let Some(dashboard) = self.viewer_context.dashboard.read().as_ref() {
            if let Err(e) = write_snapshot(&path, dashboard, Utc::now()) {
                error!("Failed to write snapshot {}: {}", path.display(), e);
            }
        }
    }
}

impl eframe::App for QuakeDashboardApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let loaded = self.viewer_context.dashboard.read().is_some();

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            if let Some(dashboard) = self.viewer_context.dashboard.write().as_mut() {
                dashboard.map_mut().close_popup();
            }
        }

        if let Some(action) = menu_bar(ctx, loaded) {
            self.handle_menu_action(ctx, action);
        }

        let load_state = self.viewer_context.load_state.read().clone();
        status_bar(ctx, &load_state, &self.status);

        if loaded {
            egui::SidePanel::left("controls")
                .resizable(false)
                .default_width(260.0)
                .show(ctx, |ui| {
                    if let Some(dashboard) = self.viewer_context.dashboard.write().as_mut() {
                        self.control_panel.ui(ui, dashboard);
                    }
                });

            egui::TopBottomPanel::top("stat_cards").show(ctx, |ui| {
                ui.add_space(4.0);
                self.stat_cards.ui(&self.viewer_context, ui);
                ui.add_space(4.0);
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            if loaded {
                self.viewport.ui(ui, &self.viewer_context);
            } else {
                show_empty_screen(ui, &load_state);
            }
        });
    }
}

/// Shown until a dataset is loaded, and for good if loading failed
fn show_empty_screen(ui: &mut Ui, load_state: &LoadState) {
    ui.vertical_centered(|ui| {
        ui.add_space(120.0);
        ui.heading("Earthquake Dashboard");
        ui.add_space(16.0);

        match load_state {
            LoadState::Loading => {
                ui.spinner();
                ui.label("Loading earthquakes…");
            }
            LoadState::Loaded => {}
            LoadState::Failed(message) => {
                ui.label("No earthquake data loaded.");
                ui.add_space(8.0);
                ui.label(RichText::new(message).color(qd_ui::theme::error_color()));
            }
        }
    });
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let data_override = std::env::args().nth(1).map(PathBuf::from);
    let settings = load_settings(&settings_path(), data_override);
    let runtime = tokio::runtime::Runtime::new()?;

    info!("Starting earthquake dashboard");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Earthquake Dashboard")
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([900.0, 600.0]),
        default_theme: eframe::Theme::Dark,
        ..Default::default()
    };

    eframe::run_native(
        "Earthquake Dashboard",
        options,
        Box::new(move |cc| Box::new(QuakeDashboardApp::new(cc, settings, runtime))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}

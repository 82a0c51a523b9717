//! Crime Dashboard Main Application
//! Main window with the filter panel, the filtered table and the trend chart.

use crate::data::{CleanTable, LoadOptions, TableCache};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction, DataTable};
use crate::view::DashboardView;
use egui::{Color32, RichText, ScrollArea, SidePanel};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::error;

const TITLE: &str = "Crime Dashboard - Rio de Janeiro";

/// A loaded table with its filter controls and the last evaluated view.
struct Dashboard {
    source: PathBuf,
    table: Arc<CleanTable>,
    control_panel: ControlPanel,
    view: Result<DashboardView, String>,
}

impl Dashboard {
    fn new(source: PathBuf, table: Arc<CleanTable>) -> crate::DashboardResult<Self> {
        let control_panel = ControlPanel::new(&table)?;
        let mut dashboard = Self {
            source,
            table,
            control_panel,
            view: Err(String::new()),
        };
        dashboard.refresh();
        Ok(dashboard)
    }

    /// Re-run the filter against the cached table.
    fn refresh(&mut self) {
        self.view = match self.control_panel.selection() {
            Some(selection) => DashboardView::evaluate(&self.table, &selection).map_err(|err| {
                error!("Failed to evaluate selection {selection:?}: {err}");
                err.to_string()
            }),
            None => Err("The table has no valid years to filter on.".to_string()),
        };
    }
}

enum DashboardState {
    /// No path on the command line yet.
    AwaitingFile,
    /// Fatal load error; the session shows it and stops there.
    Failed(String),
    Ready(Box<Dashboard>),
}

/// Main application window. Owns the table cache for the whole session.
pub struct DashboardApp {
    cache: TableCache,
    state: DashboardState,
}

impl DashboardApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        path: Option<PathBuf>,
        options: LoadOptions,
    ) -> Self {
        let mut app = Self {
            cache: TableCache::new(options),
            state: DashboardState::AwaitingFile,
        };
        if let Some(path) = path {
            app.open(path);
        }
        app
    }

    fn open(&mut self, path: PathBuf) {
        let result = self
            .cache
            .get_or_load(&path)
            .and_then(|table| Dashboard::new(path.clone(), table));

        self.state = match result {
            Ok(dashboard) => DashboardState::Ready(Box::new(dashboard)),
            Err(err) => {
                error!("Failed to load '{}': {err}", path.display());
                DashboardState::Failed(format!("Failed to load '{}': {err}", path.display()))
            }
        };
    }

    /// Handle CSV file selection
    fn handle_browse_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv", "txt"])
            .pick_file()
        {
            self.open(path);
        }
    }

    fn show_awaiting_file(ui: &mut egui::Ui) -> bool {
        let mut browse = false;
        ui.vertical_centered(|ui| {
            ui.add_space(80.0);
            ui.label(RichText::new("No file selected").size(18.0).color(Color32::GRAY));
            ui.add_space(10.0);
            if ui.button(RichText::new("📂 Browse").size(16.0)).clicked() {
                browse = true;
            }
        });
        browse
    }

    fn show_failure(ui: &mut egui::Ui, message: &str) {
        ui.vertical_centered(|ui| {
            ui.add_space(80.0);
            ui.label(
                RichText::new(format!("❌ {message}"))
                    .size(16.0)
                    .color(Color32::from_rgb(220, 53, 69)),
            );
        });
    }

    fn show_dashboard(ui: &mut egui::Ui, dashboard: &Dashboard) {
        let file_name = dashboard
            .source
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        ui.label(RichText::new(file_name).size(11.0).color(Color32::GRAY));
        ui.add_space(8.0);

        match &dashboard.view {
            Ok(view) => {
                ui.label(RichText::new(view.heading()).size(16.0).strong());
                ui.add_space(6.0);
                DataTable::show(ui, view);
                ui.add_space(15.0);
                ChartViewer::show(ui, view);
            }
            Err(message) => ChartViewer::show_warning(ui, message),
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut browse = false;

        // Left panel - filters, only once a table is loaded
        if let DashboardState::Ready(dashboard) = &mut self.state {
            SidePanel::left("control_panel")
                .min_width(260.0)
                .max_width(340.0)
                .show(ctx, |ui| {
                    ScrollArea::vertical().id_salt("filters").show(ui, |ui| {
                        if dashboard.control_panel.show(ui) == ControlPanelAction::SelectionChanged {
                            dashboard.refresh();
                        }
                    });
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(TITLE);
            ui.separator();

            match &self.state {
                DashboardState::AwaitingFile => browse = Self::show_awaiting_file(ui),
                DashboardState::Failed(message) => Self::show_failure(ui, message),
                DashboardState::Ready(dashboard) => {
                    ScrollArea::vertical()
                        .id_salt("dashboard")
                        .auto_shrink([false, false])
                        .show(ui, |ui| Self::show_dashboard(ui, dashboard));
                }
            }
        });

        if browse {
            self.handle_browse_csv();
        }
    }
}

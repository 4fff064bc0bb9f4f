//! Sales Lens Main Application
//! Main window with control panel and chart viewer.

use crate::config::AppConfig;
use crate::data::DataLoader;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::state::{AppState, ExportError, MessageKind, RunOutcome};
use egui::SidePanel;
use std::path::PathBuf;
use tracing::warn;

/// Main application window.
pub struct SalesApp {
    state: AppState,
    loader: DataLoader,
    config: AppConfig,
    config_path: PathBuf,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    /// URL to fetch on the next frame, once the loading status has been painted.
    pending_url: Option<String>,
}

impl SalesApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        loader: DataLoader,
        config: AppConfig,
        config_path: PathBuf,
    ) -> Self {
        Self::with_parts(loader, config, config_path)
    }

    fn with_parts(loader: DataLoader, config: AppConfig, config_path: PathBuf) -> Self {
        Self {
            state: AppState::new(config.preview_rows),
            control_panel: ControlPanel::new(&config),
            chart_viewer: ChartViewer::new(),
            loader,
            config,
            config_path,
            pending_url: None,
        }
    }

    /// Export buttons follow the chart. Run stays enabled so an early click
    /// reports that no data is loaded.
    fn sync_panel(&mut self) {
        self.control_panel.export_enabled = self.state.chart().is_some();
    }

    fn save_config(&self) {
        if let Err(e) = self.config.save(&self.config_path) {
            warn!(error = %e, "could not save config");
        }
    }

    /// Handle CSV file selection
    fn handle_browse_csv(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        else {
            return;
        };

        match self.state.load_file(&self.loader, &path) {
            Ok(()) => {
                let rows = self.state.table().map(|t| t.row_count()).unwrap_or(0);
                self.control_panel.settings.csv_path = Some(path);
                self.control_panel
                    .set_status(MessageKind::Success, &format!("Loaded {} rows", rows));
            }
            Err(e) => self
                .control_panel
                .set_status(MessageKind::Error, &format!("Error: {}", e)),
        }
    }

    /// Show the loading status now and fetch on the next frame.
    fn handle_load_url(&mut self) {
        let url = self.control_panel.settings.url.trim().to_string();
        self.control_panel
            .set_status(MessageKind::Info, "Loading data from URL...");
        self.pending_url = Some(url);
    }

    /// Fetch the queued URL, if any. Blocks until the response arrives.
    fn run_pending_load(&mut self) {
        let Some(url) = self.pending_url.take() else {
            return;
        };

        match self.state.load_url(&self.loader, &url) {
            Ok(()) => {
                let rows = self.state.table().map(|t| t.row_count()).unwrap_or(0);
                self.control_panel.settings.csv_path = None;
                self.control_panel
                    .set_status(MessageKind::Success, &format!("Loaded {} rows from URL", rows));
                self.config.last_url = url;
                self.save_config();
            }
            Err(e) => self
                .control_panel
                .set_status(MessageKind::Error, &format!("Error: {}", e)),
        }
    }

    fn handle_run_analysis(&mut self) {
        let analysis = self.control_panel.settings.analysis;
        let style = self.control_panel.settings.chart_style;

        match self.state.run_analysis(analysis, style) {
            Ok(RunOutcome::Rendered) => {
                self.control_panel
                    .set_status(MessageKind::Success, &format!("Complete! {}", analysis));
                self.config.default_analysis = analysis;
                self.config.default_chart = style;
                self.save_config();
            }
            Ok(RunOutcome::Empty) => self
                .control_panel
                .set_status(MessageKind::Info, self.state.message()),
            Err(e) => self
                .control_panel
                .set_status(MessageKind::Error, &format!("Error: {}", e)),
        }
    }

    /// Export the current chart as PNG and open it
    fn handle_export_chart(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name("sales_chart.png")
            .save_file()
        else {
            return;
        };

        let result = self.state.export_chart_png(
            &path,
            self.config.export_width,
            self.config.export_height,
        );
        let exported = result.is_ok();
        self.report_export(result, &path);
        if exported {
            if let Err(e) = open::that(&path) {
                warn!(error = %e, "could not open exported chart");
            }
        }
    }

    fn handle_export_table(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name("sales_result.csv")
            .save_file()
        else {
            return;
        };

        let result = self.state.export_result_csv(&path);
        self.report_export(result, &path);
    }

    fn report_export(&mut self, result: Result<(), ExportError>, path: &std::path::Path) {
        match result {
            Ok(()) => self.control_panel.set_status(
                MessageKind::Success,
                &format!("Exported {}", path.display()),
            ),
            Err(e) => self
                .control_panel
                .set_status(MessageKind::Error, &format!("Export error: {}", e)),
        }
    }
}

impl eframe::App for SalesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.run_pending_load();
        self.sync_panel();

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::LoadUrl => self.handle_load_url(),
                        ControlPanelAction::RunAnalysis => self.handle_run_analysis(),
                        ControlPanelAction::ExportChart => self.handle_export_chart(),
                        ControlPanelAction::ExportTable => self.handle_export_table(),
                        ControlPanelAction::None => {}
                    }
                    self.sync_panel();
                });
            });

        // Central panel - data preview and chart
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui, &self.state);
        });

        if self.pending_url.is_some() {
            ctx.request_repaint();
        }
    }
}

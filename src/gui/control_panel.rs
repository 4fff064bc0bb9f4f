//! Control Panel Widget
//! Left side panel with data source, analysis and chart controls.

use crate::analysis::Analysis;
use crate::charts::ChartStyle;
use crate::config::AppConfig;
use crate::state::MessageKind;
use egui::{Color32, ComboBox, RichText};
use std::path::PathBuf;

/// User selections for the next action
#[derive(Default, Clone)]
pub struct UserSettings {
    pub csv_path: Option<PathBuf>,
    pub url: String,
    pub analysis: Analysis,
    pub chart_style: ChartStyle,
}

/// Left side control panel with file selection and analysis controls.
pub struct ControlPanel {
    pub settings: UserSettings,
    pub status: String,
    pub status_kind: MessageKind,
    pub export_enabled: bool,
}

impl ControlPanel {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            settings: UserSettings {
                csv_path: None,
                url: config.last_url.clone(),
                analysis: config.default_analysis,
                chart_style: config.default_chart,
            },
            status: "Ready".to_string(),
            status_kind: MessageKind::Info,
            export_enabled: false,
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 Sales Lens")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Sales Analysis")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .settings
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    let path_color = if self.settings.csv_path.is_some() {
                        ui.visuals().strong_text_color()
                    } else {
                        Color32::GRAY
                    };
                    ui.label(RichText::new(&path_text).size(12.0).color(path_color));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Select File").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                    });
                });

                ui.add_space(6.0);
                ui.label("CSV URL:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.settings.url)
                        .hint_text("https://example.com/sales.csv")
                        .desired_width(f32::INFINITY),
                );
                ui.add_space(4.0);
                if ui.button("🌐 Load from URL").clicked() {
                    action = ControlPanelAction::LoadUrl;
                }
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Analysis Section =====
        ui.label(RichText::new("🔧 Analysis").size(14.0).strong());
        ui.add_space(8.0);

        let label_width = 80.0;
        let combo_width = 200.0;

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Analysis:"));
            ComboBox::from_id_salt("analysis")
                .width(combo_width)
                .selected_text(self.settings.analysis.label())
                .show_ui(ui, |ui| {
                    for analysis in Analysis::ALL {
                        ui.selectable_value(&mut self.settings.analysis, analysis, analysis.label());
                    }
                });
        });

        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Chart:"));
            ComboBox::from_id_salt("chart_style")
                .width(combo_width)
                .selected_text(self.settings.chart_style.label())
                .show_ui(ui, |ui| {
                    for style in ChartStyle::ALL {
                        ui.selectable_value(&mut self.settings.chart_style, style, style.label());
                    }
                });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            let button = egui::Button::new(RichText::new("▶ Run Analysis").size(16.0))
                .min_size(egui::vec2(200.0, 35.0));
            if ui.add(button).clicked() {
                action = ControlPanelAction::RunAnalysis;
            }

            ui.add_space(8.0);

            ui.add_enabled_ui(self.export_enabled, |ui| {
                ui.horizontal(|ui| {
                    if ui.button(RichText::new("🖼 Export PNG").size(14.0)).clicked() {
                        action = ControlPanelAction::ExportChart;
                    }
                    if ui.button(RichText::new("📄 Export CSV").size(14.0)).clicked() {
                        action = ControlPanelAction::ExportTable;
                    }
                });
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        ui.label(RichText::new("📊 Status").size(14.0).strong());
        ui.add_space(5.0);

        let status_color = match self.status_kind {
            MessageKind::Error => Color32::from_rgb(220, 53, 69),
            MessageKind::Success => Color32::from_rgb(40, 167, 69),
            MessageKind::Info => Color32::GRAY,
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set status line
    pub fn set_status(&mut self, kind: MessageKind, status: &str) {
        self.status_kind = kind;
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    LoadUrl,
    RunAnalysis,
    ExportChart,
    ExportTable,
}

//! Chart Viewer Widget
//! Central scrollable area: usage notes, data preview, chart and result table.

use crate::charts::ChartPlotter;
use crate::state::{AppState, MessageKind};
use egui::{Color32, RichText, ScrollArea};

const CHART_HEIGHT: f32 = 400.0;
const PREVIEW_HEIGHT: f32 = 180.0;

const INSTRUCTIONS: &str = "How to use:\n\n\
- Use 'Select File' to load a CSV dataset from disk.\n\
- Or enter the URL of a CSV file and click 'Load from URL'.\n\
- Pick an analysis and a chart style from the dropdowns.\n\
- Click 'Run Analysis' to compute the result table and draw the chart.\n\
- Export the chart as PNG or the result table as CSV.";

/// Read-only view over [`AppState`].
#[derive(Default)]
pub struct ChartViewer;

impl ChartViewer {
    pub fn new() -> Self {
        Self
    }

    pub fn show(&mut self, ui: &mut egui::Ui, state: &AppState) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if state.table().is_none() {
                    ui.label(
                        RichText::new("Welcome to Sales Lens")
                            .size(22.0)
                            .strong(),
                    );
                    ui.add_space(10.0);
                    ui.label(RichText::new(INSTRUCTIONS).size(14.0));
                    ui.add_space(20.0);
                }

                Self::draw_preview(ui, state);
                ui.add_space(15.0);

                ui.label(RichText::new("Data Visualization").size(16.0).strong());
                ui.add_space(5.0);
                match state.chart() {
                    Some(chart) => {
                        egui::Frame::none()
                            .rounding(8.0)
                            .stroke(egui::Stroke::new(1.0, Color32::from_rgb(100, 149, 237)))
                            .fill(ui.visuals().widgets.noninteractive.bg_fill)
                            .inner_margin(12.0)
                            .show(ui, |ui| {
                                ui.label(RichText::new(&chart.title).size(18.0).strong());
                                ui.add_space(8.0);
                                ChartPlotter::draw(ui, chart, CHART_HEIGHT);
                                ui.add_space(10.0);
                                ChartPlotter::draw_result_table(ui, &chart.result);
                            });
                    }
                    None => {
                        ui.label(RichText::new("No Data").size(20.0).color(Color32::GRAY));
                    }
                }
            });
    }

    fn draw_preview(ui: &mut egui::Ui, state: &AppState) {
        ui.label(RichText::new("Data Preview").size(16.0).strong());
        ui.add_space(5.0);

        let color = match state.message_kind() {
            MessageKind::Error => Color32::from_rgb(220, 53, 69),
            _ => ui.visuals().text_color(),
        };
        egui::Frame::none()
            .fill(ui.visuals().extreme_bg_color)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ScrollArea::both()
                    .id_salt("data_preview")
                    .max_height(PREVIEW_HEIGHT)
                    .show(ui, |ui| {
                        ui.label(
                            RichText::new(state.message())
                                .monospace()
                                .color(color),
                        );
                    });
            });
    }
}

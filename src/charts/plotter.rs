//! Chart Plotter Module
//! Draws interactive bar, line and pie charts using egui_plot.

use super::chart::Chart;
use super::layout::{self, palette_color, SERIES_COLOR};
use super::style::ChartStyle;
use crate::analysis::{format_value, AnalysisResult, RESULT_CATEGORY, RESULT_VALUE};
use egui::{Color32, RichText, Stroke};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

/// Axis labels longer than this are shortened on screen.
const AXIS_LABEL_CHARS: usize = 14;
/// Pie labels sit just outside the rim, percentages inside it.
const PIE_LABEL_RADIUS: f64 = 1.15;
const PIE_PERCENT_RADIUS: f64 = 0.62;

fn color32((r, g, b): (u8, u8, u8)) -> Color32 {
    Color32::from_rgb(r, g, b)
}

/// Draws charts with egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw `chart` in its selected style.
    pub fn draw(ui: &mut egui::Ui, chart: &Chart, height: f32) {
        match chart.style {
            ChartStyle::Bar => Self::draw_bar_chart(ui, chart, height),
            ChartStyle::Line => Self::draw_line_chart(ui, chart, height),
            ChartStyle::Pie => Self::draw_pie_chart(ui, chart, height),
        }
    }

    /// X-axis formatter mapping integer positions to category labels.
    fn category_axis(
        labels: Vec<String>,
    ) -> impl Fn(egui_plot::GridMark, &std::ops::RangeInclusive<f64>) -> String {
        move |mark, _range| {
            let rounded = mark.value.round();
            if (mark.value - rounded).abs() > 1e-6 || rounded < 0.0 {
                return String::new();
            }
            labels
                .get(rounded as usize)
                .map(|l| layout::truncate_label(l, AXIS_LABEL_CHARS))
                .unwrap_or_default()
        }
    }

    fn draw_bar_chart(ui: &mut egui::Ui, chart: &Chart, height: f32) {
        let labels = chart.result.categories();
        let bars: Vec<Bar> = chart
            .result
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                Bar::new(i as f64, row.value)
                    .name(&row.category)
                    .width(0.6)
                    .fill(color32(SERIES_COLOR))
            })
            .collect();

        Plot::new(format!("bar_{}", chart.title))
            .height(height)
            .allow_scroll(false)
            .x_axis_label(RESULT_CATEGORY)
            .y_axis_label(RESULT_VALUE)
            .x_axis_formatter(Self::category_axis(labels))
            .include_y(0.0)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(color32(SERIES_COLOR)));
            });
    }

    fn draw_line_chart(ui: &mut egui::Ui, chart: &Chart, height: f32) {
        let labels = chart.result.categories();
        let points: Vec<[f64; 2]> = chart
            .result
            .values()
            .into_iter()
            .enumerate()
            .map(|(i, v)| [i as f64, v])
            .collect();

        Plot::new(format!("line_{}", chart.title))
            .height(height)
            .allow_scroll(false)
            .x_axis_label(RESULT_CATEGORY)
            .y_axis_label(RESULT_VALUE)
            .x_axis_formatter(Self::category_axis(labels))
            .include_y(0.0)
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(points.iter().copied()))
                        .color(color32(SERIES_COLOR))
                        .width(2.0)
                        .name(RESULT_VALUE),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(points.iter().copied()))
                        .radius(4.0)
                        .color(color32(SERIES_COLOR)),
                );
            });
    }

    fn draw_pie_chart(ui: &mut egui::Ui, chart: &Chart, height: f32) {
        let slices = layout::pie_slices(&chart.result.values());
        let labels = chart.result.categories();

        Plot::new(format!("pie_{}", chart.title))
            .height(height)
            .data_aspect(1.0)
            .show_axes(false)
            .show_grid(false)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .include_x(-1.5)
            .include_x(1.5)
            .include_y(-1.3)
            .include_y(1.3)
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                for slice in &slices {
                    let color = color32(palette_color(slice.index));
                    let name = labels.get(slice.index).cloned().unwrap_or_default();

                    for piece in slice.pieces() {
                        let points: Vec<[f64; 2]> = piece.iter().map(|&(x, y)| [x, y]).collect();
                        plot_ui.polygon(
                            Polygon::new(PlotPoints::from_iter(points))
                                .fill_color(color)
                                .stroke(Stroke::new(1.0, Color32::WHITE))
                                .name(&name),
                        );
                    }

                    let (lx, ly) = slice.anchor(PIE_LABEL_RADIUS);
                    plot_ui.text(Text::new(PlotPoint::new(lx, ly), name.clone()));

                    let (px, py) = slice.anchor(PIE_PERCENT_RADIUS);
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(px, py),
                            RichText::new(slice.percentage_label()).color(Color32::WHITE),
                        ),
                    );
                }
            });

        if slices.is_empty() {
            ui.label(
                RichText::new("All values are zero or negative; nothing to draw.")
                    .color(Color32::GRAY),
            );
        }
    }

    /// Draw the (Category, Value) result as a striped grid.
    pub fn draw_result_table(ui: &mut egui::Ui, result: &AnalysisResult) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new(ui.make_persistent_id(format!("result_table_{}", result.analysis)))
                    .striped(true)
                    .min_col_width(80.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new(RESULT_CATEGORY).strong().size(12.0));
                        ui.label(RichText::new(RESULT_VALUE).strong().size(12.0));
                        ui.end_row();

                        for row in &result.rows {
                            ui.label(RichText::new(&row.category).size(12.0));
                            ui.label(RichText::new(format_value(row.value)).size(12.0));
                            ui.end_row();
                        }
                    });
            });
    }
}

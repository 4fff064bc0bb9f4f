//! Static Chart Renderer
//! Renders a chart to a PNG image with plotters, for export.
//!
//! Layout:
//! 1. Title: "{analysis} - {style}" centered at the top
//! 2. Bar / Line: categories on the x axis (rotated when long), values on y
//! 3. Pie: slices from 140° counter-clockwise, category outside, percentage inside

use super::chart::{Chart, ChartError};
use super::layout::{self, palette_color, SERIES_COLOR};
use super::style::ChartStyle;
use crate::analysis::{RESULT_CATEGORY, RESULT_VALUE};
use image::{DynamicImage, ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info};

const FONT: &str = "sans-serif";
const TITLE_SIZE: f64 = 24.0;
const LABEL_SIZE: f64 = 14.0;
/// Smallest image edge; smaller requested sizes are raised to this.
pub const MIN_IMAGE_SIDE: u32 = 200;

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

fn render_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Render(e.to_string())
}

fn rgb((r, g, b): (u8, u8, u8)) -> RGBColor {
    RGBColor(r, g, b)
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render `chart` into PNG bytes. Each side is at least [`MIN_IMAGE_SIDE`].
    pub fn render_png_bytes(chart: &Chart, width: u32, height: u32) -> Result<Vec<u8>, ChartError> {
        if chart.result.is_empty() {
            return Err(ChartError::Empty);
        }
        let width = width.max(MIN_IMAGE_SIDE);
        let height = height.max(MIN_IMAGE_SIDE);

        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(render_err)?;
            let body = root
                .titled(&chart.title, (FONT, TITLE_SIZE).into_font())
                .map_err(render_err)?;

            match chart.style {
                ChartStyle::Bar | ChartStyle::Line => Self::draw_cartesian(&body, chart)?,
                ChartStyle::Pie => Self::draw_pie(&body, chart)?,
            }
            root.present().map_err(render_err)?;
        }

        let image = RgbImage::from_raw(width, height, buffer)
            .ok_or_else(|| ChartError::Render("bitmap buffer size mismatch".to_string()))?;
        let mut png = Vec::new();
        DynamicImage::ImageRgb8(image).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

        debug!(bytes = png.len(), style = %chart.style, "chart rendered");
        Ok(png)
    }

    /// Render `chart` and write it as a PNG file.
    pub fn render_to_file(
        chart: &Chart,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), ChartError> {
        let png = Self::render_png_bytes(chart, width, height)?;
        std::fs::write(path, png)?;
        info!(path = %path.display(), "chart exported");
        Ok(())
    }

    /// Bar and line charts over a segmented category axis.
    fn draw_cartesian(area: &Area<'_>, chart: &Chart) -> Result<(), ChartError> {
        let labels = chart.result.categories();
        let values = chart.result.values();
        let (y_min, y_max) = layout::value_range(&values);
        let rotate = layout::needs_rotation(&labels);

        let mut ctx = ChartBuilder::on(area)
            .margin(20)
            .x_label_area_size(if rotate { 120 } else { 40 })
            .y_label_area_size(70)
            .build_cartesian_2d((0..labels.len()).into_segmented(), y_min..y_max)
            .map_err(render_err)?;

        let label_font = (FONT, LABEL_SIZE).into_font();
        let label_style = if rotate {
            label_font.transform(FontTransform::Rotate90)
        } else {
            label_font
        };
        let formatter = |v: &SegmentValue<usize>| match v {
            SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
                labels.get(*i).cloned().unwrap_or_default()
            }
            SegmentValue::Last => String::new(),
        };

        ctx.configure_mesh()
            .disable_x_mesh()
            .x_labels(labels.len())
            .x_label_formatter(&formatter)
            .x_label_style(label_style)
            .x_desc(RESULT_CATEGORY)
            .y_desc(RESULT_VALUE)
            .draw()
            .map_err(render_err)?;

        let color = rgb(SERIES_COLOR);
        match chart.style {
            ChartStyle::Line => {
                let points: Vec<(SegmentValue<usize>, f64)> = values
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (SegmentValue::CenterOf(i), *v))
                    .collect();
                ctx.draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))
                    .map_err(render_err)?;
                ctx.draw_series(
                    points
                        .into_iter()
                        .map(|point| Circle::new(point, 5, color.filled())),
                )
                .map_err(render_err)?;
            }
            _ => {
                ctx.draw_series(
                    Histogram::vertical(&ctx)
                        .style(color.filled())
                        .margin(10)
                        .data(values.iter().enumerate().map(|(i, v)| (i, *v))),
                )
                .map_err(render_err)?;
            }
        }
        Ok(())
    }

    fn draw_pie(area: &Area<'_>, chart: &Chart) -> Result<(), ChartError> {
        let (w, h) = area.dim_in_pixel();
        let center = (w as f64 / 2.0, h as f64 / 2.0);
        let radius = (w.min(h) as f64 / 2.0) * 0.7;
        let labels = chart.result.categories();

        // y flips: layout angles are counter-clockwise with y up
        let to_pixel = |(x, y): (f64, f64), scale: f64| -> (i32, i32) {
            (
                (center.0 + x * scale).round() as i32,
                (center.1 - y * scale).round() as i32,
            )
        };
        let centered = |size: f64, color: &'static RGBColor| {
            TextStyle::from((FONT, size).into_font())
                .color(color)
                .pos(Pos::new(HPos::Center, VPos::Center))
        };

        for slice in layout::pie_slices(&chart.result.values()) {
            let color = rgb(palette_color(slice.index));
            for piece in slice.pieces() {
                let points: Vec<(i32, i32)> = piece.into_iter().map(|p| to_pixel(p, radius)).collect();
                area.draw(&Polygon::new(points, color.filled()))
                    .map_err(render_err)?;
            }

            let name = labels.get(slice.index).cloned().unwrap_or_default();
            let label_at = to_pixel(slice.anchor(1.0), radius * 1.15);
            area.draw(&Text::new(name, label_at, centered(LABEL_SIZE, &BLACK)))
                .map_err(render_err)?;

            let pct_at = to_pixel(slice.anchor(1.0), radius * 0.62);
            area.draw(&Text::new(
                slice.percentage_label(),
                pct_at,
                centered(LABEL_SIZE, &WHITE),
            ))
            .map_err(render_err)?;
        }
        Ok(())
    }
}

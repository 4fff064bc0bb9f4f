//! Geometry and labelling shared by the on-screen plotter and the PNG renderer.
//!
//! Angles are in degrees, counter-clockwise from the positive x axis, with y
//! pointing up. Pixel backends flip y themselves.

/// Bar and line color.
pub const SERIES_COLOR: (u8, u8, u8) = (52, 152, 219); // Blue

/// Pie slice palette
pub const PALETTE: [(u8, u8, u8); 10] = [
    (231, 76, 60),  // Red
    (46, 204, 113), // Green
    (155, 89, 182), // Purple
    (243, 156, 18), // Orange
    (26, 188, 156), // Teal
    (233, 30, 99),  // Pink
    (0, 188, 212),  // Cyan
    (255, 87, 34),  // Deep Orange
    (121, 85, 72),  // Brown
    (96, 125, 139), // Blue Grey
];

/// Where the first pie slice begins.
pub const PIE_START_DEGREES: f64 = 140.0;

/// Pieces wider than this are split so every polygon stays convex.
const MAX_PIECE_DEGREES: f64 = 90.0;
const ARC_STEP_DEGREES: f64 = 3.0;

/// Labels longer than this, or more categories than this, get rotated.
const ROTATE_THRESHOLD: usize = 8;

pub fn palette_color(index: usize) -> (u8, u8, u8) {
    PALETTE[index % PALETTE.len()]
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    /// Row index in the analysis result.
    pub index: usize,
    pub start_deg: f64,
    pub sweep_deg: f64,
    pub fraction: f64,
}

impl PieSlice {
    pub fn mid_deg(&self) -> f64 {
        self.start_deg + self.sweep_deg / 2.0
    }

    /// Percentage annotation, one decimal.
    pub fn percentage_label(&self) -> String {
        format!("{:.1}%", self.fraction * 100.0)
    }

    /// Unit-circle point at the middle of the slice, scaled by `radius`.
    pub fn anchor(&self, radius: f64) -> (f64, f64) {
        unit_point(self.mid_deg(), radius)
    }

    /// Convex polygons covering the slice on the unit circle. Each starts at the center.
    pub fn pieces(&self) -> Vec<Vec<(f64, f64)>> {
        let count = (self.sweep_deg / MAX_PIECE_DEGREES).ceil().max(1.0) as usize;
        let piece_sweep = self.sweep_deg / count as f64;

        (0..count)
            .map(|i| {
                let start = self.start_deg + i as f64 * piece_sweep;
                let steps = (piece_sweep / ARC_STEP_DEGREES).ceil().max(1.0) as usize;
                let mut points = Vec::with_capacity(steps + 2);
                points.push((0.0, 0.0));
                for s in 0..=steps {
                    let deg = start + piece_sweep * s as f64 / steps as f64;
                    points.push(unit_point(deg, 1.0));
                }
                points
            })
            .collect()
    }
}

fn unit_point(deg: f64, radius: f64) -> (f64, f64) {
    let rad = deg.to_radians();
    (radius * rad.cos(), radius * rad.sin())
}

/// Slices proportional to `values`, counter-clockwise from [`PIE_START_DEGREES`].
///
/// Negative values are treated as zero. Zero-size slices are omitted, so an
/// all-zero input yields no slices.
pub fn pie_slices(values: &[f64]) -> Vec<PieSlice> {
    let clamped: Vec<f64> = values
        .iter()
        .map(|v| if v.is_finite() { v.max(0.0) } else { 0.0 })
        .collect();
    let total: f64 = clamped.iter().sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut start = PIE_START_DEGREES;
    let mut slices = Vec::new();
    for (index, value) in clamped.into_iter().enumerate() {
        if value == 0.0 {
            continue;
        }
        let fraction = value / total;
        let sweep = fraction * 360.0;
        slices.push(PieSlice {
            index,
            start_deg: start,
            sweep_deg: sweep,
            fraction,
        });
        start += sweep;
    }
    slices
}

/// Whether x-axis labels should be drawn rotated.
pub fn needs_rotation(labels: &[String]) -> bool {
    labels.len() > ROTATE_THRESHOLD || labels.iter().any(|l| l.chars().count() > ROTATE_THRESHOLD)
}

/// Y-axis range covering zero and every value, with 10% headroom.
pub fn value_range(values: &[f64]) -> (f64, f64) {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let lo = finite.clone().fold(0.0_f64, f64::min);
    let mut hi = finite.fold(0.0_f64, f64::max);
    if hi == lo {
        hi = lo + 1.0;
    }
    let pad = (hi - lo) * 0.1;
    let lo = if lo < 0.0 { lo - pad } else { lo };
    (lo, hi + pad)
}

/// Shorten a label to `max` characters, marking the cut with an ellipsis.
pub fn truncate_label(label: &str, max: usize) -> String {
    if label.chars().count() <= max {
        return label.to_string();
    }
    let kept: String = label.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

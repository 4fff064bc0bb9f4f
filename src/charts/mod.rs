//! Charts module - Chart rendering

mod chart;
pub mod layout;
mod plotter;
mod renderer;
mod style;

pub use chart::{Chart, ChartError};
pub use plotter::ChartPlotter;
pub use renderer::StaticChartRenderer;
pub use style::ChartStyle;

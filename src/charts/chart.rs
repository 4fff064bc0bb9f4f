//! Chart Model
//! An analysis result paired with its style and title, plus render errors.

use super::style::ChartStyle;
use crate::analysis::AnalysisResult;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Nothing to draw: the analysis returned no rows")]
    Empty,
    #[error("Failed to draw chart: {0}")]
    Render(String),
    #[error("Failed to encode chart image: {0}")]
    Encode(#[from] image::ImageError),
    #[error("Failed to write chart image: {0}")]
    Io(#[from] std::io::Error),
}

/// An analysis result paired with the style it is drawn in.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub style: ChartStyle,
    pub result: AnalysisResult,
}

impl Chart {
    pub fn new(result: AnalysisResult, style: ChartStyle) -> Self {
        Self {
            title: format!("{} - {}", result.analysis.label(), style.label()),
            style,
            result,
        }
    }
}

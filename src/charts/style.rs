//! Chart Style
//! The three ways a result can be drawn.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Chart style selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartStyle {
    Bar,
    Pie,
    Line,
}

impl ChartStyle {
    pub const ALL: [ChartStyle; 3] = [ChartStyle::Bar, ChartStyle::Pie, ChartStyle::Line];

    pub fn label(self) -> &'static str {
        match self {
            ChartStyle::Bar => "Bar Graph",
            ChartStyle::Pie => "Pie Chart",
            ChartStyle::Line => "Line Graph",
        }
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        ChartStyle::Bar
    }
}

impl fmt::Display for ChartStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ChartStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartStyle::ALL
            .into_iter()
            .find(|style| style.label() == s)
            .ok_or_else(|| format!("Unknown chart style: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_parse_back() {
        for style in ChartStyle::ALL {
            assert_eq!(style.label().parse::<ChartStyle>(), Ok(style));
        }
        assert!("Scatter Plot".parse::<ChartStyle>().is_err());
    }
}

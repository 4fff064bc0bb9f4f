//! The fixed set of canned analyses.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const SIZE: &str = "Size";
pub const QUANTITY: &str = "Quantity";
pub const CATEGORY: &str = "Category";
pub const B2B: &str = "B2B";
pub const SHIP_STATE: &str = "Ship State";

/// One variant per supported analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Analysis {
    /// Frequency of `Size` values.
    SizeCounts,
    /// Sum of `Quantity` per `Size`.
    QuantityBySize,
    /// Five most frequent `Category` values.
    TopProducts,
    /// Frequency of every `Category` value.
    TopCategories,
    /// Frequency of `B2B` values.
    B2bBreakdown,
    /// Non-null `Category` entries per `Size`.
    CategoryBySize,
    /// Ten most frequent `Ship State` values.
    TopStates,
}

impl Analysis {
    pub const ALL: [Analysis; 7] = [
        Analysis::SizeCounts,
        Analysis::QuantityBySize,
        Analysis::TopProducts,
        Analysis::TopCategories,
        Analysis::B2bBreakdown,
        Analysis::CategoryBySize,
        Analysis::TopStates,
    ];

    /// Display name shown in the analysis dropdown.
    pub fn label(self) -> &'static str {
        match self {
            Analysis::SizeCounts => "Count Sizes in Dataset",
            Analysis::QuantityBySize => "Group by Size and Quantity",
            Analysis::TopProducts => "Top 5 Most Popular Products",
            Analysis::TopCategories => "Top Clothing Categories",
            Analysis::B2bBreakdown => "B2B Data Analysis",
            Analysis::CategoryBySize => "Category by Size",
            Analysis::TopStates => "Top 10 States by Orders",
        }
    }

    /// Columns that must exist in the table.
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            Analysis::SizeCounts => &[SIZE],
            Analysis::QuantityBySize => &[SIZE, QUANTITY],
            Analysis::TopProducts | Analysis::TopCategories => &[CATEGORY],
            Analysis::B2bBreakdown => &[B2B],
            Analysis::CategoryBySize => &[SIZE, CATEGORY],
            Analysis::TopStates => &[SHIP_STATE],
        }
    }

    /// Row limit for truncating analyses.
    pub fn top_n(self) -> Option<usize> {
        match self {
            Analysis::TopProducts => Some(5),
            Analysis::TopStates => Some(10),
            _ => None,
        }
    }
}

impl Default for Analysis {
    fn default() -> Self {
        Analysis::SizeCounts
    }
}

impl fmt::Display for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Analysis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Analysis::ALL
            .into_iter()
            .find(|a| a.label() == s)
            .ok_or_else(|| format!("Unknown analysis: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_parse_back() {
        for analysis in Analysis::ALL {
            assert_eq!(analysis.label().parse::<Analysis>(), Ok(analysis));
        }
        assert!("Median Price".parse::<Analysis>().is_err());
    }

    #[test]
    fn only_top_analyses_truncate() {
        let truncating: Vec<_> = Analysis::ALL
            .into_iter()
            .filter_map(|a| a.top_n().map(|n| (a, n)))
            .collect();
        assert_eq!(
            truncating,
            vec![(Analysis::TopProducts, 5), (Analysis::TopStates, 10)]
        );
    }

    #[test]
    fn grouped_analyses_need_two_columns() {
        assert_eq!(Analysis::QuantityBySize.required_columns(), &[SIZE, QUANTITY]);
        assert_eq!(Analysis::CategoryBySize.required_columns(), &[SIZE, CATEGORY]);
        assert_eq!(Analysis::TopStates.required_columns(), &[SHIP_STATE]);
    }
}

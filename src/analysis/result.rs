//! Two-column (Category, Value) analysis output.

use super::kind::Analysis;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

pub const RESULT_CATEGORY: &str = "Category";
pub const RESULT_VALUE: &str = "Value";

#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub category: String,
    pub value: f64,
}

/// Output of one analysis run. Rows keep the order produced by the aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub analysis: Analysis,
    pub rows: Vec<ResultRow>,
}

impl AnalysisResult {
    pub fn new(analysis: Analysis, rows: Vec<ResultRow>) -> Self {
        Self { analysis, rows }
    }

    /// Build from an aggregated frame holding `Category` (str) and `Value` (f64).
    /// Rows with a null value are skipped.
    pub fn from_frame(analysis: Analysis, df: &DataFrame) -> PolarsResult<Self> {
        let categories = df.column(RESULT_CATEGORY)?.str()?;
        let values = df.column(RESULT_VALUE)?.f64()?;

        let rows = categories
            .into_iter()
            .zip(values.into_iter())
            .filter_map(|(category, value)| {
                Some(ResultRow {
                    category: category?.to_string(),
                    value: value?,
                })
            })
            .collect();

        Ok(Self { analysis, rows })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn categories(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.category.clone()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.value).collect()
    }

    pub fn total(&self) -> f64 {
        self.rows.iter().map(|r| r.value).sum()
    }

    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        DataFrame::new(vec![
            Column::new(RESULT_CATEGORY.into(), self.categories()),
            Column::new(RESULT_VALUE.into(), self.values()),
        ])
    }

    /// Plain-text table with a header line, right aligned, no index column.
    pub fn to_text(&self) -> String {
        let values: Vec<String> = self.rows.iter().map(|r| format_value(r.value)).collect();
        let cat_width = self
            .rows
            .iter()
            .map(|r| r.category.chars().count())
            .chain(std::iter::once(RESULT_CATEGORY.len()))
            .max()
            .unwrap_or(0);
        let val_width = values
            .iter()
            .map(|v| v.len())
            .chain(std::iter::once(RESULT_VALUE.len()))
            .max()
            .unwrap_or(0);

        let mut out = format!(
            "{:>cw$} {:>vw$}",
            RESULT_CATEGORY,
            RESULT_VALUE,
            cw = cat_width,
            vw = val_width
        );
        for (row, value) in self.rows.iter().zip(&values) {
            out.push('\n');
            out.push_str(&format!(
                "{:>cw$} {:>vw$}",
                row.category,
                value,
                cw = cat_width,
                vw = val_width
            ));
        }
        out
    }

    /// Write the result as CSV with a `Category,Value` header.
    pub fn write_csv(&self, path: &Path) -> PolarsResult<()> {
        let mut df = self.to_dataframe()?;
        let mut file = File::create(path)?;
        CsvWriter::new(&mut file).include_header(true).finish(&mut df)
    }
}

/// Whole numbers print without decimals, everything else with two.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AnalysisResult {
        AnalysisResult::new(
            Analysis::QuantityBySize,
            vec![
                ResultRow {
                    category: "S".to_string(),
                    value: 3.0,
                },
                ResultRow {
                    category: "XXL".to_string(),
                    value: 12.5,
                },
            ],
        )
    }

    #[test]
    fn text_table_is_right_aligned() {
        let text = sample().to_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Category Value");
        assert_eq!(lines[1], "       S     3");
        assert_eq!(lines[2], "     XXL 12.50");
    }

    #[test]
    fn value_formatting() {
        assert_eq!(format_value(3.0), "3");
        assert_eq!(format_value(-4.0), "-4");
        assert_eq!(format_value(2.345), "2.35");
    }

    #[test]
    fn frame_round_trip_keeps_order() {
        let result = sample();
        let df = result.to_dataframe().unwrap();
        assert_eq!(df.height(), 2);
        let back = AnalysisResult::from_frame(Analysis::QuantityBySize, &df).unwrap();
        assert_eq!(back, result);
        assert_eq!(back.total(), 15.5);
    }

    #[test]
    fn writes_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.csv");
        sample().write_csv(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Category,Value"));
        assert!(lines.next().unwrap().starts_with("S,3"));
    }
}

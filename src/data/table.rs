//! Loaded sales table and where it came from.

use polars::prelude::*;
use std::fmt;
use std::path::PathBuf;

/// Origin of a loaded table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => f.write_str(url),
        }
    }
}

/// A parsed CSV dataset. Replaced wholesale on every load, never mutated.
#[derive(Debug, Clone)]
pub struct SalesTable {
    df: DataFrame,
    source: DataSource,
}

impl SalesTable {
    pub fn new(df: DataFrame, source: DataSource) -> Self {
        Self { df, source }
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// Number of data rows (header excluded).
    pub fn row_count(&self) -> usize {
        self.df.height()
    }

    /// Column names in file order.
    pub fn columns(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.df.get_column_index(name).is_some()
    }

    /// Text preview of the first `rows` rows.
    pub fn preview(&self, rows: usize) -> String {
        format!("{}", self.df.head(Some(rows)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SalesTable {
        let df = DataFrame::new(vec![
            Column::new("Size".into(), ["S", "M", "L"]),
            Column::new("Quantity".into(), [1i64, 2, 3]),
        ])
        .unwrap();
        SalesTable::new(df, DataSource::File(PathBuf::from("sales.csv")))
    }

    #[test]
    fn reports_shape_and_columns() {
        let table = sample();
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.columns(), vec!["Size", "Quantity"]);
        assert!(table.has_column("Quantity"));
        assert!(!table.has_column("Ship State"));
    }

    #[test]
    fn source_display() {
        assert_eq!(sample().source().to_string(), "sales.csv");
        let url = DataSource::Url("https://example.com/a.csv".to_string());
        assert_eq!(url.to_string(), "https://example.com/a.csv");
    }

    #[test]
    fn preview_mentions_columns() {
        let text = sample().preview(2);
        assert!(text.contains("Size"));
        assert!(text.contains("Quantity"));
    }
}

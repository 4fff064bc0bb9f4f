//! Application state and the actions the GUI shell invokes.
//!
//! The table and the chart are replaced wholesale on success and left
//! untouched on failure.

use crate::analysis::{self, Analysis, AnalysisError};
use crate::charts::{Chart, ChartError, ChartStyle, StaticChartRenderer};
use crate::data::{DataLoader, LoaderError, SalesTable};
use polars::prelude::PolarsError;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

pub const NO_RESULT_MESSAGE: &str = "No data found for this analysis.";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Nothing to export: run an analysis first")]
    NothingToExport,
    #[error(transparent)]
    Chart(#[from] ChartError),
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] PolarsError),
}

/// What a successful analysis run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// A new chart replaced the previous one.
    Rendered,
    /// The analysis yielded zero rows.
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Error,
}

/// Everything the shell displays, owned by the action handlers.
pub struct AppState {
    table: Option<SalesTable>,
    chart: Option<Chart>,
    message: String,
    message_kind: MessageKind,
    preview_rows: usize,
}

impl AppState {
    pub fn new(preview_rows: usize) -> Self {
        Self {
            table: None,
            chart: None,
            message: String::new(),
            message_kind: MessageKind::Info,
            preview_rows,
        }
    }

    pub fn table(&self) -> Option<&SalesTable> {
        self.table.as_ref()
    }

    pub fn chart(&self) -> Option<&Chart> {
        self.chart.as_ref()
    }

    /// Text for the data preview box.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn message_kind(&self) -> MessageKind {
        self.message_kind
    }

    fn set_message(&mut self, kind: MessageKind, text: impl Into<String>) {
        self.message_kind = kind;
        self.message = text.into();
    }

    /// Load a CSV file. The previous table is kept on failure.
    pub fn load_file(&mut self, loader: &DataLoader, path: &Path) -> Result<(), LoaderError> {
        let loaded = loader.load_file(path);
        self.install(loaded, "Data loaded successfully!")
    }

    /// Load a CSV from a URL. The previous table is kept on failure.
    pub fn load_url(&mut self, loader: &DataLoader, url: &str) -> Result<(), LoaderError> {
        let loaded = loader.load_url(url);
        self.install(loaded, "Data loaded successfully from URL!")
    }

    fn install(
        &mut self,
        loaded: Result<SalesTable, LoaderError>,
        headline: &str,
    ) -> Result<(), LoaderError> {
        match loaded {
            Ok(table) => {
                info!(source = %table.source(), rows = table.row_count(), "table replaced");
                let text = format!("{}\n{}", headline, table.preview(self.preview_rows));
                self.set_message(MessageKind::Success, text);
                self.table = Some(table);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "load failed, keeping previous table");
                self.set_message(MessageKind::Error, e.to_string());
                Err(e)
            }
        }
    }

    /// Run `analysis` and draw it as `style`.
    ///
    /// On success the result table becomes the message and the chart is
    /// replaced. An empty result clears the chart. Errors keep the previous chart.
    pub fn run_analysis(
        &mut self,
        analysis: Analysis,
        style: ChartStyle,
    ) -> Result<RunOutcome, AnalysisError> {
        let Some(table) = &self.table else {
            self.set_message(MessageKind::Error, AnalysisError::NoData.to_string());
            return Err(AnalysisError::NoData);
        };

        match analysis::run(table, analysis) {
            Ok(result) if result.is_empty() => {
                info!(%analysis, "analysis returned no rows");
                self.chart = None;
                self.set_message(MessageKind::Info, NO_RESULT_MESSAGE);
                Ok(RunOutcome::Empty)
            }
            Ok(result) => {
                self.set_message(MessageKind::Success, result.to_text());
                self.chart = Some(Chart::new(result, style));
                Ok(RunOutcome::Rendered)
            }
            Err(e) => {
                warn!(%analysis, error = %e, "analysis failed");
                self.set_message(MessageKind::Error, e.to_string());
                Err(e)
            }
        }
    }

    /// Write the current chart as a PNG file.
    pub fn export_chart_png(&self, path: &Path, width: u32, height: u32) -> Result<(), ExportError> {
        let chart = self.chart.as_ref().ok_or(ExportError::NothingToExport)?;
        StaticChartRenderer::render_to_file(chart, path, width, height)?;
        Ok(())
    }

    /// Write the current result table as CSV.
    pub fn export_result_csv(&self, path: &Path) -> Result<(), ExportError> {
        let chart = self.chart.as_ref().ok_or(ExportError::NothingToExport)?;
        chart.result.write_csv(path)?;
        info!(path = %path.display(), "result exported");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn loader() -> DataLoader {
        DataLoader::new(&AppConfig::default()).unwrap()
    }

    #[test]
    fn run_before_load_asks_for_data() {
        let mut state = AppState::new(5);
        let err = state
            .run_analysis(Analysis::SizeCounts, ChartStyle::Bar)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::NoData));
        assert_eq!(state.message(), "Please upload data first.");
        assert_eq!(state.message_kind(), MessageKind::Error);
        assert!(state.chart().is_none());
    }

    #[test]
    fn load_then_run_replaces_chart() {
        let file = csv_file("Size,Quantity\nS,2\nM,3\nS,1\n");
        let mut state = AppState::new(5);
        state.load_file(&loader(), file.path()).unwrap();
        assert!(state.message().starts_with("Data loaded successfully!"));
        assert_eq!(state.table().unwrap().row_count(), 3);

        let outcome = state
            .run_analysis(Analysis::QuantityBySize, ChartStyle::Bar)
            .unwrap();
        assert_eq!(outcome, RunOutcome::Rendered);
        assert_eq!(state.chart().unwrap().result.values(), vec![3.0, 3.0]);

        state
            .run_analysis(Analysis::SizeCounts, ChartStyle::Pie)
            .unwrap();
        let chart = state.chart().unwrap();
        assert_eq!(chart.style, ChartStyle::Pie);
        assert_eq!(chart.result.analysis, Analysis::SizeCounts);
        assert_eq!(chart.result.values(), vec![2.0, 1.0]);
    }

    #[test]
    fn failed_load_keeps_previous_table() {
        let file = csv_file("Size\nS\nM\n");
        let mut state = AppState::new(5);
        let loader = loader();
        state.load_file(&loader, file.path()).unwrap();

        let err = state
            .load_file(&loader, Path::new("/no/such/sales.csv"))
            .unwrap_err();
        assert!(matches!(err, LoaderError::Io { .. }));
        assert_eq!(state.message_kind(), MessageKind::Error);
        assert_eq!(state.table().unwrap().row_count(), 2);

        let bad = csv_file("a,b\n1,2\n3,4,5\n");
        assert!(state.load_file(&loader, bad.path()).is_err());
        assert!(state.table().unwrap().has_column("Size"));
    }

    #[test]
    fn missing_column_keeps_previous_chart() {
        let file = csv_file("Size,Category\nS,kurta\nM,top\n");
        let mut state = AppState::new(5);
        state.load_file(&loader(), file.path()).unwrap();
        state
            .run_analysis(Analysis::SizeCounts, ChartStyle::Line)
            .unwrap();

        let err = state
            .run_analysis(Analysis::TopStates, ChartStyle::Bar)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::MissingColumn { .. }));
        assert!(state.message().contains("Ship State"));
        assert_eq!(state.chart().unwrap().style, ChartStyle::Line);
    }

    #[test]
    fn empty_result_is_reported_not_failed() {
        let file = csv_file("Size,Quantity\n");
        let mut state = AppState::new(5);
        state.load_file(&loader(), file.path()).unwrap();
        let outcome = state
            .run_analysis(Analysis::QuantityBySize, ChartStyle::Bar)
            .unwrap();
        assert_eq!(outcome, RunOutcome::Empty);
        assert_eq!(state.message(), NO_RESULT_MESSAGE);
        assert!(state.chart().is_none());
    }

    #[test]
    fn export_requires_a_chart() {
        let state = AppState::new(5);
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            state.export_result_csv(&dir.path().join("out.csv")),
            Err(ExportError::NothingToExport)
        ));
        assert!(matches!(
            state.export_chart_png(&dir.path().join("out.png"), 400, 300),
            Err(ExportError::NothingToExport)
        ));
    }

    #[test]
    fn exports_result_csv() {
        let file = csv_file("Category\nkurta\nset\nkurta\n");
        let mut state = AppState::new(5);
        state.load_file(&loader(), file.path()).unwrap();
        state
            .run_analysis(Analysis::TopCategories, ChartStyle::Bar)
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("result.csv");
        state.export_result_csv(&out).unwrap();
        let text = std::fs::read_to_string(&out).unwrap();
        assert!(text.starts_with("Category,Value\n"));
        assert!(text.contains("kurta,2"));
    }
}

//! CSV Data Loader Module
//! Fetches CSV bytes from disk or over HTTP and parses them with Polars.

use super::table::{DataSource, SalesTable};
use crate::config::AppConfig;
use polars::prelude::*;
use reqwest::blocking::Client;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

/// Rows sampled for schema inference.
const INFER_SCHEMA_ROWS: usize = 10_000;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Please enter a valid URL ({reason}): '{url}'")]
    InvalidUrl { url: String, reason: String },
    #[error("Failed to load data from URL: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Failed to parse CSV: {0}")]
    Parse(#[from] PolarsError),
    #[error("Failed to parse CSV: input is empty, a header row is required")]
    EmptyInput,
}

/// Loads CSV datasets from local files or HTTP(S) URLs.
pub struct DataLoader {
    client: Client,
}

impl DataLoader {
    pub fn new(config: &AppConfig) -> Result<Self, LoaderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;
        Ok(Self { client })
    }

    /// Load a CSV file from disk.
    pub fn load_file(&self, path: &Path) -> Result<SalesTable, LoaderError> {
        info!(path = %path.display(), "loading CSV file");
        let bytes = std::fs::read(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let df = parse_csv(bytes)?;
        info!(rows = df.height(), cols = df.width(), "CSV file loaded");
        Ok(SalesTable::new(df, DataSource::File(path.to_path_buf())))
    }

    /// Fetch a CSV over HTTP(S) with a single GET. Non-2xx responses fail.
    pub fn load_url(&self, raw: &str) -> Result<SalesTable, LoaderError> {
        let url = validate_url(raw)?;
        info!(%url, "fetching CSV");

        let response = self.client.get(url.clone()).send().map_err(|e| {
            warn!(%url, error = %e, "request failed");
            e
        })?;
        debug!(status = %response.status(), "response received");
        let body = response.error_for_status()?.bytes()?;

        let df = parse_csv(body.to_vec())?;
        info!(rows = df.height(), cols = df.width(), "CSV fetched");
        Ok(SalesTable::new(df, DataSource::Url(url.to_string())))
    }
}

/// Check that `raw` is an absolute http or https URL.
pub fn validate_url(raw: &str) -> Result<Url, LoaderError> {
    let trimmed = raw.trim();
    let invalid = |reason: &str| LoaderError::InvalidUrl {
        url: trimmed.to_string(),
        reason: reason.to_string(),
    };

    if trimmed.is_empty() {
        return Err(invalid("empty"));
    }
    let url = Url::parse(trimmed).map_err(|e| invalid(&e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(&format!("unsupported scheme '{}'", other))),
    }
}

/// Parse CSV bytes into a DataFrame. The first line is the header.
pub fn parse_csv(bytes: Vec<u8>) -> Result<DataFrame, LoaderError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(LoaderError::EmptyInput);
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()?;

    Ok(df)
}

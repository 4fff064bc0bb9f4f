//! Data module - CSV loading from disk or URL

mod loader;
mod table;

pub use loader::{parse_csv, validate_url, DataLoader, LoaderError};
pub use table::{DataSource, SalesTable};

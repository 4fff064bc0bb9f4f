//! Sales Lens - CSV Sales Analysis & Chart Viewer
//!
//! Loads a sales CSV from disk or a URL, runs one of seven canned
//! aggregations and draws the result as a bar, pie or line chart.

pub mod analysis;
pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod state;

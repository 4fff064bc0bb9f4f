//! Analysis module - canned aggregations over the loaded table

mod kind;
mod result;
mod selector;

pub use kind::{Analysis, B2B, CATEGORY, QUANTITY, SHIP_STATE, SIZE};
pub use result::{format_value, AnalysisResult, ResultRow, RESULT_CATEGORY, RESULT_VALUE};
pub use selector::{run, AnalysisError};

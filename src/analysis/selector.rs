//! Analysis Selector
//! Dispatches an [`Analysis`] to its aggregation over the loaded table.

use super::kind::{Analysis, B2B, CATEGORY, QUANTITY, SHIP_STATE, SIZE};
use super::result::{AnalysisResult, RESULT_CATEGORY, RESULT_VALUE};
use crate::data::SalesTable;
use polars::prelude::*;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Please upload data first.")]
    NoData,
    #[error("'{analysis}' requires column '{column}', which is not in the dataset")]
    MissingColumn {
        analysis: Analysis,
        column: &'static str,
    },
    #[error("Error during analysis: {0}")]
    Polars(#[from] PolarsError),
}

/// Run `analysis` against the table.
///
/// Frequency counts are ranked by descending count. Grouped analyses
/// (`QuantityBySize`, `CategoryBySize`) keep first-appearance order of the key.
/// Every sort is stable, so equal values keep first-appearance order.
pub fn run(table: &SalesTable, analysis: Analysis) -> Result<AnalysisResult, AnalysisError> {
    if let Some(column) = analysis
        .required_columns()
        .iter()
        .copied()
        .find(|c| !table.has_column(c))
    {
        return Err(AnalysisError::MissingColumn { analysis, column });
    }

    let df = table.dataframe();
    let grouped = match analysis {
        Analysis::SizeCounts => ranked(frequency(df, SIZE)?),
        Analysis::QuantityBySize => sum_by(df, SIZE, QUANTITY)?,
        Analysis::TopProducts => ranked(frequency(df, CATEGORY)?),
        Analysis::TopCategories => ranked(frequency(df, CATEGORY)?),
        Analysis::B2bBreakdown => ranked(frequency(df, B2B)?),
        Analysis::CategoryBySize => count_by(df, SIZE, CATEGORY)?,
        Analysis::TopStates => ranked(frequency(df, SHIP_STATE)?),
    };
    let grouped = match analysis.top_n() {
        Some(n) => grouped.limit(n as IdxSize),
        None => grouped,
    };

    let result = AnalysisResult::from_frame(analysis, &grouped.collect()?)?;
    debug!(%analysis, rows = result.len(), "analysis complete");
    Ok(result)
}

/// Grouping key as text. Booleans print as `True` / `False`.
fn key_expr(df: &DataFrame, key: &str) -> PolarsResult<Expr> {
    let expr = match df.column(key)?.dtype() {
        DataType::Boolean => when(col(key))
            .then(lit("True"))
            .when(col(key).not())
            .then(lit("False"))
            .otherwise(lit(NULL))
            .cast(DataType::String),
        _ => col(key).cast(DataType::String),
    };
    Ok(expr.alias(RESULT_CATEGORY))
}

/// Occurrences of each non-null value of `key`.
fn frequency(df: &DataFrame, key: &str) -> PolarsResult<LazyFrame> {
    Ok(df
        .clone()
        .lazy()
        .select([key_expr(df, key)?])
        .filter(col(RESULT_CATEGORY).is_not_null())
        .group_by_stable([col(RESULT_CATEGORY)])
        .agg([len().cast(DataType::Float64).alias(RESULT_VALUE)]))
}

/// Sum of `value` per `key`. Non-numeric cells count as null.
fn sum_by(df: &DataFrame, key: &str, value: &str) -> PolarsResult<LazyFrame> {
    Ok(df
        .clone()
        .lazy()
        .select([
            key_expr(df, key)?,
            col(value).cast(DataType::Float64).alias(RESULT_VALUE),
        ])
        .filter(col(RESULT_CATEGORY).is_not_null())
        .group_by_stable([col(RESULT_CATEGORY)])
        .agg([col(RESULT_VALUE).sum()]))
}

/// Non-null entries of `target` per `key`.
fn count_by(df: &DataFrame, key: &str, target: &str) -> PolarsResult<LazyFrame> {
    Ok(df
        .clone()
        .lazy()
        .select([key_expr(df, key)?, col(target).alias(RESULT_VALUE)])
        .filter(col(RESULT_CATEGORY).is_not_null())
        .group_by_stable([col(RESULT_CATEGORY)])
        .agg([col(RESULT_VALUE)
            .count()
            .cast(DataType::Float64)
            .alias(RESULT_VALUE)]))
}

/// Descending by value, ties in first-appearance order.
fn ranked(grouped: LazyFrame) -> LazyFrame {
    grouped.sort(
        [RESULT_VALUE],
        SortMultipleOptions::default()
            .with_order_descending(true)
            .with_maintain_order(true),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::result::ResultRow;
    use crate::data::{parse_csv, DataSource};

    fn table(csv: &str) -> SalesTable {
        let df = parse_csv(csv.as_bytes().to_vec()).unwrap();
        SalesTable::new(df, DataSource::Url("memory".to_string()))
    }

    fn pairs(result: &AnalysisResult) -> Vec<(String, f64)> {
        result
            .rows
            .iter()
            .map(|ResultRow { category, value }| (category.clone(), *value))
            .collect()
    }

    fn pair(category: &str, value: f64) -> (String, f64) {
        (category.to_string(), value)
    }

    #[test]
    fn quantity_by_size_example() {
        let t = table("Size,Quantity\nS,2\nM,3\nS,1\n");
        let result = run(&t, Analysis::QuantityBySize).unwrap();
        assert_eq!(pairs(&result), vec![pair("S", 3.0), pair("M", 3.0)]);
    }

    #[test]
    fn frequency_ties_keep_first_seen_order_and_skip_nulls() {
        let t = table("Size,Quantity\nS,1\nM,1\n,1\nM,1\nXL,1\n");
        let result = run(&t, Analysis::SizeCounts).unwrap();
        assert_eq!(
            pairs(&result),
            vec![pair("M", 2.0), pair("S", 1.0), pair("XL", 1.0)]
        );
    }

    #[test]
    fn category_by_size_counts_non_null_categories() {
        let t = table("Size,Category\nS,kurta\nS,\nM,top\nS,set\n");
        let result = run(&t, Analysis::CategoryBySize).unwrap();
        assert_eq!(pairs(&result), vec![pair("S", 2.0), pair("M", 1.0)]);
    }

    #[test]
    fn b2b_booleans_print_capitalised() {
        let t = table("B2B\nTrue\nFalse\nFalse\n");
        let result = run(&t, Analysis::B2bBreakdown).unwrap();
        assert_eq!(pairs(&result), vec![pair("False", 2.0), pair("True", 1.0)]);
    }

    #[test]
    fn b2b_text_flags_are_kept_as_written() {
        let t = table("B2B\nyes\nno\nno\n");
        let result = run(&t, Analysis::B2bBreakdown).unwrap();
        assert_eq!(pairs(&result), vec![pair("no", 2.0), pair("yes", 1.0)]);
    }

    #[test]
    fn frequency_counts_are_ranked_by_count() {
        let t = table("Category\nkurta\nSet\nSet\nSet\nTop\nTop\n");
        let result = run(&t, Analysis::TopCategories).unwrap();
        assert_eq!(
            pairs(&result),
            vec![pair("Set", 3.0), pair("Top", 2.0), pair("kurta", 1.0)]
        );
    }

    #[test]
    fn grouped_analyses_keep_first_seen_order() {
        let t = table("Size,Quantity\nS,1\nM,5\nL,2\n");
        let result = run(&t, Analysis::QuantityBySize).unwrap();
        assert_eq!(
            pairs(&result),
            vec![pair("S", 1.0), pair("M", 5.0), pair("L", 2.0)]
        );
    }

    #[test]
    fn top_products_truncates_and_breaks_ties_by_first_seen() {
        let csv = "Category\na\nb\nc\nd\ne\nf\ng\ng\nf\n";
        let result = run(&table(csv), Analysis::TopProducts).unwrap();
        assert_eq!(
            pairs(&result),
            vec![
                pair("f", 2.0),
                pair("g", 2.0),
                pair("a", 1.0),
                pair("b", 1.0),
                pair("c", 1.0),
            ]
        );
    }

    #[test]
    fn top_categories_is_not_truncated() {
        let csv = "Category\na\nb\nc\nd\ne\nf\ng\n";
        let result = run(&table(csv), Analysis::TopCategories).unwrap();
        assert_eq!(result.len(), 7);
    }

    #[test]
    fn top_states_at_most_ten_sorted_descending() {
        let mut csv = String::from("Ship State\n");
        for i in 0..15 {
            for _ in 0..=i {
                csv.push_str(&format!("STATE{}\n", i));
            }
        }
        let result = run(&table(&csv), Analysis::TopStates).unwrap();
        assert_eq!(result.len(), 10);
        let values = result.values();
        assert!(values.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(result.rows[0].category, "STATE14");
        assert_eq!(values[0], 15.0);
    }

    #[test]
    fn missing_column_is_an_error() {
        let t = table("Size\nS\n");
        let err = run(&t, Analysis::QuantityBySize).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::MissingColumn {
                column: QUANTITY,
                ..
            }
        ));
    }

    #[test]
    fn all_null_key_gives_empty_result() {
        let t = table("Size,Quantity\n,1\n,2\n");
        let result = run(&t, Analysis::SizeCounts).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn non_numeric_quantity_is_ignored() {
        let t = table("Size,Quantity\nS,2\nS,n/a\nM,4\n");
        let result = run(&t, Analysis::QuantityBySize).unwrap();
        assert_eq!(pairs(&result), vec![pair("S", 2.0), pair("M", 4.0)]);
    }
}

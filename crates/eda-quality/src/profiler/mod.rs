//! Dataset profiling.
//!
//! This module provides functionality for summarizing datasets, including:
//! - Column classification (numeric, categorical, other)
//! - Missing-value counts per column
//! - Descriptive statistics for numeric columns
//! - Distinct counts and example values

mod statistics;
mod type_inference;

use crate::error::Result;
use crate::types::{ColumnSummary, DatasetSummary, NumericStats};
use polars::prelude::*;
use std::collections::HashSet;

pub(crate) use statistics::pearson;
pub(crate) use type_inference::{ClassifiedColumn, ColumnValues, classify_table};

use statistics::{distinct_numbers, numeric_stats};

/// Number of example values kept per column.
const EXAMPLE_VALUES: usize = 3;

/// Summarize every column of a table.
///
/// Numeric statistics of a column without values are `None`; a table with
/// zero rows produces zero missing shares. Never fails on degenerate input.
///
/// # Example
///
/// ```rust,ignore
/// use eda_quality::summarize_dataset;
/// use polars::prelude::*;
///
/// let df = df!("age" => [Some(10), Some(20), None])?;
/// let summary = summarize_dataset(&df)?;
/// assert_eq!(summary.columns[0].missing_count, 1);
/// ```
pub fn summarize_dataset(df: &DataFrame) -> Result<DatasetSummary> {
    let classified = classify_table(df)?;
    Ok(summarize_classified(df.height(), &classified))
}

/// Build the summary from already classified columns.
pub(crate) fn summarize_classified(n_rows: usize, columns: &[ClassifiedColumn]) -> DatasetSummary {
    let columns: Vec<ColumnSummary> = columns
        .iter()
        .map(|col| summarize_column(n_rows, col))
        .collect();

    DatasetSummary {
        n_rows,
        n_cols: columns.len(),
        columns,
    }
}

fn summarize_column(n_rows: usize, col: &ClassifiedColumn) -> ColumnSummary {
    let missing_count = col.values.missing_count();
    let count = col.values.len() - missing_count;
    let missing_share = share(missing_count, n_rows);

    let (distinct_count, example_values, numeric) = match &col.values {
        ColumnValues::Numeric(values) => {
            let present = col.values.present_numbers();
            let examples = first_distinct(values.iter().flatten().map(|v| format!("{}", v)));
            (
                col.exact_distinct
                    .unwrap_or_else(|| distinct_numbers(&present)),
                examples,
                Some(numeric_stats(&present)),
            )
        }
        ColumnValues::Text(values) => {
            let distinct = values
                .iter()
                .flatten()
                .map(String::as_str)
                .collect::<HashSet<&str>>()
                .len();
            let examples = first_distinct(values.iter().flatten().cloned());
            (distinct, examples, None)
        }
    };

    ColumnSummary {
        name: col.name.clone(),
        dtype: col.dtype,
        source_dtype: col.source_dtype.clone(),
        count,
        missing_count,
        missing_share,
        distinct_count,
        example_values,
        numeric,
    }
}

/// `part / total`, guarded against an empty table.
pub(crate) fn share(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}

fn first_distinct(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut examples: Vec<String> = Vec::with_capacity(EXAMPLE_VALUES);
    for value in values {
        if examples.len() == EXAMPLE_VALUES {
            break;
        }
        if !examples.contains(&value) {
            examples.push(value);
        }
    }
    examples
}

/// Flatten a summary into one row per column, for printing or CSV export.
///
/// Columns: `name, dtype, count, missing_count, missing_share, distinct_count,
/// mean, std, min, max`. Statistics of non-numeric columns are null.
pub fn flatten_summary(summary: &DatasetSummary) -> Result<DataFrame> {
    let cols = &summary.columns;
    let stat = |f: fn(&NumericStats) -> Option<f64>| -> Vec<Option<f64>> {
        cols.iter()
            .map(|c| c.numeric.as_ref().and_then(f))
            .collect()
    };

    let names: Vec<&str> = cols.iter().map(|c| c.name.as_str()).collect();
    let dtypes: Vec<&str> = cols.iter().map(|c| c.dtype.as_str()).collect();
    let counts: Vec<u64> = cols.iter().map(|c| c.count as u64).collect();
    let missing: Vec<u64> = cols.iter().map(|c| c.missing_count as u64).collect();
    let shares: Vec<f64> = cols.iter().map(|c| c.missing_share).collect();
    let distinct: Vec<u64> = cols.iter().map(|c| c.distinct_count as u64).collect();

    let df = DataFrame::new(vec![
        Column::new("name".into(), names),
        Column::new("dtype".into(), dtypes),
        Column::new("count".into(), counts),
        Column::new("missing_count".into(), missing),
        Column::new("missing_share".into(), shares),
        Column::new("distinct_count".into(), distinct),
        Column::new("mean".into(), stat(|s| s.mean)),
        Column::new("std".into(), stat(|s| s.std)),
        Column::new("min".into(), stat(|s| s.min)),
        Column::new("max".into(), stat(|s| s.max)),
    ])?;

    Ok(df)
}

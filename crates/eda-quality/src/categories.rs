//! Most frequent values of categorical columns.

use crate::error::Result;
use crate::profiler::{ClassifiedColumn, ColumnValues, classify_table};
use crate::types::{CategoryCount, CategoryTable, ColumnDtype, TopCategoriesReport};
use polars::prelude::*;
use std::collections::HashMap;

/// Rank the most frequent values of up to `max_columns` categorical columns.
///
/// Columns are taken in table order. Values are sorted by descending count;
/// ties keep the value that was seen first. Each table holds at most `top_k`
/// rows.
pub fn top_categories(df: &DataFrame, max_columns: usize, top_k: usize) -> Result<TopCategoriesReport> {
    let classified = classify_table(df)?;
    Ok(top_categories_from_classified(&classified, max_columns, top_k))
}

pub(crate) fn top_categories_from_classified(
    columns: &[ClassifiedColumn],
    max_columns: usize,
    top_k: usize,
) -> TopCategoriesReport {
    let tables = columns
        .iter()
        .filter(|col| col.dtype == ColumnDtype::Categorical)
        .take(max_columns)
        .filter_map(|col| match &col.values {
            ColumnValues::Text(values) => Some(CategoryTable {
                column: col.name.clone(),
                values: rank_values(values, top_k),
            }),
            ColumnValues::Numeric(_) => None,
        })
        .collect();

    TopCategoriesReport { tables }
}

fn rank_values(values: &[Option<String>], top_k: usize) -> Vec<CategoryCount> {
    // Counts in first-seen order; the stable sort below keeps that order on ties.
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for value in values.iter().flatten() {
        match index.get(value.as_str()) {
            Some(&pos) => counts[pos].1 += 1,
            None => {
                index.insert(value.as_str(), counts.len());
                counts.push((value.as_str(), 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));

    counts
        .into_iter()
        .take(top_k)
        .map(|(value, count)| CategoryCount {
            value: value.to_string(),
            count,
        })
        .collect()
}

//! Missing-value report.

use crate::error::Result;
use crate::profiler::{ClassifiedColumn, classify_table, share};
use crate::types::{MissingEntry, MissingTable};
use polars::prelude::*;

/// Count missing cells per column, in table order.
///
/// A cell is missing when it is null (or NaN in a float column). The share is
/// relative to the table height and is 0.0 for an empty table.
pub fn missing_table(df: &DataFrame) -> Result<MissingTable> {
    let classified = classify_table(df)?;
    Ok(missing_from_classified(df.height(), &classified))
}

pub(crate) fn missing_from_classified(n_rows: usize, columns: &[ClassifiedColumn]) -> MissingTable {
    let entries = columns
        .iter()
        .map(|col| {
            let missing_count = col.values.missing_count();
            MissingEntry {
                column: col.name.clone(),
                missing_count,
                missing_share: share(missing_count, n_rows),
            }
        })
        .collect();

    MissingTable::new(entries)
}

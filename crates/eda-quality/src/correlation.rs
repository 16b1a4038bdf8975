//! Pairwise Pearson correlation across numeric columns.

use crate::error::Result;
use crate::profiler::{ClassifiedColumn, ColumnValues, classify_table, pearson};
use crate::types::CorrelationMatrix;
use polars::prelude::*;
use tracing::debug;

/// Minimum number of present values for a column to take part.
const MIN_VALUES: usize = 2;

/// Compute the correlation matrix of the numeric columns of a table.
///
/// Columns with fewer than two present values are skipped. Each pair uses
/// only the rows where both columns are present. The result is empty when
/// fewer than two columns qualify.
pub fn correlation_matrix(df: &DataFrame) -> Result<CorrelationMatrix> {
    let classified = classify_table(df)?;
    Ok(correlation_from_classified(&classified))
}

pub(crate) fn correlation_from_classified(columns: &[ClassifiedColumn]) -> CorrelationMatrix {
    let numeric: Vec<(&str, &[Option<f64>])> = columns
        .iter()
        .filter_map(|col| match &col.values {
            ColumnValues::Numeric(values)
                if values.iter().flatten().count() >= MIN_VALUES =>
            {
                Some((col.name.as_str(), values.as_slice()))
            }
            _ => None,
        })
        .collect();

    if numeric.len() < 2 {
        debug!(
            "Skipping correlation: {} eligible numeric column(s)",
            numeric.len()
        );
        return CorrelationMatrix::default();
    }

    let n = numeric.len();
    let mut values = vec![vec![None; n]; n];
    for i in 0..n {
        values[i][i] = Some(1.0);
        for j in (i + 1)..n {
            let r = pearson(numeric[i].1, numeric[j].1);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix {
        columns: numeric.iter().map(|(name, _)| name.to_string()).collect(),
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correlation_sample_frame() {
        let df = DataFrame::new(vec![
            Column::new("age".into(), &[Some(10i64), Some(20), Some(30), None]),
            Column::new("height".into(), &[140i64, 150, 160, 170]),
            Column::new("city".into(), &[Some("A"), Some("B"), Some("A"), None]),
        ])
        .unwrap();

        let corr = correlation_matrix(&df).unwrap();

        assert_eq!(corr.columns, vec!["age".to_string(), "height".to_string()]);
        let r = corr.get("age", "height").unwrap();
        assert!((r - 1.0).abs() < 1e-9);
        assert!(corr.get("city", "age").is_none());
    }

    #[test]
    fn test_correlation_is_symmetric_with_unit_diagonal() {
        let df = DataFrame::new(vec![
            Column::new("a".into(), &[1.0f64, 2.0, 3.0, 4.0, 5.0]),
            Column::new("b".into(), &[2.0f64, 1.0, 4.0, 3.0, 6.0]),
            Column::new("c".into(), &[Some(5.0f64), None, Some(1.0), Some(2.0), Some(0.5)]),
        ])
        .unwrap();

        let corr = correlation_matrix(&df).unwrap();
        let n = corr.columns.len();
        assert_eq!(n, 3);
        for i in 0..n {
            assert_eq!(corr.values[i][i], Some(1.0));
            for j in 0..n {
                assert_eq!(corr.values[i][j], corr.values[j][i]);
            }
        }
    }

    #[test]
    fn test_single_numeric_column_gives_empty_matrix() {
        let df = DataFrame::new(vec![
            Column::new("x".into(), &[1i32, 2, 3]),
            Column::new("label".into(), &["a", "b", "c"]),
        ])
        .unwrap();

        assert!(correlation_matrix(&df).unwrap().is_empty());
    }

    #[test]
    fn test_sparse_column_is_skipped() {
        let df = DataFrame::new(vec![
            Column::new("x".into(), &[Some(1.0f64), Some(2.0), Some(3.0)]),
            Column::new("y".into(), &[Some(3.0f64), Some(1.0), Some(2.0)]),
            Column::new("lonely".into(), &[None, Some(1.0f64), None]),
        ])
        .unwrap();

        let corr = correlation_matrix(&df).unwrap();
        assert_eq!(corr.columns, vec!["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn test_constant_pair_is_undefined() {
        let df = DataFrame::new(vec![
            Column::new("flat".into(), &[1.0f64, 1.0, 1.0]),
            Column::new("y".into(), &[1.0f64, 2.0, 3.0]),
        ])
        .unwrap();

        let corr = correlation_matrix(&df).unwrap();
        assert_eq!(corr.get("flat", "y"), None);
        assert_eq!(corr.get("flat", "flat"), Some(1.0));
    }
}

//! Column classification.
//!
//! Each column is classified once into a [`ColumnDtype`] and its cells are
//! extracted into [`ColumnValues`], which every downstream computation reuses.
//! Float NaN cells are treated as missing, like nulls.

use crate::error::Result;
use crate::types::ColumnDtype;
use crate::utils::{is_categorical_dtype, is_numeric_dtype, parse_numeric_string};
use polars::prelude::*;

/// Extracted cell values of a classified column. `None` marks a missing cell.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ColumnValues {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

impl ColumnValues {
    pub(crate) fn len(&self) -> usize {
        match self {
            Self::Numeric(v) => v.len(),
            Self::Text(v) => v.len(),
        }
    }

    pub(crate) fn missing_count(&self) -> usize {
        match self {
            Self::Numeric(v) => v.iter().filter(|x| x.is_none()).count(),
            Self::Text(v) => v.iter().filter(|x| x.is_none()).count(),
        }
    }

    /// Non-missing numeric values, empty for text columns.
    pub(crate) fn present_numbers(&self) -> Vec<f64> {
        match self {
            Self::Numeric(v) => v.iter().flatten().copied().collect(),
            Self::Text(_) => Vec::new(),
        }
    }
}

/// A column after classification.
#[derive(Debug, Clone)]
pub(crate) struct ClassifiedColumn {
    pub name: String,
    pub dtype: ColumnDtype,
    pub source_dtype: String,
    pub values: ColumnValues,
    /// Distinct non-missing values counted on the source dtype, for integer
    /// columns whose values may not survive the cast to `f64`.
    pub exact_distinct: Option<usize>,
}

/// Classify every column of a frame, in order.
pub(crate) fn classify_table(df: &DataFrame) -> Result<Vec<ClassifiedColumn>> {
    df.get_columns().iter().map(classify_column).collect()
}

/// Classify a single column and extract its values.
///
/// - integer and float columns are numeric;
/// - string columns are numeric when they have at least one value and every
///   value parses as a number, otherwise categorical;
/// - boolean and polars categorical columns are categorical;
/// - anything else (dates, nested values, all-null columns) is `Other`.
pub(crate) fn classify_column(column: &Column) -> Result<ClassifiedColumn> {
    let series = column.as_materialized_series();
    let name = series.name().to_string();
    let source_dtype = format!("{:?}", series.dtype());

    let (dtype, values) = if is_numeric_dtype(series.dtype()) {
        (ColumnDtype::Numeric, ColumnValues::Numeric(float_values(series)?))
    } else if series.dtype() == &DataType::String {
        classify_strings(series)?
    } else if is_categorical_dtype(series.dtype()) {
        let as_text = series.cast(&DataType::String)?;
        (ColumnDtype::Categorical, ColumnValues::Text(string_values(&as_text)?))
    } else {
        (ColumnDtype::Other, ColumnValues::Text(rendered_values(series)?))
    };

    let exact_distinct = if series.dtype().is_integer() {
        Some(series.drop_nulls().n_unique()?)
    } else {
        None
    };

    tracing::debug!("Classified column '{}' ({}) as {}", name, source_dtype, dtype);

    Ok(ClassifiedColumn {
        name,
        dtype,
        source_dtype,
        values,
        exact_distinct,
    })
}

fn classify_strings(series: &Series) -> Result<(ColumnDtype, ColumnValues)> {
    let strings = string_values(series)?;

    let mut parsed = Vec::with_capacity(strings.len());
    let mut has_value = false;
    let mut all_numeric = true;
    for cell in &strings {
        match cell {
            Some(s) => {
                has_value = true;
                match parse_numeric_string(s) {
                    Some(v) => parsed.push(Some(v)),
                    None => {
                        all_numeric = false;
                        break;
                    }
                }
            }
            None => parsed.push(None),
        }
    }

    if has_value && all_numeric {
        Ok((ColumnDtype::Numeric, ColumnValues::Numeric(parsed)))
    } else {
        Ok((ColumnDtype::Categorical, ColumnValues::Text(strings)))
    }
}

fn float_values(series: &Series) -> Result<Vec<Option<f64>>> {
    let float_series = series.cast(&DataType::Float64)?;
    Ok(float_series
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect())
}

fn string_values(series: &Series) -> Result<Vec<Option<String>>> {
    Ok(series
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

fn rendered_values(series: &Series) -> Result<Vec<Option<String>>> {
    let mut values = Vec::with_capacity(series.len());
    for idx in 0..series.len() {
        let value = series.get(idx)?;
        if value.is_null() {
            values.push(None);
        } else {
            values.push(Some(format!("{}", value)));
        }
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(series: Series) -> ClassifiedColumn {
        classify_column(&Column::from(series)).unwrap()
    }

    #[test]
    fn test_integer_column_is_numeric() {
        let col = classify(Series::new("age".into(), &[Some(10i64), Some(20), None]));
        assert_eq!(col.dtype, ColumnDtype::Numeric);
        assert_eq!(
            col.values,
            ColumnValues::Numeric(vec![Some(10.0), Some(20.0), None])
        );
        assert_eq!(col.source_dtype, "Int64");
    }

    #[test]
    fn test_large_integers_keep_exact_distinct_count() {
        let big = 1i64 << 53;
        let col = classify(Series::new("id".into(), &[Some(big), Some(big + 1), None, Some(big)]));
        assert_eq!(col.exact_distinct, Some(2));

        let floats = classify(Series::new("x".into(), &[1.0f64, 2.0]));
        assert_eq!(floats.exact_distinct, None);
    }

    #[test]
    fn test_float_nan_counts_as_missing() {
        let col = classify(Series::new("x".into(), &[1.0f64, f64::NAN, 3.0]));
        assert_eq!(col.values.missing_count(), 1);
        assert_eq!(col.values.present_numbers(), vec![1.0, 3.0]);
    }

    #[test]
    fn test_numeric_strings_are_numeric() {
        let col = classify(Series::new(
            "price".into(),
            &[Some("$1,000"), None, Some("2.5")],
        ));
        assert_eq!(col.dtype, ColumnDtype::Numeric);
        assert_eq!(
            col.values,
            ColumnValues::Numeric(vec![Some(1000.0), None, Some(2.5)])
        );
    }

    #[test]
    fn test_mixed_strings_are_categorical() {
        let col = classify(Series::new("code".into(), &["1", "2", "ID_3"]));
        assert_eq!(col.dtype, ColumnDtype::Categorical);
        assert_eq!(col.values.len(), 3);
        assert_eq!(col.values.missing_count(), 0);
    }

    #[test]
    fn test_all_missing_strings_are_categorical() {
        let col = classify(Series::new("note".into(), &[None::<&str>, None]));
        assert_eq!(col.dtype, ColumnDtype::Categorical);
        assert_eq!(col.values.missing_count(), 2);
    }

    #[test]
    fn test_empty_string_is_not_missing() {
        let col = classify(Series::new("s".into(), &[Some(""), None]));
        assert_eq!(col.dtype, ColumnDtype::Categorical);
        assert_eq!(col.values.missing_count(), 1);
    }

    #[test]
    fn test_boolean_is_categorical() {
        let col = classify(Series::new("flag".into(), &[true, false, true]));
        assert_eq!(col.dtype, ColumnDtype::Categorical);
        assert_eq!(
            col.values,
            ColumnValues::Text(vec![
                Some("true".to_string()),
                Some("false".to_string()),
                Some("true".to_string())
            ])
        );
    }

    #[test]
    fn test_date_is_other() {
        let dates = Series::new("day".into(), &[Some(0i32), None, Some(1)])
            .cast(&DataType::Date)
            .unwrap();
        let col = classify(dates);
        assert_eq!(col.dtype, ColumnDtype::Other);
        assert_eq!(col.values.missing_count(), 1);
    }

    #[test]
    fn test_classify_table_keeps_order() {
        let df = DataFrame::new(vec![
            Column::new("b".into(), &[1i32, 2]),
            Column::new("a".into(), &["x", "y"]),
        ])
        .unwrap();
        let cols = classify_table(&df).unwrap();
        let names: Vec<&str> = cols.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}

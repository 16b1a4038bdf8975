//! Table construction and loading.
//!
//! The analysis works on a polars [`DataFrame`]; a `None` cell is a missing
//! value. [`build_table`] assembles a frame from individual series and reports
//! ragged or duplicated columns with the offending column name.

use crate::error::{EdaError, Result, ResultExt};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// Number of rows polars inspects to infer column types when reading CSV.
const INFER_SCHEMA_ROWS: usize = 1000;

/// Assemble a table from named columns.
///
/// Every column must have the same length as the first one and names must be
/// unique.
pub fn build_table(columns: Vec<Series>) -> Result<DataFrame> {
    let expected = columns.first().map(|s| s.len()).unwrap_or(0);
    let mut seen: HashSet<String> = HashSet::with_capacity(columns.len());

    for series in &columns {
        let name = series.name().to_string();
        if series.len() != expected {
            return Err(EdaError::RaggedColumns {
                column: name,
                expected,
                actual: series.len(),
            });
        }
        if !seen.insert(name.clone()) {
            return Err(EdaError::DuplicateColumn(name));
        }
    }

    let columns: Vec<Column> = columns.into_iter().map(Column::from).collect();
    Ok(DataFrame::new(columns)?)
}

/// Read a CSV file with a header row.
pub fn load_csv(path: impl AsRef<Path>, separator: u8) -> Result<DataFrame> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(EdaError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Input file not found: {}", path.display()),
        )));
    }

    info!("Loading dataset from: {}", path.display());

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_parse_options(
            CsvParseOptions::default()
                .with_separator(separator)
                .with_quote_char(Some(b'"')),
        )
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .context(format!("Failed to open {}", path.display()))?
        .finish()
        .context(format!("Failed to parse {}", path.display()))?;

    debug!("Loaded shape: {:?}", df.shape());
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_build_table_ok() {
        let df = build_table(vec![
            Series::new("a".into(), &[1i64, 2, 3]),
            Series::new("b".into(), &[Some("x"), None, Some("z")]),
        ])
        .unwrap();

        assert_eq!(df.shape(), (3, 2));
    }

    #[test]
    fn test_build_table_ragged_columns() {
        let err = build_table(vec![
            Series::new("a".into(), &[1i64, 2, 3]),
            Series::new("b".into(), &[1i64, 2]),
        ])
        .unwrap_err();

        match err {
            EdaError::RaggedColumns {
                column,
                expected,
                actual,
            } => {
                assert_eq!(column, "b");
                assert_eq!(expected, 3);
                assert_eq!(actual, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_build_table_duplicate_column() {
        let err = build_table(vec![
            Series::new("a".into(), &[1i64]),
            Series::new("a".into(), &[2i64]),
        ])
        .unwrap_err();

        assert_eq!(err.error_code(), "DUPLICATE_COLUMN");
    }

    #[test]
    fn test_build_table_empty() {
        let df = build_table(Vec::new()).unwrap();
        assert_eq!(df.shape(), (0, 0));
    }

    #[test]
    fn test_load_csv_reads_nulls() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "age;city").unwrap();
        writeln!(file, "10;A").unwrap();
        writeln!(file, ";B").unwrap();
        file.flush().unwrap();

        let df = load_csv(file.path(), b';').unwrap();
        assert_eq!(df.shape(), (2, 2));
        assert_eq!(df.column("age").unwrap().null_count(), 1);
    }

    #[test]
    fn test_load_csv_missing_file() {
        let err = load_csv("/definitely/not/here.csv", b',').unwrap_err();
        assert_eq!(err.error_code(), "IO_ERROR");
    }
}

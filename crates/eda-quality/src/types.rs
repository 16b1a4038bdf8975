use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Column Classification
// ============================================================================

/// Analysis type of a column, decided once per column and reused downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnDtype {
    /// Every non-missing value is a number.
    Numeric,
    /// Text, boolean, or polars categorical values.
    Categorical,
    /// Dates, times, nested values, or all-null columns of unknown type.
    Other,
}

impl ColumnDtype {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Categorical => "categorical",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ColumnDtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Summary Types
// ============================================================================

/// Descriptive statistics of a numeric column.
///
/// Every field is `None` when the column has no non-missing values; `std` is
/// also `None` with a single value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NumericStats {
    pub mean: Option<f64>,
    /// Sample standard deviation (n - 1 denominator).
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Summary of a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    /// Name of the column.
    pub name: String,
    /// Classification used by the analysis.
    pub dtype: ColumnDtype,
    /// Storage type reported by the table (e.g. "Int64", "String").
    pub source_dtype: String,
    /// Number of non-missing values.
    pub count: usize,
    /// Number of missing values.
    pub missing_count: usize,
    /// `missing_count / n_rows`, 0.0 for an empty table.
    pub missing_share: f64,
    /// Number of distinct non-missing values.
    pub distinct_count: usize,
    /// A few distinct non-missing values in encounter order.
    pub example_values: Vec<String>,
    /// Present only for numeric columns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric: Option<NumericStats>,
}

impl ColumnSummary {
    pub fn is_numeric(&self) -> bool {
        self.dtype == ColumnDtype::Numeric
    }

    pub fn is_categorical(&self) -> bool {
        self.dtype == ColumnDtype::Categorical
    }
}

/// Summary of a whole table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub n_rows: usize,
    pub n_cols: usize,
    pub columns: Vec<ColumnSummary>,
}

impl DatasetSummary {
    /// Look up a column summary by name.
    pub fn column(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn numeric_columns(&self) -> impl Iterator<Item = &ColumnSummary> {
        self.columns.iter().filter(|c| c.is_numeric())
    }

    pub fn categorical_columns(&self) -> impl Iterator<Item = &ColumnSummary> {
        self.columns.iter().filter(|c| c.is_categorical())
    }
}

// ============================================================================
// Missing Values
// ============================================================================

/// Missing-value counts for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingEntry {
    pub column: String,
    pub missing_count: usize,
    pub missing_share: f64,
}

/// Missing-value report, ordered as the columns appear in the table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MissingTable {
    pub entries: Vec<MissingEntry>,
}

impl MissingTable {
    pub fn new(entries: Vec<MissingEntry>) -> Self {
        Self { entries }
    }

    /// Look up the entry for a column.
    pub fn get(&self, column: &str) -> Option<&MissingEntry> {
        self.entries.iter().find(|e| e.column == column)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MissingEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Largest missing share across columns, 0.0 for an empty report.
    pub fn max_missing_share(&self) -> f64 {
        self.entries
            .iter()
            .map(|e| e.missing_share)
            .fold(0.0, f64::max)
    }

    /// Columns whose missing share is at least `share`, most-missing first.
    pub fn columns_at_least(&self, share: f64) -> Vec<&MissingEntry> {
        let mut hits: Vec<&MissingEntry> = self
            .entries
            .iter()
            .filter(|e| e.missing_count > 0 && e.missing_share >= share)
            .collect();
        hits.sort_by(|a, b| b.missing_share.total_cmp(&a.missing_share));
        hits
    }
}

// ============================================================================
// Correlation
// ============================================================================

/// Symmetric Pearson correlation matrix over numeric columns.
///
/// `values[i][j]` is `None` when the pair has fewer than two rows where both
/// columns are present, or when one of them is constant on those rows.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    fn index_of(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Correlation between two columns, `None` if either is absent or undefined.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        self.values[i][j]
    }
}

// ============================================================================
// Top Categories
// ============================================================================

/// A value and how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
}

/// Ranked most-frequent values of one categorical column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTable {
    pub column: String,
    pub values: Vec<CategoryCount>,
}

/// Top values for each reported categorical column, in table order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TopCategoriesReport {
    pub tables: Vec<CategoryTable>,
}

impl TopCategoriesReport {
    pub fn get(&self, column: &str) -> Option<&CategoryTable> {
        self.tables.iter().find(|t| t.column == column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

// ============================================================================
// Quality Flags
// ============================================================================

/// Outcome of the quality rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityFlags {
    pub too_few_rows: bool,
    pub too_many_columns: bool,
    pub has_constant_columns: bool,
    pub has_high_cardinality_categoricals: bool,
    pub has_high_missingness: bool,
    pub max_missing_share: f64,
    pub constant_columns: Vec<String>,
    pub high_cardinality_columns: Vec<String>,
    pub high_missingness_columns: Vec<String>,
    /// Heuristic score in [0.0, 1.0].
    pub quality_score: f64,
}

impl QualityFlags {
    /// Names of the triggered flags, in a fixed order.
    pub fn triggered(&self) -> Vec<&'static str> {
        [
            ("too_few_rows", self.too_few_rows),
            ("too_many_columns", self.too_many_columns),
            ("has_constant_columns", self.has_constant_columns),
            (
                "has_high_cardinality_categoricals",
                self.has_high_cardinality_categoricals,
            ),
            ("has_high_missingness", self.has_high_missingness),
        ]
        .into_iter()
        .filter_map(|(name, on)| on.then_some(name))
        .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Rule-based quality scorer.
//!
//! Each rule looks at the dataset summary or the missing-value report on its
//! own. A triggered rule deducts its penalty once, however many columns
//! trigger it, and the final score is clamped to [0, 1].

use crate::config::QualityConfig;
use crate::error::{EdaError, Result};
use crate::types::{ColumnSummary, DatasetSummary, MissingTable, QualityFlags};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Quality rules known to the scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityRule {
    TooFewRows,
    TooManyColumns,
    ConstantColumns,
    HighCardinalityCategoricals,
    HighMissingness,
}

impl QualityRule {
    pub const ALL: [QualityRule; 5] = [
        Self::TooFewRows,
        Self::TooManyColumns,
        Self::ConstantColumns,
        Self::HighCardinalityCategoricals,
        Self::HighMissingness,
    ];

    /// Penalty deducted when this rule triggers.
    pub fn penalty(&self, config: &QualityConfig) -> f64 {
        match self {
            Self::TooFewRows => config.too_few_rows_penalty,
            Self::TooManyColumns => config.too_many_columns_penalty,
            Self::ConstantColumns => config.constant_column_penalty,
            Self::HighCardinalityCategoricals => config.high_cardinality_penalty,
            Self::HighMissingness => config.high_missingness_penalty,
        }
    }

    pub fn flag_name(&self) -> &'static str {
        match self {
            Self::TooFewRows => "too_few_rows",
            Self::TooManyColumns => "too_many_columns",
            Self::ConstantColumns => "has_constant_columns",
            Self::HighCardinalityCategoricals => "has_high_cardinality_categoricals",
            Self::HighMissingness => "has_high_missingness",
        }
    }
}

/// Derives quality flags and a score from a summary and a missing-value report.
#[derive(Debug, Clone, Default)]
pub struct QualityScorer {
    config: QualityConfig,
}

impl QualityScorer {
    pub fn new(config: QualityConfig) -> Self {
        Self { config }
    }

    /// Evaluate every rule and compute the score.
    ///
    /// Fails with [`EdaError::ColumnMismatch`] when the missing-value report does
    /// not describe exactly the columns of the summary.
    pub fn score(&self, summary: &DatasetSummary, missing: &MissingTable) -> Result<QualityFlags> {
        validate_same_columns(summary, missing)?;

        let config = &self.config;

        let too_few_rows = summary.n_rows < config.min_rows;
        let too_many_columns = summary.n_cols > config.max_columns;

        let constant_columns: Vec<String> = summary
            .columns
            .iter()
            .filter(|c| is_constant(c))
            .map(|c| c.name.clone())
            .collect();

        let high_cardinality_columns: Vec<String> = summary
            .categorical_columns()
            .filter(|c| is_high_cardinality(c, config))
            .map(|c| c.name.clone())
            .collect();

        let high_missingness_columns: Vec<String> = missing
            .iter()
            .filter(|e| e.missing_share > config.high_missingness_threshold)
            .map(|e| e.column.clone())
            .collect();

        let triggered = [
            (QualityRule::TooFewRows, too_few_rows),
            (QualityRule::TooManyColumns, too_many_columns),
            (QualityRule::ConstantColumns, !constant_columns.is_empty()),
            (
                QualityRule::HighCardinalityCategoricals,
                !high_cardinality_columns.is_empty(),
            ),
            (QualityRule::HighMissingness, !high_missingness_columns.is_empty()),
        ];

        let mut score = 1.0;
        for (rule, on) in triggered {
            if on {
                let penalty = rule.penalty(config);
                debug!("Rule {} triggered (-{:.2})", rule.flag_name(), penalty);
                score -= penalty;
            }
        }
        let quality_score = f64::clamp(score, 0.0, 1.0);

        if !constant_columns.is_empty() {
            warn!("Constant columns: {:?}", constant_columns);
        }
        if !high_missingness_columns.is_empty() {
            warn!("Columns with high missingness: {:?}", high_missingness_columns);
        }
        info!("Quality score: {:.2}", quality_score);

        Ok(QualityFlags {
            too_few_rows,
            too_many_columns,
            has_constant_columns: !constant_columns.is_empty(),
            has_high_cardinality_categoricals: !high_cardinality_columns.is_empty(),
            has_high_missingness: !high_missingness_columns.is_empty(),
            max_missing_share: missing.max_missing_share(),
            constant_columns,
            high_cardinality_columns,
            high_missingness_columns,
            quality_score,
        })
    }
}

/// Compute quality flags with the given rule configuration.
///
/// # Example
///
/// ```rust,ignore
/// use eda_quality::{QualityConfig, compute_quality_flags, missing_table, summarize_dataset};
///
/// let summary = summarize_dataset(&df)?;
/// let missing = missing_table(&df)?;
/// let flags = compute_quality_flags(&summary, &missing, &QualityConfig::default())?;
/// assert!((0.0..=1.0).contains(&flags.quality_score));
/// ```
pub fn compute_quality_flags(
    summary: &DatasetSummary,
    missing: &MissingTable,
    config: &QualityConfig,
) -> Result<QualityFlags> {
    QualityScorer::new(config.clone()).score(summary, missing)
}

/// A column with at least one value whose values are all equal.
fn is_constant(col: &ColumnSummary) -> bool {
    col.count > 0 && col.distinct_count == 1
}

fn is_high_cardinality(col: &ColumnSummary, config: &QualityConfig) -> bool {
    if col.count == 0 {
        return false;
    }
    let ratio = col.distinct_count as f64 / col.count as f64;
    ratio >= config.high_cardinality_ratio
        && col.distinct_count >= config.high_cardinality_min_distinct
}

fn validate_same_columns(summary: &DatasetSummary, missing: &MissingTable) -> Result<()> {
    let mismatch = |column: &str| EdaError::ColumnMismatch {
        column: column.to_string(),
    };

    let mut reported: HashSet<&str> = HashSet::with_capacity(missing.len());
    for entry in missing.iter() {
        if !reported.insert(entry.column.as_str()) {
            return Err(mismatch(&entry.column));
        }
    }

    // First gap in summary order, then any column the summary does not know.
    if let Some(col) = summary
        .columns
        .iter()
        .find(|c| !reported.contains(c.name.as_str()))
    {
        return Err(mismatch(&col.name));
    }

    let summarized: HashSet<&str> = summary.column_names().collect();
    if let Some(entry) = missing
        .iter()
        .find(|e| !summarized.contains(e.column.as_str()))
    {
        return Err(mismatch(&entry.column));
    }

    Ok(())
}

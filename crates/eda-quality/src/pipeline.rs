//! End-to-end analysis of one table.
//!
//! [`analyze`] classifies the columns once and feeds the result to every
//! stage, so the summary, the missing-value report and the quality flags
//! always describe the same columns.

use crate::categories::top_categories_from_classified;
use crate::config::EdaConfig;
use crate::correlation::correlation_from_classified;
use crate::error::{Result, ResultExt};
use crate::profiler::{classify_table, summarize_classified};
use crate::quality::{QualityScorer, missing_from_classified};
use crate::types::{CorrelationMatrix, DatasetSummary, MissingTable, QualityFlags, TopCategoriesReport};
use chrono::Local;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

/// Everything computed for one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdaReport {
    /// Local timestamp, `YYYY-MM-DD HH:MM:SS`.
    pub generated_at: String,
    /// Where the table came from, if known.
    pub source: Option<String>,
    pub summary: DatasetSummary,
    pub missing: MissingTable,
    pub correlation: CorrelationMatrix,
    pub top_categories: TopCategoriesReport,
    pub quality: QualityFlags,
    /// Wall-clock analysis time in milliseconds.
    pub duration_ms: u64,
}

static_assertions::assert_impl_all!(EdaReport: Send, Sync);

impl EdaReport {
    /// Attach the origin of the analyzed table.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Run every analysis over `df` with the given settings.
pub fn analyze(df: &DataFrame, config: &EdaConfig) -> Result<EdaReport> {
    config.validate()?;
    let start_time = Instant::now();

    info!("Starting analysis of {} rows x {} columns", df.height(), df.width());

    let classified = classify_table(df).context("Failed to classify columns")?;

    let summary = summarize_classified(df.height(), &classified);
    info!(
        "Summary: {} numeric, {} categorical",
        summary.numeric_columns().count(),
        summary.categorical_columns().count()
    );

    let missing = missing_from_classified(df.height(), &classified);
    let correlation = correlation_from_classified(&classified);
    let top_categories = top_categories_from_classified(
        &classified,
        config.max_category_columns,
        config.top_k_categories,
    );

    let quality = QualityScorer::new(config.quality.clone()).score(&summary, &missing)?;

    let duration_ms = start_time.elapsed().as_millis() as u64;
    info!(
        "Analysis complete in {}ms, quality score {:.2}",
        duration_ms, quality.quality_score
    );

    Ok(EdaReport {
        generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        source: None,
        summary,
        missing,
        correlation,
        top_categories,
        quality,
        duration_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QualityConfig;

    fn sample_df() -> DataFrame {
        DataFrame::new(vec![
            Column::new("age".into(), &[Some(10i64), Some(20), Some(30), None]),
            Column::new("height".into(), &[140i64, 150, 160, 170]),
            Column::new("city".into(), &[Some("A"), Some("B"), Some("A"), None]),
        ])
        .unwrap()
    }

    #[test]
    fn test_analyze_sample() {
        let report = analyze(&sample_df(), &EdaConfig::default()).unwrap();

        assert_eq!(report.summary.n_rows, 4);
        assert_eq!(report.missing.len(), 3);
        assert_eq!(report.correlation.columns.len(), 2);
        assert!(report.top_categories.contains("city"));
        assert!(report.quality.too_few_rows);
        assert!((0.0..=1.0).contains(&report.quality.quality_score));
        assert!(report.source.is_none());
    }

    #[test]
    fn test_analyze_matches_individual_operations() {
        let df = sample_df();
        let report = analyze(&df, &EdaConfig::default()).unwrap();

        assert_eq!(report.summary, crate::profiler::summarize_dataset(&df).unwrap());
        assert_eq!(report.missing, crate::quality::missing_table(&df).unwrap());
        assert_eq!(
            report.correlation,
            crate::correlation::correlation_matrix(&df).unwrap()
        );
        assert_eq!(
            report.top_categories,
            crate::categories::top_categories(&df, 5, 5).unwrap()
        );
    }

    #[test]
    fn test_analyze_rejects_invalid_config() {
        let mut config = EdaConfig::default();
        config.top_k_categories = 0;

        let err = analyze(&sample_df(), &config).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
    }

    #[test]
    fn test_analyze_uses_quality_config() {
        let config = EdaConfig::builder()
            .quality(QualityConfig::builder().min_rows(1).build().unwrap())
            .build()
            .unwrap();

        let report = analyze(&sample_df(), &config).unwrap();
        assert!(!report.quality.too_few_rows);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = analyze(&sample_df(), &EdaConfig::default())
            .unwrap()
            .with_source("sample.csv");

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"source\":\"sample.csv\""));
        assert!(json.contains("\"quality_score\""));

        let back: EdaReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.summary.n_rows, report.summary.n_rows);
        assert_eq!(back.missing, report.missing);
        assert_eq!(back.top_categories, report.top_categories);
    }
}

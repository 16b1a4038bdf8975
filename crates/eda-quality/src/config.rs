//! Configuration types for dataset analysis.
//!
//! [`QualityConfig`] holds the thresholds and penalties of the quality rules,
//! [`EdaConfig`] wraps it together with the report-level limits. Both use the
//! builder pattern and validate on `build()`.

use serde::{Deserialize, Serialize};

/// Thresholds and penalties used by the quality-flag scorer.
///
/// # Example
///
/// ```rust,ignore
/// use eda_quality::config::QualityConfig;
///
/// let config = QualityConfig::builder()
///     .high_missingness_threshold(0.3)
///     .min_rows(50)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    /// Datasets with fewer rows than this are flagged as too small.
    /// Default: 100
    pub min_rows: usize,

    /// Datasets with more columns than this are flagged as too wide.
    /// Default: 100
    pub max_columns: usize,

    /// A column is highly missing when its missing share is strictly above this.
    /// Default: 0.5
    pub high_missingness_threshold: f64,

    /// Minimum `distinct_count / count` for a categorical column to be high-cardinality.
    /// Default: 0.5
    pub high_cardinality_ratio: f64,

    /// Minimum absolute distinct count for a categorical column to be high-cardinality.
    /// Default: 5
    pub high_cardinality_min_distinct: usize,

    /// Default: 0.20
    pub constant_column_penalty: f64,

    /// Default: 0.05
    pub high_cardinality_penalty: f64,

    /// Default: 0.15
    pub high_missingness_penalty: f64,

    /// Default: 0.15
    pub too_few_rows_penalty: f64,

    /// Default: 0.10
    pub too_many_columns_penalty: f64,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            min_rows: 100,
            max_columns: 100,
            high_missingness_threshold: 0.5,
            high_cardinality_ratio: 0.5,
            high_cardinality_min_distinct: 5,
            constant_column_penalty: 0.20,
            high_cardinality_penalty: 0.05,
            high_missingness_penalty: 0.15,
            too_few_rows_penalty: 0.15,
            too_many_columns_penalty: 0.10,
        }
    }
}

impl QualityConfig {
    /// Create a new configuration builder.
    pub fn builder() -> QualityConfigBuilder {
        QualityConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let unit_fields = [
            ("high_missingness_threshold", self.high_missingness_threshold),
            ("high_cardinality_ratio", self.high_cardinality_ratio),
            ("constant_column_penalty", self.constant_column_penalty),
            ("high_cardinality_penalty", self.high_cardinality_penalty),
            ("high_missingness_penalty", self.high_missingness_penalty),
            ("too_few_rows_penalty", self.too_few_rows_penalty),
            ("too_many_columns_penalty", self.too_many_columns_penalty),
        ];

        for (field, value) in unit_fields {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigValidationError::InvalidThreshold {
                    field: field.to_string(),
                    value,
                });
            }
        }

        if self.max_columns == 0 {
            return Err(ConfigValidationError::ZeroLimit("max_columns".to_string()));
        }

        Ok(())
    }
}

/// Builder for [`QualityConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct QualityConfigBuilder {
    min_rows: Option<usize>,
    max_columns: Option<usize>,
    high_missingness_threshold: Option<f64>,
    high_cardinality_ratio: Option<f64>,
    high_cardinality_min_distinct: Option<usize>,
    constant_column_penalty: Option<f64>,
    high_cardinality_penalty: Option<f64>,
    high_missingness_penalty: Option<f64>,
    too_few_rows_penalty: Option<f64>,
    too_many_columns_penalty: Option<f64>,
}

impl QualityConfigBuilder {
    /// Set the minimum row count below which the dataset is flagged.
    pub fn min_rows(mut self, rows: usize) -> Self {
        self.min_rows = Some(rows);
        self
    }

    /// Set the maximum column count above which the dataset is flagged.
    pub fn max_columns(mut self, columns: usize) -> Self {
        self.max_columns = Some(columns);
        self
    }

    /// Set the missing share above which a column counts as highly missing.
    ///
    /// # Arguments
    /// * `threshold` - Value between 0.0 and 1.0 (e.g., 0.3 = 30%)
    pub fn high_missingness_threshold(mut self, threshold: f64) -> Self {
        self.high_missingness_threshold = Some(threshold);
        self
    }

    /// Set the distinct/non-missing ratio for high-cardinality categoricals.
    pub fn high_cardinality_ratio(mut self, ratio: f64) -> Self {
        self.high_cardinality_ratio = Some(ratio);
        self
    }

    /// Set the absolute distinct-value floor for high-cardinality categoricals.
    pub fn high_cardinality_min_distinct(mut self, distinct: usize) -> Self {
        self.high_cardinality_min_distinct = Some(distinct);
        self
    }

    pub fn constant_column_penalty(mut self, penalty: f64) -> Self {
        self.constant_column_penalty = Some(penalty);
        self
    }

    pub fn high_cardinality_penalty(mut self, penalty: f64) -> Self {
        self.high_cardinality_penalty = Some(penalty);
        self
    }

    pub fn high_missingness_penalty(mut self, penalty: f64) -> Self {
        self.high_missingness_penalty = Some(penalty);
        self
    }

    pub fn too_few_rows_penalty(mut self, penalty: f64) -> Self {
        self.too_few_rows_penalty = Some(penalty);
        self
    }

    pub fn too_many_columns_penalty(mut self, penalty: f64) -> Self {
        self.too_many_columns_penalty = Some(penalty);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `QualityConfig` or an error if validation fails.
    pub fn build(self) -> Result<QualityConfig, ConfigValidationError> {
        let defaults = QualityConfig::default();
        let config = QualityConfig {
            min_rows: self.min_rows.unwrap_or(defaults.min_rows),
            max_columns: self.max_columns.unwrap_or(defaults.max_columns),
            high_missingness_threshold: self
                .high_missingness_threshold
                .unwrap_or(defaults.high_missingness_threshold),
            high_cardinality_ratio: self
                .high_cardinality_ratio
                .unwrap_or(defaults.high_cardinality_ratio),
            high_cardinality_min_distinct: self
                .high_cardinality_min_distinct
                .unwrap_or(defaults.high_cardinality_min_distinct),
            constant_column_penalty: self
                .constant_column_penalty
                .unwrap_or(defaults.constant_column_penalty),
            high_cardinality_penalty: self
                .high_cardinality_penalty
                .unwrap_or(defaults.high_cardinality_penalty),
            high_missingness_penalty: self
                .high_missingness_penalty
                .unwrap_or(defaults.high_missingness_penalty),
            too_few_rows_penalty: self
                .too_few_rows_penalty
                .unwrap_or(defaults.too_few_rows_penalty),
            too_many_columns_penalty: self
                .too_many_columns_penalty
                .unwrap_or(defaults.too_many_columns_penalty),
        };

        config.validate()?;
        Ok(config)
    }
}

/// Configuration for a full analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdaConfig {
    /// Rule thresholds and penalties.
    pub quality: QualityConfig,

    /// How many categorical columns get a top-values table.
    /// Default: 5
    pub max_category_columns: usize,

    /// How many values each top-values table keeps.
    /// Default: 5
    pub top_k_categories: usize,

    /// Columns with a missing share at or above this are highlighted in the report.
    /// Default: 0.1
    pub min_missing_share: f64,

    /// Title used in the Markdown report.
    /// Default: "EDA report"
    pub title: String,
}

impl Default for EdaConfig {
    fn default() -> Self {
        Self {
            quality: QualityConfig::default(),
            max_category_columns: 5,
            top_k_categories: 5,
            min_missing_share: 0.1,
            title: "EDA report".to_string(),
        }
    }
}

impl EdaConfig {
    /// Create a new configuration builder.
    pub fn builder() -> EdaConfigBuilder {
        EdaConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.quality.validate()?;

        if self.top_k_categories == 0 {
            return Err(ConfigValidationError::ZeroLimit(
                "top_k_categories".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.min_missing_share) {
            return Err(ConfigValidationError::InvalidThreshold {
                field: "min_missing_share".to_string(),
                value: self.min_missing_share,
            });
        }

        Ok(())
    }
}

/// Builder for [`EdaConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct EdaConfigBuilder {
    quality: Option<QualityConfig>,
    max_category_columns: Option<usize>,
    top_k_categories: Option<usize>,
    min_missing_share: Option<f64>,
    title: Option<String>,
}

impl EdaConfigBuilder {
    /// Use custom quality rule settings.
    pub fn quality(mut self, quality: QualityConfig) -> Self {
        self.quality = Some(quality);
        self
    }

    /// Cap the number of categorical columns in the top-values report.
    pub fn max_category_columns(mut self, columns: usize) -> Self {
        self.max_category_columns = Some(columns);
        self
    }

    /// Set how many top values are kept per categorical column.
    pub fn top_k_categories(mut self, k: usize) -> Self {
        self.top_k_categories = Some(k);
        self
    }

    /// Set the missing share from which columns are highlighted in the report.
    pub fn min_missing_share(mut self, share: f64) -> Self {
        self.min_missing_share = Some(share);
        self
    }

    /// Set the report title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<EdaConfig, ConfigValidationError> {
        let config = EdaConfig {
            quality: self.quality.unwrap_or_default(),
            max_category_columns: self.max_category_columns.unwrap_or(5),
            top_k_categories: self.top_k_categories.unwrap_or(5),
            min_missing_share: self.min_missing_share.unwrap_or(0.1),
            title: self.title.unwrap_or_else(|| "EDA report".to_string()),
        };

        config.validate()?;
        Ok(config)
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid value for '{field}': {value} (must be between 0.0 and 1.0)")]
    InvalidThreshold { field: String, value: f64 },

    #[error("Invalid value for '{0}': must be at least 1")]
    ZeroLimit(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_quality_config() {
        let config = QualityConfig::default();
        assert_eq!(config.min_rows, 100);
        assert_eq!(config.max_columns, 100);
        assert_eq!(config.high_missingness_threshold, 0.5);
        assert_eq!(config.constant_column_penalty, 0.20);
        assert_eq!(config.high_cardinality_penalty, 0.05);
        assert_eq!(config.high_missingness_penalty, 0.15);
    }

    #[test]
    fn test_builder_defaults_match_default() {
        let config = QualityConfig::builder().build().unwrap();
        assert_eq!(config, QualityConfig::default());
    }

    #[test]
    fn test_builder_custom_values() {
        let config = QualityConfig::builder()
            .min_rows(10)
            .high_missingness_threshold(0.3)
            .high_cardinality_min_distinct(20)
            .too_few_rows_penalty(0.0)
            .build()
            .unwrap();

        assert_eq!(config.min_rows, 10);
        assert_eq!(config.high_missingness_threshold, 0.3);
        assert_eq!(config.high_cardinality_min_distinct, 20);
        assert_eq!(config.too_few_rows_penalty, 0.0);
        assert_eq!(config.constant_column_penalty, 0.20);
    }

    #[test]
    fn test_validation_invalid_threshold() {
        let result = QualityConfig::builder()
            .high_missingness_threshold(1.5)
            .build();

        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidThreshold { .. }
        ));
    }

    #[test]
    fn test_validation_negative_penalty() {
        let result = QualityConfig::builder().constant_column_penalty(-0.1).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_eda_config_rejects_zero_top_k() {
        let result = EdaConfig::builder().top_k_categories(0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::ZeroLimit(field) if field == "top_k_categories"
        ));
    }

    #[test]
    fn test_eda_config_from_json() {
        let json = r#"{
            "quality": { "min_rows": 20, "high_missingness_threshold": 0.4 },
            "max_category_columns": 3,
            "top_k_categories": 2,
            "title": "Survey data"
        }"#;

        let config: EdaConfig = serde_json::from_str(json).expect("Should deserialize");

        assert_eq!(config.quality.min_rows, 20);
        assert_eq!(config.quality.high_missingness_threshold, 0.4);
        // unspecified fields fall back to defaults
        assert_eq!(config.quality.constant_column_penalty, 0.20);
        assert_eq!(config.max_category_columns, 3);
        assert_eq!(config.top_k_categories, 2);
        assert_eq!(config.min_missing_share, 0.1);
        assert_eq!(config.title, "Survey data");
        assert!(config.validate().is_ok());
    }
}

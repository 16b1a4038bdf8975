//! Exploratory Data Analysis Library
//!
//! Summary statistics and data-quality heuristics for a tabular dataset held
//! in a polars [`DataFrame`](polars::prelude::DataFrame).
//!
//! # Overview
//!
//! - **Column Summary**: type classification, counts, missing shares, distinct
//!   values and numeric statistics per column
//! - **Missing Values**: count and share of missing cells per column
//! - **Correlation**: pairwise Pearson correlation of numeric columns
//! - **Top Categories**: most frequent values of categorical columns
//! - **Quality Flags**: rule-based flags and a score in [0, 1]
//! - **Reporting**: Markdown, JSON and CSV artifacts
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use eda_quality::{compute_quality_flags, missing_table, summarize_dataset, QualityConfig};
//!
//! let df = eda_quality::load_csv("data.csv", b',')?;
//!
//! let summary = summarize_dataset(&df)?;
//! let missing = missing_table(&df)?;
//! let flags = compute_quality_flags(&summary, &missing, &QualityConfig::default())?;
//!
//! println!("quality score: {:.2}", flags.quality_score);
//! ```
//!
//! # Configuration
//!
//! Thresholds and penalties live in [`QualityConfig`]:
//!
//! ```rust,ignore
//! use eda_quality::{EdaConfig, QualityConfig};
//!
//! let quality = QualityConfig::builder()
//!     .min_rows(50)
//!     .high_missingness_threshold(0.3)
//!     .build()?;
//!
//! let config = EdaConfig::builder()
//!     .quality(quality)
//!     .top_k_categories(10)
//!     .build()?;
//!
//! let report = eda_quality::analyze(&df, &config)?;
//! ```

pub mod categories;
pub mod config;
pub mod correlation;
pub mod error;
pub mod pipeline;
pub mod profiler;
pub mod quality;
pub mod reporting;
pub mod table;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use categories::top_categories;
pub use config::{ConfigValidationError, EdaConfig, EdaConfigBuilder, QualityConfig, QualityConfigBuilder};
pub use correlation::correlation_matrix;
pub use error::{EdaError, Result as EdaResult, ResultExt};
pub use pipeline::{EdaReport, analyze};
pub use profiler::{flatten_summary, summarize_dataset};
pub use quality::{QualityRule, QualityScorer, compute_quality_flags, missing_table};
pub use reporting::{ReportGenerator, render_markdown};
pub use table::{build_table, load_csv};
pub use types::{
    CategoryCount, CategoryTable, ColumnDtype, ColumnSummary, CorrelationMatrix, DatasetSummary,
    MissingEntry, MissingTable, NumericStats, QualityFlags, TopCategoriesReport,
};

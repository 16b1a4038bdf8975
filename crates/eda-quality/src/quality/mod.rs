//! Data quality analysis module.
//!
//! This module reports missing values per column and turns a dataset summary
//! into boolean quality flags with a heuristic score.

mod missing;
mod scorer;

pub use missing::missing_table;
pub use scorer::{QualityRule, QualityScorer, compute_quality_flags};

pub(crate) use missing::missing_from_classified;

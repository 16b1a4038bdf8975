//! Report generation module.
//!
//! Turns an [`EdaReport`](crate::pipeline::EdaReport) into files on disk:
//! a Markdown overview, the full JSON report and one CSV per table.
//!
//! # Example
//!
//! ```rust,ignore
//! use eda_quality::{analyze, EdaConfig, ReportGenerator};
//!
//! let config = EdaConfig::default();
//! let report = analyze(&df, &config)?.with_source("data/train.csv");
//!
//! let generator = ReportGenerator::new("reports");
//! for path in generator.write_all(&report, &config)? {
//!     println!("wrote {}", path.display());
//! }
//! ```

mod generator;
mod markdown;

pub use generator::ReportGenerator;
pub use markdown::render_markdown;

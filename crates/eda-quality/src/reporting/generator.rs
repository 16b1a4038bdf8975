//! File output for analysis reports.

use crate::config::EdaConfig;
use crate::error::{EdaError, Result, ResultExt};
use crate::pipeline::EdaReport;
use crate::profiler::flatten_summary;
use crate::reporting::render_markdown;
use crate::types::{CategoryTable, CorrelationMatrix, MissingTable};
use polars::prelude::*;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const CATEGORIES_DIR: &str = "top_categories";

/// Writes report artifacts into one output directory.
pub struct ReportGenerator {
    output_dir: PathBuf,
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./reports"),
        }
    }
}

impl ReportGenerator {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write every artifact and return the paths written, in order.
    ///
    /// `correlation.csv` is skipped when the matrix is empty.
    pub fn write_all(&self, report: &EdaReport, config: &EdaConfig) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.output_dir).map_err(|e| {
            EdaError::Io(e).with_context(format!("Failed to create {}", self.output_dir.display()))
        })?;

        let mut written = vec![
            self.write_markdown(report, config)?,
            self.write_json(report)?,
        ];

        let mut summary = flatten_summary(&report.summary)?;
        written.push(self.write_csv("summary.csv", &mut summary)?);

        let mut missing = missing_frame(&report.missing)?;
        written.push(self.write_csv("missing.csv", &mut missing)?);

        if !report.correlation.is_empty() {
            let mut corr = correlation_frame(&report.correlation)?;
            written.push(self.write_csv("correlation.csv", &mut corr)?);
        }

        if !report.top_categories.is_empty() {
            fs::create_dir_all(self.output_dir.join(CATEGORIES_DIR))?;
            let mut used_stems: HashSet<String> = HashSet::new();
            for table in &report.top_categories.tables {
                let mut df = category_frame(table)?;
                let stem = unique_stem(&table.column, &mut used_stems);
                let name = format!("{}/{}.csv", CATEGORIES_DIR, stem);
                written.push(self.write_csv(&name, &mut df)?);
            }
        }

        info!(
            "Wrote {} report files to {}",
            written.len(),
            self.output_dir.display()
        );
        Ok(written)
    }

    /// Write `report.md`.
    pub fn write_markdown(&self, report: &EdaReport, config: &EdaConfig) -> Result<PathBuf> {
        let path = self.output_dir.join("report.md");
        let mut file = File::create(&path)?;
        file.write_all(render_markdown(report, config).as_bytes())?;

        info!("Report saved: {}", path.display());
        Ok(path)
    }

    /// Write `report.json`.
    pub fn write_json(&self, report: &EdaReport) -> Result<PathBuf> {
        let path = self.output_dir.join("report.json");
        let mut file = File::create(&path)?;
        file.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;

        info!("Report saved: {}", path.display());
        Ok(path)
    }

    fn write_csv(&self, name: &str, df: &mut DataFrame) -> Result<PathBuf> {
        let path = self.output_dir.join(name);
        let mut file = File::create(&path)?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(b',')
            .finish(df)
            .context(format!("Failed to write {}", path.display()))?;

        debug!("Table saved: {}", path.display());
        Ok(path)
    }
}

fn missing_frame(missing: &MissingTable) -> Result<DataFrame> {
    let columns: Vec<&str> = missing.iter().map(|e| e.column.as_str()).collect();
    let counts: Vec<u64> = missing.iter().map(|e| e.missing_count as u64).collect();
    let shares: Vec<f64> = missing.iter().map(|e| e.missing_share).collect();

    Ok(DataFrame::new(vec![
        Column::new("column".into(), columns),
        Column::new("missing_count".into(), counts),
        Column::new("missing_share".into(), shares),
    ])?)
}

fn correlation_frame(corr: &CorrelationMatrix) -> Result<DataFrame> {
    let mut columns = vec![Column::new(
        index_header(&corr.columns).into(),
        corr.columns.clone(),
    )];
    for (j, name) in corr.columns.iter().enumerate() {
        let values: Vec<Option<f64>> = corr.values.iter().map(|row| row[j]).collect();
        columns.push(Column::new(name.as_str().into(), values));
    }
    Ok(DataFrame::new(columns)?)
}

fn category_frame(table: &CategoryTable) -> Result<DataFrame> {
    let values: Vec<&str> = table.values.iter().map(|c| c.value.as_str()).collect();
    let counts: Vec<u64> = table.values.iter().map(|c| c.count as u64).collect();

    Ok(DataFrame::new(vec![
        Column::new("value".into(), values),
        Column::new("count".into(), counts),
    ])?)
}

/// Header of the row-label column, distinct from every matrix column.
fn index_header(columns: &[String]) -> String {
    let mut header = "column".to_string();
    while columns.contains(&header) {
        header.insert(0, '_');
    }
    header
}

/// Flattened file stem for a column, suffixed `_2`, `_3`, ... once taken.
fn unique_stem(column: &str, used: &mut HashSet<String>) -> String {
    let base = file_stem(column);
    let mut stem = base.clone();
    let mut n = 2;
    while !used.insert(stem.clone()) {
        stem = format!("{}_{}", base, n);
        n += 1;
    }
    stem
}

/// Column names can hold path separators; keep file names flat.
fn file_stem(column: &str) -> String {
    let stem: String = column
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() { "_".to_string() } else { stem }
}

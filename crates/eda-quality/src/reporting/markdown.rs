use crate::config::EdaConfig;
use crate::pipeline::EdaReport;
use crate::quality::QualityRule;
use crate::utils::{escape_markdown_cell, format_optional_float, format_share};

const STAT_PRECISION: usize = 3;

/// Render the report as Markdown.
///
/// Columns whose missing share is at least `config.min_missing_share` are
/// listed in the missing-values section.
pub fn render_markdown(report: &EdaReport, config: &EdaConfig) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", config.title));
    if let Some(source) = &report.source {
        md.push_str(&format!("Source: `{}`\n\n", source));
    }
    md.push_str(&format!("Generated at: {}\n\n", report.generated_at));
    md.push_str(&format!(
        "Rows: **{}**, columns: **{}**\n\n",
        report.summary.n_rows, report.summary.n_cols
    ));

    render_quality(&mut md, report, config);
    render_columns(&mut md, report);
    render_missing(&mut md, report, config.min_missing_share);
    render_correlation(&mut md, report);
    render_categories(&mut md, report, config.top_k_categories);

    md
}

fn render_quality(md: &mut String, report: &EdaReport, config: &EdaConfig) {
    let flags = &report.quality;
    md.push_str("## Data quality\n\n");
    md.push_str(&format!("Quality score: **{:.2}**\n\n", flags.quality_score));
    md.push_str(&format!(
        "Max missing share: {}\n\n",
        format_share(flags.max_missing_share)
    ));

    md.push_str("| Flag | Triggered | Penalty |\n|---|---|---|\n");
    let triggered = flags.triggered();
    for rule in QualityRule::ALL {
        let name = rule.flag_name();
        md.push_str(&format!(
            "| {} | {} | {:.2} |\n",
            name,
            if triggered.contains(&name) { "yes" } else { "no" },
            rule.penalty(&config.quality)
        ));
    }
    md.push('\n');

    for (label, columns) in [
        ("Constant columns", &flags.constant_columns),
        ("High-cardinality categoricals", &flags.high_cardinality_columns),
        ("High-missingness columns", &flags.high_missingness_columns),
    ] {
        if !columns.is_empty() {
            md.push_str(&format!("- {}: {}\n", label, columns.join(", ")));
        }
    }
    md.push('\n');
}

fn render_columns(md: &mut String, report: &EdaReport) {
    md.push_str("## Columns\n\n");
    if report.summary.columns.is_empty() {
        md.push_str("_The table has no columns._\n\n");
        return;
    }

    md.push_str("| Name | Type | Count | Missing | Distinct | Mean | Std | Min | Max | Examples |\n");
    md.push_str("|---|---|---|---|---|---|---|---|---|---|\n");
    for col in &report.summary.columns {
        let stats = col.numeric.clone().unwrap_or_default();
        let examples: Vec<String> = col
            .example_values
            .iter()
            .map(|v| escape_markdown_cell(v))
            .collect();
        md.push_str(&format!(
            "| {} | {} | {} | {} ({}) | {} | {} | {} | {} | {} | {} |\n",
            escape_markdown_cell(&col.name),
            col.dtype,
            col.count,
            col.missing_count,
            format_share(col.missing_share),
            col.distinct_count,
            format_optional_float(stats.mean, STAT_PRECISION),
            format_optional_float(stats.std, STAT_PRECISION),
            format_optional_float(stats.min, STAT_PRECISION),
            format_optional_float(stats.max, STAT_PRECISION),
            examples.join(", ")
        ));
    }
    md.push('\n');
}

fn render_missing(md: &mut String, report: &EdaReport, min_share: f64) {
    md.push_str("## Missing values\n\n");
    let highlighted = report.missing.columns_at_least(min_share);
    if highlighted.is_empty() {
        md.push_str(&format!(
            "No column has at least {} missing values.\n\n",
            format_share(min_share)
        ));
        return;
    }

    md.push_str(&format!(
        "Columns with at least {} missing values:\n\n",
        format_share(min_share)
    ));
    md.push_str("| Column | Missing | Share |\n|---|---|---|\n");
    for entry in highlighted {
        md.push_str(&format!(
            "| {} | {} | {} |\n",
            escape_markdown_cell(&entry.column),
            entry.missing_count,
            format_share(entry.missing_share)
        ));
    }
    md.push('\n');
}

fn render_correlation(md: &mut String, report: &EdaReport) {
    md.push_str("## Correlation\n\n");
    let corr = &report.correlation;
    if corr.is_empty() {
        md.push_str("_Fewer than two numeric columns; no correlation computed._\n\n");
        return;
    }

    let header: Vec<String> = corr.columns.iter().map(|c| escape_markdown_cell(c)).collect();
    md.push_str(&format!("| | {} |\n", header.join(" | ")));
    md.push_str(&format!("|---|{}\n", "---|".repeat(header.len())));
    for (name, row) in header.iter().zip(&corr.values) {
        let cells: Vec<String> = row
            .iter()
            .map(|r| format_optional_float(*r, 2))
            .collect();
        md.push_str(&format!("| {} | {} |\n", name, cells.join(" | ")));
    }
    md.push('\n');
}

fn render_categories(md: &mut String, report: &EdaReport, top_k: usize) {
    md.push_str("## Top categories\n\n");
    if report.top_categories.is_empty() {
        md.push_str("_No categorical columns._\n\n");
        return;
    }

    for table in &report.top_categories.tables {
        md.push_str(&format!(
            "### {} (top {})\n\n",
            escape_markdown_cell(&table.column),
            top_k
        ));
        if table.values.is_empty() {
            md.push_str("_No values._\n\n");
            continue;
        }
        md.push_str("| Value | Count |\n|---|---|\n");
        for entry in &table.values {
            md.push_str(&format!(
                "| {} | {} |\n",
                escape_markdown_cell(&entry.value),
                entry.count
            ));
        }
        md.push('\n');
    }
}

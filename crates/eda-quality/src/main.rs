//! CLI entry point for dataset exploration.

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use eda_quality::utils::{format_optional_float, format_share};
use eda_quality::{EdaConfig, QualityConfig, ReportGenerator, analyze, load_csv, summarize_dataset};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Exploratory data analysis and data-quality checks for CSV files",
    long_about = "Summarizes a CSV file and scores its data quality.\n\n\
                  EXAMPLES:\n  \
                  # Print a per-column overview\n  \
                  eda-cli overview data.csv\n\n  \
                  # Write Markdown, JSON and CSV reports\n  \
                  eda-cli report data.csv --out-dir reports\n\n  \
                  # Print the full report as JSON\n  \
                  eda-cli report data.csv --json | jq .quality"
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Only show warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print table size and a per-column summary
    Overview {
        /// Path to the CSV file
        path: String,

        /// Field separator
        #[arg(long, default_value = ",")]
        sep: char,
    },

    /// Write a full report to a directory
    Report(ReportArgs),
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Path to the CSV file
    path: String,

    /// Output directory for report files
    #[arg(long, default_value = "reports")]
    out_dir: String,

    /// Field separator
    #[arg(long, default_value = ",")]
    sep: char,

    /// How many categorical columns get a top-values table
    #[arg(long, default_value = "5")]
    max_cat_columns: usize,

    /// How many values each top-values table keeps
    #[arg(long, default_value = "5")]
    top_k_categories: usize,

    /// Report title
    #[arg(long, default_value = "EDA report")]
    title: String,

    /// Highlight columns with at least this missing share (0.0 - 1.0)
    #[arg(long, default_value = "0.1")]
    min_missing_share: f64,

    /// Minimum row count before the too-few-rows flag clears
    #[arg(long)]
    min_rows: Option<usize>,

    /// Print the report as JSON to stdout
    ///
    /// Disables logging so stdout only holds the JSON document.
    #[arg(long)]
    json: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is disabled so stdout holds only JSON.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let json_output = matches!(&cli.command, Command::Report(args) if args.json);
    init_logging(&cli.log_level, cli.quiet, json_output);

    let result = match &cli.command {
        Command::Overview { path, sep } => run_overview(path, *sep),
        Command::Report(args) => run_report(args),
    };

    if let Err(e) = &result {
        error!("{:#}", e);
    }
    result
}

fn separator_byte(sep: char) -> Result<u8> {
    if sep.is_ascii() {
        Ok(sep as u8)
    } else {
        Err(anyhow!("Separator must be a single ASCII character, got '{}'", sep))
    }
}

/// Print a per-column overview.
///
/// Uses `println!` for the user-facing table; logging goes to stderr.
fn run_overview(path: &str, sep: char) -> Result<()> {
    let df = load_csv(path, separator_byte(sep)?)
        .with_context(|| format!("Failed to load {}", path))?;

    let summary = summarize_dataset(&df)?;

    println!("Rows: {}", summary.n_rows);
    println!("Columns: {}", summary.n_cols);
    println!();

    println!(
        "{:<20} {:<12} {:>8} {:>10} {:>9} {:>12} {:>12}",
        "Column", "Type", "Count", "Missing %", "Distinct", "Mean", "Std"
    );
    println!("{}", "-".repeat(89));

    for col in &summary.columns {
        let stats = col.numeric.clone().unwrap_or_default();
        println!(
            "{:<20} {:<12} {:>8} {:>10} {:>9} {:>12} {:>12}",
            truncate_str(&col.name, 19),
            col.dtype.as_str(),
            col.count,
            format_share(col.missing_share),
            col.distinct_count,
            format_optional_float(stats.mean, 3),
            format_optional_float(stats.std, 3)
        );
    }

    Ok(())
}

/// Truncate a string to at most `max_chars` characters.
fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

fn run_report(args: &ReportArgs) -> Result<()> {
    let df = load_csv(&args.path, separator_byte(args.sep)?)
        .with_context(|| format!("Failed to load {}", args.path))?;

    let mut quality = QualityConfig::builder();
    if let Some(rows) = args.min_rows {
        quality = quality.min_rows(rows);
    }

    let config = EdaConfig::builder()
        .quality(quality.build()?)
        .max_category_columns(args.max_cat_columns)
        .top_k_categories(args.top_k_categories)
        .min_missing_share(args.min_missing_share)
        .title(&args.title)
        .build()?;

    let report = analyze(&df, &config)?.with_source(&args.path);

    let generator = ReportGenerator::new(&args.out_dir);
    let written = generator.write_all(&report, &config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    info!("Report written to {}", generator.output_dir().display());
    println!("Quality score: {:.2}", report.quality.quality_score);
    let triggered = report.quality.triggered();
    if triggered.is_empty() {
        println!("No quality flags triggered");
    } else {
        println!("Flags: {}", triggered.join(", "));
    }
    for path in written {
        println!("  {}", path.display());
    }

    Ok(())
}

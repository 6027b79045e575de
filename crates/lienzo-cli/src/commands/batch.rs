//! Batch processing command for multiple form files.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use lienzo_core::export::CsvExporter;
use lienzo_core::form::{FormParser, RuleFormParser};
use lienzo_core::models::record::Record;

use super::{InputKind, TextSource, load_config};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// CSV file to write (default: the configured export file name)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write one JSON file per record into this directory
    #[arg(long)]
    json_dir: Option<PathBuf>,

    /// Stop at the first file that fails
    #[arg(long)]
    fail_fast: bool,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,
}

/// Processing status of one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileStatus {
    Completed,
    Error,
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileStatus::Completed => write!(f, "completed"),
            FileStatus::Error => write!(f, "error"),
        }
    }
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    outcome: Result<Record, String>,
    processing_time_ms: u64,
}

impl ProcessResult {
    fn status(&self) -> FileStatus {
        match self.outcome {
            Ok(_) => FileStatus::Completed,
            Err(_) => FileStatus::Error,
        }
    }
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(model_dir) = &args.model_dir {
        config.ocr.model_dir = model_dir.clone();
    }

    // Expand glob pattern
    let files: Vec<(PathBuf, InputKind)> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter_map(|p| InputKind::from_path(&p).map(|kind| (p, kind)))
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(json_dir) = &args.json_dir {
        fs::create_dir_all(json_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files {msg}")
            .unwrap()
            .progress_chars("=>-"),
    );

    // One form at a time; the parser holds no per-form state
    let parser = RuleFormParser::from_config(&config);
    let mut source = TextSource::new(&config.ocr);
    let mut results = Vec::with_capacity(files.len());
    let mut json_written = HashSet::new();

    for (path, kind) in files {
        pb.set_message(file_name(&path).to_string());
        let file_start = Instant::now();

        let outcome = source
            .read(&path, kind)
            .map(|text| parser.parse(&text).record)
            .map_err(|e| e.to_string());

        let result = ProcessResult {
            path,
            outcome,
            processing_time_ms: file_start.elapsed().as_millis() as u64,
        };
        debug!(
            "{}: {} in {}ms",
            result.path.display(),
            result.status(),
            result.processing_time_ms
        );

        if let Err(message) = &result.outcome {
            if args.fail_fast {
                error!("Failed to process {}: {}", result.path.display(), message);
                anyhow::bail!("Processing failed: {}", message);
            }
            warn!("Failed to process {}: {}", result.path.display(), message);
        }

        if let (Ok(record), Some(json_dir)) = (&result.outcome, &args.json_dir) {
            let json_path = json_dir.join(json_file_name(&result.path));
            if json_written.insert(json_path.clone()) {
                write_json(&json_path, record)?;
            } else {
                warn!(
                    "Skipping JSON for {}: {} was already written in this batch",
                    result.path.display(),
                    json_path.display()
                );
            }
        }

        results.push(result);
        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    let records: Vec<Record> = results
        .iter()
        .filter_map(|r| r.outcome.as_ref().ok().cloned())
        .collect();
    let failed: Vec<&ProcessResult> = results
        .iter()
        .filter(|r| r.status() == FileStatus::Error)
        .collect();

    if records.is_empty() {
        warn!("No records extracted, nothing to export");
    } else {
        let output_path = args
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.export.file_name));

        CsvExporter::from_config(&config.export)?.write_file(&output_path, &records)?;
        println!(
            "{} {} records exported to {}",
            style("✓").green(),
            records.len(),
            output_path.display()
        );
    }

    // Print summary
    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} completed, {} failed",
        style(records.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            if let Err(message) = &result.outcome {
                println!("  - {}: {}", result.path.display(), message);
            }
        }
    }

    Ok(())
}

fn file_name(path: &Path) -> &str {
    path.file_name().and_then(|s| s.to_str()).unwrap_or("")
}

/// `orden.png` becomes `orden.png.json`.
fn json_file_name(source: &Path) -> String {
    match file_name(source) {
        "" => "record.json".to_string(),
        name => format!("{}.json", name),
    }
}

fn write_json(output_path: &Path, record: &Record) -> anyhow::Result<()> {
    fs::write(output_path, serde_json::to_string_pretty(record)?)?;
    debug!("Wrote output to {}", output_path.display());
    Ok(())
}

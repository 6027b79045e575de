//! Process command - extract a record from a single form.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use lienzo_core::export::CsvExporter;
use lienzo_core::form::{FormParser, RuleFormParser};
use lienzo_core::models::config::LienzoConfig;
use lienzo_core::models::record::Record;

use super::{InputKind, TextSource, load_config};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (image, or .txt with already recognized text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// List the fields that could not be extracted
    #[arg(long)]
    show_warnings: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(model_dir) = &args.model_dir {
        config.ocr.model_dir = model_dir.clone();
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let kind = InputKind::from_path(&args.input).ok_or_else(|| {
        anyhow::anyhow!("Unsupported file format: {}", args.input.display())
    })?;

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );

    pb.set_message(match kind {
        InputKind::Image => "Running OCR...",
        InputKind::Text => "Reading text...",
    });
    let text = TextSource::new(&config.ocr).read(&args.input, kind)?;

    pb.set_message("Extracting fields...");
    let parser = RuleFormParser::from_config(&config);
    let result = parser.parse(&text);

    pb.finish_and_clear();

    let output = format_record(&result.record, args.format, &config, args.output.is_some())?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_warnings && !result.warnings.is_empty() {
        eprintln!("{}", style("Missing fields:").yellow());
        for warning in &result.warnings {
            eprintln!("  - {}", warning);
        }
    }

    debug!(
        "Scanned {} lines in {:?}",
        result.lines_scanned,
        start.elapsed()
    );

    Ok(())
}

/// Render a record in the requested format.
///
/// The byte-order mark is only written to files, never to the terminal.
pub fn format_record(
    record: &Record,
    format: OutputFormat,
    config: &LienzoConfig,
    to_file: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => {
            let exporter = CsvExporter::from_config(&config.export)?
                .with_byte_order_mark(to_file && config.export.byte_order_mark);
            Ok(exporter.to_csv_string(std::slice::from_ref(record))?)
        }
        OutputFormat::Text => Ok(record.display_text()),
    }
}

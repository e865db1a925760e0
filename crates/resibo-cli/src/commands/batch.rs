//! Batch processing command for multiple receipts' OCR line files.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use resibo_core::models::{Line, Record, ResiboConfig};
use resibo_core::orchestrator;

use super::process::{format_csv, format_text};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern (JSON line-arrays or plain-text fragments)
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: super::process::OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    record: Option<Record>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = if let Some(path) = config_path {
        ResiboConfig::from_file(std::path::Path::new(path))?
    } else {
        ResiboConfig::default()
    };

    let files: Vec<PathBuf> = glob(&args.input)?.filter_map(|r| r.ok()).collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!("{} Found {} files to process", style("ℹ").blue(), files.len());

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let multi_progress = MultiProgress::new();
    let overall_pb = multi_progress.add(ProgressBar::new(files.len() as u64));
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let result = process_single_file(&path, &config);
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok(record) => {
                results.push(ProcessResult { path: path.clone(), record: Some(record), error: None, processing_time_ms });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult { path: path.clone(), record: None, error: Some(error_msg), processing_time_ms });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed: {}", error_msg);
                }
            }
        }

        overall_pb.inc(1);
    }

    overall_pb.finish_with_message("Complete");

    let successful: Vec<_> = results.iter().filter(|r| r.record.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    for result in &successful {
        if let (Some(record), Some(output_dir)) = (&result.record, &args.output_dir) {
            let output_name = result.path.file_stem().and_then(|s| s.to_str()).unwrap_or("receipt");

            let extension = match args.format {
                super::process::OutputFormat::Json => "json",
                super::process::OutputFormat::Csv => "csv",
                super::process::OutputFormat::Text => "txt",
            };

            let output_path = output_dir.join(format!("{output_name}.{extension}"));

            let content = match args.format {
                super::process::OutputFormat::Json => serde_json::to_string_pretty(record)?,
                super::process::OutputFormat::Csv => format_csv(record)?,
                super::process::OutputFormat::Text => format_text(record)?,
            };

            fs::write(&output_path, content)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    if args.summary {
        let summary_path = args.output_dir.as_ref().map(|d| d.join("summary.csv")).unwrap_or_else(|| PathBuf::from("summary.csv"));
        write_summary(&summary_path, &results)?;
        println!("{} Summary written to {}", style("✓").green(), summary_path.display());
    }

    println!();
    println!("{} Processed {} files in {:?}", style("✓").green(), results.len(), start.elapsed());
    println!("   {} successful, {} failed", style(successful.len()).green(), style(failed.len()).red());

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!("  - {}: {}", result.path.display(), result.error.as_deref().unwrap_or("unknown error"));
        }
    }

    Ok(())
}

fn process_single_file(path: &PathBuf, config: &ResiboConfig) -> anyhow::Result<Record> {
    let content = fs::read_to_string(path)?;
    let trimmed = content.trim_start();

    let lines: Vec<Line> = if trimmed.starts_with('[') {
        serde_json::from_str(trimmed)?
    } else {
        Line::from_strs(content.lines().map(|l| l.to_string()))
    };

    Ok(orchestrator::extract(&lines, config))
}

fn write_summary(path: &PathBuf, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "store_name",
        "invoice_number",
        "date",
        "total_amount",
        "receipt_type",
        "confidence",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result.path.file_name().and_then(|s| s.to_str()).unwrap_or("");

        if let Some(record) = &result.record {
            wtr.write_record([
                filename,
                "success",
                record.store_name.as_deref().unwrap_or(""),
                record.invoice_number.as_deref().unwrap_or(""),
                record.date.as_deref().unwrap_or(""),
                record.total_amount.as_deref().unwrap_or(""),
                record.receipt_type.as_str(),
                &format!("{:.2}", record.extraction_confidence),
                &result.processing_time_ms.to_string(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                "",
                "",
                &result.processing_time_ms.to_string(),
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

//! Process command - extract structured data from a single receipt's OCR
//! lines.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use resibo_core::models::{Line, Record, ResiboConfig};
use resibo_core::orchestrator;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file: either a JSON array of lines (`[{"text": "...", ...}, ...]`)
    /// or one plain-text OCR fragment per line
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show extraction confidence scores
    #[arg(long)]
    show_confidence: bool,

    /// Validate extracted data
    #[arg(long)]
    validate: bool,
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

    let config = if let Some(path) = config_path {
        ResiboConfig::from_file(std::path::Path::new(path))?
    } else {
        ResiboConfig::default()
    };

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    pb.set_message("Loading OCR lines...");
    pb.set_position(20);
    let lines = load_lines(&args.input)?;

    pb.set_message("Extracting receipt data...");
    pb.set_position(60);
    let record = orchestrator::extract(&lines, &config);
    pb.set_position(100);
    pb.finish_with_message("Done");

    if args.validate {
        let issues = record.validate();
        if !issues.is_empty() {
            eprintln!("{}", style("Validation issues:").yellow());
            for issue in &issues {
                eprintln!("  - {}", issue);
            }
        }
    }

    let output = format_record(&record, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!("{} Output written to {}", style("✓").green(), output_path.display());
    } else {
        println!("{}", output);
    }

    if args.show_confidence {
        println!();
        println!(
            "{} Extraction confidence: {:.1}%",
            style("ℹ").blue(),
            record.extraction_confidence * 100.0
        );
        println!(
            "{} Receipt type: {} ({:?})",
            style("ℹ").blue(),
            record.receipt_type.as_str(),
            record.receipt_type_confidence
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Loads a `Vec<Line>` either from a JSON array or one fragment per line of
/// plain text, deciding by the input's trimmed leading byte.
fn load_lines(path: &PathBuf) -> anyhow::Result<Vec<Line>> {
    let content = fs::read_to_string(path)?;
    let trimmed = content.trim_start();

    if trimmed.starts_with('[') {
        let lines: Vec<Line> = serde_json::from_str(trimmed)?;
        Ok(lines)
    } else {
        Ok(Line::from_strs(content.lines().map(|l| l.to_string())))
    }
}

pub fn format_record(record: &Record, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => format_text(record),
    }
}

pub fn format_csv(record: &Record) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "store_name",
        "invoice_number",
        "date",
        "time",
        "total_amount",
        "vat_amount",
        "tin",
        "item_count",
        "receipt_type",
    ])?;

    wtr.write_record([
        record.store_name.as_deref().unwrap_or(""),
        record.invoice_number.as_deref().unwrap_or(""),
        record.date.as_deref().unwrap_or(""),
        record.time.as_deref().unwrap_or(""),
        record.total_amount.as_deref().unwrap_or(""),
        record.vat_amount.as_deref().unwrap_or(""),
        record.tin.as_deref().unwrap_or(""),
        &record.item_count.to_string(),
        record.receipt_type.as_str(),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

pub fn format_text(record: &Record) -> anyhow::Result<String> {
    let mut output = String::new();

    output.push_str(&format!(
        "Store: {}\n",
        record.store_name.as_deref().unwrap_or("(unknown)")
    ));
    if let Some(invoice_number) = &record.invoice_number {
        output.push_str(&format!("Invoice #: {invoice_number}\n"));
    }
    if let Some(date) = &record.date {
        output.push_str(&format!("Date: {date}"));
        if let Some(time) = &record.time {
            output.push_str(&format!(" {time}"));
        }
        output.push('\n');
    }
    output.push_str(&format!("Layout: {}\n", record.receipt_type.as_str()));
    output.push('\n');

    output.push_str("Items:\n");
    for item in &record.items {
        output.push_str(&format!("  {} x{}  {}\n", item.name, item.qty, item.price));
    }
    output.push('\n');

    if let Some(total) = &record.total_amount {
        output.push_str(&format!("Total: {total}\n"));
    }
    if let Some(vat) = &record.vat_amount {
        output.push_str(&format!("VAT:   {vat}\n"));
    }
    if let Some(warning) = &record.extraction_warning {
        output.push_str(&format!("\nWarning: {warning}\n"));
    }

    Ok(output)
}

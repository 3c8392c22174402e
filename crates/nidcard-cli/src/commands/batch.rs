//! Batch processing command for multiple card files.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use nidcard_core::models::config::NidcardConfig;
use nidcard_core::models::record::CardData;
use nidcard_core::pdf::{PdfExtractor, PdfProcessor};
use nidcard_core::{CardParser, Strategy};

use super::process::{CardResponse, OutputFormat, StrategyArg, format_text};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Extraction strategy (overrides config)
    #[arg(short, long, value_enum)]
    strategy: Option<StrategyArg>,

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
    data: Option<CardData>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = if let Some(path) = config_path {
        NidcardConfig::from_file(std::path::Path::new(path))?
    } else {
        NidcardConfig::default()
    };

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "pdf" | "txt")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut parser = CardParser::new(&config.extraction);
    if let Some(strategy) = args.strategy {
        parser = parser.with_strategy(Strategy::from(strategy));
    }

    let mut results = Vec::with_capacity(files.len());
    for path in files {
        let file_start = Instant::now();
        let result = process_single_file(&path, &parser);
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok(data) => {
                results.push(ProcessResult {
                    path: path.clone(),
                    data: Some(data),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path: path.clone(),
                        data: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed: {}", error_msg);
                }
            }
        }

        overall_pb.inc(1);
    }

    overall_pb.finish_with_message("Complete");

    let successful: Vec<_> = results.iter().filter(|r| r.data.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    for result in &successful {
        if let (Some(data), Some(output_dir)) = (&result.data, &args.output_dir) {
            let output_name = result
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("card");

            let extension = match args.format {
                OutputFormat::Json => "json",
                OutputFormat::Text => "txt",
            };
            let output_path = output_dir.join(format!("{}.{}", output_name, extension));

            let response = CardResponse {
                status: "success".to_string(),
                data: data.clone(),
                images: Vec::new(),
            };
            let content = match args.format {
                OutputFormat::Json => serde_json::to_string(&response)?,
                OutputFormat::Text => format_text(&response),
            };

            fs::write(&output_path, content)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn process_single_file(path: &PathBuf, parser: &CardParser) -> anyhow::Result<CardData> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let text = match extension.as_str() {
        "pdf" => {
            let data = fs::read(path)?;
            let mut extractor = PdfExtractor::new();
            extractor.load(&data)?;
            extractor.extract_text()?
        }
        "txt" => fs::read_to_string(path)?,
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    };

    if text.trim().is_empty() {
        anyhow::bail!("No text extracted from {}", path.display());
    }

    // Unlike `process`, batch reports parser errors per file instead of
    // degrading them to an empty payload.
    Ok(parser.parse(&text)?)
}

/// Look up a field value in either output shape.
fn field<'a>(data: &'a CardData, label: &str) -> Option<&'a str> {
    match data {
        CardData::Records(records) => records
            .iter()
            .find(|r| r.label == label)
            .map(|r| r.value.as_str()),
        CardData::Colon(colon) => colon
            .direct
            .get(label)
            .or_else(|| colon.fields.get(label))
            .map(String::as_str),
    }
}

fn record_count(data: &CardData) -> usize {
    match data {
        CardData::Records(records) => records.len(),
        CardData::Colon(colon) => colon.fields.len() + colon.direct.len(),
    }
}

fn write_summary(path: &PathBuf, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "national_id",
        "name_english",
        "date_of_birth",
        "blood_group",
        "record_count",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(data) = &result.data {
            wtr.write_record([
                filename,
                "success",
                field(data, "National ID").unwrap_or(""),
                field(data, "Name(English)").unwrap_or(""),
                field(data, "Date of Birth").unwrap_or(""),
                field(data, "Blood Group").unwrap_or(""),
                &record_count(data).to_string(),
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
                &result.processing_time_ms.to_string(),
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

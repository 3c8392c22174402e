//! Process command - extract fields from a single card file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, info, warn};

use nidcard_core::models::config::NidcardConfig;
use nidcard_core::models::record::CardData;
use nidcard_core::pdf::{ExtractedImage, PdfExtractor, PdfProcessor};
use nidcard_core::upload::{ImgbbUploader, upload_all};
use nidcard_core::{CardParser, Strategy};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or plain text dump of the text layer)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Extraction strategy (overrides config)
    #[arg(short, long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Upload extracted images to the configured hosting service
    #[arg(long)]
    upload_images: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON response payload
    Json,
    /// Plain text summary
    Text,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum StrategyArg {
    /// Script-aware row-wise pairing
    RowWise,
    /// Colon-delimited splitting with continuation recovery
    ColonDelimited,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::RowWise => Strategy::RowWise,
            StrategyArg::ColonDelimited => Strategy::ColonDelimited,
        }
    }
}

/// Response payload mirroring the parsing API this tool replaces.
#[derive(Serialize)]
pub struct CardResponse {
    pub status: String,
    pub data: CardData,
    pub images: Vec<String>,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = if let Some(path) = config_path {
        NidcardConfig::from_file(std::path::Path::new(path))?
    } else {
        NidcardConfig::default()
    };

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let extension = args
        .input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    let (text, images) = match extension.as_str() {
        "pdf" => extract_pdf(&args.input, &config, &pb)?,
        "txt" => {
            pb.set_message("Reading text...");
            pb.set_position(30);
            (fs::read_to_string(&args.input)?, Vec::new())
        }
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    };

    if text.trim().len() < config.pdf.min_text_length {
        warn!(
            "text layer is only {} characters; extraction may come up empty",
            text.trim().len()
        );
    }

    pb.set_message("Extracting card fields...");
    pb.set_position(60);

    let mut parser = CardParser::new(&config.extraction);
    if let Some(strategy) = args.strategy {
        parser = parser.with_strategy(strategy.into());
    }

    // Parser-internal failures degrade to an empty payload under a success
    // status; only input-shape problems abort the command.
    let data = parser.parse_or_empty(&text);

    let image_urls = if args.upload_images || config.upload.enabled {
        pb.set_message("Uploading images...");
        pb.set_position(80);
        upload_images(&config, &images).await?
    } else {
        Vec::new()
    };

    pb.finish_with_message("Done");

    let response = CardResponse {
        status: "success".to_string(),
        data,
        images: image_urls,
    };

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string(&response)?,
        OutputFormat::Text => format_text(&response),
    };

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

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn extract_pdf(
    input: &PathBuf,
    config: &NidcardConfig,
    pb: &ProgressBar,
) -> anyhow::Result<(String, Vec<ExtractedImage>)> {
    pb.set_message("Loading PDF...");
    pb.set_position(10);

    let data = fs::read(input)?;
    let mut extractor = PdfExtractor::new();
    extractor.load(&data)?;

    let page_count = extractor.page_count();
    debug!("PDF has {} pages", page_count);
    if config.pdf.max_pages > 0 && page_count as usize > config.pdf.max_pages {
        warn!(
            "PDF has {} pages, more than the configured maximum of {}",
            page_count, config.pdf.max_pages
        );
    }

    pb.set_message("Extracting text and images...");
    pb.set_position(30);

    let content = extractor.extract_all()?;
    Ok((content.text, content.images))
}

async fn upload_images(
    config: &NidcardConfig,
    images: &[ExtractedImage],
) -> anyhow::Result<Vec<String>> {
    if images.is_empty() {
        return Ok(Vec::new());
    }

    let uploader = ImgbbUploader::from_config(&config.upload).map_err(|e| {
        anyhow::anyhow!("{e}. Set upload.api_key in the config or NIDCARD_IMGBB_KEY in the environment.")
    })?;

    Ok(upload_all(&uploader, images).await)
}

pub(crate) fn format_text(response: &CardResponse) -> String {
    let mut output = String::new();

    match &response.data {
        CardData::Records(records) => {
            for record in records {
                output.push_str(&format!("{}: {}\n", record.label, record.value));
            }
        }
        CardData::Colon(colon) => {
            for (key, value) in &colon.fields {
                output.push_str(&format!("{}: {}\n", key, value));
            }
            if !colon.direct.is_empty() {
                output.push_str("\nDirect pairs:\n");
                for (key, value) in &colon.direct {
                    output.push_str(&format!("  {}: {}\n", key, value));
                }
            }
        }
    }

    if !response.images.is_empty() {
        output.push_str("\nImages:\n");
        for url in &response.images {
            output.push_str(&format!("  {}\n", url));
        }
    }

    output
}

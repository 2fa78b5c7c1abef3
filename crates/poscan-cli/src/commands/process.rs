//! Process command - extract data from one document's page images.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use image::DynamicImage;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use poscan_core::extract::resolve_document_type;
use poscan_core::{DocumentProcessor, ExtractionResult, TesseractEngine};

use super::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Page images of one document, in reading order
    #[arg(required = true)]
    pages: Vec<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Document type selecting the pattern tables
    #[arg(long, default_value = "po_document")]
    doc_type: String,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output (item table)
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    config.extraction.document_type = resolve_document_type(&args.doc_type)?;

    // Load all pages up front; a missing page fails the whole document.
    let pb = ProgressBar::new(args.pages.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );
    pb.set_message("Loading pages");

    let mut pages: Vec<DynamicImage> = Vec::with_capacity(args.pages.len());
    for path in &args.pages {
        if !path.exists() {
            anyhow::bail!("Input file not found: {}", path.display());
        }
        pages.push(image::open(path)?);
        pb.inc(1);
    }

    let filename = args
        .pages
        .first()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .unwrap_or("document")
        .to_string();

    info!("Processing document '{}' ({} pages)", filename, pages.len());
    pb.set_message("Recognizing");

    let processor = DocumentProcessor::with_config(TesseractEngine::new(), config);
    let result = processor.process(&pages, &filename)?;

    pb.finish_with_message("Done");

    let output = format_result(&result, args.format)?;
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

    println!(
        "{} {} items extracted from {} pages",
        style("ℹ").blue(),
        result.processing_info.items_found,
        result.processing_info.pages_processed
    );

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Render an extraction result in the requested output format.
pub fn format_result(result: &ExtractionResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "main_fields": result.main_fields,
                "items": result.items,
                "processing_info": result.processing_info,
                "raw_text": truncate_raw_text(&result.raw_text),
            });
            Ok(serde_json::to_string_pretty(&value)?)
        }
        OutputFormat::Csv => format_items_csv(result),
        OutputFormat::Text => Ok(format_result_text(result)),
    }
}

/// The persisted raw text keeps only the first 1000 characters.
fn truncate_raw_text(raw: &str) -> String {
    if raw.chars().count() <= 1000 {
        return raw.to_string();
    }
    let head: String = raw.chars().take(1000).collect();
    format!("{}...", head)
}

fn format_items_csv(result: &ExtractionResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    for item in &result.items {
        wtr.serialize(item)?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_result_text(result: &ExtractionResult) -> String {
    let fields = &result.main_fields;
    let mut output = String::new();

    output.push_str(&format!("Supplier:        {}\n", fields.supplier));
    output.push_str(&format!("Document Number: {}\n", fields.document_number));
    output.push_str(&format!("Date:            {}\n", fields.date));
    output.push_str(&format!("Status:          {}\n", fields.status));
    output.push_str(&format!("Address:         {}\n", fields.address));
    output.push_str(&format!("To:              {}\n", fields.to));
    output.push('\n');

    output.push_str(&format!("Items ({}):\n", result.items.len()));
    for item in &result.items {
        output.push_str(&format!(
            "  {:<12} {}  qty {}  total {}\n",
            item.item_code,
            item.description,
            if item.quantity.is_empty() { "-" } else { item.quantity.as_str() },
            if item.total_cost.is_empty() { "-" } else { item.total_cost.as_str() },
        ));
    }

    output
}

//! Extract command - run the extraction stages over already-OCR'd text.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use poscan_core::extract::resolve_document_type;
use poscan_core::ocr::DocumentText;
use poscan_core::pipeline::extract_document;

use super::load_config;
use super::process::{format_result, OutputFormat};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Text file containing OCR output
    #[arg(required = true)]
    input: PathBuf,

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

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    config.extraction.document_type = resolve_document_type(&args.doc_type)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let text = fs::read_to_string(&args.input)?;
    let filename = args
        .input
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document")
        .to_string();

    info!("Extracting from {} characters of text", text.len());

    let document = DocumentText::from_pages(vec![text]);
    let result = extract_document(&document, &filename, &config.extraction);

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

    Ok(())
}

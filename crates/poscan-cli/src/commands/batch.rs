//! Batch processing command for multiple scanned documents.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use poscan_core::extract::resolve_document_type;
use poscan_core::{DocumentProcessor, ExtractionResult, TesseractEngine};

use super::load_config;
use super::process::{format_result, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern (each file is one single-page document)
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long, default_value = "processed")]
    output_dir: PathBuf,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Document type selecting the pattern tables
    #[arg(long, default_value = "po_document")]
    doc_type: String,
}

/// Result of processing a single file.
struct FileResult {
    path: PathBuf,
    result: Option<ExtractionResult>,
    error: Option<String>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    config.extraction.document_type = resolve_document_type(&args.doc_type)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(
                ext.to_lowercase().as_str(),
                "png" | "jpg" | "jpeg" | "tiff" | "tif" | "bmp"
            )
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

    fs::create_dir_all(&args.output_dir)?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let processor = DocumentProcessor::with_config(TesseractEngine::new(), config);

    // One document at a time; a failing file never stops the rest.
    let mut results = Vec::with_capacity(files.len());
    for path in files {
        match process_single_file(&processor, &path) {
            Ok(result) => {
                write_output(&args, &path, &result)?;
                results.push(FileResult {
                    path,
                    result: Some(result),
                    error: None,
                });
            }
            Err(e) => {
                warn!("Failed to process {}: {}", path.display(), e);
                results.push(FileResult {
                    path,
                    result: None,
                    error: Some(e.to_string()),
                });
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    let successful: Vec<_> = results.iter().filter(|r| r.result.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    if args.summary {
        let summary_path = args.output_dir.join("summary.csv");
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
        for file in &failed {
            println!(
                "  - {}: {}",
                file.path.display(),
                file.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn process_single_file(
    processor: &DocumentProcessor<TesseractEngine>,
    path: &PathBuf,
) -> anyhow::Result<ExtractionResult> {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document")
        .to_string();

    let page = image::open(path)?;
    let result = processor.process(&[page], &filename)?;
    Ok(result)
}

fn write_output(args: &BatchArgs, path: &PathBuf, result: &ExtractionResult) -> anyhow::Result<()> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");

    let extension = match args.format {
        OutputFormat::Json => "json",
        OutputFormat::Csv => "csv",
        OutputFormat::Text => "txt",
    };

    let output_path = args
        .output_dir
        .join(format!("processed_{}.{}", stem, extension));

    fs::write(&output_path, format_result(result, args.format)?)?;
    debug!("Wrote output to {}", output_path.display());

    Ok(())
}

fn write_summary(path: &PathBuf, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "supplier",
        "document_number",
        "date",
        "items_found",
        "error",
    ])?;

    for file in results {
        let filename = file
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(result) = &file.result {
            wtr.write_record([
                filename,
                "success",
                &result.main_fields.supplier,
                &result.main_fields.document_number,
                &result.main_fields.date,
                &result.processing_info.items_found.to_string(),
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
                file.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

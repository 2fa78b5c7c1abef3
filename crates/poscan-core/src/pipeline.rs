//! End-to-end document processing pipeline.

use std::time::Instant;

use image::DynamicImage;
use tracing::{debug, info};

use crate::error::{OcrError, Result};
use crate::extract::{FieldExtractor, ItemTableParser};
use crate::models::config::{ExtractionConfig, PoscanConfig};
use crate::models::document::{ExtractionResult, ProcessingInfo};
use crate::ocr::{DocumentText, ImageEnhancer, OcrEngine};

/// Processes one document at a time: pages through enhancement and OCR,
/// then both extraction stages over the joined text.
///
/// Everything in flight is request-scoped; nothing is retained between
/// documents.
pub struct DocumentProcessor<E: OcrEngine> {
    enhancer: ImageEnhancer,
    engine: E,
    config: PoscanConfig,
}

impl<E: OcrEngine> DocumentProcessor<E> {
    /// Create a processor with default configuration.
    pub fn new(engine: E) -> Self {
        Self::with_config(engine, PoscanConfig::default())
    }

    /// Create a processor with explicit configuration.
    pub fn with_config(engine: E, config: PoscanConfig) -> Self {
        Self {
            enhancer: ImageEnhancer::with_config(config.enhance.clone()),
            engine,
            config,
        }
    }

    /// Enhance and recognize every page in order, joining per-page text
    /// with a blank line.
    pub fn read_pages(&self, pages: &[DynamicImage]) -> crate::ocr::Result<DocumentText> {
        let mut page_texts = Vec::with_capacity(pages.len());

        for (index, page) in pages.iter().enumerate() {
            info!("Recognizing page {} of {}", index + 1, pages.len());
            let enhanced = self.enhancer.enhance(page);
            let text = self.engine.recognize(&enhanced, &self.config.ocr)?;
            page_texts.push(text);
        }

        Ok(DocumentText::from_pages(page_texts))
    }

    /// Process one document end to end.
    ///
    /// An engine failure stops this document only and surfaces as an error
    /// value; extraction misses do not — an all-sentinel result with zero
    /// items is valid, low-confidence output.
    pub fn process(&self, pages: &[DynamicImage], filename: &str) -> Result<ExtractionResult> {
        let start = Instant::now();

        if pages.is_empty() {
            return Err(OcrError::Input(format!("document '{filename}' has no pages")).into());
        }

        let document = self.read_pages(pages)?;
        if document.is_blank() {
            debug!("No text recognized in '{}'", filename);
        }

        let result = extract_document(&document, filename, &self.config.extraction);
        info!(
            "Processed '{}': {} pages, {} items in {}ms",
            filename,
            result.processing_info.pages_processed,
            result.processing_info.items_found,
            start.elapsed().as_millis()
        );

        Ok(result)
    }
}

/// Run both extraction stages over already-OCR'd document text.
///
/// The stages are independent and read the same immutable text.
pub fn extract_document(
    document: &DocumentText,
    filename: &str,
    config: &ExtractionConfig,
) -> ExtractionResult {
    let main_fields = FieldExtractor::new(config.document_type).extract(&document.text);
    let items = ItemTableParser::with_config(config).parse(&document.text);

    ExtractionResult {
        processing_info: ProcessingInfo::new(filename, document.pages, items.len()),
        main_fields,
        items,
        raw_text: document.text.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::OcrConfig;
    use crate::models::document::NOT_FOUND;
    use image::GrayImage;

    /// Engine stub returning a fixed page text.
    struct FixedEngine(&'static str);

    impl OcrEngine for FixedEngine {
        fn recognize(
            &self,
            _image: &GrayImage,
            _config: &OcrConfig,
        ) -> crate::ocr::Result<String> {
            Ok(self.0.to_string())
        }
    }

    /// Engine stub that always fails.
    struct BrokenEngine;

    impl OcrEngine for BrokenEngine {
        fn recognize(
            &self,
            _image: &GrayImage,
            _config: &OcrConfig,
        ) -> crate::ocr::Result<String> {
            Err(OcrError::Recognition("engine unavailable".to_string()))
        }
    }

    fn page() -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_pixel(1801, 4, image::Luma([255])))
    }

    const PAGE_TEXT: &str = "\
No. PO PO-77
Supplier | Vendor X |
Date: 05/03/2024
PRT001 Widget A / Steel / PN123
750.000,00 10,00 5,00
Subtotal 760.000,00";

    #[test]
    fn test_process_single_page_document() {
        let processor = DocumentProcessor::new(FixedEngine(PAGE_TEXT));
        let result = processor.process(&[page()], "po.pdf").unwrap();

        assert_eq!(result.main_fields.document_number, "PO-77");
        assert_eq!(result.main_fields.supplier, "Vendor X");
        assert_eq!(result.main_fields.date, "2024-03-05");
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].total_cost, "750.000,00");
        assert_eq!(result.processing_info.pages_processed, 1);
        assert_eq!(result.processing_info.items_found, 1);
        assert_eq!(result.processing_info.filename, "po.pdf");
    }

    #[test]
    fn test_blank_pages_give_valid_sentinel_result() {
        let processor = DocumentProcessor::new(FixedEngine("  "));
        let result = processor.process(&[page(), page()], "empty.pdf").unwrap();

        assert!(result.main_fields.is_all_sentinels());
        assert_eq!(result.main_fields.supplier, NOT_FOUND);
        assert!(result.items.is_empty());
        assert_eq!(result.processing_info.pages_processed, 2);
    }

    #[test]
    fn test_engine_failure_surfaces_as_error_value() {
        let processor = DocumentProcessor::new(BrokenEngine);
        let err = processor.process(&[page()], "po.pdf").unwrap_err();

        assert!(matches!(
            err,
            crate::error::PoscanError::Ocr(OcrError::Recognition(_))
        ));
    }

    #[test]
    fn test_empty_document_is_an_input_error() {
        let processor = DocumentProcessor::new(FixedEngine(""));
        let err = processor.process(&[], "none.pdf").unwrap_err();

        assert!(matches!(
            err,
            crate::error::PoscanError::Ocr(OcrError::Input(_))
        ));
    }

    #[test]
    fn test_extract_document_is_pure_over_text() {
        let document = DocumentText::from_pages(vec![PAGE_TEXT.to_string()]);
        let config = ExtractionConfig::default();

        let first = extract_document(&document, "po.pdf", &config);
        let second = extract_document(&document, "po.pdf", &config);

        assert_eq!(first.main_fields.supplier, second.main_fields.supplier);
        assert_eq!(first.items, second.items);
    }
}

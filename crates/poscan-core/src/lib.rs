//! Core library for purchase-order scan extraction.
//!
//! This crate provides:
//! - Page image enhancement tuned for OCR accuracy
//! - A black-box boundary to the external OCR engine
//! - Priority-ordered header field extraction over noisy OCR text
//! - A line-classification state machine reconstructing the item table

pub mod error;
pub mod extract;
pub mod models;
pub mod ocr;
pub mod pipeline;

pub use error::{ExtractionError, OcrError, PoscanError, Result};
pub use extract::{normalize_date, FieldExtractor, ItemTableParser};
pub use models::{
    DocumentType, ExtractionResult, ItemRecord, MainFields, PoscanConfig, ProcessingInfo,
    NOT_FOUND,
};
pub use ocr::{DocumentText, ImageEnhancer, OcrEngine, TesseractEngine};
pub use pipeline::{extract_document, DocumentProcessor};

//! Error types for the poscan-core library.

use thiserror::Error;

/// Main error type for the poscan library.
#[derive(Error, Debug)]
pub enum PoscanError {
    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Field/item extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Image processing error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Source page image missing or unreadable.
    #[error("unreadable input: {0}")]
    Input(String),

    /// The external engine failed during recognition.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Invalid image format or dimensions.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// Errors related to document field extraction.
///
/// Pattern misses are not errors; they resolve to the "Not found" sentinel.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Unknown document type requested.
    #[error("unsupported document type: {0}")]
    UnsupportedType(String),
}

/// Result type for the poscan library.
pub type Result<T> = std::result::Result<T, PoscanError>;

//! Extraction stages running over OCR'd document text.

pub mod fields;
pub mod items;
pub mod patterns;

pub use fields::{normalize_date, FieldExtractor};
pub use items::ItemTableParser;

use crate::error::ExtractionError;
use crate::models::document::DocumentType;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Resolve a document type from its wire name.
pub fn resolve_document_type(name: &str) -> Result<DocumentType> {
    DocumentType::from_name(name)
        .ok_or_else(|| ExtractionError::UnsupportedType(name.to_string()))
}

//! OCR stage: page enhancement and the external-engine boundary.

mod engine;
mod preprocessing;

pub use engine::{OcrEngine, TesseractEngine};
pub use preprocessing::ImageEnhancer;

use serde::{Deserialize, Serialize};

use crate::error::OcrError;

/// Result type for OCR operations.
pub type Result<T> = std::result::Result<T, OcrError>;

/// Concatenated per-page OCR output for one document.
///
/// Pages are joined by a blank line. Immutable once produced; the sole
/// input to both extraction stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentText {
    /// Full document text.
    pub text: String,

    /// Number of pages the text was read from.
    pub pages: usize,
}

impl DocumentText {
    /// Join per-page OCR outputs into one document text.
    pub fn from_pages(pages: Vec<String>) -> Self {
        Self {
            pages: pages.len(),
            text: pages.join("\n\n"),
        }
    }

    /// True when no page yielded any non-whitespace text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_join_with_blank_line() {
        let doc = DocumentText::from_pages(vec!["page one".to_string(), "page two".to_string()]);
        assert_eq!(doc.text, "page one\n\npage two");
        assert_eq!(doc.pages, 2);
    }

    #[test]
    fn test_blank_document() {
        let doc = DocumentText::from_pages(vec!["  ".to_string(), "\n".to_string()]);
        assert!(doc.is_blank());
    }
}

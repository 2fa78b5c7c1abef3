//! Output data models for purchase-order document extraction.

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Sentinel value recorded for every field an extraction pass could not find.
pub const NOT_FOUND: &str = "Not found";

/// Kind of document the pattern tables are tuned for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Scanned purchase order.
    #[default]
    PoDocument,
}

impl DocumentType {
    /// Parse a document type from its wire name.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "po_document" | "po" => Some(DocumentType::PoDocument),
            _ => None,
        }
    }

    /// Wire name of the document type.
    pub fn name(&self) -> &'static str {
        match self {
            DocumentType::PoDocument => "po_document",
        }
    }
}

/// Header-level fields extracted from the document text.
///
/// Every field is always present; a miss holds the [`NOT_FOUND`] sentinel,
/// never an absent key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainFields {
    #[serde(rename = "Supplier")]
    pub supplier: String,

    #[serde(rename = "Document Number")]
    pub document_number: String,

    /// Normalized to `YYYY-MM-DD` where the raw value allows it.
    #[serde(rename = "Date")]
    pub date: String,

    #[serde(rename = "Status")]
    pub status: String,

    #[serde(rename = "Address")]
    pub address: String,

    #[serde(rename = "To")]
    pub to: String,

    /// Local timestamp of the extraction pass.
    #[serde(rename = "Extracted At")]
    pub extracted_at: String,
}

impl MainFields {
    /// All-sentinel fields stamped with the current time.
    ///
    /// This is a valid, low-confidence result, not a failure.
    pub fn not_found() -> Self {
        Self {
            supplier: NOT_FOUND.to_string(),
            document_number: NOT_FOUND.to_string(),
            date: NOT_FOUND.to_string(),
            status: NOT_FOUND.to_string(),
            address: NOT_FOUND.to_string(),
            to: NOT_FOUND.to_string(),
            extracted_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    /// True when every extractable field holds the sentinel.
    pub fn is_all_sentinels(&self) -> bool {
        [
            &self.supplier,
            &self.document_number,
            &self.date,
            &self.status,
            &self.address,
            &self.to,
        ]
        .iter()
        .all(|v| *v == NOT_FOUND)
    }
}

impl Default for MainFields {
    fn default() -> Self {
        Self::not_found()
    }
}

/// One reconstructed row of the item table.
///
/// Numeric fields carry the decimal token exactly as OCR'd (for example
/// `750.000,00`), or an empty string when the row did not yield one -
/// never an absent key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(rename = "Item Code")]
    pub item_code: String,

    /// Description with decimal tokens stripped and whitespace collapsed.
    #[serde(rename = "Description")]
    pub description: String,

    #[serde(rename = "Unit Cost")]
    pub unit_cost: String,

    #[serde(rename = "Discount")]
    pub discount: String,

    #[serde(rename = "Quantity")]
    pub quantity: String,

    #[serde(rename = "Total Cost")]
    pub total_cost: String,

    /// Original buffer lines joined with `" | "`, kept for traceability.
    #[serde(rename = "Raw Lines")]
    pub raw_lines: String,

    // Positional decomposition of the slash-separated description.
    #[serde(rename = "Item Name")]
    pub item_name: String,

    #[serde(rename = "Type")]
    pub item_type: String,

    #[serde(rename = "Part Number")]
    pub part_number: String,

    #[serde(rename = "Product Code")]
    pub product_code: String,

    #[serde(rename = "Size")]
    pub size: String,

    #[serde(rename = "Color")]
    pub color: String,

    #[serde(rename = "Brand")]
    pub brand: String,

    /// Number of `/`-separated segments the description split into.
    #[serde(rename = "Description Parts Count")]
    pub description_parts_count: usize,

    /// True when the description split into more than 3 segments.
    #[serde(rename = "Has Structured Description")]
    pub has_structured_description: bool,
}

/// Metadata about one document-processing request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingInfo {
    /// Source file name as reported by the caller.
    pub filename: String,

    /// Number of page images fed through OCR.
    pub pages_processed: usize,

    /// Number of item records in the final output.
    pub items_found: usize,

    /// Local timestamp of the processing run.
    pub processed_at: String,
}

impl ProcessingInfo {
    pub fn new(filename: impl Into<String>, pages: usize, items: usize) -> Self {
        Self {
            filename: filename.into(),
            pages_processed: pages,
            items_found: items,
            processed_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Aggregate result for one document, handed to the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Header fields (always fully populated, sentinels included).
    pub main_fields: MainFields,

    /// Reconstructed item table, in document order.
    pub items: Vec<ItemRecord>,

    /// Processing metadata.
    pub processing_info: ProcessingInfo,

    /// Full OCR text the extraction ran over.
    pub raw_text: String,
}

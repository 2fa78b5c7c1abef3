//! Static pattern tables for document field and item-table extraction.
//!
//! Per-field patterns are tried in declared priority order; the tables are
//! data, not code, so a new document type is a new table, not new parser
//! logic.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::document::DocumentType;

/// Ordered pattern lists for the header fields of one document type.
pub struct FieldPatterns {
    pub supplier: Vec<Regex>,
    pub document_number: Vec<Regex>,
    pub date: Vec<Regex>,
    pub status: Vec<Regex>,
    pub address: Vec<Regex>,
    pub to: Vec<Regex>,
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("invalid static pattern"))
        .collect()
}

lazy_static! {
    /// Pattern table for scanned purchase orders.
    ///
    /// The first patterns target the "Label | Value | ..." table rows of
    /// the source layout; later ones are plain "Label: value" fallbacks.
    pub static ref PO_DOCUMENT: FieldPatterns = FieldPatterns {
        supplier: compile(&[
            r"(?im)Supplier\s*\|\s*(.+?)(?:\||$)",
            r"(?im)From\s*[:]\s*(.+?)(?:\n|$)",
            r"(?im)Vendor\s*[:]\s*(.+?)(?:\n|$)",
        ]),
        document_number: compile(&[
            r"(?im)No\.?\s*PO\s*([A-Z0-9-]+)",
            r"(?im)PO\s*Number\s*[:]\s*([A-Z0-9-]+)",
            r"(?im)Purchase\s*Order\s*[:]\s*([A-Z0-9-]+)",
        ]),
        date: compile(&[
            r"(?im)Date\s*(\d{4}-\d{2}-\d{2}\s*\d{2}:\d{2}:\d{2})",
            r"(?im)Date\s*[:]\s*(\d{1,2}[/-]\d{1,2}[/-]\d{4})",
            r"(?im)(\d{4}-\d{2}-\d{2})",
        ]),
        status: compile(&[
            r"(?im)Status\s*PO\s*\|\s*(.+?)(?:\n|$)",
            r"(?im)Status\s*[:]\s*(.+?)(?:\n|$)",
        ]),
        address: compile(&[
            r"(?im)(Jl\..+?)(?:\n|$)",
            r"(?im)Address\s*[:]\s*(.+?)(?:\n|$)",
        ]),
        to: compile(&[
            r"(?im)\|\s*To\s*(.+?)(?:\n|$)",
            r"(?im)To\s*[:]\s*(.+?)(?:\n|$)",
            r"(?im)Ship\s*To\s*[:]\s*(.+?)(?:\n|$)",
        ]),
    };

    /// Lines opening a new item record: an item code token, a leading
    /// ordinal, or an uppercase code prefix.
    pub static ref ITEM_START: Vec<Regex> = compile(&[
        r"^PRT\d*",
        r"^\d+\s+[A-Z]",
        r"^[A-Z]{2,}\d+",
    ]);

    /// Table footer markers terminating the item section.
    pub static ref TABLE_FOOTER: Regex =
        Regex::new(r"(?i)(subtotal|total|grand\s*total)").unwrap();

    /// Smallest decimal-number shape; item-data indicator and
    /// continuation-line test.
    pub static ref DECIMAL_TOKEN: Regex = Regex::new(r"\d+[.,]\d+").unwrap();

    /// Price-token families scanned over a whole item block, in order:
    /// `750.000,00`, then `1,00`, then `750.000`.
    pub static ref PRICE_FAMILIES: [Regex; 3] = [
        Regex::new(r"\d+\.\d+,\d+").unwrap(),
        Regex::new(r"\d+,\d+").unwrap(),
        Regex::new(r"\d+\.\d+").unwrap(),
    ];

    /// Decimal tokens as read off a block's final line (and stripped from
    /// descriptions): grouped form first, simple form as fallback.
    pub static ref SUMMARY_TOKEN: Regex =
        Regex::new(r"\d+[.,]\d+[.,]\d+|\d+[.,]\d+").unwrap();

    /// Characters stripped from decomposed description sub-fields.
    pub static ref FIELD_JUNK: Regex = Regex::new(r"[^\w\s\-.]").unwrap();

    /// Whitespace runs collapsed to a single space during cleanup.
    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();

    // Date normalization shapes, tried in order.
    pub static ref DATE_ISO: Regex = Regex::new(r"\d{4}-\d{2}-\d{2}").unwrap();
    pub static ref DATE_DMY: Regex =
        Regex::new(r"(\d{1,2})[/-](\d{1,2})[/-](\d{4})").unwrap();
    pub static ref DATE_YMD: Regex =
        Regex::new(r"(\d{4})[/-](\d{1,2})[/-](\d{1,2})").unwrap();
}

/// Pattern table for a document type.
pub fn for_document(doc_type: DocumentType) -> &'static FieldPatterns {
    match doc_type {
        DocumentType::PoDocument => &PO_DOCUMENT,
    }
}

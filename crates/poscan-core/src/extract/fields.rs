//! Header field extraction with priority-ordered pattern lists.

use chrono::Local;
use regex::Regex;
use tracing::debug;

use crate::models::document::{DocumentType, MainFields, NOT_FOUND};

use super::patterns::{self, DATE_DMY, DATE_ISO, DATE_YMD, WHITESPACE_RUN};

/// Extracts the header fields of a document from its OCR text.
pub struct FieldExtractor {
    doc_type: DocumentType,
}

impl FieldExtractor {
    /// Create an extractor for the given document type.
    pub fn new(doc_type: DocumentType) -> Self {
        Self { doc_type }
    }

    /// Extract all header fields.
    ///
    /// Every field of the result is populated; pattern misses resolve to
    /// the "Not found" sentinel, which is the expected common case for
    /// noisy OCR text.
    pub fn extract(&self, text: &str) -> MainFields {
        let table = patterns::for_document(self.doc_type);

        let fields = MainFields {
            supplier: extract_field(text, &table.supplier),
            document_number: extract_field(text, &table.document_number),
            date: normalize_date(&extract_field(text, &table.date)),
            status: extract_field(text, &table.status),
            address: extract_field(text, &table.address),
            to: extract_field(text, &table.to),
            extracted_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        };

        if fields.is_all_sentinels() {
            debug!("No header field matched; returning all sentinels");
        }

        fields
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new(DocumentType::PoDocument)
    }
}

/// Try the field's patterns in priority order; the first whose capture
/// survives cleanup non-empty wins and later patterns are not consulted.
fn extract_field(text: &str, field_patterns: &[Regex]) -> String {
    for pattern in field_patterns {
        let Some(caps) = pattern.captures(text) else {
            continue;
        };
        let Some(capture) = caps.get(1) else {
            continue;
        };

        let cleaned = clean_capture(capture.as_str());
        if !cleaned.is_empty() && cleaned != NOT_FOUND {
            return cleaned;
        }
    }

    NOT_FOUND.to_string()
}

/// Uniform post-match cleanup: collapse whitespace runs, keep only the
/// segment before the first `|` (the boundary artifact of a
/// "Label | Value | ..." table row), and trim.
fn clean_capture(raw: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(raw.trim(), " ");
    collapsed
        .split('|')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Normalize an extracted date to `YYYY-MM-DD`.
///
/// Tries, in order: a verbatim ISO date, a day-month-year form, and a
/// year-month-day form with single-digit fields. Anything else is returned
/// unchanged rather than forced to the sentinel.
pub fn normalize_date(value: &str) -> String {
    if value.is_empty() || value == NOT_FOUND {
        return NOT_FOUND.to_string();
    }

    if let Some(m) = DATE_ISO.find(value) {
        return m.as_str().to_string();
    }

    if let Some(caps) = DATE_DMY.captures(value) {
        return format!("{}-{:0>2}-{:0>2}", &caps[3], &caps[2], &caps[1]);
    }

    if let Some(caps) = DATE_YMD.captures(value) {
        return format!("{}-{:0>2}-{:0>2}", &caps[1], &caps[2], &caps[3]);
    }

    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "\
Purchase Order
No. PO PO-2024-0019
Supplier | Mitra Baja Utama | Confirmed
Status PO | Open |
Date: 05/03/2024
Jl. Industri Raya 12, Cikarang
| To Gudang Timur
";

    #[test]
    fn test_extracts_labeled_fields() {
        let fields = FieldExtractor::default().extract(SAMPLE);

        assert_eq!(fields.supplier, "Mitra Baja Utama");
        assert_eq!(fields.document_number, "PO-2024-0019");
        assert_eq!(fields.status, "Open");
        assert_eq!(fields.address, "Jl. Industri Raya 12, Cikarang");
        assert_eq!(fields.to, "Gudang Timur");
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let extractor = FieldExtractor::default();
        let first = extractor.extract(SAMPLE);
        let second = extractor.extract(SAMPLE);

        assert_eq!(first.supplier, second.supplier);
        assert_eq!(first.document_number, second.document_number);
        assert_eq!(first.date, second.date);
        assert_eq!(first.status, second.status);
        assert_eq!(first.address, second.address);
        assert_eq!(first.to, second.to);
    }

    #[test]
    fn test_earlier_pattern_wins_over_later() {
        // Both the table-row form and the "From:" fallback are present;
        // the table-row pattern is declared first and must win.
        let text = "From: Fallback Vendor\nSupplier | Primary Vendor |\n";
        let fields = FieldExtractor::default().extract(text);

        assert_eq!(fields.supplier, "Primary Vendor");
    }

    #[test]
    fn test_fallback_pattern_used_when_first_misses() {
        let text = "From: Fallback Vendor\n";
        let fields = FieldExtractor::default().extract(text);

        assert_eq!(fields.supplier, "Fallback Vendor");
    }

    #[test]
    fn test_pipe_separated_capture_keeps_first_segment() {
        let text = "Status: Open | approved by admin\n";
        let fields = FieldExtractor::default().extract(text);

        assert_eq!(fields.status, "Open");
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        let text = "Vendor:   Mitra   Baja\t Utama\n";
        let fields = FieldExtractor::default().extract(text);

        assert_eq!(fields.supplier, "Mitra Baja Utama");
    }

    #[test]
    fn test_all_fields_present_when_nothing_matches() {
        let fields = FieldExtractor::default().extract("completely unrelated text");

        assert!(fields.is_all_sentinels());
        assert_eq!(fields.date, NOT_FOUND);
    }

    #[test]
    fn test_normalize_date_dmy() {
        assert_eq!(normalize_date("05/03/2024"), "2024-03-05");
        assert_eq!(normalize_date("5/3/2024"), "2024-03-05");
        assert_eq!(normalize_date("05-03-2024"), "2024-03-05");
    }

    #[test]
    fn test_normalize_date_iso_passthrough() {
        assert_eq!(normalize_date("2024-03-05"), "2024-03-05");
    }

    #[test]
    fn test_normalize_date_with_time_keeps_date_part() {
        assert_eq!(normalize_date("2024-03-05 10:00:00"), "2024-03-05");
    }

    #[test]
    fn test_normalize_date_ymd_with_slashes() {
        assert_eq!(normalize_date("2024/3/5"), "2024-03-05");
    }

    #[test]
    fn test_normalize_date_unparseable_returned_verbatim() {
        assert_eq!(normalize_date("March fifth"), "March fifth");
        assert_eq!(normalize_date(NOT_FOUND), NOT_FOUND);
    }

    #[test]
    fn test_date_field_end_to_end() {
        let fields = FieldExtractor::default().extract("Date: 05/03/2024\n");
        assert_eq!(fields.date, "2024-03-05");

        let fields = FieldExtractor::default().extract("Date 2024-03-05 10:00:00\n");
        assert_eq!(fields.date, "2024-03-05");
    }
}

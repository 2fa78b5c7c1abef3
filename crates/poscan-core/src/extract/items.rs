//! Item table reconstruction from OCR'd free text.
//!
//! The OCR output has no reliable column structure, so the table is
//! rebuilt by a line-classification state machine: greedy segmentation
//! into per-item line blocks, then per-block numeric and description
//! extraction.

use tracing::debug;

use crate::models::config::ExtractionConfig;
use crate::models::document::ItemRecord;

use super::patterns::{
    DECIMAL_TOKEN, FIELD_JUNK, ITEM_START, PRICE_FAMILIES, SUMMARY_TOKEN, TABLE_FOOTER,
    WHITESPACE_RUN,
};

/// Table-footer artifacts that can pass the line classifier; any item whose
/// cleaned description contains one of these is dropped.
const FOOTER_KEYWORDS: [&str; 4] = ["subtotal", "disc", "amount tax", "total"];

/// Segmentation states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParserState {
    /// Before the first line matching an item-start pattern.
    SeekingStart,
    /// Accumulating item buffers.
    InItemSection,
    /// A subtotal/total marker was seen; no further lines are consumed.
    Done,
}

/// Reconstructs the ordered item list of a document.
pub struct ItemTableParser {
    min_data_line_len: usize,
}

impl ItemTableParser {
    /// Create a parser with the default heuristics.
    pub fn new() -> Self {
        Self {
            min_data_line_len: ExtractionConfig::default().min_data_line_len,
        }
    }

    /// Create a parser from explicit configuration.
    pub fn with_config(config: &ExtractionConfig) -> Self {
        Self {
            min_data_line_len: config.min_data_line_len,
        }
    }

    /// Parse the item table out of the full document text.
    ///
    /// Malformed blocks are omitted, never an error; an empty result is a
    /// valid low-confidence outcome.
    pub fn parse(&self, text: &str) -> Vec<ItemRecord> {
        let blocks = self.segment(text);
        let block_count = blocks.len();

        let mut items: Vec<ItemRecord> = blocks
            .iter()
            .filter_map(|block| parse_single_item(block))
            .collect();

        items.retain(|item| {
            let description = item.description.to_lowercase();
            !FOOTER_KEYWORDS
                .iter()
                .any(|keyword| description.contains(keyword))
        });

        debug!("Segmented {} blocks into {} items", block_count, items.len());
        items
    }

    /// Split the text into raw per-item line blocks.
    fn segment(&self, text: &str) -> Vec<Vec<String>> {
        let mut state = ParserState::SeekingStart;
        let mut blocks: Vec<Vec<String>> = Vec::new();
        let mut buffer: Vec<String> = Vec::new();

        for raw in text.lines() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            match state {
                ParserState::SeekingStart => {
                    if is_item_start(line) {
                        state = ParserState::InItemSection;
                        buffer.push(line.to_string());
                    }
                }
                ParserState::InItemSection => {
                    if is_item_start(line) {
                        if !buffer.is_empty() {
                            blocks.push(std::mem::take(&mut buffer));
                        }
                        buffer.push(line.to_string());
                    } else if TABLE_FOOTER.is_match(line) {
                        // Checked before the data-line test: a line like
                        // "Subtotal 760.000,00" carries a decimal token and
                        // would otherwise be absorbed into the item.
                        state = ParserState::Done;
                    } else if self.is_item_data_line(line) {
                        buffer.push(line.to_string());
                    }
                    // Anything else is dropped silently.
                }
                ParserState::Done => unreachable!("loop exits on Done"),
            }

            if state == ParserState::Done {
                break;
            }
        }

        if !buffer.is_empty() {
            blocks.push(buffer);
        }

        blocks
    }

    /// Does this line carry item data worth buffering?
    fn is_item_data_line(&self, line: &str) -> bool {
        line.contains('/')
            || DECIMAL_TOKEN.is_match(line)
            || line.contains('|')
            || line.len() > self.min_data_line_len
    }
}

impl Default for ItemTableParser {
    fn default() -> Self {
        Self::new()
    }
}

fn is_item_start(line: &str) -> bool {
    ITEM_START.iter().any(|pattern| pattern.is_match(line))
}

/// Turn one raw line block into a structured record.
///
/// Returns `None` for blocks without a usable item code.
fn parse_single_item(lines: &[String]) -> Option<ItemRecord> {
    let first = lines.first()?;
    let (code_token, remainder) = match first.split_once(char::is_whitespace) {
        Some((code, rest)) => (code, rest),
        None => (first.as_str(), ""),
    };

    let item_code = code_token.trim().trim_end_matches('-').to_string();
    if item_code.is_empty() {
        return None;
    }

    // Continuation lines join the description only when they look like
    // description text: a slash-separated segment, or no price token at
    // all. Pure price rows stay out.
    let mut description = remainder.trim().to_string();
    for line in &lines[1..] {
        if line.contains('/') || !DECIMAL_TOKEN.is_match(line) {
            description.push(' ');
            description.push_str(line.trim());
        }
    }

    let numbers = collect_price_tokens(lines);

    // Total, discount and quantity are read off the final line; unit cost
    // comes from the flat all-lines scan, gated on at least three tokens.
    // The layout puts unit cost ahead of the summary numbers, hence the
    // asymmetry.
    let last_line = lines.last().map(String::as_str).unwrap_or("");
    let summary: Vec<&str> = SUMMARY_TOKEN
        .find_iter(last_line)
        .map(|m| m.as_str())
        .take(3)
        .collect();

    let unit_cost = if numbers.len() >= 3 {
        numbers.last().cloned().unwrap_or_default()
    } else {
        String::new()
    };

    let record = ItemRecord {
        item_code,
        description: clean_description(&description),
        unit_cost,
        discount: summary.get(1).copied().unwrap_or("").to_string(),
        quantity: summary.get(2).copied().unwrap_or("").to_string(),
        total_cost: summary.first().copied().unwrap_or("").to_string(),
        raw_lines: lines.join(" | "),
        ..Default::default()
    };

    Some(decompose_description(record))
}

/// Flat scan of every line for price-like tokens, family by family.
fn collect_price_tokens(lines: &[String]) -> Vec<String> {
    let all_text = lines.join(" ");

    let mut numbers = Vec::new();
    for family in PRICE_FAMILIES.iter() {
        numbers.extend(family.find_iter(&all_text).map(|m| m.as_str().to_string()));
    }
    numbers
}

/// Strip price tokens out of the description and collapse whitespace.
fn clean_description(description: &str) -> String {
    let stripped = SUMMARY_TOKEN.replace_all(description, "");
    WHITESPACE_RUN
        .replace_all(stripped.trim(), " ")
        .trim()
        .to_string()
}

/// Split the description on `/` into its positional sub-fields.
fn decompose_description(mut record: ItemRecord) -> ItemRecord {
    let parts: Vec<&str> = record.description.split('/').collect();
    let part = |index: usize| parts.get(index).map(|p| clean_field(p)).unwrap_or_default();

    record.item_name = part(0);
    record.item_type = part(1);
    record.part_number = part(2);
    record.product_code = part(3);
    record.size = part(4);
    record.color = part(5);
    record.brand = part(6);
    record.description_parts_count = parts.len();
    record.has_structured_description = parts.len() > 3;

    record
}

/// Strip non word/space/hyphen/period characters from a sub-field.
fn clean_field(field: &str) -> String {
    let stripped = FIELD_JUNK.replace_all(field, "");
    WHITESPACE_RUN
        .replace_all(&stripped, " ")
        .trim()
        .to_string()
}

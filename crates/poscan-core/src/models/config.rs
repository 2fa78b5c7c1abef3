//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

use super::document::DocumentType;

/// Main configuration for the poscan pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PoscanConfig {
    /// Image enhancement configuration.
    pub enhance: EnhanceConfig,

    /// OCR engine configuration.
    pub ocr: OcrConfig,

    /// Field/item extraction configuration.
    pub extraction: ExtractionConfig,
}

/// Image enhancement configuration.
///
/// The defaults are the tuned constants of the pipeline; per-call parameter
/// search is deliberately absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhanceConfig {
    /// Minimum page width in pixels; narrower pages are upscaled to this.
    pub min_width: u32,

    /// Median denoise window size (odd, in pixels).
    pub median_kernel: u32,

    /// CLAHE clip limit.
    pub clahe_clip_limit: f32,

    /// CLAHE tile grid (grid x grid tiles).
    pub clahe_grid: u32,

    /// Structuring element size for the morphological closing.
    pub closing_kernel: u32,
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self {
            min_width: 1800,
            median_kernel: 3,
            clahe_clip_limit: 2.0,
            clahe_grid: 8,
            closing_kernel: 2,
        }
    }
}

/// OCR engine configuration.
///
/// Rendered to a single opaque configuration string and passed to the
/// external engine on every call; none of it is environment-derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Engine language pack.
    pub language: String,

    /// OCR engine mode (Tesseract `--oem`).
    pub engine_mode: u32,

    /// Page segmentation mode (Tesseract `--psm`).
    pub page_seg_mode: u32,

    /// Source resolution hint in DPI.
    pub dpi: u32,

    /// Characters the engine is allowed to emit; everything else is
    /// suppressed by the engine itself, not by this layer.
    pub char_whitelist: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            engine_mode: 3,
            page_seg_mode: 6,
            dpi: 300,
            char_whitelist:
                "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz.,:|/\\-+()[] "
                    .to_string(),
        }
    }
}

impl OcrConfig {
    /// Render the canonical engine configuration string.
    pub fn config_string(&self) -> String {
        format!(
            "--oem {} --psm {} -c tessedit_char_whitelist={}",
            self.engine_mode, self.page_seg_mode, self.char_whitelist
        )
    }
}

/// Field/item extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Document type selecting the pattern tables.
    pub document_type: DocumentType,

    /// Minimum length for a line to count as item data on length alone.
    pub min_data_line_len: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            document_type: DocumentType::PoDocument,
            min_data_line_len: 10,
        }
    }
}

impl PoscanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_string_defaults() {
        let config = OcrConfig::default();
        let rendered = config.config_string();

        assert!(rendered.starts_with("--oem 3 --psm 6 -c tessedit_char_whitelist="));
        assert!(rendered.contains("0123456789"));
        assert!(rendered.contains("[] "));
    }

    #[test]
    fn test_defaults_round_trip() {
        let config = PoscanConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: PoscanConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(back.enhance.min_width, 1800);
        assert_eq!(back.enhance.clahe_grid, 8);
        assert_eq!(back.ocr.page_seg_mode, 6);
        assert_eq!(back.extraction.min_data_line_len, 10);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: PoscanConfig =
            serde_json::from_str(r#"{"ocr": {"language": "deu"}}"#).unwrap();
        assert_eq!(config.ocr.language, "deu");
        assert_eq!(config.ocr.engine_mode, 3);
        assert_eq!(config.enhance.min_width, 1800);
    }
}

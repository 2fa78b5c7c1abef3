//! Boundary to the external OCR engine.

use std::collections::HashMap;

use image::GrayImage;
use tracing::debug;

use crate::error::OcrError;
use crate::models::config::OcrConfig;

use super::Result;

/// Black-box `image -> text` recognizer.
///
/// The engine receives the core-owned configuration on every call and is
/// responsible for suppressing characters outside the whitelist itself.
pub trait OcrEngine {
    /// Recognize text on one enhanced page. One call per page, no retry.
    fn recognize(&self, image: &GrayImage, config: &OcrConfig) -> Result<String>;
}

/// Adapter for the external Tesseract process.
///
/// The enhanced page is handed over as a temporary PNG file so the engine
/// stays outside this process; any failure to spawn it or to recognize the
/// page surfaces as an [`OcrError`] value on the per-document result rather
/// than a panic.
#[derive(Debug, Default)]
pub struct TesseractEngine;

impl TesseractEngine {
    pub fn new() -> Self {
        Self
    }
}

impl OcrEngine for TesseractEngine {
    fn recognize(&self, image: &GrayImage, config: &OcrConfig) -> Result<String> {
        // Tesseract reads files, not pipes; the page lives only as long as
        // this call.
        let page_file = tempfile::Builder::new()
            .prefix("poscan-page-")
            .suffix(".png")
            .tempfile()
            .map_err(|e| OcrError::Input(e.to_string()))?;

        image
            .save(page_file.path())
            .map_err(|e| OcrError::InvalidImage(e.to_string()))?;

        let page_path = page_file
            .path()
            .to_str()
            .ok_or_else(|| OcrError::Input("temporary page path is not UTF-8".to_string()))?;
        let input = rusty_tesseract::Image::from_path(page_path)
            .map_err(|e| OcrError::InvalidImage(e.to_string()))?;

        let mut args = rusty_tesseract::Args::default();
        args.lang = config.language.clone();
        args.config_variables = HashMap::from([(
            "tessedit_char_whitelist".to_string(),
            config.char_whitelist.clone(),
        )]);
        args.dpi = Some(config.dpi as i32);
        args.psm = Some(config.page_seg_mode as i32);
        args.oem = Some(config.engine_mode as i32);

        debug!("Invoking OCR engine: {}", config.config_string());
        rusty_tesseract::image_to_string(&input, &args)
            .map_err(|e| OcrError::Recognition(e.to_string()))
    }
}

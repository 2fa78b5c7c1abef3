//! Data models for the extraction pipeline.

pub mod config;
pub mod document;

pub use config::{EnhanceConfig, ExtractionConfig, OcrConfig, PoscanConfig};
pub use document::{
    DocumentType, ExtractionResult, ItemRecord, MainFields, ProcessingInfo, NOT_FOUND,
};

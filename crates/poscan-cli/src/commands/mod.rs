//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod extract;
pub mod process;

use std::path::Path;

use poscan_core::models::config::PoscanConfig;

/// Load the pipeline configuration, falling back to defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<PoscanConfig> {
    match config_path {
        Some(path) => Ok(PoscanConfig::from_file(Path::new(path))?),
        None => Ok(PoscanConfig::default()),
    }
}

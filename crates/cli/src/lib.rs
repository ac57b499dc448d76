//! ASSIST CLI library - command implementations shared with the binary

pub mod commands;

use shared::ExtractorConfig;
use std::path::Path;

/// Load the extractor config, falling back to built-in defaults
pub fn load_config(path: Option<&Path>) -> anyhow::Result<ExtractorConfig> {
    match path {
        Some(path) => Ok(ExtractorConfig::from_file(path)?),
        None => Ok(ExtractorConfig::default()),
    }
}

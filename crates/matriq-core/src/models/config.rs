//! Configuration structures for the label extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{MatriqError, Result};
use crate::label::rules::brand::DEFAULT_BRANDS;

/// Main configuration for the matriq pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatriqConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Known manufacturers, in match priority order.
    pub brands: Vec<String>,

    /// Fill unset fields from the raw OCR text.
    pub extract_from_text: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            brands: DEFAULT_BRANDS.iter().map(|b| b.to_string()).collect(),
            extract_from_text: true,
        }
    }
}

/// Column header language for tabular output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderLanguage {
    #[default]
    En,
    Zh,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Language of CSV column headers.
    pub header_language: HeaderLanguage,

    /// Pretty-print JSON output.
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            header_language: HeaderLanguage::En,
            pretty_json: true,
        }
    }
}

impl MatriqConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| MatriqError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

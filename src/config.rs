//! Build/query configuration shared across the ingestion pipeline and readers.

use serde::Deserialize;
use std::path::PathBuf;

use crate::error::AppError;
use crate::tokenizer::TokenizerMode;

/// Byte order used for the postings binary file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    Big,
    Little,
}

impl std::str::FromStr for ByteOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "big" => Ok(ByteOrder::Big),
            "little" => Ok(ByteOrder::Little),
            other => Err(format!("unknown byte order '{other}', expected 'big' or 'little'")),
        }
    }
}

/// Configuration for an index build: where the corpus lives, where artifacts
/// land, and how terms get normalized.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub dataset_name: String,
    #[serde(default)]
    pub output_directory: PathBuf,
    #[serde(default)]
    pub tokenizer_mode: TokenizerMode,
    #[serde(default = "default_byte_order")]
    pub byte_order: ByteOrder,
}

fn default_byte_order() -> ByteOrder {
    ByteOrder::Big
}

impl Default for Config {
    fn default() -> Self {
        Config {
            dataset_name: String::new(),
            output_directory: PathBuf::from("./output_reports"),
            tokenizer_mode: TokenizerMode::Simple,
            byte_order: ByteOrder::Big,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
struct ConfigOverlay {
    dataset_name: Option<String>,
    output_directory: Option<PathBuf>,
    tokenizer_mode: Option<TokenizerMode>,
    byte_order: Option<ByteOrder>,
}

impl Config {
    /// Overlay a TOML config file on top of this configuration's defaults.
    /// Only the fields present in the file are overridden.
    pub fn merge_toml_file(mut self, path: &std::path::Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("reading config file {}: {e}", path.display())))?;
        let overlay: ConfigOverlay = toml::from_str(&text)
            .map_err(|e| AppError::Config(format!("parsing config file {}: {e}", path.display())))?;

        if let Some(name) = overlay.dataset_name {
            self.dataset_name = name;
        }
        if let Some(dir) = overlay.output_directory {
            self.output_directory = dir;
        }
        if let Some(mode) = overlay.tokenizer_mode {
            self.tokenizer_mode = mode;
        }
        if let Some(order) = overlay.byte_order {
            self.byte_order = order;
        }
        Ok(self)
    }
}

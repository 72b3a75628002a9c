//! Converter configuration
//!
//! Replaces fixed directory names with a value passed to every processing
//! function. Values come from defaults, then an optional TOML file, then CLI
//! overrides applied by the binary.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;

pub const DEFAULT_INPUT_DIR: &str = "input_files";
pub const DEFAULT_OUTPUT_DIR: &str = "output_files";
pub const DEFAULT_ARCHIVE_DIR: &str = "extracted_files";
pub const DEFAULT_INPUT_EXTENSION: &str = "enex";
pub const DEFAULT_OUTPUT_EXTENSION: &str = "txt";

/// How note content markup is reduced to text
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StripMode {
    /// `<div>` and `<br>` become line breaks, every other tag is dropped
    #[default]
    TagAware,
    /// Every tag is dropped
    Generic,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConverterConfig {
    /// Batch-mode source directory, scanned non-recursively
    pub input_dir: PathBuf,
    /// Destination for generated text files
    pub output_dir: PathBuf,
    /// Where successfully converted input files are moved
    pub archive_dir: PathBuf,
    /// Suffix identifying input files, without the dot
    pub extension: String,
    /// Suffix appended to sanitized titles, without the dot
    pub output_extension: String,
    pub strip_mode: StripMode,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            archive_dir: PathBuf::from(DEFAULT_ARCHIVE_DIR),
            extension: DEFAULT_INPUT_EXTENSION.to_string(),
            output_extension: DEFAULT_OUTPUT_EXTENSION.to_string(),
            strip_mode: StripMode::default(),
        }
    }
}

impl ConverterConfig {
    /// Load a TOML config file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: ConverterConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Whether `file_name` carries the recognized input suffix
    pub fn is_input_file_name(&self, file_name: &str) -> bool {
        file_name.ends_with(&format!(".{}", self.extension))
    }

    /// Create the output and archive directories if they are missing
    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(&self.output_dir)?;
        fs::create_dir_all(&self.archive_dir)?;
        Ok(())
    }
}

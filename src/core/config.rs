//! Configuration management with layered hierarchy

use log::warn;
use miette::Diagnostic;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::loader::DEFAULT_DELIMITER;

/// Name of the per-directory config file
pub const LOCAL_CONFIG_FILE: &str = "mfgsim.yaml";

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("Invalid configuration in {path}: {message}")]
    #[diagnostic(code(mfgsim::config::parse))]
    Parse { path: String, message: String },

    #[error("Delimiter must be a single ASCII character, got '{0}'")]
    #[diagnostic(code(mfgsim::config::delimiter))]
    Delimiter(String),
}

/// Simulator configuration with layered hierarchy
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Components CSV file
    pub components: Option<PathBuf>,

    /// Products CSV file
    pub products: Option<PathBuf>,

    /// Seed for the manufacturing outcome generator
    pub seed: Option<u64>,

    /// CSV field delimiter
    pub delimiter: Option<String>,

    /// Default output format
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/mfgsim/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            config.merge_file(&global_path);
        }

        // 3. Working directory config (./mfgsim.yaml)
        config.merge_file(Path::new(LOCAL_CONFIG_FILE));

        // 4. Environment variables
        config.apply_env(|key| std::env::var(key).ok());

        config
    }

    /// Parse a YAML config document
    pub fn from_yaml_str(contents: &str, origin: &str) -> Result<Self, ConfigError> {
        serde_yml::from_str(contents).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    fn merge_file(&mut self, path: &Path) {
        if !path.exists() {
            return;
        }
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Ignoring unreadable config {}: {}", path.display(), e);
                return;
            }
        };
        match Self::from_yaml_str(&contents, &path.display().to_string()) {
            Ok(other) => self.merge(other),
            Err(e) => warn!("{}", e),
        }
    }

    /// Apply `MFGSIM_*` overrides using `lookup` to read variables
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("MFGSIM_COMPONENTS") {
            self.components = Some(PathBuf::from(path));
        }
        if let Some(path) = lookup("MFGSIM_PRODUCTS") {
            self.products = Some(PathBuf::from(path));
        }
        if let Some(seed) = lookup("MFGSIM_SEED") {
            match seed.trim().parse() {
                Ok(seed) => self.seed = Some(seed),
                Err(_) => warn!("Ignoring MFGSIM_SEED={}: not an unsigned integer", seed),
            }
        }
        if let Some(delimiter) = lookup("MFGSIM_DELIMITER") {
            self.delimiter = Some(delimiter);
        }
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "mfgsim")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Config) {
        if other.components.is_some() {
            self.components = other.components;
        }
        if other.products.is_some() {
            self.products = other.products;
        }
        if other.seed.is_some() {
            self.seed = other.seed;
        }
        if other.delimiter.is_some() {
            self.delimiter = other.delimiter;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    pub fn components_path(&self) -> PathBuf {
        self.components
            .clone()
            .unwrap_or_else(|| PathBuf::from("components.csv"))
    }

    pub fn products_path(&self) -> PathBuf {
        self.products
            .clone()
            .unwrap_or_else(|| PathBuf::from("products.csv"))
    }

    /// CSV delimiter byte, defaulting to `;`
    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        match &self.delimiter {
            None => Ok(DEFAULT_DELIMITER),
            Some(value) => parse_delimiter(value),
        }
    }
}

/// Parse a delimiter given as a single ASCII character or the word "tab"
pub fn parse_delimiter(value: &str) -> Result<u8, ConfigError> {
    if value.eq_ignore_ascii_case("tab") || value == "\\t" {
        return Ok(b'\t');
    }
    match value.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(ConfigError::Delimiter(value.to_string())),
    }
}

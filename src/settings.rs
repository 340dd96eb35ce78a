use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::reader::DEFAULT_ENCODING;
use crate::renderer::DEFAULT_CURRENCY_SYMBOL;

/// Per-user defaults. Command-line flags override these for a single run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_encoding")]
    pub encoding: String,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    #[serde(default)]
    pub skip_header: bool,
    /// 0-based field indices in the raw input row.
    #[serde(default)]
    pub date_column: usize,
    #[serde(default = "default_amount_column")]
    pub amount_column: usize,
    #[serde(default = "default_description_column")]
    pub description_column: usize,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "default_note_author")]
    pub note_author: String,
}

fn default_encoding() -> String {
    DEFAULT_ENCODING.to_string()
}

fn default_delimiter() -> String {
    ",".to_string()
}

fn default_amount_column() -> usize {
    2
}

fn default_description_column() -> usize {
    1
}

fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

fn default_note_author() -> String {
    "daygrid".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            encoding: default_encoding(),
            delimiter: default_delimiter(),
            skip_header: false,
            date_column: 0,
            amount_column: default_amount_column(),
            description_column: default_description_column(),
            currency_symbol: default_currency_symbol(),
            note_author: default_note_author(),
        }
    }
}

pub fn settings_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("daygrid")
        .join("settings.json")
}

pub fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

/// Missing or unreadable settings fall back to the defaults.
pub fn load_settings_from(path: &Path) -> Settings {
    if path.exists() {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_default()
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    save_settings_to(&settings_path(), settings)
}

pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| GridError::Settings(e.to_string()))?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}

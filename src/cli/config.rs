use crate::error::{GridError, Result};
use crate::models::ColumnRoles;
use crate::reader::{parse_delimiter, resolve_encoding};
use crate::settings::{load_settings, save_settings, settings_path, Settings};

pub fn show() -> Result<()> {
    let settings = load_settings();
    println!("Settings file: {}", settings_path().display());
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}

#[derive(Debug, Default)]
pub struct SettingsUpdate {
    pub encoding: Option<String>,
    pub delimiter: Option<String>,
    pub skip_header: Option<bool>,
    pub date_column: Option<usize>,
    pub amount_column: Option<usize>,
    pub description_column: Option<usize>,
    pub currency: Option<String>,
    pub note_author: Option<String>,
}

/// Apply `update` to `settings`, rejecting values a later run could not use.
pub fn apply(mut settings: Settings, update: SettingsUpdate) -> Result<Settings> {
    if let Some(encoding) = update.encoding {
        resolve_encoding(&encoding)?;
        settings.encoding = encoding;
    }
    if let Some(delimiter) = update.delimiter {
        parse_delimiter(&delimiter)?;
        settings.delimiter = delimiter;
    }
    if let Some(skip) = update.skip_header {
        settings.skip_header = skip;
    }
    if let Some(c) = update.date_column {
        settings.date_column = c;
    }
    if let Some(c) = update.amount_column {
        settings.amount_column = c;
    }
    if let Some(c) = update.description_column {
        settings.description_column = c;
    }
    if let Some(symbol) = update.currency {
        settings.currency_symbol = symbol;
    }
    if let Some(author) = update.note_author {
        if author.trim().is_empty() {
            return Err(GridError::Settings("note author cannot be empty".to_string()));
        }
        settings.note_author = author;
    }
    ColumnRoles::new(
        settings.date_column,
        settings.amount_column,
        settings.description_column,
    )?;
    Ok(settings)
}

pub fn set(update: SettingsUpdate) -> Result<()> {
    let settings = apply(load_settings(), update)?;
    save_settings(&settings)?;
    println!("Saved {}", settings_path().display());
    Ok(())
}

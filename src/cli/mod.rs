pub mod buckets;
pub mod config;
pub mod convert;
pub mod preview;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::error::Result;
use crate::models::ColumnRoles;
use crate::pipeline::ConvertOptions;
use crate::reader::{parse_delimiter, resolve_encoding, ReadOptions};
use crate::settings::Settings;

#[derive(Parser)]
#[command(
    name = "daygrid",
    version,
    about = "Turn a bank statement CSV into a spreadsheet with one column per day."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a statement CSV into a day-by-day spreadsheet.
    Convert {
        /// Path to the statement CSV
        input: String,
        /// Output path (default: input path with the output extension)
        #[arg(long, short)]
        output: Option<String>,
        /// Output format (default: from --output extension, else xlsx)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        #[command(flatten)]
        input_args: InputArgs,
    },
    /// Show the day grid in the terminal.
    Preview {
        /// Path to the statement CSV
        input: String,
        /// Show each transaction's description under its amount
        #[arg(long)]
        notes: bool,
        #[command(flatten)]
        input_args: InputArgs,
    },
    /// Print the rows grouped by day as JSON, before any amount formatting.
    Buckets {
        /// Path to the statement CSV
        input: String,
        #[command(flatten)]
        input_args: InputArgs,
    },
    /// Show or change saved defaults.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Print shell completions.
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the settings file location and current values.
    Show,
    /// Update saved defaults.
    Set {
        /// Text encoding label, e.g. shift_jis, utf-8, euc-jp
        #[arg(long)]
        encoding: Option<String>,
        /// Field delimiter (single character, or "tab")
        #[arg(long)]
        delimiter: Option<String>,
        /// Always discard the first row: true or false
        #[arg(long = "skip-header")]
        skip_header: Option<bool>,
        #[arg(long = "date-column")]
        date_column: Option<usize>,
        #[arg(long = "amount-column")]
        amount_column: Option<usize>,
        #[arg(long = "description-column")]
        description_column: Option<usize>,
        /// Currency symbol prefixed to amounts
        #[arg(long)]
        currency: Option<String>,
        /// Author name recorded on cell notes
        #[arg(long = "note-author")]
        note_author: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[cfg(feature = "xlsx")]
    Xlsx,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            #[cfg(feature = "xlsx")]
            Self::Xlsx => "xlsx",
            Self::Json => "json",
        }
    }

    /// Pick a format from an output file name, falling back to the default.
    pub fn infer(output: Option<&str>) -> Self {
        let ext = output
            .and_then(|o| std::path::Path::new(o).extension())
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Self::Json,
            _ => Self::default(),
        }
    }
}

impl Default for OutputFormat {
    #[cfg(feature = "xlsx")]
    fn default() -> Self {
        Self::Xlsx
    }

    #[cfg(not(feature = "xlsx"))]
    fn default() -> Self {
        Self::Json
    }
}

/// Reading and column-mapping flags shared by every command that takes a CSV.
/// Unset flags fall back to the saved settings.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Text encoding label, e.g. shift_jis, utf-8, euc-jp
    #[arg(long)]
    pub encoding: Option<String>,
    /// Field delimiter (single character, or "tab")
    #[arg(long)]
    pub delimiter: Option<String>,
    /// Discard the first row before parsing
    #[arg(long = "skip-header", conflicts_with = "no_skip_header")]
    pub skip_header: bool,
    /// Keep the first row even when the saved settings skip it
    #[arg(long = "no-skip-header")]
    pub no_skip_header: bool,
    /// 0-based field holding the YYYY/MM/DD date
    #[arg(long = "date-column")]
    pub date_column: Option<usize>,
    /// 0-based field holding the integer amount
    #[arg(long = "amount-column")]
    pub amount_column: Option<usize>,
    /// 0-based field holding the description
    #[arg(long = "description-column")]
    pub description_column: Option<usize>,
    /// Currency symbol prefixed to amounts
    #[arg(long)]
    pub currency: Option<String>,
}

impl InputArgs {
    pub fn read_options(&self, settings: &Settings) -> Result<ReadOptions> {
        Ok(ReadOptions {
            encoding: resolve_encoding(self.encoding.as_deref().unwrap_or(&settings.encoding))?,
            delimiter: parse_delimiter(self.delimiter.as_deref().unwrap_or(&settings.delimiter))?,
            skip_header: !self.no_skip_header && (self.skip_header || settings.skip_header),
        })
    }

    pub fn date_column(&self, settings: &Settings) -> usize {
        self.date_column.unwrap_or(settings.date_column)
    }

    pub fn resolve(&self, settings: &Settings) -> Result<ConvertOptions> {
        let roles = ColumnRoles::new(
            self.date_column(settings),
            self.amount_column.unwrap_or(settings.amount_column),
            self.description_column.unwrap_or(settings.description_column),
        )?;
        Ok(ConvertOptions {
            read: self.read_options(settings)?,
            roles,
            currency_symbol: self
                .currency
                .clone()
                .unwrap_or_else(|| settings.currency_symbol.clone()),
        })
    }
}

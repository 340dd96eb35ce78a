use std::path::Path;

use tracing::{info, warn};

use crate::bucketizer::bucketize;
use crate::error::Result;
use crate::models::{BucketMap, ColumnRoles};
use crate::reader::{read_records, ReadOptions};
use crate::renderer::{render, Grid, RenderOptions};

/// Everything one conversion run needs. Built fresh per run by the caller.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub read: ReadOptions,
    pub roles: ColumnRoles,
    pub currency_symbol: String,
}

impl ConvertOptions {
    fn render_options(&self) -> RenderOptions {
        RenderOptions {
            amount_index: self.roles.amount_field(),
            description_index: self.roles.description_field(),
            currency_symbol: self.currency_symbol.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Conversion {
    pub grid: Grid,
    pub days: usize,
    pub transactions: usize,
    pub dropped: usize,
}

pub fn bucket(bytes: &[u8], read: &ReadOptions, date_index: usize) -> Result<BucketMap> {
    let records = read_records(bytes, read)?;
    Ok(bucketize(records, date_index))
}

pub fn convert(bytes: &[u8], opts: &ConvertOptions) -> Result<Conversion> {
    let buckets = bucket(bytes, &opts.read, opts.roles.date())?;
    if buckets.is_empty() {
        warn!(dropped = buckets.dropped(), "no rows with a YYYY/MM/DD date");
    }
    let grid = render(&buckets, &opts.render_options())?;
    let conversion = Conversion {
        grid,
        days: buckets.len(),
        transactions: buckets.transaction_count(),
        dropped: buckets.dropped(),
    };
    info!(
        first = ?buckets.first_day(),
        last = ?buckets.last_day(),
        days = conversion.days,
        transactions = conversion.transactions,
        dropped = conversion.dropped,
        "converted ledger"
    );
    Ok(conversion)
}

pub fn convert_file(path: &Path, opts: &ConvertOptions) -> Result<Conversion> {
    let bytes = std::fs::read(path)?;
    convert(&bytes, opts)
}

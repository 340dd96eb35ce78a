use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{GridError, Result};
use crate::fmt::{currency, day_label};
use crate::models::{Amount, BucketMap};

pub const DEFAULT_CURRENCY_SYMBOL: &str = "¥";

// Every column is 1.2cm wide. One spreadsheet width unit is ~0.18cm.
pub const COLUMN_WIDTH_CM: f64 = 1.2;
pub const CM_PER_WIDTH_UNIT: f64 = 0.18;

pub fn column_width() -> f64 {
    COLUMN_WIDTH_CM / CM_PER_WIDTH_UNIT
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Position of the amount within a transaction's fields (date removed).
    pub amount_index: usize,
    /// Position of the description within a transaction's fields (date removed).
    pub description_index: usize,
    pub currency_symbol: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridCell {
    /// 1-based position under the header.
    pub row: usize,
    pub value: String,
    pub annotation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridColumn {
    #[serde(with = "slash_date")]
    pub date: NaiveDate,
    pub header: String,
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    pub columns: Vec<GridColumn>,
    pub column_width: f64,
}

impl Grid {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Deepest column, i.e. the number of data rows below the header.
    pub fn max_rows(&self) -> usize {
        self.columns.iter().map(|c| c.cells.len()).max().unwrap_or(0)
    }
}

mod slash_date {
    use chrono::NaiveDate;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&date.format("%Y/%m/%d"))
    }
}

fn field<'a>(
    fields: &'a [String],
    index: usize,
    role: &'static str,
    date: NaiveDate,
    row: usize,
) -> Result<&'a str> {
    fields
        .get(index)
        .map(String::as_str)
        .ok_or_else(|| GridError::ColumnOutOfRange {
            role,
            index,
            date,
            row,
            field_count: fields.len(),
        })
}

/// Lay the buckets out one column per day.
///
/// All-or-nothing: the first amount that is not an integer aborts the whole
/// render. A dated row with a bad amount means the column mapping is wrong,
/// so no partial grid is returned.
pub fn render(buckets: &BucketMap, opts: &RenderOptions) -> Result<Grid> {
    let mut columns = Vec::with_capacity(buckets.len());
    for (&date, rows) in buckets.iter() {
        let mut cells = Vec::with_capacity(rows.len());
        for (i, fields) in rows.iter().enumerate() {
            let row = i + 1;
            let raw_amount = field(fields, opts.amount_index, "amount", date, row)?;
            let amount = Amount::parse(raw_amount).ok_or_else(|| GridError::MalformedAmount {
                date,
                row,
                value: raw_amount.to_string(),
            })?;
            let annotation = field(fields, opts.description_index, "description", date, row)?;
            cells.push(GridCell {
                row,
                value: currency(&opts.currency_symbol, &amount),
                annotation: annotation.to_string(),
            });
        }
        columns.push(GridColumn {
            date,
            header: day_label(date),
            cells,
        });
    }

    Ok(Grid {
        columns,
        column_width: column_width(),
    })
}

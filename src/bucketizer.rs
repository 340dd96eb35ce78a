use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use tracing::debug;

use crate::models::{BucketMap, ParsedTransaction, RawRecord};

fn date_shape() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}/\d{2}/\d{2}$").expect("static regex"))
}

/// Parse a zero-padded `YYYY/MM/DD` date. Anything else, including
/// impossible calendar dates, is `None`.
pub fn parse_date_ymd(raw: &str) -> Option<NaiveDate> {
    if !date_shape().is_match(raw) {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y/%m/%d").ok()
}

fn parse_record(mut record: RawRecord, date_index: usize) -> Option<ParsedTransaction> {
    let date = parse_date_ymd(record.get(date_index)?)?;
    record.remove(date_index);
    Some(ParsedTransaction { date, fields: record })
}

/// Group records by their date field into a gap-free day range.
///
/// Rows whose date field is missing or malformed are dropped without error;
/// exports routinely carry header, summary and blank rows between data rows.
/// Within a day, rows keep their input order.
pub fn bucketize(records: Vec<RawRecord>, date_index: usize) -> BucketMap {
    let mut parsed = Vec::with_capacity(records.len());
    let mut dropped = 0usize;
    for (line, record) in records.into_iter().enumerate() {
        match parse_record(record, date_index) {
            Some(txn) => parsed.push(txn),
            None => {
                debug!(line = line + 1, "skipping row without a YYYY/MM/DD date");
                dropped += 1;
            }
        }
    }

    let (Some(min), Some(max)) = (
        parsed.iter().map(|t| t.date).min(),
        parsed.iter().map(|t| t.date).max(),
    ) else {
        return BucketMap::new(BTreeMap::new(), dropped);
    };

    let mut days: BTreeMap<NaiveDate, Vec<Vec<String>>> = min
        .iter_days()
        .take_while(|d| *d <= max)
        .map(|d| (d, Vec::new()))
        .collect();
    for txn in parsed {
        days.entry(txn.date).or_default().push(txn.fields);
    }
    BucketMap::new(days, dropped)
}

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{GridError, Result};

/// One line of delimited input, split into fields. Arity is not fixed.
pub type RawRecord = Vec<String>;

/// A record whose date field parsed. `fields` is the record with the date
/// field removed, remaining order untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTransaction {
    pub date: NaiveDate,
    pub fields: Vec<String>,
}

/// Dense day-by-day mapping from the earliest to the latest parsed date.
/// Every day in the span has an entry, possibly empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BucketMap {
    days: BTreeMap<NaiveDate, Vec<Vec<String>>>,
    dropped: usize,
}

impl BucketMap {
    pub(crate) fn new(days: BTreeMap<NaiveDate, Vec<Vec<String>>>, dropped: usize) -> Self {
        Self { days, dropped }
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Number of calendar days covered.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &Vec<Vec<String>>)> {
        self.days.iter()
    }

    #[allow(dead_code)]
    pub fn get(&self, date: &NaiveDate) -> Option<&Vec<Vec<String>>> {
        self.days.get(date)
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        self.days.keys().next().copied()
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        self.days.keys().next_back().copied()
    }

    pub fn transaction_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    /// Rows discarded because their date field was missing or malformed.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

impl Serialize for BucketMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.days.len()))?;
        for (date, rows) in &self.days {
            map.serialize_entry(&date.format("%Y/%m/%d").to_string(), rows)?;
        }
        map.end()
    }
}

/// A whole-number amount of any size, kept as its decimal digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Amount {
    negative: bool,
    digits: String,
}

impl Amount {
    /// Parse an integer amount: optional sign, ASCII or full-width digits,
    /// single underscores between digits. Surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        let s = raw.trim();
        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };

        let mut digits = String::with_capacity(body.len());
        let mut after_underscore = false;
        for c in body.chars() {
            match c {
                '0'..='9' => digits.push(c),
                '０'..='９' => digits.push(char::from(b'0' + (c as u32 - '０' as u32) as u8)),
                '_' if !digits.is_empty() && !after_underscore => {
                    after_underscore = true;
                    continue;
                }
                _ => return None,
            }
            after_underscore = false;
        }
        if digits.is_empty() || after_underscore {
            return None;
        }

        let significant = digits.trim_start_matches('0');
        let digits = if significant.is_empty() {
            "0".to_string()
        } else {
            significant.to_string()
        };
        Some(Self {
            negative: negative && digits != "0",
            digits,
        })
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Magnitude without sign or leading zeros.
    pub fn digits(&self) -> &str {
        &self.digits
    }
}

/// Which raw-row fields hold the date, amount and description (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRoles {
    date: usize,
    amount: usize,
    description: usize,
}

impl ColumnRoles {
    pub fn new(date: usize, amount: usize, description: usize) -> Result<Self> {
        if amount == date {
            return Err(GridError::ColumnConflict { role: "amount", index: amount });
        }
        if description == date {
            return Err(GridError::ColumnConflict { role: "description", index: description });
        }
        Ok(Self { date, amount, description })
    }

    pub fn date(&self) -> usize {
        self.date
    }

    /// Amount position within a transaction's fields (date already removed).
    pub fn amount_field(&self) -> usize {
        without_date(self.amount, self.date)
    }

    /// Description position within a transaction's fields (date already removed).
    pub fn description_field(&self) -> usize {
        without_date(self.description, self.date)
    }
}

fn without_date(index: usize, date: usize) -> usize {
    if index > date {
        index - 1
    } else {
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_shift_fields_after_date() {
        let roles = ColumnRoles::new(0, 2, 1).unwrap();
        assert_eq!(roles.amount_field(), 1);
        assert_eq!(roles.description_field(), 0);

        let roles = ColumnRoles::new(2, 0, 3).unwrap();
        assert_eq!(roles.amount_field(), 0);
        assert_eq!(roles.description_field(), 2);
    }

    #[test]
    fn test_roles_reject_date_overlap() {
        assert!(matches!(
            ColumnRoles::new(1, 1, 2),
            Err(GridError::ColumnConflict { role: "amount", index: 1 })
        ));
        assert!(matches!(
            ColumnRoles::new(0, 2, 0),
            Err(GridError::ColumnConflict { role: "description", index: 0 })
        ));
    }

    #[test]
    fn test_amount_parse() {
        let a = Amount::parse("12000").unwrap();
        assert_eq!((a.is_negative(), a.digits()), (false, "12000"));
        let a = Amount::parse(" -1200 ").unwrap();
        assert_eq!((a.is_negative(), a.digits()), (true, "1200"));
        assert_eq!(Amount::parse("+7").unwrap().digits(), "7");
        assert_eq!(Amount::parse("007").unwrap().digits(), "7");
        assert!(!Amount::parse("-0").unwrap().is_negative());
        assert_eq!(Amount::parse("1_000").unwrap().digits(), "1000");
        assert_eq!(Amount::parse("１２０００").unwrap().digits(), "12000");
        assert_eq!(
            Amount::parse("99999999999999999999").unwrap().digits(),
            "99999999999999999999"
        );
    }

    #[test]
    fn test_amount_parse_rejects_non_integers() {
        for raw in ["", "-", "+", "abc", "1,000", "12.50", "¥100", "_1", "1_", "1__0", "- 5", "1e3"] {
            assert_eq!(Amount::parse(raw), None, "{raw:?} should not parse");
        }
    }

    #[test]
    fn test_bucket_map_serializes_with_slash_dates() {
        let mut days = BTreeMap::new();
        days.insert(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            vec![vec!["desc1".to_string(), "100".to_string()]],
        );
        days.insert(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), vec![]);
        let map = BucketMap::new(days, 0);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"2024/01/01":[["desc1","100"]],"2024/01/02":[]}"#);
    }
}

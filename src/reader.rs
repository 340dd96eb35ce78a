use encoding_rs::Encoding;

use crate::error::{GridError, Result};
use crate::models::RawRecord;

pub const DEFAULT_ENCODING: &str = "shift_jis";

#[derive(Debug, Clone, Copy)]
pub struct ReadOptions {
    pub encoding: &'static Encoding,
    pub delimiter: u8,
    pub skip_header: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            encoding: encoding_rs::SHIFT_JIS,
            delimiter: b',',
            skip_header: false,
        }
    }
}

/// Look up an encoding by its WHATWG label (`shift_jis`, `utf-8`, `euc-jp`, ...).
pub fn resolve_encoding(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| GridError::UnknownEncoding(label.to_string()))
}

pub fn parse_delimiter(raw: &str) -> Result<u8> {
    let delimiter = match raw {
        "\\t" | "tab" => "\t",
        other => other,
    };
    match delimiter.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(GridError::InvalidDelimiter(raw.to_string())),
    }
}

/// Decode `bytes` and split them into records. No row is interpreted here;
/// header, footer and blank-field rows all come through as-is.
pub fn read_records(bytes: &[u8], opts: &ReadOptions) -> Result<Vec<RawRecord>> {
    // A byte order mark overrides the configured encoding.
    let (text, used, had_errors) = opts.encoding.decode(bytes);
    if had_errors {
        return Err(GridError::Decode(used.name()));
    }

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(opts.delimiter)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    for result in rdr.records() {
        let record = result?;
        records.push(record.iter().map(str::to_string).collect());
    }

    if opts.skip_header && !records.is_empty() {
        records.remove(0);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf8(skip_header: bool) -> ReadOptions {
        ReadOptions {
            encoding: encoding_rs::UTF_8,
            delimiter: b',',
            skip_header,
        }
    }

    #[test]
    fn test_read_records_keeps_ragged_rows() {
        let content = "Date,Memo,Amount\n2024/01/01,Coffee,450\n\nTotal,450\n";
        let records = read_records(content.as_bytes(), &utf8(false)).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0], vec!["Date", "Memo", "Amount"]);
        assert_eq!(records[1], vec!["2024/01/01", "Coffee", "450"]);
        assert_eq!(records[2], vec!["Total", "450"]);
    }

    #[test]
    fn test_read_records_skips_header_when_asked() {
        let content = "Date,Memo,Amount\n2024/01/01,Coffee,450\n";
        let records = read_records(content.as_bytes(), &utf8(true)).unwrap();
        assert_eq!(records, vec![vec!["2024/01/01", "Coffee", "450"]]);
    }

    #[test]
    fn test_read_records_quoted_fields() {
        let content = "2024/01/01,\"Lunch, team\",\"1200\"\n";
        let records = read_records(content.as_bytes(), &utf8(false)).unwrap();
        assert_eq!(records[0][1], "Lunch, team");
        assert_eq!(records[0][2], "1200");
    }

    #[test]
    fn test_read_records_shift_jis() {
        let (bytes, _, _) = encoding_rs::SHIFT_JIS.encode("2024/04/01,コンビニ,580\n");
        let records = read_records(&bytes, &ReadOptions::default()).unwrap();
        assert_eq!(records[0], vec!["2024/04/01", "コンビニ", "580"]);
    }

    #[test]
    fn test_read_records_rejects_invalid_bytes() {
        let bytes = [b'2', b',', 0xff, 0xfe, 0xfd, b'\n'];
        let err = read_records(&bytes, &utf8(false)).unwrap_err();
        assert!(matches!(err, GridError::Decode("UTF-8")));
    }

    #[test]
    fn test_decode_error_names_bom_encoding() {
        // UTF-16LE BOM, then "A", an unpaired surrogate, "A"
        let bytes = [0xFF, 0xFE, 0x41, 0x00, 0x00, 0xD8, 0x41, 0x00];
        let err = read_records(&bytes, &utf8(false)).unwrap_err();
        assert!(matches!(err, GridError::Decode("UTF-16LE")), "got {err}");
    }

    #[test]
    fn test_read_records_tab_delimited() {
        let opts = ReadOptions {
            delimiter: parse_delimiter("\\t").unwrap(),
            ..utf8(false)
        };
        let records = read_records(b"2024/01/01\tRent\t80000\n", &opts).unwrap();
        assert_eq!(records[0], vec!["2024/01/01", "Rent", "80000"]);
    }

    #[test]
    fn test_resolve_encoding() {
        assert_eq!(resolve_encoding("shift_jis").unwrap(), encoding_rs::SHIFT_JIS);
        assert_eq!(resolve_encoding("UTF-8").unwrap(), encoding_rs::UTF_8);
        assert_eq!(resolve_encoding("sjis").unwrap(), encoding_rs::SHIFT_JIS);
        assert!(matches!(
            resolve_encoding("klingon"),
            Err(GridError::UnknownEncoding(_))
        ));
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(",").unwrap(), b',');
        assert_eq!(parse_delimiter(";").unwrap(), b';');
        assert_eq!(parse_delimiter("tab").unwrap(), b'\t');
        assert!(parse_delimiter(",,").is_err());
        assert!(parse_delimiter("").is_err());
    }
}

//! Header-row delimited table parsing.
//!
//! Tables come from an external writer and may be read while still being
//! written, so parsing keeps going past bad rows instead of rejecting the file.

use csv::{ReaderBuilder, StringRecord};
use log::{debug, warn};
use serde::Serialize;
use std::fs;
use std::path::Path;

use super::Record;
use crate::errors::Result;

/// A problem found in one data row. The row is still returned where possible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowIssue {
    /// 1-based data row number (the header is row 0)
    pub row: usize,
    pub message: String,
}

/// Result of parsing one table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTable {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
    pub issues: Vec<RowIssue>,
}

/// Parses the table at `path` into records.
///
/// A missing, unreadable or empty file yields no records. Malformed rows are
/// logged and recovered (see [`parse_table_bytes`]).
pub fn parse_table(path: &Path) -> Vec<Record> {
    match read_table(path) {
        Ok(table) => {
            for issue in &table.issues {
                warn!("{:?} row {}: {}", path, issue.row, issue.message);
            }
            table.records
        }
        Err(e) if e.is_not_found() => {
            debug!("Table {:?} does not exist", path);
            Vec::new()
        }
        Err(e) => {
            warn!("Failed to read table {:?}: {}", path, e);
            Vec::new()
        }
    }
}

/// Reads and parses the table at `path`.
pub fn read_table(path: &Path) -> Result<ParsedTable> {
    let content = fs::read(path)?;
    parse_table_bytes(&content)
}

/// Parses comma-delimited content with a header row.
///
/// Rows with too few cells are padded with empty values and rows with too
/// many are truncated; both are reported in `issues`. Blank lines are
/// skipped, while rows of empty cells are kept. Header cells are used verbatim apart from a leading UTF-8 BOM.
pub fn parse_table_bytes(content: &[u8]) -> Result<ParsedTable> {
    let mut issues = Vec::new();
    let text = decode_content(content, &mut issues);

    let mut reader = ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut table = collect_rows(reader.records());
    issues.append(&mut table.issues);
    table.issues = issues;
    Ok(table)
}

/// A line holding nothing but whitespace.
///
/// Only a lone cell counts: `,,,,` is a row of empty values, not a blank line.
fn is_blank_line(raw: &StringRecord) -> bool {
    raw.len() == 1 && raw.get(0).unwrap_or("").trim().is_empty()
}

/// Zips raw rows with the first non-blank row as header.
///
/// Data rows are numbered from 1; a row the reader could not decode still
/// takes a number once the header is known, and is reported as row 0 before
/// that.
fn collect_rows<I>(rows: I) -> ParsedTable
where
    I: IntoIterator<Item = csv::Result<StringRecord>>,
{
    let mut headers: Option<Vec<String>> = None;
    let mut records = Vec::new();
    let mut issues = Vec::new();
    let mut row = 0usize;

    for result in rows {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                if headers.is_some() {
                    row += 1;
                }
                issues.push(RowIssue {
                    row,
                    message: format!("unreadable row skipped: {}", e),
                });
                continue;
            }
        };

        let header = match &headers {
            Some(header) => header,
            None => {
                if raw.iter().any(|cell| !cell.trim().is_empty()) {
                    headers = Some(raw.iter().map(str::to_string).collect());
                }
                continue;
            }
        };
        if header.len() > 1 && is_blank_line(&raw) {
            continue;
        }

        let cells: Vec<String> = raw.iter().map(str::to_string).collect();
        row += 1;
        if cells.len() != header.len() {
            issues.push(RowIssue {
                row,
                message: format!(
                    "has {} columns, expected {}; {}",
                    cells.len(),
                    header.len(),
                    if cells.len() < header.len() {
                        "missing cells left empty"
                    } else {
                        "extra cells ignored"
                    }
                ),
            });
        }
        records.push(Record::from_row(header, cells));
    }

    ParsedTable {
        headers: headers.unwrap_or_default(),
        records,
        issues,
    }
}

/// Strips a UTF-8 BOM and decodes lossily, reporting invalid bytes.
fn decode_content(content: &[u8], issues: &mut Vec<RowIssue>) -> String {
    let content = content.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(content);
    match std::str::from_utf8(content) {
        Ok(s) => s.to_string(),
        Err(e) => {
            issues.push(RowIssue {
                row: 0,
                message: format!(
                    "invalid UTF-8 at byte {}; some characters were replaced",
                    e.valid_up_to()
                ),
            });
            String::from_utf8_lossy(content).into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_positions_table() {
        let content = b"Ticker,Shares,Total Value\nAAPL,10,1000\nMSFT,5,2000\n";
        let table = parse_table_bytes(content).unwrap();

        assert_eq!(table.headers, vec!["Ticker", "Shares", "Total Value"]);
        assert_eq!(table.records.len(), 2);
        assert!(table.issues.is_empty());
        assert_eq!(table.records[0].get("Ticker"), Some("AAPL"));
        assert_eq!(table.records[1].number("Total Value"), Some(2000.0));
    }

    #[test]
    fn test_header_only_and_empty_content() {
        let table = parse_table_bytes(b"Ticker,Shares\n").unwrap();
        assert_eq!(table.headers, vec!["Ticker", "Shares"]);
        assert!(table.records.is_empty());

        let table = parse_table_bytes(b"").unwrap();
        assert!(table.headers.is_empty());
        assert!(table.records.is_empty());
    }

    #[test]
    fn test_mismatched_rows_are_kept() {
        let content = b"Date,Ticker,Side\n2024-01-02,AAPL\n2024-01-03,MSFT,BUY,extra\n2024-01-04,TSLA,SELL\n";
        let table = parse_table_bytes(content).unwrap();

        assert_eq!(table.records.len(), 3);
        assert_eq!(table.records[0].get("Side"), Some(""));
        assert_eq!(table.records[1].get("Side"), Some("BUY"));
        assert_eq!(table.records[1].len(), 3);
        assert_eq!(table.records[2].get("Ticker"), Some("TSLA"));

        assert_eq!(table.issues.len(), 2);
        assert_eq!(table.issues[0].row, 1);
        assert_eq!(table.issues[1].row, 2);
    }

    #[test]
    fn test_quoted_cells_crlf_and_blank_lines() {
        let content = b"Ticker,Name,Total Value\r\n\r\nBRK.B,\"Berkshire, Hathaway\",\"1,234\"\r\n\r\n";
        let table = parse_table_bytes(content).unwrap();

        assert_eq!(table.headers, vec!["Ticker", "Name", "Total Value"]);
        assert_eq!(table.records.len(), 1);
        assert_eq!(table.records[0].get("Name"), Some("Berkshire, Hathaway"));
        // Thousands separators are not numbers
        assert_eq!(table.records[0].get("Total Value"), Some("1,234"));
        assert_eq!(table.records[0].number("Total Value"), None);
    }

    #[test]
    fn test_rows_of_empty_cells_are_kept() {
        let content = b"Date,Ticker,Side,Shares,OrderStatus\n2024-01-03,MSFT,BUY,5,filled\n,,,,\n   \n2024-01-02,AAPL,SELL,10,filled\n";
        let table = parse_table_bytes(content).unwrap();

        assert_eq!(table.records.len(), 3);
        assert!(table.issues.is_empty());
        let empty = &table.records[1];
        assert_eq!(empty.len(), 5);
        assert!(empty.iter().all(|(_, value)| value.is_empty()));
        assert_eq!(table.records[2].get("Ticker"), Some("AAPL"));
    }

    #[test]
    fn test_single_column_keeps_whitespace_rows() {
        let table = parse_table_bytes(b"Ticker\nAAPL\n  \nMSFT\n").unwrap();
        assert_eq!(table.records.len(), 3);
        assert_eq!(table.records[1].get("Ticker"), Some("  "));
    }

    #[test]
    fn test_unreadable_rows_before_header_do_not_shift_numbers() {
        let broken = || Err(csv::Error::from(std::io::Error::other("torn read")));
        let rows = vec![
            broken(),
            Ok(StringRecord::from(vec!["Ticker", "Shares"])),
            Ok(StringRecord::from(vec!["AAPL"])),
            broken(),
            Ok(StringRecord::from(vec!["MSFT", "1", "x"])),
        ];
        let table = collect_rows(rows);

        assert_eq!(table.headers, vec!["Ticker", "Shares"]);
        assert_eq!(table.records.len(), 2);
        let rows: Vec<usize> = table.issues.iter().map(|i| i.row).collect();
        assert_eq!(rows, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_headers_are_not_normalized() {
        let content = "\u{feff}Ticker, Shares\nAAPL,10\n".as_bytes();
        let table = parse_table_bytes(content).unwrap();
        assert_eq!(table.headers, vec!["Ticker", " Shares"]);
        assert_eq!(table.records[0].get("Shares"), None);
        assert_eq!(table.records[0].get(" Shares"), Some("10"));
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let content = b"Ticker,Side\nAB\xFFC,BUY\n";
        let table = parse_table_bytes(content).unwrap();
        assert_eq!(table.records.len(), 1);
        assert_eq!(table.records[0].get("Side"), Some("BUY"));
        assert_eq!(table.issues.len(), 1);
        assert_eq!(table.issues[0].row, 0);
    }

    #[test]
    fn test_parse_table_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        assert!(parse_table(&dir.path().join("positions_1.csv")).is_empty());
        assert!(read_table(&dir.path().join("positions_1.csv"))
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_parse_table_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trades_1.csv");
        std::fs::write(
            &path,
            "Date,Ticker,Side,Shares,OrderStatus\n2024-01-03,MSFT,BUY,5,filled\n2024-01-02,AAPL,SELL,10,filled\n",
        )
        .unwrap();

        let records = parse_table(&path);
        assert_eq!(records.len(), 2);
        // File order is kept
        assert_eq!(records[0].get("Ticker"), Some("MSFT"));
        assert_eq!(records[1].get("Ticker"), Some("AAPL"));
    }
}

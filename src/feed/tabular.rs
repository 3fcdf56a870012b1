//! Tolerant comma-separated text reader.
//!
//! Best-effort and total: malformed input produces fewer or emptier rows,
//! never an error. A `"` toggles quoting and is dropped; doubled quotes
//! inside a quoted field are not treated as an escape.

use indexmap::IndexMap;

use crate::domain::ResourceRecord;

/// One data row keyed by normalized header name, in header order
pub type Row = IndexMap<String, String>;

/// Split a single line into trimmed fields
pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for ch in line.chars() {
        match ch {
            '"' => quoted = !quoted,
            ',' if !quoted => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());

    fields
}

/// Normalize a header cell into a field key: lowercase, whitespace runs → `_`
pub fn normalize_header(cell: &str) -> String {
    cell.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Parse delimited text into rows. The first line is the header.
pub fn parse(text: &str) -> Vec<Row> {
    let lines: Vec<&str> = text.trim().split('\n').collect();
    if lines.len() < 2 {
        return Vec::new();
    }

    let headers: Vec<String> = split_line(lines[0])
        .iter()
        .map(|h| normalize_header(h))
        .collect();

    lines[1..]
        .iter()
        .map(|line| {
            let mut values = split_line(line).into_iter();
            headers
                .iter()
                .map(|header| (header.clone(), values.next().unwrap_or_default()))
                .collect()
        })
        .collect()
}

/// Parse delimited text straight into resource records
pub fn parse_records(text: &str) -> Vec<ResourceRecord> {
    parse(text).iter().map(ResourceRecord::from_row).collect()
}

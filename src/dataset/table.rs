//! Lenient parsing of the comma-separated source table.
//!
//! This layer never fails: malformed rows degrade to partial or empty
//! fields, blank lines are skipped, and numeric content is left for the
//! index builder to interpret. The design assumes the process owner is the
//! only producer of the file.

/// The parsed table: a header row plus positional data rows.
#[derive(Debug)]
pub struct RawTable {
    /// Field names from the first non-blank row, trimmed.
    pub headers: Vec<String>,
    /// Data rows, each padded with empty strings to the header width.
    /// Fields beyond the header width have no name and are dropped.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Position of a header field, if present.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

/// Parse UTF-8 text into a [`RawTable`].
pub fn parse(text: &str) -> RawTable {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());

    let headers: Vec<String> = match lines.next() {
        Some(header) => header.split(',').map(|h| h.trim().to_string()).collect(),
        None => Vec::new(),
    };

    let rows = lines
        .map(|line| {
            let mut fields: Vec<String> = line
                .split(',')
                .take(headers.len())
                .map(|f| f.trim().to_string())
                .collect();
            fields.resize(headers.len(), String::new());
            fields
        })
        .collect();

    RawTable { headers, rows }
}
